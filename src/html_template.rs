use anyhow::{Context, Result};

use crate::map_model::MapModel;

/// Renders the model into one standalone page. Leaflet and markercluster
/// are loaded from unpkg; map data, legend and styling are inlined.
pub fn render_map_html(model: &MapModel) -> Result<String> {
    let data = serde_json::to_string(model).context("Failed to serialize map model")?;
    // Keep a literal "</script>" in user text from closing the data block.
    let data = data.replace("</", "<\\/");

    Ok(MAP_HTML
        .replace("/* STYLESHEET_PLACEHOLDER */", &model.stylesheet)
        .replace("<!-- LEGEND_PLACEHOLDER -->", &model.legend_html)
        .replace("/* MAP_DATA_PLACEHOLDER */", &data))
}

// HTML template for the generated map
const MAP_HTML: &str = r#"<!DOCTYPE html>
<html lang="de">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Foto-Karte</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
    <link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.css" />
    <link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.Default.css" />
    <style>
        html, body { margin: 0; padding: 0; height: 100%; }
        #map { height: 100vh; width: 100%; }
        .photo-pin {
            width: 14px;
            height: 14px;
            border-radius: 50%;
            border: 2px solid #575757;
            box-shadow: 0 1px 3px rgba(0,0,0,0.4);
        }
    </style>
    <style>
/* STYLESHEET_PLACEHOLDER */
    </style>
</head>
<body>
    <div id="map"></div>
<!-- LEGEND_PLACEHOLDER -->

    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
    <script src="https://unpkg.com/leaflet.markercluster@1.5.3/dist/leaflet.markercluster.js"></script>
    <script>
        const model = /* MAP_DATA_PLACEHOLDER */;

        const map = L.map('map', { maxZoom: model.maxZoom });

        // Base layers, exactly one shown
        const baseLayers = {};
        model.baseLayers.forEach(layer => {
            const tiles = L.tileLayer(layer.url, {
                maxZoom: layer.maxZoom,
                attribution: layer.attribution
            });
            if (layer.show) tiles.addTo(map);
            baseLayers[layer.name] = tiles;
        });

        // Photos, clustered with a gray count badge
        const cluster = model.photoCluster;
        const photoLayer = L.markerClusterGroup({
            maxClusterRadius: cluster.options.maxClusterRadius,
            disableClusteringAtZoom: cluster.options.disableClusteringAtZoom,
            iconCreateFunction: function(c) {
                const childCount = c.getChildCount();
                return new L.DivIcon({
                    html: '<div style="background-color: ' + cluster.badgeColor + ';"> <span> ' + childCount + '</span></div>',
                    className: 'marker-cluster',
                    iconSize: new L.Point(cluster.iconSize, cluster.iconSize)
                });
            }
        });

        cluster.markers.forEach(m => {
            const icon = L.divIcon({
                html: '<div class="photo-pin" style="background-color: ' + m.color + ';"></div>',
                className: '',
                iconSize: [18, 18],
                iconAnchor: [9, 9]
            });
            const marker = L.marker([m.position.latitude, m.position.longitude], { icon: icon })
                .bindTooltip(m.tooltip);
            // Lazy popup: the preview image is only created when opened
            marker.bindPopup(() => m.popupHtml, { maxWidth: cluster.popupMaxWidth });
            photoLayer.addLayer(marker);
        });
        photoLayer.addTo(map);

        // Curated locations, never clustered
        const locationLayer = L.featureGroup();
        model.locations.markers.forEach(m => {
            const icon = L.divIcon({
                html: m.iconHtml,
                className: 'location-badge',
                iconSize: [m.iconSize, m.iconSize]
            });
            L.marker([m.position.latitude, m.position.longitude], { icon: icon })
                .bindTooltip(m.tooltip)
                .bindPopup(m.popupHtml)
                .addTo(locationLayer);
        });
        if (model.locations.show) locationLayer.addTo(map);

        const overlays = {};
        overlays[cluster.name] = photoLayer;
        overlays[model.locations.name] = locationLayer;

        // Fit to everything that was plotted
        const bounds = L.latLngBounds([]);
        cluster.markers.concat(model.locations.markers).forEach(m => {
            bounds.extend([m.position.latitude, m.position.longitude]);
        });
        if (bounds.isValid()) {
            map.fitBounds(bounds, { padding: [20, 20] });
        } else {
            map.setView([51.1657, 10.4515], 6);
        }

        if (model.layerControl) {
            const base = {};
            model.layerControl.baseLayers.forEach(name => { base[name] = baseLayers[name]; });
            const over = {};
            model.layerControl.overlays.forEach(name => { over[name] = overlays[name]; });
            L.control.layers(base, over).addTo(map);
        }
    </script>
</body>
</html>
"#;
