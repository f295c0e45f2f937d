//! The render target: base layers, clustered photo markers, curated
//! location markers, legend and layer control.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::assets::MapAssets;
use crate::color::AgeColormap;
use crate::constants::*;
use crate::coordinates::{DecimalCoordinate, PhotoRecord};
use crate::dms_parser::parse_dms;
use crate::overlay::OverlayLocation;
use crate::utils::{escape_html, photo_url};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayer {
    pub name: String,
    pub url: String,
    pub attribution: String,
    pub max_zoom: u8,
    pub show: bool,
}

/// Leaflet.markercluster options, serialized with their JS names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterOptions {
    pub max_cluster_radius: u32,
    pub disable_clustering_at_zoom: u8,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            max_cluster_radius: MAX_CLUSTER_RADIUS,
            disable_clustering_at_zoom: DISABLE_CLUSTERING_AT_ZOOM,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoMarker {
    pub position: DecimalCoordinate,
    pub color: String,
    pub tooltip: String,
    pub popup_html: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerCluster {
    pub name: String,
    pub options: ClusterOptions,
    pub badge_color: String,
    pub icon_size: u32,
    pub popup_max_width: u32,
    pub markers: Vec<PhotoMarker>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMarker {
    pub position: DecimalCoordinate,
    pub category: String,
    pub icon_html: String,
    pub icon_size: u32,
    pub tooltip: String,
    pub popup_html: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureGroup {
    pub name: String,
    pub show: bool,
    pub markers: Vec<LocationMarker>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerControl {
    pub base_layers: Vec<String>,
    pub overlays: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapModel {
    pub max_zoom: u8,
    pub base_layers: Vec<TileLayer>,
    pub photo_cluster: MarkerCluster,
    pub locations: FeatureGroup,
    #[serde(skip)]
    pub legend_html: String,
    #[serde(skip)]
    pub stylesheet: String,
    pub layer_control: Option<LayerControl>,
}

impl MapModel {
    /// Layer control lists whatever layers exist at the time it is added,
    /// so this must run after every layer has been added.
    fn add_layer_control(&mut self) {
        self.layer_control = Some(LayerControl {
            base_layers: self.base_layers.iter().map(|l| l.name.clone()).collect(),
            overlays: vec![self.photo_cluster.name.clone(), self.locations.name.clone()],
        });
    }
}

/// Counts reported after building the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub total_photos: usize,
    pub plotted: usize,
    pub not_shown: usize,
    pub locations_plotted: usize,
    pub locations_skipped: usize,
}

pub struct MapBuilder {
    cluster_options: ClusterOptions,
    colormap: AgeColormap,
    max_zoom: u8,
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::new(ClusterOptions::default(), AgeColormap::default(), MAP_MAX_ZOOM)
    }
}

impl MapBuilder {
    pub fn new(cluster_options: ClusterOptions, colormap: AgeColormap, max_zoom: u8) -> Self {
        Self {
            cluster_options,
            colormap,
            max_zoom,
        }
    }

    pub fn build(
        &self,
        photos: &[PhotoRecord],
        locations: &[OverlayLocation],
        assets: &MapAssets,
        now: NaiveDateTime,
    ) -> (MapModel, BuildReport) {
        let mut report = BuildReport {
            total_photos: photos.len(),
            ..Default::default()
        };

        let mut model = MapModel {
            max_zoom: self.max_zoom,
            base_layers: default_base_layers(),
            photo_cluster: MarkerCluster {
                name: PHOTO_LAYER_NAME.to_string(),
                options: self.cluster_options,
                badge_color: CLUSTER_BADGE_COLOR.to_string(),
                icon_size: CLUSTER_ICON_SIZE,
                popup_max_width: POPUP_MAX_WIDTH,
                markers: Vec::new(),
            },
            locations: FeatureGroup {
                name: OVERLAY_LAYER_NAME.to_string(),
                show: true,
                markers: Vec::new(),
            },
            legend_html: String::new(),
            stylesheet: String::new(),
            layer_control: None,
        };

        for photo in photos {
            match self.photo_marker(photo, now) {
                Some(marker) => model.photo_cluster.markers.push(marker),
                None => report.not_shown += 1,
            }
        }
        report.plotted = model.photo_cluster.markers.len();

        for location in locations {
            match location_marker(location) {
                Some(marker) => model.locations.markers.push(marker),
                None => {
                    tracing::debug!(
                        "Skipping location '{}': cannot resolve '{}'",
                        location.title,
                        location.coordinate_text
                    );
                    report.locations_skipped += 1;
                }
            }
        }
        report.locations_plotted = model.locations.markers.len();

        model.legend_html = assets.legend_html.clone();
        model.stylesheet = assets.stylesheet.clone();
        model.add_layer_control();

        (model, report)
    }

    fn photo_marker(&self, photo: &PhotoRecord, now: NaiveDateTime) -> Option<PhotoMarker> {
        let position = photo.geotag.position()?;
        let captured_at = photo.geotag.captured_at()?;

        let url = escape_html(&photo_url(&photo.path));
        let date = captured_at.format(DISPLAY_DATE_FORMAT).to_string();
        let popup_html = format!(
            concat!(
                "<img src='{url}' loading='lazy' style='width:{size}px;height:{size}px;'><br> ",
                "<a>{date} </a> <a href='{url}' target='_blank'> -&gt; Link</a>"
            ),
            url = url,
            date = date,
            size = POPUP_PREVIEW_SIZE,
        );

        Some(PhotoMarker {
            position,
            color: self.colormap.color_for(Some(captured_at), now),
            tooltip: PHOTO_TOOLTIP.to_string(),
            popup_html,
        })
    }
}

fn location_marker(location: &OverlayLocation) -> Option<LocationMarker> {
    let position = parse_dms(&location.coordinate_text).coordinate()?;
    Some(LocationMarker {
        position,
        category: location.category.clone(),
        icon_html: location_badge(&location.category),
        icon_size: LOCATION_BADGE_SIZE,
        tooltip: escape_html(&location.title),
        popup_html: format!(
            "<b>{}</b><br>{}",
            escape_html(&location.title),
            escape_html(&location.description)
        ),
    })
}

/// Small gray circle with the category name in it.
pub fn location_badge(category: &str) -> String {
    format!(
        concat!(
            "<div style=\"display: inline-block; width: {size}px; height: {size}px; ",
            "background-color: gray; color: white; border-radius: 50%; text-align: center; ",
            "line-height: {size}px; font-family: Arial; font-size: 7pt;\">{label}</div>"
        ),
        size = LOCATION_BADGE_SIZE,
        label = escape_html(category),
    )
}

pub fn default_base_layers() -> Vec<TileLayer> {
    vec![
        TileLayer {
            name: "Open Street Map Deutschland".to_string(),
            url: "https://tile.openstreetmap.de/{z}/{x}/{y}.png".to_string(),
            attribution: concat!(
                "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> ",
                "contributors"
            )
            .to_string(),
            max_zoom: 21,
            show: true,
        },
        TileLayer {
            name: "ÖPNV Karte".to_string(),
            url: "https://tileserver.memomaps.de/tilegen/{z}/{x}/{y}.png".to_string(),
            attribution: concat!(
                "Map <a href=\"https://memomaps.de/\">memomaps.de</a> ",
                "<a href=\"http://creativecommons.org/licenses/by-sa/2.0/\">CC-BY-SA</a>, ",
                "map data &copy; ",
                "<a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
            )
            .to_string(),
            max_zoom: 18,
            show: false,
        },
    ]
}
