use anyhow::Result;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

use crate::assets::MapAssets;
use crate::coordinates::PhotoRecord;
use crate::html_template::render_map_html;
use crate::map_model::BuildReport;
use crate::overlay::load_overlay_locations_or_empty;
use crate::processing::{decode_photos, search_photos, summarize};
use crate::settings::Settings;
use crate::utils::write_atomically;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapOutcome {
    Generated { output: PathBuf, report: BuildReport },
    /// Nothing to render; no file was written.
    NoPhotos,
}

/// Discovery, decoding and map generation for a set of directories.
pub fn run<P: AsRef<Path>>(
    directories: &[P],
    settings: &Settings,
    now: NaiveDateTime,
) -> Result<MapOutcome> {
    println!("Searching...");
    let photo_paths = search_photos(directories);

    let records = decode_photos(&photo_paths, &settings.decoder_config(), settings.parallel);
    let summary = summarize(&records);
    tracing::info!(
        "Decoded {} photos: {} with geotag, {} without",
        summary.total,
        summary.geotagged,
        summary.without_geotag
    );

    println!("Creating map...");
    build_map(&records, settings, now)
}

/// Builds and writes the map for already decoded photos. The output file is
/// only touched once the whole document has been rendered.
pub fn build_map(
    records: &[PhotoRecord],
    settings: &Settings,
    now: NaiveDateTime,
) -> Result<MapOutcome> {
    if records.is_empty() {
        println!("No geotagged photos found.");
        return Ok(MapOutcome::NoPhotos);
    }

    let locations = load_overlay_locations_or_empty(&settings.overlay_file);
    let assets = MapAssets::embedded()?;
    let (model, report) = settings.map_builder().build(records, &locations, &assets, now);
    if report.locations_skipped > 0 {
        tracing::warn!("{} locations could not be placed", report.locations_skipped);
    }

    let html = render_map_html(&model)?;
    write_atomically(&settings.output_file, html.as_bytes())?;

    println!(
        "🗺️  Map generated with {} geotags. Check {} for the result.",
        report.plotted,
        settings.output_file.display()
    );

    Ok(MapOutcome::Generated {
        output: settings.output_file.clone(),
        report,
    })
}
