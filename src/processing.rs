use ignore::WalkBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use crate::constants::PHOTO_EXTENSIONS;
use crate::coordinates::{GeoTag, PhotoRecord};
use crate::exif_parser::{extract_geotag, DecoderConfig};

/// Recursively collects `.jpg`, `.jpeg` and `.heic` files under each directory.
/// Overlapping directories yield duplicate entries; nothing is deduplicated.
pub fn search_photos<P: AsRef<Path>>(directories: &[P]) -> Vec<PathBuf> {
    let mut photo_paths = Vec::new();

    for directory in directories {
        let directory = directory.as_ref();
        if !directory.is_dir() {
            println!("❌ Photos directory not found: {}", directory.display());
            continue;
        }

        // Plain recursive listing: hidden entries and ignore files are not special.
        let walker = WalkBuilder::new(directory).standard_filters(false).build();
        let mut found: Vec<PathBuf> = walker
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(
                        "Skipping unreadable entry under {}: {}",
                        directory.display(),
                        e
                    );
                    None
                }
            })
            .filter(|e| e.file_type().map_or(false, |ft| ft.is_file()))
            .map(|e| e.into_path())
            .filter(|p| is_photo(p))
            .collect();
        found.sort();
        photo_paths.extend(found);

        println!("🔍 Found {} photos in path {}", photo_paths.len(), directory.display());
    }

    photo_paths
}

pub fn is_photo(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| PHOTO_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

/// Decodes every photo. Output order matches input order, so each record
/// keeps its own path regardless of which worker finished first.
pub fn decode_photos(
    paths: &[PathBuf],
    config: &DecoderConfig,
    parallel: bool,
) -> Vec<PhotoRecord> {
    let pb = ProgressBar::new(paths.len() as u64);
    let template = "Collecting GPS Data [{bar:40}] {pos}/{len} ({eta})";
    if let Ok(style) = ProgressStyle::default_bar().template(template) {
        pb.set_style(style);
    }

    let decode = |path: &PathBuf| {
        let record = PhotoRecord {
            path: path.clone(),
            geotag: decode_isolated(path, config),
        };
        pb.inc(1);
        record
    };

    let records: Vec<PhotoRecord> = if parallel {
        paths.par_iter().map(decode).collect()
    } else {
        paths.iter().map(decode).collect()
    };

    pb.finish_and_clear();
    records
}

/// Per-file fault boundary: even a panic inside the EXIF reader only
/// costs this one photo its geotag.
fn decode_isolated(path: &Path, config: &DecoderConfig) -> GeoTag {
    panic::catch_unwind(AssertUnwindSafe(|| extract_geotag(path, config))).unwrap_or_else(|_| {
        tracing::warn!("EXIF decoder panicked on {}", path.display());
        GeoTag::empty()
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    pub total: usize,
    pub geotagged: usize,
    pub without_geotag: usize,
}

pub fn summarize(records: &[PhotoRecord]) -> DecodeSummary {
    let geotagged = records.iter().filter(|r| !r.geotag.is_empty()).count();
    DecodeSummary {
        total: records.len(),
        geotagged,
        without_geotag: records.len() - geotagged,
    }
}
