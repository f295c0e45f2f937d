pub mod generic;
pub mod reader;

use std::path::Path;

pub use generic::{decode_geotag, parse_capture_date, DecoderConfig, RawGeoTags};
pub use reader::read_exif;

use crate::coordinates::GeoTag;

/// Decodes one photo. Every failure ends here as an empty tag; a bad file
/// never reaches the caller as an error.
pub fn extract_geotag(path: &Path, config: &DecoderConfig) -> GeoTag {
    let result =
        read_exif(path).and_then(|exif| decode_geotag(&RawGeoTags::from_exif(&exif), config));

    match result {
        Ok(tag) => {
            tracing::debug!("Decoded {}: {:?}", path.display(), tag);
            tag
        }
        Err(e) if e.is_missing_metadata() => {
            tracing::debug!("No geotag in {}: {}", path.display(), e);
            GeoTag::empty()
        }
        Err(e) => {
            tracing::warn!("Could not read EXIF data from {}: {}", path.display(), e);
            GeoTag::empty()
        }
    }
}
