use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::DecodeError;
use crate::utils::long_path;

/// Reads the EXIF block from any container kamadak-exif understands
/// (JPEG, HEIF/HEIC, TIFF, PNG, WebP).
pub fn read_exif(path: &Path) -> Result<exif::Exif, DecodeError> {
    let file = File::open(long_path(path))?;
    let mut buf_reader = BufReader::new(file);
    let mut exif_reader = exif::Reader::new();
    exif_reader.continue_on_error(true); // Tolerate non-standard EXIF structures

    match exif_reader.read_from_container(&mut buf_reader) {
        Ok(exif) => Ok(exif),
        Err(exif::Error::PartialResult(partial)) => {
            let (exif, errors) = partial.into_inner();
            tracing::debug!(
                "Partially readable EXIF in {} ({} errors ignored)",
                path.display(),
                errors.len()
            );
            Ok(exif)
        }
        Err(e) => Err(DecodeError::Container(e)),
    }
}
