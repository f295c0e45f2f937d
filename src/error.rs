use thiserror::Error;

/// Reasons a single photo yields no geotag.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to open photo: {0}")]
    Io(#[from] std::io::Error),

    #[error("unreadable EXIF container: {0}")]
    Container(#[from] exif::Error),

    #[error("missing {0} tag")]
    MissingTag(&'static str),

    #[error("empty {0} reference")]
    EmptyReference(&'static str),

    #[error("invalid {axis} reference '{value}'")]
    InvalidReference { axis: &'static str, value: String },

    #[error("{0} is not a degree/minute/second rational triple")]
    MalformedTriple(&'static str),

    #[error("zero denominator in {0}")]
    ZeroDenominator(&'static str),

    #[error("capture date '{value}' does not match {format}")]
    BadDate { value: String, format: &'static str },
}

impl DecodeError {
    /// Plain absence of metadata, as opposed to corrupt metadata.
    pub fn is_missing_metadata(&self) -> bool {
        matches!(
            self,
            DecodeError::MissingTag(_) | DecodeError::Container(exif::Error::NotFound(_))
        )
    }
}
