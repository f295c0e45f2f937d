//! Free-text coordinate parsing for manually entered locations,
//! e.g. `52°31'12.3"N 13°24'36.0"E` as copied from Google Maps.

use regex::Regex;
use std::sync::LazyLock;

use crate::coordinates::{dms_to_decimal, Axis, DecimalCoordinate, Hemisphere, Rational};

static DMS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([0-9]+)°([0-9]+)['′ ]([0-9]+(?:\.[0-9]+)?)["″]?([NSEW])"#).unwrap()
});

/// Outcome of scanning a string for DMS tokens.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DmsParse {
    /// Number of tokens that matched the pattern and converted cleanly.
    pub matched: usize,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl DmsParse {
    /// Both axes resolved, or nothing.
    pub fn coordinate(&self) -> Option<DecimalCoordinate> {
        DecimalCoordinate::from_axes(self.latitude, self.longitude)
    }
}

/// Scans `text` for every DMS token. Token order does not matter; if an axis
/// appears more than once the last token wins.
pub fn parse_dms(text: &str) -> DmsParse {
    let mut result = DmsParse::default();

    for caps in DMS_RE.captures_iter(text) {
        let (Some(degrees), Some(minutes), Some(seconds)) = (
            caps[1].parse::<u32>().ok().map(Rational::whole),
            caps[2].parse::<u32>().ok().map(Rational::whole),
            Rational::from_decimal_str(&caps[3]),
        ) else {
            tracing::debug!("Skipping out-of-range DMS token '{}'", &caps[0]);
            continue;
        };
        let Some(hemisphere) = caps[4].chars().next().and_then(Hemisphere::from_char) else {
            continue;
        };
        let Some(value) = dms_to_decimal(degrees, minutes, seconds, hemisphere) else {
            continue;
        };

        result.matched += 1;
        match hemisphere.axis() {
            Axis::Latitude => result.latitude = Some(value),
            Axis::Longitude => result.longitude = Some(value),
        }
    }

    result
}
