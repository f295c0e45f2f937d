//! Geographic primitives shared by the EXIF decoder and the DMS text parser.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Which coordinate a hemisphere letter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    pub fn name(self) -> &'static str {
        match self {
            Axis::Latitude => "latitude",
            Axis::Longitude => "longitude",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Hemisphere::North | Hemisphere::South => Axis::Latitude,
            Hemisphere::East | Hemisphere::West => Axis::Longitude,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Hemisphere::North => Hemisphere::South,
            Hemisphere::South => Hemisphere::North,
            Hemisphere::East => Hemisphere::West,
            Hemisphere::West => Hemisphere::East,
        }
    }

    fn is_negative(self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }
}

/// Unsigned fraction as stored in EXIF RATIONAL fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub num: u32,
    pub denom: u32,
}

impl Rational {
    pub const fn new(num: u32, denom: u32) -> Self {
        Self { num, denom }
    }

    pub const fn whole(value: u32) -> Self {
        Self { num: value, denom: 1 }
    }

    /// Parses an unsigned decimal such as `12.345` into `12345/1000`.
    /// Fraction digits beyond the seventh are dropped (sub-micro-arcsecond).
    pub fn from_decimal_str(text: &str) -> Option<Self> {
        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i, f),
            None => (text, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
            return None;
        }

        let frac_part = &frac_part[..frac_part.len().min(7)];
        let denom = 10u32.checked_pow(frac_part.len() as u32)?;
        let int_value: u32 = if int_part.is_empty() { 0 } else { int_part.parse().ok()? };
        let frac_value: u32 = if frac_part.is_empty() { 0 } else { frac_part.parse().ok()? };
        let num = int_value.checked_mul(denom)?.checked_add(frac_value)?;
        Some(Self { num, denom })
    }
}

/// Converts a degree/minute/second triple to signed decimal degrees.
///
/// The sum `d + m/60 + s/3600` is formed as a single exact fraction and only
/// divided once at the end. Returns `None` if any denominator is zero.
pub fn dms_to_decimal(
    degrees: Rational,
    minutes: Rational,
    seconds: Rational,
    hemisphere: Hemisphere,
) -> Option<f64> {
    if degrees.denom == 0 || minutes.denom == 0 || seconds.denom == 0 {
        return None;
    }

    let (dn, dd) = (u128::from(degrees.num), u128::from(degrees.denom));
    let (mn, md) = (u128::from(minutes.num), u128::from(minutes.denom));
    let (sn, sd) = (u128::from(seconds.num), u128::from(seconds.denom));

    // Common denominator dd*md*sd*3600 fits easily in u128 for u32 inputs.
    let numerator = dn * md * sd * 3600 + mn * dd * sd * 60 + sn * dd * md;
    let denominator = dd * md * sd * 3600;

    let value = numerator as f64 / denominator as f64;
    Some(if hemisphere.is_negative() { -value } else { value })
}

/// A fully resolved position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecimalCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl DecimalCoordinate {
    /// Only yields a coordinate if both axes were resolved.
    pub fn from_axes(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        Some(Self {
            latitude: latitude?,
            longitude: longitude?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct GeoFix {
    position: DecimalCoordinate,
    captured_at: NaiveDateTime,
}

/// Decoded position and capture time of one photo.
///
/// Either all of latitude, longitude and capture time are present or none is;
/// partial inputs collapse to the empty tag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoTag(Option<GeoFix>);

impl GeoTag {
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn new(latitude: f64, longitude: f64, captured_at: NaiveDateTime) -> Self {
        Self(Some(GeoFix {
            position: DecimalCoordinate { latitude, longitude },
            captured_at,
        }))
    }

    pub fn from_parts(
        latitude: Option<f64>,
        longitude: Option<f64>,
        captured_at: Option<NaiveDateTime>,
    ) -> Self {
        match (latitude, longitude, captured_at) {
            (Some(lat), Some(lon), Some(at)) => Self::new(lat, lon, at),
            _ => Self::empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn position(&self) -> Option<DecimalCoordinate> {
        self.0.map(|fix| fix.position)
    }

    pub fn latitude(&self) -> Option<f64> {
        self.position().map(|p| p.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.position().map(|p| p.longitude)
    }

    pub fn captured_at(&self) -> Option<NaiveDateTime> {
        self.0.map(|fix| fix.captured_at)
    }
}

/// A discovered photo paired with its decoded geotag.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoRecord {
    pub path: std::path::PathBuf,
    pub geotag: GeoTag,
}
