use chrono::NaiveDateTime;
use exif::{In, Tag, Value};

use crate::constants::{DEFAULT_LATITUDE_REF, DEFAULT_LONGITUDE_REF, EXIF_DATE_FORMAT};
use crate::coordinates::{dms_to_decimal, Axis, GeoTag, Hemisphere, Rational};
use crate::error::DecodeError;

/// Parameters for turning raw GPS/date tags into a [`GeoTag`].
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    /// Used when `GPSLatitudeRef` is missing. See [`DEFAULT_LATITUDE_REF`].
    pub default_latitude_ref: char,
    /// Used when `GPSLongitudeRef` is missing.
    pub default_longitude_ref: char,
    pub date_format: &'static str,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            default_latitude_ref: DEFAULT_LATITUDE_REF,
            default_longitude_ref: DEFAULT_LONGITUDE_REF,
            date_format: EXIF_DATE_FORMAT,
        }
    }
}

/// The handful of tags the decoder looks at, lifted out of the EXIF tree.
///
/// `None` means the tag is absent. A tag that is present but of the wrong
/// type is kept as an empty value so it fails decoding instead of being
/// mistaken for "absent".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGeoTags {
    pub latitude: Option<Vec<Rational>>,
    pub latitude_ref: Option<String>,
    pub longitude: Option<Vec<Rational>>,
    pub longitude_ref: Option<String>,
    pub date_taken: Option<String>,
}

impl RawGeoTags {
    pub fn from_exif(exif: &exif::Exif) -> Self {
        Self {
            latitude: rational_field(exif, Tag::GPSLatitude),
            latitude_ref: ascii_field(exif, Tag::GPSLatitudeRef),
            longitude: rational_field(exif, Tag::GPSLongitude),
            longitude_ref: ascii_field(exif, Tag::GPSLongitudeRef),
            date_taken: ascii_field(exif, Tag::DateTimeOriginal),
        }
    }
}

fn rational_field(exif: &exif::Exif, tag: Tag) -> Option<Vec<Rational>> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match field.value {
        Value::Rational(ref vec) => {
            Some(vec.iter().map(|r| Rational::new(r.num, r.denom)).collect())
        }
        _ => Some(Vec::new()),
    }
}

fn ascii_field(exif: &exif::Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match field.value {
        Value::Ascii(ref vec) => Some(
            vec.first()
                .map(|bytes| {
                    String::from_utf8_lossy(bytes)
                        .trim_matches(|c: char| c == '\0' || c.is_whitespace())
                        .to_string()
                })
                .unwrap_or_default(),
        ),
        _ => Some(String::new()),
    }
}

/// Decodes position and capture time. Absent coordinate or date tags are
/// reported as [`DecodeError::MissingTag`]; nothing partial is ever returned.
pub fn decode_geotag(raw: &RawGeoTags, config: &DecoderConfig) -> Result<GeoTag, DecodeError> {
    let latitude = raw.latitude.as_deref().ok_or(DecodeError::MissingTag("GPSLatitude"))?;
    let longitude = raw.longitude.as_deref().ok_or(DecodeError::MissingTag("GPSLongitude"))?;
    let date_taken = raw.date_taken.as_deref().ok_or(DecodeError::MissingTag("DateTimeOriginal"))?;

    // Some cameras write empty refs next to all-zero coordinates.
    let lat_ref = resolve_reference(
        raw.latitude_ref.as_deref(),
        config.default_latitude_ref,
        Axis::Latitude,
    )?;
    let lon_ref = resolve_reference(
        raw.longitude_ref.as_deref(),
        config.default_longitude_ref,
        Axis::Longitude,
    )?;

    let lat = triple_to_decimal(latitude, lat_ref, "GPSLatitude")?;
    let lon = triple_to_decimal(longitude, lon_ref, "GPSLongitude")?;
    let captured_at = parse_capture_date(date_taken, config.date_format)?;

    Ok(GeoTag::new(lat, lon, captured_at))
}

fn resolve_reference(
    tag: Option<&str>,
    default: char,
    axis: Axis,
) -> Result<Hemisphere, DecodeError> {
    let letter = match tag {
        None => default,
        Some(value) => value.chars().next().ok_or(DecodeError::EmptyReference(axis.name()))?,
    };

    Hemisphere::from_char(letter.to_ascii_uppercase())
        .filter(|h| h.axis() == axis)
        .ok_or_else(|| DecodeError::InvalidReference {
            axis: axis.name(),
            value: letter.to_string(),
        })
}

fn triple_to_decimal(
    triple: &[Rational],
    hemisphere: Hemisphere,
    tag: &'static str,
) -> Result<f64, DecodeError> {
    let [degrees, minutes, seconds] = triple else {
        return Err(DecodeError::MalformedTriple(tag));
    };
    dms_to_decimal(*degrees, *minutes, *seconds, hemisphere)
        .ok_or(DecodeError::ZeroDenominator(tag))
}

pub fn parse_capture_date(value: &str, format: &'static str) -> Result<NaiveDateTime, DecodeError> {
    NaiveDateTime::parse_from_str(value, format).map_err(|_| DecodeError::BadDate {
        value: value.to_string(),
        format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(d: u32, m: u32, s: (u32, u32)) -> Option<Vec<Rational>> {
        Some(vec![Rational::whole(d), Rational::whole(m), Rational::new(s.0, s.1)])
    }

    fn full() -> RawGeoTags {
        RawGeoTags {
            latitude: triple(52, 30, (0, 1)),
            latitude_ref: Some("N".into()),
            longitude: triple(13, 24, (3600, 100)),
            longitude_ref: Some("E".into()),
            date_taken: Some("2019:07:14 18:22:05".into()),
        }
    }

    #[test]
    fn test_full_tags_decode() {
        let tag = decode_geotag(&full(), &DecoderConfig::default()).unwrap();
        assert_eq!(tag.latitude(), Some(52.5));
        assert!((tag.longitude().unwrap() - 13.41).abs() < 1e-12);
        assert_eq!(
            tag.captured_at().unwrap().format("%Y-%m-%d %H:%M:%S").to_string(),
            "2019-07-14 18:22:05"
        );
    }

    #[test]
    fn test_south_west_negated() {
        let mut raw = full();
        raw.latitude_ref = Some("S".into());
        raw.longitude_ref = Some("W".into());
        let tag = decode_geotag(&raw, &DecoderConfig::default()).unwrap();
        assert_eq!(tag.latitude(), Some(-52.5));
        assert!(tag.longitude().unwrap() < 0.0);
    }

    #[test]
    fn test_missing_refs_use_regional_default() {
        let mut raw = full();
        raw.latitude_ref = None;
        raw.longitude_ref = None;
        let tag = decode_geotag(&raw, &DecoderConfig::default()).unwrap();
        assert_eq!(tag.latitude(), Some(52.5));
        assert!(tag.longitude().unwrap() > 0.0);

        let southern = DecoderConfig {
            default_latitude_ref: 'S',
            ..DecoderConfig::default()
        };
        let tag = decode_geotag(&raw, &southern).unwrap();
        assert_eq!(tag.latitude(), Some(-52.5));
    }

    #[test]
    fn test_empty_ref_rejected() {
        let mut raw = full();
        raw.longitude_ref = Some(String::new());
        assert!(matches!(
            decode_geotag(&raw, &DecoderConfig::default()),
            Err(DecodeError::EmptyReference("longitude"))
        ));
    }

    #[test]
    fn test_wrong_axis_ref_rejected() {
        let mut raw = full();
        raw.latitude_ref = Some("E".into());
        assert!(matches!(
            decode_geotag(&raw, &DecoderConfig::default()),
            Err(DecodeError::InvalidReference { .. })
        ));
    }

    #[test]
    fn test_exactly_one_field_present_never_decodes() {
        let base = full();
        let only_lat = RawGeoTags { latitude: base.latitude.clone(), ..Default::default() };
        let only_lon = RawGeoTags { longitude: base.longitude.clone(), ..Default::default() };
        let only_date = RawGeoTags { date_taken: base.date_taken.clone(), ..Default::default() };

        for raw in [only_lat, only_lon, only_date] {
            let with_refs = RawGeoTags {
                latitude_ref: Some("N".into()),
                longitude_ref: Some("E".into()),
                ..raw.clone()
            };
            for candidate in [raw, with_refs] {
                let result = decode_geotag(&candidate, &DecoderConfig::default());
                assert!(matches!(result, Err(DecodeError::MissingTag(_))), "{:?}", candidate);
            }
        }
    }

    #[test]
    fn test_bad_date_is_decode_failure() {
        let mut raw = full();
        raw.date_taken = Some("2019-07-14 18:22:05".into());
        assert!(matches!(
            decode_geotag(&raw, &DecoderConfig::default()),
            Err(DecodeError::BadDate { .. })
        ));
    }

    #[test]
    fn test_short_triple_and_zero_denominator() {
        let mut raw = full();
        raw.latitude = Some(vec![Rational::whole(52), Rational::whole(30)]);
        assert!(matches!(
            decode_geotag(&raw, &DecoderConfig::default()),
            Err(DecodeError::MalformedTriple("GPSLatitude"))
        ));

        let mut raw = full();
        raw.longitude = triple(13, 24, (1, 0));
        assert!(matches!(
            decode_geotag(&raw, &DecoderConfig::default()),
            Err(DecodeError::ZeroDenominator("GPSLongitude"))
        ));
    }
}
