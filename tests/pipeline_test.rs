mod common;

use common::{now, write_photo, write_workbook, Fix};
use geotag_map::exif_parser::{extract_geotag, DecoderConfig};
use geotag_map::overlay::load_overlay_locations;
use geotag_map::pipeline::{self, MapOutcome};
use geotag_map::processing::{decode_photos, search_photos};
use geotag_map::Settings;
use std::fs;
use std::path::Path;

fn settings_in(dir: &Path) -> Settings {
    Settings {
        output_file: dir.join("map.html"),
        overlay_file: dir.join("missing.xlsx"),
        ..Settings::default()
    }
}

const BERLIN: Fix = Fix { lat: (52, 31, 1230, "N"), lon: (13, 24, 3600, "E") };
const MUNICH: Fix = Fix { lat: (48, 8, 1320, "N"), lon: (11, 34, 4800, "E") };
const RIO: Fix = Fix { lat: (22, 54, 3000, "S"), lon: (43, 10, 3500, "W") };

#[test]
fn test_decode_written_exif() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rio.jpg");
    write_photo(&path, Some(RIO), Some("2018:02:10 16:45:00"));

    let tag = extract_geotag(&path, &DecoderConfig::default());
    let lat = tag.latitude().unwrap();
    let lon = tag.longitude().unwrap();
    assert!((lat + (22.0 + 54.0 / 60.0 + 30.0 / 3600.0)).abs() < 1e-9);
    assert!((lon + (43.0 + 10.0 / 60.0 + 35.0 / 3600.0)).abs() < 1e-9);
    assert_eq!(tag.captured_at().unwrap().to_string(), "2018-02-10 16:45:00");
}

#[test]
fn test_gps_without_date_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nodate.jpg");
    write_photo(&path, Some(BERLIN), None);
    assert!(extract_geotag(&path, &DecoderConfig::default()).is_empty());
}

#[test]
fn test_malformed_date_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("baddate.jpg");
    write_photo(&path, Some(BERLIN), Some("10.02.2018 16:45"));
    assert!(extract_geotag(&path, &DecoderConfig::default()).is_empty());
}

#[test]
fn test_five_photos_three_plotted() {
    let dir = tempfile::tempdir().unwrap();
    let photos = dir.path().join("photos");
    fs::create_dir_all(photos.join("trip")).unwrap();

    write_photo(&photos.join("berlin.jpg"), Some(BERLIN), Some("2023:05:01 10:00:00"));
    write_photo(&photos.join("trip/munich.JPEG"), Some(MUNICH), Some("2020:08:15 09:30:00"));
    write_photo(&photos.join("trip/rio.heic"), Some(RIO), Some("2016:12:31 23:59:59"));
    write_photo(&photos.join("indoor.jpg"), None, Some("2022:01:01 12:00:00"));
    write_photo(&photos.join("scan.jpg"), None, Some("2019:03:03 08:00:00"));

    let settings = settings_in(dir.path());
    let outcome = pipeline::run(&[&photos], &settings, now()).unwrap();

    let MapOutcome::Generated { output, report } = outcome else {
        panic!("expected a map");
    };
    assert_eq!(report.total_photos, 5);
    assert_eq!(report.plotted, 3);
    assert_eq!(report.not_shown, 2);

    let html = fs::read_to_string(output).unwrap();
    assert!(html.contains("berlin.jpg"));
    assert!(html.contains("munich.JPEG"));
    assert!(!html.contains("indoor.jpg"));
}

#[test]
fn test_corrupt_file_does_not_affect_others() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.jpg");
    let bad = dir.path().join("bad.jpg");
    write_photo(&good, Some(BERLIN), Some("2023:05:01 10:00:00"));
    fs::write(&bad, b"II*\0garbage that is not a tiff directory").unwrap();

    let paths = search_photos(&[dir.path()]);
    let records = decode_photos(&paths, &DecoderConfig::default(), true);
    let good_record = records.iter().find(|r| r.path == good).unwrap();
    let bad_record = records.iter().find(|r| r.path == bad).unwrap();
    assert!(!good_record.geotag.is_empty());
    assert!(bad_record.geotag.is_empty());
}

#[test]
fn test_no_photos_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let empty = dir.path().join("empty");
    fs::create_dir_all(&empty).unwrap();
    let settings = settings_in(dir.path());

    let outcome = pipeline::run(&[&empty], &settings, now()).unwrap();
    assert_eq!(outcome, MapOutcome::NoPhotos);
    assert!(!settings.output_file.exists());
}

#[test]
fn test_only_untagged_photos_still_renders() {
    let dir = tempfile::tempdir().unwrap();
    let photos = dir.path().join("photos");
    fs::create_dir_all(&photos).unwrap();
    write_photo(&photos.join("a.jpg"), None, Some("2022:01:01 12:00:00"));

    let settings = settings_in(dir.path());
    let outcome = pipeline::run(&[&photos], &settings, now()).unwrap();
    let MapOutcome::Generated { report, .. } = outcome else {
        panic!("expected a map");
    };
    assert_eq!(report.plotted, 0);
    assert_eq!(report.not_shown, 1);
}

#[test]
fn test_overlay_sheets_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = dir.path().join("standorte.xlsx");
    let shops: &[(&str, &str, &str)] = &[
        ("Bakery", "52°31'12.3\"N 13°24'36.0\"E", "Fresh rolls"),
        ("Books", "13°20'0.0\"E 52°30'0.0\"N", "Second hand"),
    ];
    let parks: &[(&str, &str, &str)] =
        &[("Tiergarten", "52°30'52.0\"N 13°21'1.0\"E", "Big park")];
    write_workbook(&workbook, &[("Shops", shops), ("Parks", parks)]);

    let locations = load_overlay_locations(&workbook).unwrap();
    let categories: Vec<&str> = locations.iter().map(|l| l.category.as_str()).collect();
    assert_eq!(categories, vec!["Shops", "Shops", "Parks"]);
    assert_eq!(locations[0].title, "Bakery");
    assert_eq!(locations[1].title, "Books");
    assert_eq!(locations[2].description, "Big park");

    // All three resolve and end up on the map
    let photos = dir.path().join("photos");
    fs::create_dir_all(&photos).unwrap();
    write_photo(&photos.join("berlin.jpg"), Some(BERLIN), Some("2023:05:01 10:00:00"));
    let settings = Settings {
        overlay_file: workbook,
        ..settings_in(dir.path())
    };
    let outcome = pipeline::run(&[&photos], &settings, now()).unwrap();
    let MapOutcome::Generated { report, .. } = outcome else {
        panic!("expected a map");
    };
    assert_eq!(report.locations_plotted, 3);
    assert_eq!(report.locations_skipped, 0);
}

#[test]
fn test_missing_overlay_builds_photo_only_map() {
    let dir = tempfile::tempdir().unwrap();
    let photos = dir.path().join("photos");
    fs::create_dir_all(&photos).unwrap();
    write_photo(&photos.join("berlin.jpg"), Some(BERLIN), Some("2023:05:01 10:00:00"));

    let settings = settings_in(dir.path());
    assert!(load_overlay_locations(&settings.overlay_file).unwrap().is_empty());

    let outcome = pipeline::run(&[&photos], &settings, now()).unwrap();
    let MapOutcome::Generated { output, report } = outcome else {
        panic!("expected a map");
    };
    assert_eq!(report.plotted, 1);
    assert_eq!(report.locations_plotted, 0);
    assert!(output.exists());
}
