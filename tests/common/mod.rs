#![allow(dead_code)]

use chrono::NaiveDateTime;
use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use rust_xlsxwriter::Workbook;
use std::io::Cursor;
use std::path::Path;

pub fn now() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024:06:01 12:00:00", "%Y:%m:%d %H:%M:%S").unwrap()
}

fn field(tag: Tag, value: Value) -> Field {
    Field { tag, ifd_num: In::PRIMARY, value }
}

fn dms(d: u32, m: u32, s_hundredths: u32) -> Value {
    Value::Rational(vec![
        Rational { num: d, denom: 1 },
        Rational { num: m, denom: 1 },
        Rational { num: s_hundredths, denom: 100 },
    ])
}

fn ascii(s: &str) -> Value {
    Value::Ascii(vec![s.as_bytes().to_vec()])
}

/// Position given as (degrees, minutes, seconds*100, hemisphere letter).
pub struct Fix {
    pub lat: (u32, u32, u32, &'static str),
    pub lon: (u32, u32, u32, &'static str),
}

/// Writes a bare TIFF/EXIF blob. kamadak-exif sniffs the container from the
/// magic bytes, so the file extension can still be `.jpg`.
pub fn write_photo(path: &Path, fix: Option<Fix>, date: Option<&str>) {
    let mut fields = Vec::new();
    if let Some(fix) = fix {
        fields.push(field(Tag::GPSLatitudeRef, ascii(fix.lat.3)));
        fields.push(field(Tag::GPSLatitude, dms(fix.lat.0, fix.lat.1, fix.lat.2)));
        fields.push(field(Tag::GPSLongitudeRef, ascii(fix.lon.3)));
        fields.push(field(Tag::GPSLongitude, dms(fix.lon.0, fix.lon.1, fix.lon.2)));
    }
    if let Some(date) = date {
        fields.push(field(Tag::DateTimeOriginal, ascii(date)));
    }
    fields.push(field(Tag::Make, ascii("TestCam")));

    let mut writer = Writer::new();
    for f in &fields {
        writer.push_field(f);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, false).unwrap();
    std::fs::write(path, buf.into_inner()).unwrap();
}

/// Workbook with one sheet per (name, rows); each row is (title, location, text).
pub fn write_workbook(path: &Path, sheets: &[(&str, &[(&str, &str, &str)])]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*name).unwrap();
        sheet.write_string(0, 0, "title").unwrap();
        sheet.write_string(0, 1, "location").unwrap();
        sheet.write_string(0, 2, "text").unwrap();
        for (i, (title, location, text)) in rows.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_string(row, 0, *title).unwrap();
            sheet.write_string(row, 1, *location).unwrap();
            sheet.write_string(row, 2, *text).unwrap();
        }
    }
    workbook.save(path).unwrap();
}
