//! Curated locations from a spreadsheet. Every sheet is a category; each row
//! has `title`, `location` (DMS text) and `text` columns.

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayLocation {
    pub title: String,
    pub coordinate_text: String,
    pub description: String,
    /// Name of the sheet the row came from.
    pub category: String,
}

/// Loads all sheets in workbook order, rows in sheet order.
///
/// A missing file is not an error: it is reported and yields no locations.
pub fn load_overlay_locations(path: &Path) -> Result<Vec<OverlayLocation>> {
    if !path.is_file() {
        println!(
            "⚠️  The additional file for markers with name '{}' was not found.",
            path.display()
        );
        tracing::warn!("Overlay workbook {} not found", path.display());
        return Ok(Vec::new());
    }

    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook {}", path.display()))?;

    let mut locations = Vec::new();
    for sheet_name in workbook.sheet_names() {
        match workbook.worksheet_range(&sheet_name) {
            Ok(range) => locations.extend(locations_from_sheet(&sheet_name, &range)),
            Err(e) => tracing::warn!("Skipping unreadable sheet '{}': {}", sheet_name, e),
        }
    }

    tracing::debug!("Loaded {} overlay locations from {}", locations.len(), path.display());
    Ok(locations)
}

/// Like [`load_overlay_locations`] but never fails: unreadable workbooks are
/// logged and treated as empty so the photo map still renders.
pub fn load_overlay_locations_or_empty(path: &Path) -> Vec<OverlayLocation> {
    load_overlay_locations(path).unwrap_or_else(|e| {
        println!("⚠️  Could not read additional locations: {:#}", e);
        tracing::warn!("{:#}", e);
        Vec::new()
    })
}

struct Columns {
    title: Option<usize>,
    location: Option<usize>,
    text: Option<usize>,
}

impl Columns {
    fn from_header(header: &[Data]) -> Self {
        let find = |name: &str| {
            header
                .iter()
                .position(|cell| cell_text(cell).eq_ignore_ascii_case(name))
        };
        Self {
            title: find("title"),
            location: find("location"),
            text: find("text"),
        }
    }
}

fn locations_from_sheet(sheet_name: &str, range: &Range<Data>) -> Vec<OverlayLocation> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Vec::new();
    };
    let columns = Columns::from_header(header);
    if columns.location.is_none() {
        tracing::warn!("Sheet '{}' has no 'location' column", sheet_name);
    }

    let get = |row: &[Data], idx: Option<usize>| {
        idx.and_then(|i| row.get(i)).map(cell_text).unwrap_or_default()
    };

    rows.filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|row| OverlayLocation {
            title: get(row, columns.title),
            coordinate_text: get(row, columns.location),
            description: get(row, columns.text),
            category: sheet_name.to_string(),
        })
        .collect()
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}
