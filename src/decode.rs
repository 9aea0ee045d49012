//! Workbook decoding: byte buffer in, ordered headers plus flat records out.
//!
//! Only the first sheet of a multi-sheet workbook is read. The first row
//! supplies header names; repeated names are suffixed with an incrementing
//! index so the header list stays unique, and blank header cells are named
//! by position (`column_3`). Missing cells become [`CellValue::Empty`] so
//! every record spans the full header set.

use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use log::debug;

use crate::{
    data::CellValue,
    error::{CoreError, Result},
};

pub const ACCEPTED_EXTENSIONS: &[&str] = &["xlsx", "xls"];

/// Output of a successful decode. `renamed_headers` counts the headers that
/// had to be auto-renamed to stay unique; the classifier reads it as a
/// malformed-input signal.
#[derive(Debug, Clone)]
pub struct DecodedSheet {
    pub headers: Vec<String>,
    pub records: Vec<Vec<CellValue>>,
    pub renamed_headers: usize,
}

pub fn decode(bytes: &[u8], filename: &str) -> Result<DecodedSheet> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    if !matches!(extension.as_deref(), Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext)) {
        return Err(CoreError::UnsupportedFormat(filename.to_string()));
    }

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|err| CoreError::UnsupportedFormat(format!("{filename}: {err}")))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => range,
        Some(Err(err)) => {
            return Err(CoreError::UnsupportedFormat(format!("{filename}: {err}")));
        }
        None => return Err(CoreError::EmptyDocument),
    };

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(CoreError::EmptyDocument);
    };
    let (headers, renamed_headers) = normalize_headers(header_row);

    let records: Vec<Vec<CellValue>> = rows
        .map(|row| {
            let mut record: Vec<CellValue> =
                row.iter().map(CellValue::from_sheet_cell).collect();
            record.resize(headers.len(), CellValue::Empty);
            record
        })
        .collect();
    if records.is_empty() {
        return Err(CoreError::EmptyDocument);
    }

    debug!(
        "Decoded '{}': {} column(s), {} row(s), {} renamed header(s)",
        filename,
        headers.len(),
        records.len(),
        renamed_headers
    );
    Ok(DecodedSheet {
        headers,
        records,
        renamed_headers,
    })
}

/// Derives unique header names from the first row. Returns the names in
/// column order plus the count of duplicates that were renamed.
fn normalize_headers(header_row: &[Data]) -> (Vec<String>, usize) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers = Vec::with_capacity(header_row.len());
    let mut renamed = 0;

    for (idx, cell) in header_row.iter().enumerate() {
        let raw = CellValue::from_sheet_cell(cell).as_display();
        let trimmed = raw.trim();
        let base = if trimmed.is_empty() {
            format!("column_{}", idx + 1)
        } else {
            trimmed.to_string()
        };
        let mut name = base.clone();
        let mut suffix = 2;
        while !seen.insert(name.clone()) {
            name = format!("{base}_{suffix}");
            suffix += 1;
            if suffix == 3 {
                renamed += 1;
            }
        }
        headers.push(name);
    }
    (headers, renamed)
}
