#![allow(dead_code)]

use chrono::{Duration, Utc};
use rust_xlsxwriter::Workbook;
use uuid::Uuid;

use sheetboard::data::CellValue;
use sheetboard::dataset::Dataset;

/// Cell spec for synthesized workbooks; `Blank` leaves the cell unwritten.
pub enum Cell {
    S(&'static str),
    N(f64),
    B(bool),
    Blank,
}

/// Builds an in-memory .xlsx buffer from literal rows (first row = headers).
pub fn workbook_buffer(rows: &[&[Cell]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let (row_idx, col_idx) = (row_idx as u32, col_idx as u16);
            match cell {
                Cell::S(s) => sheet.write(row_idx, col_idx, *s).expect("write string"),
                Cell::N(n) => sheet.write(row_idx, col_idx, *n).expect("write number"),
                Cell::B(b) => sheet.write(row_idx, col_idx, *b).expect("write boolean"),
                Cell::Blank => continue,
            };
        }
    }
    workbook.save_to_buffer().expect("workbook buffer")
}

/// Workbook with two worksheets holding unrelated data; only the first
/// sheet should ever be decoded.
pub fn two_sheet_workbook(first: &[&[Cell]], second: &[&[Cell]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    for rows in [first, second] {
        let sheet = workbook.add_worksheet();
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                let (row_idx, col_idx) = (row_idx as u32, col_idx as u16);
                match cell {
                    Cell::S(s) => sheet.write(row_idx, col_idx, *s).expect("write string"),
                    Cell::N(n) => sheet.write(row_idx, col_idx, *n).expect("write number"),
                    Cell::B(b) => sheet.write(row_idx, col_idx, *b).expect("write boolean"),
                    Cell::Blank => continue,
                };
            }
        }
    }
    workbook.save_to_buffer().expect("workbook buffer")
}

/// Three data rows of (month, sales) with one missing sales cell.
pub fn sales_workbook() -> Vec<u8> {
    workbook_buffer(&[
        &[Cell::S("month"), Cell::S("sales")],
        &[Cell::S("Jan"), Cell::N(100.0)],
        &[Cell::S("Feb"), Cell::Blank],
        &[Cell::S("Mar"), Cell::N(300.0)],
    ])
}

/// Directly-constructed dataset for aggregator and projector tests.
pub fn dataset(owner: &str, category: &str, quality: u8, rows: usize, days_ago: i64) -> Dataset {
    let records = (0..rows)
        .map(|i| {
            vec![
                CellValue::Text(format!("row{i}")),
                CellValue::Number(i as f64),
            ]
        })
        .collect();
    Dataset {
        id: Uuid::new_v4(),
        owner_id: owner.to_string(),
        filename: "fixture.xlsx".to_string(),
        headers: vec!["label".to_string(), "value".to_string()],
        records,
        created_at: Utc::now() - Duration::days(days_ago),
        category: category.to_string(),
        quality,
        chart_count: 0,
        insight_count: 0,
    }
}
