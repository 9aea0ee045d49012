//! Derives a category label and a 0-100 quality score for a decoded sheet.
//!
//! Pure and deterministic: same headers and records always produce the same
//! classification, so ingestion results are reproducible in tests.

use crate::decode::DecodedSheet;

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Keyword table evaluated top-to-bottom against lowercased header names;
/// the first category with any substring hit wins.
pub const CATEGORY_RULES: &[(&str, &[&str])] = &[
    ("Sales", &["sales", "revenue", "order", "customer", "deal"]),
    (
        "Financial",
        &["price", "cost", "budget", "profit", "expense", "invoice"],
    ),
    (
        "Inventory",
        &["stock", "inventory", "quantity", "sku", "warehouse"],
    ),
    (
        "Marketing",
        &["campaign", "clicks", "impressions", "leads", "conversion"],
    ),
    ("HR", &["employee", "salary", "department", "headcount"]),
];

/// Applied to the quality score when any header was auto-renamed during
/// decoding; duplicate headers usually mean a malformed export.
pub const RENAMED_HEADER_PENALTY: f64 = 0.9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub quality: u8,
    pub category: String,
}

pub fn classify(sheet: &DecodedSheet) -> Classification {
    Classification {
        quality: quality_score(sheet),
        category: category_for(&sheet.headers),
    }
}

fn category_for(headers: &[String]) -> String {
    let lowered: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    for (category, keywords) in CATEGORY_RULES {
        let hit = lowered
            .iter()
            .any(|header| keywords.iter().any(|keyword| header.contains(keyword)));
        if hit {
            return (*category).to_string();
        }
    }
    UNCATEGORIZED.to_string()
}

fn quality_score(sheet: &DecodedSheet) -> u8 {
    if sheet.records.is_empty() || sheet.headers.is_empty() {
        return 0;
    }
    let total_cells = sheet.records.len() * sheet.headers.len();
    let non_empty = sheet
        .records
        .iter()
        .flat_map(|record| record.iter())
        .filter(|cell| !cell.is_empty())
        .count();
    let fill_ratio = non_empty as f64 / total_cells as f64;
    let coverage = if sheet.renamed_headers > 0 {
        RENAMED_HEADER_PENALTY
    } else {
        1.0
    };
    (100.0 * fill_ratio * coverage).round().clamp(0.0, 100.0) as u8
}
