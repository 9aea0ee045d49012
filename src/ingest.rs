//! Upload pipeline: decode, classify, persist, in that order. Decoding and
//! classification both complete before the store is touched, so a failed
//! ingestion never leaves a partial dataset behind.

use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    classify,
    data::CellValue,
    decode,
    error::Result,
    store::{DatasetStore, NewDataset},
};

/// Rows returned to the caller as an ingestion sample.
pub const SAMPLE_ROWS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReceipt {
    pub dataset_id: Uuid,
    pub headers: Vec<String>,
    pub preview_rows: Vec<Vec<CellValue>>,
}

pub fn ingest(
    store: &mut dyn DatasetStore,
    owner_id: &str,
    filename: &str,
    bytes: &[u8],
) -> Result<IngestReceipt> {
    let sheet = decode::decode(bytes, filename)?;
    let classification = classify::classify(&sheet);
    let preview_rows: Vec<Vec<CellValue>> =
        sheet.records.iter().take(SAMPLE_ROWS).cloned().collect();

    let dataset = store.save(NewDataset {
        owner_id: owner_id.to_string(),
        filename: filename.to_string(),
        headers: sheet.headers,
        records: sheet.records,
        category: classification.category,
        quality: classification.quality,
    })?;

    info!(
        "Ingested '{}' for owner '{}': {} row(s), category '{}', quality {}",
        filename,
        owner_id,
        dataset.row_count(),
        dataset.category,
        dataset.quality
    );
    Ok(IngestReceipt {
        dataset_id: dataset.id,
        headers: dataset.headers,
        preview_rows,
    })
}
