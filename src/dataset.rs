//! Dataset entity and the identity/role types threaded through every
//! access-checked call.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::data::CellValue;

/// One ingested spreadsheet and its derived metadata. Records are positional:
/// each inner vector is aligned index-for-index with `headers`, so every row
/// exposes the full header set by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub id: Uuid,
    pub owner_id: String,
    pub filename: String,
    pub headers: Vec<String>,
    pub records: Vec<Vec<CellValue>>,
    pub created_at: DateTime<Utc>,
    pub category: String,
    /// Heuristic completeness score in [0,100]; 0 means "not computed" and
    /// is excluded from dashboard averaging.
    pub quality: u8,
    /// Maintained by the chart-creation flow; the core only reads it.
    pub chart_count: u32,
    /// Maintained by the insight-generation flow; the core only reads it.
    pub insight_count: u32,
}

impl Dataset {
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            id: self.id,
            filename: self.filename.clone(),
            rows: self.records.len(),
            columns: self.headers.len(),
            category: self.category.clone(),
            quality: self.quality,
            created_at: self.created_at,
        }
    }
}

/// Listing form returned by dashboard queries; omits the record payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub id: Uuid,
    pub filename: String,
    pub rows: usize,
    pub columns: usize,
    pub category: String,
    pub quality: u8,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// Explicit caller identity for access-checked store operations. There is no
/// ambient identity anywhere in the core.
#[derive(Debug, Clone)]
pub struct Caller {
    pub id: String,
    pub role: Role,
}

impl Caller {
    pub fn user(id: impl Into<String>) -> Self {
        Caller {
            id: id.into(),
            role: Role::User,
        }
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Caller {
            id: id.into(),
            role: Role::Admin,
        }
    }

    pub fn may_access(&self, dataset: &Dataset) -> bool {
        self.role == Role::Admin || self.id == dataset.owner_id
    }
}
