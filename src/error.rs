use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Failure taxonomy for the ingestion and query pipeline. Every variant is
/// terminal for the requested operation; callers branch on the variant, not
/// on message text.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The buffer is not a recognized workbook or the filename extension is
    /// outside the accepted set.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The first sheet holds no data rows (headers alone, or nothing).
    #[error("workbook contains no data rows")]
    EmptyDocument,

    /// No dataset with the requested id exists.
    #[error("dataset not found: {0}")]
    NotFound(Uuid),

    /// The caller is neither the owner nor an administrator.
    #[error("access denied")]
    AccessDenied,

    /// A chart field selection names a header the dataset does not have.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// The requested chart type is not one of bar, line, pie, scatter.
    #[error("unsupported chart type: {0}")]
    UnsupportedChartType(String),

    /// The backing store failed; the collaborator's error is carried as-is.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Storage(err.to_string())
    }
}
