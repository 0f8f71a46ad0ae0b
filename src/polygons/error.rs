use thiserror::Error;

/// Errors that can occur when exporting geohash polygons
#[derive(Debug, Error)]
pub enum ExportError {
    /// One of the table, magnitude column or output paths was not given.
    /// Nothing is written.
    #[error("Error: Must pass all parameters to function")]
    MissingParameter,

    /// Missing column, non-numeric corner or CSV failure
    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Type alias for Results using ExportError
pub type Result<T> = std::result::Result<T, ExportError>;
