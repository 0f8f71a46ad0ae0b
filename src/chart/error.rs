use thiserror::Error;

/// Errors that can occur when building or rendering a temperature chart
#[derive(Debug, Error)]
pub enum ChartError {
    /// An array-like parameter had a type other than a list or numeric array.
    /// No chart is produced.
    #[error("Error: {name} must be a numeric array or list")]
    InvalidParameter { name: &'static str },

    /// An hour that is not an integer in 0..=23
    #[error("Error: hour {hour} is outside 0-23 or not a whole number")]
    HourOutOfRange { hour: f64 },

    /// A per-hour parameter whose length differs from `hours`
    #[error("Error: {name} has {actual} entries but hours has {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Table column missing or of the wrong type
    #[error("Table error: {0}")]
    Table(#[from] polars::prelude::PolarsError),

    /// No usable font for chart text
    #[error("Font error: {0}")]
    Font(String),

    /// Drawing backend failure
    #[error("Render error: {0}")]
    Render(String),

    /// PNG encoding failure
    #[error("PNG encoding error: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl<E> From<plotters::drawing::DrawingAreaErrorKind<E>> for ChartError
where
    E: std::error::Error + Send + Sync,
{
    fn from(e: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ChartError::Render(e.to_string())
    }
}

/// Type alias for Results using ChartError
pub type Result<T> = std::result::Result<T, ChartError>;
