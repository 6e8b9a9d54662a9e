//! Error types and handling.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Snapshot could not be written; the in-memory change has already been applied
    #[error("Failed to save attendance data: {0}")]
    Persist(#[source] std::io::Error),

    /// Snapshot document is not valid JSON for the expected layout
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excel export error
    #[error("Export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    /// PDF report error
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a validation error with message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a PDF error with message
    pub fn pdf(msg: impl Into<String>) -> Self {
        Self::Pdf(msg.into())
    }

    /// Create a not found error with message
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Whether the operation changed in-memory state even though it failed.
    ///
    /// Only a failed snapshot write leaves the store ahead of what is on disk.
    pub fn is_unsaved_change(&self) -> bool {
        matches!(self, Self::Persist(_))
    }
}
