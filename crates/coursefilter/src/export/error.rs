//! Error types for the course spreadsheet export.

use thiserror::Error;

/// Errors that can occur while exporting selected courses.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The request named no courses; rejected before touching the source file
    #[error("No course codes provided")]
    NoCourseCodes,

    /// No header cell in the source sheet contains the course code label
    #[error("Course code column not found")]
    CodeColumnNotFound,

    /// The source workbook contains no worksheets
    #[error("Source workbook has no worksheets")]
    NoWorksheet,

    /// The source workbook could not be opened or parsed
    #[error("Failed to read source workbook: {0}")]
    Read(#[from] calamine::Error),

    /// The output workbook could not be built
    #[error("Failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),
}

impl ExportError {
    /// Returns true if the error was caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ExportError::NoCourseCodes)
    }
}
