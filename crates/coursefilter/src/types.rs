/// Shared server state
use crate::catalog::CatalogSnapshot;
use crate::export::CourseExporter;

/// State shared by every request handler.
///
/// Nothing in here is mutated after startup, so handlers read it without
/// locking.
pub struct AppState {
    pub catalog: CatalogSnapshot,
    pub exporter: CourseExporter,
    /// Maximum number of courses returned by the listing endpoint
    pub list_limit: usize,
}

impl AppState {
    pub fn new(catalog: CatalogSnapshot, exporter: CourseExporter, list_limit: usize) -> Self {
        Self {
            catalog,
            exporter,
            list_limit,
        }
    }
}
