//! Course catalog loading and the in-memory snapshot served to requests
mod error;
mod types;

pub use error::CatalogError;
pub use types::CourseRecord;

use chrono::{DateTime, Utc};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{error, info};
use types::CatalogRow;

const UTF8_BOM: char = '\u{feff}';

/// Reads course records from CSV data with a header row.
pub fn read_courses_from<R: Read>(reader: R) -> Result<Vec<CourseRecord>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut courses = Vec::new();
    for row in csv_reader.deserialize::<CatalogRow>() {
        courses.push(CourseRecord::from(row?));
    }

    Ok(courses)
}

/// Reads course records from a CSV file, tolerating a leading UTF-8 BOM.
///
/// # Arguments
/// * `path` - Path to the catalog CSV
///
/// # Returns
/// * `Ok(Vec<CourseRecord>)` - All rows, in file order
/// * `Err(CatalogError)` - If the file can't be read or a row is malformed
pub fn read_courses(path: &Path) -> Result<Vec<CourseRecord>, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let content = content.strip_prefix(UTF8_BOM).unwrap_or(&content);
    read_courses_from(content.as_bytes())
}

/// The immutable course collection loaded once at startup.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    courses: Vec<CourseRecord>,
    loaded_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    /// Creates a snapshot over an already-loaded course list.
    pub fn new(courses: Vec<CourseRecord>) -> Self {
        Self {
            courses,
            loaded_at: Utc::now(),
        }
    }

    /// Creates a snapshot with no courses.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Loads the catalog from `path`.
    ///
    /// A missing or corrupt catalog is logged and yields an empty snapshot,
    /// so the service still starts and simply returns no courses.
    pub fn load(path: &Path) -> Self {
        match read_courses(path) {
            Ok(courses) => {
                info!("Loaded {} courses from {}", courses.len(), path.display());
                Self::new(courses)
            }
            Err(e) => {
                error!("Error loading courses: {}", e);
                Self::empty()
            }
        }
    }

    pub fn courses(&self) -> &[CourseRecord] {
        &self.courses
    }

    /// Returns at most the first `limit` courses.
    pub fn head(&self, limit: usize) -> &[CourseRecord] {
        &self.courses[..limit.min(self.courses.len())]
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

impl Default for CatalogSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
