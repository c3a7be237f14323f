/// Types for course catalog data
use serde::{Deserialize, Serialize};

/// A single course offering, as served to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseRecord {
    /// Catalog serial number (流水號), unique per offering
    pub code: String,
    pub name: String,
    pub teacher: String,
    pub credits: u32,
    /// Weekday/period time code, e.g. "一34,三2"
    #[serde(rename = "time")]
    pub raw_time: String,
    pub classroom: String,
    /// Required/elective category (選修別)
    #[serde(rename = "type")]
    pub course_type: String,
    /// Full-year or half-year (全與半)
    pub semester: String,
    pub note: String,
    /// Free-text enrolment conditions (分發條件內容)
    pub restrictions: String,
}

/// Raw CSV row from the catalog export. Missing columns read as empty.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct CatalogRow {
    #[serde(rename = "流水號", default)]
    pub code: String,

    #[serde(rename = "名稱與備註", default)]
    pub name: String,

    #[serde(rename = "教授", default)]
    pub teacher: String,

    #[serde(rename = "學分", default)]
    pub credits: String,

    /// "time/classroom", e.g. "一34/E1-101"
    #[serde(rename = "時間", default = "default_time")]
    pub time: String,

    #[serde(rename = "教室", default)]
    pub classroom: String,

    #[serde(rename = "選修別", default)]
    pub course_type: String,

    #[serde(rename = "全與半", default)]
    pub semester: String,

    #[serde(rename = "分發條件內容", default)]
    pub restrictions: String,
}

fn default_time() -> String {
    "/".to_string()
}

impl From<CatalogRow> for CourseRecord {
    fn from(row: CatalogRow) -> Self {
        let mut time_parts = row.time.split('/');
        let raw_time = time_parts.next().unwrap_or_default().to_string();
        let classroom = time_parts
            .next()
            .map(str::to_string)
            .unwrap_or(row.classroom);

        let credits = if !row.credits.is_empty() && row.credits.chars().all(|c| c.is_ascii_digit()) {
            row.credits.parse().unwrap_or(0)
        } else {
            0
        };

        CourseRecord {
            code: row.code,
            name: row.name,
            teacher: row.teacher,
            credits,
            raw_time,
            classroom,
            course_type: row.course_type,
            semester: row.semester,
            note: String::new(),
            restrictions: row.restrictions,
        }
    }
}
