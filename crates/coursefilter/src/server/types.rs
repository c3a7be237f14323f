//! Request and response bodies for the HTTP API.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::CourseRecord;
use crate::filter::{FilterCriteria, DEFAULT_GRADE};
use crate::schedule::BusySlots;

/// Failure body returned by every endpoint.
#[derive(Debug, Clone, Serialize)]
struct ApiErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// An error response with its HTTP status.
#[derive(Debug, Clone)]
pub struct ApiErrorType {
    status: StatusCode,
    error: String,
    details: Option<String>,
}

impl From<(StatusCode, &str, Option<String>)> for ApiErrorType {
    fn from((status, error, details): (StatusCode, &str, Option<String>)) -> Self {
        Self {
            status,
            error: error.to_string(),
            details,
        }
    }
}

impl From<JsonRejection> for ApiErrorType {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            error: "Invalid request body".to_string(),
            details: Some(rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiErrorType {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            success: false,
            error: self.error,
            details: self.details,
        };

        (self.status, Json(body)).into_response()
    }
}

fn default_grade() -> Option<i64> {
    Some(DEFAULT_GRADE)
}

/// Body of `POST /api/filter-courses`.
///
/// Every field may be omitted or null. A missing grade means first year; a
/// null grade matches no grade label.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    #[serde(default)]
    pub department: Option<String>,

    #[serde(default = "default_grade")]
    pub grade: Option<i64>,

    /// Slot tokens such as "1-1" or "3-A"
    #[serde(default)]
    pub busy_times: Option<Vec<String>>,
}

impl From<FilterRequest> for FilterCriteria {
    fn from(req: FilterRequest) -> Self {
        FilterCriteria {
            department: req.department.unwrap_or_default(),
            grade: req.grade,
            busy_times: BusySlots::from_tokens(req.busy_times.unwrap_or_default()),
        }
    }
}

/// Body of `POST /api/download-courses`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    #[serde(default)]
    pub course_codes: Option<Vec<String>>,
}

/// Course list body shared by the filter and listing endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct CourseListResponse<'a> {
    pub success: bool,
    pub count: usize,
    pub courses: &'a [&'a CourseRecord],
}

/// Listing body; `count` is the catalog size even when `courses` is truncated.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPageResponse<'a> {
    pub success: bool,
    pub count: usize,
    pub courses: &'a [CourseRecord],
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub courses_loaded: usize,
    pub loaded_at: DateTime<Utc>,
}
