use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::filter::{filter_courses, FilterCriteria};
use crate::server::types::{
    ApiErrorType, CatalogPageResponse, CourseListResponse, FilterRequest,
};
use crate::types::AppState;

/// POST /api/filter-courses
/// Returns every course that fits the requester's free time, department and grade
pub async fn post_filter_courses(
    State(s): State<Arc<AppState>>,
    payload: Result<Json<FilterRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("Rejected filter request: {}", rejection.body_text());
            return ApiErrorType::from(rejection).into_response();
        }
    };

    let criteria = FilterCriteria::from(req);
    info!(
        "Filter request - dept: {}, grade: {:?}, busy times: {}",
        criteria.department,
        criteria.grade,
        criteria.busy_times.len()
    );

    let result = filter_courses(s.catalog.courses(), &criteria);
    info!("Filter result: {} courses", result.count);

    (
        StatusCode::OK,
        Json(CourseListResponse {
            success: true,
            count: result.count,
            courses: &result.courses,
        }),
    )
        .into_response()
}

/// GET /api/courses
/// Returns the first page of the catalog along with its total size
pub async fn get_courses(State(s): State<Arc<AppState>>) -> Response {
    (
        StatusCode::OK,
        Json(CatalogPageResponse {
            success: true,
            count: s.catalog.len(),
            courses: s.catalog.head(s.list_limit),
        }),
    )
        .into_response()
}
