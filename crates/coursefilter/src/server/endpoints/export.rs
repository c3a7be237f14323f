use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::export::{ExportError, XLSX_CONTENT_TYPE};
use crate::server::types::{ApiErrorType, DownloadRequest};
use crate::types::AppState;

/// Converts ExportError to API response.
fn export_error_to_response(error: ExportError) -> Response {
    let (status, message) = match &error {
        ExportError::NoCourseCodes => (StatusCode::BAD_REQUEST, "No course codes provided"),
        ExportError::CodeColumnNotFound => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Course code column not found",
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to export courses",
        ),
    };

    if error.is_client_error() {
        warn!("Rejected download request: {}", error);
    } else {
        error!("Error downloading courses: {}", error);
    }

    ApiErrorType::from((status, message, Some(error.to_string()))).into_response()
}

/// POST /api/download-courses
/// Returns an xlsx workbook with the rows of the requested courses
pub async fn post_download_courses(
    State(s): State<Arc<AppState>>,
    payload: Result<Json<DownloadRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("Rejected download request: {}", rejection.body_text());
            return ApiErrorType::from(rejection).into_response();
        }
    };

    let codes: HashSet<String> = req.course_codes.unwrap_or_default().into_iter().collect();
    if codes.is_empty() {
        return export_error_to_response(ExportError::NoCourseCodes);
    }

    info!("Download request for {} courses", codes.len());

    // Reading and encoding spreadsheets is blocking work
    let state = s.clone();
    let result = tokio::task::spawn_blocking(move || state.exporter.export_courses(&codes)).await;

    match result {
        Ok(Ok(workbook)) => {
            info!("Generated Excel with {} courses", workbook.matched);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", workbook.file_name),
                    ),
                ],
                workbook.bytes,
            )
                .into_response()
        }
        Ok(Err(e)) => export_error_to_response(e),
        Err(e) => {
            error!("Export task failed: {}", e);
            ApiErrorType::from((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to export courses",
                Some(e.to_string()),
            ))
            .into_response()
        }
    }
}
