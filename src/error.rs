use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::fixtures::FixtureError;

/// 额度耗尽时返回给客户端的固定提示
pub const QUOTA_EXCEEDED_MESSAGE: &str =
    "Insufficient query credits, please upgrade your API plan or wait for the monthly limit to reset";

#[derive(Debug)]
pub enum AppError {
    QuotaExceeded,
    InvalidPage(String),
    Fixture(FixtureError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl From<FixtureError> for AppError {
    fn from(err: FixtureError) -> Self {
        AppError::Fixture(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            // 限流器内部是 429，对外统一改成 401
            AppError::QuotaExceeded => (StatusCode::UNAUTHORIZED, QUOTA_EXCEEDED_MESSAGE.to_string()),
            AppError::InvalidPage(raw) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid page parameter: {}", raw),
            ),
            AppError::Fixture(err) => {
                tracing::error!("Fixture lookup failed: {}", err);
                let name = err
                    .path()
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Fixture {} is unavailable", name),
                )
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
