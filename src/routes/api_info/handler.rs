use axum::{Json, response::IntoResponse};

use super::model::ApiInfo;

// key 只用于限流归属，这里不需要读取任何参数
#[axum::debug_handler]
pub async fn api_info() -> impl IntoResponse {
    Json(ApiInfo::dev_plan())
}
