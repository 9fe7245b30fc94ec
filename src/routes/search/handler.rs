use axum::{Json, extract::State, http::Uri};
use serde_json::Value;

use crate::{AppState, error::AppError};

use super::model::SearchQuery;

#[axum::debug_handler]
pub async fn host_search(State(state): State<AppState>, uri: Uri) -> Result<Json<Value>, AppError> {
    let query = SearchQuery::from_uri(&uri);
    let bucket = query.bucket()?;
    tracing::debug!("Host search - page: {:?}, bucket: {:?}", query.page, bucket);

    let document = state.fixtures.load(bucket).await?;
    Ok(Json(document))
}
