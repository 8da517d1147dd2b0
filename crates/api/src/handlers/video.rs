use axum::extract::Query;
use axum::response::IntoResponse;
use axum::Json;
use creon_core::video;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;

#[derive(Debug, Deserialize)]
pub struct ClassifyParams {
    pub url: Option<String>,
}

/// GET /api/v1/video/classify?url=
///
/// Classify a link. Unrecognized URLs are a normal `isVideo: false` result;
/// only a missing `url` parameter is an error.
pub async fn classify_url(Query(params): Query<ClassifyParams>) -> AppResult<impl IntoResponse> {
    let url = params
        .url
        .ok_or_else(|| AppError::BadRequest("url query parameter is required".to_string()))?;

    Ok(Json(DataResponse {
        data: video::classify(&url),
    }))
}
