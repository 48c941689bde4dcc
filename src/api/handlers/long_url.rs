//! Handler for short URL resolution.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::long_url::{LongUrlRequest, LongUrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a short URL to its original long URL.
///
/// # Endpoint
///
/// `POST /get-long-url`
///
/// # Request Body
///
/// The key is `long_url`, but its value is the short URL to resolve:
///
/// ```json
/// { "long_url": "http://reclink.com/1a2b3c4d" }
/// ```
///
/// # Response
///
/// ```json
/// { "long_url": "https://example.com/some/page" }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the body is not JSON or `long_url` is missing/empty
/// - 404 Not Found if no mapping has this exact short URL
/// - 410 Gone if the mapping has expired
/// - 500 Internal Server Error if storage fails
pub async fn long_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<LongUrlRequest>, JsonRejection>,
) -> Result<Json<LongUrlResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let long_url = state.mapping_service.resolve(&payload.short_url).await?;

    Ok(Json(LongUrlResponse { long_url }))
}
