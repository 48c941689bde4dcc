//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "long_url": "https://example.com/some/page" }
/// ```
///
/// # Response
///
/// ```json
/// { "short_url": "http://reclink.com/1a2b3c4d" }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the body is not JSON, `long_url` is missing, not a
///   string, or empty. Nothing is stored in that case.
/// - 409 Conflict if the generated short URL is already stored.
/// - 500 Internal Server Error if storage fails.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let mapping = state.mapping_service.shorten(payload.long_url).await?;

    Ok(Json(ShortenResponse {
        short_url: mapping.short_url,
    }))
}
