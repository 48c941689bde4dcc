//! Mapping creation and resolution service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tracing::{debug, info};

use crate::domain::entities::Mapping;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

/// Creates short URLs and resolves them back to long URLs.
///
/// Stateless apart from its injected collaborators; safe to share across
/// concurrent requests.
pub struct MappingService {
    repository: Arc<dyn MappingRepository>,
    base_url: String,
    ttl: Duration,
}

impl MappingService {
    /// Creates a new mapping service.
    ///
    /// - `base_url` - prefix prepended verbatim to each identifier
    /// - `ttl` - lifetime of every new mapping
    pub fn new(repository: Arc<dyn MappingRepository>, base_url: String, ttl: Duration) -> Self {
        Self {
            repository,
            base_url,
            ttl,
        }
    }

    /// Creates and stores a mapping for `long_url`, expiring `ttl` from now.
    ///
    /// # Errors
    ///
    /// See [`Self::shorten_at`].
    pub async fn shorten(&self, long_url: String) -> Result<Mapping, AppError> {
        self.shorten_at(long_url, Utc::now()).await
    }

    /// Creates and stores a mapping for `long_url` as if created at `now`.
    ///
    /// The URL is stored verbatim. The identifier is not checked for
    /// collisions before the insert.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `long_url` is empty (no write is attempted).
    ///
    /// Returns repository errors unchanged; nothing is retried.
    pub async fn shorten_at(
        &self,
        long_url: String,
        now: DateTime<Utc>,
    ) -> Result<Mapping, AppError> {
        if long_url.is_empty() {
            return Err(AppError::bad_request(
                "long_url must not be empty",
                json!({ "field": "long_url" }),
            ));
        }

        let mapping = Mapping::new(generate_code(), long_url, &self.base_url, now + self.ttl);

        self.repository.insert(&mapping).await?;

        info!(
            id = %mapping.id,
            short_url = %mapping.short_url,
            expiration_at = %mapping.expiration_at,
            "Created mapping"
        );

        Ok(mapping)
    }

    /// Resolves a short URL to its long URL using the current time.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve_at`].
    pub async fn resolve(&self, short_url: &str) -> Result<String, AppError> {
        self.resolve_at(short_url, Utc::now()).await
    }

    /// Resolves a short URL to its long URL as seen at `now`.
    ///
    /// Read-only: expired mappings are reported, never removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `short_url` is empty.
    ///
    /// Returns [`AppError::NotFound`] if no mapping has this exact short URL.
    ///
    /// Returns [`AppError::Expired`] if the mapping expired strictly before `now`.
    ///
    /// Returns repository errors unchanged.
    pub async fn resolve_at(&self, short_url: &str, now: DateTime<Utc>) -> Result<String, AppError> {
        if short_url.is_empty() {
            return Err(AppError::bad_request(
                "short URL must not be empty",
                json!({ "field": "long_url" }),
            ));
        }

        let mapping = self
            .repository
            .find_by_short_url(short_url)
            .await?
            .ok_or_else(|| {
                debug!(short_url, "Short URL not found");
                AppError::not_found("Short URL not found", json!({ "short_url": short_url }))
            })?;

        if mapping.is_expired_at(now) {
            debug!(short_url, expiration_at = %mapping.expiration_at, "Short URL expired");
            return Err(AppError::expired(
                "Short URL has expired",
                json!({
                    "short_url": short_url,
                    "expiration_at": mapping.expiration_at,
                }),
            ));
        }

        Ok(mapping.long_url)
    }

    /// Checks that the repository is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
