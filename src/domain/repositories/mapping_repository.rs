//! Repository trait for mapping persistence.

use crate::domain::entities::Mapping;
use crate::error::AppError;
use async_trait::async_trait;

/// Persistence contract for short URL mappings.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryMappingRepository`] - Process-local store
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_mapping.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Stores a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short URL is already stored.
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, mapping: &Mapping) -> Result<(), AppError>;

    /// Finds a mapping by exact match on its short URL.
    ///
    /// Expired mappings are returned as-is; the caller decides what to do
    /// with them.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<Mapping>, AppError>;

    /// Checks that the backing store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
