//! In-memory implementation of the mapping repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;

use crate::domain::entities::Mapping;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// Process-local mapping store keyed by short URL.
///
/// Mirrors the PostgreSQL unique index on `short_url`: inserting an existing
/// short URL fails with [`AppError::Conflict`]. Expired mappings are kept,
/// like in the database.
#[derive(Debug, Default)]
pub struct InMemoryMappingRepository {
    storage: DashMap<String, Mapping>,
}

impl InMemoryMappingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl MappingRepository for InMemoryMappingRepository {
    async fn insert(&self, mapping: &Mapping) -> Result<(), AppError> {
        match self.storage.entry(mapping.short_url.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "short_url": mapping.short_url }),
            )),
            Entry::Vacant(slot) => {
                slot.insert(mapping.clone());
                Ok(())
            }
        }
    }

    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<Mapping>, AppError> {
        Ok(self.storage.get(short_url).map(|entry| entry.value().clone()))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
