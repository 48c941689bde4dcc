#![allow(dead_code)]

use axum::Router;
use chrono::{DateTime, Duration, Utc};
use reclink::api::routes::routes;
use reclink::application::services::MappingService;
use reclink::domain::entities::Mapping;
use reclink::domain::repositories::MappingRepository;
use reclink::infrastructure::persistence::InMemoryMappingRepository;
use reclink::state::AppState;
use std::sync::Arc;

pub const BASE_URL: &str = "http://reclink.com/";

pub fn create_test_state() -> (AppState, Arc<InMemoryMappingRepository>) {
    let repo = Arc::new(InMemoryMappingRepository::new());
    let service = MappingService::new(repo.clone(), BASE_URL.to_string(), Duration::hours(24));

    (AppState::new(Arc::new(service)), repo)
}

pub fn create_test_app() -> (Router, Arc<InMemoryMappingRepository>) {
    let (state, repo) = create_test_state();
    (routes().with_state(state), repo)
}

pub async fn insert_mapping(
    repo: &InMemoryMappingRepository,
    id: &str,
    long_url: &str,
    expiration_at: DateTime<Utc>,
) -> Mapping {
    let mapping = Mapping::new(
        id.to_string(),
        long_url.to_string(),
        BASE_URL,
        expiration_at,
    );
    repo.insert(&mapping).await.unwrap();
    mapping
}
