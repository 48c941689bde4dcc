//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! - [`services::mapping_service::MappingService`] - Short URL creation and resolution

pub mod services;
