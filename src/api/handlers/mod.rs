//! HTTP request handlers for API endpoints.

pub mod health;
pub mod long_url;
pub mod shorten;

pub use health::health_handler;
pub use long_url::long_url_handler;
pub use shorten::shorten_handler;
