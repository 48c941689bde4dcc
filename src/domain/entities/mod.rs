//! Core domain entities.
//!
//! - [`Mapping`] - A short URL mapping with its expiration time

pub mod mapping;

pub use mapping::Mapping;
