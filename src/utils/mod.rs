//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short identifier generation

pub mod code_generator;
