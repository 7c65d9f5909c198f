//! Core types for the magic-grid masonry layout.
//!
//! This crate provides the foundational types used across the other
//! magic-grid crates:
//! - Grid options and their validated configuration
//! - Geometry and style directive values
//! - Host capability traits (element tree, style sink, scheduler)
//! - Error types

pub mod config;
pub mod errors;
pub mod host;
pub mod types;

pub use config::*;
pub use errors::*;
pub use host::*;
pub use types::*;
