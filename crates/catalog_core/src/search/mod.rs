//! Catalog search entry points.
//!
//! # Responsibility
//! - Compile search text into case-insensitive matchers.
//! - Leave field selection per entity kind to the service layer.

pub mod matcher;
