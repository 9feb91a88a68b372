//! Catalog domain model.
//!
//! # Responsibility
//! - Define the three record kinds persisted by the catalog: authors,
//!   publishers and books.
//! - Expose the surrogate key of every record through [`Entity`].
//!
//! # Invariants
//! - `id` is assigned once at construction and never mutated.
//! - A book owns full author/publisher values; on disk only their ids are kept.

pub mod author;
pub mod book;
pub mod publisher;

/// Surrogate key shared by every record kind.
pub type EntityId = u64;

/// A record with a stable surrogate key.
pub trait Entity {
    fn id(&self) -> EntityId;
}
