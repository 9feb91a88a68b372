//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate table calls into use-case level APIs.
//! - Own every cross-table rule: id assignment, reference insertion and
//!   cascading deletes.

pub mod library_service;
