//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data
//! access operations following the Repository pattern. These traits are
//! implemented by concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`ShareRepository`] - Share records, counters, copy provenance
//! - [`SetRepository`] - Word-set writes in the requester's context
//! - [`SharedContentReader`] - Elevated read-only access to proven-public content
//! - [`TokenRepository`] - API token authentication
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod set_repository;
pub mod share_repository;
pub mod shared_content_reader;
pub mod token_repository;

pub use set_repository::SetRepository;
pub use share_repository::{ShareInsert, ShareRepository};
pub use shared_content_reader::SharedContentReader;
pub use token_repository::{ApiToken, TokenRepository};

#[cfg(test)]
pub use set_repository::MockSetRepository;
#[cfg(test)]
pub use share_repository::MockShareRepository;
#[cfg(test)]
pub use shared_content_reader::MockSharedContentReader;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
