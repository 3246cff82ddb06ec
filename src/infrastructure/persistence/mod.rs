//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! runtime-bound prepared statements.
//!
//! # Repositories
//!
//! - [`PgShareRepository`] - Share records, counters, copy provenance
//! - [`PgSetRepository`] - Word-set creation and removal
//! - [`PgSharedContentReader`] - Read-only access to proven-public content
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_content_reader;
pub mod pg_set_repository;
pub mod pg_share_repository;
pub mod pg_token_repository;

pub use pg_content_reader::PgSharedContentReader;
pub use pg_set_repository::PgSetRepository;
pub use pg_share_repository::PgShareRepository;
pub use pg_token_repository::PgTokenRepository;
