//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::share_service::ShareService`] - Idempotent share-link creation
//! - [`services::resolve_service::ResolveService`] - Public share resolution
//! - [`services::copy_service::CopyService`] - Shared-set duplication with compensation
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod services;
