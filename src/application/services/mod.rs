//! Business logic services for the application layer.

pub mod auth_service;
pub mod copy_service;
pub mod resolve_service;
pub mod share_service;

pub use auth_service::AuthService;
pub use copy_service::{CopyService, CopySummary};
pub use resolve_service::{ResolveService, ResolvedShare, SetProjection, SharedWord};
pub use share_service::{ShareOutcome, ShareService};
