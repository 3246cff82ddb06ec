//! Permissive CORS middleware.

use tower_http::cors::{Any, CorsLayer};

/// Creates the CORS layer applied to every route.
///
/// Share links are opened from arbitrary origins (web viewers, in-app
/// browsers), so the policy is deliberately permissive: any origin, any
/// method, any headers. `OPTIONS` preflights are answered automatically
/// with 200.
///
/// Credentials are never allowed — authentication is carried in the
/// Authorization header, which permissive CORS still requires the
/// client to send explicitly.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
