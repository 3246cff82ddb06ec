//! Share code generation, validation, and link encoding/decoding.
//!
//! A share code is exactly 12 case-sensitive ASCII alphanumeric characters,
//! the only identifier ever exposed outside the service. Codes travel in
//! three textual forms: an app deep link (`exquiziteapp://shared/<code>`),
//! a web URL (`<base>/<code>`), and the bare code itself.

use rand::{Rng, distr::Alphanumeric};
use regex::Regex;

/// Length of a share code in characters.
pub const SHARE_CODE_LENGTH: usize = 12;

/// Generates a random share code: 12 characters drawn uniformly from `[A-Za-z0-9]`.
///
/// Uniqueness is enforced by the database, not here; the caller retries on
/// collision.
///
/// # Examples
///
/// ```ignore
/// let code = generate_share_code();
/// assert_eq!(code.len(), 12);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_share_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SHARE_CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Validates a share code: exactly [`SHARE_CODE_LENGTH`] ASCII alphanumerics.
///
/// Used to reject garbage before any database lookup.
pub fn is_valid_share_code(code: &str) -> bool {
    code.len() == SHARE_CODE_LENGTH && code.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Encoder/decoder between share codes and their external textual forms.
///
/// Built once at startup from [`crate::config::Config`] and shared through
/// application state. Pure: no I/O, never panics on user input.
#[derive(Debug, Clone)]
pub struct ShareLinks {
    scheme: String,
    host: String,
    web_base: String,
    app_uri_re: Regex,
    web_url_re: Regex,
}

impl ShareLinks {
    /// Creates a codec for the given app scheme/host and web base URL.
    ///
    /// A trailing slash on `web_base` is dropped so encoded URLs always have
    /// exactly one separator before the code.
    pub fn new(scheme: &str, host: &str, web_base: &str) -> Self {
        let web_base = web_base.trim_end_matches('/').to_string();

        // Matching is anchored: the entire input must be the link. Trailing
        // slashes, extra path segments, and query strings are rejected rather
        // than stripped.
        let app_uri_re = Regex::new(&format!(
            "^{}://{}/([A-Za-z0-9]{{{}}})$",
            regex::escape(scheme),
            regex::escape(host),
            SHARE_CODE_LENGTH
        ))
        .expect("app URI pattern is valid");

        let web_url_re = Regex::new(&format!(
            "^{}/([A-Za-z0-9]{{{}}})$",
            regex::escape(&web_base),
            SHARE_CODE_LENGTH
        ))
        .expect("web URL pattern is valid");

        Self {
            scheme: scheme.to_string(),
            host: host.to_string(),
            web_base,
            app_uri_re,
            web_url_re,
        }
    }

    /// Encodes a code as an app deep link: `<scheme>://<host>/<code>`.
    pub fn app_uri(&self, code: &str) -> String {
        format!("{}://{}/{}", self.scheme, self.host, code)
    }

    /// Encodes a code as a web URL: `<base>/<code>`.
    pub fn web_url(&self, code: &str) -> String {
        format!("{}/{}", self.web_base, code)
    }

    /// Extracts the share code from any accepted input form.
    ///
    /// Accepts an app deep link, a web URL, or a bare code. Casing is
    /// preserved — the code space is case-sensitive. Returns `None` for
    /// anything else, including wrong-length bare strings and URLs whose
    /// path continues past the code.
    pub fn extract_code(&self, input: &str) -> Option<String> {
        if let Some(caps) = self.app_uri_re.captures(input) {
            return Some(caps[1].to_string());
        }

        if let Some(caps) = self.web_url_re.captures(input) {
            return Some(caps[1].to_string());
        }

        if is_valid_share_code(input) {
            return Some(input.to_string());
        }

        None
    }
}
