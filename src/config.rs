//! Console configuration resolved at build time.
//!
//! A static SPA has no process environment at runtime, so values are baked in
//! with `option_env!` when the WASM bundle is compiled:
//!
//! - `LICENSE_API_URL`: backend base URL, default `http://localhost:8080`
//! - `LICENSE_UNAUTHORIZED_POLICY`: `global` (default) or `protected-only`

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Which 401 responses trigger the global sign-out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnauthorizedPolicy {
    /// Every 401 from every endpoint signs the user out.
    #[default]
    Global,
    /// 401s from the public login/signup endpoints are left to the caller.
    ProtectedOnly,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    pub unauthorized_policy: UnauthorizedPolicy,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            unauthorized_policy: UnauthorizedPolicy::Global,
        }
    }
}

impl ConsoleConfig {
    /// Config from the variables captured at compile time.
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("LICENSE_API_URL"), option_env!("LICENSE_UNAUTHORIZED_POLICY"))
    }

    pub fn from_values(api_base_url: Option<&str>, policy: Option<&str>) -> Self {
        Self {
            api_base_url: normalize_base_url(api_base_url),
            unauthorized_policy: parse_policy(policy),
        }
    }
}

fn normalize_base_url(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(url) if !url.is_empty() => url.trim_end_matches('/').to_owned(),
        _ => DEFAULT_API_BASE_URL.to_owned(),
    }
}

fn parse_policy(raw: Option<&str>) -> UnauthorizedPolicy {
    match raw.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("protected-only" | "protected_only") => UnauthorizedPolicy::ProtectedOnly,
        Some("global") | None => UnauthorizedPolicy::Global,
        Some(other) => {
            log::warn!("unknown unauthorized policy {other:?}; using global");
            UnauthorizedPolicy::Global
        }
    }
}
