//! API configuration: base URL selection and network timeouts.
//!
//! The backend is deployed per environment (local, staging, production) and
//! the base URL is resolved once, at client construction. Runtime overrides
//! come from the `PIXSTOP_ENV` and `PIXSTOP_BASE_URL` environment variables.

use std::time::Duration;

/// Connection timeout in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Full request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variable selecting the [`Environment`].
const ENV_VAR: &str = "PIXSTOP_ENV";

/// Environment variable overriding the base URL outright.
const BASE_URL_VAR: &str = "PIXSTOP_BASE_URL";

/// Backend deployment the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development server (Laravel `artisan serve` default port).
    Local,
    Staging,
    #[default]
    Production,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Local => "http://localhost:8000/api",
            Environment::Staging => "https://staging.pixstop.com.br/api",
            Environment::Production => "https://pixstop.com.br/api",
        }
    }

    /// Parse an environment name as used in `PIXSTOP_ENV`.
    /// Unknown names fall back to production.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "local" | "dev" => Environment::Local,
            "staging" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "local"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Network configuration for [`crate::ApiClient`], resolved once at
/// construction.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl ApiConfig {
    /// Config pointing at an arbitrary base URL with the default timeouts.
    /// Trailing slashes are stripped so endpoint paths can be joined blindly.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn for_environment(env: Environment) -> Self {
        Self::new(env.base_url())
    }

    /// Resolve the config from the process environment.
    ///
    /// `PIXSTOP_BASE_URL` wins over `PIXSTOP_ENV`; with neither set the
    /// production URL is used.
    pub fn from_env() -> Self {
        if let Ok(url) = std::env::var(BASE_URL_VAR) {
            if !url.trim().is_empty() {
                return Self::new(url);
            }
        }
        let env = std::env::var(ENV_VAR)
            .map(|name| Environment::from_name(&name))
            .unwrap_or_default();
        Self::for_environment(env)
    }

    /// Absolute URL for an endpoint path relative to the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
