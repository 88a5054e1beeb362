//! Configuration handling for the relay.
//!
//! Everything comes from environment variables. The upstream URLs are
//! optional on purpose: a missing URL is reported when the route that needs
//! it is hit, so one misconfigured source never takes the other route down.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::error::ProxyError;

/// Environment variable names.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_APP_ADS_URL: &str = "APP_ADS_URL";
pub const ENV_POLICIES_URL: &str = "POLICIES_URL";
pub const ENV_POLICIES_MODE: &str = "POLICIES_MODE";
pub const ENV_CACHE_POLICY: &str = "CACHE_POLICY";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// How long a cached upstream payload stays fresh, in seconds.
pub const CACHE_TTL_SECS: i64 = 60 * 60;

/// How the policies page is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoliciesMode {
    /// Sanitized copy of the upstream page with links rewritten.
    #[default]
    Embed,
    /// Plain-text extraction wrapped in a minimal styled document.
    Text,
}

impl PoliciesMode {
    /// Unknown values fall back to `Embed`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "text" | "clean" | "simple" => Self::Text,
            _ => Self::Embed,
        }
    }
}

/// Deployment variant: whether the in-process cache is used at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Honor the one-hour TTL cache.
    #[default]
    Ttl,
    /// Hit the upstream on every request and never touch the cache.
    Bypass,
}

impl CachePolicy {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_lowercase().as_str() {
            "ttl" | "" => Ok(Self::Ttl),
            "bypass" | "no-store" => Ok(Self::Bypass),
            other => Err(ConfigError::InvalidValue {
                field: ENV_CACHE_POLICY,
                reason: format!("expected 'ttl' or 'bypass', got '{other}'"),
            }),
        }
    }

    pub fn skip_cache(&self) -> bool {
        matches!(self, Self::Bypass)
    }

    /// `Cache-Control` value sent to downstream clients.
    pub fn cache_control(&self) -> String {
        match self {
            Self::Ttl => format!("public, max-age={CACHE_TTL_SECS}"),
            Self::Bypass => "no-store".to_string(),
        }
    }
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    app_ads_url: Option<String>,
    policies_url: Option<String>,
    policies_mode: PoliciesMode,
    cache_policy: CachePolicy,
    json_logs: bool,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(
        bind_addr: impl Into<String>,
        app_ads_url: Option<String>,
        policies_url: Option<String>,
        policies_mode: PoliciesMode,
        cache_policy: CachePolicy,
    ) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            app_ads_url,
            policies_url,
            policies_mode,
            cache_policy,
            json_logs: false,
        }
    }

    /// Load from environment variables.
    ///
    /// Only a malformed `CACHE_POLICY` fails here; absent upstream URLs are
    /// left for the request path to report.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let policies_mode = env::var(ENV_POLICIES_MODE)
            .map(|raw| PoliciesMode::parse(&raw))
            .unwrap_or_default();
        let cache_policy = match env::var(ENV_CACHE_POLICY) {
            Ok(raw) => CachePolicy::parse(&raw)?,
            Err(_) => CachePolicy::default(),
        };
        let json_logs = env::var(ENV_LOG_FORMAT)
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(Self {
            bind_addr,
            app_ads_url: non_empty_var(ENV_APP_ADS_URL),
            policies_url: non_empty_var(ENV_POLICIES_URL),
            policies_mode,
            cache_policy,
            json_logs,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }

    /// Source of the app-ads.txt payload.
    pub fn app_ads_url(&self) -> Result<&str, ProxyError> {
        self.app_ads_url
            .as_deref()
            .ok_or(ProxyError::ConfigMissing(ENV_APP_ADS_URL))
    }

    /// Source of the privacy policy page.
    pub fn policies_url(&self) -> Result<&str, ProxyError> {
        self.policies_url
            .as_deref()
            .ok_or(ProxyError::ConfigMissing(ENV_POLICIES_URL))
    }

    pub fn policies_mode(&self) -> PoliciesMode {
        self.policies_mode
    }

    pub fn cache_policy(&self) -> CachePolicy {
        self.cache_policy
    }

    pub fn json_logs(&self) -> bool {
        self.json_logs
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
