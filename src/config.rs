//! Service configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://site_store.db";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_REMOTE_PATHS: [&str; 2] = ["/api/site_data.json", "/site_data.json"];
pub const DEFAULT_PUBLISH_DIR: &str = "publish";

/// Optional limits on the remote fetch. Unset means transport defaults,
/// which is no overall timeout at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemoteTimeouts {
    pub request: Option<Duration>,
    pub connect: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub database_url: String,
    pub port: u16,
    /// Origin serving the published document. `None` skips the remote tier.
    pub remote_base_url: Option<String>,
    /// Candidate paths, tried in order.
    pub remote_paths: Vec<String>,
    pub remote_timeouts: RemoteTimeouts,
    /// Directory holding the operator-published `site_data.json`.
    pub publish_dir: PathBuf,
}

impl SiteConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `DATABASE_URL`: default `sqlite://site_store.db`
    /// - `PORT`: default 3000
    /// - `SITE_REMOTE_BASE_URL`: remote tier disabled when absent
    /// - `SITE_REMOTE_PATHS`: comma-separated, default `/api/site_data.json,/site_data.json`
    /// - `SITE_REMOTE_TIMEOUT_SECS`, `SITE_REMOTE_CONNECT_TIMEOUT_SECS`: unset by default
    /// - `PUBLISH_DIR`: default `publish`
    #[must_use]
    pub fn from_env() -> Self {
        let remote_base_url = std::env::var("SITE_REMOTE_BASE_URL")
            .ok()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Self {
            database_url: std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            port: env_parse("PORT", DEFAULT_PORT),
            remote_base_url,
            remote_paths: parse_paths(std::env::var("SITE_REMOTE_PATHS").ok().as_deref()),
            remote_timeouts: RemoteTimeouts {
                request: env_secs("SITE_REMOTE_TIMEOUT_SECS"),
                connect: env_secs("SITE_REMOTE_CONNECT_TIMEOUT_SECS"),
            },
            publish_dir: std::env::var("PUBLISH_DIR").map_or_else(|_| PathBuf::from(DEFAULT_PUBLISH_DIR), PathBuf::from),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

fn env_secs(key: &str) -> Option<Duration> {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

fn parse_paths(raw: Option<&str>) -> Vec<String> {
    let parsed: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| if p.starts_with('/') { p.to_string() } else { format!("/{p}") })
        .collect();

    if parsed.is_empty() { DEFAULT_REMOTE_PATHS.iter().map(ToString::to_string).collect() } else { parsed }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
