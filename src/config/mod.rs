// src/config/mod.rs
//! Runtime configuration gathered from the process environment (`.env` is
//! loaded by the binary before this runs).

pub mod categories;

use anyhow::{bail, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_NEWS_API_KEY: &str = "NEWS_API_KEY";
pub const ENV_NEWS_API_BASE_URL: &str = "NEWS_API_BASE_URL";
pub const ENV_NEWS_API_TIMEOUT_SECS: &str = "NEWS_API_TIMEOUT_SECS";
pub const ENV_WIKI_FEED_BASE_URL: &str = "WIKI_FEED_BASE_URL";
pub const ENV_WIKI_SEARCH_URL: &str = "WIKI_SEARCH_URL";
pub const ENV_COUNTRIES_URL: &str = "COUNTRIES_URL";
pub const ENV_UPSTREAM_TIMEOUT_SECS: &str = "UPSTREAM_TIMEOUT_SECS";

pub const DEFAULT_NEWS_API_BASE_URL: &str = "https://newsapi.org";
pub const DEFAULT_WIKI_FEED_BASE_URL: &str =
    "https://en.wikipedia.org/api/rest_v1/feed/onthisday/selected";
pub const DEFAULT_WIKI_SEARCH_URL: &str = "https://en.wikipedia.org/w/api.php";
pub const DEFAULT_COUNTRIES_URL: &str = "https://restcountries.com/v3.1/all?fields=name,cca2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct NewsConfig {
    /// Secret credential; `None` is reported per request, not at boot.
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub feed_base_url: String,
    pub search_url: String,
    pub countries_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub news: NewsConfig,
    pub upstream: UpstreamConfig,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            feed_base_url: DEFAULT_WIKI_FEED_BASE_URL.to_string(),
            search_url: DEFAULT_WIKI_SEARCH_URL.to_string(),
            countries_url: DEFAULT_COUNTRIES_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| {
            lookup(k)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let secs = |k: &str| {
            get(k)
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|v| *v > 0)
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        };

        let news = NewsConfig {
            api_key: get(ENV_NEWS_API_KEY),
            base_url: get(ENV_NEWS_API_BASE_URL)
                .unwrap_or_else(|| DEFAULT_NEWS_API_BASE_URL.to_string()),
            timeout: secs(ENV_NEWS_API_TIMEOUT_SECS),
        };
        let upstream = UpstreamConfig {
            feed_base_url: get(ENV_WIKI_FEED_BASE_URL)
                .unwrap_or_else(|| DEFAULT_WIKI_FEED_BASE_URL.to_string()),
            search_url: get(ENV_WIKI_SEARCH_URL)
                .unwrap_or_else(|| DEFAULT_WIKI_SEARCH_URL.to_string()),
            countries_url: get(ENV_COUNTRIES_URL)
                .unwrap_or_else(|| DEFAULT_COUNTRIES_URL.to_string()),
            timeout: secs(ENV_UPSTREAM_TIMEOUT_SECS),
        };
        Self { news, upstream }
    }
}

/// Pick a config file: `env_key` wins when set (and must exist), otherwise
/// the first existing candidate. `None` means fall back to built-ins.
pub fn resolve_config_path<F>(
    lookup: F,
    env_key: &str,
    candidates: &[&str],
) -> Result<Option<PathBuf>>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(p) = lookup(env_key).filter(|v| !v.trim().is_empty()) {
        let pb = PathBuf::from(p.trim());
        if !pb.exists() {
            bail!("{env_key} points to non-existent path {}", pb.display());
        }
        return Ok(Some(pb));
    }
    Ok(candidates.iter().map(PathBuf::from).find(|p| p.exists()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cfg(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let c = cfg(&[]);
        assert!(c.news.api_key.is_none());
        assert_eq!(c.news.base_url, DEFAULT_NEWS_API_BASE_URL);
        assert_eq!(c.upstream.feed_base_url, DEFAULT_WIKI_FEED_BASE_URL);
        assert_eq!(c.upstream.timeout, Duration::from_secs(10));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let c = cfg(&[(ENV_NEWS_API_KEY, "   ")]);
        assert!(c.news.api_key.is_none());
    }

    #[test]
    fn overrides_and_bad_timeouts() {
        let c = cfg(&[
            (ENV_NEWS_API_KEY, "k-123"),
            (ENV_NEWS_API_BASE_URL, "http://127.0.0.1:9000"),
            (ENV_NEWS_API_TIMEOUT_SECS, "3"),
            (ENV_UPSTREAM_TIMEOUT_SECS, "zero"),
        ]);
        assert_eq!(c.news.api_key.as_deref(), Some("k-123"));
        assert_eq!(c.news.base_url, "http://127.0.0.1:9000");
        assert_eq!(c.news.timeout, Duration::from_secs(3));
        assert_eq!(c.upstream.timeout, Duration::from_secs(10));
    }

    #[test]
    fn config_path_resolution_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.toml");
        let second = dir.path().join("b.json");
        std::fs::write(&second, "{}").unwrap();
        let first_s = first.to_string_lossy().into_owned();
        let second_s = second.to_string_lossy().into_owned();
        let candidates = [first_s.as_str(), second_s.as_str()];

        let none = |_: &str| None;
        assert_eq!(
            resolve_config_path(none, "X_PATH", &candidates).unwrap(),
            Some(second.clone())
        );

        std::fs::write(&first, "").unwrap();
        assert_eq!(
            resolve_config_path(none, "X_PATH", &candidates).unwrap(),
            Some(first.clone())
        );

        let env = |_: &str| Some(second_s.clone());
        assert_eq!(
            resolve_config_path(env, "X_PATH", &candidates).unwrap(),
            Some(second.clone())
        );

        let missing = dir.path().join("gone.toml").to_string_lossy().into_owned();
        let err = resolve_config_path(|_: &str| Some(missing.clone()), "X_PATH", &candidates)
            .unwrap_err();
        assert!(err.to_string().contains("X_PATH"));

        assert_eq!(resolve_config_path(none, "X_PATH", &["/nonexistent/c.toml"]).unwrap(), None);
    }
}
