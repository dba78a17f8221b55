use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use roaster_extract::DEFAULT_MAX_DOWNLOAD_BYTES;
use roaster_gateway::DEFAULT_MAX_UPLOAD_BYTES;

/// Resume Roaster runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// SQLite database path
    pub db_path: PathBuf,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Directory for rolling NDJSON log files
    pub log_dir: Option<PathBuf>,
    /// Emit console logs as JSON
    pub log_json: bool,
    pub store_timeout: Duration,
    pub fetch_timeout: Duration,
    pub max_upload_bytes: usize,
    /// Cap on a shared-link download
    pub max_download_bytes: u64,
    /// Fixed seed for reproducible commentary
    pub sampler_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8001,
            db_path: PathBuf::from("roaster.db"),
            log_level: "info".to_string(),
            log_dir: None,
            log_json: false,
            store_timeout: Duration::from_secs(10),
            fetch_timeout: Duration::from_secs(30),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_download_bytes: DEFAULT_MAX_DOWNLOAD_BYTES,
            sampler_seed: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let secs = |key: &str| parse_var(&lookup, key).map(Duration::from_secs);

        Self {
            bind_address: lookup("ROASTER_BIND").unwrap_or(defaults.bind_address),
            port: parse_var(&lookup, "ROASTER_PORT").unwrap_or(defaults.port),
            db_path: lookup("ROASTER_DB")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            log_level: lookup("ROASTER_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            log_dir: lookup("ROASTER_LOG_DIR")
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from),
            log_json: lookup("ROASTER_LOG_JSON")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.log_json),
            store_timeout: secs("ROASTER_STORE_TIMEOUT_SECS").unwrap_or(defaults.store_timeout),
            fetch_timeout: secs("ROASTER_FETCH_TIMEOUT_SECS").unwrap_or(defaults.fetch_timeout),
            max_upload_bytes: parse_var(&lookup, "ROASTER_MAX_UPLOAD_BYTES")
                .unwrap_or(defaults.max_upload_bytes),
            max_download_bytes: parse_var(&lookup, "ROASTER_MAX_DOWNLOAD_BYTES")
                .unwrap_or(defaults.max_download_bytes),
            sampler_seed: parse_var(&lookup, "ROASTER_SAMPLER_SEED"),
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(from_pairs(&[]), Config::default());
    }

    #[test]
    fn test_reads_overrides() {
        let config = from_pairs(&[
            ("ROASTER_BIND", "127.0.0.1"),
            ("ROASTER_PORT", "9000"),
            ("ROASTER_DB", "/tmp/r.db"),
            ("ROASTER_LOG_JSON", "true"),
            ("ROASTER_LOG_DIR", "logs"),
            ("ROASTER_STORE_TIMEOUT_SECS", "3"),
            ("ROASTER_FETCH_TIMEOUT_SECS", "7"),
            ("ROASTER_MAX_UPLOAD_BYTES", "1024"),
            ("ROASTER_MAX_DOWNLOAD_BYTES", "2048"),
            ("ROASTER_SAMPLER_SEED", "42"),
        ]);
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.db_path, PathBuf::from("/tmp/r.db"));
        assert!(config.log_json);
        assert_eq!(config.log_dir, Some(PathBuf::from("logs")));
        assert_eq!(config.store_timeout, Duration::from_secs(3));
        assert_eq!(config.fetch_timeout, Duration::from_secs(7));
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.max_download_bytes, 2048);
        assert_eq!(config.sampler_seed, Some(42));
    }

    #[test]
    fn test_log_level_prefers_roaster_variable() {
        let config = from_pairs(&[("RUST_LOG", "warn"), ("ROASTER_LOG_LEVEL", "debug")]);
        assert_eq!(config.log_level, "debug");
        assert_eq!(from_pairs(&[("RUST_LOG", "warn")]).log_level, "warn");
    }

    #[test]
    fn test_bad_numbers_fall_back() {
        let config = from_pairs(&[("ROASTER_PORT", "http"), ("ROASTER_SAMPLER_SEED", "-1")]);
        assert_eq!(config.port, 8001);
        assert_eq!(config.sampler_seed, None);
    }
}
