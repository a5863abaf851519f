//! Configuration Module
//!
//! Loads server configuration from environment variables.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not set (set {0} or {0}_PATH)")]
    MissingKey(&'static str),

    #[error("failed to read {path}: {source}")]
    ReadKey {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{key}={value} is out of range (1..={max})")]
    OutOfRange {
        key: &'static str,
        value: u64,
        max: u64,
    },
}

/// Upper bound for `TOKEN_TTL` and `CACHE_TTL`, in seconds (one year)
pub const MAX_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Server configuration parameters.
///
/// All values except the key pair have defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Inline PEM private key
    pub private_key: Option<String>,
    pub private_key_path: Option<PathBuf>,
    /// Inline PEM public key
    pub public_key: Option<String>,
    pub public_key_path: Option<PathBuf>,
    /// JWT algorithm name, e.g. "RS256"
    pub token_algorithm: String,
    pub token_issuer: String,
    /// Session lifetime in seconds
    pub token_ttl: u64,
    /// Job cache entry lifetime in seconds
    pub cache_ttl: u64,
    /// Capacity of the in-process job cache
    pub cache_max_entries: usize,
    /// Expiry sweep interval for the in-process cache, in seconds
    pub cleanup_interval: u64,
    /// Use Redis for the job cache when set
    pub redis_url: Option<String>,
    /// Bound on each cache or repository call, in milliseconds
    pub io_timeout_ms: u64,
    /// Argon2 memory cost in KiB
    pub argon2_memory_kib: u32,
    pub argon2_iterations: u32,
}

fn parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` (default: 3000)
    /// - `PRIVATE_KEY` / `PRIVATE_KEY_PATH`, `PUBLIC_KEY` / `PUBLIC_KEY_PATH`
    /// - `TOKEN_ALGORITHM` (default: RS256), `TOKEN_ISSUER` (default: job-portal)
    /// - `TOKEN_TTL` seconds (default: 3600)
    /// - `CACHE_TTL` seconds (default: 60)
    /// - `CACHE_MAX_ENTRIES` (default: 1000)
    /// - `CLEANUP_INTERVAL` seconds (default: 1)
    /// - `REDIS_URL` (default: unset, in-process cache)
    /// - `IO_TIMEOUT_MS` (default: 2000)
    /// - `ARGON2_MEMORY_KIB` (default: 19456), `ARGON2_ITERATIONS` (default: 2)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parsed("SERVER_PORT", defaults.server_port),
            private_key: non_empty("PRIVATE_KEY"),
            private_key_path: non_empty("PRIVATE_KEY_PATH").map(PathBuf::from),
            public_key: non_empty("PUBLIC_KEY"),
            public_key_path: non_empty("PUBLIC_KEY_PATH").map(PathBuf::from),
            token_algorithm: non_empty("TOKEN_ALGORITHM").unwrap_or(defaults.token_algorithm),
            token_issuer: non_empty("TOKEN_ISSUER").unwrap_or(defaults.token_issuer),
            token_ttl: parsed("TOKEN_TTL", defaults.token_ttl),
            cache_ttl: parsed("CACHE_TTL", defaults.cache_ttl),
            cache_max_entries: parsed("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            cleanup_interval: parsed("CLEANUP_INTERVAL", defaults.cleanup_interval),
            redis_url: non_empty("REDIS_URL"),
            io_timeout_ms: parsed("IO_TIMEOUT_MS", defaults.io_timeout_ms),
            argon2_memory_kib: parsed("ARGON2_MEMORY_KIB", defaults.argon2_memory_kib),
            argon2_iterations: parsed("ARGON2_ITERATIONS", defaults.argon2_iterations),
        }
    }

    /// Rejects lifetimes that are zero or too large to schedule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [("TOKEN_TTL", self.token_ttl), ("CACHE_TTL", self.cache_ttl)] {
            if value == 0 || value > MAX_TTL_SECS {
                return Err(ConfigError::OutOfRange {
                    key,
                    value,
                    max: MAX_TTL_SECS,
                });
            }
        }
        Ok(())
    }

    /// Resolves the PEM key pair, preferring inline values over paths.
    pub fn load_keys(&self) -> Result<(String, String), ConfigError> {
        let private = resolve_key(
            "PRIVATE_KEY",
            self.private_key.as_ref(),
            self.private_key_path.as_ref(),
        )?;
        let public = resolve_key(
            "PUBLIC_KEY",
            self.public_key.as_ref(),
            self.public_key_path.as_ref(),
        )?;
        Ok((private, public))
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn io_timeout(&self) -> Duration {
        Duration::from_millis(self.io_timeout_ms)
    }
}

fn resolve_key(
    name: &'static str,
    inline: Option<&String>,
    path: Option<&PathBuf>,
) -> Result<String, ConfigError> {
    if let Some(pem) = inline {
        // Allow single-line env values with escaped newlines
        return Ok(pem.replace("\\n", "\n"));
    }
    let path = path.ok_or(ConfigError::MissingKey(name))?;
    fs::read_to_string(path).map_err(|source| ConfigError::ReadKey {
        path: path.clone(),
        source,
    })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            private_key: None,
            private_key_path: None,
            public_key: None,
            public_key_path: None,
            token_algorithm: "RS256".to_string(),
            token_issuer: "job-portal".to_string(),
            token_ttl: 3600,
            cache_ttl: 60,
            cache_max_entries: 1000,
            cleanup_interval: 1,
            redis_url: None,
            io_timeout_ms: 2000,
            argon2_memory_kib: 19 * 1024,
            argon2_iterations: 2,
        }
    }
}
