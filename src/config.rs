//! Configuration Module
//!
//! Handles cache limits and policies, loaded from defaults or environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Default maximum number of entries
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Default maximum aggregate footprint in bytes
pub const DEFAULT_MAX_SIZE: usize = 64 * 1024 * 1024; // 64 MiB

/// Default time-to-live for every entry
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

// == Duplicate Key Policy ==
/// What `put` does when the key is already cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateKeyPolicy {
    /// Keep the older entries alongside the new one; lookups see the newest.
    #[default]
    Retain,
    /// Drop older entries with the same key before inserting.
    Replace,
}

impl FromStr for DuplicateKeyPolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retain" => Ok(Self::Retain),
            "replace" => Ok(Self::Replace),
            other => Err(CacheError::InvalidConfig(format!(
                "unknown duplicate key policy '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for DuplicateKeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Retain => write!(f, "retain"),
            Self::Replace => write!(f, "replace"),
        }
    }
}

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Maximum aggregate entry footprint in bytes
    pub max_size: usize,
    /// Age after which an entry is expired
    pub default_ttl: Duration,
    /// Handling of repeated `put` for the same query
    pub duplicate_keys: DuplicateKeyPolicy,
    /// Interval of the background purge task, None = lazy expiry only
    pub purge_interval: Option<Duration>,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `QUERY_CACHE_MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `QUERY_CACHE_MAX_SIZE` - Maximum footprint in bytes (default: 64 MiB)
    /// - `QUERY_CACHE_DEFAULT_TTL` - TTL in seconds (default: 3600)
    /// - `QUERY_CACHE_DUPLICATE_KEYS` - `retain` or `replace` (default: retain)
    /// - `QUERY_CACHE_PURGE_INTERVAL` - Purge frequency in seconds, 0 disables (default: 0)
    ///
    /// Values that fail to parse fall back to the default.
    pub fn from_env() -> Self {
        Self {
            max_entries: parse_env("QUERY_CACHE_MAX_ENTRIES").unwrap_or(DEFAULT_MAX_ENTRIES),
            max_size: parse_env("QUERY_CACHE_MAX_SIZE").unwrap_or(DEFAULT_MAX_SIZE),
            default_ttl: parse_env("QUERY_CACHE_DEFAULT_TTL")
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TTL),
            duplicate_keys: parse_env("QUERY_CACHE_DUPLICATE_KEYS").unwrap_or_default(),
            purge_interval: parse_env("QUERY_CACHE_PURGE_INTERVAL")
                .filter(|secs: &u64| *secs > 0)
                .map(Duration::from_secs),
        }
    }

    /// Set the maximum number of entries
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Set the maximum aggregate footprint
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the TTL duration
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Set the duplicate key policy
    pub fn with_duplicate_keys(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicate_keys = policy;
        self
    }

    /// Enable the background purge task
    pub fn with_purge_interval(mut self, interval: Duration) -> Self {
        self.purge_interval = Some(interval);
        self
    }

    // == Validate ==
    /// Rejects limits under which no entry could ever be cached.
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(CacheError::InvalidConfig(
                "max_entries must be at least 1".to_string(),
            ));
        }
        if self.max_size == 0 {
            return Err(CacheError::InvalidConfig(
                "max_size must be at least 1 byte".to_string(),
            ));
        }
        if self.default_ttl.is_zero() {
            return Err(CacheError::InvalidConfig(
                "default_ttl must be non-zero".to_string(),
            ));
        }
        if matches!(self.purge_interval, Some(interval) if interval.is_zero()) {
            return Err(CacheError::InvalidConfig(
                "purge_interval must be non-zero when set".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            max_size: DEFAULT_MAX_SIZE,
            default_ttl: DEFAULT_TTL,
            duplicate_keys: DuplicateKeyPolicy::Retain,
            purge_interval: None,
        }
    }
}

fn parse_env<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
