//! Shell Responses
//!
//! One JSON object is written per executed command.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::error::CacheError;

/// Response to a single shell command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Hit { query: String, result: String },
    Miss { query: String },
    Stored { query: String, size: usize },
    Invalidated { table: String, removed: usize },
    Removed { query: String, removed: usize },
    Cleared { removed: usize },
    Purged { removed: usize },
    Stats(StatsResponse),
    Error { error: String },
    Bye,
}

impl Response {
    /// Serializes the response as a single JSON line (without the newline).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<CacheError> for Response {
    fn from(err: CacheError) -> Self {
        Self::Error {
            error: err.to_string(),
        }
    }
}

/// Body of the `STATS` response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub invalidations: u64,
    pub rejections: u64,
    pub total_entries: usize,
    pub current_size: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Time the snapshot was taken, RFC 3339
    pub timestamp: String,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn from_stats(stats: &CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            inserts: stats.inserts,
            evictions: stats.evictions,
            expirations: stats.expirations,
            invalidations: stats.invalidations,
            rejections: stats.rejections,
            total_entries: stats.total_entries,
            current_size: stats.current_size,
            hit_rate: stats.hit_rate(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
