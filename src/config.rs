//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env::{self, VarError};
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Default TTL in seconds for entries set without one, None = never expire
    pub default_ttl_secs: Option<u64>,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LRU_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `LRU_DEFAULT_TTL` - Default TTL in seconds (default: unset, never expire)
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidConfig`] if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            capacity: parse_var("LRU_CAPACITY")?.unwrap_or(defaults.capacity),
            default_ttl_secs: parse_var("LRU_DEFAULT_TTL")?.or(defaults.default_ttl_secs),
        })
    }

    /// Checks that the configuration describes a usable cache.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }

    /// Returns the default TTL as a duration.
    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl_secs.map(Duration::from_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            default_ttl_secs: None,
        }
    }
}

/// Reads and parses an optional environment variable.
fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| CacheError::InvalidConfig(format!("{name}={raw:?} is not a valid number"))),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(CacheError::InvalidConfig(format!(
            "{name}={raw:?} is not valid unicode"
        ))),
    }
}
