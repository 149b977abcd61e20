//! Operator tunables that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Bucket-array length of a freshly created lookup.
pub const DEFAULT_INITIAL_BUCKETS: usize = 7;

/// Capacity a `SequenceBuffer` starts from when the source cannot report its size.
pub const DEFAULT_BUFFER_SEED: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeqConfig {
    /// Initial bucket-array length for lookups. Growth doubles from here (`count * 2 + 1`).
    pub initial_bucket_count: usize,

    /// Seed capacity for buffering sources of unknown length; doubles on overflow.
    pub buffer_seed_capacity: usize,
}

impl Default for SeqConfig {
    fn default() -> Self {
        Self {
            initial_bucket_count: DEFAULT_INITIAL_BUCKETS,
            buffer_seed_capacity: DEFAULT_BUFFER_SEED,
        }
    }
}

impl SeqConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `SEQOPS_INITIAL_BUCKETS`: initial lookup bucket count
    /// - `SEQOPS_BUFFER_SEED`: seed capacity for unsized sources
    ///
    /// Unparseable values are ignored; call [`SeqConfig::validate`] before use.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("SEQOPS_INITIAL_BUCKETS") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.initial_bucket_count = v;
            }
        }

        if let Ok(s) = std::env::var("SEQOPS_BUFFER_SEED") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.buffer_seed_capacity = v;
            }
        }

        cfg
    }

    /// Parse a JSON config snippet; missing fields take their defaults.
    pub fn from_json(src: &str) -> Result<Self> {
        let cfg: SeqConfig = serde_json::from_str(src)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_bucket_count == 0 {
            return Err(Error::Config("initial_bucket_count must be at least 1".into()));
        }
        if self.buffer_seed_capacity == 0 {
            return Err(Error::Config("buffer_seed_capacity must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_lookup_and_buffer_constants() {
        let cfg = SeqConfig::default();
        assert_eq!(cfg.initial_bucket_count, 7);
        assert_eq!(cfg.buffer_seed_capacity, 4);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn json_fills_missing_fields() {
        let cfg = SeqConfig::from_json(r#"{"initial_bucket_count": 31}"#).unwrap();
        assert_eq!(cfg.initial_bucket_count, 31);
        assert_eq!(cfg.buffer_seed_capacity, DEFAULT_BUFFER_SEED);
    }

    #[test]
    fn zero_buckets_rejected() {
        let err = SeqConfig::from_json(r#"{"initial_bucket_count": 0}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
