//! Per-Instrument Options
//!
//! String-keyed option values supplied by the run configuration for one
//! instrument, with typed getters and unknown-key rejection. Where the
//! values come from (config file, command line) is not this layer's
//! concern; it only defines the key/value contract.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vernier_model::InstrumentKind;

/// Option key: force a garbage collection before each invocation.
pub const GC_BEFORE_EACH: &str = "gcBeforeEach";
/// Option key: minimum accumulated measured time before measurements count.
pub const WARMUP: &str = "warmup";
/// Option key: target length of one timed interval.
pub const TIMING_INTERVAL: &str = "timingInterval";
/// Option key: number of measurements to collect after warm-up.
pub const MEASUREMENTS: &str = "measurements";
/// Option key: record individual allocation sites.
pub const TRACK_ALLOCATIONS: &str = "trackAllocations";

/// User-supplied option values for one instrument.
///
/// Keys are held in sorted order so rejection messages and serialized
/// forms are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentConfig {
    values: BTreeMap<String, String>,
}

impl InstrumentConfig {
    /// Empty configuration; every getter falls back to its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option value.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Raw value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Reject the configuration if it contains keys outside `recognized`.
    pub fn ensure_recognized(
        &self,
        kind: InstrumentKind,
        recognized: &[&str],
    ) -> Result<(), ConfigError> {
        let unknown: Vec<String> = self
            .values
            .keys()
            .filter(|key| !recognized.contains(&key.as_str()))
            .cloned()
            .collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::UnrecognizedOptions {
                kind,
                keys: unknown,
            })
        }
    }

    /// Boolean option, `default` if absent.
    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        match self.values.get(key) {
            None => Ok(default),
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw.clone(),
            }),
        }
    }

    /// Count option, `default` if absent.
    pub fn get_count(&self, key: &str, default: usize) -> Result<usize, ConfigError> {
        match self.values.get(key) {
            None => Ok(default),
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw.clone(),
            }),
        }
    }

    /// Duration option in nanoseconds, `default_ns` if absent.
    ///
    /// Accepts "300s", "500ms", "250us", "100ns", "2m" and bare numbers
    /// (taken as seconds).
    pub fn get_duration_ns(&self, key: &str, default_ns: u64) -> Result<u64, ConfigError> {
        match self.values.get(key) {
            None => Ok(default_ns),
            Some(raw) => parse_duration_ns(raw).ok_or_else(|| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw.clone(),
            }),
        }
    }
}

/// Parse a duration string (e.g. "3s", "500ms", "2m") to nanoseconds.
fn parse_duration_ns(s: &str) -> Option<u64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // Find where the number ends and the unit begins.
    let (num_part, unit_part) = s
        .char_indices()
        .find(|(_, c)| c.is_alphabetic())
        .map(|(i, _)| s.split_at(i))
        .unwrap_or((s, "s"));

    let value: f64 = num_part.parse().ok()?;

    let multiplier: u64 = match unit_part.to_lowercase().as_str() {
        "ns" => 1,
        "us" => 1_000,
        "ms" => 1_000_000,
        "s" | "" => 1_000_000_000,
        "m" | "min" => 60_000_000_000,
        _ => return None,
    };

    Some((value * multiplier as f64) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_getters_fall_back_to_defaults() {
        let config = InstrumentConfig::new();
        assert!(config.get_bool(GC_BEFORE_EACH, true).unwrap());
        assert_eq!(config.get_count(MEASUREMENTS, 9).unwrap(), 9);
        assert_eq!(
            config.get_duration_ns(WARMUP, 10_000_000_000).unwrap(),
            10_000_000_000
        );
        assert_eq!(config.get(WARMUP), None);
    }

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration_ns("3s"), Some(3_000_000_000));
        assert_eq!(parse_duration_ns("500ms"), Some(500_000_000));
        assert_eq!(parse_duration_ns("100us"), Some(100_000));
        assert_eq!(parse_duration_ns("1000ns"), Some(1000));
        assert_eq!(parse_duration_ns("2m"), Some(120_000_000_000));
        assert_eq!(parse_duration_ns("1.5s"), Some(1_500_000_000));
        assert_eq!(parse_duration_ns("10"), Some(10_000_000_000));
    }

    #[test]
    fn test_malformed_values_rejected() {
        let config = InstrumentConfig::new()
            .set(GC_BEFORE_EACH, "maybe")
            .set(WARMUP, "fast")
            .set(MEASUREMENTS, "-3");
        assert!(matches!(
            config.get_bool(GC_BEFORE_EACH, false),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.get_duration_ns(WARMUP, 0),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.get_count(MEASUREMENTS, 9),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_unrecognized_keys_collected_in_order() {
        let config = InstrumentConfig::new()
            .set("zeta", "1")
            .set(GC_BEFORE_EACH, "true")
            .set("alpha", "2");
        let err = config
            .ensure_recognized(InstrumentKind::ArbitraryMeasurement, &[GC_BEFORE_EACH])
            .unwrap_err();
        match err {
            ConfigError::UnrecognizedOptions { keys, .. } => {
                assert_eq!(keys, ["alpha", "zeta"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_config_deserializes_from_plain_map() {
        let config: InstrumentConfig =
            serde_json::from_str(r#"{"gcBeforeEach":"false","warmup":"2s"}"#).unwrap();
        assert!(!config.get_bool(GC_BEFORE_EACH, true).unwrap());
        assert_eq!(config.get_duration_ns(WARMUP, 0).unwrap(), 2_000_000_000);
    }
}
