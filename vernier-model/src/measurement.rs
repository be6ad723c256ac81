//! Measurement Values

use serde::{Deserialize, Serialize};

/// A single named observation produced by a worker.
///
/// `value` is the raw magnitude in `unit`; `weight` is the number of
/// method invocations the value spans, so `value / weight` is the
/// per-invocation figure. Workers that measure one invocation at a time
/// leave the weight at 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// What was measured ("runtime", "objects", "bytes", ...).
    pub description: String,
    /// Raw magnitude in `unit`.
    pub value: f64,
    /// Unit of `value` ("ns", "B", ...).
    pub unit: String,
    /// Invocations the value spans.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl Measurement {
    /// Create a measurement spanning a single invocation.
    pub fn new(description: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            value,
            unit: unit.into(),
            weight: 1.0,
        }
    }

    /// Set the number of invocations the value spans.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Value normalized to a single invocation.
    pub fn per_invocation(&self) -> f64 {
        self.value / self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_to_unit_weight() {
        let measurement = Measurement::new("runtime", 1200.0, "ns");
        assert_eq!(measurement.weight, 1.0);
        assert_eq!(measurement.per_invocation(), 1200.0);
    }

    #[test]
    fn test_per_invocation_divides_by_weight() {
        let measurement = Measurement::new("runtime", 5_000_000.0, "ns").with_weight(1000.0);
        assert_eq!(measurement.per_invocation(), 5000.0);
    }

    #[test]
    fn test_weight_defaults_when_absent_from_json() {
        let measurement: Measurement = serde_json::from_str(
            r#"{"description":"bytes","value":4096.0,"unit":"B"}"#,
        )
        .unwrap();
        assert_eq!(measurement.weight, 1.0);
    }
}
