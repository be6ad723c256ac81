//! Instrument Kind Tags

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a measurement strategy.
///
/// The string form is stable: it keys registry lookups and worker
/// configuration and appears in log context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentKind {
    /// The benchmark method itself returns the measurement.
    ArbitraryMeasurement,
    /// Wall-clock timing of repeated invocations.
    WallTime,
    /// Object and byte allocation counting.
    Allocation,
}

impl InstrumentKind {
    /// Stable snake_case identifier, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentKind::ArbitraryMeasurement => "arbitrary_measurement",
            InstrumentKind::WallTime => "wall_time",
            InstrumentKind::Allocation => "allocation",
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_matches_serialized_form() {
        let kinds = [
            InstrumentKind::ArbitraryMeasurement,
            InstrumentKind::WallTime,
            InstrumentKind::Allocation,
        ];
        for kind in kinds {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::Value::String(kind.as_str().to_string()));
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }
}
