//! Worker Event Stream
//!
//! Events a worker emits while executing one trial. Collectors consume
//! the subset they understand and ignore the rest; the transport that
//! moves events across the process boundary is not part of this
//! workspace and sees them as tagged JSON.

use crate::Measurement;
use serde::{Deserialize, Serialize};

/// One event in a trial's ordered worker stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkerEvent {
    /// A timed interval begins.
    StartMeasurement,
    /// A timed interval ended, carrying the raw values it produced.
    StopMeasurement {
        /// Measurements taken during the interval.
        measurements: Vec<Measurement>,
    },
    /// The worker runtime performed a garbage collection.
    Gc,
    /// Free-form worker log text.
    Diagnostic {
        /// The logged message.
        message: String,
    },
    /// Scheduling progress for long trials.
    Progress {
        /// Intervals completed so far.
        completed: u64,
        /// Estimated total intervals.
        total: u64,
    },
}

impl WorkerEvent {
    /// Stop event carrying a single measurement.
    pub fn stop_with(measurement: Measurement) -> Self {
        WorkerEvent::StopMeasurement {
            measurements: vec![measurement],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_event_json_shape() {
        let event = WorkerEvent::stop_with(Measurement::new("runtime", 1200.0, "ns"));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "stop_measurement");
        assert_eq!(json["measurements"][0]["unit"], "ns");
    }

    #[test]
    fn test_unit_variant_json_shape() {
        let json = serde_json::to_string(&WorkerEvent::Gc).unwrap();
        assert_eq!(json, r#"{"type":"gc"}"#);
    }

    #[test]
    fn test_progress_from_json() {
        let event: WorkerEvent =
            serde_json::from_str(r#"{"type":"progress","completed":3,"total":9}"#).unwrap();
        assert_eq!(
            event,
            WorkerEvent::Progress {
                completed: 3,
                total: 9
            }
        );
    }
}
