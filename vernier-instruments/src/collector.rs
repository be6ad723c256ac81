//! Measurement Collection
//!
//! A collector folds one trial's worker event stream into measurements.
//! Collectors are single-use: the owning trial feeds events until
//! [`MeasurementCollector::is_done_collecting`] reports true, reads the
//! results, and drops the collector.

use crate::error::ProtocolViolation;
use vernier_model::{Measurement, WorkerEvent};

/// Stateful consumer of one trial's event stream.
///
/// Implementations never block and never perform I/O; they are pure
/// state accumulators driven by [`visit`](Self::visit). Events a
/// strategy does not understand are ignored, never errors.
pub trait MeasurementCollector: Send {
    /// Consume one event.
    ///
    /// A violation leaves the collector's observable state unchanged;
    /// the caller may still read whatever was collected before the
    /// faulty event.
    fn visit(&mut self, event: &WorkerEvent) -> Result<(), ProtocolViolation>;

    /// Whether the warm-up phase, if the strategy has one, finished.
    fn is_warmup_complete(&self) -> bool;

    /// Whether enough measurements arrived to finish the trial.
    fn is_done_collecting(&self) -> bool;

    /// Snapshot of the measurements collected so far.
    fn measurements(&self) -> Vec<Measurement>;

    /// Snapshot of diagnostic messages the collector produced.
    fn messages(&self) -> Vec<String>;
}
