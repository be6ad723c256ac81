//! Trial Execution
//!
//! Feeds worker event streams to per-trial collectors and schedules a
//! suite of trials, running concurrently only where the owning
//! instrument allows it.

use crate::registry::InstrumentRegistry;
use rayon::prelude::*;
use thiserror::Error;
use vernier_instruments::{InstrumentedMethod, ProtocolViolation};
use vernier_model::{InstrumentKind, Measurement, WorkerEvent};

/// One planned execution: a bound method plus the event stream its
/// worker produced.
pub struct Trial<'a> {
    /// The strategy-bound method under test.
    pub method: &'a dyn InstrumentedMethod,
    /// Ordered worker events for this trial.
    pub events: Vec<WorkerEvent>,
}

/// Aggregated outcome of one completed trial.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialResult {
    /// Method name.
    pub method: String,
    /// Strategy that produced the measurements.
    pub kind: InstrumentKind,
    /// Collected measurements, in arrival order.
    pub measurements: Vec<Measurement>,
    /// Diagnostic messages the collector produced.
    pub messages: Vec<String>,
}

/// Why a trial failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrialError {
    /// The event stream broke the collection contract.
    #[error(transparent)]
    Protocol(#[from] ProtocolViolation),

    /// The stream ended before the collector finished.
    #[error("worker event stream ended before collection completed: {method}")]
    Incomplete {
        /// Method whose trial was cut short.
        method: String,
    },
}

/// Run one trial to completion.
///
/// Creates a fresh collector, feeds it the events in order, and stops
/// at the first event after which the collector reports done; trailing
/// events are not consumed. A protocol violation or a stream that ends
/// early fails the trial, and only this trial.
pub fn run_trial(
    method: &dyn InstrumentedMethod,
    events: impl IntoIterator<Item = WorkerEvent>,
) -> Result<TrialResult, TrialError> {
    let name = method.method().name().to_string();
    let kind = method.kind();
    let mut collector = method.new_measurement_collector();

    for event in events {
        if let Err(violation) = collector.visit(&event) {
            tracing::error!("protocol violation in {} trial of {}: {}", kind, name, violation);
            return Err(violation.into());
        }
        if collector.is_done_collecting() {
            tracing::debug!("{} trial of {} complete", kind, name);
            return Ok(TrialResult {
                method: name,
                kind,
                measurements: collector.measurements(),
                messages: collector.messages(),
            });
        }
    }

    tracing::error!("{} trial of {} ended before collection completed", kind, name);
    Err(TrialError::Incomplete { method: name })
}

/// Run a suite of trials, returning results in input order.
///
/// Trials whose instrument reports `parallelizable()` run on the Rayon
/// pool; the rest run serially on the calling thread. A kind missing
/// from the registry is scheduled serially.
pub fn run_trials(
    registry: &InstrumentRegistry,
    trials: Vec<Trial<'_>>,
) -> Vec<Result<TrialResult, TrialError>> {
    let (parallel, serial): (Vec<_>, Vec<_>) =
        trials.into_iter().enumerate().partition(|(_, trial)| {
            registry
                .get(trial.method.kind())
                .map(|instrument| instrument.parallelizable())
                .unwrap_or(false)
        });

    let mut indexed: Vec<(usize, Result<TrialResult, TrialError>)> = parallel
        .into_par_iter()
        .map(|(index, trial)| (index, run_trial(trial.method, trial.events)))
        .collect();
    indexed.extend(
        serial
            .into_iter()
            .map(|(index, trial)| (index, run_trial(trial.method, trial.events))),
    );

    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, result)| result).collect()
}
