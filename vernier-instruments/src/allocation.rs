//! Allocation Strategy
//!
//! Counts objects and bytes allocated by the benchmark method. The
//! worker emits one objects/bytes measurement pair per interval.
//! Allocation counts are deterministic per invocation and unaffected by
//! co-scheduled load, so trials under this strategy may run
//! concurrently.

use crate::collector::MeasurementCollector;
use crate::error::{ConfigError, ProtocolViolation, ValidationError};
use crate::instrument::{validate_reps_shape, Instrument, InstrumentedMethod};
use crate::options::{InstrumentConfig, TRACK_ALLOCATIONS};
use std::collections::BTreeMap;
use vernier_model::{annotations, InstrumentKind, Measurement, MethodDescriptor, WorkerEvent};

const KIND: InstrumentKind = InstrumentKind::Allocation;
const PARAMETER_TYPE: &str = "u64";
const OPTIONS: &[&str] = &[TRACK_ALLOCATIONS];
const DEFAULT_TRACK_ALLOCATIONS: bool = false;

// One objects measurement and one bytes measurement per interval.
const MEASUREMENTS_PER_INTERVAL: usize = 2;

/// Strategy counting allocations instead of time.
#[derive(Debug, Clone)]
pub struct AllocationInstrument {
    track_allocations: bool,
}

impl AllocationInstrument {
    /// Build the instrument from its option values.
    pub fn new(config: &InstrumentConfig) -> Result<Self, ConfigError> {
        config.ensure_recognized(KIND, OPTIONS)?;
        Ok(Self {
            track_allocations: config.get_bool(TRACK_ALLOCATIONS, DEFAULT_TRACK_ALLOCATIONS)?,
        })
    }
}

impl Default for AllocationInstrument {
    fn default() -> Self {
        Self {
            track_allocations: DEFAULT_TRACK_ALLOCATIONS,
        }
    }
}

impl Instrument for AllocationInstrument {
    fn kind(&self) -> InstrumentKind {
        KIND
    }

    fn is_benchmark_method(&self, method: &MethodDescriptor) -> bool {
        method.has_annotation(annotations::BENCHMARK)
    }

    fn create_instrumented_method(
        &self,
        method: &MethodDescriptor,
    ) -> Result<Box<dyn InstrumentedMethod>, ValidationError> {
        validate_reps_shape(KIND, method, PARAMETER_TYPE)?;
        Ok(Box::new(AllocationInstrumentedMethod {
            method: method.clone(),
            track_allocations: self.track_allocations,
        }))
    }

    fn instrument_options(&self) -> &'static [&'static str] {
        OPTIONS
    }

    fn parallelizable(&self) -> bool {
        true
    }
}

#[derive(Debug)]
struct AllocationInstrumentedMethod {
    method: MethodDescriptor,
    track_allocations: bool,
}

impl InstrumentedMethod for AllocationInstrumentedMethod {
    fn kind(&self) -> InstrumentKind {
        KIND
    }

    fn method(&self) -> &MethodDescriptor {
        &self.method
    }

    fn worker_options(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(
            TRACK_ALLOCATIONS.to_string(),
            self.track_allocations.to_string(),
        )])
    }

    fn new_measurement_collector(&self) -> Box<dyn MeasurementCollector> {
        Box::new(AllocationCollector {
            target: MEASUREMENTS_PER_INTERVAL,
            measurements: Vec::new(),
        })
    }
}

/// Collects whole measurement batches until the target count is reached.
struct AllocationCollector {
    target: usize,
    measurements: Vec<Measurement>,
}

impl MeasurementCollector for AllocationCollector {
    fn visit(&mut self, event: &WorkerEvent) -> Result<(), ProtocolViolation> {
        let measurements = match event {
            WorkerEvent::StopMeasurement { measurements } => measurements,
            _ => return Ok(()),
        };
        if self.is_done_collecting() {
            return Err(ProtocolViolation::AlreadyComplete);
        }
        if measurements.is_empty() {
            return Err(ProtocolViolation::EmptyStopEvent);
        }
        self.measurements.extend(measurements.iter().cloned());
        Ok(())
    }

    fn is_warmup_complete(&self) -> bool {
        // Allocation counts need no warm-up.
        true
    }

    fn is_done_collecting(&self) -> bool {
        self.measurements.len() >= self.target
    }

    fn measurements(&self) -> Vec<Measurement> {
        self.measurements.clone()
    }

    fn messages(&self) -> Vec<String> {
        Vec::new()
    }
}
