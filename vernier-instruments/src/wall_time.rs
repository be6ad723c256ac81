//! Wall-Time Strategy
//!
//! Times repeated invocations of the benchmark method. The worker runs
//! timed intervals bracketed by start/stop events; measured time first
//! fills a warm-up budget (those measurements are discarded), then
//! measurements count toward the configured target. A garbage
//! collection inside a timed interval after warm-up taints the timings
//! and is reported as a trial message.

use crate::collector::MeasurementCollector;
use crate::error::{ConfigError, ProtocolViolation, ValidationError};
use crate::instrument::{validate_reps_shape, Instrument, InstrumentedMethod};
use crate::options::{InstrumentConfig, GC_BEFORE_EACH, MEASUREMENTS, TIMING_INTERVAL, WARMUP};
use std::collections::BTreeMap;
use vernier_model::{annotations, InstrumentKind, Measurement, MethodDescriptor, WorkerEvent};

const KIND: InstrumentKind = InstrumentKind::WallTime;
const PARAMETER_TYPE: &str = "u64";
const OPTIONS: &[&str] = &[WARMUP, TIMING_INTERVAL, MEASUREMENTS, GC_BEFORE_EACH];

const DEFAULT_WARMUP_NS: u64 = 10_000_000_000;
const DEFAULT_TIMING_INTERVAL_NS: u64 = 500_000_000;
const DEFAULT_MEASUREMENTS: usize = 9;
const DEFAULT_GC_BEFORE_EACH: bool = false;

// Worker-side keys; durations are resolved to nanoseconds before they
// cross the process boundary.
const WARMUP_NANOS_KEY: &str = "warmupNanos";
const TIMING_INTERVAL_NANOS_KEY: &str = "timingIntervalNanos";

const GC_MESSAGE: &str = "GC occurred during timing";

/// Strategy timing repeated invocations against the wall clock.
#[derive(Debug, Clone)]
pub struct WallTimeInstrument {
    warmup_ns: u64,
    timing_interval_ns: u64,
    measurements: usize,
    gc_before_each: bool,
}

impl WallTimeInstrument {
    /// Build the instrument from its option values.
    pub fn new(config: &InstrumentConfig) -> Result<Self, ConfigError> {
        config.ensure_recognized(KIND, OPTIONS)?;
        Ok(Self {
            warmup_ns: config.get_duration_ns(WARMUP, DEFAULT_WARMUP_NS)?,
            timing_interval_ns: config
                .get_duration_ns(TIMING_INTERVAL, DEFAULT_TIMING_INTERVAL_NS)?,
            measurements: config.get_count(MEASUREMENTS, DEFAULT_MEASUREMENTS)?,
            gc_before_each: config.get_bool(GC_BEFORE_EACH, DEFAULT_GC_BEFORE_EACH)?,
        })
    }
}

impl Default for WallTimeInstrument {
    fn default() -> Self {
        Self {
            warmup_ns: DEFAULT_WARMUP_NS,
            timing_interval_ns: DEFAULT_TIMING_INTERVAL_NS,
            measurements: DEFAULT_MEASUREMENTS,
            gc_before_each: DEFAULT_GC_BEFORE_EACH,
        }
    }
}

impl Instrument for WallTimeInstrument {
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
        Ok(Box::new(WallTimeInstrumentedMethod {
            method: method.clone(),
            instrument: self.clone(),
        }))
    }

    fn instrument_options(&self) -> &'static [&'static str] {
        OPTIONS
    }

    fn parallelizable(&self) -> bool {
        // Timing shares the machine; co-scheduled trials skew results.
        false
    }
}

#[derive(Debug)]
struct WallTimeInstrumentedMethod {
    method: MethodDescriptor,
    instrument: WallTimeInstrument,
}

impl InstrumentedMethod for WallTimeInstrumentedMethod {
    fn kind(&self) -> InstrumentKind {
        KIND
    }

    fn method(&self) -> &MethodDescriptor {
        &self.method
    }

    fn worker_options(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (
                WARMUP_NANOS_KEY.to_string(),
                self.instrument.warmup_ns.to_string(),
            ),
            (
                TIMING_INTERVAL_NANOS_KEY.to_string(),
                self.instrument.timing_interval_ns.to_string(),
            ),
            (
                MEASUREMENTS.to_string(),
                self.instrument.measurements.to_string(),
            ),
            (
                GC_BEFORE_EACH.to_string(),
                self.instrument.gc_before_each.to_string(),
            ),
        ])
    }

    fn new_measurement_collector(&self) -> Box<dyn MeasurementCollector> {
        Box::new(WallTimeCollector::new(
            self.instrument.warmup_ns,
            self.instrument.measurements,
        ))
    }
}

/// Collector with a warm-up budget and a target measurement count.
struct WallTimeCollector {
    warmup_ns: u64,
    target: usize,
    elapsed_warmup_ns: u64,
    measuring: bool,
    gc_noted: bool,
    measurements: Vec<Measurement>,
    messages: Vec<String>,
}

impl WallTimeCollector {
    fn new(warmup_ns: u64, target: usize) -> Self {
        Self {
            warmup_ns,
            target,
            elapsed_warmup_ns: 0,
            measuring: false,
            gc_noted: false,
            measurements: Vec::new(),
            messages: Vec::new(),
        }
    }
}

impl MeasurementCollector for WallTimeCollector {
    fn visit(&mut self, event: &WorkerEvent) -> Result<(), ProtocolViolation> {
        match event {
            WorkerEvent::StartMeasurement => {
                self.measuring = true;
                Ok(())
            }
            WorkerEvent::StopMeasurement { measurements } => {
                if self.is_done_collecting() {
                    return Err(ProtocolViolation::AlreadyComplete);
                }
                if measurements.is_empty() {
                    return Err(ProtocolViolation::EmptyStopEvent);
                }
                if self.is_warmup_complete() {
                    self.measurements.extend(measurements.iter().cloned());
                } else {
                    // Warm-up intervals are timed but their results are
                    // discarded; only the elapsed time counts.
                    self.elapsed_warmup_ns += measurements
                        .iter()
                        .map(|measurement| measurement.value as u64)
                        .sum::<u64>();
                }
                self.measuring = false;
                Ok(())
            }
            WorkerEvent::Gc => {
                if self.measuring && self.is_warmup_complete() && !self.gc_noted {
                    self.messages.push(GC_MESSAGE.to_string());
                    self.gc_noted = true;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn is_warmup_complete(&self) -> bool {
        self.elapsed_warmup_ns >= self.warmup_ns
    }

    fn is_done_collecting(&self) -> bool {
        self.measurements.len() >= self.target
    }

    fn measurements(&self) -> Vec<Measurement> {
        self.measurements.clone()
    }

    fn messages(&self) -> Vec<String> {
        self.messages.clone()
    }
}
