#![warn(missing_docs)]
//! # Vernier
//!
//! Pluggable instrumentation layer for a benchmark runner.
//!
//! Vernier separates *what a benchmark measures* from *how the runner drives it*:
//! - **Instruments**: each strategy (wall-clock timing, allocation counting, arbitrary
//!   self-measurement) validates which methods it can drive and binds them for execution
//! - **Validation Contract**: rejections are typed errors carrying the instrument kind and
//!   the offending method, reported per method rather than aborting the suite
//! - **Collection Protocol**: workers stream events; a per-trial collector folds them into
//!   measurements and decides when warm-up and collection are complete
//! - **Worker Options**: each bound method publishes the configuration its worker needs as
//!   an ordered key/value snapshot
//! - **Scheduling**: trials for parallelizable instruments run concurrently; the rest run
//!   serially, and results come back in submission order either way
//!
//! ## Quick Start
//!
//! ```ignore
//! use vernier::prelude::*;
//!
//! let mut registry = InstrumentRegistry::new();
//! registry.register(Box::new(WallTimeInstrument::default()))?;
//! registry.register(Box::new(ArbitraryMeasurementInstrument::default()))?;
//!
//! let methods = load_benchmark_suite();
//! let plan = build_plan(&registry, &methods);
//!
//! for bound in &plan.instrumented {
//!     let events = spawn_worker(bound.worker_options());
//!     let result = run_trial(bound.as_ref(), events)?;
//!     println!("{}: {:?}", result.method, result.measurements);
//! }
//! ```

// Re-export model types
pub use vernier_model::{
    InstrumentKind, Measurement, MethodDescriptor, MethodDescriptorBuilder, Modifiers,
    WorkerEvent, annotations,
};

// Re-export instrument contract and strategies
pub use vernier_instruments::{
    AllocationInstrument, ArbitraryMeasurementInstrument, ConfigError, Instrument,
    InstrumentConfig, InstrumentedMethod, MeasurementCollector, ProtocolViolation,
    ValidationError, WallTimeInstrument,
};

// Re-export option keys
pub use vernier_instruments::{
    GC_BEFORE_EACH, MEASUREMENTS, TIMING_INTERVAL, TRACK_ALLOCATIONS, WARMUP,
};

// Re-export runner types
pub use vernier_runner::{
    InstrumentRegistry, InstrumentationPlan, RejectedMethod, Trial, TrialError, TrialResult,
    build_plan, run_trial, run_trials,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        AllocationInstrument, ArbitraryMeasurementInstrument, Instrument, InstrumentConfig,
        InstrumentKind, InstrumentRegistry, InstrumentedMethod, Measurement,
        MeasurementCollector, MethodDescriptor, WallTimeInstrument, WorkerEvent, build_plan,
        run_trial, run_trials,
    };
}
