#![warn(missing_docs)]
//! Vernier Instruments
//!
//! The instrument contract and the built-in measurement strategies. An
//! [`Instrument`] decides which methods it claims and validates their
//! shape; the resulting [`InstrumentedMethod`] carries the worker
//! configuration for that method and hands out one fresh
//! [`MeasurementCollector`] per trial to fold the worker's event stream
//! into measurements.

mod allocation;
mod arbitrary;
mod collector;
mod error;
mod instrument;
mod options;
mod wall_time;

pub use allocation::AllocationInstrument;
pub use arbitrary::ArbitraryMeasurementInstrument;
pub use collector::MeasurementCollector;
pub use error::{ConfigError, ProtocolViolation, ValidationError};
pub use instrument::{Instrument, InstrumentedMethod};
pub use options::{
    InstrumentConfig, GC_BEFORE_EACH, MEASUREMENTS, TIMING_INTERVAL, TRACK_ALLOCATIONS, WARMUP,
};
pub use wall_time::WallTimeInstrument;
