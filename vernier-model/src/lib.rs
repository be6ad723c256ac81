#![warn(missing_docs)]
//! Vernier Data Model
//!
//! Types shared between the benchmark runner and its workers: method
//! metadata produced by the scanner, measurement values, the strategy
//! tag, and the worker event vocabulary. Everything here is plain data;
//! the instruments and the runner plumbing live in their own crates.

mod event;
mod kind;
mod measurement;
mod method;

pub use event::WorkerEvent;
pub use kind::InstrumentKind;
pub use measurement::Measurement;
pub use method::{annotations, MethodDescriptor, MethodDescriptorBuilder, Modifiers};
