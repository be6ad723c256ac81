#![warn(missing_docs)]
//! Vernier Runner Plumbing
//!
//! Runner-side orchestration of the instrument contract: a registry of
//! the run's configured instruments, suite planning, and trial
//! execution. The worker transport stays outside this workspace;
//! trials consume event values wherever they came from.

mod plan;
mod registry;
mod trial;

pub use plan::{build_plan, InstrumentationPlan, RejectedMethod};
pub use registry::InstrumentRegistry;
pub use trial::{run_trial, run_trials, Trial, TrialError, TrialResult};
