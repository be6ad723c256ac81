//! Instrument Contract
//!
//! The capability surface every measurement strategy implements. The
//! runner treats instruments as opaque plugins: it asks which methods a
//! strategy claims, has the strategy validate and wrap them, and from
//! then on only talks to the resulting [`InstrumentedMethod`].

use crate::collector::MeasurementCollector;
use crate::error::ValidationError;
use std::collections::BTreeMap;
use std::fmt::Debug;
use vernier_model::{InstrumentKind, MethodDescriptor};

/// A measurement strategy plugin.
///
/// Implementations are immutable once constructed and are shared freely
/// across concurrent trials.
pub trait Instrument: Send + Sync {
    /// Strategy identifier; unique within a registry.
    fn kind(&self) -> InstrumentKind;

    /// Whether this strategy claims the method. Pure; safe to call on
    /// every candidate in a suite.
    fn is_benchmark_method(&self, method: &MethodDescriptor) -> bool;

    /// Validate the method's shape and bind it to this strategy.
    ///
    /// Checks run in a fixed order and the first failure wins; the
    /// error names the offending method and surfaces verbatim to the
    /// user.
    fn create_instrumented_method(
        &self,
        method: &MethodDescriptor,
    ) -> Result<Box<dyn InstrumentedMethod>, ValidationError>;

    /// Option keys this strategy understands. Anything else supplied
    /// for it is rejected by the option layer.
    fn instrument_options(&self) -> &'static [&'static str];

    /// Whether trials under this strategy may run concurrently.
    fn parallelizable(&self) -> bool;
}

/// A benchmark method validated and bound to one strategy.
pub trait InstrumentedMethod: Debug + Send + Sync {
    /// Strategy this method is bound to.
    fn kind(&self) -> InstrumentKind;

    /// The validated descriptor.
    fn method(&self) -> &MethodDescriptor;

    /// Snapshot of the options this method's worker needs. Never a
    /// live view; mutating the returned map has no effect.
    fn worker_options(&self) -> BTreeMap<String, String>;

    /// Fresh, empty collector for one trial. No state is shared
    /// between collectors returned by successive calls.
    fn new_measurement_collector(&self) -> Box<dyn MeasurementCollector>;
}

/// Shared shape check for repetition-based strategies: a single typed
/// repetition-count parameter on a public instance method.
pub(crate) fn validate_reps_shape(
    kind: InstrumentKind,
    method: &MethodDescriptor,
    parameter_type: &'static str,
) -> Result<(), ValidationError> {
    match method.parameter_types() {
        [single] if single.as_str() == parameter_type => {}
        _ => {
            return Err(ValidationError::WrongParameters {
                kind,
                expected: parameter_type,
                method: method.name().to_string(),
            })
        }
    }
    if method.modifiers().is_static {
        return Err(ValidationError::StaticMethod {
            kind,
            method: method.name().to_string(),
        });
    }
    if !method.modifiers().is_public {
        return Err(ValidationError::NotPublic {
            kind,
            method: method.name().to_string(),
        });
    }
    Ok(())
}
