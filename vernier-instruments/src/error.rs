//! Instrumentation Error Taxonomy
//!
//! Three failure families with different audiences: [`ValidationError`]
//! rejects a method before any worker launches and surfaces verbatim to
//! the user; [`ProtocolViolation`] flags worker/runner desynchronization
//! inside a single trial; [`ConfigError`] rejects bad per-instrument
//! options at setup time.

use thiserror::Error;
use vernier_model::InstrumentKind;

/// A method's shape violates a strategy precondition.
///
/// Raised during `create_instrumented_method` at configuration time.
/// The offending method is rejected without affecting its siblings, and
/// every message names the method so the user can find it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The strategy requires a parameterless method.
    #[error("{kind} methods should take no parameters: {method}")]
    UnexpectedParameters {
        /// Strategy that rejected the method.
        kind: InstrumentKind,
        /// Offending method name.
        method: String,
    },

    /// The strategy requires a single parameter of a specific type.
    #[error("{kind} methods must take a single {expected} parameter: {method}")]
    WrongParameters {
        /// Strategy that rejected the method.
        kind: InstrumentKind,
        /// Required parameter type.
        expected: &'static str,
        /// Offending method name.
        method: String,
    },

    /// The return type is absent or not what the strategy requires.
    #[error("{kind} methods must have a return type of {expected}: {method}")]
    WrongReturnType {
        /// Strategy that rejected the method.
        kind: InstrumentKind,
        /// Required return type.
        expected: &'static str,
        /// Offending method name.
        method: String,
    },

    /// The method is declared static.
    #[error("{kind} methods must not be static: {method}")]
    StaticMethod {
        /// Strategy that rejected the method.
        kind: InstrumentKind,
        /// Offending method name.
        method: String,
    },

    /// The method is not public.
    #[error("{kind} methods must be public: {method}")]
    NotPublic {
        /// Strategy that rejected the method.
        kind: InstrumentKind,
        /// Offending method name.
        method: String,
    },
}

impl ValidationError {
    /// Name of the rejected method.
    pub fn method(&self) -> &str {
        match self {
            ValidationError::UnexpectedParameters { method, .. }
            | ValidationError::WrongParameters { method, .. }
            | ValidationError::WrongReturnType { method, .. }
            | ValidationError::StaticMethod { method, .. }
            | ValidationError::NotPublic { method, .. } => method,
        }
    }
}

/// The worker event stream broke the collection contract.
///
/// Indicates a desynchronization bug between worker and runner, not a
/// user error. Aborts only the trial that observed it; the collector's
/// state is unchanged by the faulty event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolViolation {
    /// A stop-measurement event carried no values.
    #[error("stop event carried no measurements")]
    EmptyStopEvent,

    /// A stop-measurement event carried the wrong number of values.
    #[error("expected {expected} measurement(s) in stop event, got {got}")]
    UnexpectedMeasurementCount {
        /// How many values the strategy expects per stop event.
        expected: usize,
        /// How many arrived.
        got: usize,
    },

    /// A stop-measurement event arrived after collection completed.
    #[error("stop event arrived after collection completed")]
    AlreadyComplete,
}

/// Per-instrument option handling failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Options contained keys the strategy does not understand.
    #[error("{kind} does not recognize option(s): {}", .keys.join(", "))]
    UnrecognizedOptions {
        /// Strategy the options were meant for.
        kind: InstrumentKind,
        /// The unknown keys, in sorted order.
        keys: Vec<String>,
    },

    /// An option value failed to parse.
    #[error("invalid value for option {key}: {value}")]
    InvalidValue {
        /// Option key.
        key: String,
        /// Rejected value.
        value: String,
    },

    /// Two instruments of the same kind were registered.
    #[error("instrument already registered for kind {0}")]
    DuplicateInstrument(InstrumentKind),
}
