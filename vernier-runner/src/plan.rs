//! Instrumentation Planning
//!
//! Binds a suite of candidate methods to the registered instruments.
//! Every claiming instrument gets its own attempt per method, so one
//! method may yield several instrumented methods, and a failure under
//! one instrument never hides another's success.

use crate::registry::InstrumentRegistry;
use std::fmt;
use vernier_instruments::{InstrumentedMethod, ValidationError};
use vernier_model::{InstrumentKind, MethodDescriptor};

/// One (method, instrument) pair that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedMethod {
    /// Candidate method name.
    pub method: String,
    /// Instrument that rejected it.
    pub kind: InstrumentKind,
    /// Why it was rejected.
    pub error: ValidationError,
}

/// Result of binding a method suite against a registry.
pub struct InstrumentationPlan {
    /// Successfully validated, strategy-bound methods.
    pub instrumented: Vec<Box<dyn InstrumentedMethod>>,
    /// Per-pair validation failures.
    pub rejected: Vec<RejectedMethod>,
    /// Methods no registered instrument claimed.
    pub unclaimed: Vec<String>,
}

impl InstrumentationPlan {
    /// Whether at least one instrumented method survived planning.
    pub fn has_work(&self) -> bool {
        !self.instrumented.is_empty()
    }
}

impl fmt::Debug for InstrumentationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstrumentationPlan")
            .field("instrumented", &self.instrumented.len())
            .field("rejected", &self.rejected)
            .field("unclaimed", &self.unclaimed)
            .finish()
    }
}

/// Validate every candidate against every claiming instrument.
///
/// Rejections are collected, not propagated: a failure affects only its
/// own (method, instrument) pair, and sibling methods keep validating.
pub fn build_plan(
    registry: &InstrumentRegistry,
    methods: &[MethodDescriptor],
) -> InstrumentationPlan {
    let mut plan = InstrumentationPlan {
        instrumented: Vec::new(),
        rejected: Vec::new(),
        unclaimed: Vec::new(),
    };

    for method in methods {
        let mut claimed = false;
        for instrument in registry.claiming(method) {
            claimed = true;
            match instrument.create_instrumented_method(method) {
                Ok(bound) => plan.instrumented.push(bound),
                Err(error) => {
                    tracing::warn!(
                        "{} instrument rejected method {}: {}",
                        instrument.kind(),
                        method.name(),
                        error
                    );
                    plan.rejected.push(RejectedMethod {
                        method: method.name().to_string(),
                        kind: instrument.kind(),
                        error,
                    });
                }
            }
        }
        if !claimed {
            tracing::debug!("no instrument claims method {}", method.name());
            plan.unclaimed.push(method.name().to_string());
        }
    }

    plan
}
