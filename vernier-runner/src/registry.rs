//! Instrument Registry
//!
//! The run's configured instruments, keyed by kind. Registration order
//! is preserved: it decides the order in which instruments get to claim
//! a method.

use std::fmt;
use vernier_instruments::{ConfigError, Instrument};
use vernier_model::{InstrumentKind, MethodDescriptor};

/// Run-scoped set of configured instruments.
#[derive(Default)]
pub struct InstrumentRegistry {
    instruments: Vec<Box<dyn Instrument>>,
}

impl InstrumentRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an instrument; at most one per kind.
    pub fn register(&mut self, instrument: Box<dyn Instrument>) -> Result<(), ConfigError> {
        if self.get(instrument.kind()).is_some() {
            return Err(ConfigError::DuplicateInstrument(instrument.kind()));
        }
        self.instruments.push(instrument);
        Ok(())
    }

    /// Instrument of the given kind, if registered.
    pub fn get(&self, kind: InstrumentKind) -> Option<&dyn Instrument> {
        self.instruments
            .iter()
            .find(|instrument| instrument.kind() == kind)
            .map(|instrument| instrument.as_ref())
    }

    /// Instruments claiming the method, in registration order.
    pub fn claiming<'a>(
        &'a self,
        method: &'a MethodDescriptor,
    ) -> impl Iterator<Item = &'a dyn Instrument> {
        self.instruments
            .iter()
            .filter(move |instrument| instrument.is_benchmark_method(method))
            .map(|instrument| instrument.as_ref())
    }

    /// All registered instruments, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Instrument> {
        self.instruments.iter().map(|instrument| instrument.as_ref())
    }

    /// Number of registered instruments.
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Whether no instrument is registered.
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

impl fmt::Debug for InstrumentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.instruments.iter().map(|instrument| instrument.kind()))
            .finish()
    }
}
