//! Arbitrary Measurement Strategy
//!
//! The benchmark method performs its own measurement and returns the
//! value as an `f64`; the worker wraps that return value in a single
//! stop event. Validation therefore requires a shape the harness can
//! invoke directly: no parameters, an `f64` return, a public instance
//! method.

use crate::collector::MeasurementCollector;
use crate::error::{ConfigError, ProtocolViolation, ValidationError};
use crate::instrument::{Instrument, InstrumentedMethod};
use crate::options::{InstrumentConfig, GC_BEFORE_EACH};
use std::collections::BTreeMap;
use vernier_model::{annotations, InstrumentKind, Measurement, MethodDescriptor, WorkerEvent};

const KIND: InstrumentKind = InstrumentKind::ArbitraryMeasurement;
const RETURN_TYPE: &str = "f64";
const OPTIONS: &[&str] = &[GC_BEFORE_EACH];
const DEFAULT_GC_BEFORE_EACH: bool = true;

/// Strategy for methods that measure themselves.
#[derive(Debug, Clone)]
pub struct ArbitraryMeasurementInstrument {
    gc_before_each: bool,
}

impl ArbitraryMeasurementInstrument {
    /// Build the instrument from its option values.
    pub fn new(config: &InstrumentConfig) -> Result<Self, ConfigError> {
        config.ensure_recognized(KIND, OPTIONS)?;
        Ok(Self {
            gc_before_each: config.get_bool(GC_BEFORE_EACH, DEFAULT_GC_BEFORE_EACH)?,
        })
    }
}

impl Default for ArbitraryMeasurementInstrument {
    fn default() -> Self {
        Self {
            gc_before_each: DEFAULT_GC_BEFORE_EACH,
        }
    }
}

impl Instrument for ArbitraryMeasurementInstrument {
    fn kind(&self) -> InstrumentKind {
        KIND
    }

    fn is_benchmark_method(&self, method: &MethodDescriptor) -> bool {
        method.has_annotation(annotations::ARBITRARY_MEASUREMENT)
    }

    fn create_instrumented_method(
        &self,
        method: &MethodDescriptor,
    ) -> Result<Box<dyn InstrumentedMethod>, ValidationError> {
        if !method.parameter_types().is_empty() {
            return Err(ValidationError::UnexpectedParameters {
                kind: KIND,
                method: method.name().to_string(),
            });
        }
        if method.return_type() != Some(RETURN_TYPE) {
            return Err(ValidationError::WrongReturnType {
                kind: KIND,
                expected: RETURN_TYPE,
                method: method.name().to_string(),
            });
        }
        // Static would technically work, but the harness drives
        // benchmarks through a constructed instance.
        if method.modifiers().is_static {
            return Err(ValidationError::StaticMethod {
                kind: KIND,
                method: method.name().to_string(),
            });
        }
        if !method.modifiers().is_public {
            return Err(ValidationError::NotPublic {
                kind: KIND,
                method: method.name().to_string(),
            });
        }
        Ok(Box::new(ArbitraryInstrumentedMethod {
            method: method.clone(),
            gc_before_each: self.gc_before_each,
        }))
    }

    fn instrument_options(&self) -> &'static [&'static str] {
        OPTIONS
    }

    fn parallelizable(&self) -> bool {
        // Whether the user's measurement body tolerates concurrency is
        // unknowable here, so trials stay serialized.
        false
    }
}

#[derive(Debug)]
struct ArbitraryInstrumentedMethod {
    method: MethodDescriptor,
    gc_before_each: bool,
}

impl InstrumentedMethod for ArbitraryInstrumentedMethod {
    fn kind(&self) -> InstrumentKind {
        KIND
    }

    fn method(&self) -> &MethodDescriptor {
        &self.method
    }

    fn worker_options(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(GC_BEFORE_EACH.to_string(), self.gc_before_each.to_string())])
    }

    fn new_measurement_collector(&self) -> Box<dyn MeasurementCollector> {
        Box::new(SingleMeasurementCollector::Empty)
    }
}

/// Collector expecting exactly one measurement for the whole trial.
enum SingleMeasurementCollector {
    Empty,
    Complete(Measurement),
}

impl MeasurementCollector for SingleMeasurementCollector {
    fn visit(&mut self, event: &WorkerEvent) -> Result<(), ProtocolViolation> {
        let measurements = match event {
            WorkerEvent::StopMeasurement { measurements } => measurements,
            _ => return Ok(()),
        };
        if self.is_done_collecting() {
            return Err(ProtocolViolation::AlreadyComplete);
        }
        match measurements.as_slice() {
            [] => Err(ProtocolViolation::EmptyStopEvent),
            [only] => {
                *self = SingleMeasurementCollector::Complete(only.clone());
                Ok(())
            }
            more => Err(ProtocolViolation::UnexpectedMeasurementCount {
                expected: 1,
                got: more.len(),
            }),
        }
    }

    fn is_warmup_complete(&self) -> bool {
        // The single user-returned value is immediately authoritative.
        true
    }

    fn is_done_collecting(&self) -> bool {
        matches!(self, SingleMeasurementCollector::Complete(_))
    }

    fn measurements(&self) -> Vec<Measurement> {
        match self {
            SingleMeasurementCollector::Empty => Vec::new(),
            SingleMeasurementCollector::Complete(measurement) => vec![measurement.clone()],
        }
    }

    fn messages(&self) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vernier_model::Modifiers;

    fn arbitrary_method() -> MethodDescriptor {
        MethodDescriptor::builder("measure")
            .returns("f64")
            .annotation(annotations::ARBITRARY_MEASUREMENT)
            .build()
    }

    fn bound_method() -> Box<dyn InstrumentedMethod> {
        ArbitraryMeasurementInstrument::default()
            .create_instrumented_method(&arbitrary_method())
            .unwrap()
    }

    #[test]
    fn test_claims_annotated_methods_only() {
        let instrument = ArbitraryMeasurementInstrument::default();
        assert!(instrument.is_benchmark_method(&arbitrary_method()));
        let plain = MethodDescriptor::builder("helper").returns("f64").build();
        assert!(!instrument.is_benchmark_method(&plain));
    }

    #[test]
    fn test_rejects_parameters() {
        let method = MethodDescriptor::builder("measure")
            .parameter("u64")
            .returns("f64")
            .annotation(annotations::ARBITRARY_MEASUREMENT)
            .build();
        let err = ArbitraryMeasurementInstrument::default()
            .create_instrumented_method(&method)
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnexpectedParameters { .. }));
        assert!(err.to_string().contains("no parameters"));
        assert!(err.to_string().contains("measure"));
    }

    #[test]
    fn test_rejects_missing_return_type() {
        let method = MethodDescriptor::builder("measure")
            .annotation(annotations::ARBITRARY_MEASUREMENT)
            .build();
        let err = ArbitraryMeasurementInstrument::default()
            .create_instrumented_method(&method)
            .unwrap_err();
        assert!(matches!(err, ValidationError::WrongReturnType { .. }));
        assert!(err.to_string().contains("return type of f64"));
    }

    #[test]
    fn test_rejects_wrong_return_type() {
        let method = MethodDescriptor::builder("measure")
            .returns("u64")
            .annotation(annotations::ARBITRARY_MEASUREMENT)
            .build();
        let err = ArbitraryMeasurementInstrument::default()
            .create_instrumented_method(&method)
            .unwrap_err();
        assert!(matches!(err, ValidationError::WrongReturnType { .. }));
    }

    #[test]
    fn test_rejects_static_method() {
        let method = MethodDescriptor::builder("measure")
            .returns("f64")
            .modifiers(Modifiers {
                is_public: true,
                is_static: true,
            })
            .build();
        let err = ArbitraryMeasurementInstrument::default()
            .create_instrumented_method(&method)
            .unwrap_err();
        assert!(matches!(err, ValidationError::StaticMethod { .. }));
        assert!(err.to_string().contains("must not be static"));
    }

    #[test]
    fn test_rejects_non_public_method() {
        let method = MethodDescriptor::builder("measure")
            .returns("f64")
            .modifiers(Modifiers {
                is_public: false,
                is_static: false,
            })
            .build();
        let err = ArbitraryMeasurementInstrument::default()
            .create_instrumented_method(&method)
            .unwrap_err();
        assert!(matches!(err, ValidationError::NotPublic { .. }));
        assert!(err.to_string().contains("must be public"));
    }

    #[test]
    fn test_parameter_check_runs_first() {
        // A method wrong in every way reports the parameter problem.
        let method = MethodDescriptor::builder("measure")
            .parameter("u64")
            .modifiers(Modifiers {
                is_public: false,
                is_static: true,
            })
            .build();
        let err = ArbitraryMeasurementInstrument::default()
            .create_instrumented_method(&method)
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnexpectedParameters { .. }));
    }

    #[test]
    fn test_valid_method_binds() {
        let bound = bound_method();
        assert_eq!(bound.kind(), InstrumentKind::ArbitraryMeasurement);
        assert_eq!(bound.method().name(), "measure");
    }

    #[test]
    fn test_worker_options_reflect_config() {
        let config = InstrumentConfig::new().set(GC_BEFORE_EACH, "false");
        let instrument = ArbitraryMeasurementInstrument::new(&config).unwrap();
        let bound = instrument
            .create_instrumented_method(&arbitrary_method())
            .unwrap();
        let options = bound.worker_options();
        assert_eq!(options.len(), 1);
        assert_eq!(
            options.get(GC_BEFORE_EACH).map(String::as_str),
            Some("false")
        );
    }

    #[test]
    fn test_options_and_parallelizability() {
        let instrument = ArbitraryMeasurementInstrument::default();
        assert_eq!(instrument.instrument_options(), [GC_BEFORE_EACH]);
        assert!(!instrument.parallelizable());
    }

    #[test]
    fn test_unrecognized_option_rejected() {
        let config = InstrumentConfig::new().set("warmup", "10s");
        let err = ArbitraryMeasurementInstrument::new(&config).unwrap_err();
        assert!(matches!(err, ConfigError::UnrecognizedOptions { .. }));
    }

    #[test]
    fn test_fresh_collector_state() {
        let collector = bound_method().new_measurement_collector();
        assert!(!collector.is_done_collecting());
        assert!(collector.is_warmup_complete());
        assert!(collector.measurements().is_empty());
        assert!(collector.messages().is_empty());
    }

    #[test]
    fn test_single_stop_completes() {
        let mut collector = bound_method().new_measurement_collector();
        collector
            .visit(&WorkerEvent::stop_with(Measurement::new(
                "arbitrary", 42.0, "calls",
            )))
            .unwrap();
        assert!(collector.is_done_collecting());
        let collected = collector.measurements();
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].value, 42.0);
        assert_eq!(collected[0].description, "arbitrary");
    }

    #[test]
    fn test_empty_stop_is_violation_and_leaves_state() {
        let mut collector = bound_method().new_measurement_collector();
        let err = collector
            .visit(&WorkerEvent::StopMeasurement {
                measurements: Vec::new(),
            })
            .unwrap_err();
        assert_eq!(err, ProtocolViolation::EmptyStopEvent);
        assert!(!collector.is_done_collecting());
        assert!(collector.measurements().is_empty());
    }

    #[test]
    fn test_multi_value_stop_is_violation_and_leaves_state() {
        let mut collector = bound_method().new_measurement_collector();
        let err = collector
            .visit(&WorkerEvent::StopMeasurement {
                measurements: vec![
                    Measurement::new("arbitrary", 1.0, "calls"),
                    Measurement::new("arbitrary", 2.0, "calls"),
                ],
            })
            .unwrap_err();
        assert_eq!(
            err,
            ProtocolViolation::UnexpectedMeasurementCount {
                expected: 1,
                got: 2
            }
        );
        assert!(!collector.is_done_collecting());

        // The collector is still usable after the faulty event.
        collector
            .visit(&WorkerEvent::stop_with(Measurement::new(
                "arbitrary", 3.0, "calls",
            )))
            .unwrap();
        assert!(collector.is_done_collecting());
    }

    #[test]
    fn test_second_stop_is_violation() {
        let mut collector = bound_method().new_measurement_collector();
        collector
            .visit(&WorkerEvent::stop_with(Measurement::new(
                "arbitrary", 42.0, "calls",
            )))
            .unwrap();
        let err = collector
            .visit(&WorkerEvent::stop_with(Measurement::new(
                "arbitrary", 43.0, "calls",
            )))
            .unwrap_err();
        assert_eq!(err, ProtocolViolation::AlreadyComplete);
        assert_eq!(collector.measurements()[0].value, 42.0);
    }

    #[test]
    fn test_unrelated_events_ignored() {
        let mut collector = bound_method().new_measurement_collector();
        collector.visit(&WorkerEvent::StartMeasurement).unwrap();
        collector.visit(&WorkerEvent::Gc).unwrap();
        collector
            .visit(&WorkerEvent::Diagnostic {
                message: "worker says hi".to_string(),
            })
            .unwrap();
        collector
            .visit(&WorkerEvent::Progress {
                completed: 1,
                total: 2,
            })
            .unwrap();
        assert!(!collector.is_done_collecting());
        assert!(collector.messages().is_empty());

        collector
            .visit(&WorkerEvent::stop_with(Measurement::new(
                "arbitrary", 7.0, "calls",
            )))
            .unwrap();
        // Ignorable events stay ignorable after completion.
        collector.visit(&WorkerEvent::Gc).unwrap();
        assert!(collector.is_done_collecting());
    }
}
