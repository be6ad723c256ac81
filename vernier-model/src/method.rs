//! Benchmark Method Metadata
//!
//! Normalized view of a candidate benchmark method as produced by the
//! scanner layer. Descriptors are immutable once built; instruments only
//! ever read them. Parameter and return types are recorded as plain type
//! names ("u64", "f64") so the descriptor does not depend on any
//! reflection support.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Marker annotations recognized by the built-in instruments.
pub mod annotations {
    /// Marks a method whose return value is itself the measurement.
    pub const ARBITRARY_MEASUREMENT: &str = "arbitrary_measurement";
    /// Marks a repetition-based benchmark method.
    pub const BENCHMARK: &str = "benchmark";
}

/// Visibility and binding flags of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Whether the method is declared public.
    pub is_public: bool,
    /// Whether the method is bound statically (no receiver).
    pub is_static: bool,
}

impl Default for Modifiers {
    /// A public instance method, the common case the scanner produces.
    fn default() -> Self {
        Self {
            is_public: true,
            is_static: false,
        }
    }
}

/// Immutable description of a candidate benchmark method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    name: String,
    parameter_types: Vec<String>,
    return_type: Option<String>,
    #[serde(default)]
    modifiers: Modifiers,
    annotations: BTreeSet<String>,
}

impl MethodDescriptor {
    /// Start building a descriptor for the named method.
    pub fn builder(name: impl Into<String>) -> MethodDescriptorBuilder {
        MethodDescriptorBuilder {
            name: name.into(),
            parameter_types: Vec::new(),
            return_type: None,
            modifiers: Modifiers::default(),
            annotations: BTreeSet::new(),
        }
    }

    /// Method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordered parameter type names.
    pub fn parameter_types(&self) -> &[String] {
        &self.parameter_types
    }

    /// Declared return type name, if any.
    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    /// Visibility and binding flags.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Annotations present on the method, in sorted order.
    pub fn annotations(&self) -> impl Iterator<Item = &str> {
        self.annotations.iter().map(String::as_str)
    }

    /// Whether the named annotation is present.
    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.contains(name)
    }
}

/// Builder for [`MethodDescriptor`].
#[derive(Debug, Clone)]
pub struct MethodDescriptorBuilder {
    name: String,
    parameter_types: Vec<String>,
    return_type: Option<String>,
    modifiers: Modifiers,
    annotations: BTreeSet<String>,
}

impl MethodDescriptorBuilder {
    /// Append a parameter type.
    pub fn parameter(mut self, ty: impl Into<String>) -> Self {
        self.parameter_types.push(ty.into());
        self
    }

    /// Set the return type.
    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    /// Replace the modifier flags (defaults to a public instance method).
    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Add a marker annotation.
    pub fn annotation(mut self, name: impl Into<String>) -> Self {
        self.annotations.insert(name.into());
        self
    }

    /// Finish building.
    pub fn build(self) -> MethodDescriptor {
        MethodDescriptor {
            name: self.name,
            parameter_types: self.parameter_types,
            return_type: self.return_type,
            modifiers: self.modifiers,
            annotations: self.annotations,
        }
    }
}
