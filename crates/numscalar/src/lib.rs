//! Configurable numeric scalar types for schema-driven query engines.
//!
//! ## Crate layout
//! - `base`: builtin sanitizers and predicates for scalar configurations.
//! - `core`: wire values, literal syntax nodes, numeric flavors, error
//!   taxonomy, and the scalar pipeline.
//!
//! The `prelude` mirrors the surface used by engine integration code.

pub use numscalar_core as core;

pub mod base;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// re-exports so integration code can stay on one crate
pub use numscalar_core::{
    ast::{LiteralKind, LiteralNode, Position},
    error::{ConfigError, ErrorContext, ErrorSink, FailureKind, ScalarError, default_sink},
    flavor::{Float64, Int32, NumericFlavor},
    scalar::{FloatScalar, FloatScalarType, IntScalar, IntScalarType, ScalarOptions, ScalarType},
    traits::{Predicate, Sanitizer},
    value::Value,
};

///
/// Prelude
///

pub mod prelude {
    pub use crate::base;
    pub use numscalar_core::prelude::*;
}
