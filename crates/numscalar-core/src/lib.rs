//! Core runtime for numscalar: the wire value model, literal syntax nodes,
//! numeric flavors, and the configurable scalar pipeline, with the common
//! vocabulary exported via the `prelude`.

pub mod ast;
pub mod error;
pub mod flavor;
pub mod scalar;
pub mod traits;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// Sinks, contexts, and hook traits are imported from their modules.
///

pub mod prelude {
    pub use crate::{
        ast::{LiteralKind, LiteralNode, Position},
        error::{ConfigError, FailureKind, ScalarError},
        flavor::{Float64, Int32, NumericFlavor},
        scalar::{
            FloatScalar, FloatScalarType, IntScalar, IntScalarType, ScalarOptions, ScalarType,
        },
        value::Value,
    };
}
