use crate::{
    ast::{LiteralNode, Position},
    flavor::NumericFlavor,
    traits::Predicate,
    value::Value,
};
use serde::Serialize;
use std::fmt;
use thiserror::Error as ThisError;

///
/// FailureKind
///
/// Per-value failure taxonomy. Every pipeline rejection carries exactly one
/// of these; there is no other per-value failure channel.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum FailureKind {
    Input,
    Max,
    Min,
    Test,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Input => "input",
            Self::Max => "max",
            Self::Min => "min",
            Self::Test => "test",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorContext
///
/// Failure record handed to the error sink. Constructed fresh per failure;
/// nothing in it outlives the pipeline call that produced it. `value` is
/// the raw wire value as it entered the pipeline, `ast` the originating
/// literal node when the value came from source text.
///
/// Bounds and the predicate are echoed back only on their own failure
/// kinds, so a custom sink can report against the configured rule.
///

pub struct ErrorContext<'a, F: NumericFlavor> {
    pub kind: FailureKind,
    pub value: &'a Value,
    pub min: Option<F::Num>,
    pub max: Option<F::Num>,
    pub test: Option<&'a dyn Predicate<F::Num>>,
    pub message: Option<String>,
    pub ast: Option<&'a LiteralNode>,
}

///
/// ErrorSink
///
/// Sink contract: map a failure context to the request-level error the
/// pipeline returns. Returning the error (rather than unwinding) is the
/// enforced form of the abort discipline — the pipeline exits with the
/// sink's value and later phases are unreachable by construction.
///

pub type ErrorSink<F> = dyn Fn(&ErrorContext<'_, F>) -> ScalarError + Send + Sync;

///
/// ScalarError
///
/// Structured request-level failure surfaced on the engine's error channel:
/// a human-readable message plus the originating source positions (empty
/// for variable parsing).
///

#[derive(Clone, Debug, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct ScalarError {
    pub kind: FailureKind,
    pub message: String,
    pub locations: Vec<Position>,
}

impl ScalarError {
    #[must_use]
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            locations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_locations(mut self, locations: Vec<Position>) -> Self {
        self.locations = locations;
        self
    }

    #[must_use]
    pub fn locations(&self) -> &[Position] {
        &self.locations
    }
}

/// Default sink: `Invalid value <value>.` plus the phase detail when one is
/// present, annotated with the literal's source position when available.
/// Custom sinks may delegate here and decorate the result.
pub fn default_sink<F: NumericFlavor>(ctx: &ErrorContext<'_, F>) -> ScalarError {
    let mut message = format!("Invalid value {}.", ctx.value);
    if let Some(detail) = &ctx.message {
        message.push(' ');
        message.push_str(detail);
        message.push('.');
    }

    let locations = ctx
        .ast
        .and_then(|node| node.position)
        .map(|position| vec![position])
        .unwrap_or_default();

    ScalarError {
        kind: ctx.kind,
        message,
        locations,
    }
}

///
/// ConfigError
///
/// Construction-time misconfiguration. Raised by `build()` before any value
/// is processed; never part of the per-value failure taxonomy.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum ConfigError {
    #[error("scalar type requires a non-empty \"name\"")]
    MissingName,
}

///
/// TESTS
///
