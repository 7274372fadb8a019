use crate::{
    ast::LiteralNode,
    error::{ConfigError, ErrorContext, ErrorSink, FailureKind, ScalarError, default_sink},
    flavor::{Float64, Int32, NumericFlavor},
    traits::{Predicate, Sanitizer},
    value::Value,
};
use std::fmt;

#[cfg(test)]
mod tests;

///
/// ScalarOptions
///
/// Declarative configuration for one scalar type. Everything is optional
/// except `name`; `build` captures the configuration once and the result is
/// immutable afterwards.
///

pub struct ScalarOptions<F: NumericFlavor> {
    name: Option<String>,
    description: Option<String>,
    specified_by_url: Option<String>,
    min: Option<F::Num>,
    max: Option<F::Num>,
    sanitize: Option<Box<dyn Sanitizer<F::Num>>>,
    test: Option<Box<dyn Predicate<F::Num>>>,
    parse: Option<Box<dyn Fn(F::Num) -> F::Num + Send + Sync>>,
    error: Option<Box<ErrorSink<F>>>,
}

/// Flavor-fixed entry points to the factory.
pub type IntScalar = ScalarOptions<Int32>;
pub type FloatScalar = ScalarOptions<Float64>;

impl<F: NumericFlavor> Default for ScalarOptions<F> {
    fn default() -> Self {
        Self {
            name: None,
            description: None,
            specified_by_url: None,
            min: None,
            max: None,
            sanitize: None,
            test: None,
            parse: None,
            error: None,
        }
    }
}

impl<F: NumericFlavor> ScalarOptions<F> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier for the produced scalar type. Required.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Opaque descriptor passthrough; never interpreted by the pipeline.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Opaque descriptor passthrough; never interpreted by the pipeline.
    #[must_use]
    pub fn specified_by_url(mut self, url: impl Into<String>) -> Self {
        self.specified_by_url = Some(url.into());
        self
    }

    /// Inclusive lower bound.
    #[must_use]
    pub fn min(mut self, min: F::Num) -> Self {
        self.min = Some(min);
        self
    }

    /// Inclusive upper bound.
    #[must_use]
    pub fn max(mut self, max: F::Num) -> Self {
        self.max = Some(max);
        self
    }

    /// Post-coercion cleanup, run before the range and predicate checks.
    #[must_use]
    pub fn sanitize(mut self, sanitize: impl Sanitizer<F::Num> + 'static) -> Self {
        self.sanitize = Some(Box::new(sanitize));
        self
    }

    /// Custom acceptance rule, run after the range checks.
    #[must_use]
    pub fn test(mut self, test: impl Predicate<F::Num> + 'static) -> Self {
        self.test = Some(Box::new(test));
        self
    }

    /// Final transform applied to an accepted value on the input paths.
    /// Never applied during serialization.
    #[must_use]
    pub fn parse(mut self, parse: impl Fn(F::Num) -> F::Num + Send + Sync + 'static) -> Self {
        self.parse = Some(Box::new(parse));
        self
    }

    /// Replace the default error sink. The sink builds the error the
    /// pipeline returns; it is called exactly once per rejected value.
    #[must_use]
    pub fn error_sink(
        mut self,
        sink: impl Fn(&ErrorContext<'_, F>) -> ScalarError + Send + Sync + 'static,
    ) -> Self {
        self.error = Some(Box::new(sink));
        self
    }

    /// Validated construction; fails fast before any value is processed.
    pub fn build(self) -> Result<ScalarType<F>, ConfigError> {
        let name = self
            .name
            .filter(|name| !name.is_empty())
            .ok_or(ConfigError::MissingName)?;

        Ok(ScalarType {
            name,
            description: self.description,
            specified_by_url: self.specified_by_url,
            min: self.min,
            max: self.max,
            sanitize: self.sanitize,
            test: self.test,
            parse: self.parse,
            error: self.error.unwrap_or_else(|| Box::new(default_sink::<F>)),
        })
    }
}

///
/// ScalarType
///
/// A built scalar definition: the value pipeline plus the descriptor fields
/// the engine's registration surface consumes. Stateless between calls and
/// shareable across unrelated requests; the configuration captured at build
/// time is read-only.
///

pub struct ScalarType<F: NumericFlavor> {
    name: String,
    description: Option<String>,
    specified_by_url: Option<String>,
    min: Option<F::Num>,
    max: Option<F::Num>,
    sanitize: Option<Box<dyn Sanitizer<F::Num>>>,
    test: Option<Box<dyn Predicate<F::Num>>>,
    parse: Option<Box<dyn Fn(F::Num) -> F::Num + Send + Sync>>,
    error: Box<ErrorSink<F>>,
}

pub type IntScalarType = ScalarType<Int32>;
pub type FloatScalarType = ScalarType<Float64>;

impl<F: NumericFlavor> ScalarType<F> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn specified_by_url(&self) -> Option<&str> {
        self.specified_by_url.as_deref()
    }

    /// Outbound path: internal value to wire value. Exactly the flavor's
    /// coercion; values the flavor cannot represent degrade silently to
    /// `Null` (wire-protocol nullability), never reaching the sink. The
    /// configured transform does not apply here.
    #[must_use]
    pub fn serialize(&self, value: &Value) -> Value {
        F::coerce(value).map_or(Value::Null, F::to_value)
    }

    /// Inbound path for variable values; no syntax node is attached.
    pub fn parse_value(&self, value: &Value) -> Result<F::Num, ScalarError> {
        self.run_pipeline(value, None)
    }

    /// Inbound path for inline literals. The syntactic kind gates entry to
    /// the pipeline; on a mismatch the value fails as `input` without any
    /// coercion attempt.
    pub fn parse_literal(&self, node: &LiteralNode) -> Result<F::Num, ScalarError> {
        let raw = node.to_value();
        if !F::literal_matches(node.kind) {
            return Err(self.fail_input(&raw, Some(node)));
        }

        self.run_pipeline(&raw, Some(node))
    }

    // Phase order is load-bearing: coercion, sanitization, minimum, maximum,
    // predicate, transform. Every rejection routes through the sink exactly
    // once and returns immediately.
    fn run_pipeline(&self, raw: &Value, ast: Option<&LiteralNode>) -> Result<F::Num, ScalarError> {
        // Coercion Phase
        let Some(mut num) = F::coerce(raw) else {
            return Err(self.fail_input(raw, ast));
        };

        // Sanitization Phase
        if let Some(sanitize) = &self.sanitize {
            num = sanitize.sanitize(num);
            if !F::is_safe(num) {
                // reported as a coercion failure, not a distinct kind
                return Err(self.fail_input(raw, ast));
            }
        }

        // Validation Phase
        if let Some(min) = self.min {
            if num < min {
                return Err((self.error)(&ErrorContext {
                    kind: FailureKind::Min,
                    value: raw,
                    min: Some(min),
                    max: None,
                    test: None,
                    message: Some(format!("Expected minimum \"{min}\"")),
                    ast,
                }));
            }
        }

        if let Some(max) = self.max {
            if num > max {
                return Err((self.error)(&ErrorContext {
                    kind: FailureKind::Max,
                    value: raw,
                    min: None,
                    max: Some(max),
                    test: None,
                    message: Some(format!("Expected maximum \"{max}\"")),
                    ast,
                }));
            }
        }

        if let Some(test) = &self.test {
            if !test.test(num) {
                return Err((self.error)(&ErrorContext {
                    kind: FailureKind::Test,
                    value: raw,
                    min: None,
                    max: None,
                    test: Some(test.as_ref()),
                    message: None,
                    ast,
                }));
            }
        }

        // Parse Phase
        if let Some(parse) = &self.parse {
            return Ok(parse(num));
        }

        Ok(num)
    }

    fn fail_input(&self, raw: &Value, ast: Option<&LiteralNode>) -> ScalarError {
        (self.error)(&ErrorContext {
            kind: FailureKind::Input,
            value: raw,
            min: None,
            max: None,
            test: None,
            message: Some(format!("Expected {}", F::UNIT)),
            ast,
        })
    }
}

impl<F: NumericFlavor> fmt::Debug for ScalarType<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarType")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("sanitize", &self.sanitize.is_some())
            .field("test", &self.test.is_some())
            .field("parse", &self.parse.is_some())
            .finish_non_exhaustive()
    }
}
