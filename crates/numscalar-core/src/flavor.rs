use crate::{ast::LiteralKind, value::Value};
use num_traits::ToPrimitive;
use std::fmt::{Debug, Display};

///
/// CONSTANTS
///

/// Inclusive signed 32-bit range enforced by the integer flavor.
pub const MAX_INT: i64 = 2_147_483_647;
pub const MIN_INT: i64 = -2_147_483_648;

///
/// NumericFlavor
///
/// Capability bundle distinguishing the numeric flavors: how a raw wire
/// value coerces to the canonical representation, when a number is a safe
/// representative of the flavor, and which literal kinds may enter the
/// pipeline at all. The pipeline itself is flavor-agnostic.
///

pub trait NumericFlavor: Send + Sync + 'static {
    type Num: Copy + PartialOrd + Display + Debug + Send + Sync + 'static;

    /// Noun used in input-failure messages ("Expected integer").
    const UNIT: &'static str;

    /// Coerce a raw wire value to the canonical representation, or fail.
    fn coerce(value: &Value) -> Option<Self::Num>;

    /// Safe-representative re-check, applied to sanitizer output.
    fn is_safe(num: Self::Num) -> bool;

    /// Literal kinds accepted before coercion is attempted.
    fn literal_matches(kind: LiteralKind) -> bool;

    /// Canonical wire representation of an accepted value.
    fn to_value(num: Self::Num) -> Value;
}

///
/// Int32
///
/// Integer flavor: finite, integral, within the signed 32-bit range.
/// Numeric strings coerce; truncation toward zero (ceiling for negatives,
/// floor otherwise) canonicalizes any rounding the textual path introduces.
///

pub struct Int32;

fn float_to_int(x: f64) -> Option<i32> {
    if !x.is_finite() || x.fract() != 0.0 {
        return None;
    }

    // range-checked cast; trunc is a no-op on an integral value
    x.trunc().to_i32()
}

impl NumericFlavor for Int32 {
    type Num = i32;

    const UNIT: &'static str = "integer";

    fn coerce(value: &Value) -> Option<i32> {
        match value {
            Value::Int(i) => i.to_i32(),
            Value::Uint(u) => u.to_i32(),
            Value::Float(x) => float_to_int(*x),
            Value::Text(s) => s.trim().parse::<f64>().ok().and_then(float_to_int),
            _ => None,
        }
    }

    // The canonical representation cannot leave the flavor's range, so any
    // sanitizer output is safe.
    fn is_safe(_num: i32) -> bool {
        true
    }

    fn literal_matches(kind: LiteralKind) -> bool {
        kind == LiteralKind::Int
    }

    fn to_value(num: i32) -> Value {
        Value::Int(i64::from(num))
    }
}

///
/// Float64
///
/// Float flavor: any finite f64. NaN and the infinities are not safe
/// representatives; integrality is not required.
///

pub struct Float64;

impl NumericFlavor for Float64 {
    type Num = f64;

    const UNIT: &'static str = "float";

    fn coerce(value: &Value) -> Option<f64> {
        let x = match value {
            Value::Int(i) => i.to_f64()?,
            Value::Uint(u) => u.to_f64()?,
            Value::Float(x) => *x,
            Value::Text(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };

        x.is_finite().then_some(x)
    }

    fn is_safe(num: f64) -> bool {
        num.is_finite()
    }

    // Integer literals are valid float input (engine numeric widening).
    fn literal_matches(kind: LiteralKind) -> bool {
        matches!(kind, LiteralKind::Float | LiteralKind::Int)
    }

    fn to_value(num: f64) -> Value {
        Value::Float(num)
    }
}

///
/// TESTS
///
