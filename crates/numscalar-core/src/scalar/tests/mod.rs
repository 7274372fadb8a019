use super::*;
use crate::ast::Position;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};


fn int_scalar() -> IntScalarType {
    IntScalar::new().name("TestInt").build().unwrap()
}

fn float_scalar() -> FloatScalarType {
    FloatScalar::new().name("TestFloat").build().unwrap()
}

// ---------------------
// Construction
// ---------------------

#[test]
fn build_requires_name() {
    assert_eq!(
        IntScalar::new().build().unwrap_err(),
        ConfigError::MissingName
    );
    assert_eq!(
        FloatScalar::new().min(1.0).build().unwrap_err(),
        ConfigError::MissingName
    );
}

#[test]
fn empty_name_is_missing() {
    assert_eq!(
        IntScalar::new().name("").build().unwrap_err(),
        ConfigError::MissingName
    );
}

#[test]
fn descriptor_fields_pass_through() {
    let scalar = IntScalar::new()
        .name("Rating")
        .description("a rating between bounds")
        .specified_by_url("https://example.com/rating")
        .build()
        .unwrap();

    assert_eq!(scalar.name(), "Rating");
    assert_eq!(scalar.description(), Some("a rating between bounds"));
    assert_eq!(
        scalar.specified_by_url(),
        Some("https://example.com/rating")
    );
}

// ---------------------
// Integer flavor
// ---------------------

#[test]
fn int_accepts_integral_input() {
    let scalar = int_scalar();

    assert_eq!(scalar.parse_value(&Value::Int(42)).unwrap(), 42);
    assert_eq!(scalar.parse_value(&Value::Uint(7)).unwrap(), 7);
    assert_eq!(scalar.parse_value(&Value::Float(-5.0)).unwrap(), -5);
    assert_eq!(
        scalar.parse_value(&Value::Text("19".to_string())).unwrap(),
        19
    );
}

#[test]
fn int_rejects_fractional_input() {
    let err = int_scalar().parse_value(&Value::Float(3.5)).unwrap_err();

    assert_eq!(err.kind, FailureKind::Input);
    assert_eq!(err.message, "Invalid value 3.5. Expected integer.");
}

#[test]
fn int_rejects_out_of_range_input() {
    let scalar = int_scalar();

    let err = scalar.parse_value(&Value::Int(2_147_483_648)).unwrap_err();
    assert_eq!(err.kind, FailureKind::Input);

    let err = scalar.parse_value(&Value::Int(-2_147_483_649)).unwrap_err();
    assert_eq!(err.kind, FailureKind::Input);
}

#[test]
fn int_rejects_non_numeric_input() {
    let scalar = int_scalar();

    for value in [
        Value::Null,
        Value::Bool(true),
        Value::Text("forty".to_string()),
        Value::List(vec![Value::Int(1)]),
    ] {
        let err = scalar.parse_value(&value).unwrap_err();
        assert_eq!(err.kind, FailureKind::Input, "value: {value}");
    }
}

#[test]
fn int_serialize_degrades_to_null() {
    let scalar = int_scalar();

    assert_eq!(scalar.serialize(&Value::Int(42)), Value::Int(42));
    assert_eq!(scalar.serialize(&Value::Float(3.0)), Value::Int(3));
    assert_eq!(scalar.serialize(&Value::Float(3.5)), Value::Null);
    assert_eq!(scalar.serialize(&Value::Int(2_147_483_648)), Value::Null);
    assert_eq!(scalar.serialize(&Value::Text("x".to_string())), Value::Null);
}

// ---------------------
// Literal parsing
// ---------------------

#[test]
fn int_literal_parses() {
    let scalar = int_scalar();

    assert_eq!(scalar.parse_literal(&LiteralNode::int("42")).unwrap(), 42);
    assert_eq!(scalar.parse_literal(&LiteralNode::int("-1")).unwrap(), -1);
}

#[test]
fn kind_mismatch_fails_before_coercion() {
    let scalar = int_scalar();

    // the text would coerce fine; the kind gate must reject it anyway
    let err = scalar.parse_literal(&LiteralNode::text("42")).unwrap_err();
    assert_eq!(err.kind, FailureKind::Input);
    assert_eq!(err.message, "Invalid value \"42\". Expected integer.");

    let err = scalar.parse_literal(&LiteralNode::float("3.0")).unwrap_err();
    assert_eq!(err.kind, FailureKind::Input);
}

#[test]
fn float_literal_gate_accepts_int_literals() {
    let scalar = float_scalar();

    assert_eq!(scalar.parse_literal(&LiteralNode::float("3.1")).unwrap(), 3.1);
    assert_eq!(scalar.parse_literal(&LiteralNode::int("3")).unwrap(), 3.0);
    assert!(scalar.parse_literal(&LiteralNode::bool_lit(true)).is_err());
}

#[test]
fn literal_failures_carry_positions() {
    let scalar = int_scalar();

    let err = scalar
        .parse_literal(&LiteralNode::float("3.1").at(1, 7))
        .unwrap_err();
    assert_eq!(err.locations(), &[Position::new(1, 7)]);

    // variable parsing has no syntax node to point at
    let err = scalar.parse_value(&Value::Float(3.1)).unwrap_err();
    assert!(err.locations().is_empty());
}

// ---------------------
// Bounds
// ---------------------

#[test]
fn min_rejects_below_bound() {
    let scalar = FloatScalar::new().name("Min").min(3.0).build().unwrap();

    let err = scalar.parse_value(&Value::Float(2.9)).unwrap_err();
    assert_eq!(err.kind, FailureKind::Min);
    assert_eq!(err.message, "Invalid value 2.9. Expected minimum \"3\".");

    assert_eq!(scalar.parse_value(&Value::Float(3.1)).unwrap(), 3.1);
    assert_eq!(scalar.parse_value(&Value::Float(3.0)).unwrap(), 3.0);
}

#[test]
fn max_rejects_above_bound() {
    let scalar = FloatScalar::new().name("Max").max(5.0).build().unwrap();

    let err = scalar.parse_value(&Value::Float(5.1)).unwrap_err();
    assert_eq!(err.kind, FailureKind::Max);
    assert_eq!(err.message, "Invalid value 5.1. Expected maximum \"5\".");

    assert_eq!(scalar.parse_value(&Value::Float(4.9)).unwrap(), 4.9);
    assert_eq!(scalar.parse_value(&Value::Float(5.0)).unwrap(), 5.0);
}

#[test]
fn min_reports_before_max_or_test() {
    let scalar = IntScalar::new()
        .name("Window")
        .min(10)
        .max(5)
        .test(|_: i32| false)
        .build()
        .unwrap();

    // an impossible window still reports the first failing phase
    let err = scalar.parse_value(&Value::Int(7)).unwrap_err();
    assert_eq!(err.kind, FailureKind::Min);
}

// ---------------------
// Predicate
// ---------------------

#[test]
fn test_rejects_without_bound_message() {
    let scalar = FloatScalar::new()
        .name("Test")
        .test(|x: f64| x < 3.0)
        .build()
        .unwrap();

    let err = scalar.parse_value(&Value::Float(3.1)).unwrap_err();
    assert_eq!(err.kind, FailureKind::Test);
    assert_eq!(err.message, "Invalid value 3.1.");

    assert_eq!(scalar.parse_value(&Value::Float(2.9)).unwrap(), 2.9);
}

#[test]
fn test_runs_after_bounds() {
    let scalar = IntScalar::new()
        .name("Ordered")
        .min(0)
        .test(|_: i32| false)
        .build()
        .unwrap();

    // below min: the predicate never gets a say
    let err = scalar.parse_value(&Value::Int(-1)).unwrap_err();
    assert_eq!(err.kind, FailureKind::Min);

    let err = scalar.parse_value(&Value::Int(1)).unwrap_err();
    assert_eq!(err.kind, FailureKind::Test);
}

// ---------------------
// Sanitization
// ---------------------

#[test]
fn sanitize_runs_before_bounds() {
    let scalar = IntScalar::new()
        .name("Abs")
        .sanitize(|x: i32| x.abs())
        .min(0)
        .build()
        .unwrap();

    assert_eq!(scalar.parse_value(&Value::Int(-5)).unwrap(), 5);
}

#[test]
fn unsafe_sanitizer_output_fails_as_input() {
    let scalar = FloatScalar::new()
        .name("Nan")
        .sanitize(|_: f64| f64::NAN)
        .build()
        .unwrap();

    let err = scalar.parse_value(&Value::Float(1.0)).unwrap_err();
    assert_eq!(err.kind, FailureKind::Input);
    assert_eq!(err.message, "Invalid value 1. Expected float.");
}

// ---------------------
// Transform
// ---------------------

#[test]
fn parse_transform_applies_on_input_paths() {
    let scalar = FloatScalar::new()
        .name("Doubler")
        .parse(|x| x * 2.0)
        .build()
        .unwrap();

    assert_eq!(scalar.parse_value(&Value::Float(3.1)).unwrap(), 6.2);
    assert_eq!(scalar.parse_literal(&LiteralNode::float("3.1")).unwrap(), 6.2);
}

#[test]
fn parse_transform_skipped_on_serialize() {
    let scalar = FloatScalar::new()
        .name("Doubler")
        .parse(|x| x * 2.0)
        .build()
        .unwrap();

    assert_eq!(scalar.serialize(&Value::Float(3.1)), Value::Float(3.1));
}

#[test]
fn parse_transform_runs_after_checks() {
    let scalar = IntScalar::new()
        .name("Shift")
        .max(10)
        .parse(|x| x + 100)
        .build()
        .unwrap();

    // bounds see the pre-transform value
    assert_eq!(scalar.parse_value(&Value::Int(10)).unwrap(), 110);
    assert!(scalar.parse_value(&Value::Int(11)).is_err());
}

// ---------------------
// Error sink
// ---------------------

#[test]
fn custom_sink_is_called_exactly_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);

    let scalar = IntScalar::new()
        .name("Counted")
        .min(0)
        .max(5)
        .error_sink(move |ctx| {
            seen.fetch_add(1, Ordering::SeqCst);
            ScalarError::new(ctx.kind, format!("rejected {}", ctx.value))
        })
        .build()
        .unwrap();

    let err = scalar.parse_value(&Value::Int(-3)).unwrap_err();
    assert_eq!(err.message, "rejected -3");
    assert_eq!(err.kind, FailureKind::Min);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert_eq!(scalar.parse_value(&Value::Int(3)).unwrap(), 3);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn sink_sees_bound_echo_and_predicate_echo() {
    let scalar = IntScalar::new()
        .name("Echo")
        .min(2)
        .test(|x: i32| x % 2 == 0)
        .error_sink(|ctx| {
            let detail = match ctx.kind {
                FailureKind::Min => format!("min={:?}", ctx.min),
                FailureKind::Test => format!("test={}", ctx.test.is_some()),
                _ => String::new(),
            };
            ScalarError::new(ctx.kind, detail)
        })
        .build()
        .unwrap();

    let err = scalar.parse_value(&Value::Int(1)).unwrap_err();
    assert_eq!(err.message, "min=Some(2)");

    let err = scalar.parse_value(&Value::Int(3)).unwrap_err();
    assert_eq!(err.message, "test=true");
}

// ---------------------
// Sharing
// ---------------------

#[test]
fn scalar_types_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<IntScalarType>();
    assert_send_sync::<FloatScalarType>();
}

#[test]
fn repeated_invocations_are_independent() {
    let scalar = IntScalar::new().name("Pure").min(0).build().unwrap();

    for _ in 0..3 {
        assert_eq!(scalar.parse_value(&Value::Int(4)).unwrap(), 4);
        assert!(scalar.parse_value(&Value::Int(-4)).is_err());
    }
}
