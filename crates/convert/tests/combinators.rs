//! Composition behavior: chains, first-match collections, aggregation and
//! collapsing, including their diagnostic names.

mod common;

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::*;
use nebula_convert::prelude::*;
use pretty_assertions::assert_eq;

/// Claims every value, then fails.
#[derive(Debug)]
struct Liar;

impl fmt::Display for Liar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Any->Lie")
    }
}

impl Convert for Liar {
    fn can_convert(&self, _: &Value, _: &Shape, _: &ConversionContext) -> bool {
        true
    }

    fn convert(&self, value: &Value, target: &Shape, _: &ConversionContext) -> ConversionResult {
        Err(Failure::with_cause(value, target, "always fails"))
    }
}

/// Counts how often it is asked to convert.
#[derive(Debug, Default)]
struct Counting {
    calls: Arc<AtomicUsize>,
}

impl fmt::Display for Counting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Counting")
    }
}

impl Convert for Counting {
    fn can_convert(&self, _: &Value, _: &Shape, _: &ConversionContext) -> bool {
        true
    }

    fn convert(&self, value: &Value, _: &Shape, _: &ConversionContext) -> ConversionResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(value.clone())
    }
}

// ============================================================================
// FIRST MATCH
// ============================================================================

#[test]
fn first_match_skips_failing_candidate() {
    init_tracing();
    let collection = first_match(vec![Liar.into_converter(), numeric().into_converter()]).unwrap();
    let out = collection.convert(&Value::Int(7), &Shape::Numeric(NumericKind::Long), &ctx());
    assert_eq!(out, Ok(Value::Long(7)));
}

#[test]
fn first_match_exhaustion_cites_target() {
    let collection = Liar.or(numeric());
    let err = collection
        .convert(&Value::text("x"), &Shape::Numeric(NumericKind::Long), &ctx())
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r#"Failed to convert "x" (Text) to Long"#);
}

#[test]
fn first_match_of_one_is_unwrapped() {
    let only = numeric().into_converter();
    let collection = first_match(vec![only.clone()]).unwrap();
    assert!(collection.ptr_eq(&only));
}

#[test]
fn first_match_of_none_is_rejected() {
    let err = first_match(Vec::new()).unwrap_err();
    assert!(matches!(err, ConvertError::EmptyCandidates { combinator: "first_match" }));
    assert!(aggregate(Vec::new()).is_err());
}

// ============================================================================
// CHAIN
// ============================================================================

#[test]
fn chain_equals_sequential_application() {
    let ctx = ctx();
    let target = Shape::Numeric(NumericKind::Byte);
    let composed = chain(text_to_number(), Shape::Number, numeric());

    let value = Value::text("42");
    let mid = text_to_number().convert(&value, &Shape::Number, &ctx).unwrap();
    let expected = numeric().convert(&mid, &target, &ctx);
    assert_eq!(composed.convert(&value, &target, &ctx), expected);
}

#[test]
fn chain_fails_fast() {
    let calls = Arc::new(AtomicUsize::new(0));
    let second = Counting {
        calls: Arc::clone(&calls),
    };
    let composed = Liar.then(Shape::Number, second);

    let err = composed.convert(&Value::Int(1), &Shape::Number, &ctx()).unwrap_err();
    assert_eq!(err.message(), "Failed to convert 1 (Int) to Number, always fails");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// ============================================================================
// AGGREGATION
// ============================================================================

#[test]
fn aggregate_parses_dates_in_order() {
    init_tracing();
    let ctx = ctx();
    let dates = aggregate(vec![text_to_date("%Y/%m/%d").into_converter()]).unwrap();
    let target = Shape::list(Shape::temporal(TemporalKind::Date));

    let out = dates
        .convert(&Value::from(vec!["1999/12/31", "2000/1/2"]), &target, &ctx)
        .unwrap();
    assert_eq!(
        out,
        Value::list([Value::Date(date(1999, 12, 31)), Value::Date(date(2000, 1, 2))])
    );
    assert!(target.accepts(&out));

    assert_eq!(dates.convert(&Value::list([]), &target, &ctx), Ok(Value::list([])));
    assert_eq!(dates.convert(&Value::Null, &target, &ctx), Ok(Value::Null));
}

#[test]
fn aggregate_fails_without_partial_result() {
    let dates = aggregate(vec![text_to_date("%Y/%m/%d").into_converter()]).unwrap();
    let target = Shape::list(Shape::temporal(TemporalKind::Date));
    let out = dates.convert(&Value::from(vec!["1999/12/31", "yesterday"]), &target, &ctx());
    let err = out.unwrap_err();
    assert!(err.message().starts_with(r#"Failed to convert "yesterday" (Text) to Date, "#));
}

#[test]
fn aggregate_with_standard_elements() {
    let numbers = Aggregate::new(standard());
    let target = Shape::set(Shape::Numeric(NumericKind::Long));
    let source = Value::list([Value::text("1"), Value::Bool(true), Value::Double(2.9)]);
    assert_eq!(
        numbers.convert(&source, &target, &ctx()),
        Ok(Value::set([Value::Long(1), Value::Long(1), Value::Long(2)]))
    );
}

// ============================================================================
// COLLAPSE
// ============================================================================

#[test]
fn collapse_cardinality() {
    let ctx = ctx();
    let long = Shape::Numeric(NumericKind::Long);
    let single = numeric().collapsed();

    assert_eq!(single.convert(&Value::list([]), &long, &ctx), Ok(Value::Null));
    assert_eq!(single.convert(&Value::list([Value::Int(123)]), &long, &ctx), Ok(Value::Long(123)));
    assert!(single.convert(&Value::list([Value::Int(111), Value::Int(222)]), &long, &ctx).is_err());
    assert_eq!(single.convert(&Value::Null, &long, &ctx), Ok(Value::Null));
}

#[test]
fn collapse_does_not_unwrap_twice() {
    let single = collapse(numeric());
    let nested = Value::some(Value::some(Value::Int(1)));
    let err = single
        .convert(&nested, &Shape::Numeric(NumericKind::Long), &ctx())
        .unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"Failed to convert Optional[Optional[1]] (Optional<Any>) to Long, nested single-slot containers are not unwrapped"
    );
}

// ============================================================================
// DIAGNOSTIC NAMES AND ESCALATION
// ============================================================================

#[test]
fn composite_names() {
    let dates = aggregate(vec![text_to_date("%Y").into_converter()]).unwrap();
    insta::assert_snapshot!(dates.to_string(), @"List[Text->Date]");

    let composed = text_to_number().then(Shape::Number, numeric());
    insta::assert_snapshot!(composed.to_string(), @"Text->Number to Number->Number");

    let either = numeric().or(boolean_to_number()).or(text_to_number());
    insta::assert_snapshot!(either.to_string(), @"Number->Number | Boolean->Number | Text->Number");

    insta::assert_snapshot!(collapse(either.clone()).to_string(), @"Collapse[Number->Number | Boolean->Number | Text->Number]");
    insta::assert_snapshot!(either.named("to number").to_string(), @"to number");
}

#[test]
fn convert_or_fail_keeps_message() {
    let ctx = ctx();
    let byte = Shape::Numeric(NumericKind::Byte);
    let err = numeric().convert_or_fail(&Value::Int(300), &byte, &ctx).unwrap_err();
    assert_eq!(err.to_string(), "Failed to convert 300 (Int) to Byte, out of range for Byte");

    let err = numeric()
        .convert_or_fail_with_prefix("column 'qty': ", &Value::Int(300), &byte, &ctx)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "column 'qty': Failed to convert 300 (Int) to Byte, out of range for Byte"
    );
    assert_eq!(
        numeric().convert_or_fail(&Value::Int(3), &byte, &ctx).ok(),
        Some(Value::Byte(3))
    );
}

#[test]
fn standard_convert_or_fail_names_value_and_target() {
    let ctx = ctx();
    let byte = Shape::Numeric(NumericKind::Byte);
    let err = standard().convert_or_fail(&Value::Int(300), &byte, &ctx).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"Failed to convert 300 (Int) to Byte");

    let err = standard()
        .convert_or_fail_with_prefix("cell A1: ", &Value::text("x"), &Shape::Boolean, &ctx)
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r#"cell A1: Failed to convert "x" (Text) to Boolean"#);
}

#[test]
fn converters_are_shared_across_threads() {
    let standard = standard();
    let handles: Vec<_> = (0..4_i32)
        .map(|i| {
            let standard = standard.clone();
            std::thread::spawn(move || {
                standard.convert(&Value::Int(i), &Shape::Numeric(NumericKind::Long), &ctx())
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let expected = Value::Long(i64::try_from(i).unwrap());
        assert_eq!(handle.join().unwrap(), Ok(expected));
    }
}
