//! Property-based tests for nebula-convert.

use nebula_convert::prelude::*;
use num_bigint::BigInt;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn any_numeric() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<u8>().prop_map(Value::Byte),
        any::<i16>().prop_map(Value::Short),
        any::<i32>().prop_map(Value::Int),
        any::<i64>().prop_map(Value::Long),
        any::<f32>().prop_map(Value::Float),
        any::<f64>().prop_map(Value::Double),
        any::<i64>().prop_map(|n| Value::BigInt(BigInt::from(n) * BigInt::from(1_000_000))),
        (any::<i64>(), 0u32..10).prop_map(|(n, scale)| Value::Decimal(Decimal::new(n, scale))),
    ]
}

fn any_kind() -> impl Strategy<Value = NumericKind> {
    prop::sample::select(NumericKind::ALL.to_vec())
}

// ============================================================================
// IDENTITY: converting to the value's own kind returns it unchanged
// ============================================================================

proptest! {
    #[test]
    fn identity_for_every_kind(value in any_numeric()) {
        let ctx = ConversionContext::default();
        let own = value.numeric_kind().map(Shape::Numeric).unwrap();
        let out = numeric().convert(&value, &own, &ctx).unwrap();
        // NaN != NaN, so compare renderings.
        prop_assert_eq!(out.to_string(), value.to_string());
    }

    #[test]
    fn generic_number_is_identity(value in any_numeric()) {
        let ctx = ConversionContext::default();
        let out = numeric().convert(&value, &Shape::Number, &ctx).unwrap();
        prop_assert_eq!(out.to_string(), value.to_string());
    }
}

// ============================================================================
// NULL: null passes through every numeric and temporal target
// ============================================================================

proptest! {
    #[test]
    fn null_passes_through(kind in any_kind()) {
        let ctx = ConversionContext::default();
        prop_assert_eq!(numeric().convert(&Value::Null, &Shape::Numeric(kind), &ctx), Ok(Value::Null));
        prop_assert_eq!(standard().convert(&Value::Null, &Shape::Numeric(kind), &ctx), Ok(Value::Null));
    }
}

// ============================================================================
// SHAPE CONTRACT: every success satisfies the requested target
// ============================================================================

proptest! {
    #[test]
    fn success_satisfies_target(value in any_numeric(), kind in any_kind()) {
        let ctx = ConversionContext::default();
        let target = Shape::Numeric(kind);
        if let Ok(out) = numeric().convert(&value, &target, &ctx) {
            prop_assert!(target.accepts(&out));
        }
    }

    #[test]
    fn can_convert_is_pure(value in any_numeric(), kind in any_kind()) {
        let ctx = ConversionContext::default();
        let target = Shape::Numeric(kind);
        let standard = standard();
        prop_assert_eq!(
            standard.can_convert(&value, &target, &ctx),
            standard.can_convert(&value, &target, &ctx)
        );
    }
}

// ============================================================================
// RANGE: integers fit a kind iff they lie in its range
// ============================================================================

proptest! {
    #[test]
    fn byte_accepts_exactly_0_to_255(n in -1000i64..1000) {
        let ctx = ConversionContext::default();
        let out = numeric().convert(&Value::Long(n), &Shape::Numeric(NumericKind::Byte), &ctx);
        prop_assert_eq!(out.is_ok(), (0..=255).contains(&n));
    }

    #[test]
    fn float_truncation_toward_zero(x in -1.0e9f64..1.0e9) {
        let ctx = ConversionContext::default();
        let out = numeric().convert(&Value::Double(x), &Shape::Numeric(NumericKind::Long), &ctx);
        prop_assert_eq!(out, Ok(Value::Long(x.trunc() as i64)));
    }

    #[test]
    fn whole_decimals_widen_exactly(n in any::<i32>()) {
        let ctx = ConversionContext::default();
        let out = numeric().convert(&Value::Decimal(Decimal::from(n)), &Shape::Numeric(NumericKind::Int), &ctx);
        prop_assert_eq!(out, Ok(Value::Int(n)));
    }
}

// ============================================================================
// TEMPORAL: date serials round-trip under any offset
// ============================================================================

proptest! {
    #[test]
    fn date_serial_round_trip(day in -100_000i64..100_000, offset in -30_000i64..30_000) {
        let ctx = ConversionContext::builder().date_offset(offset).build().unwrap();
        let date_shape = Shape::temporal(TemporalKind::Date);
        let date = from_serial(TemporalKind::Date)
            .convert(&Value::Long(day), &date_shape, &ctx)
            .unwrap();
        let back = to_serial(TemporalKind::Date).convert(&date, &Shape::Number, &ctx);
        prop_assert_eq!(back, Ok(Value::Long(day)));
    }
}
