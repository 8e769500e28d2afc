//! Boolean ↔ number converters.

use std::fmt;

use crate::converters::numeric::{self, to_target};
use crate::foundation::{ConversionContext, ConversionResult, Convert, Failure, Shape, Value};

/// `true` → 1, `false` → 0, in the requested numeric kind.
///
/// A generic `Number` target produces an `Int`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanToNumber;

impl fmt::Display for BooleanToNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Boolean->Number")
    }
}

impl Convert for BooleanToNumber {
    fn can_convert(&self, value: &Value, target: &Shape, _: &ConversionContext) -> bool {
        target.is_numeric() && matches!(value, Value::Null | Value::Bool(_))
    }

    fn convert(&self, value: &Value, target: &Shape, _: &ConversionContext) -> ConversionResult {
        match (value, target) {
            (Value::Null, t) if t.is_numeric() => Ok(Value::Null),
            (Value::Bool(b), Shape::Number) => Ok(Value::Int(i32::from(*b))),
            (Value::Bool(b), _) => to_target(&Value::Byte(u8::from(*b)), value, target),
            _ => Err(Failure::cannot_convert(value, target)),
        }
    }
}

/// Zero (and not-a-number or infinite floats) → `false`, anything else →
/// `true`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberToBoolean;

impl fmt::Display for NumberToBoolean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Number->Boolean")
    }
}

impl Convert for NumberToBoolean {
    fn can_convert(&self, value: &Value, target: &Shape, _: &ConversionContext) -> bool {
        matches!(target, Shape::Boolean) && (value.is_null() || value.is_numeric())
    }

    fn convert(&self, value: &Value, target: &Shape, _: &ConversionContext) -> ConversionResult {
        if !matches!(target, Shape::Boolean) {
            return Err(Failure::cannot_convert(value, target));
        }
        if value.is_null() {
            return Ok(Value::Null);
        }
        numeric::is_zero(value)
            .map(|zero| Value::Bool(!zero))
            .map_err(|cause| Failure::with_cause(value, target, cause))
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use rust_decimal::Decimal;

    use super::*;
    use crate::foundation::NumericKind;

    #[test]
    fn test_boolean_to_every_kind() {
        let ctx = ConversionContext::default();
        for kind in NumericKind::ALL {
            let out = BooleanToNumber
                .convert(&Value::Bool(true), &Shape::Numeric(kind), &ctx)
                .unwrap();
            assert_eq!(out.numeric_kind(), Some(kind));
            assert_eq!(out.to_string(), "1");
        }
        assert_eq!(
            BooleanToNumber.convert(&Value::Bool(false), &Shape::Numeric(NumericKind::Decimal), &ctx),
            Ok(Value::Decimal(Decimal::ZERO))
        );
    }

    #[test]
    fn test_boolean_to_generic_number() {
        let ctx = ConversionContext::default();
        assert_eq!(BooleanToNumber.convert(&Value::Bool(true), &Shape::Number, &ctx), Ok(Value::Int(1)));
        assert_eq!(BooleanToNumber.convert(&Value::Null, &Shape::Number, &ctx), Ok(Value::Null));
    }

    #[test]
    fn test_number_to_boolean() {
        let ctx = ConversionContext::default();
        let cases = [
            (Value::Int(0), false),
            (Value::Long(-3), true),
            (Value::Double(0.0), false),
            (Value::Double(f64::NAN), false),
            (Value::Float(f32::INFINITY), false),
            (Value::Double(0.25), true),
            (Value::BigInt(BigInt::from(0)), false),
            (Value::Decimal(Decimal::new(1, 3)), true),
        ];
        for (value, expected) in cases {
            assert_eq!(
                NumberToBoolean.convert(&value, &Shape::Boolean, &ctx),
                Ok(Value::Bool(expected)),
                "{value}"
            );
        }
    }

    #[test]
    fn test_wrong_shapes() {
        let ctx = ConversionContext::default();
        assert!(!NumberToBoolean.can_convert(&Value::Bool(true), &Shape::Boolean, &ctx));
        assert!(NumberToBoolean.convert(&Value::text("1"), &Shape::Boolean, &ctx).is_err());
        assert!(BooleanToNumber.convert(&Value::Int(1), &Shape::Number, &ctx).is_err());
        assert!(!BooleanToNumber.can_convert(&Value::Bool(true), &Shape::Text, &ctx));
    }
}
