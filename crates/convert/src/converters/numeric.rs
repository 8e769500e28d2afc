//! Numeric conversion kernel.
//!
//! Moves values among the eight [`NumericKind`]s. The whole exactness and
//! range matrix lives in [`to_kind`]:
//!
//! | source            | integral target                | float target | decimal target      |
//! |-------------------|--------------------------------|--------------|---------------------|
//! | integer kinds     | range check                    | always       | range check         |
//! | `Float`/`Double`  | truncate toward zero, range    | always*      | finite, range check |
//! | `BigInt`          | range check                    | always*      | range check         |
//! | `Decimal`         | fraction must be zero, range   | always       | -                   |
//!
//! `*` a finite source whose magnitude overflows the float kind fails.
//!
//! `Byte` is the unsigned value space `[0, 255]`; the wider integer kinds use
//! their natural signed ranges.

use std::fmt;

use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive, Zero};
use rust_decimal::Decimal;

use crate::foundation::{
    ConversionContext, ConversionResult, Convert, Failure, NumericKind, Shape, Value,
};

// ============================================================================
// KERNEL ERRORS
// ============================================================================

/// Why the kernel refused a conversion.
///
/// Converters attach this as the cause of a [`Failure`] that names the
/// original value, so messages describe what the caller passed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NumericError {
    #[error("not a numeric value")]
    NotNumeric,

    #[error("not a finite number")]
    NotFinite,

    #[error("fractional part would be lost")]
    FractionLost,

    #[error("out of range for {0}")]
    OutOfRange(NumericKind),
}

// ============================================================================
// KERNEL
// ============================================================================

/// Converts a numeric value to `kind`.
///
/// Same kind is the identity. Binary floats truncate toward zero when
/// narrowed to an integral kind; exact kinds must not carry a fraction.
pub fn to_kind(value: &Value, kind: NumericKind) -> Result<Value, NumericError> {
    let source = value.numeric_kind().ok_or(NumericError::NotNumeric)?;
    if source == kind {
        return Ok(value.clone());
    }

    match kind {
        NumericKind::Double => to_f64(value).map(Value::Double),
        NumericKind::Float => {
            let wide = to_f64(value)?;
            let narrow = wide as f32;
            if wide.is_finite() && !narrow.is_finite() {
                return Err(NumericError::OutOfRange(NumericKind::Float));
            }
            Ok(Value::Float(narrow))
        }
        NumericKind::Decimal => to_decimal(value).map(Value::Decimal),
        integral => fit(to_whole(value)?, integral),
    }
}

/// The value as a 64-bit float.
///
/// Integer and decimal sources always succeed unless their magnitude exceeds
/// the float range. Non-finite float sources pass through.
pub fn to_f64(value: &Value) -> Result<f64, NumericError> {
    let wide = match value {
        Value::Byte(n) => f64::from(*n),
        Value::Short(n) => f64::from(*n),
        Value::Int(n) => f64::from(*n),
        Value::Long(n) => *n as f64,
        Value::Float(n) => return Ok(f64::from(*n)),
        Value::Double(n) => return Ok(*n),
        Value::BigInt(n) => n.to_f64().ok_or(NumericError::OutOfRange(NumericKind::Double))?,
        Value::Decimal(n) => n.to_f64().ok_or(NumericError::OutOfRange(NumericKind::Double))?,
        _ => return Err(NumericError::NotNumeric),
    };
    if wide.is_finite() {
        Ok(wide)
    } else {
        Err(NumericError::OutOfRange(NumericKind::Double))
    }
}

/// The value as an exact decimal.
///
/// Binary floats are converted to their shortest decimal representation;
/// non-finite floats fail.
pub fn to_decimal(value: &Value) -> Result<Decimal, NumericError> {
    let out_of_range = NumericError::OutOfRange(NumericKind::Decimal);
    match value {
        Value::Byte(n) => Ok(Decimal::from(*n)),
        Value::Short(n) => Ok(Decimal::from(*n)),
        Value::Int(n) => Ok(Decimal::from(*n)),
        Value::Long(n) => Ok(Decimal::from(*n)),
        Value::Float(n) if !n.is_finite() => Err(NumericError::NotFinite),
        Value::Float(n) => Decimal::from_f32(*n).ok_or(out_of_range),
        Value::Double(n) if !n.is_finite() => Err(NumericError::NotFinite),
        Value::Double(n) => Decimal::from_f64(*n).ok_or(out_of_range),
        Value::BigInt(n) => n
            .to_i128()
            .and_then(Decimal::from_i128)
            .ok_or(out_of_range),
        Value::Decimal(n) => Ok(*n),
        _ => Err(NumericError::NotNumeric),
    }
}

/// The exact integral value after the exactness policy.
fn to_whole(value: &Value) -> Result<BigInt, NumericError> {
    match value {
        Value::Byte(n) => Ok(BigInt::from(*n)),
        Value::Short(n) => Ok(BigInt::from(*n)),
        Value::Int(n) => Ok(BigInt::from(*n)),
        Value::Long(n) => Ok(BigInt::from(*n)),
        Value::Float(n) => truncate(f64::from(*n)),
        Value::Double(n) => truncate(*n),
        Value::BigInt(n) => Ok(n.clone()),
        Value::Decimal(n) => {
            if !n.fract().is_zero() {
                return Err(NumericError::FractionLost);
            }
            n.to_i128()
                .map(BigInt::from)
                .ok_or(NumericError::OutOfRange(NumericKind::BigInt))
        }
        _ => Err(NumericError::NotNumeric),
    }
}

/// Drops the fraction of a binary float; precision loss is tolerated.
fn truncate(n: f64) -> Result<BigInt, NumericError> {
    if !n.is_finite() {
        return Err(NumericError::NotFinite);
    }
    BigInt::from_f64(n.trunc()).ok_or(NumericError::NotFinite)
}

fn fit(whole: BigInt, kind: NumericKind) -> Result<Value, NumericError> {
    let fitted = match kind {
        NumericKind::Byte => whole.to_u8().map(Value::Byte),
        NumericKind::Short => whole.to_i16().map(Value::Short),
        NumericKind::Int => whole.to_i32().map(Value::Int),
        NumericKind::Long => whole.to_i64().map(Value::Long),
        NumericKind::BigInt => Some(Value::BigInt(whole)),
        NumericKind::Float | NumericKind::Double | NumericKind::Decimal => None,
    };
    fitted.ok_or(NumericError::OutOfRange(kind))
}

/// Whether a numeric value has zero magnitude.
///
/// Not-a-number counts as zero here so that it maps to `false`.
pub(crate) fn is_zero(value: &Value) -> Result<bool, NumericError> {
    match value {
        Value::Byte(n) => Ok(*n == 0),
        Value::Short(n) => Ok(*n == 0),
        Value::Int(n) => Ok(*n == 0),
        Value::Long(n) => Ok(*n == 0),
        Value::Float(n) => Ok(*n == 0.0 || !n.is_finite()),
        Value::Double(n) => Ok(*n == 0.0 || !n.is_finite()),
        Value::BigInt(n) => Ok(n.is_zero()),
        Value::Decimal(n) => Ok(n.is_zero()),
        _ => Err(NumericError::NotNumeric),
    }
}

/// Converts `value` to a numeric target, mapping kernel errors onto a
/// failure that cites `origin`.
///
/// `origin` is what the caller originally passed; it differs from `value`
/// when a temporal or text converter feeds the kernel an intermediate.
pub(crate) fn to_target(
    value: &Value,
    origin: &Value,
    target: &Shape,
) -> ConversionResult {
    match target {
        Shape::Number if value.is_numeric() => Ok(value.clone()),
        Shape::Numeric(kind) => {
            to_kind(value, *kind).map_err(|cause| Failure::with_cause(origin, target, cause))
        }
        _ => Err(Failure::cannot_convert(origin, target)),
    }
}

// ============================================================================
// CONVERTER
// ============================================================================

/// Leaf converter for numeric → numeric conversions.
///
/// Null converts to null for every numeric target.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberConverter;

impl fmt::Display for NumberConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Number->Number")
    }
}

impl Convert for NumberConverter {
    fn can_convert(&self, value: &Value, target: &Shape, _: &ConversionContext) -> bool {
        target.is_numeric() && (value.is_null() || value.is_numeric())
    }

    fn convert(&self, value: &Value, target: &Shape, _: &ConversionContext) -> ConversionResult {
        if value.is_null() && target.is_numeric() {
            return Ok(Value::Null);
        }
        to_target(value, value, target)
    }
}

/// The numeric kernel as a converter.
pub fn numeric() -> NumberConverter {
    NumberConverter
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(value: Value, kind: NumericKind) -> ConversionResult {
        NumberConverter.convert(&value, &Shape::Numeric(kind), &ConversionContext::default())
    }

    #[test]
    fn test_identity() {
        assert_eq!(convert(Value::Double(f64::NAN), NumericKind::Double).map(|v| v.to_string()), Ok("NaN".to_string()));
        assert_eq!(convert(Value::Long(-5), NumericKind::Long), Ok(Value::Long(-5)));
    }

    #[test]
    fn test_float_truncates() {
        assert_eq!(convert(Value::Double(1.5), NumericKind::Byte), Ok(Value::Byte(1)));
        assert_eq!(convert(Value::Float(-2.9), NumericKind::Int), Ok(Value::Int(-2)));
        assert_eq!(convert(Value::Double(-0.7), NumericKind::Byte), Ok(Value::Byte(0)));
    }

    #[test]
    fn test_decimal_must_be_whole() {
        let err = convert(Value::Decimal(Decimal::new(5, 1)), NumericKind::Byte).unwrap_err();
        assert_eq!(
            err.message(),
            "Failed to convert 0.5 (Decimal) to Byte, fractional part would be lost"
        );
        assert_eq!(convert(Value::Decimal(Decimal::new(120, 1)), NumericKind::Byte), Ok(Value::Byte(12)));
    }

    #[test]
    fn test_byte_is_unsigned() {
        assert_eq!(convert(Value::BigInt(BigInt::from(255)), NumericKind::Byte), Ok(Value::Byte(255)));
        assert!(convert(Value::BigInt(BigInt::from(256)), NumericKind::Byte).is_err());
        assert!(convert(Value::BigInt(BigInt::from(-1)), NumericKind::Byte).is_err());
        assert_eq!(convert(Value::Byte(200), NumericKind::Short), Ok(Value::Short(200)));
    }

    #[test]
    fn test_wider_ranges_are_signed() {
        assert_eq!(convert(Value::Int(-32_768), NumericKind::Short), Ok(Value::Short(-32_768)));
        assert!(convert(Value::Int(32_768), NumericKind::Short).is_err());
        assert!(convert(Value::Long(i64::from(i32::MAX) + 1), NumericKind::Int).is_err());
        assert!(convert(Value::Double(1e19), NumericKind::Long).is_err());
    }

    #[test]
    fn test_non_finite_to_integral_fails() {
        assert!(convert(Value::Double(f64::NAN), NumericKind::Long).is_err());
        assert!(convert(Value::Float(f32::INFINITY), NumericKind::BigInt).is_err());
        assert!(convert(Value::Double(f64::NEG_INFINITY), NumericKind::Decimal).is_err());
    }

    #[test]
    fn test_to_floats_always_succeed() {
        assert_eq!(convert(Value::Long(i64::MAX), NumericKind::Double), Ok(Value::Double(9.223_372_036_854_776e18)));
        assert_eq!(convert(Value::Decimal(Decimal::new(25, 2)), NumericKind::Float), Ok(Value::Float(0.25)));
        assert!(convert(Value::Double(1e300), NumericKind::Float).is_err());
        assert_eq!(
            convert(Value::Double(f64::INFINITY), NumericKind::Float),
            Ok(Value::Float(f32::INFINITY))
        );
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(convert(Value::Double(0.1), NumericKind::Decimal), Ok(Value::Decimal(Decimal::new(1, 1))));
        assert_eq!(convert(Value::Long(7), NumericKind::Decimal), Ok(Value::Decimal(Decimal::from(7))));
        let huge = BigInt::from(10).pow(40);
        assert!(convert(Value::BigInt(huge), NumericKind::Decimal).is_err());
    }

    #[test]
    fn test_generic_number_target() {
        let ctx = ConversionContext::default();
        assert_eq!(NumberConverter.convert(&Value::Null, &Shape::Number, &ctx), Ok(Value::Null));
        assert_eq!(NumberConverter.convert(&Value::Short(3), &Shape::Number, &ctx), Ok(Value::Short(3)));
        assert!(NumberConverter.convert(&Value::text("3"), &Shape::Number, &ctx).is_err());
    }

    #[test]
    fn test_null_for_every_kind() {
        for kind in NumericKind::ALL {
            assert_eq!(convert(Value::Null, kind), Ok(Value::Null));
        }
    }

    #[test]
    fn test_can_convert() {
        let ctx = ConversionContext::default();
        assert!(NumberConverter.can_convert(&Value::Int(1), &Shape::Numeric(NumericKind::Byte), &ctx));
        assert!(!NumberConverter.can_convert(&Value::Bool(true), &Shape::Number, &ctx));
        assert!(!NumberConverter.can_convert(&Value::Int(1), &Shape::Text, &ctx));
    }
}
