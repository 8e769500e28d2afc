//! Typed extraction from produced values.
//!
//! [`TargetType`] links a Rust type to the [`Shape`] that produces it, so
//! callers can ask for `i64` instead of matching on `Value::Long` themselves.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use num_bigint::BigInt;
use rust_decimal::Decimal;

use crate::foundation::{ConversionResult, Failure, NumericKind, Shape, TemporalKind, Value};

/// A Rust type a converter can be asked to produce.
pub trait TargetType: Sized {
    /// The shape to request.
    fn shape() -> Shape;

    /// Takes the typed payload out of a produced value.
    ///
    /// `Null` extracts as `None`; any other mismatch is a failure.
    fn extract(value: &Value, target: &Shape) -> ConversionResult<Option<Self>>;
}

macro_rules! impl_target_type {
    ($($ty:ty => $shape:expr, $variant:ident);* $(;)?) => {
        $(
            impl TargetType for $ty {
                fn shape() -> Shape {
                    $shape
                }

                #[allow(clippy::clone_on_copy)]
                fn extract(value: &Value, target: &Shape) -> ConversionResult<Option<Self>> {
                    match value {
                        Value::Null => Ok(None),
                        Value::$variant(v) => Ok(Some(v.clone())),
                        other => Err(Failure::cannot_convert(other, target)),
                    }
                }
            }
        )*
    };
}

impl_target_type! {
    bool => Shape::Boolean, Bool;
    u8 => Shape::Numeric(NumericKind::Byte), Byte;
    i16 => Shape::Numeric(NumericKind::Short), Short;
    i32 => Shape::Numeric(NumericKind::Int), Int;
    i64 => Shape::Numeric(NumericKind::Long), Long;
    f32 => Shape::Numeric(NumericKind::Float), Float;
    f64 => Shape::Numeric(NumericKind::Double), Double;
    BigInt => Shape::Numeric(NumericKind::BigInt), BigInt;
    Decimal => Shape::Numeric(NumericKind::Decimal), Decimal;
    String => Shape::Text, Text;
    NaiveDate => Shape::Temporal(TemporalKind::Date), Date;
    NaiveTime => Shape::Temporal(TemporalKind::Time), Time;
    NaiveDateTime => Shape::Temporal(TemporalKind::DateTime), DateTime;
}
