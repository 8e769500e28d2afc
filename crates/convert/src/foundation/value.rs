//! The runtime-typed datum converters operate on.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use num_bigint::BigInt;
use rust_decimal::Decimal;

use crate::foundation::shape::{NumericKind, Shape, TemporalKind};

/// Immutable ordered container used for list and set values.
pub type ValueList = im::Vector<Value>;

/// A value of unknown static shape.
///
/// `Null` is a first-class value: most converters map it to `Null` instead of
/// failing. Collection variants share structure on clone.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// 8-bit integer in `[0, 255]`.
    Byte(u8),
    /// 16-bit signed integer.
    Short(i16),
    /// 32-bit signed integer.
    Int(i32),
    /// 64-bit signed integer.
    Long(i64),
    /// 32-bit binary float.
    Float(f32),
    /// 64-bit binary float.
    Double(f64),
    /// Arbitrary-precision integer.
    BigInt(BigInt),
    /// Exact decimal.
    Decimal(Decimal),
    /// Text.
    Text(String),
    /// Calendar date.
    Date(NaiveDate),
    /// Time of day.
    Time(NaiveTime),
    /// Date with time of day.
    DateTime(NaiveDateTime),
    /// Ordered sequence.
    List(ValueList),
    /// Unordered collection, iterated in insertion order.
    Set(ValueList),
    /// Single-slot container; `None` is an empty slot.
    Optional(Option<Box<Value>>),
}

impl Value {
    /// Builds a list value.
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Builds a set value.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Set(items.into_iter().collect())
    }

    /// Builds a filled single-slot container.
    pub fn some(inner: Value) -> Self {
        Self::Optional(Some(Box::new(inner)))
    }

    /// Builds an empty single-slot container.
    pub const fn none() -> Self {
        Self::Optional(None)
    }

    /// Builds a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_numeric(&self) -> bool {
        self.numeric_kind().is_some()
    }

    /// Whether this is a list, set or single-slot container.
    pub const fn is_collection_like(&self) -> bool {
        matches!(self, Self::List(_) | Self::Set(_) | Self::Optional(_))
    }

    /// The numeric kind of a numeric value.
    pub const fn numeric_kind(&self) -> Option<NumericKind> {
        match self {
            Self::Byte(_) => Some(NumericKind::Byte),
            Self::Short(_) => Some(NumericKind::Short),
            Self::Int(_) => Some(NumericKind::Int),
            Self::Long(_) => Some(NumericKind::Long),
            Self::Float(_) => Some(NumericKind::Float),
            Self::Double(_) => Some(NumericKind::Double),
            Self::BigInt(_) => Some(NumericKind::BigInt),
            Self::Decimal(_) => Some(NumericKind::Decimal),
            _ => None,
        }
    }

    /// The temporal kind of a temporal value.
    pub const fn temporal_kind(&self) -> Option<TemporalKind> {
        match self {
            Self::Date(_) => Some(TemporalKind::Date),
            Self::Time(_) => Some(TemporalKind::Time),
            Self::DateTime(_) => Some(TemporalKind::DateTime),
            _ => None,
        }
    }

    /// Name of the value's dynamic shape, as used in failure messages.
    pub fn shape_name(&self) -> String {
        match self {
            Self::Null => "Null".to_string(),
            other => Shape::of(other).to_string(),
        }
    }

    /// Elements of a collection-like value, in iteration order.
    ///
    /// Returns `None` for anything that is not a list, set or single-slot
    /// container.
    pub fn elements(&self) -> Option<Vec<&Value>> {
        match self {
            Self::List(items) | Self::Set(items) => Some(items.iter().collect()),
            Self::Optional(slot) => Some(slot.as_deref().into_iter().collect()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Byte(n) => write!(f, "{n}"),
            Self::Short(n) => write!(f, "{n}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Long(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Double(n) => write!(f, "{n}"),
            Self::BigInt(n) => write!(f, "{n}"),
            Self::Decimal(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "\"{s}\""),
            Self::Date(d) => write!(f, "{d}"),
            Self::Time(t) => write!(f, "{t}"),
            Self::DateTime(dt) => write!(f, "{dt}"),
            Self::List(items) | Self::Set(items) => {
                let (open, close) = if matches!(self, Self::Set(_)) {
                    ('{', '}')
                } else {
                    ('[', ']')
                };
                write!(f, "{open}")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "{close}")
            }
            Self::Optional(Some(inner)) => write!(f, "Optional[{inner}]"),
            Self::Optional(None) => f.write_str("Optional.empty"),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    u8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    BigInt => BigInt,
    Decimal => Decimal,
    String => Text,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => DateTime,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::list(items.into_iter().map(Into::into))
    }
}
