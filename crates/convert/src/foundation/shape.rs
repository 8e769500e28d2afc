//! Target descriptors.
//!
//! A [`Shape`] names the output a caller asks a converter for. The same type
//! names the dynamic shape of an existing [`Value`] (see [`Shape::of`]), which
//! is how failure messages describe both sides of a conversion.
//!
//! ```rust,ignore
//! use nebula_convert::foundation::{NumericKind, Shape};
//!
//! let target: Shape = "list<date>".parse()?;
//! assert_eq!(target.to_string(), "List<Date>");
//! assert!(Shape::Numeric(NumericKind::Byte).is_numeric());
//! ```

use std::fmt;
use std::str::FromStr;

use crate::foundation::Value;

// ============================================================================
// NUMERIC KIND
// ============================================================================

/// The closed set of numeric representations the numeric kernel moves between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumericKind {
    /// 8-bit integer, value space `[0, 255]`.
    Byte,
    /// 16-bit signed integer.
    Short,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit binary floating point.
    Float,
    /// 64-bit binary floating point.
    Double,
    /// Arbitrary-precision integer.
    BigInt,
    /// Exact decimal.
    Decimal,
}

impl NumericKind {
    /// All kinds, narrowest integer first.
    pub const ALL: [Self; 8] = [
        Self::Byte,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::BigInt,
        Self::Decimal,
    ];

    /// Kinds that cannot carry a fractional part.
    pub const fn is_integral(self) -> bool {
        matches!(
            self,
            Self::Byte | Self::Short | Self::Int | Self::Long | Self::BigInt
        )
    }

    /// Binary floating-point kinds; narrowing them to an integral kind truncates.
    pub const fn is_binary_float(self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    /// Exact kinds; narrowing them to an integral kind must not lose a fraction.
    pub const fn is_exact(self) -> bool {
        matches!(self, Self::BigInt | Self::Decimal)
    }

    /// Display name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Int => "Int",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::BigInt => "BigInt",
            Self::Decimal => "Decimal",
        }
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// TEMPORAL KIND
// ============================================================================

/// Calendar and time-of-day representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemporalKind {
    /// Calendar date without time.
    Date,
    /// Time of day without date.
    Time,
    /// Date combined with a time of day.
    DateTime,
}

impl TemporalKind {
    /// Display name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Time => "Time",
            Self::DateTime => "DateTime",
        }
    }
}

impl fmt::Display for TemporalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// SHAPE
// ============================================================================

/// Identifies the desired output of a conversion.
///
/// Collection shapes carry the shape of their elements, so
/// `Shape::List(Box::new(Shape::Temporal(TemporalKind::Date)))` asks for an
/// ordered list of dates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Any value at all.
    Any,
    /// `true` / `false`.
    Boolean,
    /// Any numeric kind; the generic numeric supertype.
    Number,
    /// One concrete numeric kind.
    Numeric(NumericKind),
    /// Text.
    Text,
    /// One concrete temporal kind.
    Temporal(TemporalKind),
    /// Ordered sequence of elements of the inner shape.
    List(Box<Shape>),
    /// Unordered collection of elements of the inner shape.
    Set(Box<Shape>),
    /// Single-slot container of the inner shape.
    Optional(Box<Shape>),
}

impl Shape {
    /// Shorthand for [`Shape::Numeric`].
    pub const fn numeric(kind: NumericKind) -> Self {
        Self::Numeric(kind)
    }

    /// Shorthand for [`Shape::Temporal`].
    pub const fn temporal(kind: TemporalKind) -> Self {
        Self::Temporal(kind)
    }

    /// Shorthand for a list of `element`.
    pub fn list(element: Shape) -> Self {
        Self::List(Box::new(element))
    }

    /// Shorthand for a set of `element`.
    pub fn set(element: Shape) -> Self {
        Self::Set(Box::new(element))
    }

    /// Shorthand for an optional `element`.
    pub fn optional(element: Shape) -> Self {
        Self::Optional(Box::new(element))
    }

    /// The dynamic shape of a value.
    ///
    /// Collections report `Any` elements; `Null` reports `Any`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Any,
            Value::Bool(_) => Self::Boolean,
            Value::Text(_) => Self::Text,
            Value::List(_) => Self::list(Self::Any),
            Value::Set(_) => Self::set(Self::Any),
            Value::Optional(_) => Self::optional(Self::Any),
            other => {
                if let Some(kind) = other.numeric_kind() {
                    Self::Numeric(kind)
                } else if let Some(kind) = other.temporal_kind() {
                    Self::Temporal(kind)
                } else {
                    Self::Any
                }
            }
        }
    }

    /// Whether `value` satisfies this shape.
    ///
    /// Null satisfies every shape.
    pub fn accepts(&self, value: &Value) -> bool {
        if value.is_null() {
            return true;
        }
        match (self, value) {
            (Self::Any, _) => true,
            (Self::Boolean, Value::Bool(_)) => true,
            (Self::Text, Value::Text(_)) => true,
            (Self::Number, v) => v.is_numeric(),
            (Self::Numeric(kind), v) => v.numeric_kind() == Some(*kind),
            (Self::Temporal(kind), v) => v.temporal_kind() == Some(*kind),
            (Self::List(element), Value::List(items)) | (Self::Set(element), Value::Set(items)) => {
                items.iter().all(|item| element.accepts(item))
            }
            (Self::Optional(element), Value::Optional(slot)) => {
                slot.as_deref().is_none_or(|inner| element.accepts(inner))
            }
            _ => false,
        }
    }

    /// Whether the shape is numeric (generic or concrete).
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Number | Self::Numeric(_))
    }

    /// The concrete numeric kind, if any.
    pub const fn numeric_kind(&self) -> Option<NumericKind> {
        match self {
            Self::Numeric(kind) => Some(*kind),
            _ => None,
        }
    }

    /// The temporal kind, if any.
    pub const fn temporal_kind(&self) -> Option<TemporalKind> {
        match self {
            Self::Temporal(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Element shape of a list or set target.
    pub fn element(&self) -> Option<&Shape> {
        match self {
            Self::List(element) | Self::Set(element) | Self::Optional(element) => Some(element),
            _ => None,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Boolean => f.write_str("Boolean"),
            Self::Number => f.write_str("Number"),
            Self::Numeric(kind) => write!(f, "{kind}"),
            Self::Text => f.write_str("Text"),
            Self::Temporal(kind) => write!(f, "{kind}"),
            Self::List(element) => write!(f, "List<{element}>"),
            Self::Set(element) => write!(f, "Set<{element}>"),
            Self::Optional(element) => write!(f, "Optional<{element}>"),
        }
    }
}

/// Error returned when a shape name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shape: {input}")]
pub struct ParseShapeError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for Shape {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();

        if let Some(open) = lower.find('<') {
            let inner = lower
                .strip_suffix('>')
                .map(|rest| &rest[open + 1..])
                .ok_or_else(|| ParseShapeError {
                    input: trimmed.to_string(),
                })?;
            let element: Shape = inner.parse().map_err(|_| ParseShapeError {
                input: trimmed.to_string(),
            })?;
            return match &lower[..open] {
                "list" | "vec" | "array" => Ok(Self::list(element)),
                "set" => Ok(Self::set(element)),
                "optional" | "option" => Ok(Self::optional(element)),
                _ => Err(ParseShapeError {
                    input: trimmed.to_string(),
                }),
            };
        }

        let shape = match lower.as_str() {
            "any" => Self::Any,
            "bool" | "boolean" => Self::Boolean,
            "number" | "numeric" => Self::Number,
            "byte" | "u8" => Self::Numeric(NumericKind::Byte),
            "short" | "i16" => Self::Numeric(NumericKind::Short),
            "int" | "integer" | "i32" => Self::Numeric(NumericKind::Int),
            "long" | "i64" => Self::Numeric(NumericKind::Long),
            "float" | "f32" => Self::Numeric(NumericKind::Float),
            "double" | "f64" => Self::Numeric(NumericKind::Double),
            "bigint" | "biginteger" => Self::Numeric(NumericKind::BigInt),
            "decimal" | "bigdecimal" => Self::Numeric(NumericKind::Decimal),
            "text" | "string" | "str" => Self::Text,
            "date" => Self::Temporal(TemporalKind::Date),
            "time" => Self::Temporal(TemporalKind::Time),
            "datetime" | "timestamp" => Self::Temporal(TemporalKind::DateTime),
            _ => {
                return Err(ParseShapeError {
                    input: trimmed.to_string(),
                });
            }
        };
        Ok(shape)
    }
}
