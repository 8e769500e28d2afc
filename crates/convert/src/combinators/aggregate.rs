//! AGGREGATE combinator - element-wise conversion of collections

use std::fmt;

use tracing::trace;

use crate::combinators::first_match;
use crate::foundation::{
    ConversionContext, ConversionResult, Convert, ConvertError, Converter, Failure, Shape, Value,
    ValueList,
};

// ============================================================================
// AGGREGATE COMBINATOR
// ============================================================================

/// Converts every element of a list or set into the target element shape.
///
/// - `null` stays `null`
/// - an empty source produces an empty container
/// - any element failure fails the whole conversion with that element's
///   failure; no partial result is returned
///
/// The target must be `Shape::List(element)` or `Shape::Set(element)`; the
/// result is an immutable container of the same kind, in the source's
/// iteration order.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_convert::combinators::aggregate;
///
/// let dates = aggregate(vec![TextToDate::new("%Y/%m/%d").into_converter()])?;
/// let out = dates.convert(
///     &Value::list(["1999/12/31".into(), "2000/1/2".into()]),
///     &Shape::list(Shape::temporal(TemporalKind::Date)),
///     &ctx,
/// )?;
/// ```
#[derive(Debug, Clone)]
pub struct Aggregate {
    element: Converter,
}

impl Aggregate {
    /// Creates an aggregation around a single element converter.
    pub fn new(element: Converter) -> Self {
        Self { element }
    }

    /// Returns the element converter.
    pub fn element(&self) -> &Converter {
        &self.element
    }

    fn items(value: &Value) -> Option<&ValueList> {
        match value {
            Value::List(items) | Value::Set(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "List[{}]", self.element)
    }
}

impl Convert for Aggregate {
    fn can_convert(&self, value: &Value, target: &Shape, ctx: &ConversionContext) -> bool {
        let element_shape = match target {
            Shape::List(element) | Shape::Set(element) => element,
            _ => return false,
        };
        if value.is_null() {
            return true;
        }
        Self::items(value).is_some_and(|items| {
            items
                .iter()
                .all(|item| self.element.can_convert(item, element_shape, ctx))
        })
    }

    fn convert(&self, value: &Value, target: &Shape, ctx: &ConversionContext) -> ConversionResult {
        let (element_shape, as_set) = match target {
            Shape::List(element) => (element.as_ref(), false),
            Shape::Set(element) => (element.as_ref(), true),
            _ => return Err(Failure::cannot_convert(value, target)),
        };
        if value.is_null() {
            return Ok(Value::Null);
        }
        let items = Self::items(value).ok_or_else(|| Failure::cannot_convert(value, target))?;

        let mut converted = ValueList::new();
        for (index, item) in items.iter().enumerate() {
            match self.element.convert(item, element_shape, ctx) {
                Ok(v) => converted.push_back(v),
                Err(failure) => {
                    trace!(index, element = %item, %failure, "aggregation element failed");
                    return Err(failure);
                }
            }
        }

        Ok(if as_set {
            Value::Set(converted)
        } else {
            Value::List(converted)
        })
    }
}

/// Creates an aggregation whose element converter is a first-match
/// collection of `converters`.
pub fn aggregate(converters: Vec<Converter>) -> Result<Aggregate, ConvertError> {
    Ok(Aggregate::new(first_match(converters)?))
}

// ============================================================================
// TESTS
// ============================================================================
