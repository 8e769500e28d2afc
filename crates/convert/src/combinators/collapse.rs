//! COLLAPSE combinator - reduces 0/1-element containers to a single value

use std::fmt;

use crate::foundation::{
    ConversionContext, ConversionResult, Convert, ConvertExt, Converter, Failure, Shape, Value,
};

/// Reduces a list, set or single-slot container to one converted value.
///
/// | source                      | result                          |
/// |-----------------------------|---------------------------------|
/// | `null`                      | `null`                          |
/// | zero elements               | `null`                          |
/// | one element                 | that element, converted         |
/// | more than one element       | failure                         |
/// | one single-slot container   | failure (no double unwrapping)  |
#[derive(Debug, Clone)]
pub struct Collapse {
    inner: Converter,
}

impl Collapse {
    pub fn new(inner: Converter) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &Converter {
        &self.inner
    }

    /// The single element to convert, `Ok(None)` when there is none.
    fn single<'a>(value: &'a Value, target: &Shape) -> ConversionResult<Option<&'a Value>> {
        let elements = value
            .elements()
            .ok_or_else(|| Failure::cannot_convert(value, target))?;
        match elements.as_slice() {
            [] => Ok(None),
            [Value::Optional(_)] => Err(Failure::with_cause(
                value,
                target,
                "nested single-slot containers are not unwrapped",
            )),
            [only] => Ok(Some(*only)),
            many => Err(Failure::with_cause(
                value,
                target,
                format!("expected at most one element, found {}", many.len()),
            )),
        }
    }
}

impl fmt::Display for Collapse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Collapse[{}]", self.inner)
    }
}

impl Convert for Collapse {
    fn can_convert(&self, value: &Value, target: &Shape, ctx: &ConversionContext) -> bool {
        if value.is_null() {
            return true;
        }
        match Self::single(value, target) {
            Ok(None) => true,
            Ok(Some(element)) => self.inner.can_convert(element, target, ctx),
            Err(_) => false,
        }
    }

    fn convert(&self, value: &Value, target: &Shape, ctx: &ConversionContext) -> ConversionResult {
        if value.is_null() {
            return Ok(Value::Null);
        }
        match Self::single(value, target)? {
            None => Ok(Value::Null),
            Some(element) => self.inner.convert(element, target, ctx),
        }
    }
}

/// Creates a [`Collapse`] around any converter.
pub fn collapse<C: Convert>(inner: C) -> Collapse {
    Collapse::new(inner.into_converter())
}
