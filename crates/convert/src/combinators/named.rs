//! NAMED combinator - overrides a converter's diagnostic name

use std::fmt;

use crate::foundation::{ConversionContext, ConversionResult, Convert, Converter, Shape, Value};

/// Wraps a converter with a custom `Display`.
///
/// Naming an already-named converter does not nest: the wrapper keeps the
/// innermost converter and takes the new label.
#[derive(Debug, Clone)]
pub struct Named {
    inner: Converter,
    label: String,
}

impl Named {
    pub fn new(inner: Converter, label: impl Into<String>) -> Self {
        let inner = match inner.downcast_ref::<Named>() {
            Some(named) => named.inner.clone(),
            None => inner,
        };
        Self {
            inner,
            label: label.into(),
        }
    }

    /// The wrapped converter.
    pub fn inner(&self) -> &Converter {
        &self.inner
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PartialEq for Named {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.inner.ptr_eq(&other.inner)
    }
}

impl fmt::Display for Named {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl Convert for Named {
    fn can_convert(&self, value: &Value, target: &Shape, ctx: &ConversionContext) -> bool {
        self.inner.can_convert(value, target, ctx)
    }

    fn convert(&self, value: &Value, target: &Shape, ctx: &ConversionContext) -> ConversionResult {
        self.inner.convert(value, target, ctx)
    }
}
