//! CHAIN combinator - sequential composition through an intermediate shape
//!
//! ```rust,ignore
//! use nebula_convert::combinators::chain;
//!
//! // Text -> Decimal -> Byte
//! let text_to_byte = chain(converters::text_to_number(), Shape::Number, converters::numeric());
//! assert_eq!(text_to_byte.to_string(), "Text->Number to Number->Number");
//! ```

use std::fmt;

use crate::foundation::{
    ConversionContext, ConversionResult, Convert, ConvertExt, Converter, Shape, Value,
};

/// Converts to an intermediate shape with `first`, then to the target with
/// `second`.
///
/// Fails fast: when `first` fails its failure is returned unchanged and
/// `second` is never invoked.
#[derive(Debug, Clone)]
pub struct Chain {
    first: Converter,
    intermediate: Shape,
    second: Converter,
}

impl Chain {
    /// Creates a new chain.
    pub fn new(first: Converter, intermediate: Shape, second: Converter) -> Self {
        Self {
            first,
            intermediate,
            second,
        }
    }

    /// Returns the first converter.
    pub fn first(&self) -> &Converter {
        &self.first
    }

    /// Returns the intermediate shape.
    pub fn intermediate(&self) -> &Shape {
        &self.intermediate
    }

    /// Returns the second converter.
    pub fn second(&self) -> &Converter {
        &self.second
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.first, self.second)
    }
}

impl Convert for Chain {
    /// Converters are pure, so the intermediate value is computed to ask
    /// `second` about the value it would actually receive.
    fn can_convert(&self, value: &Value, target: &Shape, ctx: &ConversionContext) -> bool {
        if !self.first.can_convert(value, &self.intermediate, ctx) {
            return false;
        }
        match self.first.convert(value, &self.intermediate, ctx) {
            Ok(mid) => self.second.can_convert(&mid, target, ctx),
            Err(_) => false,
        }
    }

    fn convert(&self, value: &Value, target: &Shape, ctx: &ConversionContext) -> ConversionResult {
        let mid = self.first.convert(value, &self.intermediate, ctx)?;
        self.second.convert(&mid, target, ctx)
    }
}

/// Creates a [`Chain`] from any two converters.
pub fn chain<A: Convert, B: Convert>(first: A, intermediate: Shape, second: B) -> Chain {
    Chain::new(first.into_converter(), intermediate, second.into_converter())
}
