//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use nebula_convert::prelude::*;
//!
//! let to_byte = text_to_number().then(Shape::Number, numeric()).named("text as byte");
//! ```

// ============================================================================
// FOUNDATION: Core traits, data, errors
// ============================================================================

pub use crate::foundation::{
    ConversionContext, ConversionContextBuilder, ConversionResult, Convert, ConvertError,
    ConvertExt, Converter, Failure, NumericKind, Rounding, Shape, TargetType, TemporalKind, Value,
    ValueList,
};

// ============================================================================
// CONVERTERS: Leaf converters and factories
// ============================================================================

pub use crate::converters::{
    self, BooleanToNumber, FromSerial, NumberConverter, NumberToBoolean, Passthrough, Retemporal,
    TextToDate, TextToNumber, ToSerial, ToText, boolean_to_number, from_serial, number_to_boolean,
    numeric, passthrough, standard, text_to_date, text_to_number, to_serial, to_text,
};

// ============================================================================
// COMBINATORS: Composition functions and types
// ============================================================================

pub use crate::combinators::{
    Aggregate, Chain, Collapse, FirstMatch, Named, aggregate, chain, collapse, first_match,
};
