//! # nebula-convert
//!
//! A composable value conversion engine for the Nebula workflow engine.
//!
//! A value of unknown runtime shape goes in together with a target [`Shape`]
//! and a [`ConversionContext`]; a converted value or a descriptive
//! [`Failure`] comes out. Nothing panics for a domain mismatch.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nebula_convert::prelude::*;
//!
//! let ctx = ConversionContext::default();
//! let byte = converters::standard().convert(&Value::text("12"), &Shape::Numeric(NumericKind::Byte), &ctx)?;
//! assert_eq!(byte, Value::Byte(12));
//!
//! // Compose converters with .then() / .or() / .named() / .collapsed()
//! let dates = aggregate(vec![text_to_date("%Y/%m/%d").into_converter()])?;
//! ```
//!
//! ## Leaf Converters
//!
//! - **Numeric**: [`NumberConverter`](converters::NumberConverter) moves values
//!   among the eight [`NumericKind`]s with an asymmetric exactness policy
//! - **Boolean**: [`BooleanToNumber`](converters::BooleanToNumber),
//!   [`NumberToBoolean`](converters::NumberToBoolean)
//! - **Temporal**: [`ToSerial`](converters::ToSerial),
//!   [`FromSerial`](converters::FromSerial), [`Retemporal`](converters::Retemporal)
//! - **Text**: [`TextToNumber`](converters::TextToNumber),
//!   [`TextToDate`](converters::TextToDate), [`ToText`](converters::ToText)
//!
//! ## Combinators
//!
//! [`chain`](combinators::chain), [`first_match`](combinators::first_match),
//! [`aggregate`](combinators::aggregate), [`collapse`](combinators::collapse)
//! and [`Named`](combinators::Named).

pub mod combinators;
pub mod converters;
pub mod foundation;
pub mod prelude;

pub use foundation::{
    ConversionContext, ConversionResult, Convert, ConvertError, ConvertExt, Converter, Failure,
    NumericKind, Shape, TemporalKind, Value,
};
