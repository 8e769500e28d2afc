//! Core conversion types and traits
//!
//! This module contains the building blocks every converter shares:
//!
//! - **Data**: [`Value`], [`Shape`], [`NumericKind`], [`TemporalKind`]
//! - **Configuration**: [`ConversionContext`]
//! - **Traits**: [`Convert`], [`ConvertExt`], [`TargetType`]
//! - **Errors**: [`Failure`], [`ConvertError`]
//!
//! # Architecture
//!
//! ## 1. Failures are values
//!
//! An ordinary mismatch (wrong shape, out of range, lost fraction) is a
//! [`Failure`] inside [`ConversionResult`]. Only `convert_or_fail` and
//! construction of malformed combinators produce a [`ConvertError`].
//!
//! ## 2. Immutable, shared converters
//!
//! Converters hold no per-call state. Composites keep their children behind
//! [`Converter`] handles, so a converter graph is built once and traversed
//! concurrently without locking.
//!
//! ## 3. Context per call
//!
//! Locale data arrives with each call as a borrowed [`ConversionContext`];
//! no converter retains it.
//!
//! # Examples
//!
//! ```rust,ignore
//! use nebula_convert::prelude::*;
//!
//! let ctx = ConversionContext::default();
//! let byte = converters::numeric().convert(&Value::Double(1.5), &Shape::Numeric(NumericKind::Byte), &ctx)?;
//! assert_eq!(byte, Value::Byte(1));
//! ```

pub mod context;
pub mod error;
pub mod shape;
pub mod traits;
pub mod typed;
pub mod value;

pub use context::{ConversionContext, ConversionContextBuilder, Rounding};
pub use error::{ConversionResult, ConvertError, Failure};
pub use shape::{NumericKind, ParseShapeError, Shape, TemporalKind};
pub use traits::{Convert, ConvertExt, Converter};
pub use typed::TargetType;
pub use value::{Value, ValueList};

// ============================================================================
// UTILITIES
// ============================================================================

/// Converts with the first converter that succeeds, without building a
/// composite.
///
/// Useful for one-off dispatch over a borrowed slice; prefer
/// [`first_match`](crate::combinators::first_match) for converters that are
/// reused.
pub fn convert_with_any(
    converters: &[&dyn Convert],
    value: &Value,
    target: &Shape,
    ctx: &ConversionContext,
) -> ConversionResult {
    converters
        .iter()
        .filter(|c| c.can_convert(value, target, ctx))
        .find_map(|c| c.convert(value, target, ctx).ok())
        .ok_or_else(|| Failure::cannot_convert(value, target))
}
