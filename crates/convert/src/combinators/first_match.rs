//! FIRST-MATCH combinator - ordered dispatch over candidate converters
//!
//! Candidates are tried in order. A candidate that claims a value but then
//! fails does not end the search; the next candidate gets its turn.
//!
//! ```rust,ignore
//! use nebula_convert::combinators::first_match;
//!
//! let any_to_number = first_match(vec![
//!     converters::numeric().into_converter(),
//!     converters::boolean_to_number().into_converter(),
//! ])?;
//! assert_eq!(any_to_number.to_string(), "Number->Number | Boolean->Number");
//! ```

use std::fmt;

use tracing::trace;

use crate::foundation::{
    ConversionContext, ConversionResult, Convert, ConvertError, Converter, Failure, Shape, Value,
};

/// Tries an ordered list of converters and returns the first success.
#[derive(Debug, Clone)]
pub struct FirstMatch {
    converters: Vec<Converter>,
}

impl FirstMatch {
    /// Builds the composite for `a.or(b)`, flattening a left-hand collection
    /// so repeated `.or` keeps a single flat candidate list.
    pub(crate) fn from_pair(left: Converter, right: Converter) -> Converter {
        let mut converters = match left.downcast_ref::<FirstMatch>() {
            Some(existing) => existing.converters.clone(),
            None => vec![left],
        };
        converters.push(right);
        Converter::new(Self { converters })
    }

    /// The candidates, in dispatch order.
    pub fn converters(&self) -> &[Converter] {
        &self.converters
    }
}

impl fmt::Display for FirstMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, converter) in self.converters.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{converter}")?;
        }
        Ok(())
    }
}

impl Convert for FirstMatch {
    fn can_convert(&self, value: &Value, target: &Shape, ctx: &ConversionContext) -> bool {
        self.converters
            .iter()
            .any(|c| c.can_convert(value, target, ctx))
    }

    fn convert(&self, value: &Value, target: &Shape, ctx: &ConversionContext) -> ConversionResult {
        for converter in &self.converters {
            if !converter.can_convert(value, target, ctx) {
                continue;
            }
            match converter.convert(value, target, ctx) {
                Ok(converted) => return Ok(converted),
                Err(failure) => {
                    trace!(
                        candidate = %converter,
                        target = %target,
                        %failure,
                        "candidate claimed value but failed, trying next"
                    );
                }
            }
        }
        Err(Failure::cannot_convert(value, target))
    }
}

/// Creates a first-match collection.
///
/// A single candidate is returned unchanged. An empty list is a programming
/// error and is rejected here rather than at conversion time.
pub fn first_match(mut converters: Vec<Converter>) -> Result<Converter, ConvertError> {
    if converters.len() > 1 {
        return Ok(Converter::new(FirstMatch { converters }));
    }
    converters.pop().ok_or(ConvertError::EmptyCandidates {
        combinator: "first_match",
    })
}
