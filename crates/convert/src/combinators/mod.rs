//! Combinators that build composite converters from simpler ones.
//!
//! - [`Chain`]: value → intermediate shape → target, via two converters
//! - [`FirstMatch`]: ordered dispatch, first success wins
//! - [`Aggregate`]: element-wise conversion of lists and sets
//! - [`Collapse`]: 0/1-element containers to a single value
//! - [`Named`]: custom diagnostic name
//!
//! Composition never mutates the children; every combinator is a new
//! immutable converter holding shared handles.

pub mod aggregate;
pub mod chain;
pub mod collapse;
pub mod first_match;
pub mod named;

pub use aggregate::{Aggregate, aggregate};
pub use chain::{Chain, chain};
pub use collapse::{Collapse, collapse};
pub use first_match::{FirstMatch, first_match};
pub use named::Named;
