//! Core traits for the conversion system
//!
//! [`Convert`] is the atomic unit every leaf converter and combinator
//! implements. [`Converter`] is the shared, type-erased handle combinators
//! hold their children through, and [`ConvertExt`] adds the fluent
//! composition methods.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::combinators::{Chain, Collapse, Named};
use crate::foundation::{
    ConversionContext, ConversionResult, ConvertError, Shape, TargetType, Value,
};

// ============================================================================
// CORE CONVERTER TRAIT
// ============================================================================

/// The contract every converter implements.
///
/// Implementations are immutable and hold no per-call state, so one instance
/// can serve any number of concurrent callers. `Display` is the converter's
/// diagnostic name and shows up verbatim in composite names and failures.
///
/// `convert` is authoritative: it re-validates its input and returns a
/// [`Failure`](crate::foundation::Failure) for anything it cannot handle,
/// even when a caller skipped `can_convert`.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_convert::prelude::*;
///
/// #[derive(Debug)]
/// struct Negate;
///
/// impl std::fmt::Display for Negate {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str("Long->Long")
///     }
/// }
///
/// impl Convert for Negate {
///     fn can_convert(&self, value: &Value, _: &Shape, _: &ConversionContext) -> bool {
///         matches!(value, Value::Long(_))
///     }
///
///     fn convert(&self, value: &Value, target: &Shape, _: &ConversionContext) -> ConversionResult {
///         match value {
///             Value::Long(n) => Ok(Value::Long(-n)),
///             other => Err(Failure::cannot_convert(other, target)),
///         }
///     }
/// }
/// ```
pub trait Convert: Any + fmt::Display + fmt::Debug + Send + Sync {
    /// Whether `convert` is expected to handle this value and target.
    ///
    /// Side-effect free; depends only on its arguments.
    fn can_convert(&self, value: &Value, target: &Shape, ctx: &ConversionContext) -> bool;

    /// Performs the conversion.
    ///
    /// On success the produced value satisfies `target`.
    fn convert(&self, value: &Value, target: &Shape, ctx: &ConversionContext) -> ConversionResult;

    /// Converts, escalating a failure into a [`ConvertError`].
    fn convert_or_fail(
        &self,
        value: &Value,
        target: &Shape,
        ctx: &ConversionContext,
    ) -> Result<Value, ConvertError> {
        self.convert(value, target, ctx).map_err(|failure| {
            debug!(converter = %self, target = %target, %failure, "escalating conversion failure");
            ConvertError::failed(failure)
        })
    }

    /// Like [`Convert::convert_or_fail`], with `prefix` placed before the
    /// failure message.
    fn convert_or_fail_with_prefix(
        &self,
        prefix: &str,
        value: &Value,
        target: &Shape,
        ctx: &ConversionContext,
    ) -> Result<Value, ConvertError> {
        self.convert(value, target, ctx).map_err(|failure| {
            debug!(converter = %self, target = %target, %failure, prefix, "escalating conversion failure");
            ConvertError::failed_with_prefix(prefix, failure)
        })
    }
}

// ============================================================================
// SHARED HANDLE
// ============================================================================

/// A shared, immutable converter.
///
/// Cloning is cheap; equality is identity of the shared instance.
#[derive(Clone)]
pub struct Converter(Arc<dyn Convert>);

impl Converter {
    /// Wraps a converter in a shared handle.
    pub fn new<C: Convert>(converter: C) -> Self {
        Self(Arc::new(converter))
    }

    /// Downcasts to a concrete converter type.
    pub fn downcast_ref<C: Convert>(&self) -> Option<&C> {
        let any: &dyn Any = &*self.0;
        any.downcast_ref::<C>()
    }

    /// Whether both handles share the same instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Converter {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl Convert for Converter {
    fn can_convert(&self, value: &Value, target: &Shape, ctx: &ConversionContext) -> bool {
        self.0.can_convert(value, target, ctx)
    }

    fn convert(&self, value: &Value, target: &Shape, ctx: &ConversionContext) -> ConversionResult {
        self.0.convert(value, target, ctx)
    }
}

// ============================================================================
// CONVERTER EXTENSION TRAIT
// ============================================================================

/// Extension trait providing combinator methods for converters.
///
/// Automatically implemented for every [`Convert`] implementation.
///
/// ```rust,ignore
/// use nebula_convert::prelude::*;
///
/// let to_byte = converters::text_to_number()
///     .then(Shape::Number, converters::numeric())
///     .named("text as byte");
/// ```
pub trait ConvertExt: Convert + Sized {
    /// Erases the concrete type into a shared [`Converter`].
    fn into_converter(self) -> Converter {
        let handle = Converter::new(self);
        // Already a handle: avoid double wrapping.
        if let Some(inner) = handle.downcast_ref::<Converter>() {
            return inner.clone();
        }
        handle
    }

    /// Chains through `intermediate`: `second(self(v, intermediate), target)`.
    fn then<C: Convert>(self, intermediate: Shape, second: C) -> Chain {
        Chain::new(self.into_converter(), intermediate, second.into_converter())
    }

    /// Tries `self`, then `other` if `self` declines or fails.
    fn or<C: Convert>(self, other: C) -> Converter {
        crate::combinators::FirstMatch::from_pair(self.into_converter(), other.into_converter())
    }

    /// Replaces the diagnostic name.
    fn named(self, label: impl Into<String>) -> Named {
        Named::new(self.into_converter(), label)
    }

    /// Collapses 0/1-element collections before converting with `self`.
    fn collapsed(self) -> Collapse {
        Collapse::new(self.into_converter())
    }

    /// Converts to the shape of `T` and extracts it.
    ///
    /// Returns `Ok(None)` for the null pass-through.
    fn convert_as<T: TargetType>(
        &self,
        value: &Value,
        ctx: &ConversionContext,
    ) -> ConversionResult<Option<T>> {
        let target = T::shape();
        let produced = self.convert(value, &target, ctx)?;
        T::extract(&produced, &target)
    }
}

impl<C: Convert> ConvertExt for C {}
