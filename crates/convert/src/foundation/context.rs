//! Locale and format configuration consumed by converters.
//!
//! A [`ConversionContext`] is read-only for the engine: converters borrow it
//! for the duration of one call and never retain it. Contexts are usually
//! built once per locale, either through [`ConversionContext::builder`] or
//! from a JSON document:
//!
//! ```rust,ignore
//! use nebula_convert::foundation::ConversionContext;
//!
//! let ctx = ConversionContext::from_json(r#"{ "decimal_separator": ",", "group_separator": "." }"#)?;
//! assert_eq!(ctx.decimal_separator(), ',');
//! ```

use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};

use crate::foundation::ConvertError;

/// Rounding applied when a decimal is rendered at a configured precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Round half to even (banker's rounding).
    #[default]
    HalfEven,
    /// Round half away from zero.
    HalfUp,
    /// Round half toward zero.
    HalfDown,
    /// Always toward zero.
    Down,
    /// Always away from zero.
    Up,
    /// Toward negative infinity.
    Floor,
    /// Toward positive infinity.
    Ceiling,
}

impl Rounding {
    /// The matching `rust_decimal` strategy.
    pub const fn strategy(self) -> RoundingStrategy {
        match self {
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
            Self::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Self::HalfDown => RoundingStrategy::MidpointTowardZero,
            Self::Down => RoundingStrategy::ToZero,
            Self::Up => RoundingStrategy::AwayFromZero,
            Self::Floor => RoundingStrategy::ToNegativeInfinity,
            Self::Ceiling => RoundingStrategy::ToPositiveInfinity,
        }
    }
}

/// Read-only configuration supplied with every conversion call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionContext {
    decimal_separator: char,
    group_separator: char,
    currency_symbol: String,
    exponent_symbol: String,
    date_offset: i64,
    two_digit_year_pivot: i32,
    precision: Option<u32>,
    rounding: Rounding,
    value_separator: char,
}

impl Default for ConversionContext {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            group_separator: ',',
            currency_symbol: "$".to_string(),
            exponent_symbol: "E".to_string(),
            date_offset: 0,
            two_digit_year_pivot: 1950,
            precision: None,
            rounding: Rounding::HalfEven,
            value_separator: ',',
        }
    }
}

impl ConversionContext {
    /// Offset for the "1900 date system": serial `0` is 1899-12-30.
    pub const DATE_OFFSET_1900: i64 = -25_569;

    /// Offset for the "1904 date system": serial `0` is 1904-01-01.
    pub const DATE_OFFSET_1904: i64 = -24_107;

    /// Starts a builder from the defaults.
    pub fn builder() -> ConversionContextBuilder {
        ConversionContextBuilder::default()
    }

    /// Parses and validates a JSON context document.
    ///
    /// Missing fields take their default values.
    pub fn from_json(document: &str) -> Result<Self, ConvertError> {
        let ctx: Self = serde_json::from_str(document)?;
        ctx.validate()?;
        Ok(ctx)
    }

    /// Checks that the separators can be told apart.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.decimal_separator == self.group_separator {
            return Err(ConvertError::InvalidContext {
                reason: format!(
                    "decimal and group separators are both '{}'",
                    self.decimal_separator
                ),
            });
        }
        if self.decimal_separator == self.value_separator {
            return Err(ConvertError::InvalidContext {
                reason: format!(
                    "decimal and value separators are both '{}'",
                    self.decimal_separator
                ),
            });
        }
        if self.exponent_symbol.is_empty() {
            return Err(ConvertError::InvalidContext {
                reason: "exponent symbol is empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub fn group_separator(&self) -> char {
        self.group_separator
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn exponent_symbol(&self) -> &str {
        &self.exponent_symbol
    }

    /// Days subtracted from a date's epoch day to obtain its serial value.
    pub fn date_offset(&self) -> i64 {
        self.date_offset
    }

    /// First year of the century window two-digit years are placed in.
    pub fn two_digit_year_pivot(&self) -> i32 {
        self.two_digit_year_pivot
    }

    /// Fraction digits used when rendering decimals, if fixed.
    pub fn precision(&self) -> Option<u32> {
        self.precision
    }

    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Separator between values in delimited text.
    pub fn value_separator(&self) -> char {
        self.value_separator
    }
}

/// Fluent builder for [`ConversionContext`].
#[derive(Debug, Clone, Default)]
pub struct ConversionContextBuilder {
    ctx: ConversionContext,
}

impl ConversionContextBuilder {
    #[must_use = "builder methods must be chained or built"]
    pub fn decimal_separator(mut self, separator: char) -> Self {
        self.ctx.decimal_separator = separator;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn group_separator(mut self, separator: char) -> Self {
        self.ctx.group_separator = separator;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.ctx.currency_symbol = symbol.into();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn exponent_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.ctx.exponent_symbol = symbol.into();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn date_offset(mut self, days: i64) -> Self {
        self.ctx.date_offset = days;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn two_digit_year_pivot(mut self, year: i32) -> Self {
        self.ctx.two_digit_year_pivot = year;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn precision(mut self, digits: u32) -> Self {
        self.ctx.precision = Some(digits);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn rounding(mut self, rounding: Rounding) -> Self {
        self.ctx.rounding = rounding;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn value_separator(mut self, separator: char) -> Self {
        self.ctx.value_separator = separator;
        self
    }

    /// Validates and returns the context.
    pub fn build(self) -> Result<ConversionContext, ConvertError> {
        self.ctx.validate()?;
        Ok(self.ctx)
    }
}
