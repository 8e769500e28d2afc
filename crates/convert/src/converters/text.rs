//! Context-driven text converters.
//!
//! These read and write plain locale-formatted text: separators, currency and
//! exponent symbols come from the [`ConversionContext`]. Pattern-based
//! number formatting is not attempted.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::converters::numeric::to_target;
use crate::foundation::{
    ConversionContext, ConversionResult, Convert, Failure, Shape, TemporalKind, Value,
};

// ============================================================================
// TEXT → NUMBER
// ============================================================================

/// Parses locale-formatted text, then hands the number to the numeric kernel.
///
/// Integers parse exactly as big integers and fractional text as an exact
/// decimal, so `"0.5"` to `Byte` fails the same way a decimal `0.5` does.
/// A generic `Number` target yields a `Long` when the integer fits, a
/// `BigInt` when it does not, and a `Decimal` for fractional text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextToNumber;

impl TextToNumber {
    /// Strips currency and group separators and maps the locale's decimal
    /// separator and exponent symbol onto `.` and `e`.
    ///
    /// Only surrounding whitespace is ignored. Inside the number, whitespace
    /// counts as grouping only when the locale groups with a space, so
    /// `"1 2"` is not a number in the default locale.
    fn normalize(text: &str, ctx: &ConversionContext) -> String {
        let mut text = text.to_string();
        if !ctx.currency_symbol().is_empty() {
            text = text.replace(ctx.currency_symbol(), "");
        }
        text = text.replace(ctx.exponent_symbol(), "e");
        let group = ctx.group_separator();
        text.trim()
            .chars()
            .filter(|c| *c != group && !(group.is_whitespace() && c.is_whitespace()))
            .map(|c| if c == ctx.decimal_separator() { '.' } else { c })
            .collect()
    }

    fn parse(normalized: &str) -> Result<Value, String> {
        if normalized.is_empty() {
            return Err("no digits".to_string());
        }
        let digits = normalized.strip_prefix(['-', '+']).unwrap_or(normalized);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            let whole = BigInt::from_str(normalized).map_err(|e| e.to_string())?;
            return Ok(whole.to_i64().map_or(Value::BigInt(whole), Value::Long));
        }
        let parsed = if normalized.contains(['e', 'E']) {
            Decimal::from_scientific(normalized)
        } else {
            Decimal::from_str(normalized)
        };
        parsed.map(Value::Decimal).map_err(|e| e.to_string())
    }
}

impl fmt::Display for TextToNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Text->Number")
    }
}

impl Convert for TextToNumber {
    fn can_convert(&self, value: &Value, target: &Shape, _: &ConversionContext) -> bool {
        target.is_numeric() && matches!(value, Value::Null | Value::Text(_))
    }

    fn convert(&self, value: &Value, target: &Shape, ctx: &ConversionContext) -> ConversionResult {
        match value {
            Value::Null if target.is_numeric() => Ok(Value::Null),
            Value::Text(text) if target.is_numeric() => {
                let parsed = Self::parse(&Self::normalize(text, ctx))
                    .map_err(|cause| Failure::with_cause(value, target, cause))?;
                to_target(&parsed, value, target)
            }
            _ => Err(Failure::cannot_convert(value, target)),
        }
    }
}

// ============================================================================
// TEXT → DATE
// ============================================================================

/// Parses a date with a chrono `strftime` format.
///
/// When the format reads a two-digit year (`%y`) the century is chosen from
/// the context: the year lands in `[pivot, pivot + 100)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextToDate {
    format: String,
}

impl TextToDate {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    fn repivot(&self, date: NaiveDate, pivot: i32) -> Option<NaiveDate> {
        if !self.format.contains("%y") {
            return Some(date);
        }
        let mut year = pivot - pivot.rem_euclid(100) + date.year().rem_euclid(100);
        if year < pivot {
            year += 100;
        }
        date.with_year(year)
    }

    fn applies(value: &Value, target: &Shape) -> bool {
        target.temporal_kind() == Some(TemporalKind::Date)
            && matches!(value, Value::Null | Value::Text(_))
    }
}

impl fmt::Display for TextToDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Text->Date")
    }
}

impl Convert for TextToDate {
    fn can_convert(&self, value: &Value, target: &Shape, _: &ConversionContext) -> bool {
        Self::applies(value, target)
    }

    fn convert(&self, value: &Value, target: &Shape, ctx: &ConversionContext) -> ConversionResult {
        if !Self::applies(value, target) {
            return Err(Failure::cannot_convert(value, target));
        }
        let Value::Text(text) = value else {
            return Ok(Value::Null);
        };
        let parsed = NaiveDate::parse_from_str(text.trim(), &self.format)
            .map_err(|e| Failure::with_cause(value, target, e))?;
        self.repivot(parsed, ctx.two_digit_year_pivot())
            .map(Value::Date)
            .ok_or_else(|| Failure::with_cause(value, target, "no such date in the pivot century"))
    }
}

// ============================================================================
// ANY → TEXT
// ============================================================================

/// Renders any value as locale-formatted text.
///
/// Fractional numbers use the context's decimal separator; decimals are
/// rounded to the context's precision when one is set. Lists and sets are
/// joined with the value separator, and a filled single-slot container
/// renders its content. Temporal values use ISO 8601.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToText;

impl ToText {
    fn render(value: &Value, ctx: &ConversionContext, out: &mut String) -> fmt::Result {
        let localize = |s: String| -> String {
            if ctx.decimal_separator() == '.' {
                s
            } else {
                s.replace('.', &ctx.decimal_separator().to_string())
            }
        };
        match value {
            Value::Null | Value::Optional(None) => Ok(()),
            Value::Text(s) => out.write_str(s),
            Value::Float(n) => out.write_str(&localize(n.to_string())),
            Value::Double(n) => out.write_str(&localize(n.to_string())),
            Value::Decimal(n) => {
                let rendered = match ctx.precision() {
                    Some(digits) => {
                        let rounded = n.round_dp_with_strategy(digits, ctx.rounding().strategy());
                        pad_fraction(rounded.to_string(), digits as usize)
                    }
                    None => n.to_string(),
                };
                out.write_str(&localize(rendered))
            }
            Value::List(items) | Value::Set(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.write_char(ctx.value_separator())?;
                    }
                    Self::render(item, ctx, out)?;
                }
                Ok(())
            }
            Value::Optional(Some(inner)) => Self::render(inner, ctx, out),
            other => write!(out, "{other}"),
        }
    }
}

/// Right-pads the fraction of a rendered decimal with zeros up to `digits`.
///
/// Rounding never adds digits, and precisions beyond the decimal's own scale
/// limit are legal, so the padding is done on the text.
fn pad_fraction(mut rendered: String, digits: usize) -> String {
    if digits == 0 {
        return rendered;
    }
    let present = match rendered.find('.') {
        Some(dot) => rendered.len() - dot - 1,
        None => {
            rendered.push('.');
            0
        }
    };
    rendered.extend(std::iter::repeat_n('0', digits.saturating_sub(present)));
    rendered
}

impl fmt::Display for ToText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Any->Text")
    }
}

impl Convert for ToText {
    fn can_convert(&self, _: &Value, target: &Shape, _: &ConversionContext) -> bool {
        matches!(target, Shape::Text)
    }

    fn convert(&self, value: &Value, target: &Shape, ctx: &ConversionContext) -> ConversionResult {
        if !matches!(target, Shape::Text) {
            return Err(Failure::cannot_convert(value, target));
        }
        if value.is_null() {
            return Ok(Value::Null);
        }
        let mut out = String::new();
        Self::render(value, ctx, &mut out).map_err(|e| Failure::with_cause(value, target, e))?;
        Ok(Value::Text(out))
    }
}
