//! Leaf converters.
//!
//! | converter                  | name                   | module       |
//! |----------------------------|------------------------|--------------|
//! | [`Passthrough`]            | `Any->Any`             | here         |
//! | [`NumberConverter`]        | `Number->Number`       | [`numeric`](mod@numeric)  |
//! | [`BooleanToNumber`]        | `Boolean->Number`      | [`boolean`]  |
//! | [`NumberToBoolean`]        | `Number->Boolean`      | [`boolean`]  |
//! | [`ToSerial`]               | `Date->Number`, ...    | [`temporal`] |
//! | [`FromSerial`]             | `Number->Date`, ...    | [`temporal`] |
//! | [`Retemporal`]             | `Time->DateTime`, ...  | [`temporal`] |
//! | [`TextToNumber`]           | `Text->Number`         | [`text`]     |
//! | [`TextToDate`]             | `Text->Date`           | [`text`]     |
//! | [`ToText`]                 | `Any->Text`            | [`text`]     |
//!
//! Every leaf maps `null` to `null` for the targets it handles.

use std::fmt;
use std::sync::LazyLock;

use crate::foundation::{
    ConversionContext, ConversionResult, Convert, ConvertExt, Converter, Failure, Shape,
    TemporalKind, Value,
};

pub mod boolean;
pub mod numeric;
pub mod temporal;
pub mod text;

pub use boolean::{BooleanToNumber, NumberToBoolean};
pub use numeric::{NumberConverter, NumericError, numeric};
pub use temporal::{FromSerial, Retemporal, ToSerial};
pub use text::{TextToDate, TextToNumber, ToText};

// ============================================================================
// PASSTHROUGH
// ============================================================================

/// Returns the value unchanged when it already satisfies the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl fmt::Display for Passthrough {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Any->Any")
    }
}

impl Convert for Passthrough {
    fn can_convert(&self, value: &Value, target: &Shape, _: &ConversionContext) -> bool {
        target.accepts(value)
    }

    fn convert(&self, value: &Value, target: &Shape, _: &ConversionContext) -> ConversionResult {
        if target.accepts(value) {
            Ok(value.clone())
        } else {
            Err(Failure::cannot_convert(value, target))
        }
    }
}

// ============================================================================
// FACTORIES
// ============================================================================

pub fn passthrough() -> Passthrough {
    Passthrough
}

pub fn boolean_to_number() -> BooleanToNumber {
    BooleanToNumber
}

pub fn number_to_boolean() -> NumberToBoolean {
    NumberToBoolean
}

/// `Date->Number`, `Time->Number` or `DateTime->Number`.
pub fn to_serial(kind: TemporalKind) -> ToSerial {
    ToSerial::new(kind)
}

/// `Number->Date`, `Number->Time` or `Number->DateTime`.
pub fn from_serial(kind: TemporalKind) -> FromSerial {
    FromSerial::new(kind)
}

pub fn text_to_number() -> TextToNumber {
    TextToNumber
}

/// Parses dates with a chrono `strftime` format such as `"%Y/%m/%d"`.
pub fn text_to_date(format: impl Into<String>) -> TextToDate {
    TextToDate::new(format)
}

pub fn to_text() -> ToText {
    ToText
}

static STANDARD: LazyLock<Converter> = LazyLock::new(|| {
    const TEMPORAL: [TemporalKind; 3] = [TemporalKind::Date, TemporalKind::Time, TemporalKind::DateTime];

    let mut standard = Passthrough
        .or(NumberConverter)
        .or(BooleanToNumber)
        .or(NumberToBoolean);
    for kind in TEMPORAL {
        standard = standard.or(ToSerial::new(kind)).or(FromSerial::new(kind));
    }
    for retemporal in Retemporal::ALL {
        standard = standard.or(retemporal);
    }
    standard.or(TextToNumber).or(ToText)
});

/// The default composite: every context-driven leaf in a single first-match
/// collection, starting with [`Passthrough`].
///
/// Built on first use and shared; clones are cheap handle copies.
pub fn standard() -> Converter {
    STANDARD.clone()
}
