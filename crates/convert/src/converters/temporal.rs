//! Temporal kernel: dates, times and date-times as serial numbers, and
//! conversions among the three temporal shapes.
//!
//! A serial value counts days from an epoch chosen by the context's date
//! offset: `serial = epoch_day(date) - ctx.date_offset()`, where `epoch_day`
//! counts from 1970-01-01. The fractional part of a serial is the elapsed
//! fraction of the day. Times carry no date, so their serial lies in `[0, 1)`.
//!
//! ```text
//! offset              serial 0      1970-05-04
//! 0                   1970-01-01    123
//! DATE_OFFSET_1900    1899-12-30    25692
//! DATE_OFFSET_1904    1904-01-01    24230
//! ```
//!
//! Fractions are resolved to the nearest millisecond when a serial is turned
//! back into a time of day; finer detail is dropped without failing.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::converters::numeric::{self, to_target};
use crate::foundation::{
    ConversionContext, ConversionResult, Convert, Failure, NumericKind, Shape, TemporalKind, Value,
};

/// `num_days_from_ce` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

const MILLIS_PER_DAY: i64 = 86_400_000;
const NANOS_PER_DAY: i64 = 86_400_000_000_000;

// ============================================================================
// CALENDAR HELPERS
// ============================================================================

fn epoch_day(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE
}

fn date_from_epoch_day(day: i64) -> Option<NaiveDate> {
    let from_ce = day.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?;
    NaiveDate::from_num_days_from_ce_opt(i32::try_from(from_ce).ok()?)
}

fn unix_epoch() -> NaiveDate {
    NaiveDate::default()
}

fn nanos_of_day(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight()) * 1_000_000_000 + i64::from(time.nanosecond())
}

fn time_from_millis(millis: i64) -> Option<NaiveTime> {
    let secs = u32::try_from(millis / 1000).ok()?;
    let nanos = u32::try_from((millis % 1000) * 1_000_000).ok()?;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
}

/// Splits a serial into whole days (floored) and milliseconds into the day.
fn split_serial(serial: Decimal) -> Option<(i64, i64)> {
    let whole = serial.floor();
    let fraction = serial - whole;
    let mut days = whole.to_i64()?;
    let mut millis = (fraction * Decimal::from(MILLIS_PER_DAY)).round().to_i64()?;
    if millis >= MILLIS_PER_DAY {
        days = days.checked_add(1)?;
        millis -= MILLIS_PER_DAY;
    }
    Some((days, millis))
}

// ============================================================================
// TEMPORAL → NUMBER
// ============================================================================

/// Serial position of a temporal value: whole days since the configured
/// epoch plus nanoseconds into the day.
#[derive(Debug, Clone, Copy)]
struct Serial {
    days: i64,
    nanos: i64,
}

impl Serial {
    fn of(value: &Value, ctx: &ConversionContext) -> Option<Self> {
        let offset = ctx.date_offset();
        match value {
            Value::Date(date) => Some(Self {
                days: epoch_day(*date).checked_sub(offset)?,
                nanos: 0,
            }),
            Value::DateTime(dt) => Some(Self {
                days: epoch_day(dt.date()).checked_sub(offset)?,
                nanos: nanos_of_day(dt.time()),
            }),
            Value::Time(time) => Some(Self {
                days: 0,
                nanos: nanos_of_day(*time),
            }),
            _ => None,
        }
    }

    fn fraction(self) -> Decimal {
        Decimal::from(self.nanos) / Decimal::from(NANOS_PER_DAY)
    }

    fn as_decimal(self) -> Decimal {
        Decimal::from(self.days) + self.fraction()
    }

    fn as_f64(self) -> f64 {
        self.days as f64 + self.nanos as f64 / NANOS_PER_DAY as f64
    }
}

/// Date, time or date-time → its serial number.
///
/// Integral targets receive the whole-day part (always `0` for a time).
/// A generic `Number` target yields a `Long` for dates and a `Double` for
/// kinds that carry a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToSerial {
    kind: TemporalKind,
}

impl ToSerial {
    pub const fn new(kind: TemporalKind) -> Self {
        Self { kind }
    }

    pub const fn kind(&self) -> TemporalKind {
        self.kind
    }
}

impl fmt::Display for ToSerial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->Number", self.kind)
    }
}

impl Convert for ToSerial {
    fn can_convert(&self, value: &Value, target: &Shape, _: &ConversionContext) -> bool {
        target.is_numeric() && (value.is_null() || value.temporal_kind() == Some(self.kind))
    }

    fn convert(&self, value: &Value, target: &Shape, ctx: &ConversionContext) -> ConversionResult {
        if !target.is_numeric() || !(value.is_null() || value.temporal_kind() == Some(self.kind)) {
            return Err(Failure::cannot_convert(value, target));
        }
        if value.is_null() {
            return Ok(Value::Null);
        }
        let serial = Serial::of(value, ctx)
            .ok_or_else(|| Failure::with_cause(value, target, "serial out of range"))?;

        let intermediate = match (self.kind, target.numeric_kind()) {
            (TemporalKind::Date, _) => Value::Long(serial.days),
            (_, Some(kind)) if kind.is_integral() => Value::Long(serial.days),
            (_, Some(NumericKind::Decimal)) => Value::Decimal(serial.as_decimal()),
            _ => Value::Double(serial.as_f64()),
        };
        to_target(&intermediate, value, target)
    }
}

// ============================================================================
// NUMBER → TEMPORAL
// ============================================================================

/// Serial number → date, time or date-time.
///
/// Dates require a whole number of days. Times accept `[0, 1]`, where `1`
/// is the following midnight and wraps to `00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FromSerial {
    kind: TemporalKind,
}

impl FromSerial {
    pub const fn new(kind: TemporalKind) -> Self {
        Self { kind }
    }

    pub const fn kind(&self) -> TemporalKind {
        self.kind
    }

    fn target_matches(&self, target: &Shape) -> bool {
        target.temporal_kind() == Some(self.kind)
    }

    fn decode(&self, serial: Decimal, ctx: &ConversionContext) -> Result<Value, &'static str> {
        let offset = ctx.date_offset();
        match self.kind {
            TemporalKind::Date => {
                if !serial.fract().is_zero() {
                    return Err("fractional days cannot be represented as a date");
                }
                serial
                    .to_i64()
                    .and_then(|days| days.checked_add(offset))
                    .and_then(date_from_epoch_day)
                    .map(Value::Date)
                    .ok_or("serial out of range for Date")
            }
            TemporalKind::DateTime => {
                let (days, millis) = split_serial(serial).ok_or("serial out of range for DateTime")?;
                let date = days
                    .checked_add(offset)
                    .and_then(date_from_epoch_day)
                    .ok_or("serial out of range for DateTime")?;
                let time = time_from_millis(millis).ok_or("serial out of range for DateTime")?;
                Ok(Value::DateTime(date.and_time(time)))
            }
            TemporalKind::Time => {
                if serial.is_sign_negative() && !serial.is_zero() {
                    return Err("time serial must not be negative");
                }
                let (days, millis) = split_serial(serial).ok_or("not within a single day")?;
                match (days, millis) {
                    (0, ms) | (1, ms @ 0) => time_from_millis(ms)
                        .map(Value::Time)
                        .ok_or("not within a single day"),
                    _ => Err("not within a single day"),
                }
            }
        }
    }
}

impl fmt::Display for FromSerial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number->{}", self.kind)
    }
}

impl Convert for FromSerial {
    fn can_convert(&self, value: &Value, target: &Shape, _: &ConversionContext) -> bool {
        self.target_matches(target) && (value.is_null() || value.is_numeric())
    }

    fn convert(&self, value: &Value, target: &Shape, ctx: &ConversionContext) -> ConversionResult {
        if !self.target_matches(target) {
            return Err(Failure::cannot_convert(value, target));
        }
        if value.is_null() {
            return Ok(Value::Null);
        }
        let serial =
            numeric::to_decimal(value).map_err(|cause| Failure::with_cause(value, target, cause))?;
        self.decode(serial, ctx)
            .map_err(|cause| Failure::with_cause(value, target, cause))
    }
}

// ============================================================================
// TEMPORAL → TEMPORAL
// ============================================================================

/// Conversions among the temporal shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retemporal {
    /// Places the time on the Unix epoch date, 1970-01-01.
    TimeToDateTime,
    /// Keeps the time of day.
    DateTimeToTime,
    /// Midnight at the start of the date.
    DateToDateTime,
    /// Keeps the calendar date.
    DateTimeToDate,
}

impl Retemporal {
    pub const ALL: [Self; 4] = [
        Self::TimeToDateTime,
        Self::DateTimeToTime,
        Self::DateToDateTime,
        Self::DateTimeToDate,
    ];

    pub const fn source_kind(self) -> TemporalKind {
        match self {
            Self::TimeToDateTime => TemporalKind::Time,
            Self::DateToDateTime => TemporalKind::Date,
            Self::DateTimeToTime | Self::DateTimeToDate => TemporalKind::DateTime,
        }
    }

    pub const fn target_kind(self) -> TemporalKind {
        match self {
            Self::TimeToDateTime | Self::DateToDateTime => TemporalKind::DateTime,
            Self::DateTimeToTime => TemporalKind::Time,
            Self::DateTimeToDate => TemporalKind::Date,
        }
    }

    fn applies(self, value: &Value, target: &Shape) -> bool {
        target.temporal_kind() == Some(self.target_kind())
            && (value.is_null() || value.temporal_kind() == Some(self.source_kind()))
    }
}

impl fmt::Display for Retemporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source_kind(), self.target_kind())
    }
}

impl Convert for Retemporal {
    fn can_convert(&self, value: &Value, target: &Shape, _: &ConversionContext) -> bool {
        self.applies(value, target)
    }

    fn convert(&self, value: &Value, target: &Shape, _: &ConversionContext) -> ConversionResult {
        if !self.applies(value, target) {
            return Err(Failure::cannot_convert(value, target));
        }
        let converted = match (self, value) {
            (_, Value::Null) => Value::Null,
            (Self::TimeToDateTime, Value::Time(time)) => {
                Value::DateTime(NaiveDateTime::new(unix_epoch(), *time))
            }
            (Self::DateTimeToTime, Value::DateTime(dt)) => Value::Time(dt.time()),
            (Self::DateToDateTime, Value::Date(date)) => {
                Value::DateTime(date.and_time(NaiveTime::MIN))
            }
            (Self::DateTimeToDate, Value::DateTime(dt)) => Value::Date(dt.date()),
            _ => return Err(Failure::cannot_convert(value, target)),
        };
        Ok(converted)
    }
}
