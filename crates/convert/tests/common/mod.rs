//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::sync::Once;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use nebula_convert::prelude::*;

static TRACING: Once = Once::new();

/// Installs a test subscriber honoring `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn ctx() -> ConversionContext {
    ConversionContext::default()
}

pub fn ctx_1900() -> ConversionContext {
    ConversionContext::builder()
        .date_offset(ConversionContext::DATE_OFFSET_1900)
        .build()
        .expect("valid context")
}

pub fn kind(kind: NumericKind) -> Shape {
    Shape::Numeric(kind)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn time(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).expect("valid time")
}

pub fn datetime(d: NaiveDate, t: NaiveTime) -> NaiveDateTime {
    d.and_time(t)
}
