//! Request body validation.
//!
//! Payload fields arrive as raw JSON values. A [`Validator`] checks each one,
//! collects every violation, and only then lets the handler build its input.

use std::str::FromStr;

use axum::extract::FromRequest;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use fintrack_core::errors::{FieldViolation, ValidationError};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// `axum::Json` with rejections rendered as API errors.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

#[derive(Default)]
pub struct Validator {
    violations: Vec<FieldViolation>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn reject<T>(&mut self, field: &str, message: &str) -> Option<T> {
        self.violations.push(FieldViolation::new(field, message));
        None
    }

    /// A string with at least `min_chars` characters once trimmed. Returns the trimmed value.
    pub fn text(
        &mut self,
        field: &str,
        value: Option<&Value>,
        min_chars: usize,
        message: &str,
    ) -> Option<String> {
        match value.and_then(Value::as_str).map(str::trim) {
            Some(s) if s.chars().count() >= min_chars => Some(s.to_string()),
            _ => self.reject(field, message),
        }
    }

    /// A string of at least `min_chars` characters, kept verbatim.
    pub fn secret(
        &mut self,
        field: &str,
        value: Option<&Value>,
        min_chars: usize,
        message: &str,
    ) -> Option<String> {
        match value.and_then(Value::as_str) {
            Some(s) if s.chars().count() >= min_chars.max(1) => Some(s.to_string()),
            _ => self.reject(field, message),
        }
    }

    pub fn email(&mut self, field: &str, value: Option<&Value>, message: &str) -> Option<String> {
        match value.and_then(Value::as_str) {
            Some(s) if is_email(s) => Some(s.to_string()),
            _ => self.reject(field, message),
        }
    }

    /// A number or numeric string, optionally bounded below.
    pub fn decimal(
        &mut self,
        field: &str,
        value: Option<&Value>,
        min: Option<Decimal>,
        message: &str,
    ) -> Option<Decimal> {
        match value.and_then(to_decimal) {
            Some(d) if min.is_none_or(|min| d >= min) => Some(d),
            _ => self.reject(field, message),
        }
    }

    /// A string accepted by `T::from_str`.
    pub fn choice<T: FromStr>(
        &mut self,
        field: &str,
        value: Option<&Value>,
        message: &str,
    ) -> Option<T> {
        match value.and_then(Value::as_str).map(T::from_str) {
            Some(Ok(parsed)) => Some(parsed),
            _ => self.reject(field, message),
        }
    }

    /// An ISO-8601 date or date-time; only the date part is kept.
    pub fn date(&mut self, field: &str, value: Option<&Value>, message: &str) -> Option<NaiveDate> {
        match value.and_then(Value::as_str).and_then(parse_date) {
            Some(date) => Some(date),
            None => self.reject(field, message),
        }
    }

    /// Fails with every collected violation, otherwise builds the value.
    ///
    /// `build` only sees `None` for fields that were rejected, so it always
    /// succeeds when no violation was recorded.
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> ApiResult<T> {
        if !self.violations.is_empty() {
            return Err(ValidationError::Fields(self.violations).into());
        }
        build().ok_or_else(|| ApiError::Internal("Validated input was incomplete".to_string()))
    }
}

fn to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_numeric(&n.to_string()),
        Value::String(s) => parse_numeric(s.trim()),
        _ => None,
    }
}

/// Plain or exponent notation. Numbers and numeric strings share this path,
/// so an exponent outside the decimal range is rejected in either form.
fn parse_numeric(text: &str) -> Option<Decimal> {
    if !is_float_literal(text) {
        return None;
    }
    if text.contains(['e', 'E']) {
        Decimal::from_scientific(text).ok()
    } else {
        Decimal::from_str(text).ok()
    }
}

/// `[+-]digits[.digits][e[+-]digits]`, where the integer part may be empty
/// when a fraction follows.
fn is_float_literal(text: &str) -> bool {
    fn digits(s: &str) -> usize {
        s.bytes().take_while(u8::is_ascii_digit).count()
    }

    let rest = text.strip_prefix(['+', '-']).unwrap_or(text);
    let int_len = digits(rest);
    let mut rest = &rest[int_len..];
    let mut frac_len = 0;
    if let Some(after_dot) = rest.strip_prefix('.') {
        frac_len = digits(after_dot);
        if frac_len == 0 {
            return false;
        }
        rest = &after_dot[frac_len..];
    }
    if int_len == 0 && frac_len == 0 {
        return false;
    }
    match rest.strip_prefix(['e', 'E']) {
        None => rest.is_empty(),
        Some(exp) => {
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            let exp_len = digits(exp);
            exp_len > 0 && exp_len == exp.len()
        }
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

fn is_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, _)| !host.is_empty())
        && !domain.ends_with('.')
        && !domain.contains("..")
}

/// Positive database ids only; anything else cannot match a row.
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}
