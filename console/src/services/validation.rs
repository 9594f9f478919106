//! Client-side form validation
//!
//! Every check runs before a request is built; a form with any issue never
//! reaches the gateway.

use crate::config::{REGISTRATION_CODE_DIGITS, REGISTRATION_CODE_PREFIX};
use crate::error::ValidationError;
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;

static REGISTRATION_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "^{}[0-9]{{{}}}$",
        REGISTRATION_CODE_PREFIX, REGISTRATION_CODE_DIGITS
    ))
    .expect("valid regex")
});

/// Record an issue when `value` is missing or blank
pub fn require(errors: &mut ValidationError, field: &'static str, value: Option<&str>) {
    if value.map(str::trim).unwrap_or("").is_empty() {
        errors.push(field, format!("O campo {} é obrigatório", field));
    }
}

/// Record an issue when `value` is longer than `max` characters
pub fn max_len(errors: &mut ValidationError, field: &'static str, value: Option<&str>, max: usize) {
    if let Some(v) = value {
        if v.chars().count() > max {
            errors.push(
                field,
                format!("O campo {} deve ter no máximo {} caracteres", field, max),
            );
        }
    }
}

/// Trim, and map blank input to `None`
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Uppercase a registration code as typed; surrounding spaces are kept
pub fn normalize_registration_code(raw: &str) -> String {
    raw.to_uppercase()
}

/// `T` followed by exactly seven ASCII digits
pub fn is_valid_registration_code(code: &str) -> bool {
    REGISTRATION_CODE.is_match(code)
}

/// Normalize then check a registration code, recording a format issue
pub fn registration_code(errors: &mut ValidationError, raw: &str) -> String {
    let code = normalize_registration_code(raw);
    if !is_valid_registration_code(&code) {
        errors.push(
            "matricula",
            "Matrícula deve começar com T seguido de 7 dígitos",
        );
    }
    code
}

/// Record an issue unless `ts` is strictly after `now`
pub fn in_future(errors: &mut ValidationError, field: &'static str, ts: NaiveDateTime, now: NaiveDateTime) {
    if ts <= now {
        errors.push(field, "A data/hora do lembrete deve ser no futuro");
    }
}
