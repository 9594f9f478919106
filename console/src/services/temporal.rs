//! Temporal classification of reminders
//!
//! Pure functions comparing trigger timestamps against a caller-supplied
//! "now". Timestamps are local wall-clock values, matching what the backend
//! sends. A missing or unparseable timestamp is never overdue nor upcoming.

use crate::config::UPCOMING_WINDOW_HOURS;
use crate::gateway::Reminder;
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, Timelike};
use std::cmp::Ordering;

/// Form field representation, truncated to the minute
const FORM_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Derived display status of a reminder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReminderStatus {
    Inactive,
    Overdue,
    Upcoming,
    Active,
}

impl ReminderStatus {
    pub fn label(self) -> &'static str {
        match self {
            ReminderStatus::Inactive => "Inativo",
            ReminderStatus::Overdue => "Atrasado",
            ReminderStatus::Upcoming => "Próximo",
            ReminderStatus::Active => "Ativo",
        }
    }
}

/// Current local wall-clock time
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Parse a backend or user supplied timestamp.
///
/// Accepts `YYYY-MM-DDTHH:MM:SS[.fff]`, `YYYY-MM-DDTHH:MM`, RFC 3339 with an
/// offset (converted to local time) and bare dates (midnight).
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts);
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, FORM_FORMAT) {
        return Some(ts);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Local).naive_local());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// True iff `ts` is strictly before `now`
pub fn is_overdue(ts: NaiveDateTime, now: NaiveDateTime) -> bool {
    ts < now
}

/// True iff `0 < ts - now <= 24h`
pub fn is_upcoming(ts: NaiveDateTime, now: NaiveDateTime) -> bool {
    let diff = ts - now;
    diff > Duration::zero() && diff <= Duration::hours(UPCOMING_WINDOW_HOURS)
}

/// Parsed trigger time, if the reminder has a usable one
pub fn trigger_time(reminder: &Reminder) -> Option<NaiveDateTime> {
    reminder.trigger_at.as_deref().and_then(parse_timestamp)
}

/// Inactive wins over any timing; then overdue, then upcoming.
pub fn classify(reminder: &Reminder, now: NaiveDateTime) -> ReminderStatus {
    if !reminder.active {
        return ReminderStatus::Inactive;
    }

    match trigger_time(reminder) {
        Some(ts) if is_overdue(ts, now) => ReminderStatus::Overdue,
        Some(ts) if is_upcoming(ts, now) => ReminderStatus::Upcoming,
        _ => ReminderStatus::Active,
    }
}

/// Earliest trigger first; reminders without a usable trigger go last.
pub fn compare_by_trigger(a: &Reminder, b: &Reminder) -> Ordering {
    match (trigger_time(a), trigger_time(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Drop seconds and sub-seconds
pub fn truncate_to_minute(ts: NaiveDateTime) -> NaiveDateTime {
    ts.date()
        .and_hms_opt(ts.hour(), ts.minute(), 0)
        .unwrap_or(ts)
}

/// Render for a date-time form field
pub fn to_form_value(ts: NaiveDateTime) -> String {
    truncate_to_minute(ts).format(FORM_FORMAT).to_string()
}

/// Read a date-time form field back; any accepted timestamp form works
pub fn parse_form_value(value: &str) -> Option<NaiveDateTime> {
    parse_timestamp(value).map(truncate_to_minute)
}

/// Default trigger offered by a new reminder form: one hour from now
pub fn default_trigger(now: NaiveDateTime) -> NaiveDateTime {
    truncate_to_minute(now + Duration::hours(1))
}

/// `dd/mm/yyyy HH:MM`, or `-` when missing or malformed
pub fn format_date_time(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .map(|ts| ts.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// `dd/mm/yyyy`, or `-` when missing or malformed
pub fn format_date(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .map(|ts| ts.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}
