//! Backend timestamp parsing and event status derivation.
//!
//! The backend sends dates either as ISO-8601 or as a legacy
//! `DD/MM/YYYY HH:mm:ss` string expressed in UTC. Both are normalized into
//! the configured local offset. Parse failures yield `None`, never a panic.

use crate::models::event::EventStatus;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// Offset applied to legacy timestamps when the configuration says nothing.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = -5;

/// Label shown wherever a date could not be parsed.
pub const DATE_UNAVAILABLE: &str = "Fecha no disponible";

const FORM_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";
const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";

pub fn offset_from_hours(hours: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(hours.checked_mul(3600)?)
}

pub fn default_offset() -> FixedOffset {
    FixedOffset::west_opt(5 * 3600).unwrap_or_else(|| Utc.fix())
}

pub fn now_in(offset: FixedOffset) -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&offset)
}

pub fn today_in(offset: FixedOffset) -> NaiveDate {
    now_in(offset).date_naive()
}

/// Parses a backend timestamp in either supported format.
pub fn parse_backend_date(input: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if s.contains('T') || s.contains('Z') {
        parse_iso(s, offset)
    } else {
        parse_legacy(s, offset)
    }
}

fn parse_iso(s: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&offset));
    }

    // Offset-less ISO: already local.
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .and_then(|naive| offset.from_local_datetime(&naive).single())
}

/// `DD/MM/YYYY HH:mm[:ss]`, interpreted as UTC.
fn parse_legacy(s: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let mut parts = s.split_whitespace();
    let date_part = parts.next()?;
    let time_part = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let dmy: Vec<&str> = date_part.split('/').collect();
    let hms: Vec<&str> = time_part.split(':').collect();
    if dmy.len() != 3 || !(2..=3).contains(&hms.len()) {
        return None;
    }

    let day: u32 = dmy[0].parse().ok()?;
    let month: u32 = dmy[1].parse().ok()?;
    let year: i32 = dmy[2].parse().ok()?;
    let hour: u32 = hms[0].parse().ok()?;
    let minute: u32 = hms[1].parse().ok()?;
    let second: u32 = match hms.get(2) {
        Some(v) => v.parse().ok()?,
        None => 0,
    };

    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
    Some(Utc.from_utc_datetime(&naive).with_timezone(&offset))
}

/// Like [`parse_backend_date`], but falls back to `now` when the input does
/// not parse. The result then depends on the caller's clock.
pub fn parse_or_now(
    input: &str,
    offset: FixedOffset,
    now: DateTime<FixedOffset>,
) -> DateTime<FixedOffset> {
    parse_backend_date(input, offset).unwrap_or(now)
}

/// Parses the `YYYY-MM-DDTHH:MM` value of a datetime form input.
pub fn parse_form_input(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, FORM_INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .ok()
}

/// Converts a form input value into the RFC 3339 string sent to the backend.
pub fn form_input_to_backend(s: &str, offset: FixedOffset) -> Option<String> {
    let naive = parse_form_input(s)?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.to_rfc3339())
}

pub fn to_form_input(dt: &DateTime<FixedOffset>) -> String {
    dt.format(FORM_INPUT_FORMAT).to_string()
}

/// Backend timestamp → form input value, empty when unparseable.
pub fn backend_to_form_input(input: Option<&str>, offset: FixedOffset) -> String {
    input
        .and_then(|s| parse_backend_date(s, offset))
        .map(|dt| to_form_input(&dt))
        .unwrap_or_default()
}

pub fn format_display(dt: &DateTime<FixedOffset>) -> String {
    dt.format(DISPLAY_FORMAT).to_string()
}

/// Display string for an optional backend timestamp.
pub fn display_or_fallback(input: Option<&str>, offset: FixedOffset) -> String {
    input
        .and_then(|s| parse_backend_date(s, offset))
        .map(|dt| format_display(&dt))
        .unwrap_or_else(|| DATE_UNAVAILABLE.to_string())
}

const COMPLETED_KEYWORDS: &[&str] = &["complet", "finaliz", "terminad", "finished", "closed"];
const CONFIRMED_KEYWORDS: &[&str] = &[
    "confirm",
    "activo",
    "en curso",
    "en progreso",
    "in progress",
    "ongoing",
];
const UPCOMING_KEYWORDS: &[&str] = &[
    "upcoming",
    "próxim",
    "proxim",
    "pendiente",
    "programad",
    "scheduled",
];

/// Keywords only count at the start of a word, so "inactivo" or
/// "unconfirmed" do not read as their positive forms.
fn keyword_regex(stems: &[&str]) -> Option<Regex> {
    let alternatives: Vec<String> = stems.iter().map(|s| regex::escape(s)).collect();
    Regex::new(&format!(r"\b(?:{})", alternatives.join("|"))).ok()
}

static COMPLETED: LazyLock<Option<Regex>> = LazyLock::new(|| keyword_regex(COMPLETED_KEYWORDS));
static CONFIRMED: LazyLock<Option<Regex>> = LazyLock::new(|| keyword_regex(CONFIRMED_KEYWORDS));
static UPCOMING: LazyLock<Option<Regex>> = LazyLock::new(|| keyword_regex(UPCOMING_KEYWORDS));
static NEGATION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(?:no|not|sin|non)\b").ok());

/// Maps a free-form backend status string onto [`EventStatus`]. Negated
/// statuses ("no confirmado") are not recognized.
pub fn status_from_backend(status: &str) -> Option<EventStatus> {
    let s = status.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }

    let hit = |re: &Option<Regex>| re.as_ref().is_some_and(|r| r.is_match(&s));

    if hit(&*NEGATION) {
        None
    } else if hit(&*COMPLETED) {
        Some(EventStatus::Completed)
    } else if hit(&*CONFIRMED) {
        Some(EventStatus::Confirmed)
    } else if hit(&*UPCOMING) {
        Some(EventStatus::Upcoming)
    } else {
        None
    }
}

/// Day-granularity comparison against `today`. Unknown dates count as
/// upcoming.
pub fn status_from_date(date: Option<&DateTime<FixedOffset>>, today: NaiveDate) -> EventStatus {
    match date.map(|d| d.date_naive()) {
        Some(day) if day > today => EventStatus::Upcoming,
        Some(day) if day == today => EventStatus::Confirmed,
        Some(_) => EventStatus::Completed,
        None => EventStatus::Upcoming,
    }
}

/// Backend status wins when it is recognized; otherwise the start date
/// decides.
pub fn event_status(
    backend_status: Option<&str>,
    start_date: Option<&str>,
    offset: FixedOffset,
    today: NaiveDate,
) -> EventStatus {
    if let Some(status) = backend_status.and_then(status_from_backend) {
        return status;
    }

    let start = start_date.and_then(|s| parse_backend_date(s, offset));
    status_from_date(start.as_ref(), today)
}
