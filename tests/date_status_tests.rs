use campusctl::models::event::EventStatus;
use campusctl::utils::date::{
    DATE_UNAVAILABLE, backend_to_form_input, display_or_fallback, event_status,
    form_input_to_backend, offset_from_hours, parse_backend_date, parse_or_now,
};
use chrono::{FixedOffset, NaiveDate, TimeZone, Timelike};

fn bogota() -> FixedOffset {
    offset_from_hours(-5).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn legacy_format_is_utc_shifted_to_local() {
    let dt = parse_backend_date("15/03/2025 14:30:00", bogota()).unwrap();
    assert_eq!(dt.hour(), 9);
    assert_eq!(dt.minute(), 30);
    assert_eq!(dt.date_naive(), day(2025, 3, 15));
}

#[test]
fn legacy_early_morning_rolls_back_a_day() {
    let dt = parse_backend_date("01/01/2025 02:00", bogota()).unwrap();
    assert_eq!(dt.date_naive(), day(2024, 12, 31));
    assert_eq!(dt.hour(), 21);
}

#[test]
fn iso_with_zone_is_honoured() {
    let dt = parse_backend_date("2025-03-15T14:30:00Z", bogota()).unwrap();
    assert_eq!(dt.hour(), 9);

    let same = parse_backend_date("2025-03-15T09:30:00-05:00", bogota()).unwrap();
    assert_eq!(dt, same);
}

#[test]
fn garbage_yields_none_and_fallbacks() {
    assert!(parse_backend_date("not a date", bogota()).is_none());
    assert!(parse_backend_date("32/01/2025 10:00", bogota()).is_none());
    assert!(parse_backend_date("", bogota()).is_none());

    assert_eq!(display_or_fallback(Some("nope"), bogota()), DATE_UNAVAILABLE);
    assert_eq!(display_or_fallback(None, bogota()), DATE_UNAVAILABLE);
    assert_eq!(backend_to_form_input(Some("nope"), bogota()), "");

    let now = bogota().with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
    assert_eq!(parse_or_now("nope", bogota(), now), now);
}

#[test]
fn form_input_round_trip() {
    let wire = form_input_to_backend("2025-05-10T08:15", bogota()).unwrap();
    assert_eq!(wire, "2025-05-10T08:15:00-05:00");
    assert_eq!(
        backend_to_form_input(Some(&wire), bogota()),
        "2025-05-10T08:15"
    );

    // Legacy values come back in local time.
    assert_eq!(
        backend_to_form_input(Some("10/05/2025 13:15:00"), bogota()),
        "2025-05-10T08:15"
    );
}

#[test]
fn status_from_date_alone() {
    let today = day(2025, 3, 15);
    let s = |d: &str| event_status(None, Some(d), bogota(), today);

    assert_eq!(s("16/03/2025 15:00:00"), EventStatus::Upcoming);
    assert_eq!(s("15/03/2025 15:00:00"), EventStatus::Confirmed);
    assert_eq!(s("14/03/2025 15:00:00"), EventStatus::Completed);
    // 02:00 UTC on the 16th is still the 15th locally.
    assert_eq!(s("16/03/2025 02:00:00"), EventStatus::Confirmed);
}

#[test]
fn unknown_date_counts_as_upcoming() {
    let today = day(2025, 3, 15);
    assert_eq!(
        event_status(None, Some("whenever"), bogota(), today),
        EventStatus::Upcoming
    );
    assert_eq!(event_status(None, None, bogota(), today), EventStatus::Upcoming);
}

#[test]
fn backend_status_keywords_win() {
    let today = day(2025, 3, 15);
    let past = Some("01/01/2020 10:00:00");

    assert_eq!(
        event_status(Some("Programado"), past, bogota(), today),
        EventStatus::Upcoming
    );
    assert_eq!(
        event_status(Some("CONFIRMADO"), past, bogota(), today),
        EventStatus::Confirmed
    );
    assert_eq!(
        event_status(Some("en curso"), past, bogota(), today),
        EventStatus::Confirmed
    );
    assert_eq!(
        event_status(Some("Finalizado"), Some("01/01/2030 10:00:00"), bogota(), today),
        EventStatus::Completed
    );
    // Unrecognized keyword falls back to the date.
    assert_eq!(
        event_status(Some("borrador"), past, bogota(), today),
        EventStatus::Completed
    );
}

#[test]
fn completado_wins_over_a_future_date() {
    let today = day(2025, 3, 15);
    let tomorrow = Some("2025-03-16T10:00:00-05:00");
    assert_eq!(
        event_status(Some("Completado"), tomorrow, bogota(), today),
        EventStatus::Completed
    );
    assert_eq!(
        event_status(None, tomorrow, bogota(), today),
        EventStatus::Upcoming
    );
}

#[test]
fn negated_status_falls_back_to_the_date() {
    let today = day(2025, 3, 15);
    let past = Some("01/01/2020 10:00:00");
    let future = Some("2026-01-01T10:00:00-05:00");

    assert_eq!(
        event_status(Some("Inactivo"), past, bogota(), today),
        EventStatus::Completed
    );
    assert_eq!(
        event_status(Some("no confirmado"), future, bogota(), today),
        EventStatus::Upcoming
    );
    assert_eq!(
        event_status(Some("unconfirmed"), future, bogota(), today),
        EventStatus::Upcoming
    );
}
