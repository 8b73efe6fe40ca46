// src/export/excel_date.rs

use chrono::{NaiveDate, NaiveDateTime};

/// Recognizes the `DD/MM/YYYY HH:MM` strings written by the attendance
/// export and returns the Excel serial plus its number format.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%d/%m/%Y %H:%M") {
        return Some(("dd/mm/yyyy hh:mm", naive_datetime_to_excel_serial(&dt)?));
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%d/%m/%Y") {
        let dt = d.and_hms_opt(0, 0, 0)?;
        return Some(("dd/mm/yyyy", naive_datetime_to_excel_serial(&dt)?));
    }

    None
}

fn naive_datetime_to_excel_serial(dt: &NaiveDateTime) -> Option<f64> {
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;

    let duration = *dt - excel_epoch;

    let days = duration.num_days() as f64;
    let secs = (duration.num_seconds() - duration.num_days() * 86400) as f64;

    Some(days + secs / 86400.0)
}
