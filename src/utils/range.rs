//! `--range` parsing shared by event listings and metrics filters.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

/// Parse a period into inclusive date bounds.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    let (start, end) = match r.split_once(':') {
        Some((s, e)) => {
            let (s, e) = (s.trim(), e.trim());
            if s.len() != e.len() {
                return Err(invalid(r, "start and end must have same format"));
            }
            (period_bounds(s)?.0, period_bounds(e)?.1)
        }
        None => period_bounds(r)?,
    };

    if start > end {
        return Err(invalid(r, "start is after end"));
    }
    Ok((start, end))
}

fn invalid(input: &str, why: &str) -> AppError {
    AppError::InvalidRange(format!("{input}: {why}"))
}

/// First and last day covered by a single year, month or day.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match p.len() {
        4 => {
            let year: i32 = p.parse().map_err(|_| invalid(p, "invalid year"))?;
            let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| invalid(p, "invalid year"))?;
            let last = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(|| invalid(p, "invalid year"))?;
            Ok((first, last))
        }
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| invalid(p, "invalid month"))?;
            Ok((first, last_day_of_month(first)))
        }
        10 => {
            let day = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| invalid(p, "invalid date"))?;
            Ok((day, day))
        }
        _ => Err(invalid(p, "unsupported range format")),
    }
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(first)
}
