// src/export/model.rs

use crate::models::attendance::AttendanceRecord;
use crate::utils::date::{DATE_UNAVAILABLE, format_display, parse_backend_date};
use chrono::FixedOffset;
use serde::Serialize;

/// Flat attendance row shared by every export format.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct AttendanceExport {
    #[serde(rename = "Nombre")]
    pub first_name: String,
    #[serde(rename = "Apellido")]
    pub last_name: String,
    #[serde(rename = "Identificación")]
    pub id_number: String,
    #[serde(rename = "Entrada")]
    pub check_in: String,
    #[serde(rename = "Salida")]
    pub check_out: String,
}

impl AttendanceExport {
    /// Timestamps are rendered as `DD/MM/YYYY HH:MM` in the given offset.
    /// A missing check-in shows the unavailable placeholder, a missing
    /// check-out stays empty.
    pub fn from_record(record: &AttendanceRecord, offset: FixedOffset) -> Self {
        let render = |raw: Option<&str>| {
            raw.and_then(|s| parse_backend_date(s, offset))
                .map(|d| format_display(&d))
        };

        Self {
            first_name: record.first_name.trim().to_string(),
            last_name: record.last_name.trim().to_string(),
            id_number: record.id_number.clone().unwrap_or_default(),
            check_in: render(record.check_in.as_deref())
                .unwrap_or_else(|| DATE_UNAVAILABLE.to_string()),
            check_out: render(record.check_out.as_deref()).unwrap_or_default(),
        }
    }
}

pub(crate) fn get_headers() -> Vec<&'static str> {
    vec!["Nombre", "Apellido", "Identificación", "Entrada", "Salida"]
}

pub(crate) fn attendance_to_row(a: &AttendanceExport) -> Vec<String> {
    vec![
        a.first_name.clone(),
        a.last_name.clone(),
        a.id_number.clone(),
        a.check_in.clone(),
        a.check_out.clone(),
    ]
}

pub(crate) fn attendance_to_table(rows: &[AttendanceExport]) -> Vec<Vec<String>> {
    rows.iter().map(attendance_to_row).collect()
}
