// src/export/logic.rs

use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::AttendanceExport;
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use crate::models::attendance::AttendanceRecord;
use crate::ui::messages::warning;
use crate::utils::date::{format_display, now_in};
use chrono::FixedOffset;
use std::path::Path;
use tracing::debug;

/// High-level attendance export.
pub struct ExportLogic;

impl ExportLogic {
    /// Writes the attendance list of one event.
    ///
    /// - `format`: csv | json | xlsx | pdf
    /// - `file`: absolute output path
    /// - `event_title`: used for the PDF/XLSX heading
    ///
    /// An empty list writes nothing and only warns. Returns whether a file
    /// was produced.
    pub fn export_attendance(
        records: &[AttendanceRecord],
        event_title: &str,
        format: ExportFormat,
        file: &str,
        force: bool,
        offset: FixedOffset,
    ) -> AppResult<bool> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        if records.is_empty() {
            warning("No attendance records for this event; nothing exported.");
            return Ok(false);
        }

        ensure_writable(path, force)?;

        let rows: Vec<AttendanceExport> = records
            .iter()
            .map(|r| AttendanceExport::from_record(r, offset))
            .collect();
        debug!(format = format.as_str(), rows = rows.len(), "exporting attendance");

        let title = build_title(event_title);

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, path, &title)?,
            ExportFormat::Pdf => {
                let subtitle = format!(
                    "Generado el {} - {} asistentes",
                    format_display(&now_in(offset)),
                    rows.len()
                );
                export_pdf(&rows, path, &title, &subtitle)?
            }
        }

        Ok(true)
    }
}

fn build_title(event_title: &str) -> String {
    let t = event_title.trim();
    if t.is_empty() {
        "Lista de asistencia".to_string()
    } else {
        format!("Lista de asistencia - {t}")
    }
}
