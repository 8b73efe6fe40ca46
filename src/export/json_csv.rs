// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{attendance_to_row, get_headers};
use crate::export::{AttendanceExport, notify_export_success};
use crate::ui::messages::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub(crate) fn export_json(rows: &[AttendanceExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting attendance to JSON: {}", path.display()));

    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, rows)?;
    out.write_all(b"\n")?;
    out.flush()?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Header row comes from the same list the XLSX and PDF tables use.
pub(crate) fn export_csv(rows: &[AttendanceExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting attendance to CSV: {}", path.display()));

    let csv_err = |stage: &str, e: csv::Error| AppError::Export(format!("CSV {stage} error: {e}"));

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| csv_err("open", e))?;

    wtr.write_record(get_headers())
        .map_err(|e| csv_err("write", e))?;
    for row in rows {
        wtr.write_record(attendance_to_row(row))
            .map_err(|e| csv_err("write", e))?;
    }

    wtr.flush()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;

    notify_export_success("CSV", path);
    Ok(())
}
