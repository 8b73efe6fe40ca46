// src/export/pdf_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{attendance_to_table, get_headers};
use crate::export::pdf::PdfManager;
use crate::export::{AttendanceExport, notify_export_success};
use crate::ui::messages::info;
use std::path::Path;

pub(crate) fn export_pdf(
    rows: &[AttendanceExport],
    path: &Path,
    title: &str,
    subtitle: &str,
) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let headers = get_headers();
    let table = attendance_to_table(rows);
    let total = format!("Total asistentes: {}", rows.len());

    let mut pdf = PdfManager::default();
    pdf.write_report(title, subtitle, &headers, &table, Some(&total));

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
