use crate::cli::parser::AttendanceCommand;
use crate::context::AppContext;
use crate::errors::AppResult;
use crate::export::{AttendanceExport, ExportFormat, ExportLogic};
use crate::services::attendance::matches_search;
use crate::ui::messages::{info, warning};
use crate::utils::colors::colorize_optional;
use crate::utils::table::{Column, Table};
use std::path::Path;

pub async fn handle(cmd: &AttendanceCommand, ctx: &AppContext) -> AppResult<()> {
    match cmd {
        AttendanceCommand::List { event_id, search } => {
            let records = ctx.attendance().list(event_id).await?;
            let term = search.as_deref().unwrap_or("");
            let rows: Vec<AttendanceExport> = records
                .iter()
                .filter(|r| matches_search(r, term))
                .map(|r| AttendanceExport::from_record(r, ctx.offset))
                .collect();

            if rows.is_empty() {
                warning("No attendance records.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("Nombre", 28),
                Column::new("Identificación", 16),
                Column::new("Entrada", 16),
                Column::new("Salida", 16),
            ]);
            for r in &rows {
                table.add_row(vec![
                    format!("{} {}", r.first_name, r.last_name),
                    colorize_optional(&r.id_number),
                    colorize_optional(&r.check_in),
                    colorize_optional(&r.check_out),
                ]);
            }
            print!("{}", table.render());
            info(format!("Total asistentes: {}", rows.len()));
            Ok(())
        }
        AttendanceCommand::Export {
            event_id,
            format,
            file,
            force,
        } => {
            let format = format
                .or_else(|| ExportFormat::from_path(Path::new(file)))
                .unwrap_or(ExportFormat::Csv);

            // The title is cosmetic; a failed lookup must not block the export.
            let title = match ctx.events().get(event_id).await {
                Ok(ev) => ev.title,
                Err(e) => {
                    tracing::warn!(error = %e, event_id, "event title lookup failed");
                    String::new()
                }
            };

            let records = ctx.attendance().list(event_id).await?;
            ExportLogic::export_attendance(&records, &title, format, file, *force, ctx.offset)?;
            Ok(())
        }
    }
}
