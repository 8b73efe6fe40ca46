use crate::cli::parser::{MetricsArgs, MetricsCommand};
use crate::context::AppContext;
use crate::errors::AppResult;
use crate::models::metrics::{MetricsFilter, NamedCount};
use crate::ui::messages::{header, warning};
use crate::utils::table::{Column, Table};

pub async fn handle(cmd: &MetricsCommand, ctx: &AppContext) -> AppResult<()> {
    match cmd {
        MetricsCommand::Summary(args) => {
            let summary = ctx.metrics().summary(&filter(args)?).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }

            header("Resumen");
            println!("Eventos             : {}", summary.total_events);
            println!("Asistencias         : {}", summary.total_attendances);
            println!("Promedio por evento : {:.1}", summary.average_attendance);
            print_counts("Por facultad", &summary.by_faculty);
            print_counts("Por categoría", &summary.by_category);
            Ok(())
        }
        MetricsCommand::Attendance(args) => {
            let rows = ctx.metrics().attendance_by_event(&filter(args)?).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }
            if rows.is_empty() {
                warning("No data for the selected filter.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("Evento", 40),
                Column::new("Inscritos", 10),
                Column::new("Asistentes", 10),
                Column::new("%", 6),
            ]);
            for r in &rows {
                table.add_row(vec![
                    r.title.clone(),
                    r.registered.to_string(),
                    r.attended.to_string(),
                    r.turnout()
                        .map(|p| format!("{p:.0}%"))
                        .unwrap_or_else(|| "-".to_string()),
                ]);
            }
            print!("{}", table.render());
            Ok(())
        }
    }
}

fn filter(args: &MetricsArgs) -> AppResult<MetricsFilter> {
    MetricsFilter::from_args(
        args.period.as_deref(),
        args.faculty.clone(),
        args.career.clone(),
    )
}

fn print_counts(title: &str, counts: &[NamedCount]) {
    if counts.is_empty() {
        return;
    }
    println!("\n{title}:");
    let mut table = Table::new(vec![Column::new("Nombre", 40), Column::new("Total", 8)]);
    for c in counts {
        table.add_row(vec![c.name.clone(), c.count.to_string()]);
    }
    print!("{}", table.render());
}
