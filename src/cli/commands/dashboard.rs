use crate::context::AppContext;
use crate::core::DashboardStats;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::colors::paint_status;
use crate::utils::date::{format_display, now_in};
use crate::utils::table::{Column, Table};

pub async fn handle(ctx: &AppContext) -> AppResult<()> {
    let views = ctx.events().list_views().await?;
    let stats = DashboardStats::from_views(&views, now_in(ctx.offset));

    if let Some(user) = ctx.session.current_user()? {
        info(format!("{} ({})", user.name, user.role));
    }

    header("Panel de eventos");
    println!("Total        : {}", stats.total);
    println!("Próximos     : {}", stats.upcoming);
    println!("Confirmados  : {}", stats.confirmed);
    println!("Completados  : {}", stats.completed);
    println!("Virtuales    : {}", stats.virtual_events);
    println!("Inscripciones: {}", stats.total_registrations);

    if stats.next_events.is_empty() {
        return Ok(());
    }

    println!("\nPróximos eventos:");
    let mut table = Table::new(vec![
        Column::new("ID", 12),
        Column::new("Título", 40),
        Column::new("Inicio", 16),
        Column::new("Estado", 12),
    ]);
    for v in &stats.next_events {
        table.add_row(vec![
            v.id.clone(),
            v.title.clone(),
            v.start.as_ref().map(format_display).unwrap_or_default(),
            paint_status(v.status),
        ]);
    }
    print!("{}", table.render());
    Ok(())
}
