use crate::context::AppContext;
use crate::errors::AppResult;
use crate::models::catalog::CatalogKind;
use crate::services::catalog::filter_by_parent;
use crate::ui::messages::{header, warning};
use crate::utils::colors::colorize_optional;
use crate::utils::table::{Column, Table};

pub async fn handle(
    ctx: &AppContext,
    kind: CatalogKind,
    parent: Option<&str>,
    json: bool,
) -> AppResult<()> {
    let mut items = ctx.catalog().list(kind).await?;
    if let Some(p) = parent {
        items = filter_by_parent(items, p);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    header(kind.title());
    if items.is_empty() {
        warning("Empty catalog.");
        return Ok(());
    }

    let mut columns = vec![Column::new("ID", 10), Column::new("Nombre", 40)];
    if let Some(label) = kind.parent_label() {
        columns.push(Column::new(label, 10));
    }
    columns.push(Column::new("Descripción", 50));

    let mut table = Table::new(columns);
    for item in &items {
        let mut row = vec![item.id.clone(), item.name.clone()];
        if kind.parent_label().is_some() {
            row.push(colorize_optional(item.parent_id.as_deref().unwrap_or("-")));
        }
        row.push(item.description.clone().unwrap_or_default());
        table.add_row(row);
    }
    print!("{}", table.render());
    Ok(())
}
