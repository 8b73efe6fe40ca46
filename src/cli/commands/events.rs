use crate::cli::parser::{EventArgs, EventsCommand};
use crate::context::AppContext;
use crate::core::{EventQuery, event_form_wizard};
use crate::errors::{AppError, AppResult};
use crate::models::event::{EventFormData, EventView};
use crate::services::ObjectStorageUploader;
use crate::services::events::{backend_event_to_form_data, to_view};
use crate::ui::messages::{header, info, success, warning};
use crate::ui::prompt::confirm;
use crate::utils::colors::{colorize_optional, paint_status, paint_yes_no};
use crate::utils::date::{DATE_UNAVAILABLE, format_display, today_in};
use crate::utils::range::parse_range;
use crate::utils::table::{Column, Table};

pub async fn handle(cmd: &EventsCommand, ctx: &AppContext) -> AppResult<()> {
    match cmd {
        EventsCommand::List {
            search,
            status,
            period,
            sort,
            desc,
            json,
        } => {
            let query = EventQuery {
                search: search.clone(),
                status: *status,
                range: period.as_deref().map(parse_range).transpose()?,
                sort: *sort,
                descending: *desc,
            };
            let views = query.apply(ctx.events().list_views().await?);

            if *json {
                println!("{}", serde_json::to_string_pretty(&views)?);
            } else {
                print_list(&views);
            }
            Ok(())
        }
        EventsCommand::Show { id } => {
            let event = ctx.events().get(id).await?;
            let view = to_view(&event, ctx.offset, today_in(ctx.offset));
            print_detail(&view);
            Ok(())
        }
        EventsCommand::Create { fields } => create(ctx, fields).await,
        EventsCommand::Update { id, fields } => update(ctx, id, fields).await,
        EventsCommand::Delete { id, yes } => {
            if !*yes && !confirm(&format!("Delete event {id}?"))? {
                info("Nothing deleted.");
                return Ok(());
            }
            let remaining = ctx.events().delete_and_reload(id).await?;
            success(format!("Event {id} deleted. {} events remain.", remaining.len()));
            Ok(())
        }
    }
}

async fn create(ctx: &AppContext, args: &EventArgs) -> AppResult<()> {
    let mut form = EventFormData::default();
    apply_args(&mut form, args);
    check_steps(&form)?;

    let events = ctx.events();
    let id = if args.images.is_empty() {
        events.create(&form).await?
    } else {
        let uploader = ObjectStorageUploader::from_config(&ctx.config)?;
        events
            .create_with_images(&form, &args.images, &uploader)
            .await?
    };

    match id {
        Some(id) => success(format!("Event created with id {id}.")),
        None => success("Event created."),
    }
    Ok(())
}

async fn update(ctx: &AppContext, id: &str, args: &EventArgs) -> AppResult<()> {
    let events = ctx.events();
    let current = events.get(id).await?;

    let mut form = backend_event_to_form_data(&current, ctx.offset);
    apply_args(&mut form, args);
    check_steps(&form)?;

    if args.images.is_empty() {
        events.update(id, &form).await?;
    } else {
        let uploader = ObjectStorageUploader::from_config(&ctx.config)?;
        events
            .update_with_images(id, &form, &args.images, &uploader)
            .await?;
    }

    success(format!("Event {id} updated."));
    Ok(())
}

/// Runs the form through the wizard gates and names the first incomplete
/// step.
fn check_steps(form: &EventFormData) -> AppResult<()> {
    let wizard = event_form_wizard();
    match wizard.first_blocking_step(form) {
        None => Ok(()),
        Some((idx, title)) => Err(AppError::validation(format!(
            "step {}/{} '{title}' is incomplete",
            idx + 1,
            wizard.len()
        ))),
    }
}

/// Overlays the given arguments onto the form. Tags replace the current
/// list when any is given; image URLs are appended.
pub fn apply_args(form: &mut EventFormData, a: &EventArgs) {
    fn set(target: &mut String, value: &Option<String>) {
        if let Some(v) = value {
            *target = v.clone();
        }
    }
    fn set_opt(target: &mut Option<String>, value: &Option<String>) {
        if let Some(v) = value {
            *target = (!v.trim().is_empty()).then(|| v.clone());
        }
    }
    fn set_flag(target: &mut bool, value: Option<bool>) {
        if let Some(v) = value {
            *target = v;
        }
    }

    set(&mut form.title, &a.title);
    set(&mut form.objective, &a.objective);
    set(&mut form.start_date, &a.start);
    set(&mut form.end_date, &a.end);
    set(&mut form.location, &a.location);
    set_opt(&mut form.campus_id, &a.campus);
    set_opt(&mut form.space_id, &a.space);
    set_opt(&mut form.category_id, &a.category);
    set_opt(&mut form.type_id, &a.event_type);

    set_flag(&mut form.audience.teachers, a.teachers);
    set_flag(&mut form.audience.students, a.students);
    set_flag(&mut form.audience.administrative, a.administrative);
    set_flag(&mut form.audience.general_public, a.general_public);
    set_flag(&mut form.is_virtual, a.is_virtual);
    set(&mut form.meeting_url, &a.meeting_url);
    set_flag(&mut form.requires_registration, a.requires_registration);
    set_flag(&mut form.is_public, a.is_public);

    if let Some(c) = a.capacity {
        form.capacity = Some(c);
    }
    if !a.tags.is_empty() {
        form.tags = a.tags.clone();
    }
    form.image_urls.extend(a.image_urls.iter().cloned());
    set(&mut form.additional_details, &a.details);
}

fn when(view: &EventView) -> String {
    view.start
        .as_ref()
        .map(format_display)
        .unwrap_or_else(|| DATE_UNAVAILABLE.to_string())
}

fn print_list(views: &[EventView]) {
    if views.is_empty() {
        warning("No events found.");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("ID", 12),
        Column::new("Título", 36),
        Column::new("Inicio", 16),
        Column::new("Lugar", 24),
        Column::new("Estado", 12),
        Column::new("Inscritos", 10),
    ]);

    for v in views {
        let registered = match v.capacity {
            Some(cap) => format!("{}/{cap}", v.registered),
            None => v.registered.to_string(),
        };
        table.add_row(vec![
            v.id.clone(),
            v.title.clone(),
            colorize_optional(&when(v)),
            colorize_optional(&v.location),
            paint_status(v.status),
            registered,
        ]);
    }

    print!("{}", table.render());
    println!("{} events", views.len());
}

fn print_detail(v: &EventView) {
    header(&v.title);

    let end = v
        .end
        .as_ref()
        .map(format_display)
        .unwrap_or_else(|| DATE_UNAVAILABLE.to_string());

    println!("ID            : {}", v.id);
    println!("Estado        : {}", paint_status(v.status));
    println!("Inicio        : {}", colorize_optional(&when(v)));
    println!("Fin           : {}", colorize_optional(&end));
    if v.is_virtual {
        println!(
            "Modalidad     : virtual ({})",
            v.meeting_url.as_deref().unwrap_or("-")
        );
    } else {
        println!("Lugar         : {}", colorize_optional(&v.location));
    }
    let audience = v.audience.labels();
    println!(
        "Público       : {}",
        if audience.is_empty() {
            "-".to_string()
        } else {
            audience.join(", ")
        }
    );
    match v.capacity {
        Some(cap) => println!("Inscritos     : {} / {cap}", v.registered),
        None => println!("Inscritos     : {}", v.registered),
    }
    println!("Inscripción   : {}", paint_yes_no(v.requires_registration));
    println!("Público web   : {}", paint_yes_no(v.is_public));
    if !v.tags.is_empty() {
        println!("Etiquetas     : {}", v.tags.join(", "));
    }

    println!("\nObjetivo:");
    for line in textwrap::wrap(&v.objective, 76) {
        println!("  {line}");
    }

    if let Some(details) = v.additional_details.as_deref()
        && !details.trim().is_empty()
    {
        println!("\nDetalles:");
        for line in textwrap::wrap(details, 76) {
            println!("  {line}");
        }
    }

    if !v.image_urls.is_empty() {
        println!("\nImágenes:");
        for url in &v.image_urls {
            println!("  {url}");
        }
    }
}
