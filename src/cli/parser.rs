use crate::core::SortKey;
use crate::export::ExportFormat;
use crate::models::catalog::CatalogKind;
use crate::models::event::EventStatus;
use crate::models::staff::{NotificationCategory, NotificationChannel};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for campusctl
/// Administration client for the campus events platform
#[derive(Parser)]
#[command(
    name = "campusctl",
    version = env!("CARGO_PKG_VERSION"),
    about = "Campus events administration: events, attendance, staff, catalogs and metrics",
    long_about = None
)]
pub struct Cli {
    /// Override the backend base URL from the configuration
    #[arg(global = true, long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the session file location
    #[arg(global = true, long = "session", value_name = "FILE")]
    pub session: Option<PathBuf>,

    /// Increase diagnostic output on stderr (-v, -vv, -vvv)
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration file
    Init {
        #[arg(long, short = 'f', help = "Overwrite an existing configuration")]
        force: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use with --edit")]
        editor: Option<String>,
    },

    /// Authenticate against the backend and store the session
    Login {
        #[arg(long, short = 'e')]
        email: Option<String>,

        #[arg(long, short = 'p', help = "Password (prompted when omitted)")]
        password: Option<String>,
    },

    /// Clear the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Manage events
    #[command(subcommand)]
    Events(EventsCommand),

    /// Attendance lists
    #[command(subcommand)]
    Attendance(AttendanceCommand),

    /// Staff administration
    #[command(subcommand)]
    Staff(StaffCommand),

    /// List a reference catalog
    Catalog {
        #[arg(value_enum)]
        kind: CatalogKind,

        #[arg(long, help = "Only entries under this parent (faculty of a career, campus of a space)")]
        parent: Option<String>,

        #[arg(long, help = "Print raw JSON")]
        json: bool,
    },

    /// Attendance metrics
    #[command(subcommand)]
    Metrics(MetricsCommand),

    /// Overview of events: counts per status and what comes next
    Dashboard,
}

#[derive(Subcommand)]
pub enum EventsCommand {
    /// List events
    List {
        #[arg(long, short = 's', help = "Search title, objective, location and tags")]
        search: Option<String>,

        #[arg(long, value_enum)]
        status: Option<EventStatus>,

        #[arg(
            long,
            short = 'p',
            value_name = "RANGE",
            help = "Start date within YYYY, YYYY-MM, YYYY-MM-DD or a range FROM:TO"
        )]
        period: Option<String>,

        #[arg(long, value_enum, default_value = "start")]
        sort: SortKey,

        #[arg(long, help = "Reverse the sort order")]
        desc: bool,

        #[arg(long, help = "Print raw JSON")]
        json: bool,
    },

    /// Show one event in detail
    Show { id: String },

    /// Create an event
    Create {
        #[command(flatten)]
        fields: EventArgs,
    },

    /// Update an event (unspecified fields keep their current value)
    Update {
        id: String,

        #[command(flatten)]
        fields: EventArgs,
    },

    /// Delete an event
    Delete {
        id: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

/// Event fields. Booleans accept `--flag`, `--flag true` or `--flag false`.
#[derive(Args, Debug, Clone, Default)]
pub struct EventArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub objective: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DDTHH:MM")]
    pub start: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DDTHH:MM")]
    pub end: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long, value_name = "ID")]
    pub campus: Option<String>,

    #[arg(long, value_name = "ID")]
    pub space: Option<String>,

    #[arg(long, value_name = "ID")]
    pub category: Option<String>,

    #[arg(long = "type", value_name = "ID")]
    pub event_type: Option<String>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub teachers: Option<bool>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub students: Option<bool>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub administrative: Option<bool>,

    #[arg(long = "general-public", num_args = 0..=1, default_missing_value = "true")]
    pub general_public: Option<bool>,

    #[arg(long = "virtual", num_args = 0..=1, default_missing_value = "true")]
    pub is_virtual: Option<bool>,

    #[arg(long = "meeting-url")]
    pub meeting_url: Option<String>,

    #[arg(long)]
    pub capacity: Option<u32>,

    #[arg(long = "requires-registration", num_args = 0..=1, default_missing_value = "true")]
    pub requires_registration: Option<bool>,

    #[arg(long = "public", num_args = 0..=1, default_missing_value = "true")]
    pub is_public: Option<bool>,

    #[arg(long = "tag", value_name = "TAG", help = "Repeatable; replaces existing tags")]
    pub tags: Vec<String>,

    #[arg(long = "image", value_name = "FILE", help = "Image to upload (repeatable)")]
    pub images: Vec<PathBuf>,

    #[arg(long = "image-url", value_name = "URL", help = "Already hosted image (repeatable)")]
    pub image_urls: Vec<String>,

    #[arg(long)]
    pub details: Option<String>,
}

#[derive(Subcommand)]
pub enum AttendanceCommand {
    /// Print the attendance list of an event
    List {
        event_id: String,

        #[arg(long, short = 's', help = "Filter by name or identification number")]
        search: Option<String>,
    },

    /// Export the attendance list of an event
    Export {
        event_id: String,

        #[arg(long, value_enum, help = "Defaults to the file extension, else csv")]
        format: Option<ExportFormat>,

        #[arg(long, value_name = "FILE", help = "Absolute output path")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum StaffCommand {
    /// Register a staff member
    Register(StaffArgs),
}

#[derive(Args, Debug, Clone)]
pub struct StaffArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long, help = "At least 8 characters (prompted when omitted)")]
    pub password: Option<String>,

    #[arg(long)]
    pub phone: String,

    #[arg(long = "photo-url", value_name = "URL")]
    pub photo_url: Option<String>,

    #[arg(long)]
    pub profession: String,

    #[arg(long)]
    pub department: String,

    #[arg(long)]
    pub position: String,

    #[arg(long, value_name = "ID")]
    pub faculty: String,

    /// Enable a notification, e.g. `--notify new-events:email`
    #[arg(long = "notify", value_name = "CATEGORY:CHANNEL", value_parser = parse_notification)]
    pub notify: Vec<(NotificationCategory, NotificationChannel)>,
}

fn parse_notification(s: &str) -> Result<(NotificationCategory, NotificationChannel), String> {
    use clap::ValueEnum;

    let (cat, chan) = s
        .split_once(':')
        .ok_or_else(|| format!("expected CATEGORY:CHANNEL, got '{s}'"))?;
    let category = NotificationCategory::from_str(cat.trim(), true)?;
    let channel = NotificationChannel::from_str(chan.trim(), true)?;
    Ok((category, channel))
}

#[derive(Subcommand)]
pub enum MetricsCommand {
    /// Totals and breakdowns by faculty and category
    Summary(MetricsArgs),

    /// Registered vs attended, per event
    Attendance(MetricsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct MetricsArgs {
    #[arg(long, short = 'p', value_name = "RANGE")]
    pub period: Option<String>,

    #[arg(long, value_name = "ID")]
    pub faculty: Option<String>,

    #[arg(long, value_name = "ID")]
    pub career: Option<String>,

    #[arg(long, help = "Print raw JSON")]
    pub json: bool,
}
