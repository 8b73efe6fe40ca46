//! campusctl library root.
//! Exposes the API gateway, domain services, CLI parser and the high-level
//! run() function used by main.rs.

pub mod api;
pub mod cli;
pub mod config;
pub mod context;
pub mod core;
pub mod errors;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod session;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use context::AppContext;
use errors::AppResult;
use session::SessionContext;

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, ctx: &AppContext) -> AppResult<()> {
    use cli::commands;

    match &cli.command {
        Commands::Init { .. } | Commands::Config { .. } => Ok(()),
        Commands::Login { email, password } => {
            commands::auth::login(ctx, email.as_deref(), password.as_deref()).await
        }
        Commands::Logout => commands::auth::logout(ctx),
        Commands::Whoami => commands::auth::whoami(ctx),
        Commands::Events(cmd) => commands::events::handle(cmd, ctx).await,
        Commands::Attendance(cmd) => commands::attendance::handle(cmd, ctx).await,
        Commands::Staff(cmd) => commands::staff::handle(cmd, ctx).await,
        Commands::Catalog { kind, parent, json } => {
            commands::catalog::handle(ctx, *kind, parent.as_deref(), *json).await
        }
        Commands::Metrics(cmd) => commands::metrics::handle(cmd, ctx).await,
        Commands::Dashboard => commands::dashboard::handle(ctx).await,
    }
}

/// Entry point used by main.rs
pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // `init` must work before any configuration exists.
    if let Commands::Init { force } = &cli.command {
        logging::init("warn", cli.verbose);
        return cli::commands::init::handle(*force);
    }

    let mut cfg = Config::load()?;
    logging::init(&cfg.log_level, cli.verbose);

    if let Some(url) = &cli.api_url {
        cfg.api_base_url = url.clone();
    }
    if let Some(path) = &cli.session {
        cfg.session_file = path.to_string_lossy().to_string();
    }

    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = &cli.command
    {
        return cli::commands::config::handle(&cfg, *print_config, *edit_config, editor.as_deref());
    }

    tracing::debug!(api = %cfg.api_base_url, session = %cfg.session_file, "starting");

    let session = SessionContext::file(&cfg.session_file);
    let ctx = AppContext::with_session(cfg, session)?;
    dispatch(&cli, &ctx).await
}
