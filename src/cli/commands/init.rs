use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// Handle the `init` command: writes the default configuration file.
pub fn handle(force: bool) -> AppResult<()> {
    let path = Config::init(force)?;
    let cfg = Config::load()?;

    info(format!("API base URL : {}", cfg.api_base_url));
    info(format!("Session file : {}", cfg.session_file));
    println!(
        "Edit {} (or run `campusctl config --edit`) to point at your backend.",
        path.display()
    );
    Ok(())
}
