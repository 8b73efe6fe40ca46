use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, success, warning};
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cfg: &Config, print_config: bool, edit_config: bool, editor: Option<&str>) -> AppResult<()> {
    let path = Config::config_file();

    if print_config {
        println!("📄 Current configuration ({}):\n", path.display());
        println!("{}", cfg.to_yaml()?);
    }

    if edit_config {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "{} does not exist, run `campusctl init` first",
                path.display()
            )));
        }

        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let editor_to_use = editor.map(str::to_string).unwrap_or_else(|| default_editor.clone());

        match Command::new(&editor_to_use).arg(&path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration edited with '{editor_to_use}'"));
            }
            _ => {
                warning(format!(
                    "Editor '{editor_to_use}' not available, falling back to '{default_editor}'"
                ));
                match Command::new(&default_editor).arg(&path).status() {
                    Ok(s) if s.success() => {
                        success(format!("Configuration edited with '{default_editor}'"));
                    }
                    _ => error(format!("Failed to open '{default_editor}'")),
                }
            }
        }

        // Surface syntax errors right away rather than on the next command.
        Config::load()?;
    }

    if !print_config && !edit_config {
        println!("{}", path.display());
    }

    Ok(())
}
