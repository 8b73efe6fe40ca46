//! Diagnostic logging to stderr.
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies, raised
//! by `-v` flags. User-facing output stays on stdout through `ui::messages`.

use tracing_subscriber::EnvFilter;

pub fn level_for(configured: &str, verbose: u8) -> String {
    match verbose {
        0 => configured.to_string(),
        1 => "campusctl=info".to_string(),
        2 => "campusctl=debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init(configured: &str, verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(configured, verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_overrides_config() {
        assert_eq!(level_for("warn", 0), "warn");
        assert_eq!(level_for("warn", 2), "campusctl=debug");
        assert_eq!(level_for("warn", 5), "trace");
    }
}
