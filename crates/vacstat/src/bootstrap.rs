use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(map_level(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

/// Map CLI log-level names to tracing level names (tracing uses lowercase).
fn map_level(log_level: &str) -> &'static str {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        _ => "info",
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_level_known_names() {
        assert_eq!(map_level("DEBUG"), "debug");
        assert_eq!(map_level("INFO"), "info");
        assert_eq!(map_level("WARNING"), "warn");
        assert_eq!(map_level("ERROR"), "error");
    }

    #[test]
    fn test_map_level_is_case_insensitive() {
        assert_eq!(map_level("debug"), "debug");
        assert_eq!(map_level("Warning"), "warn");
    }

    #[test]
    fn test_map_level_unknown_falls_back_to_info() {
        assert_eq!(map_level("TRACEVERBOSE"), "info");
    }
}
