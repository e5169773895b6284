use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the standard `~/.mi-dashboard/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing parents):
/// - `~/.mi-dashboard/`
/// - `~/.mi-dashboard/logs/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let app_dir = home.join(".mi-dashboard");
    std::fs::create_dir_all(&app_dir)?;
    std::fs::create_dir_all(app_dir.join("logs"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a CLI log-level name onto a tracing directive (tracing uses lowercase).
fn normalize_level(log_level: &str) -> &'static str {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        _ => "info",
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Output goes to stderr so it does not fight the alternate-screen TUI; the
/// `log_file` parameter is accepted for forward-compatibility but file
/// logging is not yet wired.
pub fn setup_logging(log_level: &str, _log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(normalize_level(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Data-directory resolution ──────────────────────────────────────────────────

/// Resolve the configured data directory.
///
/// A missing directory is not fatal (the dashboard degrades to "not found"
/// statuses for every input file) but it is worth a warning up front.
pub fn resolve_data_dir(configured: &Path) -> PathBuf {
    if !configured.exists() {
        tracing::warn!(
            "data directory {} does not exist; all input files will be reported as not found",
            configured.display()
        );
    }
    configured.to_path_buf()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
