use thiserror::Error;

/// All errors produced by the dashboard.
///
/// The data pipeline itself never returns these: missing files, bad rows and
/// absent columns all degrade to absence markers and unavailable metrics.
/// The variants here cover the setup paths that genuinely cannot proceed.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A persisted configuration document could not be serialised or parsed.
    #[error("Failed to encode config: {0}")]
    ConfigEncode(#[from] serde_json::Error),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_terminal() {
        let err = DashboardError::Terminal("crossterm failure".to_string());
        assert_eq!(err.to_string(), "Terminal error: crossterm failure");
    }

    #[test]
    fn test_error_display_config() {
        let err = DashboardError::Config("--from must not be after --to".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: --from must not be after --to"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DashboardError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: DashboardError = json_err.into();
        assert!(err.to_string().contains("Failed to encode config"));
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: DashboardError = anyhow::anyhow!("something else").into();
        assert!(err.to_string().contains("something else"));
    }
}
