use chrono::NaiveDate;
use clap::parser::ValueSource;
use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{DashboardError, Result};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Marketing performance dashboard over local CSV exports
#[derive(Parser, Debug, Clone)]
#[command(
    name = "mi-dashboard",
    about = "Marketing performance dashboard over local CSV exports",
    version
)]
pub struct Settings {
    /// Directory containing the platform CSV exports
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Start of the date-range filter (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// End of the date-range filter (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Platforms to include, comma separated (default: all)
    #[arg(long, value_delimiter = ',')]
    pub platforms: Vec<String>,

    /// Campaign filter ("All" disables it)
    #[arg(long, default_value = "All")]
    pub campaign: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.mi-dashboard/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".mi-dashboard").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path, creating parent
    /// directories if needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Reject argument combinations clap cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(DashboardError::Config(format!(
                    "--from {from} must not be after --to {to}"
                )));
            }
        }
        Ok(())
    }

    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result for the next run.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation: accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        // Build raw ArgMatches so we can query ValueSource.
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!("failed to clear saved config: {e}");
            }
            return settings;
        }

        let last_used = LastUsedParams::load_from(config_path);

        // A CLI default is overridden by the persisted value; an explicit CLI
        // argument always wins.
        if matches.value_source("theme") == Some(ValueSource::DefaultValue) {
            if let Some(theme) = &last_used.theme {
                settings.theme = theme.clone();
            }
        }
        if matches.value_source("data_dir") == Some(ValueSource::DefaultValue) {
            if let Some(data_dir) = &last_used.data_dir {
                settings.data_dir = data_dir.clone();
            }
        }

        let to_save = LastUsedParams {
            theme: Some(settings.theme.clone()),
            data_dir: Some(settings.data_dir.clone()),
        };
        if to_save != last_used {
            if let Err(e) = to_save.save_to(config_path) {
                tracing::warn!("failed to persist last-used config: {e}");
            }
        }

        settings
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> Vec<OsString> {
        let mut all: Vec<OsString> = vec!["mi-dashboard".into()];
        all.extend(extra.iter().map(OsString::from));
        all
    }

    // ── Parsing ───────────────────────────────────────────────────────────────

    #[test]
    fn test_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = LastUsedParams::config_path_in(tmp.path());
        let settings = Settings::load_with_last_used_impl(args(&[]), &path);

        assert_eq!(settings.data_dir, PathBuf::from("."));
        assert!(settings.from.is_none());
        assert!(settings.to.is_none());
        assert!(settings.platforms.is_empty());
        assert_eq!(settings.campaign, "All");
        assert_eq!(settings.theme, "auto");
        assert_eq!(settings.log_level, "INFO");
    }

    #[test]
    fn test_date_args_parse() {
        let tmp = TempDir::new().unwrap();
        let path = LastUsedParams::config_path_in(tmp.path());
        let settings = Settings::load_with_last_used_impl(
            args(&["--from", "2024-01-01", "--to", "2024-03-31"]),
            &path,
        );
        assert_eq!(
            settings.from,
            Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
        assert_eq!(
            settings.to,
            Some(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap())
        );
    }

    #[test]
    fn test_platforms_comma_separated() {
        let tmp = TempDir::new().unwrap();
        let path = LastUsedParams::config_path_in(tmp.path());
        let settings =
            Settings::load_with_last_used_impl(args(&["--platforms", "Facebook,TikTok"]), &path);
        assert_eq!(settings.platforms, vec!["Facebook", "TikTok"]);
    }

    // ── Last-used merge ───────────────────────────────────────────────────────

    #[test]
    fn test_persists_theme_and_reloads_it() {
        let tmp = TempDir::new().unwrap();
        let path = LastUsedParams::config_path_in(tmp.path());

        // First run with an explicit theme persists it.
        let first = Settings::load_with_last_used_impl(args(&["--theme", "light"]), &path);
        assert_eq!(first.theme, "light");
        assert!(path.exists());

        // Second run without a theme argument picks up the persisted value.
        let second = Settings::load_with_last_used_impl(args(&[]), &path);
        assert_eq!(second.theme, "light");
    }

    #[test]
    fn test_explicit_cli_beats_persisted() {
        let tmp = TempDir::new().unwrap();
        let path = LastUsedParams::config_path_in(tmp.path());

        Settings::load_with_last_used_impl(args(&["--theme", "light"]), &path);
        let settings = Settings::load_with_last_used_impl(args(&["--theme", "dark"]), &path);
        assert_eq!(settings.theme, "dark");
    }

    #[test]
    fn test_clear_removes_saved_config() {
        let tmp = TempDir::new().unwrap();
        let path = LastUsedParams::config_path_in(tmp.path());

        Settings::load_with_last_used_impl(args(&["--theme", "light"]), &path);
        assert!(path.exists());

        Settings::load_with_last_used_impl(args(&["--clear"]), &path);
        assert!(!path.exists());
    }

    // ── LastUsedParams I/O ────────────────────────────────────────────────────

    #[test]
    fn test_load_from_missing_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let loaded = LastUsedParams::load_from(&tmp.path().join("nope.json"));
        assert_eq!(loaded, LastUsedParams::default());
    }

    #[test]
    fn test_load_from_corrupt_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("last_used.json");
        std::fs::write(&path, "{not json").unwrap();
        let loaded = LastUsedParams::load_from(&path);
        assert_eq!(loaded, LastUsedParams::default());
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let tmp = TempDir::new().unwrap();
        let path = LastUsedParams::config_path_in(tmp.path());
        let settings = Settings::load_with_last_used_impl(
            args(&["--from", "2024-03-31", "--to", "2024-01-01"]),
            &path,
        );
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("--from"));
    }

    #[test]
    fn test_validate_accepts_ordered_range() {
        let tmp = TempDir::new().unwrap();
        let path = LastUsedParams::config_path_in(tmp.path());
        let settings = Settings::load_with_last_used_impl(
            args(&["--from", "2024-01-01", "--to", "2024-03-31"]),
            &path,
        );
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = LastUsedParams::config_path_in(tmp.path());
        let params = LastUsedParams {
            theme: Some("classic".to_string()),
            data_dir: Some(PathBuf::from("/data/exports")),
        };
        params.save_to(&path).unwrap();
        assert_eq!(LastUsedParams::load_from(&path), params);
    }
}
