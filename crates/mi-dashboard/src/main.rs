mod bootstrap;

use anyhow::Result;
use dashboard_core::error::DashboardError;
use dashboard_core::models::FileStatus;
use dashboard_core::settings::Settings;
use dashboard_runtime::data_manager::DataManager;
use dashboard_runtime::orchestrator::DashboardOrchestrator;
use dashboard_ui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();
    settings.validate()?;

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!(
        "Marketing Intelligence Dashboard v{} starting",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!(
        "Data dir: {}, theme: {}",
        settings.data_dir.display(),
        settings.theme
    );

    let data_dir = bootstrap::resolve_data_dir(&settings.data_dir);

    // One load pass for the process lifetime: the inputs are a static snapshot.
    let manager = DataManager::new(data_dir);
    let data = manager.into_data();

    for status in &data.statuses {
        match &status.status {
            FileStatus::Loaded { rows, columns } => {
                tracing::info!("{}: {} rows, {} cols", status.file, rows, columns);
            }
            FileStatus::NotFound => {
                tracing::warn!("{}: not found", status.file);
            }
        }
    }

    let mut orchestrator = DashboardOrchestrator::new(data);

    // Seed the filter state from the CLI; a missing bound is completed from
    // the observed span, and every change below triggers a recompute.
    match (settings.from, settings.to, orchestrator.data().observed_span()) {
        (Some(from), Some(to), _) => orchestrator.set_date_range(&[from, to]),
        (Some(from), None, Some((_, hi))) => orchestrator.set_date_range(&[from, hi]),
        (None, Some(to), Some((lo, _))) => orchestrator.set_date_range(&[lo, to]),
        _ => {}
    }
    if !settings.platforms.is_empty() {
        orchestrator.set_sources(settings.platforms.clone());
    }
    orchestrator.set_campaign(&settings.campaign);

    let app = App::new(&settings.theme, orchestrator);
    app.run()
        .await
        .map_err(|e| DashboardError::Terminal(e.to_string()))?;

    Ok(())
}
