mod bootstrap;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use lift_core::settings::Settings;
use lift_data::analysis::analyze_storage;
use lift_runtime::orchestrator::RefreshOrchestrator;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("liftboard v{} starting", env!("CARGO_PKG_VERSION"));

    let storage_dir = bootstrap::resolve_storage_dir(&settings);
    tracing::info!("Storage directory: {}", storage_dir.display());

    if settings.watch {
        run_watch(&settings, storage_dir).await
    } else {
        run_once(&settings, &storage_dir)
    }
}

/// Single-shot mode: one full ingestion pass, then emit the report.
fn run_once(settings: &Settings, storage_dir: &Path) -> Result<()> {
    let report = analyze_storage(storage_dir)?;

    tracing::info!(
        "Loaded {} sets from {} users in {:.3}s",
        report.metadata.sets_loaded,
        report.metadata.users_loaded,
        report.metadata.load_time_seconds + report.metadata.aggregate_time_seconds
    );

    bootstrap::write_report(&report, settings.output.as_deref(), settings.pretty)
}

/// Watch mode: re-ingest on an interval and rewrite the report until Ctrl+C.
async fn run_watch(settings: &Settings, storage_dir: PathBuf) -> Result<()> {
    tracing::info!(
        "Watching {} every {}s",
        storage_dir.display(),
        settings.refresh_rate
    );

    let orchestrator = RefreshOrchestrator::new(u64::from(settings.refresh_rate), storage_dir);
    let (_store, mut reports, handle) = orchestrator.start();

    loop {
        tokio::select! {
            report = reports.recv() => {
                match report {
                    Some(report) => {
                        bootstrap::write_report(&report, settings.output.as_deref(), settings.pretty)?;
                        tracing::debug!(
                            "Report rewritten with {} users",
                            report.metadata.users_loaded
                        );
                    }
                    None => {
                        tracing::warn!("Refresh loop ended unexpectedly");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Ctrl+C received, shutting down");
                break;
            }
        }
    }

    handle.abort();
    Ok(())
}
