use std::path::{Path, PathBuf};

use lift_core::settings::Settings;
use lift_data::analysis::AnalysisReport;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is the default [`tracing_subscriber::EnvFilter`] directive; a
/// `RUST_LOG` environment variable takes precedence when set. Falls back to
/// `"info"` if neither produces a valid filter.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Storage-dir resolution ─────────────────────────────────────────────────────

/// Storage directory name used by both default locations.
const STORAGE_DIR_NAME: &str = "storage";

/// Resolve the storage directory for this run.
///
/// Checks the following in order:
/// 1. the explicit `--storage-dir` flag, taken as-is;
/// 2. `./storage`, when it exists;
/// 3. `~/.liftboard/storage`, when it exists.
///
/// Falls back to `./storage` so a missing directory still surfaces as the
/// standard fatal error instead of something invented here.
pub fn resolve_storage_dir(settings: &Settings) -> PathBuf {
    if let Some(dir) = &settings.storage_dir {
        return dir.clone();
    }

    let local = PathBuf::from(STORAGE_DIR_NAME);
    if local.is_dir() {
        return local;
    }

    if let Some(home) = dirs::home_dir() {
        let in_home = home.join(".liftboard").join(STORAGE_DIR_NAME);
        if in_home.is_dir() {
            return in_home;
        }
    }

    local
}

// ── Report output ──────────────────────────────────────────────────────────────

/// Serialize the per-user series map, the wire shape of every report.
pub fn render_report(report: &AnalysisReport, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(&report.users)?
    } else {
        serde_json::to_string(&report.users)?
    };
    Ok(json)
}

/// Write the report JSON to `path`, or to stdout when `path` is `None`.
pub fn write_report(
    report: &AnalysisReport,
    path: Option<&Path>,
    pretty: bool,
) -> anyhow::Result<()> {
    let json = render_report(report, pretty)?;

    match path {
        Some(path) => {
            // Write to a temp file then rename for atomicity.
            let tmp = path.with_extension("json.tmp");
            std::fs::write(&tmp, &json)?;
            std::fs::rename(&tmp, path)?;
        }
        None => println!("{json}"),
    }

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
