use clap::Parser;
use std::path::PathBuf;

/// Command-line settings for the liftboard binary.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "liftboard",
    about = "Aggregate workout-log exports into per-exercise time series",
    version
)]
pub struct Settings {
    /// Directory of per-user export files (file name doubles as user ID)
    #[arg(long)]
    pub storage_dir: Option<PathBuf>,

    /// Write the JSON report to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,

    /// Keep running and re-ingest the storage directory on an interval
    #[arg(long)]
    pub watch: bool,

    /// Seconds between ingestion passes in watch mode (1-3600)
    #[arg(
        long,
        default_value = "30",
        value_parser = clap::value_parser!(u32).range(1..=3600)
    )]
    pub refresh_rate: u32,

    /// Logging level
    #[arg(
        long,
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"]
    )]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::parse_from(["liftboard"]);

        assert_eq!(settings.storage_dir, None);
        assert_eq!(settings.output, None);
        assert!(!settings.pretty);
        assert!(!settings.watch);
        assert_eq!(settings.refresh_rate, 30);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_explicit_settings() {
        let settings = Settings::parse_from([
            "liftboard",
            "--storage-dir",
            "/data/storage",
            "--output",
            "report.json",
            "--pretty",
            "--watch",
            "--refresh-rate",
            "5",
            "--log-level",
            "debug",
        ]);

        assert_eq!(
            settings.storage_dir,
            Some(PathBuf::from("/data/storage"))
        );
        assert_eq!(settings.output, Some(PathBuf::from("report.json")));
        assert!(settings.pretty);
        assert!(settings.watch);
        assert_eq!(settings.refresh_rate, 5);
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_refresh_rate_range_is_enforced() {
        assert!(Settings::try_parse_from(["liftboard", "--refresh-rate", "0"]).is_err());
        assert!(Settings::try_parse_from(["liftboard", "--refresh-rate", "3601"]).is_err());
        assert!(Settings::try_parse_from(["liftboard", "--refresh-rate", "3600"]).is_ok());
    }

    #[test]
    fn test_log_level_is_validated() {
        assert!(Settings::try_parse_from(["liftboard", "--log-level", "verbose"]).is_err());
        assert!(Settings::try_parse_from(["liftboard", "--log-level", "warn"]).is_ok());
    }
}
