use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Pilot and group statistics from TacView ACMI recordings
#[derive(Parser, Debug, Clone)]
#[command(
    name = "acmi-stats",
    about = "Pilot and group statistics from TacView ACMI recordings",
    version
)]
pub struct Settings {
    /// Path to the .acmi recording (plain text or zipped)
    pub recording: PathBuf,

    /// Report format
    #[arg(
        long,
        default_value = "table",
        value_parser = ["table", "json"],
        env = "ACMI_STATS_FORMAT"
    )]
    pub format: String,

    /// Logging level
    #[arg(
        long,
        default_value = "WARNING",
        value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"],
        env = "ACMI_STATS_LOG_LEVEL"
    )]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn try_load_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Settings::try_parse_from(args).map(Self::resolve)
    }

    /// `true` when the JSON report was requested.
    pub fn wants_json(&self) -> bool {
        self.format == "json"
    }

    fn resolve(mut settings: Settings) -> Settings {
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["acmi-stats", "mission.acmi"]);

        assert_eq!(settings.recording, PathBuf::from("mission.acmi"));
        assert_eq!(settings.format, "table");
        assert_eq!(settings.log_level, "WARNING");
        assert!(!settings.debug);
        assert!(!settings.wants_json());
    }

    #[test]
    fn test_settings_recording_is_required() {
        let err = Settings::try_load_from(["acmi-stats"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_settings_json_format() {
        let settings =
            Settings::try_load_from(["acmi-stats", "--format", "json", "mission.acmi"]).unwrap();
        assert!(settings.wants_json());
    }

    #[test]
    fn test_settings_rejects_unknown_format() {
        let result = Settings::try_load_from(["acmi-stats", "--format", "csv", "mission.acmi"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_debug_overrides_log_level() {
        let settings = Settings::try_load_from([
            "acmi-stats",
            "--log-level",
            "ERROR",
            "--debug",
            "mission.acmi",
        ])
        .unwrap();
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_settings_explicit_log_level() {
        let settings =
            Settings::try_load_from(["acmi-stats", "--log-level", "INFO", "mission.acmi"])
                .unwrap();
        assert_eq!(settings.log_level, "INFO");
    }

    #[test]
    fn test_settings_help_is_reported_as_error_kind() {
        let err = Settings::try_load_from(["acmi-stats", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
