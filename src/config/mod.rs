pub mod toml_config;

use crate::app::render::OutputFormat;
use crate::core::directory::DEFAULT_ENDPOINT;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use std::time::Duration;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::app::session::FilterSession;
#[cfg(feature = "cli")]
use crate::core::{ConsultMode, SortKey};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Effective settings after layering flags over the config file over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub format: OutputFormat,
}

impl Settings {
    pub fn resolve(
        file: Option<&TomlConfig>,
        endpoint: Option<&str>,
        timeout_seconds: Option<u64>,
        format: Option<OutputFormat>,
    ) -> Self {
        let file_endpoint = file.and_then(|f| f.source.endpoint.as_deref());
        let file_timeout = file.and_then(|f| f.source.timeout_seconds);
        let file_format = file.and_then(|f| f.output.format);

        Self {
            endpoint: endpoint
                .or(file_endpoint)
                .unwrap_or(DEFAULT_ENDPOINT)
                .to_string(),
            timeout_seconds: timeout_seconds
                .or(file_timeout)
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            format: format.or(file_format).unwrap_or_default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(None, None, None, None)
    }
}

impl ConfigProvider for Settings {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("endpoint", &self.endpoint)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "doctor-finder")]
#[command(about = "Search, filter and sort a directory of doctors")]
pub struct CliConfig {
    /// Directory JSON endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Shareable query string to start from, e.g. "mode=In+Clinic&spec=Dentist"
    #[arg(long, default_value = "")]
    pub query: String,

    #[arg(long)]
    pub search: Option<String>,

    /// "Video Consult" / "video" or "In Clinic" / "clinic"
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<ConsultMode>,

    /// Specialty to include; repeat for more
    #[arg(long = "spec")]
    pub specs: Vec<String>,

    /// "fees" (low to high) or "experience" (high to low)
    #[arg(long, value_parser = parse_sort)]
    pub sort: Option<SortKey>,

    /// Drop every filter from --query before applying the other flags
    #[arg(long)]
    pub clear: bool,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print every specialty in the directory and exit
    #[arg(long)]
    pub list_specialties: bool,

    /// Print name suggestions for --search
    #[arg(long)]
    pub suggest: bool,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn settings(&self) -> Result<Settings> {
        let file = self
            .config
            .as_ref()
            .map(TomlConfig::from_file)
            .transpose()?;

        Ok(Settings::resolve(
            file.as_ref(),
            self.endpoint.as_deref(),
            self.timeout_seconds,
            self.format,
        ))
    }

    /// Opens a session at `--query` and replays each filter flag as an edit.
    /// `--spec` adds a specialty that is not selected yet.
    pub fn open_session(&self) -> FilterSession {
        let mut session = FilterSession::open(&self.query);

        if self.clear {
            session.apply(crate::core::FilterSpec::cleared());
        }
        if let Some(search) = &self.search {
            session.apply(session.filters().with_search(search));
        }
        if let Some(mode) = self.mode {
            session.apply(session.filters().with_mode(Some(mode)));
        }
        for spec in &self.specs {
            if !session.filters().selected_specialties().contains(spec) {
                session.apply(session.filters().toggle_specialty(spec));
            }
        }
        if let Some(sort) = self.sort {
            session.apply(session.filters().with_sort(Some(sort)));
        }

        session
    }
}

#[cfg(feature = "cli")]
fn parse_mode(value: &str) -> std::result::Result<ConsultMode, String> {
    if let Some(mode) = ConsultMode::from_label(value) {
        return Ok(mode);
    }
    match value.to_lowercase().replace(['-', '_'], " ").as_str() {
        "video" | "video consult" => Ok(ConsultMode::VideoConsult),
        "clinic" | "in clinic" => Ok(ConsultMode::InClinic),
        _ => Err(format!(
            "unknown mode {:?}; expected \"Video Consult\" or \"In Clinic\"",
            value
        )),
    }
}

#[cfg(feature = "cli")]
fn parse_sort(value: &str) -> std::result::Result<SortKey, String> {
    match value.to_lowercase().as_str() {
        "fees" | "fee" => Ok(SortKey::Fees),
        "experience" => Ok(SortKey::Experience),
        _ => Err(format!(
            "unknown sort {:?}; expected \"fees\" or \"experience\"",
            value
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FinderError;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.format, OutputFormat::Text);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_flags_override_file() {
        let file = TomlConfig::from_toml_str(
            "[source]\nendpoint = \"https://file.example.com/a.json\"\ntimeout_seconds = 9\n\n[output]\nformat = \"json\"\n",
        )
        .unwrap();

        let settings = Settings::resolve(
            Some(&file),
            Some("https://flag.example.com/b.json"),
            None,
            None,
        );
        assert_eq!(settings.endpoint, "https://flag.example.com/b.json");
        assert_eq!(settings.timeout_seconds, 9);
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings::resolve(None, Some("file:///tmp/doctors.json"), None, None);
        assert!(matches!(
            settings.validate(),
            Err(FinderError::InvalidConfigValueError { .. })
        ));

        let settings = Settings::resolve(None, None, Some(0), None);
        assert!(settings.validate().is_err());
    }

    #[cfg(feature = "cli")]
    mod cli {
        use super::super::*;
        use crate::core::FilterSpec;

        fn parse(args: &[&str]) -> CliConfig {
            CliConfig::parse_from(std::iter::once("doctor-finder").chain(args.iter().copied()))
        }

        #[test]
        fn test_mode_and_sort_aliases() {
            let config = parse(&["--mode", "video", "--sort", "fees"]);
            assert_eq!(config.mode, Some(ConsultMode::VideoConsult));
            assert_eq!(config.sort, Some(SortKey::Fees));

            let config = parse(&["--mode", "In Clinic"]);
            assert_eq!(config.mode, Some(ConsultMode::InClinic));

            assert!(CliConfig::try_parse_from(["doctor-finder", "--mode", "home"]).is_err());
        }

        #[test]
        fn test_flags_are_applied_over_query() {
            let config = parse(&[
                "--query",
                "?search=rao&spec=Dentist",
                "--spec",
                "Dentist",
                "--spec",
                "ENT",
                "--sort",
                "experience",
            ]);
            let session = config.open_session();

            assert_eq!(session.filters().search.as_deref(), Some("rao"));
            assert_eq!(session.filters().selected_specialties(), ["Dentist", "ENT"]);
            assert_eq!(
                session.address(),
                "?search=rao&spec=Dentist&spec=ENT&sort=experience"
            );
        }

        #[test]
        fn test_clear_discards_query() {
            let config = parse(&["--query", "mode=In+Clinic&sort=fees", "--clear"]);
            let session = config.open_session();
            assert_eq!(session.filters(), &FilterSpec::default());
            assert_eq!(session.address(), "?");
        }

        #[test]
        fn test_settings_reads_config_file() {
            use std::io::Write;

            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(b"[output]\nformat = \"csv\"\n").unwrap();
            let path = file.path().to_str().unwrap().to_string();

            let settings = parse(&["--config", &path]).settings().unwrap();
            assert_eq!(settings.format, OutputFormat::Csv);
            assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        }
    }
}
