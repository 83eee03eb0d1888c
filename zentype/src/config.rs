use std::path::PathBuf;

use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use thiserror::Error;

pub use results::ResultsConfig;
pub use theme::Theme;

pub mod results;
pub mod theme;

/// Environment variables with this prefix override `settings.toml`
const ENV_PREFIX: &str = "ZENTYPE_";

/// The shortest WPM history interval a settings file may ask for, in seconds
pub const MIN_HISTORY_INTERVAL: f64 = 0.1;

/// The test lengths on offer
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumIter, Deserialize, Serialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum TestDuration {
    #[strum(to_string = "30s")]
    Short,
    #[default]
    #[strum(to_string = "60s")]
    Medium,
    #[strum(to_string = "90s")]
    Long,
}

impl TestDuration {
    pub const fn seconds(self) -> u64 {
        match self {
            Self::Short => 30,
            Self::Medium => 60,
            Self::Long => 90,
        }
    }

    /// Returns the next duration, wrapping around
    pub fn next(self) -> Self {
        Self::iter()
            .cycle()
            .skip_while(|duration| *duration != self)
            .nth(1)
            .unwrap_or(self)
    }

    /// Returns the previous duration, wrapping around
    pub fn previous(self) -> Self {
        Self::iter()
            .rev()
            .cycle()
            .skip_while(|duration| *duration != self)
            .nth(1)
            .unwrap_or(self)
    }
}

#[derive(Debug, Error)]
#[error("Unsupported test duration: {0}s (expected 30, 60 or 90)")]
pub struct InvalidDuration(pub u64);

impl TryFrom<u64> for TestDuration {
    type Error = InvalidDuration;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::iter()
            .find(|duration| duration.seconds() == value)
            .ok_or(InvalidDuration(value))
    }
}

impl From<TestDuration> for u64 {
    fn from(value: TestDuration) -> Self {
        value.seconds()
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub duration: TestDuration,
    /// Words per generated text. Derived from the duration when unset.
    pub word_count: Option<usize>,
    pub history_interval_seconds: f64,
    /// How often live metrics are refreshed while typing
    pub poll_interval_ms: u64,
    pub results: ResultsConfig,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            duration: TestDuration::default(),
            word_count: None,
            history_interval_seconds: 1.0,
            poll_interval_ms: 500,
            results: ResultsConfig::default(),
            theme: Theme::default(),
        }
    }
}

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error(
        "Failed to get configuration directory. Please specify the location using the `--config <path>` flag"
    )]
    NoDirectory,

    #[error("Failed to create config directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),

    #[from(skip)]
    #[error(
        "Invalid history interval: {0}s (expected at least {min}s)",
        min = MIN_HISTORY_INTERVAL
    )]
    InvalidHistoryInterval(f64),
}

#[derive(Debug)]
pub struct Config {
    pub settings: Settings,
    pub config_dir: PathBuf,
}

impl Config {
    pub fn get(override_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Check for toml file location
        let config_dir = override_path
            .or_else(|| {
                ProjectDirs::from("com", "ZenType", "ZenType")
                    .map(|dirs| dirs.config_dir().to_path_buf())
            })
            .ok_or(ConfigError::NoDirectory)?;

        // Ensure path exists
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)?;
        }

        let settings = Self::load_settings(&config_dir)?;

        Ok(Self {
            settings,
            config_dir,
        })
    }

    /// Layer defaults, `settings.toml` and the environment
    fn load_settings(config_dir: &std::path::Path) -> Result<Settings, ConfigError> {
        let mut settings = Figment::from(Serialized::defaults(Settings::default()));

        let settings_toml = config_dir.join("settings.toml");
        if settings_toml.exists() {
            settings = settings.merge(Toml::file(settings_toml));
        }

        settings = settings.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let settings: Settings = settings
            .extract()
            .map_err(|error| ConfigError::Parse(Box::new(error)))?;

        let interval = settings.history_interval_seconds;
        if !(interval.is_finite() && interval >= MIN_HISTORY_INTERVAL) {
            return Err(ConfigError::InvalidHistoryInterval(interval));
        }

        Ok(settings)
    }

    /// The directory results are stored in
    pub fn results_dir(&self) -> PathBuf {
        self.settings
            .results
            .directory
            .clone()
            .unwrap_or_else(|| self.config_dir.join("data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.duration, TestDuration::Medium);
        assert_eq!(settings.duration.seconds(), 60);
        assert_eq!(settings.word_count, None);
        assert_eq!(settings.history_interval_seconds, 1.0);
        assert_eq!(settings.poll_interval_ms, 500);
        assert!(settings.results.save_enabled);
    }

    #[test]
    fn test_duration_cycling() {
        assert_eq!(TestDuration::Short.next(), TestDuration::Medium);
        assert_eq!(TestDuration::Long.next(), TestDuration::Short);
        assert_eq!(TestDuration::Short.previous(), TestDuration::Long);
        assert_eq!(TestDuration::Medium.previous(), TestDuration::Short);
    }

    #[test]
    fn test_duration_conversion() {
        assert_eq!(TestDuration::try_from(90_u64).unwrap(), TestDuration::Long);
        assert!(TestDuration::try_from(45_u64).is_err());
        assert_eq!(u64::from(TestDuration::Short), 30);
        assert_eq!(TestDuration::Short.to_string(), "30s");
    }

    #[test]
    fn test_settings_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.toml"),
            "duration = 30\nword_count = 12\n\n[results]\nsave_enabled = false\n",
        )
        .unwrap();

        let config = Config::get(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.settings.duration, TestDuration::Short);
        assert_eq!(config.settings.word_count, Some(12));
        assert!(!config.settings.results.save_enabled);
        assert_eq!(config.settings.poll_interval_ms, 500);
        assert_eq!(config.results_dir(), dir.path().join("data"));
    }

    #[test]
    fn test_invalid_duration_in_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.toml"), "duration = 45\n").unwrap();

        assert!(matches!(
            Config::get(Some(dir.path().to_path_buf())),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_tiny_history_interval_in_toml() {
        for interval in ["0.0", "-1.0", "1e-300"] {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(
                dir.path().join("settings.toml"),
                format!("history_interval_seconds = {interval}\n"),
            )
            .unwrap();

            assert!(matches!(
                Config::get(Some(dir.path().to_path_buf())),
                Err(ConfigError::InvalidHistoryInterval(_))
            ));
        }

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.toml"),
            "history_interval_seconds = 0.5\n",
        )
        .unwrap();
        let config = Config::get(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.settings.history_interval_seconds, 0.5);
    }

    #[test]
    fn test_default_settings_serialize_to_toml() {
        let toml = toml::to_string_pretty(&Settings::default()).unwrap();
        assert!(toml.contains("duration = 60"));
        assert!(toml.contains("[results]"));
    }
}
