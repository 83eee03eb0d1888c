use derive_more::From;
use thiserror::Error;

use crate::config::ConfigError;
use crate::results::ResultsError;

/// Errors that end the program
#[derive(Debug, From, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(ConfigError),

    #[error("{0}")]
    Results(ResultsError),

    #[error("Terminal error: {0}")]
    Io(std::io::Error),

    #[error("Failed to set up logging: {0}")]
    Logging(Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to render settings: {0}")]
    Serialize(toml::ser::Error),
}
