use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ResultsConfig {
    pub save_enabled: bool,
    /// How many results the history view lists
    pub recent_limit: usize,
    pub directory: Option<PathBuf>,
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            save_enabled: true,
            recent_limit: 10,
            directory: None,
        }
    }
}
