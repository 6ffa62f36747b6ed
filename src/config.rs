use std::path::PathBuf;

use crate::models::Mode;
use crate::parse::ParseMode;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
pub const DEFAULT_LOG_FILE: &str = "study-deck.log";

/// A saved response to open without calling the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfflineResponse {
    pub path: PathBuf,
    pub mode: Mode,
}

/// Runtime settings, resolved from the command line and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend_url: String,
    pub log_file: PathBuf,
    /// Report malformed questions and tables instead of accepting them.
    pub strict: bool,
    pub open: Option<OfflineResponse>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            strict: false,
            open: None,
        }
    }
}

impl Config {
    pub fn parse_mode(&self) -> ParseMode {
        if self.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }
}
