//! Verbosity levels for export calls
//!
//! Exports take the familiar `DEBUG`/`INFO`/`WARNING`/`ERROR`/`CRITICAL`
//! names. Applying a verbosity sets the global `log` max level, which is the
//! only runtime state shared between exports.

use eyre::Result;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verbosity {
    Debug,
    Info,
    #[default]
    Warning,
    Error,
    Critical,
}

impl Verbosity {
    pub fn level_filter(&self) -> LevelFilter {
        match self {
            Self::Debug => LevelFilter::Debug,
            Self::Info => LevelFilter::Info,
            Self::Warning => LevelFilter::Warn,
            Self::Error | Self::Critical => LevelFilter::Error,
        }
    }

    /// Make this the active log level
    pub fn apply(&self) {
        log::set_max_level(self.level_filter());
    }
}

impl FromStr for Verbosity {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARNING" | "WARN" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            "CRITICAL" => Ok(Self::Critical),
            other => eyre::bail!("Unknown verbosity level: {}", other),
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        };
        write!(f, "{}", name)
    }
}
