// src/error.rs
use std::{path::PathBuf, time::Duration};

use chromiumoxide::error::CdpError;
use thiserror::Error;

/// Anything that can go wrong while a browser session is open.
/// Never shown to HTTP callers; logged and collapsed into [`ScheduleError::FetchFailure`].
#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("browser launch failed: {0}")]
    Launch(String),

    #[error("devtools protocol error: {0}")]
    Cdp(#[from] CdpError),

    #[error("navigation to {url} did not finish within {timeout:?}")]
    NavigationTimeout { url: String, timeout: Duration },

    #[error("`{selector}` did not appear within {timeout:?}")]
    MarkerTimeout { selector: String, timeout: Duration },

    #[error("page is still showing its loading screen (title: {title:?})")]
    StillLoading { title: String },

    #[error("in-page script failed: {0}")]
    Script(String),

    #[error("unexpected value from page: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Boundary taxonomy for a schedule fetch.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("{0}")]
    InvalidRequest(String),

    /// The cause is kept as `source()` for the server log only.
    #[error("Failed to fetch schedule data")]
    FetchFailure(#[source] BrowserError),
}

impl ScheduleError {
    pub fn missing_stop() -> Self {
        ScheduleError::InvalidRequest("Stop number is required".to_string())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}
