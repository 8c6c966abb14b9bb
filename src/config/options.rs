// src/config/options.rs
use std::{path::PathBuf, time::Duration};

use super::consts::*;
use crate::specs::stop_board::BoardSpec;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub server: ServerOptions,
    pub scrape: ScrapeOptions,
    pub browser: BrowserOptions,
    /// Send logs here instead of stderr.
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerOptions {
    pub bind: String,
    pub port: u16,
    pub cors_max_age: Duration,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.into(),
            port: DEFAULT_PORT,
            cors_max_age: Duration::from_secs(CORS_MAX_AGE_SECS),
        }
    }
}

impl ServerOptions {
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Stop page URL with a `{stop}` placeholder.
    pub url_template: String,
    pub board: BoardSpec,
    pub navigation_timeout: Duration,
    pub marker_timeout: Duration,
    pub marker_poll: Duration,
    /// Fix "Conestogato Mall" → "Conestoga to Mall".
    pub repair_destination: bool,
    /// Fail when the page title still says it is loading after the marker showed up.
    pub reject_loading_title: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            url_template: URL_TEMPLATE.into(),
            board: BoardSpec::default(),
            navigation_timeout: Duration::from_millis(NAVIGATION_TIMEOUT_MS),
            marker_timeout: Duration::from_millis(MARKER_TIMEOUT_MS),
            marker_poll: Duration::from_millis(MARKER_POLL_MS),
            repair_destination: true,
            reject_loading_title: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowserOptions {
    /// `None` lets chromiumoxide look for an installed Chrome/Chromium.
    pub executable: Option<PathBuf>,
    pub headless: bool,
    pub args: Vec<String>,
    pub window: (u32, u32),
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            executable: None,
            headless: true,
            args: CHROME_ARGS.iter().map(|a| a.to_string()).collect(),
            window: (WINDOW_W, WINDOW_H),
        }
    }
}
