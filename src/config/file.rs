// src/config/file.rs
//! Optional `nextride.toml`. Every key is optional; present keys override the defaults.
//!
//! ```toml
//! log_file = "nextride.log"
//!
//! [server]
//! port = 8080
//!
//! [scrape]
//! url_template = "https://nextride.grt.ca/stops/{stop}"
//! navigation_timeout_ms = 30000
//! repair_destination = false
//!
//! [browser]
//! executable = "/opt/chrome/chrome"
//!
//! [board]
//! row = "div.trip"
//! route = "div[aria-label=Route]"
//! ```

use std::{fs, path::Path, time::Duration};

use serde::Deserialize;

use super::options::AppOptions;
use crate::error::ConfigError;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub log_file: Option<String>,
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub scrape: ScrapeSection,
    #[serde(default)]
    pub browser: BrowserSection,
    #[serde(default)]
    pub board: BoardSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub cors_max_age_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrapeSection {
    pub url_template: Option<String>,
    pub navigation_timeout_ms: Option<u64>,
    pub marker_timeout_ms: Option<u64>,
    pub marker_poll_ms: Option<u64>,
    pub repair_destination: Option<bool>,
    pub reject_loading_title: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BrowserSection {
    pub executable: Option<String>,
    pub headless: Option<bool>,
    pub args: Option<Vec<String>>,
    pub window: Option<(u32, u32)>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardSection {
    pub marker: Option<String>,
    pub row: Option<String>,
    pub route: Option<String>,
    pub destination: Option<String>,
    pub time: Option<String>,
    pub live_class: Option<String>,
}

pub fn parse(text: &str) -> Result<FileConfig, ConfigError> {
    Ok(toml::from_str(text)?)
}

pub fn load(path: &Path) -> Result<FileConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

impl FileConfig {
    pub fn apply(self, opts: &mut AppOptions) {
        if let Some(path) = self.log_file {
            opts.log_file = Some(path.into());
        }

        let server = &mut opts.server;
        set(&mut server.bind, self.server.bind);
        set(&mut server.port, self.server.port);
        set(
            &mut server.cors_max_age,
            self.server.cors_max_age_secs.map(Duration::from_secs),
        );

        let scrape = &mut opts.scrape;
        set(&mut scrape.url_template, self.scrape.url_template);
        set(
            &mut scrape.navigation_timeout,
            self.scrape.navigation_timeout_ms.map(Duration::from_millis),
        );
        set(
            &mut scrape.marker_timeout,
            self.scrape.marker_timeout_ms.map(Duration::from_millis),
        );
        set(
            &mut scrape.marker_poll,
            self.scrape.marker_poll_ms.map(Duration::from_millis),
        );
        set(&mut scrape.repair_destination, self.scrape.repair_destination);
        set(&mut scrape.reject_loading_title, self.scrape.reject_loading_title);

        let board = &mut scrape.board;
        set(&mut board.marker, self.board.marker);
        set(&mut board.row, self.board.row);
        set(&mut board.route, self.board.route);
        set(&mut board.destination, self.board.destination);
        set(&mut board.time, self.board.time);
        set(&mut board.live_class, self.board.live_class);

        let browser = &mut opts.browser;
        if let Some(path) = self.browser.executable {
            browser.executable = Some(path.into());
        }
        set(&mut browser.headless, self.browser.headless);
        set(&mut browser.args, self.browser.args);
        set(&mut browser.window, self.browser.window);
    }
}
