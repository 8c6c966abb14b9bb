// src/config/env.rs
//! Environment overrides, applied after the config file.
//!
//! Lookup is passed in (`|key| std::env::var(key).ok()` in production) so tests can
//! feed a map instead of touching the process environment.

use std::{fmt::Display, str::FromStr, time::Duration};

use tracing::debug;

use super::options::AppOptions;
use crate::error::ConfigError;

pub const PORT: &str = "NEXTRIDE_PORT";
pub const BIND: &str = "NEXTRIDE_BIND";
pub const URL_TEMPLATE: &str = "NEXTRIDE_URL_TEMPLATE";
pub const NAV_TIMEOUT_MS: &str = "NEXTRIDE_NAV_TIMEOUT_MS";
pub const MARKER_TIMEOUT_MS: &str = "NEXTRIDE_MARKER_TIMEOUT_MS";
pub const REPAIR_DESTINATION: &str = "NEXTRIDE_REPAIR_DESTINATION";
pub const CHROME_PATH: &str = "NEXTRIDE_CHROME_PATH";
pub const HEADLESS: &str = "NEXTRIDE_HEADLESS";
pub const LOG_FILE: &str = "NEXTRIDE_LOG_FILE";

fn try_load<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        debug!("{key} not set, keeping current value");
        return Ok(None);
    };

    raw.trim()
        .parse()
        .map(Some)
        .map_err(|e: T::Err| ConfigError::Invalid {
            key: key.to_string(),
            value: raw.clone(),
            reason: e.to_string(),
        })
}

fn try_flag<F>(lookup: &F, key: &str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::Invalid {
            key: key.to_string(),
            value: raw,
            reason: "expected true/false".into(),
        }),
    }
}

pub fn apply<F>(opts: &mut AppOptions, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = try_load(&lookup, PORT)? {
        opts.server.port = port;
    }
    if let Some(bind) = lookup(BIND) {
        opts.server.bind = bind;
    }
    if let Some(template) = lookup(URL_TEMPLATE) {
        opts.scrape.url_template = template;
    }
    if let Some(ms) = try_load::<u64, _>(&lookup, NAV_TIMEOUT_MS)? {
        opts.scrape.navigation_timeout = Duration::from_millis(ms);
    }
    if let Some(ms) = try_load::<u64, _>(&lookup, MARKER_TIMEOUT_MS)? {
        opts.scrape.marker_timeout = Duration::from_millis(ms);
    }
    if let Some(repair) = try_flag(&lookup, REPAIR_DESTINATION)? {
        opts.scrape.repair_destination = repair;
    }
    if let Some(path) = lookup(CHROME_PATH) {
        opts.browser.executable = Some(path.into());
    }
    if let Some(headless) = try_flag(&lookup, HEADLESS)? {
        opts.browser.headless = headless;
    }
    if let Some(path) = lookup(LOG_FILE) {
        opts.log_file = Some(path.into());
    }
    Ok(())
}
