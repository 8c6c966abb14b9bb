// src/config/mod.rs
//! Options are layered: compiled defaults → `nextride.toml` → `NEXTRIDE_*` environment.

use std::path::{Path, PathBuf};

use tracing::info;

pub mod consts;
pub mod env;
pub mod file;
pub mod options;

use consts::{CONFIG_FILE, CONFIG_PATH_VAR, STOP_PLACEHOLDER};
use options::AppOptions;

use crate::error::ConfigError;

/// Load from the real process environment.
pub fn load() -> Result<AppOptions, ConfigError> {
    load_with(|key| std::env::var(key).ok())
}

/// Load with an explicit config file path, still honouring environment overrides.
pub fn load_from(path: &Path) -> Result<AppOptions, ConfigError> {
    let mut opts = AppOptions::default();
    file::load(path)?.apply(&mut opts);
    env::apply(&mut opts, |key| std::env::var(key).ok())?;
    validate(&opts)?;
    Ok(opts)
}

pub fn load_with<F>(lookup: F) -> Result<AppOptions, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut opts = AppOptions::default();

    // An explicit path must exist; the default file is optional.
    let path = match lookup(CONFIG_PATH_VAR) {
        Some(p) => Some(PathBuf::from(p)),
        None => Some(PathBuf::from(CONFIG_FILE)).filter(|p| p.exists()),
    };
    if let Some(path) = path {
        info!("Reading config from {}", path.display());
        file::load(&path)?.apply(&mut opts);
    }

    env::apply(&mut opts, lookup)?;
    validate(&opts)?;
    Ok(opts)
}

pub fn validate(opts: &AppOptions) -> Result<(), ConfigError> {
    let scrape = &opts.scrape;

    if !scrape.url_template.contains(STOP_PLACEHOLDER) {
        return Err(ConfigError::Invalid {
            key: "url_template".into(),
            value: scrape.url_template.clone(),
            reason: format!("must contain {STOP_PLACEHOLDER}"),
        });
    }

    for (key, value) in [
        ("navigation_timeout", scrape.navigation_timeout),
        ("marker_timeout", scrape.marker_timeout),
        ("marker_poll", scrape.marker_poll),
    ] {
        if value.is_zero() {
            return Err(ConfigError::Invalid {
                key: key.into(),
                value: "0".into(),
                reason: "must be greater than zero".into(),
            });
        }
    }

    let board = &scrape.board;
    for (key, value) in [
        ("board.marker", &board.marker),
        ("board.row", &board.row),
        ("board.route", &board.route),
        ("board.destination", &board.destination),
        ("board.time", &board.time),
        ("board.live_class", &board.live_class),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: key.into(),
                value: value.clone(),
                reason: "selector may not be empty".into(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn defaults_are_valid() {
        let opts = load_with(|_| None).unwrap();
        assert_eq!(opts.scrape.navigation_timeout, Duration::from_secs(30));
        assert_eq!(opts.scrape.marker_timeout, Duration::from_secs(10));
        assert_eq!(opts.scrape.url_template, "https://nextride.grt.ca/stops/{stop}");
        assert!(opts.scrape.repair_destination);
    }

    #[test]
    fn template_without_placeholder_is_invalid() {
        let err = load_with(|key| {
            (key == env::URL_TEMPLATE).then(|| "https://example.test/stops/".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "url_template"));
    }

    #[test]
    fn zero_timeout_is_invalid() {
        let err = load_with(|key| (key == env::MARKER_TIMEOUT_MS).then(|| "0".to_string()));
        assert!(err.is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_with(|key| {
            (key == CONFIG_PATH_VAR).then(|| "/definitely/not/here/nextride.toml".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
