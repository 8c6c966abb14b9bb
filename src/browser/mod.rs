// src/browser/mod.rs
//! Headless browser seam.
//!
//! The schedule pipeline talks to a browser only through these two traits, so the
//! real Chrome driver (`chrome`) and test doubles are interchangeable.
//!
//! Lifetime rules:
//! - [`BrowserLauncher::launch`] starts one fresh browser process per call. Nothing is pooled.
//! - A [`BrowserSession`] is owned by exactly one request and must be closed by it.
//!   Implementations should also release the process on `Drop` for the paths where
//!   `close` never runs (panic, cancelled future).

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::BrowserError;

pub mod chrome;

pub use chrome::ChromeLauncher;

#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, BrowserError>;
}

#[async_trait]
pub trait BrowserSession: Send {
    /// Load `url` and wait for the load to settle, bounded by `timeout`.
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), BrowserError>;

    /// Block until `selector` matches an element, bounded by `timeout`.
    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), BrowserError>;

    /// Evaluate a JavaScript expression in the page and return its JSON value.
    async fn evaluate(&mut self, script: &str) -> Result<Value, BrowserError>;

    /// Shut the browser down. Called once per session.
    async fn close(&mut self) -> Result<(), BrowserError>;
}
