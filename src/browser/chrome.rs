// src/browser/chrome.rs
//! Chrome over the DevTools protocol (`chromiumoxide`).
//!
//! One `launch()` = one Chrome process with its own throwaway profile directory,
//! so concurrent requests never fight over a profile lock.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use chromiumoxide::{
    Page,
    browser::{Browser, BrowserConfig},
    cdp::js_protocol::runtime::EvaluateParams,
};
use futures::StreamExt;
use serde_json::Value;
use tokio::{
    task::JoinHandle,
    time::{sleep, timeout},
};
use tracing::{debug, warn};

use super::{BrowserLauncher, BrowserSession};
use crate::{config::options::BrowserOptions, error::BrowserError};

static PROFILE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Throwaway Chrome profile. Removed by `close`, or on drop for every other exit
/// (failed launch, cancelled request, panic).
struct ProfileDir {
    path: PathBuf,
    removed: bool,
}

impl ProfileDir {
    fn create_under(root: &Path) -> Result<Self, BrowserError> {
        let seq = PROFILE_SEQ.fetch_add(1, Ordering::Relaxed);
        let path = root.join(format!("nextride-chrome-{}-{seq}", std::process::id()));
        std::fs::create_dir_all(&path).map_err(|e| {
            BrowserError::Launch(format!("cannot create profile {}: {e}", path.display()))
        })?;
        Ok(Self { path, removed: false })
    }

    fn path(&self) -> &Path {
        &self.path
    }

    async fn remove(&mut self) {
        if std::mem::replace(&mut self.removed, true) {
            return;
        }
        if let Err(e) = tokio::fs::remove_dir_all(&self.path).await {
            debug!(profile = %self.path.display(), "profile cleanup skipped: {e}");
        }
    }
}

impl Drop for ProfileDir {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => debug!(profile = %self.path.display(), "profile removed on drop"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(profile = %self.path.display(), "profile left behind: {e}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ChromeLauncher {
    options: BrowserOptions,
    /// Interval between selector probes in `wait_for_selector`.
    poll: Duration,
    /// Parent of the per-launch profile directories.
    profile_root: PathBuf,
}

impl ChromeLauncher {
    pub fn new(options: BrowserOptions, poll: Duration) -> Self {
        Self {
            options,
            poll,
            profile_root: std::env::temp_dir(),
        }
    }

    pub fn with_profile_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.profile_root = root.into();
        self
    }

    fn config(&self, profile: &Path) -> Result<BrowserConfig, BrowserError> {
        let (w, h) = self.options.window;
        let mut builder = BrowserConfig::builder()
            .window_size(w, h)
            .user_data_dir(profile)
            .args(self.options.args.iter().cloned());

        if !self.options.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &self.options.executable {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(BrowserError::Launch)
    }
}

#[async_trait]
impl BrowserLauncher for ChromeLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, BrowserError> {
        // Dropped (and deleted) on any early return below.
        let profile = ProfileDir::create_under(&self.profile_root)?;
        let config = self.config(profile.path())?;

        let (browser, mut handler) = Browser::launch(config).await?;
        debug!(profile = %profile.path().display(), "chrome launched");

        // The handler must be polled for any command to make progress.
        let pump = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("devtools handler stopped: {e}");
                    break;
                }
            }
        });

        Ok(Box::new(ChromeSession {
            browser,
            page: None,
            pump,
            profile,
            poll: self.poll,
            closed: false,
        }))
    }
}

pub struct ChromeSession {
    browser: Browser,
    page: Option<Page>,
    pump: JoinHandle<()>,
    /// Declared after `browser` so the process is killed before its profile is deleted.
    profile: ProfileDir,
    poll: Duration,
    closed: bool,
}

impl ChromeSession {
    fn page(&self) -> Result<&Page, BrowserError> {
        self.page
            .as_ref()
            .ok_or_else(|| BrowserError::Script("no page has been navigated yet".into()))
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn navigate(&mut self, url: &str, limit: Duration) -> Result<(), BrowserError> {
        let load = async {
            if self.page.is_none() {
                self.page = Some(self.browser.new_page("about:blank").await?);
            }
            self.page()?.goto(url).await?;
            Ok::<_, BrowserError>(())
        };

        timeout(limit, load)
            .await
            .map_err(|_| BrowserError::NavigationTimeout {
                url: url.to_string(),
                timeout: limit,
            })?
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        limit: Duration,
    ) -> Result<(), BrowserError> {
        let page = self.page()?;
        let poll = self.poll;

        let probe = async {
            loop {
                if page.find_element(selector).await.is_ok() {
                    return;
                }
                sleep(poll).await;
            }
        };

        timeout(limit, probe)
            .await
            .map_err(|_| BrowserError::MarkerTimeout {
                selector: selector.to_string(),
                timeout: limit,
            })
    }

    async fn evaluate(&mut self, script: &str) -> Result<Value, BrowserError> {
        let params = EvaluateParams::builder()
            .expression(script)
            .return_by_value(true)
            .await_promise(true)
            .build()
            .map_err(BrowserError::Script)?;

        let result = self.page()?.evaluate_expression(params).await?;
        Ok(result.into_value::<Value>()?)
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.page = None;

        let closed = self.browser.close().await;
        if let Err(e) = self.browser.wait().await {
            warn!("chrome did not exit cleanly: {e}");
        }
        self.pump.abort();

        self.profile.remove().await;

        closed.map(|_| ()).map_err(BrowserError::from)
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        if !self.closed {
            // `Browser`'s drop kills the child and `ProfileDir`'s drop deletes the profile;
            // only the pump is left.
            warn!("chrome session dropped without close");
            self.pump.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("nextride-test-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(&root).unwrap();
        root
    }

    fn entries(root: &Path) -> usize {
        std::fs::read_dir(root).unwrap().count()
    }

    #[test]
    fn dropped_profile_is_deleted() {
        let root = scratch("drop");
        let dir = ProfileDir::create_under(&root).unwrap();
        std::fs::write(dir.path().join("Local State"), "{}").unwrap();
        assert_eq!(entries(&root), 1);

        drop(dir);
        assert_eq!(entries(&root), 0);
    }

    #[tokio::test]
    async fn explicit_remove_then_drop() {
        let root = scratch("remove");
        let mut dir = ProfileDir::create_under(&root).unwrap();

        dir.remove().await;
        assert!(!dir.path().exists());
        dir.remove().await;
        drop(dir);
        assert_eq!(entries(&root), 0);
    }

    #[tokio::test]
    async fn failed_launch_leaves_no_profile() {
        let root = scratch("launch");
        let options = BrowserOptions {
            executable: Some(root.join("no-such-chrome")),
            ..BrowserOptions::default()
        };
        let launcher =
            ChromeLauncher::new(options, Duration::from_millis(10)).with_profile_root(&root);

        assert!(launcher.launch().await.is_err());
        assert_eq!(entries(&root), 0);
    }
}
