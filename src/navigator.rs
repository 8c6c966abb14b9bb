// src/navigator.rs
//! Page navigation for a stop: build the URL, load it, and wait for the board container.

use tracing::debug;

use crate::{
    browser::BrowserSession,
    config::{
        consts::{LOADING_TITLE, STOP_PLACEHOLDER},
        options::ScrapeOptions,
    },
    error::BrowserError,
};

/// Substitute a (validated) stop id into the URL template.
pub fn stop_url(template: &str, stop: &str) -> String {
    template.replace(STOP_PLACEHOLDER, stop)
}

/// Load the page. Bounded by `navigation_timeout`; no retry.
pub async fn navigate(
    session: &mut dyn BrowserSession,
    url: &str,
    opts: &ScrapeOptions,
) -> Result<(), BrowserError> {
    debug!(%url, timeout = ?opts.navigation_timeout, "navigating");
    session.navigate(url, opts.navigation_timeout).await
}

/// Wait for the board container. Pages can report "loaded" before their script has
/// rendered anything, so this is a separate, shorter bound.
pub async fn wait_for_board(
    session: &mut dyn BrowserSession,
    opts: &ScrapeOptions,
) -> Result<(), BrowserError> {
    debug!(selector = %opts.board.marker, timeout = ?opts.marker_timeout, "waiting for board");
    session
        .wait_for_selector(&opts.board.marker, opts.marker_timeout)
        .await
}

/// Reject a page that is still on its loading screen.
pub async fn ensure_loaded(session: &mut dyn BrowserSession) -> Result<(), BrowserError> {
    let title = session.evaluate("document.title").await?;
    let title = title.as_str().unwrap_or_default();

    if title.contains(LOADING_TITLE) {
        return Err(BrowserError::StillLoading {
            title: title.to_string(),
        });
    }
    Ok(())
}
