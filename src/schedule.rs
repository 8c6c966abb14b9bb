// src/schedule.rs
//! The one externally visible operation: stop id in, arrival records out.
//!
//! Per request:
//! `Idle → SessionLaunching → Navigating → WaitingForMarker → Extracting → SessionClosed`.
//! Any failure jumps straight to `SessionClosed` after the session is released.
//! There is no retry; callers re-fetch if they want to.

use std::{
    panic::AssertUnwindSafe,
    sync::Arc,
    time::{Duration, Instant},
};

use futures::FutureExt;
use tracing::{debug, error, info, warn};

use crate::{
    browser::{BrowserLauncher, BrowserSession, ChromeLauncher},
    config::options::{AppOptions, ScrapeOptions},
    data::{ArrivalFilter, ArrivalRecord},
    error::{BrowserError, ScheduleError},
    navigator::{self, stop_url},
    specs::stop_board::{project_rows, read_board},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchStage {
    Idle,
    SessionLaunching,
    Navigating,
    WaitingForMarker,
    Extracting,
    SessionClosed,
}

/// Trimmed, non-empty, and safe to put in a URL path segment.
pub fn validate_stop(raw: Option<&str>) -> Result<&str, ScheduleError> {
    let stop = raw.map(str::trim).unwrap_or_default();

    if stop.is_empty() {
        return Err(ScheduleError::missing_stop());
    }
    if !stop
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ScheduleError::InvalidRequest(format!(
            "Invalid stop number: {stop}"
        )));
    }
    Ok(stop)
}

#[derive(Clone)]
pub struct ScheduleService {
    launcher: Arc<dyn BrowserLauncher>,
    options: ScrapeOptions,
}

impl ScheduleService {
    pub fn new(launcher: Arc<dyn BrowserLauncher>, options: ScrapeOptions) -> Self {
        Self { launcher, options }
    }

    /// Service backed by a real Chrome per request.
    pub fn chrome(opts: &AppOptions) -> Self {
        let launcher = ChromeLauncher::new(opts.browser.clone(), opts.scrape.marker_poll);
        Self::new(Arc::new(launcher), opts.scrape.clone())
    }

    pub async fn fetch_filtered(
        &self,
        stop: Option<&str>,
        filter: ArrivalFilter,
    ) -> Result<Vec<ArrivalRecord>, ScheduleError> {
        self.fetch(stop).await.map(|records| filter.apply(records))
    }

    pub async fn fetch(&self, stop: Option<&str>) -> Result<Vec<ArrivalRecord>, ScheduleError> {
        let stop = validate_stop(stop)?;
        let started = Instant::now();
        let mut stage = FetchStage::Idle;
        debug!(stop, ?stage, "schedule fetch requested");

        stage = FetchStage::SessionLaunching;
        let mut session = match self.launcher.launch().await {
            Ok(session) => session,
            Err(e) => return Err(fail(stop, stage, started.elapsed(), e)),
        };

        let outcome = AssertUnwindSafe(self.run(session.as_mut(), stop, &mut stage))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| Err(BrowserError::Script("extraction panicked".into())));

        // Released on every path, exactly once.
        let closed = session.close().await;
        drop(session);
        let failed_at = stage;
        stage = FetchStage::SessionClosed;

        if let Err(e) = &closed {
            warn!(stop, "browser close reported an error: {e}");
        }

        match outcome {
            Ok(records) => {
                info!(
                    stop,
                    ?stage,
                    records = records.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "schedule fetched"
                );
                Ok(records)
            }
            Err(e) => Err(fail(stop, failed_at, started.elapsed(), e)),
        }
    }

    async fn run(
        &self,
        session: &mut dyn BrowserSession,
        stop: &str,
        stage: &mut FetchStage,
    ) -> Result<Vec<ArrivalRecord>, BrowserError> {
        let opts = &self.options;

        *stage = FetchStage::Navigating;
        let url = stop_url(&opts.url_template, stop);
        navigator::navigate(session, &url, opts).await?;

        *stage = FetchStage::WaitingForMarker;
        navigator::wait_for_board(session, opts).await?;
        if opts.reject_loading_title {
            navigator::ensure_loaded(session).await?;
        }

        *stage = FetchStage::Extracting;
        let rows = read_board(session, &opts.board).await?;
        if rows.is_empty() {
            warn!(stop, selector = %opts.board.row, "board rendered but no trip rows matched");
        }

        Ok(project_rows(rows, opts.repair_destination))
    }
}

fn fail(stop: &str, stage: FetchStage, elapsed: Duration, cause: BrowserError) -> ScheduleError {
    error!(
        stop,
        ?stage,
        elapsed_ms = elapsed.as_millis() as u64,
        "schedule fetch failed: {cause}"
    );
    ScheduleError::FetchFailure(cause)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_and_blank() {
        assert!(matches!(validate_stop(None), Err(ScheduleError::InvalidRequest(_))));
        assert!(matches!(validate_stop(Some("")), Err(ScheduleError::InvalidRequest(_))));
        assert!(matches!(validate_stop(Some("   ")), Err(ScheduleError::InvalidRequest(_))));
    }

    #[test]
    fn rejects_path_characters() {
        assert!(validate_stop(Some("1073/../admin")).is_err());
        assert!(validate_stop(Some("10 73")).is_err());
    }

    #[test]
    fn accepts_and_trims() {
        assert_eq!(validate_stop(Some(" 1073 ")).unwrap(), "1073");
        assert_eq!(validate_stop(Some("ION-301")).unwrap(), "ION-301");
    }

    #[test]
    fn missing_stop_message() {
        assert_eq!(ScheduleError::missing_stop().to_string(), "Stop number is required");
    }
}
