// src/server/state.rs
use std::sync::Arc;

use crate::{config::options::AppOptions, schedule::ScheduleService};

pub struct AppState {
    pub options: AppOptions,
    pub service: ScheduleService,
}

impl AppState {
    /// Chrome-backed state for the real server.
    pub fn new(options: AppOptions) -> Arc<Self> {
        let service = ScheduleService::chrome(&options);
        Self::with_service(options, service)
    }

    pub fn with_service(options: AppOptions, service: ScheduleService) -> Arc<Self> {
        Arc::new(Self { options, service })
    }
}
