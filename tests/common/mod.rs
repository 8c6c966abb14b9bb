// tests/common/mod.rs
#![allow(dead_code)]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use serde_json::{Value, json};

use nextride_scrape::{
    browser::{BrowserLauncher, BrowserSession},
    config::options::ScrapeOptions,
    error::BrowserError,
    schedule::ScheduleService,
};

/// How the fake page behaves.
#[derive(Clone, Debug)]
pub struct Plan {
    pub launch_fails: bool,
    pub navigation_times_out: bool,
    pub marker_times_out: bool,
    pub panic_on_read: bool,
    pub title: String,
    pub rows: Value,
}

impl Default for Plan {
    fn default() -> Self {
        Self {
            launch_fails: false,
            navigation_times_out: false,
            marker_times_out: false,
            panic_on_read: false,
            title: "Stop 1073 | NextRide".into(),
            rows: json!([]),
        }
    }
}

impl Plan {
    pub fn rows(rows: Value) -> Self {
        Self { rows, ..Self::default() }
    }
}

#[derive(Debug, Default)]
pub struct Calls {
    pub launches: AtomicUsize,
    pub closes: AtomicUsize,
    pub urls: Mutex<Vec<String>>,
    pub selectors: Mutex<Vec<String>>,
}

impl Calls {
    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }

    pub fn selectors(&self) -> Vec<String> {
        self.selectors.lock().unwrap().clone()
    }
}

pub struct SpyLauncher {
    pub plan: Plan,
    pub calls: Arc<Calls>,
}

impl SpyLauncher {
    pub fn new(plan: Plan) -> Self {
        Self { plan, calls: Arc::default() }
    }
}

#[async_trait]
impl BrowserLauncher for SpyLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, BrowserError> {
        self.calls.launches.fetch_add(1, Ordering::SeqCst);
        if self.plan.launch_fails {
            return Err(BrowserError::Launch("no chrome on this machine".into()));
        }
        Ok(Box::new(SpySession {
            plan: self.plan.clone(),
            calls: Arc::clone(&self.calls),
        }))
    }
}

pub struct SpySession {
    plan: Plan,
    calls: Arc<Calls>,
}

#[async_trait]
impl BrowserSession for SpySession {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), BrowserError> {
        self.calls.urls.lock().unwrap().push(url.to_string());
        if self.plan.navigation_times_out {
            return Err(BrowserError::NavigationTimeout { url: url.to_string(), timeout });
        }
        Ok(())
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        self.calls.selectors.lock().unwrap().push(selector.to_string());
        if self.plan.marker_times_out {
            return Err(BrowserError::MarkerTimeout { selector: selector.to_string(), timeout });
        }
        Ok(())
    }

    async fn evaluate(&mut self, script: &str) -> Result<Value, BrowserError> {
        if script == "document.title" {
            return Ok(Value::String(self.plan.title.clone()));
        }
        if self.plan.panic_on_read {
            panic!("row reader blew up");
        }
        Ok(self.plan.rows.clone())
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        self.calls.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Service over a spy, plus a handle on what the spy saw.
pub fn service(plan: Plan) -> (ScheduleService, Arc<Calls>) {
    service_with(plan, ScrapeOptions::default())
}

pub fn service_with(plan: Plan, options: ScrapeOptions) -> (ScheduleService, Arc<Calls>) {
    let launcher = SpyLauncher::new(plan);
    let calls = Arc::clone(&launcher.calls);
    (ScheduleService::new(Arc::new(launcher), options), calls)
}

/// A board in the shape the in-page reader returns.
pub fn sample_board() -> Value {
    json!([
        { "route": " 7 ", "destination": "Mainline", "time": "Now", "live": true },
        { "route": "12", "destination": "", "time": "5 min", "live": true },
        { "route": "", "destination": "Downtown", "time": "6 mins", "live": false },
        { "route": "201", "destination": "Conestogato Mall", "time": "12 mins", "live": false },
        { "route": "12", "destination": "Downtown", "time": "10:42", "live": true }
    ])
}
