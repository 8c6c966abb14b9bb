// src/config/consts.rs

// Upstream
pub const URL_TEMPLATE: &str = "https://nextride.grt.ca/stops/{stop}";
pub const STOP_PLACEHOLDER: &str = "{stop}";
pub const LOADING_TITLE: &str = "Loading";

// Arrival board markup
pub const MARKER_SELECTOR: &str = ".table-row-group";
pub const ROW_SELECTOR: &str = ".table-row.trip";
pub const ROUTE_SELECTOR: &str = ".number-highlight";
pub const DESTINATION_SELECTOR: &str = ".text-highlight.tracking-tighter";
pub const TIME_SELECTOR: &str = ".minutes";
pub const LIVE_CLASS: &str = "estimated";

// Timing
pub const NAVIGATION_TIMEOUT_MS: u64 = 30_000;
pub const MARKER_TIMEOUT_MS: u64 = 10_000;
pub const MARKER_POLL_MS: u64 = 100;

// Browser
pub const CHROME_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--disable-extensions",
    "--disable-software-rasterizer",
    "--disable-blink-features=AutomationControlled",
];
pub const WINDOW_W: u32 = 1280;
pub const WINDOW_H: u32 = 900;

// Server
pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const CORS_MAX_AGE_SECS: u64 = 60 * 60;

// Config sources
pub const CONFIG_FILE: &str = "nextride.toml";
pub const CONFIG_PATH_VAR: &str = "NEXTRIDE_CONFIG";
