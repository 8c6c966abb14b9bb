// src/cli.rs
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{WrapErr, eyre};

use crate::{
    config,
    data::{ArrivalFilter, ArrivalRecord},
    schedule::ScheduleService,
};

/// Print the live arrival board for one GRT stop
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// stop number, e.g. 1073
    pub stop: String,

    /// print the JSON array the HTTP service would return
    #[arg(long)]
    pub json: bool,

    /// only rows marked as real-time estimates
    #[arg(long)]
    pub live: bool,

    /// only "Now" and minute countdowns
    #[arg(long)]
    pub countdown: bool,

    /// leave destinations exactly as the page renders them
    #[arg(long)]
    pub no_repair: bool,

    /// config file to use instead of nextride.toml / NEXTRIDE_CONFIG
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn filter(&self) -> ArrivalFilter {
        ArrivalFilter {
            live_only: self.live,
            countdown_only: self.countdown,
        }
    }
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
    let mut opts = match &args.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    }
    .wrap_err("loading configuration")?;

    crate::log::init(opts.log_file.as_deref());

    if args.no_repair {
        opts.scrape.repair_destination = false;
    }

    let service = ScheduleService::chrome(&opts);
    // Generic message only; the cause is already in the log.
    let records = service
        .fetch_filtered(Some(args.stop.as_str()), args.filter())
        .await
        .map_err(|e| eyre!("{e}"))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print!("{}", render_table(&records));
    }
    Ok(())
}

/// `route  destination  time  [live]`, columns padded to the widest cell.
pub fn render_table(records: &[ArrivalRecord]) -> String {
    if records.is_empty() {
        return "No upcoming trips.\n".to_string();
    }

    let route_w = records.iter().map(|r| r.route.chars().count()).max().unwrap_or(0);
    let dest_w = records.iter().map(|r| r.destination.chars().count()).max().unwrap_or(0);
    let time_w = records.iter().map(|r| r.time.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for r in records {
        let line = format!(
            "{:<route_w$}  {:<dest_w$}  {:<time_w$}  {}",
            r.route,
            r.destination,
            r.time,
            if r.is_live { "live" } else { "" },
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
