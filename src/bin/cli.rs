// src/bin/cli.rs
use clap::Parser;
use nextride_scrape::cli::{self, Args};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run(Args::parse()).await
}
