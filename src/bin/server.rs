// src/bin/server.rs
use nextride_scrape::{config, log, server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = config::load()?;
    log::init(options.log_file.as_deref());

    tracing::info!("Starting server...");
    let state = server::state::AppState::new(options);
    server::start_server(state).await?;
    Ok(())
}
