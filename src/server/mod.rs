// src/server/mod.rs
//! HTTP surface.
//!
//! - `GET /schedule?stop=<id>[&live=<bool>][&countdown=<bool>]` → `[ArrivalRecord]`
//! - `GET /api/schedule/{stop}` → `{ stopNumber, trips }` (live trips only)
//!
//! Errors are `{ "error": msg }` with 400 for bad input and 500 for anything the
//! browser pipeline raised.

use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};
use tokio::{
    net::TcpListener,
    signal::{self, ctrl_c},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub mod error;
pub mod routes;
pub mod state;

use routes::{schedule_handler, stop_board_handler};
use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(state.options.server.cors_max_age);

    Router::new()
        .route("/schedule", get(schedule_handler))
        .route("/api/schedule/{stop}", get(stop_board_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind, serve until Ctrl+C or SIGTERM, then drain in-flight requests.
pub async fn start_server(state: Arc<AppState>) -> std::io::Result<()> {
    let address = state.options.server.address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
