//! Leaderboard service entry point
//!
//! Boot sequence: load configuration from the environment, construct the
//! coordinator (restoring from a snapshot if one exists), bind the HTTP
//! router, and start a periodic snapshot-save task alongside the server.
//! On shutdown (Ctrl+C), a final snapshot save runs before exiting.

mod config;
mod error;
mod handlers;
mod rate_limit;
mod routes;
mod seed;
mod simulator;
mod state;

use config::ServerConfig;
use leaderboard_engine::{Coordinator, EngineConfig};
use simulator::SimulatorHandle;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Cadence of the periodic background snapshot save, independent of the
/// simulator's own tick interval.
const SNAPSHOT_SAVE_INTERVAL: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Arc::new(ServerConfig::from_env());
    log::info!(
        "starting leaderboard service on port {} (ratings [{}, {}])",
        config.port,
        config.rating_bounds.min,
        config.rating_bounds.max
    );

    let engine_config = EngineConfig {
        bounds: config.rating_bounds,
        ..EngineConfig::default()
    };
    let coordinator = Arc::new(Coordinator::new(engine_config));

    if std::path::Path::new(&config.snapshot_path).exists() {
        match leaderboard_engine::persistence::load(&coordinator, &config.snapshot_path) {
            Ok(count) => log::info!("restored {count} users from {}", config.snapshot_path),
            Err(err) => log::warn!("failed to load snapshot {}: {err}", config.snapshot_path),
        }
    }

    if coordinator.total_users() == 0 && config.initial_users > 0 {
        let added = seed::populate(&coordinator, config.initial_users);
        log::info!("seeded {added} initial users (INITIAL_USERS={})", config.initial_users);
    }

    let state = AppState {
        coordinator: coordinator.clone(),
        config: config.clone(),
        simulator: SimulatorHandle::new(),
    };

    spawn_periodic_snapshot(coordinator.clone(), config.snapshot_path.clone());

    let app = routes::build_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|err| panic!("failed to bind {addr}: {err}"));

    log::info!("listening on http://{addr}");

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal());

    if let Err(err) = server.await {
        log::error!("server error: {err}");
    }

    if let Err(err) = leaderboard_engine::persistence::save(&coordinator, &config.snapshot_path) {
        log::error!("failed to save snapshot on shutdown: {err}");
    } else {
        log::info!("saved snapshot to {} before exit", config.snapshot_path);
    }
}

fn spawn_periodic_snapshot(coordinator: Arc<Coordinator>, path: String) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SNAPSHOT_SAVE_INTERVAL);
        loop {
            ticker.tick().await;
            match leaderboard_engine::persistence::save(&coordinator, &path) {
                Ok(()) => log::debug!("periodic snapshot saved to {path}"),
                Err(err) => log::error!("periodic snapshot save failed: {err}"),
            }
        }
    });
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    log::info!("shutdown signal received");
}
