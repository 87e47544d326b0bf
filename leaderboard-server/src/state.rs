//! Shared application state handed to every handler via `axum::extract::State`
//!
//! No hidden singletons: the coordinator is constructed once at startup
//! (optionally pre-loaded from a snapshot), wrapped in this struct, and
//! passed explicitly to the router and to the simulator task.

use crate::config::ServerConfig;
use crate::simulator::SimulatorHandle;
use leaderboard_engine::Coordinator;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<Coordinator>,
    pub config: Arc<ServerConfig>,
    pub simulator: SimulatorHandle,
}
