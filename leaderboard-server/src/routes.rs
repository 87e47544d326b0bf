//! Router assembly: wires every `/api/*` endpoint to its handler and
//! layers the per-IP rate limiter over the whole surface.

use crate::handlers::{
    get_leaderboard, get_user, health, search_users, seed, simulator_start, simulator_status,
    simulator_stop, update_rating,
};
use crate::rate_limit::{rate_limit_middleware, RateLimiter};
use crate::state::AppState;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    let limiter = Arc::new(RateLimiter::new());

    Router::new()
        .route("/api/leaderboard", get(get_leaderboard))
        .route("/api/search", get(search_users))
        .route("/api/users/:id", get(get_user))
        .route("/api/users/:id/rating", patch(update_rating))
        .route("/api/seed", post(seed))
        .route("/api/health", get(health))
        // start/stop accept both GET and POST so a browser address bar can
        // drive them the same way curl -X POST does.
        .route("/api/simulator/start", post(simulator_start).get(simulator_start))
        .route("/api/simulator/stop", post(simulator_stop).get(simulator_stop))
        .route("/api/simulator/status", get(simulator_status))
        .layer(from_fn_with_state(limiter, rate_limit_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
