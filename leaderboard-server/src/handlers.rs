//! HTTP handlers implementing the `/api/*` contract

use crate::error::ApiError;
use crate::seed;
use crate::state::AppState;
use crate::simulator::SimulatorStatus;
use axum::extract::{Path, Query, State};
use axum::Json;
use leaderboard_core::RankedUser;
use serde::{Deserialize, Serialize};

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 100;
const MIN_SEED_COUNT: u32 = 1;
const MAX_SEED_COUNT: u32 = 100_000;

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    limit: Option<usize>,
    offset: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    users: Vec<RankedUser>,
    total_users: u64,
    page: usize,
    page_size: usize,
    has_more: bool,
}

/// `GET /api/leaderboard?limit=<1..100>&offset=<>=0>`
///
/// Out-of-range `limit`/`offset` fall back to the documented defaults
/// rather than erroring: pagination parameters are advisory, not a
/// validated contract.
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Json<LeaderboardResponse> {
    let limit = query
        .limit
        .filter(|&l| l >= 1 && l <= MAX_LIMIT)
        .unwrap_or(DEFAULT_LIMIT);
    let offset = query.offset.unwrap_or(0);

    let users = state.coordinator.top_n(limit, offset);
    let total_users = state.coordinator.total_users();
    let page = offset / limit + 1;
    let has_more = (offset + users.len()) < total_users as usize;

    Json(LeaderboardResponse {
        users,
        total_users,
        page,
        page_size: limit,
        has_more,
    })
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    users: Vec<RankedUser>,
    query: String,
    count: usize,
}

/// `GET /api/search?q=<raw>`
pub async fn search_users(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let users = state.coordinator.search(&query.q);
    Json(SearchResponse {
        count: users.len(),
        query: query.q,
        users,
    })
}

/// `GET /api/users/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RankedUser>, ApiError> {
    Ok(Json(state.coordinator.get_user(&id)?))
}

#[derive(Debug, Deserialize)]
pub struct UpdateRatingBody {
    rating: i64,
}

/// `PATCH /api/users/{id}/rating`
///
/// Unlike `GET /api/users/{id}`, an unknown id here maps to 400, not 404:
/// this endpoint's contract treats "nothing to update" the same as any
/// other malformed request.
pub async fn update_rating(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateRatingBody>,
) -> Result<Json<RankedUser>, ApiError> {
    state.coordinator.update_rating(&id, body.rating).map_err(|err| match err {
        leaderboard_core::Error::NotFound(id) => {
            log::warn!("400 unknown id on rating update: {id}");
            ApiError::bad_request("not_found", format!("user not found: {id}"))
        }
        other => ApiError::from(other),
    })?;
    Ok(Json(state.coordinator.get_user(&id)?))
}

#[derive(Debug, Deserialize)]
pub struct SeedQuery {
    count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    message: String,
    users_added: u32,
}

/// `POST /api/seed?count=<1..100000>`
///
/// Clears and repopulates the leaderboard, per the preserved contract
/// that seeding always replaces the current population.
pub async fn seed(
    State(state): State<AppState>,
    Query(query): Query<SeedQuery>,
) -> Result<Json<SeedResponse>, ApiError> {
    let count = query
        .count
        .filter(|&c| c >= MIN_SEED_COUNT && c <= MAX_SEED_COUNT)
        .ok_or_else(|| {
            ApiError::bad_request(
                "invalid",
                format!("count must be in [{MIN_SEED_COUNT}, {MAX_SEED_COUNT}]"),
            )
        })?;

    state.coordinator.clear();
    let added = seed::populate(&state.coordinator, count);

    log::info!("seeded {added} users");
    Ok(Json(SeedResponse {
        message: "leaderboard seeded".to_string(),
        users_added: added,
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    total_users: u64,
    domain_width: usize,
    min_rating: i64,
    max_rating: i64,
}

/// `GET /api/health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let stats = state.coordinator.stats();
    Json(HealthResponse {
        status: "ok",
        total_users: stats.total_users,
        domain_width: stats.domain_width,
        min_rating: stats.min_rating,
        max_rating: stats.max_rating,
    })
}

/// `POST /api/simulator/start`
pub async fn simulator_start(State(state): State<AppState>) -> Json<SimulatorStatus> {
    let bounds = state.coordinator.config().bounds;
    let interval = std::time::Duration::from_millis(state.config.update_interval_ms);
    state.simulator.start(state.coordinator.clone(), bounds, interval);
    Json(state.simulator.status())
}

/// `POST /api/simulator/stop`
pub async fn simulator_stop(State(state): State<AppState>) -> Json<SimulatorStatus> {
    state.simulator.stop();
    Json(state.simulator.status())
}

/// `GET /api/simulator/status`
pub async fn simulator_status(State(state): State<AppState>) -> Json<SimulatorStatus> {
    Json(state.simulator.status())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use axum::response::IntoResponse;
    use leaderboard_engine::Coordinator;
    use std::sync::Arc;

    fn state_with(users: &[(&str, &str, i64)]) -> AppState {
        let config = ServerConfig::from_env();
        let coordinator = Arc::new(Coordinator::new(leaderboard_engine::EngineConfig {
            bounds: config.rating_bounds,
            ..Default::default()
        }));
        for (id, name, rating) in users {
            coordinator
                .add_user(id.to_string(), name.to_string(), *rating)
                .unwrap();
        }
        AppState {
            coordinator,
            config: Arc::new(config),
            simulator: crate::simulator::SimulatorHandle::new(),
        }
    }

    #[tokio::test]
    async fn leaderboard_defaults_limit_and_offset() {
        let state = state_with(&[("1", "alice", 5000), ("2", "bob", 4000)]);
        let resp = get_leaderboard(State(state), Query(LeaderboardQuery { limit: None, offset: None })).await;
        assert_eq!(resp.0.page_size, DEFAULT_LIMIT);
        assert_eq!(resp.0.page, 1);
        assert_eq!(resp.0.users.len(), 2);
        assert!(!resp.0.has_more);
    }

    #[tokio::test]
    async fn leaderboard_out_of_range_limit_falls_back_to_default() {
        let state = state_with(&[("1", "alice", 5000)]);
        let resp = get_leaderboard(
            State(state),
            Query(LeaderboardQuery { limit: Some(0), offset: None }),
        )
        .await;
        assert_eq!(resp.0.page_size, DEFAULT_LIMIT);
    }

    #[tokio::test]
    async fn leaderboard_page_uses_integer_division_formula() {
        let state = state_with(&[
            ("1", "a", 5000),
            ("2", "b", 4000),
            ("3", "c", 3000),
            ("4", "d", 2000),
            ("5", "e", 1000),
        ]);
        let resp = get_leaderboard(
            State(state),
            Query(LeaderboardQuery { limit: Some(2), offset: Some(3) }),
        )
        .await;
        // offset / limit + 1 = 3 / 2 + 1 = 2
        assert_eq!(resp.0.page, 2);
        assert!(!resp.0.has_more);
    }

    #[tokio::test]
    async fn leaderboard_has_more_when_results_remain() {
        let state = state_with(&[("1", "a", 5000), ("2", "b", 4000), ("3", "c", 3000)]);
        let resp = get_leaderboard(
            State(state),
            Query(LeaderboardQuery { limit: Some(2), offset: Some(0) }),
        )
        .await;
        assert!(resp.0.has_more);
    }

    #[tokio::test]
    async fn search_empty_query_yields_zero_results() {
        let state = state_with(&[("1", "alice", 5000)]);
        let resp = search_users(State(state), Query(SearchQuery { q: String::new() })).await;
        assert_eq!(resp.0.count, 0);
    }

    #[tokio::test]
    async fn get_user_unknown_id_is_404() {
        let state = state_with(&[]);
        let err = get_user(State(state), Path("ghost".to_string())).await.unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_rating_unknown_id_is_400_not_404() {
        let state = state_with(&[]);
        let err = update_rating(
            State(state),
            Path("ghost".to_string()),
            Json(UpdateRatingBody { rating: 3000 }),
        )
        .await
        .unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn seed_rejects_count_outside_bounds() {
        let state = state_with(&[]);
        let err = seed(State(state), Query(SeedQuery { count: Some(0) }))
            .await
            .unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn seed_replaces_existing_population() {
        let state = state_with(&[("old", "ghost", 3000)]);
        let coordinator = state.coordinator.clone();
        seed(State(state), Query(SeedQuery { count: Some(5) })).await.unwrap();
        assert_eq!(coordinator.total_users(), 5);
        assert!(coordinator.get_user("old").is_err());
    }

    #[tokio::test]
    async fn health_reports_domain_width() {
        let state = state_with(&[("1", "alice", 3000)]);
        let resp = health(State(state)).await;
        assert_eq!(resp.0.total_users, 1);
        assert!(resp.0.domain_width > 0);
    }
}
