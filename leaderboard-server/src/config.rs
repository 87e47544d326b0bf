//! Environment-driven configuration for the leaderboard service
//!
//! Every variable falls back to its documented default both when unset
//! and when set to something that fails to parse (a malformed
//! `PORT=banana` must not prevent the service from starting).

use leaderboard_core::RatingBounds;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_INITIAL_USERS: u32 = 10_000;
const DEFAULT_UPDATE_INTERVAL_MS: u64 = 100;
const DEFAULT_RATING_MIN: i64 = 100;
const DEFAULT_RATING_MAX: i64 = 5000;
const DEFAULT_SNAPSHOT_PATH: &str = "./leaderboard_snapshot.json";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub initial_users: u32,
    pub update_interval_ms: u64,
    pub rating_bounds: RatingBounds,
    pub snapshot_path: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            port: env_parsed("PORT", DEFAULT_PORT),
            initial_users: env_parsed("INITIAL_USERS", DEFAULT_INITIAL_USERS),
            update_interval_ms: env_parsed("UPDATE_INTERVAL", DEFAULT_UPDATE_INTERVAL_MS),
            rating_bounds: RatingBounds::new(
                env_parsed("RATING_MIN", DEFAULT_RATING_MIN),
                env_parsed("RATING_MAX", DEFAULT_RATING_MAX),
            ),
            snapshot_path: std::env::var("SNAPSHOT_PATH")
                .unwrap_or_else(|_| DEFAULT_SNAPSHOT_PATH.to_string()),
        }
    }
}

/// Reads `key` from the environment and parses it as `T`, falling back to
/// `default` both when the variable is unset and when it fails to parse.
fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        // Exercises the fallback path directly; std::env::var is
        // process-global so this avoids mutating it from parallel tests.
        assert_eq!(env_parsed::<u16>("LEADERBOARD_TEST_UNSET_PORT", DEFAULT_PORT), DEFAULT_PORT);
        assert_eq!(
            env_parsed::<i64>("LEADERBOARD_TEST_UNSET_MIN", DEFAULT_RATING_MIN),
            DEFAULT_RATING_MIN
        );
    }

    #[test]
    fn malformed_value_falls_back_to_default() {
        std::env::set_var("LEADERBOARD_TEST_PORT", "not-a-number");
        assert_eq!(env_parsed::<u16>("LEADERBOARD_TEST_PORT", DEFAULT_PORT), DEFAULT_PORT);
        std::env::remove_var("LEADERBOARD_TEST_PORT");
    }

    #[test]
    fn valid_value_overrides_default() {
        std::env::set_var("LEADERBOARD_TEST_PORT_2", "9999");
        assert_eq!(env_parsed::<u16>("LEADERBOARD_TEST_PORT_2", DEFAULT_PORT), 9999);
        std::env::remove_var("LEADERBOARD_TEST_PORT_2");
    }
}
