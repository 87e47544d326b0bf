//! Configuration for the ranking engine

use leaderboard_core::RatingBounds;

/// Tunable parameters for the ranking engine
///
/// # Example
///
/// ```
/// use leaderboard_engine::EngineConfig;
/// use leaderboard_core::RatingBounds;
///
/// let config = EngineConfig {
///     bounds: RatingBounds::new(0, 3000),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// The closed rating domain `[R_min, R_max]`
    pub bounds: RatingBounds,

    /// Maximum indexed username prefix length in the user directory
    pub prefix_k: usize,

    /// Maximum number of hits returned by a single search
    pub max_search_results: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bounds: RatingBounds::default(),
            prefix_k: crate::directory::DEFAULT_PREFIX_K,
            max_search_results: crate::directory::MAX_SEARCH_RESULTS,
        }
    }
}
