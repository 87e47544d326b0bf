//! Core data types for the leaderboard ranking engine
//!
//! This module contains the [`User`] record and the [`RatingBounds`]
//! domain configuration shared by every component of the engine.

use serde::{Deserialize, Serialize};

/// Opaque, externally assigned user identifier
pub type UserId = String;

/// An integer competitive rating
pub type Rating = i64;

/// An immutable-identity user record
///
/// `id` and `username` never change after creation; `rating` is the only
/// mutable field, and it is only ever mutated through the coordinator's
/// remove-mutate-reinsert protocol so that the ranked list never observes
/// a node with a stale sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub rating: Rating,
}

impl User {
    pub fn new(id: UserId, username: String, rating: Rating) -> Self {
        Self {
            id,
            username,
            rating,
        }
    }
}

/// A user with its competition rank attached, as returned by read queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedUser {
    pub id: UserId,
    pub username: String,
    pub rating: Rating,
    pub rank: u64,
}

impl RankedUser {
    pub fn new(user: User, rank: u64) -> Self {
        Self {
            id: user.id,
            username: user.username,
            rating: user.rating,
            rank,
        }
    }
}

/// The closed integer rating domain `[min, max]` that bounds every bucket
/// index and the dense arrays sized by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingBounds {
    pub min: Rating,
    pub max: Rating,
}

impl RatingBounds {
    pub fn new(min: Rating, max: Rating) -> Self {
        assert!(min <= max, "rating bounds must be non-empty: {min} > {max}");
        Self { min, max }
    }

    /// Dense array dimension `D = max - min + 1`
    pub fn domain_width(&self) -> usize {
        (self.max - self.min + 1) as usize
    }

    /// Clamp an arbitrary rating into `[min, max]`
    pub fn clamp(&self, rating: Rating) -> Rating {
        rating.clamp(self.min, self.max)
    }

    /// Index of `rating` into a dense `[0, D)` array, clamping first
    pub fn index_of(&self, rating: Rating) -> usize {
        (self.clamp(rating) - self.min) as usize
    }
}

impl Default for RatingBounds {
    /// Recommended defaults per the design: R_min = 100, R_max = 5000
    fn default() -> Self {
        Self { min: 100, max: 5000 }
    }
}
