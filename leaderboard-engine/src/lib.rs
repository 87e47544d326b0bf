//! In-memory competitive ranking engine
//!
//! This crate implements the four-part ranking core described by the
//! leaderboard design:
//!
//! - **Rank Index**: a dense bucket histogram answering `Rank(rating)` in
//!   O(1)
//! - **Ranked List**: an arena-backed skip list holding every user in a
//!   single total order, for paginated top-N reads
//! - **User Directory**: an id→user map plus a K-bounded prefix index for
//!   substring username search
//! - **Coordinator**: the single-lock owner that keeps the three above
//!   mutually consistent across compound operations
//!
//! # Architecture
//!
//! ```text
//! Write Path:
//! AddUser/UpdateRating → Coordinator (exclusive lock) → RankIndex + RankedList + UserDirectory
//!
//! Read Path:
//! GetRank/TopN/Search → Coordinator (shared lock) → RankIndex / RankedList / UserDirectory
//! ```
//!
//! # Example
//!
//! ```
//! use leaderboard_engine::{Coordinator, EngineConfig};
//!
//! let engine = Coordinator::new(EngineConfig::default());
//! engine.add_user("u1".into(), "alice".into(), 4200).unwrap();
//! assert_eq!(engine.rank("u1").unwrap(), 1);
//! ```

pub mod config;
pub mod coordinator;
pub mod directory;
pub mod persistence;
pub mod rank_index;
pub mod ranked_list;

pub use config::EngineConfig;
pub use coordinator::Coordinator;
pub use rank_index::RankIndexStats;
