//! Core types and error handling for the leaderboard ranking engine
//!
//! This crate contains the fundamental types shared across the ranking
//! engine and the service that hosts it. It provides:
//!
//! - Common error types with [`Error`] and [`Result`]
//! - The [`User`] record and the [`RatingBounds`] domain configuration
//!
//! # Example
//!
//! ```
//! use leaderboard_core::{User, RatingBounds};
//!
//! let bounds = RatingBounds::default();
//! let user = User::new("u1".to_string(), "alice".to_string(), bounds.clamp(4200));
//! assert_eq!(user.rating, 4200);
//! ```

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
