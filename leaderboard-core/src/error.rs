//! Error types for the leaderboard ranking engine
//!
//! This module defines the error types returned by the core ranking
//! operations, per the error kinds in the design (NotFound, Duplicate,
//! OutOfRange, Invalid).

use thiserror::Error;

/// The main error type for leaderboard operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested user id does not exist
    #[error("user not found: {0}")]
    NotFound(String),

    /// `AddUser` was called with an id that already exists
    #[error("user already exists: {0}")]
    Duplicate(String),

    /// A rating fell outside the configured [R_min, R_max] domain
    #[error("rating {rating} out of range [{min}, {max}]")]
    OutOfRange { rating: i64, min: i64, max: i64 },

    /// A malformed request reached the core (empty username, etc.)
    #[error("invalid request: {0}")]
    Invalid(String),

    /// An I/O error occurred while loading or saving a snapshot
    #[error("snapshot I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

/// A specialized Result type for leaderboard operations
pub type Result<T> = std::result::Result<T, Error>;
