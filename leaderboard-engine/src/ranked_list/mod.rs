//! Order-preserving ranked list backing paginated top-N queries
//!
//! The ranked list keeps every live user in a single total order under
//! the leaderboard comparator (rating desc, username asc, id asc). It is
//! the structure `Coordinator::top_n` paginates over.
//!
//! # Example
//!
//! ```
//! use leaderboard_core::User;
//! use leaderboard_engine::ranked_list::RankedList;
//!
//! let mut rl = RankedList::new();
//! rl.insert(User::new("u1".into(), "alice".into(), 4200));
//! assert_eq!(rl.len(), 1);
//! ```

mod skiplist;

use leaderboard_core::{User, UserId};
use skiplist::SkipList;

/// Thin wrapper around the arena skip list; kept as its own type so the
/// underlying structure can be swapped (e.g. for a rank-augmented tree)
/// without touching the coordinator.
pub struct RankedList {
    inner: SkipList,
}

impl RankedList {
    pub fn new() -> Self {
        Self {
            inner: SkipList::new(),
        }
    }

    /// O(log N) expected. Duplicate id is a silent no-op.
    pub fn insert(&mut self, user: User) {
        self.inner.insert(user);
    }

    /// O(log N) expected. Returns `false` if `id` is absent.
    pub fn remove(&mut self, id: &str) -> bool {
        self.inner.remove(id)
    }

    /// Up to `limit` users in order, starting at the `offset`-th position.
    /// Out-of-range offset yields an empty result.
    pub fn slice(&self, limit: usize, offset: usize) -> Vec<User> {
        self.inner.slice(limit, offset)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.contains(id)
    }

    pub fn all_ids(&self) -> Vec<UserId> {
        self.inner.all_ids()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl Default for RankedList {
    fn default() -> Self {
        Self::new()
    }
}
