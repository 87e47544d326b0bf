//! The owning structure that keeps the rank index, ranked list and user
//! directory mutually consistent under a single writer-exclusion lock
//!
//! The simpler contract recommended by the design is the one this crate
//! ships: `RankIndex`, `RankedList` and `UserDirectory` carry no locks of
//! their own and are reachable only through `Coordinator`'s single
//! `parking_lot::RwLock`. Writers take the exclusive lock for the whole
//! compound operation; readers take the shared lock. This trivially
//! satisfies "the coordinator's compound operations appear atomic to
//! external observers" without a separate proof, at the cost of
//! serializing RI/RL/UD reads behind one lock, an acceptable price given
//! every read here is already O(log N) or smaller.

use crate::config::EngineConfig;
use crate::directory::{attach_ranks, UserDirectory};
use crate::rank_index::{RankIndex, RankIndexStats};
use crate::ranked_list::RankedList;
use leaderboard_core::{Error, RankedUser, Result, User, UserId};
use parking_lot::RwLock;

struct Inner {
    rank_index: RankIndex,
    ranked_list: RankedList,
    directory: UserDirectory,
}

/// Owns the three substructures and exposes the atomic compound
/// operations (`add_user`, `update_rating`, `clear`) plus the read-only
/// queries (`rank`, `top_n`, `search`) that route to them.
pub struct Coordinator {
    config: EngineConfig,
    inner: RwLock<Inner>,
}

impl Coordinator {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            inner: RwLock::new(Inner {
                rank_index: RankIndex::new(config.bounds),
                ranked_list: RankedList::new(),
                directory: UserDirectory::new(config.prefix_k, config.max_search_results),
            }),
        }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Registers a new user. Rejects an id collision; clamps the rating
    /// into `[R_min, R_max]` before touching any index.
    pub fn add_user(&self, id: UserId, username: String, rating: i64) -> Result<()> {
        if username.trim().is_empty() {
            return Err(Error::Invalid("username must not be empty".to_string()));
        }

        let mut inner = self.inner.write();
        if inner.directory.contains(&id) {
            return Err(Error::Duplicate(id));
        }

        let clamped = self.config.bounds.clamp(rating);
        let user = User::new(id, username, clamped);

        inner.directory.put(user.clone());
        inner.rank_index.inc(clamped);
        inner.ranked_list.insert(user);
        Ok(())
    }

    /// Remove-mutate-reinsert: the comparator keys on rating, so the
    /// ranked list node is unlinked before the rating changes and
    /// relinked only after, never observed mid-mutation.
    pub fn update_rating(&self, id: &str, new_rating: i64) -> Result<()> {
        let bounds = self.config.bounds;
        if new_rating < bounds.min || new_rating > bounds.max {
            return Err(Error::OutOfRange {
                rating: new_rating,
                min: bounds.min,
                max: bounds.max,
            });
        }

        let mut inner = self.inner.write();
        let old_rating = inner
            .directory
            .get(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?
            .rating;

        if old_rating == new_rating {
            return Ok(());
        }

        inner.ranked_list.remove(id);
        let mut user = inner.directory.get(id).cloned().expect("checked above");
        user.rating = new_rating;
        inner.directory.replace(user.clone());
        inner.rank_index.move_rating(old_rating, new_rating);
        inner.ranked_list.insert(user);
        Ok(())
    }

    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.rank_index.clear();
        inner.ranked_list.clear();
        inner.directory.clear();
    }

    /// `RI.Rank(UD.Get(id).rating)`
    pub fn rank(&self, id: &str) -> Result<u64> {
        let inner = self.inner.read();
        let user = inner
            .directory
            .get(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        Ok(inner.rank_index.rank(user.rating))
    }

    pub fn get_user(&self, id: &str) -> Result<RankedUser> {
        let inner = self.inner.read();
        let user = inner
            .directory
            .get(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?
            .clone();
        let rank = inner.rank_index.rank(user.rating);
        Ok(RankedUser::new(user, rank))
    }

    /// `RL.Slice(...)` with rank attached per element via `RI.Rank`
    pub fn top_n(&self, limit: usize, offset: usize) -> Vec<RankedUser> {
        let inner = self.inner.read();
        let users = inner.ranked_list.slice(limit, offset);
        attach_ranks(users, |rating| inner.rank_index.rank(rating))
    }

    /// `UD.Search(q)` likewise enriched with rank
    pub fn search(&self, query: &str) -> Vec<RankedUser> {
        let inner = self.inner.read();
        let users = inner.directory.search(query);
        attach_ranks(users, |rating| inner.rank_index.rank(rating))
    }

    pub fn total_users(&self) -> u64 {
        self.inner.read().rank_index.total_users()
    }

    pub fn stats(&self) -> RankIndexStats {
        self.inner.read().rank_index.stats()
    }

    /// Copy of every live user, for persistence hand-off.
    pub fn snapshot(&self) -> Vec<User> {
        let inner = self.inner.read();
        inner
            .directory
            .all_ids()
            .into_iter()
            .filter_map(|id| inner.directory.get(&id).cloned())
            .collect()
    }
}
