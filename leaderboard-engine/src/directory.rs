//! Id→user map plus a K-bounded prefix index for substring search
//!
//! Full suffix/n-gram indexing over ~10^6 names is prohibitive, so the
//! directory indexes only the first `K` characters of each lowercased
//! username (plus the full lowercased name when it is longer than `K`).
//! `search` then narrows the resulting candidate set with a substring
//! filter, so the index only needs to get the candidate set small, not
//! exact.

use leaderboard_core::{RankedUser, User, UserId};
use std::collections::HashMap;

/// Default maximum indexed prefix length
pub const DEFAULT_PREFIX_K: usize = 4;

/// Default cap on the number of hits `search` returns
pub const MAX_SEARCH_RESULTS: usize = 100;

pub struct UserDirectory {
    prefix_k: usize,
    max_search_results: usize,
    users: HashMap<UserId, User>,
    by_prefix: HashMap<String, Vec<UserId>>,
}

impl UserDirectory {
    pub fn new(prefix_k: usize, max_search_results: usize) -> Self {
        Self {
            prefix_k,
            max_search_results,
            users: HashMap::new(),
            by_prefix: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.users.contains_key(id)
    }

    /// Every prefix key a username is indexed under: `1..=K` characters
    /// of the lowercased name, plus the full lowercased name if it is
    /// longer than `K`. Shared by `put` and `remove` so insertion and
    /// removal always agree on the same key set.
    fn index_keys(&self, username: &str) -> Vec<String> {
        let lower = username.to_lowercase();
        let chars: Vec<char> = lower.chars().collect();
        let mut keys: Vec<String> = (1..=self.prefix_k.min(chars.len()))
            .map(|len| chars[..len].iter().collect())
            .collect();
        if chars.len() > self.prefix_k {
            keys.push(lower);
        }
        keys
    }

    /// Inserts `user`. Returns `false` if `user.id` already exists.
    pub fn put(&mut self, user: User) -> bool {
        if self.users.contains_key(&user.id) {
            return false;
        }

        for key in self.index_keys(&user.username) {
            self.by_prefix.entry(key).or_default().push(user.id.clone());
        }

        self.users.insert(user.id.clone(), user);
        true
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    /// Removes `id` and scrubs it from every prefix list it was recorded
    /// under. Symmetric with `put`'s key derivation by construction.
    pub fn remove(&mut self, id: &str) -> Option<User> {
        let user = self.users.remove(id)?;

        for key in self.index_keys(&user.username) {
            if let Some(ids) = self.by_prefix.get_mut(&key) {
                ids.retain(|candidate| candidate != id);
                if ids.is_empty() {
                    self.by_prefix.remove(&key);
                }
            }
        }

        Some(user)
    }

    /// Replaces the stored record for `id` in place (used by
    /// `Coordinator::update_rating`, where the username and therefore
    /// the prefix index do not change).
    pub fn replace(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    /// Case-insensitive substring search over usernames, ranked by
    /// rating descending then username ascending, capped at
    /// `MAX_SEARCH_RESULTS`.
    pub fn search(&self, query: &str) -> Vec<User> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        let lower_query = trimmed.to_lowercase();
        let key: String = lower_query.chars().take(self.prefix_k).collect();

        let Some(candidate_ids) = self.by_prefix.get(&key) else {
            return Vec::new();
        };

        let mut hits: Vec<User> = candidate_ids
            .iter()
            .filter_map(|id| self.users.get(id))
            .filter(|u| u.username.to_lowercase().contains(&lower_query))
            .cloned()
            .collect();

        hits.sort_by(|a, b| {
            b.rating
                .cmp(&a.rating)
                .then_with(|| a.username.cmp(&b.username))
        });
        hits.truncate(self.max_search_results);
        hits
    }

    pub fn clear(&mut self) {
        self.users.clear();
        self.by_prefix.clear();
    }

    pub fn all_ids(&self) -> Vec<UserId> {
        self.users.keys().cloned().collect()
    }
}

/// Attaches a rank to every user in `users`, computed by `rank_of`.
pub fn attach_ranks(users: Vec<User>, rank_of: impl Fn(i64) -> u64) -> Vec<RankedUser> {
    users
        .into_iter()
        .map(|u| {
            let rank = rank_of(u.rating);
            RankedUser::new(u, rank)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, name: &str, rating: i64) -> User {
        User::new(id.to_string(), name.to_string(), rating)
    }

    #[test]
    fn put_then_get() {
        let mut ud = UserDirectory::new(DEFAULT_PREFIX_K, MAX_SEARCH_RESULTS);
        assert!(ud.put(user("1", "alice", 4000)));
        assert_eq!(ud.get("1").unwrap().username, "alice");
    }

    #[test]
    fn put_collision_reports_false() {
        let mut ud = UserDirectory::new(DEFAULT_PREFIX_K, MAX_SEARCH_RESULTS);
        assert!(ud.put(user("1", "alice", 4000)));
        assert!(!ud.put(user("1", "alice2", 4000)));
    }

    #[test]
    fn search_is_case_insensitive_and_substring() {
        let mut ud = UserDirectory::new(DEFAULT_PREFIX_K, MAX_SEARCH_RESULTS);
        ud.put(user("1", "rahul_kumar", 4500));
        ud.put(user("2", "rahul_sharma", 4200));
        ud.put(user("3", "priya_singh", 4000));
        ud.put(user("4", "rahul_gupta", 3800));

        let hits = ud.search("RAHUL");
        let names: Vec<_> = hits.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["rahul_kumar", "rahul_sharma", "rahul_gupta"]);
    }

    #[test]
    fn search_trims_whitespace_and_is_closed_under_lowercasing() {
        let mut ud = UserDirectory::new(DEFAULT_PREFIX_K, MAX_SEARCH_RESULTS);
        ud.put(user("1", "alice", 4000));

        let a = ud.search("  ALICE  ");
        let b = ud.search("alice");
        assert_eq!(a.len(), b.len());
        assert_eq!(a[0].id, b[0].id);
    }

    #[test]
    fn whitespace_only_query_is_empty() {
        let mut ud = UserDirectory::new(DEFAULT_PREFIX_K, MAX_SEARCH_RESULTS);
        ud.put(user("1", "alice", 4000));
        assert!(ud.search("   ").is_empty());
        assert!(ud.search("").is_empty());
    }

    #[test]
    fn remove_scrubs_prefix_index() {
        let mut ud = UserDirectory::new(DEFAULT_PREFIX_K, MAX_SEARCH_RESULTS);
        ud.put(user("1", "alice", 4000));
        assert!(!ud.search("alice").is_empty());

        ud.remove("1");
        assert!(ud.search("alice").is_empty());
        assert!(ud.get("1").is_none());
    }

    #[test]
    fn long_username_indexes_full_name_too() {
        let mut ud = UserDirectory::new(4, MAX_SEARCH_RESULTS);
        ud.put(user("1", "verylongusername", 4000));

        // Query exactly as long as the full name should still hit, via
        // the full-name key recorded because the name exceeds K.
        assert_eq!(ud.search("verylongusername").len(), 1);
    }

    #[test]
    fn search_results_capped_and_sorted() {
        let mut ud = UserDirectory::new(DEFAULT_PREFIX_K, MAX_SEARCH_RESULTS);
        for i in 0..150 {
            ud.put(user(&i.to_string(), &format!("match{i:03}"), 5000 - i));
        }

        let hits = ud.search("match");
        assert_eq!(hits.len(), MAX_SEARCH_RESULTS);
        for window in hits.windows(2) {
            assert!(window[0].rating >= window[1].rating);
        }
    }
}
