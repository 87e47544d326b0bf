//! Arena-backed skip list ordered by the leaderboard comparator
//!
//! This is the "canonical implementation" the design calls for: a
//! probabilistic skip list with `MAX_HEIGHT = 16` and promotion
//! probability 1/4, plus an id→node index for O(1) removals. Unlike a
//! lock-free skip list, every node lives in a single `Vec` arena and is
//! only ever touched while the coordinator holds its exclusive lock, so
//! links are plain `Option<usize>` indices rather than atomics: there is
//! no concurrent access to race against.

use leaderboard_core::{User, UserId};
use rand::Rng;
use std::cmp::Ordering;
use std::collections::HashMap;

const MAX_HEIGHT: usize = 16;
const BRANCHING_FACTOR: u32 = 4;

/// `a ≺ b` iff `a.rating > b.rating`, or equal ratings with
/// `a.username < b.username`, or equal on both with `a.id < b.id`.
fn compare(a: &User, b: &User) -> Ordering {
    b.rating
        .cmp(&a.rating)
        .then_with(|| a.username.cmp(&b.username))
        .then_with(|| a.id.cmp(&b.id))
}

struct Node {
    user: User,
    /// forward links per level; `None` means "end of list at this level"
    forward: Vec<Option<usize>>,
}

/// A probabilistic skip list over [`User`], ordered by the leaderboard
/// comparator, with an id→slot index for O(1) removal.
pub struct SkipList {
    /// arena of nodes; removed slots are reused via `free`
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    /// forward links out of the sentinel head, one per level
    head: Vec<Option<usize>>,
    height: usize,
    len: usize,
    index: HashMap<UserId, usize>,
}

impl SkipList {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: vec![None; MAX_HEIGHT],
            height: 1,
            len: 0,
            index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    fn random_height(&self) -> usize {
        let mut height = 1;
        let mut rng = rand::thread_rng();
        while height < MAX_HEIGHT && rng.gen_ratio(1, BRANCHING_FACTOR) {
            height += 1;
        }
        height
    }

    fn node(&self, slot: usize) -> &Node {
        self.nodes[slot].as_ref().expect("dangling skip list slot")
    }

    /// Walks from the head down to level 0, recording at each level the
    /// last node strictly before where `user` belongs.
    fn find_predecessors(&self, user: &User) -> [Option<usize>; MAX_HEIGHT] {
        let mut preds = [None; MAX_HEIGHT];
        let mut current: Option<usize> = None;

        for level in (0..self.height).rev() {
            let mut next = match current {
                Some(slot) => self.node(slot).forward[level],
                None => self.head[level],
            };

            while let Some(slot) = next {
                if compare(&self.node(slot).user, user) == Ordering::Less {
                    current = Some(slot);
                    next = self.node(slot).forward[level];
                } else {
                    break;
                }
            }

            preds[level] = current;
        }

        preds
    }

    /// Inserts `user`. A duplicate id is a silent no-op.
    pub fn insert(&mut self, user: User) {
        if self.index.contains_key(&user.id) {
            return;
        }

        let preds = self.find_predecessors(&user);
        let height = self.random_height();
        if height > self.height {
            self.height = height;
        }

        let mut forward = vec![None; height];
        for level in 0..height {
            forward[level] = match preds[level] {
                Some(slot) => self.node(slot).forward[level],
                None => self.head[level],
            };
        }

        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(Node {
                    user: user.clone(),
                    forward,
                });
                slot
            }
            None => {
                self.nodes.push(Some(Node {
                    user: user.clone(),
                    forward,
                }));
                self.nodes.len() - 1
            }
        };

        for level in 0..height {
            match preds[level] {
                Some(pred_slot) => {
                    self.nodes[pred_slot].as_mut().unwrap().forward[level] = Some(slot);
                }
                None => {
                    self.head[level] = Some(slot);
                }
            }
        }

        self.index.insert(user.id.clone(), slot);
        self.len += 1;
    }

    /// Removes the unique node recorded for `id`. Returns `false` if absent.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(&slot) = self.index.get(id) else {
            return false;
        };

        let user = self.node(slot).user.clone();
        let preds = self.find_predecessors_at_or_before(&user, slot);
        let height = self.node(slot).forward.len();

        for level in 0..height {
            let succ = self.node(slot).forward[level];
            match preds[level] {
                Some(pred_slot) => {
                    self.nodes[pred_slot].as_mut().unwrap().forward[level] = succ;
                }
                None => {
                    self.head[level] = succ;
                }
            }
        }

        self.nodes[slot] = None;
        self.free.push(slot);
        self.index.remove(id);
        self.len -= 1;
        true
    }

    /// Like `find_predecessors`, but for the node already known to be at
    /// `target_slot` (used by `remove`, where the user's identity, not
    /// just its sort key, determines the exact node to unlink).
    fn find_predecessors_at_or_before(&self, user: &User, target_slot: usize) -> [Option<usize>; MAX_HEIGHT] {
        let mut preds = [None; MAX_HEIGHT];
        let mut current: Option<usize> = None;

        for level in (0..self.height).rev() {
            let mut next = match current {
                Some(slot) => self.node(slot).forward[level],
                None => self.head[level],
            };

            while let Some(slot) = next {
                if slot == target_slot {
                    break;
                }
                if compare(&self.node(slot).user, user) == Ordering::Less {
                    current = Some(slot);
                    next = self.node(slot).forward[level];
                } else {
                    break;
                }
            }

            preds[level] = current;
        }

        preds
    }

    /// Up to `limit` users starting at the `offset`-th position in order.
    pub fn slice(&self, limit: usize, offset: usize) -> Vec<User> {
        let mut result = Vec::with_capacity(limit.min(self.len.saturating_sub(offset)));
        let mut current = self.head[0];
        let mut skipped = 0;

        while let Some(slot) = current {
            if skipped < offset {
                skipped += 1;
                current = self.node(slot).forward[0];
                continue;
            }
            if result.len() >= limit {
                break;
            }
            result.push(self.node(slot).user.clone());
            current = self.node(slot).forward[0];
        }

        result
    }

    pub fn all_ids(&self) -> Vec<UserId> {
        let mut ids = Vec::with_capacity(self.len);
        let mut current = self.head[0];
        while let Some(slot) = current {
            ids.push(self.node(slot).user.id.clone());
            current = self.node(slot).forward[0];
        }
        ids
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = vec![None; MAX_HEIGHT];
        self.height = 1;
        self.len = 0;
        self.index.clear();
    }
}

impl Default for SkipList {
    fn default() -> Self {
        Self::new()
    }
}
