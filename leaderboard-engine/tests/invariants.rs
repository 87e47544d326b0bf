//! Property-based checks of the cross-structure invariants in the design
//!
//! Builds a coordinator from a random sequence of AddUser/UpdateRating
//! operations and checks that rank, order, and population counts stay
//! mutually consistent at every step, rather than only at hand-picked
//! scenarios.

use leaderboard_engine::{Coordinator, EngineConfig};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add { id: u32, rating: i64 },
    Update { id: u32, rating: i64 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u32..50, 100i64..=5000).prop_map(|(id, rating)| Op::Add { id, rating }),
        (0u32..50, 100i64..=5000).prop_map(|(id, rating)| Op::Update { id, rating }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Rank matches the strictly-greater count and total population
    /// matches the bucket sum, after any sequence of ops.
    #[test]
    fn rank_and_population_stay_consistent(ops in prop::collection::vec(op_strategy(), 0..100)) {
        let co = Coordinator::new(EngineConfig::default());
        let mut known = std::collections::HashSet::new();

        for op in ops {
            match op {
                Op::Add { id, rating } => {
                    let key = id.to_string();
                    if co.add_user(key.clone(), format!("user{id}"), rating).is_ok() {
                        known.insert(id);
                    }
                }
                Op::Update { id, rating } => {
                    if known.contains(&id) {
                        let _ = co.update_rating(&id.to_string(), rating);
                    }
                }
            }
        }

        let snapshot = co.snapshot();
        prop_assert_eq!(snapshot.len() as u64, co.total_users());

        for user in &snapshot {
            let expected_rank = 1 + snapshot.iter().filter(|u| u.rating > user.rating).count() as u64;
            let actual_rank = co.rank(&user.id).unwrap();
            prop_assert_eq!(actual_rank, expected_rank);
        }

        // Equal ratings receive equal rank.
        let mut rank_by_rating: std::collections::HashMap<i64, u64> = std::collections::HashMap::new();
        for user in &snapshot {
            let rank = co.rank(&user.id).unwrap();
            if let Some(&expected) = rank_by_rating.get(&user.rating) {
                prop_assert_eq!(rank, expected);
            } else {
                rank_by_rating.insert(user.rating, rank);
            }
        }
    }

    /// TopN is non-increasing in rating and paginates by concatenation
    /// regardless of how the population was built up.
    #[test]
    fn top_n_is_sorted_and_concatenates(ops in prop::collection::vec(op_strategy(), 0..100)) {
        let co = Coordinator::new(EngineConfig::default());
        for op in ops {
            match op {
                Op::Add { id, rating } => {
                    let _ = co.add_user(id.to_string(), format!("user{id}"), rating);
                }
                Op::Update { id, rating } => {
                    let _ = co.update_rating(&id.to_string(), rating);
                }
            }
        }

        let all = co.top_n(usize::MAX, 0);
        for window in all.windows(2) {
            prop_assert!(window[0].rating >= window[1].rating);
        }

        let first_half = co.top_n(5, 0);
        let second_half = co.top_n(5, 5);
        let combined = co.top_n(10, 0);
        let chained: Vec<_> = first_half.into_iter().chain(second_half).collect();
        prop_assert_eq!(chained, combined);
    }

    /// Updating the same id to the same rating twice matches a single
    /// update.
    #[test]
    fn repeated_identical_update_is_idempotent(id in 0u32..50, r1 in 100i64..=5000, r2 in 100i64..=5000) {
        let once = Coordinator::new(EngineConfig::default());
        once.add_user(id.to_string(), "user".to_string(), r1).unwrap();
        once.update_rating(&id.to_string(), r2).unwrap();

        let twice = Coordinator::new(EngineConfig::default());
        twice.add_user(id.to_string(), "user".to_string(), r1).unwrap();
        twice.update_rating(&id.to_string(), r2).unwrap();
        twice.update_rating(&id.to_string(), r2).unwrap();

        prop_assert_eq!(once.rank(&id.to_string()).unwrap(), twice.rank(&id.to_string()).unwrap());
        prop_assert_eq!(once.total_users(), twice.total_users());
    }
}
