//! Random user generation for `/api/seed` and the simulator's initial population

use leaderboard_core::RatingBounds;
use leaderboard_engine::Coordinator;
use rand::seq::SliceRandom;
use rand::Rng;

const ADJECTIVES: &[&str] = &[
    "swift", "clever", "bold", "quiet", "bright", "fierce", "calm", "sharp", "lucky", "steady",
];

const NOUNS: &[&str] = &[
    "falcon", "tiger", "otter", "raven", "wolf", "panther", "hawk", "lynx", "viper", "eagle",
];

/// Generates a random, plausible username: two words and a short numeric
/// suffix, distinct enough across a batch that id collisions stay rare
/// (the caller still owns collision handling, since uniqueness here is
/// advisory only).
pub fn random_username(rng: &mut impl Rng) -> String {
    let adjective = ADJECTIVES.choose(rng).expect("ADJECTIVES is non-empty");
    let noun = NOUNS.choose(rng).expect("NOUNS is non-empty");
    let suffix: u32 = rng.gen_range(0..10_000);
    format!("{adjective}_{noun}{suffix:04}")
}

pub fn random_rating(rng: &mut impl Rng, bounds: RatingBounds) -> i64 {
    rng.gen_range(bounds.min..=bounds.max)
}

/// Populates `coordinator` with `count` random users, used at startup when
/// no snapshot was restored (the `INITIAL_USERS` default population) and by
/// `/api/seed`. Returns the number actually added (an `AddUser` id
/// collision, vanishingly rare given the generator's suffix range, is
/// simply skipped rather than retried).
pub fn populate(coordinator: &Coordinator, count: u32) -> u32 {
    let bounds = coordinator.config().bounds;
    let mut rng = rand::thread_rng();
    let mut added = 0;
    for i in 0..count {
        let id = format!("seed-{i}");
        let username = random_username(&mut rng);
        let rating = random_rating(&mut rng, bounds);
        if coordinator.add_user(id, username, rating).is_ok() {
            added += 1;
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_username_is_nonempty_and_contains_underscore() {
        let mut rng = rand::thread_rng();
        let name = random_username(&mut rng);
        assert!(name.contains('_'));
    }

    #[test]
    fn random_rating_stays_in_bounds() {
        let mut rng = rand::thread_rng();
        let bounds = RatingBounds::new(100, 5000);
        for _ in 0..1000 {
            let rating = random_rating(&mut rng, bounds);
            assert!(rating >= bounds.min && rating <= bounds.max);
        }
    }
}
