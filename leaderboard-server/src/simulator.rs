//! Background score generator
//!
//! Drives continuous rating churn as a concurrent client of the core: at
//! each tick it mutates a small batch of existing users through the
//! public `UpdateRating` operation, exactly the way any other caller
//! would. Its id cache is refreshed periodically and is allowed to go
//! stale between refreshes. A `NotFound` against a stale id is swallowed
//! here, never surfaced, per the generator-side "best effort" contract.

use leaderboard_core::RatingBounds;
use leaderboard_engine::Coordinator;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Ratings touched per tick
const BATCH_SIZE: usize = 10;
/// How often the id cache is refreshed, in ticks
const CACHE_REFRESH_EVERY_TICKS: u64 = 50;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SimulatorStatus {
    pub running: bool,
    pub ticks: u64,
}

struct Inner {
    running: AtomicBool,
    ticks: std::sync::atomic::AtomicU64,
    task: parking_lot::Mutex<Option<JoinHandle<()>>>,
}

/// Handle used to start, stop, and query the background generator.
#[derive(Clone)]
pub struct SimulatorHandle {
    inner: Arc<Inner>,
}

impl SimulatorHandle {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                running: AtomicBool::new(false),
                ticks: std::sync::atomic::AtomicU64::new(0),
                task: parking_lot::Mutex::new(None),
            }),
        }
    }

    pub fn status(&self) -> SimulatorStatus {
        SimulatorStatus {
            running: self.inner.running.load(Ordering::Relaxed),
            ticks: self.inner.ticks.load(Ordering::Relaxed),
        }
    }

    /// Starts the tick loop if not already running. A second call while
    /// running is a no-op.
    pub fn start(&self, coordinator: Arc<Coordinator>, bounds: RatingBounds, interval: Duration) {
        let mut task = self.inner.task.lock();
        if self.inner.running.swap(true, Ordering::SeqCst) {
            return;
        }

        let inner = self.inner.clone();
        *task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            let mut cached_ids: Vec<String> = coordinator.snapshot().into_iter().map(|u| u.id).collect();
            let mut tick = 0u64;

            while inner.running.load(Ordering::SeqCst) {
                ticker.tick().await;

                if tick % CACHE_REFRESH_EVERY_TICKS == 0 {
                    cached_ids = coordinator.snapshot().into_iter().map(|u| u.id).collect();
                }

                if !cached_ids.is_empty() {
                    let mut rng = rand::thread_rng();
                    for id in cached_ids.choose_multiple(&mut rng, BATCH_SIZE.min(cached_ids.len())) {
                        let new_rating = rng.gen_range(bounds.min..=bounds.max);
                        if let Err(err) = coordinator.update_rating(id, new_rating) {
                            log::debug!("simulator: stale id {id} ({err}), ignoring");
                        }
                    }
                }

                tick += 1;
                inner.ticks.store(tick, Ordering::Relaxed);
            }

            log::info!("simulator stopped after {tick} ticks");
        }));

        log::info!("simulator started (interval = {interval:?}, batch = {BATCH_SIZE})");
    }

    /// Signals the tick loop to stop. Does not block on task completion;
    /// the loop observes the flag at its next tick boundary.
    pub fn stop(&self) {
        if self.inner.running.swap(false, Ordering::SeqCst) {
            log::info!("simulator stop requested");
        }
    }
}

impl Default for SimulatorHandle {
    fn default() -> Self {
        Self::new()
    }
}
