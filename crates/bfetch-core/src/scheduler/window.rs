//! Fixed-capacity slot table of in-flight fetches.
//!
//! Each slot holds at most one fetch task. Tasks live in a `JoinSet`, whose
//! `join_next` is the "first completion among the window" primitive; dropping
//! the set aborts whatever is still running.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::task::{Id, JoinSet};

use super::stats::WindowStats;
use crate::error::FetchError;
use crate::transport::Fetcher;

type Completion<F> = (usize, Result<<F as Fetcher>::Content, FetchError>);

/// An occupied slot.
#[derive(Debug)]
struct Slot {
    target: String,
    launched_at: Instant,
}

pub(super) struct Window<F: Fetcher> {
    fetcher: Arc<F>,
    slots: Vec<Option<Slot>>,
    tasks: JoinSet<Completion<F>>,
    /// Task id → slot, so a panicked task can still release its slot.
    slot_of: HashMap<Id, usize>,
    stats: WindowStats,
}

impl<F: Fetcher> Window<F> {
    pub(super) fn new(fetcher: Arc<F>, capacity: usize) -> Self {
        Self {
            fetcher,
            slots: (0..capacity).map(|_| None).collect(),
            tasks: JoinSet::new(),
            slot_of: HashMap::with_capacity(capacity),
            stats: WindowStats::new(capacity),
        }
    }

    pub(super) fn stats(&self) -> WindowStats {
        self.stats
    }

    pub(super) fn in_flight(&self) -> usize {
        self.stats.in_flight
    }

    /// Lowest free slot index, if any.
    pub(super) fn free_slot(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Start fetching `id` in `slot`. The slot must be free.
    pub(super) fn launch(&mut self, slot: usize, id: F::Id) {
        debug_assert!(self.slots[slot].is_none(), "slot {} already occupied", slot);
        let target = id.to_string();
        let fetcher = Arc::clone(&self.fetcher);
        let handle = self.tasks.spawn(async move {
            let result = fetcher.fetch(id).await;
            (slot, result)
        });
        self.slot_of.insert(handle.id(), slot);
        self.stats.record_launch();
        tracing::debug!(slot, resource = %target, in_flight = self.stats.in_flight, "fetch launched");
        self.slots[slot] = Some(Slot {
            target,
            launched_at: Instant::now(),
        });
    }

    /// Waits for the first fetch in the window to finish and releases its slot.
    /// Returns `None` when the window is empty.
    pub(super) async fn next_completion(&mut self) -> Option<Result<F::Content, FetchError>> {
        let (slot, result) = match self.tasks.join_next_with_id().await? {
            Ok((task_id, (slot, result))) => {
                self.slot_of.remove(&task_id);
                (slot, result)
            }
            Err(join_err) => {
                let Some(slot) = self.slot_of.remove(&join_err.id()) else {
                    // Not one of ours; nothing to release.
                    tracing::warn!("untracked fetch task failed: {}", join_err);
                    return Some(Err(FetchError::Task {
                        target: String::from("<unknown>"),
                        reason: join_err.to_string(),
                    }));
                };
                let target = self.slots[slot]
                    .as_ref()
                    .map(|s| s.target.clone())
                    .unwrap_or_default();
                (
                    slot,
                    Err(FetchError::Task {
                        target,
                        reason: join_err.to_string(),
                    }),
                )
            }
        };

        let released = self.slots[slot].take();
        self.stats.record_completion(result.is_ok());
        if let Some(s) = released {
            let elapsed_ms = s.launched_at.elapsed().as_millis() as u64;
            match &result {
                Ok(_) => tracing::debug!(slot, resource = %s.target, elapsed_ms, "fetch completed"),
                Err(e) => tracing::warn!(slot, resource = %s.target, elapsed_ms, "fetch failed: {}", e),
            }
        }
        Some(result)
    }

    /// Abort every in-flight fetch and wait until all of them have stopped.
    pub(super) async fn shutdown(&mut self) {
        let cancelled = self.tasks.len();
        self.tasks.shutdown().await;
        self.release_all();
        if cancelled > 0 {
            tracing::debug!(cancelled, "window shut down");
        }
    }

    fn release_all(&mut self) {
        self.slot_of.clear();
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.stats.in_flight = 0;
    }
}

impl<F: Fetcher> Drop for Window<F> {
    fn drop(&mut self) {
        // JoinSet aborts the remaining tasks when it is dropped right after this.
        if !self.tasks.is_empty() {
            tracing::debug!(cancelled = self.tasks.len(), "window dropped with fetches in flight");
        }
    }
}
