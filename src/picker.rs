//! Random "who's next" picker.
//!
//! A pick is a fixed number of timer ticks. Every tick highlights a uniformly
//! random occupied furniture id; the last tick commits a final uniform pick
//! and the run ends. The run remembers which timer drives it so ticks from a
//! cancelled timer that were already queued can be told apart and ignored.

#[cfg(test)]
#[path = "picker_test.rs"]
mod picker_test;

use rand::Rng;

use crate::doc::FurnitureId;

/// Handle for a recurring timer started on the engine's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// What a tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickStep {
    /// Intermediate highlight; the animation continues.
    Highlight(FurnitureId),
    /// Final pick; the run is over.
    Finished(FurnitureId),
    /// Nothing left to pick from; the run is over.
    Exhausted,
}

/// One in-flight pick animation.
#[derive(Debug, Clone)]
pub struct PickerRun {
    timer: TimerId,
    pool: Vec<FurnitureId>,
    ticks: u32,
    max_ticks: u32,
}

impl PickerRun {
    /// Start a run over `pool`. Returns `None` when there is nothing to pick.
    #[must_use]
    pub fn new(timer: TimerId, pool: Vec<FurnitureId>, max_ticks: u32) -> Option<Self> {
        if pool.is_empty() {
            return None;
        }
        Some(Self { timer, pool, ticks: 0, max_ticks: max_ticks.max(1) })
    }

    #[must_use]
    pub fn timer(&self) -> TimerId {
        self.timer
    }

    #[must_use]
    pub fn pool(&self) -> &[FurnitureId] {
        &self.pool
    }

    #[must_use]
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Forget ids that no longer qualify (e.g. deleted furniture).
    pub fn retain(&mut self, keep: impl Fn(&FurnitureId) -> bool) {
        self.pool.retain(|id| keep(id));
    }

    /// Advance one tick.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> PickStep {
        if self.pool.is_empty() {
            return PickStep::Exhausted;
        }
        self.ticks += 1;
        let pick = self.pool[rng.random_range(0..self.pool.len())];
        if self.ticks >= self.max_ticks {
            PickStep::Finished(pick)
        } else {
            PickStep::Highlight(pick)
        }
    }
}
