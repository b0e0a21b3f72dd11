//! Two-phase update queue that keeps generations free of scan-order effects.

use lifeworks_core::{CellCoord, CellState};

use crate::World;

const EMPTY_SLOT: usize = usize::MAX;

/// Decisions recorded while scanning a generation, applied afterwards.
///
/// Engines read only the pre-step grid while deciding and push every decision
/// here. A second decision for the same cell replaces the first one but keeps
/// its original queue position, so each cell is applied and reported at most
/// once per commit.
#[derive(Clone, Debug, Default)]
pub struct PendingUpdates {
    queue: Vec<(usize, CellState)>,
    slots: Vec<usize>,
}

impl PendingUpdates {
    /// Records the next state of the cell at `index`.
    pub fn push(&mut self, index: usize, state: CellState) {
        if self.slots.len() <= index {
            self.slots.resize(index + 1, EMPTY_SLOT);
        }

        match self.slots[index] {
            EMPTY_SLOT => {
                self.slots[index] = self.queue.len();
                self.queue.push((index, state));
            }
            slot => self.queue[slot].1 = state,
        }
    }

    /// Number of distinct cells with a pending decision.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Reports whether no decision is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Pending state recorded for the cell, if any.
    #[must_use]
    pub fn pending(&self, index: usize) -> Option<CellState> {
        match self.slots.get(index).copied() {
            None | Some(EMPTY_SLOT) => None,
            Some(slot) => Some(self.queue[slot].1),
        }
    }

    /// Drops every pending decision without applying it.
    pub fn clear(&mut self) {
        for &(index, _) in &self.queue {
            self.slots[index] = EMPTY_SLOT;
        }
        self.queue.clear();
    }

    /// Applies the queued decisions to `world` in queue order.
    ///
    /// `on_change` fires for every cell whose live state differs from its
    /// pending state. The queue is empty afterwards. Returns whether any cell
    /// changed.
    pub fn commit<F>(&mut self, world: &mut World, mut on_change: F) -> bool
    where
        F: FnMut(CellCoord, CellState),
    {
        let mut changed = false;
        for &(index, state) in &self.queue {
            if world.state_at(index) == state {
                continue;
            }

            world.set_at(index, state);
            on_change(world.size().coord(index), state);
            changed = true;
        }

        self.clear();
        changed
    }
}
