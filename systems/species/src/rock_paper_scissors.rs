//! Cyclic predator-prey automaton.

use lifeworks_core::{CellCoord, CellState, GridError, GridSize, Life};
use lifeworks_world::{commit::PendingUpdates, topology::Adjacency, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Rock species.
pub const ROCK: CellState = CellState::Blue;
/// Paper species, predator of rock.
pub const PAPER: CellState = CellState::Green;
/// Scissors species, predator of paper.
pub const SCISSORS: CellState = CellState::Red;

/// Predator neighbor count above which a cell is overtaken.
const OVERTAKE_THRESHOLD: usize = 2;

/// Species that overtakes `state`.
///
/// Anything that is not paper or rock, including states written by a
/// caller that the automaton does not use, falls prey to rock.
#[must_use]
pub const fn predator_of(state: CellState) -> CellState {
    match state {
        ROCK => PAPER,
        PAPER => SCISSORS,
        _ => ROCK,
    }
}

/// Rock-paper-scissors on the Moore neighborhood.
///
/// Every cell always holds a species. A cell with three or more neighbors
/// of its predator species becomes that predator.
#[derive(Debug)]
pub struct RockPaperScissorsLife {
    world: World,
    pending: PendingUpdates,
    rng: ChaCha8Rng,
}

impl RockPaperScissorsLife {
    /// Creates a zero-sized engine seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            world: World::new(Adjacency::Moore),
            pending: PendingUpdates::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Life for RockPaperScissorsLife {
    fn resize(&mut self, rows: u32, columns: u32) -> Result<(), GridError> {
        self.world.resize(rows, columns, ROCK)?;
        self.pending.clear();
        Ok(())
    }

    fn clear(&mut self) {
        self.world.fill(ROCK);
    }

    fn randomize(&mut self) {
        const SPECIES: [CellState; 3] = [ROCK, PAPER, SCISSORS];
        for index in 0..self.world.len() {
            let species = SPECIES[self.rng.gen_range(0..SPECIES.len())];
            self.world.set_at(index, species);
        }
        log::debug!("randomized rock-paper-scissors life");
    }

    fn get(&self, cell: CellCoord) -> CellState {
        self.world.get(cell)
    }

    fn set(&mut self, cell: CellCoord, state: CellState) {
        self.world.set(cell, state);
    }

    fn step(&mut self, on_change: &mut dyn FnMut(CellCoord, CellState)) -> bool {
        for index in 0..self.world.len() {
            let predator = predator_of(self.world.state_at(index));
            let hunters = self.world.count_neighbors(index, |state| state == predator);
            if hunters > OVERTAKE_THRESHOLD {
                self.pending.push(index, predator);
            }
        }

        let changed = self.pending.commit(&mut self.world, on_change);
        log::trace!("rock-paper-scissors life stepped, changed: {changed}");
        changed
    }

    fn for_all_life(&self, visit: &mut dyn FnMut(CellCoord, CellState)) {
        self.world.for_each_where(|_| true, visit);
    }

    fn population_count(&self) -> u64 {
        self.world.len() as u64
    }

    fn size(&self) -> GridSize {
        self.world.size()
    }

    fn description(&self) -> Option<&'static str> {
        Some("Rock Paper Scissors.\nIf a cell has 3 or more 'predator neighbors', the cell is overtaken.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predators_cycle() {
        assert_eq!(predator_of(ROCK), PAPER);
        assert_eq!(predator_of(PAPER), SCISSORS);
        assert_eq!(predator_of(SCISSORS), ROCK);
        assert_eq!(predator_of(CellState::Dead), ROCK);
    }
}
