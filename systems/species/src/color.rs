//! Game of Life with competing coloured species.

use lifeworks_core::{CellCoord, CellState, GridError, GridSize, Life};
use lifeworks_world::{commit::PendingUpdates, topology::Adjacency, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// B3/S23 where neighbors only count when they share the cell's species.
///
/// A dead cell first adopts the species of its last live neighbor in
/// neighbor order, or a random species when it has none, and is then born
/// when exactly three neighbors share that species.
#[derive(Debug)]
pub struct LifeInColor {
    world: World,
    pending: PendingUpdates,
    rng: ChaCha8Rng,
}

impl LifeInColor {
    /// Creates a zero-sized engine seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            world: World::new(Adjacency::Moore),
            pending: PendingUpdates::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn random_species(&mut self) -> CellState {
        CellState::SPECIES[self.rng.gen_range(0..CellState::SPECIES.len())]
    }

    fn adopted_species(&mut self, index: usize) -> CellState {
        let inherited = self
            .world
            .neighbors(index)
            .iter()
            .rev()
            .map(|&neighbor| self.world.state_at(neighbor))
            .find(|state| !state.is_dead());

        match inherited {
            Some(species) => species,
            None => self.random_species(),
        }
    }
}

impl Life for LifeInColor {
    fn resize(&mut self, rows: u32, columns: u32) -> Result<(), GridError> {
        self.world.resize(rows, columns, CellState::Dead)?;
        self.pending.clear();
        Ok(())
    }

    fn clear(&mut self) {
        self.world.fill(CellState::Dead);
    }

    fn randomize(&mut self) {
        for index in 0..self.world.len() {
            // One cell in four stays empty.
            let state = if self.rng.gen_bool(0.5) && self.rng.gen_bool(0.5) {
                CellState::Dead
            } else {
                self.random_species()
            };
            self.world.set_at(index, state);
        }
        log::debug!(
            "randomized life in color, population {}",
            self.population_count()
        );
    }

    fn get(&self, cell: CellCoord) -> CellState {
        self.world.get(cell)
    }

    fn set(&mut self, cell: CellCoord, state: CellState) {
        self.world.set(cell, state);
    }

    fn step(&mut self, on_change: &mut dyn FnMut(CellCoord, CellState)) -> bool {
        for index in 0..self.world.len() {
            let current = self.world.state_at(index);
            let species = if current.is_dead() {
                self.adopted_species(index)
            } else {
                current
            };

            let kin = self.world.count_neighbors(index, |state| state == species);
            if current.is_dead() {
                if kin == 3 {
                    self.pending.push(index, species);
                }
            } else if !(2..=3).contains(&kin) {
                self.pending.push(index, CellState::Dead);
            }
        }

        let changed = self.pending.commit(&mut self.world, on_change);
        log::trace!(
            "life in color stepped, changed: {changed}, population {}",
            self.population_count()
        );
        changed
    }

    fn for_all_life(&self, visit: &mut dyn FnMut(CellCoord, CellState)) {
        self.world.for_each_where(|state| !state.is_dead(), visit);
    }

    fn population_count(&self) -> u64 {
        self.world.count_where(|state| !state.is_dead())
    }

    fn size(&self) -> GridSize {
        self.world.size()
    }

    fn description(&self) -> Option<&'static str> {
        Some("Life in Color.\nB3/S23 where only neighbors of the same species count.")
    }
}
