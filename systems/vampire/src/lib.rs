#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game of Life invaded by vampires that hunt live cells with breadth-first search.

use lifeworks_core::{CellCoord, CellState, GridError, GridSize, Life};
use lifeworks_world::{
    commit::PendingUpdates, navigation::BreadthFirstSearch, topology::Adjacency, World,
};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of vampires tolerated before surplus vampires die.
pub const POPULATION_CAP: usize = 4;
/// Generations a vampire keeps chasing a dead target before retargeting.
pub const CHASE_LIMIT: u32 = 5;

/// Per-vampire pursuit bookkeeping, stored at the vampire's cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Pursuit {
    target: Option<usize>,
    chase_steps: u32,
}

impl Pursuit {
    fn needs_target(&self) -> bool {
        self.target.is_none() || self.chase_steps > CHASE_LIMIT
    }
}

/// B3/S23 where vampires convert adjacent life and move toward the nearest live cell.
///
/// Each generation a vampire either dies (while more than [`POPULATION_CAP`]
/// vampires remain in the running count), stays put when nothing is alive,
/// or steps one cell along a shortest path to its target. A blocked path
/// makes it pick uniformly between staying and any dead neighbor.
#[derive(Debug)]
pub struct VampireLife {
    world: World,
    pending: PendingUpdates,
    pursuits: Vec<Pursuit>,
    next_pursuits: Vec<Pursuit>,
    search: BreadthFirstSearch,
    rng: ChaCha8Rng,
}

impl VampireLife {
    /// Creates a zero-sized engine seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            world: World::new(Adjacency::Moore),
            pending: PendingUpdates::default(),
            pursuits: Vec::new(),
            next_pursuits: Vec::new(),
            search: BreadthFirstSearch::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Number of vampires currently on the grid.
    #[must_use]
    pub fn vampire_count(&self) -> u64 {
        self.world.count_where(|state| state == CellState::Vampire)
    }

    /// Cell the vampire at `cell` is chasing, if it has picked one.
    ///
    /// Panics outside the grid.
    #[must_use]
    pub fn target_of(&self, cell: CellCoord) -> Option<CellCoord> {
        let index = self.world.index(cell);
        if self.world.state_at(index) != CellState::Vampire {
            return None;
        }
        self.pursuits[index]
            .target
            .map(|target| self.world.coord(target))
    }

    fn reset_pursuits(&mut self) {
        self.pursuits.clear();
        self.pursuits.resize(self.world.len(), Pursuit::default());
    }

    fn nearest_life(&mut self, source: usize) -> Option<usize> {
        let world = &self.world;
        self.search
            .search(world.topology(), source, |cell| {
                world.state_at(cell) == CellState::Alive
            })
            .map(|reached| reached.index)
    }

    /// Cell the vampire at `index` moves into while chasing `target`.
    fn next_position(&mut self, index: usize, target: usize) -> usize {
        let world = &self.world;
        let path_step = self
            .search
            .search(world.topology(), index, |cell| cell == target)
            .and_then(|_| self.search.first_step_toward(target));

        if let Some(step) = path_step {
            if world.state_at(step) == CellState::Dead {
                return step;
            }
        }

        let mut options = vec![index];
        options.extend(
            world
                .neighbors(index)
                .iter()
                .copied()
                .filter(|&neighbor| world.state_at(neighbor) == CellState::Dead),
        );
        options.choose(&mut self.rng).copied().unwrap_or(index)
    }

    fn decide_vampire(&mut self, index: usize, budget: &mut usize, life_remains: bool) {
        if *budget > POPULATION_CAP {
            self.pending.push(index, CellState::Dead);
            *budget -= 1;
            return;
        }

        let mut pursuit = self.pursuits[index];
        if !life_remains {
            self.pending.push(index, CellState::Vampire);
            self.next_pursuits[index] = pursuit;
            return;
        }

        if pursuit.needs_target() {
            pursuit = Pursuit {
                target: self.nearest_life(index),
                chase_steps: 0,
            };
        } else if let Some(target) = pursuit.target {
            if self.world.state_at(target) == CellState::Dead {
                pursuit.chase_steps += 1;
            }
        }

        let destination = match pursuit.target {
            Some(target) => self.next_position(index, target),
            None => index,
        };

        if destination == index {
            self.pending.push(index, CellState::Vampire);
        } else {
            self.pending.push(index, CellState::Dead);
            self.pending.push(destination, CellState::Vampire);
        }
        self.next_pursuits[destination] = pursuit;
    }

    fn decide_mortal(&mut self, index: usize, budget: &mut usize) {
        let state = self.world.state_at(index);
        let live_neighbors = self
            .world
            .count_neighbors(index, |neighbor| neighbor == CellState::Alive);

        if state == CellState::Alive {
            let bitten = self
                .world
                .count_neighbors(index, |neighbor| neighbor == CellState::Vampire)
                > 0;
            if bitten {
                self.pending.push(index, CellState::Vampire);
                self.next_pursuits[index] = Pursuit::default();
                *budget += 1;
            } else if !(2..=3).contains(&live_neighbors) {
                self.pending.push(index, CellState::Dead);
            }
        } else if live_neighbors == 3 {
            self.pending.push(index, CellState::Alive);
        }
    }
}

impl Life for VampireLife {
    fn resize(&mut self, rows: u32, columns: u32) -> Result<(), GridError> {
        self.world.resize(rows, columns, CellState::Dead)?;
        self.pending.clear();
        self.reset_pursuits();
        Ok(())
    }

    fn clear(&mut self) {
        self.world.fill(CellState::Dead);
        self.reset_pursuits();
    }

    fn randomize(&mut self) {
        for index in 0..self.world.len() {
            let state = if self.rng.gen_bool(0.5) {
                CellState::Alive
            } else {
                CellState::Dead
            };
            self.world.set_at(index, state);
        }
        self.reset_pursuits();

        if !self.world.is_empty() {
            let patient_zero = self.rng.gen_range(0..self.world.len());
            self.world.set_at(patient_zero, CellState::Vampire);
        }
        log::debug!(
            "randomized vampire life, population {}",
            self.population_count()
        );
    }

    fn get(&self, cell: CellCoord) -> CellState {
        self.world.get(cell)
    }

    fn set(&mut self, cell: CellCoord, state: CellState) {
        let index = self.world.index(cell);
        self.world.set_at(index, state);
        self.pursuits[index] = Pursuit::default();
    }

    fn step(&mut self, on_change: &mut dyn FnMut(CellCoord, CellState)) -> bool {
        let life_remains = self
            .world
            .cells()
            .iter()
            .any(|&state| state == CellState::Alive);
        let mut budget = usize::try_from(self.vampire_count()).unwrap_or(usize::MAX);

        self.next_pursuits.clear();
        self.next_pursuits
            .resize(self.world.len(), Pursuit::default());

        for index in 0..self.world.len() {
            if self.world.state_at(index) == CellState::Vampire {
                self.decide_vampire(index, &mut budget, life_remains);
            } else {
                self.decide_mortal(index, &mut budget);
            }
        }

        let changed = self.pending.commit(&mut self.world, on_change);

        std::mem::swap(&mut self.pursuits, &mut self.next_pursuits);
        for (pursuit, &state) in self.pursuits.iter_mut().zip(self.world.cells()) {
            if state != CellState::Vampire {
                *pursuit = Pursuit::default();
            }
        }

        log::trace!(
            "vampire life stepped, changed: {changed}, vampires {}, population {}",
            self.vampire_count(),
            self.population_count()
        );
        changed
    }

    fn for_all_life(&self, visit: &mut dyn FnMut(CellCoord, CellState)) {
        self.world.for_each_where(
            |state| matches!(state, CellState::Alive | CellState::Vampire),
            visit,
        );
    }

    fn population_count(&self) -> u64 {
        self.world
            .count_where(|state| matches!(state, CellState::Alive | CellState::Vampire))
    }

    fn size(&self) -> GridSize {
        self.world.size()
    }

    fn description(&self) -> Option<&'static str> {
        Some("Vampires vs The Game of Life.\nVampires use BFS to attack all life.")
    }
}
