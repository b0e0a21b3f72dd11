#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Two-state totalistic automata: Simple, Hex and Knight Life, plus a sparse
//! implementation of the classic rule.

pub mod sparse;

use lifeworks_core::{CellCoord, CellState, GridError, GridSize, Life};
use lifeworks_world::{commit::PendingUpdates, topology::Adjacency, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub use sparse::SparseLife;

/// Birth and survival neighbor counts of a two-state automaton.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleSet {
    birth: &'static [usize],
    survival: &'static [usize],
}

impl RuleSet {
    /// Conway's B3/S23.
    pub const CONWAY: RuleSet = RuleSet {
        birth: &[3],
        survival: &[2, 3],
    };

    /// B2/S2: cells flip whenever exactly two neighbors are alive.
    pub const HEX_SWAP: RuleSet = RuleSet {
        birth: &[2],
        survival: &[2],
    };

    /// Neighbor counts that bring a dead cell to life.
    #[must_use]
    pub const fn birth(&self) -> &'static [usize] {
        self.birth
    }

    /// Neighbor counts that keep a live cell alive.
    #[must_use]
    pub const fn survival(&self) -> &'static [usize] {
        self.survival
    }

    /// Next state of a cell given its liveness and live neighbor count.
    #[must_use]
    pub fn next(&self, alive: bool, live_neighbors: usize) -> bool {
        if alive {
            self.survival.contains(&live_neighbors)
        } else {
            self.birth.contains(&live_neighbors)
        }
    }
}

/// Grid geometry and rule pairing of a [`ClassicLife`] engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClassicVariant {
    /// B3/S23 on the square Moore neighborhood.
    Simple,
    /// B2/S2 on the hexagonal neighborhood.
    Hex,
    /// B3/S23 on knight-move neighbors.
    Knight,
}

impl ClassicVariant {
    /// Adjacency scheme used by the variant.
    #[must_use]
    pub const fn adjacency(self) -> Adjacency {
        match self {
            Self::Simple => Adjacency::Moore,
            Self::Hex => Adjacency::Hex,
            Self::Knight => Adjacency::Knight,
        }
    }

    /// Rule applied by the variant.
    #[must_use]
    pub const fn rules(self) -> RuleSet {
        match self {
            Self::Simple | Self::Knight => RuleSet::CONWAY,
            Self::Hex => RuleSet::HEX_SWAP,
        }
    }

    /// Human-readable description of the variant.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Simple => {
                "Conway's Game of Life.\nBirth on 3 live neighbors, survival on 2 or 3."
            }
            Self::Hex => {
                "Hex-Grid Game of Life.\nCells swap states if they have exactly 2 alive neighbors."
            }
            Self::Knight => {
                "Knight's Game of Life.\nClassic B3/S23 where neighbors are a knight's move away."
            }
        }
    }
}

/// Dense two-state automaton over a toroidal neighbor table.
#[derive(Debug)]
pub struct ClassicLife {
    variant: ClassicVariant,
    world: World,
    pending: PendingUpdates,
    rng: ChaCha8Rng,
}

impl ClassicLife {
    /// Creates a zero-sized engine for `variant` seeded with `seed`.
    #[must_use]
    pub fn new(variant: ClassicVariant, seed: u64) -> Self {
        Self {
            variant,
            world: World::new(variant.adjacency()),
            pending: PendingUpdates::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Classic Game of Life on a square grid.
    #[must_use]
    pub fn simple(seed: u64) -> Self {
        Self::new(ClassicVariant::Simple, seed)
    }

    /// Exactly-two-neighbor automaton on a hexagonal grid.
    #[must_use]
    pub fn hex(seed: u64) -> Self {
        Self::new(ClassicVariant::Hex, seed)
    }

    /// Classic Game of Life over knight-move neighbors.
    #[must_use]
    pub fn knight(seed: u64) -> Self {
        Self::new(ClassicVariant::Knight, seed)
    }

    /// Variant driven by this engine.
    #[must_use]
    pub const fn variant(&self) -> ClassicVariant {
        self.variant
    }
}

impl Life for ClassicLife {
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
            let state = if self.rng.gen_bool(0.5) {
                CellState::Alive
            } else {
                CellState::Dead
            };
            self.world.set_at(index, state);
        }
        log::debug!(
            "randomized {:?} life, population {}",
            self.variant,
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
        let rules = self.variant.rules();
        for index in 0..self.world.len() {
            let alive = self.world.state_at(index) == CellState::Alive;
            let live_neighbors = self
                .world
                .count_neighbors(index, |state| state == CellState::Alive);

            match (alive, rules.next(alive, live_neighbors)) {
                (true, false) => self.pending.push(index, CellState::Dead),
                (false, true) => self.pending.push(index, CellState::Alive),
                _ => {}
            }
        }

        let changed = self.pending.commit(&mut self.world, on_change);
        log::trace!(
            "{:?} life stepped, changed: {changed}, population {}",
            self.variant,
            self.population_count()
        );
        changed
    }

    fn for_all_life(&self, visit: &mut dyn FnMut(CellCoord, CellState)) {
        self.world
            .for_each_where(|state| state == CellState::Alive, visit);
    }

    fn population_count(&self) -> u64 {
        self.world.count_where(|state| state == CellState::Alive)
    }

    fn size(&self) -> GridSize {
        self.world.size()
    }

    fn description(&self) -> Option<&'static str> {
        Some(self.variant.description())
    }
}
