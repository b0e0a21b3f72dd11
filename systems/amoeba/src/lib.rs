#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Amoeba Life: nuclei wrapped in growing bodies hunt drifting food.
//!
//! States are reused with amoeba meanings: [`CellState::Dead`] is empty
//! space, [`CellState::Alive`] is food, [`CellState::Vampire`] is a nucleus
//! and [`CellState::Zombie`] is body tissue around a nucleus.

use lifeworks_core::{CellCoord, CellState, GridError, GridSize, Life};
use lifeworks_world::{
    commit::PendingUpdates,
    navigation::{BreadthFirstSearch, Reached},
    topology::Adjacency,
    World,
};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Empty space.
pub const EMPTY: CellState = CellState::Dead;
/// Food pellet.
pub const FOOD: CellState = CellState::Alive;
/// Amoeba nucleus.
pub const NUCLEUS: CellState = CellState::Vampire;
/// Amoeba body tissue.
pub const BODY: CellState = CellState::Zombie;

/// Growth above which the body gains the five-wide ring.
pub const GROWTH_STAGE_1: u32 = 10;
/// Growth above which the body gains the seven-wide ring.
pub const GROWTH_STAGE_2: u32 = 20;
/// Growth above which a nucleus splits in two.
pub const GROWTH_STAGE_3: u32 = 30;
/// Nucleus count above which newborn nuclei may be culled.
pub const CROWD_LIMIT: usize = 50;
/// One isolated empty cell in this many turns into food each generation.
pub const FOOD_ODDS: u32 = 6000;
/// Nuclei planted by [`Life::randomize`].
pub const SEED_NUCLEI: usize = 5;

const FOOTPRINT_RADIUS: i64 = 3;

/// Growth and hunger carried by a nucleus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nucleus {
    /// Meals eaten plus one.
    pub growth: u32,
    /// Generations since the last meal plus one.
    pub hunger: u32,
}

impl Default for Nucleus {
    fn default() -> Self {
        Self {
            growth: 1,
            hunger: 1,
        }
    }
}

impl Nucleus {
    /// Largest path distance at which the nucleus can eat.
    #[must_use]
    pub const fn reach(&self) -> u32 {
        if self.growth > GROWTH_STAGE_2 {
            5
        } else if self.growth > GROWTH_STAGE_1 {
            4
        } else {
            3
        }
    }
}

/// Reports whether the body of a nucleus with `growth` covers the offset.
fn covers(growth: u32, row_offset: i64, column_offset: i64) -> bool {
    let near = row_offset.abs().min(column_offset.abs());
    let far = row_offset.abs().max(column_offset.abs());
    match far {
        0 | 1 => true,
        2 => (growth > GROWTH_STAGE_1 && near <= 1) || (growth > GROWTH_STAGE_2 && near == 2),
        3 => growth > GROWTH_STAGE_2 && near <= 2,
        _ => false,
    }
}

/// Cells covered by the body of a nucleus at `center`, nucleus included.
fn footprint(size: GridSize, center: usize, growth: u32) -> impl Iterator<Item = usize> {
    let origin = size.coord(center);
    (-FOOTPRINT_RADIUS..=FOOTPRINT_RADIUS)
        .flat_map(|row| (-FOOTPRINT_RADIUS..=FOOTPRINT_RADIUS).map(move |column| (row, column)))
        .filter(move |&(row, column)| covers(growth, row, column))
        .filter_map(move |(row, column)| {
            size.index(size.wrap(
                i64::from(origin.row()) + row,
                i64::from(origin.column()) + column,
            ))
        })
}

/// Decisions gathered while scanning the current generation.
#[derive(Debug, Default)]
struct NextGeneration {
    nuclei: Vec<(usize, Nucleus)>,
    /// Food as `(origin, destination)`.
    food: Vec<(usize, usize)>,
    claimed: Vec<bool>,
    eaten: Vec<bool>,
}

impl NextGeneration {
    fn reset(&mut self, cell_count: usize) {
        self.nuclei.clear();
        self.food.clear();
        self.claimed.clear();
        self.claimed.resize(cell_count, false);
        self.eaten.clear();
        self.eaten.resize(cell_count, false);
    }

    fn place(&mut self, cell: usize, nucleus: Nucleus) {
        self.claimed[cell] = true;
        self.nuclei.push((cell, nucleus));
    }
}

/// Amoebas that wander, eat, grow and divide on a Moore torus.
///
/// Each generation a nucleus either eats the nearest food within its
/// [`Nucleus::reach`], moves one cell down the breadth-first distance field
/// rooted at that food, splits once its growth passes [`GROWTH_STAGE_3`], or
/// wanders at random when the generation started without food. Crowding
/// culls and splits only happen while food is on the grid. Food drifts randomly and new food
/// occasionally appears in empty surroundings.
#[derive(Debug)]
pub struct AmoebaLife {
    world: World,
    pending: PendingUpdates,
    nuclei: Vec<Nucleus>,
    next: NextGeneration,
    search: BreadthFirstSearch,
    rng: ChaCha8Rng,
}

impl AmoebaLife {
    /// Creates a zero-sized engine seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            world: World::new(Adjacency::Moore),
            pending: PendingUpdates::default(),
            nuclei: Vec::new(),
            next: NextGeneration::default(),
            search: BreadthFirstSearch::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Growth and hunger of the nucleus at `cell`, if there is one.
    ///
    /// Panics outside the grid.
    #[must_use]
    pub fn nucleus(&self, cell: CellCoord) -> Option<Nucleus> {
        let index = self.world.index(cell);
        (self.world.state_at(index) == NUCLEUS).then_some(self.nuclei[index])
    }

    /// Places a nucleus with the given growth and hunger at `cell` and grows
    /// its body around it.
    ///
    /// Panics outside the grid.
    pub fn plant(&mut self, cell: CellCoord, nucleus: Nucleus) {
        let index = self.world.index(cell);
        self.world.set_at(index, NUCLEUS);
        self.nuclei[index] = nucleus;
        self.grow_body(index, nucleus.growth);
    }

    fn grow_body(&mut self, center: usize, growth: u32) {
        for cell in footprint(self.world.size(), center, growth) {
            if self.world.state_at(cell) != NUCLEUS {
                self.world.set_at(cell, BODY);
            }
        }
    }

    /// Neighbors a nucleus or food may move into, or `index` when boxed in.
    fn open_neighbors(&self, index: usize) -> Vec<usize> {
        let mut open: Vec<usize> = self
            .world
            .neighbors(index)
            .iter()
            .copied()
            .filter(|&cell| self.world.state_at(cell) != NUCLEUS && !self.next.claimed[cell])
            .collect();
        if open.is_empty() {
            open.push(index);
        }
        open
    }

    fn random_open_neighbor(&mut self, index: usize) -> usize {
        let open = self.open_neighbors(index);
        open.choose(&mut self.rng).copied().unwrap_or(index)
    }

    fn nearest_food(&mut self, index: usize) -> Option<Reached> {
        let world = &self.world;
        let eaten = &self.next.eaten;
        self.search.search(world.topology(), index, |cell| {
            world.state_at(cell) == FOOD && !eaten[cell]
        })
    }

    /// Open neighbor strictly closer to `prey`, or `index` when none is.
    fn approach(&mut self, index: usize, prey: Reached) -> usize {
        let open = self.open_neighbors(index);
        self.search.explore(self.world.topology(), prey.index);

        let mut best = (index, prey.distance);
        for cell in open {
            if let Some(distance) = self.search.distance(cell) {
                if distance < best.1 {
                    best = (cell, distance);
                }
            }
        }
        best.0
    }

    fn advance_nucleus(&mut self, index: usize, population: &mut usize, food_present: bool) {
        let mut nucleus = self.nuclei[index];

        if !food_present {
            let destination = self.random_open_neighbor(index);
            self.next.place(destination, nucleus);
            return;
        }

        if *population > CROWD_LIMIT && nucleus.growth == 1 && self.rng.gen_bool(0.5) {
            *population -= 1;
            return;
        }

        if nucleus.growth > GROWTH_STAGE_3 {
            let twin = self.random_open_neighbor(index);
            self.next.place(index, Nucleus::default());
            if twin != index {
                self.next.place(twin, Nucleus::default());
            }
            return;
        }

        // Food eaten earlier in this scan is no longer worth chasing.
        let Some(prey) = self.nearest_food(index) else {
            let destination = self.random_open_neighbor(index);
            self.next.place(destination, nucleus);
            return;
        };

        if prey.distance <= nucleus.reach() {
            nucleus.growth += 1;
            nucleus.hunger = 1;
            self.next.eaten[prey.index] = true;
            self.next.place(index, nucleus);
            return;
        }

        nucleus.hunger += 1;
        let destination = self.approach(index, prey);
        self.next.place(destination, nucleus);
    }

    fn drift_food(&mut self, index: usize) {
        let destination = self.random_open_neighbor(index);
        self.next.food.push((index, destination));
    }

    fn maybe_spawn_food(&mut self, index: usize) {
        let isolated = self
            .world
            .neighbors(index)
            .iter()
            .all(|&cell| self.world.state_at(cell) == EMPTY);
        if isolated && self.rng.gen_ratio(1, FOOD_ODDS) {
            self.next.food.push((index, index));
        }
    }

    /// Queues the next generation over an empty grid: bodies, food, nuclei.
    fn queue_next_generation(&mut self) {
        let size = self.world.size();
        for (index, &state) in self.world.cells().iter().enumerate() {
            if state != EMPTY {
                self.pending.push(index, EMPTY);
            }
        }

        for &(center, nucleus) in &self.next.nuclei {
            for cell in footprint(size, center, nucleus.growth) {
                self.pending.push(cell, BODY);
            }
        }
        for &(origin, destination) in &self.next.food {
            if !self.next.eaten[origin] {
                self.pending.push(destination, FOOD);
            }
        }
        for &(center, _) in &self.next.nuclei {
            self.pending.push(center, NUCLEUS);
        }

        self.nuclei.fill(Nucleus::default());
        for &(center, nucleus) in &self.next.nuclei {
            self.nuclei[center] = nucleus;
        }
    }
}

impl Life for AmoebaLife {
    fn resize(&mut self, rows: u32, columns: u32) -> Result<(), GridError> {
        self.world.resize(rows, columns, EMPTY)?;
        self.pending.clear();
        self.nuclei = vec![Nucleus::default(); self.world.len()];
        Ok(())
    }

    fn clear(&mut self) {
        self.world.fill(EMPTY);
        self.nuclei.fill(Nucleus::default());
    }

    fn randomize(&mut self) {
        self.clear();
        if self.world.is_empty() {
            return;
        }

        let mut planted = Vec::with_capacity(SEED_NUCLEI);
        for _ in 0..SEED_NUCLEI {
            let cell = self.rng.gen_range(0..self.world.len());
            self.world.set_at(cell, NUCLEUS);
            planted.push(cell);
        }
        for cell in planted {
            self.grow_body(cell, Nucleus::default().growth);
        }

        let open: Vec<usize> = (0..self.world.len())
            .filter(|&cell| self.world.state_at(cell) != NUCLEUS)
            .collect();
        if let Some(&food) = open.choose(&mut self.rng) {
            self.world.set_at(food, FOOD);
        }
        log::debug!(
            "randomized amoeba life, {} nuclei",
            self.population_count()
        );
    }

    fn get(&self, cell: CellCoord) -> CellState {
        self.world.get(cell)
    }

    fn set(&mut self, cell: CellCoord, state: CellState) {
        let index = self.world.index(cell);
        self.world.set_at(index, state);
        self.nuclei[index] = Nucleus::default();
    }

    fn step(&mut self, on_change: &mut dyn FnMut(CellCoord, CellState)) -> bool {
        self.next.reset(self.world.len());
        let mut population = self
            .world
            .cells()
            .iter()
            .filter(|&&state| state == NUCLEUS)
            .count();
        let food_present = self.world.cells().contains(&FOOD);

        for index in 0..self.world.len() {
            match self.world.state_at(index) {
                NUCLEUS => self.advance_nucleus(index, &mut population, food_present),
                FOOD => self.drift_food(index),
                _ => self.maybe_spawn_food(index),
            }
        }

        self.queue_next_generation();
        let changed = self.pending.commit(&mut self.world, on_change);
        log::trace!(
            "amoeba life stepped, changed: {changed}, nuclei {}",
            self.population_count()
        );
        changed
    }

    fn for_all_life(&self, visit: &mut dyn FnMut(CellCoord, CellState)) {
        self.world.for_each_where(|state| state == NUCLEUS, visit);
    }

    fn population_count(&self) -> u64 {
        self.world.count_where(|state| state == NUCLEUS)
    }

    fn size(&self) -> GridSize {
        self.world.size()
    }

    fn description(&self) -> Option<&'static str> {
        Some("Amoeba Life.\nAmoebas hunt food with BFS, grow as they eat and split when large.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covered(growth: u32) -> usize {
        let size = GridSize::new(9, 9).expect("valid grid");
        footprint(size, size.index(CellCoord::new(4, 4)).expect("inside"), growth).count()
    }

    #[test]
    fn footprint_grows_with_stages() {
        assert_eq!(covered(1), 9);
        assert_eq!(covered(GROWTH_STAGE_1 + 1), 21);
        assert_eq!(covered(GROWTH_STAGE_2 + 1), 45);
    }

    #[test]
    fn reach_grows_with_stages() {
        assert_eq!(Nucleus::default().reach(), 3);
        let mut nucleus = Nucleus {
            growth: GROWTH_STAGE_1 + 1,
            hunger: 1,
        };
        assert_eq!(nucleus.reach(), 4);
        nucleus.growth = GROWTH_STAGE_2 + 1;
        assert_eq!(nucleus.reach(), 5);
    }
}
