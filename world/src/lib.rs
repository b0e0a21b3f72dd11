#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Dense toroidal grid storage shared by the Lifeworks rule engines.
//!
//! A [`World`] owns the cell states of one engine together with the
//! [`topology::NeighborTable`] built for its adjacency scheme. Engines read
//! the world while deciding the next generation, record decisions in a
//! [`commit::PendingUpdates`] queue and apply them once the scan is over.

pub mod commit;
pub mod navigation;
pub mod topology;

use lifeworks_core::{CellCoord, CellState, GridError, GridSize};

use crate::topology::{Adjacency, NeighborTable};

/// Authoritative cell storage of a single rule engine.
#[derive(Clone, Debug)]
pub struct World {
    adjacency: Adjacency,
    size: GridSize,
    cells: Vec<CellState>,
    topology: NeighborTable,
}

impl World {
    /// Creates an empty world whose topology follows `adjacency`.
    #[must_use]
    pub fn new(adjacency: Adjacency) -> Self {
        Self {
            adjacency,
            size: GridSize::default(),
            cells: Vec::new(),
            topology: NeighborTable::default(),
        }
    }

    /// Replaces the grid with a new one of the provided dimensions.
    ///
    /// Every cell is set to `fill`. On error the world is left untouched.
    pub fn resize(&mut self, rows: u32, columns: u32, fill: CellState) -> Result<(), GridError> {
        let size = GridSize::new(rows, columns).map_err(|error| {
            log::warn!("rejected resize: {error}");
            error
        })?;
        self.topology = NeighborTable::for_size(size, self.adjacency);
        self.cells = vec![fill; size.cell_count()];
        self.size = size;
        log::debug!(
            "built {:?} topology for {rows}x{columns} grid",
            self.adjacency
        );
        Ok(())
    }

    /// Sets every cell to `state`.
    pub fn fill(&mut self, state: CellState) {
        self.cells.fill(state);
    }

    /// Adjacency scheme of the world.
    #[must_use]
    pub const fn adjacency(&self) -> Adjacency {
        self.adjacency
    }

    /// Current dimensions.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Number of cells in the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the world holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Neighbor table of the current grid.
    #[must_use]
    pub const fn topology(&self) -> &NeighborTable {
        &self.topology
    }

    /// Neighbor indices of the cell at `index`.
    #[must_use]
    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.topology.neighbors(index)
    }

    /// Cell states in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Linear index of `cell`.
    ///
    /// # Panics
    ///
    /// Panics when the coordinate lies outside the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> usize {
        match self.size.index(cell) {
            Some(index) => index,
            None => panic!(
                "cell ({}, {}) is outside the {}x{} grid",
                cell.row(),
                cell.column(),
                self.size.rows(),
                self.size.columns()
            ),
        }
    }

    /// Coordinate of the cell at `index`.
    #[must_use]
    pub const fn coord(&self, index: usize) -> CellCoord {
        self.size.coord(index)
    }

    /// State of the cell at `cell`. Panics outside the grid.
    #[must_use]
    pub fn get(&self, cell: CellCoord) -> CellState {
        self.cells[self.index(cell)]
    }

    /// Overwrites the cell at `cell`. Panics outside the grid.
    pub fn set(&mut self, cell: CellCoord, state: CellState) {
        let index = self.index(cell);
        self.cells[index] = state;
    }

    /// State of the cell at linear `index`.
    #[must_use]
    pub fn state_at(&self, index: usize) -> CellState {
        self.cells[index]
    }

    /// Overwrites the cell at linear `index`.
    pub fn set_at(&mut self, index: usize, state: CellState) {
        self.cells[index] = state;
    }

    /// Counts the neighbors of `index` whose state satisfies `predicate`.
    #[must_use]
    pub fn count_neighbors<P>(&self, index: usize, predicate: P) -> usize
    where
        P: Fn(CellState) -> bool,
    {
        self.neighbors(index)
            .iter()
            .filter(|&&neighbor| predicate(self.cells[neighbor]))
            .count()
    }

    /// Visits every cell whose state satisfies `predicate`, in row-major order.
    pub fn for_each_where<P>(&self, predicate: P, visit: &mut dyn FnMut(CellCoord, CellState))
    where
        P: Fn(CellState) -> bool,
    {
        for (index, &state) in self.cells.iter().enumerate() {
            if predicate(state) {
                visit(self.size.coord(index), state);
            }
        }
    }

    /// Counts the cells whose state satisfies `predicate`.
    #[must_use]
    pub fn count_where<P>(&self, predicate: P) -> u64
    where
        P: Fn(CellState) -> bool,
    {
        self.cells.iter().filter(|&&state| predicate(state)).count() as u64
    }
}
