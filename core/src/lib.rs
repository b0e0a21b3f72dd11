#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lifeworks engines.
//!
//! This crate defines the vocabulary that connects drivers and rule engines.
//! A driver owns exactly one engine implementing [`Life`], mutates it through
//! `resize`, `clear`, `randomize` and `set`, advances it with `step`, and
//! receives one `(cell, state)` notification per changed cell. Engines never
//! talk to each other and share no state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-cell state tag understood by every rule engine.
///
/// Engines use a subset of the tags. Equality is by tag only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Empty cell.
    #[default]
    Dead,
    /// Living cell in the two-state automata; food in Amoeba Life.
    Alive,
    /// Red species; scissors in Rock-Paper-Scissors.
    Red,
    /// Green species; paper in Rock-Paper-Scissors.
    Green,
    /// Blue species; rock in Rock-Paper-Scissors.
    Blue,
    /// Pursuer in Vampire Life; nucleus in Amoeba Life.
    Vampire,
    /// Amoeba body surrounding a nucleus.
    Zombie,
}

impl CellState {
    /// Species tags used by the multi-species automata, in draw order.
    pub const SPECIES: [CellState; 3] = [CellState::Red, CellState::Green, CellState::Blue];

    /// Reports whether the cell is empty.
    #[must_use]
    pub const fn is_dead(self) -> bool {
        matches!(self, Self::Dead)
    }

    /// Single-character glyph used by text renderers.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Dead => '.',
            Self::Alive => '#',
            Self::Red => 'r',
            Self::Green => 'g',
            Self::Blue => 'b',
            Self::Vampire => 'V',
            Self::Zombie => 'z',
        }
    }
}

/// Location of a single grid cell expressed as row and column indices.
///
/// Ordering is row-major, which is the visitation order of every engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

/// Dimensions of a toroidal grid.
///
/// The default value is the zero-sized grid every engine starts with before
/// its first successful resize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    rows: u32,
    columns: u32,
}

impl GridSize {
    /// Validates and creates a grid size.
    ///
    /// Both dimensions must be at least one and the total cell count must be
    /// addressable on the current platform.
    pub fn new(rows: u32, columns: u32) -> Result<Self, GridError> {
        if rows == 0 || columns == 0 {
            return Err(GridError::InvalidDimensions { rows, columns });
        }

        let rows_usize = usize::try_from(rows).map_err(|_| GridError::TooLarge { rows, columns })?;
        let columns_usize =
            usize::try_from(columns).map_err(|_| GridError::TooLarge { rows, columns })?;
        if rows_usize.checked_mul(columns_usize).is_none() {
            return Err(GridError::TooLarge { rows, columns });
        }

        Ok(Self { rows, columns })
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Reports whether the grid holds no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns == 0
    }

    /// Reports whether the coordinate addresses a cell of this grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.row < self.rows && cell.column < self.columns
    }

    /// Row-major linear index of the cell, if it lies within the grid.
    #[must_use]
    pub const fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            Some(cell.row as usize * self.columns as usize + cell.column as usize)
        } else {
            None
        }
    }

    /// Coordinate of the provided row-major linear index.
    ///
    /// The index must be smaller than [`GridSize::cell_count`].
    #[must_use]
    pub const fn coord(&self, index: usize) -> CellCoord {
        let columns = self.columns as usize;
        CellCoord::new((index / columns) as u32, (index % columns) as u32)
    }

    /// Wraps arbitrary signed offsets onto the torus using floor modulo.
    ///
    /// The grid must not be empty.
    #[must_use]
    pub fn wrap(&self, row: i64, column: i64) -> CellCoord {
        let wrapped_row = row.rem_euclid(i64::from(self.rows));
        let wrapped_column = column.rem_euclid(i64::from(self.columns));
        CellCoord::new(wrapped_row as u32, wrapped_column as u32)
    }
}

/// Errors raised while (re)configuring an engine's grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GridError {
    /// At least one dimension was zero.
    #[error("invalid grid dimensions {rows}x{columns}: both must be at least 1")]
    InvalidDimensions {
        /// Requested row count.
        rows: u32,
        /// Requested column count.
        columns: u32,
    },
    /// The total cell count does not fit in the address space.
    #[error("grid dimensions {rows}x{columns} exceed the addressable cell count")]
    TooLarge {
        /// Requested row count.
        rows: u32,
        /// Requested column count.
        columns: u32,
    },
}

/// Contract implemented by every cellular-automaton rule engine.
///
/// Engines are single-threaded and own their grid exclusively. A new engine
/// has zero size and must be resized before any other call.
///
/// Point access through [`Life::get`] and [`Life::set`] panics when the
/// coordinate lies outside the grid; drivers validate coordinates before
/// calling in.
pub trait Life: std::fmt::Debug {
    /// Rebuilds the grid, its topology and any per-cell bookkeeping.
    ///
    /// Every cell ends up in the variant's cleared state. Invalid dimensions
    /// are rejected and leave the engine unchanged.
    fn resize(&mut self, rows: u32, columns: u32) -> Result<(), GridError>;

    /// Resets every cell and all per-cell bookkeeping, keeping the dimensions.
    fn clear(&mut self);

    /// Seeds the grid according to the variant's random policy.
    fn randomize(&mut self);

    /// Current state of a cell.
    fn get(&self, cell: CellCoord) -> CellState;

    /// Overwrites the state of a cell.
    fn set(&mut self, cell: CellCoord, state: CellState);

    /// Advances the automaton by exactly one generation.
    ///
    /// `on_change` is invoked once for every cell whose state differs after
    /// the generation is committed, in the order the engine computed the
    /// updates. Returns `false` when nothing changed.
    fn step(&mut self, on_change: &mut dyn FnMut(CellCoord, CellState)) -> bool;

    /// Visits every cell the variant considers alive, in row-major order.
    fn for_all_life(&self, visit: &mut dyn FnMut(CellCoord, CellState));

    /// Number of cells the variant considers alive.
    fn population_count(&self) -> u64;

    /// Current grid dimensions.
    fn size(&self) -> GridSize;

    /// Human-readable summary of the variant's rules.
    fn description(&self) -> Option<&'static str> {
        None
    }
}
