//! Conway's Game of Life stored as a set of live cells.

use std::collections::{BTreeMap, BTreeSet};

use lifeworks_core::{CellCoord, CellState, GridError, GridSize, Life};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::RuleSet;

/// B3/S23 automaton that only stores live cells.
///
/// New life can only appear next to existing life, so a generation only
/// inspects live cells and their neighborhoods. Results match the dense
/// Simple Life engine on every grid size, including grids small enough for
/// the wrapped neighborhood to overlap itself.
#[derive(Debug)]
pub struct SparseLife {
    size: GridSize,
    live: BTreeSet<CellCoord>,
    rng: ChaCha8Rng,
}

impl SparseLife {
    /// Creates a zero-sized engine seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            size: GridSize::default(),
            live: BTreeSet::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn check_bounds(&self, cell: CellCoord) {
        assert!(
            self.size.contains(cell),
            "cell ({}, {}) is outside the {}x{} grid",
            cell.row(),
            cell.column(),
            self.size.rows(),
            self.size.columns()
        );
    }
}

/// The wrapped 3x3 block centred on `cell`, each distinct cell listed once.
fn neighborhood(size: GridSize, cell: CellCoord) -> impl Iterator<Item = CellCoord> {
    let mut block = [cell; 9];
    let mut count = 0;

    for row_offset in -1..=1 {
        for column_offset in -1..=1 {
            let candidate = size.wrap(
                i64::from(cell.row()) + row_offset,
                i64::from(cell.column()) + column_offset,
            );
            if block[..count].contains(&candidate) {
                continue;
            }
            block[count] = candidate;
            count += 1;
        }
    }

    block.into_iter().take(count)
}

impl Life for SparseLife {
    fn resize(&mut self, rows: u32, columns: u32) -> Result<(), GridError> {
        self.size = GridSize::new(rows, columns)?;
        self.live.clear();
        log::debug!("resized sparse life to {rows}x{columns}");
        Ok(())
    }

    fn clear(&mut self) {
        self.live.clear();
    }

    fn randomize(&mut self) {
        self.live.clear();
        for index in 0..self.size.cell_count() {
            if self.rng.gen_bool(0.5) {
                let _ = self.live.insert(self.size.coord(index));
            }
        }
        log::debug!("randomized sparse life, population {}", self.live.len());
    }

    fn get(&self, cell: CellCoord) -> CellState {
        self.check_bounds(cell);
        if self.live.contains(&cell) {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }

    fn set(&mut self, cell: CellCoord, state: CellState) {
        self.check_bounds(cell);
        if state == CellState::Alive {
            let _ = self.live.insert(cell);
        } else {
            let _ = self.live.remove(&cell);
        }
    }

    fn step(&mut self, on_change: &mut dyn FnMut(CellCoord, CellState)) -> bool {
        // Population of each 3x3 block, centre included.
        let mut populations: BTreeMap<CellCoord, usize> = BTreeMap::new();
        for &cell in &self.live {
            for neighbor in neighborhood(self.size, cell) {
                *populations.entry(neighbor).or_insert(0) += 1;
            }
        }

        let rules = RuleSet::CONWAY;
        let mut next = BTreeSet::new();
        let mut changes = Vec::new();
        for (cell, population) in populations {
            let alive = self.live.contains(&cell);
            let live_neighbors = if alive { population - 1 } else { population };
            let survives = rules.next(alive, live_neighbors);

            if survives {
                let _ = next.insert(cell);
            }
            if survives != alive {
                changes.push((cell, survives));
            }
        }

        self.live = next;
        for &(cell, alive) in &changes {
            let state = if alive {
                CellState::Alive
            } else {
                CellState::Dead
            };
            on_change(cell, state);
        }

        log::trace!(
            "sparse life stepped, {} changes, population {}",
            changes.len(),
            self.live.len()
        );
        !changes.is_empty()
    }

    fn for_all_life(&self, visit: &mut dyn FnMut(CellCoord, CellState)) {
        for &cell in &self.live {
            visit(cell, CellState::Alive);
        }
    }

    fn population_count(&self) -> u64 {
        self.live.len() as u64
    }

    fn size(&self) -> GridSize {
        self.size
    }

    fn description(&self) -> Option<&'static str> {
        Some("Sparse Game of Life.\nClassic B3/S23 that only tracks live cells.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighborhood_lists_nine_cells_on_large_grids() {
        let size = GridSize::new(5, 5).expect("valid size");
        let cells: Vec<_> = neighborhood(size, CellCoord::new(0, 0)).collect();
        assert_eq!(cells.len(), 9);
        assert!(cells.contains(&CellCoord::new(4, 4)));
    }

    #[test]
    fn neighborhood_collapses_on_tiny_grids() {
        let size = GridSize::new(2, 1).expect("valid size");
        let cells: Vec<_> = neighborhood(size, CellCoord::new(0, 0)).collect();
        assert_eq!(cells, vec![CellCoord::new(1, 0), CellCoord::new(0, 0)]);
    }
}
