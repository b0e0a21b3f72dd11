//! Neighbor tables for toroidal grids.

use lifeworks_core::{GridError, GridSize};

const MOORE_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

// Odd rows are shifted right, so even rows lose their right-hand diagonals
// and odd rows lose their left-hand ones.
const HEX_EVEN_ROW_OFFSETS: [(i64, i64); 6] = [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, -1), (1, 0)];
const HEX_ODD_ROW_OFFSETS: [(i64, i64); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0), (1, 1)];

const KNIGHT_OFFSETS: [(i64, i64); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Adjacency scheme used to connect cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Adjacency {
    /// The eight surrounding cells of a square grid.
    Moore,
    /// Six neighbors of an offset hexagonal grid where odd rows shift right.
    Hex,
    /// The eight cells a chess knight can reach.
    Knight,
}

impl Adjacency {
    /// Row and column offsets applied to a cell in the provided row.
    #[must_use]
    pub fn offsets(self, row: u32) -> &'static [(i64, i64)] {
        match self {
            Self::Moore => &MOORE_OFFSETS,
            Self::Hex if row % 2 == 0 => &HEX_EVEN_ROW_OFFSETS,
            Self::Hex => &HEX_ODD_ROW_OFFSETS,
            Self::Knight => &KNIGHT_OFFSETS,
        }
    }

    /// Neighbor count of every cell on a grid large enough to avoid wrap collisions.
    #[must_use]
    pub const fn degree(self) -> usize {
        match self {
            Self::Moore | Self::Knight => 8,
            Self::Hex => 6,
        }
    }
}

/// Immutable adjacency relation of a toroidal grid stored in compressed rows.
///
/// Edges are undirected: whenever a scheme offset links `a` to `b`, `b` also
/// lists `a`. Duplicate edges caused by wrap-around on small grids are
/// skipped and self-loops are never recorded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NeighborTable {
    size: GridSize,
    offsets: Vec<usize>,
    neighbors: Vec<usize>,
}

impl NeighborTable {
    /// Builds the table for the provided dimensions and scheme.
    pub fn build(rows: u32, columns: u32, adjacency: Adjacency) -> Result<Self, GridError> {
        let size = GridSize::new(rows, columns)?;
        Ok(Self::for_size(size, adjacency))
    }

    /// Builds the table for an already validated size.
    ///
    /// An empty size yields an empty table.
    #[must_use]
    pub fn for_size(size: GridSize, adjacency: Adjacency) -> Self {
        let cell_count = size.cell_count();
        let mut lists: Vec<Vec<usize>> = (0..cell_count)
            .map(|_| Vec::with_capacity(adjacency.degree()))
            .collect();

        for index in 0..cell_count {
            let cell = size.coord(index);
            for &(row_offset, column_offset) in adjacency.offsets(cell.row()) {
                let neighbor = size.wrap(
                    i64::from(cell.row()) + row_offset,
                    i64::from(cell.column()) + column_offset,
                );
                let Some(neighbor_index) = size.index(neighbor) else {
                    continue;
                };

                if neighbor_index == index || lists[index].contains(&neighbor_index) {
                    continue;
                }

                lists[index].push(neighbor_index);
                lists[neighbor_index].push(index);
            }
        }

        let mut offsets = Vec::with_capacity(cell_count + 1);
        let mut neighbors = Vec::with_capacity(cell_count * adjacency.degree());
        offsets.push(0);
        for list in lists {
            neighbors.extend(list);
            offsets.push(neighbors.len());
        }

        Self {
            size,
            offsets,
            neighbors,
        }
    }

    /// Dimensions the table was built for.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Number of cells covered by the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Reports whether the table covers no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Neighbor indices of the provided cell in a deterministic order.
    #[must_use]
    pub fn neighbors(&self, index: usize) -> &[usize] {
        &self.neighbors[self.offsets[index]..self.offsets[index + 1]]
    }
}
