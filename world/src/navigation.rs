//! Breadth-first search over neighbor tables.

use std::collections::VecDeque;

use crate::topology::NeighborTable;

const UNREACHED: u32 = u32::MAX;
const NO_PARENT: usize = usize::MAX;

/// Cell found by [`BreadthFirstSearch::search`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reached {
    /// Linear index of the goal cell.
    pub index: usize,
    /// Number of edges between the source and the goal.
    pub distance: u32,
}

/// Reusable breadth-first search workspace.
///
/// Buffers are kept between searches so pursuit-style engines can run one
/// search per actor per generation without reallocating.
#[derive(Clone, Debug, Default)]
pub struct BreadthFirstSearch {
    source: Option<usize>,
    distances: Vec<u32>,
    parents: Vec<usize>,
    queue: VecDeque<usize>,
}

impl BreadthFirstSearch {
    /// Searches outward from `source` and stops at the nearest cell accepted by `is_goal`.
    ///
    /// Goals at equal distance are resolved by visitation order, which follows
    /// the table's neighbor order. The source itself is tested first.
    pub fn search<F>(
        &mut self,
        table: &NeighborTable,
        source: usize,
        mut is_goal: F,
    ) -> Option<Reached>
    where
        F: FnMut(usize) -> bool,
    {
        self.reset(table.len(), source);

        while let Some(current) = self.queue.pop_front() {
            let distance = self.distances[current];
            if is_goal(current) {
                return Some(Reached {
                    index: current,
                    distance,
                });
            }

            for &neighbor in table.neighbors(current) {
                if self.distances[neighbor] != UNREACHED {
                    continue;
                }

                self.distances[neighbor] = distance + 1;
                self.parents[neighbor] = current;
                self.queue.push_back(neighbor);
            }
        }

        None
    }

    /// Computes distances from `source` to every reachable cell.
    pub fn explore(&mut self, table: &NeighborTable, source: usize) {
        let _ = self.search(table, source, |_| false);
    }

    /// Distance recorded for the cell by the most recent search.
    ///
    /// Cells the search never reached, including cells beyond an early stop,
    /// report `None`.
    #[must_use]
    pub fn distance(&self, index: usize) -> Option<u32> {
        self.distances
            .get(index)
            .copied()
            .filter(|&distance| distance != UNREACHED)
    }

    /// First cell on the shortest path from the search source to `target`.
    ///
    /// Returns `None` when the target was not reached or is the source itself.
    #[must_use]
    pub fn first_step_toward(&self, target: usize) -> Option<usize> {
        let source = self.source?;
        if self.distance(target).is_none() {
            return None;
        }

        let mut current = target;
        loop {
            let parent = *self.parents.get(current)?;
            if parent == NO_PARENT {
                return None;
            }
            if parent == source {
                return Some(current);
            }
            current = parent;
        }
    }

    fn reset(&mut self, cell_count: usize, source: usize) {
        self.distances.clear();
        self.distances.resize(cell_count, UNREACHED);
        self.parents.clear();
        self.parents.resize(cell_count, NO_PARENT);
        self.queue.clear();
        self.source = None;

        if source < cell_count {
            self.distances[source] = 0;
            self.source = Some(source);
            self.queue.push_back(source);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Adjacency;
    use lifeworks_core::CellCoord;

    fn index(table: &NeighborTable, row: u32, column: u32) -> usize {
        table
            .size()
            .index(CellCoord::new(row, column))
            .expect("cell within grid")
    }

    #[test]
    fn search_finds_nearest_goal() {
        let table = NeighborTable::build(10, 10, Adjacency::Moore).expect("valid grid");
        let source = index(&table, 5, 5);
        let near = index(&table, 5, 7);
        let far = index(&table, 0, 0);
        let mut bfs = BreadthFirstSearch::default();

        let reached = bfs
            .search(&table, source, |cell| cell == near || cell == far)
            .expect("goal reachable");

        assert_eq!(
            reached,
            Reached {
                index: near,
                distance: 2
            }
        );
    }

    #[test]
    fn search_wraps_around_the_torus() {
        let table = NeighborTable::build(10, 10, Adjacency::Moore).expect("valid grid");
        let source = index(&table, 0, 0);
        let target = index(&table, 9, 9);
        let mut bfs = BreadthFirstSearch::default();

        let reached = bfs
            .search(&table, source, |cell| cell == target)
            .expect("goal reachable");
        assert_eq!(reached.distance, 1);
        assert_eq!(bfs.first_step_toward(target), Some(target));
    }

    #[test]
    fn first_step_lies_on_a_shortest_path() {
        let table = NeighborTable::build(12, 12, Adjacency::Moore).expect("valid grid");
        let source = index(&table, 2, 2);
        let target = index(&table, 2, 6);
        let mut bfs = BreadthFirstSearch::default();
        bfs.explore(&table, source);

        let step = bfs.first_step_toward(target).expect("path exists");
        assert!(table.neighbors(source).contains(&step));
        assert_eq!(bfs.distance(step), Some(1));

        let mut from_step = BreadthFirstSearch::default();
        from_step.explore(&table, step);
        assert_eq!(from_step.distance(target), Some(3));
    }

    #[test]
    fn source_is_never_its_own_first_step() {
        let table = NeighborTable::build(4, 4, Adjacency::Moore).expect("valid grid");
        let mut bfs = BreadthFirstSearch::default();
        bfs.explore(&table, 5);
        assert_eq!(bfs.distance(5), Some(0));
        assert_eq!(bfs.first_step_toward(5), None);
    }

    #[test]
    fn missing_goal_reports_none() {
        let table = NeighborTable::build(4, 4, Adjacency::Knight).expect("valid grid");
        let mut bfs = BreadthFirstSearch::default();
        assert_eq!(bfs.search(&table, 0, |_| false), None);
    }
}
