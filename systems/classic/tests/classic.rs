use std::collections::HashMap;

use lifeworks_core::{CellCoord, CellState, GridError, Life};
use lifeworks_system_classic::{ClassicLife, SparseLife};

fn engines() -> Vec<Box<dyn Life>> {
    vec![Box::new(ClassicLife::simple(7)), Box::new(SparseLife::new(7))]
}

fn every_topology() -> Vec<Box<dyn Life>> {
    let mut engines = engines();
    engines.push(Box::new(ClassicLife::hex(7)));
    engines.push(Box::new(ClassicLife::knight(7)));
    engines
}

fn snapshot(engine: &dyn Life) -> Vec<CellState> {
    let size = engine.size();
    (0..size.cell_count())
        .map(|index| engine.get(size.coord(index)))
        .collect()
}

fn live_cells(engine: &dyn Life) -> Vec<CellCoord> {
    let mut cells = Vec::new();
    engine.for_all_life(&mut |cell, _| cells.push(cell));
    cells
}

fn step_collecting(engine: &mut dyn Life) -> (bool, Vec<(CellCoord, CellState)>) {
    let mut deltas = Vec::new();
    let changed = engine.step(&mut |cell, state| deltas.push((cell, state)));
    (changed, deltas)
}

fn seed(engine: &mut dyn Life, cells: &[(u32, u32)]) {
    for &(row, column) in cells {
        engine.set(CellCoord::new(row, column), CellState::Alive);
    }
}

#[test]
fn resize_rejects_zero_dimensions() {
    for mut engine in engines() {
        engine.resize(4, 4).expect("valid grid");
        assert_eq!(
            engine.resize(0, 3),
            Err(GridError::InvalidDimensions {
                rows: 0,
                columns: 3
            })
        );
        assert_eq!(engine.size().rows(), 4);
    }
}

#[test]
fn empty_grid_stalls_immediately() {
    for mut engine in engines() {
        engine.resize(8, 8).expect("valid grid");
        let (changed, deltas) = step_collecting(engine.as_mut());
        assert!(!changed);
        assert!(deltas.is_empty());
        assert!(live_cells(engine.as_ref()).is_empty());
        assert_eq!(engine.population_count(), 0);
    }
}

#[test]
fn block_is_a_still_life() {
    for mut engine in engines() {
        engine.resize(6, 6).expect("valid grid");
        seed(engine.as_mut(), &[(2, 2), (2, 3), (3, 2), (3, 3)]);
        let before = snapshot(engine.as_ref());

        let (changed, deltas) = step_collecting(engine.as_mut());

        assert!(!changed);
        assert!(deltas.is_empty());
        assert_eq!(snapshot(engine.as_ref()), before);
        assert_eq!(engine.population_count(), 4);
    }
}

#[test]
fn blinker_oscillates_with_period_two() {
    for mut engine in engines() {
        engine.resize(5, 5).expect("valid grid");
        seed(engine.as_mut(), &[(2, 1), (2, 2), (2, 3)]);
        let horizontal = snapshot(engine.as_ref());

        assert!(engine.step(&mut |_, _| {}));
        assert_eq!(
            live_cells(engine.as_ref()),
            vec![
                CellCoord::new(1, 2),
                CellCoord::new(2, 2),
                CellCoord::new(3, 2)
            ]
        );

        assert!(engine.step(&mut |_, _| {}));
        assert_eq!(snapshot(engine.as_ref()), horizontal);
    }
}

#[test]
fn corner_cells_are_neighbors_across_the_wrap() {
    for mut engine in engines() {
        engine.resize(6, 7).expect("valid grid");
        // (0, 0) has three live neighbors only through diagonal and edge wrap.
        seed(engine.as_mut(), &[(5, 6), (5, 0), (0, 6)]);

        let (_, deltas) = step_collecting(engine.as_mut());

        assert!(deltas.contains(&(CellCoord::new(0, 0), CellState::Alive)));
        assert_eq!(engine.get(CellCoord::new(0, 0)), CellState::Alive);
    }
}

#[test]
fn deltas_match_observed_state_changes() {
    for mut engine in every_topology() {
        engine.resize(16, 20).expect("valid grid");
        engine.randomize();

        for _ in 0..25 {
            let before = snapshot(engine.as_ref());
            let (changed, deltas) = step_collecting(engine.as_mut());
            let after = snapshot(engine.as_ref());
            let size = engine.size();

            let mut reported: HashMap<CellCoord, CellState> = HashMap::new();
            for &(cell, state) in &deltas {
                assert!(
                    reported.insert(cell, state).is_none(),
                    "cell {cell:?} reported twice"
                );
                assert_eq!(engine.get(cell), state);
            }

            let mut observed = 0;
            for index in 0..size.cell_count() {
                if before[index] != after[index] {
                    observed += 1;
                    assert!(reported.contains_key(&size.coord(index)));
                }
            }
            assert_eq!(observed, deltas.len());
            assert_eq!(changed, !deltas.is_empty());
        }
    }
}

#[test]
fn sparse_and_dense_engines_agree() {
    for (rows, columns) in [(1, 1), (2, 3), (3, 3), (12, 17)] {
        let mut dense = ClassicLife::simple(99);
        let mut sparse = SparseLife::new(99);
        dense.resize(rows, columns).expect("valid grid");
        sparse.resize(rows, columns).expect("valid grid");
        dense.randomize();
        for index in 0..dense.size().cell_count() {
            let cell = dense.size().coord(index);
            sparse.set(cell, dense.get(cell));
        }

        for generation in 0..30 {
            let dense_changed = dense.step(&mut |_, _| {});
            let sparse_changed = sparse.step(&mut |_, _| {});
            assert_eq!(dense_changed, sparse_changed, "generation {generation}");
            assert_eq!(
                snapshot(&dense),
                snapshot(&sparse),
                "{rows}x{columns} diverged at generation {generation}"
            );
        }
    }
}

#[test]
fn randomize_is_reproducible_for_a_seed() {
    let mut first = ClassicLife::simple(1234);
    let mut second = ClassicLife::simple(1234);
    first.resize(20, 20).expect("valid grid");
    second.resize(20, 20).expect("valid grid");

    first.randomize();
    second.randomize();
    for _ in 0..10 {
        let _ = first.step(&mut |_, _| {});
        let _ = second.step(&mut |_, _| {});
    }

    assert_eq!(snapshot(&first), snapshot(&second));
}

#[test]
fn clear_kills_everything_but_keeps_dimensions() {
    for mut engine in engines() {
        engine.resize(9, 4).expect("valid grid");
        engine.randomize();
        engine.clear();
        assert_eq!(engine.population_count(), 0);
        assert_eq!(engine.size().cell_count(), 36);
    }
}

#[test]
#[should_panic(expected = "outside")]
fn sparse_access_outside_the_grid_panics() {
    let mut engine = SparseLife::new(0);
    engine.resize(3, 3).expect("valid grid");
    engine.set(CellCoord::new(3, 0), CellState::Alive);
}

#[test]
fn hex_pair_flips_its_shared_neighbors() {
    let mut engine = ClassicLife::hex(5);
    engine.resize(6, 6).expect("valid grid");
    // (2, 2) and (2, 3) share the hex neighbors (1, 2) and (3, 2) on even row 2.
    seed(&mut engine, &[(2, 2), (2, 3)]);

    let (changed, _) = step_collecting(&mut engine);

    assert!(changed);
    assert_eq!(engine.get(CellCoord::new(1, 2)), CellState::Alive);
    assert_eq!(engine.get(CellCoord::new(3, 2)), CellState::Alive);
    // Each original cell sees only one live neighbor and dies.
    assert_eq!(engine.get(CellCoord::new(2, 2)), CellState::Dead);
    assert_eq!(engine.get(CellCoord::new(2, 3)), CellState::Dead);
}

#[test]
fn knight_birth_uses_knight_neighbors() {
    let mut engine = ClassicLife::knight(5);
    engine.resize(8, 8).expect("valid grid");
    // All three seeds are a knight's move away from (4, 4).
    seed(&mut engine, &[(2, 3), (2, 5), (6, 3)]);

    let _ = engine.step(&mut |_, _| {});

    assert_eq!(engine.get(CellCoord::new(4, 4)), CellState::Alive);
    // Touches two seeds on the square grid but none by knight moves.
    assert_eq!(engine.get(CellCoord::new(2, 4)), CellState::Dead);
}

#[test]
fn descriptions_are_available() {
    assert!(ClassicLife::hex(0)
        .description()
        .is_some_and(|text| text.contains("exactly 2")));
    assert!(SparseLife::new(0).description().is_some());
}
