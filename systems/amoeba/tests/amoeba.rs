use std::collections::HashSet;

use lifeworks_core::{CellCoord, CellState, Life};
use lifeworks_system_amoeba::{AmoebaLife, Nucleus, BODY, EMPTY, FOOD, GROWTH_STAGE_3, NUCLEUS};

fn snapshot(engine: &dyn Life) -> Vec<CellState> {
    let size = engine.size();
    (0..size.cell_count())
        .map(|index| engine.get(size.coord(index)))
        .collect()
}

fn nuclei(engine: &dyn Life) -> Vec<CellCoord> {
    let size = engine.size();
    (0..size.cell_count())
        .map(|index| size.coord(index))
        .filter(|&cell| engine.get(cell) == NUCLEUS)
        .collect()
}

fn engine(rows: u32, columns: u32) -> AmoebaLife {
    let mut engine = AmoebaLife::new(21);
    engine.resize(rows, columns).expect("valid grid");
    engine
}

#[test]
fn planted_nucleus_is_wrapped_in_body() {
    let mut engine = engine(8, 8);
    engine.plant(CellCoord::new(0, 0), Nucleus::default());

    assert_eq!(engine.get(CellCoord::new(0, 0)), NUCLEUS);
    assert_eq!(engine.get(CellCoord::new(7, 7)), BODY);
    assert_eq!(engine.get(CellCoord::new(1, 1)), BODY);
    assert_eq!(engine.get(CellCoord::new(2, 2)), EMPTY);
    assert_eq!(engine.population_count(), 1);

    let mut visited = Vec::new();
    engine.for_all_life(&mut |cell, state| visited.push((cell, state)));
    assert_eq!(visited, vec![(CellCoord::new(0, 0), NUCLEUS)]);
}

#[test]
fn nucleus_eats_nearby_food() {
    let mut engine = engine(12, 12);
    engine.plant(CellCoord::new(5, 5), Nucleus::default());
    engine.set(CellCoord::new(5, 8), FOOD);

    assert!(engine.step(&mut |_, _| {}));

    assert_eq!(
        engine.nucleus(CellCoord::new(5, 5)),
        Some(Nucleus {
            growth: 2,
            hunger: 1
        })
    );
    assert_eq!(engine.get(CellCoord::new(5, 8)), EMPTY);
    assert_eq!(engine.get(CellCoord::new(4, 4)), BODY);
    assert_eq!(engine.population_count(), 1);
}

#[test]
fn hungry_nucleus_moves_toward_distant_food() {
    let mut engine = engine(12, 16);
    engine.plant(CellCoord::new(2, 2), Nucleus::default());
    engine.set(CellCoord::new(2, 9), FOOD);

    let _ = engine.step(&mut |_, _| {});

    let moved = nuclei(&engine);
    assert_eq!(moved.len(), 1);
    let position = moved[0];
    assert_eq!(position.column(), 3);
    assert!((1..=3).contains(&position.row()));
    assert_eq!(
        engine.nucleus(position),
        Some(Nucleus {
            growth: 1,
            hunger: 2
        })
    );
    // The old position is now part of the trailing body.
    assert_eq!(engine.get(CellCoord::new(2, 2)), BODY);
}

#[test]
fn grown_nucleus_splits_into_two_newborns() {
    let mut engine = engine(10, 10);
    engine.plant(
        CellCoord::new(4, 4),
        Nucleus {
            growth: GROWTH_STAGE_3 + 1,
            hunger: 7,
        },
    );
    engine.set(CellCoord::new(8, 8), FOOD);

    let _ = engine.step(&mut |_, _| {});

    let twins = nuclei(&engine);
    assert_eq!(twins.len(), 2);
    assert!(twins.contains(&CellCoord::new(4, 4)));
    for cell in twins {
        assert_eq!(engine.nucleus(cell), Some(Nucleus::default()));
    }
}

#[test]
fn nucleus_wanders_when_there_is_no_food() {
    let mut engine = engine(8, 8);
    engine.plant(CellCoord::new(3, 3), Nucleus::default());

    assert!(engine.step(&mut |_, _| {}));

    let moved = nuclei(&engine);
    assert_eq!(moved.len(), 1);
    let position = moved[0];
    assert_ne!(position, CellCoord::new(3, 3));
    assert!(position.row().abs_diff(3) <= 1 && position.column().abs_diff(3) <= 1);
    assert_eq!(engine.get(CellCoord::new(3, 3)), BODY);
}

#[test]
fn crowded_newborns_are_culled() {
    for seed in 0..40 {
        let mut engine = AmoebaLife::new(seed);
        engine.resize(30, 30).expect("valid grid");
        for row in 0..10 {
            for column in 0..6 {
                engine.plant(CellCoord::new(row * 3, column * 3), Nucleus::default());
            }
        }
        // A single meal, eaten early in the scan, must not stop the culling.
        engine.set(CellCoord::new(29, 29), FOOD);
        assert_eq!(engine.population_count(), 60);

        let _ = engine.step(&mut |_, _| {});

        let survivors = engine.population_count();
        assert!(
            (50..60).contains(&survivors),
            "seed {seed}: {survivors} nuclei left"
        );
    }
}

#[test]
fn for_all_life_visits_only_nuclei() {
    let mut engine = engine(32, 32);
    engine.randomize();

    for _ in 0..20 {
        let _ = engine.step(&mut |_, _| {});
        let mut visited = Vec::new();
        engine.for_all_life(&mut |cell, state| {
            assert_eq!(engine.get(cell), state);
            visited.push(state);
        });
        assert!(visited.iter().all(|&state| state == NUCLEUS));
        assert_eq!(visited.len() as u64, engine.population_count());
    }
}

#[test]
fn randomize_plants_nuclei_and_one_food() {
    let mut engine = engine(40, 40);
    engine.randomize();

    let cells = snapshot(&engine);
    let food = cells.iter().filter(|&&state| state == FOOD).count();
    assert_eq!(food, 1);
    assert!((1..=5).contains(&engine.population_count()));
    assert!(cells.contains(&BODY));
}

#[test]
fn nuclei_always_keep_a_body() {
    let mut engine = engine(40, 40);
    engine.randomize();

    for _ in 0..150 {
        let _ = engine.step(&mut |_, _| {});
        let size = engine.size();

        let cells = snapshot(&engine);
        assert!(cells
            .iter()
            .all(|state| [EMPTY, FOOD, NUCLEUS, BODY].contains(state)));

        for cell in nuclei(&engine) {
            assert!(engine.nucleus(cell).is_some());
            for row in -1..=1 {
                for column in -1..=1 {
                    let neighbor = size.wrap(
                        i64::from(cell.row()) + row,
                        i64::from(cell.column()) + column,
                    );
                    assert_ne!(engine.get(neighbor), EMPTY, "{cell:?} lost its body");
                }
            }
        }
    }
}

#[test]
fn deltas_match_observed_state_changes() {
    let mut engine = engine(30, 30);
    engine.randomize();

    for _ in 0..40 {
        let before = snapshot(&engine);
        let mut reported = HashSet::new();
        let changed = engine.step(&mut |cell, state| {
            assert!(reported.insert(cell), "cell {cell:?} reported twice");
            assert_ne!(state, CellState::Red);
        });
        let after = snapshot(&engine);
        let size = engine.size();

        let observed: HashSet<CellCoord> = (0..size.cell_count())
            .filter(|&index| before[index] != after[index])
            .map(|index| size.coord(index))
            .collect();
        assert_eq!(observed, reported);
        assert_eq!(changed, !reported.is_empty());
    }
}

#[test]
fn replays_deterministically() {
    let run = |seed| {
        let mut engine = AmoebaLife::new(seed);
        engine.resize(32, 32).expect("valid grid");
        engine.randomize();
        for _ in 0..60 {
            let _ = engine.step(&mut |_, _| {});
        }
        snapshot(&engine)
    };

    assert_eq!(run(3), run(3));
}
