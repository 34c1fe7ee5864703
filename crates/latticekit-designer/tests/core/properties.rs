use latticekit_core::LatticeCoord;
use latticekit_designer::{EntityStore, MoveEngine};
use proptest::prelude::*;

use crate::common::{electrode, point, square_lattice};

fn offset() -> impl Strategy<Value = LatticeCoord> {
    (-5i32..=5, -5i32..=5).prop_map(|(n, m)| LatticeCoord::new(n, m, 0))
}

proptest! {
    #[test]
    fn move_by_coordinate_is_additive(
        sites in prop::collection::hash_set((0i32..20, 0i32..20), 1..8),
        a in offset(),
        b in offset(),
    ) {
        let lattice = square_lattice();
        let mut store = EntityStore::new();
        let ids: Vec<_> = sites
            .iter()
            .map(|&(n, m)| point(&mut store, &lattice, n, m))
            .collect();

        let mut stepwise = MoveEngine::default();
        stepwise.prepare(&store, &ids, None).unwrap();
        prop_assert!(stepwise.move_by_coordinate(a, &lattice));
        prop_assert!(stepwise.move_by_coordinate(b, &lattice));

        let mut direct = MoveEngine::default();
        direct.prepare(&store, &ids, None).unwrap();
        prop_assert!(direct.move_by_coordinate(a + b, &lattice));

        for id in &ids {
            prop_assert_eq!(stepwise.lattice_coord_of(*id), direct.lattice_coord_of(*id));
        }
        prop_assert!(stepwise.origin().approx_eq(&direct.origin(), 1e-9));
    }

    #[test]
    fn top_items_returns_selection(chunks in prop::collection::vec(1usize..4, 1..6)) {
        let lattice = square_lattice();
        let mut store = EntityStore::new();
        let mut selection = Vec::new();
        let mut next = 0i32;

        for (i, size) in chunks.iter().enumerate() {
            let mut members = Vec::new();
            for _ in 0..*size {
                members.push(point(&mut store, &lattice, next % 20, next / 20));
                next += 1;
            }
            if i % 2 == 1 {
                members.push(electrode(&mut store, i as f64 * 10.0, 0.0));
            }
            if members.len() == 1 {
                selection.push(members[0]);
            } else {
                selection.push(store.group(&members).unwrap());
            }
        }

        let mut engine = MoveEngine::default();
        engine.prepare(&store, &selection, None).unwrap();
        engine.move_by_coordinate(LatticeCoord::new(0, 1, 0), &lattice);
        prop_assert_eq!(engine.top_items(&store).unwrap(), selection);
    }
}
