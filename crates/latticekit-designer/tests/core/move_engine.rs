use latticekit_core::{DesignerError, LatticeCoord, ScenePoint};
use latticekit_designer::{EntityStore, MoveEngine};
use latticekit_settings::{GhostSettings, PivotPolicy};

use crate::common::{electrode, nested, point, square_lattice};

/// Two points at (1,1) and (2,1); site (4,1) taken by an outside entity.
fn blocked_row() -> (EntityStore, latticekit_designer::SiteLattice, MoveEngine) {
    let mut lattice = square_lattice();
    let mut store = EntityStore::new();
    let a = point(&mut store, &lattice, 1, 1);
    let b = point(&mut store, &lattice, 2, 1);
    lattice.occupy(LatticeCoord::new(4, 1, 0), 999).unwrap();

    let mut engine = MoveEngine::default();
    engine.prepare(&store, &[a, b], None).unwrap();
    (store, lattice, engine)
}

#[test]
fn test_check_valid_rejects_occupied_target() {
    let (_store, lattice, engine) = blocked_row();

    assert!(engine.check_valid(LatticeCoord::new(1, 0, 0), &lattice).unwrap());
    assert!(engine.check_valid(LatticeCoord::new(0, 1, 0), &lattice).unwrap());
    assert!(!engine.check_valid(LatticeCoord::new(2, 0, 0), &lattice).unwrap());
    assert!(engine.check_valid(LatticeCoord::new(4, 0, 0), &lattice).unwrap());
}

#[test]
fn test_one_occupied_site_blocks_only_moves_onto_it() {
    let targets = [
        LatticeCoord::new(5, 0, 0),
        LatticeCoord::new(5, 1, 0),
        LatticeCoord::new(5, 2, 0),
    ];
    let mut store = EntityStore::new();
    let base = square_lattice();
    let ids: Vec<_> = (0..3).map(|m| point(&mut store, &base, 0, m)).collect();

    let mut engine = MoveEngine::default();
    engine.prepare(&store, &ids, None).unwrap();
    let onto_targets = LatticeCoord::new(5, 0, 0);
    let alongside = LatticeCoord::new(6, 0, 0);

    for (i, taken) in targets.iter().enumerate() {
        let mut lattice = square_lattice();
        lattice.occupy(*taken, 900 + i as u64).unwrap();

        assert!(!engine.check_valid(onto_targets, &lattice).unwrap());
        assert!(engine.check_valid(alongside, &lattice).unwrap());

        let availability = engine.lattice_availability(onto_targets, &lattice).unwrap();
        let expected: Vec<bool> = (0..3).map(|j| j != i).collect();
        assert_eq!(availability, expected);
    }

    // a lone preview at the origin: offsets equal the target sites
    let mut lattice = square_lattice();
    lattice.occupy(targets[1], 901).unwrap();
    engine.prepare(&store, &ids[..1], None).unwrap();
    let verdicts: Vec<bool> = targets
        .iter()
        .map(|t| engine.check_valid(*t, &lattice).unwrap())
        .collect();
    assert_eq!(verdicts, vec![true, false, true]);
}

#[test]
fn test_check_valid_rejects_missing_site() {
    let (_store, mut lattice, engine) = blocked_row();

    assert!(!engine.check_valid(LatticeCoord::new(-2, 0, 0), &lattice).unwrap());
    assert!(!engine.check_valid(LatticeCoord::new(0, 0, 1), &lattice).unwrap());

    lattice.disable_site(LatticeCoord::new(1, 5, 0));
    assert!(!engine.check_valid(LatticeCoord::new(0, 4, 0), &lattice).unwrap());
}

#[test]
fn test_check_valid_does_not_touch_state() {
    let (_store, lattice, engine) = blocked_row();
    let before: Vec<_> = engine.point_previews().iter().map(|p| p.lattice_coord()).collect();

    engine.check_valid(LatticeCoord::new(2, 0, 0), &lattice).unwrap();

    let after: Vec<_> = engine.point_previews().iter().map(|p| p.lattice_coord()).collect();
    assert_eq!(before, after);
    assert!(engine.is_valid());
    assert_eq!(engine.origin(), ScenePoint::ORIGIN);
}

#[test]
fn test_lattice_availability_per_point() {
    let (_store, lattice, engine) = blocked_row();

    assert_eq!(
        engine
            .lattice_availability(LatticeCoord::new(2, 0, 0), &lattice)
            .unwrap(),
        vec![true, false]
    );
    assert_eq!(
        engine
            .lattice_availability(LatticeCoord::new(-2, 0, 0), &lattice)
            .unwrap(),
        vec![false, true]
    );
}

#[test]
fn test_queries_need_a_session() {
    let lattice = square_lattice();
    let store = EntityStore::new();
    let engine = MoveEngine::default();

    assert_eq!(
        engine.check_valid(LatticeCoord::ZERO, &lattice),
        Err(DesignerError::NoActiveSession)
    );
    assert_eq!(
        engine.lattice_availability(LatticeCoord::ZERO, &lattice),
        Err(DesignerError::NoActiveSession)
    );
    assert_eq!(engine.top_items(&store), Err(DesignerError::NoActiveSession));
}

#[test]
fn test_move_by_coordinate_shifts_all_points() {
    let lattice = square_lattice();
    let mut store = EntityStore::new();
    let a = point(&mut store, &lattice, 1, 1);
    let b = point(&mut store, &lattice, 2, 3);

    let mut engine = MoveEngine::default();
    engine.prepare(&store, &[a, b], None).unwrap();
    assert!(engine.move_by_coordinate(LatticeCoord::new(2, 1, 0), &lattice));

    assert_eq!(engine.lattice_coord_of(a), Some(LatticeCoord::new(3, 2, 0)));
    assert_eq!(engine.lattice_coord_of(b), Some(LatticeCoord::new(4, 4, 0)));
    assert_eq!(engine.origin(), ScenePoint::new(2.0, 1.0));
    assert_eq!(engine.move_offset(), ScenePoint::new(2.0, 1.0));
    assert_eq!(
        engine.point_previews()[1].scene_pos(engine.origin()),
        ScenePoint::new(4.0, 4.0)
    );
    assert_eq!(engine.lattice_coord_of(12345), None);
}

#[test]
fn test_move_without_anchor_is_refused() {
    let lattice = square_lattice();
    let mut store = EntityStore::new();
    let e = electrode(&mut store, 3.0, 3.0);

    let mut engine = MoveEngine::default();
    engine.prepare(&store, &[e], None).unwrap();
    assert!(engine.anchor_preview().is_none());

    assert!(!engine.move_by_coordinate(LatticeCoord::new(1, 0, 0), &lattice));
    assert_eq!(engine.origin(), ScenePoint::ORIGIN);
    assert!(engine.check_valid(LatticeCoord::new(1, 0, 0), &lattice).unwrap());
    assert_eq!(engine.move_offset(), ScenePoint::ORIGIN);
}

#[test]
fn test_move_to_places_pivot() {
    let lattice = square_lattice();
    let mut store = EntityStore::new();
    let a = point(&mut store, &lattice, 1, 1);

    let mut engine = MoveEngine::default();
    engine
        .prepare(&store, &[a], Some(ScenePoint::new(2.0, 2.0)))
        .unwrap();
    assert_eq!(engine.pivot(), ScenePoint::new(2.0, 2.0));
    assert_eq!(engine.pivot_offset(), ScenePoint::new(2.0, 2.0));

    engine.move_to(ScenePoint::new(5.0, 5.0));
    assert_eq!(engine.origin(), ScenePoint::new(3.0, 3.0));
    assert_eq!(
        engine.point_previews()[0].scene_pos(engine.origin()),
        ScenePoint::new(4.0, 4.0)
    );
    // free movement never changes lattice coordinates
    assert_eq!(engine.lattice_coord_of(a), Some(LatticeCoord::new(1, 1, 0)));
}

#[test]
fn test_free_anchor_follows_cursor() {
    let lattice = square_lattice();
    let mut store = EntityStore::new();
    let a = point(&mut store, &lattice, 4, 2);

    let mut engine = MoveEngine::default();
    engine
        .prepare(&store, &[a], Some(ScenePoint::new(3.0, 3.0)))
        .unwrap();
    assert_eq!(engine.anchor_offset(), ScenePoint::new(1.0, -1.0));
    assert_eq!(
        engine.free_anchor(ScenePoint::new(10.0, 10.0)),
        ScenePoint::new(11.0, 9.0)
    );
}

#[test]
fn test_anchor_at_pivot_wins() {
    let lattice = square_lattice();
    let mut store = EntityStore::new();
    let ids = [
        point(&mut store, &lattice, 3, 1),
        point(&mut store, &lattice, 0, 0),
        point(&mut store, &lattice, 1, 1),
    ];

    let mut engine = MoveEngine::default();
    engine
        .prepare(&store, &ids, Some(ScenePoint::ORIGIN))
        .unwrap();
    assert_eq!(engine.anchor_index(), Some(1));
    assert_eq!(engine.anchor_offset(), ScenePoint::ORIGIN);
}

#[test]
fn test_pivot_policy() {
    let lattice = square_lattice();
    let mut store = EntityStore::new();
    let a = point(&mut store, &lattice, 1, 1);
    let b = point(&mut store, &lattice, 3, 1);
    let e = electrode(&mut store, 10.0, 10.0);

    let settings = GhostSettings {
        dot_diameter: 2.0,
        ..GhostSettings::default()
    };
    let mut engine = MoveEngine::new(settings);

    engine.prepare(&store, &[a, b, e], None).unwrap();
    assert_eq!(engine.pivot(), ScenePoint::new(2.0, 1.0));
    assert_eq!(engine.anchor_index(), Some(0));

    engine.set_pivot_policy(PivotPolicy::PointsAndAreas);
    engine.prepare(&store, &[a, b, e], None).unwrap();
    assert_eq!(engine.pivot(), ScenePoint::new(7.0, 6.0));
    assert_eq!(engine.anchor_index(), Some(1));
}

#[test]
fn test_clean_returns_to_fresh_state() {
    let fixture = nested();
    let mut engine = MoveEngine::default();
    engine.prepare(&fixture.store, &fixture.selection, None).unwrap();
    engine.move_by_coordinate(LatticeCoord::new(1, 1, 0), &fixture.lattice);
    engine.set_valid(false);

    engine.clean();
    assert!(!engine.is_active());
    assert!(engine.is_valid());
    assert!(engine.point_sources().is_empty());
    assert!(engine.area_sources().is_empty());
    assert!(engine.point_previews().is_empty());
    assert!(engine.area_previews().is_empty());
    assert_eq!(engine.root().leaf_count(), 0);
    assert!(engine.anchor_preview().is_none());
    assert_eq!(engine.origin(), ScenePoint::ORIGIN);
    assert_eq!(engine.describe_tree(), "[]");

    // second clean is a no-op
    engine.clean();
    assert!(!engine.is_active());
}

#[test]
fn test_prepare_discards_previous_session() {
    let fixture = nested();
    let mut engine = MoveEngine::default();
    engine.prepare(&fixture.store, &fixture.selection, None).unwrap();
    engine.set_valid(false);

    engine.prepare(&fixture.store, &[fixture.inner], None).unwrap();
    assert!(engine.is_valid());
    assert_eq!(engine.point_sources().len(), 2);
    assert_eq!(engine.area_sources().len(), 1);
}

#[test]
fn test_top_items_resolves_existing_groups() {
    let fixture = nested();
    let mut engine = MoveEngine::default();
    engine.prepare(&fixture.store, &fixture.selection, None).unwrap();
    engine.move_by_coordinate(LatticeCoord::new(0, 2, 0), &fixture.lattice);

    assert_eq!(engine.top_items(&fixture.store).unwrap(), fixture.selection);

    engine.prepare(&fixture.store, &[fixture.innermost], None).unwrap();
    assert_eq!(
        engine.top_items(&fixture.store).unwrap(),
        vec![fixture.innermost]
    );
}

#[test]
fn test_top_items_after_ungroup_reports_orphan() {
    let mut fixture = nested();
    let mut engine = MoveEngine::default();
    engine.prepare(&fixture.store, &fixture.selection, None).unwrap();

    fixture.store.ungroup(fixture.inner).unwrap();
    let err = engine.top_items(&fixture.store).unwrap_err();
    assert!(matches!(err, DesignerError::OrphanedGroupMember { .. }));
}
