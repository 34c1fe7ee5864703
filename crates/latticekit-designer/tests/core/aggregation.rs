use latticekit_core::{DesignerError, ScenePoint};
use latticekit_designer::{AggNode, EntityStore, LeafKind, MoveEngine, NodeKind};

use crate::common::{nested, point, square_lattice};

#[test]
fn test_prepare_counts_leaves() {
    let fixture = nested();
    let mut engine = MoveEngine::default();
    engine.prepare(&fixture.store, &fixture.selection, None).unwrap();

    assert_eq!(engine.point_sources().len(), 3);
    assert_eq!(engine.area_sources().len(), 2);
    assert_eq!(engine.point_previews().len(), 3);
    assert_eq!(engine.area_previews().len(), 2);
    assert_eq!(engine.root().leaf_count(), 5);
}

#[test]
fn test_tree_mirrors_nesting_in_order() {
    let fixture = nested();
    let mut engine = MoveEngine::default();
    engine.prepare(&fixture.store, &fixture.selection, None).unwrap();

    let expected = AggNode::Group(vec![
        AggNode::Leaf {
            index: 0,
            kind: LeafKind::Point,
        },
        AggNode::Group(vec![
            AggNode::Leaf {
                index: 1,
                kind: LeafKind::Point,
            },
            AggNode::Leaf {
                index: 0,
                kind: LeafKind::Electrode,
            },
            AggNode::Group(vec![AggNode::Leaf {
                index: 2,
                kind: LeafKind::Point,
            }]),
        ]),
        AggNode::Leaf {
            index: 1,
            kind: LeafKind::AfmArea,
        },
    ]);
    assert_eq!(engine.root(), &expected);
    assert_eq!(engine.describe_tree(), "[0,[1,0,[2,]]1,]");

    let leaves: Vec<_> = engine.root().leaves().collect();
    assert_eq!(
        leaves,
        vec![
            (0, LeafKind::Point),
            (1, LeafKind::Point),
            (0, LeafKind::Electrode),
            (2, LeafKind::Point),
            (1, LeafKind::AfmArea),
        ]
    );
}

#[test]
fn test_leaf_indices_match_previews() {
    let fixture = nested();
    let mut engine = MoveEngine::default();
    engine.prepare(&fixture.store, &fixture.selection, None).unwrap();

    for (index, kind) in engine.root().leaves() {
        if kind == LeafKind::Point {
            let source = engine.point_sources()[index];
            let site = fixture.store.get(source).unwrap().site().unwrap();
            assert_eq!(engine.point_previews()[index].lattice_coord(), site);
        } else {
            let source = engine.area_sources()[index];
            let entity = fixture.store.get(source).unwrap();
            assert_eq!(engine.area_previews()[index].local_pos(), entity.position);
        }
    }
}

#[test]
fn test_area_preview_copies_size() {
    let fixture = nested();
    let mut engine = MoveEngine::default();
    engine.prepare(&fixture.store, &fixture.selection, None).unwrap();

    let electrode = &engine.area_previews()[0];
    assert_eq!((electrode.width(), electrode.height()), (4.0, 2.0));
    assert_eq!(electrode.local_pos(), ScenePoint::new(5.0, 5.0));
    assert_eq!(electrode.color(), engine.settings().box_color);
}

#[test]
fn test_group_node_kinds() {
    let fixture = nested();
    let mut engine = MoveEngine::default();
    engine.prepare(&fixture.store, &fixture.selection, None).unwrap();

    let top = engine.root().children();
    assert_eq!(top.len(), 3);
    assert_eq!(top[1].kind(), NodeKind::Group);
    assert_eq!(top[1].source_index(), None);
    assert_eq!(top[0].kind(), NodeKind::Leaf(LeafKind::Point));
    assert!(top[1].children().iter().all(|c| c.is_leaf() || !c.children().is_empty()));
}

#[test]
fn test_unknown_entity_is_rejected_and_engine_left_clean() {
    let lattice = square_lattice();
    let mut store = EntityStore::new();
    let a = point(&mut store, &lattice, 0, 0);

    let mut engine = MoveEngine::default();
    let err = engine.prepare(&store, &[a, 404], None).unwrap_err();
    assert_eq!(err, DesignerError::UnknownEntity { id: 404 });
    assert!(!engine.is_active());
    assert!(engine.point_sources().is_empty());
    assert!(engine.point_previews().is_empty());
}

#[test]
fn test_entity_selected_twice_is_rejected() {
    let fixture = nested();
    let mut engine = MoveEngine::default();

    // the innermost group is already reached through `inner`
    let mut selection = fixture.selection.clone();
    selection.push(fixture.innermost);
    let err = engine.prepare(&fixture.store, &selection, None).unwrap_err();
    assert!(matches!(err, DesignerError::ContractViolation { .. }));
    assert!(!engine.is_active());
}

#[test]
fn test_empty_selection() {
    let store = EntityStore::new();
    let mut engine = MoveEngine::default();
    engine.prepare(&store, &[], None).unwrap();

    assert!(engine.is_active());
    assert_eq!(engine.root().leaf_count(), 0);
    assert_eq!(engine.pivot(), ScenePoint::ORIGIN);
    assert!(engine.anchor_preview().is_none());
    assert_eq!(engine.top_items(&store).unwrap(), Vec::<u64>::new());
}
