//! Properties of the rotate, resize and move cascades on a single group.
//!
//! These tests verify that:
//! - Rotation places direct children about the group center from their gesture-start position
//! - Resize hands each child a per-axis share of the grip displacement
//! - Moves translate every contained node by exactly the group's displacement
//! - The policy flags close rotate and resize but not move

use std::f64::consts::{FRAC_PI_2, PI};

use group_cascade::{
    cascade::membership,
    graph::Rotation,
    normalize_angle, Action, Diagram, GroupData, HandleIndex, Node, NodeId, Point, Size,
    TransformEngine, TransformEvent, Vector,
};
use pretty_assertions::assert_eq;

const EPSILON: f64 = 1e-9;

fn assert_near(actual: Point, expected: Point) {
    assert!(
        (actual.x - expected.x).abs() < EPSILON && (actual.y - expected.y).abs() < EPSILON,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

fn id(s: &str) -> NodeId {
    NodeId::new(s)
}

/// A group at (100, 100) sized 200x100 with three children of different sizes
fn fixture(transform_with_container: bool, is_restrict: bool) -> TransformEngine {
    let mut d = Diagram::new();
    d.insert(
        Node::new("g", Point::new(100.0, 100.0), Size::new(200.0, 100.0)).with_group(
            GroupData::new(transform_with_container, is_restrict)
                .with_child("a")
                .with_child("b")
                .with_child("c"),
        ),
    );
    d.insert(Node::new("a", Point::new(120.0, 100.0), Size::new(100.0, 50.0)));
    d.insert(Node::new("b", Point::new(40.0, 80.0), Size::new(50.0, 20.0)).with_rotation(0.4));
    d.insert(Node::new("c", Point::new(150.0, 130.0), Size::new(10.0, 100.0)));
    let mut engine = TransformEngine::new(d);
    engine.attach_all();
    engine
}

fn position(engine: &TransformEngine, node: &str) -> Point {
    engine.graph().get(&id(node)).unwrap().position
}

fn node(engine: &TransformEngine, node: &str) -> Node {
    engine.graph().get(&id(node)).unwrap().clone()
}

#[test]
fn test_concrete_quarter_turn() {
    let mut d = Diagram::new();
    d.insert(
        Node::new("G", Point::new(100.0, 100.0), Size::new(100.0, 100.0))
            .with_group(GroupData::new(true, false).with_child("C")),
    );
    d.insert(Node::new("C", Point::new(120.0, 100.0), Size::new(10.0, 10.0)));
    let mut engine = TransformEngine::new(d);
    engine.attach_all();

    engine.rotate(&id("G"), FRAC_PI_2);

    let c = engine.graph().get(&id("C")).unwrap();
    assert_near(c.position, Point::new(100.0, 120.0));
    assert_eq!(c.rotation, FRAC_PI_2);
}

#[test]
fn test_rotation_law_within_one_gesture() {
    let mut engine = fixture(true, false);
    let center = position(&engine, "g");
    let originals: Vec<(&str, Point)> = ["a", "b", "c"]
        .iter()
        .map(|n| (*n, position(&engine, n)))
        .collect();

    // Repeated updates are always measured from the gesture's starting positions
    for angle in [0.1, 0.25, -PI / 3.0, 2.0 * PI + 0.5, FRAC_PI_2] {
        engine.rotate(&id("g"), angle);
        let turn = Rotation::new(normalize_angle(angle), center);
        for (name, original) in &originals {
            assert_near(position(&engine, name), turn.transform_point(*original));
            assert_eq!(node(&engine, name).rotation, angle);
        }
    }
}

#[test]
fn test_rotation_law_for_group_loaded_rotated() {
    let mut d = Diagram::new();
    d.insert(
        Node::new("G", Point::new(100.0, 100.0), Size::new(100.0, 100.0))
            .with_rotation(FRAC_PI_2)
            .with_group(GroupData::new(true, false).with_child("C")),
    );
    d.insert(Node::new("C", Point::new(120.0, 100.0), Size::new(10.0, 10.0)));
    let mut engine = TransformEngine::new(d);
    engine.attach_all();

    engine.rotate(&id("G"), PI);

    let expected = Rotation::new(normalize_angle(PI), Point::new(100.0, 100.0))
        .transform_point(Point::new(120.0, 100.0));
    assert_near(position(&engine, "C"), expected);
    assert_near(expected, Point::new(80.0, 100.0));
    assert_eq!(node(&engine, "C").rotation, PI);
}

#[test]
fn test_rotation_does_not_move_group_or_resize_children() {
    let mut engine = fixture(true, false);
    engine.rotate(&id("g"), 1.0);
    assert_eq!(position(&engine, "g"), Point::new(100.0, 100.0));
    assert_eq!(node(&engine, "a").size, Size::new(100.0, 50.0));
}

#[test]
fn test_normalization_law() {
    assert!((normalize_angle(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < EPSILON);
    assert!((normalize_angle(-PI / 3.0) - 5.0 * PI / 3.0).abs() < EPSILON);
    assert!((normalize_angle(0.75) - 0.75).abs() < EPSILON);
    // A full turn or more is not reduced
    assert!((normalize_angle(2.0 * PI) - 2.0 * PI).abs() < EPSILON);
    assert!((normalize_angle(5.0 * PI) - 5.0 * PI).abs() < EPSILON);
}

#[test]
fn test_concrete_half_size_child_gets_half_delta() {
    let mut d = Diagram::new();
    d.insert(
        Node::new("G", Point::new(0.0, 0.0), Size::new(200.0, 100.0))
            .with_group(GroupData::new(true, false).with_child("C")),
    );
    d.insert(Node::new("C", Point::new(0.0, 0.0), Size::new(100.0, 50.0)));
    let mut engine = TransformEngine::new(d);
    engine.attach_all();

    let actions = engine.resize(&id("G"), Vector::new(20.0, 10.0), HandleIndex::BOTTOM_RIGHT);

    assert_eq!(
        actions,
        vec![
            Action::Resized {
                id: id("G"),
                delta: Vector::new(20.0, 10.0),
                handle: HandleIndex::BOTTOM_RIGHT,
            },
            Action::Resized {
                id: id("C"),
                delta: Vector::new(10.0, 5.0),
                handle: HandleIndex::BOTTOM_RIGHT,
            },
        ]
    );
    assert_eq!(engine.graph().get(&id("C")).unwrap().size, Size::new(110.0, 55.0));
}

#[test]
fn test_resize_law_uses_previous_dimensions() {
    let mut engine = fixture(true, false);
    let (w, h) = (200.0, 100.0);
    let (dx, dy) = (-30.0, 12.0);

    let actions = engine.resize(&id("g"), Vector::new(dx, dy), HandleIndex::TOP_LEFT);

    let shares: Vec<(NodeId, Vector)> = actions
        .iter()
        .filter_map(|a| match a {
            Action::Resized { id, delta, handle } if id.as_str() != "g" => {
                assert_eq!(*handle, HandleIndex::TOP_LEFT);
                Some((id.clone(), *delta))
            }
            _ => None,
        })
        .collect();

    assert_eq!(
        shares,
        vec![
            (id("a"), Vector::new(100.0 / w * dx, 50.0 / h * dy)),
            (id("b"), Vector::new(50.0 / w * dx, 20.0 / h * dy)),
            (id("c"), Vector::new(10.0 / w * dx, 100.0 / h * dy)),
        ]
    );
}

#[test]
fn test_resize_event_without_previous_dimensions_is_ignored() {
    let mut engine = fixture(true, false);
    for previous in [None, Some(Size::new(0.0, 100.0)), Some(Size::new(200.0, 0.0))] {
        let actions = engine.dispatch(TransformEvent::resize(
            "g",
            Vector::new(20.0, 10.0),
            HandleIndex::BOTTOM_RIGHT,
            previous,
        ));
        assert!(actions.is_empty());
    }
    assert_eq!(node(&engine, "a").size, Size::new(100.0, 50.0));
}

#[test]
fn test_dispatched_resize_uses_event_dimensions_not_current_ones() {
    let mut engine = fixture(true, false);
    // The group already has its new size; only the event knows the old one
    engine.graph_mut().get_mut(&id("g")).unwrap().size = Size::new(400.0, 400.0);

    let actions = engine.dispatch(TransformEvent::resize(
        "g",
        Vector::new(20.0, 10.0),
        HandleIndex::BOTTOM_RIGHT,
        Some(Size::new(200.0, 100.0)),
    ));

    assert_eq!(
        actions[0],
        Action::Resized {
            id: id("a"),
            delta: Vector::new(10.0, 5.0),
            handle: HandleIndex::BOTTOM_RIGHT,
        }
    );
}

#[test]
fn test_move_law_preserves_offsets() {
    let mut engine = fixture(false, true);
    let before: Vec<Point> = ["g", "a", "b", "c"].iter().map(|n| position(&engine, n)).collect();

    engine.translate(&id("g"), Vector::new(12.5, -7.0));

    for (name, old) in ["g", "a", "b", "c"].iter().zip(before) {
        assert_eq!(position(&engine, name), Point::new(old.x + 12.5, old.y - 7.0));
    }
    // Pure translation
    assert_eq!(node(&engine, "b").rotation, 0.4);
    assert_eq!(node(&engine, "c").size, Size::new(10.0, 100.0));
}

#[test]
fn test_zero_move_changes_nothing() {
    let mut engine = fixture(true, false);
    let before = engine.graph().clone();
    let actions = engine.translate(&id("g"), Vector::zero());

    assert!(!actions.iter().any(|a| matches!(a, Action::Translated { .. })));
    for n in before.nodes() {
        assert_eq!(position(&engine, n.id.as_str()), n.position);
    }
}

#[test]
fn test_policy_law() {
    for (twc, restrict) in [(false, false), (true, true), (false, true)] {
        let mut engine = fixture(twc, restrict);
        let before = engine.graph().clone();

        engine.rotate(&id("g"), 1.2);
        engine.resize(&id("g"), Vector::new(20.0, 10.0), HandleIndex::BOTTOM_RIGHT);

        for name in ["a", "b", "c"] {
            let old = before.get(&id(name)).unwrap();
            let new = node(&engine, name);
            assert_eq!(new.position, old.position, "{} moved with flags {:?}", name, (twc, restrict));
            assert_eq!(new.rotation, old.rotation);
            assert_eq!(new.size, old.size);
        }
    }
}

#[test]
fn test_membership_nesting_without_duplicates() {
    let mut d = Diagram::new();
    d.insert(
        Node::new("root", Point::default(), Size::new(1.0, 1.0))
            .with_group(GroupData::new(true, false).with_child("l1").with_child("x")),
    );
    d.insert(
        Node::new("l1", Point::default(), Size::new(1.0, 1.0))
            .with_group(GroupData::new(true, false).with_child("l2")),
    );
    d.insert(
        Node::new("l2", Point::default(), Size::new(1.0, 1.0))
            .with_group(GroupData::new(true, false).with_child("l3").with_child("y")),
    );
    d.insert(
        Node::new("l3", Point::default(), Size::new(1.0, 1.0))
            .with_group(GroupData::new(true, false).with_child("z")),
    );
    for leaf in ["x", "y", "z"] {
        d.insert(Node::new(leaf, Point::default(), Size::new(1.0, 1.0)));
    }

    let resolved = membership::resolve(&d, &id("root"));
    let names: Vec<&str> = resolved.iter().map(NodeId::as_str).collect();
    assert_eq!(names, vec!["l1", "l2", "l3", "z", "y", "x"]);

    let sub = membership::resolve(&d, &id("l2"));
    let names: Vec<&str> = sub.iter().map(NodeId::as_str).collect();
    assert_eq!(names, vec!["l3", "z", "y"]);
}

#[test]
fn test_events_for_other_nodes_do_not_cross_talk() {
    let mut engine = fixture(true, false);
    let before = engine.graph().clone();

    // Events aimed at a plain child or an unknown node reach no cascade
    let mut actions = engine.dispatch(TransformEvent::rotate("a", 1.0));
    actions.extend(engine.dispatch(TransformEvent::translate("ghost", Vector::new(5.0, 5.0))));
    assert!(actions.is_empty());
    for n in before.nodes() {
        assert_eq!(position(&engine, n.id.as_str()), n.position);
    }
}

#[test]
fn test_child_resize_uses_primitive_handle_geometry() {
    let mut engine = fixture(true, false);
    engine.resize(&id("g"), Vector::new(-20.0, 0.0), HandleIndex::LEFT);

    // "a" gets half of the left grip's pull: 10 wider, center 5 further left
    let a = node(&engine, "a");
    assert_eq!(a.size, Size::new(110.0, 50.0));
    assert_eq!(a.position, Point::new(115.0, 100.0));
}
