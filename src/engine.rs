//! Event dispatch: delivering transform events to group cascades and applying
//! what they compute.
//!
//! Dispatch is synchronous and re-entrant. Applying a cascade's result goes
//! through the same calls a host framework would make, and those fire events of
//! their own:
//!
//! | Graph call | Follow-up event |
//! |------------|-----------------|
//! | move a node to a point | `Move` for that node |
//! | set a node's rotation | `Rotate` for that node |
//! | resize a group | `Resize` for that group, with its previous size |
//! | batch translate | none |
//!
//! Nested groups therefore follow their parent through ordinary event
//! delivery, and recursion depth equals containment depth.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::cascade::{membership, GroupCascade};
use crate::events::{EventBus, TransformEvent};
use crate::graph::{
    Diagram, Graph, HandleIndex, NodeId, Point, ResizeOutcome, ResizeParams, Vector,
};

/// A mutation applied to the graph while handling an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Moved { id: NodeId, from: Point, to: Point },
    Rotated { id: NodeId, radians: f64 },
    Resized { id: NodeId, delta: Vector, handle: HandleIndex },
    /// The resize primitive refused the change
    ResizeCancelled { id: NodeId, delta: Vector, handle: HandleIndex },
    Translated { ids: Vec<NodeId>, delta: Vector },
}

/// Owns the graph, the subscription tables and one cascade per attached group.
pub struct TransformEngine<G: Graph = Diagram> {
    graph: G,
    bus: EventBus,
    cascades: HashMap<NodeId, GroupCascade>,
}

impl<G: Graph> TransformEngine<G> {
    pub fn new(graph: G) -> Self {
        Self {
            graph,
            bus: EventBus::new(),
            cascades: HashMap::new(),
        }
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Direct access to the graph. Changes made here fire no events.
    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    pub fn into_graph(self) -> G {
        self.graph
    }

    /// Attach cascades to a group. Returns false when `group_id` is not a group.
    ///
    /// A new cascade starts with a base rotation of zero, so until the first
    /// gesture boundary children are placed by turning their captured
    /// positions about the center. Attaching an attached group keeps its
    /// current cascade state.
    pub fn attach(&mut self, group_id: &NodeId) -> bool {
        if !self.graph.lookup_node(group_id).is_some_and(|n| n.is_group()) {
            return false;
        }
        self.cascades
            .entry(group_id.clone())
            .or_insert_with(|| GroupCascade::new(group_id.clone(), 0.0));
        self.bus.subscribe_all(group_id);
        true
    }

    /// Detach a group's cascades, returning whether it was attached
    pub fn detach(&mut self, group_id: &NodeId) -> bool {
        self.bus.unsubscribe(group_id);
        self.cascades.remove(group_id).is_some()
    }

    pub fn is_attached(&self, group_id: &NodeId) -> bool {
        self.cascades.contains_key(group_id)
    }

    pub fn cascade(&self, group_id: &NodeId) -> Option<&GroupCascade> {
        self.cascades.get(group_id)
    }

    /// Deliver an event describing a change that has already been applied
    pub fn dispatch(&mut self, event: TransformEvent) -> Vec<Action> {
        let mut actions = Vec::new();
        self.emit(&event, &mut actions);
        actions
    }

    // --- Gestures: apply the change, then dispatch ---

    /// Give a node a new absolute rotation
    pub fn rotate(&mut self, id: &NodeId, radians: f64) -> Vec<Action> {
        let mut actions = Vec::new();
        self.apply_rotation(id, radians, &mut actions);
        actions
    }

    /// Drag one of a node's resize grips
    pub fn resize(&mut self, id: &NodeId, delta: Vector, handle: HandleIndex) -> Vec<Action> {
        let mut actions = Vec::new();
        self.apply_resize(
            ResizeParams {
                node_id: id.clone(),
                delta,
                handle,
            },
            &mut actions,
        );
        actions
    }

    /// Move a node by a displacement
    pub fn translate(&mut self, id: &NodeId, delta: Vector) -> Vec<Action> {
        let Some(from) = self.graph.lookup_node(id).map(|n| n.position) else {
            return Vec::new();
        };
        self.move_to(id, from.translate(delta))
    }

    /// Move a node's center to a point
    pub fn move_to(&mut self, id: &NodeId, to: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        self.apply_move(id, to, &mut actions);
        actions
    }

    /// Open a rotation gesture on a node
    pub fn begin_rotation(&mut self, id: &NodeId) -> Vec<Action> {
        self.dispatch(TransformEvent::RotateStart {
            target_id: id.clone(),
        })
    }

    /// Close the rotation gesture on a node
    pub fn end_rotation(&mut self, id: &NodeId) -> Vec<Action> {
        self.dispatch(TransformEvent::RotateEnd {
            target_id: id.clone(),
        })
    }

    // --- Internals ---

    fn emit(&mut self, event: &TransformEvent, actions: &mut Vec<Action>) {
        debug!(kind = %event.kind(), target = %event.target(), "dispatching transform event");

        let subscribers = self.bus.subscribers(event.kind()).to_vec();
        for group_id in subscribers {
            match event {
                TransformEvent::Rotate(e) => {
                    let Some(cascade) = self.cascades.get_mut(&group_id) else {
                        continue;
                    };
                    let placements = cascade.rotation.on_rotate(&self.graph, e);
                    for placement in placements {
                        self.apply_move(&placement.id, placement.position, actions);
                        self.apply_rotation(&placement.id, placement.rotation, actions);
                    }
                }
                TransformEvent::Resize(e) => {
                    let Some(cascade) = self.cascades.get(&group_id) else {
                        continue;
                    };
                    let requests = cascade.resize.on_resize(&self.graph, e);
                    for request in requests {
                        self.apply_resize(request, actions);
                    }
                }
                TransformEvent::Move(e) => {
                    let Some(cascade) = self.cascades.get(&group_id) else {
                        continue;
                    };
                    if let Some(batch) = cascade.moves.on_move(&self.graph, e) {
                        trace!(group = %group_id, count = batch.ids.len(), "translating members");
                        self.graph.batch_translate(&batch.ids, batch.delta);
                        actions.push(Action::Translated {
                            ids: batch.ids,
                            delta: batch.delta,
                        });
                    }
                }
                TransformEvent::RotateStart { target_id } | TransformEvent::RotateEnd { target_id } => {
                    if *target_id == group_id {
                        self.reset_gesture(target_id);
                    }
                }
            }
        }
    }

    fn apply_move(&mut self, id: &NodeId, to: Point, actions: &mut Vec<Action>) {
        let Some(delta) = self.graph.move_node_to(id, to) else {
            return;
        };
        trace!(node = %id, x = to.x, y = to.y, "moved");
        actions.push(Action::Moved {
            id: id.clone(),
            from: Point::new(to.x - delta.dx, to.y - delta.dy),
            to,
        });
        if !delta.is_zero() {
            self.emit(&TransformEvent::translate(id.clone(), delta), actions);
        }
    }

    fn apply_rotation(&mut self, id: &NodeId, radians: f64, actions: &mut Vec<Action>) {
        if !self.graph.set_node_rotation(id, radians) {
            return;
        }
        trace!(node = %id, radians, "rotated");
        actions.push(Action::Rotated {
            id: id.clone(),
            radians,
        });
        self.emit(&TransformEvent::rotate(id.clone(), radians), actions);
    }

    fn apply_resize(&mut self, params: ResizeParams, actions: &mut Vec<Action>) {
        match self.graph.resize_node(&params) {
            ResizeOutcome::Applied { previous, is_group } => {
                trace!(node = %params.node_id, dx = params.delta.dx, dy = params.delta.dy, "resized");
                actions.push(Action::Resized {
                    id: params.node_id.clone(),
                    delta: params.delta,
                    handle: params.handle,
                });
                if is_group {
                    let event = TransformEvent::resize(
                        params.node_id,
                        params.delta,
                        params.handle,
                        Some(previous),
                    );
                    self.emit(&event, actions);
                }
            }
            ResizeOutcome::Cancelled => {
                debug!(node = %params.node_id, "resize cancelled");
                actions.push(Action::ResizeCancelled {
                    id: params.node_id,
                    delta: params.delta,
                    handle: params.handle,
                });
            }
            ResizeOutcome::Missing => {}
        }
    }

    /// Clear the snapshots of a group and every attached group inside it
    fn reset_gesture(&mut self, target_id: &NodeId) {
        let mut groups = vec![target_id.clone()];
        groups.extend(membership::resolve(&self.graph, target_id));
        for id in groups {
            let Some(cascade) = self.cascades.get_mut(&id) else {
                continue;
            };
            let base = self.graph.lookup_node(&id).map_or(0.0, |n| n.rotation);
            cascade.rotation.reset(base);
        }
    }
}

impl TransformEngine<Diagram> {
    /// Attach cascades to every group in the diagram, in diagram order
    pub fn attach_all(&mut self) {
        for id in self.graph.group_ids() {
            self.attach(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GroupData, Node, Size};
    use std::f64::consts::FRAC_PI_2;

    fn engine() -> TransformEngine {
        let mut d = Diagram::new();
        d.insert(
            Node::new("g", Point::new(100.0, 100.0), Size::new(200.0, 100.0))
                .with_group(GroupData::new(true, false).with_child("c")),
        );
        d.insert(Node::new("c", Point::new(120.0, 100.0), Size::new(100.0, 50.0)));
        let mut engine = TransformEngine::new(d);
        engine.attach_all();
        engine
    }

    #[test]
    fn test_attach_rejects_plain_nodes() {
        let mut e = engine();
        assert!(!e.attach(&"c".into()));
        assert!(!e.attach(&"missing".into()));
        assert!(e.is_attached(&"g".into()));
    }

    #[test]
    fn test_detached_group_does_not_cascade() {
        let mut e = engine();
        assert!(e.detach(&"g".into()));
        let actions = e.rotate(&"g".into(), FRAC_PI_2);
        assert_eq!(
            actions,
            vec![Action::Rotated {
                id: "g".into(),
                radians: FRAC_PI_2
            }]
        );
        assert_eq!(e.graph().get(&"c".into()).unwrap().position, Point::new(120.0, 100.0));
    }

    #[test]
    fn test_rotate_action_sequence() {
        let mut e = engine();
        let actions = e.rotate(&"g".into(), FRAC_PI_2);
        assert_eq!(actions.len(), 3);
        assert!(matches!(&actions[0], Action::Rotated { id, .. } if id.as_str() == "g"));
        assert!(matches!(&actions[1], Action::Moved { id, .. } if id.as_str() == "c"));
        assert!(matches!(&actions[2], Action::Rotated { id, .. } if id.as_str() == "c"));
    }

    #[test]
    fn test_dispatch_without_previous_size_skips_resize() {
        let mut e = engine();
        let actions = e.dispatch(TransformEvent::resize(
            "g",
            Vector::new(20.0, 10.0),
            HandleIndex::BOTTOM_RIGHT,
            None,
        ));
        assert!(actions.is_empty());
    }

    #[test]
    fn test_cancelled_child_resize_is_reported() {
        let mut e = engine();
        let actions = e.resize(&"g".into(), Vector::new(-198.5, 0.0), HandleIndex::RIGHT);
        assert!(matches!(&actions[0], Action::Resized { id, .. } if id.as_str() == "g"));
        assert!(matches!(&actions[1], Action::ResizeCancelled { id, .. } if id.as_str() == "c"));
        assert_eq!(e.graph().get(&"c".into()).unwrap().size, Size::new(100.0, 50.0));
    }

    #[test]
    fn test_gesture_end_resets_snapshot() {
        let mut e = engine();
        e.begin_rotation(&"g".into());
        e.rotate(&"g".into(), 0.3);
        assert!(!e.cascade(&"g".into()).unwrap().rotation.snapshot().is_empty());
        e.end_rotation(&"g".into());
        let cascade = e.cascade(&"g".into()).unwrap();
        assert!(cascade.rotation.snapshot().is_empty());
        assert_eq!(cascade.rotation.base_rotation(), 0.3);
    }

    #[test]
    fn test_group_loaded_rotated_turns_captured_positions() {
        let mut d = Diagram::new();
        d.insert(
            Node::new("g", Point::new(100.0, 100.0), Size::new(200.0, 100.0))
                .with_rotation(FRAC_PI_2)
                .with_group(GroupData::new(true, false).with_child("c")),
        );
        d.insert(Node::new("c", Point::new(120.0, 100.0), Size::new(10.0, 10.0)));
        let mut e = TransformEngine::new(d);
        e.attach_all();
        assert_eq!(e.cascade(&"g".into()).unwrap().rotation.base_rotation(), 0.0);

        e.rotate(&"g".into(), std::f64::consts::PI);

        let c = e.graph().get(&"c".into()).unwrap().position;
        assert!((c.x - 80.0).abs() < 1e-9 && (c.y - 100.0).abs() < 1e-9, "got {:?}", c);
    }

    #[test]
    fn test_gesture_start_rebases_rotated_group() {
        let mut d = Diagram::new();
        d.insert(
            Node::new("g", Point::new(100.0, 100.0), Size::new(200.0, 100.0))
                .with_rotation(FRAC_PI_2)
                .with_group(GroupData::new(true, false).with_child("c")),
        );
        // Already laid out at a quarter turn
        d.insert(Node::new("c", Point::new(100.0, 120.0), Size::new(10.0, 10.0)));
        let mut e = TransformEngine::new(d);
        e.attach_all();

        e.begin_rotation(&"g".into());
        assert_eq!(e.cascade(&"g".into()).unwrap().rotation.base_rotation(), FRAC_PI_2);
        e.rotate(&"g".into(), std::f64::consts::PI);

        let c = e.graph().get(&"c".into()).unwrap().position;
        assert!((c.x - 80.0).abs() < 1e-9 && (c.y - 100.0).abs() < 1e-9, "got {:?}", c);
    }
}
