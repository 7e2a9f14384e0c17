//! Rotating a group's direct children about the group center.
//!
//! Within one rotation gesture every event carries the group's new absolute
//! angle. Children are always placed from where they stood when the gesture
//! first touched them, so a stream of small updates never accumulates drift.
//!
//! Snapshot entries are stored as offsets from the group center, expressed in
//! the group's frame at its base rotation. The base is zero until a gesture
//! boundary records the group's rotation, so outside explicit gestures an entry
//! is simply `child - center`.

use std::collections::HashMap;

use crate::events::RotateEvent;
use crate::graph::{Graph, NodeId, Point, Rotation, Vector};

use super::policy;

/// Map an angle to a non-negative one when it is negative in degrees.
///
/// A single turn is added to negative angles; angles of a full turn or more
/// are left as they are.
pub fn normalize_angle(radians: f64) -> f64 {
    let mut degrees = radians.to_degrees();
    if degrees < 0.0 {
        degrees += 360.0;
    }
    degrees.to_radians()
}

/// Where each child stood when the current gesture first touched it
#[derive(Debug, Clone, Default)]
pub struct PositionSnapshot {
    offsets: HashMap<NodeId, Vector>,
}

impl PositionSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded offset for `id`, recording `capture()` first if there is none
    pub fn get_or_capture(&mut self, id: &NodeId, capture: impl FnOnce() -> Vector) -> Vector {
        *self.offsets.entry(id.clone()).or_insert_with(capture)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.offsets.contains_key(id)
    }

    pub fn clear(&mut self) {
        self.offsets.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// New placement of one child after a rotate cascade
#[derive(Debug, Clone, PartialEq)]
pub struct ChildPlacement {
    pub id: NodeId,
    pub position: Point,
    /// Absolute rotation the child takes, equal to the group's
    pub rotation: f64,
}

/// Rotate cascade state for one group
#[derive(Debug, Clone)]
pub struct RotationCascade {
    group_id: NodeId,
    snapshot: PositionSnapshot,
    base_rotation: f64,
}

impl RotationCascade {
    /// `base_rotation` is the group rotation that captured offsets are measured against
    pub fn new(group_id: NodeId, base_rotation: f64) -> Self {
        Self {
            group_id,
            snapshot: PositionSnapshot::new(),
            base_rotation,
        }
    }

    pub fn snapshot(&self) -> &PositionSnapshot {
        &self.snapshot
    }

    pub fn base_rotation(&self) -> f64 {
        self.base_rotation
    }

    /// Forget every captured position; the group now rests at `base_rotation`
    pub fn reset(&mut self, base_rotation: f64) {
        self.snapshot.clear();
        self.base_rotation = base_rotation;
    }

    /// Compute where every direct child goes for this event.
    ///
    /// Returns nothing when the event targets another node, the group is gone,
    /// or the policy gate is closed. Only one level is handled: nested groups
    /// get their own rotate event when their rotation is set.
    pub fn on_rotate<G: Graph + ?Sized>(
        &mut self,
        graph: &G,
        event: &RotateEvent,
    ) -> Vec<ChildPlacement> {
        if event.target_id != self.group_id {
            return Vec::new();
        }
        let Some(group_node) = graph.lookup_node(&self.group_id) else {
            return Vec::new();
        };
        let Some(group) = group_node.group.as_ref() else {
            return Vec::new();
        };
        if !policy::enabled(group) {
            return Vec::new();
        }

        let center = group_node.position;
        let to_rest = Rotation::new(self.base_rotation, center).inverse();
        let turn = Rotation::new(normalize_angle(event.radians), center);

        let mut placements = Vec::with_capacity(group.children().len());
        for child_id in group.children() {
            let Some(child) = graph.lookup_node(child_id) else {
                continue;
            };
            let offset = self.snapshot.get_or_capture(child_id, || {
                to_rest.transform_vector(child.position.offset_from(center))
            });
            placements.push(ChildPlacement {
                id: child_id.clone(),
                position: center.translate(turn.transform_vector(offset)),
                rotation: event.radians,
            });
        }
        placements
    }
}
