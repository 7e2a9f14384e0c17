//! Typed transform events and the subscription tables that deliver them.
//!
//! Every event names the node whose transform already changed. Subscribers are
//! group identifiers; each table is walked in subscription order, which is the
//! order handlers observe an emitted event.

use crate::graph::{HandleIndex, NodeId, Size, Vector};

/// A node was given a new absolute rotation
#[derive(Debug, Clone, PartialEq)]
pub struct RotateEvent {
    pub target_id: NodeId,
    pub radians: f64,
}

/// A node was resized by dragging one of its grips
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeEvent {
    pub target_id: NodeId,
    pub delta: Vector,
    pub handle: HandleIndex,
    /// Dimensions of the target before this resize
    pub previous: Option<Size>,
}

/// A node was translated
#[derive(Debug, Clone, PartialEq)]
pub struct MoveEvent {
    pub target_id: NodeId,
    pub delta: Vector,
}

/// Events understood by the cascades
#[derive(Debug, Clone, PartialEq)]
pub enum TransformEvent {
    Rotate(RotateEvent),
    Resize(ResizeEvent),
    Move(MoveEvent),
    /// A rotation gesture on the target is about to begin
    RotateStart { target_id: NodeId },
    /// The rotation gesture on the target has finished
    RotateEnd { target_id: NodeId },
}

impl TransformEvent {
    pub fn rotate(target_id: impl Into<NodeId>, radians: f64) -> Self {
        Self::Rotate(RotateEvent {
            target_id: target_id.into(),
            radians,
        })
    }

    pub fn resize(
        target_id: impl Into<NodeId>,
        delta: Vector,
        handle: HandleIndex,
        previous: Option<Size>,
    ) -> Self {
        Self::Resize(ResizeEvent {
            target_id: target_id.into(),
            delta,
            handle,
            previous,
        })
    }

    pub fn translate(target_id: impl Into<NodeId>, delta: Vector) -> Self {
        Self::Move(MoveEvent {
            target_id: target_id.into(),
            delta,
        })
    }

    /// The node the event is about
    pub fn target(&self) -> &NodeId {
        match self {
            Self::Rotate(e) => &e.target_id,
            Self::Resize(e) => &e.target_id,
            Self::Move(e) => &e.target_id,
            Self::RotateStart { target_id } | Self::RotateEnd { target_id } => target_id,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::Rotate(_) => EventKind::Rotate,
            Self::Resize(_) => EventKind::Resize,
            Self::Move(_) => EventKind::Move,
            Self::RotateStart { .. } | Self::RotateEnd { .. } => EventKind::Gesture,
        }
    }
}

/// Handler table selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Rotate,
    Resize,
    Move,
    Gesture,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Rotate => "rotate",
            Self::Resize => "resize",
            Self::Move => "move",
            Self::Gesture => "gesture",
        };
        write!(f, "{}", name)
    }
}

/// One subscription table per event kind
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    rotate: Vec<NodeId>,
    resize: Vec<NodeId>,
    moves: Vec<NodeId>,
    gesture: Vec<NodeId>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn table_mut(&mut self, kind: EventKind) -> &mut Vec<NodeId> {
        match kind {
            EventKind::Rotate => &mut self.rotate,
            EventKind::Resize => &mut self.resize,
            EventKind::Move => &mut self.moves,
            EventKind::Gesture => &mut self.gesture,
        }
    }

    /// Subscribers for one kind, in subscription order
    pub fn subscribers(&self, kind: EventKind) -> &[NodeId] {
        match kind {
            EventKind::Rotate => &self.rotate,
            EventKind::Resize => &self.resize,
            EventKind::Move => &self.moves,
            EventKind::Gesture => &self.gesture,
        }
    }

    /// Subscribe a handler to one kind. Subscribing twice is a no-op.
    pub fn subscribe(&mut self, kind: EventKind, handler: NodeId) {
        let table = self.table_mut(kind);
        if !table.contains(&handler) {
            table.push(handler);
        }
    }

    /// Subscribe a handler to every kind
    pub fn subscribe_all(&mut self, handler: &NodeId) {
        for kind in [
            EventKind::Rotate,
            EventKind::Resize,
            EventKind::Move,
            EventKind::Gesture,
        ] {
            self.subscribe(kind, handler.clone());
        }
    }

    /// Drop a handler from every table
    pub fn unsubscribe(&mut self, handler: &NodeId) {
        for table in [
            &mut self.rotate,
            &mut self.resize,
            &mut self.moves,
            &mut self.gesture,
        ] {
            table.retain(|h| h != handler);
        }
    }

    pub fn is_subscribed(&self, kind: EventKind, handler: &NodeId) -> bool {
        self.subscribers(kind).contains(handler)
    }
}
