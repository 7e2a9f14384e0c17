//! Diagram graph: node records, their geometry, and the access seam the
//! cascades mutate through.

pub mod diagram;
pub mod transform;
pub mod types;

pub use diagram::Diagram;
pub use transform::Rotation;
pub use types::*;

use serde::{Deserialize, Serialize};

/// Which resize grip initiated a resize.
///
/// Grips are numbered clockwise from the top-left corner: 0 top-left, 1 top,
/// 2 top-right, 3 right, 4 bottom-right, 5 bottom, 6 bottom-left, 7 left.
/// Other values are carried through unchanged but move no edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandleIndex(pub u8);

impl HandleIndex {
    pub const TOP_LEFT: Self = Self(0);
    pub const TOP: Self = Self(1);
    pub const TOP_RIGHT: Self = Self(2);
    pub const RIGHT: Self = Self(3);
    pub const BOTTOM_RIGHT: Self = Self(4);
    pub const BOTTOM: Self = Self(5);
    pub const BOTTOM_LEFT: Self = Self(6);
    pub const LEFT: Self = Self(7);

    /// -1 when the grip drags the left edge, 1 for the right edge, 0 otherwise
    pub fn x_sign(self) -> f64 {
        match self.0 {
            0 | 6 | 7 => -1.0,
            2..=4 => 1.0,
            _ => 0.0,
        }
    }

    /// -1 when the grip drags the top edge, 1 for the bottom edge, 0 otherwise
    pub fn y_sign(self) -> f64 {
        match self.0 {
            0..=2 => -1.0,
            4..=6 => 1.0,
            _ => 0.0,
        }
    }
}

impl std::fmt::Display for HandleIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Arguments of the single-node resize primitive
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub node_id: NodeId,
    /// Displacement of the grip in canvas coordinates
    pub delta: Vector,
    pub handle: HandleIndex,
}

/// What the resize primitive did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeOutcome {
    /// The node was resized; `previous` holds its dimensions before the change
    Applied { previous: Size, is_group: bool },
    /// The resize was refused and nothing changed
    Cancelled,
    /// No node with that identifier exists
    Missing,
}

/// Access to the diagram the cascades operate on.
///
/// Implementations only mutate; firing the follow-up events a host framework
/// would emit is the engine's job.
pub trait Graph {
    /// Look up a node by identifier
    fn lookup_node(&self, id: &NodeId) -> Option<&Node>;

    /// Move a node's center, returning the applied displacement
    fn move_node_to(&mut self, id: &NodeId, to: Point) -> Option<Vector>;

    /// Set a node's absolute rotation. Returns false if the node is unknown.
    fn set_node_rotation(&mut self, id: &NodeId, radians: f64) -> bool;

    /// Translate every listed node by the same displacement; unknown ids are skipped
    fn batch_translate(&mut self, ids: &[NodeId], delta: Vector);

    /// Resize one node by dragging one of its grips
    fn resize_node(&mut self, params: &ResizeParams) -> ResizeOutcome;
}
