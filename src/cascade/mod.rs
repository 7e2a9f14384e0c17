//! Transform cascades: propagating a group's rotate, resize and move to the
//! nodes it contains.
//!
//! Each cascade only computes what should change; the engine applies the
//! result through the graph and fires the follow-up events.

pub mod membership;
pub mod moves;
pub mod policy;
pub mod resize;
pub mod rotation;

pub use moves::{MoveCascade, TranslateBatch};
pub use resize::ResizeCascade;
pub use rotation::{normalize_angle, ChildPlacement, PositionSnapshot, RotationCascade};

use crate::graph::NodeId;

/// The three cascades attached to one group
#[derive(Debug, Clone)]
pub struct GroupCascade {
    pub rotation: RotationCascade,
    pub resize: ResizeCascade,
    pub moves: MoveCascade,
}

impl GroupCascade {
    pub fn new(group_id: NodeId, base_rotation: f64) -> Self {
        Self {
            rotation: RotationCascade::new(group_id.clone(), base_rotation),
            resize: ResizeCascade::new(group_id.clone()),
            moves: MoveCascade::new(group_id),
        }
    }
}
