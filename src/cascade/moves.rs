//! Translating everything a group contains

use crate::events::MoveEvent;
use crate::graph::{Graph, NodeId, Vector};

use super::membership;

/// A batch translation produced by a move cascade
#[derive(Debug, Clone, PartialEq)]
pub struct TranslateBatch {
    pub ids: Vec<NodeId>,
    pub delta: Vector,
}

/// Move cascade for one group.
///
/// Unlike rotate and resize this is not gated by the group's policy flags:
/// members always follow a moved group.
#[derive(Debug, Clone)]
pub struct MoveCascade {
    group_id: NodeId,
}

impl MoveCascade {
    pub fn new(group_id: NodeId) -> Self {
        Self { group_id }
    }

    /// Every descendant at every depth, moved by the event's delta in one batch
    pub fn on_move<G: Graph + ?Sized>(&self, graph: &G, event: &MoveEvent) -> Option<TranslateBatch> {
        if event.target_id != self.group_id || event.delta.is_zero() {
            return None;
        }
        let ids = membership::resolve(graph, &self.group_id);
        if ids.is_empty() {
            return None;
        }
        Some(TranslateBatch {
            ids,
            delta: event.delta,
        })
    }
}
