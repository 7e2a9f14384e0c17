//! Proportional resize of a group's direct children

use crate::events::ResizeEvent;
use crate::graph::{Graph, NodeId, ResizeParams, Size, Vector};

use super::policy;

/// Share of the group's grip displacement that a child of size `child` receives.
///
/// Each axis scales independently against the group's pre-resize dimensions.
pub fn child_delta(child: Size, previous: Size, delta: Vector) -> Vector {
    Vector::new(
        child.width / previous.width * delta.dx,
        child.height / previous.height * delta.dy,
    )
}

/// Resize cascade for one group.
///
/// Produces one resize request per direct child; the caller hands each to the
/// single-node resize primitive, which fires a nested resize event when the
/// child is itself a group.
#[derive(Debug, Clone)]
pub struct ResizeCascade {
    group_id: NodeId,
}

impl ResizeCascade {
    pub fn new(group_id: NodeId) -> Self {
        Self { group_id }
    }

    pub fn on_resize<G: Graph + ?Sized>(&self, graph: &G, event: &ResizeEvent) -> Vec<ResizeParams> {
        if event.target_id != self.group_id {
            return Vec::new();
        }
        // The group has already been resized, so its current size is useless here
        let Some(previous) = event.previous.filter(Size::is_usable) else {
            return Vec::new();
        };
        let Some(group_node) = graph.lookup_node(&self.group_id) else {
            return Vec::new();
        };
        let Some(group) = group_node.group.as_ref() else {
            return Vec::new();
        };
        if !policy::enabled(group) {
            return Vec::new();
        }

        group
            .children()
            .iter()
            .filter_map(|child_id| {
                let child = graph.lookup_node(child_id)?;
                Some(ResizeParams {
                    node_id: child_id.clone(),
                    delta: child_delta(child.size, previous, event.delta),
                    handle: event.handle,
                })
            })
            .collect()
    }
}
