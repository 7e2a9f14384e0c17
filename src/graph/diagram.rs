//! In-memory diagram store

use std::collections::HashMap;

use super::types::{Node, NodeId, Point, Size, Vector};
use super::{Graph, ResizeOutcome, ResizeParams};

/// Arena of node records addressed by identifier.
///
/// Nodes keep their insertion order so iteration and reports are reproducible.
#[derive(Debug, Clone)]
pub struct Diagram {
    nodes: HashMap<NodeId, Node>,
    order: Vec<NodeId>,
    min_node_size: f64,
}

impl Default for Diagram {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            order: Vec::new(),
            min_node_size: 1.0,
        }
    }
}

impl Diagram {
    /// Create an empty diagram
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the smallest width or height the resize primitive will produce
    pub fn with_min_node_size(mut self, size: f64) -> Self {
        self.min_node_size = size;
        self
    }

    pub fn min_node_size(&self) -> f64 {
        self.min_node_size
    }

    /// Insert or replace a node. A replaced node keeps its original position in the order.
    pub fn insert(&mut self, node: Node) {
        if !self.nodes.contains_key(&node.id) {
            self.order.push(node.id.clone());
        }
        self.nodes.insert(node.id.clone(), node);
    }

    /// Remove a node, returning it if it was present. Group memberships are left alone.
    pub fn remove(&mut self, id: &NodeId) -> Option<Node> {
        let node = self.nodes.remove(id)?;
        self.order.retain(|n| n != id);
        Some(node)
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Identifiers of all group nodes in insertion order
    pub fn group_ids(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|n| n.is_group())
            .map(|n| n.id.clone())
            .collect()
    }

    /// The group that lists `id` as a direct child, if any
    pub fn parent_of(&self, id: &NodeId) -> Option<&Node> {
        self.nodes()
            .find(|n| n.group.as_ref().is_some_and(|g| g.contains(id)))
    }

    /// Nodes that no group contains, in insertion order
    pub fn roots(&self) -> Vec<&Node> {
        self.nodes()
            .filter(|n| self.parent_of(&n.id).is_none())
            .collect()
    }
}

impl Graph for Diagram {
    fn lookup_node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    fn move_node_to(&mut self, id: &NodeId, to: Point) -> Option<Vector> {
        let node = self.nodes.get_mut(id)?;
        let delta = to.offset_from(node.position);
        node.position = to;
        Some(delta)
    }

    fn set_node_rotation(&mut self, id: &NodeId, radians: f64) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.rotation = radians;
                true
            }
            None => false,
        }
    }

    fn batch_translate(&mut self, ids: &[NodeId], delta: Vector) {
        for id in ids {
            if let Some(node) = self.nodes.get_mut(id) {
                node.position = node.position.translate(delta);
            }
        }
    }

    fn resize_node(&mut self, params: &ResizeParams) -> ResizeOutcome {
        let min = self.min_node_size;
        let Some(node) = self.nodes.get_mut(&params.node_id) else {
            return ResizeOutcome::Missing;
        };

        let sx = params.handle.x_sign();
        let sy = params.handle.y_sign();
        let width = node.size.width + sx * params.delta.dx;
        let height = node.size.height + sy * params.delta.dy;
        if width < min || height < min {
            return ResizeOutcome::Cancelled;
        }

        // The dragged edge follows the grip while the opposite edge stays put,
        // so the center travels half the grip displacement.
        let shift = Vector::new(
            if sx != 0.0 { params.delta.dx / 2.0 } else { 0.0 },
            if sy != 0.0 { params.delta.dy / 2.0 } else { 0.0 },
        );

        let previous = node.size;
        node.size = Size::new(width, height);
        node.position = node.position.translate(shift);
        ResizeOutcome::Applied {
            previous,
            is_group: node.is_group(),
        }
    }
}
