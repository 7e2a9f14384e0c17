//! Core types for the diagram graph

use serde::{Deserialize, Serialize};

/// Unique identifier of a node in the diagram
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A 2D point in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset from `origin` to this point
    pub fn offset_from(&self, origin: Point) -> Vector {
        Vector::new(self.x - origin.x, self.y - origin.y)
    }

    pub fn translate(&self, delta: Vector) -> Point {
        Point::new(self.x + delta.dx, self.y + delta.dy)
    }
}

/// A displacement in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

/// Width and height of a node
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when both dimensions can be used as a divisor
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width != 0.0 && self.height != 0.0
    }
}

/// Containment data carried by group nodes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupData {
    children: Vec<NodeId>,
    /// Master switch: rotate and resize move together with the container
    pub transform_with_container: bool,
    /// The group enforces a minimum footprint on its own resize
    pub is_restrict: bool,
}

impl GroupData {
    pub fn new(transform_with_container: bool, is_restrict: bool) -> Self {
        Self {
            children: Vec::new(),
            transform_with_container,
            is_restrict,
        }
    }

    /// Builder form of [`GroupData::add_child`]
    pub fn with_child(mut self, id: impl Into<NodeId>) -> Self {
        self.add_child(id.into());
        self
    }

    /// Add a child, keeping identifiers unique. Returns false if it was already present.
    pub fn add_child(&mut self, id: NodeId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.children.push(id);
        true
    }

    /// Direct children in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.children.contains(id)
    }
}

/// A node record owned by the diagram
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// Center of the node
    pub position: Point,
    pub size: Size,
    /// Rotation in radians
    pub rotation: f64,
    pub group: Option<GroupData>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, position: Point, size: Size) -> Self {
        Self {
            id: id.into(),
            position,
            size,
            rotation: 0.0,
            group: None,
        }
    }

    pub fn with_rotation(mut self, radians: f64) -> Self {
        self.rotation = radians;
        self
    }

    pub fn with_group(mut self, group: GroupData) -> Self {
        self.group = Some(group);
        self
    }

    pub fn is_group(&self) -> bool {
        self.group.is_some()
    }

    /// Direct children, empty for plain nodes
    pub fn children(&self) -> &[NodeId] {
        self.group.as_ref().map(GroupData::children).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_child_is_unique() {
        let mut group = GroupData::new(true, false);
        assert!(group.add_child(NodeId::new("a")));
        assert!(!group.add_child(NodeId::new("a")));
        assert!(group.add_child(NodeId::new("b")));
        assert_eq!(group.children(), &[NodeId::new("a"), NodeId::new("b")]);
    }

    #[test]
    fn test_size_usable() {
        assert!(Size::new(10.0, 5.0).is_usable());
        assert!(!Size::new(0.0, 5.0).is_usable());
        assert!(!Size::new(10.0, 0.0).is_usable());
        assert!(!Size::new(f64::NAN, 5.0).is_usable());
    }

    #[test]
    fn test_plain_node_has_no_children() {
        let node = Node::new("n", Point::new(0.0, 0.0), Size::new(1.0, 1.0));
        assert!(!node.is_group());
        assert!(node.children().is_empty());
    }
}
