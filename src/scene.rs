//! Scene documents: a diagram plus a script of gestures, stored as TOML.
//!
//! ```toml
//! [[nodes]]
//! id = "frame"
//! x = 100.0
//! y = 100.0
//! width = 200.0
//! height = 100.0
//!
//! [nodes.group]
//! children = ["box"]
//!
//! [[nodes]]
//! id = "box"
//! x = 120.0
//! y = 100.0
//! width = 100.0
//! height = 50.0
//!
//! [[steps]]
//! kind = "rotate"
//! target = "frame"
//! degrees = 90.0
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::CascadeConfig;
use crate::engine::{Action, TransformEngine};
use crate::error::SceneError;
use crate::graph::{Diagram, GroupData, HandleIndex, Node, NodeId, Point, Size, Vector};

/// A node as written in a scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in radians
    #[serde(default)]
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<SceneGroup>,
}

/// Containment data of a scene node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneGroup {
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform_with_container: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_restrict: Option<bool>,
}

/// One scripted gesture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// Set the target's absolute rotation, given in radians or degrees
    Rotate {
        target: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        radians: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        degrees: Option<f64>,
    },
    RotateStart {
        target: String,
    },
    RotateEnd {
        target: String,
    },
    Resize {
        target: String,
        dx: f64,
        dy: f64,
        #[serde(default = "default_handle")]
        handle: HandleIndex,
    },
    Move {
        target: String,
        dx: f64,
        dy: f64,
    },
    MoveTo {
        target: String,
        x: f64,
        y: f64,
    },
}

fn default_handle() -> HandleIndex {
    HandleIndex::BOTTOM_RIGHT
}

impl Step {
    pub fn target(&self) -> &str {
        match self {
            Step::Rotate { target, .. }
            | Step::RotateStart { target }
            | Step::RotateEnd { target }
            | Step::Resize { target, .. }
            | Step::Move { target, .. }
            | Step::MoveTo { target, .. } => target,
        }
    }

    /// Angle of a rotate step in radians
    pub fn angle(&self) -> Option<f64> {
        match self {
            Step::Rotate {
                radians: Some(r), ..
            } => Some(*r),
            Step::Rotate {
                degrees: Some(d), ..
            } => Some(d.to_radians()),
            _ => None,
        }
    }

    /// Perform the gesture on an engine
    pub fn apply(&self, engine: &mut TransformEngine) -> Vec<Action> {
        let id = NodeId::new(self.target());
        match self {
            Step::Rotate { .. } => engine.rotate(&id, self.angle().unwrap_or_default()),
            Step::RotateStart { .. } => engine.begin_rotation(&id),
            Step::RotateEnd { .. } => engine.end_rotation(&id),
            Step::Resize { dx, dy, handle, .. } => {
                engine.resize(&id, Vector::new(*dx, *dy), *handle)
            }
            Step::Move { dx, dy, .. } => engine.translate(&id, Vector::new(*dx, *dy)),
            Step::MoveTo { x, y, .. } => engine.move_to(&id, Point::new(*x, *y)),
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Rotate { target, .. } => write!(
                f,
                "rotate {} to {:.1}°",
                target,
                self.angle().unwrap_or_default().to_degrees()
            ),
            Step::RotateStart { target } => write!(f, "begin rotating {}", target),
            Step::RotateEnd { target } => write!(f, "end rotating {}", target),
            Step::Resize {
                target,
                dx,
                dy,
                handle,
            } => write!(f, "resize {} by ({}, {}) via grip {}", target, dx, dy, handle),
            Step::Move { target, dx, dy } => write!(f, "move {} by ({}, {})", target, dx, dy),
            Step::MoveTo { target, x, y } => write!(f, "move {} to ({}, {})", target, x, y),
        }
    }
}

/// A diagram and the gestures to replay on it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub nodes: Vec<SceneNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,
}

impl Scene {
    /// Load and validate a scene from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, SceneError> {
        let scene: Scene = toml::from_str(content)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Serialize the scene back to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Check that containment forms a tree and every step has a target.
    ///
    /// Children that name no node are allowed; the cascades skip them.
    pub fn validate(&self) -> Result<(), SceneError> {
        let mut defined = HashSet::new();
        for node in &self.nodes {
            if !defined.insert(node.id.as_str()) {
                return Err(SceneError::DuplicateNode {
                    id: node.id.clone(),
                });
            }
        }

        let mut parent_of: HashMap<&str, &str> = HashMap::new();
        for node in &self.nodes {
            let Some(group) = &node.group else {
                continue;
            };
            for child in &group.children {
                if !defined.contains(child.as_str()) {
                    warn!(group = %node.id, child = %child, "group lists an undefined child");
                }
                if let Some(first) = parent_of.insert(child.as_str(), node.id.as_str()) {
                    if first != node.id {
                        return Err(SceneError::SharedChild {
                            child: child.clone(),
                            first: first.to_string(),
                            second: node.id.clone(),
                        });
                    }
                }
            }
        }

        if let Some(cycle) = self.find_cycle() {
            return Err(SceneError::cycle(cycle));
        }

        for (index, step) in self.steps.iter().enumerate() {
            let number = index + 1;
            if !defined.contains(step.target()) {
                return Err(SceneError::UnknownTarget {
                    name: step.target().to_string(),
                    step: number,
                    suggestions: find_similar(&defined, step.target(), 2),
                });
            }
            if let Step::Rotate {
                radians, degrees, ..
            } = step
            {
                match (radians, degrees) {
                    (None, None) => {
                        return Err(SceneError::invalid_step(number, "rotate needs radians or degrees"))
                    }
                    (Some(_), Some(_)) => {
                        return Err(SceneError::invalid_step(
                            number,
                            "rotate takes radians or degrees, not both",
                        ))
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Depth-first search for a group that transitively contains itself
    fn find_cycle(&self) -> Option<Vec<String>> {
        let children: HashMap<&str, &[String]> = self
            .nodes
            .iter()
            .filter_map(|n| n.group.as_ref().map(|g| (n.id.as_str(), g.children.as_slice())))
            .collect();

        let mut done = HashSet::new();
        for node in &self.nodes {
            let mut path = Vec::new();
            if let Some(cycle) = visit(node.id.as_str(), &children, &mut path, &mut done) {
                return Some(cycle);
            }
        }
        None
    }

    /// Build the diagram the scene describes
    pub fn to_diagram(&self, config: &CascadeConfig) -> Diagram {
        let mut diagram = Diagram::new().with_min_node_size(config.min_node_size);
        for node in &self.nodes {
            let mut record = Node::new(
                node.id.as_str(),
                Point::new(node.x, node.y),
                Size::new(node.width, node.height),
            )
            .with_rotation(node.rotation);
            if let Some(group) = &node.group {
                let mut data = GroupData::new(
                    group
                        .transform_with_container
                        .unwrap_or(config.default_transform_with_container),
                    group.is_restrict.unwrap_or(config.default_is_restrict),
                );
                for child in &group.children {
                    data.add_child(NodeId::new(child.as_str()));
                }
                record = record.with_group(data);
            }
            diagram.insert(record);
        }
        diagram
    }

    /// Capture a diagram's current state as a scene without steps
    pub fn from_diagram(diagram: &Diagram) -> Self {
        let nodes = diagram
            .nodes()
            .map(|node| SceneNode {
                id: node.id.to_string(),
                x: node.position.x,
                y: node.position.y,
                width: node.size.width,
                height: node.size.height,
                rotation: node.rotation,
                group: node.group.as_ref().map(|g| SceneGroup {
                    children: g.children().iter().map(NodeId::to_string).collect(),
                    transform_with_container: Some(g.transform_with_container),
                    is_restrict: Some(g.is_restrict),
                }),
            })
            .collect();
        Self {
            nodes,
            steps: Vec::new(),
        }
    }
}

fn visit<'a>(
    id: &'a str,
    children: &HashMap<&'a str, &'a [String]>,
    path: &mut Vec<&'a str>,
    done: &mut HashSet<&'a str>,
) -> Option<Vec<String>> {
    if let Some(start) = path.iter().position(|p| *p == id) {
        let mut cycle: Vec<String> = path[start..].iter().map(|s| s.to_string()).collect();
        cycle.push(id.to_string());
        return Some(cycle);
    }
    if done.contains(id) {
        return None;
    }
    path.push(id);
    for child in children.get(id).copied().unwrap_or_default() {
        if let Some(cycle) = visit(child.as_str(), children, path, done) {
            return Some(cycle);
        }
    }
    path.pop();
    done.insert(id);
    None
}

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let n = b_chars.len();

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut row = vec![0usize; n + 1];
    for (i, ca) in a_chars.iter().enumerate() {
        row[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            row[j + 1] = (prev[j + 1] + 1).min(row[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[n]
}

/// Find similar identifiers within a maximum edit distance
fn find_similar(defined: &HashSet<&str>, target: &str, max_distance: usize) -> Vec<String> {
    let mut candidates: Vec<(&str, usize)> = defined
        .iter()
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            (dist <= max_distance && dist > 0).then_some((*name, dist))
        })
        .collect();

    candidates.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)));
    candidates
        .into_iter()
        .map(|(name, _)| name.to_string())
        .take(3)
        .collect()
}
