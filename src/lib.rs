//! Group Cascade - transform propagation for container nodes in a diagram editor
//!
//! When a group is rotated, resized or moved, the change cascades to every node
//! it contains, including nested groups and their own members:
//!
//! - **rotate**: direct children turn about the group center and take the
//!   group's angle
//! - **resize**: direct children receive a share of the grip displacement
//!   proportional to their size, per axis
//! - **move**: every descendant is translated by the same displacement
//!
//! Rotate and resize only cascade when the group transforms with its container
//! and does not restrict its footprint. Moves always cascade.
//!
//! # Example
//!
//! ```rust
//! use group_cascade::{replay, format_diagram};
//!
//! let result = replay(r#"
//!     [[nodes]]
//!     id = "frame"
//!     x = 100.0
//!     y = 100.0
//!     width = 200.0
//!     height = 100.0
//!     [nodes.group]
//!     children = ["box"]
//!
//!     [[nodes]]
//!     id = "box"
//!     x = 120.0
//!     y = 100.0
//!     width = 100.0
//!     height = 50.0
//!
//!     [[steps]]
//!     kind = "rotate"
//!     target = "frame"
//!     degrees = 90.0
//! "#).unwrap();
//!
//! assert!(format_diagram(&result.diagram).contains("[box] x=100.0 y=120.0"));
//! ```

pub mod cascade;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod graph;
pub mod report;
pub mod scene;

pub use cascade::{normalize_angle, GroupCascade};
pub use config::CascadeConfig;
pub use engine::{Action, TransformEngine};
pub use error::{ConfigError, SceneError};
pub use events::{EventBus, EventKind, TransformEvent};
pub use graph::{Diagram, Graph, GroupData, HandleIndex, Node, NodeId, Point, Size, Vector};
pub use report::{format_actions, format_diagram};
pub use scene::{Scene, Step};

/// Actions produced by one scripted step
#[derive(Debug, Clone)]
pub struct StepLog {
    pub step: Step,
    pub actions: Vec<Action>,
}

/// Outcome of replaying a scene
#[derive(Debug, Clone)]
pub struct Replay {
    /// The diagram after every step ran
    pub diagram: Diagram,
    pub log: Vec<StepLog>,
}

impl Replay {
    /// All actions in the order they were applied
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.log.iter().flat_map(|entry| entry.actions.iter())
    }
}

/// Replay a TOML scene with default configuration
pub fn replay(source: &str) -> Result<Replay, SceneError> {
    replay_with_config(source, &CascadeConfig::default())
}

/// Replay a TOML scene
///
/// Every group in the scene gets its cascades attached before the first step.
pub fn replay_with_config(source: &str, config: &CascadeConfig) -> Result<Replay, SceneError> {
    let scene = Scene::from_str(source)?;
    Ok(run_scene(&scene, config))
}

/// Run the steps of an already validated scene
pub fn run_scene(scene: &Scene, config: &CascadeConfig) -> Replay {
    let mut engine = TransformEngine::new(scene.to_diagram(config));
    engine.attach_all();

    let log = scene
        .steps
        .iter()
        .map(|step| {
            tracing::info!(step = %step, "replaying step");
            StepLog {
                step: step.clone(),
                actions: step.apply(&mut engine),
            }
        })
        .collect();

    Replay {
        diagram: engine.into_graph(),
        log,
    }
}
