//! Plain-text rendering of diagrams and action logs

use crate::engine::Action;
use crate::graph::{Diagram, Node, Point, Vector};

/// Round to one decimal and fold negative zero into zero
fn tidy(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn point(p: Point) -> String {
    format!("({:.1}, {:.1})", tidy(p.x), tidy(p.y))
}

fn vector(v: Vector) -> String {
    format!("({:.1}, {:.1})", tidy(v.dx), tidy(v.dy))
}

fn degrees(radians: f64) -> String {
    format!("{:.1}°", tidy(radians.to_degrees()))
}

/// The containment tree of a diagram, one node per line
pub fn format_diagram(diagram: &Diagram) -> String {
    let mut out = String::new();
    for root in diagram.roots() {
        write_node(diagram, root, 0, &mut out);
    }
    out
}

fn write_node(diagram: &Diagram, node: &Node, depth: usize, out: &mut String) {
    out.push_str(&format!(
        "{}[{}] x={:.1} y={:.1} w={:.1} h={:.1} rot={}\n",
        "  ".repeat(depth),
        node.id,
        tidy(node.position.x),
        tidy(node.position.y),
        tidy(node.size.width),
        tidy(node.size.height),
        degrees(node.rotation)
    ));
    for child_id in node.children() {
        if let Some(child) = diagram.get(child_id) {
            write_node(diagram, child, depth + 1, out);
        }
    }
}

/// One line describing an action
pub fn format_action(action: &Action) -> String {
    match action {
        Action::Moved { id, from, to } => format!("moved {} {} -> {}", id, point(*from), point(*to)),
        Action::Rotated { id, radians } => format!("rotated {} to {}", id, degrees(*radians)),
        Action::Resized { id, delta, handle } => {
            format!("resized {} by {} via grip {}", id, vector(*delta), handle)
        }
        Action::ResizeCancelled { id, delta, handle } => format!(
            "resize of {} by {} via grip {} cancelled",
            id,
            vector(*delta),
            handle
        ),
        Action::Translated { ids, delta } => {
            let names: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
            format!("translated [{}] by {}", names.join(", "), vector(*delta))
        }
    }
}

/// Every action on its own line
pub fn format_actions(actions: &[Action]) -> String {
    actions
        .iter()
        .map(|a| format!("{}\n", format_action(a)))
        .collect()
}
