//! Flattening a group's containment tree

use std::collections::HashSet;

use crate::graph::{Graph, Node, NodeId};

/// All descendants of a group, depth first.
///
/// A nested group is listed before its own descendants. Children that cannot be
/// found in the graph are skipped, and an identifier is never listed twice.
/// Plain nodes and unknown identifiers resolve to an empty list.
pub fn resolve<G: Graph + ?Sized>(graph: &G, group_id: &NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let Some(group) = graph.lookup_node(group_id) else {
        return out;
    };
    let mut seen = HashSet::from([group_id.clone()]);
    collect(graph, group, &mut out, &mut seen);
    out
}

fn collect<G: Graph + ?Sized>(
    graph: &G,
    group: &Node,
    out: &mut Vec<NodeId>,
    seen: &mut HashSet<NodeId>,
) {
    for child_id in group.children() {
        let Some(child) = graph.lookup_node(child_id) else {
            continue;
        };
        if !seen.insert(child_id.clone()) {
            continue;
        }
        out.push(child_id.clone());
        if child.is_group() {
            collect(graph, child, out, seen);
        }
    }
}
