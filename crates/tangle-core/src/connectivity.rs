//! # Connectivity Analyzer & Pruner
//!
//! Reachability and incidence queries over the query graph, and the pruner
//! that discards anything unreachable from the root.
//!
//! Edges are treated as undirected: a query edge constrains both of its
//! endpoints regardless of subject/object direction. Traversal uses an
//! iterative fixpoint over the edge list rather than recursion, so
//! pathological inputs cannot exhaust the stack.

use crate::types::{EdgeId, NodeId, QueryGraph};
use std::collections::BTreeSet;

/// Number of edges incident to `node` (subject or object).
#[must_use]
pub fn incident_edges(graph: &QueryGraph, node: &NodeId) -> usize {
    graph
        .edges
        .values()
        .filter(|edge| edge.subject == *node || edge.object == *node)
        .count()
}

/// The reachability closure from `root`, treating edges as undirected.
///
/// Fixpoint: start from `{root}` and repeatedly sweep the unclassified
/// edges, pulling in both endpoints of any edge touching the reachable set,
/// until a full sweep adds nothing. Worst case O(V·E), fine at interactive
/// graph sizes. A root not present in the graph yields empty sets.
#[must_use]
pub fn reachable_from(
    graph: &QueryGraph,
    root: &NodeId,
) -> (BTreeSet<NodeId>, BTreeSet<EdgeId>) {
    let mut nodes = BTreeSet::new();
    let mut edges = BTreeSet::new();

    if !graph.nodes.contains_key(root) {
        return (nodes, edges);
    }
    nodes.insert(root.clone());

    loop {
        let mut grew = false;
        for (edge_id, edge) in &graph.edges {
            if edges.contains(edge_id) {
                continue;
            }
            if nodes.contains(&edge.subject) || nodes.contains(&edge.object) {
                edges.insert(edge_id.clone());
                // Only new NODES can make further edges eligible, so a sweep
                // that classifies edges without growing the node set is final.
                if nodes.insert(edge.subject.clone()) {
                    grew = true;
                }
                if nodes.insert(edge.object.clone()) {
                    grew = true;
                }
            }
        }
        if !grew {
            break;
        }
    }

    (nodes, edges)
}

/// The induced subgraph reachable from `root`, preserving insertion order.
///
/// No root (or a root absent from the graph) yields the empty graph.
#[must_use]
pub fn prune(graph: &QueryGraph, root: Option<&NodeId>) -> QueryGraph {
    let Some(root) = root else {
        return QueryGraph::new();
    };

    let (keep_nodes, keep_edges) = reachable_from(graph, root);

    let mut pruned = QueryGraph::new();
    for (id, node) in &graph.nodes {
        if keep_nodes.contains(id) {
            pruned.nodes.insert(id.clone(), node.clone());
        }
    }
    for (id, edge) in &graph.edges {
        if keep_edges.contains(id) {
            pruned.edges.insert(id.clone(), edge.clone());
        }
    }
    pruned
}

// =============================================================================
// TESTS
// =============================================================================
