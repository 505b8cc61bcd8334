//! # ID Allocator
//!
//! Computes the next free node/edge identifier.
//!
//! Ids follow `n<seq>` / `e<seq>` where `seq` is the smallest non-negative
//! integer not currently used in that namespace. Freed ids may be reused;
//! occupied ids never are.

use crate::constants::{EDGE_ID_PREFIX, NODE_ID_PREFIX};
use crate::types::{EdgeId, NodeId, QueryGraph};
use std::collections::BTreeSet;

/// The next free node id for this graph.
#[must_use]
pub fn next_node_id(graph: &QueryGraph) -> NodeId {
    NodeId(next_free(
        NODE_ID_PREFIX,
        graph.nodes.keys().map(NodeId::as_str),
    ))
}

/// The next free edge id for this graph.
#[must_use]
pub fn next_edge_id(graph: &QueryGraph) -> EdgeId {
    EdgeId(next_free(
        EDGE_ID_PREFIX,
        graph.edges.keys().map(EdgeId::as_str),
    ))
}

/// Smallest `<prefix><seq>` not present in `used`.
///
/// Linear probe from zero; the candidate set is bounded by the number of
/// occupied ids, so this terminates after at most `used.len() + 1` probes.
fn next_free<'a>(prefix: &str, used: impl Iterator<Item = &'a str>) -> String {
    let used: BTreeSet<&str> = used.collect();
    let mut seq: usize = 0;
    loop {
        let candidate = format!("{prefix}{seq}");
        if !used.contains(candidate.as_str()) {
            return candidate;
        }
        seq += 1;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{QueryEdge, QueryNode};

    #[test]
    fn empty_graph_starts_at_zero() {
        let graph = QueryGraph::new();
        assert_eq!(next_node_id(&graph), NodeId::new("n0"));
        assert_eq!(next_edge_id(&graph), EdgeId::new("e0"));
    }

    #[test]
    fn freed_ids_are_reused() {
        let mut graph = QueryGraph::new();
        graph.nodes.insert(NodeId::new("n0"), QueryNode::blank());
        graph.nodes.insert(NodeId::new("n2"), QueryNode::blank());

        // n1 is the smallest gap
        assert_eq!(next_node_id(&graph), NodeId::new("n1"));
    }

    #[test]
    fn occupied_ids_are_never_returned() {
        let mut graph = QueryGraph::new();
        for seq in 0..5 {
            graph
                .nodes
                .insert(NodeId::new(format!("n{seq}")), QueryNode::blank());
        }
        assert_eq!(next_node_id(&graph), NodeId::new("n5"));
    }

    #[test]
    fn foreign_ids_do_not_block_allocation() {
        let mut graph = QueryGraph::new();
        graph
            .nodes
            .insert(NodeId::new("disease"), QueryNode::blank());
        graph.edges.insert(
            EdgeId::new("treats"),
            QueryEdge::new(NodeId::new("disease"), NodeId::new("disease"), "biolink:treats"),
        );

        assert_eq!(next_node_id(&graph), NodeId::new("n0"));
        assert_eq!(next_edge_id(&graph), EdgeId::new("e0"));
    }
}
