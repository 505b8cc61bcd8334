//! # Root Selector
//!
//! Picks the anchor node used for connectivity pruning and for the
//! generated "Find X where ..." sentence.
//!
//! Two textually similar heuristics live here and are deliberately NOT
//! unified: [`select_root`] prefers unpinned, most-connected nodes (good
//! sentence subjects), while [`sentence_anchor`] prefers pinned,
//! fewest-connected nodes for display ordering. They serve different
//! purposes and their tie-breaks point in opposite directions.

use crate::connectivity::incident_edges;
use crate::types::{NodeId, QueryGraph};

/// Choose the node anchoring connectivity.
///
/// Selection order:
/// 1. Keep the current root if it is still present with at least one
///    incident edge, so unrelated edits never relocate the anchor.
/// 2. Otherwise partition nodes having incident edges into pinned
///    (non-empty `ids`) and unpinned, prefer the unpinned partition, and
///    pick the member with the most incident edges. Ties go to the
///    first-encountered node in insertion order.
/// 3. Both partitions empty: fall back to the first node in insertion
///    order, even if edgeless.
/// 4. No nodes at all: `None`.
///
/// Unconstrained, highly-connected nodes make the best subject for the
/// generated query sentence; pinned nodes are usually constraints.
#[must_use]
pub fn select_root(graph: &QueryGraph, current: Option<&NodeId>) -> Option<NodeId> {
    if let Some(current) = current {
        if graph.nodes.contains_key(current) && incident_edges(graph, current) > 0 {
            return Some(current.clone());
        }
    }

    let mut pinned: Option<(&NodeId, usize)> = None;
    let mut unpinned: Option<(&NodeId, usize)> = None;

    for (id, node) in &graph.nodes {
        let degree = incident_edges(graph, id);
        if degree == 0 {
            continue;
        }
        let slot = if node.is_pinned() {
            &mut pinned
        } else {
            &mut unpinned
        };
        // Strictly-greater keeps the first-encountered node on ties.
        if slot.is_none_or(|(_, best)| degree > best) {
            *slot = Some((id, degree));
        }
    }

    unpinned
        .or(pinned)
        .map(|(id, _)| id.clone())
        .or_else(|| graph.nodes.keys().next().cloned())
}

/// The starting node used elsewhere for display ordering.
///
/// Opposite tie-breaks from [`select_root`]: prefers the pinned partition
/// and the fewest incident edges. Pinned leaf nodes read best as the
/// concrete starting point of a displayed result path.
#[must_use]
pub fn sentence_anchor(graph: &QueryGraph) -> Option<NodeId> {
    let mut pinned: Option<(&NodeId, usize)> = None;
    let mut unpinned: Option<(&NodeId, usize)> = None;

    for (id, node) in &graph.nodes {
        let degree = incident_edges(graph, id);
        if degree == 0 {
            continue;
        }
        let slot = if node.is_pinned() {
            &mut pinned
        } else {
            &mut unpinned
        };
        if slot.is_none_or(|(_, best)| degree < best) {
            *slot = Some((id, degree));
        }
    }

    pinned
        .or(unpinned)
        .map(|(id, _)| id.clone())
        .or_else(|| graph.nodes.keys().next().cloned())
}

// =============================================================================
// TESTS
// =============================================================================
