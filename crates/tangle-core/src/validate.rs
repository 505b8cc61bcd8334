//! # Structural Validator
//!
//! Classifies a TRAPI-shaped message, returning an ordered list of defect
//! strings (empty = valid). Defects are user-facing text shown verbatim in
//! the editor; they are never thrown.
//!
//! The validator works on untyped JSON because externally supplied graphs
//! (uploads, bookmarks, examples) may never pass through the store. Each
//! graph sub-check short-circuits on its first failure, but the independent
//! sub-checks (query graph, knowledge graph, results) accumulate their
//! defects into one combined list.

use crate::types::QueryGraph;
use serde_json::Value;

/// Which graph of the envelope is being checked. Only the query graph
/// carries the editor-level connectivity requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    Query,
    Knowledge,
}

impl GraphKind {
    fn label(self) -> &'static str {
        match self {
            Self::Query => "Query graph",
            Self::Knowledge => "Knowledge graph",
        }
    }
}

/// Validate one graph of the envelope. At most one defect is returned:
/// later checks assume the shape earlier checks established.
#[must_use]
pub fn validate_graph(graph: &Value, kind: GraphKind) -> Vec<String> {
    let label = kind.label();

    let Some(obj) = graph.as_object() else {
        return vec![format!("{label} must be an object.")];
    };

    let Some(nodes) = obj.get("nodes").and_then(Value::as_object) else {
        return vec![format!("{label} requires a valid nodes object.")];
    };
    let Some(edges) = obj.get("edges").and_then(Value::as_object) else {
        return vec![format!("{label} requires a valid edges object.")];
    };

    if kind == GraphKind::Query && nodes.is_empty() {
        return vec!["Query graph must contain at least one node.".to_string()];
    }

    for (edge_id, edge) in edges {
        let endpoints_exist = ["subject", "object"].iter().all(|field| {
            edge.get(*field)
                .and_then(Value::as_str)
                .is_some_and(|id| nodes.contains_key(id))
        });
        if !endpoints_exist {
            return vec![format!(
                "{label} edge {edge_id} must have a subject and an object that reference existing nodes."
            )];
        }
    }

    if kind == GraphKind::Query {
        for node_id in nodes.keys() {
            let connected = edges.values().any(|edge| {
                ["subject", "object"].iter().any(|field| {
                    edge.get(*field).and_then(Value::as_str) == Some(node_id.as_str())
                })
            });
            if !connected {
                return vec![format!(
                    "Query graph node {node_id} is not connected to any edge."
                )];
            }
        }
    }

    Vec::new()
}

/// Validate a whole wire envelope.
///
/// Runs the query-graph check, the knowledge-graph check when that member
/// is present, and the result-list check when `results` is present,
/// concatenating their defect lists in that order.
#[must_use]
pub fn validate_message(message: &Value) -> Vec<String> {
    let Some(obj) = message.as_object() else {
        return vec!["Message must be an object.".to_string()];
    };

    let mut defects = validate_graph(
        obj.get("query_graph").unwrap_or(&Value::Null),
        GraphKind::Query,
    );

    if let Some(knowledge_graph) = obj.get("knowledge_graph") {
        defects.extend(validate_graph(knowledge_graph, GraphKind::Knowledge));
    }
    if let Some(results) = obj.get("results") {
        defects.extend(validate_results(results));
    }

    defects
}

/// Validate the result list. Short-circuits on the first failing result.
fn validate_results(results: &Value) -> Vec<String> {
    let Some(items) = results.as_array() else {
        return vec!["Results must be an array.".to_string()];
    };

    for (index, result) in items.iter().enumerate() {
        if !result.get("node_bindings").is_some_and(Value::is_object) {
            return vec![format!("Result {index} must contain a node_bindings object.")];
        }
        if !result.get("analyses").is_some_and(Value::is_array) {
            return vec![format!("Result {index} must contain an analyses array.")];
        }
    }

    Vec::new()
}

// =============================================================================
// TYPED RE-VALIDATION (store pipeline)
// =============================================================================

/// The same query-graph checks over the canonical typed graph.
///
/// The store revalidates after every command; its graphs are already typed,
/// so this skips the JSON shape checks and re-establishes the editor
/// invariants directly: at least one node, endpoints exist, every node has
/// an incident edge.
#[must_use]
pub fn validate_query_graph(graph: &QueryGraph) -> Vec<String> {
    if graph.nodes.is_empty() {
        return vec!["Query graph must contain at least one node.".to_string()];
    }

    for (edge_id, edge) in &graph.edges {
        if !graph.nodes.contains_key(&edge.subject) || !graph.nodes.contains_key(&edge.object) {
            return vec![format!(
                "Query graph edge {edge_id} must have a subject and an object that reference existing nodes."
            )];
        }
    }

    for node_id in graph.nodes.keys() {
        let connected = graph
            .edges
            .values()
            .any(|edge| edge.subject == *node_id || edge.object == *node_id);
        if !connected {
            return vec![format!(
                "Query graph node {node_id} is not connected to any edge."
            )];
        }
    }

    Vec::new()
}

// =============================================================================
// TESTS
// =============================================================================
