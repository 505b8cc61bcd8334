//! # Graph Store
//!
//! The reducer orchestrating every graph mutation: a pure function
//! `(state, command) -> state`. The store owns canonical state and performs
//! no I/O; persistence is the caller's responsibility.
//!
//! Every command but `SaveGraph` is followed deterministically by:
//! recompute root -> prune unreachable -> revalidate. `SaveGraph` runs the
//! normalizer first and recomputes the root from scratch. Well-formed but
//! invalid graphs (disconnected node, empty graph) never error; they yield
//! `is_valid = false` plus the defect text, so editing continues with a
//! warning. Errors are reserved for commands naming missing ids and for
//! normalization rejections.

use crate::constants::DEFAULT_PREDICATE;
use crate::types::{
    EdgeId, EditorState, NodeId, Qualifier, QualifierConstraint, QueryEdge, QueryGraph,
    QueryNode, TangleError,
};
use crate::{alloc, connectivity, normalize, root, validate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// COMMANDS
// =============================================================================

/// Which end of an edge an `EditEdge` rewires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Subject,
    Object,
}

/// The only mutation surface of the editor. One variant per operation,
/// each carrying only its own required fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Connect two existing nodes with a new default-predicate edge.
    AddEdge { subject: NodeId, object: NodeId },

    /// Rewire one endpoint of an edge. An omitted `node_id` allocates a
    /// fresh blank node and rewires to it.
    EditEdge {
        edge_id: EdgeId,
        endpoint: Endpoint,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        node_id: Option<NodeId>,
    },

    /// Replace an edge's predicate list verbatim. Legality is the ontology
    /// collaborator's concern, not enforced here.
    EditPredicates {
        edge_id: EdgeId,
        predicates: Vec<String>,
    },

    /// Replace an edge's qualifiers. A non-empty map becomes a single
    /// `qualifier_constraints` entry; an empty map removes them.
    EditQualifiers {
        edge_id: EdgeId,
        #[serde(default)]
        qualifiers: IndexMap<String, String>,
    },

    DeleteEdge { edge_id: EdgeId },

    /// Append a new node and an edge from `node_id` (default: the most
    /// recently added node) to it.
    AddHop {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        node_id: Option<NodeId>,
    },

    /// Insert one disconnected blank node.
    AddNode,

    /// Replace a node's payload wholesale, or reset it to blank.
    EditNode {
        node_id: NodeId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        node: Option<QueryNode>,
    },

    /// Remove a node and all incident edges.
    DeleteNode { node_id: NodeId },

    /// Normalize a foreign graph and replace the graph wholesale.
    SaveGraph { graph: Value },
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Apply one command to a snapshot, producing the next snapshot.
///
/// Pure and synchronous: the input state is never mutated, and the command
/// completes fully before control returns. Callers must check `is_valid`
/// on the result after every dispatch.
pub fn dispatch(state: &EditorState, command: Command) -> Result<EditorState, TangleError> {
    if let Command::SaveGraph { graph } = command {
        let graph = normalize::normalize_graph(&graph)?;
        return Ok(finalize(graph, None));
    }

    let mut graph = state.graph.clone();
    apply(&mut graph, command)?;
    Ok(finalize(graph, state.root_node.as_ref()))
}

fn apply(graph: &mut QueryGraph, command: Command) -> Result<(), TangleError> {
    match command {
        Command::AddEdge { subject, object } => {
            require_node(graph, &subject)?;
            require_node(graph, &object)?;
            let edge_id = alloc::next_edge_id(graph);
            graph
                .edges
                .insert(edge_id, QueryEdge::new(subject, object, DEFAULT_PREDICATE));
        }

        Command::EditEdge {
            edge_id,
            endpoint,
            node_id,
        } => {
            require_edge(graph, &edge_id)?;
            let target = match node_id {
                Some(node_id) => {
                    require_node(graph, &node_id)?;
                    node_id
                }
                None => {
                    let fresh = alloc::next_node_id(graph);
                    graph.nodes.insert(fresh.clone(), QueryNode::blank());
                    fresh
                }
            };
            if let Some(edge) = graph.edges.get_mut(&edge_id) {
                match endpoint {
                    Endpoint::Subject => edge.subject = target,
                    Endpoint::Object => edge.object = target,
                }
            }
        }

        Command::EditPredicates {
            edge_id,
            predicates,
        } => {
            require_edge(graph, &edge_id)?;
            if let Some(edge) = graph.edges.get_mut(&edge_id) {
                edge.predicates = Some(predicates);
            }
        }

        Command::EditQualifiers {
            edge_id,
            qualifiers,
        } => {
            require_edge(graph, &edge_id)?;
            if let Some(edge) = graph.edges.get_mut(&edge_id) {
                edge.qualifier_constraints = if qualifiers.is_empty() {
                    None
                } else {
                    Some(vec![QualifierConstraint {
                        qualifier_set: qualifiers
                            .into_iter()
                            .map(|(qualifier_type_id, qualifier_value)| Qualifier {
                                qualifier_type_id,
                                qualifier_value,
                            })
                            .collect(),
                    }])
                };
            }
        }

        Command::DeleteEdge { edge_id } => {
            require_edge(graph, &edge_id)?;
            graph.edges.shift_remove(&edge_id);
        }

        Command::AddHop { node_id } => {
            let source = match node_id {
                Some(node_id) => {
                    require_node(graph, &node_id)?;
                    node_id
                }
                None => match graph.last_node() {
                    Some(last) => last.clone(),
                    // Empty graph: allocate the source too.
                    None => {
                        let source = alloc::next_node_id(graph);
                        graph.nodes.insert(source.clone(), QueryNode::blank());
                        source
                    }
                },
            };
            let fresh = alloc::next_node_id(graph);
            graph.nodes.insert(fresh.clone(), QueryNode::blank());
            let edge_id = alloc::next_edge_id(graph);
            graph
                .edges
                .insert(edge_id, QueryEdge::new(source, fresh, DEFAULT_PREDICATE));
        }

        Command::AddNode => {
            let fresh = alloc::next_node_id(graph);
            graph.nodes.insert(fresh, QueryNode::blank());
        }

        Command::EditNode { node_id, node } => {
            require_node(graph, &node_id)?;
            graph.nodes.insert(node_id, node.unwrap_or_default());
        }

        Command::DeleteNode { node_id } => {
            require_node(graph, &node_id)?;
            graph.nodes.shift_remove(&node_id);
            graph
                .edges
                .retain(|_, edge| edge.subject != node_id && edge.object != node_id);
        }

        // Intercepted in dispatch; nothing to apply here.
        Command::SaveGraph { .. } => {}
    }
    Ok(())
}

/// The deterministic post-mutation pipeline:
/// recompute root -> prune unreachable -> revalidate.
fn finalize(graph: QueryGraph, current_root: Option<&NodeId>) -> EditorState {
    let root_node = root::select_root(&graph, current_root);
    let graph = connectivity::prune(&graph, root_node.as_ref());
    let defects = validate::validate_query_graph(&graph);

    EditorState {
        is_valid: defects.is_empty(),
        err_message: defects.join("\n"),
        root_node,
        graph,
    }
}

fn require_node(graph: &QueryGraph, node_id: &NodeId) -> Result<(), TangleError> {
    if graph.nodes.contains_key(node_id) {
        Ok(())
    } else {
        Err(TangleError::UnknownNode(node_id.clone()))
    }
}

fn require_edge(graph: &QueryGraph, edge_id: &EdgeId) -> Result<(), TangleError> {
    if graph.edges.contains_key(edge_id) {
        Ok(())
    } else {
        Err(TangleError::UnknownEdge(edge_id.clone()))
    }
}

// =============================================================================
// CONSTRUCTORS
// =============================================================================

impl EditorState {
    /// The empty editor: no nodes, no root, invalid until populated.
    #[must_use]
    pub fn empty() -> Self {
        finalize(QueryGraph::new(), None)
    }

    /// The editor's starting graph: two blank nodes joined by one edge
    /// carrying the given predicate.
    #[must_use]
    pub fn default_template(predicate: &str) -> Self {
        let mut graph = QueryGraph::new();
        graph.nodes.insert(NodeId::new("n0"), QueryNode::blank());
        graph.nodes.insert(NodeId::new("n1"), QueryNode::blank());
        graph.edges.insert(
            EdgeId::new("e0"),
            QueryEdge::new(NodeId::new("n0"), NodeId::new("n1"), predicate),
        );
        finalize(graph, None)
    }
}

// =============================================================================
// TESTS
// =============================================================================
