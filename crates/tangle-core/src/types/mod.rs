//! # Core Type Definitions
//!
//! This module contains all core types for the Tangle query-graph substrate:
//! - Graph identifiers (`NodeId`, `EdgeId`)
//! - Canonical TRAPI graph shapes (`QueryNode`, `QueryEdge`, `QueryGraph`)
//! - Qualifier refinements (`Qualifier`, `QualifierConstraint`)
//! - Editor snapshot (`EditorState`)
//! - Error types (`TangleError`)
//!
//! ## Determinism Guarantees
//!
//! All collection types in this module preserve insertion order
//! (`IndexMap`), because insertion order is semantic: the root selector
//! falls back to the first node inserted, and ties are broken by
//! first-encountered order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use std::fmt;

// =============================================================================
// GRAPH IDENTIFIERS
// =============================================================================

/// Identifier for a query-graph node.
///
/// Allocator-produced ids follow `n<seq>`; foreign graphs may use any
/// string. Transparent serde so the id doubles as a JSON map key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a new node id from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier for a query-graph edge. Allocator-produced ids follow `e<seq>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub String);

impl EdgeId {
    /// Create a new edge id from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// QUERY NODE
// =============================================================================

/// A node of the canonical query graph.
///
/// All fields are optional on the wire; a blank node (every field absent)
/// means "match any entity". A node with a non-empty `ids` list is *pinned*
/// to concrete entities rather than a wildcard category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryNode {
    /// Pinned entity identifiers (CURIEs). Presence marks the node pinned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,

    /// Ordered list of category URIs. Empty/absent means any type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,

    /// Whether the node stands for a set of entities rather than one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_set: Option<bool>,

    /// Display label, synthesized by the normalizer when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl QueryNode {
    /// A blank wildcard node.
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    /// A node is pinned when its `ids` list is non-empty.
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.ids.as_ref().is_some_and(|ids| !ids.is_empty())
    }
}

// =============================================================================
// QUALIFIERS
// =============================================================================

/// A single (type, value) qualifier refining an edge predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualifier {
    pub qualifier_type_id: String,
    pub qualifier_value: String,
}

/// A conjunction of qualifiers that must hold together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifierConstraint {
    pub qualifier_set: Vec<Qualifier>,
}

// =============================================================================
// QUERY EDGE
// =============================================================================

/// An edge of the canonical query graph.
///
/// `subject` and `object` must reference existing node keys; the structural
/// validator enforces this for foreign input and the store preserves it
/// under every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryEdge {
    pub subject: NodeId,
    pub object: NodeId,

    /// Ordered list of relation URIs. Semantic legality is not checked here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicates: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier_constraints: Option<Vec<QualifierConstraint>>,
}

impl QueryEdge {
    /// Create an edge with a single predicate.
    #[must_use]
    pub fn new(subject: NodeId, object: NodeId, predicate: impl Into<String>) -> Self {
        Self {
            subject,
            object,
            predicates: Some(vec![predicate.into()]),
            qualifier_constraints: None,
        }
    }
}

// =============================================================================
// QUERY GRAPH
// =============================================================================

/// The canonical query graph: insertion-ordered node and edge maps.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryGraph {
    #[serde(default)]
    pub nodes: IndexMap<NodeId, QueryNode>,
    #[serde(default)]
    pub edges: IndexMap<EdgeId, QueryEdge>,
}

impl QueryGraph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently inserted node, if any.
    #[must_use]
    pub fn last_node(&self) -> Option<&NodeId> {
        self.nodes.keys().next_back()
    }

    /// Total node count.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total edge count.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

// =============================================================================
// EDITOR STATE
// =============================================================================

/// One immutable snapshot of the editor.
///
/// The store consumes a snapshot and a command and produces the next
/// snapshot; callers must check `is_valid`/`err_message` after every
/// dispatch, since invalid-but-well-formed graphs never error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorState {
    pub graph: QueryGraph,

    /// The anchor node for connectivity pruning and sentence generation.
    #[serde(rename = "rootNode")]
    pub root_node: Option<NodeId>,

    #[serde(rename = "isValid")]
    pub is_valid: bool,

    /// Newline-joined structural defects, empty when valid. Shown verbatim.
    #[serde(rename = "errMessage")]
    pub err_message: String,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Tangle system.
///
/// Structural defects are NOT errors: they are reported as string lists by
/// the validator and surface as `is_valid = false` on the snapshot. Errors
/// are reserved for malformed input and for commands naming missing ids.
#[derive(Debug, Error)]
pub enum TangleError {
    /// Normalizer input was not object/array/string/null where a
    /// list-or-scalar was expected. Distinct from a structural defect:
    /// this signals malformed input, not a valid-but-disconnected graph.
    #[error("Normalization rejected: {0}")]
    NormalizationRejection(String),

    /// A command referenced a node id that is not in the graph.
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    /// A command referenced an edge id that is not in the graph.
    #[error("Unknown edge: {0}")]
    UnknownEdge(EdgeId),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred (app layer only; the core performs no I/O).
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
