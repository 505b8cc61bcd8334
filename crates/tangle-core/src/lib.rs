//! # tangle-core
//!
//! The query-graph state machine for Tangle - THE LOGIC.
//!
//! This crate implements the core of an interactive biomedical query
//! builder: invariant-preserving graph mutation, connectivity maintenance,
//! multi-version wire-schema normalization, and structural validation of
//! the graph/message exchanged with federated reasoning services.
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Is pure: no I/O, no async, no network; a dispatched command completes
//!   fully before control returns
//! - Is copy-on-write: every dispatch consumes one immutable snapshot and
//!   produces another, so concurrent mutation is structurally impossible
//! - Holds its invariants after every transition: edge endpoints exist,
//!   every node is reachable from the root, ids are unique
//! - Delegates semantic (ontology-level) predicate/qualifier legality to
//!   external collaborators; only structure is enforced here

// =============================================================================
// MODULES
// =============================================================================

pub mod alloc;
pub mod connectivity;
pub mod constants;
pub mod normalize;
pub mod root;
pub mod store;
pub mod types;
pub mod validate;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{
    EdgeId, EditorState, NodeId, Qualifier, QualifierConstraint, QueryEdge, QueryGraph,
    QueryNode, TangleError,
};

// =============================================================================
// RE-EXPORTS: State Machine
// =============================================================================

pub use store::{Command, Endpoint, dispatch};

// =============================================================================
// RE-EXPORTS: Helper Algorithms
// =============================================================================

pub use alloc::{next_edge_id, next_node_id};
pub use connectivity::{incident_edges, prune, reachable_from};
pub use normalize::{normalize_graph, normalize_message};
pub use root::{select_root, sentence_anchor};
pub use validate::{GraphKind, validate_graph, validate_message, validate_query_graph};
