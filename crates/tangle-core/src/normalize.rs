//! # TRAPI Normalizer
//!
//! Migrates arbitrary/legacy graph-shaped JSON into the canonical shape.
//!
//! Several historical wire schemas are accepted:
//! - nodes/edges as maps, or as arrays of self-identifying objects
//! - node fields `curie`/`id` (now `ids`), `type`/`category` (now
//!   `categories`), boolean `set` (now `is_set`)
//! - edge fields `source_id`/`target_id`/`predicate` (now
//!   `subject`/`object`/`predicates`)
//!
//! List-typed fields are always materialized as arrays, and a display
//! `name` is synthesized when absent. The pass is idempotent: normalizing
//! already-canonical input is a no-op.
//!
//! Malformed types (a number where a list-or-scalar was expected) are
//! rejected with [`TangleError::NormalizationRejection`], distinct from the
//! structural defects the validator reports on well-formed graphs.

use crate::constants::CATEGORY_PREFIX;
use crate::types::{
    EdgeId, NodeId, QualifierConstraint, QueryEdge, QueryGraph, QueryNode, TangleError,
};
use serde_json::{Map, Value};

/// Normalize a graph-shaped JSON value into the canonical [`QueryGraph`].
pub fn normalize_graph(raw: &Value) -> Result<QueryGraph, TangleError> {
    let Some(obj) = raw.as_object() else {
        return Err(TangleError::NormalizationRejection(
            "graph must be a JSON object".to_string(),
        ));
    };

    let mut graph = QueryGraph::new();

    for (id, payload) in entries(obj.get("nodes"), "nodes")? {
        let node = normalize_node(&id, &payload)?;
        graph.nodes.insert(NodeId(id), node);
    }
    for (id, payload) in entries(obj.get("edges"), "edges")? {
        let edge = normalize_edge(&id, &payload)?;
        graph.edges.insert(EdgeId(id), edge);
    }

    Ok(graph)
}

/// Normalize the `query_graph` member of a wire envelope in place.
///
/// `knowledge_graph` and `results` pass through untouched; only the query
/// graph has historical shapes worth migrating.
pub fn normalize_message(message: &Value) -> Result<Value, TangleError> {
    let Some(obj) = message.as_object() else {
        return Err(TangleError::NormalizationRejection(
            "message must be a JSON object".to_string(),
        ));
    };
    let Some(query_graph) = obj.get("query_graph") else {
        return Err(TangleError::NormalizationRejection(
            "message must contain a query_graph".to_string(),
        ));
    };

    let normalized = normalize_graph(query_graph)?;
    let mut out = obj.clone();
    out.insert(
        "query_graph".to_string(),
        serde_json::to_value(&normalized)
            .map_err(|e| TangleError::SerializationError(e.to_string()))?,
    );
    Ok(Value::Object(out))
}

// =============================================================================
// MEMBER ITERATION
// =============================================================================

/// Flatten a nodes/edges member into `(id, payload)` pairs.
///
/// Maps yield their entries directly. Arrays must contain self-identifying
/// objects: each element carries a string `id`, used as the key and removed
/// from the payload before field migration.
fn entries(member: Option<&Value>, label: &str) -> Result<Vec<(String, Value)>, TangleError> {
    match member {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Object(map)) => Ok(map
            .iter()
            .map(|(id, payload)| (id.clone(), payload.clone()))
            .collect()),
        Some(Value::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                let Some(obj) = item.as_object() else {
                    return Err(TangleError::NormalizationRejection(format!(
                        "{label} array elements must be objects"
                    )));
                };
                let mut payload = obj.clone();
                let id = match payload.shift_remove("id") {
                    Some(Value::String(id)) => id,
                    _ => {
                        return Err(TangleError::NormalizationRejection(format!(
                            "{label} array elements must carry a string id"
                        )));
                    }
                };
                out.push((id, Value::Object(payload)));
            }
            Ok(out)
        }
        Some(_) => Err(TangleError::NormalizationRejection(format!(
            "{label} must be an object or an array"
        ))),
    }
}

// =============================================================================
// NODE MIGRATION
// =============================================================================

fn normalize_node(id: &str, payload: &Value) -> Result<QueryNode, TangleError> {
    let Some(obj) = payload.as_object() else {
        return Err(TangleError::NormalizationRejection(format!(
            "node {id} must be an object"
        )));
    };

    let ids = coerce_list(first_of(obj, &["ids", "curie", "id"]), id, "ids")?;
    let categories = coerce_list(
        first_of(obj, &["categories", "type", "category"]),
        id,
        "categories",
    )?;

    let is_set = match first_of(obj, &["is_set", "set"]) {
        None => None,
        Some(Value::Bool(b)) => Some(*b),
        Some(_) => {
            return Err(TangleError::NormalizationRejection(format!(
                "node {id} field is_set must be a boolean"
            )));
        }
    };

    let name = match obj.get("name") {
        Some(Value::String(name)) => Some(name.clone()),
        None | Some(Value::Null) => Some(synthesize_name(ids.as_deref(), categories.as_deref())),
        Some(_) => {
            return Err(TangleError::NormalizationRejection(format!(
                "node {id} field name must be a string"
            )));
        }
    };

    Ok(QueryNode {
        ids,
        categories,
        is_set,
        name,
    })
}

/// Display label for a node that arrived without one: joined pinned ids,
/// else the humanized first category, else empty.
fn synthesize_name(ids: Option<&[String]>, categories: Option<&[String]>) -> String {
    if let Some(ids) = ids {
        if !ids.is_empty() {
            return ids.join(", ");
        }
    }
    if let Some(categories) = categories {
        if let Some(first) = categories.first() {
            return humanize_category(first);
        }
    }
    String::new()
}

/// `biolink:ChemicalSubstance` -> "Chemical Substance".
///
/// Splits CamelCase keeping acronym runs intact (`RNAProduct` -> "RNA
/// Product") and turns underscores into spaces.
fn humanize_category(category: &str) -> String {
    let bare = category.strip_prefix(CATEGORY_PREFIX).unwrap_or(category);
    let chars: Vec<char> = bare.chars().collect();
    let mut out = String::with_capacity(bare.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            out.push(' ');
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || (prev.is_uppercase() && next_is_lower) {
                out.push(' ');
            }
        }
        out.push(c);
    }
    out
}

// =============================================================================
// EDGE MIGRATION
// =============================================================================

fn normalize_edge(id: &str, payload: &Value) -> Result<QueryEdge, TangleError> {
    let Some(obj) = payload.as_object() else {
        return Err(TangleError::NormalizationRejection(format!(
            "edge {id} must be an object"
        )));
    };

    let subject = endpoint(obj, &["subject", "source_id"], id)?;
    let object = endpoint(obj, &["object", "target_id"], id)?;
    let predicates = coerce_list(first_of(obj, &["predicates", "predicate"]), id, "predicates")?;

    let qualifier_constraints = match obj.get("qualifier_constraints") {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            serde_json::from_value::<Vec<QualifierConstraint>>(value.clone()).map_err(|_| {
                TangleError::NormalizationRejection(format!(
                    "edge {id} has malformed qualifier_constraints"
                ))
            })?,
        ),
    };

    Ok(QueryEdge {
        subject: NodeId(subject),
        object: NodeId(object),
        predicates,
        qualifier_constraints,
    })
}

/// An edge endpoint under any of its historical names. A missing endpoint
/// becomes the empty id so the structural validator can flag it; a present
/// non-string endpoint is malformed input.
fn endpoint(obj: &Map<String, Value>, keys: &[&str], id: &str) -> Result<String, TangleError> {
    match first_of(obj, keys) {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(TangleError::NormalizationRejection(format!(
            "edge {id} field {} must be a string",
            keys[0]
        ))),
    }
}

// =============================================================================
// ARRAY COERCION
// =============================================================================

/// First present, non-null value among aliased field names.
fn first_of<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !value.is_null())
}

/// The list-or-scalar coercion rule.
///
/// Absent/null pass through; a bare string becomes a one-element array; an
/// existing array of strings is copied. Any other type is a contract
/// violation, rejected distinctly from ordinary coercion.
fn coerce_list(
    value: Option<&Value>,
    id: &str,
    field: &str,
) -> Result<Option<Vec<String>>, TangleError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(vec![s.clone()])),
        Some(Value::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                let Some(s) = item.as_str() else {
                    return Err(TangleError::NormalizationRejection(format!(
                        "{id} field {field} must contain only strings"
                    )));
                };
                out.push(s.to_string());
            }
            Ok(Some(out))
        }
        Some(_) => Err(TangleError::NormalizationRejection(format!(
            "{id} field {field} must be a string or an array of strings"
        ))),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_curie_and_type_migrate() {
        let raw = json!({
            "nodes": { "n0": { "curie": "MONDO:0007739", "type": "biolink:Disease" } },
            "edges": {}
        });

        let graph = normalize_graph(&raw).expect("normalize");
        let node = &graph.nodes[&NodeId::new("n0")];
        assert_eq!(node.ids, Some(vec!["MONDO:0007739".to_string()]));
        assert_eq!(node.categories, Some(vec!["biolink:Disease".to_string()]));
        assert_eq!(node.name, Some("MONDO:0007739".to_string()));
    }

    #[test]
    fn bare_strings_become_one_element_arrays() {
        let raw = json!({
            "nodes": {
                "n0": { "category": "biolink:Gene" },
                "n1": {}
            },
            "edges": {
                "e0": { "source_id": "n0", "target_id": "n1", "predicate": "biolink:affects" }
            }
        });

        let graph = normalize_graph(&raw).expect("normalize");
        assert_eq!(
            graph.nodes[&NodeId::new("n0")].categories,
            Some(vec!["biolink:Gene".to_string()])
        );
        let edge = &graph.edges[&EdgeId::new("e0")];
        assert_eq!(edge.subject, NodeId::new("n0"));
        assert_eq!(edge.object, NodeId::new("n1"));
        assert_eq!(edge.predicates, Some(vec!["biolink:affects".to_string()]));
    }

    #[test]
    fn id_tagged_arrays_are_accepted() {
        let raw = json!({
            "nodes": [
                { "id": "n0", "curie": "CHEBI:45783" },
                { "id": "n1", "type": "biolink:Disease" }
            ],
            "edges": [
                { "id": "e0", "source_id": "n0", "target_id": "n1" }
            ]
        });

        let graph = normalize_graph(&raw).expect("normalize");
        assert_eq!(graph.node_count(), 2);
        assert!(graph.nodes[&NodeId::new("n0")].is_pinned());
        assert_eq!(graph.edges[&EdgeId::new("e0")].object, NodeId::new("n1"));
    }

    #[test]
    fn legacy_set_becomes_is_set() {
        let raw = json!({ "nodes": { "n0": { "set": true } }, "edges": {} });
        let graph = normalize_graph(&raw).expect("normalize");
        assert_eq!(graph.nodes[&NodeId::new("n0")].is_set, Some(true));
    }

    #[test]
    fn name_synthesis_prefers_ids_then_category() {
        let raw = json!({
            "nodes": {
                "n0": { "ids": ["MONDO:1", "MONDO:2"] },
                "n1": { "categories": ["biolink:ChemicalSubstance"] },
                "n2": {}
            },
            "edges": {}
        });

        let graph = normalize_graph(&raw).expect("normalize");
        assert_eq!(
            graph.nodes[&NodeId::new("n0")].name,
            Some("MONDO:1, MONDO:2".to_string())
        );
        assert_eq!(
            graph.nodes[&NodeId::new("n1")].name,
            Some("Chemical Substance".to_string())
        );
        assert_eq!(graph.nodes[&NodeId::new("n2")].name, Some(String::new()));
    }

    #[test]
    fn existing_name_is_kept() {
        let raw = json!({
            "nodes": { "n0": { "ids": ["MONDO:1"], "name": "Diabetes" } },
            "edges": {}
        });
        let graph = normalize_graph(&raw).expect("normalize");
        assert_eq!(graph.nodes[&NodeId::new("n0")].name, Some("Diabetes".to_string()));
    }

    #[test]
    fn humanize_keeps_acronym_runs() {
        assert_eq!(humanize_category("biolink:RNAProduct"), "RNA Product");
        assert_eq!(humanize_category("biolink:Disease"), "Disease");
        assert_eq!(
            humanize_category("biolink:ChemicalSubstance"),
            "Chemical Substance"
        );
    }

    #[test]
    fn numbers_are_rejected_not_coerced() {
        let raw = json!({ "nodes": { "n0": { "ids": 42 } }, "edges": {} });
        let err = normalize_graph(&raw).expect_err("rejection");
        assert!(matches!(err, TangleError::NormalizationRejection(_)));
    }

    #[test]
    fn non_string_array_elements_are_rejected() {
        let raw = json!({ "nodes": { "n0": { "ids": ["MONDO:1", 7] } }, "edges": {} });
        let err = normalize_graph(&raw).expect_err("rejection");
        assert!(matches!(err, TangleError::NormalizationRejection(_)));
    }

    #[test]
    fn normalization_is_idempotent() {
        let raw = json!({
            "nodes": {
                "n0": { "curie": "MONDO:0007739", "type": "biolink:Disease" },
                "n1": { "set": true }
            },
            "edges": {
                "e0": { "source_id": "n0", "target_id": "n1", "predicate": "biolink:treats" }
            }
        });

        let once = normalize_graph(&raw).expect("first pass");
        let canonical = serde_json::to_value(&once).expect("to_value");
        let twice = normalize_graph(&canonical).expect("second pass");
        assert_eq!(once, twice);
    }

    #[test]
    fn canonical_input_round_trips() {
        let canonical = json!({
            "nodes": {
                "n0": { "ids": ["MONDO:0007739"], "categories": ["biolink:Disease"], "name": "MONDO:0007739" },
                "n1": { "categories": ["biolink:Drug"], "is_set": false, "name": "Drug" }
            },
            "edges": {
                "e0": {
                    "subject": "n1",
                    "object": "n0",
                    "predicates": ["biolink:treats"],
                    "qualifier_constraints": [
                        { "qualifier_set": [
                            { "qualifier_type_id": "biolink:object_direction_qualifier",
                              "qualifier_value": "increased" }
                        ]}
                    ]
                }
            }
        });

        let graph = normalize_graph(&canonical).expect("normalize");
        let back = serde_json::to_value(&graph).expect("to_value");
        assert_eq!(back, canonical);
    }

    #[test]
    fn message_normalization_preserves_siblings() {
        let message = json!({
            "query_graph": { "nodes": { "n0": { "curie": "MONDO:1" } }, "edges": {} },
            "knowledge_graph": { "nodes": {}, "edges": {} },
            "results": []
        });

        let normalized = normalize_message(&message).expect("normalize");
        assert_eq!(
            normalized["query_graph"]["nodes"]["n0"]["ids"],
            json!(["MONDO:1"])
        );
        assert_eq!(normalized["knowledge_graph"], message["knowledge_graph"]);
        assert_eq!(normalized["results"], json!([]));
    }

    #[test]
    fn message_without_query_graph_is_rejected() {
        let err = normalize_message(&json!({ "results": [] })).expect_err("rejection");
        assert!(matches!(err, TangleError::NormalizationRejection(_)));
    }
}
