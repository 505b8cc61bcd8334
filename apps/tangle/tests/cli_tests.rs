//! Integration tests for the CLI command implementations.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use serde_json::json;
use std::path::PathBuf;
use tangle::cli::commands::{cmd_apply, cmd_normalize, cmd_template, cmd_validate};
use tangle::config::TangleConfig;
use tangle_core::EditorState;

fn write_json(dir: &tempfile::TempDir, name: &str, value: &serde_json::Value) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
    path
}

fn read_json(path: &PathBuf) -> serde_json::Value {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}

// =============================================================================
// VALIDATE
// =============================================================================

#[test]
fn validate_reports_clean_message_as_exit_zero() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_json(
        &dir,
        "message.json",
        &json!({
            "query_graph": {
                "nodes": { "n0": {}, "n1": {} },
                "edges": { "e0": { "subject": "n0", "object": "n1" } }
            }
        }),
    );

    let code = cmd_validate(&file, false, false).unwrap();
    assert_eq!(code, 0);
}

#[test]
fn validate_flags_defects_with_exit_one() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_json(
        &dir,
        "message.json",
        &json!({ "query_graph": { "nodes": {}, "edges": {} } }),
    );

    let code = cmd_validate(&file, false, true).unwrap();
    assert_eq!(code, 1);
}

#[test]
fn validate_accepts_bare_graphs_in_graph_mode() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_json(
        &dir,
        "graph.json",
        &json!({
            "nodes": { "n0": {}, "n1": {} },
            "edges": { "e0": { "subject": "n0", "object": "n1" } }
        }),
    );

    // As a message this has no query_graph member; as a bare graph it is fine.
    assert_eq!(cmd_validate(&file, false, false).unwrap(), 1);
    assert_eq!(cmd_validate(&file, true, false).unwrap(), 0);
}

#[test]
fn validate_rejects_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    assert!(cmd_validate(&missing, false, false).is_err());
}

// =============================================================================
// NORMALIZE
// =============================================================================

#[test]
fn normalize_migrates_legacy_fields_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(
        &dir,
        "legacy.json",
        &json!({
            "nodes": { "n0": { "curie": "MONDO:0007739", "type": "biolink:Disease" } },
            "edges": {}
        }),
    );
    let output = dir.path().join("canonical.json");

    cmd_normalize(&input, Some(&output), false, &TangleConfig::default()).unwrap();

    let canonical = read_json(&output);
    assert_eq!(
        canonical,
        json!({
            "nodes": {
                "n0": {
                    "ids": ["MONDO:0007739"],
                    "categories": ["biolink:Disease"],
                    "name": "MONDO:0007739"
                }
            },
            "edges": {}
        })
    );
}

#[test]
fn normalize_message_mode_keeps_siblings() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(
        &dir,
        "message.json",
        &json!({
            "query_graph": { "nodes": { "n0": { "id": "CHEBI:1" } }, "edges": {} },
            "results": []
        }),
    );
    let output = dir.path().join("out.json");

    cmd_normalize(&input, Some(&output), true, &TangleConfig::default()).unwrap();

    let normalized = read_json(&output);
    assert_eq!(normalized["query_graph"]["nodes"]["n0"]["ids"], json!(["CHEBI:1"]));
    assert_eq!(normalized["results"], json!([]));
}

#[test]
fn normalize_propagates_rejections() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(
        &dir,
        "bad.json",
        &json!({ "nodes": { "n0": { "ids": 42 } }, "edges": {} }),
    );

    assert!(cmd_normalize(&input, None, false, &TangleConfig::default()).is_err());
}

// =============================================================================
// TEMPLATE
// =============================================================================

#[test]
fn template_emits_a_valid_editor_state() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("template.json");

    cmd_template(Some(&output), &TangleConfig::default()).unwrap();

    let state: EditorState = serde_json::from_value(read_json(&output)).unwrap();
    assert!(state.is_valid);
    assert_eq!(state.graph.node_count(), 2);
    assert_eq!(state.graph.edge_count(), 1);
}

#[test]
fn template_honours_configured_predicate() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("template.json");
    let config = TangleConfig {
        default_predicate: "biolink:treats".to_string(),
        ..TangleConfig::default()
    };

    cmd_template(Some(&output), &config).unwrap();

    let state = read_json(&output);
    assert_eq!(
        state["graph"]["edges"]["e0"]["predicates"],
        json!(["biolink:treats"])
    );
}

// =============================================================================
// APPLY
// =============================================================================

#[test]
fn apply_replays_a_command_script() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("state.json");
    cmd_template(Some(&template), &TangleConfig::default()).unwrap();

    let script = write_json(
        &dir,
        "script.json",
        &json!([
            { "op": "add_hop" },
            { "op": "edit_predicates", "edge_id": "e1", "predicates": ["biolink:treats"] }
        ]),
    );
    let output = dir.path().join("final.json");

    cmd_apply(&template, &script, Some(&output), &TangleConfig::default()).unwrap();

    let state: EditorState = serde_json::from_value(read_json(&output)).unwrap();
    assert!(state.is_valid);
    assert_eq!(state.graph.node_count(), 3);
    assert_eq!(state.graph.edge_count(), 2);
}

#[test]
fn apply_surfaces_unknown_ids_as_errors() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("state.json");
    cmd_template(Some(&template), &TangleConfig::default()).unwrap();

    let script = write_json(
        &dir,
        "script.json",
        &json!([{ "op": "delete_node", "node_id": "n7" }]),
    );

    assert!(cmd_apply(&template, &script, None, &TangleConfig::default()).is_err());
}
