//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::config::TangleConfig;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tangle_core::{
    Command, EditorState, GraphKind, TangleError, dispatch, normalize_graph, normalize_message,
    validate_graph, validate_message,
};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum input file size (32 MB).
///
/// Query graphs are interactive-scale; anything larger is a mistake, and
/// the limit prevents memory exhaustion from accidental huge files.
const MAX_INPUT_FILE_SIZE: u64 = 32 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), TangleError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| TangleError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(TangleError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate an input path: canonicalize to resolve symlinks and "..",
/// ensure it exists and is a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, TangleError> {
    let canonical = path.canonicalize().map_err(|e| {
        TangleError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(TangleError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Read and parse a JSON file with the size and path checks applied.
fn read_json(path: &Path) -> Result<Value, TangleError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_INPUT_FILE_SIZE)?;

    let contents = std::fs::read(&validated)
        .map_err(|e| TangleError::IoError(format!("Read file: {}", e)))?;
    serde_json::from_slice(&contents)
        .map_err(|e| TangleError::SerializationError(format!("Invalid JSON: {}", e)))
}

/// Emit a JSON value to a file or stdout.
fn emit(value: &Value, output: Option<&Path>, config: &TangleConfig) -> Result<(), TangleError> {
    let rendered = if config.pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| TangleError::SerializationError(e.to_string()))?;

    match output {
        Some(path) => {
            std::fs::write(path, rendered.as_bytes())
                .map_err(|e| TangleError::IoError(format!("Write file: {}", e)))?;
            println!("Wrote {} bytes to {:?}", rendered.len(), path);
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

// =============================================================================
// VALIDATE COMMAND
// =============================================================================

/// Check a message (or bare query graph) for structural defects.
/// Returns the process exit code: 0 when valid, 1 when defects were found.
pub fn cmd_validate(file: &Path, graph_only: bool, json_mode: bool) -> Result<u8, TangleError> {
    tracing::info!("Validating {:?} (graph_only: {})", file, graph_only);

    let document = read_json(file)?;
    let defects = if graph_only {
        validate_graph(&document, GraphKind::Query)
    } else {
        validate_message(&document)
    };

    if json_mode {
        let report = serde_json::json!({
            "valid": defects.is_empty(),
            "defects": defects,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_default()
        );
    } else if defects.is_empty() {
        println!("Valid: no structural defects found.");
    } else {
        println!("Found {} structural defect(s):", defects.len());
        for defect in &defects {
            println!("  - {defect}");
        }
    }

    Ok(u8::from(!defects.is_empty()))
}

// =============================================================================
// NORMALIZE COMMAND
// =============================================================================

/// Migrate a legacy graph or message envelope to the canonical shape.
pub fn cmd_normalize(
    file: &Path,
    output: Option<&Path>,
    message: bool,
    config: &TangleConfig,
) -> Result<(), TangleError> {
    tracing::info!("Normalizing {:?} (message: {})", file, message);

    let document = read_json(file)?;
    let canonical = if message {
        normalize_message(&document)?
    } else {
        let graph = normalize_graph(&document)?;
        serde_json::to_value(&graph).map_err(|e| TangleError::SerializationError(e.to_string()))?
    };

    emit(&canonical, output, config)
}

// =============================================================================
// TEMPLATE COMMAND
// =============================================================================

/// Emit the default two-node editor state.
pub fn cmd_template(output: Option<&Path>, config: &TangleConfig) -> Result<(), TangleError> {
    let state = EditorState::default_template(&config.default_predicate);
    let value =
        serde_json::to_value(&state).map_err(|e| TangleError::SerializationError(e.to_string()))?;
    emit(&value, output, config)
}

// =============================================================================
// APPLY COMMAND
// =============================================================================

/// Replay a JSON array of commands against a saved editor state.
pub fn cmd_apply(
    state_path: &Path,
    script_path: &Path,
    output: Option<&Path>,
    config: &TangleConfig,
) -> Result<(), TangleError> {
    let state: EditorState = serde_json::from_value(read_json(state_path)?)
        .map_err(|e| TangleError::SerializationError(format!("Invalid editor state: {}", e)))?;
    let commands: Vec<Command> = serde_json::from_value(read_json(script_path)?)
        .map_err(|e| TangleError::SerializationError(format!("Invalid command script: {}", e)))?;

    tracing::info!("Replaying {} command(s) from {:?}", commands.len(), script_path);

    let mut state = state;
    for command in commands {
        state = dispatch(&state, command)?;
    }

    if !state.is_valid {
        tracing::warn!("Final state is invalid: {}", state.err_message);
    }

    let value =
        serde_json::to_value(&state).map_err(|e| TangleError::SerializationError(e.to_string()))?;
    emit(&value, output, config)
}
