//! # CLI Configuration
//!
//! Optional TOML configuration for the binary. The core takes no
//! configuration at all; these knobs only shape what the CLI emits.

use serde::Deserialize;
use std::path::Path;
use tangle_core::TangleError;
use tangle_core::constants::DEFAULT_PREDICATE;

/// Settings read from `--config <file>`, all optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TangleConfig {
    /// Predicate placed on the default template's starter edge.
    pub default_predicate: String,

    /// Pretty-print emitted JSON.
    pub pretty: bool,
}

impl Default for TangleConfig {
    fn default() -> Self {
        Self {
            default_predicate: DEFAULT_PREDICATE.to_string(),
            pretty: true,
        }
    }
}

/// Load configuration, falling back to defaults when no file is given.
pub fn load(path: Option<&Path>) -> Result<TangleConfig, TangleError> {
    let Some(path) = path else {
        return Ok(TangleConfig::default());
    };

    let contents = std::fs::read_to_string(path)
        .map_err(|e| TangleError::IoError(format!("Cannot read config {:?}: {}", path, e)))?;

    toml::from_str(&contents)
        .map_err(|e| TangleError::SerializationError(format!("Invalid config: {}", e)))
}

// =============================================================================
// TESTS
// =============================================================================
