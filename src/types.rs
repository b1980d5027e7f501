//! Common types used throughout Solidafy Transfer
//!
//! This module contains shared type definitions and type aliases used
//! across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Direction
// ============================================================================

/// Side of a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Source store, records are extracted from it
    From,
    /// Destination store, records are written to it
    To,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::From => write!(f, "from"),
            Direction::To => write!(f, "to"),
        }
    }
}
