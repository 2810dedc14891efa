// Copyright 2025 Cowboy AI, LLC.

//! Error types for catalog loading, navigation, and projection

use thiserror::Error;

/// Errors that can occur while loading catalogs or driving the viewer
#[derive(Debug, Clone, Error)]
pub enum DiagramError {
    /// A catalog entry failed key-set validation; the whole load is rejected
    #[error("Schema violation in entry '{key}': {reason}")]
    Schema {
        /// Key of the first offending catalog entry
        key: String,
        /// What was wrong with the entry
        reason: String,
    },

    /// Catalog is structurally unusable (empty, no root, ambiguous root)
    #[error("Invalid catalog: {0}")]
    Catalog(String),

    /// A morphism key was looked up but is not present in the catalog
    #[error("Morphism not found: {0}")]
    MorphismNotFound(String),

    /// The external renderer/backend failed to build a diagram
    #[error("Projection failed: {message}")]
    Projection {
        /// Error message reported by the renderer
        message: String,
    },

    /// The external renderer/backend could not be reached
    #[error("Projection service unavailable: {message}")]
    Transport {
        /// Description of the transport failure
        message: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type for viewer operations
pub type DiagramResult<T> = Result<T, DiagramError>;

impl From<serde_json::Error> for DiagramError {
    fn from(err: serde_json::Error) -> Self {
        DiagramError::SerializationError(err.to_string())
    }
}

impl DiagramError {
    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        DiagramError::Catalog(msg.into())
    }

    /// True for conditions that block all navigation until a valid catalog loads
    pub fn blocks_navigation(&self) -> bool {
        matches!(self, DiagramError::Schema { .. } | DiagramError::Catalog(_))
    }
}
