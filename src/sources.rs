// Copyright 2025 Cowboy AI, LLC.

//! Catalog source formats
//!
//! Catalogs arrive either through the bundled example index (a mapping from
//! example id to a display name and catalog file) or as a raw user-supplied
//! JSON file. Both end up in [`Catalog::load`](crate::catalog::Catalog::load);
//! this module covers the index format and id resolution.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{DiagramError, DiagramResult};

/// Example id selected when no other choice has been made
pub const DEFAULT_EXAMPLE: &str = "default";

/// One bundled example
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ExampleEntry {
    /// Display name shown in the example picker
    pub name: String,
    /// Catalog file to fetch, relative to the bundled data directory
    pub file: String,
}

/// Index of bundled examples, keyed by example id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ExampleIndex {
    examples: IndexMap<String, ExampleEntry>,
}

impl ExampleIndex {
    /// Parse an index from raw JSON text
    pub fn load(raw: &str) -> DiagramResult<Self> {
        let index: Self = serde_json::from_str(raw)
            .map_err(|e| DiagramError::catalog(format!("invalid example index: {e}")))?;
        Ok(index)
    }

    /// Look up an example by id
    pub fn get(&self, id: &str) -> Option<&ExampleEntry> {
        self.examples.get(id)
    }

    /// Resolve an example id, failing on unknown ids
    pub fn resolve(&self, id: &str) -> DiagramResult<&ExampleEntry> {
        self.get(id)
            .ok_or_else(|| DiagramError::catalog(format!("no bundled example with id '{id}'")))
    }

    /// Iterate examples in index order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ExampleEntry)> {
        self.examples.iter()
    }

    /// Number of bundled examples
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// True if the index lists no examples
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}
