// Copyright 2025 Cowboy AI, LLC.

//! Morphism catalog and load-boundary validation
//!
//! A catalog is the immutable-per-load mapping from morphism key to its
//! definition. Every entry is validated eagerly when the catalog is loaded:
//! the key set of each entry must be exactly `{name, input, output, compose,
//! level}`. A single malformed entry rejects the whole catalog so that
//! nothing downstream ever sees a partially valid mapping.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::errors::{DiagramError, DiagramResult};

/// The exact field set every catalog entry must carry, sorted
const VALID_SCHEMA: [&str; 5] = ["compose", "input", "level", "name", "output"];

/// Key identifying a morphism within a catalog
///
/// Keys are opaque strings, unique per catalog. They are only meaningful
/// relative to the catalog that defined them; replacing the catalog
/// invalidates every previously issued key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct MorphismKey(String);

impl MorphismKey {
    /// Create a key from anything string-like
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the underlying string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MorphismKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MorphismKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for MorphismKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Definition of a single morphism
///
/// `level` is the depth of the morphism in the decomposition tree; the unique
/// entry with `level == 0` is the root. `compose` lists the keys of the
/// morphisms one level deeper that together realize this morphism, and is
/// empty iff the morphism is irreducible at authoring time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct MorphismDef {
    /// Human-readable name, also the rendered node label
    pub name: String,
    /// Input (domain) object
    pub input: String,
    /// Output (codomain) object
    pub output: String,
    /// Decomposition into morphisms one level deeper, possibly empty
    pub compose: Vec<MorphismKey>,
    /// Depth of this morphism in the decomposition tree
    pub level: u32,
}

impl MorphismDef {
    /// True if this morphism has no authored decomposition
    pub fn is_leaf(&self) -> bool {
        self.compose.is_empty()
    }
}

/// Immutable-per-load mapping from morphism key to definition
///
/// Entries keep their load order (`IndexMap`), so projections over the same
/// catalog are deterministic. A `Catalog` is never mutated after load; the
/// session replaces it wholesale and recomputes all derived state together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Catalog {
    morphisms: IndexMap<MorphismKey, MorphismDef>,
}

impl Catalog {
    /// Load and validate a catalog from raw JSON text
    pub fn load(raw: &str) -> DiagramResult<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| DiagramError::catalog(format!("not valid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Load and validate a catalog from an already parsed JSON value
    pub fn from_value(value: Value) -> DiagramResult<Self> {
        let Value::Object(entries) = value else {
            return Err(DiagramError::catalog(
                "catalog must be a JSON object keyed by morphism key",
            ));
        };

        let mut morphisms = IndexMap::with_capacity(entries.len());
        for (key, entry) in entries {
            let Value::Object(fields) = &entry else {
                return Err(DiagramError::Schema {
                    key,
                    reason: "entry must be a JSON object".to_string(),
                });
            };

            let mut entry_keys: Vec<&str> = fields.keys().map(String::as_str).collect();
            entry_keys.sort_unstable();
            if entry_keys != VALID_SCHEMA {
                return Err(DiagramError::Schema {
                    key,
                    reason: format!(
                        "entry keys must be exactly {VALID_SCHEMA:?}, found {entry_keys:?}"
                    ),
                });
            }

            let def: MorphismDef = serde_json::from_value(entry).map_err(|e| {
                DiagramError::Schema {
                    key: key.clone(),
                    reason: e.to_string(),
                }
            })?;
            morphisms.insert(MorphismKey::new(key), def);
        }

        Ok(Self { morphisms })
    }

    /// Look up a morphism definition
    pub fn get(&self, key: &MorphismKey) -> Option<&MorphismDef> {
        self.morphisms.get(key)
    }

    /// Check whether a key is present
    pub fn contains(&self, key: &MorphismKey) -> bool {
        self.morphisms.contains_key(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.morphisms.len()
    }

    /// True if the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.morphisms.is_empty()
    }

    /// Iterate entries in load order
    pub fn iter(&self) -> impl Iterator<Item = (&MorphismKey, &MorphismDef)> {
        self.morphisms.iter()
    }

    /// Find the entry whose rendered name matches `name`
    ///
    /// Used to resolve a clicked node label back to its catalog entry. If
    /// several entries share a name the first in load order wins, matching
    /// how labels resolve in the rendered diagram.
    pub fn find_by_name(&self, name: &str) -> Option<(&MorphismKey, &MorphismDef)> {
        self.morphisms.iter().find(|(_, def)| def.name == name)
    }

    /// The unique root key, i.e. the entry with `level == 0`
    ///
    /// Zero or multiple roots make the catalog unusable for navigation and
    /// are rejected outright rather than silently picking a first match.
    pub fn root_key(&self) -> DiagramResult<&MorphismKey> {
        let mut roots = self
            .morphisms
            .iter()
            .filter(|(_, def)| def.level == 0)
            .map(|(key, _)| key);

        let root = roots
            .next()
            .ok_or_else(|| DiagramError::catalog("no morphism with level 0"))?;
        if let Some(other) = roots.next() {
            return Err(DiagramError::catalog(format!(
                "multiple morphisms with level 0: '{root}' and '{other}'"
            )));
        }
        Ok(root)
    }

    /// Maximum nesting depth across all entries
    pub fn max_level(&self) -> DiagramResult<u32> {
        self.morphisms
            .values()
            .map(|def| def.level)
            .max()
            .ok_or_else(|| DiagramError::catalog("cannot navigate an empty catalog"))
    }

    /// All keys at a given level, in load order
    pub fn keys_at_level(&self, level: u32) -> Vec<&MorphismKey> {
        self.morphisms
            .iter()
            .filter(|(_, def)| def.level == level)
            .map(|(key, _)| key)
            .collect()
    }
}
