// Copyright 2025 Cowboy AI, LLC.

//! Level composition engine
//!
//! Given a catalog, a root key, and a target level, the engine computes the
//! ordered set of morphism keys visible at that level by iteratively
//! substituting each key in the working frontier with its decomposition.
//!
//! Partially decomposed trees are a normal condition, not a failure: when any
//! key in the frontier lacks a usable decomposition, the step is abandoned,
//! the last complete frontier is kept, and the achieved level is reported
//! short of the requested one together with a [`DecompositionGap`]
//! diagnostic. Resolution therefore never fails and never returns an empty
//! composition for a non-empty catalog.

use lru::LruCache;
use std::fmt;
use std::num::NonZeroUsize;
use tracing::{debug, warn};

use crate::catalog::{Catalog, MorphismKey};

/// Resolutions kept per engine before least-recently-used eviction
const RESOLUTION_CACHE_SIZE: usize = 64;

/// Recoverable diagnostic: a frontier key had no usable decomposition
///
/// Carried inside [`Resolution`] rather than raised as an error; the caller
/// surfaces it as a non-blocking notice and keeps displaying the composition
/// of the achieved level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompositionGap {
    /// First frontier key that could not be expanded
    pub key: MorphismKey,
    /// Level the caller asked for
    pub requested_level: u32,
    /// Level actually reached before the gap
    pub achieved_level: u32,
}

/// Outcome of resolving a target level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Number of fully completed expansion steps
    pub achieved_level: u32,
    /// Ordered morphism keys visible at the achieved level
    pub composition: Vec<MorphismKey>,
    /// Present when the requested level could not be reached
    pub gap: Option<DecompositionGap>,
}

impl Resolution {
    /// True if the requested level was reached exactly
    pub fn is_exact(&self) -> bool {
        self.gap.is_none()
    }
}

/// Resolve the composition visible at `target_level` below `root_key`
///
/// Level 0 is the terminal case: the composition is the root itself and the
/// resolution is always exact. For deeper levels the frontier starts at the
/// root's own decomposition (the level-1 expansion) and each further step
/// substitutes every frontier key with its `compose` list, flattened in
/// order. The previous frontier is the rollback point for each step.
pub fn resolve(catalog: &Catalog, root_key: &MorphismKey, target_level: u32) -> Resolution {
    if target_level == 0 {
        return Resolution {
            achieved_level: 0,
            composition: vec![root_key.clone()],
            gap: None,
        };
    }

    let mut frontier = match catalog.get(root_key) {
        Some(def) if !def.is_leaf() => def.compose.clone(),
        _ => {
            // The root itself cannot be expanded; stay at level 0.
            warn!(
                key = %root_key,
                requested_level = target_level,
                "root has no decomposition, staying at level 0"
            );
            return Resolution {
                achieved_level: 0,
                composition: vec![root_key.clone()],
                gap: Some(DecompositionGap {
                    key: root_key.clone(),
                    requested_level: target_level,
                    achieved_level: 0,
                }),
            };
        }
    };

    let mut achieved_level = 1;
    let mut gap = None;

    for lvl in 1..target_level {
        match expand_frontier(catalog, &frontier) {
            Ok(next) => {
                debug!(lvl, frontier_len = next.len(), "expansion step complete");
                frontier = next;
                achieved_level = lvl + 1;
            }
            Err(key) => {
                // Keep the last complete frontier and stop iterating.
                warn!(
                    key = %key,
                    achieved_level,
                    requested_level = target_level,
                    "frontier key has no decomposition, keeping last complete frontier"
                );
                gap = Some(DecompositionGap {
                    key,
                    requested_level: target_level,
                    achieved_level,
                });
                break;
            }
        }
    }

    Resolution {
        achieved_level,
        composition: frontier,
        gap,
    }
}

/// Replace every frontier key with its decomposition, flattened in order
///
/// Fails with the first key whose catalog entry is absent or whose `compose`
/// is empty; the caller's frontier is untouched in that case.
fn expand_frontier(
    catalog: &Catalog,
    frontier: &[MorphismKey],
) -> Result<Vec<MorphismKey>, MorphismKey> {
    let mut next = Vec::with_capacity(frontier.len() * 2);
    for key in frontier {
        let def = catalog.get(key).ok_or_else(|| key.clone())?;
        if def.is_leaf() {
            return Err(key.clone());
        }
        next.extend(def.compose.iter().cloned());
    }
    Ok(next)
}

/// Memoizing wrapper around [`resolve`]
///
/// Caches resolutions per `(root, target level)`. The catalog is immutable
/// for the lifetime of the engine, so cached and freshly computed resolutions
/// are indistinguishable; the owning session drops the engine together with
/// the catalog it was built for.
pub struct CompositionEngine {
    cache: LruCache<(MorphismKey, u32), Resolution>,
}

impl fmt::Debug for CompositionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositionEngine")
            .field("cached", &self.cache.len())
            .finish()
    }
}

impl CompositionEngine {
    /// Create an engine with the default cache capacity
    pub fn new() -> Self {
        Self {
            cache: LruCache::new(NonZeroUsize::new(RESOLUTION_CACHE_SIZE).unwrap()),
        }
    }

    /// Resolve a target level, serving repeated requests from the cache
    pub fn resolve(
        &mut self,
        catalog: &Catalog,
        root_key: &MorphismKey,
        target_level: u32,
    ) -> Resolution {
        let cache_key = (root_key.clone(), target_level);
        if let Some(hit) = self.cache.get(&cache_key) {
            debug!(root = %root_key, target_level, "resolution served from cache");
            return hit.clone();
        }
        let resolution = resolve(catalog, root_key, target_level);
        self.cache.put(cache_key, resolution.clone());
        resolution
    }

    /// Drop all cached resolutions
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl Default for CompositionEngine {
    fn default() -> Self {
        Self::new()
    }
}
