// Copyright 2025 Cowboy AI, LLC.

//! Navigation state machine over decomposition levels
//!
//! The controller owns the single authoritative [`NavigationState`] and the
//! currently displayed composition. Every transition goes through the
//! composition engine and assigns the *achieved* level back into state, so a
//! request that runs into a partially decomposed tree settles on the deepest
//! level that could actually be shown. Engine gaps are carried in the
//! returned outcome, never raised as errors.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Catalog, MorphismKey};
use crate::engine::{CompositionEngine, DecompositionGap};
use crate::errors::{DiagramError, DiagramResult};

/// Observable navigation state
///
/// Invariant: `0 <= current_level <= max_level`. `max_level` and `root_key`
/// are fixed per catalog load; only `current_level` moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NavigationState {
    /// Level currently displayed
    pub current_level: u32,
    /// Maximum level present in the catalog
    pub max_level: u32,
    /// Root morphism of the loaded catalog
    pub root_key: MorphismKey,
}

/// Result of a navigation operation
///
/// Always carries the composition to (re-)render, even when the operation
/// did not move: a click on a leaf re-emits the current composition so the
/// diagram is never left stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationOutcome {
    /// Level reached by the operation
    pub level: u32,
    /// Composition to display at that level
    pub composition: Vec<MorphismKey>,
    /// Diagnostic when the requested level could not be reached
    pub gap: Option<DecompositionGap>,
}

/// Bounded level navigation over a loaded catalog
///
/// The catalog is passed explicitly into every operation rather than stored,
/// keeping the controller free of any ambient state beyond its own
/// [`NavigationState`] and memoized resolutions.
#[derive(Debug)]
pub struct NavigationController {
    state: NavigationState,
    engine: CompositionEngine,
    composition: Vec<MorphismKey>,
}

impl NavigationController {
    /// Create a controller positioned at level 0 of the catalog's root
    ///
    /// Fails with a catalog error when the catalog is empty or its root is
    /// missing or ambiguous; such a catalog cannot be navigated at all.
    pub fn new(catalog: &Catalog) -> DiagramResult<Self> {
        let root_key = catalog.root_key()?.clone();
        let max_level = catalog.max_level()?;
        let composition = vec![root_key.clone()];
        Ok(Self {
            state: NavigationState {
                current_level: 0,
                max_level,
                root_key,
            },
            engine: CompositionEngine::new(),
            composition,
        })
    }

    /// Current navigation state
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Composition currently displayed
    pub fn composition(&self) -> &[MorphismKey] {
        &self.composition
    }

    /// Move one level deeper, clamped at the catalog's maximum level
    pub fn increment(&mut self, catalog: &Catalog) -> NavigationOutcome {
        let current = self.state.current_level;
        let desired = if current == self.state.max_level {
            current
        } else {
            current + 1
        };
        self.goto(catalog, desired)
    }

    /// Move one level up, clamped at level 0
    pub fn decrement(&mut self, catalog: &Catalog) -> NavigationOutcome {
        let current = self.state.current_level;
        let desired = if current == 0 { 0 } else { current - 1 };
        self.goto(catalog, desired)
    }

    /// Jump straight back to level 0
    ///
    /// Level 0 always resolves exactly, so this is the cheap path out of any
    /// partially decomposed region.
    pub fn jump_to_root(&mut self, catalog: &Catalog) -> NavigationOutcome {
        self.goto(catalog, 0)
    }

    /// Handle a tap on the rendered node labeled `label`
    ///
    /// A leaf at the maximum level cannot be descended into: the level is
    /// pinned there and the current composition is re-emitted. A node with a
    /// decomposition scopes the display to exactly that decomposition one
    /// level deeper. A node with no decomposition at all does not advance;
    /// the current composition is re-emitted for re-rendering.
    pub fn select_node(
        &mut self,
        catalog: &Catalog,
        label: &str,
    ) -> DiagramResult<NavigationOutcome> {
        let (key, def) = catalog
            .find_by_name(label)
            .ok_or_else(|| DiagramError::MorphismNotFound(label.to_string()))?;

        if def.level == self.state.max_level {
            debug!(key = %key, level = def.level, "selected node is at max level");
            self.state.current_level = def.level;
            return Ok(self.reemit());
        }

        if def.is_leaf() {
            debug!(key = %key, level = def.level, "selected node has no decomposition");
            return Ok(self.reemit());
        }

        self.state.current_level = def.level + 1;
        self.composition = def.compose.clone();
        debug!(
            key = %key,
            level = self.state.current_level,
            "descended into selected node"
        );
        Ok(NavigationOutcome {
            level: self.state.current_level,
            composition: self.composition.clone(),
            gap: None,
        })
    }

    fn goto(&mut self, catalog: &Catalog, desired: u32) -> NavigationOutcome {
        let resolution = self.engine.resolve(catalog, &self.state.root_key, desired);
        debug!(
            desired,
            achieved = resolution.achieved_level,
            "navigation resolved"
        );
        self.state.current_level = resolution.achieved_level;
        self.composition = resolution.composition.clone();
        NavigationOutcome {
            level: resolution.achieved_level,
            composition: resolution.composition,
            gap: resolution.gap,
        }
    }

    fn reemit(&self) -> NavigationOutcome {
        NavigationOutcome {
            level: self.state.current_level,
            composition: self.composition.clone(),
            gap: None,
        }
    }
}
