// Copyright 2025 Cowboy AI, LLC.

//! Hover highlight statistics
//!
//! Dragging over an identity string highlights it together with everything
//! downstream of it. The viewer reports what share of the diagram's named
//! morphisms the highlight reaches. Purely presentational; no navigation
//! state is touched.

use serde::{Deserialize, Serialize};

/// Share of named morphisms reached by the active highlight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightStats {
    /// Number of highlighted named morphisms
    pub number_effected: usize,
    /// `number_effected / total` as a rounded percentage
    pub percent_effected: u32,
}

impl HighlightStats {
    /// Compute statistics for `highlighted` out of `total` named morphisms
    pub fn compute(highlighted: usize, total: usize) -> Self {
        let percent_effected = if total == 0 {
            0
        } else {
            ((highlighted as f64 / total as f64) * 100.0).round() as u32
        };
        Self {
            number_effected: highlighted,
            percent_effected,
        }
    }

    /// Statistics with no active highlight
    pub fn cleared() -> Self {
        Self::default()
    }
}

/// Tracks whether a hover highlight is active and its current statistics
#[derive(Debug, Default)]
pub struct HighlightTracker {
    active: bool,
    stats: HighlightStats,
}

impl HighlightTracker {
    /// Create a tracker with no active highlight
    pub fn new() -> Self {
        Self::default()
    }

    /// Hover entered an identity node; record the reached highlight set
    pub fn enter(&mut self, highlighted: usize, total: usize) -> HighlightStats {
        self.active = true;
        self.stats = HighlightStats::compute(highlighted, total);
        self.stats
    }

    /// Hover left; statistics drop back to zero
    pub fn leave(&mut self) -> HighlightStats {
        self.active = false;
        self.stats = HighlightStats::cleared();
        self.stats
    }

    /// Whether a highlight is currently active
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current statistics
    pub fn stats(&self) -> HighlightStats {
        self.stats
    }
}
