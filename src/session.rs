// Copyright 2025 Cowboy AI, LLC.

//! Viewer session facade
//!
//! One `ViewerSession` is the single authoritative state of an embedded
//! viewer instance: the loaded catalog, the navigation controller derived
//! from it, render options, the displayed diagram, and pending notices.
//!
//! Catalog replacement is atomic: either the new catalog validates and every
//! piece of derived state is recomputed together, or the load is rejected and
//! the prior catalog stays active, never a mix of the two.
//!
//! All navigation operations return a stamped [`ProjectionRequest`] for the
//! host to dispatch; the response is fed back through
//! [`ViewerSession::apply_projection`], which discards anything but the
//! latest generation.

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, MorphismKey};
use crate::errors::{DiagramError, DiagramResult};
use crate::highlight::{HighlightStats, HighlightTracker};
use crate::navigation::{NavigationController, NavigationOutcome, NavigationState};
use crate::notices::{Notice, NoticeLog};
use crate::projection::{
    count_named_morphisms, ProjectionGate, ProjectionRequest, ProjectionTicket, RenderElement,
    RenderOptions,
};
use crate::sources::{ExampleEntry, ExampleIndex};

/// A stamped projection request ready for dispatch
pub type PendingProjection = (ProjectionTicket, ProjectionRequest);

/// Authoritative state of one embedded viewer
#[derive(Debug)]
pub struct ViewerSession {
    catalog: Option<Catalog>,
    source_name: Option<String>,
    navigation: Option<NavigationController>,
    options: RenderOptions,
    gate: ProjectionGate,
    diagram: Option<Vec<RenderElement>>,
    total_morphisms: usize,
    highlight: HighlightTracker,
    notices: NoticeLog,
}

impl ViewerSession {
    /// Create a session with no catalog loaded
    pub fn new() -> Self {
        Self {
            catalog: None,
            source_name: None,
            navigation: None,
            options: RenderOptions::default(),
            gate: ProjectionGate::new(),
            diagram: None,
            total_morphisms: 0,
            highlight: HighlightTracker::new(),
            notices: NoticeLog::new(),
        }
    }

    /// Load a catalog from raw JSON, replacing any prior one atomically
    ///
    /// On any validation failure the prior catalog and all state derived from
    /// it remain active, and an error notice is recorded alongside the
    /// returned error.
    pub fn load_catalog(
        &mut self,
        raw: &str,
        source_name: impl Into<String>,
    ) -> DiagramResult<()> {
        let source_name = source_name.into();
        let catalog = match Catalog::load(raw) {
            Ok(catalog) => catalog,
            Err(err) => {
                warn!(source = %source_name, error = %err, "catalog load rejected");
                self.notices.push(Notice::error(err.to_string()));
                return Err(err);
            }
        };
        let navigation = match NavigationController::new(&catalog) {
            Ok(navigation) => navigation,
            Err(err) => {
                warn!(source = %source_name, error = %err, "catalog not navigable");
                self.notices.push(Notice::error(err.to_string()));
                return Err(err);
            }
        };

        info!(
            source = %source_name,
            entries = catalog.len(),
            max_level = navigation.state().max_level,
            "catalog loaded"
        );
        self.catalog = Some(catalog);
        self.source_name = Some(source_name);
        self.navigation = Some(navigation);
        self.diagram = None;
        self.total_morphisms = 0;
        self.highlight = HighlightTracker::new();
        Ok(())
    }

    /// Resolve a bundled example id to its entry
    ///
    /// The host fetches the entry's file and feeds the contents back through
    /// [`ViewerSession::load_catalog`].
    pub fn resolve_example<'a>(
        &self,
        index: &'a ExampleIndex,
        id: &str,
    ) -> DiagramResult<&'a ExampleEntry> {
        index.resolve(id)
    }

    /// Name of the active catalog's source, if one is loaded
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Navigation state, if a catalog is loaded
    pub fn navigation_state(&self) -> Option<&NavigationState> {
        self.navigation.as_ref().map(NavigationController::state)
    }

    /// Currently displayed composition
    pub fn composition(&self) -> &[MorphismKey] {
        self.navigation
            .as_ref()
            .map(NavigationController::composition)
            .unwrap_or_default()
    }

    /// Active render options
    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Elements of the last applied projection, if any
    pub fn diagram(&self) -> Option<&[RenderElement]> {
        self.diagram.as_deref()
    }

    /// Number of named morphisms in the displayed diagram
    pub fn total_morphisms(&self) -> usize {
        self.total_morphisms
    }

    /// Notices accumulated since the last drain
    pub fn pending_notices(&self) -> &[Notice] {
        self.notices.pending()
    }

    /// Take all accumulated notices
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    /// Stamp a projection request for the current composition
    pub fn request_render(&mut self) -> DiagramResult<PendingProjection> {
        let catalog = self
            .catalog
            .as_ref()
            .ok_or_else(|| DiagramError::catalog("no catalog loaded"))?;
        let navigation = self
            .navigation
            .as_ref()
            .ok_or_else(|| DiagramError::catalog("no catalog loaded"))?;
        let request = ProjectionRequest::new(
            catalog.clone(),
            navigation.composition().to_vec(),
            self.options,
        );
        Ok((self.gate.begin(), request))
    }

    /// Move one level deeper and stamp the resulting render request
    pub fn increment(&mut self) -> DiagramResult<PendingProjection> {
        let (catalog, navigation) = self.parts_mut()?;
        let outcome = navigation.increment(catalog);
        self.finish_navigation(outcome)
    }

    /// Move one level up and stamp the resulting render request
    pub fn decrement(&mut self) -> DiagramResult<PendingProjection> {
        let (catalog, navigation) = self.parts_mut()?;
        let outcome = navigation.decrement(catalog);
        self.finish_navigation(outcome)
    }

    /// Jump back to level 0 and stamp the resulting render request
    pub fn jump_to_root(&mut self) -> DiagramResult<PendingProjection> {
        let (catalog, navigation) = self.parts_mut()?;
        let outcome = navigation.jump_to_root(catalog);
        self.finish_navigation(outcome)
    }

    /// Handle a tap on the node labeled `label`
    pub fn select_node(&mut self, label: &str) -> DiagramResult<PendingProjection> {
        let (catalog, navigation) = self.parts_mut()?;
        let outcome = navigation.select_node(catalog, label)?;
        self.finish_navigation(outcome)
    }

    /// Change the diagram scale, re-rendering if a composition is displayed
    pub fn set_scale(&mut self, scale: i64) -> DiagramResult<Option<PendingProjection>> {
        self.options.scale = scale;
        self.rerender_if_loaded()
    }

    /// Toggle identity string labels, re-rendering if a composition is displayed
    pub fn set_labels(&mut self, labels: bool) -> DiagramResult<Option<PendingProjection>> {
        self.options.labels = labels;
        self.rerender_if_loaded()
    }

    /// Toggle per-object coloring, re-rendering if a composition is displayed
    pub fn set_color(&mut self, color: bool) -> DiagramResult<Option<PendingProjection>> {
        self.options.color = color;
        self.rerender_if_loaded()
    }

    /// Apply a projection response
    ///
    /// Returns false when the ticket has been superseded by a newer request;
    /// the response is discarded without touching any state. A failed
    /// projection clears the displayed diagram and records a notice, leaving
    /// navigation state unchanged so the user can simply navigate again.
    pub fn apply_projection(
        &mut self,
        ticket: ProjectionTicket,
        result: DiagramResult<Vec<RenderElement>>,
    ) -> bool {
        if !self.gate.is_current(ticket) {
            debug!(?ticket, "stale projection response discarded");
            return false;
        }
        match result {
            Ok(elements) => {
                self.total_morphisms = count_named_morphisms(&elements);
                debug!(
                    elements = elements.len(),
                    named = self.total_morphisms,
                    "projection applied"
                );
                self.diagram = Some(elements);
            }
            Err(err) => {
                warn!(error = %err, "projection failed, clearing diagram");
                self.diagram = None;
                self.total_morphisms = 0;
                self.notices.push(Notice::error(err.to_string()));
            }
        }
        true
    }

    /// Hover entered an identity node reaching `highlighted` named morphisms
    pub fn hover_enter(&mut self, highlighted: usize) -> HighlightStats {
        self.highlight.enter(highlighted, self.total_morphisms)
    }

    /// Hover left the identity node
    pub fn hover_leave(&mut self) -> HighlightStats {
        self.highlight.leave()
    }

    /// Current highlight statistics
    pub fn highlight_stats(&self) -> HighlightStats {
        self.highlight.stats()
    }

    fn rerender_if_loaded(&mut self) -> DiagramResult<Option<PendingProjection>> {
        if self.catalog.is_none() {
            return Ok(None);
        }
        self.request_render().map(Some)
    }

    fn parts_mut(&mut self) -> DiagramResult<(&Catalog, &mut NavigationController)> {
        let catalog = self
            .catalog
            .as_ref()
            .ok_or_else(|| DiagramError::catalog("no catalog loaded"))?;
        let navigation = self
            .navigation
            .as_mut()
            .ok_or_else(|| DiagramError::catalog("no catalog loaded"))?;
        Ok((catalog, navigation))
    }

    fn finish_navigation(&mut self, outcome: NavigationOutcome) -> DiagramResult<PendingProjection> {
        if let Some(gap) = &outcome.gap {
            self.notices.push(Notice::warning(format!(
                "not all morphisms below '{}' have a decomposition; showing level {}",
                gap.key, gap.achieved_level
            )));
        }
        let catalog = self
            .catalog
            .as_ref()
            .ok_or_else(|| DiagramError::catalog("no catalog loaded"))?;
        let request = ProjectionRequest::new(catalog.clone(), outcome.composition, self.options);
        Ok((self.gate.begin(), request))
    }
}

impl Default for ViewerSession {
    fn default() -> Self {
        Self::new()
    }
}
