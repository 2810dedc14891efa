//! # CatVis Domain
//!
//! Core catalog, level-resolution, and navigation components for CatVis —
//! interactive string diagrams for categorical compositions.
//!
//! This crate provides the building blocks the embedded viewer is driven by:
//! - **Catalog**: immutable-per-load mapping from morphism key to definition,
//!   validated eagerly at the load boundary
//! - **Composition Engine**: iterative decomposition of the root into the
//!   morphisms visible at a target level, tolerant of partially decomposed
//!   trees
//! - **Navigation Controller**: bounded level navigation that reconciles the
//!   achieved level back into observable state
//! - **Projection Boundary**: wire types and a generation-counter gate for
//!   the external renderer/backend round-trip
//! - **Viewer Session**: the single authoritative state of one embedded
//!   viewer instance
//!
//! ## Design Principles
//!
//! 1. **Eager Validation**: a catalog entry with the wrong key set rejects
//!    the whole load; nothing downstream sees duck-typed data
//! 2. **One Authoritative State**: navigation state lives in one value,
//!    mutated only through controller operations
//! 3. **Recoverable Gaps**: a missing decomposition rolls the frontier back
//!    and surfaces a notice; it never crosses a boundary as an error
//! 4. **Last Request Wins**: projection responses are applied only when they
//!    match the latest generation, so stale renders are discarded

#![warn(missing_docs)]

mod catalog;
mod engine;
mod errors;
mod highlight;
mod navigation;
mod notices;
mod projection;
mod session;
mod sources;

pub use catalog::{Catalog, MorphismDef, MorphismKey};
pub use engine::{resolve, CompositionEngine, DecompositionGap, Resolution};
pub use errors::{DiagramError, DiagramResult};
pub use highlight::{HighlightStats, HighlightTracker};
pub use navigation::{NavigationController, NavigationOutcome, NavigationState};
pub use notices::{Notice, NoticeLog, NoticeSeverity};
pub use projection::{
    count_named_morphisms, find_element_by_id, DiagramProjection, ElementData, ElementGroup,
    ElementKind, Position, ProjectionGate, ProjectionRequest, ProjectionTicket, RenderElement,
    RenderOptions,
};
pub use session::{PendingProjection, ViewerSession};
pub use sources::{ExampleEntry, ExampleIndex, DEFAULT_EXAMPLE};
