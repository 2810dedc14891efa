// Copyright 2025 Cowboy AI, LLC.

//! Diagram projection boundary
//!
//! The core never renders anything itself: it hands a [`ProjectionRequest`]
//! to an external renderer/backend and consumes the element list that comes
//! back. Requests are stamped with a generation ticket; the response for a
//! superseded ticket is discarded so a slow projection can never flash the
//! display back to an outdated composition.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::{Catalog, MorphismKey};
use crate::errors::DiagramResult;

/// Render options controlled by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RenderOptions {
    /// Diagram scale as an integer percentage
    pub scale: i64,
    /// Whether identity strings carry labels
    pub labels: bool,
    /// Whether identity strings are colored per object
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 100,
            labels: false,
            color: false,
        }
    }
}

/// Request to the external renderer/backend
///
/// Field names are the wire contract: the backend expects exactly
/// `morphisms`, `compose`, `scale`, `labels`, and `color`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectionRequest {
    /// Snapshot of the loaded catalog
    pub morphisms: Catalog,
    /// Ordered composition to lay out
    pub compose: Vec<MorphismKey>,
    /// Diagram scale as an integer percentage
    pub scale: i64,
    /// Whether identity strings carry labels
    pub labels: bool,
    /// Whether identity strings are colored per object
    pub color: bool,
}

impl ProjectionRequest {
    /// Assemble a request from a catalog snapshot, composition, and options
    pub fn new(morphisms: Catalog, compose: Vec<MorphismKey>, options: RenderOptions) -> Self {
        Self {
            morphisms,
            compose,
            scale: options.scale,
            labels: options.labels,
            color: options.color,
        }
    }
}

/// Discriminator for rendered morphism nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ElementKind {
    /// A named (boxed) morphism node
    NamedMorphism,
    /// An identity string node
    IdentityMorphism,
}

/// Element group within the rendered graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ElementGroup {
    /// Node elements
    Nodes,
    /// Edge elements
    Edges,
}

/// Payload of a rendered element
///
/// Nodes carry a `type` discriminator and a display label; edges carry
/// source/target fields instead. Everything style-related the renderer
/// attaches beyond that is kept verbatim in `rest` and passed through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ElementData {
    /// Element identifier, unique within one projection
    pub id: String,
    /// Morphism node kind; absent on edges
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ElementKind>,
    /// Display label, if the renderer assigned one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Remaining renderer-specific fields, passed through untouched
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Position of a node element on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

/// One element of a projected diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RenderElement {
    /// Element payload
    pub data: ElementData,
    /// Canvas position; absent on edges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Whether this element is a node or an edge
    pub group: ElementGroup,
}

impl RenderElement {
    /// True if this element is a named morphism node
    pub fn is_named_morphism(&self) -> bool {
        self.data.kind == Some(ElementKind::NamedMorphism)
    }
}

/// Count the named morphism nodes in a projected diagram
///
/// This is the denominator for hover highlight statistics.
pub fn count_named_morphisms(elements: &[RenderElement]) -> usize {
    elements.iter().filter(|e| e.is_named_morphism()).count()
}

/// Find an element by its renderer-assigned id
pub fn find_element_by_id<'a>(
    elements: &'a [RenderElement],
    id: &str,
) -> Option<&'a RenderElement> {
    elements.iter().find(|e| e.data.id == id)
}

/// External renderer/backend boundary
///
/// Implementations convert a composition into renderable elements. A failed
/// projection is an `Err`; the session clears the displayed diagram and
/// surfaces a notice without touching navigation state.
#[async_trait]
pub trait DiagramProjection: Send + Sync {
    /// Build the diagram elements for a request
    async fn project(&self, request: &ProjectionRequest) -> DiagramResult<Vec<RenderElement>>;
}

/// Ticket identifying one outstanding projection request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectionTicket(u64);

/// Last-request-wins gate for projection responses
///
/// A single monotonically increasing generation counter; only the response
/// carrying the ticket of the most recent `begin` is applied. This is the
/// discipline that substitutes for locking in the single-threaded viewer.
#[derive(Debug, Default)]
pub struct ProjectionGate {
    generation: u64,
}

impl ProjectionGate {
    /// Create a gate with no outstanding requests
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request generation, superseding all outstanding ones
    pub fn begin(&mut self) -> ProjectionTicket {
        self.generation += 1;
        ProjectionTicket(self.generation)
    }

    /// Whether a ticket still corresponds to the latest request
    pub fn is_current(&self, ticket: ProjectionTicket) -> bool {
        ticket.0 == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_catalog() -> Catalog {
        Catalog::from_value(json!({
            "A": {"name": "f", "input": "x", "output": "y", "compose": [], "level": 0}
        }))
        .unwrap()
    }

    #[test]
    fn request_serializes_with_wire_field_names() {
        let request = ProjectionRequest::new(
            sample_catalog(),
            vec![MorphismKey::new("A")],
            RenderOptions {
                scale: 150,
                labels: true,
                color: false,
            },
        );
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["compose"], json!(["A"]));
        assert_eq!(value["scale"], json!(150));
        assert_eq!(value["labels"], json!(true));
        assert_eq!(value["color"], json!(false));
        assert_eq!(value["morphisms"]["A"]["name"], json!("f"));
    }

    #[test]
    fn elements_deserialize_from_renderer_output() {
        let raw = json!([
            {
                "data": {
                    "id": "n0",
                    "type": "NamedMorphism",
                    "label": "f",
                    "name": "f",
                    "shape": "round-rectangle",
                    "color": "#dcdcdc"
                },
                "position": {"x": 0.5, "y": 1.0},
                "group": "nodes"
            },
            {
                "data": {
                    "id": "e0",
                    "label": "x",
                    "source": "n0",
                    "target": "n1"
                },
                "group": "edges"
            }
        ]);
        let elements: Vec<RenderElement> = serde_json::from_value(raw).unwrap();
        assert_eq!(elements.len(), 2);
        assert!(elements[0].is_named_morphism());
        assert_eq!(elements[0].data.rest["shape"], json!("round-rectangle"));
        assert_eq!(elements[1].data.kind, None);
        assert_eq!(elements[1].group, ElementGroup::Edges);
        assert_eq!(elements[1].data.rest["source"], json!("n0"));
    }

    #[test]
    fn count_named_morphisms_ignores_identities_and_edges() {
        let raw = json!([
            {"data": {"id": "n0", "type": "NamedMorphism"}, "group": "nodes"},
            {"data": {"id": "n1", "type": "IdentityMorphism"}, "group": "nodes"},
            {"data": {"id": "e0"}, "group": "edges"}
        ]);
        let elements: Vec<RenderElement> = serde_json::from_value(raw).unwrap();
        assert_eq!(count_named_morphisms(&elements), 1);
        assert!(find_element_by_id(&elements, "n1").is_some());
        assert!(find_element_by_id(&elements, "zz").is_none());
    }

    #[test]
    fn gate_applies_only_the_latest_ticket() {
        let mut gate = ProjectionGate::new();
        let first = gate.begin();
        let second = gate.begin();
        assert!(!gate.is_current(first));
        assert!(gate.is_current(second));

        let third = gate.begin();
        assert!(!gate.is_current(second));
        assert!(gate.is_current(third));
    }
}
