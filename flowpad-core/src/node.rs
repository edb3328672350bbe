//! Diagram nodes - the labeled shapes placed on the canvas.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Bounds, Point};
use crate::{DiagramError, DiagramResult};

/// Text given to freshly created nodes.
pub const DEFAULT_TEXT: &str = "Node";

/// Fill given to freshly created nodes.
pub const DEFAULT_FILL: &str = "#FFFFFF";

/// Unique identifier for a node.
///
/// Identifiers double as Mermaid node names in the exported markup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    /// Create from an existing identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier of the `n`-th node created in a diagram (one-based).
    ///
    /// The first 26 nodes are named `A` through `Z`; after that the name is
    /// `N` followed by the creation number, so the 27th node is `N27`.
    #[must_use]
    pub fn from_sequence(n: usize) -> Self {
        match n {
            1..=26 => {
                let offset = u8::try_from(n - 1).unwrap_or_default();
                Self(char::from(b'A' + offset).to_string())
            }
            _ => Self(format!("N{n}")),
        }
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The outline drawn for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Process box, exported as `id[text]`.
    Rectangle,
    /// Decision, exported as `id{text}`.
    Diamond,
}

impl ShapeKind {
    /// Fixed `(width, height)` of nodes with this shape.
    #[must_use]
    pub const fn dimensions(self) -> (f32, f32) {
        match self {
            Self::Rectangle => (100.0, 50.0),
            Self::Diamond => (100.0, 60.0),
        }
    }

    /// Lowercase name of the shape.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Diamond => "diamond",
        }
    }
}

impl FromStr for ShapeKind {
    type Err = DiagramError;

    fn from_str(s: &str) -> DiagramResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangle" => Ok(Self::Rectangle),
            "diamond" => Ok(Self::Diamond),
            _ => Err(DiagramError::InvalidShape(s.to_string())),
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A labeled shape on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    shape: ShapeKind,
    /// Top-left corner in canvas coordinates.
    position: Point,
    text: String,
    fill: String,
    /// Rendering hint: emphasised outline while this node is a connection source.
    highlighted: bool,
}

impl Node {
    /// Create a node. Dimensions follow from the shape.
    #[must_use]
    pub fn new(
        id: NodeId,
        x: f32,
        y: f32,
        text: impl Into<String>,
        shape: ShapeKind,
        fill: impl Into<String>,
    ) -> Self {
        Self {
            id,
            shape,
            position: Point::new(x, y),
            text: text.into(),
            fill: fill.into(),
            highlighted: false,
        }
    }

    /// Create a node from a shape name such as `"rectangle"` or `"diamond"`.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::InvalidShape`] if the name is not recognised.
    pub fn create(
        id: NodeId,
        x: f32,
        y: f32,
        text: impl Into<String>,
        shape: &str,
        fill: impl Into<String>,
    ) -> DiagramResult<Self> {
        let shape = shape.parse()?;
        Ok(Self::new(id, x, y, text, shape, fill))
    }

    /// Node identifier.
    #[must_use]
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Node shape.
    #[must_use]
    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    /// Top-left position.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Label text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Fill color as given by the user.
    #[must_use]
    pub fn fill(&self) -> &str {
        &self.fill
    }

    /// Whether the node is currently emphasised.
    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Bounding box at the current position.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let (width, height) = self.shape.dimensions();
        Bounds {
            x: self.position.x,
            y: self.position.y,
            width,
            height,
        }
    }

    /// Outline polygon at the current position.
    #[must_use]
    pub fn outline(&self) -> [Point; 4] {
        geometry::outline(self.shape, &self.bounds())
    }

    /// Center of the bounding box.
    #[must_use]
    pub fn center(&self) -> Point {
        geometry::center(&self.bounds())
    }

    /// Move the top-left corner. Edges attached to this node must be
    /// recomputed by the caller.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.position = Point::new(x, y);
    }

    /// Replace the label text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Replace the fill color.
    pub fn set_color(&mut self, color: impl Into<String>) {
        self.fill = color.into();
    }

    /// Check if a point lies within this node.
    ///
    /// Diamonds are tested against their bounding box, not the polygon, so
    /// clicks near a diamond's corners still hit it.
    #[must_use]
    pub fn hit_test(&self, x: f32, y: f32) -> bool {
        self.bounds().contains(x, y)
    }

    /// Toggle the emphasis state.
    pub fn highlight(&mut self, on: bool) {
        self.highlighted = on;
    }
}
