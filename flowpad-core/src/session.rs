//! In-place text editing session.
//!
//! An [`EditSession`] stands for the text overlay and color palette shown
//! while one node is being edited. The controller owns at most one session
//! and publishes its lifecycle to the canvas as [`SessionEvent`]s.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::{Node, NodeId, PaletteColor};

/// Lifecycle notifications for the editing overlay.
///
/// `Opened` means the overlay and palette should be shown, `Closed` that both
/// should be hidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SessionEvent {
    /// A session started, or was re-focused with all text selected.
    Opened {
        /// Node being edited.
        node: NodeId,
        /// Overlay position (node center).
        anchor: Point,
        /// Initial text of the overlay.
        text: String,
        /// Whether all text is pre-selected for replacement.
        select_all: bool,
        /// Colors to offer alongside the overlay.
        palette: Vec<PaletteColor>,
    },
    /// The edited node moved; the overlay follows its center.
    Moved {
        /// Node being edited.
        node: NodeId,
        /// New overlay position.
        anchor: Point,
    },
    /// The session ended.
    Closed {
        /// Node that was edited.
        node: NodeId,
        /// Text left on the node.
        text: String,
    },
}

/// Editing state bound to a single node.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    node: NodeId,
    buffer: String,
    original: String,
    anchor: Point,
    select_all: bool,
}

impl EditSession {
    /// Open a session on `node`, pre-selecting all of its text.
    #[must_use]
    pub fn open(node: &Node) -> Self {
        Self {
            node: node.id().clone(),
            buffer: node.text().to_string(),
            original: node.text().to_string(),
            anchor: node.center(),
            select_all: true,
        }
    }

    /// Node being edited.
    #[must_use]
    pub fn node(&self) -> &NodeId {
        &self.node
    }

    /// Current overlay text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Overlay position.
    #[must_use]
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Whether the whole text is selected.
    #[must_use]
    pub fn selects_all(&self) -> bool {
        self.select_all
    }

    /// Replace the overlay text. Typing drops the select-all state.
    pub fn update(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.select_all = false;
    }

    /// Select all text again, as when the node is clicked mid-session.
    pub fn select_all(&mut self) {
        self.select_all = true;
    }

    /// Follow the node to a new center.
    pub fn move_anchor(&mut self, anchor: Point) {
        self.anchor = anchor;
    }

    /// The event announcing this session (or its re-focus), offering `palette`.
    #[must_use]
    pub fn opened_event(&self, palette: &[PaletteColor]) -> SessionEvent {
        SessionEvent::Opened {
            node: self.node.clone(),
            anchor: self.anchor,
            text: self.buffer.clone(),
            select_all: self.select_all,
            palette: palette.to_vec(),
        }
    }

    /// End the session keeping the typed text. Returns the final text.
    #[must_use]
    pub fn commit(self) -> String {
        self.buffer
    }

    /// End the session discarding edits. Returns the text from before it opened.
    #[must_use]
    pub fn cancel(self) -> String {
        self.original
    }
}
