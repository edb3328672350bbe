//! Input events for editor interaction.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::{DiagramError, DiagramResult};

/// Mouse button of a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    /// Left button: select, drag, connect.
    #[default]
    Primary,
    /// Right button: opens the shape menu.
    Secondary,
}

/// All input events the editor can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum InputEvent {
    /// Pointer button pressed.
    PointerDown {
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
        /// Button pressed.
        #[serde(default)]
        button: PointerButton,
    },

    /// Pointer moved with the button held.
    PointerMove {
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
    },

    /// Pointer button released.
    PointerUp {
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
    },

    /// Primary button double-clicked.
    DoubleClick {
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
    },

    /// Shape chosen from the creation menu.
    CreateNode {
        /// Shape name, `"rectangle"` or `"diamond"`.
        shape: String,
        /// X of the new node's top-left corner.
        x: f32,
        /// Y of the new node's top-left corner.
        y: f32,
    },

    /// Content of the editing overlay changed.
    TextChanged {
        /// Full overlay text.
        text: String,
    },

    /// Key pressed in the editing overlay.
    Key {
        /// Key name, e.g. `"Return"` or `"Escape"`.
        key: String,
    },

    /// The editing overlay lost keyboard focus.
    FocusLost,

    /// A palette color was clicked.
    PaletteSelected {
        /// Chosen color.
        color: String,
    },

    /// "Show code" action.
    ExportRequested,

    /// "Copy code" action.
    CopyRequested,
}

impl InputEvent {
    /// Canvas position of pointer events.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y }
            | Self::PointerUp { x, y }
            | Self::DoubleClick { x, y }
            | Self::CreateNode { x, y, .. } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }
}

/// Keys recognised by the editing overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    /// Commit the session.
    Confirm,
    /// Discard the session's edits.
    Cancel,
}

impl EditKey {
    /// Map a key name to an editing action.
    #[must_use]
    pub fn from_name(key: &str) -> Option<Self> {
        match key {
            "Return" | "Enter" | "KP_Enter" => Some(Self::Confirm),
            "Escape" | "Esc" => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// Parse an event script: one JSON-encoded [`InputEvent`] per line.
///
/// Blank lines and lines starting with `#` are skipped.
///
/// # Errors
///
/// Returns [`DiagramError::Script`] naming the first line that fails to parse.
pub fn parse_script(script: &str) -> DiagramResult<Vec<InputEvent>> {
    script
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| DiagramError::Script {
                line: index + 1,
                source,
            })
        })
        .collect()
}
