//! Canvas abstraction - the drawing surface the editor renders into.
//!
//! The editor never paints pixels itself. It issues draw and update commands
//! through [`Canvas`], keyed by the [`ItemHandle`]s the canvas hands back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::{PaletteColor, SessionEvent};

/// Outline color of a node in its normal state.
pub const OUTLINE_COLOR: &str = "black";
/// Outline width of a node in its normal state.
pub const OUTLINE_WIDTH: f32 = 2.0;
/// Outline color of a highlighted node.
pub const HIGHLIGHT_COLOR: &str = "red";
/// Outline width of a highlighted node.
pub const HIGHLIGHT_WIDTH: f32 = 3.0;

/// Opaque reference to an item drawn on a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemHandle(pub u64);

impl std::fmt::Display for ItemHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Drawing surface consumed by the editor.
pub trait Canvas {
    /// Draw a filled closed polygon.
    fn draw_shape(&mut self, outline: &[Point], fill: &str) -> ItemHandle;

    /// Draw a text label centered on `pos`.
    fn draw_text(&mut self, pos: Point, text: &str) -> ItemHandle;

    /// Replace the polygon of a shape item.
    fn update_shape_geometry(&mut self, handle: ItemHandle, outline: &[Point]);

    /// Move a text item.
    fn update_text_position(&mut self, handle: ItemHandle, pos: Point);

    /// Replace the content of a text item.
    fn set_text(&mut self, handle: ItemHandle, text: &str);

    /// Replace the fill of a shape item.
    fn set_fill(&mut self, handle: ItemHandle, fill: &str);

    /// Change the outline of a shape item.
    fn set_outline_style(&mut self, handle: ItemHandle, color: &str, width: f32);

    /// Draw a straight line, optionally ending in an arrowhead at `p2`.
    fn draw_line(&mut self, p1: Point, p2: Point, arrowhead: bool) -> ItemHandle;

    /// Move both ends of a line.
    fn update_line(&mut self, handle: ItemHandle, p1: Point, p2: Point);

    /// Notification that the editing overlay opened, moved or closed.
    fn session_changed(&mut self, event: &SessionEvent) {
        let _ = event;
    }
}

/// An item as last drawn on a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CanvasItem {
    /// Filled polygon.
    Shape {
        /// Polygon vertices.
        outline: Vec<Point>,
        /// Fill color.
        fill: String,
        /// Outline color.
        outline_color: String,
        /// Outline width.
        outline_width: f32,
    },
    /// Text label.
    Text {
        /// Center position.
        pos: Point,
        /// Content.
        text: String,
    },
    /// Straight line.
    Line {
        /// Start point.
        start: Point,
        /// End point.
        end: Point,
        /// Whether an arrowhead is drawn at `end`.
        arrowhead: bool,
    },
}

/// Overlay state tracked by a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayState {
    /// Position of the text editor.
    pub anchor: Point,
    /// Text shown in the editor.
    pub text: String,
}

/// Canvas that records commands instead of drawing them.
///
/// Handles are allocated sequentially from 1. Besides the raw command log the
/// canvas keeps the latest state of every item, plus the overlay and the
/// offered palette, so hosts and tests can inspect the rendered scene.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    next_handle: u64,
    items: BTreeMap<ItemHandle, CanvasItem>,
    sessions: Vec<SessionEvent>,
    overlay: Option<OverlayState>,
    palette: Option<Vec<PaletteColor>>,
    command_count: usize,
}

impl RecordingCanvas {
    /// Create an empty canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self, item: CanvasItem) -> ItemHandle {
        self.next_handle += 1;
        let handle = ItemHandle(self.next_handle);
        self.items.insert(handle, item);
        self.command_count += 1;
        handle
    }

    fn with_item(&mut self, handle: ItemHandle, f: impl FnOnce(&mut CanvasItem)) {
        self.command_count += 1;
        match self.items.get_mut(&handle) {
            Some(item) => f(item),
            None => tracing::warn!("Canvas command on unknown item {handle}"),
        }
    }

    /// Latest state of an item.
    #[must_use]
    pub fn item(&self, handle: ItemHandle) -> Option<&CanvasItem> {
        self.items.get(&handle)
    }

    /// All items in drawing order.
    pub fn items(&self) -> impl Iterator<Item = (&ItemHandle, &CanvasItem)> {
        self.items.iter()
    }

    /// All line items in drawing order.
    pub fn lines(&self) -> impl Iterator<Item = &CanvasItem> {
        self.items
            .values()
            .filter(|item| matches!(item, CanvasItem::Line { .. }))
    }

    /// Every session notification received, oldest first.
    #[must_use]
    pub fn session_events(&self) -> &[SessionEvent] {
        &self.sessions
    }

    /// The editing overlay, if shown.
    #[must_use]
    pub fn overlay(&self) -> Option<&OverlayState> {
        self.overlay.as_ref()
    }

    /// Whether the color palette is shown.
    #[must_use]
    pub fn palette_visible(&self) -> bool {
        self.palette.is_some()
    }

    /// Colors offered by the shown palette.
    #[must_use]
    pub fn palette(&self) -> Option<&[PaletteColor]> {
        self.palette.as_deref()
    }

    /// Number of draw and update commands received.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.command_count
    }
}

impl Canvas for RecordingCanvas {
    fn draw_shape(&mut self, outline: &[Point], fill: &str) -> ItemHandle {
        self.allocate(CanvasItem::Shape {
            outline: outline.to_vec(),
            fill: fill.to_string(),
            outline_color: OUTLINE_COLOR.to_string(),
            outline_width: OUTLINE_WIDTH,
        })
    }

    fn draw_text(&mut self, pos: Point, text: &str) -> ItemHandle {
        self.allocate(CanvasItem::Text {
            pos,
            text: text.to_string(),
        })
    }

    fn update_shape_geometry(&mut self, handle: ItemHandle, new_outline: &[Point]) {
        self.with_item(handle, |item| {
            if let CanvasItem::Shape { outline, .. } = item {
                *outline = new_outline.to_vec();
            }
        });
    }

    fn update_text_position(&mut self, handle: ItemHandle, new_pos: Point) {
        self.with_item(handle, |item| {
            if let CanvasItem::Text { pos, .. } = item {
                *pos = new_pos;
            }
        });
    }

    fn set_text(&mut self, handle: ItemHandle, new_text: &str) {
        self.with_item(handle, |item| {
            if let CanvasItem::Text { text, .. } = item {
                *text = new_text.to_string();
            }
        });
    }

    fn set_fill(&mut self, handle: ItemHandle, new_fill: &str) {
        self.with_item(handle, |item| {
            if let CanvasItem::Shape { fill, .. } = item {
                *fill = new_fill.to_string();
            }
        });
    }

    fn set_outline_style(&mut self, handle: ItemHandle, color: &str, width: f32) {
        self.with_item(handle, |item| {
            if let CanvasItem::Shape {
                outline_color,
                outline_width,
                ..
            } = item
            {
                *outline_color = color.to_string();
                *outline_width = width;
            }
        });
    }

    fn draw_line(&mut self, p1: Point, p2: Point, arrowhead: bool) -> ItemHandle {
        self.allocate(CanvasItem::Line {
            start: p1,
            end: p2,
            arrowhead,
        })
    }

    fn update_line(&mut self, handle: ItemHandle, p1: Point, p2: Point) {
        self.with_item(handle, |item| {
            if let CanvasItem::Line { start, end, .. } = item {
                *start = p1;
                *end = p2;
            }
        });
    }

    fn session_changed(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Opened {
                anchor,
                text,
                palette,
                ..
            } => {
                self.overlay = Some(OverlayState {
                    anchor: *anchor,
                    text: text.clone(),
                });
                self.palette = Some(palette.clone());
            }
            SessionEvent::Moved { anchor, .. } => {
                if let Some(overlay) = self.overlay.as_mut() {
                    overlay.anchor = *anchor;
                }
            }
            SessionEvent::Closed { .. } => {
                self.overlay = None;
                self.palette = None;
            }
        }
        self.sessions.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_sequential() {
        let mut canvas = RecordingCanvas::new();
        let a = canvas.draw_text(Point::new(0.0, 0.0), "a");
        let b = canvas.draw_line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), true);
        assert_eq!(a, ItemHandle(1));
        assert_eq!(b, ItemHandle(2));
        assert_eq!(canvas.command_count(), 2);
    }

    #[test]
    fn test_updates_apply_to_items() {
        let mut canvas = RecordingCanvas::new();
        let shape = canvas.draw_shape(&[Point::new(0.0, 0.0)], "#FFFFFF");
        canvas.set_fill(shape, "#FF0000");
        canvas.set_outline_style(shape, HIGHLIGHT_COLOR, HIGHLIGHT_WIDTH);

        match canvas.item(shape) {
            Some(CanvasItem::Shape {
                fill,
                outline_color,
                outline_width,
                ..
            }) => {
                assert_eq!(fill, "#FF0000");
                assert_eq!(outline_color, "red");
                assert!((outline_width - 3.0).abs() < f32::EPSILON);
            }
            other => panic!("Expected shape, got {other:?}"),
        }
    }

    #[test]
    fn test_session_events_drive_overlay() {
        let mut canvas = RecordingCanvas::new();
        let node = crate::NodeId::new("A");
        canvas.session_changed(&SessionEvent::Opened {
            node: node.clone(),
            anchor: Point::new(5.0, 5.0),
            text: "Node".to_string(),
            select_all: true,
            palette: crate::config::default_palette(),
        });
        assert!(canvas.palette_visible());
        assert_eq!(canvas.palette().map(<[_]>::len), Some(7));
        canvas.session_changed(&SessionEvent::Moved {
            node: node.clone(),
            anchor: Point::new(9.0, 9.0),
        });
        assert_eq!(canvas.overlay().map(|o| o.anchor), Some(Point::new(9.0, 9.0)));
        canvas.session_changed(&SessionEvent::Closed {
            node,
            text: "Node".to_string(),
        });
        assert!(canvas.overlay().is_none());
        assert!(!canvas.palette_visible());
        assert!(canvas.palette().is_none());
        assert_eq!(canvas.session_events().len(), 3);
    }
}
