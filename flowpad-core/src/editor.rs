//! Interactive editor - turns input events into model mutations and canvas updates.
//!
//! The controller tracks three independent pieces of interaction state:
//!
//! | session   | drag      | connecting | meaning                                   |
//! |-----------|-----------|------------|-------------------------------------------|
//! | -         | -         | -          | idle                                      |
//! | node      | -         | -          | editing a node                            |
//! | node      | same node | -          | editing and dragging (pointer held)       |
//! | -         | node      | -          | dragging after the session was closed     |
//! | -         | any       | source     | waiting for the connection target         |
//!
//! Editing and connecting never overlap: entering connection mode closes the
//! session, and opening a session through node creation ends connection mode.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::canvas::{HIGHLIGHT_COLOR, HIGHLIGHT_WIDTH, OUTLINE_COLOR, OUTLINE_WIDTH};
use crate::event::{EditKey, PointerButton};
use crate::geometry::{Point, Vector};
use crate::{
    export, Canvas, DiagramModel, DiagramResult, EdgePath, EditSession, EditorConfig,
    EmptyClickPolicy, InputEvent, ItemHandle, NodeId, SessionEvent, ShapeKind,
};

/// Text handed back to the host for an export action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOutput {
    /// Display the markup ("show code").
    Show(String),
    /// Place the markup on the clipboard ("copy code").
    Copy(String),
}

impl EditorOutput {
    /// The exported markup.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Show(text) | Self::Copy(text) => text,
        }
    }
}

/// Snapshot of the interaction state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorState {
    /// Node with an open edit session.
    pub editing: Option<NodeId>,
    /// Node being dragged.
    pub dragging: Option<NodeId>,
    /// Source node of a pending connection.
    pub connecting_from: Option<NodeId>,
}

impl EditorState {
    /// Whether no interaction is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.editing.is_none() && self.dragging.is_none() && self.connecting_from.is_none()
    }
}

/// An active drag. The offset is captured on pointer-down and held constant.
#[derive(Debug, Clone, PartialEq)]
struct DragState {
    node: NodeId,
    offset: Vector,
}

#[derive(Debug, Clone, Copy)]
struct NodeItems {
    shape: ItemHandle,
    text: ItemHandle,
}

#[derive(Debug, Clone, Copy)]
struct EdgeItems {
    line: ItemHandle,
    label: Option<ItemHandle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    Commit,
    Cancel,
}

/// Editor for one diagram.
///
/// Owns the [`DiagramModel`] and all interaction state, and renders through
/// the supplied [`Canvas`]. Events are processed one at a time, each fully
/// applied before the next.
#[derive(Debug)]
pub struct EditorController<C: Canvas> {
    config: EditorConfig,
    model: DiagramModel,
    canvas: C,
    node_items: HashMap<NodeId, NodeItems>,
    /// Parallel to `model.edges()`.
    edge_items: Vec<EdgeItems>,
    session: Option<EditSession>,
    drag: Option<DragState>,
    connecting_from: Option<NodeId>,
    context_anchor: Option<Point>,
}

impl<C: Canvas> EditorController<C> {
    /// Create an editor with default configuration.
    #[must_use]
    pub fn new(canvas: C) -> Self {
        Self::with_config(canvas, EditorConfig::default())
    }

    /// Create an editor with the given configuration.
    #[must_use]
    pub fn with_config(canvas: C, config: EditorConfig) -> Self {
        Self {
            config,
            model: DiagramModel::new(),
            canvas,
            node_items: HashMap::new(),
            edge_items: Vec::new(),
            session: None,
            drag: None,
            connecting_from: None,
            context_anchor: None,
        }
    }

    /// The diagram being edited.
    #[must_use]
    pub fn model(&self) -> &DiagramModel {
        &self.model
    }

    /// The canvas rendered into.
    #[must_use]
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Mutable access to the canvas.
    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The open edit session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    /// Where the shape menu was last requested (secondary click).
    #[must_use]
    pub fn context_menu_anchor(&self) -> Option<Point> {
        self.context_anchor
    }

    /// Snapshot of the interaction state.
    #[must_use]
    pub fn state(&self) -> EditorState {
        EditorState {
            editing: self.session.as_ref().map(|s| s.node().clone()),
            dragging: self.drag.as_ref().map(|d| d.node.clone()),
            connecting_from: self.connecting_from.clone(),
        }
    }

    /// Process an input event.
    ///
    /// Export and copy requests return the markup for the host to show or
    /// place on the clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DiagramError::InvalidShape`] if a creation request
    /// names an unknown shape. The editor is left unchanged in that case.
    pub fn handle_event(&mut self, event: &InputEvent) -> DiagramResult<Option<EditorOutput>> {
        match event {
            InputEvent::PointerDown { x, y, button } => self.pointer_down(*x, *y, *button),
            InputEvent::PointerMove { x, y } => self.pointer_move(*x, *y),
            InputEvent::PointerUp { .. } => self.pointer_up(),
            InputEvent::DoubleClick { x, y } => self.double_click(*x, *y),
            InputEvent::CreateNode { shape, x, y } => {
                self.create_node(shape, *x, *y)?;
            }
            InputEvent::TextChanged { text } => self.text_changed(text),
            InputEvent::Key { key } => self.key_pressed(key),
            InputEvent::FocusLost => self.commit_edit(),
            InputEvent::PaletteSelected { color } => self.select_color(color),
            InputEvent::ExportRequested => return Ok(Some(EditorOutput::Show(self.diagram_text()))),
            InputEvent::CopyRequested => return Ok(Some(EditorOutput::Copy(self.diagram_text()))),
        }
        Ok(None)
    }

    /// Create a node and open an edit session on it with all text selected.
    ///
    /// Any open session is committed first and connection mode ends.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DiagramError::InvalidShape`] if `shape` is not
    /// recognised; nothing is created and no id is consumed.
    pub fn create_node(&mut self, shape: &str, x: f32, y: f32) -> DiagramResult<NodeId> {
        let shape = shape.parse::<ShapeKind>().inspect_err(|e| {
            tracing::warn!("Rejected node creation: {e}");
        })?;

        self.close_session(SessionEnd::Commit);
        self.end_connection();

        let id = self.model.create_node(shape, x, y);
        self.draw_node(&id);
        self.open_session(&id);
        Ok(id)
    }

    /// Pointer button pressed at canvas coordinates.
    pub fn pointer_down(&mut self, x: f32, y: f32, button: PointerButton) {
        if button == PointerButton::Secondary {
            tracing::debug!("Shape menu requested at ({x}, {y})");
            self.context_anchor = Some(Point::new(x, y));
            return;
        }

        let hit = self.model.node_at(x, y).cloned();

        if let Some(source) = self.connecting_from.clone() {
            match hit {
                Some(target) => self.complete_connection(&source, &target),
                None => match self.config.empty_click_while_connecting {
                    EmptyClickPolicy::KeepPending => {
                        tracing::trace!(
                            "Empty click while connecting from {source}, still pending"
                        );
                    }
                    EmptyClickPolicy::Cancel => {
                        tracing::debug!("Connection from {source} cancelled");
                        self.end_connection();
                    }
                },
            }
            return;
        }

        match hit {
            Some(id) => {
                self.open_session(&id);
                if let Some(node) = self.model.node(&id) {
                    let offset = Point::new(x, y) - node.position();
                    tracing::debug!("Drag started on {id}");
                    self.drag = Some(DragState { node: id, offset });
                }
            }
            None => self.close_session(SessionEnd::Commit),
        }
    }

    /// Pointer moved. Drags the held node, its edges and its edit overlay.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let Some(drag) = &self.drag else {
            return;
        };
        let id = drag.node.clone();
        let target = Point::new(x, y) - drag.offset;

        let Some(node) = self.model.node_mut(&id) else {
            return;
        };
        node.move_to(target.x, target.y);
        let outline = node.outline();
        let center = node.center();
        tracing::trace!("Moved {id} to ({}, {})", target.x, target.y);

        if let Some(items) = self.node_items.get(&id).copied() {
            self.canvas.update_shape_geometry(items.shape, &outline);
            self.canvas.update_text_position(items.text, center);
        }

        for (index, path) in self.model.refresh_edges_for(&id) {
            self.redraw_edge(index, path);
        }

        if let Some(session) = self.session.as_mut() {
            if session.node() == &id {
                session.move_anchor(center);
                self.canvas.session_changed(&SessionEvent::Moved {
                    node: id,
                    anchor: center,
                });
            }
        }
    }

    /// Pointer released. Ends any drag.
    pub fn pointer_up(&mut self) {
        if let Some(drag) = self.drag.take() {
            tracing::debug!("Drag ended on {}", drag.node);
        }
    }

    /// Double-click. On a node, closes any session and enters connection mode.
    pub fn double_click(&mut self, x: f32, y: f32) {
        let Some(id) = self.model.node_at(x, y).cloned() else {
            return;
        };
        self.close_session(SessionEnd::Commit);
        if let Some(previous) = self.connecting_from.take() {
            self.set_highlight(&previous, false);
        }
        self.set_highlight(&id, true);
        tracing::debug!("Connecting from {id}");
        self.connecting_from = Some(id);
    }

    /// The overlay text changed. Applied to the node immediately.
    pub fn text_changed(&mut self, text: &str) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.update(text);
        let id = session.node().clone();
        self.apply_text(&id, text);
    }

    /// A key was pressed in the overlay.
    pub fn key_pressed(&mut self, key: &str) {
        match EditKey::from_name(key) {
            Some(EditKey::Confirm) => self.commit_edit(),
            Some(EditKey::Cancel) => self.cancel_edit(),
            None => {}
        }
    }

    /// Commit the open session, keeping its text.
    pub fn commit_edit(&mut self) {
        self.close_session(SessionEnd::Commit);
    }

    /// Close the open session, restoring the text from before it opened.
    pub fn cancel_edit(&mut self) {
        self.close_session(SessionEnd::Cancel);
    }

    /// Recolor the node being edited. Ignored without an open session.
    pub fn select_color(&mut self, color: &str) {
        let Some(id) = self.session.as_ref().map(|s| s.node().clone()) else {
            return;
        };
        if let Some(node) = self.model.node_mut(&id) {
            node.set_color(color);
        }
        if let Some(items) = self.node_items.get(&id) {
            self.canvas.set_fill(items.shape, color);
        }
        tracing::debug!("Colored {id} {color}");
    }

    /// The diagram as Mermaid markup. Shared by the show and copy actions.
    #[must_use]
    pub fn diagram_text(&self) -> String {
        export::to_mermaid(&self.model)
    }

    fn complete_connection(&mut self, source: &NodeId, target: &NodeId) {
        match self.model.add_edge(source, target, "") {
            Ok(index) => self.draw_edge(index),
            Err(e) => tracing::debug!("Connection declined: {e}"),
        }
        self.end_connection();
    }

    fn end_connection(&mut self) {
        if let Some(source) = self.connecting_from.take() {
            self.set_highlight(&source, false);
        }
    }

    fn set_highlight(&mut self, id: &NodeId, on: bool) {
        if let Some(node) = self.model.node_mut(id) {
            node.highlight(on);
        }
        if let Some(items) = self.node_items.get(id) {
            let (color, width) = if on {
                (HIGHLIGHT_COLOR, HIGHLIGHT_WIDTH)
            } else {
                (OUTLINE_COLOR, OUTLINE_WIDTH)
            };
            self.canvas.set_outline_style(items.shape, color, width);
        }
    }

    fn open_session(&mut self, id: &NodeId) {
        if let Some(session) = self.session.as_mut() {
            if session.node() == id {
                session.select_all();
                self.canvas
                    .session_changed(&session.opened_event(&self.config.palette));
                return;
            }
        }
        self.close_session(SessionEnd::Commit);

        let Some(node) = self.model.node(id) else {
            return;
        };
        let session = EditSession::open(node);
        self.canvas
            .session_changed(&session.opened_event(&self.config.palette));
        self.session = Some(session);
        tracing::debug!("Editing {id}");
    }

    fn close_session(&mut self, end: SessionEnd) {
        let Some(session) = self.session.take() else {
            return;
        };
        let id = session.node().clone();
        let text = match end {
            SessionEnd::Commit => session.commit(),
            SessionEnd::Cancel => session.cancel(),
        };
        self.apply_text(&id, &text);
        tracing::debug!("Closed edit session on {id} ({end:?})");
        self.canvas
            .session_changed(&SessionEvent::Closed { node: id, text });
    }

    fn apply_text(&mut self, id: &NodeId, text: &str) {
        if let Some(node) = self.model.node_mut(id) {
            node.set_text(text);
        }
        if let Some(items) = self.node_items.get(id) {
            self.canvas.set_text(items.text, text);
        }
    }

    fn draw_node(&mut self, id: &NodeId) {
        let Some(node) = self.model.node(id) else {
            return;
        };
        let shape = self.canvas.draw_shape(&node.outline(), node.fill());
        let text = self.canvas.draw_text(node.center(), node.text());
        self.node_items.insert(id.clone(), NodeItems { shape, text });
    }

    fn draw_edge(&mut self, index: usize) {
        let Some(edge) = self.model.edges().get(index) else {
            return;
        };
        let path = edge.path();
        let line = self.canvas.draw_line(path.start, path.end, true);
        let label = path
            .label_anchor
            .zip(edge.label())
            .map(|(anchor, label)| self.canvas.draw_text(anchor, label));
        self.edge_items.push(EdgeItems { line, label });
    }

    fn redraw_edge(&mut self, index: usize, path: EdgePath) {
        let Some(items) = self.edge_items.get(index).copied() else {
            return;
        };
        self.canvas.update_line(items.line, path.start, path.end);
        if let (Some(label), Some(anchor)) = (items.label, path.label_anchor) {
            self.canvas.update_text_position(label, anchor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CanvasItem, RecordingCanvas};

    fn editor() -> EditorController<RecordingCanvas> {
        EditorController::new(RecordingCanvas::new())
    }

    #[test]
    fn test_create_opens_session() {
        let mut ed = editor();
        let id = ed.create_node("rectangle", 10.0, 10.0).expect("valid shape");
        assert_eq!(id.as_str(), "A");
        let session = ed.session().expect("session open");
        assert_eq!(session.node(), &id);
        assert!(session.selects_all());
        assert!(ed.canvas().palette_visible());
    }

    #[test]
    fn test_invalid_shape_changes_nothing() {
        let mut ed = editor();
        ed.create_node("rectangle", 0.0, 0.0).expect("valid shape");
        let before = ed.canvas().command_count();

        assert!(ed.create_node("circle", 0.0, 0.0).is_err());
        assert_eq!(ed.model().node_count(), 1);
        assert_eq!(ed.canvas().command_count(), before);
        assert_eq!(ed.state().editing.map(|n| n.to_string()), Some("A".to_string()));
        assert_eq!(ed.model().next_id().as_str(), "B");
    }

    #[test]
    fn test_new_creation_commits_previous_session() {
        let mut ed = editor();
        let a = ed.create_node("rectangle", 0.0, 0.0).expect("valid shape");
        ed.text_changed("Start");
        let b = ed.create_node("diamond", 200.0, 0.0).expect("valid shape");

        assert_eq!(ed.model().node(&a).map(|n| n.text()), Some("Start"));
        assert_eq!(ed.state().editing, Some(b));
    }

    #[test]
    fn test_pointer_down_on_node_edits_and_drags() {
        let mut ed = editor();
        let a = ed.create_node("rectangle", 10.0, 10.0).expect("valid shape");
        ed.commit_edit();

        ed.pointer_down(30.0, 25.0, PointerButton::Primary);
        let state = ed.state();
        assert_eq!(state.editing, Some(a.clone()));
        assert_eq!(state.dragging, Some(a.clone()));

        ed.pointer_move(50.0, 50.0);
        let node = ed.model().node(&a).expect("node a");
        assert_eq!(node.position(), Point::new(30.0, 35.0));
        assert_eq!(ed.session().map(EditSession::anchor), Some(node.center()));

        ed.pointer_up();
        assert_eq!(ed.state().dragging, None);
        assert_eq!(ed.state().editing, Some(a));
    }

    #[test]
    fn test_click_on_edited_node_refocuses_session() {
        let mut ed = editor();
        let a = ed.create_node("rectangle", 0.0, 0.0).expect("valid shape");
        ed.text_changed("Draft");
        assert!(!ed.session().expect("session open").selects_all());

        ed.pointer_down(10.0, 10.0, PointerButton::Primary);
        let session = ed.session().expect("session still open");
        assert_eq!(session.node(), &a);
        assert!(session.selects_all());
        assert_eq!(session.text(), "Draft");
        assert_eq!(ed.state().dragging, Some(a));

        let opened: Vec<_> = ed
            .canvas()
            .session_events()
            .iter()
            .filter_map(|event| match event {
                SessionEvent::Opened {
                    text, select_all, ..
                } => Some((text.as_str(), *select_all)),
                _ => None,
            })
            .collect();
        assert_eq!(opened, vec![("Node", true), ("Draft", true)]);
        assert!(!ed
            .canvas()
            .session_events()
            .iter()
            .any(|event| matches!(event, SessionEvent::Closed { .. })));
    }

    #[test]
    fn test_configured_palette_reaches_canvas() {
        let palette = vec![
            crate::PaletteColor::new("Teal", "#008080"),
            crate::PaletteColor::new("Navy", "#000080"),
        ];
        let config = EditorConfig::new().with_palette(palette.clone());
        let mut ed = EditorController::with_config(RecordingCanvas::new(), config);

        ed.create_node("rectangle", 0.0, 0.0).expect("valid shape");
        assert_eq!(ed.canvas().palette(), Some(palette.as_slice()));

        ed.commit_edit();
        assert!(ed.canvas().palette().is_none());
    }

    #[test]
    fn test_empty_click_closes_session() {
        let mut ed = editor();
        ed.create_node("rectangle", 0.0, 0.0).expect("valid shape");
        ed.pointer_down(500.0, 500.0, PointerButton::Primary);
        assert!(ed.state().is_idle());
        assert!(!ed.canvas().palette_visible());
    }

    #[test]
    fn test_secondary_click_records_menu_anchor() {
        let mut ed = editor();
        ed.pointer_down(42.0, 24.0, PointerButton::Secondary);
        assert_eq!(ed.context_menu_anchor(), Some(Point::new(42.0, 24.0)));
        assert!(ed.state().is_idle());
    }

    #[test]
    fn test_double_click_enters_connection_mode() {
        let mut ed = editor();
        let a = ed.create_node("rectangle", 0.0, 0.0).expect("valid shape");
        ed.double_click(10.0, 10.0);

        let state = ed.state();
        assert_eq!(state.editing, None);
        assert_eq!(state.connecting_from, Some(a.clone()));
        assert!(ed.model().node(&a).is_some_and(crate::Node::is_highlighted));
    }

    #[test]
    fn test_connect_two_nodes() {
        let mut ed = editor();
        let a = ed.create_node("rectangle", 0.0, 0.0).expect("valid shape");
        let b = ed.create_node("rectangle", 200.0, 0.0).expect("valid shape");
        ed.double_click(10.0, 10.0);
        ed.pointer_down(210.0, 10.0, PointerButton::Primary);

        assert_eq!(ed.model().edge_count(), 1);
        let edge = &ed.model().edges()[0];
        assert_eq!(edge.source(), &a);
        assert_eq!(edge.target(), &b);
        assert_eq!(ed.state().connecting_from, None);
        assert!(!ed.model().node(&a).is_some_and(crate::Node::is_highlighted));
        // Completing a connection does not start a drag.
        assert_eq!(ed.state().dragging, None);
    }

    #[test]
    fn test_self_click_ends_connection_without_edge() {
        let mut ed = editor();
        ed.create_node("rectangle", 0.0, 0.0).expect("valid shape");
        ed.double_click(10.0, 10.0);
        ed.pointer_down(20.0, 20.0, PointerButton::Primary);

        assert_eq!(ed.model().edge_count(), 0);
        assert_eq!(ed.state().connecting_from, None);
    }

    #[test]
    fn test_empty_click_policy() {
        let mut keep = editor();
        keep.create_node("rectangle", 0.0, 0.0).expect("valid shape");
        keep.double_click(10.0, 10.0);
        keep.pointer_down(500.0, 500.0, PointerButton::Primary);
        assert!(keep.state().connecting_from.is_some());

        let config = EditorConfig::new().with_empty_click_policy(EmptyClickPolicy::Cancel);
        let mut cancel = EditorController::with_config(RecordingCanvas::new(), config);
        let a = cancel.create_node("rectangle", 0.0, 0.0).expect("valid shape");
        cancel.double_click(10.0, 10.0);
        cancel.pointer_down(500.0, 500.0, PointerButton::Primary);
        assert!(cancel.state().connecting_from.is_none());
        assert!(!cancel.model().node(&a).is_some_and(crate::Node::is_highlighted));
    }

    #[test]
    fn test_creation_cancels_connection() {
        let mut ed = editor();
        let a = ed.create_node("rectangle", 0.0, 0.0).expect("valid shape");
        ed.double_click(10.0, 10.0);
        ed.create_node("diamond", 300.0, 0.0).expect("valid shape");
        assert_eq!(ed.state().connecting_from, None);
        assert!(!ed.model().node(&a).is_some_and(crate::Node::is_highlighted));
    }

    #[test]
    fn test_escape_restores_text() {
        let mut ed = editor();
        let a = ed.create_node("rectangle", 0.0, 0.0).expect("valid shape");
        ed.text_changed("Draft");
        assert_eq!(ed.model().node(&a).map(|n| n.text()), Some("Draft"));
        ed.key_pressed("Escape");
        assert_eq!(ed.model().node(&a).map(|n| n.text()), Some("Node"));
        assert!(ed.session().is_none());
    }

    #[test]
    fn test_palette_requires_session() {
        let mut ed = editor();
        let a = ed.create_node("rectangle", 0.0, 0.0).expect("valid shape");
        ed.select_color("#FF0000");
        ed.commit_edit();
        ed.select_color("#00FF00");
        assert_eq!(ed.model().node(&a).map(|n| n.fill()), Some("#FF0000"));

        let shape_fill = ed.canvas().items().find_map(|(_, item)| match item {
            CanvasItem::Shape { fill, .. } => Some(fill.clone()),
            _ => None,
        });
        assert_eq!(shape_fill.as_deref(), Some("#FF0000"));
    }

    #[test]
    fn test_export_and_copy_share_text() {
        let mut ed = editor();
        ed.create_node("rectangle", 0.0, 0.0).expect("valid shape");
        let shown = ed.handle_event(&InputEvent::ExportRequested).expect("no error");
        let copied = ed.handle_event(&InputEvent::CopyRequested).expect("no error");
        assert_eq!(shown.as_ref().map(EditorOutput::text), copied.as_ref().map(EditorOutput::text));
        assert!(matches!(copied, Some(EditorOutput::Copy(_))));
    }
}
