//! Canvas that logs draw commands instead of painting them.

use flowpad_core::{Canvas, ItemHandle, Point, SessionEvent};

/// Headless canvas for script replay.
///
/// Every command is logged at `trace` level, so `RUST_LOG=flowpad_cli=trace`
/// shows exactly what a GUI host would have drawn.
#[derive(Debug, Default)]
pub struct TraceCanvas {
    next_handle: u64,
    commands: usize,
}

impl TraceCanvas {
    /// Create a new trace canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of commands received so far.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands
    }

    fn allocate(&mut self) -> ItemHandle {
        self.next_handle += 1;
        self.commands += 1;
        ItemHandle(self.next_handle)
    }

    fn format_points(points: &[Point]) -> String {
        points
            .iter()
            .map(|p| format!("({}, {})", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Canvas for TraceCanvas {
    fn draw_shape(&mut self, outline: &[Point], fill: &str) -> ItemHandle {
        let handle = self.allocate();
        tracing::trace!(
            "Draw shape {handle} fill={fill} outline={}",
            Self::format_points(outline)
        );
        handle
    }

    fn draw_text(&mut self, pos: Point, text: &str) -> ItemHandle {
        let handle = self.allocate();
        tracing::trace!("Draw text {handle} at ({}, {}) '{text}'", pos.x, pos.y);
        handle
    }

    fn update_shape_geometry(&mut self, handle: ItemHandle, outline: &[Point]) {
        self.commands += 1;
        tracing::trace!("Reshape {handle} outline={}", Self::format_points(outline));
    }

    fn update_text_position(&mut self, handle: ItemHandle, pos: Point) {
        self.commands += 1;
        tracing::trace!("Move text {handle} to ({}, {})", pos.x, pos.y);
    }

    fn set_text(&mut self, handle: ItemHandle, text: &str) {
        self.commands += 1;
        tracing::trace!("Set text {handle} '{text}'");
    }

    fn set_fill(&mut self, handle: ItemHandle, fill: &str) {
        self.commands += 1;
        tracing::trace!("Fill {handle} {fill}");
    }

    fn set_outline_style(&mut self, handle: ItemHandle, color: &str, width: f32) {
        self.commands += 1;
        tracing::trace!("Outline {handle} {color} width={width}");
    }

    fn draw_line(&mut self, p1: Point, p2: Point, arrowhead: bool) -> ItemHandle {
        let handle = self.allocate();
        tracing::trace!(
            "Draw line {handle} ({}, {}) -> ({}, {}) arrow={arrowhead}",
            p1.x,
            p1.y,
            p2.x,
            p2.y
        );
        handle
    }

    fn update_line(&mut self, handle: ItemHandle, p1: Point, p2: Point) {
        self.commands += 1;
        tracing::trace!(
            "Move line {handle} ({}, {}) -> ({}, {})",
            p1.x,
            p1.y,
            p2.x,
            p2.y
        );
    }

    fn session_changed(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Opened {
                node,
                text,
                palette,
                ..
            } => {
                let colors = palette
                    .iter()
                    .map(|color| format!("{}={}", color.name, color.value))
                    .collect::<Vec<_>>()
                    .join(" ");
                tracing::debug!("Editor overlay opened on {node} with '{text}', palette: {colors}");
            }
            SessionEvent::Moved { node, anchor } => {
                tracing::trace!("Editor overlay for {node} moved to ({}, {})", anchor.x, anchor.y);
            }
            SessionEvent::Closed { node, text } => {
                tracing::debug!("Editor overlay closed on {node} with '{text}', palette hidden");
            }
        }
    }
}
