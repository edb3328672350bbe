//! # Flowpad Core
//!
//! Editor logic for drawing flowcharts on a canvas and exporting them as
//! Mermaid markup.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                flowpad-core                 │
//! ├─────────────────────────────────────────────┤
//! │  Input Events  ──▶  EditorController        │
//! │                     - edit session          │
//! │                     - drag                  │
//! │                     - connection mode       │
//! ├──────────────────────┬──────────────────────┤
//! │  DiagramModel        │  Canvas (trait)      │
//! │  - Nodes / Edges     │  - draw / update     │
//! │  - Geometry          │  - session overlay   │
//! ├──────────────────────┴──────────────────────┤
//! │  Export: Mermaid `graph TD` + color classes │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use flowpad_core::{EditorController, PointerButton, RecordingCanvas};
//!
//! let mut editor = EditorController::new(RecordingCanvas::new());
//! editor.create_node("rectangle", 10.0, 10.0).unwrap();
//! editor.create_node("diamond", 200.0, 10.0).unwrap();
//! editor.double_click(20.0, 20.0);
//! editor.pointer_down(210.0, 20.0, PointerButton::Primary);
//!
//! let text = editor.diagram_text();
//! assert!(text.contains("A --> B;"));
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod canvas;
pub mod config;
pub mod edge;
pub mod editor;
pub mod error;
pub mod event;
pub mod export;
pub mod geometry;
pub mod model;
pub mod node;
pub mod session;

pub use canvas::{Canvas, CanvasItem, ItemHandle, RecordingCanvas};
pub use config::{EditorConfig, EmptyClickPolicy, PaletteColor};
pub use edge::{Edge, EdgePath};
pub use editor::{EditorController, EditorOutput, EditorState};
pub use error::{DiagramError, DiagramResult};
pub use event::{parse_script, InputEvent, PointerButton};
pub use export::to_mermaid;
pub use geometry::{Point, Vector};
pub use model::DiagramModel;
pub use node::{Node, NodeId, ShapeKind};
pub use session::{EditSession, SessionEvent};

/// Flowpad core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
