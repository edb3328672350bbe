//! Mermaid export.
//!
//! Produces a fenced `mermaid` code block describing the diagram:
//!
//! ````text
//! ```mermaid
//! graph TD;
//!     A[Start];
//!     B{Ready?};
//!     A --> B;
//!     classDef color1 fill:#ffffff,stroke:#000,stroke-width:2px;
//!     class A,B color1;
//! ```
//! ````
//!
//! Output depends only on the model, so repeated exports are byte-identical.

use indexmap::IndexMap;

use crate::{DiagramModel, Edge, Node, NodeId, ShapeKind};

const INDENT: &str = "    ";

/// Fill colors with fixed class names, lower-cased.
const NAMED_COLORS: [(&str, &str); 5] = [
    ("#1e90ff", "blue"),
    ("#ff4500", "red"),
    ("#32cd32", "green"),
    ("#ffff00", "yellow"),
    ("#ffa500", "orange"),
];

fn named_class(color: &str) -> Option<&'static str> {
    NAMED_COLORS
        .iter()
        .find(|(value, _)| *value == color)
        .map(|(_, name)| *name)
}

/// A style class shared by all nodes with the same fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorClass {
    /// Class name, e.g. `blue` or `color1`.
    pub name: String,
    /// Lower-cased fill color.
    pub fill: String,
    /// Member nodes in model order.
    pub members: Vec<NodeId>,
}

/// Group nodes by fill color.
///
/// Colors compare case-insensitively. The five named colors get fixed class
/// names; every other color is numbered `color1`, `color2`, ... in order of
/// first appearance. Classes are returned in first-appearance order.
#[must_use]
pub fn color_classes(model: &DiagramModel) -> Vec<ColorClass> {
    let mut classes: IndexMap<String, ColorClass> = IndexMap::new();
    let mut generated = 0usize;

    for node in model.nodes() {
        let fill = node.fill().to_ascii_lowercase();
        let class = classes.entry(fill.clone()).or_insert_with(|| {
            let name = named_class(&fill).map_or_else(
                || {
                    generated += 1;
                    format!("color{generated}")
                },
                str::to_string,
            );
            ColorClass {
                name,
                fill,
                members: Vec::new(),
            }
        });
        class.members.push(node.id().clone());
    }

    classes.into_values().collect()
}

fn node_line(node: &Node) -> String {
    match node.shape() {
        ShapeKind::Rectangle => format!("{INDENT}{}[{}];", node.id(), node.text()),
        ShapeKind::Diamond => format!("{INDENT}{}{{{}}};", node.id(), node.text()),
    }
}

fn edge_line(edge: &Edge) -> String {
    match edge.label() {
        Some(label) => format!(
            "{INDENT}{} -- {label} --> {};",
            edge.source(),
            edge.target()
        ),
        None => format!("{INDENT}{} --> {};", edge.source(), edge.target()),
    }
}

/// Render the model as a Mermaid flowchart code block.
///
/// Lines are joined with `\n`; there is no trailing newline.
#[must_use]
pub fn to_mermaid(model: &DiagramModel) -> String {
    let classes = color_classes(model);

    let mut lines = vec!["```mermaid".to_string(), "graph TD;".to_string()];
    lines.extend(model.nodes().map(node_line));
    lines.extend(model.edges().iter().map(edge_line));
    lines.extend(classes.iter().map(|class| {
        format!(
            "{INDENT}classDef {} fill:{},stroke:#000,stroke-width:2px;",
            class.name, class.fill
        )
    }));
    lines.extend(classes.iter().map(|class| {
        let members: Vec<&str> = class.members.iter().map(NodeId::as_str).collect();
        format!("{INDENT}class {} {};", members.join(","), class.name)
    }));
    lines.push("```".to_string());

    lines.join("\n")
}
