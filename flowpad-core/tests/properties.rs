//! Property tests for id assignment, geometry and export.

use std::collections::HashSet;

use flowpad_core::{to_mermaid, DiagramModel, Node, NodeId, Point, ShapeKind};
use proptest::prelude::*;

fn shape_strategy() -> impl Strategy<Value = ShapeKind> {
    prop_oneof![Just(ShapeKind::Rectangle), Just(ShapeKind::Diamond)]
}

fn color_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("#FFFFFF".to_string()),
        Just("#1E90FF".to_string()),
        Just("#1e90ff".to_string()),
        Just("#FFA500".to_string()),
        "#[0-9A-F]{6}",
    ]
}

fn expected_id(n: usize) -> String {
    if n <= 26 {
        char::from(b'A' + u8::try_from(n - 1).expect("n <= 26")).to_string()
    } else {
        format!("N{n}")
    }
}

proptest! {
    #[test]
    fn ids_follow_creation_order(shapes in prop::collection::vec(shape_strategy(), 1..80)) {
        let mut model = DiagramModel::new();
        let mut seen = HashSet::new();
        for (index, shape) in shapes.into_iter().enumerate() {
            let id = model.create_node(shape, 0.0, 0.0);
            prop_assert_eq!(id.as_str(), expected_id(index + 1));
            prop_assert!(seen.insert(id));
        }
    }

    #[test]
    fn center_is_bounding_box_midpoint(
        shape in shape_strategy(),
        x in -1000.0f32..1000.0,
        y in -1000.0f32..1000.0,
    ) {
        let node = Node::new(NodeId::new("A"), x, y, "Node", shape, "#FFFFFF");
        let b = node.bounds();
        prop_assert_eq!(node.center(), Point::new(b.x + b.width / 2.0, b.y + b.height / 2.0));
    }

    #[test]
    fn export_is_pure(
        nodes in prop::collection::vec((shape_strategy(), color_strategy()), 1..20),
        links in prop::collection::vec((0usize..20, 0usize..20), 0..20),
    ) {
        let mut model = DiagramModel::new();
        let ids: Vec<NodeId> = nodes
            .iter()
            .map(|(shape, color)| {
                let id = model.create_node(*shape, 0.0, 0.0);
                if let Some(node) = model.node_mut(&id) {
                    node.set_color(color.as_str());
                }
                id
            })
            .collect();

        let mut expected_edges = 0;
        for (from, to) in links {
            let (from, to) = (&ids[from % ids.len()], &ids[to % ids.len()]);
            if model.add_edge(from, to, "").is_ok() {
                expected_edges += 1;
            } else {
                prop_assert_eq!(from, to);
            }
        }
        prop_assert_eq!(model.edge_count(), expected_edges);

        let first = to_mermaid(&model);
        let second = to_mermaid(&model);
        prop_assert_eq!(&first, &second);

        // Every node appears in exactly one class line.
        let mut classed: Vec<String> = first
            .lines()
            .filter_map(|l| l.trim_start().strip_prefix("class "))
            .flat_map(|rest| {
                let members = rest.split(' ').next().unwrap_or_default();
                members.split(',').map(str::to_string).collect::<Vec<_>>()
            })
            .collect();
        classed.sort();
        let mut all: Vec<String> = ids.iter().map(ToString::to_string).collect();
        all.sort();
        prop_assert_eq!(classed, all);
    }
}
