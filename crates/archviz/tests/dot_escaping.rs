//! Property tests for DOT label escaping and graph emission

use archviz::core::dot::{escape_label, write_dot, DotStyle};
use archviz::{Edge, Graph, NodeKind};
use proptest::prelude::*;

/// True when every quote and backslash in `escaped` is part of an escape
/// sequence and no raw line break remains
fn is_safe_quoted(escaped: &str) -> bool {
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('\\') | Some('"') | Some('n') => {}
                _ => return false,
            },
            '"' | '\n' => return false,
            _ => {}
        }
    }
    true
}

proptest! {
    #[test]
    fn escaped_labels_are_safe(label in "[a-zA-Z0-9 \"\\\\\n&+@/()-]{0,40}") {
        prop_assert!(is_safe_quoted(&escape_label(&label)));
    }

    #[test]
    fn plain_labels_pass_through(label in "[a-zA-Z0-9 &+@/()-]{0,40}") {
        prop_assert_eq!(escape_label(&label), label);
    }

    #[test]
    fn chain_emits_one_edge_per_step(labels in prop::collection::vec("[a-z]{1,8}", 1..12)) {
        let mut g = Graph::new();
        let ids: Vec<_> = labels.iter().map(|l| g.node(NodeKind::React, l.as_str())).collect();
        g.chain(&ids, Edge::new());

        prop_assert_eq!(g.edge_count(), ids.len() - 1);
        let dot = write_dot("chain", &g, &DotStyle::default()).unwrap();
        prop_assert_eq!(dot.matches(" -> ").count(), ids.len() - 1);
    }

    #[test]
    fn emitted_node_labels_are_quoted(label in "[a-zA-Z \"\n]{1,20}") {
        let mut g = Graph::new();
        g.node(NodeKind::Server, label.as_str());
        let dot = write_dot("one", &g, &DotStyle::default()).unwrap();
        let expected = format!("label=\"{}\"", escape_label(&label));
        prop_assert!(dot.contains(&expected));
    }
}
