//! DOT format writer
//!
//! Serializes a [`Graph`] plus its diagram-level attributes into Graphviz DOT
//! text. Output follows declaration order, so the same declarations always
//! produce byte-identical DOT.

use std::fmt::Write;

use tracing::{debug, trace};

use super::{Attributes, ClusterData, DiagramError, Graph, Member};

/// Cluster background colors, cycled by nesting depth
pub const CLUSTER_BACKGROUNDS: [&str; 4] = ["#E5F5FD", "#EBF3E7", "#ECE8F6", "#FDF7E3"];

/// Escape special characters for quoted DOT strings.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
}

/// Write indentation to output.
pub fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

/// Incremental writer for a single DOT digraph.
pub struct DotBuilder {
    output: String,
    indent: usize,
}

impl DotBuilder {
    /// Start a new digraph with the given (quoted) name.
    pub fn new(name: &str) -> Self {
        let mut output = String::with_capacity(4096);
        let _ = writeln!(output, "digraph \"{}\" {{", escape_label(name));
        Self { output, indent: 1 }
    }

    /// Add a single graph attribute.
    pub fn attr(&mut self, key: &str, value: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "{}=\"{}\";", key, escape_label(value));
        self
    }

    /// Add all entries of `attrs` as graph attributes.
    pub fn attrs(&mut self, attrs: &Attributes) -> &mut Self {
        for (key, value) in attrs.iter() {
            self.attr(key, value);
        }
        self
    }

    /// Add a default statement such as `node [...]` or `edge [...]`.
    pub fn defaults(&mut self, target: &str, attrs: &Attributes) -> &mut Self {
        if attrs.is_empty() {
            return self;
        }
        write_indent(&mut self.output, self.indent);
        let _ = write!(self.output, "{target} ");
        self.write_attr_list(attrs.iter());
        self.output.push_str(";\n");
        self
    }

    /// Add a node with attributes.
    pub fn node<'a>(
        &mut self,
        id: &str,
        attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = write!(self.output, "{id} ");
        self.write_attr_list(attrs);
        self.output.push_str(";\n");
        self
    }

    /// Add an edge with attributes.
    pub fn edge<'a>(
        &mut self,
        from: &str,
        to: &str,
        attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = write!(self.output, "{from} -> {to}");
        let mut attrs = attrs.into_iter().peekable();
        if attrs.peek().is_some() {
            self.output.push(' ');
            self.write_attr_list(attrs);
        }
        self.output.push_str(";\n");
        self
    }

    fn write_attr_list<'a>(&mut self, attrs: impl IntoIterator<Item = (&'a str, &'a str)>) {
        self.output.push('[');
        for (i, (key, value)) in attrs.into_iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            let _ = write!(self.output, "{}=\"{}\"", key, escape_label(value));
        }
        self.output.push(']');
    }

    /// Start a subgraph cluster.
    pub fn start_cluster(&mut self, id: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "subgraph {id} {{");
        self.indent += 1;
        self
    }

    /// End the current subgraph cluster.
    pub fn end_cluster(&mut self) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        write_indent(&mut self.output, self.indent);
        self.output.push_str("}\n");
        self
    }

    /// Add a blank line for readability.
    pub fn blank(&mut self) -> &mut Self {
        self.output.push('\n');
        self
    }

    /// Finish building and return the DOT string.
    pub fn build(mut self) -> String {
        self.output.push_str("}\n");
        self.output
    }
}

/// Diagram-level attributes applied around the graph body
#[derive(Debug, Clone, Default)]
pub struct DotStyle {
    pub graph: Attributes,
    pub node: Attributes,
    pub edge: Attributes,
    pub cluster: Attributes,
}

/// Serialize `graph` as a DOT digraph named `name`.
///
/// Fails with [`DiagramError::UnknownNode`] when an edge points at a node
/// the graph never declared.
pub fn write_dot(name: &str, graph: &Graph, style: &DotStyle) -> Result<String, DiagramError> {
    for edge in graph.edges() {
        for end in [edge.from, edge.to] {
            if !graph.owns(end) {
                return Err(DiagramError::unknown_node(name, end.to_string()));
            }
        }
    }

    let mut dot = DotBuilder::new(name);
    dot.attrs(&style.graph);
    dot.defaults("node", &style.node);
    dot.defaults("edge", &style.edge);
    dot.blank();

    for member in graph.root_members() {
        write_member(&mut dot, graph, *member, style);
    }

    if graph.edge_count() > 0 {
        dot.blank();
    }
    // Edges stay at the top level: an edge statement inside a subgraph
    // would pull its endpoints into that cluster.
    for edge in graph.edges() {
        let mut attrs: Vec<(&str, &str)> = Vec::new();
        if let Some(label) = edge.attrs.label.as_deref() {
            attrs.push(("label", label));
        }
        if let Some(style) = edge.attrs.style.dot_style() {
            attrs.push(("style", style));
        }
        if !edge.attrs.directed {
            attrs.push(("dir", "none"));
        }
        dot.edge(&edge.from.to_string(), &edge.to.to_string(), attrs);
    }

    let output = dot.build();
    debug!(
        diagram = name,
        nodes = graph.node_count(),
        clusters = graph.cluster_count(),
        edges = graph.edge_count(),
        bytes = output.len(),
        "Wrote DOT"
    );
    Ok(output)
}

fn write_member(dot: &mut DotBuilder, graph: &Graph, member: Member, style: &DotStyle) {
    match member {
        Member::Node(id) => {
            if let Some(node) = graph.get_node(id) {
                let glyph = node.kind.glyph();
                dot.node(
                    &id.to_string(),
                    [
                        ("label", node.label.as_str()),
                        ("shape", glyph.shape),
                        ("fillcolor", glyph.fill),
                        ("fontcolor", glyph.font_color),
                    ],
                );
            }
        }
        Member::Cluster(id) => {
            if let Some(cluster) = graph.get_cluster(id) {
                write_cluster(dot, graph, cluster, style);
            }
        }
    }
}

fn write_cluster(dot: &mut DotBuilder, graph: &Graph, cluster: &ClusterData, style: &DotStyle) {
    trace!(cluster = %cluster.name, depth = cluster.depth, "Writing cluster");
    dot.start_cluster(&cluster.id.to_string());
    dot.attr("label", &cluster.name);
    dot.attrs(&style.cluster);
    dot.attr(
        "bgcolor",
        CLUSTER_BACKGROUNDS[cluster.depth % CLUSTER_BACKGROUNDS.len()],
    );
    for member in &cluster.members {
        write_member(dot, graph, *member, style);
    }
    dot.end_cluster();
}
