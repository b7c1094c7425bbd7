//! Diagram rendering context
//!
//! A [`Diagram`] pairs one [`Graph`] with its global rendering options. The
//! usual entry point is [`Diagram::emit`], which opens the context, runs a
//! declaration block and renders the result when the block returns:
//!
//! ```rust,no_run
//! use archviz::core::{Diagram, DiagramConfig, Direction, GraphvizBackend, NodeKind};
//! use std::path::Path;
//!
//! let config = DiagramConfig::new("Example", "example").with_direction(Direction::LeftRight);
//! let path = Diagram::emit(config, &GraphvizBackend::new(), Path::new("."), |g| {
//!     let a = g.node(NodeKind::Client, "User");
//!     let b = g.node(NodeKind::Server, "API");
//!     g.edge(a, b);
//! })?;
//! assert!(path.ends_with("example.png"));
//! # Ok::<(), archviz::core::DiagramError>(())
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info, span, Level};

use super::{
    write_dot, Attributes, DiagramError, Direction, DotStyle, Graph, OutputFormat, RenderBackend,
    RenderRequest,
};

/// Global options for one diagram
#[derive(Debug, Clone)]
pub struct DiagramConfig {
    /// Title drawn above the diagram
    pub title: String,
    /// Output file name without extension
    pub filename: String,
    pub direction: Direction,
    pub format: OutputFormat,
    /// Overrides applied on top of the layout defaults
    pub graph_attr: Attributes,
    pub node_attr: Attributes,
    pub edge_attr: Attributes,
}

impl DiagramConfig {
    /// Create a config with default direction and format
    pub fn new(title: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            filename: filename.into(),
            direction: Direction::default(),
            format: OutputFormat::default(),
            graph_attr: Attributes::new(),
            node_attr: Attributes::new(),
            edge_attr: Attributes::new(),
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Override a graph-level attribute such as `fontsize` or `bgcolor`
    pub fn with_graph_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.graph_attr.set(key, value);
        self
    }

    pub fn with_node_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.node_attr.set(key, value);
        self
    }

    pub fn with_edge_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.edge_attr.set(key, value);
        self
    }

    /// `<filename>.<extension>`
    pub fn output_file_name(&self) -> String {
        format!("{}.{}", self.filename, self.format.extension())
    }

    /// Full output path inside `dir`
    pub fn output_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.output_file_name())
    }

    /// Layout defaults merged with this config's overrides
    pub fn dot_style(&self) -> DotStyle {
        let mut graph: Attributes = [
            ("pad", "2.0"),
            ("splines", "ortho"),
            ("nodesep", "0.60"),
            ("ranksep", "0.75"),
            ("fontname", "Sans-Serif"),
            ("fontsize", "15"),
            ("fontcolor", "#2D3436"),
            ("labelloc", "t"),
        ]
        .into_iter()
        .collect();
        graph.set("label", self.title.as_str());
        graph.set("rankdir", self.direction.rankdir());
        graph.merge(&self.graph_attr);

        let mut node: Attributes = [
            ("style", "rounded,filled"),
            ("margin", "0.2,0.1"),
            ("fontname", "Sans-Serif"),
            ("fontsize", "13"),
            ("fontcolor", "#2D3436"),
        ]
        .into_iter()
        .collect();
        node.merge(&self.node_attr);

        let mut edge: Attributes = [
            ("color", "#7B8894"),
            ("fontname", "Sans-Serif"),
            ("fontsize", "13"),
            ("fontcolor", "#2D3436"),
        ]
        .into_iter()
        .collect();
        edge.merge(&self.edge_attr);

        let cluster: Attributes = [
            ("style", "rounded"),
            ("labeljust", "l"),
            ("pencolor", "#AEB6BE"),
            ("fontname", "Sans-Serif"),
            ("fontsize", "12"),
        ]
        .into_iter()
        .collect();

        DotStyle {
            graph,
            node,
            edge,
            cluster,
        }
    }
}

/// An open diagram context
///
/// Declarations go into [`Diagram::graph_mut`]; [`Diagram::finish`] renders
/// the image and consumes the context, so a diagram is rendered at most once.
#[derive(Debug)]
pub struct Diagram {
    config: DiagramConfig,
    graph: Graph,
}

impl Diagram {
    /// Open a context with an empty graph
    pub fn new(config: DiagramConfig) -> Self {
        debug!(title = %config.title, filename = %config.filename, "Opening diagram");
        Self {
            config,
            graph: Graph::new(),
        }
    }

    /// Open a context and run `declare` against its graph
    pub fn build(config: DiagramConfig, declare: impl FnOnce(&mut Graph)) -> Self {
        let mut diagram = Self::new(config);
        declare(&mut diagram.graph);
        diagram
    }

    /// Open, declare, render and close in one scope
    pub fn emit(
        config: DiagramConfig,
        backend: &dyn RenderBackend,
        out_dir: &Path,
        declare: impl FnOnce(&mut Graph),
    ) -> Result<PathBuf, DiagramError> {
        Self::build(config, declare).finish(backend, out_dir)
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// Serialize the diagram as DOT
    pub fn to_dot(&self) -> Result<String, DiagramError> {
        write_dot(&self.config.title, &self.graph, &self.config.dot_style())
    }

    /// Render to `<out_dir>/<filename>.<format>` and close the context
    pub fn finish(
        self,
        backend: &dyn RenderBackend,
        out_dir: &Path,
    ) -> Result<PathBuf, DiagramError> {
        let finish_span = span!(
            Level::INFO,
            "finish_diagram",
            title = %self.config.title,
            backend = backend.name()
        );
        let _enter = finish_span.enter();

        let dot = self.to_dot()?;
        let output = self.config.output_path(out_dir);
        backend.render(&RenderRequest {
            diagram: &self.config.title,
            dot: &dot,
            format: self.config.format,
            output: &output,
        })?;

        info!(output = %output.display(), "Diagram written");
        Ok(output)
    }
}
