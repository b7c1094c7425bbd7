//! The fixed DOC+ Medical Assistant diagrams
//!
//! Each submodule declares one diagram: a [`DiagramConfig`] and a
//! declaration routine. [`StandardDiagram`] ties them together so callers
//! can iterate, look them up by slug, or render them individually.

pub mod architecture;
pub mod components;
pub mod dataflow;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::{
    Diagram, DiagramConfig, DiagramError, Direction, Graph, OutputFormat, RenderBackend,
};

/// Graph attributes shared by every diagram in the catalog
pub const BASE_GRAPH_ATTRS: [(&str, &str); 3] =
    [("fontsize", "16"), ("bgcolor", "white"), ("pad", "0.5")];

/// Config with the catalog's shared styling
pub fn base_config(title: &str, filename: &str, direction: Direction) -> DiagramConfig {
    BASE_GRAPH_ATTRS.iter().fold(
        DiagramConfig::new(title, filename).with_direction(direction),
        |config, (key, value)| config.with_graph_attr(*key, *value),
    )
}

/// One of the three standard diagrams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StandardDiagram {
    Architecture,
    Components,
    DataFlow,
}

impl StandardDiagram {
    /// All diagrams in generation order
    pub const ALL: [StandardDiagram; 3] = [
        StandardDiagram::Architecture,
        StandardDiagram::Components,
        StandardDiagram::DataFlow,
    ];

    /// Short name used on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            StandardDiagram::Architecture => "architecture",
            StandardDiagram::Components => "components",
            StandardDiagram::DataFlow => "dataflow",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.slug() == slug)
    }

    /// One-line description for listings
    pub fn description(&self) -> &'static str {
        match self {
            StandardDiagram::Architecture => "High-level system architecture",
            StandardDiagram::Components => "Detailed component structure",
            StandardDiagram::DataFlow => "Data flow visualization",
        }
    }

    /// Fixed rendering options
    pub fn config(&self) -> DiagramConfig {
        match self {
            StandardDiagram::Architecture => architecture::config(),
            StandardDiagram::Components => components::config(),
            StandardDiagram::DataFlow => dataflow::config(),
        }
    }

    /// Run this diagram's declarations against `graph`
    pub fn declare(&self, graph: &mut Graph) {
        match self {
            StandardDiagram::Architecture => architecture::declare(graph),
            StandardDiagram::Components => components::declare(graph),
            StandardDiagram::DataFlow => dataflow::declare(graph),
        }
    }

    /// Build the diagram in the requested format without rendering it
    pub fn build(&self, format: OutputFormat) -> Diagram {
        Diagram::build(self.config().with_format(format), |g| self.declare(g))
    }

    /// DOT source for this diagram
    pub fn dot(&self) -> Result<String, DiagramError> {
        self.build(OutputFormat::default()).to_dot()
    }

    /// Build and render into `out_dir`
    pub fn emit(
        &self,
        backend: &dyn RenderBackend,
        out_dir: &Path,
        format: OutputFormat,
    ) -> Result<PathBuf, DiagramError> {
        self.build(format).finish(backend, out_dir)
    }
}

impl fmt::Display for StandardDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        for diagram in StandardDiagram::ALL {
            assert_eq!(StandardDiagram::from_slug(diagram.slug()), Some(diagram));
        }
        assert_eq!(StandardDiagram::from_slug("sequence"), None);
    }

    #[test]
    fn test_output_names_are_distinct() {
        let names: Vec<String> = StandardDiagram::ALL
            .iter()
            .map(|d| d.config().output_file_name())
            .collect();
        assert_eq!(
            names,
            vec![
                "doc_plus_architecture.png",
                "doc_plus_components.png",
                "doc_plus_dataflow.png"
            ]
        );
    }

    #[test]
    fn test_base_config_applies_shared_attrs() {
        for diagram in StandardDiagram::ALL {
            let config = diagram.config();
            assert_eq!(config.graph_attr.get("fontsize"), Some("16"));
            assert_eq!(config.graph_attr.get("bgcolor"), Some("white"));
            assert_eq!(config.graph_attr.get("pad"), Some("0.5"));
            assert_eq!(config.format, OutputFormat::Png);
        }
    }

    #[test]
    fn test_diagrams_share_no_entities() {
        let first = StandardDiagram::Architecture.build(OutputFormat::Png);
        let second = StandardDiagram::Architecture.build(OutputFormat::Png);
        let node = first.graph().nodes().next().unwrap().id;
        assert!(first.graph().owns(node));
        assert!(!second.graph().owns(node));
    }

    #[test]
    fn test_every_diagram_serializes() {
        for diagram in StandardDiagram::ALL {
            let dot = diagram.dot().unwrap();
            assert!(dot.starts_with("digraph "));
            assert!(dot.contains(&format!("label=\"{}\";", diagram.config().title)));
        }
    }
}
