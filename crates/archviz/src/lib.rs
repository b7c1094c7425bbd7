//! Archviz - architecture diagrams for the DOC+ Medical Assistant
//!
//! Declares three fixed diagrams (system architecture, components, data
//! flow) as labeled directed graphs with nested clusters, renders them
//! through Graphviz, and writes a plain-text overview of the project.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! let outcome = archviz::generate(".");
//! assert!(outcome.is_success());
//! ```
//!
//! # Declaring a diagram
//!
//! ```rust
//! use archviz::prelude::*;
//!
//! let config = DiagramConfig::new("Example", "example").with_direction(Direction::LeftRight);
//! let diagram = Diagram::build(config, |g| {
//!     let users = g.cluster("Users", |g| g.node(NodeKind::Client, "Doctor"));
//!     let api = g.node(NodeKind::Server, "REST API");
//!     g.edge_with(users, api, Edge::labeled("CRUD"));
//! });
//!
//! let dot = diagram.to_dot().unwrap();
//! assert!(dot.contains("subgraph cluster_0"));
//! assert!(dot.contains("label=\"CRUD\""));
//! ```

pub mod catalog;
pub mod core;
pub mod orchestrator;
pub mod report;

pub use crate::core::*;

use std::path::PathBuf;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::catalog::StandardDiagram;
    pub use crate::core::{
        Diagram, DiagramConfig, DiagramError, Direction, Edge, EdgeStyle, Graph,
        GraphvizBackend, NodeId, NodeKind, OutputFormat, RenderBackend, RenderRequest,
    };
    pub use crate::orchestrator::{Orchestrator, OrchestratorConfig, RunOutcome, Stage};
}

/// Generate every diagram and the overview into `output_dir`
///
/// Uses Graphviz (`ARCHVIZ_DOT` or `dot` on `PATH`) and prints progress to
/// stdout.
pub fn generate(output_dir: impl Into<PathBuf>) -> orchestrator::RunOutcome {
    let orchestrator = orchestrator::Orchestrator::new(
        GraphvizBackend::from_env(),
        orchestrator::OrchestratorConfig::new(output_dir),
    );
    orchestrator.run(&mut std::io::stdout().lock())
}

/// DOT source of one of the standard diagrams
///
/// # Example
/// ```rust
/// use archviz::{dot_source, catalog::StandardDiagram};
///
/// let dot = dot_source(StandardDiagram::DataFlow).unwrap();
/// assert!(dot.contains("Push Updates"));
/// ```
pub fn dot_source(diagram: catalog::StandardDiagram) -> Result<String, DiagramError> {
    diagram.dot()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StandardDiagram;

    #[test]
    fn test_dot_source_per_diagram() {
        for diagram in StandardDiagram::ALL {
            let dot = dot_source(diagram).unwrap();
            assert!(dot.ends_with("}\n"));
        }
    }

    #[test]
    fn test_dot_source_is_stable() {
        assert_eq!(
            dot_source(StandardDiagram::Architecture).unwrap(),
            dot_source(StandardDiagram::Architecture).unwrap()
        );
    }
}
