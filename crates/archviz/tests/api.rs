//! Integration tests for the public API

use std::path::Path;

use archviz::catalog::StandardDiagram;
use archviz::prelude::*;
use archviz::{DotStyle, GraphvizBackend, DOT_ENV_VAR};

mod common;
use common::FileBackend;

#[test]
fn test_stage_artifacts_match_catalog() {
    let rendering: Vec<Stage> = Stage::ALL
        .into_iter()
        .filter(|stage| stage.diagram().is_some())
        .collect();
    assert_eq!(rendering.len(), StandardDiagram::ALL.len());

    for (stage, diagram) in rendering.into_iter().zip(StandardDiagram::ALL) {
        assert_eq!(stage.diagram(), Some(diagram));
        assert_eq!(
            stage.artifact(OutputFormat::Svg),
            diagram.config().with_format(OutputFormat::Svg).output_file_name()
        );
        assert_eq!(stage.description(), diagram.description());
    }
}

#[test]
fn test_directions() {
    assert_eq!(
        StandardDiagram::Architecture.config().direction,
        Direction::TopBottom
    );
    assert_eq!(
        StandardDiagram::Components.config().direction,
        Direction::LeftRight
    );
    assert_eq!(
        StandardDiagram::DataFlow.config().direction,
        Direction::TopBottom
    );
}

#[test]
fn test_architecture_dot_structure() {
    let dot = StandardDiagram::Architecture.dot().unwrap();
    assert!(dot.starts_with("digraph \"DOC+ Medical Assistant Architecture\" {"));
    assert!(dot.contains("rankdir=\"TB\";"));
    assert_eq!(dot.matches("subgraph cluster_").count(), 8);
    assert_eq!(dot.matches(" -> ").count(), 17);
}

#[test]
fn test_components_dot_structure() {
    let dot = StandardDiagram::Components.dot().unwrap();
    assert!(dot.contains("rankdir=\"LR\";"));
    assert_eq!(dot.matches("subgraph cluster_").count(), 7);
    assert_eq!(dot.matches(" -> ").count(), 22);
}

#[test]
fn test_dataflow_dot_structure() {
    let dot = StandardDiagram::DataFlow.dot().unwrap();
    assert_eq!(dot.matches("subgraph cluster_").count(), 3);
    assert_eq!(dot.matches(" -> ").count(), 14);
    assert_eq!(dot.matches("style=\"dashed\"").count(), 1);
}

#[test]
fn test_custom_diagram_emit() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FileBackend::default();
    let config = DiagramConfig::new("Custom", "custom").with_format(OutputFormat::Svg);

    let path = Diagram::emit(config, &backend, dir.path(), |g| {
        let (api, db) = g.cluster("Backend", |g| {
            (
                g.node(NodeKind::Server, "REST API"),
                g.node(NodeKind::Postgres, "PostgreSQL"),
            )
        });
        g.edge(api, db);
    })
    .unwrap();

    assert_eq!(path, dir.path().join("custom.svg"));
    let dot = std::fs::read_to_string(&path).unwrap();
    assert!(dot.contains("label=\"Backend\";"));
    assert!(dot.contains("n0 -> n1;"));
    assert_eq!(backend.rendered.borrow().as_slice(), &["Custom".to_string()]);
}

#[test]
fn test_config_overrides_reach_dot() {
    let config = DiagramConfig::new("Styled", "styled")
        .with_graph_attr("splines", "curved")
        .with_node_attr("fontname", "Helvetica");
    let style: DotStyle = config.dot_style();
    assert_eq!(style.graph.get("splines"), Some("curved"));

    let dot = Diagram::build(config, |g| {
        g.node(NodeKind::React, "Pages");
    })
    .to_dot()
    .unwrap();
    assert!(dot.contains("splines=\"curved\";"));
    assert!(dot.contains("fontname=\"Helvetica\""));
}

#[test]
fn test_graphviz_backend_program() {
    assert_eq!(GraphvizBackend::new().program(), Path::new("dot"));
    assert_eq!(
        GraphvizBackend::with_program("/opt/graphviz/bin/dot").program(),
        Path::new("/opt/graphviz/bin/dot")
    );
    assert_eq!(DOT_ENV_VAR, "ARCHVIZ_DOT");
}

#[test]
fn test_missing_graphviz_is_missing_dependency() {
    let backend = GraphvizBackend::with_program("/nonexistent/archviz-api-test/dot");
    let err = backend.probe().unwrap_err();
    assert!(err.is_missing_dependency());

    let dir = tempfile::tempdir().unwrap();
    let err = StandardDiagram::DataFlow
        .emit(&backend, dir.path(), OutputFormat::Png)
        .unwrap_err();
    assert!(err.is_missing_dependency());
    assert!(common::files_in(dir.path()).is_empty());
}
