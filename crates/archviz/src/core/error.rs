//! Core error types for diagram rendering
//!
//! This module defines the error types shared by the graph builder, the DOT
//! writer and the rendering backends.

use std::path::PathBuf;

use thiserror::Error;

/// Core error types for diagram rendering
#[derive(Error, Debug)]
pub enum DiagramError {
    /// The rendering backend could not be started at all
    #[error("Rendering backend unavailable: could not run '{}': {source}", program.display())]
    BackendUnavailable {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Render error in '{diagram}': {message}")]
    RenderFailed { diagram: String, message: String },

    #[error("Unknown node {node} referenced by an edge in '{diagram}'")]
    UnknownNode { diagram: String, node: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new backend-unavailable error
    pub fn backend_unavailable(program: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::BackendUnavailable {
            program: program.into(),
            source,
        }
    }

    /// Create a new render error
    pub fn render_failed(diagram: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RenderFailed {
            diagram: diagram.into(),
            message: message.into(),
        }
    }

    /// Create a new unknown-node error
    pub fn unknown_node(diagram: impl Into<String>, node: impl Into<String>) -> Self {
        Self::UnknownNode {
            diagram: diagram.into(),
            node: node.into(),
        }
    }

    /// Returns true when the failure means the backend is missing rather
    /// than misbehaving
    pub fn is_missing_dependency(&self) -> bool {
        matches!(self, Self::BackendUnavailable { .. })
    }
}
