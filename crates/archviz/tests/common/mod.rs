//! Test doubles for the rendering backend

#![allow(dead_code)]

use std::cell::RefCell;
use std::io;

use archviz::core::{DiagramError, RenderBackend, RenderRequest};

/// Writes the DOT source to the requested output path
#[derive(Default)]
pub struct FileBackend {
    pub rendered: RefCell<Vec<String>>,
    /// Diagram title that fails to render, if any
    pub fail_on: Option<&'static str>,
}

impl FileBackend {
    pub fn failing_on(title: &'static str) -> Self {
        Self {
            fail_on: Some(title),
            ..Self::default()
        }
    }
}

impl RenderBackend for FileBackend {
    fn name(&self) -> &str {
        "file"
    }

    fn probe(&self) -> Result<(), DiagramError> {
        Ok(())
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<(), DiagramError> {
        if self.fail_on == Some(request.diagram) {
            return Err(DiagramError::render_failed(
                request.diagram,
                "dot exited with exit status: 1",
            ));
        }
        std::fs::write(request.output, request.dot)?;
        self.rendered.borrow_mut().push(request.diagram.to_string());
        Ok(())
    }
}

/// Behaves like a machine without Graphviz installed
pub struct MissingBackend;

impl RenderBackend for MissingBackend {
    fn name(&self) -> &str {
        "missing"
    }

    fn probe(&self) -> Result<(), DiagramError> {
        Err(DiagramError::backend_unavailable(
            "dot",
            io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        ))
    }

    fn render(&self, _request: &RenderRequest<'_>) -> Result<(), DiagramError> {
        panic!("render must not be called when the probe fails");
    }
}

/// Files in `dir`, sorted by name
pub fn files_in(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
