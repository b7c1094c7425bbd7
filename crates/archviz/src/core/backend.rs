//! Rendering backends
//!
//! A backend turns DOT text into an output file. The production backend
//! pipes DOT into the Graphviz `dot` executable; tests substitute their own
//! implementations of [`RenderBackend`].

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, span, trace, warn, Level};

use super::{DiagramError, OutputFormat};

/// Environment variable overriding the Graphviz executable
pub const DOT_ENV_VAR: &str = "ARCHVIZ_DOT";

/// Default Graphviz executable name, resolved through `PATH`
pub const DEFAULT_DOT_PROGRAM: &str = "dot";

/// One render call: a serialized graph and where its image goes
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    /// Diagram title, used in diagnostics
    pub diagram: &'a str,
    /// DOT source
    pub dot: &'a str,
    pub format: OutputFormat,
    pub output: &'a Path,
}

/// External collaborator that rasterizes a graph description
pub trait RenderBackend {
    /// Short human-readable name
    fn name(&self) -> &str;

    /// Check that the backend can run at all
    ///
    /// Returns [`DiagramError::BackendUnavailable`] when it cannot.
    fn probe(&self) -> Result<(), DiagramError>;

    /// Render `request.dot` into `request.output`
    fn render(&self, request: &RenderRequest<'_>) -> Result<(), DiagramError>;
}

impl<B: RenderBackend + ?Sized> RenderBackend for &B {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn probe(&self) -> Result<(), DiagramError> {
        (**self).probe()
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<(), DiagramError> {
        (**self).render(request)
    }
}

impl<B: RenderBackend + ?Sized> RenderBackend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn probe(&self) -> Result<(), DiagramError> {
        (**self).probe()
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<(), DiagramError> {
        (**self).render(request)
    }
}

/// Backend that shells out to Graphviz `dot`
#[derive(Debug, Clone)]
pub struct GraphvizBackend {
    program: PathBuf,
}

impl Default for GraphvizBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphvizBackend {
    /// Use `dot` from `PATH`
    pub fn new() -> Self {
        Self::with_program(DEFAULT_DOT_PROGRAM)
    }

    /// Use a specific executable
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Use `ARCHVIZ_DOT` if set, otherwise `dot` from `PATH`
    pub fn from_env() -> Self {
        match std::env::var_os(DOT_ENV_VAR) {
            Some(program) if !program.is_empty() => Self::with_program(program),
            _ => Self::new(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn spawn_error(&self, err: std::io::Error) -> DiagramError {
        match err.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                DiagramError::backend_unavailable(&self.program, err)
            }
            _ => DiagramError::from(err),
        }
    }
}

impl RenderBackend for GraphvizBackend {
    fn name(&self) -> &str {
        "graphviz"
    }

    fn probe(&self) -> Result<(), DiagramError> {
        trace!(program = %self.program.display(), "Probing Graphviz");
        let output = Command::new(&self.program)
            .arg("-V")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(DiagramError::render_failed(
                "graphviz probe",
                format!(
                    "'{} -V' exited with {}",
                    self.program.display(),
                    output.status
                ),
            ));
        }

        // `dot -V` reports its version on stderr
        let version = String::from_utf8_lossy(&output.stderr);
        debug!(version = %version.trim(), "Graphviz available");
        Ok(())
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<(), DiagramError> {
        let render_span = span!(
            Level::INFO,
            "graphviz_render",
            diagram = request.diagram,
            format = %request.format
        );
        let _enter = render_span.enter();

        let mut child = Command::new(&self.program)
            .arg(format!("-T{}", request.format.extension()))
            .arg("-o")
            .arg(request.output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // `stdin` drops at the end of the match, closing the pipe. A failed
        // write means dot stopped reading; its status and stderr come first.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(request.dot.as_bytes()),
            None => Ok(()),
        };

        let output = child.wait_with_output()?;
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            warn!(status = %output.status, "Graphviz failed");
            return Err(DiagramError::render_failed(
                request.diagram,
                format!("dot exited with {}: {}", output.status, stderr.trim()),
            ));
        }
        if let Err(err) = written {
            warn!(error = %err, "Graphviz stopped reading its input");
            return Err(DiagramError::render_failed(
                request.diagram,
                format!("could not write DOT to dot: {err}: {}", stderr.trim()),
            ));
        }
        if !stderr.trim().is_empty() {
            // e.g. "Orthogonal edges do not currently handle edge labels"
            debug!(stderr = %stderr.trim(), "Graphviz warnings");
        }

        info!(output = %request.output.display(), "Rendered diagram");
        Ok(())
    }
}
