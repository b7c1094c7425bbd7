//! Generation driver
//!
//! Runs the three diagrams and the text overview in a fixed order inside one
//! error boundary:
//!
//! MainDiagram → ComponentDiagram → DataFlowDiagram → TextReport
//!
//! A failing stage stops the run. Artifacts written by earlier stages stay
//! on disk; later stages never run. Failures are reported on the console
//! with a remediation hint and summarized in the returned [`RunOutcome`].

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, error, info, span, warn, Level};

use crate::catalog::StandardDiagram;
use crate::core::{DiagramError, OutputFormat, RenderBackend, DOT_ENV_VAR};
use crate::report::{write_report, REPORT_FILE_NAME};

/// One step of a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    MainDiagram,
    ComponentDiagram,
    DataFlowDiagram,
    TextReport,
}

impl Stage {
    /// All stages in execution order
    pub const ALL: [Stage; 4] = [
        Stage::MainDiagram,
        Stage::ComponentDiagram,
        Stage::DataFlowDiagram,
        Stage::TextReport,
    ];

    /// The diagram rendered by this stage, if it renders one
    pub fn diagram(&self) -> Option<StandardDiagram> {
        match self {
            Stage::MainDiagram => Some(StandardDiagram::Architecture),
            Stage::ComponentDiagram => Some(StandardDiagram::Components),
            Stage::DataFlowDiagram => Some(StandardDiagram::DataFlow),
            Stage::TextReport => None,
        }
    }

    /// File name this stage writes
    pub fn artifact(&self, format: OutputFormat) -> String {
        match self.diagram() {
            Some(diagram) => diagram.config().with_format(format).output_file_name(),
            None => REPORT_FILE_NAME.to_string(),
        }
    }

    /// Listing description of the artifact
    pub fn description(&self) -> &'static str {
        match self.diagram() {
            Some(diagram) => diagram.description(),
            None => "Text-based structure overview",
        }
    }

    fn progress_label(&self) -> &'static str {
        match self {
            Stage::MainDiagram => "main architecture diagram",
            Stage::ComponentDiagram => "component diagram",
            Stage::DataFlowDiagram => "data flow diagram",
            Stage::TextReport => "text overview",
        }
    }

    fn created_label(&self) -> &'static str {
        match self {
            Stage::MainDiagram => "Main architecture diagram",
            Stage::ComponentDiagram => "Component diagram",
            Stage::DataFlowDiagram => "Data flow diagram",
            Stage::TextReport => "Text overview",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::MainDiagram => write!(f, "main-diagram"),
            Stage::ComponentDiagram => write!(f, "component-diagram"),
            Stage::DataFlowDiagram => write!(f, "dataflow-diagram"),
            Stage::TextReport => write!(f, "text-report"),
        }
    }
}

/// How a run failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The rendering backend is not installed or not runnable
    MissingDependency,
    /// Anything else
    Generic,
}

/// Failure summary of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    /// Stage that was running, `None` when the backend probe failed
    pub stage: Option<Stage>,
    pub message: String,
}

/// Result of a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// Stages that completed, in order
    pub completed: Vec<Stage>,
    /// Files written by completed stages
    pub artifacts: Vec<PathBuf>,
    pub failure: Option<Failure>,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Driver options
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Directory all artifacts are written to
    pub output_dir: PathBuf,
    /// Image format for the diagrams
    pub format: OutputFormat,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            format: OutputFormat::default(),
        }
    }
}

impl OrchestratorConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(REPORT_FILE_NAME)
    }
}

/// Runs every stage against one rendering backend
pub struct Orchestrator<B: RenderBackend> {
    backend: B,
    config: OrchestratorConfig,
}

impl<B: RenderBackend> Orchestrator<B> {
    pub fn new(backend: B, config: OrchestratorConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Render one diagram on its own
    pub fn render_diagram(&self, diagram: StandardDiagram) -> Result<PathBuf, DiagramError> {
        diagram.emit(&self.backend, &self.config.output_dir, self.config.format)
    }

    /// Run every stage, reporting progress and failures on `console`
    ///
    /// Never returns an error: failures are printed with a hint and recorded
    /// in the outcome.
    pub fn run(&self, console: &mut dyn Write) -> RunOutcome {
        let run_span = span!(
            Level::INFO,
            "generate",
            backend = self.backend.name(),
            output_dir = %self.config.output_dir.display()
        );
        let _enter = run_span.enter();

        let mut outcome = RunOutcome::default();
        let mut current = None;

        if let Err(err) = self.run_stages(console, &mut outcome, &mut current) {
            let failure = classify(&err, current);
            error!(
                stage = ?failure.stage,
                kind = ?failure.kind,
                error = %failure.message,
                "Generation failed"
            );
            // Console errors here have nowhere left to go
            let _ = report_failure(console, &failure);
            outcome.failure = Some(failure);
        } else {
            info!(artifacts = outcome.artifacts.len(), "Generation completed");
        }
        outcome
    }

    fn run_stages(
        &self,
        console: &mut dyn Write,
        outcome: &mut RunOutcome,
        current: &mut Option<Stage>,
    ) -> Result<()> {
        writeln!(
            console,
            "🏗️  Generating DOC+ Medical Assistant Architecture Diagrams...\n"
        )?;

        self.backend.probe()?;
        std::fs::create_dir_all(&self.config.output_dir).with_context(|| {
            format!(
                "Failed to create output directory '{}'",
                self.config.output_dir.display()
            )
        })?;

        for (i, stage) in Stage::ALL.into_iter().enumerate() {
            *current = Some(stage);
            let stage_span = span!(Level::DEBUG, "stage", %stage);
            let _stage_enter = stage_span.enter();

            if i > 0 {
                writeln!(console)?;
            }
            writeln!(console, "📊 Generating {}...", stage.progress_label())?;

            let artifact = match stage.diagram() {
                Some(diagram) => {
                    let path = self.render_diagram(diagram)?;
                    writeln!(
                        console,
                        "✅ {} created: {}",
                        stage.created_label(),
                        stage.artifact(self.config.format)
                    )?;
                    path
                }
                None => {
                    let path = self.config.report_path();
                    write_report(&path, console)?;
                    path
                }
            };

            debug!(artifact = %artifact.display(), "Stage completed");
            outcome.completed.push(stage);
            outcome.artifacts.push(artifact);
        }
        *current = None;

        print_summary(console, self.config.format)?;
        Ok(())
    }
}

fn classify(err: &anyhow::Error, stage: Option<Stage>) -> Failure {
    // DiagramError messages already embed their source
    let (kind, message) = match err.downcast_ref::<DiagramError>() {
        Some(e) if e.is_missing_dependency() => (FailureKind::MissingDependency, e.to_string()),
        Some(e) => (FailureKind::Generic, e.to_string()),
        None => (FailureKind::Generic, format!("{err:#}")),
    };
    if kind == FailureKind::MissingDependency && stage.is_some() {
        warn!(?stage, "Backend disappeared after a successful probe");
    }
    Failure {
        kind,
        stage,
        message,
    }
}

fn report_failure(console: &mut dyn Write, failure: &Failure) -> std::io::Result<()> {
    match failure.kind {
        FailureKind::MissingDependency => {
            writeln!(console, "\n❌ Error: {}", failure.message)?;
            writeln!(console, "\n📦 Graphviz is required to render the diagrams:")?;
            writeln!(console, "   - Debian/Ubuntu: sudo apt-get install graphviz")?;
            writeln!(console, "   - macOS: brew install graphviz")?;
            writeln!(console, "   - Windows: choco install graphviz")?;
            writeln!(console, "   - Or download from: https://graphviz.org/download/")?;
            writeln!(
                console,
                "\nNote: set {DOT_ENV_VAR} to the path of the 'dot' executable if it is not on your PATH."
            )?;
        }
        FailureKind::Generic => {
            writeln!(console, "\n❌ An error occurred: {}", failure.message)?;
            writeln!(
                console,
                "\nPlease ensure Graphviz is installed and added to your PATH."
            )?;
        }
    }
    console.flush()
}

fn print_summary(console: &mut dyn Write, format: OutputFormat) -> std::io::Result<()> {
    let bar = "=".repeat(70);
    writeln!(console, "\n{bar}")?;
    writeln!(console, "🎉 All diagrams generated successfully!")?;
    writeln!(console, "{bar}")?;
    writeln!(console, "\nGenerated files:")?;
    for (i, stage) in Stage::ALL.iter().enumerate() {
        writeln!(
            console,
            "  {}. {} - {}",
            i + 1,
            stage.artifact(format),
            stage.description()
        )?;
    }
    writeln!(
        console,
        "\n💡 Tip: run `archviz dot <diagram>` to inspect the Graphviz source of a diagram."
    )?;
    console.flush()
}

/// Paths every stage of a run writes inside `dir`
pub fn expected_artifacts(dir: &Path, format: OutputFormat) -> Vec<PathBuf> {
    Stage::ALL
        .iter()
        .map(|stage| dir.join(stage.artifact(format)))
        .collect()
}
