//! Command-line interface for the archviz utility
//!
//! Renders the DOC+ architecture diagrams, prints their DOT source and
//! writes the text overview.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

use archviz::catalog::StandardDiagram;
use archviz::core::logging::init_logging;
use archviz::orchestrator::{Orchestrator, OrchestratorConfig, Stage};
use archviz::report::{write_report, REPORT_FILE_NAME};
use archviz::{GraphvizBackend, OutputFormat};

/// Archviz - architecture diagrams for the DOC+ Medical Assistant
#[derive(Parser)]
#[command(name = "archviz")]
#[command(about = "Generate the DOC+ architecture diagrams with Graphviz")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    /// Defaults to `generate` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Render every diagram and write the text overview
    Generate {
        /// Directory the files are written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Image format for the diagrams
        #[arg(short, long, value_enum, default_value_t = FormatChoice::Png)]
        format: FormatChoice,
    },

    /// List the generated artifacts
    List {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the Graphviz DOT source of one diagram
    Dot {
        #[arg(value_enum)]
        diagram: DiagramChoice,

        /// Output file for the DOT source (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print and save the text overview only
    Report {
        /// File the overview is saved to
        #[arg(short, long, default_value = REPORT_FILE_NAME)]
        output: PathBuf,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Generate {
            output_dir: PathBuf::from("."),
            format: FormatChoice::Png,
        }
    }
}

/// Supported image formats
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum FormatChoice {
    #[default]
    Png,
    Svg,
    Pdf,
    /// Laid-out DOT source, useful for debugging layouts
    Dot,
}

impl From<FormatChoice> for OutputFormat {
    fn from(value: FormatChoice) -> Self {
        match value {
            FormatChoice::Png => OutputFormat::Png,
            FormatChoice::Svg => OutputFormat::Svg,
            FormatChoice::Pdf => OutputFormat::Pdf,
            FormatChoice::Dot => OutputFormat::Dot,
        }
    }
}

/// The standard diagrams, by command-line name
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum DiagramChoice {
    Architecture,
    Components,
    Dataflow,
}

impl From<DiagramChoice> for StandardDiagram {
    fn from(value: DiagramChoice) -> Self {
        match value {
            DiagramChoice::Architecture => StandardDiagram::Architecture,
            DiagramChoice::Components => StandardDiagram::Components,
            DiagramChoice::Dataflow => StandardDiagram::DataFlow,
        }
    }
}

/// One row of `archviz list`
#[derive(Debug, Serialize)]
struct ArtifactEntry {
    stage: String,
    file: String,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagram: Option<StandardDiagram>,
}

impl ArtifactEntry {
    fn all(format: OutputFormat) -> Vec<Self> {
        Stage::ALL
            .iter()
            .map(|stage| Self {
                stage: stage.to_string(),
                file: stage.artifact(format),
                description: stage.description(),
                diagram: stage.diagram(),
            })
            .collect()
    }
}

/// Main CLI application
#[derive(Default)]
pub struct ArchvizApp;

impl ArchvizApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("ARCHVIZ_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("ARCHVIZ_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Archviz v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command.unwrap_or_default() {
            Commands::Generate { output_dir, format } => {
                self.generate_command(output_dir, format, cli.verbose)
            }
            Commands::List { json } => self.list_command(json, cli.verbose),
            Commands::Dot { diagram, output } => self.dot_command(diagram, output, cli.verbose),
            Commands::Report { output } => self.report_command(output, cli.verbose),
        }
    }

    /// Handle the generate command
    fn generate_command(
        &self,
        output_dir: PathBuf,
        format: FormatChoice,
        verbose: bool,
    ) -> Result<()> {
        let backend = GraphvizBackend::from_env();
        if verbose {
            eprintln!(
                "Using Graphviz at '{}', writing to '{}'",
                backend.program().display(),
                output_dir.display()
            );
        }

        let config = OrchestratorConfig::new(output_dir).with_format(format.into());
        let orchestrator = Orchestrator::new(backend, config);
        let outcome = orchestrator.run(&mut io::stdout().lock());

        match outcome.failure {
            None => {
                debug!(artifacts = outcome.artifacts.len(), "Generate finished");
                Ok(())
            }
            // The driver already printed the diagnostics
            Some(failure) => Err(anyhow!(
                "generation stopped after {} of {} stages",
                outcome.completed.len(),
                Stage::ALL.len()
            )
            .context(failure.message)),
        }
    }

    /// Handle the list command
    fn list_command(&self, json: bool, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing generated artifacts");
        }

        let entries = ArtifactEntry::all(OutputFormat::default());
        if json {
            let listing = serde_json::json!({
                "artifacts": entries,
                "total": entries.len(),
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        } else {
            println!("Generated artifacts:");
            for entry in &entries {
                println!("  {:<28} - {}", entry.file, entry.description);
            }
            println!();
            println!("Total: {} files", entries.len());
        }

        Ok(())
    }

    /// Handle the dot command
    fn dot_command(
        &self,
        diagram: DiagramChoice,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let diagram = StandardDiagram::from(diagram);
        let dot = diagram.dot()?;

        if verbose {
            eprintln!("Serialized {} diagram ({} bytes)", diagram, dot.len());
        }

        self.write_output(output, &dot)
    }

    /// Handle the report command
    fn report_command(&self, output: PathBuf, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Writing overview to '{}'", output.display());
        }
        write_report(&output, &mut io::stdout().lock())?;
        Ok(())
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                if !content.is_empty() && !content.ends_with('\n') {
                    writeln!(stdout)?;
                }
                stdout.flush()?;
            }
        }
        Ok(())
    }
}
