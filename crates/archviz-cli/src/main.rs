//! Archviz CLI - render the DOC+ architecture diagrams

mod cli;

use clap::Parser;

fn main() {
    // Logging is initialized by the app once the flags are known
    let cli_args = cli::Cli::parse();

    let mut app = cli::ArchvizApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
