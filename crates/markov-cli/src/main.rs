#![forbid(unsafe_code)]

mod cmd;
mod mermaid;
mod output;

use clap::{Parser, Subcommand};
use markov_core::ErrorCode;
use markov_core::config::{EffectiveConfig, resolve_config};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "markov: structure and limit analysis of discrete-time Markov chains",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Mode used before configuration has been loaded.
    fn fallback_output_mode(&self) -> OutputMode {
        match (self.format, self.json) {
            (Some(mode), _) => mode,
            (None, true) => OutputMode::Json,
            (None, false) => OutputMode::Text,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Input",
        about = "Validate a graph file",
        long_about = "Parse a graph file and check that every vertex's outgoing probabilities sum to 1.",
        after_help = "EXAMPLES:\n    # Validate a chain\n    markov check weather.txt\n\n    # Emit machine-readable output\n    markov check weather.txt --json"
    )]
    Check(cmd::check::CheckArgs),

    #[command(
        next_help_heading = "Diagrams",
        about = "Emit the state graph as Mermaid",
        long_about = "Emit the state graph as a Mermaid flowchart, to stdout or to a .mmd file.",
        after_help = "EXAMPLES:\n    # Print the diagram\n    markov graph weather.txt\n\n    # Write weather.mmd next to the input\n    markov graph weather.txt -o"
    )]
    Graph(cmd::graph::GraphArgs),

    #[command(
        next_help_heading = "Structure",
        about = "List communicating classes",
        long_about = "Decompose the chain into communicating classes and list the links between them.",
        after_help = "EXAMPLES:\n    # Show classes and links\n    markov classes chain.txt\n\n    # Emit machine-readable output\n    markov classes chain.txt --json"
    )]
    Classes(cmd::classes::ClassesArgs),

    #[command(
        next_help_heading = "Diagrams",
        about = "Emit the Hasse diagram as Mermaid",
        long_about = "Emit the Hasse diagram of the class order (transitive reduction of the class links).",
        after_help = "EXAMPLES:\n    # Print the reduced diagram\n    markov hasse chain.txt\n\n    # Keep every direct link and write chain_hasse.mmd\n    markov hasse chain.txt --direct -o"
    )]
    Hasse(cmd::hasse::HasseArgs),

    #[command(
        next_help_heading = "Numerics",
        about = "Print the transition matrix",
        long_about = "Print the dense transition matrix, or its K-th power.",
        after_help = "EXAMPLES:\n    # Print the matrix\n    markov matrix weather.txt\n\n    # Print the third power\n    markov matrix weather.txt --power 3"
    )]
    Matrix(cmd::matrix::MatrixArgs),

    #[command(
        next_help_heading = "Numerics",
        about = "Run the full analysis",
        long_about = "Classes, Hasse links, characteristics, stationary distributions, periods, and the limit of the chain.",
        after_help = "EXAMPLES:\n    # Analyze a chain\n    markov analyze weather.txt\n\n    # Emit machine-readable output\n    markov analyze weather.txt --format json"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MARKOV_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "markov=debug,info"
        } else {
            "markov=info,warn"
        })
    });

    let format = env::var("MARKOV_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn load_config(cli: &Cli, project_root: &Path) -> anyhow::Result<EffectiveConfig> {
    match resolve_config(project_root, cli.json) {
        Ok(config) => Ok(config),
        Err(err) => {
            render_error(
                cli.fallback_output_mode(),
                &CliError::from_code(format!("{err:#}"), ErrorCode::ConfigParseError),
            )?;
            Err(err)
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = env::current_dir()?;
    let config = load_config(&cli, &project_root)?;
    let output = resolve_output_mode(cli.format, &config.resolved_output);
    debug!(?output, "output mode resolved");

    let project = &config.project;
    match &cli.command {
        Commands::Check(args) => cmd::check::run_check(args, output, project),
        Commands::Graph(args) => cmd::graph::run_graph(args, output, project),
        Commands::Classes(args) => cmd::classes::run_classes(args, output),
        Commands::Hasse(args) => cmd::hasse::run_hasse(args, output),
        Commands::Matrix(args) => cmd::matrix::run_matrix(args, output),
        Commands::Analyze(args) => cmd::analyze::run_analyze(args, output, project),
    }
}
