//! Command handlers, one module per subcommand.

pub mod analyze;
pub mod check;
pub mod classes;
pub mod graph;
pub mod hasse;
pub mod matrix;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use markov_analysis::AnalysisError;
use markov_core::parse::read_graph;
use markov_core::validate::StochasticReport;
use markov_core::{ErrorCode, MarkovGraph};
use serde::Serialize;

use crate::output::{CliError, OutputMode, prob, render, render_error};

/// Read `path`, rendering a coded error on failure.
pub(crate) fn load_graph(path: &Path, output: OutputMode) -> anyhow::Result<MarkovGraph> {
    match read_graph(path) {
        Ok(graph) => Ok(graph),
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            Err(err).with_context(|| format!("failed to load {}", path.display()))
        }
    }
}

/// Render an analysis failure and turn it into the command's error.
pub(crate) fn analysis_failed(output: OutputMode, err: AnalysisError) -> anyhow::Error {
    if let Err(render_err) = render_error(output, &CliError::from(&err)) {
        return render_err;
    }
    anyhow::Error::new(err).context("analysis failed")
}

/// Error for a graph whose rows do not sum to 1.
pub(crate) fn not_stochastic(report: &StochasticReport) -> CliError {
    let rows: Vec<String> = report
        .invalid_rows()
        .map(|row| format!("{} ({})", row.vertex, prob(row.sum)))
        .collect();
    CliError::from_code(
        format!("rows not summing to 1: {}", rows.join(", ")),
        ErrorCode::NotStochastic,
    )
}

/// Short description of a class for listings.
pub(crate) const fn class_kind(persistent: bool, absorbing: bool) -> &'static str {
    match (persistent, absorbing) {
        (true, true) => "persistent absorbing",
        (true, false) => "persistent",
        _ => "transient",
    }
}

/// Where `-o/--output` sends a diagram.
///
/// `None` prints to stdout, `Some(None)` derives a file name from the input,
/// `Some(Some(path))` writes to `path`.
pub(crate) fn diagram_target(
    input: &Path,
    requested: Option<&Option<PathBuf>>,
    suffix: &str,
) -> Option<PathBuf> {
    match requested {
        None => None,
        Some(Some(path)) => Some(path.clone()),
        Some(None) => {
            let stem = input
                .file_stem()
                .map_or_else(|| "graph".into(), |s| s.to_string_lossy().into_owned());
            Some(input.with_file_name(format!("{stem}{suffix}.mmd")))
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct DiagramOutput {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub diagram: String,
}

/// Write a diagram to its target (if any) and report it.
pub(crate) fn emit_diagram(
    output: OutputMode,
    kind: &'static str,
    diagram: String,
    target: Option<PathBuf>,
) -> anyhow::Result<()> {
    if let Some(path) = &target {
        std::fs::write(path, &diagram)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), kind, "diagram written");
    }

    let payload = DiagramOutput {
        kind,
        path: target.map(|p| p.display().to_string()),
        diagram,
    };
    render(output, &payload, render_diagram_human)
}

fn render_diagram_human(payload: &DiagramOutput, w: &mut dyn Write) -> std::io::Result<()> {
    match &payload.path {
        Some(path) => writeln!(w, "{} diagram saved in '{path}'", payload.kind),
        None => write!(w, "{}", payload.diagram),
    }
}
