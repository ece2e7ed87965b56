//! `markov matrix`: print the transition matrix or one of its powers.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use markov_analysis::matrix::{matrix_power, rows, transition_matrix};
use markov_core::vertex_label;
use serde::Serialize;

use crate::cmd::{analysis_failed, load_graph};
use crate::output::{OutputMode, pretty_section, prob, render_mode};

/// Arguments for `markov matrix`.
#[derive(Args, Debug)]
pub struct MatrixArgs {
    /// Input graph file.
    pub file: PathBuf,

    /// Raise the matrix to this power.
    #[arg(long, value_name = "K", default_value_t = 1)]
    pub power: usize,
}

#[derive(Debug, Serialize)]
struct MatrixOutput {
    power: usize,
    labels: Vec<String>,
    rows: Vec<Vec<f32>>,
}

/// Execute `markov matrix`.
pub fn run_matrix(args: &MatrixArgs, output: OutputMode) -> anyhow::Result<()> {
    let graph = load_graph(&args.file, output)?;
    let matrix = transition_matrix(&graph).map_err(|e| analysis_failed(output, e))?;
    let powered = if args.power == 1 {
        matrix
    } else {
        matrix_power(&matrix, args.power)
    };

    let payload = MatrixOutput {
        power: args.power,
        labels: (1..=graph.vertex_count()).map(vertex_label).collect(),
        rows: rows(&powered),
    };
    render_mode(output, &payload, render_matrix_text, render_matrix_pretty)
}

fn render_matrix_text(payload: &MatrixOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &payload.rows {
        let cells: Vec<String> = row.iter().map(|&p| prob(p)).collect();
        writeln!(w, "{}", cells.join(" "))?;
    }
    Ok(())
}

fn render_matrix_pretty(payload: &MatrixOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let heading = if payload.power == 1 {
        "Transition matrix".to_string()
    } else {
        format!("Transition matrix ^ {}", payload.power)
    };
    pretty_section(w, &heading)?;

    write!(w, "{:>6}", "")?;
    for label in &payload.labels {
        write!(w, " {label:>7}")?;
    }
    writeln!(w)?;
    for (label, row) in payload.labels.iter().zip(&payload.rows) {
        write!(w, "{label:>6}")?;
        for &p in row {
            write!(w, " {:>7}", prob(p))?;
        }
        writeln!(w)?;
    }
    Ok(())
}
