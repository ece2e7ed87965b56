//! `markov check`: parse a graph file and validate row-stochasticity.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use markov_core::config::ProjectConfig;
use markov_core::validate::{StochasticReport, check_stochastic};
use serde::Serialize;

use crate::cmd::{load_graph, not_stochastic};
use crate::output::{OutputMode, pretty_kv, pretty_section, prob, render_error, render_mode};

/// Arguments for `markov check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Input graph file.
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
struct CheckOutput {
    file: String,
    vertex_count: usize,
    edge_count: usize,
    content_hash: String,
    #[serde(flatten)]
    report: StochasticReport,
}

/// Execute `markov check`.
pub fn run_check(
    args: &CheckArgs,
    output: OutputMode,
    config: &ProjectConfig,
) -> anyhow::Result<()> {
    let graph = load_graph(&args.file, output)?;
    let report = check_stochastic(&graph, config.analysis.stochastic_tolerance);

    let payload = CheckOutput {
        file: args.file.display().to_string(),
        vertex_count: graph.vertex_count(),
        edge_count: graph.edge_count(),
        content_hash: graph.content_hash(),
        report,
    };
    render_mode(output, &payload, render_check_text, render_check_pretty)?;

    if !payload.report.valid {
        render_error(output, &not_stochastic(&payload.report))?;
        anyhow::bail!("graph is not row-stochastic");
    }
    Ok(())
}

fn render_check_text(payload: &CheckOutput, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        w,
        "{}  vertices={}  edges={}  {}",
        if payload.report.valid { "valid" } else { "invalid" },
        payload.vertex_count,
        payload.edge_count,
        payload.content_hash
    )?;
    for row in payload.report.invalid_rows() {
        writeln!(w, "row {}  sum={}", row.vertex, prob(row.sum))?;
    }
    Ok(())
}

fn render_check_pretty(payload: &CheckOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Graph check: {}", payload.file))?;
    pretty_kv(w, "Vertices", payload.vertex_count.to_string())?;
    pretty_kv(w, "Edges", payload.edge_count.to_string())?;
    pretty_kv(w, "Hash", &payload.content_hash)?;
    pretty_kv(w, "Tolerance", prob(payload.report.tolerance))?;
    writeln!(w)?;
    for row in &payload.report.rows {
        let mark = if row.valid { "✓" } else { "✗" };
        writeln!(w, "  {mark} vertex {:<4} sum {}", row.vertex, prob(row.sum))?;
    }
    writeln!(w)?;
    if payload.report.valid {
        writeln!(w, "The graph is a Markov graph.")
    } else {
        writeln!(w, "The graph is not a Markov graph.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markov_core::parse::parse_graph;

    fn payload(text: &str) -> CheckOutput {
        let graph = parse_graph(text).unwrap();
        CheckOutput {
            file: "g.txt".into(),
            vertex_count: graph.vertex_count(),
            edge_count: graph.edge_count(),
            content_hash: graph.content_hash(),
            report: check_stochastic(&graph, 0.01),
        }
    }

    #[test]
    fn text_lists_only_invalid_rows() {
        let p = payload("2\n1 2 0.5\n2 2 1.0\n");
        let mut buf = Vec::new();
        render_check_text(&p, &mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.starts_with("invalid  vertices=2  edges=2"));
        assert!(s.contains("row 1  sum=0.5000"));
        assert!(!s.contains("row 2"));
    }

    #[test]
    fn pretty_marks_every_row() {
        let p = payload("2\n1 2 1.0\n2 2 1.0\n");
        let mut buf = Vec::new();
        render_check_pretty(&p, &mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(s.matches('✓').count(), 2);
        assert!(s.contains("The graph is a Markov graph."));
    }

    #[test]
    fn json_flattens_report() {
        let p = payload("1\n1 1 1.0\n");
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["valid"], true);
        assert_eq!(v["rows"][0]["vertex"], 1);
        assert_eq!(v["vertex_count"], 1);
    }
}
