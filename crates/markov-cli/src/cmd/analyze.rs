//! `markov analyze`: full pipeline: classes, Hasse links, characteristics,
//! stationary distributions, periods, and the limit of the whole chain.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use markov_analysis::{ChainReport, analyze};
use markov_core::config::ProjectConfig;
use markov_core::validate::check_stochastic;
use tracing::warn;

use crate::cmd::classes::render_characteristics_pretty;
use crate::cmd::{analysis_failed, class_kind, load_graph, not_stochastic};
use crate::output::{
    OutputMode, member_set, pretty_kv, pretty_section, prob, render_error, render_mode,
};

/// Arguments for `markov analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Input graph file.
    pub file: PathBuf,

    /// Analyze even when some rows do not sum to 1.
    #[arg(long)]
    pub allow_non_stochastic: bool,
}

/// Execute `markov analyze`.
pub fn run_analyze(
    args: &AnalyzeArgs,
    output: OutputMode,
    config: &ProjectConfig,
) -> anyhow::Result<()> {
    let graph = load_graph(&args.file, output)?;

    let stochastic = check_stochastic(&graph, config.analysis.stochastic_tolerance);
    if !stochastic.valid {
        if !args.allow_non_stochastic {
            render_error(output, &not_stochastic(&stochastic))?;
            anyhow::bail!("graph is not row-stochastic");
        }
        warn!("analyzing a graph that is not row-stochastic");
    }

    let report = analyze(&graph, &config.analysis).map_err(|e| analysis_failed(output, e))?;
    render_mode(output, &report, render_report_text, render_report_pretty)
}

fn convergence(converged: bool, iterations: usize) -> String {
    if converged {
        format!("converged after {iterations}")
    } else {
        format!("not converged after {iterations}")
    }
}

fn render_report_text(report: &ChainReport, w: &mut dyn Write) -> std::io::Result<()> {
    for class in &report.classes {
        write!(
            w,
            "{}  {}  {}",
            class.name,
            member_set(&class.members),
            class_kind(class.persistent, class.absorbing)
        )?;
        if let Some(period) = class.period {
            write!(w, "  period={period}")?;
        }
        if let Some(stationary) = &class.stationary {
            let values: Vec<String> = stationary.distribution.iter().map(|&p| prob(p)).collect();
            write!(
                w,
                "  stationary=[{}]  converged={}",
                values.join(" "),
                stationary.converged
            )?;
        }
        writeln!(w)?;
    }
    for link in &report.hasse_links {
        let (from, to) = link.names();
        writeln!(w, "{from} -> {to}")?;
    }
    writeln!(
        w,
        "irreducible={}  absorbing_states={}  limit_converged={}  iterations={}",
        report.characteristics.is_irreducible,
        member_set(&report.characteristics.absorbing_states),
        report.limit.converged,
        report.limit.iterations
    )
}

fn render_report_pretty(report: &ChainReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Markov chain analysis")?;
    pretty_kv(w, "States", report.vertex_count.to_string())?;
    pretty_kv(w, "Hash", &report.content_hash)?;
    pretty_kv(w, "Classes", report.classes.len().to_string())?;
    writeln!(w)?;

    pretty_section(w, "Classes")?;
    for class in &report.classes {
        writeln!(
            w,
            "  {:<6} {:<24} {}",
            class.name,
            member_set(&class.members),
            class_kind(class.persistent, class.absorbing)
        )?;
    }
    writeln!(w)?;

    pretty_section(w, &format!("Hasse links ({})", report.hasse_links.len()))?;
    if report.hasse_links.is_empty() {
        writeln!(w, "  (none)")?;
    }
    for link in &report.hasse_links {
        let (from, to) = link.names();
        writeln!(w, "  {from} -> {to}")?;
    }
    writeln!(w)?;

    render_characteristics_pretty(&report.characteristics, w)?;
    writeln!(w)?;

    pretty_section(w, "Persistent classes")?;
    for class in report.persistent_classes() {
        writeln!(w, "  {} {}", class.name, member_set(&class.members))?;
        if let Some(period) = class.period {
            let note = if period == 1 { " (aperiodic)" } else { "" };
            writeln!(w, "    period      {period}{note}")?;
        }
        if let Some(stationary) = &class.stationary {
            for (vertex, p) in class.members.iter().zip(&stationary.distribution) {
                writeln!(w, "    π({vertex:<3})      {}", prob(*p))?;
            }
            writeln!(
                w,
                "    power       {}",
                convergence(stationary.converged, stationary.iterations)
            )?;
        }
    }
    writeln!(w)?;

    pretty_section(w, "Limit of the chain")?;
    pretty_kv(
        w,
        "Power",
        convergence(report.limit.converged, report.limit.iterations),
    )?;
    for (idx, row) in report.limit.rows.iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|&p| prob(p)).collect();
        writeln!(w, "  {:>4}  {}", idx + 1, cells.join(" "))?;
    }
    Ok(())
}
