//! `markov hasse`: emit the Hasse diagram of the class order.

use std::path::PathBuf;

use clap::Args;
use markov_analysis::graph::{condense, decompose, reduce};
use tracing::debug;

use crate::cmd::{analysis_failed, diagram_target, emit_diagram, load_graph};
use crate::mermaid::hasse_diagram;
use crate::output::OutputMode;

/// Arguments for `markov hasse`.
#[derive(Args, Debug)]
pub struct HasseArgs {
    /// Input graph file.
    pub file: PathBuf,

    /// Write the diagram to a file instead of stdout. Without a value,
    /// `<input stem>_hasse.mmd` next to the input is used.
    #[arg(short = 'o', long = "output", value_name = "OUT")]
    pub out: Option<Option<PathBuf>>,

    /// Draw every direct link instead of the transitive reduction.
    #[arg(long)]
    pub direct: bool,
}

/// Execute `markov hasse`.
pub fn run_hasse(args: &HasseArgs, output: OutputMode) -> anyhow::Result<()> {
    let graph = load_graph(&args.file, output)?;
    let partition = decompose(&graph).map_err(|e| analysis_failed(output, e))?;
    let direct = condense(&partition, &graph);
    let links = if args.direct { direct } else { reduce(&direct) };
    debug!(links = links.len(), direct = args.direct, "hasse links selected");

    let diagram = hasse_diagram(partition.classes(), &links);
    let target = diagram_target(&args.file, args.out.as_ref(), "_hasse");
    emit_diagram(output, "Hasse", diagram, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: HasseArgs,
    }

    #[test]
    fn direct_flag_defaults_off() {
        let parsed = Wrapper::parse_from(["test", "g.txt"]);
        assert!(!parsed.args.direct);
        let parsed = Wrapper::parse_from(["test", "g.txt", "--direct", "-o", "h.mmd"]);
        assert!(parsed.args.direct);
        assert_eq!(parsed.args.out, Some(Some(PathBuf::from("h.mmd"))));
    }
}
