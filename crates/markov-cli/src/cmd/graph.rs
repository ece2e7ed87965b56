//! `markov graph`: emit the state graph as a Mermaid flowchart.

use std::path::PathBuf;

use clap::Args;
use markov_core::config::ProjectConfig;

use crate::cmd::{diagram_target, emit_diagram, load_graph};
use crate::mermaid::state_diagram;
use crate::output::OutputMode;

/// Arguments for `markov graph`.
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Input graph file.
    pub file: PathBuf,

    /// Write the diagram to a file instead of stdout. Without a value, the
    /// input file name with a `.mmd` extension is used.
    #[arg(short = 'o', long = "output", value_name = "OUT")]
    pub out: Option<Option<PathBuf>>,
}

/// Execute `markov graph`.
pub fn run_graph(args: &GraphArgs, output: OutputMode, config: &ProjectConfig) -> anyhow::Result<()> {
    let graph = load_graph(&args.file, output)?;
    let diagram = state_diagram(&graph, &config.mermaid);
    let target = diagram_target(&args.file, args.out.as_ref(), "");
    emit_diagram(output, "State graph", diagram, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: GraphArgs,
    }

    #[test]
    fn output_flag_is_optional_valued() {
        let none = Wrapper::parse_from(["test", "g.txt"]);
        assert!(none.args.out.is_none());

        let bare = Wrapper::parse_from(["test", "g.txt", "-o"]);
        assert_eq!(bare.args.out, Some(None));

        let named = Wrapper::parse_from(["test", "g.txt", "--output", "x.mmd"]);
        assert_eq!(named.args.out, Some(Some(PathBuf::from("x.mmd"))));
    }
}
