//! `markov classes`: communicating classes, direct links, characteristics.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use markov_analysis::graph::{Characteristics, LinkSet, Partition, classify, condense, decompose};
use serde::Serialize;

use crate::cmd::{analysis_failed, class_kind, load_graph};
use crate::output::{OutputMode, member_set, pretty_kv, pretty_section, render_mode};

/// Arguments for `markov classes`.
#[derive(Args, Debug)]
pub struct ClassesArgs {
    /// Input graph file.
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
struct ClassRow {
    name: String,
    members: Vec<usize>,
    persistent: bool,
    absorbing: bool,
}

#[derive(Debug, Serialize)]
struct LinkRow {
    from: String,
    to: String,
}

fn link_rows(links: &LinkSet) -> Vec<LinkRow> {
    links
        .iter()
        .map(|link| {
            let (from, to) = link.names();
            LinkRow { from, to }
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct ClassesOutput {
    classes: Vec<ClassRow>,
    links: Vec<LinkRow>,
    characteristics: Characteristics,
}

impl ClassesOutput {
    fn new(partition: &Partition, links: &LinkSet, characteristics: Characteristics) -> Self {
        let classes = partition
            .classes()
            .iter()
            .map(|class| {
                let persistent = characteristics.is_persistent(class.id.index());
                ClassRow {
                    name: class.name(),
                    members: class.members.clone(),
                    persistent,
                    absorbing: persistent && class.len() == 1,
                }
            })
            .collect();
        Self {
            classes,
            links: link_rows(links),
            characteristics,
        }
    }
}

/// Execute `markov classes`.
pub fn run_classes(args: &ClassesArgs, output: OutputMode) -> anyhow::Result<()> {
    let graph = load_graph(&args.file, output)?;
    let partition = decompose(&graph).map_err(|e| analysis_failed(output, e))?;
    let links = condense(&partition, &graph);
    let characteristics = classify(&partition, &links);

    let payload = ClassesOutput::new(&partition, &links, characteristics);
    render_mode(output, &payload, render_classes_text, render_classes_pretty)
}

fn render_classes_text(payload: &ClassesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for class in &payload.classes {
        writeln!(
            w,
            "{}  {}  {}",
            class.name,
            member_set(&class.members),
            class_kind(class.persistent, class.absorbing)
        )?;
    }
    for link in &payload.links {
        writeln!(w, "{} -> {}", link.from, link.to)?;
    }
    writeln!(
        w,
        "irreducible={}  absorbing_states={}",
        payload.characteristics.is_irreducible,
        member_set(&payload.characteristics.absorbing_states)
    )
}

fn render_classes_pretty(payload: &ClassesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Classes ({})", payload.classes.len()))?;
    for class in &payload.classes {
        writeln!(
            w,
            "  {:<6} {:<24} {}",
            class.name,
            member_set(&class.members),
            class_kind(class.persistent, class.absorbing)
        )?;
    }
    writeln!(w)?;

    pretty_section(w, &format!("Links ({})", payload.links.len()))?;
    if payload.links.is_empty() {
        writeln!(w, "  (none)")?;
    }
    for link in &payload.links {
        writeln!(w, "  {} -> {}", link.from, link.to)?;
    }
    writeln!(w)?;

    render_characteristics_pretty(&payload.characteristics, w)
}

pub(crate) fn render_characteristics_pretty(
    characteristics: &Characteristics,
    w: &mut dyn Write,
) -> std::io::Result<()> {
    pretty_section(w, "Characteristics")?;
    pretty_kv(
        w,
        "Irreducible",
        if characteristics.is_irreducible { "yes" } else { "no" },
    )?;
    let absorbing = if characteristics.has_absorbing_state {
        member_set(&characteristics.absorbing_states)
    } else {
        "none".to_string()
    };
    pretty_kv(w, "Absorbing", absorbing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use markov_core::parse::parse_graph;

    fn payload(text: &str) -> ClassesOutput {
        let graph = parse_graph(text).unwrap();
        let partition = decompose(&graph).unwrap();
        let links = condense(&partition, &graph);
        let characteristics = classify(&partition, &links);
        ClassesOutput::new(&partition, &links, characteristics)
    }

    #[test]
    fn text_lists_classes_links_and_traits() {
        let p = payload("2\n1 2 1.0\n2 2 1.0\n");
        let mut buf = Vec::new();
        render_classes_text(&p, &mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(
            s,
            "C1  {2}  persistent absorbing\nC2  {1}  transient\nC2 -> C1\nirreducible=false  absorbing_states={2}\n"
        );
    }

    #[test]
    fn pretty_marks_missing_links() {
        let p = payload("2\n1 2 1.0\n2 1 1.0\n");
        let mut buf = Vec::new();
        render_classes_pretty(&p, &mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.contains("Links (0)"));
        assert!(s.contains("(none)"));
        assert!(s.contains("Irreducible:   yes"));
        assert!(s.contains("Absorbing:     none"));
    }
}
