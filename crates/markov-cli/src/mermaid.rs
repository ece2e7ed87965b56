//! Mermaid flowchart emission for the state graph and the Hasse diagram.

use std::fmt::Write as FmtWrite;

use markov_analysis::graph::{Class, ClassId, LinkSet};
use markov_core::config::MermaidConfig;
use markov_core::{MarkovGraph, vertex_label};

use crate::output::{member_set, prob};

/// State graph: config front matter, one circle per vertex, one labelled
/// arrow per edge in adjacency order.
pub fn state_diagram(graph: &MarkovGraph, config: &MermaidConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "---");
    let _ = writeln!(out, "config:");
    let _ = writeln!(out, " layout: {}", config.layout);
    let _ = writeln!(out, " theme: {}", config.theme);
    let _ = writeln!(out, " look: {}", config.look);
    let _ = writeln!(out, "---");
    let _ = writeln!(out, "flowchart LR");

    for (vertex, _) in graph.vertices() {
        let _ = writeln!(out, "{}(({vertex}))", vertex_label(vertex));
    }
    for (vertex, edges) in graph.vertices() {
        let from = vertex_label(vertex);
        for edge in edges {
            let _ = writeln!(
                out,
                "{from} -->|{}|{}",
                prob(edge.probability),
                vertex_label(edge.to)
            );
        }
    }
    out
}

/// Hasse diagram: one box per class labelled with its members, one arrow per
/// link.
pub fn hasse_diagram(classes: &[Class], links: &LinkSet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "flowchart LR");
    for class in classes {
        let name = class.name();
        let _ = writeln!(out, "{name}[\"{name} {}\"]", member_set(&class.members));
    }
    for link in links {
        let _ = writeln!(
            out,
            "{} --> {}",
            ClassId::new(link.from),
            ClassId::new(link.to)
        );
    }
    out
}
