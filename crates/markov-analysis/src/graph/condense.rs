//! Condensation of the state graph into inter-class links.
//!
//! Every edge `u → v` whose endpoints sit in different classes contributes
//! the link `(class(u), class(v))`. Links are deduplicated and kept in the
//! order they are first observed (vertices ascending, then adjacency order).

use std::collections::HashSet;

use markov_core::MarkovGraph;
use serde::Serialize;
use tracing::{debug, instrument};

use super::scc::{ClassId, Partition};

/// Directed link between two distinct classes (class indices).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Link {
    pub from: usize,
    pub to: usize,
}

impl Link {
    #[must_use]
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Display names of both endpoints (`("C1", "C2")`).
    #[must_use]
    pub fn names(self) -> (String, String) {
        (ClassId::new(self.from).name(), ClassId::new(self.to).name())
    }
}

/// Insertion-ordered set of [`Link`]s without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LinkSet {
    links: Vec<Link>,
    #[serde(skip)]
    seen: HashSet<Link>,
}

impl LinkSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a link; returns `false` if it was already present.
    pub fn insert(&mut self, link: Link) -> bool {
        if !self.seen.insert(link) {
            return false;
        }
        self.links.push(link);
        true
    }

    #[must_use]
    pub fn contains(&self, link: Link) -> bool {
        self.seen.contains(&link)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Link> + '_ {
        self.links.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Link] {
        &self.links
    }

    /// `true` if class `class` has at least one outgoing link.
    #[must_use]
    pub fn has_outgoing(&self, class: usize) -> bool {
        self.links.iter().any(|l| l.from == class)
    }

    /// Largest class index mentioned, plus one.
    #[must_use]
    pub fn class_bound(&self) -> usize {
        self.links
            .iter()
            .map(|l| l.from.max(l.to) + 1)
            .max()
            .unwrap_or(0)
    }
}

impl FromIterator<Link> for LinkSet {
    fn from_iter<I: IntoIterator<Item = Link>>(iter: I) -> Self {
        let mut set = Self::new();
        for link in iter {
            set.insert(link);
        }
        set
    }
}

impl<'a> IntoIterator for &'a LinkSet {
    type Item = Link;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Link>>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter().copied()
    }
}

/// Build the direct link set between the classes of `partition`.
///
/// Edges whose endpoints have no class (out of range for the partition) are
/// skipped; [`super::decompose`] has already rejected such graphs.
#[must_use]
#[instrument(skip(partition, graph), fields(classes = partition.class_count()))]
pub fn condense(partition: &Partition, graph: &MarkovGraph) -> LinkSet {
    let mut links = LinkSet::new();

    for (vertex, edges) in graph.vertices() {
        let Some(from) = partition.class_of(vertex) else {
            continue;
        };
        for edge in edges {
            let Some(to) = partition.class_of(edge.to) else {
                continue;
            };
            if from != to {
                links.insert(Link::new(from, to));
            }
        }
    }

    debug!(links = links.len(), "condensation complete");
    links
}
