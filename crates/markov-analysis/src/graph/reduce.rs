//! Transitive reduction of a class link set (Hasse diagram).
//!
//! A link `a → b` is redundant when `b` is already reachable from `a`
//! through some other successor of `a`. Dropping every redundant link of a
//! DAG gives the unique minimal set with the same reachability.

use fixedbitset::FixedBitSet;
use petgraph::{
    Direction,
    algo::toposort,
    graph::{DiGraph, NodeIndex},
};
use tracing::{debug, instrument, warn};

use super::condense::{Link, LinkSet};

impl LinkSet {
    /// Minimal link set with the same reachability as `self`.
    ///
    /// See [`reduce`].
    #[must_use]
    pub fn transitive_reduction(&self) -> Self {
        reduce(self)
    }
}

/// Compute the transitive reduction of `links`.
///
/// # Algorithm
///
/// Classes are processed in reverse topological order (sinks first). Each
/// class gets a bitset of every class reachable from it through at least one
/// link. A link `(u, v)` is kept unless `v` is in the reachable set of another
/// direct successor `w ≠ v` of `u`.
///
/// Kept links preserve input order. A cyclic input cannot come out of
/// [`super::condense`]; if one is passed anyway, it is returned unchanged.
#[must_use]
#[instrument(skip(links), fields(links = links.len()))]
pub fn reduce(links: &LinkSet) -> LinkSet {
    let node_count = links.class_bound();
    let mut dag: DiGraph<(), ()> = DiGraph::with_capacity(node_count, links.len());
    for _ in 0..node_count {
        dag.add_node(());
    }
    for link in links {
        dag.add_edge(NodeIndex::new(link.from), NodeIndex::new(link.to), ());
    }

    let Ok(topo) = toposort(&dag, None) else {
        warn!("link set contains a cycle; returning it unreduced");
        return links.clone();
    };

    let mut reachable = vec![FixedBitSet::with_capacity(node_count); node_count];
    for &u in topo.iter().rev() {
        let mut reach_u = FixedBitSet::with_capacity(node_count);
        for v in dag.neighbors_directed(u, Direction::Outgoing) {
            reach_u.insert(v.index());
            reach_u.union_with(&reachable[v.index()]);
        }
        reachable[u.index()] = reach_u;
    }

    let reduced: LinkSet = links
        .iter()
        .filter(|link| {
            !dag.neighbors_directed(NodeIndex::new(link.from), Direction::Outgoing)
                .map(NodeIndex::index)
                .filter(|&w| w != link.to)
                .any(|w| reachable[w].contains(link.to))
        })
        .collect();

    debug!(
        removed = links.len() - reduced.len(),
        kept = reduced.len(),
        "transitive reduction complete"
    );
    reduced
}

/// `true` if `to` is reachable from `from` following `links`.
#[must_use]
pub fn reaches(links: &LinkSet, from: usize, to: usize) -> bool {
    let bound = links.class_bound().max(from + 1).max(to + 1);
    let mut seen = FixedBitSet::with_capacity(bound);
    let mut stack = vec![from];
    while let Some(u) = stack.pop() {
        for Link { to: next, .. } in links.iter().filter(|l| l.from == u) {
            if next == to {
                return true;
            }
            if !seen.put(next) {
                stack.push(next);
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(pairs: &[(usize, usize)]) -> LinkSet {
        pairs.iter().map(|&(a, b)| Link::new(a, b)).collect()
    }

    #[test]
    fn removes_shortcut_over_chain() {
        // A -> B -> C with a redundant A -> C.
        let links = set(&[(0, 1), (1, 2), (0, 2)]);
        let reduced = reduce(&links);
        assert_eq!(reduced, set(&[(0, 1), (1, 2)]));
    }

    #[test]
    fn minimal_set_is_unchanged() {
        let links = set(&[(0, 1), (1, 2)]);
        assert_eq!(reduce(&links), links);
    }

    #[test]
    fn diamond_drops_the_diagonal() {
        let links = set(&[(0, 3), (0, 1), (0, 2), (1, 3), (2, 3)]);
        let reduced = links.transitive_reduction();
        assert_eq!(reduced, set(&[(0, 1), (0, 2), (1, 3), (2, 3)]));
    }

    #[test]
    fn long_shortcut_is_removed() {
        let links = set(&[(0, 4), (0, 1), (1, 2), (2, 3), (3, 4)]);
        let reduced = reduce(&links);
        assert!(!reduced.contains(Link::new(0, 4)));
        assert_eq!(reduced.len(), 4);
    }

    #[test]
    fn empty_set_reduces_to_empty() {
        assert!(reduce(&LinkSet::new()).is_empty());
    }

    #[test]
    fn cyclic_input_is_returned_unchanged() {
        let links = set(&[(0, 1), (1, 0), (0, 2)]);
        assert_eq!(reduce(&links), links);
    }

    #[test]
    fn reduction_keeps_reachability() {
        let links = set(&[(0, 1), (0, 2), (1, 2), (2, 3), (0, 3), (1, 3)]);
        let reduced = reduce(&links);
        for a in 0..4 {
            for b in 0..4 {
                assert_eq!(reaches(&links, a, b), reaches(&reduced, a, b), "{a} -> {b}");
            }
        }
    }
}
