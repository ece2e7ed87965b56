//! Property tests over randomly generated row-stochastic chains.

use markov_analysis::graph::reduce::reaches;
use markov_analysis::graph::{classify, condense, decompose, reduce};
use markov_analysis::matrix::{PowerConfig, period, power_to_convergence, sub_chain, transition_matrix};
use markov_analysis::analyze;
use markov_core::MarkovGraph;
use markov_core::config::AnalysisConfig;
use proptest::prelude::*;

prop_compose! {
    /// Chain with 1..10 states; rows are normalized, empty rows get a self-loop.
    fn arb_chain()(n in 1usize..10)
        (n in Just(n), raw in prop::collection::vec((0..n, 0..n, 1u8..10), 0..30))
        -> MarkovGraph
    {
        let mut rows: Vec<Vec<(usize, f32)>> = vec![Vec::new(); n];
        for (from, to, w) in raw {
            rows[from].push((to, f32::from(w)));
        }
        let mut g = MarkovGraph::new(n).unwrap();
        for (from, row) in rows.iter().enumerate() {
            if row.is_empty() {
                g.add_edge(from + 1, from + 1, 1.0).unwrap();
                continue;
            }
            let total: f32 = row.iter().map(|(_, w)| w).sum();
            for &(to, w) in row {
                g.add_edge(from + 1, to + 1, w / total).unwrap();
            }
        }
        g
    }
}

proptest! {
    #[test]
    fn prop_partition_covers_every_vertex_once(g in arb_chain()) {
        let p = decompose(&g).unwrap();
        let mut seen = vec![0usize; g.vertex_count()];
        for class in p.classes() {
            prop_assert!(!class.is_empty());
            prop_assert!(class.members.windows(2).all(|w| w[0] < w[1]));
            for &v in &class.members {
                seen[v - 1] += 1;
                prop_assert_eq!(p.class_of(v), Some(class.id.index()));
            }
        }
        prop_assert!(seen.iter().all(|&count| count == 1));
    }

    #[test]
    fn prop_condensation_is_acyclic(g in arb_chain()) {
        let p = decompose(&g).unwrap();
        let links = condense(&p, &g);
        for link in &links {
            prop_assert_ne!(link.from, link.to);
            prop_assert!(!reaches(&links, link.to, link.from), "cycle through {:?}", link);
        }
    }

    #[test]
    fn prop_reduction_is_subset_with_same_reachability(g in arb_chain()) {
        let p = decompose(&g).unwrap();
        let links = condense(&p, &g);
        let hasse = reduce(&links);
        for link in &hasse {
            prop_assert!(links.contains(link));
        }
        let k = p.class_count();
        for a in 0..k {
            for b in 0..k {
                prop_assert_eq!(reaches(&links, a, b), reaches(&hasse, a, b));
            }
        }
    }

    #[test]
    fn prop_persistent_iff_no_outgoing_link(g in arb_chain()) {
        let p = decompose(&g).unwrap();
        let links = condense(&p, &g);
        let traits = classify(&p, &links);
        for class in 0..p.class_count() {
            prop_assert_eq!(traits.persistent[class], !links.has_outgoing(class));
        }
        prop_assert!(traits.persistent.iter().any(|&flag| flag));
        prop_assert_eq!(traits.is_irreducible, p.class_count() == 1);
    }

    #[test]
    fn prop_powers_stay_row_stochastic(g in arb_chain()) {
        let m = transition_matrix(&g).unwrap();
        let out = power_to_convergence(&m, &PowerConfig::default());
        for row in out.matrix.row_iter() {
            let sum: f32 = row.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-3, "row sum {}", sum);
        }
    }

    #[test]
    fn prop_persistent_classes_have_positive_period(g in arb_chain()) {
        let p = decompose(&g).unwrap();
        let links = condense(&p, &g);
        let traits = classify(&p, &links);
        let m = transition_matrix(&g).unwrap();
        for class in p.classes() {
            if traits.persistent[class.id.index()] {
                prop_assert!(period(&sub_chain(&m, &class.members)) >= 1);
            }
        }
    }

    #[test]
    fn prop_analysis_is_deterministic(g in arb_chain()) {
        let a = analyze(&g, &AnalysisConfig::default()).unwrap();
        let b = analyze(&g, &AnalysisConfig::default()).unwrap();
        prop_assert_eq!(a, b);
    }
}
