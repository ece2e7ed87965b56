use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use markov_analysis::analyze;
use markov_analysis::graph::{condense, decompose, reduce};
use markov_core::MarkovGraph;
use markov_core::config::AnalysisConfig;

const SIZES: [usize; 3] = [16, 64, 256];

/// Ring of `n` states split into blocks of eight; each block leaks into the
/// next, and the last block is closed.
fn blocked_chain(n: usize) -> MarkovGraph {
    let mut g = MarkovGraph::new(n).expect("graph");
    for v in 1..=n {
        let block_start = (v - 1) / 8 * 8 + 1;
        let block_end = (block_start + 7).min(n);
        let next_in_block = if v == block_end { block_start } else { v + 1 };
        if block_end == n {
            g.add_edge(v, next_in_block, 1.0).expect("edge");
        } else {
            g.add_edge(v, next_in_block, 0.9).expect("edge");
            g.add_edge(v, block_end + 1, 0.1).expect("edge");
        }
    }
    g
}

fn bench_structure(c: &mut Criterion) {
    let mut group = c.benchmark_group("structure");
    for n in SIZES {
        let g = blocked_chain(n);
        group.throughput(Throughput::Elements(g.edge_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &g, |b, g| {
            b.iter(|| {
                let partition = decompose(g).expect("decompose");
                let links = condense(&partition, g);
                black_box(reduce(&links).len())
            });
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    group.sample_size(20);
    for n in SIZES {
        let g = blocked_chain(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &g, |b, g| {
            b.iter(|| black_box(analyze(g, &AnalysisConfig::default()).expect("analyze")));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_structure, bench_analyze);
criterion_main!(benches);
