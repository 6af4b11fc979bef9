//! Benchmarks for hierarchy construction and the two layout strategies.
//!
//! Run with: cargo bench -p tessella-layout

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tessella_hierarchy::{Hierarchy, Node};
use tessella_layout::{LayoutStrategy, RadialOptions, TilingOptions, compute};

// =============================================================================
// Test Data
// =============================================================================

/// Balanced tree with `fanout` children per branch and `depth` levels below
/// the root, leaf weights varied deterministically.
fn balanced_tree(fanout: usize, depth: usize) -> Node {
    fn grow(fanout: usize, depth: usize, seed: usize) -> Node {
        if depth == 0 {
            Node::leaf(format!("leaf{seed}"), (seed % 17 + 1) as f64)
        } else {
            Node::branch(
                format!("branch{seed}"),
                (0..fanout)
                    .map(|i| grow(fanout, depth - 1, seed * fanout + i))
                    .collect(),
            )
        }
    }
    grow(fanout, depth, 1)
}

/// One root with `n` leaves.
fn wide_tree(n: usize) -> Node {
    Node::branch(
        "root",
        (0..n)
            .map(|i| Node::leaf(format!("leaf{i}"), (i % 29 + 1) as f64))
            .collect(),
    )
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_hierarchy_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("hierarchy/build");

    for (fanout, depth) in [(4, 2), (8, 3), (16, 3)] {
        let tree = balanced_tree(fanout, depth);
        let nodes = Hierarchy::from_node(&tree).unwrap().node_count();
        group.throughput(Throughput::Elements(nodes as u64));
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &tree, |b, tree| {
            b.iter(|| black_box(Hierarchy::from_node(tree).unwrap()))
        });
    }

    group.finish();
}

fn bench_tiling(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/tiling");

    for (fanout, depth) in [(4, 2), (8, 3), (16, 3)] {
        let tree = balanced_tree(fanout, depth);
        let h = Hierarchy::from_node(&tree).unwrap();
        let strategy = LayoutStrategy::Tiling(TilingOptions::default());
        group.throughput(Throughput::Elements(h.node_count() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(h.node_count()),
            &h,
            |b, h| b.iter(|| black_box(compute(h, &strategy))),
        );
    }

    group.finish();
}

fn bench_radial(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/radial");

    for (fanout, depth) in [(4, 2), (8, 3), (16, 3)] {
        let tree = balanced_tree(fanout, depth);
        let h = Hierarchy::from_node(&tree).unwrap();
        let strategy = LayoutStrategy::Radial(RadialOptions::default());
        group.throughput(Throughput::Elements(h.node_count() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(h.node_count()),
            &h,
            |b, h| b.iter(|| black_box(compute(h, &strategy))),
        );
    }

    group.finish();
}

fn bench_wide_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/wide");

    for n in [100, 1000, 10000] {
        let tree = wide_tree(n);
        let h = Hierarchy::from_node(&tree).unwrap();
        let tiling = LayoutStrategy::Tiling(TilingOptions::default());
        let radial = LayoutStrategy::Radial(RadialOptions::default());
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("tiling", n), &h, |b, h| {
            b.iter(|| black_box(compute(h, &tiling)))
        });
        group.bench_with_input(BenchmarkId::new("radial", n), &h, |b, h| {
            b.iter(|| black_box(compute(h, &radial)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_hierarchy_build,
    bench_tiling,
    bench_radial,
    bench_wide_fanout,
);

criterion_main!(benches);
