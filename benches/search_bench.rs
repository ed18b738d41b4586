//! Criterion benchmarks for u-search algorithms.
//!
//! Uses the bundled domains at small, fixed sizes to measure expansion
//! overhead of each algorithm family.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_search::problems::{ColoringMode, Graph, GraphColoring, Hanoi, KnightsTour, NQueens};
use u_search::search::{
    a_star, backtracking, bfs, bidirectional, create_rng, simulated_annealing, Budget,
    SearchConfig,
};

// ===========================================================================
// Systematic search
// ===========================================================================

fn bench_queens_backtracking(c: &mut Criterion) {
    let mut group = c.benchmark_group("queens_backtracking");
    group.sample_size(10);

    for &n in &[8usize, 12, 16] {
        let problem = NQueens::new(n).unwrap();
        let config = SearchConfig::default()
            .with_budget(Budget::default().with_max_nodes(1_000_000))
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &(problem, config), |b, (p, c)| {
            b.iter(|| {
                let result = backtracking(black_box(p), black_box(c));
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_hanoi_bfs_vs_bidirectional(c: &mut Criterion) {
    let mut group = c.benchmark_group("hanoi");
    group.sample_size(10);

    for &disks in &[4usize, 6, 8] {
        let problem = Hanoi::new(3, disks, 3).unwrap();
        let config = SearchConfig::default()
            .with_budget(Budget::default().with_max_nodes(100_000))
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new("bfs", disks),
            &(problem.clone(), config.clone()),
            |b, (p, c)| {
                b.iter(|| {
                    let result = bfs(black_box(p), black_box(c));
                    black_box(result)
                })
            },
        );
        group.bench_with_input(
            BenchmarkId::new("bidirectional", disks),
            &(problem.clone(), config.clone()),
            |b, (p, c)| {
                b.iter(|| {
                    let result = bidirectional(black_box(p), black_box(c));
                    black_box(result)
                })
            },
        );
        group.bench_with_input(BenchmarkId::new("a_star", disks), &(problem, config), |b, (p, c)| {
            b.iter(|| {
                let result = a_star(black_box(p), black_box(c));
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_knights_tour(c: &mut Criterion) {
    let mut group = c.benchmark_group("knights_tour_backtracking");
    group.sample_size(10);

    for &n in &[5usize, 6, 8] {
        let problem = KnightsTour::new(n, (0, 0)).unwrap();
        let config = SearchConfig::default()
            .with_budget(Budget::default().with_max_nodes(1_000_000))
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &(problem, config), |b, (p, c)| {
            b.iter(|| {
                let result = backtracking(black_box(p), black_box(c));
                black_box(result)
            })
        });
    }
    group.finish();
}

// ===========================================================================
// Local search
// ===========================================================================

fn bench_coloring_annealing(c: &mut Criterion) {
    let mut group = c.benchmark_group("coloring_annealing");
    group.sample_size(10);

    for &(nodes, edges) in &[(10usize, 15usize), (20, 35), (40, 70)] {
        let mut rng = create_rng(7);
        let graph = Graph::random_colorable(nodes, edges, 3, &mut rng).unwrap();
        let problem = GraphColoring::new(graph, 3, ColoringMode::Local).unwrap();
        let config = SearchConfig::default()
            .with_budget(Budget::default().with_max_steps(20_000))
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_e{}", nodes, edges), nodes),
            &(problem, config),
            |b, (p, c)| {
                b.iter(|| {
                    let result = simulated_annealing(black_box(p), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_queens_backtracking,
    bench_hanoi_bfs_vs_bidirectional,
    bench_knights_tour,
    bench_coloring_annealing
);
criterion_main!(benches);
