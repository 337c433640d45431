use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vincolo::problems::map_coloring::{australia, Color};
use vincolo::problems::sudoku::{csp_from_grid, grid_from_str};
use vincolo::solver::engine::Propagation;

const PUZZLE: &str =
    "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

fn map_coloring_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Australia Map Coloring");

    group.bench_function("3 colors, backtracking only", |b| {
        b.iter(|| {
            let mut csp = australia(&[Color::Red, Color::Green, Color::Blue]).unwrap();
            let solution = csp.solve();
            assert!(black_box(solution).is_some());
        })
    });

    group.bench_function("2 colors, proving unsatisfiability", |b| {
        b.iter(|| {
            let mut csp = australia(&[Color::Red, Color::Green]).unwrap();
            let solution = csp.solve();
            assert!(black_box(solution).is_none());
        })
    });

    group.finish();
}

fn sudoku_benchmarks(c: &mut Criterion) {
    let grid = grid_from_str(PUZZLE).unwrap();
    let mut group = c.benchmark_group("Sudoku");
    group.sample_size(10);

    group.bench_function("maintained propagation", |b| {
        b.iter(|| {
            let mut csp = csp_from_grid(&grid).unwrap();
            let solution = csp.solve_with(Propagation::Maintained);
            assert!(black_box(solution).is_some());
        })
    });

    group.bench_function("preprocess only", |b| {
        b.iter(|| {
            let mut csp = csp_from_grid(&grid).unwrap();
            let solution = csp.solve_with(Propagation::Preprocess);
            assert!(black_box(solution).is_some());
        })
    });

    group.finish();
}

criterion_group!(benches, map_coloring_benchmarks, sudoku_benchmarks);
criterion_main!(benches);
