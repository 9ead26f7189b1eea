use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use sudoku_csp::csp::puzzle::Puzzle;
use sudoku_csp::csp::search::Backtracking;
use sudoku_csp::csp::selection::{FirstOpen, MrvDegree};
use sudoku_csp::csp::solver::{DefaultConfig, Solver, SolverConfig};
use sudoku_csp::csp::worklist::{ArcQueue, ArcStack};
use sudoku_csp::sudoku::board::{Board, EXAMPLE, HARD};

#[derive(Debug, Clone)]
struct ScanOrderConfig;

impl SolverConfig for ScanOrderConfig {
    type Selector = FirstOpen;
    type Worklist = ArcQueue;
}

#[derive(Debug, Clone)]
struct LifoConfig;

impl SolverConfig for LifoConfig {
    type Selector = MrvDegree;
    type Worklist = ArcStack;
}

fn solve_with<Config: SolverConfig>(board: &Board) -> bool {
    let mut solver = Backtracking::<Config>::new(Puzzle::from(board));
    solver.solve().is_solved()
}

fn bench_example(c: &mut Criterion) {
    let board: Board = EXAMPLE.parse().expect("example board");

    let mut group = c.benchmark_group("example");
    group.bench_function("mrv_fifo", |b| {
        b.iter(|| solve_with::<DefaultConfig>(black_box(&board)));
    });
    group.bench_function("mrv_lifo", |b| {
        b.iter(|| solve_with::<LifoConfig>(black_box(&board)));
    });
    group.bench_function("scan_fifo", |b| {
        b.iter(|| solve_with::<ScanOrderConfig>(black_box(&board)));
    });
    group.finish();
}

fn bench_hard(c: &mut Criterion) {
    let board: Board = HARD.parse().expect("hard board");

    let mut group = c.benchmark_group("hard");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(20));
    group.bench_function("mrv_fifo", |b| {
        b.iter(|| solve_with::<DefaultConfig>(black_box(&board)));
    });
    group.finish();
}

fn bench_propagation_only(c: &mut Criterion) {
    // A complete valid grid: the solver terminates after the root
    // propagation pass with zero decisions.
    let solved: Board = {
        let board: Board = EXAMPLE.parse().expect("example board");
        let mut solver = Backtracking::<DefaultConfig>::new(Puzzle::from(&board));
        let verdict = solver.solve();
        Board::from(verdict.solution().expect("example is solvable"))
    };

    c.bench_function("root_propagation", |b| {
        b.iter(|| solve_with::<DefaultConfig>(black_box(&solved)));
    });
}

criterion_group!(benches, bench_example, bench_hard, bench_propagation_only);
criterion_main!(benches);
