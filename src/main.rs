//! # sudoku-csp
//!
//! `sudoku-csp` is a command-line Sudoku solver. It models the 9x9 grid
//! as a constraint-satisfaction problem — one variable per cell, a
//! domain of candidate digits each, "distinct" constraints among
//! row-, column- and box-mates — and solves it with AC-3 style
//! constraint propagation inside a backtracking search.
//!
//! ## Features
//!
//! -   **Multiple input sources**: standard input (the default), a file,
//!     inline text, or a whole directory of puzzle files.
//! -   **Configurable branching**: minimum-remaining-values with a
//!     degree tie-break (default) or plain scan order.
//! -   **Verification**: solved grids are checked against the Sudoku
//!     rules before being reported.
//! -   **Statistics**: decisions, propagations, conflicts, backtracks,
//!     search depth, timings and memory usage.
//! -   **Decision budget**: `--max-decisions` turns a runaway search
//!     into a distinct "aborted" outcome instead of an answer.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a board read from stdin
//! sudoku-csp < puzzle.txt
//!
//! # Solve a board file
//! sudoku-csp file --path puzzle.txt
//!
//! # Solve a board given inline
//! sudoku-csp text --input "$(cat puzzle.txt)"
//!
//! # Solve every file under a directory
//! sudoku-csp batch --dir puzzles/
//!
//! # Generate shell completions
//! sudoku-csp completions bash
//! ```
//!
//! The board format is 9 lines of 9 cells; `0` or `.` is a blank,
//! `1`-`9` a given, and any other character except newline is filler.
//! A malformed board is fatal: it is reported and the process exits
//! non-zero before any search runs.

use clap::{Args, CommandFactory, Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use sudoku_csp::csp::puzzle::Puzzle;
use sudoku_csp::csp::search::Backtracking;
use sudoku_csp::csp::selection::FirstOpen;
use sudoku_csp::csp::solver::{DefaultConfig, SearchStats, Solver, SolverConfig, Verdict};
use sudoku_csp::csp::worklist::ArcQueue;
use sudoku_csp::sudoku::board::{Board, ParseBoardError, parse_board, parse_board_file};
use tikv_jemalloc_ctl::{epoch, stats};

/// Global allocator using `tikv-jemallocator`, which also backs the
/// memory figures in the statistics output.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface for the solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "sudoku-csp", version, about = "A Sudoku solver built on constraint propagation")]
struct Cli {
    /// An optional global path argument. If provided without a
    /// subcommand, it's treated as the path to a board file to solve.
    #[arg(global = true)]
    path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `batch`).
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a board file.
    File {
        /// Path to the board file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a board provided as plain text.
    Text {
        /// The board as a string: 9 lines of 9 cells, `0` or `.` blank.
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every file under a directory.
    Batch {
        /// Directory to walk for board files.
        #[arg(long)]
        dir: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across subcommands.
#[derive(Args, Debug, Default, Clone)]
struct CommonOptions {
    /// Enable debug output during the solving process.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Check a solved grid against the Sudoku rules before reporting it.
    #[arg(long, default_value_t = true)]
    verify: bool,

    /// Print search statistics after solving.
    #[arg(long, default_value_t = true)]
    stats: bool,

    /// Branching heuristic: "mrv" (minimum remaining values with degree
    /// tie-break) or "scan" (first open cell).
    #[arg(short, long, default_value_t = String::from("mrv"))]
    selector: String,

    /// Abort the search after this many trial assignments.
    #[arg(long)]
    max_decisions: Option<usize>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // A bare path argument defaults to solving that board file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            return exit_for(solve_path(&path, &cli.common));
        }
    }

    match cli.command {
        Some(Commands::File { path, common }) => exit_for(solve_path(&path, &common)),

        Some(Commands::Text { input, common }) => {
            let time = Instant::now();
            let board = input.parse::<Board>();
            exit_for(solve_loaded(board, None, time.elapsed(), &common))
        }

        Some(Commands::Batch { dir, common }) => {
            let mut failures = 0;
            for entry in walkdir::WalkDir::new(&dir)
                .sort_by_file_name()
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
            {
                if !solve_path(entry.path(), &common) {
                    failures += 1;
                }
            }
            if failures == 0 {
                ExitCode::SUCCESS
            } else {
                eprintln!("{failures} board(s) failed to load");
                ExitCode::FAILURE
            }
        }

        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
            ExitCode::SUCCESS
        }

        None => {
            // The plain surface: read the board from standard input.
            let time = Instant::now();
            let board = parse_board(io::stdin().lock());
            exit_for(solve_loaded(board, Some("<stdin>"), time.elapsed(), &cli.common))
        }
    }
}

const fn exit_for(loaded: bool) -> ExitCode {
    if loaded { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

/// Loads a board file and solves it; reports whether the board loaded.
fn solve_path(path: &Path, common: &CommonOptions) -> bool {
    let time = Instant::now();
    let board = parse_board_file(path);
    solve_loaded(board, Some(&path.display().to_string()), time.elapsed(), common)
}

/// Reports a load failure or hands the board to the solver. A malformed
/// board never reaches the search: it is fatal for this run.
fn solve_loaded(
    board: Result<Board, ParseBoardError>,
    label: Option<&str>,
    parse_time: Duration,
    common: &CommonOptions,
) -> bool {
    match board {
        Ok(board) => {
            solve_and_report(&board, label, parse_time, common);
            true
        }
        Err(e) => {
            match label {
                Some(label) => eprintln!("Error loading board {label}: {e}"),
                None => eprintln!("Error loading board: {e}"),
            }
            false
        }
    }
}

/// Solves a loaded board and prints verdict, verification and
/// statistics.
fn solve_and_report(
    board: &Board,
    label: Option<&str>,
    parse_time: Duration,
    common: &CommonOptions,
) {
    if let Some(label) = label {
        println!("Solving: {label}");
    }
    println!("Parsed board:\n{board}");

    let (verdict, elapsed, search_stats) = solve(board, common);

    // Advance the epoch so the memory figures reflect the solving phase.
    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.verify {
        verify_verdict(&verdict);
    }

    if common.stats {
        print_stats(parse_time, elapsed, board, &search_stats, allocated_mib, resident_mib);
    }

    match &verdict {
        Verdict::Solved(solution) => {
            println!("\nSOLVED");
            println!("{}", Board::from(solution));
        }
        Verdict::Unsolvable => println!("\nUNSOLVABLE"),
        Verdict::Aborted => println!("\nABORTED: decision budget exhausted"),
    }
}

/// Runs the solver selected by `--selector`.
///
/// # Panics
///
/// Panics if the selector name is unknown.
fn solve(board: &Board, common: &CommonOptions) -> (Verdict, Duration, SearchStats) {
    match common.selector.to_lowercase().as_str() {
        "mrv" => run_solver::<DefaultConfig>(board, common),
        "scan" => run_solver::<ScanConfig>(board, common),
        other => panic!("Unknown selector name {other}"),
    }
}

/// Scan-order branching over the default FIFO worklist.
#[derive(Debug, Clone)]
struct ScanConfig;

impl SolverConfig for ScanConfig {
    type Selector = FirstOpen;
    type Worklist = ArcQueue;
}

fn run_solver<Config: SolverConfig>(
    board: &Board,
    common: &CommonOptions,
) -> (Verdict, Duration, SearchStats) {
    epoch::advance().unwrap();

    let time = Instant::now();

    let mut solver = Backtracking::<Config>::new(Puzzle::from(board));
    if let Some(limit) = common.max_decisions {
        solver = solver.with_max_decisions(limit);
    }
    let verdict = solver.solve();

    let elapsed = time.elapsed();

    if common.debug {
        println!("Verdict: {verdict:?}");
        println!("Time: {elapsed:?}");
    }

    (verdict, elapsed, solver.stats())
}

/// Checks a solved grid against the Sudoku rules.
///
/// # Panics
///
/// Panics if a grid the solver claims is solved fails the rules check;
/// that would be an engine bug, not bad input.
fn verify_verdict(verdict: &Verdict) {
    if let Some(solution) = verdict.solution() {
        let ok = Board::from(solution).is_valid_solution();
        println!("Verified: {ok}");
        assert!(ok, "Solution failed verification!");
    }
}

/// Helper to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper to print a statistic line that includes a rate (value/second).
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    #[allow(clippy::cast_precision_loss)]
    let rate = if elapsed > 0.0 { value as f64 / elapsed } else { 0.0 };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    board: &Board,
    s: &SearchStats,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n======================[ Problem Statistics ]=======================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Givens", board.givens());
    stat_line("Open cells", 81 - board.givens());

    println!("=======================[ Search Statistics ]=======================");
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Propagations", s.propagations, elapsed_secs);
    stat_line_with_rate("Conflicts", s.conflicts, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line("Max search depth", s.max_depth);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("===================================================================");
}
