use clap::Parser;

use vincolo::problems::sudoku::{csp_from_grid, grid_from_str, render};
use vincolo::solver::engine::Propagation;
use vincolo::solver::stats::render_stats_table;

const DEFAULT_PUZZLE: &str =
    "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

/// Solve a 9x9 Sudoku given as 81 cells of `0`-`9`, with `.` for blanks.
#[derive(Parser, Debug)]
struct Args {
    /// Puzzle string; a stock puzzle is used when omitted.
    puzzle: Option<String>,

    /// Run plain backtracking instead of maintaining arc consistency.
    #[arg(long)]
    no_propagation: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let text = args.puzzle.as_deref().unwrap_or(DEFAULT_PUZZLE);
    let grid = grid_from_str(text).ok_or("puzzle must contain 81 cells of 0-9 or '.'")?;

    let mut csp = csp_from_grid(&grid)?;
    let policy = if args.no_propagation {
        Propagation::Off
    } else {
        Propagation::Maintained
    };
    match csp.solve_with(policy) {
        Some(solution) => println!("{}", render(&solution)),
        None => println!("no solution"),
    }
    println!("{}", render_stats_table(csp.stats()));
    Ok(())
}
