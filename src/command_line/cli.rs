#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Command-line interface: argument parsing, solve-and-report plumbing,
//! and the statistics table.

use clap::{Args, Parser, Subcommand};
use dpll_sat::sat::cnf::Cnf;
use dpll_sat::sat::dimacs::{parse_dimacs_text, parse_file, ParseError};
use dpll_sat::sat::dpll::Dpll;
use dpll_sat::sat::solver::{SolutionStats, Solutions, Solver};
use dpll_sat::sudoku::solver::{Sudoku, SudokuError};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

/// A DPLL SAT solver for DIMACS CNF files, with a Sudoku front end.
#[derive(Parser, Debug)]
#[command(name = "dpll_sat", version, about = "An iterative DPLL SAT solver")]
pub struct Cli {
    /// DIMACS .cnf file to solve when no subcommand is given.
    pub path: Option<PathBuf>,

    /// The subcommand to run.
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Options shared by every mode.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// The available solver modes.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve a DIMACS .cnf file.
    File {
        /// Path to the DIMACS file.
        #[arg(long)]
        path: PathBuf,

        /// Options shared by every mode.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve DIMACS CNF given inline as text.
    Text {
        /// The DIMACS text, e.g. "p cnf 2 1\n1 -2 0".
        #[arg(short, long)]
        input: String,

        /// Options shared by every mode.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a Sudoku puzzle file (nine rows of nine characters, or one
    /// 81-character line; `.` or `0` for empty cells).
    Sudoku {
        /// Path to the puzzle file.
        #[arg(long)]
        path: PathBuf,

        /// Also write the encoded CNF next to the input, as `<path>.cnf`.
        #[arg(short, long, default_value_t = false)]
        export_dimacs: bool,

        /// Options shared by every mode.
        #[command(flatten)]
        common: CommonOptions,
    },
}

/// Options every mode understands.
#[derive(Args, Debug, Default, Clone)]
pub struct CommonOptions {
    /// Re-check the model against the formula after solving.
    #[arg(short, long, default_value_t = true)]
    pub verify: bool,

    /// Print the search statistics table.
    #[arg(short, long, default_value_t = false)]
    pub stats: bool,

    /// Print the satisfying assignment.
    #[arg(short, long, default_value_t = false)]
    pub print_solution: bool,
}

/// Everything the CLI can fail with. All of it exits with status 1.
#[derive(Debug, Error)]
pub enum CliError {
    /// Neither a path nor a subcommand was given.
    #[error("no input; pass a DIMACS file path or a subcommand (see --help)")]
    NoInput,

    /// Reading or parsing DIMACS input failed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Reading, parsing, or decoding a Sudoku failed.
    #[error(transparent)]
    Sudoku(#[from] SudokuError),

    /// Writing the exported CNF failed.
    #[error("cannot write {path}: {source}")]
    ExportFailed {
        /// The output path.
        path: String,
        /// The underlying failure.
        source: std::io::Error,
    },

    /// The reported model does not satisfy the formula.
    #[error("internal error: model fails verification against the formula")]
    VerificationFailed,
}

/// Dispatches a parsed command line.
///
/// # Errors
///
/// See [`CliError`]; every variant maps to exit status 1.
pub fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Some(Commands::File { path, common }) => solve_file(&path, &common),
        Some(Commands::Text { input, common }) => solve_text(&input, &common),
        Some(Commands::Sudoku {
            path,
            export_dimacs,
            common,
        }) => solve_sudoku(&path, export_dimacs, &common),
        None => match cli.path {
            Some(path) => solve_file(&path, &cli.common),
            None => Err(CliError::NoInput),
        },
    }
}

fn solve_file(path: &Path, common: &CommonOptions) -> Result<(), CliError> {
    tracing::info!("solving {}", path.display());
    let cnf: Cnf = parse_file(path)?;
    solve_and_report(&cnf, common).map(|_| ())
}

fn solve_text(input: &str, common: &CommonOptions) -> Result<(), CliError> {
    let cnf: Cnf = parse_dimacs_text(input)?;
    solve_and_report(&cnf, common).map(|_| ())
}

fn solve_sudoku(path: &Path, export_dimacs: bool, common: &CommonOptions) -> Result<(), CliError> {
    tracing::info!("solving sudoku {}", path.display());
    let puzzle = Sudoku::from_file(path)?;
    let cnf: Cnf = puzzle.to_cnf();

    if export_dimacs {
        let out = format!("{}.cnf", path.display());
        std::fs::write(&out, cnf.to_string())
            .map_err(|source| CliError::ExportFailed { path: out, source })?;
    }

    let solution = solve_and_report(&cnf, common)?;

    if let Some(model) = solution {
        let solved = puzzle.decode(&model)?;
        println!("{}", solved.board.to_line());
        print!("{solved}");
    }

    Ok(())
}

/// Solves the formula and prints the verdict, optionally followed by the
/// assignment and the statistics table. Returns the model so front ends
/// can decode it further.
fn solve_and_report(cnf: &Cnf, common: &CommonOptions) -> Result<Option<Solutions>, CliError> {
    let start = Instant::now();
    let mut solver: Dpll = Solver::new(cnf.clone());
    let solution = solver.solve();
    let elapsed = start.elapsed();

    if common.verify {
        if let Some(model) = &solution {
            if !cnf.verify(model) {
                return Err(CliError::VerificationFailed);
            }
        }
    }

    if let Some(model) = &solution {
        println!("SATISFIABLE");
        if common.print_solution {
            println!("{model}");
        }
    } else {
        println!("UNSATISFIABLE");
    }

    if common.stats {
        print_stats(cnf, &solver.stats(), elapsed);
    }

    Ok(solution)
}

fn stat_line(label: &str, value: impl Display) {
    println!("|  {label:<22} {value:>18}  |");
}

#[allow(clippy::cast_precision_loss)]
fn stat_line_with_rate(label: &str, value: usize, elapsed_secs: f64) {
    let rate = if elapsed_secs > 0.0 {
        value as f64 / elapsed_secs
    } else {
        0.0
    };
    println!("|  {label:<14} {value:>12} ({rate:>9.0}/sec)  |");
}

fn print_stats(cnf: &Cnf, stats: &SolutionStats, elapsed: Duration) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("==================[ Statistics ]=================");
    stat_line("Variables", cnf.num_vars.saturating_sub(1));
    stat_line("Clauses", cnf.len());
    stat_line("Literals", cnf.lits.len());
    stat_line_with_rate("Conflicts", stats.conflicts, elapsed_secs);
    stat_line_with_rate("Decisions", stats.decisions, elapsed_secs);
    stat_line_with_rate("Propagations", stats.propagations, elapsed_secs);
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=================================================");
}
