//! Command-line solver for integer linear programs stored as CSV files.

mod ingest;
mod report;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use solver_ilp::{solve_ilp, IlpSettings};

use crate::report::SolveReport;

/// Solve `min c'x  s.t. A x <= b, x >= 0, x integer` by branch-and-bound.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Constraint matrix: a header row, then one row of coefficients per
    /// constraint.
    #[arg(long, default_value = "matriz-A.csv")]
    matrix: PathBuf,

    /// Right-hand side, read from the column named `b`.
    #[arg(long, default_value = "vector-b.csv")]
    rhs: PathBuf,

    /// Objective coefficients, read from the column named `c`.
    #[arg(long, default_value = "vector-c.csv")]
    objective: PathBuf,

    /// Directory that relative input paths are resolved against.
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Maximum number of LP relaxations to solve.
    #[arg(long, default_value_t = IlpSettings::default().max_nodes)]
    max_nodes: u64,

    /// Integrality tolerance.
    #[arg(long, default_value_t = IlpSettings::default().int_tol)]
    int_tol: f64,

    /// Pivot budget of each LP relaxation.
    #[arg(long, default_value_t = IlpSettings::default().lp_settings.max_iter)]
    lp_max_iter: usize,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Write the report to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Log search progress.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    fn settings(&self) -> IlpSettings {
        IlpSettings {
            verbose: self.verbose,
            ..IlpSettings::default()
        }
        .with_max_nodes(self.max_nodes)
        .with_int_tol(self.int_tol)
        .with_lp_max_iter(self.lp_max_iter)
    }
}

fn configure_logging(verbose: bool) {
    let level_filter = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .filter_level(level_filter)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let problem = ingest::load_problem(
        &args.resolve(&args.matrix),
        &args.resolve(&args.rhs),
        &args.resolve(&args.objective),
    )?;

    let solution = solve_ilp(&problem, &args.settings()).context("Solve failed")?;
    log::info!(
        "Solve finished with status {} after {} nodes",
        solution.status,
        solution.stats.nodes_explored
    );

    SolveReport::new(&solution).emit(args.json, args.output.as_deref())
}

fn main() -> Result<()> {
    let args = Args::parse();
    configure_logging(args.verbose);
    run(&args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsString;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["ilp-solve"]);

        assert_eq!(args.matrix, PathBuf::from("matriz-A.csv"));
        assert_eq!(args.rhs, PathBuf::from("vector-b.csv"));
        assert_eq!(args.objective, PathBuf::from("vector-c.csv"));

        let settings = args.settings();
        assert_eq!(settings.max_nodes, IlpSettings::default().max_nodes);
        assert_eq!(settings.int_tol, solver_ilp::DEFAULT_INT_TOL);
        assert!(!settings.verbose);
    }

    #[test]
    fn test_flags_map_onto_settings() {
        let args = Args::parse_from([
            "ilp-solve",
            "--dir",
            "data",
            "--max-nodes",
            "25",
            "--int-tol",
            "1e-4",
            "--lp-max-iter",
            "300",
            "-v",
        ]);

        assert_eq!(args.resolve(&args.matrix), PathBuf::from("data/matriz-A.csv"));

        let settings = args.settings();
        assert_eq!(settings.max_nodes, 25);
        assert_eq!(settings.int_tol, 1e-4);
        assert_eq!(settings.lp_settings.max_iter, 300);
        assert!(settings.verbose);
    }

    #[test]
    fn test_run_writes_report() {
        let dir = std::env::temp_dir().join(format!("ilp-solve-run-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        // max 5x + 4y  s.t. 6x + 4y <= 24, x + 2y <= 6
        std::fs::write(dir.join("matriz-A.csv"), "x,y\n6,4\n1,2\n").unwrap();
        std::fs::write(dir.join("vector-b.csv"), "b\n24\n6\n").unwrap();
        std::fs::write(dir.join("vector-c.csv"), "c\n-5\n-4\n").unwrap();

        let out = dir.join("report.json");
        let args = Args::parse_from([
            OsString::from("ilp-solve"),
            OsString::from("--dir"),
            dir.clone().into_os_string(),
            OsString::from("--json"),
            OsString::from("--output"),
            out.clone().into_os_string(),
        ]);
        run(&args).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json["status_code"], 0);
        assert!((json["objective"].as_f64().unwrap() + 20.0).abs() < 1e-6);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_run_rejects_out_of_range_int_tol() {
        let dir = std::env::temp_dir().join(format!("ilp-solve-tol-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("matriz-A.csv"), "x\n2\n").unwrap();
        std::fs::write(dir.join("vector-b.csv"), "b\n3\n").unwrap();
        std::fs::write(dir.join("vector-c.csv"), "c\n-1\n").unwrap();

        let args = Args::parse_from([
            OsString::from("ilp-solve"),
            OsString::from("--dir"),
            dir.clone().into_os_string(),
            OsString::from("--int-tol"),
            OsString::from("0.7"),
        ]);
        let err = run(&args).unwrap_err();
        assert!(format!("{:#}", err).contains("int_tol"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
