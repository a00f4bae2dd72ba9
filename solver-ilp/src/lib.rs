//! Branch-and-bound solver for pure integer linear programs.
//!
//! Solves
//!
//! ```text
//! minimize    c^T x
//! subject to  A x <= b
//!             x >= 0, x integer
//! ```
//!
//! by depth-first branch-and-bound over LP relaxations. Each node solves its
//! relaxation, is pruned if the bound cannot beat the incumbent, updates the
//! incumbent if the relaxation is integral, and otherwise branches on the
//! first fractional variable.
//!
//! # Example
//!
//! ```
//! use solver_ilp::{solve, SearchOutcome};
//!
//! // min -x0 - x1  s.t.  x0 + x1 <= 4
//! let sol = solve(vec![vec![1.0, 1.0]], vec![4.0], vec![-1.0, -1.0]).unwrap();
//!
//! assert_eq!(sol.status, SearchOutcome::Optimal);
//! assert!((sol.obj_val + 4.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod model;
pub mod oracle;
pub mod search;
pub mod settings;

pub use error::{IlpError, IlpResult};
pub use model::{
    BranchDirection, BranchRow, ConstraintSystem, IlpProblem, IlpSolution, IncumbentTracker,
    SearchOutcome, SearchStats,
};
pub use oracle::{RelaxationOracle, RelaxationResult, RelaxationStatus, SimplexOracle};
pub use search::BranchAndBound;
pub use settings::{IlpSettings, DEFAULT_INT_TOL};

/// Solve `min c'x  s.t. A x <= b, x >= 0, x integer` with default settings.
///
/// The returned solution carries the best objective (`+inf` if none was
/// found), the best solution (zeros if none was found) and the root status.
pub fn solve(a: Vec<Vec<f64>>, b: Vec<f64>, c: Vec<f64>) -> IlpResult<IlpSolution> {
    let problem = IlpProblem::new(a, b, c)?;
    solve_ilp(&problem, &IlpSettings::default())
}

/// Solve a problem with the simplex relaxation oracle.
pub fn solve_ilp(problem: &IlpProblem, settings: &IlpSettings) -> IlpResult<IlpSolution> {
    let mut oracle = SimplexOracle::new(settings.lp_settings);
    let mut bb = BranchAndBound::new(settings.clone());
    let solution = bb.solve(problem, &mut oracle)?;

    log::debug!(
        "ILP solve: {} LPs, {} simplex pivots",
        oracle.solves(),
        oracle.lp_iterations()
    );

    Ok(solution)
}
