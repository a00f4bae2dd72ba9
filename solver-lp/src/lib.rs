//! Dense linear programming solver used as the relaxation oracle of the
//! integer branch-and-bound layer.
//!
//! Problems are given in inequality form:
//!
//! ```text
//! minimize    c^T x
//! subject to  A x <= b
//!             x >= 0
//! ```
//!
//! The solver is a two-phase primal simplex on a dense tableau with Bland's
//! anti-cycling rule. It reports one of four terminal states: optimal,
//! infeasible, unbounded, or iteration limit.
//!
//! # Example
//!
//! ```
//! use solver_lp::{solve, LpProblem, LpSettings, LpStatus};
//!
//! // min -x0 - x1  s.t.  x0 + x1 <= 4
//! let prob = LpProblem::new(vec![-1.0, -1.0], vec![vec![1.0, 1.0]], vec![4.0]).unwrap();
//! let sol = solve(&prob, &LpSettings::default()).unwrap();
//!
//! assert_eq!(sol.status, LpStatus::Optimal);
//! assert!((sol.obj_val + 4.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod problem;
mod simplex;

pub use error::{LpError, LpResult};
pub use problem::{LpProblem, LpSettings, LpSolution, LpStatus};

/// Solve a linear program with the dense two-phase simplex method.
///
/// Dimension errors are reported through `Err`; every other outcome
/// (including infeasibility and unboundedness) is an `LpSolution` status.
pub fn solve(problem: &LpProblem, settings: &LpSettings) -> LpResult<LpSolution> {
    problem.validate()?;
    Ok(simplex::solve_two_phase(problem, settings))
}
