//! Relaxation oracle trait and result types.

use solver_lp::LpStatus;

use crate::error::IlpResult;
use crate::model::{ConstraintSystem, SearchOutcome};

/// Status of a relaxation solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxationStatus {
    /// Continuous optimum found.
    Optimal,

    /// The oracle's step budget ran out.
    IterationLimit,

    /// No point satisfies the rows (node can be pruned).
    Infeasible,

    /// Objective decreases without bound.
    Unbounded,
}

impl From<RelaxationStatus> for SearchOutcome {
    fn from(status: RelaxationStatus) -> Self {
        match status {
            RelaxationStatus::Optimal => SearchOutcome::Optimal,
            RelaxationStatus::IterationLimit => SearchOutcome::IterationLimit,
            RelaxationStatus::Infeasible => SearchOutcome::Infeasible,
            RelaxationStatus::Unbounded => SearchOutcome::Unbounded,
        }
    }
}

impl From<LpStatus> for RelaxationStatus {
    fn from(status: LpStatus) -> Self {
        match status {
            LpStatus::Optimal => RelaxationStatus::Optimal,
            LpStatus::IterationLimit => RelaxationStatus::IterationLimit,
            LpStatus::Infeasible => RelaxationStatus::Infeasible,
            LpStatus::Unbounded => RelaxationStatus::Unbounded,
        }
    }
}

/// Result from solving a relaxation.
///
/// `objective` and `solution` are meaningful only for `Optimal` and
/// `IterationLimit`.
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationResult {
    /// Solve status.
    pub status: RelaxationStatus,

    /// Objective value; `+inf` if infeasible, `-inf` if unbounded.
    pub objective: f64,

    /// Continuous solution; empty if infeasible or unbounded.
    pub solution: Vec<f64>,
}

impl RelaxationResult {
    /// An optimal result.
    pub fn optimal(objective: f64, solution: Vec<f64>) -> Self {
        Self {
            status: RelaxationStatus::Optimal,
            objective,
            solution,
        }
    }

    /// A result cut short by the oracle's step budget.
    pub fn iteration_limit(objective: f64, solution: Vec<f64>) -> Self {
        Self {
            status: RelaxationStatus::IterationLimit,
            objective,
            solution,
        }
    }

    /// An infeasible result.
    pub fn infeasible() -> Self {
        Self {
            status: RelaxationStatus::Infeasible,
            objective: f64::INFINITY,
            solution: Vec::new(),
        }
    }

    /// An unbounded result.
    pub fn unbounded() -> Self {
        Self {
            status: RelaxationStatus::Unbounded,
            objective: f64::NEG_INFINITY,
            solution: Vec::new(),
        }
    }
}

/// Solves the continuous relaxation of a constraint system.
///
/// Implementations report the four domain statuses through
/// [`RelaxationResult::status`]; `Err` is reserved for structural failures.
/// No state may carry over from one call to the next in a way that changes
/// results.
pub trait RelaxationOracle {
    /// Solve `min c' x  s.t. rows(x) <= rhs, x >= 0` over the reals.
    fn solve(&mut self, system: &ConstraintSystem<'_>) -> IlpResult<RelaxationResult>;
}

impl<O: RelaxationOracle + ?Sized> RelaxationOracle for &mut O {
    fn solve(&mut self, system: &ConstraintSystem<'_>) -> IlpResult<RelaxationResult> {
        (**self).solve(system)
    }
}
