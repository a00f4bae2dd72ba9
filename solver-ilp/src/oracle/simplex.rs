//! Relaxation oracle backed by the dense simplex in `solver-lp`.

use solver_lp::{LpProblem, LpSettings, LpStatus};

use super::{RelaxationOracle, RelaxationResult};
use crate::error::IlpResult;
use crate::model::ConstraintSystem;

/// Relaxation oracle using `solver_lp::solve`.
///
/// Each call builds a fresh dense LP from the node's constraint system.
#[derive(Debug, Clone, Default)]
pub struct SimplexOracle {
    /// LP settings used for every solve.
    settings: LpSettings,

    /// Number of LPs solved.
    solves: u64,

    /// Total simplex pivots across all solves.
    lp_iterations: u64,
}

impl SimplexOracle {
    /// Create a new simplex oracle.
    pub fn new(settings: LpSettings) -> Self {
        Self {
            settings,
            solves: 0,
            lp_iterations: 0,
        }
    }

    /// Number of LPs solved so far.
    pub fn solves(&self) -> u64 {
        self.solves
    }

    /// Total simplex pivots so far.
    pub fn lp_iterations(&self) -> u64 {
        self.lp_iterations
    }
}

impl RelaxationOracle for SimplexOracle {
    fn solve(&mut self, system: &ConstraintSystem<'_>) -> IlpResult<RelaxationResult> {
        let (a, b) = system.to_dense();
        let lp = LpProblem::new(system.objective().to_vec(), a, b)?;
        let sol = solver_lp::solve(&lp, &self.settings)?;

        self.solves += 1;
        self.lp_iterations += sol.iterations as u64;

        log::trace!(
            "LP {} ({} rows): {} after {} pivots, obj={:.6e}",
            self.solves,
            system.num_rows(),
            sol.status,
            sol.iterations,
            sol.obj_val
        );

        Ok(match sol.status {
            LpStatus::Optimal => RelaxationResult::optimal(sol.obj_val, sol.x),
            LpStatus::IterationLimit => RelaxationResult::iteration_limit(sol.obj_val, sol.x),
            LpStatus::Infeasible => RelaxationResult::infeasible(),
            LpStatus::Unbounded => RelaxationResult::unbounded(),
        })
    }
}
