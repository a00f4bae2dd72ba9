//! Problem data, settings and result types.

use std::fmt;

use crate::error::{LpError, LpResult};

/// Linear program in inequality form.
///
/// ```text
/// minimize    c^T x
/// subject to  A x <= b
///             x >= 0
/// ```
///
/// `a` is stored densely, one `Vec` per constraint row.
#[derive(Debug, Clone, PartialEq)]
pub struct LpProblem {
    /// Objective coefficients (length n)
    pub c: Vec<f64>,

    /// Constraint rows (m rows of length n)
    pub a: Vec<Vec<f64>>,

    /// Right-hand side (length m)
    pub b: Vec<f64>,
}

impl LpProblem {
    /// Create a problem and check its dimensions.
    pub fn new(c: Vec<f64>, a: Vec<Vec<f64>>, b: Vec<f64>) -> LpResult<Self> {
        let prob = Self { c, a, b };
        prob.validate()?;
        Ok(prob)
    }

    /// Number of variables (n).
    pub fn num_vars(&self) -> usize {
        self.c.len()
    }

    /// Number of inequality rows (m).
    pub fn num_constraints(&self) -> usize {
        self.b.len()
    }

    /// Validate dimensions and finiteness of all data.
    pub fn validate(&self) -> LpResult<()> {
        let n = self.num_vars();
        if n == 0 {
            return Err(LpError::InvalidProblem("empty objective vector".to_string()));
        }
        if self.a.len() != self.b.len() {
            return Err(LpError::InvalidProblem(format!(
                "A has {} rows but b has {} entries",
                self.a.len(),
                self.b.len()
            )));
        }
        for (i, row) in self.a.iter().enumerate() {
            if row.len() != n {
                return Err(LpError::InvalidProblem(format!(
                    "row {} has {} coefficients, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(LpError::InvalidProblem(format!(
                    "row {} has a non-finite coefficient",
                    i
                )));
            }
        }
        if self.b.iter().chain(self.c.iter()).any(|v| !v.is_finite()) {
            return Err(LpError::InvalidProblem(
                "b or c has a non-finite entry".to_string(),
            ));
        }
        Ok(())
    }

    /// Largest violation of `A x <= b` and `x >= 0` (0 if `x` is feasible).
    pub fn max_violation(&self, x: &[f64]) -> f64 {
        let row_viol = self
            .a
            .iter()
            .zip(&self.b)
            .map(|(row, &rhs)| {
                let lhs: f64 = row.iter().zip(x).map(|(a, x)| a * x).sum();
                lhs - rhs
            })
            .fold(0.0_f64, f64::max);
        let sign_viol = x.iter().map(|&xi| -xi).fold(0.0_f64, f64::max);
        row_viol.max(sign_viol)
    }
}

/// Simplex settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LpSettings {
    /// Maximum number of pivots over both phases.
    pub max_iter: usize,

    /// Entries with magnitude below this are treated as zero when pricing
    /// and in the ratio test.
    pub pivot_tol: f64,

    /// Phase 1 objective above this value means the problem is infeasible.
    pub feas_tol: f64,
}

impl Default for LpSettings {
    fn default() -> Self {
        Self {
            max_iter: 10_000,
            pivot_tol: 1e-9,
            feas_tol: 1e-7,
        }
    }
}

impl LpSettings {
    /// Set the pivot budget.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }
}

/// Terminal state of a simplex solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LpStatus {
    /// Optimal solution found
    Optimal,

    /// Pivot budget exhausted before convergence
    IterationLimit,

    /// No x >= 0 satisfies the constraints
    Infeasible,

    /// Objective is unbounded below on the feasible region
    Unbounded,
}

impl fmt::Display for LpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LpStatus::Optimal => write!(f, "Optimal"),
            LpStatus::IterationLimit => write!(f, "Iteration Limit"),
            LpStatus::Infeasible => write!(f, "Infeasible"),
            LpStatus::Unbounded => write!(f, "Unbounded"),
        }
    }
}

/// Result of a simplex solve.
#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    /// Solve status
    pub status: LpStatus,

    /// Primal solution (length n). For `IterationLimit` this is the last
    /// basic solution, which is feasible only if phase 2 was reached.
    /// Empty for `Infeasible` and `Unbounded`.
    pub x: Vec<f64>,

    /// Objective value c^T x; `+inf` when infeasible, `-inf` when unbounded.
    pub obj_val: f64,

    /// Number of pivots performed.
    pub iterations: usize,
}

impl LpSolution {
    pub(crate) fn infeasible(iterations: usize) -> Self {
        Self {
            status: LpStatus::Infeasible,
            x: Vec::new(),
            obj_val: f64::INFINITY,
            iterations,
        }
    }

    pub(crate) fn unbounded(iterations: usize) -> Self {
        Self {
            status: LpStatus::Unbounded,
            x: Vec::new(),
            obj_val: f64::NEG_INFINITY,
            iterations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_checks() {
        assert!(LpProblem::new(vec![], vec![], vec![]).is_err());

        // Ragged row
        let err = LpProblem::new(vec![1.0, 1.0], vec![vec![1.0]], vec![1.0]).unwrap_err();
        assert!(matches!(err, LpError::InvalidProblem(_)));

        // b too long
        assert!(LpProblem::new(vec![1.0], vec![vec![1.0]], vec![1.0, 2.0]).is_err());

        // Non-finite data
        assert!(LpProblem::new(vec![f64::NAN], vec![vec![1.0]], vec![1.0]).is_err());
        assert!(LpProblem::new(vec![1.0], vec![vec![f64::INFINITY]], vec![1.0]).is_err());

        // No rows is fine
        assert!(LpProblem::new(vec![1.0, 2.0], vec![], vec![]).is_ok());
    }

    #[test]
    fn test_max_violation() {
        let prob = LpProblem::new(vec![1.0, 1.0], vec![vec![1.0, 1.0]], vec![2.0]).unwrap();

        assert_eq!(prob.max_violation(&[1.0, 1.0]), 0.0);
        assert!((prob.max_violation(&[2.0, 1.0]) - 1.0).abs() < 1e-12);
        assert!((prob.max_violation(&[-0.5, 0.0]) - 0.5).abs() < 1e-12);
    }
}
