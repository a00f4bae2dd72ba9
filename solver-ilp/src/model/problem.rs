//! Integer program definition.

use crate::error::{IlpError, IlpResult};

/// Pure integer program in inequality form.
///
/// ```text
/// minimize    c' x
/// subject to  A x <= b
///             x >= 0, x integer
/// ```
///
/// The rows here are never modified by the search; branching rows are kept
/// separately (see [`ConstraintSystem`](crate::model::ConstraintSystem)).
#[derive(Debug, Clone)]
pub struct IlpProblem {
    /// Constraint matrix, one dense row per constraint.
    pub a: Vec<Vec<f64>>,

    /// Right-hand side.
    pub b: Vec<f64>,

    /// Objective coefficients.
    pub c: Vec<f64>,
}

impl IlpProblem {
    /// Build a validated problem.
    pub fn new(a: Vec<Vec<f64>>, b: Vec<f64>, c: Vec<f64>) -> IlpResult<Self> {
        let prob = Self { a, b, c };
        prob.validate()?;
        Ok(prob)
    }

    /// Number of variables.
    pub fn num_vars(&self) -> usize {
        self.c.len()
    }

    /// Number of constraints.
    pub fn num_constraints(&self) -> usize {
        self.a.len()
    }

    /// Validate dimensions and values.
    pub fn validate(&self) -> IlpResult<()> {
        let n = self.num_vars();

        if n == 0 {
            return Err(IlpError::InvalidProblem(
                "objective vector is empty".to_string(),
            ));
        }

        if self.b.len() != self.a.len() {
            return Err(IlpError::InvalidProblem(format!(
                "A has {} rows but b has {} entries",
                self.a.len(),
                self.b.len()
            )));
        }

        for (i, row) in self.a.iter().enumerate() {
            if row.len() != n {
                return Err(IlpError::InvalidProblem(format!(
                    "row {} has {} coefficients, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(IlpError::InvalidProblem(format!(
                    "row {} has a non-finite coefficient",
                    i
                )));
            }
        }

        if self.b.iter().any(|v| !v.is_finite()) {
            return Err(IlpError::InvalidProblem(
                "b has a non-finite entry".to_string(),
            ));
        }
        if self.c.iter().any(|v| !v.is_finite()) {
            return Err(IlpError::InvalidProblem(
                "c has a non-finite entry".to_string(),
            ));
        }

        Ok(())
    }

    /// Objective value `c' x`.
    pub fn objective_value(&self, x: &[f64]) -> f64 {
        self.c.iter().zip(x).map(|(ci, xi)| ci * xi).sum()
    }

    /// Check `A x <= b + tol` and `x >= -tol`.
    pub fn satisfies(&self, x: &[f64], tol: f64) -> bool {
        if x.len() != self.num_vars() || x.iter().any(|&v| v < -tol) {
            return false;
        }
        self.a.iter().zip(&self.b).all(|(row, &rhs)| {
            let lhs: f64 = row.iter().zip(x).map(|(a, v)| a * v).sum();
            lhs <= rhs + tol
        })
    }
}
