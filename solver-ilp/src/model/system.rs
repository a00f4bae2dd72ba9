//! Constraint systems seen by the relaxation oracle.
//!
//! A node's system is the problem's base rows followed by the branching rows
//! accumulated on the path from the root to that node.

use super::IlpProblem;

/// Side of a branching split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchDirection {
    /// `x[j] >= ceil(v)`, stored as `-x[j] <= -ceil(v)`.
    Ceil,

    /// `x[j] <= floor(v)`.
    Floor,
}

/// A single-variable bounding row added by branching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchRow {
    /// Variable index.
    pub var: usize,

    /// Which side of the split.
    pub direction: BranchDirection,

    /// Integer bound on `x[var]`.
    pub bound: f64,
}

impl BranchRow {
    /// Row `-x[var] <= -ceil(value)`.
    pub fn ceil(var: usize, value: f64) -> Self {
        Self {
            var,
            direction: BranchDirection::Ceil,
            bound: value.ceil(),
        }
    }

    /// Row `x[var] <= floor(value)`.
    pub fn floor(var: usize, value: f64) -> Self {
        Self {
            var,
            direction: BranchDirection::Floor,
            bound: value.floor(),
        }
    }

    /// Coefficient on `x[var]`.
    pub fn coefficient(&self) -> f64 {
        match self.direction {
            BranchDirection::Ceil => -1.0,
            BranchDirection::Floor => 1.0,
        }
    }

    /// Right-hand side.
    pub fn rhs(&self) -> f64 {
        self.coefficient() * self.bound
    }

    /// Expand into a dense row of `n` coefficients.
    pub fn to_dense(&self, n: usize) -> Vec<f64> {
        let mut row = vec![0.0; n];
        row[self.var] = self.coefficient();
        row
    }

    /// Whether `x` satisfies this row within `tol`.
    pub fn is_satisfied_by(&self, x: &[f64], tol: f64) -> bool {
        self.coefficient() * x[self.var] <= self.rhs() + tol
    }
}

/// One row of a constraint system.
#[derive(Debug, Clone, Copy)]
pub enum Row<'a> {
    /// A row of the original problem.
    Base(&'a [f64], f64),

    /// A branching row.
    Branch(BranchRow),
}

/// The rows, objective and dimension handed to a relaxation oracle.
#[derive(Debug, Clone)]
pub struct ConstraintSystem<'a> {
    problem: &'a IlpProblem,
    branch_rows: Vec<BranchRow>,
}

impl<'a> ConstraintSystem<'a> {
    /// The unmodified root system.
    pub fn root(problem: &'a IlpProblem) -> Self {
        Self::with_branch_rows(problem, Vec::new())
    }

    /// Base rows followed by `branch_rows` in order.
    pub fn with_branch_rows(problem: &'a IlpProblem, branch_rows: Vec<BranchRow>) -> Self {
        Self {
            problem,
            branch_rows,
        }
    }

    /// Number of variables.
    pub fn num_vars(&self) -> usize {
        self.problem.num_vars()
    }

    /// Total number of rows.
    pub fn num_rows(&self) -> usize {
        self.problem.num_constraints() + self.branch_rows.len()
    }

    /// Objective coefficients.
    pub fn objective(&self) -> &[f64] {
        &self.problem.c
    }

    /// Iterate over every row in order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        let base = self
            .problem
            .a
            .iter()
            .zip(&self.problem.b)
            .map(|(row, &rhs)| Row::Base(row.as_slice(), rhs));
        base.chain(self.branch_rows.iter().copied().map(Row::Branch))
    }

    /// Whether `x` satisfies every row and `x >= 0` within `tol`.
    pub fn is_satisfied_by(&self, x: &[f64], tol: f64) -> bool {
        self.problem.satisfies(x, tol)
            && self.branch_rows.iter().all(|r| r.is_satisfied_by(x, tol))
    }

    /// Dense `(A, b)` for all rows.
    pub fn to_dense(&self) -> (Vec<Vec<f64>>, Vec<f64>) {
        let n = self.num_vars();
        let mut a = Vec::with_capacity(self.num_rows());
        let mut b = Vec::with_capacity(self.num_rows());

        for row in self.rows() {
            match row {
                Row::Base(coeffs, rhs) => {
                    a.push(coeffs.to_vec());
                    b.push(rhs);
                }
                Row::Branch(br) => {
                    a.push(br.to_dense(n));
                    b.push(br.rhs());
                }
            }
        }

        (a, b)
    }
}
