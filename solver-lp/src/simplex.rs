//! Dense two-phase primal simplex.
//!
//! Columns are laid out as `[x (n) | slack (m) | artificial (k)]`. A row with
//! a negative right-hand side is negated so the tableau starts with `rhs >= 0`;
//! its slack then has coefficient -1 and an artificial column supplies the
//! initial basic variable. Phase 1 minimises the sum of artificials, phase 2
//! minimises `c^T x` with artificial columns barred from entering.

// Indexed loops are clearer for tableau operations
#![allow(clippy::needless_range_loop)]

use crate::problem::{LpProblem, LpSettings, LpSolution, LpStatus};

/// How a single simplex phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhaseOutcome {
    Optimal,
    Unbounded,
    IterationLimit,
}

struct Tableau {
    /// Constraint rows, each `num_cols + 1` wide; the last entry is the rhs.
    rows: Vec<Vec<f64>>,

    /// Basic column of each row.
    basis: Vec<usize>,

    /// Reduced costs; the last entry is minus the current objective value.
    cost: Vec<f64>,

    num_cols: usize,

    /// Columns at or past this index are artificial.
    art_start: usize,
}

impl Tableau {
    fn build(prob: &LpProblem) -> Self {
        let n = prob.num_vars();
        let m = prob.num_constraints();
        let num_art = prob.b.iter().filter(|&&bi| bi < 0.0).count();
        let art_start = n + m;
        let num_cols = art_start + num_art;

        let mut rows = Vec::with_capacity(m);
        let mut basis = Vec::with_capacity(m);
        let mut next_art = art_start;

        for (i, (a_row, &rhs)) in prob.a.iter().zip(&prob.b).enumerate() {
            let sign = if rhs < 0.0 { -1.0 } else { 1.0 };
            let mut row = vec![0.0; num_cols + 1];
            for (j, &aij) in a_row.iter().enumerate() {
                row[j] = sign * aij;
            }
            row[n + i] = sign;
            row[num_cols] = sign * rhs;

            if rhs < 0.0 {
                row[next_art] = 1.0;
                basis.push(next_art);
                next_art += 1;
            } else {
                basis.push(n + i);
            }
            rows.push(row);
        }

        Self {
            rows,
            basis,
            cost: vec![0.0; num_cols + 1],
            num_cols,
            art_start,
        }
    }

    fn has_artificials(&self) -> bool {
        self.num_cols > self.art_start
    }

    fn rhs(&self, row: usize) -> f64 {
        self.rows[row][self.num_cols]
    }

    fn objective(&self) -> f64 {
        -self.cost[self.num_cols]
    }

    /// Load per-column costs and price out the current basis.
    fn set_objective(&mut self, col_cost: impl Fn(usize) -> f64) {
        for j in 0..self.num_cols {
            self.cost[j] = col_cost(j);
        }
        self.cost[self.num_cols] = 0.0;

        for i in 0..self.rows.len() {
            let cb = col_cost(self.basis[i]);
            if cb != 0.0 {
                for j in 0..=self.num_cols {
                    self.cost[j] -= cb * self.rows[i][j];
                }
            }
        }
    }

    fn pivot(&mut self, pivot_row: usize, pivot_col: usize) {
        let width = self.num_cols + 1;
        let mut prow = std::mem::take(&mut self.rows[pivot_row]);

        let p = prow[pivot_col];
        for v in prow.iter_mut() {
            *v /= p;
        }

        for (i, row) in self.rows.iter_mut().enumerate() {
            if i == pivot_row {
                continue;
            }
            let factor = row[pivot_col];
            if factor != 0.0 {
                for j in 0..width {
                    row[j] -= factor * prow[j];
                }
                row[pivot_col] = 0.0;
            }
        }

        let factor = self.cost[pivot_col];
        if factor != 0.0 {
            for j in 0..width {
                self.cost[j] -= factor * prow[j];
            }
            self.cost[pivot_col] = 0.0;
        }

        self.rows[pivot_row] = prow;
        self.basis[pivot_row] = pivot_col;
    }

    /// Minimum ratio test on `col`, ties broken by the lowest basic index.
    fn ratio_test(&self, col: usize, tol: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;

        for (i, row) in self.rows.iter().enumerate() {
            let a = row[col];
            if a <= tol {
                continue;
            }
            let ratio = (row[self.num_cols] / a).max(0.0);
            best = match best {
                None => Some((i, ratio)),
                Some((bi, br)) => {
                    let better = ratio < br - tol
                        || ((ratio - br).abs() <= tol && self.basis[i] < self.basis[bi]);
                    if better {
                        Some((i, ratio))
                    } else {
                        Some((bi, br))
                    }
                }
            };
        }

        best.map(|(i, _)| i)
    }

    /// Run simplex iterations with Bland's rule over columns `0..entering_limit`.
    fn run_phase(
        &mut self,
        entering_limit: usize,
        iterations: &mut usize,
        settings: &LpSettings,
    ) -> PhaseOutcome {
        loop {
            let Some(col) = (0..entering_limit).find(|&j| self.cost[j] < -settings.pivot_tol)
            else {
                return PhaseOutcome::Optimal;
            };

            if *iterations >= settings.max_iter {
                return PhaseOutcome::IterationLimit;
            }

            let Some(row) = self.ratio_test(col, settings.pivot_tol) else {
                return PhaseOutcome::Unbounded;
            };

            self.pivot(row, col);
            *iterations += 1;
        }
    }

    /// Pivot basic artificials (at value zero) out on any structural column.
    ///
    /// A row with no such column is redundant; its artificial stays basic at
    /// zero and is never touched again since artificial columns cannot enter.
    fn drive_out_artificials(&mut self, tol: f64) {
        for r in 0..self.rows.len() {
            if self.basis[r] < self.art_start {
                continue;
            }
            if let Some(col) = (0..self.art_start).find(|&j| self.rows[r][j].abs() > tol) {
                self.pivot(r, col);
            }
        }
    }

    /// Current basic solution restricted to the first `n` columns.
    fn primal(&self, n: usize) -> Vec<f64> {
        let mut x = vec![0.0; n];
        for (i, &bv) in self.basis.iter().enumerate() {
            if bv < n {
                x[bv] = self.rhs(i).max(0.0);
            }
        }
        x
    }
}

fn objective_value(c: &[f64], x: &[f64]) -> f64 {
    c.iter().zip(x).map(|(ci, xi)| ci * xi).sum()
}

fn iteration_limit(prob: &LpProblem, tab: &Tableau, iterations: usize) -> LpSolution {
    let x = tab.primal(prob.num_vars());
    LpSolution {
        status: LpStatus::IterationLimit,
        obj_val: objective_value(&prob.c, &x),
        x,
        iterations,
    }
}

/// Solve a validated problem. Never fails; every outcome is a status.
pub(crate) fn solve_two_phase(prob: &LpProblem, settings: &LpSettings) -> LpSolution {
    let n = prob.num_vars();
    let mut tab = Tableau::build(prob);
    let mut iterations = 0;

    if tab.has_artificials() {
        let art_start = tab.art_start;
        tab.set_objective(|j| if j >= art_start { 1.0 } else { 0.0 });

        match tab.run_phase(tab.num_cols, &mut iterations, settings) {
            PhaseOutcome::Optimal => {}
            PhaseOutcome::IterationLimit => return iteration_limit(prob, &tab, iterations),
            PhaseOutcome::Unbounded => {
                // Phase 1 is bounded below by zero, so this is numerical breakdown
                log::warn!("simplex: phase 1 reported unbounded after {} pivots", iterations);
                return iteration_limit(prob, &tab, iterations);
            }
        }

        let scale = 1.0 + prob.b.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let infeasibility = tab.objective();
        log::trace!(
            "simplex: phase 1 finished after {} pivots, infeasibility {:.3e}",
            iterations,
            infeasibility
        );
        if infeasibility > settings.feas_tol * scale {
            return LpSolution::infeasible(iterations);
        }

        tab.drive_out_artificials(settings.pivot_tol);
    }

    tab.set_objective(|j| if j < n { prob.c[j] } else { 0.0 });

    match tab.run_phase(tab.art_start, &mut iterations, settings) {
        PhaseOutcome::Optimal => {}
        PhaseOutcome::IterationLimit => return iteration_limit(prob, &tab, iterations),
        PhaseOutcome::Unbounded => {
            log::trace!("simplex: unbounded ray found after {} pivots", iterations);
            return LpSolution::unbounded(iterations);
        }
    }

    let x = tab.primal(n);
    let obj_val = objective_value(&prob.c, &x);
    log::trace!(
        "simplex: optimal after {} pivots, obj={:.6e}",
        iterations,
        obj_val
    );

    LpSolution {
        status: LpStatus::Optimal,
        x,
        obj_val,
        iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lp(c: Vec<f64>, a: Vec<Vec<f64>>, b: Vec<f64>) -> LpProblem {
        LpProblem::new(c, a, b).unwrap()
    }

    #[test]
    fn test_tableau_layout() {
        // Second row has negative rhs and needs an artificial
        let prob = lp(
            vec![1.0, 1.0],
            vec![vec![1.0, 2.0], vec![-1.0, 0.0]],
            vec![4.0, -1.0],
        );
        let tab = Tableau::build(&prob);

        assert_eq!(tab.num_cols, 2 + 2 + 1);
        assert_eq!(tab.art_start, 4);
        assert_eq!(tab.basis, vec![2, 4]);

        // Negated row: x0 - s1 + a0 = 1
        assert_eq!(tab.rows[1], vec![1.0, 0.0, 0.0, -1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_pivot_updates_basis_and_costs() {
        let prob = lp(vec![-1.0], vec![vec![2.0]], vec![4.0]);
        let mut tab = Tableau::build(&prob);
        tab.set_objective(|j| if j == 0 { -1.0 } else { 0.0 });

        tab.pivot(0, 0);

        assert_eq!(tab.basis, vec![0]);
        assert!((tab.rhs(0) - 2.0).abs() < 1e-12);
        assert!((tab.objective() + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_ratio_test_prefers_lowest_basis_on_ties() {
        // Both rows bind at x0 = 2
        let prob = lp(
            vec![-1.0, 0.0],
            vec![vec![1.0, 0.0], vec![2.0, 0.0]],
            vec![2.0, 4.0],
        );
        let tab = Tableau::build(&prob);

        assert_eq!(tab.ratio_test(0, 1e-9), Some(0));
        assert_eq!(tab.ratio_test(1, 1e-9), None);
    }

    #[test]
    fn test_duplicate_lower_bounds() {
        // x0 >= 1 twice: both artificials leave during phase 1
        let prob = lp(
            vec![1.0],
            vec![vec![-1.0], vec![-1.0], vec![1.0]],
            vec![-1.0, -1.0, 3.0],
        );
        let sol = solve_two_phase(&prob, &LpSettings::default());

        assert_eq!(sol.status, LpStatus::Optimal);
        assert!((sol.x[0] - 1.0).abs() < 1e-9);
        assert!((sol.obj_val - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_iteration_limit() {
        let prob = lp(
            vec![-1.0, -1.0],
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            vec![3.0, 5.0],
        );
        let settings = LpSettings::default().with_max_iter(1);
        let sol = solve_two_phase(&prob, &settings);

        assert_eq!(sol.status, LpStatus::IterationLimit);
        assert_eq!(sol.iterations, 1);
        assert_eq!(sol.x.len(), 2);
        // One pivot brought x0 to its bound
        assert!((sol.obj_val + 3.0).abs() < 1e-9);
    }
}
