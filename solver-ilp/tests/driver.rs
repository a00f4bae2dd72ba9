//! Search-driver tests with a scripted relaxation oracle.
//!
//! The oracle replays a fixed list of answers in call order and records the
//! constraint system it was asked to solve, so the tests can check pruning,
//! branching rows and exploration order without depending on LP numerics.

use std::collections::VecDeque;

use solver_ilp::{
    BranchAndBound, ConstraintSystem, IlpError, IlpProblem, IlpResult, IlpSettings,
    RelaxationOracle, RelaxationResult, SearchOutcome,
};

struct ScriptedOracle {
    answers: VecDeque<RelaxationResult>,
    seen: Vec<(Vec<Vec<f64>>, Vec<f64>)>,
}

impl ScriptedOracle {
    fn new(answers: Vec<RelaxationResult>) -> Self {
        Self {
            answers: answers.into(),
            seen: Vec::new(),
        }
    }
}

impl RelaxationOracle for ScriptedOracle {
    fn solve(&mut self, system: &ConstraintSystem<'_>) -> IlpResult<RelaxationResult> {
        self.seen.push(system.to_dense());
        self.answers
            .pop_front()
            .ok_or_else(|| IlpError::OracleError("script exhausted".to_string()))
    }
}

/// Two variables, one loose row; the script decides everything else.
fn two_var_problem() -> IlpProblem {
    IlpProblem::new(vec![vec![1.0, 1.0]], vec![10.0], vec![-1.0, -1.0]).unwrap()
}

#[test]
fn test_ties_are_pruned() {
    let prob = two_var_problem();
    let mut oracle = ScriptedOracle::new(vec![
        // Root: fractional in x0
        RelaxationResult::optimal(-10.0, vec![0.5, 0.0]),
        // Ceil child: integral, becomes the incumbent
        RelaxationResult::optimal(-8.0, vec![1.0, 0.0]),
        // Floor child: bound equals the incumbent, so it must not branch
        RelaxationResult::optimal(-8.0, vec![0.0, 0.5]),
    ]);

    let mut bb = BranchAndBound::new(IlpSettings::default());
    let sol = bb.solve(&prob, &mut oracle).unwrap();

    assert_eq!(sol.status, SearchOutcome::Optimal);
    assert_eq!(sol.obj_val, -8.0);
    assert_eq!(sol.x, vec![1.0, 0.0]);
    assert_eq!(oracle.seen.len(), 3);
    assert_eq!(sol.stats.nodes_branched, 1);
    assert_eq!(sol.stats.nodes_pruned, 1);
    assert_eq!(sol.stats.integral_nodes, 1);

    // Ceil child saw -x0 <= -1 appended to the base row
    let (a, b) = &oracle.seen[1];
    assert_eq!(a, &vec![vec![1.0, 1.0], vec![-1.0, 0.0]]);
    assert_eq!(b, &vec![10.0, -1.0]);

    // Floor child saw x0 <= 0 and not its sibling's row
    let (a, b) = &oracle.seen[2];
    assert_eq!(a, &vec![vec![1.0, 1.0], vec![1.0, 0.0]]);
    assert_eq!(b, &vec![10.0, 0.0]);
}

#[test]
fn test_incumbent_improves_monotonically() {
    let prob = two_var_problem();
    let mut oracle = ScriptedOracle::new(vec![
        // Root
        RelaxationResult::optimal(-10.0, vec![0.5, 0.5]),
        // x0 >= 1: integral, first incumbent
        RelaxationResult::optimal(-6.0, vec![1.0, 0.0]),
        // x0 <= 0: fractional in x1
        RelaxationResult::optimal(-9.0, vec![0.0, 1.5]),
        // x0 <= 0, x1 >= 2: integral and better
        RelaxationResult::optimal(-7.0, vec![0.0, 2.0]),
        // x0 <= 0, x1 <= 1: cannot beat -7
        RelaxationResult::optimal(-6.5, vec![0.0, 1.0]),
    ]);

    let mut bb = BranchAndBound::new(IlpSettings::default());
    let sol = bb.solve(&prob, &mut oracle).unwrap();

    assert_eq!(sol.status, SearchOutcome::Optimal);
    assert_eq!(sol.obj_val, -7.0);
    assert_eq!(sol.x, vec![0.0, 2.0]);
    assert_eq!(sol.stats.incumbent_updates, 2);
    assert_eq!(sol.stats.nodes_branched, 2);
    assert_eq!(sol.stats.max_depth, 2);

    // Deepest ceil row chain: x0 <= 0 then -x1 <= -2
    let (a, b) = &oracle.seen[3];
    assert_eq!(a[1..], [vec![1.0, 0.0], vec![0.0, -1.0]]);
    assert_eq!(b[1..], [0.0, -2.0]);

    // Last leaf's bound of -6.5 cannot beat -7
    assert_eq!(sol.stats.nodes_pruned, 1);
}

#[test]
fn test_outcomes_combine_upward() {
    let prob = two_var_problem();
    let mut oracle = ScriptedOracle::new(vec![
        RelaxationResult::optimal(-10.0, vec![2.5, 0.0]),
        // Ceil child infeasible, floor child unbounded
        RelaxationResult::infeasible(),
        RelaxationResult::unbounded(),
    ]);

    let mut bb = BranchAndBound::new(IlpSettings::default());
    let sol = bb.solve(&prob, &mut oracle).unwrap();

    assert_eq!(sol.status, SearchOutcome::Unbounded);
    assert_eq!(sol.stats.infeasible_nodes, 1);
    assert_eq!(sol.stats.unbounded_nodes, 1);
    assert_eq!(sol.obj_val, f64::INFINITY);
}

#[test]
fn test_optimal_child_masks_sibling_failure() {
    let prob = two_var_problem();
    let mut oracle = ScriptedOracle::new(vec![
        RelaxationResult::optimal(-10.0, vec![2.5, 0.0]),
        RelaxationResult::optimal(-9.0, vec![3.0, 0.0]),
        RelaxationResult::iteration_limit(-9.5, vec![2.0, 0.3]),
    ]);

    let mut bb = BranchAndBound::new(IlpSettings::default());
    let sol = bb.solve(&prob, &mut oracle).unwrap();

    assert_eq!(sol.status, SearchOutcome::Optimal);
    assert_eq!(sol.obj_val, -9.0);
    assert_eq!(sol.stats.limited_nodes, 1);
}

#[test]
fn test_node_cap_with_infeasible_leaves() {
    let prob = two_var_problem();
    let mut oracle = ScriptedOracle::new(vec![
        RelaxationResult::optimal(-10.0, vec![0.5, 0.0]),
        RelaxationResult::infeasible(),
    ]);

    // The floor child is never solved
    let mut bb = BranchAndBound::new(IlpSettings::default().with_max_nodes(2));
    let sol = bb.solve(&prob, &mut oracle).unwrap();

    assert_eq!(oracle.seen.len(), 2);
    assert!(sol.stats.node_limit_reached);
    assert_eq!(sol.status, SearchOutcome::IterationLimit);
    assert_eq!(sol.stats.limited_nodes, 1);
    assert_eq!(sol.stats.infeasible_nodes, 1);
}

#[test]
fn test_oracle_error_propagates() {
    let prob = two_var_problem();
    let mut oracle = ScriptedOracle::new(vec![RelaxationResult::optimal(-10.0, vec![0.5, 0.0])]);

    let mut bb = BranchAndBound::new(IlpSettings::default());
    let err = bb.solve(&prob, &mut oracle).unwrap_err();

    assert!(matches!(err, IlpError::OracleError(_)));
}
