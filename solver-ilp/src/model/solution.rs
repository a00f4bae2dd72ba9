//! ILP solution types.

use std::fmt;

/// Outcome of a search subtree, and of the whole solve.
///
/// Variants are ordered `Optimal < IterationLimit < Infeasible < Unbounded`;
/// [`SearchOutcome::combine`] relies on that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum SearchOutcome {
    /// Subtree fully resolved (possibly with no integer point in it).
    Optimal = 0,

    /// A relaxation or the node budget hit its limit.
    IterationLimit = 1,

    /// Relaxation infeasible.
    Infeasible = 2,

    /// Relaxation unbounded.
    Unbounded = 3,
}

impl SearchOutcome {
    /// Numeric status code `0..=3`.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Outcome of a node from the outcomes of its two children.
    ///
    /// `Optimal` if either child is `Optimal`, otherwise the larger of the two.
    pub fn combine(ceil: Self, floor: Self) -> Self {
        if ceil == Self::Optimal || floor == Self::Optimal {
            Self::Optimal
        } else {
            ceil.max(floor)
        }
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Optimal => "optimal",
            Self::IterationLimit => "iteration_limit",
            Self::Infeasible => "infeasible",
            Self::Unbounded => "unbounded",
        }
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tracks the best known integer solution (incumbent).
#[derive(Debug, Clone)]
pub struct IncumbentTracker {
    /// Objective value of the incumbent, `+inf` until one is found.
    pub obj_val: f64,

    /// Incumbent solution, all zeros until one is found.
    pub solution: Vec<f64>,
}

impl IncumbentTracker {
    /// Create an empty tracker for `n` variables.
    pub fn new(n: usize) -> Self {
        Self {
            obj_val: f64::INFINITY,
            solution: vec![0.0; n],
        }
    }

    /// Restore the empty state for `n` variables.
    pub fn reset(&mut self, n: usize) {
        *self = Self::new(n);
    }

    /// Replace the incumbent if `obj` is strictly better.
    ///
    /// Returns true if the incumbent was improved.
    pub fn try_update(&mut self, obj: f64, x: &[f64]) -> bool {
        if obj < self.obj_val {
            self.obj_val = obj;
            self.solution.clear();
            self.solution.extend_from_slice(x);
            true
        } else {
            false
        }
    }

    /// Current `(objective, solution)`.
    pub fn current(&self) -> (f64, &[f64]) {
        (self.obj_val, &self.solution)
    }
}

/// Counters collected during a solve.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SearchStats {
    /// Relaxations solved.
    pub nodes_explored: u64,

    /// Nodes pruned because their bound could not beat the incumbent.
    pub nodes_pruned: u64,

    /// Nodes that produced two children.
    pub nodes_branched: u64,

    /// Nodes whose relaxation was integral.
    pub integral_nodes: u64,

    /// Nodes with an infeasible relaxation.
    pub infeasible_nodes: u64,

    /// Nodes with an unbounded relaxation.
    pub unbounded_nodes: u64,

    /// Nodes resolved as `IterationLimit`, by the oracle or the node cap.
    pub limited_nodes: u64,

    /// Number of incumbent improvements.
    pub incumbent_updates: u64,

    /// Deepest node visited (root is 0).
    pub max_depth: usize,

    /// Most node records held at once.
    pub peak_nodes: usize,

    /// Wall-clock solve time in milliseconds.
    pub elapsed_ms: u64,

    /// Whether `max_nodes` stopped the search early.
    pub node_limit_reached: bool,
}

/// Result of an ILP solve.
#[derive(Debug, Clone)]
pub struct IlpSolution {
    /// Outcome of the root node.
    pub status: SearchOutcome,

    /// Best integer solution; zeros when none was found.
    pub x: Vec<f64>,

    /// Best integer objective; `+inf` when none was found.
    pub obj_val: f64,

    /// Search statistics.
    pub stats: SearchStats,
}

impl IlpSolution {
    /// Numeric status code `0..=3`.
    pub fn status_code(&self) -> u8 {
        self.status.code()
    }

    /// Returns true if an integer solution was found.
    pub fn has_solution(&self) -> bool {
        self.obj_val.is_finite()
    }

    /// `(obj_val, x, status_code)`.
    pub fn into_parts(self) -> (f64, Vec<f64>, u8) {
        let code = self.status_code();
        (self.obj_val, self.x, code)
    }
}
