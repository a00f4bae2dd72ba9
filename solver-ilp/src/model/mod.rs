//! Problem, constraint-system and solution types.

mod problem;
mod solution;
mod system;

pub use problem::IlpProblem;
pub use solution::{IlpSolution, IncumbentTracker, SearchOutcome, SearchStats};
pub use system::{BranchDirection, BranchRow, ConstraintSystem, Row};
