//! LP relaxation oracles.
//!
//! The search only talks to relaxations through [`RelaxationOracle`], so a
//! different LP backend (or a scripted one in tests) can be swapped in.

mod relaxation;
mod simplex;

pub use relaxation::{RelaxationOracle, RelaxationResult, RelaxationStatus};
pub use simplex::SimplexOracle;
