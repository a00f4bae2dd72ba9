//! Branch-and-bound search.

mod branching;
mod integrality;
mod node;
mod store;
mod tree;

pub use branching::NodeFactory;
pub use integrality::{Integrality, IntegralityChecker};
pub use node::{NodeId, NodeStatus, SearchNode};
pub use store::{RowId, RowStore};
pub use tree::BranchAndBound;
