//! Search node representation.

use super::RowId;
use crate::model::{BranchDirection, SearchOutcome};

/// Identifier of a node; also its position in the driver's node list.
///
/// Ids of a resolved subtree are handed out again, so an id names a node only
/// while that node is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node.
    pub const ROOT: NodeId = NodeId(0);

    /// Position in the node list.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Status of a search node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    /// Node is waiting to be processed.
    Pending,

    /// Node was pruned (bound >= incumbent).
    Pruned,

    /// Node relaxation was integral.
    Integral,

    /// Node was branched (children created).
    Branched,

    /// Node relaxation is infeasible.
    Infeasible,

    /// Node relaxation is unbounded.
    Unbounded,

    /// Relaxation hit its iteration limit.
    IterationLimit,

    /// Node was never solved because the node cap was reached.
    NodeLimit,
}

/// A node in the B&B search tree.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Unique node identifier.
    pub id: NodeId,

    /// Parent node (None for root).
    pub parent: Option<NodeId>,

    /// Side of the parent's split this node is on (None for root).
    pub side: Option<BranchDirection>,

    /// Depth in the tree (0 for root).
    pub depth: usize,

    /// Last branching row on the path to this node.
    pub tip: Option<RowId>,

    /// Ceil child once branched; the floor child follows it.
    pub first_child: Option<NodeId>,

    /// Node processing status.
    pub status: NodeStatus,

    /// Relaxation objective, once solved.
    pub bound: f64,

    /// Outcome of the ceil child's subtree, once resolved.
    pub ceil_outcome: Option<SearchOutcome>,

    /// Outcome of the floor child's subtree, once resolved.
    pub floor_outcome: Option<SearchOutcome>,
}

impl SearchNode {
    /// Create the root node.
    pub fn root() -> Self {
        Self {
            id: NodeId::ROOT,
            parent: None,
            side: None,
            depth: 0,
            tip: None,
            first_child: None,
            status: NodeStatus::Pending,
            bound: f64::NEG_INFINITY,
            ceil_outcome: None,
            floor_outcome: None,
        }
    }

    /// Create a pending child below `self`.
    pub fn child(&self, id: NodeId, side: BranchDirection, tip: RowId) -> Self {
        Self {
            id,
            parent: Some(self.id),
            side: Some(side),
            depth: self.depth + 1,
            tip: Some(tip),
            first_child: None,
            status: NodeStatus::Pending,
            bound: self.bound, // Inherit parent's bound until solved
            ceil_outcome: None,
            floor_outcome: None,
        }
    }

    /// Record a resolved child outcome.
    ///
    /// Returns the combined outcome once both children are resolved.
    pub fn record_child(
        &mut self,
        side: BranchDirection,
        outcome: SearchOutcome,
    ) -> Option<SearchOutcome> {
        match side {
            BranchDirection::Ceil => self.ceil_outcome = Some(outcome),
            BranchDirection::Floor => self.floor_outcome = Some(outcome),
        }
        match (self.ceil_outcome, self.floor_outcome) {
            (Some(ceil), Some(floor)) => Some(SearchOutcome::combine(ceil, floor)),
            _ => None,
        }
    }
}
