//! Child node construction.
//!
//! Branching on a fractional value `v` of `x[j]` splits the parent into
//!
//! ```text
//! ceil child:   parent rows + (-x[j] <= -ceil(v))
//! floor child:  parent rows + ( x[j] <=  floor(v))
//! ```
//!
//! which together exclude only the open interval `(floor(v), ceil(v))`.

use super::{NodeId, RowStore, SearchNode};
use crate::model::{BranchDirection, BranchRow};

/// Creates child nodes and hands out node ids.
#[derive(Debug, Clone)]
pub struct NodeFactory {
    next_id: usize,
}

impl Default for NodeFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeFactory {
    /// Create a factory; id 0 is reserved for the root.
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Create the root node.
    pub fn root(&mut self) -> SearchNode {
        self.next_id = 1;
        SearchNode::root()
    }

    /// Hand out ids again starting at `from`, once every node from `from`
    /// onwards has been dropped.
    pub fn release(&mut self, from: NodeId) {
        self.next_id = from.0;
    }

    /// Split `parent` on `x[var] = value`.
    ///
    /// Both rows are appended to `store` below the parent's tip. Returns
    /// `(ceil_child, floor_child)`.
    pub fn make_children(
        &mut self,
        store: &mut RowStore,
        parent: &SearchNode,
        var: usize,
        value: f64,
    ) -> (SearchNode, SearchNode) {
        let ceil_id = NodeId(self.next_id);
        let floor_id = NodeId(self.next_id + 1);
        self.next_id += 2;

        let ceil_row = store.push(BranchRow::ceil(var, value), parent.tip);
        let floor_row = store.push(BranchRow::floor(var, value), parent.tip);

        (
            parent.child(ceil_id, BranchDirection::Ceil, ceil_row),
            parent.child(floor_id, BranchDirection::Floor, floor_row),
        )
    }
}
