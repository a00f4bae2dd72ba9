//! Stack-ordered storage for branching rows.
//!
//! Every row added by branching is stored once and points at the row that was
//! the tip of its parent node. A node's full set of branching rows is the
//! chain from its tip back to the root. Siblings share their parent's chain
//! and never see each other's row.
//!
//! Rows are only appended while a subtree is open. Once the subtree is
//! resolved its rows are the newest in the store and are dropped with
//! [`RowStore::truncate`], so the store holds two rows per open level.

use crate::model::BranchRow;

/// Index of a row in a [`RowStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(usize);

impl RowId {
    /// Position in the store.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct StoredRow {
    row: BranchRow,
    parent: Option<RowId>,
}

/// Arena of branching rows.
#[derive(Debug, Clone, Default)]
pub struct RowStore {
    rows: Vec<StoredRow>,
}

impl RowStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all rows.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Append `row` below `parent` and return its id.
    pub fn push(&mut self, row: BranchRow, parent: Option<RowId>) -> RowId {
        let id = RowId(self.rows.len());
        self.rows.push(StoredRow { row, parent });
        id
    }

    /// Drop `from` and every row added after it.
    pub fn truncate(&mut self, from: RowId) {
        self.rows.truncate(from.0);
    }

    /// Rows from the root down to `tip`, in the order they were added.
    pub fn chain(&self, tip: Option<RowId>) -> Vec<BranchRow> {
        let mut out = Vec::new();
        let mut cur = tip;
        while let Some(id) = cur {
            match self.rows.get(id.0) {
                Some(stored) => {
                    out.push(stored.row);
                    cur = stored.parent;
                }
                None => break,
            }
        }
        out.reverse();
        out
    }
}
