//! Branch-and-bound search driver.

use std::time::Instant;

use super::{Integrality, IntegralityChecker, NodeFactory, NodeId, NodeStatus, RowStore, SearchNode};
use crate::error::{IlpError, IlpResult};
use crate::model::{
    ConstraintSystem, IlpProblem, IlpSolution, IncumbentTracker, SearchOutcome, SearchStats,
};
use crate::oracle::{RelaxationOracle, RelaxationStatus};
use crate::settings::IlpSettings;

/// Depth-first branch-and-bound controller.
///
/// Nodes are kept on an explicit LIFO work-list. A branched node pushes its
/// floor child and then its ceil child, so the ceil subtree is finished
/// before the floor child is looked at. Leaf outcomes are folded upward with
/// [`SearchOutcome::combine`] as soon as both children of a node are known.
///
/// A node's descendants are always the newest entries of the node list and
/// the row store. When a subtree resolves they are dropped, so both hold
/// `O(depth)` entries rather than one per explored node.
pub struct BranchAndBound {
    /// Settings.
    settings: IlpSettings,

    /// Integrality test.
    checker: IntegralityChecker,

    /// Incumbent solution tracker.
    pub incumbent: IncumbentTracker,

    /// Branching rows of the open nodes.
    store: RowStore,

    /// Child constructor.
    factory: NodeFactory,

    /// Open nodes and their pending children, indexed by `NodeId`.
    nodes: Vec<SearchNode>,

    /// Nodes waiting to be processed.
    stack: Vec<NodeId>,

    /// Counters.
    stats: SearchStats,

    /// Start time.
    start_time: Option<Instant>,
}

impl BranchAndBound {
    /// Create a new B&B controller.
    pub fn new(settings: IlpSettings) -> Self {
        Self {
            checker: IntegralityChecker::new(settings.int_tol),
            incumbent: IncumbentTracker::new(0),
            store: RowStore::new(),
            factory: NodeFactory::new(),
            nodes: Vec::new(),
            stack: Vec::new(),
            stats: SearchStats::default(),
            start_time: None,
            settings,
        }
    }

    /// Statistics of the last solve.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Solve `problem` using `oracle` for every relaxation.
    pub fn solve<O: RelaxationOracle + ?Sized>(
        &mut self,
        problem: &IlpProblem,
        oracle: &mut O,
    ) -> IlpResult<IlpSolution> {
        self.settings.validate()?;
        problem.validate()?;
        self.reset(problem.num_vars());

        if self.settings.verbose {
            log::info!(
                "B&B: {} vars, {} rows, max_nodes={}, int_tol={:.1e}",
                problem.num_vars(),
                problem.num_constraints(),
                self.settings.max_nodes,
                self.settings.int_tol
            );
        }

        let root = self.factory.root();
        self.stack.push(root.id);
        self.add_node(root)?;

        let mut root_outcome = None;

        while let Some(id) = self.stack.pop() {
            let resolved = if self.stats.nodes_explored >= self.settings.max_nodes {
                if !self.stats.node_limit_reached && self.settings.verbose {
                    log::info!(
                        "B&B: node limit {} reached, {} nodes left unexplored",
                        self.settings.max_nodes,
                        self.stack.len() + 1
                    );
                }
                self.stats.node_limit_reached = true;
                self.stats.limited_nodes += 1;
                self.node_mut(id)?.status = NodeStatus::NodeLimit;
                Some(SearchOutcome::IterationLimit)
            } else {
                self.process_node(problem, oracle, id)?
            };

            if let Some(outcome) = resolved {
                if let Some(outcome) = self.finish(id, outcome)? {
                    root_outcome = Some(outcome);
                }
            }

            self.log_progress();
        }

        let outcome = root_outcome.ok_or_else(|| {
            IlpError::InternalError("search ended without resolving the root".to_string())
        })?;

        Ok(self.finalize(outcome))
    }

    fn reset(&mut self, n: usize) {
        self.incumbent.reset(n);
        self.checker = IntegralityChecker::new(self.settings.int_tol);
        self.store.clear();
        self.factory = NodeFactory::new();
        self.nodes.clear();
        self.stack.clear();
        self.stats = SearchStats::default();
        self.start_time = Some(Instant::now());
    }

    fn node_mut(&mut self, id: NodeId) -> IlpResult<&mut SearchNode> {
        self.nodes
            .get_mut(id.index())
            .ok_or_else(|| IlpError::InternalError(format!("unknown node {}", id.index())))
    }

    fn add_node(&mut self, node: SearchNode) -> IlpResult<()> {
        if node.id.index() != self.nodes.len() {
            return Err(IlpError::InternalError(format!(
                "node {} created out of order (expected {})",
                node.id.index(),
                self.nodes.len()
            )));
        }
        self.stats.max_depth = self.stats.max_depth.max(node.depth);
        self.nodes.push(node);
        self.stats.peak_nodes = self.stats.peak_nodes.max(self.nodes.len());
        Ok(())
    }

    /// Drop every descendant of a resolved node, with their rows.
    fn release_children(&mut self, id: NodeId) -> IlpResult<()> {
        let Some(first) = self.node_mut(id)?.first_child.take() else {
            return Ok(());
        };
        let tip = self.node_mut(first)?.tip;

        self.nodes.truncate(first.index());
        self.factory.release(first);
        if let Some(tip) = tip {
            self.store.truncate(tip);
        }
        Ok(())
    }

    /// Solve one node's relaxation and decide what happens to it.
    ///
    /// Returns the node's outcome if it is a leaf, or `None` if it branched.
    fn process_node<O: RelaxationOracle + ?Sized>(
        &mut self,
        problem: &IlpProblem,
        oracle: &mut O,
        id: NodeId,
    ) -> IlpResult<Option<SearchOutcome>> {
        let (tip, depth) = {
            let node = self.node_mut(id)?;
            (node.tip, node.depth)
        };

        let system = ConstraintSystem::with_branch_rows(problem, self.store.chain(tip));
        let relax = oracle.solve(&system)?;
        self.stats.nodes_explored += 1;

        let status = match relax.status {
            RelaxationStatus::Optimal => None,
            RelaxationStatus::IterationLimit => {
                self.stats.limited_nodes += 1;
                Some(NodeStatus::IterationLimit)
            }
            RelaxationStatus::Infeasible => {
                self.stats.infeasible_nodes += 1;
                Some(NodeStatus::Infeasible)
            }
            RelaxationStatus::Unbounded => {
                self.stats.unbounded_nodes += 1;
                Some(NodeStatus::Unbounded)
            }
        };
        if let Some(status) = status {
            log::debug!("node {} (depth {}): relaxation {:?}", id.index(), depth, relax.status);
            self.node_mut(id)?.status = status;
            return Ok(Some(relax.status.into()));
        }

        if relax.solution.len() != problem.num_vars() {
            return Err(IlpError::OracleError(format!(
                "relaxation returned {} values for {} variables",
                relax.solution.len(),
                problem.num_vars()
            )));
        }

        self.node_mut(id)?.bound = relax.objective;

        if relax.objective >= self.incumbent.obj_val {
            log::debug!(
                "node {} (depth {}): pruned, bound {:.6e} >= incumbent {:.6e}",
                id.index(),
                depth,
                relax.objective,
                self.incumbent.obj_val
            );
            self.stats.nodes_pruned += 1;
            self.node_mut(id)?.status = NodeStatus::Pruned;
            return Ok(Some(SearchOutcome::Optimal));
        }

        match self.checker.classify(&relax.solution) {
            Integrality::Integral => {
                self.stats.integral_nodes += 1;
                self.node_mut(id)?.status = NodeStatus::Integral;

                if self.incumbent.try_update(relax.objective, &relax.solution) {
                    self.stats.incumbent_updates += 1;
                    if self.settings.verbose {
                        log::info!(
                            "New incumbent at node {} (depth {}): obj={:.6e}",
                            id.index(),
                            depth,
                            relax.objective
                        );
                    }
                }
                Ok(Some(SearchOutcome::Optimal))
            }
            Integrality::Fractional { index, value } => {
                log::debug!(
                    "node {} (depth {}): branching on x[{}] = {:.6}",
                    id.index(),
                    depth,
                    index,
                    value
                );
                self.stats.nodes_branched += 1;

                let parent = self.node_mut(id)?;
                parent.status = NodeStatus::Branched;
                let parent = parent.clone();

                let (ceil, floor) = self
                    .factory
                    .make_children(&mut self.store, &parent, index, value);
                let (ceil_id, floor_id) = (ceil.id, floor.id);
                self.node_mut(id)?.first_child = Some(ceil_id);
                self.add_node(ceil)?;
                self.add_node(floor)?;

                self.stack.push(floor_id);
                self.stack.push(ceil_id);
                Ok(None)
            }
        }
    }

    /// Fold a resolved outcome into its ancestors, dropping every subtree
    /// that becomes resolved.
    ///
    /// Returns the root outcome once the root is resolved.
    fn finish(
        &mut self,
        id: NodeId,
        outcome: SearchOutcome,
    ) -> IlpResult<Option<SearchOutcome>> {
        let mut id = id;
        let mut outcome = outcome;

        loop {
            let (parent, side) = {
                let node = self.node_mut(id)?;
                (node.parent, node.side)
            };

            let (Some(parent), Some(side)) = (parent, side) else {
                return Ok(Some(outcome));
            };

            match self.node_mut(parent)?.record_child(side, outcome) {
                Some(combined) => {
                    self.release_children(parent)?;
                    id = parent;
                    outcome = combined;
                }
                None => return Ok(None),
            }
        }
    }

    fn log_progress(&self) {
        if !self.settings.verbose || self.settings.log_freq == 0 {
            return;
        }
        let explored = self.stats.nodes_explored;
        if explored > 0 && explored % self.settings.log_freq == 0 && !self.stats.node_limit_reached {
            log::info!(
                "Nodes: {:>6} | Open: {:>5} | Incumbent: {:>12.6e} | Depth: {}",
                explored,
                self.stack.len(),
                self.incumbent.obj_val,
                self.stats.max_depth
            );
        }
    }

    fn elapsed_ms(&self) -> u64 {
        self.start_time
            .map(|t| t.elapsed().as_millis() as u64)
            .unwrap_or(0)
    }

    fn finalize(&mut self, root_outcome: SearchOutcome) -> IlpSolution {
        // Infeasibility is not proven if part of the tree was never solved
        let status = if self.stats.node_limit_reached && root_outcome == SearchOutcome::Infeasible {
            SearchOutcome::IterationLimit
        } else {
            root_outcome
        };

        self.stats.elapsed_ms = self.elapsed_ms();

        if self.settings.verbose {
            log::info!(
                "B&B finished: status={}, obj={:.6e}, nodes={}, pruned={}, time={}ms",
                status,
                self.incumbent.obj_val,
                self.stats.nodes_explored,
                self.stats.nodes_pruned,
                self.stats.elapsed_ms
            );
        }

        let (obj_val, x) = self.incumbent.current();
        IlpSolution {
            status,
            x: x.to_vec(),
            obj_val,
            stats: self.stats.clone(),
        }
    }
}
