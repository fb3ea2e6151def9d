mod rules;
mod storage;

use indicatif::ProgressBar;
use tracing::{debug, info, trace};

use crate::common::{Formula, Valuation};
pub use rules::{decompose, Expansion};
pub use storage::{FormulaEntry, Node, NodeId, NodeStorage, StepCounter};

/// A truth tree for a set of premises and a goal. The root holds the premises followed by the
/// negated goal; the goal is entailed iff every branch of the finished tree closes.
#[derive(Debug)]
pub struct TruthTree {
    nodes: NodeStorage,
    counter: StepCounter,
}

impl TruthTree {
    /// Seed a tree without expanding it.
    pub fn new(premises: impl IntoIterator<Item = Formula>, goal: Formula) -> Self {
        let mut nodes = NodeStorage::new();
        let mut counter = StepCounter::new();
        let root = nodes.root();
        nodes.seed(
            root,
            premises.into_iter().chain(std::iter::once(!goal)),
            &mut counter,
        );
        TruthTree { nodes, counter }
    }

    pub fn root(&self) -> NodeId {
        self.nodes.root()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        self.nodes.node(id)
    }

    pub fn nodes(&self) -> &NodeStorage {
        &self.nodes
    }

    /// The number the next rule firing or closure will be stamped with.
    pub fn next_step(&self) -> u32 {
        self.counter.peek()
    }

    /// Check if every branch of the tree is closed.
    pub fn is_closed(&self) -> bool {
        self.nodes.is_closed(self.root())
    }

    /// True once the tree is closed or no rule can fire anymore.
    pub fn is_done(&self) -> bool {
        self.is_closed() || !self.nodes.can_expand(self.root())
    }

    /// Whether the premises entail the goal. Only meaningful once the tree is done.
    pub fn entails(&self) -> bool {
        self.is_closed()
    }

    /// Expand the tree until it is done.
    pub fn expand_tree(&mut self) {
        self.expand_tree_with(&ProgressBar::hidden())
    }

    /// Expand the tree until it is done, ticking the progress bar once per rule firing.
    pub fn expand_tree_with(&mut self, progress: &ProgressBar) {
        while !self.is_done() {
            let expanded = self.expand_one_step(self.root());
            // can_expand guarantees that some open node below the root still has a rule to fire
            assert!(
                expanded,
                "tree is expandable but no rule fired at step {}",
                self.counter.peek()
            );
            progress.inc(1);
        }
        info!(
            "tree finished with {} nodes, {}",
            self.nodes.number_of_nodes(),
            if self.is_closed() { "closed" } else { "open" }
        );
    }

    /// Fire the rule of the first unbroken composite formula at or below the node. Entries of
    /// the node come first, in insertion order, then its children from left to right. Returns
    /// false if nothing below the node could be broken.
    pub fn expand_one_step(&mut self, id: NodeId) -> bool {
        if self.nodes.is_closed(id) {
            return false;
        }

        let node = self.nodes.node(id);
        if let Some(index) = node.entries().iter().position(FormulaEntry::can_break) {
            let formula = node.entries()[index].formula().clone();
            let sequence = self.counter.issue();
            self.nodes.mark_broken(id, index, sequence);
            debug!("[{}] breaking {} on {}", sequence, formula, id);
            self.apply_rule(id, &formula);
            return true;
        }

        match node.children() {
            None => false,
            Some(children) => children.into_iter().any(|child| self.expand_one_step(child)),
        }
    }

    fn apply_rule(&mut self, id: NodeId, formula: &Formula) {
        let expansion = decompose(formula)
            .unwrap_or_else(|| panic!("no decomposition rule for {}", formula));
        match expansion {
            Expansion::Extend(formulas) => {
                for leaf in self.nodes.open_leaves(id) {
                    self.add_sequence(leaf, &formulas);
                }
            }
            Expansion::Branch { left, right } => {
                let (left_nodes, right_nodes) = self.nodes.add_children(id);
                for leaf in left_nodes {
                    self.add_sequence(leaf, &left);
                }
                for leaf in right_nodes {
                    self.add_sequence(leaf, &right);
                }
            }
        }
    }

    /// Add the formulas to the leaf in order, stopping once the leaf closes. The first formula
    /// is always attempted.
    fn add_sequence(&mut self, leaf: NodeId, formulas: &[Formula]) {
        for formula in formulas {
            trace!("adding {} to {}", formula, leaf);
            if self.nodes.add_entry(leaf, formula.clone(), &mut self.counter) {
                debug!(
                    "[{}] closed {} on {}",
                    self.counter.peek() - 1,
                    leaf,
                    formula
                );
                break;
            }
        }
    }

    /// Leaves of branches that are still open.
    pub fn open_leaves(&self) -> Vec<NodeId> {
        self.nodes.open_leaves(self.root())
    }

    /// The truth assignment of the branch ending in `leaf`. Returns `None` if `leaf` is not a
    /// leaf, the branch is closed, or the branch still holds an unbroken composite formula. A
    /// returned valuation makes every premise true and the goal false.
    pub fn valuation(&self, leaf: NodeId) -> Option<Valuation> {
        let node = self.nodes.node(leaf);
        if !node.is_leaf() || node.closed() {
            return None;
        }
        let branch = self.nodes.branch(leaf);
        let entries = || branch.iter().flat_map(|&id| self.nodes.node(id).entries());
        if entries().any(FormulaEntry::can_break) {
            return None;
        }
        let mut valuation = Valuation::new();
        for entry in entries() {
            valuation.try_assign(entry.formula()).ok()?;
        }
        Some(valuation)
    }

    /// The valuation of the leftmost fully expanded open branch. A finished tree that is not
    /// closed always has one.
    pub fn counter_example(&self) -> Option<Valuation> {
        self.open_leaves()
            .into_iter()
            .find_map(|leaf| self.valuation(leaf))
    }
}

/// Build the tree for the premises and goal and expand it to completion.
pub fn prove(premises: impl IntoIterator<Item = Formula>, goal: Formula) -> TruthTree {
    let mut tree = TruthTree::new(premises, goal);
    tree.expand_tree();
    tree
}
