use crate::common::Formula;

/// A node identified by its index in a [`NodeStorage`].
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.index)
    }
}

/// Hands out the step numbers of a tree. Numbers start at 1 and are never reused.
#[derive(Debug)]
pub struct StepCounter {
    next: u32,
}

impl StepCounter {
    pub fn new() -> Self {
        StepCounter { next: 1 }
    }

    /// Take the next number.
    pub fn issue(&mut self) -> u32 {
        let number = self.next;
        self.next += 1;
        number
    }

    /// The number the next call to [`StepCounter::issue`] returns.
    pub fn peek(&self) -> u32 {
        self.next
    }
}

impl Default for StepCounter {
    fn default() -> Self {
        StepCounter::new()
    }
}

/// A formula placed on a node.
#[derive(Debug, Clone)]
pub struct FormulaEntry {
    formula: Formula,
    broken: bool,
    sequence: Option<u32>,
}

impl FormulaEntry {
    pub fn new(formula: Formula) -> Self {
        FormulaEntry {
            formula,
            broken: false,
            sequence: None,
        }
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    /// Whether the decomposition rule of this entry has fired.
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    /// Step number at which the entry was broken.
    pub fn sequence(&self) -> Option<u32> {
        self.sequence
    }

    /// An entry can be broken once, and only if its formula is not a literal.
    pub fn can_break(&self) -> bool {
        !self.broken && !self.formula.is_literal()
    }

    fn mark_broken(&mut self, sequence: u32) {
        self.broken = true;
        self.sequence = Some(sequence);
    }
}

/// One segment of a branch. Entries are append-only and a node has either no children or
/// exactly two.
#[derive(Debug, Clone)]
pub struct Node {
    entries: Vec<FormulaEntry>,
    parent: Option<NodeId>,
    children: Option<[NodeId; 2]>,
    closed: bool,
    closure: Option<u32>,
}

impl Node {
    fn new(parent: Option<NodeId>) -> Self {
        Node {
            entries: vec![],
            parent,
            children: None,
            closed: false,
            closure: None,
        }
    }

    pub fn entries(&self) -> &[FormulaEntry] {
        &self.entries
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> Option<[NodeId; 2]> {
        self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Whether a contradiction was found directly on this node. See
    /// [`NodeStorage::is_closed`] for closure that takes children into account.
    pub fn closed(&self) -> bool {
        self.closed
    }

    /// Step number at which the node closed.
    pub fn closure(&self) -> Option<u32> {
        self.closure
    }
}

/// Owns every node of a tree. Nodes refer to each other by [`NodeId`], so a child can query
/// its ancestors without the tree owning itself.
#[derive(Debug, Clone)]
pub struct NodeStorage {
    nodes: Vec<Node>,
}

impl NodeStorage {
    /// Create a storage holding only an empty root.
    pub fn new() -> Self {
        NodeStorage {
            nodes: vec![Node::new(None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId { index: 0 }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        self.nodes.get(id.index).expect("node index out of bounds")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes.get_mut(id.index).expect("node index out of bounds")
    }

    pub fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn all_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|index| NodeId { index })
    }

    fn push_entry(&mut self, id: NodeId, formula: Formula) {
        self.node_mut(id).entries.push(FormulaEntry::new(formula));
    }

    fn close(&mut self, id: NodeId, counter: &mut StepCounter) {
        let node = self.node_mut(id);
        node.closed = true;
        node.closure = Some(counter.issue());
    }

    /// Place the initial formulas on a node. Unlike [`NodeStorage::add_entry`] every formula is
    /// placed even after the node closed, so a contradiction among the seeds still shows all of
    /// them.
    pub(super) fn seed(
        &mut self,
        id: NodeId,
        formulas: impl IntoIterator<Item = Formula>,
        counter: &mut StepCounter,
    ) {
        for formula in formulas {
            let complement = formula.complement();
            self.push_entry(id, formula);
            if !self.node(id).closed && self.contains_formula(id, &complement) {
                self.close(id, counter);
            }
        }
    }

    pub(super) fn mark_broken(&mut self, id: NodeId, entry: usize, sequence: u32) {
        self.node_mut(id).entries[entry].mark_broken(sequence);
    }

    /// Append a formula to an open node. Returns true if the node closed because the complement
    /// of the formula is already on its branch, in which case the closure consumes a step number.
    /// A closed node rejects the formula and returns false.
    pub fn add_entry(&mut self, id: NodeId, formula: Formula, counter: &mut StepCounter) -> bool {
        if self.node(id).closed {
            return false;
        }
        let complement = formula.complement();
        self.push_entry(id, formula);
        if self.contains_formula(id, &complement) {
            self.close(id, counter);
            true
        } else {
            false
        }
    }

    /// Check if the formula is on the node or any of its ancestors.
    pub fn contains_formula(&self, id: NodeId, target: &Formula) -> bool {
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.node(id);
            if node.entries.iter().any(|entry| entry.formula == *target) {
                return true;
            }
            current = node.parent;
        }
        false
    }

    /// A leaf is closed if it closed itself, an inner node once all of its children are closed.
    pub fn is_closed(&self, id: NodeId) -> bool {
        let node = self.node(id);
        match node.children {
            None => node.closed,
            Some(children) => children.iter().all(|&child| self.is_closed(child)),
        }
    }

    /// Check if expansion below this node can make progress. A node can expand while it holds
    /// an unbroken composite formula. Otherwise every open child has to be expandable, and at
    /// least one child has to be open.
    pub fn can_expand(&self, id: NodeId) -> bool {
        if self.is_closed(id) {
            return false;
        }
        let node = self.node(id);
        if node.entries.iter().any(FormulaEntry::can_break) {
            return true;
        }
        match node.children {
            None => false,
            Some(children) => {
                let mut open = children
                    .iter()
                    .copied()
                    .filter(|&child| !self.is_closed(child))
                    .peekable();
                open.peek().is_some() && open.all(|child| self.can_expand(child))
            }
        }
    }

    /// Split every open leaf below the node in two. Returns the new left and right leaves. A
    /// leaf gets its children only once; calling this on an inner node recurses, so repeated
    /// calls extend the current leaves instead of replacing earlier children.
    pub fn add_children(&mut self, id: NodeId) -> (Vec<NodeId>, Vec<NodeId>) {
        if self.node(id).closed {
            return (vec![], vec![]);
        }
        match self.node(id).children {
            None => {
                let left = self.add_node(id);
                let right = self.add_node(id);
                self.node_mut(id).children = Some([left, right]);
                (vec![left], vec![right])
            }
            Some(children) => {
                let mut left_nodes = vec![];
                let mut right_nodes = vec![];
                for child in children {
                    let (left, right) = self.add_children(child);
                    left_nodes.extend(left);
                    right_nodes.extend(right);
                }
                (left_nodes, right_nodes)
            }
        }
    }

    /// All leaves below the node whose branch has not closed, from left to right.
    pub fn open_leaves(&self, id: NodeId) -> Vec<NodeId> {
        let node = self.node(id);
        if node.closed {
            return vec![];
        }
        match node.children {
            None => vec![id],
            Some(children) => children
                .iter()
                .flat_map(|&child| self.open_leaves(child))
                .collect(),
        }
    }

    /// The path from the root down to the node.
    pub fn branch(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            path.push(parent);
            current = self.node(parent).parent;
        }
        path.reverse();
        path
    }

    fn add_node(&mut self, parent: NodeId) -> NodeId {
        let index = self.nodes.len();
        self.nodes.push(Node::new(Some(parent)));
        NodeId { index }
    }
}

impl Default for NodeStorage {
    fn default() -> Self {
        NodeStorage::new()
    }
}
