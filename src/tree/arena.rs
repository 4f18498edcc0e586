use compact_str::CompactString;

use crate::error::{LayoutError, Result};

/// Index into the arena `Vec<Node>`. Uses u32 to save memory (supports up to ~4 billion nodes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single weighted item in the tree, stored in a flat arena.
/// Uses sibling-list representation: each node has `first_child` and `next_sibling`.
#[derive(Debug, Clone)]
pub struct Node {
    /// Display label
    pub label: CompactString,
    /// Own weight, excluding descendants. May be non-zero on a node with
    /// children (an unallocated remainder).
    pub value: f64,
    /// Extra named weights that can be swapped in with [`Tree::use_metric`]
    pub metrics: Vec<(CompactString, f64)>,
    /// Parent node index (None for top-level nodes)
    pub parent: Option<NodeId>,
    /// First child node index (None for leaves)
    pub first_child: Option<NodeId>,
    /// Last child node index, for O(1) ordered append
    pub last_child: Option<NodeId>,
    /// Next sibling node index (None if last child)
    pub next_sibling: Option<NodeId>,
    /// Depth in the tree (top level = 0)
    pub depth: u16,
}

impl Node {
    fn new(label: &str, value: f64) -> Self {
        Node {
            label: CompactString::new(label),
            value,
            metrics: Vec::new(),
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
            depth: 0,
        }
    }

    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }

    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|&(_, v)| v)
    }
}

/// A forest of weighted nodes stored as a flat arena.
///
/// Children always have higher indices than their parents, so a reverse
/// scan over `nodes` visits every subtree bottom-up.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    /// All nodes in contiguous memory
    pub nodes: Vec<Node>,
    /// Top-level nodes, in layout order
    pub roots: Vec<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level node. Returns the new node's ID.
    pub fn add_root(&mut self, label: &str, value: f64) -> Result<NodeId> {
        check_value(label, value)?;
        let id = self.next_id();
        self.nodes.push(Node::new(label, value));
        self.roots.push(id);
        Ok(id)
    }

    /// Append a child node under the given parent. Returns the new node's ID.
    pub fn add_child(&mut self, parent: NodeId, label: &str, value: f64) -> Result<NodeId> {
        check_value(label, value)?;
        let new_id = self.next_id();
        let mut node = Node::new(label, value);
        node.parent = Some(parent);
        node.depth = self.nodes[parent.index()].depth.saturating_add(1);

        match self.nodes[parent.index()].last_child {
            Some(last) => self.nodes[last.index()].next_sibling = Some(new_id),
            None => self.nodes[parent.index()].first_child = Some(new_id),
        }
        self.nodes[parent.index()].last_child = Some(new_id);

        self.nodes.push(node);
        Ok(new_id)
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> ChildIter<'_> {
        ChildIter {
            tree: self,
            current: self.nodes[parent.index()].first_child,
        }
    }

    /// Replace a node's own value.
    pub fn set_value(&mut self, id: NodeId, value: f64) -> Result<()> {
        let node = &mut self.nodes[id.index()];
        check_value(&node.label, value)?;
        node.value = value;
        Ok(())
    }

    /// Attach (or overwrite) a named metric on a node.
    pub fn set_metric(&mut self, id: NodeId, name: &str, value: f64) {
        let metrics = &mut self.nodes[id.index()].metrics;
        match metrics.iter_mut().find(|(k, _)| k.as_str() == name) {
            Some(slot) => slot.1 = value,
            None => metrics.push((CompactString::new(name), value)),
        }
    }

    /// Make the named metric the weight of every node.
    ///
    /// All nodes are checked before any value changes, so a missing or
    /// invalid metric leaves the tree untouched.
    pub fn use_metric(&mut self, name: &str) -> Result<()> {
        let mut values = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let v = node.metric(name).ok_or_else(|| {
                LayoutError::input(format!("node '{}' has no metric '{}'", node.label, name))
            })?;
            check_value(&node.label, v)?;
            values.push(v);
        }
        for (node, v) in self.nodes.iter_mut().zip(values) {
            node.value = v;
        }
        tracing::debug!("Switched {} nodes to metric '{}'", self.nodes.len(), name);
        Ok(())
    }

    /// Re-link a parent's children in the given order.
    pub(crate) fn relink_children(&mut self, parent: NodeId, order: &[NodeId]) {
        let Some((&first, &last)) = order.first().zip(order.last()) else {
            return;
        };
        self.nodes[parent.index()].first_child = Some(first);
        self.nodes[parent.index()].last_child = Some(last);
        for w in order.windows(2) {
            self.nodes[w[0].index()].next_sibling = Some(w[1]);
        }
        self.nodes[last.index()].next_sibling = None;
    }

    fn next_id(&self) -> NodeId {
        NodeId(self.nodes.len() as u32)
    }
}

fn check_value(label: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(LayoutError::input(format!(
            "node '{label}' has value {value}; values must be finite and non-negative"
        )));
    }
    Ok(())
}

/// Iterator over the children of a node.
pub struct ChildIter<'a> {
    tree: &'a Tree,
    current: Option<NodeId>,
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        self.current = self.tree.nodes[id.index()].next_sibling;
        Some(id)
    }
}
