use std::cmp::Ordering;

use super::arena::{NodeId, Tree};

impl Tree {
    /// Own value plus the values of every descendant. Computed on each call.
    pub fn nested_sum(&self, id: NodeId) -> f64 {
        let mut total = 0.0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            total += self.get(current).value;
            stack.extend(self.children(current));
        }
        total
    }

    /// Nested sums for all nodes, indexed by `NodeId::index`.
    pub fn nested_sums(&self) -> Vec<f64> {
        // Children always have higher indices than their parents, so a
        // reverse scan finishes every child before its parent.
        let mut sums: Vec<f64> = self.nodes.iter().map(|n| n.value).collect();
        for i in (0..self.nodes.len()).rev() {
            if let Some(parent) = self.nodes[i].parent {
                sums[parent.index()] += sums[i];
            }
        }
        sums
    }
}

/// Sort the top-level nodes and every child list, descending by nested sum.
/// Equal sums keep their original relative order. Values are not touched.
pub fn sort_nested(tree: &mut Tree) {
    let sums = tree.nested_sums();
    let by_sum_desc = |a: &NodeId, b: &NodeId| {
        sums[b.index()]
            .partial_cmp(&sums[a.index()])
            .unwrap_or(Ordering::Equal)
    };

    tree.roots.sort_by(by_sum_desc);

    for i in 0..tree.nodes.len() {
        if !tree.nodes[i].has_children() {
            continue;
        }
        let parent = NodeId(i as u32);
        let mut children: Vec<NodeId> = tree.children(parent).collect();
        // sort_by is stable
        children.sort_by(by_sum_desc);
        tree.relink_children(parent, &children);
    }

    tracing::debug!("Sorted {} nodes by nested sum", tree.len());
}
