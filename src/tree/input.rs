use std::collections::BTreeMap;

use compact_str::CompactString;
use serde::Deserialize;

use super::arena::{NodeId, Tree};
use crate::error::Result;

/// Nested description of a node, as read from JSON or built by hand.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeInput {
    pub label: CompactString,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub children: Vec<NodeInput>,
    /// Alternate weights, see [`Tree::use_metric`]
    #[serde(default)]
    pub metrics: BTreeMap<CompactString, f64>,
}

impl NodeInput {
    pub fn leaf(label: &str, value: f64) -> Self {
        Self {
            label: CompactString::new(label),
            value,
            ..Default::default()
        }
    }

    pub fn branch(label: &str, value: f64, children: Vec<NodeInput>) -> Self {
        Self {
            children,
            ..Self::leaf(label, value)
        }
    }
}

impl Tree {
    /// Build an arena tree from nested inputs, keeping the given order.
    pub fn from_input(inputs: &[NodeInput]) -> Result<Tree> {
        let mut tree = Tree::new();
        // Iterative to avoid stack overflow on deep inputs.
        let mut pending: Vec<(Option<NodeId>, &NodeInput)> = Vec::new();
        for input in inputs.iter().rev() {
            pending.push((None, input));
        }

        while let Some((parent, input)) = pending.pop() {
            let id = match parent {
                Some(parent) => tree.add_child(parent, &input.label, input.value)?,
                None => tree.add_root(&input.label, input.value)?,
            };
            for (name, &v) in &input.metrics {
                tree.set_metric(id, name, v);
            }
            for child in input.children.iter().rev() {
                pending.push((Some(id), child));
            }
        }

        tracing::debug!(
            "Built tree with {} nodes ({} top-level)",
            tree.len(),
            tree.roots.len()
        );
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_order_and_shape() {
        let inputs = vec![
            NodeInput::branch(
                "root",
                0.0,
                vec![NodeInput::leaf("a", 1.0), NodeInput::leaf("b", 2.0)],
            ),
            NodeInput::leaf("other", 4.0),
        ];
        let tree = Tree::from_input(&inputs).unwrap();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.roots.len(), 2);
        let labels: Vec<_> = tree
            .children(tree.roots[0])
            .map(|id| tree.get(id).label.as_str().to_owned())
            .collect();
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[test]
    fn parses_json_with_defaults_and_metrics() {
        let json = r#"[{"label": "root", "children": [
            {"label": "a", "value": 3, "metrics": {"count": 7}}
        ]}]"#;
        let inputs: Vec<NodeInput> = serde_json::from_str(json).unwrap();
        let tree = Tree::from_input(&inputs).unwrap();
        let a = tree.children(tree.roots[0]).next().unwrap();
        assert_eq!(tree.get(tree.roots[0]).value, 0.0);
        assert_eq!(tree.get(a).value, 3.0);
        assert_eq!(tree.get(a).metric("count"), Some(7.0));
    }

    #[test]
    fn rejects_negative_values() {
        assert!(Tree::from_input(&[NodeInput::leaf("x", -2.0)]).is_err());
    }
}
