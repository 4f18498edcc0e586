//! Property-based invariant tests for the squarified layout.
//!
//! Verifies:
//! 1. Area conservation: rectangle areas sum to the region area
//! 2. Proportionality and order: rectangle i has the area of normalized value i
//! 3. Non-overlap: no two rectangles of one level share positive area
//! 4. Containment: every rectangle stays inside the region
//! 5. Normalization is idempotent
//! 6. Unsorted input still covers the region exactly
//! 7. Padding only shrinks rectangles in place
//! 8. Nested consistency: child slots (plus remainder) tile the parent's inner rectangle
//! 9. Nested siblings: slots at every level are pairwise disjoint and inside the parent
//! 10. Sorting orders every sibling list by nested sum and keeps values

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use squarify_rs::layout::{
    compute_layout, normalize_sizes, padded_squarify, squarify, Insets, LayoutConfig, Rect,
};
use squarify_rs::tree::{sort_nested, NodeId, NodeInput, Tree};

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_weights() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.01f64..1000.0, 1..40)
}

fn arb_sorted_weights() -> impl Strategy<Value = Vec<f64>> {
    arb_weights().prop_map(|mut v| {
        v.sort_by(|a, b| b.total_cmp(a));
        v
    })
}

fn arb_region() -> impl Strategy<Value = Rect> {
    (-100.0f64..100.0, -100.0f64..100.0, 0.5f64..2000.0, 0.5f64..2000.0)
        .prop_map(|(x, y, dx, dy)| Rect::new(x, y, dx, dy))
}

fn arb_value() -> impl Strategy<Value = f64> {
    prop_oneof![1 => Just(0.0), 4 => 0.1f64..100.0]
}

fn arb_node() -> impl Strategy<Value = NodeInput> {
    let leaf = arb_value().prop_map(|v| NodeInput::leaf("leaf", v));
    leaf.prop_recursive(4, 64, 6, |inner| {
        (arb_value(), prop::collection::vec(inner, 1..6))
            .prop_map(|(v, children)| NodeInput::branch("branch", v, children))
    })
}

fn arb_forest() -> impl Strategy<Value = Vec<NodeInput>> {
    prop::collection::vec(arb_node(), 1..6)
}

fn laid_out(values: &[f64], region: &Rect) -> (Vec<f64>, Vec<Rect>) {
    let normalized = normalize_sizes(values, region.dx, region.dy).unwrap();
    let rects = squarify(&normalized, region.x, region.y, region.dx, region.dy).unwrap();
    (normalized, rects)
}

// ── Flat layout ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn area_is_conserved(values in arb_sorted_weights(), region in arb_region()) {
        let (_, rects) = laid_out(&values, &region);
        let total: f64 = rects.iter().map(Rect::area).sum();
        prop_assert!((total - region.area()).abs() <= 1e-9 * region.area());
    }

    #[test]
    fn areas_follow_values_in_order(values in arb_sorted_weights(), region in arb_region()) {
        let (normalized, rects) = laid_out(&values, &region);
        prop_assert_eq!(rects.len(), values.len());
        let sum: f64 = normalized.iter().sum();
        for (r, n) in rects.iter().zip(&normalized) {
            let share = r.area() / region.area();
            prop_assert!((share - n / sum).abs() <= 1e-9);
        }
    }

    #[test]
    fn rects_do_not_overlap(values in arb_sorted_weights(), region in arb_region()) {
        let (_, rects) = laid_out(&values, &region);
        let eps = 1e-9 * region.area();
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                prop_assert!(a.overlap_area(b) <= eps, "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn rects_stay_inside_region(values in arb_sorted_weights(), region in arb_region()) {
        let (_, rects) = laid_out(&values, &region);
        let eps = 1e-9 * (region.dx + region.dy);
        for r in &rects {
            prop_assert!(r.dx >= 0.0 && r.dy >= 0.0);
            prop_assert!(r.x >= region.x - eps && r.y >= region.y - eps);
            prop_assert!(r.x + r.dx <= region.x + region.dx + eps);
            prop_assert!(r.y + r.dy <= region.y + region.dy + eps);
        }
    }

    #[test]
    fn normalization_is_idempotent(values in arb_weights(), region in arb_region()) {
        let once = normalize_sizes(&values, region.dx, region.dy).unwrap();
        let twice = normalize_sizes(&once, region.dx, region.dy).unwrap();
        for (a, b) in once.iter().zip(&twice) {
            prop_assert!((a - b).abs() <= 1e-9 * a.abs().max(1.0));
        }
    }

    #[test]
    fn unsorted_input_still_covers_region(values in arb_weights(), region in arb_region()) {
        let (normalized, rects) = laid_out(&values, &region);
        let total: f64 = rects.iter().map(Rect::area).sum();
        prop_assert!((total - region.area()).abs() <= 1e-9 * region.area());
        for (r, n) in rects.iter().zip(&normalized) {
            prop_assert!((r.area() - n).abs() <= 1e-9 * region.area());
        }
    }

    #[test]
    fn padding_shrinks_in_place(
        values in arb_sorted_weights(),
        region in arb_region(),
        pad in 0.0f64..5.0,
    ) {
        let (normalized, plain) = laid_out(&values, &region);
        let padded =
            padded_squarify(&normalized, region.x, region.y, region.dx, region.dy, pad).unwrap();
        for (p, q) in plain.iter().zip(&padded) {
            prop_assert_eq!(*q, p.pad(pad));
            prop_assert!(q.area() <= p.area());
        }
    }
}

// ── Nested layout ─────────────────────────────────────────────────────

fn sorted_tree(forest: &[NodeInput]) -> Tree {
    let mut tree = Tree::from_input(forest).unwrap();
    sort_nested(&mut tree);
    tree
}

fn check_siblings(slots: &[Rect], region: &Rect) -> Result<(), TestCaseError> {
    let overlap_eps = 1e-9 * region.area().max(1.0);
    let edge_eps = 1e-9 * (region.dx + region.dy).max(1.0);
    for (i, a) in slots.iter().enumerate() {
        prop_assert!(a.dx >= 0.0 && a.dy >= 0.0);
        prop_assert!(a.x >= region.x - edge_eps && a.y >= region.y - edge_eps);
        prop_assert!(a.x + a.dx <= region.x + region.dx + edge_eps, "{:?} leaves {:?}", a, region);
        prop_assert!(a.y + a.dy <= region.y + region.dy + edge_eps, "{:?} leaves {:?}", a, region);
        for b in &slots[i + 1..] {
            prop_assert!(a.overlap_area(b) <= overlap_eps, "{:?} overlaps {:?}", a, b);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn child_slots_tile_parent(
        forest in arb_forest(),
        region in arb_region(),
        inset in 0.0f64..3.0,
        pad in 0.0f64..1.0,
    ) {
        let tree = sorted_tree(&forest);
        let config = LayoutConfig {
            padding: pad,
            insets: Insets::uniform(inset),
            ..LayoutConfig::default()
        };
        let layout = compute_layout(&tree, region, &config).unwrap();
        let sums = tree.nested_sums();

        for (idx, node) in tree.nodes.iter().enumerate() {
            let id = NodeId(idx as u32);
            let Some(parent) = layout.get(id) else { continue };
            prop_assert_eq!(parent.rect, parent.slot.pad(pad));
            if !node.has_children() {
                continue;
            }
            let inner = parent.rect.inset(&config.insets);
            let mut covered: f64 = tree
                .children(id)
                .map(|c| layout.get(c).map(|r| r.slot.area()))
                .sum::<Option<f64>>()
                .unwrap();
            if let Some(&ri) = layout.remainder_to_rect.get(&id) {
                covered += layout.rects[ri].slot.area();
            }
            if sums[idx] > 0.0 && inner.dx > 0.0 && inner.dy > 0.0 {
                prop_assert!((covered - inner.area()).abs() <= 1e-9 * inner.area().max(1.0));
            } else {
                prop_assert_eq!(covered, 0.0);
            }
        }
    }

    #[test]
    fn sibling_slots_are_disjoint_and_contained(
        forest in arb_forest(),
        region in arb_region(),
        inset in 0.0f64..3.0,
        pad in 0.0f64..1.0,
    ) {
        let tree = sorted_tree(&forest);
        let config = LayoutConfig {
            padding: pad,
            insets: Insets::uniform(inset),
            ..LayoutConfig::default()
        };
        let layout = compute_layout(&tree, region, &config).unwrap();

        let top: Vec<Rect> = tree.roots.iter().map(|&id| layout.get(id).unwrap().slot).collect();
        check_siblings(&top, &region)?;

        for (idx, node) in tree.nodes.iter().enumerate() {
            if !node.has_children() {
                continue;
            }
            let id = NodeId(idx as u32);
            let inner = layout.rect(id).unwrap().inset(&config.insets);
            let mut slots: Vec<Rect> =
                tree.children(id).map(|c| layout.get(c).unwrap().slot).collect();
            if let Some(&ri) = layout.remainder_to_rect.get(&id) {
                slots.push(layout.rects[ri].slot);
            }
            check_siblings(&slots, &inner)?;
            for c in tree.children(id) {
                let r = layout.get(c).unwrap();
                prop_assert_eq!(r.rect, r.slot.pad(pad));
            }
        }
    }

    #[test]
    fn every_node_gets_a_rect(forest in arb_forest(), region in arb_region()) {
        let tree = sorted_tree(&forest);
        let layout = compute_layout(&tree, region, &LayoutConfig::default()).unwrap();
        let remainders = tree
            .nodes
            .iter()
            .filter(|n| n.has_children() && n.value > 0.0)
            .count();
        prop_assert_eq!(layout.node_to_rect.len(), tree.len());
        prop_assert_eq!(layout.remainder_to_rect.len(), remainders);
        prop_assert_eq!(layout.len(), tree.len() + remainders);
    }

    #[test]
    fn siblings_are_sorted_by_nested_sum(forest in arb_forest()) {
        let original = Tree::from_input(&forest).unwrap();
        let tree = sorted_tree(&forest);
        let sums = tree.nested_sums();

        let descending = |ids: &[NodeId]| {
            ids.windows(2)
                .all(|w| sums[w[0].index()] >= sums[w[1].index()])
        };
        prop_assert!(descending(tree.roots.as_slice()));
        for idx in 0..tree.len() {
            let children: Vec<NodeId> = tree.children(NodeId(idx as u32)).collect();
            prop_assert!(descending(children.as_slice()));
            prop_assert_eq!(tree.nodes[idx].value, original.nodes[idx].value);
        }
    }
}
