use std::collections::HashMap;

use rayon::prelude::*;

use super::normalize::normalize_sizes;
use super::rect::{Insets, Rect};
use super::squarify::squarify;
use crate::error::{check_geometry, LayoutError, Result};
use crate::tree::arena::{NodeId, Tree};

/// What a laid-out rectangle stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RectKind {
    /// A tree node, sized by its nested sum.
    Node(NodeId),
    /// The own value of a node that also has children, laid out as an
    /// unlabeled sibling of those children.
    Remainder(NodeId),
}

/// A positioned rectangle in the nested layout.
#[derive(Debug, Clone, Copy)]
pub struct LayoutRect {
    pub kind: RectKind,
    /// Visible rectangle (after sibling padding)
    pub rect: Rect,
    /// Unpadded share of the parent's area. Slots of one sibling list tile
    /// the parent's inner rectangle exactly.
    pub slot: Rect,
    /// Nesting level (top level = 0)
    pub depth: u16,
}

/// The full layout result (rects + fast lookup).
#[derive(Debug, Default)]
pub struct NestedLayout {
    /// All rectangles, parents before their descendants
    pub rects: Vec<LayoutRect>,
    /// node → index into `rects`
    pub node_to_rect: HashMap<NodeId, usize>,
    /// parent → index into `rects` of its remainder rectangle
    pub remainder_to_rect: HashMap<NodeId, usize>,
}

impl NestedLayout {
    /// Rectangle assigned to a node, if the layout reached it.
    pub fn rect(&self, node: NodeId) -> Option<Rect> {
        self.node_to_rect.get(&node).map(|&i| self.rects[i].rect)
    }

    /// Rectangle holding a node's own value when it also has children.
    pub fn remainder(&self, node: NodeId) -> Option<Rect> {
        self.remainder_to_rect.get(&node).map(|&i| self.rects[i].rect)
    }

    pub fn get(&self, node: NodeId) -> Option<&LayoutRect> {
        self.node_to_rect.get(&node).map(|&i| &self.rects[i])
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

/// Configuration for nested treemap layout.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Inset applied to every rectangle to separate siblings
    pub padding: f64,
    /// Margins reserved inside each parent before its children are laid out
    pub insets: Insets,
    /// Maximum recursion depth. Descendants below it still get rectangles,
    /// collapsed to zero area at their parent's inner origin.
    pub max_depth: u16,
    /// Lay out sibling subtrees on the rayon pool
    pub parallel: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 0.0,
            insets: Insets::ZERO,
            max_depth: 64,
            parallel: false,
        }
    }
}

impl LayoutConfig {
    pub fn with_padding(padding: f64) -> Self {
        Self {
            padding,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        let i = &self.insets;
        let all_ok = [self.padding, i.left, i.right, i.bottom, i.top]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0);
        if !all_ok {
            return Err(LayoutError::input(
                "padding and insets must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// Nested squarified layout with uniform sibling padding.
///
/// `tree` should already be sorted with [`crate::tree::sort_nested`].
pub fn squarify_nested(
    tree: &Tree,
    x: f64,
    y: f64,
    dx: f64,
    dy: f64,
    padding: f64,
) -> Result<NestedLayout> {
    compute_layout(tree, Rect::new(x, y, dx, dy), &LayoutConfig::with_padding(padding))
}

/// Lay out every top-level node of `tree` inside `bounds`, then recurse
/// into each node's children within the node's own rectangle.
pub fn compute_layout(tree: &Tree, bounds: Rect, config: &LayoutConfig) -> Result<NestedLayout> {
    check_geometry(bounds.dx, bounds.dy)?;
    config.validate()?;

    let engine = Engine {
        tree,
        sums: tree.nested_sums(),
        config,
    };
    let top: Vec<Entry> = tree.roots.iter().map(|&id| Entry::Node(id)).collect();

    tracing::info!(
        "Laying out {} top-level nodes ({} total) in {:.1}x{:.1} area",
        top.len(),
        tree.len(),
        bounds.dx,
        bounds.dy
    );

    let rects = engine.layout_level(&top, bounds, 0)?;

    let mut layout = NestedLayout {
        node_to_rect: HashMap::with_capacity(rects.len()),
        ..Default::default()
    };
    for (idx, r) in rects.iter().enumerate() {
        match r.kind {
            RectKind::Node(id) => layout.node_to_rect.insert(id, idx),
            RectKind::Remainder(parent) => layout.remainder_to_rect.insert(parent, idx),
        };
    }
    layout.rects = rects;
    Ok(layout)
}

/// Normalize the nested sums of a sibling list to the `dx * dy` area.
pub fn normalize_nested(tree: &Tree, siblings: &[NodeId], dx: f64, dy: f64) -> Result<Vec<f64>> {
    let sums: Vec<f64> = siblings.iter().map(|&id| tree.nested_sum(id)).collect();
    normalize_sizes(&sums, dx, dy)
}

#[derive(Debug, Clone, Copy)]
enum Entry {
    Node(NodeId),
    Remainder(NodeId),
}

impl Entry {
    fn kind(self) -> RectKind {
        match self {
            Entry::Node(id) => RectKind::Node(id),
            Entry::Remainder(parent) => RectKind::Remainder(parent),
        }
    }
}

struct Engine<'a> {
    tree: &'a Tree,
    sums: Vec<f64>,
    config: &'a LayoutConfig,
}

impl Engine<'_> {
    fn weight(&self, entry: Entry) -> f64 {
        match entry {
            Entry::Node(id) => self.sums[id.index()],
            Entry::Remainder(parent) => self.tree.get(parent).value,
        }
    }

    /// Lay out one sibling list in `region` and everything below it.
    fn layout_level(&self, entries: &[Entry], region: Rect, depth: u16) -> Result<Vec<LayoutRect>> {
        let slots = self.place(entries, region)?;

        let parts: Vec<Vec<LayoutRect>> = if self.config.parallel && entries.len() > 1 {
            entries
                .par_iter()
                .zip(slots.par_iter())
                .map(|(&entry, &slot)| self.layout_entry(entry, slot, depth))
                .collect::<Result<_>>()?
        } else {
            entries
                .iter()
                .zip(slots.iter())
                .map(|(&entry, &slot)| self.layout_entry(entry, slot, depth))
                .collect::<Result<_>>()?
        };

        Ok(parts.into_iter().flatten().collect())
    }

    /// Unpadded slots for a sibling list. Degenerate regions and zero total
    /// weight collapse every slot to a point at the region origin.
    fn place(&self, entries: &[Entry], region: Rect) -> Result<Vec<Rect>> {
        let weights: Vec<f64> = entries.iter().map(|&e| self.weight(e)).collect();
        let total: f64 = weights.iter().sum();

        if region.dx <= 0.0 || region.dy <= 0.0 || total <= 0.0 {
            if !entries.is_empty() {
                tracing::warn!(
                    "Collapsing {} entries to zero area (region {:.3}x{:.3}, total weight {})",
                    entries.len(),
                    region.dx,
                    region.dy,
                    total
                );
            }
            return Ok(vec![Rect::new(region.x, region.y, 0.0, 0.0); entries.len()]);
        }

        let normalized = normalize_sizes(&weights, region.dx, region.dy)?;
        squarify(&normalized, region.x, region.y, region.dx, region.dy)
    }

    fn layout_entry(&self, entry: Entry, slot: Rect, depth: u16) -> Result<Vec<LayoutRect>> {
        let rect = slot.pad(self.config.padding);
        let mut out = vec![LayoutRect {
            kind: entry.kind(),
            rect,
            slot,
            depth,
        }];

        let Entry::Node(id) = entry else {
            return Ok(out);
        };
        if !self.tree.get(id).has_children() {
            return Ok(out);
        }

        let entries = self.child_entries(id);
        let inner = rect.inset(&self.config.insets);
        if depth >= self.config.max_depth {
            let start = out.len();
            self.collapse(entries, inner, depth.saturating_add(1), &mut out);
            tracing::warn!(
                "Max depth {} reached at '{}'; collapsed {} descendants to zero area",
                depth,
                self.tree.get(id).label,
                out.len() - start
            );
            return Ok(out);
        }

        out.extend(self.layout_level(&entries, inner, depth.saturating_add(1))?);
        Ok(out)
    }

    /// Emit zero-area rectangles at the origin of `inner` for `entries` and
    /// all their descendants, in the same pre-order `layout_level` uses.
    /// Iterative so arbitrarily deep chains do not grow the call stack.
    fn collapse(&self, entries: Vec<Entry>, inner: Rect, depth: u16, out: &mut Vec<LayoutRect>) {
        let point = Rect::new(inner.x, inner.y, 0.0, 0.0);
        let mut stack: Vec<(Entry, u16)> =
            entries.into_iter().rev().map(|e| (e, depth)).collect();
        while let Some((entry, d)) = stack.pop() {
            out.push(LayoutRect {
                kind: entry.kind(),
                rect: point,
                slot: point,
                depth: d,
            });
            if let Entry::Node(id) = entry {
                let below = d.saturating_add(1);
                stack.extend(self.child_entries(id).into_iter().rev().map(|e| (e, below)));
            }
        }
    }

    /// Children in their current order, with the node's own value slotted in
    /// as a remainder before the first strictly smaller child.
    fn child_entries(&self, id: NodeId) -> Vec<Entry> {
        let mut entries: Vec<Entry> = self.tree.children(id).map(Entry::Node).collect();
        let own = self.tree.get(id).value;
        if own > 0.0 {
            let at = entries
                .iter()
                .position(|&e| self.weight(e) < own)
                .unwrap_or(entries.len());
            entries.insert(at, Entry::Remainder(id));
        }
        entries
    }
}
