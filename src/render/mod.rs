//! Hand-off to an external renderer.
//!
//! The layout core never picks colors. A renderer supplies a callback that
//! maps each laid-out item to a [`Fill`], and gets back plain records it can
//! draw without knowing anything about the layout algorithm.

use compact_str::CompactString;

use crate::layout::{LayoutRect, NestedLayout, Rect, RectKind};
use crate::tree::arena::{Node, Tree};

/// What the renderer decided for one rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill<C> {
    pub color: C,
    /// 0.0 (transparent) ..= 1.0 (opaque)
    pub opacity: f32,
}

impl<C> Fill<C> {
    pub fn new(color: C, opacity: f32) -> Self {
        Self {
            color,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    pub fn opaque(color: C) -> Self {
        Self::new(color, 1.0)
    }
}

/// Read-only view of one laid-out item, handed to the style callback.
#[derive(Debug, Clone, Copy)]
pub struct PaintItem<'a> {
    pub kind: RectKind,
    pub rect: Rect,
    pub depth: u16,
    /// The node itself, or the parent for a remainder
    pub node: &'a Node,
    /// Weight the rectangle's area encodes
    pub weight: f64,
}

impl PaintItem<'_> {
    pub fn is_remainder(&self) -> bool {
        matches!(self.kind, RectKind::Remainder(_))
    }

    /// Label to draw; remainders are unlabeled.
    pub fn label(&self) -> Option<&str> {
        match self.kind {
            RectKind::Node(_) => Some(self.node.label.as_str()),
            RectKind::Remainder(_) => None,
        }
    }
}

/// A rectangle ready to draw.
#[derive(Debug, Clone)]
pub struct Painted<C> {
    pub kind: RectKind,
    pub rect: Rect,
    pub depth: u16,
    pub label: Option<CompactString>,
    pub fill: Fill<C>,
}

/// Run `style` over every rectangle of a nested layout, parents first.
pub fn paint<C, F>(tree: &Tree, layout: &NestedLayout, mut style: F) -> Vec<Painted<C>>
where
    F: FnMut(&PaintItem<'_>) -> Fill<C>,
{
    let sums = tree.nested_sums();
    layout
        .rects
        .iter()
        .map(|r: &LayoutRect| {
            let (node_id, weight) = match r.kind {
                RectKind::Node(id) => (id, sums[id.index()]),
                RectKind::Remainder(parent) => (parent, tree.get(parent).value),
            };
            let item = PaintItem {
                kind: r.kind,
                rect: r.rect,
                depth: r.depth,
                node: tree.get(node_id),
                weight,
            };
            Painted {
                kind: r.kind,
                rect: r.rect,
                depth: r.depth,
                label: item.label().map(CompactString::new),
                fill: style(&item),
            }
        })
        .collect()
}

/// Flat counterpart of [`paint`]: `style` receives the input index and value.
pub fn paint_values<C, F>(values: &[f64], rects: &[Rect], mut style: F) -> Vec<(Rect, Fill<C>)>
where
    F: FnMut(usize, f64) -> Fill<C>,
{
    values
        .iter()
        .zip(rects)
        .enumerate()
        .map(|(i, (&v, &r))| (r, style(i, v)))
        .collect()
}

/// Pick rectangles big enough to carry a text label, largest first.
pub fn label_candidates<C>(
    painted: &[Painted<C>],
    min_w: f64,
    min_h: f64,
    max_labels: usize,
) -> Vec<&Painted<C>> {
    let mut candidates: Vec<&Painted<C>> = painted
        .iter()
        .filter(|p| p.label.is_some() && p.rect.dx >= min_w && p.rect.dy >= min_h)
        .collect();
    candidates.sort_by(|a, b| b.rect.area().total_cmp(&a.rect.area()));
    candidates.truncate(max_labels);
    candidates
}
