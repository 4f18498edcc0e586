use super::rect::Rect;
use crate::error::{check_geometry, check_weights, LayoutError, Result};

/// Squarified layout (Bruls, Huizing, van Wijk).
///
/// `values` must already be normalized to `dx * dy` and should be sorted
/// descending; unsorted input still covers the area exactly, just with worse
/// aspect ratios. The returned rectangles correspond to `values` by index.
/// Zero values produce zero-area rectangles at the cursor position.
pub fn squarify(values: &[f64], x: f64, y: f64, dx: f64, dy: f64) -> Result<Vec<Rect>> {
    check_geometry(dx, dy)?;
    check_weights(values)?;

    let mut result = Vec::with_capacity(values.len());
    let mut free = Rect::new(x, y, dx, dy);
    let mut remaining = values;
    let mut rows = 0usize;

    while !remaining.is_empty() {
        let side = free.dx.min(free.dy);
        let len = next_row_len(remaining, side);
        let (row, rest) = remaining.split_at(len);

        tracing::trace!(
            "Squarify row {}: {} items in {:.3}x{:.3} at ({:.3}, {:.3})",
            rows,
            len,
            free.dx,
            free.dy,
            free.x,
            free.y
        );

        result.extend(layout_row(row, &free));
        free = leftover(row, &free);
        remaining = rest;
        rows += 1;
    }

    tracing::debug!("Squarified {} values into {} rows", values.len(), rows);
    Ok(result)
}

/// Same as [`squarify`], then every rectangle is shrunk by `padding` on each
/// side. Siblings are still placed on the unpadded boundaries, so the padding
/// only opens visual gaps.
pub fn padded_squarify(
    values: &[f64],
    x: f64,
    y: f64,
    dx: f64,
    dy: f64,
    padding: f64,
) -> Result<Vec<Rect>> {
    if !padding.is_finite() || padding < 0.0 {
        return Err(LayoutError::input(format!(
            "padding must be finite and non-negative, got {padding}"
        )));
    }
    let rects = squarify(values, x, y, dx, dy)?;
    Ok(rects.into_iter().map(|r| r.pad(padding)).collect())
}

/// Worst aspect ratio of a row with total `sum` packed against a side of
/// length `side`. Zero entries have no extent in the strip and are ignored.
pub fn worst_aspect_ratio(row: &[f64], sum: f64, side: f64) -> f64 {
    let max_r = row.iter().copied().fold(0.0, f64::max);
    let min_r = row
        .iter()
        .copied()
        .filter(|&r| r > 0.0)
        .fold(f64::INFINITY, f64::min);
    worst_from_extremes(max_r, min_r, sum, side)
}

// Ratios that differ only by rounding count as equal, so exact ties keep
// growing the row.
const TIE_TOLERANCE: f64 = 1e-12;

fn worst_from_extremes(max_r: f64, min_r: f64, sum: f64, side: f64) -> f64 {
    if sum <= 0.0 || side <= 0.0 || !min_r.is_finite() {
        return f64::INFINITY;
    }
    let side_sq = side * side;
    let sum_sq = sum * sum;
    let a = (side_sq * max_r) / sum_sq;
    let b = sum_sq / (side_sq * min_r);
    a.max(b)
}

/// Length of the next row: grow greedily while the worst aspect ratio does
/// not get worse. A non-empty input always yields at least one element.
pub fn next_row_len(values: &[f64], side: f64) -> usize {
    let Some(&first) = values.first() else {
        return 0;
    };

    let positive_min = |acc: f64, r: f64| if r > 0.0 { acc.min(r) } else { acc };

    let mut len = 1;
    let mut sum = first;
    let mut max_r = first.max(0.0);
    let mut min_r = positive_min(f64::INFINITY, first);
    let mut current = worst_from_extremes(max_r, min_r, sum, side);

    while let Some(&next) = values.get(len) {
        let next_sum = sum + next;
        let next_max = max_r.max(next);
        let next_min = positive_min(min_r, next);
        let candidate = worst_from_extremes(next_max, next_min, next_sum, side);
        if candidate > current * (1.0 + TIE_TOLERANCE) {
            break;
        }
        len += 1;
        sum = next_sum;
        max_r = next_max;
        min_r = next_min;
        current = candidate;
    }

    len
}

/// Materialize one row as a strip along the shorter side of `free`.
///
/// When `free` is at least as wide as it is tall, the strip is vertical,
/// spans the full height and stacks rectangles upward; otherwise it is
/// horizontal, spans the full width and stacks rectangles rightward.
pub fn layout_row(row: &[f64], free: &Rect) -> Vec<Rect> {
    let covered: f64 = row.iter().sum();
    let vertical = free.dx >= free.dy;
    let thickness = strip_thickness(covered, free);

    let mut offset = 0.0;
    row.iter()
        .map(|&size| {
            let length = if thickness > 0.0 { size / thickness } else { 0.0 };
            let rect = if vertical {
                Rect::new(free.x, free.y + offset, thickness, length)
            } else {
                Rect::new(free.x + offset, free.y, length, thickness)
            };
            offset += length;
            rect
        })
        .collect()
}

/// The free rectangle left after `row` has been laid out in `free`.
pub fn leftover(row: &[f64], free: &Rect) -> Rect {
    let covered: f64 = row.iter().sum();
    let thickness = strip_thickness(covered, free);
    if free.dx >= free.dy {
        Rect::new(free.x + thickness, free.y, (free.dx - thickness).max(0.0), free.dy)
    } else {
        Rect::new(free.x, free.y + thickness, free.dx, (free.dy - thickness).max(0.0))
    }
}

fn strip_thickness(covered: f64, free: &Rect) -> f64 {
    let side = free.dx.min(free.dy);
    if side > 0.0 && covered > 0.0 {
        covered / side
    } else {
        0.0
    }
}
