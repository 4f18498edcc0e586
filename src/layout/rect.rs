/// An axis-aligned rectangle: origin plus width (`dx`) and height (`dy`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Self { x, y, dx, dy }
    }

    pub fn area(&self) -> f64 {
        self.dx * self.dy
    }

    /// Label anchor.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.dx / 2.0, self.y + self.dy / 2.0)
    }

    /// Longer side over shorter side. Zero-area rectangles report infinity.
    pub fn aspect_ratio(&self) -> f64 {
        let (lo, hi) = if self.dx < self.dy {
            (self.dx, self.dy)
        } else {
            (self.dy, self.dx)
        };
        if lo <= 0.0 {
            f64::INFINITY
        } else {
            hi / lo
        }
    }

    /// Shrink by `pad` on every side. A side thinner than `2 * pad` collapses
    /// to zero around its midpoint instead of going negative.
    pub fn pad(&self, pad: f64) -> Rect {
        self.inset(&Insets::uniform(pad))
    }

    /// Shrink by per-side margins, collapsing any side that cannot fit them.
    pub fn inset(&self, insets: &Insets) -> Rect {
        let (x, dx) = shrink_axis(self.x, self.dx, insets.left, insets.right);
        let (y, dy) = shrink_axis(self.y, self.dy, insets.bottom, insets.top);
        Rect { x, y, dx, dy }
    }

    /// Area shared with `other` (zero when they only touch).
    pub fn overlap_area(&self, other: &Rect) -> f64 {
        let w = (self.x + self.dx).min(other.x + other.dx) - self.x.max(other.x);
        let h = (self.y + self.dy).min(other.y + other.dy) - self.y.max(other.y);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }
}

fn shrink_axis(start: f64, len: f64, lo: f64, hi: f64) -> (f64, f64) {
    let margin = lo + hi;
    if len > margin {
        (start + lo, len - margin)
    } else if margin > 0.0 {
        // Keep the collapsed edge at the same relative position the margins imply.
        (start + len * (lo / margin), 0.0)
    } else {
        (start, len.max(0.0))
    }
}

/// Per-side margins reserved inside a parent before its children are laid out.
///
/// `bottom` is the margin at the origin side of the y axis, `top` the one at
/// `y + dy`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Insets {
    pub const ZERO: Insets = Insets::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    pub const fn uniform(pad: f64) -> Self {
        Self::new(pad, pad, pad, pad)
    }

    /// Centered horizontally, one unit at the bottom and the rest of `y_pad`
    /// on top, leaving room for a title above the children.
    pub fn titled(x_pad: f64, y_pad: f64) -> Self {
        Self::new(x_pad / 2.0, x_pad / 2.0, 1.0, (y_pad - 2.0).max(0.0))
    }
}
