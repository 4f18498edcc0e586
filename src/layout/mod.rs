pub mod nested;
pub mod normalize;
pub mod rect;
pub mod squarify;

pub use nested::{
    compute_layout, normalize_nested, squarify_nested, LayoutConfig, LayoutRect, NestedLayout,
    RectKind,
};
pub use normalize::normalize_sizes;
pub use rect::{Insets, Rect};
pub use squarify::{padded_squarify, squarify};
