// Public library interface for squarify-rs
// The debug-layout tool uses the same modules

pub mod error;
pub mod layout;
pub mod render;
pub mod tree;

pub use error::{LayoutError, Result};
pub use layout::{
    compute_layout, normalize_sizes, padded_squarify, squarify, squarify_nested, LayoutConfig,
    NestedLayout, Rect,
};
pub use tree::{sort_nested, NodeId, NodeInput, Tree};
