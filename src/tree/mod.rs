pub mod aggregate;
pub mod arena;
pub mod input;

pub use aggregate::sort_nested;
pub use arena::{Node, NodeId, Tree};
pub use input::NodeInput;
