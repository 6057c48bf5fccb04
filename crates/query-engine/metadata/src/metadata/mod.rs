//! Shapes exchanged with the graph API, and the frames built from them.

pub mod fields;
pub mod frame;
pub mod graph;

// re-export without modules
pub use fields::*;
pub use frame::*;
pub use graph::*;
