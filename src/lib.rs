mod quadtree;
mod quadrant;
mod color;
mod grid;
mod error;
mod graphviz;
mod stats;
pub mod render;
pub mod config;

/// Read-only walk over a built [`GridTree`], see [`GridTree::traverse`].
pub trait QuadtreeVisitor {
    fn branch(&mut self, node: NodeData);
    fn leaf(&mut self, node: NodeData, color: Rgba);
    /// An absent quadrant of a branch, i.e. empty space.
    fn vacant(&mut self, node: NodeData);
}

pub use quadtree::*;
pub use quadrant::*;
pub use color::*;
pub use grid::*;
pub use error::*;
pub use graphviz::*;
pub use stats::*;
