use crate::color::Rgba;
use crate::quadtree::{GridTree, NodeData};
use crate::QuadtreeVisitor;

/// Node counts of a built tree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub branches: usize,
    pub leaves: usize,
    pub vacant: usize,
    pub depth: u8,
}

impl TreeStats {
    pub fn of(tree: &GridTree) -> Self {
        let mut stats = Self::default();
        tree.traverse(&mut stats);
        stats
    }
}

impl QuadtreeVisitor for TreeStats {
    fn branch(&mut self, node: NodeData) {
        self.branches += 1;
        self.depth = self.depth.max(node.depth);
    }

    fn leaf(&mut self, node: NodeData, _color: Rgba) {
        self.leaves += 1;
        self.depth = self.depth.max(node.depth);
    }

    fn vacant(&mut self, _node: NodeData) {
        self.vacant += 1;
    }
}
