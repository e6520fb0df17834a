use std::fmt::Write;

use crate::color::Rgba;
use crate::quadtree::{GridTree, NodeData};
use crate::QuadtreeVisitor;

/// Collects a Graphviz `digraph` of a tree's structure.
///
/// Leaves are filled with their color, branches are black with white text and
/// absent quadrants black with red text.
#[derive(Debug, Default)]
pub struct GraphvizExporter {
    out: String,
}

impl GraphvizExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        format!(
            "digraph QuadTree {{\n\
             \tnode [shape=circle, style=filled, fontname=\"Helvetica\"];\n\
             \n\
             \tnode0 [label=\"Root\", fillcolor=\"black\", fontcolor=\"white\"];\n\
             {}}}\n",
            self.out
        )
    }

    fn node(&mut self, node: NodeData, fill: &str, font: &str) {
        let (Some(parent), Some(quadrant)) = (node.parent, node.quadrant) else {
            return;
        };
        // Writing into a String cannot fail.
        let _ = writeln!(
            self.out,
            "\tnode{} [label=\"{}\", fillcolor=\"#{}\", fontcolor=\"{}\"];",
            node.id,
            quadrant.label(),
            fill,
            font
        );
        let _ = writeln!(self.out, "\tnode{} -> node{};", parent, node.id);
    }
}

impl QuadtreeVisitor for GraphvizExporter {
    fn branch(&mut self, node: NodeData) {
        self.node(node, "000000FF", "white");
    }

    fn leaf(&mut self, node: NodeData, color: Rgba) {
        self.node(node, &format!("{color:X}"), "black");
    }

    fn vacant(&mut self, node: NodeData) {
        self.node(node, "000000FF", "red");
    }
}

impl GridTree {
    pub fn graphviz(&self) -> String {
        let mut exporter = GraphvizExporter::new();
        self.traverse(&mut exporter);
        exporter.finish()
    }
}
