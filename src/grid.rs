use std::fs;
use std::path::Path;

use log::{debug, log_enabled, Level};

use crate::color::Rgba;
use crate::error::GridError;
use crate::quadrant::{next_power_of_two, Point, Quadrant};
use crate::quadtree::GridTree;
use crate::stats::TreeStats;

/// Highest cell code with a palette entry.
pub const MAX_CODE: u8 = 7;

/// A sparse table of cell codes, row `y` from the top, column `x` from the left.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridMap {
    map: Vec<Vec<u8>>,
    pub width: usize,
    pub height: usize,
}

impl GridMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// One row per line, one cell per character; '0'..='9' are codes, anything else is empty.
    pub fn parse(text: &str) -> Self {
        let mut grid = Self::new();
        for line in text.lines() {
            let row: Vec<u8> = line
                .chars()
                .map(|c| c.to_digit(10).map_or(0, |d| d as u8))
                .collect();
            grid.width = grid.width.max(row.len());
            grid.map.push(row);
        }
        grid.height = grid.map.len();
        grid
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GridError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| GridError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let grid = Self::parse(&text);
        debug!(
            "loaded {}x{} grid from {}",
            grid.width,
            grid.height,
            path.display()
        );
        Ok(grid)
    }

    /// Code at `(x, y)`; out-of-range cells and codes without a palette entry read as 0.
    pub fn cell(&self, x: usize, y: usize) -> u8 {
        match self.map.get(y).and_then(|row| row.get(x)) {
            Some(&code) if code <= MAX_CODE => code,
            _ => 0,
        }
    }

    pub fn set(&mut self, x: usize, y: usize, code: u8) {
        if y >= self.map.len() {
            self.map.resize_with(y + 1, Vec::new);
        }
        let row = &mut self.map[y];
        if x >= row.len() {
            row.resize(x + 1, 0);
        }
        row[x] = code;

        self.height = self.map.len();
        self.width = self.width.max(x + 1);
    }

    /// Side length, in cells, of the square covered by the root of [`GridMap::treeify`].
    pub fn tree_size(&self) -> usize {
        next_power_of_two(self.width.max(self.height))
    }

    /// Center of cell `(x, y)` in the root's normalized space.
    pub fn cell_center(&self, x: usize, y: usize) -> Point {
        let size = self.tree_size() as f32;
        Point::new(
            (x as f32 + 0.5) / size * 2.0 - 1.0,
            1.0 - (y as f32 + 0.5) / size * 2.0,
        )
    }

    /// Builds the compressed quadtree of this grid.
    pub fn treeify(&self) -> GridTree {
        let size = self.tree_size();
        let root = self.subtreeify(0, 0, size);

        if log_enabled!(Level::Debug) {
            let stats = TreeStats::of(&root);
            debug!(
                "built quadtree over {size}x{size} cells: {} branches, {} leaves, {} vacant, depth {}",
                stats.branches, stats.leaves, stats.vacant, stats.depth
            );
        }
        root
    }

    fn subtreeify(&self, x_start: usize, y_start: usize, size: usize) -> GridTree {
        if size == 1 {
            return GridTree::new(Rgba::from_code(self.cell(x_start, y_start)));
        }

        let half = size / 2;
        // Sub-squares with no geometry stay absent; a node left with none is a transparent leaf.
        let mut tree = GridTree::new(Rgba::TRANSPARENT);
        for quadrant in Quadrant::ALL {
            let x = if quadrant.is_east() { x_start + half } else { x_start };
            let y = if quadrant.is_north() { y_start } else { y_start + half };

            let sub = self.subtreeify(x, y, half);
            if !(sub.is_leaf() && sub.color.is_transparent()) {
                tree.set_quadrant(quadrant.is_east(), quadrant.is_north(), sub);
            }
        }

        tree.cull();
        tree
    }
}
