//! Column-per-ray projection of a [`GridTree`] into a software frame buffer.

use std::f32::consts::{FRAC_PI_2, TAU};
use std::path::Path;

use image::{ImageBuffer, ImageFormat, ImageResult, RgbaImage};

use crate::color::Rgba;
use crate::grid::GridMap;
use crate::quadrant::{remap, Point};
use crate::quadtree::GridTree;

pub const SKY: Rgba = Rgba::new(128, 224, 255, 255);
pub const GROUND: Rgba = Rgba::new(64, 128, 64, 255);

/// Viewer state in the root's normalized space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub pos: Point,
    /// Bearing in radians, 0 along +Y.
    pub angle: f32,
    pub fov: f32,
    /// Height of a wall one cell wide at unit distance.
    pub wall: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pos: Point::default(),
            angle: 0.0,
            fov: FRAC_PI_2,
            wall: 1.0,
        }
    }
}

impl Camera {
    /// A camera at the origin scaled to the grid's cell size.
    pub fn for_grid(grid: &GridMap) -> Self {
        Self {
            wall: 2.0 / grid.width.max(grid.height).max(1) as f32,
            ..Self::default()
        }
    }

    pub fn turn(&mut self, radians: f32) {
        self.angle = (self.angle + radians).rem_euclid(TAU);
    }

    /// Bearing of the ray through screen column `x` of a `width` wide view.
    pub fn ray_angle(&self, x: u32, width: u32) -> f32 {
        let camera_x = remap(x as f32, 0.0, width as f32, -1.0, 1.0);
        self.angle + (camera_x * (self.fov / 2.0).tan()).atan()
    }
}

pub struct Frame {
    pub color_buffer: Vec<Rgba>,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            color_buffer: vec![Rgba::TRANSPARENT; width as usize * height as usize],
            width,
            height,
        }
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.color_buffer[i] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            return Some(self.color_buffer[self.index(x, y)]);
        }
        None
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn fill_rows(&mut self, from: u32, to: u32, color: Rgba) {
        let start = self.index(0, from.min(self.height));
        let end = self.index(0, to.min(self.height));
        self.color_buffer[start..end].fill(color);
    }

    /// Draws sky, ground and one wall slice per column.
    pub fn render(&mut self, tree: &GridTree, camera: &Camera) {
        let midpoint = self.height as f32 / 2.0;
        self.fill_rows(0, midpoint as u32, SKY);
        self.fill_rows(midpoint as u32, self.height, GROUND);

        let field = (camera.fov / 2.0).tan();
        for x in 0..self.width {
            let ray_angle = camera.ray_angle(x, self.width);
            let ray = tree.cast(camera.pos, ray_angle);
            if !ray.hit {
                continue;
            }

            // Projected onto the view direction to undo the fish-eye effect.
            let distance = ray.locus.distance(camera.pos) * (ray_angle - camera.angle).cos();
            if distance <= 0.0 {
                continue;
            }
            let length = camera.wall / distance * (self.width as f32 / 2.0) / field;

            let top = (midpoint - length / 2.0).max(0.0) as u32;
            let bottom = (midpoint + length / 2.0).min(self.height as f32) as u32;
            for y in top..bottom {
                self.set_pixel(x, y, ray.color);
            }
        }
    }

    pub fn to_image(&self) -> RgbaImage {
        ImageBuffer::from_fn(self.width, self.height, |x, y| {
            let c = self.color_buffer[self.index(x, y)];
            image::Rgba([c.r, c.g, c.b, c.a])
        })
    }

    /// Writes the frame as a PNG, whatever the extension of `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        self.to_image().save_with_format(path, ImageFormat::Png)
    }
}
