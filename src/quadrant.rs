use std::f32::consts::TAU;

use glam::Vec2;

/// Distance a ray is pushed past an edge so it lands inside the neighbouring region.
pub const EPSILON: f32 = 0.0001;

/// A point in some node's normalized [-1,1]×[-1,1] space.
pub type Point = Vec2;

pub fn is_inside_unit(p: Point) -> bool {
    (-1.0..=1.0).contains(&p.x) && (-1.0..=1.0).contains(&p.y)
}

/// One of the four sub-squares of a node.
///
/// ```text
///          (Y+)
///           |
///        1  |  0
/// (X-) -----+----- (X+)
///        2  |  3
///           |
///          (Y-)
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NorthEast,
    NorthWest,
    SouthWest,
    SouthEast,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthEast,
        Quadrant::NorthWest,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    pub fn new(east: bool, north: bool) -> Self {
        match (east, north) {
            (true, true) => Quadrant::NorthEast,
            (false, true) => Quadrant::NorthWest,
            (false, false) => Quadrant::SouthWest,
            (true, false) => Quadrant::SouthEast,
        }
    }

    /// The quadrant containing `point`; points on an axis belong to the east/north side.
    pub fn of(point: Point) -> Self {
        Self::new(point.x >= 0.0, point.y >= 0.0)
    }

    pub fn index(self) -> usize {
        match self {
            Quadrant::NorthEast => 0,
            Quadrant::NorthWest => 1,
            Quadrant::SouthWest => 2,
            Quadrant::SouthEast => 3,
        }
    }

    pub fn is_east(self) -> bool {
        matches!(self, Quadrant::NorthEast | Quadrant::SouthEast)
    }

    pub fn is_north(self) -> bool {
        matches!(self, Quadrant::NorthEast | Quadrant::NorthWest)
    }

    /// Bounds of this quadrant inside the parent's space.
    pub fn bounds(self) -> Bounds {
        let (x_min, x_max) = if self.is_east() { (0.0, 1.0) } else { (-1.0, 0.0) };
        let (y_min, y_max) = if self.is_north() { (0.0, 1.0) } else { (-1.0, 0.0) };
        Bounds {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Quadrant::NorthEast => "X+ Y+",
            Quadrant::NorthWest => "X- Y+",
            Quadrant::SouthWest => "X- Y-",
            Quadrant::SouthEast => "X+ Y-",
        }
    }
}

/// Slot index of the quadrant on the given side of both axes.
pub fn quadrant_index(east: bool, north: bool) -> usize {
    Quadrant::new(east, north).index()
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Bounds {
    /// Maps a point of this box onto the full [-1,1] square.
    pub fn to_local(&self, p: Point) -> Point {
        Point::new(
            remap(p.x, self.x_min, self.x_max, -1.0, 1.0).clamp(-1.0, 1.0),
            remap(p.y, self.y_min, self.y_max, -1.0, 1.0).clamp(-1.0, 1.0),
        )
    }

    /// Maps a point of the full [-1,1] square back into this box.
    pub fn from_local(&self, p: Point) -> Point {
        Point::new(
            remap(p.x, -1.0, 1.0, self.x_min, self.x_max),
            remap(p.y, -1.0, 1.0, self.y_min, self.y_max),
        )
    }
}

/// Affine map of `x` from `[from_x, to_x]` onto `[from_y, to_y]`.
///
/// A degenerate source interval maps everything onto `from_y`.
pub fn remap(x: f32, from_x: f32, to_x: f32, from_y: f32, to_y: f32) -> f32 {
    if to_x == from_x {
        return from_y;
    }
    (x - from_x) / (to_x - from_x) * (to_y - from_y) + from_y
}

/// Whether the bearing `theta` lies on the clockwise arc from `from` to `to`.
///
/// All three angles are normalized into [0, 2π) first, so arcs crossing the
/// 0/2π seam are handled.
pub fn between_angle(theta: f32, from: f32, to: f32) -> bool {
    let theta = theta.rem_euclid(TAU);
    let from = from.rem_euclid(TAU);
    let to = to.rem_euclid(TAU);

    if from <= to {
        from <= theta && theta <= to
    } else {
        theta >= from || theta <= to
    }
}

/// Smallest power of two that is `>= x`; zero rounds up to one.
pub fn next_power_of_two(x: usize) -> usize {
    x.max(1).next_power_of_two()
}
