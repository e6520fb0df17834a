use crate::color::Rgba;
use crate::quadrant::{between_angle, is_inside_unit, Point, Quadrant, EPSILON};
use crate::QuadtreeVisitor;

/// Outcome of a ray cast, expressed in the caller's coordinate space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    pub hit: bool,
    pub locus: Point,
    pub color: Rgba,
}

impl RayHit {
    pub fn hit(locus: Point, color: Rgba) -> Self {
        Self {
            hit: true,
            locus,
            color,
        }
    }

    pub fn miss(locus: Point) -> Self {
        Self {
            hit: false,
            locus,
            color: Rgba::TRANSPARENT,
        }
    }
}

/// Position of a node in the root's normalized space, handed to visitors.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NodeData {
    pub id: usize,
    pub parent: Option<usize>,
    pub quadrant: Option<Quadrant>,
    pub depth: u8,
    pub x: f32,
    pub y: f32,
    pub half: f32,
}

impl NodeData {
    fn root() -> Self {
        Self {
            id: 0,
            parent: None,
            quadrant: None,
            depth: 0,
            x: 0.0,
            y: 0.0,
            half: 1.0,
        }
    }

    fn child(&self, quadrant: Quadrant) -> Self {
        let q = self.half / 2.0;
        Self {
            id: 0,
            parent: Some(self.id),
            quadrant: Some(quadrant),
            depth: self.depth + 1,
            x: if quadrant.is_east() { self.x + q } else { self.x - q },
            y: if quadrant.is_north() { self.y + q } else { self.y - q },
            half: q,
        }
    }
}

/// A square region of a tile grid.
///
/// A node with no quadrants is a leaf of uniform `color`; otherwise each
/// occupied quadrant owns the sub-square of the same name, and absent
/// quadrants are empty space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridTree {
    quadrants: [Option<Box<GridTree>>; 4],
    pub color: Rgba,
}

impl GridTree {
    pub fn new(color: Rgba) -> Self {
        Self {
            quadrants: Default::default(),
            color,
        }
    }

    pub fn set_quadrant(&mut self, east: bool, north: bool, tree: GridTree) {
        self.quadrants[Quadrant::new(east, north).index()] = Some(Box::new(tree));
    }

    pub fn clear_quadrant(&mut self, east: bool, north: bool) {
        self.quadrants[Quadrant::new(east, north).index()] = None;
    }

    pub fn has_quadrant(&self, east: bool, north: bool) -> bool {
        self.quadrants[Quadrant::new(east, north).index()].is_some()
    }

    pub fn quadrant(&self, east: bool, north: bool) -> Option<&GridTree> {
        self.child(Quadrant::new(east, north))
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<&GridTree> {
        self.quadrants[quadrant.index()].as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.quadrants.iter().all(Option::is_none)
    }

    /// Collapses four identical leaf quadrants into this node.
    ///
    /// Does nothing unless every quadrant is occupied by a leaf and all four
    /// colors are equal.
    pub fn cull(&mut self) -> bool {
        let mut color = None;
        for quadrant in &self.quadrants {
            match quadrant {
                Some(q) if q.is_leaf() => match color {
                    None => color = Some(q.color),
                    Some(c) if c == q.color => {}
                    Some(_) => return false,
                },
                _ => return false,
            }
        }

        match color {
            Some(color) => {
                self.quadrants = Default::default();
                self.color = color;
                true
            }
            None => false,
        }
    }

    /// Casts a ray from `origin` at bearing `angle` (0 along +Y, growing towards +X)
    /// and returns the first surface it meets inside this node.
    ///
    /// A ray starting on (or beyond) an edge of the box and heading away from
    /// it misses at `origin`.
    pub fn cast(&self, origin: Point, angle: f32) -> RayHit {
        let dx = angle.sin();
        let dy = angle.cos();

        if leaves_box(origin, dx, dy) {
            return RayHit::miss(origin);
        }
        self.cast_local(origin, angle, dx, dy)
    }

    fn cast_local(&self, origin: Point, angle: f32, dx: f32, dy: f32) -> RayHit {
        let Some(entry) = enter(origin, dx, dy) else {
            return RayHit::miss(origin);
        };
        let (mut x, mut y) = (entry.x, entry.y);

        if self.is_leaf() {
            if self.color.is_transparent() {
                return RayHit::miss(Point::new(x, y));
            }

            let at_east = x + y > 0.0 && x - y > 0.0;
            let at_west = x + y < 0.0 && x - y < 0.0;
            let color = if at_east || at_west {
                self.color.side_shaded()
            } else {
                self.color
            };
            return RayHit::hit(Point::new(x, y), color);
        }

        while is_inside_unit(Point::new(x, y)) {
            let quadrant = Quadrant::of(Point::new(x, y));
            let b = quadrant.bounds();

            let child = self
                .child(quadrant)
                .filter(|c| !(c.is_leaf() && c.color.is_transparent()));

            if let Some(child) = child {
                let local = b.to_local(Point::new(x, y));
                let mut ray = child.cast_local(local, angle, dx, dy);

                ray.locus = b.from_local(ray.locus);
                if ray.hit {
                    return ray;
                }
                x = ray.locus.x;
                y = ray.locus.y;

                // Rounding can leave a deep exit point on the shared edge; step along the ray.
                if is_inside_unit(Point::new(x, y)) && Quadrant::of(Point::new(x, y)) == quadrant {
                    x += EPSILON * dx;
                    y += EPSILON * dy;
                }
                continue;
            }

            // Bearings from the current point to the corners of the empty quadrant.
            let top_left = (b.x_min - x).atan2(b.y_max - y);
            let top_right = (b.x_max - x).atan2(b.y_max - y);
            let bottom_left = (b.x_min - x).atan2(b.y_min - y);
            let bottom_right = (b.x_max - x).atan2(b.y_min - y);

            if between_angle(angle, top_left, top_right) {
                x += (b.y_max - y) / dy * dx;
                y = b.y_max + EPSILON;
            } else if between_angle(angle, top_right, bottom_right) {
                y += (b.x_max - x) / dx * dy;
                x = b.x_max + EPSILON;
            } else if between_angle(angle, bottom_right, bottom_left) {
                x += (b.y_min - y) / dy * dx;
                y = b.y_min - EPSILON;
            } else if between_angle(angle, bottom_left, top_left) {
                y += (b.x_min - x) / dx * dy;
                x = b.x_min - EPSILON;
            } else {
                break;
            }
        }

        RayHit::miss(Point::new(x, y))
    }

    /// Walks the tree depth-first, slot 0 first, numbering nodes in visiting order.
    pub fn traverse<V>(&self, visitor: &mut V)
    where
        V: QuadtreeVisitor,
    {
        let mut next_id = 0;
        let mut to_process: Vec<(Option<&GridTree>, NodeData)> = vec![(Some(self), NodeData::root())];

        while let Some((node, mut nd_data)) = to_process.pop() {
            nd_data.id = next_id;
            next_id += 1;

            match node {
                None => visitor.vacant(nd_data),
                Some(node) if node.is_leaf() => visitor.leaf(nd_data, node.color),
                Some(node) => {
                    visitor.branch(nd_data);
                    // Reversed so slot 0 is popped first.
                    for quadrant in Quadrant::ALL.iter().rev() {
                        to_process.push((node.child(*quadrant), nd_data.child(*quadrant)));
                    }
                }
            }
        }
    }
}

fn leaves_box(p: Point, dx: f32, dy: f32) -> bool {
    (p.x <= -1.0 && dx < 0.0)
        || (p.x >= 1.0 && dx > 0.0)
        || (p.y <= -1.0 && dy < 0.0)
        || (p.y >= 1.0 && dy > 0.0)
}

/// Projects a point lying outside [-1,1]² onto the box along the ray.
///
/// Returns `None` when the ray runs parallel to a boundary it has to cross,
/// points away from the box, or passes beside it.
fn enter(origin: Point, dx: f32, dy: f32) -> Option<Point> {
    let (mut x, mut y) = (origin.x, origin.y);

    if x < -1.0 {
        if dx == 0.0 {
            return None;
        }
        let d = (-1.0 - x) / dx;
        if d < 0.0 {
            return None;
        }
        x = -1.0;
        y += d * dy;
    }

    if x > 1.0 {
        if dx == 0.0 {
            return None;
        }
        let d = (1.0 - x) / dx;
        if d < 0.0 {
            return None;
        }
        x = 1.0;
        y += d * dy;
    }

    if y < -1.0 {
        if dy == 0.0 {
            return None;
        }
        let d = (-1.0 - y) / dy;
        if d < 0.0 {
            return None;
        }
        x += d * dx;
        y = -1.0;
    }

    if y > 1.0 {
        if dy == 0.0 {
            return None;
        }
        let d = (1.0 - y) / dy;
        if d < 0.0 {
            return None;
        }
        x += d * dx;
        y = 1.0;
    }

    let p = Point::new(x, y);
    is_inside_unit(p).then_some(p)
}
