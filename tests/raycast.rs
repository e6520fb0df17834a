//! End-to-end checks of the tree builder and ray caster through the public API.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use quadcaster::{is_inside_unit, GridMap, GridTree, Point, Quadrant, RayHit, TreeStats, PALETTE};

const ROOM: &str = "\
11111111
10000001
10200301
10000001
10400501
10000001
10006701
11111111
";

/// Descends to the node covering `p` (root space); `None` when the region is absent.
fn lookup(tree: &GridTree, mut p: Point) -> Option<&GridTree> {
    let mut node = tree;
    while !node.is_leaf() {
        let quadrant = Quadrant::of(p);
        p = quadrant.bounds().to_local(p);
        node = node.child(quadrant)?;
    }
    Some(node)
}

fn cell_of(grid: &GridMap, p: Point) -> (i64, i64) {
    let size = grid.tree_size() as f32;
    (
        ((p.x + 1.0) / 2.0 * size).floor() as i64,
        ((1.0 - p.y) / 2.0 * size).floor() as i64,
    )
}

fn code_at(grid: &GridMap, (x, y): (i64, i64)) -> u8 {
    if x < 0 || y < 0 {
        return 0;
    }
    grid.cell(x as usize, y as usize)
}

fn empty_cells(grid: &GridMap) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();
    for y in 0..grid.height {
        for x in 0..grid.width {
            if grid.cell(x, y) == 0 {
                cells.push((x, y));
            }
        }
    }
    cells
}

#[test]
fn homogeneous_block_is_culled_to_one_leaf() {
    let grid = GridMap::parse("0033\n0033\n0000\n1000\n");
    let tree = grid.treeify();

    let north_east = tree.quadrant(true, true).expect("block present");
    assert!(north_east.is_leaf());
    assert_eq!(north_east.color, PALETTE[3]);
    assert!(!tree.has_quadrant(false, true));
}

#[test]
fn empty_cells_have_no_leaf() {
    let grid = GridMap::parse(ROOM);
    let tree = grid.treeify();

    for y in 0..grid.height {
        for x in 0..grid.width {
            let node = lookup(&tree, grid.cell_center(x, y));
            match grid.cell(x, y) {
                0 => assert!(node.is_none(), "cell ({x}, {y}) should be absent"),
                code => assert_eq!(node.map(|n| n.color), Some(PALETTE[code as usize])),
            }
        }
    }
}

#[test]
fn casting_twice_gives_identical_results() {
    let tree = GridMap::parse(ROOM).treeify();
    for i in 0..16 {
        let angle = i as f32 * TAU / 16.0 + 0.05;
        let origin = Point::new(0.1, -0.3);
        let first = tree.cast(origin, angle);
        let second = tree.cast(origin, angle);
        assert_eq!(first, second);
    }
}

#[test]
fn every_ray_inside_a_closed_room_hits_a_wall() {
    let grid = GridMap::parse(ROOM);
    let tree = grid.treeify();

    for (x, y) in empty_cells(&grid).into_iter().step_by(3) {
        let origin = grid.cell_center(x, y);
        for i in 0..32 {
            let angle = i as f32 * TAU / 32.0 + 0.013;
            let ray = tree.cast(origin, angle);
            assert!(ray.hit, "ray from ({x}, {y}) at {angle} escaped to {:?}", ray.locus);
            assert!(is_inside_unit(ray.locus), "{:?} outside the root", ray.locus);

            // The locus lies on the ray, ahead of the origin.
            let (dx, dy) = (angle.sin(), angle.cos());
            let (vx, vy) = (ray.locus.x - origin.x, ray.locus.y - origin.y);
            assert!((vx * dy - vy * dx).abs() < 1e-3);
            assert!(vx * dx + vy * dy > 0.0);

            // And on a wall cell of the matching color.
            let mut codes = Vec::new();
            for (ox, oy) in [(-1e-3, -1e-3), (-1e-3, 1e-3), (1e-3, -1e-3), (1e-3, 1e-3)] {
                let near = Point::new(ray.locus.x + ox, ray.locus.y + oy);
                codes.push(code_at(&grid, cell_of(&grid, near)));
            }
            let matches = codes.iter().filter(|&&c| c != 0).any(|&c| {
                let expected = PALETTE[c as usize];
                ray.color == expected || ray.color == expected.side_shaded()
            });
            assert!(matches, "color {:?} not among cells {codes:?}", ray.color);
        }
    }
}

#[test]
fn receding_rays_miss_at_the_boundary() {
    let tree = GridMap::parse("10\n00\n").treeify();

    let outside = Point::new(-1.5, 0.0);
    assert_eq!(tree.cast(outside, -FRAC_PI_2), RayHit::miss(outside));

    // On the west edge of the filled cell, heading west.
    let on_edge = Point::new(-1.0, 0.5);
    assert_eq!(tree.cast(on_edge, 3.0 * FRAC_PI_2), RayHit::miss(on_edge));

    // Beside the empty south-west quadrant.
    let ray = tree.cast(Point::new(-1.0, -0.5), 3.0 * FRAC_PI_2);
    assert!(!ray.hit);
}

#[test]
fn rays_leaving_a_solid_box_from_its_edge_miss() {
    let tree = GridMap::parse("11\n11\n").treeify();
    assert!(tree.is_leaf());

    let west = Point::new(-1.0, 0.0);
    assert_eq!(tree.cast(west, 3.0 * FRAC_PI_2), RayHit::miss(west));

    let north_east = Point::new(1.0, 1.0);
    assert_eq!(tree.cast(north_east, PI / 4.0), RayHit::miss(north_east));

    let south = Point::new(0.25, -1.0);
    assert_eq!(tree.cast(south, PI), RayHit::miss(south));

    // Still a hit when the ray heads into the box.
    let ray = tree.cast(west, FRAC_PI_2);
    assert!(ray.hit);
    assert_eq!(ray.locus, west);
}

#[test]
fn ray_from_outside_enters_and_hits() {
    let tree = GridMap::parse("10\n00\n").treeify();
    let ray = tree.cast(Point::new(-0.5, 3.0), PI);
    assert!(ray.hit);
    assert!(ray.locus.distance(Point::new(-0.5, 1.0)) < 1e-5);
    assert_eq!(ray.color, PALETTE[1]);
}

#[test]
fn uniform_two_by_two_grid_is_a_single_leaf() {
    let tree = GridMap::parse("11\n11\n").treeify();
    assert!(tree.is_leaf());
    assert_eq!(tree.color, PALETTE[1]);

    let ray = tree.cast(Point::new(0.0, 0.0), 0.0);
    assert!(ray.hit);
    assert_eq!(ray.color, PALETTE[1]);
}

#[test]
fn single_filled_cell_scenario() {
    let grid = GridMap::parse("10\n00\n");
    let tree = grid.treeify();

    // Standing inside the filled cell hits it in every direction.
    let inside = grid.cell_center(0, 0);
    for i in 0..8 {
        let ray = tree.cast(inside, i as f32 * PI / 4.0);
        assert!(ray.hit);
        assert_eq!(ray.locus, inside);
        assert_eq!(ray.color.b, PALETTE[1].b);
    }

    // From the empty north-east cell looking west.
    let ray = tree.cast(grid.cell_center(1, 0), 3.0 * FRAC_PI_2);
    assert!(ray.hit);
    assert!(ray.locus.distance(Point::new(0.0, 0.5)) < 1e-3);
    assert_eq!(ray.color.b, PALETTE[1].b);

    // From the empty south-west cell heading further south-west.
    let ray = tree.cast(Point::new(-0.5, -0.5), 5.0 * PI / 4.0);
    assert!(!ray.hit);
    assert!(!is_inside_unit(ray.locus));
}

#[test]
fn root_size_is_the_next_power_of_two() {
    let exact = GridMap::parse("1212\n");
    assert_eq!(exact.tree_size(), 4);
    assert_eq!(TreeStats::of(&exact.treeify()).depth, 2);

    let padded = GridMap::parse("12121\n");
    assert_eq!(padded.tree_size(), 8);
    assert_eq!(TreeStats::of(&padded.treeify()).depth, 3);
}

#[test]
fn deep_sparse_tree_terminates() {
    let mut grid = GridMap::new();
    for i in 0..64 {
        grid.set(i, i, 1 + (i % 7) as u8);
        grid.set(63 - i, i, 2);
    }
    let tree = grid.treeify();
    assert_eq!(TreeStats::of(&tree).depth, 6);

    for i in 0..64 {
        let angle = i as f32 * TAU / 64.0 + 0.007;
        let ray = tree.cast(Point::new(0.3, -0.7), angle);
        if ray.hit {
            assert!(is_inside_unit(ray.locus));
        } else {
            assert!(!is_inside_unit(ray.locus));
        }
    }
}
