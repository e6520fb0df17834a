//! Loads a tile map, compresses it into a quadtree and renders it from a camera.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use quadcaster::config::Config;
use quadcaster::render::{Camera, Frame};
use quadcaster::{GridMap, TreeStats};

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::parse();

    let map = GridMap::load(&config.map)?;
    let tree = map.treeify();

    let stats = TreeStats::of(&tree);
    info!(
        "{}: {}x{} cells, {} leaves under {} branches",
        config.map.display(),
        map.width,
        map.height,
        stats.leaves,
        stats.branches
    );

    if config.dot {
        print!("{}", tree.graphviz());
    }

    if let Some(path) = &config.render {
        let mut camera = Camera::for_grid(&map);
        if let Some(pos) = config.pos {
            camera.pos = pos;
        }
        if let Some(angle) = config.angle {
            camera.turn(angle.to_radians());
        }
        if let Some(fov) = config.fov {
            camera.fov = fov.to_radians();
        }

        let size = config.size;
        let mut frame = Frame::new(size.width, size.height);
        frame.render(&tree, &camera);
        frame
            .save(path)
            .with_context(|| format!("failed to write `{}`", path.display()))?;
        info!("rendered {}x{} frame to {}", size.width, size.height, path.display());
    }

    Ok(())
}
