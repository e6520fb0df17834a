//! Command-line options of the `quadcaster` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::error::ConfigError;
use crate::quadrant::Point;

pub const DEFAULT_MAP: &str = "maps/a.txt";

/// Largest accepted frame width or height, in pixels.
pub const MAX_FRAME_SIDE: u32 = 16_384;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

/// Compresses a tile map into a quadtree and ray-casts it.
#[derive(Parser, Clone, Debug, PartialEq)]
#[command(name = "quadcaster")]
#[command(about = "Builds the quadtree of a tile map and renders it from a camera")]
pub struct Config {
    /// Tile map, one row per line, one digit 0-7 per cell.
    #[arg(default_value = DEFAULT_MAP)]
    pub map: PathBuf,

    /// Print the tree as a Graphviz digraph.
    #[arg(long)]
    pub dot: bool,

    /// Render one frame into a PNG image.
    #[arg(long, value_name = "FILE")]
    pub render: Option<PathBuf>,

    /// Frame size in pixels.
    #[arg(long, value_name = "WxH", default_value = "800x600", value_parser = parse_size)]
    pub size: FrameSize,

    /// Camera position in normalized map space (default: the map's center).
    #[arg(long, value_name = "X,Y", allow_hyphen_values = true, value_parser = parse_pos)]
    pub pos: Option<Point>,

    /// Camera bearing in degrees, 0 is north.
    #[arg(long, value_name = "DEG", allow_hyphen_values = true)]
    pub angle: Option<f32>,

    /// Horizontal field of view in degrees (default: 90).
    #[arg(long, value_name = "DEG", value_parser = parse_fov)]
    pub fov: Option<f32>,
}

fn parse_size(s: &str) -> Result<FrameSize, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        value: s.to_string(),
        expected: "WIDTHxHEIGHT with sides between 1 and 16384",
    };
    let (w, h) = s.split_once('x').ok_or_else(invalid)?;
    let width: u32 = w.trim().parse().map_err(|_| invalid())?;
    let height: u32 = h.trim().parse().map_err(|_| invalid())?;
    if !(1..=MAX_FRAME_SIDE).contains(&width) || !(1..=MAX_FRAME_SIDE).contains(&height) {
        return Err(invalid());
    }
    Ok(FrameSize { width, height })
}

fn parse_pos(s: &str) -> Result<Point, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        value: s.to_string(),
        expected: "a point X,Y",
    };
    let (x, y) = s.split_once(',').ok_or_else(invalid)?;
    match (x.trim().parse(), y.trim().parse()) {
        (Ok(x), Ok(y)) => Ok(Point::new(x, y)),
        _ => Err(invalid()),
    }
}

fn parse_fov(s: &str) -> Result<f32, ConfigError> {
    match s.trim().parse::<f32>() {
        Ok(fov) if fov > 0.0 && fov < 180.0 => Ok(fov),
        _ => Err(ConfigError::InvalidValue {
            value: s.to_string(),
            expected: "degrees between 0 and 180",
        }),
    }
}
