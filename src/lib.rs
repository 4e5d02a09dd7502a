pub mod config;
pub mod drift;
pub mod error;
pub mod grid;
pub mod path;
pub mod raster;
pub mod render;
pub mod rng;
pub mod shape;
pub mod solver;

use std::time::Instant;

use log::info;

use config::Params;
pub use error::{Error, Result};
use grid::Grid;

pub struct Terrain {
    pub w: usize,
    pub h: usize,
    /// Accumulated drift field before shaping.
    pub raw: Grid<f64>,
    /// Normalized field with corner markers.
    pub shaped: Grid<f64>,
    /// `shaped` with everything below zero flooded to the sea floor.
    pub land: Grid<f64>,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

pub fn generate(seed: u64, height: usize, width: usize, params: &Params) -> Result<(Terrain, Vec<Timing>)> {
    error::check_dimensions(height, width)?;
    params.validate()?;

    let mut timings = Vec::new();
    let total_start = Instant::now();
    info!("generating terrain {height}*{width} with seed={seed}");

    // 1. Drift: accumulate solved potentials into a zero terrain
    let t = Instant::now();
    let mut rng = rng::seeded(seed);
    let settings = params.drift_settings(height, width);
    let raw = drift::run(&mut rng, height, width, &settings)?;
    timings.push(Timing {
        name: "drift",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Shape for display
    let t = Instant::now();
    let mut shaped = raw.clone();
    shape::normalize(&mut shaped, params.target_std, params.offset);
    shape::mark_corners(&mut shaped, params.corner_marker);
    let land = shape::flood_below_sea(&shaped, params.sea_floor);
    timings.push(Timing {
        name: "shape",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    timings.push(Timing {
        name: "TOTAL",
        ms: total_ms,
    });

    let terrain = Terrain {
        w: width,
        h: height,
        raw,
        shaped,
        land,
    };

    Ok((terrain, timings))
}
