use log::{debug, info, trace};
use rand::Rng;
use rayon::prelude::*;

use crate::config::{DriftSettings, RegenSegments};
use crate::error::{Result, check_dimensions};
use crate::grid::Grid;
use crate::path::{Path, sample_path};
use crate::raster::{draw_path, rasterize_paths};
use crate::rng::random_vector;
use crate::solver::solve_potential;

/// Paths persisted across drift passes, with the segment count each was
/// first sampled with.
#[derive(Clone, Debug)]
pub struct PathSet {
    pub paths: Vec<Path>,
    pub initial_segments: Vec<usize>,
    /// Segment count drawn for the last path of the initial pass.
    pub last_init_segments: usize,
}

/// Add `solved` into `terrain` cell by cell.
pub fn accumulate(terrain: &mut Grid<f64>, solved: &Grid<f64>) {
    debug_assert_eq!((terrain.w, terrain.h), (solved.w, solved.h));
    terrain
        .data
        .par_iter_mut()
        .zip(solved.data.par_iter())
        .for_each(|(t, s)| *t += *s);
}

/// Rigid translation plus per-vertex jitter for every path, then a
/// `1 / regen_one_in` chance per path of resampling it from scratch.
///
/// `displ` bounds the shared translation; jitter is bounded by `displ / 4`.
/// Rows are clamped into `[0, height - 0.01]`, columns are left free.
pub fn perturb_paths<R: Rng + ?Sized>(
    rng: &mut R,
    set: &mut PathSet,
    height: usize,
    width: usize,
    settings: &DriftSettings,
    displ: f64,
) {
    let top = height as f64 - 1.0;
    for path in set.paths.iter_mut() {
        let shared = random_vector(rng, displ);
        for v in path.vertices.iter_mut() {
            *v += shared + random_vector(rng, displ / 4.0);
            if v.row <= 0.0 {
                v.row = 0.0;
            } else if v.row >= top {
                v.row = height as f64 - 0.01;
            }
        }
    }

    for (i, path) in set.paths.iter_mut().enumerate() {
        if rng.random_range(0..settings.regen_one_in) != 0 {
            continue;
        }
        let segments = match settings.regen_segments {
            RegenSegments::LastInit => set.last_init_segments,
            RegenSegments::PerPath => set.initial_segments[i],
        };
        trace!("regenerating path {i} with {segments} segments");
        *path = sample_path(rng, height, width, segments, settings.max_segment_length);
    }
}

/// Sample the initial path set, drawing each path onto `potential` as soon
/// as it is sampled.
fn init_paths<R: Rng + ?Sized>(
    rng: &mut R,
    potential: &mut Grid<f64>,
    settings: &DriftSettings,
) -> PathSet {
    let (height, width) = (potential.h, potential.w);
    let mut paths = Vec::with_capacity(settings.num_paths);
    let mut initial_segments = Vec::with_capacity(settings.num_paths);
    let mut last_init_segments = 0;
    for _ in 0..settings.num_paths {
        let segments = rng.random_range(0..settings.max_segments_per_path) + 3;
        let path = sample_path(rng, height, width, segments, settings.max_segment_length);
        draw_path(rng, &path, potential);
        paths.push(path);
        initial_segments.push(segments);
        last_init_segments = segments;
    }
    PathSet {
        paths,
        initial_segments,
        last_init_segments,
    }
}

/// Run the drift loop and return the accumulated terrain.
///
/// One initial pass plus `settings.iterations` perturbation passes; each
/// pass rasterizes the current paths into a fresh potential grid, solves
/// it and adds the solution into the terrain.
pub fn run<R: Rng + ?Sized>(
    rng: &mut R,
    height: usize,
    width: usize,
    settings: &DriftSettings,
) -> Result<Grid<f64>> {
    check_dimensions(height, width)?;
    settings.validate()?;
    let mut terrain = Grid::new(width, height);
    drift_into(rng, &mut terrain, settings);
    Ok(terrain)
}

/// Drift loop accumulating into an existing terrain grid.
pub fn drift_into<R: Rng + ?Sized>(rng: &mut R, terrain: &mut Grid<f64>, settings: &DriftSettings) {
    let (height, width) = (terrain.h, terrain.w);
    info!(
        "drifting {} paths over {}x{} for {} iterations (max segment length {:.3})",
        settings.num_paths, height, width, settings.iterations, settings.max_segment_length
    );

    let mut potential = Grid::new(width, height);
    let mut set = init_paths(rng, &mut potential, settings);
    accumulate(terrain, &solve_potential(&potential));

    let displ = settings.max_segment_length / 4.0;
    for it in 0..settings.iterations {
        debug!("drifting, time={it}");
        perturb_paths(rng, &mut set, height, width, settings, displ);
        let potential = rasterize_paths(rng, &set.paths, height, width);
        accumulate(terrain, &solve_potential(&potential));
    }
}
