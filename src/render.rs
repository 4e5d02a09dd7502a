use rayon::prelude::*;

use crate::grid::Grid;

// Terrain ramp stops over the normalized [0, 1] range
const RAMP: [(f32, [u8; 4]); 6] = [
    (0.00, [51, 51, 153, 255]),   // deep water
    (0.15, [0, 153, 255, 255]),   // shallow water
    (0.25, [0, 204, 102, 255]),   // lowland
    (0.50, [255, 255, 153, 255]), // plains
    (0.75, [128, 92, 84, 255]),   // highland
    (1.00, [255, 255, 255, 255]), // snow
];

#[inline]
fn lerp_color(a: [u8; 4], b: [u8; 4], t: f32) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t).round() as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t).round() as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t).round() as u8,
        255,
    ]
}

#[inline]
fn ramp_color(t: f32) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    for pair in RAMP.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            return lerp_color(c0, c1, (t - t0) / (t1 - t0));
        }
    }
    RAMP[RAMP.len() - 1].1
}

fn value_range(grid: &Grid<f64>) -> (f64, f64) {
    let min = grid.data.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = grid.data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    (min, (max - min).max(f64::EPSILON))
}

/// Render the terrain color map, stretched over the grid's own min/max.
pub fn render_terrain(height: &Grid<f64>) -> Vec<u8> {
    let w = height.w;
    let h = height.h;
    let mut rgba = vec![0u8; w * h * 4];
    if w == 0 || h == 0 {
        return rgba;
    }
    let (min, range) = value_range(height);

    rgba.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
        for x in 0..w {
            let t = ((height.get(x, y) - min) / range) as f32;
            row[x * 4..x * 4 + 4].copy_from_slice(&ramp_color(t));
        }
    });

    rgba
}

/// Diagnostic: grayscale heightmap.
pub fn render_heightmap(height: &Grid<f64>) -> Vec<u8> {
    let (min, range) = value_range(height);
    let mut rgba = vec![0u8; height.w * height.h * 4];
    for (i, v) in height.data.iter().enumerate() {
        let g = (((v - min) / range) * 255.0).clamp(0.0, 255.0) as u8;
        rgba[i * 4..i * 4 + 4].copy_from_slice(&[g, g, g, 255]);
    }
    rgba
}
