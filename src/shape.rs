//! Cosmetic shaping applied to the finished drift field before display.

use crate::grid::Grid;

/// Population mean and standard deviation.
pub fn mean_std(grid: &Grid<f64>) -> (f64, f64) {
    let n = grid.data.len().max(1) as f64;
    let mean = grid.data.iter().sum::<f64>() / n;
    let var = grid.data.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    (mean, var.sqrt())
}

/// Rescale to zero mean and `target_std` deviation, then shift by `offset`.
/// A flat grid only gets centered and shifted.
pub fn normalize(grid: &mut Grid<f64>, target_std: f64, offset: f64) {
    let (mean, std) = mean_std(grid);
    let scale = if std > 0.0 { target_std / std } else { 0.0 };
    for v in grid.data.iter_mut() {
        *v = (*v - mean) * scale + offset;
    }
}

/// Pin the first cell to `+marker` and the last to `-marker` so every
/// rendering shares one fixed color range.
pub fn mark_corners(grid: &mut Grid<f64>, marker: f64) {
    if let Some(first) = grid.data.first_mut() {
        *first = marker;
    }
    if let Some(last) = grid.data.last_mut() {
        *last = -marker;
    }
}

/// Copy with every negative cell replaced by `floor`.
pub fn flood_below_sea(grid: &Grid<f64>, floor: f64) -> Grid<f64> {
    let mut land = grid.clone();
    for v in land.data.iter_mut() {
        if *v < 0.0 {
            *v = floor;
        }
    }
    land
}
