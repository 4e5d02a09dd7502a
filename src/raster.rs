use std::f64::consts::PI;

use rand::Rng;

use crate::grid::{Grid, wrap_x};
use crate::path::{Path, Vertex};

/// Unsigned half-sine bump, one value per segment, peaking mid-path.
/// A single-vertex path gets `[1.0]`.
pub fn half_sine_profile(vertex_count: usize) -> Vec<f64> {
    if vertex_count <= 1 {
        return vec![1.0];
    }
    let segments = vertex_count - 1;
    (0..segments)
        .map(|i| (PI * (i as f64 + 0.5) / segments as f64).sin())
        .collect()
}

/// Profile with one coin-flip sign for the whole path and an independent
/// `U[0, 2)` scale per segment.
pub fn signed_profile<R: Rng + ?Sized>(rng: &mut R, vertex_count: usize) -> Vec<f64> {
    let mut power = half_sine_profile(vertex_count);
    let invert = rng.random_bool(0.5);
    for p in power.iter_mut() {
        if invert {
            *p = -*p;
        }
        *p *= rng.random_range(0.0..2.0);
    }
    power
}

/// Stamp `value` at the cell under `p`. Rows are truncated, columns wrap.
#[inline]
fn stamp(potential: &mut Grid<f64>, p: Vertex, value: f64) {
    let y = p.row.floor() as i64;
    let in_rows = (0..potential.h as i64).contains(&y);
    debug_assert!(in_rows, "row {} outside grid of height {}", p.row, potential.h);
    if !in_rows {
        return;
    }
    let x = wrap_x(p.col.floor() as i64, potential.w);
    potential.set(x, y as usize, value);
}

/// Draw one path onto `potential`, overwriting whatever is already there.
///
/// Each segment is sampled at `ceil(max(|drow|, |dcol|)) + 1` evenly spaced
/// points so no cell along it is skipped.
pub fn draw_path<R: Rng + ?Sized>(rng: &mut R, path: &Path, potential: &mut Grid<f64>) {
    let power = signed_profile(rng, path.vertices.len());

    if let [only] = path.vertices.as_slice() {
        stamp(potential, *only, power[0]);
        return;
    }

    for (i, seg) in path.vertices.windows(2).enumerate() {
        let (begin, end) = (seg[0], seg[1]);
        let delta = end - begin;
        let num_points = delta.row.abs().max(delta.col.abs()).ceil() as usize;
        if num_points == 0 {
            stamp(potential, begin, power[i]);
            continue;
        }
        for j in 0..=num_points {
            let t = j as f64 / num_points as f64;
            stamp(potential, begin + delta * t, power[i]);
        }
    }
}

/// Fresh zero grid with every path drawn in order; later paths win overlaps.
pub fn rasterize_paths<R: Rng + ?Sized>(
    rng: &mut R,
    paths: &[Path],
    height: usize,
    width: usize,
) -> Grid<f64> {
    let mut potential = Grid::new(width, height);
    for path in paths {
        draw_path(rng, path, &mut potential);
    }
    potential
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    fn nonzero(g: &Grid<f64>) -> Vec<(usize, f64)> {
        g.data
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(|(i, v)| (i, *v))
            .collect()
    }

    #[test]
    fn profile_peaks_in_middle() {
        let p = half_sine_profile(5);
        assert_eq!(p.len(), 4);
        assert!((p[0] - p[3]).abs() < 1e-12);
        assert!(p[1] > p[0]);
        assert!(p.iter().all(|v| *v > 0.0 && *v <= 1.0));
        assert_eq!(half_sine_profile(1), vec![1.0]);
    }

    #[test]
    fn signed_profile_shares_one_sign() {
        let mut rng = seeded(5);
        for _ in 0..20 {
            let p = signed_profile(&mut rng, 9);
            let pos = p.iter().filter(|v| **v > 0.0).count();
            let neg = p.iter().filter(|v| **v < 0.0).count();
            assert!(pos == 0 || neg == 0);
            assert!(p.iter().all(|v| v.abs() < 2.0));
        }
    }

    #[test]
    fn single_vertex_stamps_one_cell() {
        let mut rng = seeded(6);
        let path = Path { vertices: vec![Vertex::new(2.4, 3.9)] };
        let g = rasterize_paths(&mut rng, &[path], 5, 5);

        // Same draws as the rasterizer: coin flip, then one U[0, 2) scale.
        let mut check = seeded(6);
        let invert = check.random_bool(0.5);
        let scale: f64 = check.random_range(0.0..2.0);

        let cells = nonzero(&g);
        assert_eq!(cells.len(), 1);
        let (i, v) = cells[0];
        assert_eq!(i, 2 * 5 + 3);
        assert_eq!(v < 0.0, invert);
        assert!((v.abs() / scale - 1.0).abs() < 1e-12);
    }

    #[test]
    fn column_wraps_past_right_edge() {
        let mut rng = seeded(8);
        let path = Path {
            vertices: vec![Vertex::new(1.0, 3.0), Vertex::new(1.0, 6.5)],
        };
        let g = rasterize_paths(&mut rng, &[path], 3, 5);
        let v = g.get(3, 1);
        // Columns 3, 4, 5 -> 0, 6 -> 1 all carry the same segment value.
        for x in [4, 0, 1] {
            assert_eq!(g.get(x, 1), v);
        }
        assert_eq!(g.get(2, 1), 0.0);
        assert!(g.get(0, 0) == 0.0 && g.get(0, 2) == 0.0);
    }

    #[test]
    fn negative_column_wraps() {
        let mut rng = seeded(9);
        let path = Path {
            vertices: vec![Vertex::new(0.0, -0.5), Vertex::new(0.0, -0.5)],
        };
        let g = rasterize_paths(&mut rng, &[path], 1, 4);
        assert_eq!(g.get(0, 0), 0.0);
        assert_eq!(g.get(1, 0), 0.0);
        assert_eq!(g.get(2, 0), 0.0);
        // Only cell 3 can be non-zero.
        assert_eq!(nonzero(&g).iter().filter(|(i, _)| *i != 3).count(), 0);
    }

    #[test]
    fn later_segment_overwrites_shared_vertex() {
        let mut rng = seeded(10);
        let path = Path {
            vertices: vec![
                Vertex::new(0.0, 0.0),
                Vertex::new(0.0, 2.0),
                Vertex::new(2.0, 2.0),
            ],
        };
        let mut check = seeded(10);
        let power = signed_profile(&mut check, 3);
        let g = rasterize_paths(&mut rng, &[path], 3, 3);
        assert_eq!(g.get(0, 0), power[0]);
        assert_eq!(g.get(2, 0), power[1]);
        assert_eq!(g.get(2, 2), power[1]);
    }
}
