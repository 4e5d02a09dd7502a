use rayon::prelude::*;

use crate::grid::{Grid, neighbors4_wrap};

/// Fixed sweep count for a `height x width` grid: `ceil((h + w) / 5)`.
pub fn sweep_count(height: usize, width: usize) -> usize {
    (height + width).div_ceil(5)
}

/// Relax a sparsely seeded potential grid into a smooth field.
///
/// Non-zero cells are held fixed. Every other cell becomes the mean of its
/// 4-neighbors from the previous sweep (rows clamp, columns wrap). Runs
/// `sweep_count` synchronous sweeps with no convergence check.
pub fn solve_potential(potential: &Grid<f64>) -> Grid<f64> {
    solve_sweeps(potential, sweep_count(potential.h, potential.w))
}

/// Same as `solve_potential` with an explicit sweep count. The seeded mask
/// is taken from `potential` as given.
pub fn solve_sweeps(potential: &Grid<f64>, sweeps: usize) -> Grid<f64> {
    solve_masked(potential, &potential.seeded_mask(), sweeps)
}

/// Relax with an explicit mask of fixed cells, e.g. to keep iterating an
/// already solved field against its original seeds.
pub fn solve_masked(potential: &Grid<f64>, seeded: &[bool], sweeps: usize) -> Grid<f64> {
    let w = potential.w;
    let h = potential.h;
    assert_eq!(seeded.len(), potential.data.len(), "mask size mismatch");
    if w == 0 || h == 0 {
        return potential.clone();
    }

    let mut src = potential.clone();
    let mut dst = potential.clone();

    for _ in 0..sweeps {
        dst.data.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                let i = y * w + x;
                if seeded[i] {
                    *out = src.data[i];
                    continue;
                }
                let mut sum = 0.0;
                let mut n = 0usize;
                for (nx, ny) in neighbors4_wrap(x, y, w, h) {
                    sum += src.data[ny * w + nx];
                    n += 1;
                }
                *out = sum / n as f64;
            }
        });
        std::mem::swap(&mut src, &mut dst);
    }

    src
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_count_rounds_up() {
        assert_eq!(sweep_count(10, 10), 4);
        assert_eq!(sweep_count(3, 3), 2);
        assert_eq!(sweep_count(1, 1), 1);
        assert_eq!(sweep_count(100, 150), 50);
    }

    #[test]
    fn unseeded_grid_stays_zero() {
        let g = Grid::<f64>::new(6, 4);
        assert_eq!(solve_potential(&g), g);
    }

    #[test]
    fn single_sweep_is_synchronous() {
        // Seed at the left end of a 1x4 ring. One synchronous sweep only
        // reaches the two wrapped neighbors; an in-place sweep would also
        // feed the updated value further along the row.
        let mut g = Grid::<f64>::new(4, 1);
        g.set(0, 0, 4.0);
        let s = solve_sweeps(&g, 1);
        assert_eq!(s.data, vec![4.0, 2.0, 0.0, 2.0]);
    }

    #[test]
    fn edge_rows_average_fewer_neighbors() {
        // 3 rows, 3 columns, seed in the middle row.
        let mut g = Grid::<f64>::new(3, 3);
        g.set(1, 1, 3.0);
        let s = solve_sweeps(&g, 1);
        // Top row cell above the seed: neighbors down(3), right(0), left(0).
        assert_eq!(s.get(1, 0), 1.0);
        // Middle row left of the seed: up 0, down 0, right 3, left 0.
        assert_eq!(s.get(0, 1), 0.75);
        assert_eq!(s.get(1, 1), 3.0);
    }

    #[test]
    fn seeds_preserved_exactly() {
        let mut g = Grid::<f64>::new(9, 7);
        g.set(2, 3, 1.25);
        g.set(8, 0, -0.7);
        g.set(0, 6, 1e-9);
        let s = solve_potential(&g);
        assert_eq!(s.get(2, 3), 1.25);
        assert_eq!(s.get(8, 0), -0.7);
        assert_eq!(s.get(0, 6), 1e-9);
    }

    #[test]
    fn converged_field_is_a_fixed_point() {
        let mut g = Grid::<f64>::new(6, 5);
        g.set(1, 1, 1.0);
        g.set(4, 3, -2.0);
        let mask = g.seeded_mask();
        let solved = solve_masked(&g, &mask, 3000);
        let again = solve_masked(&solved, &mask, sweep_count(5, 6));
        for (a, b) in solved.data.iter().zip(&again.data) {
            assert!((a - b).abs() < 1e-9);
        }
    }
}
