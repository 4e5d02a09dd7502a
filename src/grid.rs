/// Row-major flat grid. `x` is the column, `y` the row.
/// Columns wrap (toroidal E-W), rows do not.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    pub data: Vec<T>,
    pub w: usize,
    pub h: usize,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            data: vec![T::default(); w * h],
            w,
            h,
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.w && y < self.h);
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }
}

impl Grid<f64> {
    /// Mask of non-zero cells.
    pub fn seeded_mask(&self) -> Vec<bool> {
        self.data.iter().map(|&v| v != 0.0).collect()
    }
}

/// Wrap a column index into `[0, w)`.
#[inline]
pub fn wrap_x(x: i64, w: usize) -> usize {
    x.rem_euclid(w as i64) as usize
}

/// Wrap x-coordinate for E-W wrapping. y is not wrapped.
/// Returns None if y is out of bounds.
#[inline]
pub fn wrap_xy(x: i64, y: i64, w: usize, h: usize) -> Option<(usize, usize)> {
    if y < 0 || y >= h as i64 {
        return None;
    }
    Some((wrap_x(x, w), y as usize))
}

/// 4-connected neighbors with E-W wrapping, in up, down, right, left order.
/// Always yields at least the two column neighbors.
pub fn neighbors4_wrap(x: usize, y: usize, w: usize, h: usize) -> impl Iterator<Item = (usize, usize)> {
    let offsets: [(i64, i64); 4] = [(0, -1), (0, 1), (1, 0), (-1, 0)];
    let mut out = [(0usize, 0usize); 4];
    let mut n = 0;
    for (dx, dy) in offsets {
        if let Some(pos) = wrap_xy(x as i64 + dx, y as i64 + dy, w, h) {
            out[n] = pos;
            n += 1;
        }
    }
    out.into_iter().take(n)
}
