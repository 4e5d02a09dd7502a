use std::ops::{Add, AddAssign, Mul, Sub};

use rand::Rng;

use crate::rng::random_vector;

/// Real-valued grid position. Not snapped to cells until rasterization.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub row: f64,
    pub col: f64,
}

impl Vertex {
    pub const fn new(row: f64, col: f64) -> Self {
        Self { row, col }
    }

    pub fn length(self) -> f64 {
        self.row.hypot(self.col)
    }
}

impl Add for Vertex {
    type Output = Vertex;
    fn add(self, o: Vertex) -> Vertex {
        Vertex::new(self.row + o.row, self.col + o.col)
    }
}

impl AddAssign for Vertex {
    fn add_assign(&mut self, o: Vertex) {
        self.row += o.row;
        self.col += o.col;
    }
}

impl Sub for Vertex {
    type Output = Vertex;
    fn sub(self, o: Vertex) -> Vertex {
        Vertex::new(self.row - o.row, self.col - o.col)
    }
}

impl Mul<f64> for Vertex {
    type Output = Vertex;
    fn mul(self, s: f64) -> Vertex {
        Vertex::new(self.row * s, self.col * s)
    }
}

/// Drift path: a vertex chain whose length is fixed once sampled.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub vertices: Vec<Vertex>,
}

impl Path {
    pub fn segments(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }
}

/// Random walk with momentum over a `height x width` grid.
///
/// Starts at a random cell, then for each segment nudges the running
/// displacement by up to half of `max_segment_length` and steps by it.
/// Rows are clamped into `[0, height - 1]` and the clamped step feeds back
/// into the displacement. Columns run free; they wrap at rasterization.
/// Returns `num_segments + 1` vertices.
pub fn sample_path<R: Rng + ?Sized>(
    rng: &mut R,
    height: usize,
    width: usize,
    num_segments: usize,
    max_segment_length: f64,
) -> Path {
    let start = Vertex::new(
        rng.random_range(0..height) as f64,
        rng.random_range(0..width) as f64,
    );
    let mut vertices = Vec::with_capacity(num_segments + 1);
    vertices.push(start);

    let max_row = (height - 1) as f64;
    let mut displacement = random_vector(rng, max_segment_length);
    let mut last = start;
    for _ in 0..num_segments {
        displacement += random_vector(rng, max_segment_length * 0.5);
        let mut next = last + displacement;
        if next.row <= 0.0 {
            next.row = 0.0;
        } else if next.row >= max_row {
            next.row = max_row;
        }
        vertices.push(next);
        displacement = next - last;
        last = next;
    }

    Path { vertices }
}
