//! Seeded random source and the vector draws shared by path sampling and drift.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::path::Vertex;

/// The generator every stage draws from, in a fixed order.
pub type DriftRng = ChaCha8Rng;

pub fn seeded(seed: u64) -> DriftRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Unit vector with direction uniform on `[0, 2π)`.
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vertex {
    let theta = rng.random_range(0.0..TAU);
    Vertex::new(theta.cos(), theta.sin())
}

/// Random direction scaled by a length uniform on `[0, max_len]`.
pub fn random_vector<R: Rng + ?Sized>(rng: &mut R, max_len: f64) -> Vertex {
    let dir = random_direction(rng);
    let len = rng.random_range(0.0..=max_len);
    dir * len
}
