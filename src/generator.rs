// src/generator.rs

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry::Point2;

pub const MIN_VERTICES: usize = 3;
pub const MAX_VERTICES: usize = 10;

const DEFAULT_RATIO: f32 = 0.5;

/// Contraction ratio for a regular polygon with `vertex_count` corners.
///
/// Larger polygons need a ratio closer to 1 or the attractor collapses into
/// overlapping blobs. Counts outside `3..=10` get the triangle ratio.
pub fn ratio_for_vertices(vertex_count: usize) -> f32 {
    match vertex_count {
        3 | 4 => 0.5,
        5 => 0.618034, // 1 / golden ratio
        6 => 2.0 / 3.0,
        7 => 0.692,
        8 => 0.707,
        9 => 0.742,
        10 => 0.764,
        _ => DEFAULT_RATIO,
    }
}

/// Picks a vertex index in `0..vertex_count`.
///
/// From four vertices up, the previous pick is never repeated. Triangles allow
/// repeats, which is what produces the Sierpinski triangle.
pub fn select_vertex_index<R: Rng + ?Sized>(
    rng: &mut R,
    vertex_count: usize,
    last_index: Option<usize>,
) -> usize {
    let mut index = rng.gen_range(0..vertex_count);
    if vertex_count >= 4 {
        if let Some(last) = last_index {
            while index == last {
                index = rng.gen_range(0..vertex_count);
            }
        }
    }
    index
}

/// Jumps `ratio` of the way from `current` towards `vertex`.
pub fn next_point(current: &Point2, vertex: &Point2, ratio: f32) -> Point2 {
    current.lerp(vertex, ratio)
}

/// Owns the random source and remembers the last vertex it jumped towards.
pub struct ChaosGenerator<R: Rng> {
    rng: R,
    last_index: Option<usize>,
}

impl ChaosGenerator<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> ChaosGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, last_index: None }
    }

    pub fn last_index(&self) -> Option<usize> {
        self.last_index
    }

    pub fn reset(&mut self) {
        self.last_index = None;
    }

    /// Selects the next vertex and returns the point one jump from `current`.
    pub fn step(&mut self, vertices: &[Point2], current: &Point2, ratio: f32) -> Point2 {
        let index = select_vertex_index(&mut self.rng, vertices.len(), self.last_index);
        self.last_index = Some(index);
        next_point(current, &vertices[index], ratio)
    }
}
