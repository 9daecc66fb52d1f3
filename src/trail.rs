// src/trail.rs

use crate::geometry::Point2;

pub const DEFAULT_TRAIL_CAP: usize = 2_000_000;
pub const DEFAULT_TRAIL_TRIM: usize = 100_000;

/// The generated points, oldest first. Never empty: it starts from the seed
/// and trimming always keeps the newest point.
#[derive(Clone, Debug)]
pub struct Trail {
    points: Vec<Point2>,
    cap: usize,
    trim: usize,
    epoch: u64,
}

impl Trail {
    pub fn with_seed(seed: Point2, cap: usize, trim: usize) -> Self {
        let cap = cap.max(1);
        let mut points = Vec::with_capacity(cap.min(DEFAULT_TRAIL_TRIM) + 1);
        points.push(seed);
        Self {
            points,
            cap,
            trim: trim.clamp(1, cap),
            epoch: 0,
        }
    }

    pub fn push(&mut self, point: Point2) {
        self.points.push(point);
    }

    pub fn tail(&self) -> Point2 {
        self.points[self.points.len() - 1]
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bumped every time points are dropped from the front, so consumers
    /// holding an offset into `points()` know it is stale.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Drops the oldest `trim` points for as long as the trail is over its
    /// cap. Returns how many points were removed.
    pub fn enforce_cap(&mut self) -> usize {
        let mut removed = 0;
        while self.points.len() > self.cap {
            let count = self.trim.min(self.points.len() - 1);
            self.points.drain(..count);
            removed += count;
        }
        if removed > 0 {
            self.epoch += 1;
            log::debug!("Trail trimmed by {} points, {} remain", removed, self.points.len());
        }
        removed
    }
}
