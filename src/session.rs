// src/session.rs

use rand::rngs::StdRng;
use rand::Rng;

use crate::error::ChaosError;
use crate::generator::{ratio_for_vertices, ChaosGenerator, MAX_VERTICES, MIN_VERTICES};
use crate::geometry::Point2;
use crate::trail::{Trail, DEFAULT_TRAIL_CAP, DEFAULT_TRAIL_TRIM};

pub const DEFAULT_BATCH_SIZE: usize = 200;

const CONTROL_HINTS: &str = "Keys 3-9 / 0: vertex count (0 = 10)   R: reset   Esc: quit";

/// Number of polygon corners, always within `3..=10`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexCount(usize);

impl VertexCount {
    pub fn new(count: usize) -> Result<Self, ChaosError> {
        if (MIN_VERTICES..=MAX_VERTICES).contains(&count) {
            Ok(Self(count))
        } else {
            Err(ChaosError::InvalidVertexCount(count))
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for VertexCount {
    fn default() -> Self {
        Self(MIN_VERTICES)
    }
}

impl TryFrom<usize> for VertexCount {
    type Error = ChaosError;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    pub vertex_count: VertexCount,
    /// Generation steps per frame. Anything from 1 up gives the same picture.
    pub batch_size: usize,
    pub trail_cap: usize,
    pub trail_trim: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            trail_cap: DEFAULT_TRAIL_CAP,
            trail_trim: DEFAULT_TRAIL_TRIM,
        }
    }
}

/// Input the session reacts to, already translated from raw window events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Click(Point2),
    /// Counts outside `3..=10` are logged and ignored; the session keeps its
    /// current vertices and ratio.
    SetVertexCount(usize),
    Reset,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Clone, Debug)]
pub enum SessionState {
    /// Waiting for vertex clicks, then for the seed click once all are placed.
    CollectingVertices { vertices: Vec<Point2> },
    Running { vertices: Vec<Point2>, trail: Trail },
}

impl SessionState {
    fn collecting() -> Self {
        SessionState::CollectingVertices { vertices: Vec::new() }
    }
}

pub struct Session<R: Rng = StdRng> {
    config: SessionConfig,
    vertex_count: VertexCount,
    ratio: f32,
    state: SessionState,
    generator: ChaosGenerator<R>,
    // Trail revisions consumed by earlier trails, see `trail_revision`.
    revision_base: u64,
    closed: bool,
}

impl Session<StdRng> {
    pub fn from_entropy(config: SessionConfig) -> Self {
        Self::new(config, ChaosGenerator::from_entropy())
    }

    pub fn seeded(config: SessionConfig, seed: u64) -> Self {
        Self::new(config, ChaosGenerator::seeded(seed))
    }
}

impl<R: Rng> Session<R> {
    pub fn new(mut config: SessionConfig, generator: ChaosGenerator<R>) -> Self {
        config.batch_size = config.batch_size.max(1);
        Self {
            vertex_count: config.vertex_count,
            ratio: ratio_for_vertices(config.vertex_count.get()),
            config,
            state: SessionState::collecting(),
            generator,
            revision_base: 0,
            closed: false,
        }
    }

    pub fn handle(&mut self, command: Command) -> Flow {
        if self.closed {
            return Flow::Exit;
        }
        match command {
            Command::Click(at) => self.click(at),
            Command::SetVertexCount(count) => self.set_vertex_count(count),
            Command::Reset => {
                log::info!("Reset, collecting {} vertices", self.vertex_count.get());
                self.clear();
            }
            Command::Quit => {
                log::info!("Quit requested");
                self.closed = true;
                return Flow::Exit;
            }
        }
        Flow::Continue
    }

    fn click(&mut self, at: Point2) {
        let wanted = self.vertex_count.get();
        match &mut self.state {
            SessionState::CollectingVertices { vertices } if vertices.len() < wanted => {
                vertices.push(at);
                log::debug!("Vertex {}/{} at ({}, {})", vertices.len(), wanted, at.x, at.y);
                if vertices.len() == wanted {
                    log::info!("All {} vertices placed, waiting for the seed point", wanted);
                }
            }
            SessionState::CollectingVertices { vertices } => {
                let vertices = std::mem::take(vertices);
                let trail = Trail::with_seed(at, self.config.trail_cap, self.config.trail_trim);
                log::info!(
                    "Seed at ({}, {}), running with {} vertices and ratio {:.3}",
                    at.x, at.y, wanted, self.ratio
                );
                self.state = SessionState::Running { vertices, trail };
            }
            SessionState::Running { .. } => {}
        }
    }

    fn set_vertex_count(&mut self, count: usize) {
        match VertexCount::new(count) {
            Ok(vertex_count) => {
                self.vertex_count = vertex_count;
                self.ratio = ratio_for_vertices(count);
                log::info!("Vertex count set to {} (ratio {:.3})", count, self.ratio);
                self.clear();
            }
            Err(e) => log::warn!("Ignoring vertex count change: {}", e),
        }
    }

    fn clear(&mut self) {
        if let SessionState::Running { trail, .. } = &self.state {
            self.revision_base += trail.epoch() + 1;
        }
        self.state = SessionState::collecting();
        self.generator.reset();
    }

    /// Runs one frame's worth of generation. Returns the number of new points.
    pub fn tick(&mut self) -> usize {
        if self.closed {
            return 0;
        }
        let SessionState::Running { vertices, trail } = &mut self.state else {
            return 0;
        };
        for _ in 0..self.config.batch_size {
            let next = self.generator.step(vertices, &trail.tail(), self.ratio);
            trail.push(next);
        }
        trail.enforce_cap();
        self.config.batch_size
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn vertices(&self) -> &[Point2] {
        match &self.state {
            SessionState::CollectingVertices { vertices } => vertices,
            SessionState::Running { vertices, .. } => vertices,
        }
    }

    pub fn trail(&self) -> &[Point2] {
        match &self.state {
            SessionState::CollectingVertices { .. } => &[],
            SessionState::Running { trail, .. } => trail.points(),
        }
    }

    /// Changes whenever points leave the trail (trim, reset, vertex count
    /// change). While it stays the same, the trail only ever grows at the end.
    pub fn trail_revision(&self) -> u64 {
        match &self.state {
            SessionState::CollectingVertices { .. } => self.revision_base,
            SessionState::Running { trail, .. } => self.revision_base + trail.epoch(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count.get()
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, SessionState::Running { .. })
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn status_text(&self) -> String {
        let wanted = self.vertex_count.get();
        let mode = match &self.state {
            _ if self.closed => "Closed".to_string(),
            SessionState::CollectingVertices { vertices } if vertices.len() < wanted => format!(
                "Click to place vertex {} of {}",
                vertices.len() + 1,
                wanted
            ),
            SessionState::CollectingVertices { .. } => {
                format!("All {} vertices placed, click to place the seed point", wanted)
            }
            SessionState::Running { trail, .. } => format!(
                "Running: {} vertices, ratio {:.3}, {} points",
                wanted,
                self.ratio,
                trail.len()
            ),
        };
        format!("{}\n{}", mode, CONTROL_HINTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;

    fn click(session: &mut Session<impl Rng>, x: f32, y: f32) {
        assert_eq!(session.handle(Command::Click(Point2::new(x, y))), Flow::Continue);
    }

    fn triangle_session() -> Session<StdRng> {
        let mut session = Session::seeded(SessionConfig::default(), 42);
        click(&mut session, 0.0, 0.0);
        click(&mut session, 100.0, 0.0);
        click(&mut session, 50.0, 100.0);
        session
    }

    #[test]
    fn vertex_count_bounds() {
        assert!(VertexCount::new(2).is_err());
        assert_eq!(VertexCount::new(3).map(VertexCount::get), Ok(3));
        assert_eq!(VertexCount::try_from(10).map(VertexCount::get), Ok(10));
        assert_eq!(VertexCount::new(11), Err(ChaosError::InvalidVertexCount(11)));
    }

    #[test]
    fn starts_collecting_with_nothing() {
        let session = Session::seeded(SessionConfig::default(), 0);
        assert!(!session.is_running());
        assert!(session.vertices().is_empty());
        assert!(session.trail().is_empty());
        assert_eq!(session.vertex_count(), 3);
        assert_eq!(session.ratio(), 0.5);
    }

    #[test]
    fn triangle_then_seed_starts_running() {
        let mut session = triangle_session();
        assert_eq!(
            session.vertices(),
            &[Point2::new(0.0, 0.0), Point2::new(100.0, 0.0), Point2::new(50.0, 100.0)]
        );
        assert!(!session.is_running());
        assert!(session.trail().is_empty());

        click(&mut session, 10.0, 10.0);
        assert!(session.is_running());
        assert_eq!(session.trail(), &[Point2::new(10.0, 10.0)]);
        assert_eq!(session.vertices().len(), 3);
    }

    #[test]
    fn first_step_towards_vertex_zero() {
        let config = SessionConfig { batch_size: 1, ..Default::default() };
        // StepRng(0, 0) always picks vertex 0.
        let mut session = Session::new(config, ChaosGenerator::new(StepRng::new(0, 0)));
        click(&mut session, 0.0, 0.0);
        click(&mut session, 100.0, 0.0);
        click(&mut session, 50.0, 100.0);
        click(&mut session, 10.0, 10.0);

        assert_eq!(session.tick(), 1);
        assert_eq!(session.trail(), &[Point2::new(10.0, 10.0), Point2::new(5.0, 5.0)]);
    }

    #[test]
    fn clicks_while_running_are_ignored() {
        let mut session = triangle_session();
        click(&mut session, 10.0, 10.0);
        session.tick();
        let vertices = session.vertices().to_vec();
        let trail_len = session.trail().len();

        click(&mut session, 300.0, 300.0);
        assert_eq!(session.vertices(), vertices.as_slice());
        assert_eq!(session.trail().len(), trail_len);
    }

    #[test]
    fn tick_runs_one_batch_per_frame() {
        let mut session = triangle_session();
        assert_eq!(session.tick(), 0);
        click(&mut session, 10.0, 10.0);
        assert_eq!(session.tick(), DEFAULT_BATCH_SIZE);
        assert_eq!(session.trail().len(), 1 + DEFAULT_BATCH_SIZE);
        session.tick();
        assert_eq!(session.trail().len(), 1 + 2 * DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn generated_points_stay_inside_polygon_bounds() {
        let mut session = triangle_session();
        click(&mut session, 10.0, 10.0);
        for _ in 0..20 {
            session.tick();
        }
        for p in &session.trail()[1..] {
            assert!((0.0..=100.0).contains(&p.x), "{:?}", p);
            assert!((0.0..=100.0).contains(&p.y), "{:?}", p);
        }
    }

    #[test]
    fn changing_vertex_count_while_running_clears_everything() {
        let mut session = triangle_session();
        click(&mut session, 10.0, 10.0);
        session.tick();

        assert_eq!(session.handle(Command::SetVertexCount(5)), Flow::Continue);
        assert!(!session.is_running());
        assert!(session.vertices().is_empty());
        assert!(session.trail().is_empty());
        assert_eq!(session.vertex_count(), 5);
        assert!((session.ratio() - 0.618).abs() < 1e-3);
    }

    #[test]
    fn every_vertex_count_uses_its_ratio() {
        let mut session = triangle_session();
        for n in MIN_VERTICES..=MAX_VERTICES {
            session.handle(Command::SetVertexCount(n));
            assert_eq!(session.vertex_count(), n);
            assert_eq!(session.ratio(), ratio_for_vertices(n), "n = {}", n);
            assert!(session.vertices().is_empty());
        }
    }

    #[test]
    fn out_of_range_vertex_count_is_ignored() {
        let mut session = triangle_session();
        session.handle(Command::SetVertexCount(11));
        session.handle(Command::SetVertexCount(2));
        assert_eq!(session.vertex_count(), 3);
        assert_eq!(session.vertices().len(), 3);
    }

    #[test]
    fn reset_mid_collection_restarts_from_zero() {
        let mut session = Session::seeded(SessionConfig::default(), 3);
        click(&mut session, 1.0, 1.0);
        click(&mut session, 2.0, 2.0);

        assert_eq!(session.handle(Command::Reset), Flow::Continue);
        assert!(!session.is_running());
        assert!(session.vertices().is_empty());
        assert!(session.trail().is_empty());
        assert_eq!(session.vertex_count(), 3);

        click(&mut session, 7.0, 7.0);
        assert_eq!(session.vertices(), &[Point2::new(7.0, 7.0)]);
    }

    #[test]
    fn reset_forgets_last_vertex() {
        let config = SessionConfig { vertex_count: VertexCount(4), ..Default::default() };
        let mut session = Session::seeded(config, 9);
        for (x, y) in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0), (50.0, 50.0)] {
            click(&mut session, x, y);
        }
        session.tick();
        assert!(session.generator.last_index().is_some());
        session.handle(Command::Reset);
        assert_eq!(session.generator.last_index(), None);
    }

    #[test]
    fn trail_is_empty_whenever_collecting() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut session = Session::seeded(SessionConfig::default(), 5);
        for _ in 0..2_000 {
            let command = match rng.gen_range(0..10) {
                0 => Command::Reset,
                1 => Command::SetVertexCount(rng.gen_range(0..13)),
                _ => Command::Click(Point2::new(rng.gen_range(0.0..500.0), rng.gen_range(0.0..500.0))),
            };
            session.handle(command);
            if rng.gen_bool(0.3) {
                session.tick();
            }
            match session.state() {
                SessionState::CollectingVertices { vertices } => {
                    assert!(session.trail().is_empty());
                    assert!(vertices.len() <= session.vertex_count());
                }
                SessionState::Running { vertices, trail } => {
                    assert_eq!(vertices.len(), session.vertex_count());
                    assert!(!trail.is_empty());
                }
            }
        }
    }

    #[test]
    fn no_consecutive_repeats_for_pentagon() {
        let config = SessionConfig {
            vertex_count: VertexCount(5),
            batch_size: 1,
            ..Default::default()
        };
        let mut session = Session::seeded(config, 77);
        for i in 0..6 {
            click(&mut session, i as f32 * 20.0, (i % 2) as f32 * 40.0);
        }
        let mut last = None;
        for _ in 0..1_000 {
            session.tick();
            let current = session.generator.last_index();
            assert_ne!(current, last);
            last = current;
        }
    }

    #[test]
    fn trail_cap_trims_exactly_once_at_boundary() {
        let mut session = triangle_session();
        click(&mut session, 10.0, 10.0);
        // 1 seed + 10_000 batches of 200 = 2_000_001 points before capping.
        for _ in 0..9_999 {
            session.tick();
        }
        assert_eq!(session.trail().len(), 1_999_801);
        let revision = session.trail_revision();

        session.tick();
        assert_eq!(session.trail().len(), 1_900_001);
        assert_ne!(session.trail_revision(), revision);
    }

    #[test]
    fn revision_changes_on_clear() {
        let mut session = triangle_session();
        let initial = session.trail_revision();
        click(&mut session, 10.0, 10.0);
        session.tick();
        assert_eq!(session.trail_revision(), initial);

        session.handle(Command::Reset);
        let after_reset = session.trail_revision();
        assert!(after_reset > initial);

        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.5, 0.5)] {
            click(&mut session, x, y);
        }
        assert_eq!(session.trail_revision(), after_reset);
    }

    #[test]
    fn quit_closes_session() {
        let mut session = triangle_session();
        click(&mut session, 10.0, 10.0);
        assert_eq!(session.handle(Command::Quit), Flow::Exit);
        assert!(session.is_closed());
        assert_eq!(session.tick(), 0);
        assert_eq!(session.handle(Command::Reset), Flow::Exit);
        assert!(session.is_running());
    }

    #[test]
    fn status_text_follows_mode() {
        let mut session = Session::seeded(SessionConfig::default(), 1);
        assert!(session.status_text().starts_with("Click to place vertex 1 of 3"));
        click(&mut session, 0.0, 0.0);
        assert!(session.status_text().starts_with("Click to place vertex 2 of 3"));
        click(&mut session, 100.0, 0.0);
        click(&mut session, 50.0, 100.0);
        assert!(session.status_text().contains("seed point"));
        click(&mut session, 10.0, 10.0);
        session.tick();
        let status = session.status_text();
        assert!(status.starts_with("Running: 3 vertices, ratio 0.500, 201 points"), "{}", status);
        assert!(status.contains("R: reset"));
    }
}
