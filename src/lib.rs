// src/lib.rs

pub mod error;
pub mod generator;
pub mod geometry;
pub mod session;
pub mod trail;

pub use error::ChaosError;
pub use generator::{next_point, ratio_for_vertices, select_vertex_index, ChaosGenerator};
pub use geometry::Point2;
pub use session::{Command, Flow, Session, SessionConfig, SessionState, VertexCount};
pub use trail::Trail;
