// src/error.rs

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChaosError {
    #[error("vertex count {0} is outside 3..=10")]
    InvalidVertexCount(usize),
}
