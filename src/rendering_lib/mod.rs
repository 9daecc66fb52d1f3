// src/rendering_lib/mod.rs

pub mod instance;
pub mod renderer;
pub mod shader;

pub use renderer::{MarkerStyle, Renderer};
