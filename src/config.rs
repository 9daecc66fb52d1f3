// src/config.rs

use std::path::PathBuf;

use chaos_game::SessionConfig;

use crate::rendering_lib::MarkerStyle;

const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

/// Everything the window and renderer need besides the session itself.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub font_path: PathBuf,
    pub vertex_marker: MarkerStyle,
    pub trail_marker: MarkerStyle,
    pub background: wgpu::Color,
    pub session: SessionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Chaos Game!!".to_string(),
            window_width: 1920,
            window_height: 1080,
            font_path: PathBuf::from("fonts/Roboto-Black.ttf"),
            vertex_marker: MarkerStyle { size: 10.0, color: BLUE },
            trail_marker: MarkerStyle { size: 3.0, color: BLUE },
            background: wgpu::Color::BLACK,
            session: SessionConfig::default(),
        }
    }
}
