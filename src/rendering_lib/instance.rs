// src/rendering_lib/instance.rs

use bytemuck::{Pod, Zeroable};
use chaos_game::Point2;

/// Per-draw parameters shared by every marker of one layer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LayerUniform {
    pub screen: [f32; 2],
    pub marker_size: f32,
    pub _padding: f32,
    pub color: [f32; 4],
}

impl LayerUniform {
    pub fn new(screen_width: f32, screen_height: f32, marker_size: f32, color: [f32; 4]) -> Self {
        Self {
            screen: [screen_width, screen_height],
            marker_size,
            _padding: 0.0,
            color,
        }
    }
}

pub const INSTANCE_STRIDE: wgpu::BufferAddress = std::mem::size_of::<Point2>() as wgpu::BufferAddress;

/// Points are uploaded as-is, one instance per marker.
pub fn point_instance_desc<'a>() -> wgpu::VertexBufferLayout<'a> {
    wgpu::VertexBufferLayout {
        array_stride: INSTANCE_STRIDE,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x2,
        }],
    }
}
