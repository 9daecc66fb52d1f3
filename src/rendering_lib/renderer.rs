// src/rendering_lib/renderer.rs

use wgpu::util::DeviceExt;

use chaos_game::Point2;

use super::instance::{point_instance_desc, LayerUniform, INSTANCE_STRIDE};

const INITIAL_TRAIL_CAPACITY: usize = 64 * 1024;
const INITIAL_VERTEX_CAPACITY: usize = 16;
const CORNERS_PER_MARKER: u32 = 6;

#[derive(Clone, Copy, Debug)]
pub struct MarkerStyle {
    pub size: f32,
    pub color: [f32; 4],
}

/// One instance buffer plus the uniform describing how its points are drawn.
struct Layer {
    label: &'static str,
    style: MarkerStyle,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    capacity: usize,
    uploaded: usize,
    revision: Option<u64>,
}

impl Layer {
    fn new(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        label: &'static str,
        style: MarkerStyle,
        capacity: usize,
        screen_width: f32,
        screen_height: f32,
    ) -> Self {
        let uniform = LayerUniform::new(screen_width, screen_height, style.size, style.color);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some(label),
        });

        Self {
            label,
            style,
            uniform_buffer,
            bind_group,
            instance_buffer: Self::create_instance_buffer(device, label, capacity),
            capacity,
            uploaded: 0,
            revision: None,
        }
    }

    fn create_instance_buffer(device: &wgpu::Device, label: &str, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity as u64 * INSTANCE_STRIDE,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Returns true when the buffer was replaced and its contents are gone.
    fn reserve(&mut self, device: &wgpu::Device, len: usize) -> bool {
        if len <= self.capacity {
            return false;
        }
        let mut capacity = self.capacity.max(1);
        while capacity < len {
            capacity *= 2;
        }
        log::debug!("Growing {} from {} to {} instances", self.label, self.capacity, capacity);
        self.instance_buffer = Self::create_instance_buffer(device, self.label, capacity);
        self.capacity = capacity;
        true
    }

    fn write_screen(&self, queue: &wgpu::Queue, screen_width: f32, screen_height: f32) {
        let uniform = LayerUniform::new(screen_width, screen_height, self.style.size, self.style.color);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniform));
    }

    fn write_all(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, points: &[Point2]) {
        self.reserve(device, points.len());
        if !points.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(points));
        }
        self.uploaded = points.len();
        self.revision = None;
    }

    /// Uploads only the points appended since the last call, unless the
    /// revision says earlier points were dropped.
    fn write_appended(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, points: &[Point2], revision: u64) {
        let grown = self.reserve(device, points.len());
        let stale = grown || self.revision != Some(revision) || points.len() < self.uploaded;
        let start = if stale { 0 } else { self.uploaded };
        if start < points.len() {
            queue.write_buffer(
                &self.instance_buffer,
                start as u64 * INSTANCE_STRIDE,
                bytemuck::cast_slice(&points[start..]),
            );
        }
        self.uploaded = points.len();
        self.revision = Some(revision);
    }

    fn draw<'pass>(&'pass self, render_pass: &mut wgpu::RenderPass<'pass>) {
        if self.uploaded == 0 {
            return;
        }
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.instance_buffer.slice(..self.uploaded as u64 * INSTANCE_STRIDE));
        render_pass.draw(0..CORNERS_PER_MARKER, 0..self.uploaded as u32);
    }
}

/// Draws polygon vertices and trail points as screen-space squares.
pub struct Renderer {
    render_pipeline: wgpu::RenderPipeline,
    vertex_layer: Layer,
    trail_layer: Layer,
}

impl Renderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        shader_source: &str,
        vertex_style: MarkerStyle,
        trail_style: MarkerStyle,
        initial_screen_width: f32,
        initial_screen_height: f32,
    ) -> Self {
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Renderer Shader Module"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let layer_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("layer_bind_group_layout"),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Renderer Pipeline Layout"),
                bind_group_layouts: &[&layer_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Renderer Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vs_main",
                buffers: &[point_instance_desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let vertex_layer = Layer::new(
            device, &layer_bind_group_layout, "Vertex Markers", vertex_style,
            INITIAL_VERTEX_CAPACITY, initial_screen_width, initial_screen_height,
        );
        let trail_layer = Layer::new(
            device, &layer_bind_group_layout, "Trail Points", trail_style,
            INITIAL_TRAIL_CAPACITY, initial_screen_width, initial_screen_height,
        );

        Self {
            render_pipeline,
            vertex_layer,
            trail_layer,
        }
    }

    /// Uploads this frame's points and records a pass that clears the target
    /// and draws the trail with the vertex markers on top.
    pub fn render_points(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        output_view: &wgpu::TextureView,
        vertices: &[Point2],
        trail: &[Point2],
        trail_revision: u64,
        screen_width: f32,
        screen_height: f32,
        clear_color: wgpu::Color,
    ) {
        self.vertex_layer.write_screen(queue, screen_width, screen_height);
        self.trail_layer.write_screen(queue, screen_width, screen_height);

        self.vertex_layer.write_all(device, queue, vertices);
        self.trail_layer.write_appended(device, queue, trail, trail_revision);

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Points Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                ops: wgpu::Operations { load: wgpu::LoadOp::Clear(clear_color), store: wgpu::StoreOp::Store },
            })],
            depth_stencil_attachment: None, occlusion_query_set: None, timestamp_writes: None,
        });

        render_pass.set_pipeline(&self.render_pipeline);
        self.trail_layer.draw(&mut render_pass);
        self.vertex_layer.draw(&mut render_pass);
    }
}
