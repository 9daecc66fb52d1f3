// src/app.rs

use std::path::PathBuf;
use std::sync::Arc;

use winit::{event::WindowEvent, window::Window};
use chaos_game::{Flow, Session};

use crate::config::AppConfig;
use crate::controller::InputController;
use crate::fonts::load_status_font;
use crate::rendering_lib::shader::WGSL_SHADER_SOURCE;
use crate::rendering_lib::Renderer;
use crate::ui::build_ui;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter found")]
    NoAdapter,
    #[error("surface reports no supported texture formats or alpha modes")]
    UnsupportedSurface,
    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("failed to load font {path:?}: {source}")]
    FontLoad {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Prefers an sRGB format; fails when the surface offers nothing at all.
pub fn pick_surface_format(
    caps: &wgpu::SurfaceCapabilities,
) -> Result<(wgpu::TextureFormat, wgpu::CompositeAlphaMode), AppError> {
    let fallback = caps.formats.first().copied().ok_or(AppError::UnsupportedSurface)?;
    let format = caps.formats.iter().copied().find(|f| f.is_srgb()).unwrap_or(fallback);
    let alpha_mode = caps.alpha_modes.first().copied().ok_or(AppError::UnsupportedSurface)?;
    Ok((format, alpha_mode))
}

pub struct ChaosApp {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    renderer: Renderer,
    background: wgpu::Color,
    session: Session,
    controller: InputController,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl ChaosApp {
    pub async fn new(window: Arc<Window>, app_config: &AppConfig) -> Result<Self, AppError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(AppError::NoAdapter)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let (surface_format, alpha_mode) = pick_surface_format(&surface_caps)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = Renderer::new(
            &device, config.format, WGSL_SHADER_SOURCE,
            app_config.vertex_marker, app_config.trail_marker,
            config.width as f32, config.height as f32,
        );

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(), egui::ViewportId::ROOT, &window,
            Some(window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &device, config.format, None, 1,
        );

        load_status_font(&egui_ctx, &app_config.font_path);

        let session = Session::from_entropy(app_config.session);
        log::info!("Click {} points to place the vertices", session.vertex_count());

        Ok(Self {
            surface, device, queue, config, size,
            renderer, background: app_config.background,
            session, controller: InputController::new(),
            egui_ctx, egui_state, egui_renderer,
        })
    }

    pub fn get_size(&self) -> winit::dpi::PhysicalSize<u32> { self.size }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.session.is_closed()
    }

    /// Runs one frame of point generation.
    pub fn update(&mut self) {
        self.session.tick();
    }

    pub fn render(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError> {
        let output_texture = self.surface.get_current_texture()?;
        let view = output_texture.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Main Command Encoder"),
        });

        self.renderer.render_points(
            &self.device, &self.queue, &mut encoder, &view,
            self.session.vertices(), self.session.trail(), self.session.trail_revision(),
            self.config.width as f32, self.config.height as f32,
            self.background,
        );

        self.render_status(window, &mut encoder, &view);

        self.queue.submit(std::iter::once(encoder.finish()));
        output_texture.present();
        Ok(())
    }

    fn render_status(&mut self, window: &Window, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let status = self.session.status_text();
        let raw_input = self.egui_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| { build_ui(ctx, &status); });
        self.egui_state.handle_platform_output(window, full_output.platform_output);
        let tris = self.egui_ctx.tessellate(full_output.shapes, self.egui_ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: window.scale_factor() as f32,
        };
        self.egui_renderer.update_buffers(&self.device, &self.queue, encoder, &tris, &screen_descriptor);
        {
            let mut gui_render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("GUI Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view, resolve_target: None,
                    ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                })],
                depth_stencil_attachment: None, occlusion_query_set: None, timestamp_writes: None,
            });
            self.egui_renderer.render(&mut gui_render_pass, &tris, &screen_descriptor);
        }
        for tex_id in &full_output.textures_delta.free { self.egui_renderer.free_texture(tex_id); }
    }

    /// Returns true when the event was turned into a session command or
    /// claimed by the overlay.
    pub fn handle_window_event(&mut self, event: &WindowEvent, window: &Window) -> bool {
        let ui_consumed = self.egui_state.on_window_event(window, event).consumed;
        match self.controller.handle_window_event(event, ui_consumed) {
            Some(command) => {
                if self.session.handle(command) == Flow::Exit {
                    log::info!("Session closed");
                }
                true
            }
            None => ui_consumed,
        }
    }
}
