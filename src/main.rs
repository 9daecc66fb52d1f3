// src/main.rs

pub mod app;
pub mod config;
pub mod controller;
pub mod fonts;
pub mod rendering_lib;
pub mod ui;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoopWindowTarget, EventLoop},
    window::WindowBuilder,
};
use app::{AppError, ChaosApp};
use config::AppConfig;

#[cfg_attr(target_arch = "wasm32", wasm_bindgen(start))]
pub async fn run() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            if let Err(e) = console_log::init_with_level(log::Level::Warn) {
                eprintln!("Couldn't initialize logger: {}", e);
            }
        } else {
            env_logger::init();
        }
    }

    if let Err(e) = run_app(AppConfig::default()).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run_app(app_config: AppConfig) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let window = std::sync::Arc::new(
        WindowBuilder::new()
            .with_title(app_config.title.as_str())
            .with_inner_size(winit::dpi::PhysicalSize::new(app_config.window_width, app_config.window_height))
            .build(&event_loop)?,
    );

    #[cfg(target_arch = "wasm32")]
    {
        use winit::platform::web::WindowExtWebSys;
        let appended = web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| {
                let dst = doc.get_element_by_id("wasm-viewport")?;
                let canvas = web_sys::Element::from(window.canvas()?);
                dst.append_child(&canvas).ok()?;
                Some(())
            });
        if appended.is_none() {
            log::error!("Couldn't append canvas to document body.");
        }
    }

    let mut app_state = ChaosApp::new(window.clone(), &app_config).await?;

    event_loop.run(move |event, target: &EventLoopWindowTarget<()>| {
        target.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => {
                if !app_state.handle_window_event(event, &window) {
                    match event {
                        WindowEvent::Resized(physical_size) => {
                            app_state.resize(*physical_size);
                        }
                        WindowEvent::RedrawRequested => { /* In AboutToWait */ }
                        _ => {}
                    }
                }
                if app_state.is_closed() {
                    target.exit();
                }
            }
            Event::AboutToWait => {
                if target.exiting() {
                    return;
                }
                app_state.update();
                match app_state.render(&window) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        app_state.resize(app_state.get_size());
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("WGPU Out Of Memory! Exiting.");
                        target.exit();
                    }
                    Err(e) => log::error!("Surface error: {:?}", e),
                }

                if !target.exiting() {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    })?;
    Ok(())
}

#[tokio::main]
async fn main() {
    run().await;
}
