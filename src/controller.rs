// src/controller.rs

use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};
use chaos_game::{Command, Point2};

/// Maps a pressed key to a session command.
pub fn command_for_key(key: KeyCode) -> Option<Command> {
    let command = match key {
        KeyCode::Digit3 | KeyCode::Numpad3 => Command::SetVertexCount(3),
        KeyCode::Digit4 | KeyCode::Numpad4 => Command::SetVertexCount(4),
        KeyCode::Digit5 | KeyCode::Numpad5 => Command::SetVertexCount(5),
        KeyCode::Digit6 | KeyCode::Numpad6 => Command::SetVertexCount(6),
        KeyCode::Digit7 | KeyCode::Numpad7 => Command::SetVertexCount(7),
        KeyCode::Digit8 | KeyCode::Numpad8 => Command::SetVertexCount(8),
        KeyCode::Digit9 | KeyCode::Numpad9 => Command::SetVertexCount(9),
        KeyCode::Digit0 | KeyCode::Numpad0 => Command::SetVertexCount(10),
        KeyCode::KeyR => Command::Reset,
        KeyCode::Escape => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Turns raw window events into session commands. Clicks carry the last
/// cursor position, since winit reports button presses without one.
#[derive(Debug, Default)]
pub struct InputController {
    cursor: Option<Point2>,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// `ui_consumed` is set when the overlay already claimed the event; the
    /// cursor is still tracked so the next click lands where it should.
    pub fn handle_window_event(&mut self, event: &WindowEvent, ui_consumed: bool) -> Option<Command> {
        match event {
            WindowEvent::CloseRequested => Some(Command::Quit),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(*position);
                None
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                None
            }
            _ if ui_consumed => None,
            WindowEvent::MouseInput { state: ElementState::Pressed, button, .. } => self.mouse_pressed(*button),
            WindowEvent::KeyboardInput { event: key_event, .. } => self.key_event(key_event),
            _ => None,
        }
    }

    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.cursor = Some(Point2::new(position.x as f32, position.y as f32));
    }

    pub fn mouse_pressed(&self, button: MouseButton) -> Option<Command> {
        if button != MouseButton::Left {
            return None;
        }
        let at = self.cursor?;
        log::debug!("Left click at ({}, {})", at.x, at.y);
        Some(Command::Click(at))
    }

    fn key_event(&self, key_event: &KeyEvent) -> Option<Command> {
        if key_event.state != ElementState::Pressed || key_event.repeat {
            return None;
        }
        match key_event.physical_key {
            PhysicalKey::Code(code) => command_for_key(code),
            _ => None,
        }
    }
}
