//! Translation of window pointer input (mouse and touch) into single-pointer
//! game events.
//!
//! Mouse: cursor motion is only remembered until the left button goes down.
//! The press becomes `Down` at the last cursor position, motion while held
//! becomes `Move`, and the release becomes `Up`.
//!
//! Touch: the first finger down owns the pointer until it lifts or is
//! cancelled. Other fingers are ignored.

use fia_core::input::{PointerEvent, PointerKind};
use glam::Vec2;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};

#[derive(Debug, Default)]
pub struct PointerTracker {
    cursor: Vec2,
    mouse_held: bool,
    active_touch: Option<u64>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Option<PointerEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(position.x as f32, position.y as f32)
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.left_button(*state),
            WindowEvent::Touch(touch) => self.touch(
                touch.id,
                touch.phase,
                touch.location.x as f32,
                touch.location.y as f32,
            ),
            _ => None,
        }
    }

    pub fn cursor_moved(&mut self, x: f32, y: f32) -> Option<PointerEvent> {
        self.cursor = Vec2::new(x, y);
        self.mouse_held.then(|| PointerEvent::moved(x, y))
    }

    pub fn left_button(&mut self, state: ElementState) -> Option<PointerEvent> {
        let kind = match state {
            ElementState::Pressed if !self.mouse_held => {
                self.mouse_held = true;
                PointerKind::Down
            }
            ElementState::Released if self.mouse_held => {
                self.mouse_held = false;
                PointerKind::Up
            }
            _ => return None,
        };
        Some(PointerEvent::new(kind, self.cursor.x, self.cursor.y))
    }

    pub fn touch(&mut self, id: u64, phase: TouchPhase, x: f32, y: f32) -> Option<PointerEvent> {
        match phase {
            TouchPhase::Started if self.active_touch.is_none() => {
                self.active_touch = Some(id);
                Some(PointerEvent::new(PointerKind::Down, x, y))
            }
            TouchPhase::Moved if self.active_touch == Some(id) => {
                Some(PointerEvent::new(PointerKind::Move, x, y))
            }
            TouchPhase::Ended | TouchPhase::Cancelled if self.active_touch == Some(id) => {
                self.active_touch = None;
                Some(PointerEvent::new(PointerKind::Up, x, y))
            }
            _ => {
                log::trace!("Ignoring touch {} ({:?})", id, phase);
                None
            }
        }
    }
}
