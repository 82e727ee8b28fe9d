//! Pointer input tracking.
//!
//! `Input` turns raw winit window events into per-frame pointer state:
//! buttons that went down or up this frame, buttons held, cursor position,
//! drag delta and wheel scroll.
//!
//! ```ignore
//! input.handle_event(&event);
//! if input.mouse_held(MouseButton::Left) {
//!     camera.rotate(input.mouse_delta().x, input.mouse_delta().y, height);
//! } else if input.mouse_held(MouseButton::Right) {
//!     camera.pan(input.mouse_delta().x, input.mouse_delta().y, height);
//! }
//! input.begin_frame();
//! ```

use crate::highlight::ScreenPoint;
use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Map a winit button. Back, forward and extra buttons are not tracked.
    pub fn from_winit(button: WinitMouseButton) -> Option<Self> {
        match button {
            WinitMouseButton::Left => Some(MouseButton::Left),
            WinitMouseButton::Right => Some(MouseButton::Right),
            WinitMouseButton::Middle => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

/// Pointer state for the current frame.
#[derive(Debug, Default)]
pub struct Input {
    // Mouse button state
    mouse_held: HashSet<MouseButton>,
    mouse_pressed: HashSet<MouseButton>,
    mouse_released: HashSet<MouseButton>,

    // Mouse position
    mouse_position: Vec2,
    mouse_delta: Vec2,

    // Scroll
    scroll_delta: f32,
}

impl Input {
    /// Create a new input tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a mouse button was pressed this frame.
    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    /// Check if a mouse button is currently held down.
    pub fn mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Check if a mouse button was released this frame.
    pub fn mouse_released(&self, button: MouseButton) -> bool {
        self.mouse_released.contains(&button)
    }

    /// Get the mouse position in screen pixels.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Mouse position as a [`ScreenPoint`] for highlighting.
    pub fn screen_point(&self) -> ScreenPoint {
        ScreenPoint::new(self.mouse_position.x, self.mouse_position.y)
    }

    /// Get the mouse movement since last frame in pixels.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Get the scroll wheel delta this frame, in lines.
    ///
    /// Positive values indicate scrolling up/forward.
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    /// Called at the end of each frame to clear per-frame state.
    pub fn begin_frame(&mut self) {
        self.mouse_pressed.clear();
        self.mouse_released.clear();
        self.mouse_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
    }

    /// Forget held buttons, e.g. when the pointer leaves the window mid-drag.
    pub fn release_all(&mut self) {
        self.mouse_held.clear();
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(btn) = MouseButton::from_winit(*button) else {
                    return;
                };
                match state {
                    ElementState::Pressed => {
                        self.mouse_pressed.insert(btn);
                        self.mouse_held.insert(btn);
                    }
                    ElementState::Released => {
                        self.mouse_held.remove(&btn);
                        self.mouse_released.insert(btn);
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let new_pos = Vec2::new(position.x as f32, position.y as f32);
                self.mouse_delta += new_pos - self.mouse_position;
                self.mouse_position = new_pos;
            }

            WindowEvent::CursorLeft { .. } => self.release_all(),

            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll_delta += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_state() {
        let mut input = Input::new();
        assert!(!input.mouse_held(MouseButton::Left));

        input.mouse_pressed.insert(MouseButton::Left);
        input.mouse_held.insert(MouseButton::Left);
        assert!(input.mouse_pressed(MouseButton::Left));

        // After begin_frame, pressed is cleared but held remains
        input.begin_frame();
        assert!(input.mouse_held(MouseButton::Left));
        assert!(!input.mouse_pressed(MouseButton::Left));
    }

    #[test]
    fn test_screen_point_and_delta() {
        let mut input = Input::new();
        input.mouse_position = Vec2::new(40.0, 30.0);
        input.mouse_delta = Vec2::new(4.0, -2.0);
        assert_eq!(input.screen_point(), ScreenPoint::new(40.0, 30.0));
        input.begin_frame();
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
        assert_eq!(input.mouse_position(), Vec2::new(40.0, 30.0));
    }

    #[test]
    fn test_side_buttons_are_ignored() {
        assert_eq!(MouseButton::from_winit(WinitMouseButton::Left), Some(MouseButton::Left));
        assert_eq!(MouseButton::from_winit(WinitMouseButton::Right), Some(MouseButton::Right));
        assert_eq!(MouseButton::from_winit(WinitMouseButton::Back), None);
        assert_eq!(MouseButton::from_winit(WinitMouseButton::Forward), None);
        assert_eq!(MouseButton::from_winit(WinitMouseButton::Other(7)), None);
    }

    #[test]
    fn test_release_all() {
        let mut input = Input::new();
        input.mouse_held.insert(MouseButton::Left);
        input.release_all();
        assert!(!input.mouse_held(MouseButton::Left));
    }
}
