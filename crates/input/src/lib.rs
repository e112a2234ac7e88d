#![warn(missing_docs)]
//! Keyboard and mouse-wheel state tracking for the game loop.
//!
//! Raw winit events in, queryable per-frame state out. No game
//! semantics live here; the binary's binding layer turns this into
//! logical flight controls.

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Input state tracking for a single frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently pressed.
    keys_pressed: HashSet<KeyCode>,
    /// Keys pressed this frame (edge-triggered).
    keys_just_pressed: HashSet<KeyCode>,
    /// Keys released this frame (edge-triggered).
    keys_just_released: HashSet<KeyCode>,

    /// Mouse wheel delta accumulated this frame.
    pub wheel_delta: f32,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a window event to update input state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(keycode),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => {
                    if self.keys_pressed.insert(*keycode) {
                        self.keys_just_pressed.insert(*keycode);
                    }
                }
                ElementState::Released => {
                    self.keys_pressed.remove(keycode);
                    self.keys_just_released.insert(*keycode);
                }
            },
            WindowEvent::MouseWheel { delta, .. } => {
                use winit::event::MouseScrollDelta;
                self.wheel_delta += match delta {
                    MouseScrollDelta::LineDelta(_x, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
            }
            _ => {}
        }
    }

    /// Reset per-frame state (call at the start of each frame).
    pub fn begin_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.keys_just_released.clear();
        self.wheel_delta = 0.0;
    }

    /// Check if a key is currently pressed.
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key was just pressed this frame.
    pub fn key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Check if a key was just released this frame.
    pub fn key_just_released(&self, key: KeyCode) -> bool {
        self.keys_just_released.contains(&key)
    }
}
