//! Level-triggered input state for first-person control.
//!
//! Key handlers write current state; the loop samples it whenever it ticks.
//! Nothing is queued, so sampling at any frame boundary loses nothing.

use crate::constants::{MOUSE_SENSITIVITY, PITCH_MARGIN};
use fnv::FnvHashSet;
use std::f32::consts::FRAC_PI_2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    Run,
    Interact,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Option<Key> {
        match key {
            "w" | "W" => Some(Key::Forward),
            "s" | "S" => Some(Key::Back),
            "a" | "A" => Some(Key::StrafeLeft),
            "d" | "D" => Some(Key::StrafeRight),
            "e" | "E" => Some(Key::Interact),
            "Shift" => Some(Key::Run),
            _ => None,
        }
    }
}

pub const PITCH_LIMIT: f32 = FRAC_PI_2 - PITCH_MARGIN;

#[derive(Clone, Debug)]
pub struct InputState {
    held: FnvHashSet<Key>,
    yaw: f32,
    pitch: f32,
    captured: bool,
    sensitivity: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self::with_sensitivity(MOUSE_SENSITIVITY)
    }
}

impl InputState {
    pub fn with_sensitivity(sensitivity: f32) -> Self {
        Self {
            held: FnvHashSet::default(),
            yaw: 0.0,
            pitch: 0.0,
            captured: false,
            sensitivity,
        }
    }

    /// Record a press. Returns true only on the up-to-down edge, so keyboard
    /// auto-repeat never reports a second press.
    pub fn key_down(&mut self, key: Key) -> bool {
        self.held.insert(key)
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Drop every held key, e.g. when the page loses focus and key-up events
    /// will never arrive.
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Drop the movement and run keys but keep `Interact`, whose press edge
    /// must only re-arm on a real key-up.
    pub fn release_movement(&mut self) {
        self.held.retain(|k| *k == Key::Interact);
    }

    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
    }

    pub fn captured(&self) -> bool {
        self.captured
    }

    /// Accumulate a pointer delta into yaw/pitch. Ignored unless captured.
    /// Pitch saturates at exactly `±PITCH_LIMIT`, bounds included.
    pub fn mouse_move(&mut self, dx: f32, dy: f32) {
        if !self.captured {
            return;
        }
        self.yaw -= dx * self.sensitivity;
        self.pitch = (self.pitch - dy * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// (strafe, back) axes in [-1, 1], matching `FirstPersonCamera::walk`.
    pub fn move_axes(&self) -> (f32, f32) {
        let axis = |pos: Key, neg: Key| {
            (self.is_held(pos) as i32 - self.is_held(neg) as i32) as f32
        };
        (
            axis(Key::StrafeRight, Key::StrafeLeft),
            axis(Key::Back, Key::Forward),
        )
    }
}
