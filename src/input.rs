//! Device-independent player input
//!
//! Raw keyboard and touch events land in an [`InputState`] buffer. The
//! simulation only ever sees the [`InputIntent`] taken from it once per tick,
//! so event handlers never touch player or hazard state directly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Minimum horizontal drag (in canvas units) that counts as a swipe
pub const SWIPE_DEAD_ZONE: f32 = 10.0;
/// Maximum gap between two taps that counts as a double tap
pub const DOUBLE_TAP_MS: f64 = 300.0;

/// How touch gestures map to intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TouchScheme {
    /// Swipe anywhere to move, tap anywhere to jump
    #[default]
    Swipe,
    /// Left half swipes relative to the touch-down point, right half taps jump
    SplitScreen,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputIntent {
    /// -1 left, 0 none, 1 right
    pub move_dir: i8,
    /// One-shot jump request (edge-triggered)
    pub jump_requested: bool,
    /// One-shot restart request, honoured only after game over
    pub restart_requested: bool,
}

impl InputIntent {
    pub fn new(move_dir: i32, jump_requested: bool) -> Self {
        Self {
            move_dir: move_dir.signum() as i8,
            jump_requested,
            restart_requested: false,
        }
    }

    pub fn moving(move_dir: i32) -> Self {
        Self::new(move_dir, false)
    }

    pub fn jump() -> Self {
        Self::new(0, true)
    }

    pub fn restart() -> Self {
        Self {
            restart_requested: true,
            ..Default::default()
        }
    }

    /// Movement direction clamped to {-1, 0, 1}
    pub fn direction(&self) -> f32 {
        self.move_dir.signum() as f32
    }
}

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Jump,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Self {
        match key {
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            " " | "Spacebar" => Key::Jump,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TrackedTouch {
    id: i32,
    pos: Vec2,
}

/// Buffered raw input, normalized into an [`InputIntent`]
#[derive(Debug, Clone)]
pub struct InputState {
    scheme: TouchScheme,
    viewport_width: f32,
    left_held: bool,
    right_held: bool,
    jump_held: bool,
    jump_pending: bool,
    restart_pending: bool,
    touches: Vec<TrackedTouch>,
    tap_start: Option<Vec2>,
    swipe_active: bool,
    swipe_dir: i8,
    split_anchor_x: f32,
    last_tap_ms: Option<f64>,
    double_taps: u32,
}

impl InputState {
    pub fn new(scheme: TouchScheme, viewport_width: f32) -> Self {
        Self {
            scheme,
            viewport_width,
            left_held: false,
            right_held: false,
            jump_held: false,
            jump_pending: false,
            restart_pending: false,
            touches: Vec::new(),
            tap_start: None,
            swipe_active: false,
            swipe_dir: 0,
            split_anchor_x: 0.0,
            last_tap_ms: None,
            double_taps: 0,
        }
    }

    /// Split-screen layouts need the current canvas width
    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
    }

    /// Double taps seen so far (they jump exactly like single taps)
    pub fn double_taps(&self) -> u32 {
        self.double_taps
    }

    /// Key pressed (auto-repeat events are ignored for jumping)
    pub fn key_down(&mut self, key: &str) {
        self.restart_pending = true;
        match Key::from_key(key) {
            Key::Left => self.left_held = true,
            Key::Right => self.right_held = true,
            Key::Jump => {
                if !self.jump_held {
                    self.jump_pending = true;
                }
                self.jump_held = true;
            }
            Key::Other => {}
        }
    }

    pub fn key_up(&mut self, key: &str) {
        match Key::from_key(key) {
            Key::Left => self.left_held = false,
            Key::Right => self.right_held = false,
            Key::Jump => self.jump_held = false,
            Key::Other => {}
        }
    }

    pub fn touch_start(&mut self, id: i32, pos: Vec2, time_ms: f64) {
        self.restart_pending = true;
        match self.scheme {
            TouchScheme::Swipe => {
                self.track(id, pos);
                self.tap_start = Some(pos);
                self.swipe_active = true;
                self.swipe_dir = 0;
            }
            TouchScheme::SplitScreen => {
                if pos.x < self.viewport_width / 2.0 {
                    self.split_anchor_x = pos.x;
                } else {
                    if let Some(last) = self.last_tap_ms {
                        if time_ms - last < DOUBLE_TAP_MS {
                            self.double_taps += 1;
                            log::trace!("Double tap");
                        }
                    }
                    self.last_tap_ms = Some(time_ms);
                    self.jump_pending = true;
                }
            }
        }
    }

    pub fn touch_move(&mut self, id: i32, pos: Vec2) {
        match self.scheme {
            TouchScheme::Swipe => {
                let Some(touch) = self.touches.iter_mut().find(|t| t.id == id) else {
                    return;
                };
                let dx = pos.x - touch.pos.x;
                if dx.abs() > SWIPE_DEAD_ZONE {
                    self.swipe_dir = if dx > 0.0 { 1 } else { -1 };
                }
                touch.pos = pos;
            }
            TouchScheme::SplitScreen => {
                if pos.x < self.viewport_width / 2.0 {
                    let dx = pos.x - self.split_anchor_x;
                    if dx > SWIPE_DEAD_ZONE {
                        self.swipe_dir = 1;
                    } else if dx < -SWIPE_DEAD_ZONE {
                        self.swipe_dir = -1;
                    }
                }
            }
        }
    }

    pub fn touch_end(&mut self, id: i32, pos: Vec2) {
        match self.scheme {
            TouchScheme::Swipe => {
                self.touches.retain(|t| t.id != id);
                if let Some(start) = self.tap_start {
                    let delta = (pos - start).abs();
                    if delta.x < SWIPE_DEAD_ZONE && delta.y < SWIPE_DEAD_ZONE {
                        self.jump_pending = true;
                    }
                }
                if self.touches.is_empty() {
                    self.swipe_active = false;
                    self.swipe_dir = 0;
                }
            }
            TouchScheme::SplitScreen => {
                self.swipe_dir = 0;
            }
        }
    }

    /// Drop held keys and touches (focus loss)
    pub fn release_all(&mut self) {
        self.left_held = false;
        self.right_held = false;
        self.jump_held = false;
        self.touches.clear();
        self.tap_start = None;
        self.swipe_active = false;
        self.swipe_dir = 0;
    }

    /// Current held direction; not consumed by reading
    pub fn move_dir(&self) -> i8 {
        let keys = self.right_held as i32 - self.left_held as i32;
        let swipe = match self.scheme {
            TouchScheme::Swipe if self.swipe_active => self.swipe_dir as i32,
            TouchScheme::Swipe => 0,
            TouchScheme::SplitScreen => self.swipe_dir as i32,
        };
        (keys + swipe).signum() as i8
    }

    /// Read the intent for the next tick, consuming one-shot requests
    pub fn take_intent(&mut self) -> InputIntent {
        let intent = InputIntent {
            move_dir: self.move_dir(),
            jump_requested: self.jump_pending,
            restart_requested: self.restart_pending,
        };
        self.jump_pending = false;
        self.restart_pending = false;
        intent
    }

    fn track(&mut self, id: i32, pos: Vec2) {
        match self.touches.iter_mut().find(|t| t.id == id) {
            Some(touch) => touch.pos = pos,
            None => self.touches.push(TrackedTouch { id, pos }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_clamps_direction() {
        assert_eq!(InputIntent::moving(5).move_dir, 1);
        assert_eq!(InputIntent::moving(-42).move_dir, -1);
        assert_eq!(InputIntent::moving(0).move_dir, 0);

        let raw = InputIntent {
            move_dir: 7,
            ..Default::default()
        };
        assert_eq!(raw.direction(), 1.0);
    }

    #[test]
    fn test_held_jump_key_requests_once() {
        let mut input = InputState::new(TouchScheme::Swipe, 800.0);
        input.key_down(" ");
        assert!(input.take_intent().jump_requested);

        // Auto-repeat while held
        input.key_down(" ");
        input.key_down(" ");
        assert!(!input.take_intent().jump_requested);

        input.key_up(" ");
        input.key_down(" ");
        assert!(input.take_intent().jump_requested);
    }

    #[test]
    fn test_arrow_keys_direction() {
        let mut input = InputState::new(TouchScheme::Swipe, 800.0);
        input.key_down("ArrowRight");
        assert_eq!(input.take_intent().move_dir, 1);
        // Direction is level-triggered, not consumed
        assert_eq!(input.take_intent().move_dir, 1);

        input.key_down("ArrowLeft");
        assert_eq!(input.move_dir(), 0);
        input.key_up("ArrowRight");
        assert_eq!(input.move_dir(), -1);
    }

    #[test]
    fn test_any_key_requests_restart() {
        let mut input = InputState::new(TouchScheme::Swipe, 800.0);
        input.key_down("q");
        let intent = input.take_intent();
        assert!(intent.restart_requested);
        assert!(!intent.jump_requested);
        assert!(!input.take_intent().restart_requested);
    }

    #[test]
    fn test_swipe_sets_direction_and_clears_on_release() {
        let mut input = InputState::new(TouchScheme::Swipe, 800.0);
        input.touch_start(1, Vec2::new(100.0, 300.0), 0.0);
        input.touch_move(1, Vec2::new(105.0, 300.0));
        assert_eq!(input.move_dir(), 0, "inside dead zone");

        input.touch_move(1, Vec2::new(125.0, 300.0));
        assert_eq!(input.move_dir(), 1);

        input.touch_move(1, Vec2::new(100.0, 300.0));
        assert_eq!(input.move_dir(), -1);

        input.touch_end(1, Vec2::new(100.0, 300.0));
        assert_eq!(input.move_dir(), 0);
    }

    #[test]
    fn test_tap_requests_jump() {
        let mut input = InputState::new(TouchScheme::Swipe, 800.0);
        input.touch_start(3, Vec2::new(400.0, 300.0), 0.0);
        input.touch_end(3, Vec2::new(404.0, 296.0));
        let intent = input.take_intent();
        assert!(intent.jump_requested);
        assert!(intent.restart_requested);
    }

    #[test]
    fn test_drag_is_not_a_tap() {
        let mut input = InputState::new(TouchScheme::Swipe, 800.0);
        input.touch_start(3, Vec2::new(400.0, 300.0), 0.0);
        input.touch_move(3, Vec2::new(460.0, 300.0));
        input.touch_end(3, Vec2::new(460.0, 300.0));
        assert!(!input.take_intent().jump_requested);
    }

    #[test]
    fn test_split_screen_zones() {
        let mut input = InputState::new(TouchScheme::SplitScreen, 800.0);

        // Left half swipes relative to touch-down
        input.touch_start(1, Vec2::new(100.0, 300.0), 0.0);
        input.touch_move(1, Vec2::new(80.0, 300.0));
        assert_eq!(input.move_dir(), -1);
        assert!(!input.take_intent().jump_requested);

        // Right half taps jump; a quick second tap is a double tap
        input.touch_start(2, Vec2::new(600.0, 300.0), 1000.0);
        assert!(input.take_intent().jump_requested);
        input.touch_start(2, Vec2::new(600.0, 300.0), 1200.0);
        assert!(input.take_intent().jump_requested);
        assert_eq!(input.double_taps(), 1);

        input.touch_start(2, Vec2::new(600.0, 300.0), 2000.0);
        assert_eq!(input.double_taps(), 1);

        input.touch_end(1, Vec2::new(80.0, 300.0));
        assert_eq!(input.move_dir(), 0);
    }

    #[test]
    fn test_release_all() {
        let mut input = InputState::new(TouchScheme::Swipe, 800.0);
        input.key_down("ArrowLeft");
        input.touch_start(1, Vec2::new(100.0, 100.0), 0.0);
        input.release_all();
        assert_eq!(input.move_dir(), 0);
    }
}
