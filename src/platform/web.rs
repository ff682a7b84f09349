//! WebAssembly bindings
//!
//! JavaScript owns the canvas and the render loop; it forwards raw events
//! and calls [`WebGame::frame`] once per animation frame.

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, KeyboardEvent, Touch, TouchEvent};

use crate::clock::{FrameClock, TickMode};
use crate::input::InputState;
use crate::sim::{GameState, Simulation, World};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Durian Dash starting...");
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Game instance holding all state
#[wasm_bindgen]
pub struct WebGame {
    sim: Simulation,
    input: InputState,
    clock: FrameClock,
    canvas: HtmlCanvasElement,
    last_time: Option<f64>,
    last_state: GameState,
}

#[wasm_bindgen]
impl WebGame {
    /// `profile` picks a built-in tuning; without it the stored override (or
    /// the default) is used. `fixed_hz` switches to fixed-timestep pacing.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        background_width: f32,
        background_height: f32,
        profile: Option<String>,
        fixed_hz: Option<f32>,
    ) -> Result<WebGame, JsValue> {
        let tuning = match profile {
            Some(name) => Tuning::profile(&name).map_err(js_err)?,
            None => Tuning::load(),
        };
        let width = canvas.width() as f32;
        let height = canvas.height() as f32;
        let world = World::from_background(width, height, background_width, background_height)
            .map_err(js_err)?;

        let seed = js_sys::Date::now() as u64;
        let input = InputState::new(tuning.features.touch, width);
        let mode = fixed_hz.map_or(TickMode::PerFrame, |hz| TickMode::Fixed { hz });
        let clock = FrameClock::new(mode).map_err(js_err)?;
        let sim = Simulation::new(tuning, world, seed).map_err(js_err)?;
        log::info!("Game initialized with seed: {}", seed);

        Ok(Self {
            sim,
            input,
            clock,
            canvas,
            last_time: None,
            last_state: GameState::Running,
        })
    }

    pub fn on_key_down(&mut self, event: &KeyboardEvent) {
        self.input.key_down(&event.key());
    }

    pub fn on_key_up(&mut self, event: &KeyboardEvent) {
        self.input.key_up(&event.key());
    }

    pub fn on_touch_start(&mut self, event: &TouchEvent) {
        event.prevent_default();
        let now = js_sys::Date::now();
        let touches = event.changed_touches();
        for i in 0..touches.length() {
            if let Some(touch) = touches.get(i) {
                let pos = self.touch_pos(&touch);
                self.input.touch_start(touch.identifier(), pos, now);
            }
        }
    }

    pub fn on_touch_move(&mut self, event: &TouchEvent) {
        event.prevent_default();
        let touches = event.touches();
        for i in 0..touches.length() {
            if let Some(touch) = touches.get(i) {
                let pos = self.touch_pos(&touch);
                self.input.touch_move(touch.identifier(), pos);
            }
        }
    }

    pub fn on_touch_end(&mut self, event: &TouchEvent) {
        event.prevent_default();
        let touches = event.changed_touches();
        for i in 0..touches.length() {
            if let Some(touch) = touches.get(i) {
                let pos = self.touch_pos(&touch);
                self.input.touch_end(touch.identifier(), pos);
            }
        }
    }

    /// Window lost focus: release held keys and touches
    pub fn on_blur(&mut self) {
        self.input.release_all();
    }

    /// Canvas resized or background (re)loaded
    pub fn resize(&mut self, background_width: f32, background_height: f32) -> Result<(), JsValue> {
        let width = self.canvas.width() as f32;
        let height = self.canvas.height() as f32;
        let world = World::from_background(width, height, background_width, background_height)
            .map_err(js_err)?;
        self.sim.resize(world).map_err(js_err)?;
        self.input.set_viewport_width(width);
        Ok(())
    }

    /// Run the ticks due for this animation frame and return the scene as JSON
    pub fn frame(&mut self, time_ms: f64) -> Result<String, JsValue> {
        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(time_ms);

        for _ in 0..self.clock.advance(dt) {
            let intent = self.input.take_intent();
            self.sim.advance(intent);
        }

        let state = self.sim.state();
        if state != self.last_state {
            log::info!("State: {:?} -> {:?}", self.last_state, state);
            self.last_state = state;
        }

        self.sim.snapshot().to_json().map_err(js_err)
    }

    pub fn is_game_over(&self) -> bool {
        self.sim.state() == GameState::GameOver
    }

    /// Convert a touch to canvas coordinates
    fn touch_pos(&self, touch: &Touch) -> Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        let scale_x = if rect.width() > 0.0 {
            self.canvas.width() as f64 / rect.width()
        } else {
            1.0
        };
        let scale_y = if rect.height() > 0.0 {
            self.canvas.height() as f64 / rect.height()
        } else {
            1.0
        };
        Vec2::new(
            ((touch.client_x() as f64 - rect.left()) * scale_x) as f32,
            ((touch.client_y() as f64 - rect.top()) * scale_y) as f32,
        )
    }
}
