//! Durian Dash - A side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, camera)
//! - `input`: Keyboard/touch normalization into per-tick intent
//! - `tuning`: Data-driven game balance and variant profiles
//! - `clock`: Frame pacing (per-frame or fixed timestep)
//! - `platform`: Browser driver

pub mod clock;
pub mod error;
pub mod input;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use clock::{FrameClock, TickMode};
pub use error::ConfigError;
pub use input::{InputIntent, InputState, TouchScheme};
pub use sim::{GameState, SceneSnapshot, Simulation, World};
pub use tuning::{Profile, Tuning};

/// Game configuration constants
pub mod consts {
    /// Nominal tick rate for fixed-timestep pacing (matches a 60 Hz display)
    pub const SIM_HZ: f32 = 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Vertical speed kept after a floor bounce
    pub const BOUNCE_RESTITUTION: f32 = 0.7;
    /// Horizontal speed kept after a floor bounce
    pub const BOUNCE_DAMPING: f32 = 0.95;
    /// Spin per unit of horizontal speed (radians per tick)
    pub const ROLL_SPIN: f32 = 0.05;
}
