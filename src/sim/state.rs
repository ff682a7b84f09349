//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::error::ConfigError;
use crate::tuning::{InvincibilityTuning, PlayerTuning};

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameState {
    /// Player alive and in control
    #[default]
    Running,
    /// Health exhausted, player falling off screen
    Dying,
    /// Run ended, waiting for restart input
    GameOver,
}

/// Viewport and scrollable world extents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Scaled background width
    pub world_width: f32,
    /// Horizontal camera offset into the world
    pub camera_x: f32,
}

impl World {
    pub fn new(viewport_width: f32, viewport_height: f32, world_width: f32) -> Result<Self, ConfigError> {
        if !(viewport_width > 0.0 && viewport_height > 0.0) {
            return Err(ConfigError::World(format!(
                "viewport must be positive, got {viewport_width}x{viewport_height}"
            )));
        }
        if !(world_width.is_finite() && world_width >= viewport_width) {
            return Err(ConfigError::World(format!(
                "world width {world_width} is narrower than the viewport ({viewport_width})"
            )));
        }
        Ok(Self {
            viewport_width,
            viewport_height,
            world_width,
            camera_x: 0.0,
        })
    }

    /// World sized by a background image scaled to fill the viewport height
    pub fn from_background(
        viewport_width: f32,
        viewport_height: f32,
        background_width: f32,
        background_height: f32,
    ) -> Result<Self, ConfigError> {
        if !(background_width > 0.0 && background_height > 0.0) {
            return Err(ConfigError::World(format!(
                "background must be positive, got {background_width}x{background_height}"
            )));
        }
        let scale = viewport_height / background_height;
        Self::new(viewport_width, viewport_height, background_width * scale)
    }

    /// Resting y for the player's top edge
    pub fn ground_y(&self, player_height: f32, ground_offset: f32) -> f32 {
        self.viewport_height - player_height - ground_offset
    }

    /// The floor line hazards roll and bounce on
    pub fn floor_y(&self, ground_offset: f32) -> f32 {
        self.viewport_height - ground_offset
    }
}

/// The controllable character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    pub jumps_remaining: u8,
    pub max_jumps: u8,
    pub health: u8,
    pub max_health: u8,
    pub alive: bool,
    pub invincible: bool,
    /// Ticks left in the current blink half-cycle
    pub blink_timer: u32,
    /// Blink half-cycles left before invincibility ends
    pub blink_ticks_remaining: u32,
    /// Airborne because of a user jump (presentation hint)
    pub airborne_by_jump: bool,
}

impl Player {
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            pos: Vec2::new(tuning.start_x, tuning.start_y),
            vel: Vec2::ZERO,
            width: tuning.width,
            height: tuning.height,
            jumps_remaining: tuning.max_jumps,
            max_jumps: tuning.max_jumps,
            health: tuning.max_health,
            max_health: tuning.max_health,
            alive: true,
            invincible: false,
            blink_timer: 0,
            blink_ticks_remaining: 0,
            airborne_by_jump: false,
        }
    }

    /// Restore every field to its initial value
    pub fn reset(&mut self, tuning: &PlayerTuning) {
        *self = Self::new(tuning);
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn on_ground(&self, ground_y: f32) -> bool {
        self.pos.y >= ground_y
    }

    /// Open the post-hit invincibility window
    pub fn start_invincibility(&mut self, tuning: &InvincibilityTuning) {
        self.invincible = true;
        self.blink_timer = tuning.blink_timer;
        self.blink_ticks_remaining = tuning.blink_count;
    }

    /// Hidden half of the invincibility blink
    pub fn blink_hidden(&self) -> bool {
        self.invincible && self.blink_ticks_remaining % 2 == 0
    }
}

/// Hazard variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    /// Rolls along the floor at constant speed
    GroundRoller,
    /// Drops from above, bounces once
    FallingBouncer,
    /// Bouncy ball that restores health
    HealingBall,
}

impl HazardKind {
    pub const ALL: [HazardKind; 3] = [
        HazardKind::GroundRoller,
        HazardKind::FallingBouncer,
        HazardKind::HealingBall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HazardKind::GroundRoller => "roller",
            HazardKind::FallingBouncer => "dropper",
            HazardKind::HealingBall => "healer",
        }
    }

    /// Damaging kinds cost health on contact; the rest heal
    pub fn is_damaging(&self) -> bool {
        !matches!(self, HazardKind::HealingBall)
    }

    /// Whether gravity acts on this kind
    pub fn is_ballistic(&self) -> bool {
        !matches!(self, HazardKind::GroundRoller)
    }
}

/// A spawned world object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub kind: HazardKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub vel: Vec2,
    /// Spin angle in radians (presentation)
    pub rotation: f32,
    /// Drop-type hazards have used up their one bounce
    pub bounced: bool,
}

impl Hazard {
    pub fn new(kind: HazardKind, pos: Vec2, size: f32, vel: Vec2) -> Self {
        Self {
            kind,
            pos,
            size,
            vel,
            rotation: 0.0,
            bounced: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }
}
