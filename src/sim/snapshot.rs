//! Read-only scene view handed to the renderer

use serde::{Deserialize, Serialize};

use super::state::{GameState, Hazard, HazardKind, Player};

/// Player pose and HUD data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPose {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub vx: f32,
    pub vy: f32,
    pub health: u8,
    pub jumps_remaining: u8,
    pub alive: bool,
    pub invincible: bool,
    /// Hidden half of the invincibility blink
    pub blink_hidden: bool,
    pub airborne_by_jump: bool,
}

impl From<&Player> for PlayerPose {
    fn from(player: &Player) -> Self {
        Self {
            x: player.pos.x,
            y: player.pos.y,
            width: player.width,
            height: player.height,
            vx: player.vel.x,
            vy: player.vel.y,
            health: player.health,
            jumps_remaining: player.jumps_remaining,
            alive: player.alive,
            invincible: player.invincible,
            blink_hidden: player.blink_hidden(),
            airborne_by_jump: player.airborne_by_jump,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardPose {
    pub kind: HazardKind,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub rotation: f32,
}

impl From<&Hazard> for HazardPose {
    fn from(hazard: &Hazard) -> Self {
        Self {
            kind: hazard.kind,
            x: hazard.pos.x,
            y: hazard.pos.y,
            size: hazard.size,
            rotation: hazard.rotation,
        }
    }
}

/// Everything the renderer needs for one frame (world coordinates)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub tick: u64,
    pub state: GameState,
    pub camera_x: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub world_width: f32,
    pub ground_y: f32,
    pub player: PlayerPose,
    pub hazards: Vec<HazardPose>,
}

impl SceneSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
