//! Horizontal camera follow

use super::state::{Player, World};

/// Camera offset centring the player, clamped to the world
#[inline]
pub fn camera_x(player_x: f32, player_width: f32, viewport_width: f32, world_width: f32) -> f32 {
    let target = player_x + player_width / 2.0 - viewport_width / 2.0;
    target.min(world_width - viewport_width).max(0.0)
}

/// Recompute the world's camera from the player's final position
pub fn track(world: &mut World, player: &Player) {
    world.camera_x = camera_x(
        player.pos.x,
        player.width,
        world.viewport_width,
        world.world_width,
    );
}
