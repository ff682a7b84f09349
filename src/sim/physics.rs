//! Per-tick kinematics for the player and hazards
//!
//! All constants are per tick: the step is applied once per simulation tick,
//! never scaled by wall-clock time.

use super::state::{Hazard, HazardKind, Player, World};
use crate::consts::{BOUNCE_DAMPING, BOUNCE_RESTITUTION, ROLL_SPIN};
use crate::input::InputIntent;
use crate::tuning::{BoundsTuning, Tuning};

/// Which jump, if any, fired this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    /// Ground jump or mid-air extra jump
    Normal,
    /// Kick off a world edge
    Wall,
}

/// Advance a living player by one tick
///
/// Horizontal: accelerate toward the intent, ground friction without intent,
/// speed clamp, integrate. Jumps are consumed from the intent (wall jump wins
/// when airborne against a world edge). Vertical: gravity, integrate, snap to
/// the ground. Finally the body is clamped inside the world.
pub fn step_player(
    player: &mut Player,
    intent: &InputIntent,
    world: &World,
    tuning: &Tuning,
) -> Option<JumpKind> {
    let physics = &tuning.physics;
    let ground_y = world.ground_y(player.height, physics.ground_offset);
    let on_ground = player.on_ground(ground_y);

    let dir = intent.direction();
    let accel = if on_ground {
        physics.move_accel
    } else {
        physics.air_accel
    };
    if dir != 0.0 {
        player.vel.x += accel * dir;
    } else if on_ground {
        player.vel.x *= physics.friction;
    }
    player.vel.x = player.vel.x.clamp(-physics.max_speed, physics.max_speed);
    player.pos.x += player.vel.x;

    let mut jump = None;
    if intent.jump_requested {
        let touching_left = player.pos.x <= 0.0;
        let touching_right = player.pos.x + player.width >= world.world_width;

        if tuning.features.wall_jump && !on_ground && (touching_left || touching_right) {
            player.vel.y = -physics.wall_jump_force;
            player.vel.x = if touching_left {
                physics.wall_jump_push
            } else {
                -physics.wall_jump_push
            };
            player.jumps_remaining = 1.min(player.max_jumps);
            player.airborne_by_jump = true;
            jump = Some(JumpKind::Wall);
            log::debug!("Wall jump off the {} edge", if touching_left { "left" } else { "right" });
        } else if player.jumps_remaining > 0 {
            player.vel.y = -physics.jump_force;
            player.jumps_remaining -= 1;
            player.airborne_by_jump = true;
            jump = Some(JumpKind::Normal);
        }
    }

    player.vel.y += physics.gravity;
    player.pos.y += player.vel.y;

    if player.pos.y >= ground_y {
        land(player, ground_y);
    }

    let max_x = (world.world_width - player.width).max(0.0);
    player.pos.x = player.pos.x.clamp(0.0, max_x);

    jump
}

/// Ground contact: snap, stop falling, restore every jump
fn land(player: &mut Player, ground_y: f32) {
    player.pos.y = ground_y;
    player.vel.y = 0.0;
    player.jumps_remaining = player.max_jumps;
    player.airborne_by_jump = false;
}

/// Re-seat bodies on the floor of a freshly resized world
///
/// A living player below the new ground lands on it. Rollers always ride the
/// floor. Ballistic hazards that may still bounce are lifted out of it; a
/// dropper that already bounced keeps falling through.
pub fn fit_to_floor(player: &mut Player, hazards: &mut [Hazard], world: &World, tuning: &Tuning) {
    let ground_offset = tuning.physics.ground_offset;
    let ground_y = world.ground_y(player.height, ground_offset);
    if player.alive && player.pos.y > ground_y {
        land(player, ground_y);
    }

    let floor = world.floor_y(ground_offset);
    for hazard in hazards.iter_mut() {
        match hazard.kind {
            HazardKind::GroundRoller => hazard.pos.y = floor - hazard.size,
            HazardKind::HealingBall | HazardKind::FallingBouncer => {
                let may_bounce = hazard.kind == HazardKind::HealingBall || !hazard.bounced;
                if may_bounce && hazard.pos.y + hazard.size > floor {
                    hazard.pos.y = floor - hazard.size;
                }
            }
        }
    }
}

/// Gravity-only fall after death; no floor
pub fn step_dying(player: &mut Player, tuning: &Tuning) {
    player.vel.y += tuning.physics.gravity;
    player.pos.y += player.vel.y;
}

/// Advance every hazard one tick, then drop the ones past the despawn margin
///
/// Rollers move at constant speed. Ballistic kinds take gravity and bounce
/// off the floor with energy loss; droppers only bounce once and then fall
/// through.
pub fn step_hazards(hazards: &mut Vec<Hazard>, world: &World, tuning: &Tuning) {
    let floor = world.floor_y(tuning.physics.ground_offset);

    for hazard in hazards.iter_mut() {
        if hazard.kind.is_ballistic() {
            hazard.vel.y += tuning.physics.gravity;
            hazard.pos += hazard.vel;

            let may_bounce = hazard.kind == HazardKind::HealingBall || !hazard.bounced;
            if may_bounce && hazard.pos.y + hazard.size >= floor {
                hazard.pos.y = floor - hazard.size;
                hazard.vel.y = -hazard.vel.y * BOUNCE_RESTITUTION;
                hazard.vel.x *= BOUNCE_DAMPING;
                if hazard.kind == HazardKind::FallingBouncer {
                    hazard.bounced = true;
                }
            }
        } else {
            hazard.pos.x += hazard.vel.x;
        }
        hazard.rotation += hazard.vel.x * ROLL_SPIN;
    }

    let before = hazards.len();
    hazards.retain(|h| !is_out_of_bounds(h, world, &tuning.bounds));
    if hazards.len() < before {
        log::trace!("Despawned {} hazard(s)", before - hazards.len());
    }
}

/// Beyond the despawn margin around the camera view
pub fn is_out_of_bounds(hazard: &Hazard, world: &World, bounds: &BoundsTuning) -> bool {
    let left = world.camera_x - bounds.despawn_x;
    let right = world.camera_x + world.viewport_width + bounds.despawn_x;
    hazard.pos.x < left
        || hazard.pos.x > right
        || hazard.pos.y > world.viewport_height + bounds.despawn_y
        || hazard.pos.y + hazard.size < -bounds.despawn_y
}
