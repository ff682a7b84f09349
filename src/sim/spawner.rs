//! Time-gated, population-capped hazard factory

use glam::Vec2;
use rand::Rng;

use super::state::{Hazard, HazardKind, World};
use crate::tuning::Tuning;

/// Shared spawn gate with per-kind population caps
#[derive(Debug, Clone, Default)]
pub struct HazardSpawner {
    counter: u32,
}

impl HazardSpawner {
    pub fn new() -> Self {
        Self { counter: 0 }
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Ticks since the last spawn attempt
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Count one tick and, when the gate opens, spawn at most one damaging
    /// hazard and one healing ball. Returns the number spawned.
    ///
    /// The counter resets whenever the gate opens, whether or not the caps
    /// allowed a spawn.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        hazards: &mut Vec<Hazard>,
        world: &World,
        tuning: &Tuning,
        rng: &mut R,
    ) -> usize {
        self.counter += 1;
        if self.counter < tuning.spawn.interval {
            return 0;
        }
        self.counter = 0;

        let mut spawned = 0;
        let damaging = pick_damaging(tuning, rng);
        for kind in damaging.into_iter().chain(
            tuning
                .healer
                .enabled
                .then_some(HazardKind::HealingBall),
        ) {
            if population(hazards, kind) < tuning.hazard(kind).cap {
                let hazard = spawn(kind, world, tuning, rng);
                log::debug!(
                    "Spawned {} at ({:.0}, {:.0}) vel ({:.1}, {:.1})",
                    kind.as_str(),
                    hazard.pos.x,
                    hazard.pos.y,
                    hazard.vel.x,
                    hazard.vel.y
                );
                hazards.push(hazard);
                spawned += 1;
            }
        }
        spawned
    }
}

/// Live hazards of one kind
pub fn population(hazards: &[Hazard], kind: HazardKind) -> usize {
    hazards.iter().filter(|h| h.kind == kind).count()
}

/// Choose the damaging kind for this gate, splitting drop vs roll when both exist
fn pick_damaging<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> Option<HazardKind> {
    match (tuning.roller.enabled, tuning.dropper.enabled) {
        (true, true) => Some(if rng.random_bool(tuning.spawn.drop_chance) {
            HazardKind::FallingBouncer
        } else {
            HazardKind::GroundRoller
        }),
        (true, false) => Some(HazardKind::GroundRoller),
        (false, true) => Some(HazardKind::FallingBouncer),
        (false, false) => None,
    }
}

/// Build one hazard entering from off-screen
///
/// Side spawns appear beyond a random viewport edge at floor level heading
/// inward; droppers appear above the viewport at a random x with a random
/// horizontal drift.
pub fn spawn<R: Rng + ?Sized>(kind: HazardKind, world: &World, tuning: &Tuning, rng: &mut R) -> Hazard {
    let t = tuning.hazard(kind);
    let floor = world.floor_y(tuning.physics.ground_offset);

    match kind {
        HazardKind::FallingBouncer => {
            let max_x = (world.viewport_width - t.size).max(0.0);
            let x = world.camera_x + rng.random_range(0.0..=max_x);
            let y = -t.size - tuning.spawn.drop_height;
            let drift = t.speed.sample(rng);
            let vx = if rng.random_bool(0.5) { drift } else { -drift };
            Hazard::new(kind, Vec2::new(x, y), t.size, Vec2::new(vx, 0.0))
        }
        HazardKind::GroundRoller | HazardKind::HealingBall => {
            let from_left = rng.random_bool(0.5);
            let offset = tuning.spawn.side_offset;
            let x = if from_left {
                world.camera_x - offset
            } else {
                world.camera_x + world.viewport_width + offset
            };
            let speed = t.speed.sample(rng);
            let vx = if from_left { speed } else { -speed };
            let vy = -t.launch_vy.sample(rng);
            Hazard::new(kind, Vec2::new(x, floor - t.size), t.size, Vec2::new(vx, vy))
        }
    }
}
