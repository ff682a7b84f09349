//! Collision detection and response
//!
//! Axis-aligned box overlap between the player and every hazard, plus the
//! health, knockback, and invincibility transitions a contact causes.

use glam::Vec2;
use rand::Rng;

use super::state::{Hazard, Player};
use crate::tuning::{ContactPolicy, InvincibilityTuning, Tuning};

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn square(pos: Vec2, size: f32) -> Self {
        Self::new(pos.x, pos.y, size, size)
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        overlaps(self, other)
    }
}

/// Strict overlap test; touching edges do not collide
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// What happened during one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Damaging hits taken
    pub hits: u32,
    /// Healing contacts
    pub heals: u32,
    /// Health reached zero during this pass
    pub died: bool,
}

/// Test every hazard against the player and apply the consequences
///
/// Damaging kinds are skipped while the player is invincible; healing kinds
/// always apply. Once the player dies the remaining hazards are left alone.
/// The invincibility blink advances one tick at the end of the pass.
pub fn resolve<R: Rng + ?Sized>(
    player: &mut Player,
    hazards: &mut Vec<Hazard>,
    tuning: &Tuning,
    rng: &mut R,
) -> CollisionReport {
    let mut report = CollisionReport::default();
    let mut idx = 0;

    while idx < hazards.len() {
        if !player.alive {
            break;
        }
        let kind = hazards[idx].kind;
        let damaging = kind.is_damaging();
        if (damaging && player.invincible) || !player.bounds().overlaps(&hazards[idx].bounds()) {
            idx += 1;
            continue;
        }

        if damaging {
            let died = apply_hit(player, hazards[idx].vel.x, tuning);
            report.hits += 1;
            report.died |= died;
            log::debug!(
                "Hit by {} at x={:.1}, health now {}",
                kind.as_str(),
                hazards[idx].pos.x,
                player.health
            );

            match tuning.hazard(kind).contact {
                ContactPolicy::Destroy => {
                    // Hazard order carries no meaning
                    hazards.swap_remove(idx);
                    continue;
                }
                ContactPolicy::Rebound => {
                    hazards[idx].vel.x = -hazards[idx].vel.x;
                }
                ContactPolicy::Persist => {}
            }
        } else {
            heal(player, &mut hazards[idx], tuning, rng);
            report.heals += 1;
        }
        idx += 1;
    }

    decay_invincibility(player, &tuning.invincibility);
    report
}

/// Take one point of damage with knockback away from the hazard's travel
///
/// Returns true if this hit killed the player.
pub fn apply_hit(player: &mut Player, hazard_vx: f32, tuning: &Tuning) -> bool {
    let knockback = &tuning.knockback;

    player.health = player.health.saturating_sub(1);
    player.start_invincibility(&tuning.invincibility);

    let dir = if hazard_vx > 0.0 { -1.0 } else { 1.0 };
    player.vel = Vec2::new(knockback.horizontal * dir, -knockback.pop_up);

    if player.health == 0 {
        player.alive = false;
        player.vel.y = -knockback.death_pop;
        log::debug!("Player died");
        return true;
    }
    false
}

/// Restore one point of health and relaunch the ball
pub fn heal<R: Rng + ?Sized>(player: &mut Player, ball: &mut Hazard, tuning: &Tuning, rng: &mut R) {
    let relaunch = &tuning.hazard(ball.kind).relaunch;

    player.health = player.health.saturating_add(1).min(player.max_health);

    let speed = relaunch.sample(rng);
    ball.vel.x = if ball.vel.x > 0.0 { speed } else { -speed };
    ball.vel.y = -relaunch.sample(rng);
    log::debug!("Healed to {}", player.health);
}

/// Advance the invincibility blink by one tick
pub fn decay_invincibility(player: &mut Player, tuning: &InvincibilityTuning) {
    if !player.invincible {
        return;
    }
    player.blink_timer = player.blink_timer.saturating_sub(1);
    if player.blink_timer == 0 {
        player.blink_ticks_remaining = player.blink_ticks_remaining.saturating_sub(1);
        player.blink_timer = tuning.blink_timer;
        if player.blink_ticks_remaining == 0 {
            player.invincible = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::HazardKind;
    use crate::tuning::PlayerTuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn player_at(x: f32, y: f32) -> Player {
        let mut player = Player::new(&PlayerTuning::default());
        player.pos = Vec2::new(x, y);
        player
    }

    fn roller_at(x: f32, y: f32, vx: f32) -> Hazard {
        Hazard::new(HazardKind::GroundRoller, Vec2::new(x, y), 90.0, Vec2::new(vx, 0.0))
    }

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(overlaps(&a, &Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!overlaps(&a, &Rect::new(20.0, 0.0, 10.0, 10.0)));
        // Shared edge is not an overlap
        assert!(!overlaps(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!overlaps(&a, &Rect::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_hit_from_left_moving_roller() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut player = player_at(50.0, 430.0);
        let mut hazards = vec![roller_at(100.0, 490.0, -6.0)];

        let report = resolve(&mut player, &mut hazards, &tuning, &mut rng);
        assert_eq!(report.hits, 1);
        assert!(!report.died);
        assert_eq!(player.health, 2);
        assert!(player.invincible);
        assert_eq!(player.vel, Vec2::new(10.0, -8.0));
        // Default roller contact policy keeps the hazard
        assert_eq!(hazards.len(), 1);
    }

    #[test]
    fn test_knockback_opposes_hazard_travel() {
        let tuning = Tuning::default();
        let mut player = player_at(50.0, 430.0);
        apply_hit(&mut player, 6.0, &tuning);
        assert_eq!(player.vel.x, -10.0);
    }

    #[test]
    fn test_invincible_player_ignores_damage() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut player = player_at(50.0, 430.0);
        let mut hazards = vec![roller_at(100.0, 490.0, -6.0), roller_at(60.0, 490.0, 6.0)];

        let report = resolve(&mut player, &mut hazards, &tuning, &mut rng);
        assert_eq!(report.hits, 1, "second overlap in the same pass is absorbed");
        assert_eq!(player.health, 2);

        let report = resolve(&mut player, &mut hazards, &tuning, &mut rng);
        assert_eq!(report.hits, 0);
        assert_eq!(player.health, 2);
    }

    #[test]
    fn test_last_health_kills() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut player = player_at(50.0, 430.0);
        player.health = 1;
        let mut hazards = vec![roller_at(100.0, 490.0, -6.0)];

        let report = resolve(&mut player, &mut hazards, &tuning, &mut rng);
        assert!(report.died);
        assert_eq!(player.health, 0);
        assert!(!player.alive);
        assert_eq!(player.vel.y, -18.0);
    }

    #[test]
    fn test_contact_policies() {
        let mut tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);

        tuning.roller.contact = ContactPolicy::Destroy;
        let mut player = player_at(50.0, 430.0);
        let mut hazards = vec![roller_at(100.0, 490.0, -6.0)];
        resolve(&mut player, &mut hazards, &tuning, &mut rng);
        assert!(hazards.is_empty());

        tuning.roller.contact = ContactPolicy::Rebound;
        let mut player = player_at(50.0, 430.0);
        let mut hazards = vec![roller_at(100.0, 490.0, -6.0)];
        resolve(&mut player, &mut hazards, &tuning, &mut rng);
        assert_eq!(hazards[0].vel.x, 6.0);
    }

    #[test]
    fn test_heal_caps_and_relaunches() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut player = player_at(50.0, 430.0);
        player.health = 2;
        player.invincible = true;
        player.blink_ticks_remaining = 3;
        player.blink_timer = 5;
        let ball = Hazard::new(HazardKind::HealingBall, Vec2::new(80.0, 480.0), 80.0, Vec2::new(-5.0, 2.0));
        let mut hazards = vec![ball];

        let report = resolve(&mut player, &mut hazards, &tuning, &mut rng);
        assert_eq!(report.heals, 1, "healing applies during invincibility");
        assert_eq!(player.health, 3);
        assert_eq!(hazards.len(), 1);
        let vel = hazards[0].vel;
        assert!((-8.0..=-4.0).contains(&vel.x), "keeps direction: {vel:?}");
        assert!((-8.0..=-4.0).contains(&vel.y));

        // Already full
        hazards[0].pos = Vec2::new(80.0, 480.0);
        resolve(&mut player, &mut hazards, &tuning, &mut rng);
        assert_eq!(player.health, 3);
    }

    #[test]
    fn test_dead_player_skips_remaining_hazards() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut player = player_at(50.0, 430.0);
        player.health = 1;
        let ball = Hazard::new(HazardKind::HealingBall, Vec2::new(80.0, 480.0), 80.0, Vec2::ZERO);
        let mut hazards = vec![roller_at(100.0, 490.0, -6.0), ball];

        let report = resolve(&mut player, &mut hazards, &tuning, &mut rng);
        assert!(report.died);
        assert_eq!(report.heals, 0);
        assert_eq!(player.health, 0);
    }

    #[test]
    fn test_invincibility_lasts_blink_count_half_cycles() {
        let inv = InvincibilityTuning::default();
        let mut player = player_at(0.0, 0.0);
        player.start_invincibility(&inv);

        let total = inv.blink_timer * inv.blink_count;
        for _ in 0..total - 1 {
            decay_invincibility(&mut player, &inv);
            assert!(player.invincible);
        }
        decay_invincibility(&mut player, &inv);
        assert!(!player.invincible);
        assert_eq!(player.blink_ticks_remaining, 0);
    }
}
