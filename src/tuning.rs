//! Data-driven game balance
//!
//! Every physics and spawning constant lives here. The built-in profiles
//! reproduce the game's variants (plain wall-jumper, durian dodger, and the
//! falling-hazard gauntlet); JSON overrides are validated before use.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::input::TouchScheme;
use crate::sim::HazardKind;

/// Built-in tuning profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Profile {
    /// Wall-jumping runner, no hazards
    Classic,
    /// Rolling durians plus healing balls
    #[default]
    Durian,
    /// Falling and rolling hazards, heavier gravity
    Gauntlet,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Classic => "classic",
            Profile::Durian => "durian",
            Profile::Gauntlet => "gauntlet",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "doodle" => Some(Profile::Classic),
            "durian" => Some(Profile::Durian),
            "gauntlet" => Some(Profile::Gauntlet),
            _ => None,
        }
    }
}

/// Uniform sampling range `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl SpeedRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Draw a magnitude uniformly from the range
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.random_range(self.min..=self.max)
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::invalid(field, "range bounds must be finite"));
        }
        if self.min < 0.0 {
            return Err(ConfigError::invalid(field, "range minimum must be >= 0"));
        }
        if self.min > self.max {
            return Err(ConfigError::invalid(
                field,
                format!("range is inverted ({} > {})", self.min, self.max),
            ));
        }
        Ok(())
    }
}

/// Player kinematics (units per tick / per tick²)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub gravity: f32,
    pub jump_force: f32,
    pub wall_jump_force: f32,
    /// Horizontal push away from the wall on a wall jump
    pub wall_jump_push: f32,
    pub move_accel: f32,
    pub air_accel: f32,
    pub max_speed: f32,
    /// Ground friction multiplier applied when there is no move intent
    pub friction: f32,
    /// Gap between the player's feet and the bottom of the viewport
    pub ground_offset: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            jump_force: 16.0,
            wall_jump_force: 14.0,
            wall_jump_push: 6.0,
            move_accel: 0.6,
            air_accel: 0.4,
            max_speed: 7.0,
            friction: 0.8,
            ground_offset: 20.0,
        }
    }
}

/// Player body and resources
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub start_x: f32,
    pub start_y: f32,
    pub width: f32,
    pub height: f32,
    pub max_jumps: u8,
    pub max_health: u8,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            start_x: 50.0,
            start_y: 200.0,
            width: 100.0,
            height: 150.0,
            max_jumps: 2,
            max_health: 3,
        }
    }
}

/// Shared spawn gate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Ticks between spawn attempts
    pub interval: u32,
    /// Chance a damaging spawn is a dropper when droppers and rollers are both enabled
    pub drop_chance: f64,
    /// Distance beyond the viewport edge at which side spawns appear
    pub side_offset: f32,
    /// Height above the viewport top at which droppers appear
    pub drop_height: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            interval: 160,
            drop_chance: 0.45,
            side_offset: 150.0,
            drop_height: 50.0,
        }
    }
}

/// What happens to a damaging hazard after it hits the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ContactPolicy {
    /// Removed from the world immediately
    Destroy,
    /// Horizontal velocity reversed, stays in the world
    Rebound,
    /// Keeps going untouched
    #[default]
    Persist,
}

/// Per-kind hazard settings (overrides must give every field)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardTuning {
    pub enabled: bool,
    /// Maximum live population of this kind
    pub cap: usize,
    pub size: f32,
    /// Horizontal speed magnitude on spawn
    pub speed: SpeedRange,
    /// Upward launch magnitude on spawn
    pub launch_vy: SpeedRange,
    /// Re-launch magnitudes after touching the player (healing kinds)
    pub relaunch: SpeedRange,
    pub contact: ContactPolicy,
}

impl HazardTuning {
    fn roller() -> Self {
        Self {
            enabled: true,
            cap: 2,
            size: 90.0,
            speed: SpeedRange::new(5.0, 7.0),
            launch_vy: SpeedRange::new(0.0, 0.0),
            relaunch: SpeedRange::new(0.0, 0.0),
            contact: ContactPolicy::Persist,
        }
    }

    fn dropper() -> Self {
        Self {
            enabled: false,
            cap: 2,
            size: 70.0,
            speed: SpeedRange::new(0.5, 2.5),
            launch_vy: SpeedRange::new(0.0, 0.0),
            relaunch: SpeedRange::new(0.0, 0.0),
            contact: ContactPolicy::Destroy,
        }
    }

    fn healer() -> Self {
        Self {
            enabled: true,
            cap: 2,
            size: 80.0,
            speed: SpeedRange::new(4.0, 7.0),
            launch_vy: SpeedRange::new(2.0, 5.0),
            relaunch: SpeedRange::new(4.0, 8.0),
            contact: ContactPolicy::Persist,
        }
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }
        if self.cap == 0 {
            return Err(ConfigError::invalid(field, "enabled hazard needs a cap > 0"));
        }
        if !(self.size > 0.0) {
            return Err(ConfigError::invalid(field, "size must be > 0"));
        }
        self.speed.validate(field)?;
        self.launch_vy.validate(field)?;
        self.relaunch.validate(field)
    }
}

/// Post-hit invincibility blink
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InvincibilityTuning {
    /// Ticks per blink half-cycle
    pub blink_timer: u32,
    /// Number of half-cycles
    pub blink_count: u32,
}

impl Default for InvincibilityTuning {
    fn default() -> Self {
        Self {
            blink_timer: 10,
            blink_count: 6,
        }
    }
}

/// Hit reactions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnockbackTuning {
    pub horizontal: f32,
    pub pop_up: f32,
    /// Upward impulse when the final hit kills the player
    pub death_pop: f32,
}

impl Default for KnockbackTuning {
    fn default() -> Self {
        Self {
            horizontal: 10.0,
            pop_up: 8.0,
            death_pop: 18.0,
        }
    }
}

/// Despawn and game-over margins
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsTuning {
    pub despawn_x: f32,
    pub despawn_y: f32,
    /// Distance below the viewport a dying player falls before game over
    pub game_over_fall: f32,
}

impl Default for BoundsTuning {
    fn default() -> Self {
        Self {
            despawn_x: 400.0,
            despawn_y: 300.0,
            game_over_fall: 200.0,
        }
    }
}

/// Variant switches
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FeatureFlags {
    pub wall_jump: bool,
    pub touch: TouchScheme,
}

/// Complete tuning set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub physics: PhysicsTuning,
    pub player: PlayerTuning,
    pub spawn: SpawnTuning,
    pub roller: HazardTuning,
    pub dropper: HazardTuning,
    pub healer: HazardTuning,
    pub invincibility: InvincibilityTuning,
    pub knockback: KnockbackTuning,
    pub bounds: BoundsTuning,
    pub features: FeatureFlags,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::durian()
    }
}

impl Tuning {
    /// LocalStorage key for the override JSON
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "durian_dash_tuning";

    /// Rolling durians and healing balls on flat ground
    pub fn durian() -> Self {
        Self {
            physics: PhysicsTuning::default(),
            player: PlayerTuning::default(),
            spawn: SpawnTuning::default(),
            roller: HazardTuning::roller(),
            dropper: HazardTuning::dropper(),
            healer: HazardTuning::healer(),
            invincibility: InvincibilityTuning::default(),
            knockback: KnockbackTuning::default(),
            bounds: BoundsTuning::default(),
            features: FeatureFlags::default(),
        }
    }

    /// Wall-jumping runner with no hazards
    pub fn classic() -> Self {
        let mut tuning = Self::durian();
        tuning.roller.enabled = false;
        tuning.healer.enabled = false;
        tuning.features.wall_jump = true;
        tuning.features.touch = TouchScheme::SplitScreen;
        tuning
    }

    /// Droppers and rollers under heavier gravity
    pub fn gauntlet() -> Self {
        let mut tuning = Self::durian();
        tuning.physics.gravity = 1.0;
        tuning.physics.jump_force = 18.0;
        tuning.spawn.interval = 120;
        tuning.roller.contact = ContactPolicy::Destroy;
        tuning.dropper.enabled = true;
        tuning.healer.cap = 1;
        tuning.features.wall_jump = true;
        tuning
    }

    pub fn from_profile(profile: Profile) -> Self {
        match profile {
            Profile::Classic => Self::classic(),
            Profile::Durian => Self::durian(),
            Profile::Gauntlet => Self::gauntlet(),
        }
    }

    /// Look up a built-in profile by name
    pub fn profile(name: &str) -> Result<Self, ConfigError> {
        Profile::from_str(name)
            .map(Self::from_profile)
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))
    }

    /// Parse a JSON override (missing fields take durian defaults) and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Settings for a hazard kind
    pub fn hazard(&self, kind: HazardKind) -> &HazardTuning {
        match kind {
            HazardKind::GroundRoller => &self.roller,
            HazardKind::FallingBouncer => &self.dropper,
            HazardKind::HealingBall => &self.healer,
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;
        for (field, value) in [
            ("physics.gravity", p.gravity),
            ("physics.jump_force", p.jump_force),
            ("physics.move_accel", p.move_accel),
            ("physics.air_accel", p.air_accel),
            ("physics.max_speed", p.max_speed),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::invalid(field, format!("must be > 0, got {value}")));
            }
        }
        if self.features.wall_jump {
            for (field, value) in [
                ("physics.wall_jump_force", p.wall_jump_force),
                ("physics.wall_jump_push", p.wall_jump_push),
            ] {
                if !(value.is_finite() && value > 0.0) {
                    return Err(ConfigError::invalid(field, format!("must be > 0, got {value}")));
                }
            }
        }
        if !(p.friction > 0.0 && p.friction <= 1.0) {
            return Err(ConfigError::invalid("physics.friction", "must be in (0, 1]"));
        }
        if !(p.ground_offset.is_finite() && p.ground_offset >= 0.0) {
            return Err(ConfigError::invalid("physics.ground_offset", "must be >= 0"));
        }

        let pl = &self.player;
        if !(pl.width > 0.0 && pl.height > 0.0) {
            return Err(ConfigError::invalid("player", "width and height must be > 0"));
        }
        if !(pl.start_x.is_finite() && pl.start_y.is_finite()) {
            return Err(ConfigError::invalid("player", "start position must be finite"));
        }
        if pl.max_jumps == 0 {
            return Err(ConfigError::invalid("player.max_jumps", "must be >= 1"));
        }
        if pl.max_health == 0 {
            return Err(ConfigError::invalid("player.max_health", "must be >= 1"));
        }

        let s = &self.spawn;
        if s.interval == 0 {
            return Err(ConfigError::invalid("spawn.interval", "must be >= 1 tick"));
        }
        if !(0.0..=1.0).contains(&s.drop_chance) {
            return Err(ConfigError::invalid("spawn.drop_chance", "must be in [0, 1]"));
        }
        if !(s.side_offset >= 0.0 && s.side_offset < self.bounds.despawn_x) {
            return Err(ConfigError::invalid(
                "spawn.side_offset",
                "must be >= 0 and inside the horizontal despawn margin",
            ));
        }
        if !(s.drop_height >= 0.0 && s.drop_height < self.bounds.despawn_y) {
            return Err(ConfigError::invalid(
                "spawn.drop_height",
                "must be >= 0 and inside the vertical despawn margin",
            ));
        }

        self.roller.validate("roller")?;
        self.dropper.validate("dropper")?;
        self.healer.validate("healer")?;

        if self.invincibility.blink_timer == 0 || self.invincibility.blink_count == 0 {
            return Err(ConfigError::invalid(
                "invincibility",
                "blink timer and count must be >= 1",
            ));
        }

        let k = &self.knockback;
        if !(k.horizontal >= 0.0 && k.pop_up >= 0.0 && k.death_pop >= 0.0) {
            return Err(ConfigError::invalid("knockback", "magnitudes must be >= 0"));
        }

        let b = &self.bounds;
        if !(b.despawn_x > 0.0 && b.despawn_y > 0.0 && b.game_over_fall >= 0.0) {
            return Err(ConfigError::invalid("bounds", "margins must be positive"));
        }
        Ok(())
    }

    /// Load the override from LocalStorage, falling back to defaults (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning override from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {e}"),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_validate() {
        for profile in [Profile::Classic, Profile::Durian, Profile::Gauntlet] {
            let tuning = Tuning::from_profile(profile);
            assert!(tuning.validate().is_ok(), "{} should validate", profile.as_str());
        }
    }

    #[test]
    fn test_default_is_durian() {
        let tuning = Tuning::default();
        assert!(tuning.roller.enabled);
        assert!(tuning.healer.enabled);
        assert!(!tuning.dropper.enabled);
        assert!(!tuning.features.wall_jump);
        assert_eq!(tuning.spawn.interval, 160);
    }

    #[test]
    fn test_profile_lookup() {
        assert!(Tuning::profile("Gauntlet").unwrap().dropper.enabled);
        assert!(Tuning::profile("doodle").unwrap().features.wall_jump);
        assert!(matches!(
            Tuning::profile("nope"),
            Err(ConfigError::UnknownProfile(_))
        ));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut tuning = Tuning::default();
        tuning.spawn.interval = 0;
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::Invalid { field: "spawn.interval", .. })
        ));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut tuning = Tuning::default();
        tuning.roller.speed = SpeedRange::new(7.0, 5.0);
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_enabled_kind_without_cap_rejected() {
        let mut tuning = Tuning::default();
        tuning.healer.cap = 0;
        assert!(tuning.validate().is_err());

        // Disabled kinds are not checked
        tuning.healer.enabled = false;
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_friction_domain() {
        let mut tuning = Tuning::default();
        tuning.physics.friction = 1.5;
        assert!(tuning.validate().is_err());
        tuning.physics.friction = 0.0;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_from_json_partial_override() {
        let tuning = Tuning::from_json(r#"{ "physics": { "gravity": 1.0 }, "features": { "wall_jump": true } }"#)
            .unwrap();
        assert_eq!(tuning.physics.gravity, 1.0);
        assert_eq!(tuning.physics.jump_force, 16.0);
        assert!(tuning.features.wall_jump);
        assert_eq!(tuning.player.max_health, 3);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "spawn": { "interval": 0 } }"#),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_speed_range_sample_within_bounds() {
        use rand::SeedableRng;
        let mut rng = rand_pcg::Pcg32::seed_from_u64(7);
        let range = SpeedRange::new(4.0, 8.0);
        for _ in 0..100 {
            let v = range.sample(&mut rng);
            assert!((4.0..=8.0).contains(&v));
        }
        let fixed = SpeedRange::new(0.0, 0.0);
        assert_eq!(fixed.sample(&mut rng), 0.0);
    }
}
