//! Fixed-tick simulation loop
//!
//! [`Simulation`] owns every piece of mutable game state. Each call to
//! [`Simulation::tick`] advances exactly one logical tick and returns the
//! resulting scene.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::camera;
use super::collision;
use super::physics::{self, JumpKind};
use super::snapshot::SceneSnapshot;
use super::spawner::HazardSpawner;
use super::state::{GameState, Hazard, Player, World};
use crate::error::ConfigError;
use crate::input::InputIntent;
use crate::tuning::Tuning;

/// The whole game: world, player, hazards, and run state
#[derive(Debug, Clone)]
pub struct Simulation {
    tuning: Tuning,
    world: World,
    player: Player,
    hazards: Vec<Hazard>,
    spawner: HazardSpawner,
    state: GameState,
    /// Run seed for reproducibility
    seed: u64,
    rng: Pcg32,
    /// Ticks since the current run started
    time_ticks: u64,
    restarts: u32,
}

impl Simulation {
    /// Validate the tuning and world, then start a run
    pub fn new(tuning: Tuning, world: World, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;
        check_fits(&tuning, &world)?;

        let player = Player::new(&tuning.player);
        log::info!(
            "Simulation ready: viewport {}x{}, world width {:.0}, seed {}",
            world.viewport_width,
            world.viewport_height,
            world.world_width,
            seed
        );

        Ok(Self {
            tuning,
            world,
            player,
            hazards: Vec::new(),
            spawner: HazardSpawner::new(),
            state: GameState::Running,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            restarts: 0,
        })
    }

    /// Advance one tick and return the resulting scene
    pub fn tick(&mut self, intent: InputIntent) -> SceneSnapshot {
        self.advance(intent);
        self.snapshot()
    }

    /// Advance one tick without building a snapshot
    ///
    /// Running: physics, spawning, collisions, camera (in that order, so new
    /// hazards are placed against the previous tick's camera). Dying: the
    /// player falls under gravity until past the game-over line. Game over:
    /// only a restart request does anything.
    pub fn advance(&mut self, intent: InputIntent) {
        match self.state {
            GameState::GameOver => {
                if intent.restart_requested {
                    self.restart();
                }
            }
            GameState::Dying => {
                self.time_ticks += 1;
                physics::step_dying(&mut self.player, &self.tuning);
                let threshold = self.world.viewport_height + self.tuning.bounds.game_over_fall;
                if self.player.pos.y > threshold {
                    self.state = GameState::GameOver;
                    log::info!("Game over after {} ticks", self.time_ticks);
                }
            }
            GameState::Running => {
                self.time_ticks += 1;

                let jump = physics::step_player(&mut self.player, &intent, &self.world, &self.tuning);
                if jump == Some(JumpKind::Normal) {
                    log::trace!("Jump, {} left", self.player.jumps_remaining);
                }
                physics::step_hazards(&mut self.hazards, &self.world, &self.tuning);

                self.spawner
                    .tick(&mut self.hazards, &self.world, &self.tuning, &mut self.rng);

                let report = collision::resolve(
                    &mut self.player,
                    &mut self.hazards,
                    &self.tuning,
                    &mut self.rng,
                );
                if report.died {
                    self.state = GameState::Dying;
                    log::info!("Player out of health at tick {}", self.time_ticks);
                }

                camera::track(&mut self.world, &self.player);
            }
        }
    }

    /// Full reset to the start of a new run
    pub fn restart(&mut self) {
        self.restarts += 1;
        self.player.reset(&self.tuning.player);
        self.hazards.clear();
        self.spawner.reset();
        self.world.camera_x = 0.0;
        self.state = GameState::Running;
        self.time_ticks = 0;
        self.rng = Pcg32::seed_from_u64(self.seed.wrapping_add(self.restarts as u64));
        log::info!("Restarted (run {})", self.restarts + 1);
    }

    /// Adopt new viewport/world geometry (window resize)
    pub fn resize(&mut self, mut world: World) -> Result<(), ConfigError> {
        check_fits(&self.tuning, &world)?;
        world.camera_x = self.world.camera_x;
        self.world = world;
        let max_x = self.world.world_width - self.player.width;
        self.player.pos.x = self.player.pos.x.clamp(0.0, max_x);
        physics::fit_to_floor(&mut self.player, &mut self.hazards, &self.world, &self.tuning);
        camera::track(&mut self.world, &self.player);
        log::info!(
            "Resized to {}x{} (world width {:.0})",
            self.world.viewport_width,
            self.world.viewport_height,
            self.world.world_width
        );
        Ok(())
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            tick: self.time_ticks,
            state: self.state,
            camera_x: self.world.camera_x,
            viewport_width: self.world.viewport_width,
            viewport_height: self.world.viewport_height,
            world_width: self.world.world_width,
            ground_y: self.ground_y(),
            player: (&self.player).into(),
            hazards: self.hazards.iter().map(Into::into).collect(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn ground_y(&self) -> f32 {
        self.world
            .ground_y(self.player.height, self.tuning.physics.ground_offset)
    }
}

/// The player must fit inside both the world and the viewport height
fn check_fits(tuning: &Tuning, world: &World) -> Result<(), ConfigError> {
    if tuning.player.width > world.world_width {
        return Err(ConfigError::World(format!(
            "player width {} exceeds world width {}",
            tuning.player.width, world.world_width
        )));
    }
    if tuning.player.height + tuning.physics.ground_offset > world.viewport_height {
        return Err(ConfigError::World(format!(
            "player height {} plus ground offset does not fit viewport height {}",
            tuning.player.height, world.viewport_height
        )));
    }
    Ok(())
}
