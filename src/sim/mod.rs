//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed logical tick per call
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod physics;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, Rect, overlaps};
pub use physics::JumpKind;
pub use snapshot::{HazardPose, PlayerPose, SceneSnapshot};
pub use spawner::HazardSpawner;
pub use state::{GameState, Hazard, HazardKind, Player, World};
pub use tick::Simulation;
