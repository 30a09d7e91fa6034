//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, constants are per tick
//! - Seeded RNG only
//! - Stable obstacle order (oldest first)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod input;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CrashCause, first_hit, out_of_bounds};
pub use entity::{Entity, EntityKind, ObstacleSide, wrap_background};
pub use input::{Command, Flow, apply_command};
pub use spawner::{should_spawn, spawn_pair};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
