//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Timers on the simulation clock, never the host's
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timers;

pub use collision::{Aabb, overlap};
pub use entity::{Emotion, Entity, EntityId, EntityKind, EntityStore, Heading};
pub use state::{GameEvent, GameState, LossCause, Player, RoundPhase};
pub use tick::{TickInput, autopilot_input, tick, vertical_step};
pub use timers::{Scheduler, TimerId, TimerKind};
