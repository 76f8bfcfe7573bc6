//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (owned by the game state)
//! - Stable iteration order (by entity ID, insertion-ordered)
//! - No rendering or platform dependencies
//!
//! Tick pipeline: progression -> entity advance -> eviction -> spawn ->
//! collision resolve -> effect application. The ordering is fixed so an
//! entity can never be both evicted and scored in the same tick.

pub mod collision;
pub mod player;
pub mod pool;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Effect, resolve};
pub use player::{Action, LaneShift, PlayerState};
pub use pool::{EntityCategory, EntityPool};
pub use progression::PeriodTransition;
pub use state::{
    Coin, EntityId, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, PowerUp, PowerUpKind,
    Snapshot,
};
pub use tick::{TickInput, tick};
