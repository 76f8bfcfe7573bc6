//! Collision detection and rule-based resolution
//!
//! Broad phase is lane equality plus a longitudinal window around z = 0;
//! there is no volumetric contact resolution. `resolve` is pure: it reads
//! the player and pool and returns effects for the tick loop to apply, so
//! rules stay testable without a full session.

use super::player::PlayerState;
use super::pool::EntityPool;
use super::state::{EntityId, Obstacle, PowerUpKind};
use crate::consts::*;

/// A state mutation requested by collision resolution, applied immediately
/// and atomically within the same tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Add to the score
    Score(u64),
    /// Decrement lives
    LoseLife,
    /// The last life was spent
    GameOver,
    /// Remove a consumed or hit entity from the pool
    Consume(EntityId),
    /// Power-up activation token; downstream behavior is the host's concern
    Activate { kind: PowerUpKind, duration_ticks: u32 },
}

/// Whether an entity is close enough longitudinally to interact
#[inline]
fn in_window(z: f32) -> bool {
    z.abs() < COLLISION_WINDOW
}

/// Jumping clears obstacles strictly below the jump clearance
#[inline]
fn can_jump_over(player: &PlayerState, obstacle: &Obstacle) -> bool {
    player.is_jumping() && obstacle.height < JUMP_CLEARANCE
}

/// Sliding passes under obstacles at or above the slide clearance
#[inline]
fn can_slide_under(player: &PlayerState, obstacle: &Obstacle) -> bool {
    player.is_sliding() && obstacle.height >= SLIDE_CLEARANCE
}

/// Evaluate the player against every active entity in their lane within the
/// collision window.
///
/// Obstacle hits and coin/power-up consumption are independent: the player
/// can be hit and collect in the same tick. `lives` is the pre-resolution
/// count; the GameOver effect is emitted when the hits in this tick exhaust
/// it.
pub fn resolve(player: &PlayerState, pool: &EntityPool, lives: u8) -> Vec<Effect> {
    let mut effects = Vec::new();
    let mut lives_left = lives;

    for obstacle in pool.obstacles() {
        if lives_left == 0 {
            break;
        }
        if obstacle.lane != player.lane || !in_window(obstacle.z) {
            continue;
        }
        if can_jump_over(player, obstacle) || can_slide_under(player, obstacle) {
            // Defeated: the obstacle stays on the track and scrolls away
            continue;
        }
        effects.push(Effect::Consume(obstacle.id));
        effects.push(Effect::LoseLife);
        lives_left = lives_left.saturating_sub(1);
    }

    for coin in pool.coins() {
        if coin.lane == player.lane && in_window(coin.z) {
            effects.push(Effect::Consume(coin.id));
            effects.push(Effect::Score(COIN_SCORE));
        }
    }

    for power_up in pool.power_ups() {
        if power_up.lane == player.lane && in_window(power_up.z) {
            effects.push(Effect::Consume(power_up.id));
            effects.push(Effect::Score(POWERUP_SCORE));
            effects.push(Effect::Activate {
                kind: power_up.kind,
                duration_ticks: power_up.duration_ticks,
            });
        }
    }

    // GameOver goes last so same-tick pickups still land before the final
    // score is reported
    if lives > 0 && lives_left == 0 {
        effects.push(Effect::GameOver);
    }

    effects
}
