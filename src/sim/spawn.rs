//! Procedural entity spawning
//!
//! Each category rolls an independent Bernoulli trial per tick, so an
//! obstacle and a coin can appear on the same tick. All draws go through the
//! session RNG, so the spawn stream is a pure function of the seed and the
//! current state - never of wall-clock time.

use rand::Rng;

use super::state::{Coin, GameState, Obstacle, ObstacleKind, PowerUp, PowerUpKind};
use crate::consts::*;

/// Obstacle spawn probability for the current speed: clutter thins out as
/// the pace rises, down to a floor
pub fn obstacle_rate(speed: f32) -> f64 {
    (OBSTACLE_BASE_RATE - speed as f64 * OBSTACLE_RATE_DECAY).max(OBSTACLE_MIN_RATE)
}

/// Roll the per-category spawn trials for this tick and insert whatever
/// comes up at the spawn horizon. Spawning never fails and the pool has no
/// cap; memory is bounded by eviction.
pub fn try_spawn(state: &mut GameState) {
    if state.rng.random_bool(obstacle_rate(state.speed)) {
        let obstacle = roll_obstacle(state);
        log::debug!(
            "spawn obstacle {:?} {:?} lane {} h {:.2}",
            obstacle.id,
            obstacle.kind,
            obstacle.lane,
            obstacle.height
        );
        state.pool.insert_obstacle(obstacle);
    }

    if state.rng.random_bool(COIN_RATE) {
        let lane = state.rng.random_range(0..LANE_COUNT);
        let rotation_phase = state.rng.random_range(0.0..std::f32::consts::TAU);
        let id = state.next_entity_id();
        state.pool.insert_coin(Coin {
            id,
            lane,
            z: SPAWN_DISTANCE,
            rotation_phase,
        });
    }

    if state.rng.random_bool(POWERUP_RATE) {
        let lane = state.rng.random_range(0..LANE_COUNT);
        let kind = match state.rng.random_range(0..3) {
            0 => PowerUpKind::SpeedBoost,
            1 => PowerUpKind::Shield,
            _ => PowerUpKind::Magnet,
        };
        let id = state.next_entity_id();
        log::debug!("spawn power-up {:?} {:?} lane {}", id, kind, lane);
        state.pool.insert_power_up(PowerUp {
            id,
            lane,
            z: SPAWN_DISTANCE,
            kind,
            duration_ticks: kind.duration_ticks(),
        });
    }
}

/// Draw an obstacle: kind uniform, height/width fixed or from a bounded
/// range per sub-type
fn roll_obstacle(state: &mut GameState) -> Obstacle {
    let lane = state.rng.random_range(0..LANE_COUNT);
    let kind = match state.rng.random_range(0..3) {
        0 => ObstacleKind::Hurdle,
        1 => ObstacleKind::Crate,
        _ => ObstacleKind::Overhang,
    };
    let (height, width) = match kind {
        ObstacleKind::Hurdle => (state.rng.random_range(0.6..1.2), 1.8),
        ObstacleKind::Crate => (1.0, 1.0),
        ObstacleKind::Overhang => (state.rng.random_range(1.8..2.6), 2.0),
    };
    let id = state.next_entity_id();
    Obstacle {
        id,
        lane,
        z: SPAWN_DISTANCE,
        kind,
        height,
        width,
    }
}
