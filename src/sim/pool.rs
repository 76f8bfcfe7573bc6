//! Entity pool: owns the obstacle/coin/power-up collections
//!
//! Entities scroll from negative z toward the player at z = 0 and past the
//! eviction threshold behind them. Eviction is routine garbage collection of
//! the moving world, never an error.

use serde::{Deserialize, Serialize};

use super::state::{Coin, EntityId, Obstacle, PowerUp};
use crate::consts::*;

/// Coin spin rate (radians/sec), exposed to the renderer via rotation_phase
const COIN_SPIN_RATE: f32 = 4.0;

/// Which collection an entity belonged to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityCategory {
    Obstacle,
    Coin,
    PowerUp,
}

/// The three entity collections, insertion-ordered (IDs ascend)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityPool {
    obstacles: Vec<Obstacle>,
    coins: Vec<Coin>,
    power_ups: Vec<PowerUp>,
}

impl EntityPool {
    /// Scroll every entity toward the player by `speed * RUN_SPEED * dt`
    pub fn advance(&mut self, dt: f32, speed: f32) {
        let dz = speed * RUN_SPEED * dt;
        for obstacle in &mut self.obstacles {
            obstacle.z += dz;
        }
        for coin in &mut self.coins {
            coin.z += dz;
            coin.rotation_phase = (coin.rotation_phase + COIN_SPIN_RATE * dt) % std::f32::consts::TAU;
        }
        for power_up in &mut self.power_ups {
            power_up.z += dz;
        }
    }

    /// Drop everything that has scrolled past the eviction threshold.
    /// Returns how many entities were evicted.
    pub fn evict(&mut self) -> usize {
        let before = self.len();
        self.obstacles.retain(|o| o.z <= EVICT_Z);
        self.coins.retain(|c| c.z <= EVICT_Z);
        self.power_ups.retain(|p| p.z <= EVICT_Z);
        before - self.len()
    }

    pub fn insert_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    pub fn insert_coin(&mut self, coin: Coin) {
        self.coins.push(coin);
    }

    pub fn insert_power_up(&mut self, power_up: PowerUp) {
        self.power_ups.push(power_up);
    }

    /// Remove a consumed entity by ID, reporting which collection held it
    pub fn remove(&mut self, id: EntityId) -> Option<EntityCategory> {
        if let Some(i) = self.obstacles.iter().position(|o| o.id == id) {
            self.obstacles.remove(i);
            return Some(EntityCategory::Obstacle);
        }
        if let Some(i) = self.coins.iter().position(|c| c.id == id) {
            self.coins.remove(i);
            return Some(EntityCategory::Coin);
        }
        if let Some(i) = self.power_ups.iter().position(|p| p.id == id) {
            self.power_ups.remove(i);
            return Some(EntityCategory::PowerUp);
        }
        None
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn power_ups(&self) -> &[PowerUp] {
        &self.power_ups
    }

    pub fn len(&self) -> usize {
        self.obstacles.len() + self.coins.len() + self.power_ups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.coins.clear();
        self.power_ups.clear();
    }
}
