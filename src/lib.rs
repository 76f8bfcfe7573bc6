//! Lane Rush - An endless lane-runner arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player state machine, spawning,
//!   collisions, difficulty/environment progression)
//!
//! Rendering, camera easing, HUD, and input capture are host concerns; the
//! host drives [`sim::tick`] at a fixed cadence and polls
//! [`sim::GameState::snapshot`] once per rendered frame.

pub mod sim;

pub use sim::{GameEvent, GamePhase, GameState, TickInput, tick};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (30 Hz)
    pub const SIM_DT: f32 = 1.0 / 30.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Number of parallel lanes, indexed left to right
    pub const LANE_COUNT: usize = 3;
    /// World-space width of one lane (meters)
    pub const LANE_WIDTH: f32 = 2.0;

    /// Jump duration (seconds); fixed regardless of game speed
    pub const JUMP_DURATION: f32 = 0.6;
    /// Slide duration (seconds)
    pub const SLIDE_DURATION: f32 = 0.5;
    /// Peak height of the jump arc (presentation only)
    pub const JUMP_HEIGHT: f32 = 1.2;

    /// Meters per second of track scroll at speed 1.0
    pub const RUN_SPEED: f32 = 10.0;
    /// Speed ceiling
    pub const SPEED_CAP: f32 = 5.0;
    /// Distance over which speed climbs by one unit
    pub const SPEED_DISTANCE_DIVISOR: f32 = 500.0;

    /// Entities spawn this far ahead of the player (negative z = ahead)
    pub const SPAWN_DISTANCE: f32 = -60.0;
    /// Entities past this z (behind the player) are evicted
    pub const EVICT_Z: f32 = 6.0;
    /// Longitudinal half-window around z = 0 where collisions resolve
    pub const COLLISION_WINDOW: f32 = 1.2;

    /// Jumping clears obstacles strictly below this height
    pub const JUMP_CLEARANCE: f32 = 1.5;
    /// Sliding passes under obstacles at or above this height
    pub const SLIDE_CLEARANCE: f32 = 1.0;

    /// Starting lives
    pub const INITIAL_LIVES: u8 = 3;
    /// Score per coin
    pub const COIN_SCORE: u64 = 10;
    /// Score per power-up capsule
    pub const POWERUP_SCORE: u64 = 50;

    /// Obstacle spawn probability per tick at speed 0
    pub const OBSTACLE_BASE_RATE: f64 = 0.075;
    /// Obstacle rate lost per unit of speed (clutter thins out as pace rises)
    pub const OBSTACLE_RATE_DECAY: f64 = 0.008;
    /// Obstacle rate floor
    pub const OBSTACLE_MIN_RATE: f64 = 0.03;
    /// Coin spawn probability per tick
    pub const COIN_RATE: f64 = 0.05;
    /// Power-up spawn probability per tick
    pub const POWERUP_RATE: f64 = 0.004;

    /// Number of environment themes the track cycles through
    pub const PERIOD_COUNT: usize = 4;
    /// Distance units per environment period
    pub const PERIOD_LENGTH: f32 = 300.0;
    /// Ticks the transition flag stays raised after a period change
    pub const TRANSITION_TICKS: u32 = 45;
}

/// World-space x coordinate of a lane's centerline
#[inline]
pub fn lane_center_x(lane: usize) -> f32 {
    let half = (consts::LANE_COUNT as f32 - 1.0) / 2.0;
    (lane as f32 - half) * consts::LANE_WIDTH
}

/// Build a world position from a lane, longitudinal z, and height
#[inline]
pub fn lane_world_pos(lane: usize, z: f32, y: f32) -> Vec3 {
    Vec3::new(lane_center_x(lane), y, z)
}
