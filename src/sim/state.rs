//! Game state and core simulation types
//!
//! Everything needed to reproduce a run lives here; the whole state
//! (including the RNG) serializes, so a mid-run snapshot resumes identically.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::player::PlayerState;
use super::pool::EntityPool;
use crate::consts::*;
use crate::lane_world_pos;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start command
    Ready,
    /// Active gameplay
    Playing,
    /// Ticking suspended; no state mutation until resumed
    Paused,
    /// Run ended; state frozen until restart
    GameOver,
}

/// Opaque entity identifier, unique within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Obstacle sub-types
///
/// Hurdles are low (jump over them), overhangs hang above the track (slide
/// under them), crates sit at exactly slide-clearance height so either
/// action defeats them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Hurdle,
    Crate,
    Overhang,
}

/// A track obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: EntityId,
    pub lane: usize,
    /// Longitudinal position; negative = ahead of the player, 0 = player
    pub z: f32,
    pub kind: ObstacleKind,
    pub height: f32,
    pub width: f32,
}

impl Obstacle {
    /// World position for the renderer
    pub fn world_pos(&self) -> Vec3 {
        lane_world_pos(self.lane, self.z, 0.0)
    }
}

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: EntityId,
    pub lane: usize,
    pub z: f32,
    /// Spin phase in [0, tau), advanced each tick for the renderer
    pub rotation_phase: f32,
}

impl Coin {
    pub fn world_pos(&self) -> Vec3 {
        lane_world_pos(self.lane, self.z, 0.5)
    }
}

/// Power-up sub-types
///
/// The core scores the pickup and emits an activation token with a duration;
/// the surrounding game decides what the token does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    SpeedBoost,
    Shield,
    Magnet,
}

impl PowerUpKind {
    /// Activation duration in ticks
    pub fn duration_ticks(&self) -> u32 {
        match self {
            PowerUpKind::SpeedBoost => 150,
            PowerUpKind::Shield => 240,
            PowerUpKind::Magnet => 300,
        }
    }
}

/// A power-up capsule on the track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: EntityId,
    pub lane: usize,
    pub z: f32,
    pub kind: PowerUpKind,
    pub duration_ticks: u32,
}

impl PowerUp {
    pub fn world_pos(&self) -> Vec3 {
        lane_world_pos(self.lane, self.z, 0.5)
    }
}

/// Per-tick feedback for the presentation layer
///
/// Drained by the host via [`GameState::take_events`]; not part of the
/// replayable state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    CoinCollected { id: EntityId },
    PowerUpActivated { kind: PowerUpKind, duration_ticks: u32 },
    ObstacleHit { lives_left: u8 },
    PeriodChanged { from: usize, to: usize },
    GameOver { score: u64, distance: f32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Session RNG; every random draw in the sim goes through this
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Score; monotone non-decreasing within a session
    pub score: u64,
    /// Meters traveled
    pub distance: f32,
    /// Current speed multiplier, clamped to [1, SPEED_CAP]
    pub speed: f32,
    /// Remaining lives
    pub lives: u8,
    /// Active environment theme index
    pub current_period: usize,
    /// Nonzero while the period-transition flag is raised
    pub transition_ticks_left: u32,
    /// Simulation tick counter
    pub tick_count: u64,
    /// Player state
    pub player: PlayerState,
    /// World entities
    pub pool: EntityPool,
    /// Pending presentation events (drained each frame)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh session in the Ready phase
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Ready,
            score: 0,
            distance: 0.0,
            speed: 1.0,
            lives: INITIAL_LIVES,
            current_period: 0,
            transition_ticks_left: 0,
            tick_count: 0,
            player: PlayerState::new(),
            pool: EntityPool::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        EntityId(id)
    }

    /// Hard reset: atomically replace the whole session and go straight to
    /// Playing. The new seed is derived from the old one so successive runs
    /// differ but the session chain stays reproducible.
    pub fn restart(&mut self) {
        let next_seed = self
            .seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let mut fresh = GameState::new(next_seed);
        fresh.phase = GamePhase::Playing;
        *self = fresh;
    }

    /// Whether the period-transition display flag is raised
    pub fn is_transitioning(&self) -> bool {
        self.transition_ticks_left > 0
    }

    /// Immutable read model, polled once per rendered frame
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            score: self.score,
            distance: self.distance,
            speed: self.speed,
            lives: self.lives,
            current_period: self.current_period,
            is_transitioning: self.is_transitioning(),
            tick_count: self.tick_count,
            player: &self.player,
            obstacles: self.pool.obstacles(),
            coins: self.pool.coins(),
            power_ups: self.pool.power_ups(),
        }
    }

    /// Drain pending presentation events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Immutable view of the session for the presentation layer
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub score: u64,
    pub distance: f32,
    pub speed: f32,
    pub lives: u8,
    pub current_period: usize,
    pub is_transitioning: bool,
    pub tick_count: u64,
    pub player: &'a PlayerState,
    pub obstacles: &'a [Obstacle],
    pub coins: &'a [Coin],
    pub power_ups: &'a [PowerUp],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_ready() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, INITIAL_LIVES);
        assert_eq!(state.speed, 1.0);
        assert!(state.pool.is_empty());
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut state = GameState::new(7);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::new(7);
        state.score = 500;
        state.distance = 1234.0;
        state.lives = 0;
        state.phase = GamePhase::GameOver;
        let old_seed = state.seed;

        state.restart();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.distance, 0.0);
        assert_eq!(state.lives, INITIAL_LIVES);
        assert!(state.pool.is_empty());
        assert_ne!(state.seed, old_seed);
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let state = GameState::new(99);
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, state.seed);
        assert_eq!(back.phase, state.phase);
        assert_eq!(back.rng, state.rng);
    }
}
