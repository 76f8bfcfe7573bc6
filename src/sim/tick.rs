//! Fixed timestep simulation tick
//!
//! One call advances the whole world by a single synchronous unit of work:
//! command handling, player timers, progression, entity scroll/eviction,
//! spawning, and collision resolution, in that order. The shared state is
//! owned by the caller and never mutated from anywhere else.

use super::collision::{self, Effect};
use super::player::LaneShift;
use super::pool::EntityCategory;
use super::progression;
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (one-shot flags, cleared by the host
/// after each processed tick)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Shift one lane left
    pub left: bool,
    /// Shift one lane right
    pub right: bool,
    /// Start a jump
    pub jump: bool,
    /// Start a slide
    pub slide: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start the session (from Ready)
    pub start: bool,
    /// Hard reset and start a new run (any phase)
    pub restart: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.restart {
        log::info!("restart: seed {} -> new run", state.seed);
        state.restart();
        // The fresh run begins ticking on the next invocation; a reset is
        // never interleaved with a partial tick
        return;
    }

    if input.start && state.phase == GamePhase::Ready {
        log::info!("session start, seed {}", state.seed);
        state.phase = GamePhase::Playing;
    }

    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    // Paused suspends everything, including timers; GameOver freezes the
    // state until restart; Ready waits for the start command
    if state.phase != GamePhase::Playing {
        return;
    }

    state.tick_count += 1;

    // Movement-input validation: requests are ordinary input races and are
    // silently absorbed when they conflict
    if input.left {
        state.player.request_lane_change(LaneShift::Left);
    }
    if input.right {
        state.player.request_lane_change(LaneShift::Right);
    }
    if input.jump {
        state.player.request_jump();
    }
    if input.slide {
        state.player.request_slide();
    }
    state.player.advance(dt);

    if let Some(transition) = progression::advance(state, dt) {
        log::info!(
            "period transition {} -> {} at {:.0}m",
            transition.from,
            transition.to,
            state.distance
        );
        state.events.push(GameEvent::PeriodChanged {
            from: transition.from,
            to: transition.to,
        });
    }

    state.pool.advance(dt, state.speed);
    state.pool.evict();
    spawn::try_spawn(state);

    let score_before = state.score;
    let effects = collision::resolve(&state.player, &state.pool, state.lives);
    apply_effects(state, effects);

    debug_assert!(state.score >= score_before, "score must never decrease");
    debug_assert!(!(state.player.is_jumping() && state.player.is_sliding()));
}

/// Apply collision effects to the state, immediately and atomically within
/// the tick, emitting presentation events as they land
fn apply_effects(state: &mut GameState, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::Score(amount) => state.score += amount,
            Effect::Consume(id) => match state.pool.remove(id) {
                Some(EntityCategory::Coin) => {
                    state.events.push(GameEvent::CoinCollected { id });
                }
                Some(EntityCategory::Obstacle) | Some(EntityCategory::PowerUp) => {}
                None => debug_assert!(false, "consume of unknown entity {id:?}"),
            },
            Effect::LoseLife => {
                state.lives = state.lives.saturating_sub(1);
                log::debug!("obstacle hit, {} lives left", state.lives);
                state.events.push(GameEvent::ObstacleHit {
                    lives_left: state.lives,
                });
            }
            Effect::GameOver => {
                state.phase = GamePhase::GameOver;
                log::info!(
                    "game over: score {} distance {:.0}m",
                    state.score,
                    state.distance
                );
                state.events.push(GameEvent::GameOver {
                    score: state.score,
                    distance: state.distance,
                });
            }
            Effect::Activate {
                kind,
                duration_ticks,
            } => {
                state.events.push(GameEvent::PowerUpActivated {
                    kind,
                    duration_ticks,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Coin, Obstacle, ObstacleKind};

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        state
    }

    #[test]
    fn test_ready_state_ignores_movement() {
        let mut state = GameState::new(1);
        let input = TickInput {
            left: true,
            jump: true,
            ..Default::default()
        };
        let lane = state.player.lane;
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.player.lane, lane);
        assert!(!state.player.is_jumping());
        assert_eq!(state.tick_count, 0);
    }

    #[test]
    fn test_start_then_pause_toggle() {
        let mut state = started(1);
        assert_eq!(state.phase, GamePhase::Playing);

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        // Nothing at all moves while paused
        let frozen = state.clone();
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.tick_count, frozen.tick_count);
        assert_eq!(state.distance, frozen.distance);

        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_pause_freezes_action_timers() {
        let mut state = started(1);
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump, SIM_DT);
        assert!(state.player.is_jumping());
        let mid_air = state.player.action;

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, SIM_DT);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        // The jump timer did not move while paused
        assert_eq!(state.player.action, mid_air);

        // Resume (this tick advances the timer once) and let the jump run
        // out: it still takes its full duration, none of it spent paused
        tick(&mut state, &pause, SIM_DT);
        let mut after_resume = 1u32;
        while state.player.is_jumping() {
            tick(&mut state, &TickInput::default(), SIM_DT);
            after_resume += 1;
            assert!(after_resume < 100);
        }
        // One advancement happened on the tick that started the jump
        let total = 1 + after_resume;
        assert_eq!(total, (JUMP_DURATION / SIM_DT).round() as u32);
    }

    #[test]
    fn test_distance_accumulates_with_speed() {
        let mut state = started(1);
        let start_ticks = state.tick_count;
        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.tick_count, start_ticks + 100);
        // distance is the integral of speed * RUN_SPEED; speed stays in
        // [1, SPEED_CAP], which brackets the total
        let elapsed = 100.0 * SIM_DT;
        assert!(state.distance >= RUN_SPEED * elapsed * 0.99);
        assert!(state.distance <= RUN_SPEED * SPEED_CAP * elapsed * 1.01);
    }

    #[test]
    fn test_coin_scores_once_and_only_once() {
        let mut state = started(1);
        let id = state.next_entity_id();
        state.pool.insert_coin(Coin {
            id,
            lane: state.player.lane,
            z: 0.0,
            rotation_phase: 0.0,
        });

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.score, COIN_SCORE);
        assert!(
            state
                .take_events()
                .contains(&GameEvent::CoinCollected { id })
        );

        // The coin is gone from the pool; a later tick cannot re-score it
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.score, COIN_SCORE);
    }

    #[test]
    fn test_obstacle_hit_decrements_lives() {
        let mut state = started(1);
        let id = state.next_entity_id();
        state.pool.insert_obstacle(Obstacle {
            id,
            lane: state.player.lane,
            z: 0.3,
            kind: ObstacleKind::Crate,
            height: 1.0,
            width: 1.0,
        });

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.lives, INITIAL_LIVES - 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.pool.remove(id).is_none());
    }

    #[test]
    fn test_game_over_freezes_state_until_restart() {
        let mut state = started(1);
        state.lives = 1;
        let id = state.next_entity_id();
        state.pool.insert_obstacle(Obstacle {
            id,
            lane: state.player.lane,
            z: 0.0,
            kind: ObstacleKind::Crate,
            height: 1.0,
            width: 1.0,
        });

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        // All commands except restart are no-ops now
        let frozen_ticks = state.tick_count;
        let input = TickInput {
            left: true,
            jump: true,
            start: true,
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.tick_count, frozen_ticks);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.distance, 0.0);
        assert_eq!(state.lives, INITIAL_LIVES);
        assert_eq!(state.player.lane, LANE_COUNT / 2);
        assert!(state.pool.is_empty());
    }

    #[test]
    fn test_unattended_run_scores_exactly_its_pickups() {
        // Long enough for spawned entities to drift from the horizon into
        // the collision window; the run may end early on obstacle hits,
        // after which both score and events freeze
        let mut state = started(4242);
        let mut coins = 0u64;
        let mut power_ups = 0u64;
        for _ in 0..1500 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            for event in state.take_events() {
                match event {
                    GameEvent::CoinCollected { .. } => coins += 1,
                    GameEvent::PowerUpActivated { .. } => power_ups += 1,
                    _ => {}
                }
            }
        }
        assert_eq!(state.score, coins * COIN_SCORE + power_ups * POWERUP_SCORE);
    }

    #[test]
    fn test_determinism_same_seed_same_run() {
        let mut a = started(99999);
        let mut b = started(99999);
        let script = [
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                right: true,
                slide: true,
                ..Default::default()
            },
        ];
        for i in 0..400 {
            let input = &script[i % script.len()];
            tick(&mut a, input, SIM_DT);
            tick(&mut b, input, SIM_DT);
        }
        a.events.clear();
        b.events.clear();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
