//! Difficulty and environment progression
//!
//! Speed is recomputed from distance every tick rather than accumulated, so
//! the two can never drift apart. Environment periods are themed track
//! segments keyed off cumulative distance; crossing a period boundary picks
//! a fresh theme and raises a transition flag for the presentation layer.

use rand::Rng;

use super::state::GameState;
use crate::consts::*;

/// Fired when the track crosses a period boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodTransition {
    pub from: usize,
    pub to: usize,
}

/// Speed as a pure, monotone function of distance
#[inline]
pub fn speed_for_distance(distance: f32) -> f32 {
    (1.0 + distance / SPEED_DISTANCE_DIVISOR).clamp(1.0, SPEED_CAP)
}

/// Advance distance and speed for one tick; returns a transition when the
/// integer period index changes from the previous tick's value.
pub fn advance(state: &mut GameState, dt: f32) -> Option<PeriodTransition> {
    // The flag decays on its own; gameplay is unaffected while it is up
    state.transition_ticks_left = state.transition_ticks_left.saturating_sub(1);

    let segment_before = (state.distance / PERIOD_LENGTH) as u64;
    state.distance += state.speed * RUN_SPEED * dt;
    state.speed = speed_for_distance(state.distance);
    let segment_after = (state.distance / PERIOD_LENGTH) as u64;

    if segment_after == segment_before {
        return None;
    }

    // New theme drawn from every period except the one we are leaving
    let from = state.current_period;
    let mut to = state.rng.random_range(0..PERIOD_COUNT - 1);
    if to >= from {
        to += 1;
    }
    state.current_period = to;
    state.transition_ticks_left = TRANSITION_TICKS;
    Some(PeriodTransition { from, to })
}
