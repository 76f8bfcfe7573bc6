//! Player state machine: lane changes, jumps, and slides
//!
//! Jump and slide are timed transient states that return to Running on
//! their own; there is no external cancel. Encoding the action as an enum
//! makes the jump/slide mutual exclusion structural.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::lane_world_pos;

/// Direction of a lane-change request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneShift {
    Left,
    Right,
}

/// What the player is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum Action {
    #[default]
    Running,
    /// Airborne; `elapsed` counts up to JUMP_DURATION
    Jumping { elapsed: f32 },
    /// Ducked; `elapsed` counts up to SLIDE_DURATION
    Sliding { elapsed: f32 },
}

/// Player state, owned by the simulation loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Authoritative logic lane, always in [0, LANE_COUNT - 1]
    pub lane: usize,
    pub action: Action,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerState {
    /// Start in the center lane, running
    pub fn new() -> Self {
        Self {
            lane: LANE_COUNT / 2,
            action: Action::Running,
        }
    }

    pub fn is_jumping(&self) -> bool {
        matches!(self.action, Action::Jumping { .. })
    }

    pub fn is_sliding(&self) -> bool {
        matches!(self.action, Action::Sliding { .. })
    }

    /// Shift one lane over, clamped to the track edges (never wraps)
    pub fn request_lane_change(&mut self, shift: LaneShift) {
        self.lane = match shift {
            LaneShift::Left => self.lane.saturating_sub(1),
            LaneShift::Right => (self.lane + 1).min(LANE_COUNT - 1),
        };
    }

    /// Start a jump; no-op while a jump or slide is in progress
    pub fn request_jump(&mut self) {
        if self.action == Action::Running {
            self.action = Action::Jumping { elapsed: 0.0 };
        }
    }

    /// Start a slide; no-op while a jump or slide is in progress
    pub fn request_slide(&mut self) {
        if self.action == Action::Running {
            self.action = Action::Sliding { elapsed: 0.0 };
        }
    }

    /// Advance the action timer; jump/slide end once their fixed duration
    /// elapses, independent of game speed. The comparison carries a
    /// half-step tolerance: summing f32 steps can land a hair under the
    /// duration on the tick that should be the last one.
    pub fn advance(&mut self, dt: f32) {
        self.action = match self.action {
            Action::Running => Action::Running,
            Action::Jumping { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed + dt * 0.5 >= JUMP_DURATION {
                    Action::Running
                } else {
                    Action::Jumping { elapsed }
                }
            }
            Action::Sliding { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed + dt * 0.5 >= SLIDE_DURATION {
                    Action::Running
                } else {
                    Action::Sliding { elapsed }
                }
            }
        };
    }

    /// Height above the track, following a half-sine jump arc
    pub fn height(&self) -> f32 {
        match self.action {
            Action::Jumping { elapsed } => {
                let t = (elapsed / JUMP_DURATION).clamp(0.0, 1.0);
                JUMP_HEIGHT * (std::f32::consts::PI * t).sin()
            }
            _ => 0.0,
        }
    }

    /// World position for the renderer (player sits at z = 0)
    pub fn world_pos(&self) -> Vec3 {
        lane_world_pos(self.lane, 0.0, self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lane_change_clamps_at_edges() {
        let mut player = PlayerState::new();
        player.lane = 0;
        player.request_lane_change(LaneShift::Left);
        assert_eq!(player.lane, 0);

        player.lane = LANE_COUNT - 1;
        player.request_lane_change(LaneShift::Right);
        assert_eq!(player.lane, LANE_COUNT - 1);
    }

    #[test]
    fn test_jump_blocks_jump_and_slide() {
        let mut player = PlayerState::new();
        player.request_jump();
        assert!(player.is_jumping());

        // Run the jump partway, then re-request: timer must not reset
        player.advance(0.3);
        let mid = player.action;
        player.request_jump();
        assert_eq!(player.action, mid);
        player.request_slide();
        assert_eq!(player.action, mid);
        assert!(!player.is_sliding());
    }

    #[test]
    fn test_jump_auto_resolves_after_duration() {
        // 0.6s jump at 0.02s ticks resolves on exactly the 30th tick
        let mut player = PlayerState::new();
        player.request_jump();
        for _ in 0..29 {
            player.advance(0.02);
            assert!(player.is_jumping());
        }
        player.advance(0.02);
        assert!(!player.is_jumping());
        assert_eq!(player.action, Action::Running);
    }

    #[test]
    fn test_slide_auto_resolves_after_duration() {
        let mut player = PlayerState::new();
        player.request_slide();
        let ticks = (SLIDE_DURATION / 0.02).round() as usize;
        for _ in 0..ticks - 1 {
            player.advance(0.02);
            assert!(player.is_sliding());
        }
        player.advance(0.02);
        assert!(!player.is_sliding());
        assert_eq!(player.action, Action::Running);
    }

    #[test]
    fn test_action_tick_counts_exact_at_sim_cadence() {
        // Durations divide into whole ticks at SIM_DT; accumulated f32
        // error must shift the end neither a tick late nor a tick early
        for (start, duration) in [
            (PlayerState::request_jump as fn(&mut PlayerState), JUMP_DURATION),
            (PlayerState::request_slide, SLIDE_DURATION),
        ] {
            let mut player = PlayerState::new();
            start(&mut player);
            let mut ticks = 0u32;
            while player.action != Action::Running {
                player.advance(SIM_DT);
                ticks += 1;
                assert!(ticks < 1000);
            }
            assert_eq!(ticks, (duration / SIM_DT).round() as u32);
        }
    }

    #[test]
    fn test_height_zero_unless_jumping() {
        let mut player = PlayerState::new();
        assert_eq!(player.height(), 0.0);
        player.request_slide();
        assert_eq!(player.height(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_lane_always_in_bounds(shifts in prop::collection::vec(prop::bool::ANY, 0..200)) {
            let mut player = PlayerState::new();
            for right in shifts {
                let shift = if right { LaneShift::Right } else { LaneShift::Left };
                player.request_lane_change(shift);
                prop_assert!(player.lane < LANE_COUNT);
            }
        }

        #[test]
        fn prop_jump_and_slide_never_overlap(
            ops in prop::collection::vec(0u8..3, 0..300),
            dt in 0.005f32..0.05,
        ) {
            let mut player = PlayerState::new();
            for op in ops {
                match op {
                    0 => player.request_jump(),
                    1 => player.request_slide(),
                    _ => player.advance(dt),
                }
                prop_assert!(!(player.is_jumping() && player.is_sliding()));
            }
        }
    }
}
