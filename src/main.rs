//! Lane Rush headless demo driver
//!
//! Runs a scripted auto-play session at the fixed simulation cadence and
//! dumps the final snapshot as JSON. Stands in for the presentation layer:
//! it feeds commands through `TickInput` and reads state only through the
//! snapshot and event surface, exactly as a renderer would.

use lane_rush::consts::*;
use lane_rush::sim::{GameEvent, GamePhase, GameState, ObstacleKind, TickInput, tick};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = match args.next() {
        Some(s) => s.parse()?,
        None => 42,
    };
    let max_ticks: u64 = match args.next() {
        Some(s) => s.parse()?,
        None => 9000,
    };

    let mut state = GameState::new(seed);
    let mut input = TickInput {
        start: true,
        ..Default::default()
    };

    for _ in 0..max_ticks {
        tick(&mut state, &input, SIM_DT);
        input = auto_input(&state);

        for event in state.take_events() {
            match event {
                GameEvent::ObstacleHit { lives_left } => {
                    log::warn!("hit! {lives_left} lives left");
                }
                GameEvent::PeriodChanged { from, to } => {
                    log::info!("entering period {to} (was {from})");
                }
                GameEvent::GameOver { score, distance } => {
                    log::info!("run over: {score} points, {distance:.0}m");
                }
                _ => {}
            }
        }

        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    Ok(())
}

/// Rudimentary autopilot: react to the nearest upcoming obstacle in the
/// player's lane - dodge into a free neighboring lane when possible,
/// otherwise jump or slide based on the obstacle shape
fn auto_input(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    let snapshot = state.snapshot();
    let lane = snapshot.player.lane;

    // React inside the distance one action covers at the current speed
    let react_z = -(snapshot.speed * RUN_SPEED * JUMP_DURATION);

    let threat = snapshot
        .obstacles
        .iter()
        .filter(|o| o.lane == lane && o.z < 0.0 && o.z > react_z)
        .min_by(|a, b| b.z.partial_cmp(&a.z).unwrap_or(std::cmp::Ordering::Equal));

    let Some(threat) = threat else {
        return input;
    };

    let lane_blocked = |candidate: usize| {
        snapshot
            .obstacles
            .iter()
            .any(|o| o.lane == candidate && o.z < 0.0 && o.z > react_z)
    };

    if lane > 0 && !lane_blocked(lane - 1) {
        input.left = true;
    } else if lane + 1 < LANE_COUNT && !lane_blocked(lane + 1) {
        input.right = true;
    } else if threat.z > react_z / 2.0 {
        // No free lane and the obstacle is close: beat it with an action
        match threat.kind {
            ObstacleKind::Overhang => input.slide = true,
            ObstacleKind::Hurdle | ObstacleKind::Crate => input.jump = true,
        }
    }

    input
}
