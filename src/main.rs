//! Headless demo runner
//!
//! Drives the simulation at a simulated 60 Hz clock with a trivial autopilot
//! that chases the lowest ball. Useful for eyeballing the event stream and
//! ramp behavior without a renderer:
//!
//! ```text
//! RUST_LOG=info brick-blitz [slow|normal|fast|insane] [ball_count]
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use brick_blitz::audio::{AudioRouter, LogSink};
use brick_blitz::settings::{MAX_BALL_COUNT, MIN_BALL_COUNT};
use brick_blitz::sim::{advance, GameEvent, RoundState, RoundStatus, TickInput};
use brick_blitz::{GameSettings, HighScores, SpeedTier};

const TICK_MS: f64 = 1000.0 / 60.0;
/// Hard stop after five simulated minutes
const MAX_TICKS: u64 = 60 * 60 * 5;

fn parse_settings() -> GameSettings {
    let mut settings = GameSettings::default();
    let mut args = std::env::args().skip(1);

    if let Some(tier) = args.next() {
        match SpeedTier::from_str(&tier) {
            Some(tier) => settings.initial_speed = tier,
            None => log::warn!("unknown speed tier {:?}, using {}", tier, settings.initial_speed.label()),
        }
    }
    if let Some(count) = args.next() {
        match count.parse::<u32>() {
            Ok(n) if (MIN_BALL_COUNT..=MAX_BALL_COUNT).contains(&n) => settings.ball_count = n,
            _ => log::warn!("ball count must be {}..={}", MIN_BALL_COUNT, MAX_BALL_COUNT),
        }
    }
    settings
}

/// Chase the lowest active ball with a small dead zone
fn autopilot(state: &RoundState) -> TickInput {
    let target = state
        .balls
        .iter()
        .filter(|b| b.active)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|b| b.pos.x);

    match target {
        Some(x) => TickInput {
            move_left: state.paddle.center_x() > x + 4.0,
            move_right: state.paddle.center_x() < x - 4.0,
        },
        None => TickInput::default(),
    }
}

fn main() {
    env_logger::init();

    let settings = parse_settings();
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut state = RoundState::new(settings, seed, 0.0);
    let mut router = AudioRouter::new(LogSink);
    let mut scores = HighScores::new();

    for tick in 1..=MAX_TICKS {
        let now = tick as f64 * TICK_MS;
        let input = autopilot(&state);
        let events = advance(&mut state, &input, now);
        router.dispatch(&events);

        for event in &events {
            if let GameEvent::RoundOver { score, won } = event {
                scores.add_score(*score, *won, now);
                log::info!(
                    "round over after {:.1}s: score {} ({})",
                    now / 1000.0,
                    score,
                    if *won { "victory" } else { "game over" }
                );
            }
        }

        if state.status != RoundStatus::Playing {
            break;
        }
    }

    if state.status == RoundStatus::Playing {
        log::info!(
            "stopped after {} ticks, score {} with {} bricks left",
            MAX_TICKS,
            state.score,
            state.bricks.iter().filter(|b| b.active).count()
        );
    }
    if let Some(top) = scores.top_score() {
        log::info!("best score this session: {}", top);
    }
}
