//! Brick Blitz - a retro breakout simulation engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, round state)
//! - `settings`: External configuration surface (ball count, speed tier)
//! - `audio`: Event-to-sound routing for the audio collaborator
//! - `highscores`: In-memory leaderboard (storage belongs to the app shell)
//!
//! The engine owns one mutable [`sim::RoundState`] and is advanced once per
//! rendered frame by an external loop that calls [`sim::advance`] and then
//! hands the state to a renderer read-only. Audio, input, rendering and
//! persistence are collaborators: the engine only consumes an input snapshot
//! and emits discrete [`sim::GameEvent`]s.

pub mod audio;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{GameSettings, SpeedTier};

/// Game configuration constants
///
/// Everything here is a fixed engine constant; the only externally
/// configurable knobs live in [`crate::settings::GameSettings`].
pub mod consts {
    /// Playfield dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Paddle defaults - width expands to 1.5x under the Expand effect
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 16.0;
    /// Horizontal displacement per tick per held direction
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Distance of the paddle from the bottom edge
    pub const PADDLE_Y_OFFSET: f32 = 30.0;
    pub const PADDLE_EXPAND_FACTOR: f32 = 1.5;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 6.0;
    /// Scalar speed cap; the ramp multiplier is not reapplied once reached
    pub const MAX_BALL_SPEED: f32 = 14.0;
    /// Maximum paddle rebound deflection from vertical (60 degrees)
    pub const MAX_REBOUND_ANGLE: f32 = std::f32::consts::PI / 3.0;

    /// Brick grid
    pub const BRICK_ROWS: u32 = 6;
    pub const BRICK_COLS: u32 = 10;
    pub const BRICK_PADDING: f32 = 8.0;
    pub const BRICK_OFFSET_TOP: f32 = 60.0;
    pub const BRICK_OFFSET_LEFT: f32 = 35.0;
    pub const BRICK_HEIGHT: f32 = 24.0;
    /// Derived so the grid spans the playfield minus the side offsets
    pub const BRICK_WIDTH: f32 = (CANVAS_WIDTH
        - BRICK_OFFSET_LEFT * 2.0
        - BRICK_PADDING * (BRICK_COLS as f32 - 1.0))
        / BRICK_COLS as f32;

    /// Speed ramp: step the multiplier every interval, clamped to the cap
    pub const SPEED_INCREMENT_INTERVAL_MS: f64 = 10_000.0;
    pub const SPEED_INCREMENT_AMOUNT: f32 = 1.1;
    pub const SPEED_MULTIPLIER_CAP: f32 = 2.5;

    /// Power-ups
    pub const POWERUP_SIZE: f32 = 20.0;
    pub const POWERUP_FALL_SPEED: f32 = 2.0;
    /// Spawn probability per destroyed brick
    pub const POWERUP_CHANCE: f32 = 0.15;
    pub const POWERUP_DURATION_EXPAND_MS: f64 = 10_000.0;
    pub const POWERUP_DURATION_LASER_MS: f64 = 8_000.0;

    /// Laser sub-weapon
    pub const LASER_SPEED: f32 = 12.0;
    pub const LASER_WIDTH: f32 = 4.0;
    pub const LASER_HEIGHT: f32 = 12.0;
    /// Milliseconds between autofire volleys while the effect is active
    pub const LASER_COOLDOWN_MS: f64 = 400.0;

    pub const STARTING_LIVES: u8 = 3;

    /// Particle cosmetics
    pub const PARTICLES_PER_BURST: usize = 8;
    pub const PARTICLE_DECAY_PER_TICK: f32 = 0.02;
}

/// Render palette (CSS hex), consumed by the render collaborator only
pub mod palette {
    pub const PADDLE: &str = "#3b82f6";
    /// Paddle turns red while the laser effect is active
    pub const PADDLE_LASER: &str = "#ef4444";
    pub const BALL: &str = "#ffffff";

    /// Per-row brick colors, cycled top to bottom
    pub const BRICKS: [&str; 6] = [
        "#ef4444", // red
        "#f97316", // orange
        "#eab308", // yellow
        "#22c55e", // green
        "#06b6d4", // cyan
        "#8b5cf6", // violet
    ];
}
