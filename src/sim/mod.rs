//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per rendered frame, driven by an external clock
//! - Seeded RNG only
//! - Side effects surface as [`GameEvent`]s, never as direct collaborator calls
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{
    aabb_overlap, ball_paddle_overlap, ball_rect_overlap, brick_bounce_axis, rebound_angle,
    rebound_velocity, BounceAxis,
};
pub use state::{
    ActiveEffects, Ball, Brick, GameEvent, Laser, Paddle, Particle, PowerUp, PowerUpKind,
    RoundState, RoundStatus,
};
pub use tick::{advance, TickInput};
