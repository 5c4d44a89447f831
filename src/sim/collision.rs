//! Collision predicates and rebound math
//!
//! Every collision in the game reduces to axis-aligned bounding-box overlap:
//! the ball is treated as a square of side 2*radius, bricks/paddle/lasers/
//! power-ups are true rectangles. All functions here are pure; position
//! correction and event emission stay in the tick.

use glam::Vec2;

use crate::consts::MAX_REBOUND_ANGLE;

/// Rect-vs-rect AABB overlap, positions are top-left corners
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_w: f32, a_h: f32, b_pos: Vec2, b_w: f32, b_h: f32) -> bool {
    a_pos.x < b_pos.x + b_w
        && a_pos.x + a_w > b_pos.x
        && a_pos.y < b_pos.y + b_h
        && a_pos.y + a_h > b_pos.y
}

/// Ball (center + radius) vs rect AABB overlap
#[inline]
pub fn ball_rect_overlap(center: Vec2, radius: f32, rect_pos: Vec2, w: f32, h: f32) -> bool {
    center.x + radius > rect_pos.x
        && center.x - radius < rect_pos.x + w
        && center.y + radius > rect_pos.y
        && center.y - radius < rect_pos.y + h
}

/// Ball-vs-paddle test: vertical extent overlaps the paddle band and the
/// ball center lies within the paddle's horizontal span
#[inline]
pub fn ball_paddle_overlap(
    center: Vec2,
    radius: f32,
    paddle_pos: Vec2,
    width: f32,
    height: f32,
) -> bool {
    center.y + radius >= paddle_pos.y
        && center.y - radius <= paddle_pos.y + height
        && center.x >= paddle_pos.x
        && center.x <= paddle_pos.x + width
}

/// Which velocity component a brick hit reflects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceAxis {
    /// Reflect `vel.x` (hit a vertical face)
    Horizontal,
    /// Reflect `vel.y` (hit a horizontal face)
    Vertical,
}

/// Choose the bounce axis by minimum penetration depth among the four
/// overlap distances. Ties on a left/right face reflect horizontally.
pub fn brick_bounce_axis(center: Vec2, radius: f32, brick_pos: Vec2, w: f32, h: f32) -> BounceAxis {
    let overlap_left = (center.x + radius) - brick_pos.x;
    let overlap_right = (brick_pos.x + w) - (center.x - radius);
    let overlap_top = (center.y + radius) - brick_pos.y;
    let overlap_bottom = (brick_pos.y + h) - (center.y - radius);

    let min_overlap = overlap_left
        .min(overlap_right)
        .min(overlap_top)
        .min(overlap_bottom);

    if min_overlap == overlap_left || min_overlap == overlap_right {
        BounceAxis::Horizontal
    } else {
        BounceAxis::Vertical
    }
}

/// Paddle rebound angle from the normalized impact offset
///
/// Offset is the impact x relative to the paddle center, scaled to [-1, 1];
/// the angle from vertical scales linearly up to +-60 degrees at the edges.
#[inline]
pub fn rebound_angle(ball_x: f32, paddle_center_x: f32, paddle_width: f32) -> f32 {
    let offset = ((ball_x - paddle_center_x) / (paddle_width / 2.0)).clamp(-1.0, 1.0);
    offset * MAX_REBOUND_ANGLE
}

/// Rebound velocity: always upward, at `angle` from vertical, with the
/// round's configured base speed (not the current ramped speed)
#[inline]
pub fn rebound_velocity(angle: f32, base_speed: f32) -> Vec2 {
    Vec2::new(base_speed * angle.sin(), -base_speed * angle.cos())
}
