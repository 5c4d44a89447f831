//! Per-frame simulation advancement
//!
//! [`advance`] runs one deterministic tick against a monotonic wall-clock
//! timestamp. Physics and bookkeeping mutate the [`RoundState`] in a fixed
//! phase order; anything a collaborator needs to hear about is accumulated
//! into the returned [`GameEvent`] list instead of being called inline.
//!
//! Timer-driven behavior (effect expiry, speed ramp, laser cooldown) is
//! measured against absolute elapsed time, so it is framerate-independent;
//! movement integration is per-tick and therefore framerate-dependent by
//! design.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::{
    aabb_overlap, ball_paddle_overlap, ball_rect_overlap, brick_bounce_axis, rebound_angle,
    rebound_velocity, BounceAxis,
};
use super::state::{
    Ball, GameEvent, Laser, Particle, PowerUp, PowerUpKind, RoundState, RoundStatus,
};
use crate::consts::*;
use crate::palette;

/// Input snapshot for a single tick
///
/// The set of currently-held movement directions, sampled by the input
/// collaborator. Key-down/key-up bookkeeping is its concern, not ours.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
}

/// Advance the round by one tick
///
/// No-op unless the round is still playing. Phase order matters: each step
/// sees the effects of the previous ones within the same tick.
pub fn advance(state: &mut RoundState, input: &TickInput, now: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.status != RoundStatus::Playing {
        return events;
    }

    apply_effects(state, now, &mut events);
    step_speed_ramp(state, now);
    move_paddle(state, input);
    advance_lasers(state, &mut events);
    advance_power_ups(state, now, &mut events);
    advance_balls(state, &mut events);
    check_life_loss(state, now, &mut events);
    check_victory(state, &mut events);
    decay_particles(state);

    events
}

/// Apply or expire the timed effects, and autofire while the laser is hot
fn apply_effects(state: &mut RoundState, now: f64, events: &mut Vec<GameEvent>) {
    state.paddle.width = if now < state.effects.expand_until {
        PADDLE_WIDTH * PADDLE_EXPAND_FACTOR
    } else {
        PADDLE_WIDTH
    };

    if now < state.effects.laser_until {
        state.paddle.color = palette::PADDLE_LASER;
        if now - state.effects.last_laser_shot > LASER_COOLDOWN_MS {
            // Symmetric pair just inside the paddle edges
            let left_x = state.paddle.pos.x + 2.0;
            let right_x = state.paddle.pos.x + state.paddle.width - LASER_WIDTH - 2.0;
            for x in [left_x, right_x] {
                state.lasers.push(Laser {
                    pos: Vec2::new(x, state.paddle.pos.y),
                    width: LASER_WIDTH,
                    height: LASER_HEIGHT,
                    vel_y: -LASER_SPEED,
                    active: true,
                });
            }
            state.effects.last_laser_shot = now;
            events.push(GameEvent::LaserFired);
        }
    } else {
        state.paddle.color = palette::PADDLE;
    }
}

/// Monotonic step function: multiply the global multiplier every interval
fn step_speed_ramp(state: &mut RoundState, now: f64) {
    if now - state.last_speed_increase > SPEED_INCREMENT_INTERVAL_MS {
        state.speed_multiplier =
            (state.speed_multiplier * SPEED_INCREMENT_AMOUNT).min(SPEED_MULTIPLIER_CAP);
        state.last_speed_increase = now;
        log::debug!("speed ramp: x{:.2}", state.speed_multiplier);
    }
}

/// Apply held movement directions and clamp fully inside the playfield
fn move_paddle(state: &mut RoundState, input: &TickInput) {
    if input.move_left {
        state.paddle.pos.x -= PADDLE_SPEED;
    }
    if input.move_right {
        state.paddle.pos.x += PADDLE_SPEED;
    }
    state.paddle.pos.x = state
        .paddle
        .pos
        .x
        .clamp(0.0, CANVAS_WIDTH - state.paddle.width);
}

/// Move lasers upward and resolve brick hits (at most one brick per laser)
fn advance_lasers(state: &mut RoundState, events: &mut Vec<GameEvent>) {
    for laser in state.lasers.iter_mut() {
        laser.pos.y += laser.vel_y;

        if laser.pos.y < 0.0 {
            laser.active = false;
            continue;
        }

        for brick in state.bricks.iter_mut() {
            if !brick.active {
                continue;
            }
            if aabb_overlap(
                laser.pos,
                laser.width,
                laser.height,
                brick.pos,
                brick.width,
                brick.height,
            ) {
                brick.active = false;
                laser.active = false;
                // Laser kills award half value
                state.score += brick.value / 2;
                spawn_particles(&mut state.particles, &mut state.rng, brick.center(), brick.color);
                roll_power_up(&mut state.power_ups, &mut state.rng, brick.center());
                events.push(GameEvent::BrickDestroyed {
                    value: brick.value,
                    pitch: 0.5,
                    by_laser: true,
                });
                break;
            }
        }
    }
    state.lasers.retain(|l| l.active);
}

/// Advance falling capsules and apply anything the paddle catches
fn advance_power_ups(state: &mut RoundState, now: f64, events: &mut Vec<GameEvent>) {
    let mut collected: Vec<PowerUpKind> = Vec::new();

    for power_up in state.power_ups.iter_mut() {
        power_up.pos.y += power_up.fall_speed;

        if power_up.pos.y > CANVAS_HEIGHT {
            power_up.active = false;
            continue;
        }

        if aabb_overlap(
            power_up.pos,
            power_up.width,
            power_up.height,
            state.paddle.pos,
            state.paddle.width,
            state.paddle.height,
        ) {
            power_up.active = false;
            collected.push(power_up.kind);
        }
    }
    state.power_ups.retain(|p| p.active);

    for kind in collected {
        events.push(GameEvent::PowerUpCollected { kind });
        match kind {
            PowerUpKind::Expand => {
                state.effects.expand_until = now + POWERUP_DURATION_EXPAND_MS;
            }
            PowerUpKind::Laser => {
                state.effects.laser_until = now + POWERUP_DURATION_LASER_MS;
            }
            PowerUpKind::Multi => split_balls(&mut state.balls),
        }
    }
}

/// MULTI: every active ball becomes three, the clones' velocities perturbed
/// by a small fixed rotation approximation in each direction
fn split_balls(balls: &mut Vec<Ball>) {
    let mut spawned = Vec::new();
    for ball in balls.iter().filter(|b| b.active) {
        let Vec2 { x: dx, y: dy } = ball.vel;
        spawned.push(Ball {
            pos: ball.pos,
            vel: Vec2::new(dx * 0.8 + dy * 0.2, dy * 0.8 - dx * 0.2),
            active: true,
            color: ball.color,
        });
        spawned.push(Ball {
            pos: ball.pos,
            vel: Vec2::new(dx * 0.8 - dy * 0.2, dy * 0.8 + dx * 0.2),
            active: true,
            color: ball.color,
        });
    }
    balls.extend(spawned);
}

/// Integrate each active ball and resolve wall/paddle/brick/out-of-bounds
fn advance_balls(state: &mut RoundState, events: &mut Vec<GameEvent>) {
    let base_speed = state.settings.initial_speed.speed();

    for ball in state.balls.iter_mut() {
        if !ball.active {
            continue;
        }

        // Once the scalar speed cap is reached the multiplier is not
        // reapplied, preventing unbounded growth
        if ball.speed() < MAX_BALL_SPEED {
            ball.pos += ball.vel * state.speed_multiplier;
        } else {
            ball.pos += ball.vel;
        }

        // Walls: reflect away from the wall and clamp out of the overlap
        let mut wall_hit = false;
        if ball.pos.x + BALL_RADIUS > CANVAS_WIDTH {
            ball.vel.x = -ball.vel.x.abs();
            ball.pos.x = CANVAS_WIDTH - BALL_RADIUS;
            wall_hit = true;
        } else if ball.pos.x - BALL_RADIUS < 0.0 {
            ball.vel.x = ball.vel.x.abs();
            ball.pos.x = BALL_RADIUS;
            wall_hit = true;
        }
        if ball.pos.y - BALL_RADIUS < 0.0 {
            ball.vel.y = ball.vel.y.abs();
            ball.pos.y = BALL_RADIUS;
            wall_hit = true;
        }
        if wall_hit {
            events.push(GameEvent::WallHit);
        }

        // Paddle rebound: angle from impact offset, speed reset to the
        // configured serve speed (the ramp still applies via the multiplier)
        if ball_paddle_overlap(
            ball.pos,
            BALL_RADIUS,
            state.paddle.pos,
            state.paddle.width,
            state.paddle.height,
        ) {
            let angle = rebound_angle(ball.pos.x, state.paddle.center_x(), state.paddle.width);
            ball.vel = rebound_velocity(angle, base_speed);
            // Reposition above the paddle so the hit does not retrigger
            ball.pos.y = state.paddle.pos.y - BALL_RADIUS - 1.0;
            spawn_particles(
                &mut state.particles,
                &mut state.rng,
                Vec2::new(ball.pos.x, state.paddle.pos.y),
                palette::BALL,
            );
            events.push(GameEvent::PaddleHit);
        }

        // Bricks: first overlapping active brick, at most one per tick
        for brick in state.bricks.iter_mut() {
            if !brick.active {
                continue;
            }
            if !ball_rect_overlap(ball.pos, BALL_RADIUS, brick.pos, brick.width, brick.height) {
                continue;
            }

            brick.active = false;
            state.score += brick.value;
            spawn_particles(&mut state.particles, &mut state.rng, brick.center(), brick.color);
            roll_power_up(&mut state.power_ups, &mut state.rng, brick.center());

            match brick_bounce_axis(ball.pos, BALL_RADIUS, brick.pos, brick.width, brick.height) {
                BounceAxis::Horizontal => ball.vel.x = -ball.vel.x,
                BounceAxis::Vertical => ball.vel.y = -ball.vel.y,
            }

            events.push(GameEvent::BrickDestroyed {
                value: brick.value,
                // Higher-value bricks sound higher
                pitch: 1.0 + brick.value as f32 / 100.0,
                by_laser: false,
            });
            break;
        }

        // Past the bottom boundary: logically dead, swept on respawn
        if ball.pos.y - BALL_RADIUS > CANVAS_HEIGHT {
            ball.active = false;
        }
    }
}

/// All balls gone: consume a life and respawn, or end the round
fn check_life_loss(state: &mut RoundState, now: f64, events: &mut Vec<GameEvent>) {
    if state.active_ball_count() > 0 {
        return;
    }

    events.push(GameEvent::BallLost);

    if state.lives > 1 {
        state.lives -= 1;
        state.reset_after_life_loss(now);
        events.push(GameEvent::LifeLost {
            lives_left: state.lives,
        });
        log::info!("life lost, {} remaining", state.lives);
    } else {
        state.status = RoundStatus::GameOver;
        events.push(GameEvent::RoundOver {
            score: state.score,
            won: false,
        });
        log::info!("game over: score {}", state.score);
    }
}

/// Every brick cleared: the round is won
///
/// Guarded on the status so the terminal event fires exactly once, even if
/// the last brick and the last ball went in the same tick.
fn check_victory(state: &mut RoundState, events: &mut Vec<GameEvent>) {
    if state.status != RoundStatus::Playing {
        return;
    }
    if state.all_bricks_cleared() {
        state.status = RoundStatus::Victory;
        events.push(GameEvent::RoundOver {
            score: state.score,
            won: true,
        });
        log::info!("victory: score {}", state.score);
    }
}

/// Integrate cosmetic debris and sweep the dead
fn decay_particles(state: &mut RoundState) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life -= PARTICLE_DECAY_PER_TICK;
    }
    state.particles.retain(|p| p.life > 0.0);
}

/// Burst of debris at a destruction/impact point
fn spawn_particles(particles: &mut Vec<Particle>, rng: &mut Pcg32, pos: Vec2, color: &'static str) {
    for _ in 0..PARTICLES_PER_BURST {
        particles.push(Particle {
            pos,
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * 4.0,
                (rng.random::<f32>() - 0.5) * 4.0,
            ),
            life: 1.0,
            color,
            size: rng.random::<f32>() * 3.0 + 2.0,
        });
    }
}

/// Probabilistic capsule drop at a destroyed brick's center
fn roll_power_up(power_ups: &mut Vec<PowerUp>, rng: &mut Pcg32, center: Vec2) {
    if rng.random::<f32>() > POWERUP_CHANCE {
        return;
    }

    let roll: f32 = rng.random();
    let kind = if roll < 0.33 {
        PowerUpKind::Expand
    } else if roll < 0.66 {
        PowerUpKind::Laser
    } else {
        PowerUpKind::Multi
    };

    power_ups.push(PowerUp {
        pos: Vec2::new(center.x - POWERUP_SIZE / 2.0, center.y),
        width: POWERUP_SIZE,
        height: POWERUP_SIZE,
        kind,
        fall_speed: POWERUP_FALL_SPEED,
        active: true,
    });
}
