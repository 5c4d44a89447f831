//! Round state and core simulation types
//!
//! One [`RoundState`] aggregate owns every entity for the lifetime of a
//! round. It is created by [`RoundState::new`], mutated only by
//! [`super::tick::advance`], and discarded when the shell returns to the menu.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::palette;
use crate::settings::GameSettings;

/// Current status of the round
///
/// Transitions are forward-only: `Playing` may become `GameOver` or
/// `Victory`, never the reverse. Retrying builds a fresh `RoundState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Playing,
    GameOver,
    Victory,
}

/// A ball entity
///
/// Inactive balls are logically dead but stay in storage until the round
/// sweeps them (life loss) or ends.
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub active: bool,
    pub color: &'static str,
}

impl Ball {
    /// Scalar speed
    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// The player's paddle (exactly one per round)
#[derive(Debug, Clone)]
pub struct Paddle {
    /// Top-left corner; `pos.y` is fixed for the round
    pub pos: Vec2,
    /// Base width, or 1.5x base while the Expand effect is active
    pub width: f32,
    pub height: f32,
    pub color: &'static str,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            pos: Vec2::new(
                (CANVAS_WIDTH - PADDLE_WIDTH) / 2.0,
                CANVAS_HEIGHT - PADDLE_Y_OFFSET,
            ),
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            color: palette::PADDLE,
        }
    }
}

impl Paddle {
    /// Horizontal center of the paddle
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }
}

/// A grid brick
///
/// Immutable once placed except for `active`; a destroyed brick never
/// reactivates within a round.
#[derive(Debug, Clone)]
pub struct Brick {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub active: bool,
    pub color: &'static str,
    /// Score awarded on destruction; upper rows are worth more
    pub value: u32,
}

impl Brick {
    /// Center point, used for particle bursts and power-up spawns
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Widen the paddle for a fixed duration
    Expand,
    /// Autofire laser volleys from the paddle for a fixed duration
    Laser,
    /// Split every active ball into three
    Multi,
}

impl PowerUpKind {
    /// Render color for the falling capsule
    pub fn color(&self) -> &'static str {
        match self {
            PowerUpKind::Expand => "#22c55e",
            PowerUpKind::Laser => "#ef4444",
            PowerUpKind::Multi => "#eab308",
        }
    }

    /// Single-letter capsule label
    pub fn letter(&self) -> char {
        match self {
            PowerUpKind::Expand => 'E',
            PowerUpKind::Laser => 'L',
            PowerUpKind::Multi => 'M',
        }
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone)]
pub struct PowerUp {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub kind: PowerUpKind,
    /// Downward fall speed (pixels per tick)
    pub fall_speed: f32,
    pub active: bool,
}

/// A paddle-fired laser projectile
#[derive(Debug, Clone)]
pub struct Laser {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity, negative = upward
    pub vel_y: f32,
    pub active: bool,
}

/// Cosmetic debris, never affects gameplay
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 at spawn, decays to 0
    pub life: f32,
    pub color: &'static str,
    pub size: f32,
}

/// Absolute expiry timestamps (ms) for timed effects; 0.0 = expired
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveEffects {
    pub expand_until: f64,
    pub laser_until: f64,
    pub last_laser_shot: f64,
}

/// Discrete event emitted by a tick
///
/// The physics phase accumulates these; a second phase dispatches them to
/// the audio/lifecycle collaborators. Keeps the simulation core pure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Ball rebounded off the paddle
    PaddleHit,
    /// Ball rebounded off a side or top wall
    WallHit,
    /// A brick was destroyed; `pitch` scales the hit notification
    BrickDestroyed {
        value: u32,
        pitch: f32,
        by_laser: bool,
    },
    /// A laser volley was fired from the paddle
    LaserFired,
    /// The paddle caught a falling capsule
    PowerUpCollected { kind: PowerUpKind },
    /// The last active ball left the playfield this tick
    BallLost,
    /// A life was consumed and a fresh ball set served
    LifeLost { lives_left: u8 },
    /// Terminal event, emitted exactly once per round
    RoundOver { score: u32, won: bool },
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct RoundState {
    /// Configuration the round was started with
    pub settings: GameSettings,
    /// Monotonically non-decreasing within a round
    pub score: u32,
    pub lives: u8,
    pub status: RoundStatus,
    pub balls: Vec<Ball>,
    pub paddle: Paddle,
    pub bricks: Vec<Brick>,
    pub power_ups: Vec<PowerUp>,
    pub lasers: Vec<Laser>,
    /// Visual debris (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Timestamp (ms) of the last speed-ramp step
    pub last_speed_increase: f64,
    /// Global velocity multiplier, clamped to [1.0, SPEED_MULTIPLIER_CAP]
    pub speed_multiplier: f32,
    /// Timestamp (ms) the round started
    pub start_time: f64,
    pub effects: ActiveEffects,
    /// Round RNG (power-up rolls, particle spread)
    pub rng: Pcg32,
}

impl RoundState {
    /// Initialize a fresh round: full brick grid, fanned ball set, score 0,
    /// three lives, all effects expired.
    pub fn new(settings: GameSettings, seed: u64, now: f64) -> Self {
        log::info!(
            "new round: {} ball(s), speed {} ({})",
            settings.ball_count,
            settings.initial_speed.speed(),
            settings.initial_speed.label()
        );
        Self {
            settings,
            score: 0,
            lives: STARTING_LIVES,
            status: RoundStatus::Playing,
            balls: serve_balls(&settings),
            paddle: Paddle::default(),
            bricks: build_brick_grid(),
            power_ups: Vec::new(),
            lasers: Vec::new(),
            particles: Vec::new(),
            last_speed_increase: now,
            speed_multiplier: 1.0,
            start_time: now,
            effects: ActiveEffects::default(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Respawn after a life loss: fresh ball set at the configured initial
    /// speed, effects and projectiles cleared, ramp restarted. Score and
    /// bricks are untouched; the round continues.
    pub fn reset_after_life_loss(&mut self, now: f64) {
        self.effects = ActiveEffects::default();
        self.power_ups.clear();
        self.lasers.clear();
        self.balls = serve_balls(&self.settings);
        self.speed_multiplier = 1.0;
        self.last_speed_increase = now;
    }

    /// Number of balls still in play
    pub fn active_ball_count(&self) -> usize {
        self.balls.iter().filter(|b| b.active).count()
    }

    /// True once every brick has been destroyed
    pub fn all_bricks_cleared(&self) -> bool {
        self.bricks.iter().all(|b| !b.active)
    }
}

/// Build the fixed rows x cols brick grid with per-row color and value
fn build_brick_grid() -> Vec<Brick> {
    let mut bricks = Vec::with_capacity((BRICK_ROWS * BRICK_COLS) as usize);
    for c in 0..BRICK_COLS {
        for r in 0..BRICK_ROWS {
            bricks.push(Brick {
                pos: Vec2::new(
                    c as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_OFFSET_LEFT,
                    r as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_OFFSET_TOP,
                ),
                width: BRICK_WIDTH,
                height: BRICK_HEIGHT,
                active: true,
                color: palette::BRICKS[r as usize % palette::BRICKS.len()],
                // Top rows are worth more
                value: (BRICK_ROWS - r) * 10,
            });
        }
    }
    bricks
}

/// Spawn the configured ball set above the paddle, fanned around straight-up
fn serve_balls(settings: &GameSettings) -> Vec<Ball> {
    let count = settings.ball_count;
    let speed = settings.initial_speed.speed();
    let mut balls = Vec::with_capacity(count as usize);

    for i in 0..count {
        let spread = i as f32 - (count as f32 - 1.0) / 2.0;
        let offset_x = spread * 20.0;
        // Straight up with a small angular fan per ball
        let angle = -std::f32::consts::FRAC_PI_2 + spread * 0.2;

        balls.push(Ball {
            pos: Vec2::new(
                CANVAS_WIDTH / 2.0 + offset_x,
                CANVAS_HEIGHT - PADDLE_Y_OFFSET - 30.0,
            ),
            vel: Vec2::new(speed * angle.cos(), speed * angle.sin()),
            active: true,
            color: palette::BALL,
        });
    }
    balls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SpeedTier;

    fn settings(count: u32, tier: SpeedTier) -> GameSettings {
        GameSettings {
            ball_count: count,
            initial_speed: tier,
        }
    }

    #[test]
    fn test_new_round_layout() {
        let state = RoundState::new(settings(1, SpeedTier::Normal), 7, 0.0);
        assert_eq!(state.bricks.len(), (BRICK_ROWS * BRICK_COLS) as usize);
        assert!(state.bricks.iter().all(|b| b.active));
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.score, 0);
        assert_eq!(state.status, RoundStatus::Playing);
        assert_eq!(state.speed_multiplier, 1.0);
    }

    #[test]
    fn test_brick_values_by_row() {
        let state = RoundState::new(settings(1, SpeedTier::Normal), 7, 0.0);
        // First column, rows top to bottom: 60, 50, 40, 30, 20, 10
        for (r, brick) in state.bricks.iter().take(BRICK_ROWS as usize).enumerate() {
            assert_eq!(brick.value, (BRICK_ROWS - r as u32) * 10);
        }
    }

    #[test]
    fn test_serve_fans_balls() {
        let state = RoundState::new(settings(3, SpeedTier::Fast), 7, 0.0);
        assert_eq!(state.balls.len(), 3);
        // All share the configured speed magnitude
        for ball in &state.balls {
            assert!((ball.speed() - SpeedTier::Fast.speed()).abs() < 1e-4);
        }
        // Middle ball goes straight up, outer balls fan out
        assert!(state.balls[1].vel.x.abs() < 1e-4);
        assert!(state.balls[0].vel.x < 0.0);
        assert!(state.balls[2].vel.x > 0.0);
        // 20px horizontal spread
        assert!((state.balls[2].pos.x - state.balls[0].pos.x - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_reset_after_life_loss_keeps_score_and_bricks() {
        let mut state = RoundState::new(settings(2, SpeedTier::Slow), 7, 0.0);
        state.score = 120;
        state.bricks[0].active = false;
        state.speed_multiplier = 2.0;
        state.effects.expand_until = 99_000.0;
        state.power_ups.push(PowerUp {
            pos: Vec2::new(10.0, 10.0),
            width: POWERUP_SIZE,
            height: POWERUP_SIZE,
            kind: PowerUpKind::Multi,
            fall_speed: POWERUP_FALL_SPEED,
            active: true,
        });

        state.reset_after_life_loss(5_000.0);

        assert_eq!(state.score, 120);
        assert!(!state.bricks[0].active);
        assert_eq!(state.balls.len(), 2);
        assert!(state.balls.iter().all(|b| b.active));
        assert_eq!(state.speed_multiplier, 1.0);
        assert_eq!(state.last_speed_increase, 5_000.0);
        assert!(state.power_ups.is_empty());
        assert_eq!(state.effects.expand_until, 0.0);
    }

    #[test]
    fn test_powerup_kind_tables_are_distinct() {
        let kinds = [PowerUpKind::Expand, PowerUpKind::Laser, PowerUpKind::Multi];
        for (i, a) in kinds.iter().enumerate() {
            for b in kinds.iter().skip(i + 1) {
                assert_ne!(a.color(), b.color());
                assert_ne!(a.letter(), b.letter());
            }
        }
    }
}
