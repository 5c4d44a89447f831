//! Game settings
//!
//! The entire external configuration contract: how many balls to serve and
//! which speed tier they start at. Everything else is a fixed engine
//! constant in [`crate::consts`].

use serde::{Deserialize, Serialize};

/// Enumerated ball speed tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeedTier {
    Slow,
    #[default]
    Normal,
    Fast,
    Insane,
}

impl SpeedTier {
    /// Initial scalar ball speed for this tier (pixels per tick)
    pub fn speed(&self) -> f32 {
        match self {
            SpeedTier::Slow => 4.0,
            SpeedTier::Normal => 6.0,
            SpeedTier::Fast => 8.0,
            SpeedTier::Insane => 10.0,
        }
    }

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            SpeedTier::Slow => "RELAXED",
            SpeedTier::Normal => "NORMAL",
            SpeedTier::Fast => "INTENSE",
            SpeedTier::Insane => "NIGHTMARE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" | "relaxed" => Some(SpeedTier::Slow),
            "normal" => Some(SpeedTier::Normal),
            "fast" | "intense" => Some(SpeedTier::Fast),
            "insane" | "nightmare" => Some(SpeedTier::Insane),
            _ => None,
        }
    }
}

/// Smallest and largest supported serve counts
pub const MIN_BALL_COUNT: u32 = 1;
pub const MAX_BALL_COUNT: u32 = 3;

/// Round configuration chosen in the menu
///
/// The engine assumes a valid configuration; keeping `ball_count` within
/// [`MIN_BALL_COUNT`]..=[`MAX_BALL_COUNT`] is the menu's contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Number of balls served at round start and after a life loss
    pub ball_count: u32,
    /// Initial (and paddle-rebound) ball speed
    pub initial_speed: SpeedTier,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            ball_count: 1,
            initial_speed: SpeedTier::Normal,
        }
    }
}
