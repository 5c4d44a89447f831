//! Sound routing
//!
//! The simulation never touches audio directly; it emits [`GameEvent`]s and
//! an [`AudioRouter`] maps them onto abstract [`Sound`] cues in a separate
//! dispatch phase. The actual synthesis backend is behind the [`AudioSink`]
//! trait so the engine stays headless-testable.

use crate::sim::GameEvent;

/// Abstract sound cues the game can request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sound {
    PaddleHit,
    WallHit,
    /// Brick destruction; `pitch` scales the cue (laser kills play low,
    /// high-value bricks play high)
    BrickHit { pitch: f32 },
    LaserShoot,
    PowerUpCollect,
    BallLost,
    Win,
    GameOver,
}

/// Playback backend
pub trait AudioSink {
    fn play(&mut self, sound: Sound);
}

/// Sink that discards every cue
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _sound: Sound) {}
}

/// Sink that logs cues instead of playing them, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, sound: Sound) {
        log::debug!("audio cue: {:?}", sound);
    }
}

/// Maps tick events onto sound cues, with a mute switch
#[derive(Debug)]
pub struct AudioRouter<S: AudioSink> {
    sink: S,
    muted: bool,
}

impl<S: AudioSink> AudioRouter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, muted: false }
    }

    /// Flip the mute switch, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        log::info!("audio {}", if self.muted { "muted" } else { "unmuted" });
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Dispatch one tick's events to the sink
    ///
    /// `LifeLost` is intentionally silent; the preceding `BallLost` in the
    /// same tick already carries the cue.
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        if self.muted {
            return;
        }
        for event in events {
            if let Some(sound) = Self::cue_for(event) {
                self.sink.play(sound);
            }
        }
    }

    fn cue_for(event: &GameEvent) -> Option<Sound> {
        match event {
            GameEvent::PaddleHit => Some(Sound::PaddleHit),
            GameEvent::WallHit => Some(Sound::WallHit),
            GameEvent::BrickDestroyed { pitch, .. } => Some(Sound::BrickHit { pitch: *pitch }),
            GameEvent::LaserFired => Some(Sound::LaserShoot),
            GameEvent::PowerUpCollected { .. } => Some(Sound::PowerUpCollect),
            GameEvent::BallLost => Some(Sound::BallLost),
            GameEvent::LifeLost { .. } => None,
            GameEvent::RoundOver { won: true, .. } => Some(Sound::Win),
            GameEvent::RoundOver { won: false, .. } => Some(Sound::GameOver),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PowerUpKind;

    /// Sink that records everything it is asked to play
    #[derive(Debug, Default)]
    struct RecordingSink {
        played: Vec<Sound>,
    }

    impl AudioSink for RecordingSink {
        fn play(&mut self, sound: Sound) {
            self.played.push(sound);
        }
    }

    #[test]
    fn test_event_to_cue_mapping() {
        let mut router = AudioRouter::new(RecordingSink::default());
        router.dispatch(&[
            GameEvent::PaddleHit,
            GameEvent::BrickDestroyed {
                value: 60,
                pitch: 1.6,
                by_laser: false,
            },
            GameEvent::PowerUpCollected {
                kind: PowerUpKind::Laser,
            },
            GameEvent::RoundOver {
                score: 100,
                won: true,
            },
        ]);

        assert_eq!(
            router.sink.played,
            vec![
                Sound::PaddleHit,
                Sound::BrickHit { pitch: 1.6 },
                Sound::PowerUpCollect,
                Sound::Win,
            ]
        );
    }

    #[test]
    fn test_loss_events() {
        let mut router = AudioRouter::new(RecordingSink::default());
        router.dispatch(&[
            GameEvent::BallLost,
            GameEvent::LifeLost { lives_left: 2 },
        ]);
        // LifeLost is silent, only BallLost plays
        assert_eq!(router.sink.played, vec![Sound::BallLost]);

        router.dispatch(&[GameEvent::RoundOver {
            score: 40,
            won: false,
        }]);
        assert_eq!(router.sink.played.last(), Some(&Sound::GameOver));
    }

    #[test]
    fn test_mute_suppresses_everything() {
        let mut router = AudioRouter::new(RecordingSink::default());
        assert!(!router.is_muted());
        assert!(router.toggle_mute());

        router.dispatch(&[GameEvent::PaddleHit, GameEvent::WallHit]);
        assert!(router.sink.played.is_empty());

        assert!(!router.toggle_mute());
        router.dispatch(&[GameEvent::WallHit]);
        assert_eq!(router.sink.played, vec![Sound::WallHit]);
    }
}
