//! Round clock and score bookkeeping.

use crate::config::GameConfig;
use bevy::prelude::*;

/// Final-score bands, highest first.
const RATINGS: [(u32, &str); 6] = [
    (2000, "Legendary Dropper!"),
    (1500, "Master Bomber!"),
    (1000, "Expert Dropper!"),
    (500, "Skilled Dropper"),
    (200, "Decent Aim"),
    (50, "Beginner Bomber"),
];

/// End-of-round verdict for a final score.
pub fn rating(score: u32) -> &'static str {
    RATINGS
        .iter()
        .find(|(min, _)| score >= *min)
        .map_or("Keep Practicing!", |(_, label)| *label)
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RoundState {
    score: u32,
    time_remaining: f32,
    duration: f32,
    shots: u32,
    hits: u32,
    paused: bool,
    /// Terminal until [`RoundState::reset`].
    game_over: bool,
    score_multiplier: u32,
    /// Seconds left on the active score multiplier.
    multiplier_timer: f32,
}

impl RoundState {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_duration(config.round_duration)
    }

    pub fn with_duration(duration: f32) -> Self {
        Self {
            score: 0,
            time_remaining: duration,
            duration,
            shots: 0,
            hits: 0,
            paused: false,
            game_over: false,
            score_multiplier: 1,
            multiplier_timer: 0.0,
        }
    }

    /// Back to a fresh round of the same length.
    pub fn reset(&mut self) {
        *self = Self::with_duration(self.duration);
    }

    /// Count the clock down.  Returns true on the single tick the round ends.
    pub fn update(&mut self, delta: f32) -> bool {
        if !self.is_running() {
            return false;
        }

        if self.multiplier_timer > 0.0 {
            self.multiplier_timer -= delta;
            if self.multiplier_timer <= 0.0 {
                self.multiplier_timer = 0.0;
                self.score_multiplier = 1;
            }
        }

        self.time_remaining -= delta;
        if self.time_remaining > 0.0 {
            return false;
        }
        self.time_remaining = 0.0;
        self.game_over = true;
        true
    }

    /// Award `points` scaled by the active multiplier.  Returns what was
    /// actually added.
    pub fn add_score(&mut self, points: u32) -> u32 {
        let awarded = points.saturating_mul(self.score_multiplier);
        self.score = self.score.saturating_add(awarded);
        awarded
    }

    pub fn record_shot(&mut self) {
        self.shots += 1;
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Hit percentage; 0 before the first shot.
    pub fn accuracy(&self) -> f32 {
        if self.shots == 0 {
            return 0.0;
        }
        self.hits as f32 / self.shots as f32 * 100.0
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Multiply future awards by `multiplier` for `duration` seconds of round
    /// time.  A second activation replaces the multiplier and keeps the longer
    /// of the two timers.
    pub fn activate_score_multiplier(&mut self, multiplier: u32, duration: f32) {
        self.score_multiplier = multiplier.max(1);
        self.multiplier_timer = self.multiplier_timer.max(duration);
    }

    /// Clock running: neither paused nor over.
    #[inline]
    pub fn is_running(&self) -> bool {
        !self.paused && !self.game_over
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    pub fn shots(&self) -> u32 {
        self.shots
    }

    #[inline]
    pub fn hits(&self) -> u32 {
        self.hits
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[inline]
    pub fn score_multiplier(&self) -> u32 {
        self.score_multiplier
    }

    #[inline]
    pub fn multiplier_time_remaining(&self) -> f32 {
        self.multiplier_timer
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
