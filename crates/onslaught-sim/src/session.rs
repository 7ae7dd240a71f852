//! Session state: wave progress, score and shot counters.
//!
//! Owned by the engine and passed to the combat and wave functions that
//! update it. Not stored in the ECS world.

use onslaught_core::constants::WAVE_CLEAR_BONUS;
use onslaught_core::enums::WavePhase;
use onslaught_core::events::FinalStats;
use onslaught_core::state::SessionView;

#[derive(Debug, Clone, Default)]
pub struct GameSession {
    /// Incremented by every new game. Deferred actions carry it.
    pub round: u32,
    pub wave: u32,
    pub wave_phase: WavePhase,
    pub score: u32,
    pub kills: u32,
    /// Trigger pulls that fired, one per volley.
    pub shots_fired: u32,
    /// Trigger pulls with at least one pellet on an enemy.
    pub shots_hit: u32,
    final_stats: Option<FinalStats>,
}

impl GameSession {
    /// Reset counters for a new game and return the new round id.
    pub fn begin_round(&mut self) -> u32 {
        let round = self.round.wrapping_add(1);
        *self = Self {
            round,
            wave: 1,
            ..Self::default()
        };
        round
    }

    pub fn record_shot(&mut self, hit: bool) {
        self.shots_fired += 1;
        if hit {
            self.shots_hit += 1;
        }
    }

    pub fn record_kill(&mut self, score: u32) {
        self.kills += 1;
        self.score = self.score.saturating_add(score);
    }

    /// Mark the current wave cleared and award its bonus.
    pub fn complete_wave(&mut self) -> u32 {
        let bonus = self.wave.saturating_mul(WAVE_CLEAR_BONUS);
        self.score = self.score.saturating_add(bonus);
        self.wave_phase = WavePhase::WaveComplete;
        bonus
    }

    /// Accuracy in whole percent.
    pub fn accuracy(&self) -> u32 {
        accuracy_percent(self.shots_hit, self.shots_fired)
    }

    /// Close the session. Returns the final stats the first time only.
    pub fn finish(&mut self, elapsed_secs: f64) -> Option<FinalStats> {
        if self.final_stats.is_some() {
            return None;
        }
        let stats = FinalStats {
            wave: self.wave,
            kills: self.kills,
            accuracy: self.accuracy(),
            elapsed_secs,
            score: self.score,
        };
        self.final_stats = Some(stats);
        Some(stats)
    }

    pub fn final_stats(&self) -> Option<FinalStats> {
        self.final_stats
    }

    pub fn view(&self, elapsed_secs: f64) -> SessionView {
        SessionView {
            score: self.score,
            kills: self.kills,
            shots_fired: self.shots_fired,
            shots_hit: self.shots_hit,
            accuracy: self.accuracy(),
            elapsed_secs,
        }
    }
}

/// Hits over shots in whole percent, rounded. Zero shots gives zero.
pub fn accuracy_percent(hits: u32, fired: u32) -> u32 {
    if fired == 0 {
        return 0;
    }
    ((hits as f64 / fired as f64) * 100.0).round() as u32
}
