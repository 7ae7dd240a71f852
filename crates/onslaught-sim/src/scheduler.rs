//! Deferred actions on simulation time.
//!
//! Every entry carries the round it was scheduled in. Starting a new game
//! bumps the round, and entries from an older round are dropped when they
//! come due instead of firing. Time only advances while the game runs, so
//! pending actions freeze during a pause.

use tracing::trace;

#[derive(Debug, Clone)]
struct Scheduled<T> {
    due_secs: f64,
    round: u32,
    action: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    entries: Vec<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: std::fmt::Debug> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to run `delay_secs` after `now_secs`.
    pub fn schedule(&mut self, now_secs: f64, delay_secs: f32, round: u32, action: T) {
        self.entries.push(Scheduled {
            due_secs: now_secs + delay_secs.max(0.0) as f64,
            round,
            action,
        });
    }

    /// Remove and return every action due at `now_secs` that belongs to
    /// `round`, earliest first. Due actions from other rounds are discarded.
    pub fn take_due(&mut self, now_secs: f64, round: u32) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| entry.due_secs <= now_secs);
        self.entries = pending;

        due.sort_by(|a, b| a.due_secs.total_cmp(&b.due_secs));
        due.into_iter()
            .filter_map(|entry| {
                if entry.round == round {
                    Some(entry.action)
                } else {
                    trace!(
                        action = ?entry.action,
                        round = entry.round,
                        current = round,
                        "dropping stale deferred action"
                    );
                    None
                }
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
