//! Periodic timers on the simulation clock
//!
//! Spawners and enemy fire run off these instead of host callbacks, so they
//! advance with the fixed timestep and stay deterministic. Enemy fire timers
//! name their enemy by [`EntityId`]; the tick checks the enemy is still in
//! the store before acting on one.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;

/// Handle to a scheduled timer (never reused)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u32);

/// What a timer does when it comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    SpawnEnemy,
    SpawnCollectible,
    EnemyFire(EntityId),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Timer {
    id: TimerId,
    kind: TimerKind,
    period_ms: f64,
    next_due_ms: f64,
}

/// Set of periodic timers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    timers: Vec<Timer>,
    next_id: u32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `kind` every `period_ms`, first at `now_ms + period_ms`
    ///
    /// `period_ms` must be positive; a non-positive period never fires.
    pub fn every(&mut self, now_ms: f64, period_ms: f64, kind: TimerKind) -> TimerId {
        debug_assert!(period_ms > 0.0, "timer period must be positive, got {period_ms}");
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push(Timer {
            id,
            kind,
            period_ms,
            next_due_ms: now_ms + period_ms,
        });
        id
    }

    /// Returns true if the timer was still scheduled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel everything (ids keep counting up)
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Next due time of a timer
    pub fn next_due(&self, id: TimerId) -> Option<f64> {
        self.timers.iter().find(|t| t.id == id).map(|t| t.next_due_ms)
    }

    /// Move a timer's next firing (tests and scripted scenarios)
    pub fn set_next_due(&mut self, id: TimerId, due_ms: f64) -> bool {
        match self.timers.iter_mut().find(|t| t.id == id) {
            Some(timer) => {
                timer.next_due_ms = due_ms;
                true
            }
            None => false,
        }
    }

    /// Collect every firing due at or before `now_ms`
    ///
    /// A timer that fell several periods behind fires once per missed
    /// period. Firings come back ordered by due time, ties by timer id.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<TimerKind> {
        let mut fired: Vec<(f64, TimerId, TimerKind)> = Vec::new();
        for timer in self.timers.iter_mut().filter(|t| t.period_ms > 0.0) {
            while timer.next_due_ms <= now_ms {
                fired.push((timer.next_due_ms, timer.id, timer.kind));
                timer.next_due_ms += timer.period_ms;
            }
        }
        fired.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        fired.into_iter().map(|(_, _, kind)| kind).collect()
    }
}
