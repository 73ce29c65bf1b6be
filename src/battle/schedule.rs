//! Timer scheduling for battle phases.
//!
//! Each timed phase declares a duration; when it elapses the controller
//! advances the battle machine. The `Scheduler` trait lets a host plug in
//! its own event loop, while tests use a manually stepped clock or a
//! zero-delay queue.
//!
//! Timers carry the controller generation and round they were armed for.
//! A timer whose generation no longer matches is dropped on delivery.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::time::Duration;

use super::machine::BattlePhase;

/// A pending phase transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhaseTimer {
    /// Controller generation the timer belongs to.
    pub generation: u64,
    /// Round the timer was armed in.
    pub round: u32,
    /// Phase that must still be current when the timer fires.
    pub from: BattlePhase,
}

/// Source of phase timer deliveries.
pub trait Scheduler {
    /// Current time since the scheduler started.
    fn now(&self) -> Duration;

    /// Arm a timer to fire after `delay`.
    fn schedule(&mut self, delay: Duration, timer: PhaseTimer);

    /// Next timer that is due, if any.
    fn pop_due(&mut self) -> Option<PhaseTimer>;

    /// Discard all pending timers.
    fn clear(&mut self);

    /// Number of pending timers.
    fn pending(&self) -> usize;
}

/// Timers fire in due-time order, ties broken by insertion order.
/// The sequence number is unique, so the payload never decides ordering.
type TimerKey = Reverse<(Duration, u64)>;

/// Manually stepped virtual clock.
///
/// ```
/// use std::time::Duration;
/// use rust_duel::battle::{BattlePhase, ManualScheduler, PhaseTimer, Scheduler};
///
/// let mut scheduler = ManualScheduler::new();
/// let timer = PhaseTimer { generation: 0, round: 1, from: BattlePhase::Charging };
/// scheduler.schedule(Duration::from_millis(100), timer);
///
/// assert!(scheduler.pop_due().is_none());
/// scheduler.advance(Duration::from_millis(100));
/// assert_eq!(scheduler.pop_due(), Some(timer));
/// ```
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    sequence: u64,
    queue: BinaryHeap<(TimerKey, PhaseTimer)>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward.
    pub fn advance(&mut self, by: Duration) {
        self.now = self.now.saturating_add(by);
    }

    /// Time until the next timer is due.
    #[must_use]
    pub fn next_due_in(&self) -> Option<Duration> {
        self.queue
            .peek()
            .map(|(Reverse((due, _)), _)| due.saturating_sub(self.now))
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule(&mut self, delay: Duration, timer: PhaseTimer) {
        let key = Reverse((self.now.saturating_add(delay), self.sequence));
        self.sequence += 1;
        self.queue.push((key, timer));
    }

    fn pop_due(&mut self) -> Option<PhaseTimer> {
        let (Reverse((due, _)), _) = self.queue.peek()?;
        if *due > self.now {
            return None;
        }
        self.queue.pop().map(|(_, timer)| timer)
    }

    fn clear(&mut self) {
        self.queue.clear();
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}

/// Every timer is due as soon as it is scheduled.
#[derive(Debug, Default)]
pub struct ImmediateScheduler {
    queue: VecDeque<PhaseTimer>,
}

impl ImmediateScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for ImmediateScheduler {
    fn now(&self) -> Duration {
        Duration::ZERO
    }

    fn schedule(&mut self, _delay: Duration, timer: PhaseTimer) {
        self.queue.push_back(timer);
    }

    fn pop_due(&mut self) -> Option<PhaseTimer> {
        self.queue.pop_front()
    }

    fn clear(&mut self) {
        self.queue.clear();
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}
