//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Presentation timings for the three timed battle phases.
///
/// A headless host can use `PhaseTimings::instant()`; the engine only
/// requires that randomness is drawn after the battling phase elapses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTimings {
    /// Charging → Colliding.
    pub charging: Duration,
    /// Colliding → Battling.
    pub colliding: Duration,
    /// Battling → Resolved.
    pub battling: Duration,
}

impl Default for PhaseTimings {
    fn default() -> Self {
        Self {
            charging: Duration::from_millis(1000),
            colliding: Duration::from_millis(600),
            battling: Duration::from_millis(1500),
        }
    }
}

impl PhaseTimings {
    /// All phases elapse with zero delay.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            charging: Duration::ZERO,
            colliding: Duration::ZERO,
            battling: Duration::ZERO,
        }
    }

    /// Total time from Charging to Resolved, saturating at `Duration::MAX`.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.charging
            .saturating_add(self.colliding)
            .saturating_add(self.battling)
    }
}

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Face-up probability of both sides before modifiers (default: 0.5).
    pub base_probability: f64,

    /// Consecutive draws that force a draw by repetition (default: 5).
    /// Zero behaves as one.
    pub max_consecutive_draws: u32,

    /// Battle phase durations.
    pub timings: PhaseTimings,

    /// Report resolved rounds and game end to the sync sink.
    pub sync_enabled: bool,

    /// Seed for the battle RNG.
    /// Same seed produces the same sequence of flips.
    pub seed: u64,

    /// Cards per side when dealing from a catalog.
    pub hand_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_probability: 0.5,
            max_consecutive_draws: 5,
            timings: PhaseTimings::default(),
            sync_enabled: true,
            seed: 42,
            hand_size: 5,
        }
    }
}

impl EngineConfig {
    /// Draw cap with the zero case folded to one.
    #[must_use]
    pub fn draw_cap(&self) -> u32 {
        self.max_consecutive_draws.max(1)
    }

    pub fn with_base_probability(mut self, p: f64) -> Self {
        self.base_probability = p;
        self
    }

    pub fn with_max_consecutive_draws(mut self, max: u32) -> Self {
        self.max_consecutive_draws = max;
        self
    }

    pub fn with_timings(mut self, timings: PhaseTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn with_sync(mut self, enabled: bool) -> Self {
        self.sync_enabled = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }
}
