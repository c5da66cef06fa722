#![forbid(unsafe_code)]

//! Stagger: per-item start offsets for cascading motion.
//!
//! A bank of `count` items shares one duration and easing; only the start
//! delay differs. In [`StaggerMode::Reverse`] the last item starts first and
//! the first item starts last:
//!
//! ```text
//! delay(i) = (count - 1 - i) * unit
//! ```
//!
//! # Invariants
//!
//! 1. Offsets are a pure function of `(count, unit, mode)`.
//! 2. Reverse mode: `delay(count - 1) == 0` and `delay(0) == (count - 1) * unit`.
//! 3. With `unit > 0` reverse offsets are strictly decreasing in the index,
//!    forward offsets strictly increasing.

use std::time::Duration;

use super::{Easing, Timing};
use crate::error::{ConfigurationError, Result};

/// Ordering of start offsets across the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum StaggerMode {
    /// Item 0 starts first.
    Forward,
    /// The last item starts first.
    #[default]
    Reverse,
}

/// Mirror an index within a bank of `count` items.
///
/// Returns `None` when `index` is out of range.
#[inline]
#[must_use]
pub fn reverse_index(index: usize, count: usize) -> Option<usize> {
    (index < count).then(|| count - index - 1)
}

/// Start offsets for `count` items spaced `unit` apart.
#[must_use]
pub fn stagger_offsets(count: usize, unit: Duration, mode: StaggerMode) -> Vec<Duration> {
    (0..count)
        .map(|i| {
            let steps = match mode {
                StaggerMode::Forward => i,
                StaggerMode::Reverse => count - i - 1,
            };
            scale(unit, steps)
        })
        .collect()
}

fn scale(unit: Duration, steps: usize) -> Duration {
    unit.saturating_mul(u32::try_from(steps).unwrap_or(u32::MAX))
}

/// Validated timing plan for a staggered bank.
///
/// Construction rejects an empty bank and a zero duration; the per-item
/// mapping is then total over `[0, count)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaggerPlan {
    count: usize,
    unit: Duration,
    duration: Duration,
    easing: Easing,
    mode: StaggerMode,
}

impl StaggerPlan {
    /// Reverse-ordered plan with linear easing.
    pub fn new(count: usize, unit: Duration, duration: Duration) -> Result<Self> {
        if count == 0 {
            return Err(ConfigurationError::ZeroPanels);
        }
        if duration.is_zero() {
            return Err(ConfigurationError::ZeroDuration {
                field: "stagger.duration",
            });
        }
        Ok(Self {
            count,
            unit,
            duration,
            easing: Easing::Linear,
            mode: StaggerMode::Reverse,
        })
    }

    /// Set the shared easing (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the stagger ordering (builder pattern).
    #[must_use]
    pub fn mode(mut self, mode: StaggerMode) -> Self {
        self.mode = mode;
        self
    }

    /// Number of items.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Spacing between consecutive starts.
    #[must_use]
    pub const fn unit(&self) -> Duration {
        self.unit
    }

    /// Shared per-item duration.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Ordering of starts.
    #[must_use]
    pub const fn stagger_mode(&self) -> StaggerMode {
        self.mode
    }

    /// Start delay for item `index`.
    #[must_use]
    pub fn delay(&self, index: usize) -> Option<Duration> {
        if index >= self.count {
            return None;
        }
        let steps = match self.mode {
            StaggerMode::Forward => index,
            StaggerMode::Reverse => self.count - index - 1,
        };
        Some(scale(self.unit, steps))
    }

    /// Full timing for item `index`.
    #[must_use]
    pub fn timing(&self, index: usize) -> Option<Timing> {
        self.delay(index).map(|delay| {
            Timing::new(self.duration)
                .delay(delay)
                .easing(self.easing)
        })
    }

    /// All start delays, indexed by item.
    #[must_use]
    pub fn delays(&self) -> Vec<Duration> {
        stagger_offsets(self.count, self.unit, self.mode)
    }

    /// Time from the first start until the last item finishes.
    #[must_use]
    pub fn span(&self) -> Duration {
        scale(self.unit, self.count - 1).saturating_add(self.duration)
    }
}
