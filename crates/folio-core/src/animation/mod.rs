#![forbid(unsafe_code)]

//! Declarative animation primitives.
//!
//! Everything here is driven by an external frame clock: nothing advances
//! unless [`KeyframeTrack::tick`] is called with a delta. Values are plain
//! `f32`s; what they mean (opacity, percent offset) is up to the caller.
//!
//! # Building blocks
//!
//! | Type | Role |
//! |------|------|
//! | [`Easing`] | Named timing curves (CSS cubic-bézier equivalents) |
//! | [`Timing`] | Delay + duration + easing for one leg of motion |
//! | [`KeyframeTrack`] | Initial/animate/exit state machine for one property |
//! | [`stagger_offsets`] | Per-item start offsets for cascading motion |
//!
//! # Invariants
//!
//! 1. `Timing::progress_at` is 0.0 before the delay elapses and 1.0 once
//!    `delay + duration` has elapsed.
//! 2. Zero durations are treated as instantaneous, never divided by.
//! 3. All primitives are deterministic: identical tick sequences produce
//!    identical values.

use std::time::Duration;

mod easing;
mod keyframe;
mod stagger;

pub use easing::Easing;
pub use keyframe::{Completion, KeyframeTrack, TransitionPhase, Variants};
pub use stagger::{StaggerMode, StaggerPlan, reverse_index, stagger_offsets};

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// When and how fast one leg of motion runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    /// Wait before motion starts.
    pub delay: Duration,
    /// Length of the motion itself.
    pub duration: Duration,
    /// Curve applied to linear progress.
    pub easing: Easing,
}

impl Timing {
    /// Linear motion over `duration` with no delay.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            delay: Duration::ZERO,
            duration,
            easing: Easing::Linear,
        }
    }

    /// Set the start delay (builder pattern).
    #[must_use]
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub const fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Delay plus duration.
    #[inline]
    #[must_use]
    pub fn total(&self) -> Duration {
        self.delay.saturating_add(self.duration)
    }

    /// Eased progress in [0.0, 1.0] after `elapsed` time.
    #[must_use]
    pub fn progress_at(&self, elapsed: Duration) -> f32 {
        if elapsed < self.delay {
            return 0.0;
        }
        let moving = elapsed - self.delay;
        if self.duration.is_zero() || moving >= self.duration {
            return 1.0;
        }
        let t = (moving.as_secs_f64() / self.duration.as_secs_f64()) as f32;
        self.easing.apply(t)
    }
}

/// Linear interpolation between `a` and `b`.
#[inline]
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
