#![forbid(unsafe_code)]

//! Fixed-step frame clock.
//!
//! Nothing in the runtime reads wall time. A host (the browser's frame
//! callback, the demo binary, a test) owns a [`FrameClock`] and feeds each
//! step into `tick(dt)`, which keeps every replay deterministic.

use std::time::Duration;

use folio_core::error::{ConfigurationError, Result};

/// Default frame rate of the demo driver.
pub const DEFAULT_FPS: u32 = 60;

/// Monotonic clock advancing in equal steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    step: Duration,
    frame: u64,
    now: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            step: Duration::from_secs(1) / DEFAULT_FPS,
            frame: 0,
            now: Duration::ZERO,
        }
    }
}

impl FrameClock {
    /// Clock stepping at `fps` frames per second.
    pub fn from_fps(fps: u32) -> Result<Self> {
        if fps == 0 {
            return Err(ConfigurationError::ZeroDuration { field: "fps" });
        }
        Self::from_step(Duration::from_secs(1) / fps)
    }

    /// Clock stepping by `step`.
    pub fn from_step(step: Duration) -> Result<Self> {
        if step.is_zero() {
            return Err(ConfigurationError::ZeroDuration {
                field: "frame step",
            });
        }
        Ok(Self {
            step,
            ..Self::default()
        })
    }

    /// Advance one frame and return the step to tick by.
    pub fn advance(&mut self) -> Duration {
        self.frame += 1;
        self.now = self.now.saturating_add(self.step);
        self.step
    }

    /// Length of one frame.
    #[must_use]
    pub const fn step(&self) -> Duration {
        self.step
    }

    /// Frames advanced so far.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Time advanced so far.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.now
    }

    /// Frames needed to cover at least `span`.
    #[must_use]
    pub fn frames_for(&self, span: Duration) -> u64 {
        let step = self.step.as_nanos();
        let span = span.as_nanos();
        u64::try_from(span.div_ceil(step)).unwrap_or(u64::MAX)
    }
}
