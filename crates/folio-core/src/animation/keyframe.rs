#![forbid(unsafe_code)]

//! Keyframe track: the initial → animate → exit state machine for one
//! animated property of one mounted instance.
//!
//! # State machine
//!
//! ```text
//!            start()              tick() reaches end
//! Initial ──────────▶ Animating ─────────────────────▶ Settled
//!    │                    │                               │
//!    │ begin_exit()       │ begin_exit()                  │ begin_exit()
//!    ▼                    ▼                               ▼
//!  Exiting ◀──────────────┴───────────────────────────────┘
//!    │ tick() reaches end (or no exit keyframes)
//!    ▼
//!  Exited
//!
//! cancel() from any non-terminal phase ─▶ Superseded
//! ```
//!
//! # Invariants
//!
//! 1. `Exited` and `Superseded` are terminal; every mutator is a no-op there.
//! 2. `tick()` reports each completion exactly once.
//! 3. A track without exit keyframes reaches `Exited` the moment
//!    `begin_exit()` is called.
//! 4. `value()` in `Superseded` is frozen at the value observed on cancel.

use std::time::Duration;

use super::{Timing, lerp};

/// Keyframe values for the three named states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variants {
    /// Value while mounted but not yet started.
    pub initial: f32,
    /// Target value of the enter animation.
    pub animate: f32,
    /// Exit keyframes `(from, to)`. `None` means the instance disappears
    /// immediately on exit.
    pub exit: Option<(f32, f32)>,
}

impl Variants {
    /// Enter-only variants (no exit keyframes).
    #[must_use]
    pub const fn enter(initial: f32, animate: f32) -> Self {
        Self {
            initial,
            animate,
            exit: None,
        }
    }

    /// Add exit keyframes (builder pattern).
    #[must_use]
    pub const fn with_exit(mut self, from: f32, to: f32) -> Self {
        self.exit = Some((from, to));
        self
    }
}

/// Lifecycle phase of one mounted instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TransitionPhase {
    /// Mounted, showing the initial keyframe.
    #[default]
    Initial,
    /// Enter animation in progress (including its delay).
    Animating,
    /// Enter animation finished; still mounted.
    Settled,
    /// Exit keyframes playing.
    Exiting,
    /// Exit finished; safe to discard.
    Exited,
    /// Discarded before its exit finished.
    Superseded,
}

impl TransitionPhase {
    /// Whether no further transition is possible.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Exited | Self::Superseded)
    }

    /// Whether the instance should still be drawn.
    #[inline]
    #[must_use]
    pub const fn is_visible(self) -> bool {
        !self.is_terminal()
    }

    /// Whether a timed animation is running.
    #[inline]
    #[must_use]
    pub const fn is_animating(self) -> bool {
        matches!(self, Self::Animating | Self::Exiting)
    }
}

/// Completion reported by [`KeyframeTrack::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The enter animation reached its target.
    Entered,
    /// The exit animation finished.
    Exited,
}

/// One property animated through [`Variants`].
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTrack {
    variants: Variants,
    timing: Timing,
    phase: TransitionPhase,
    /// Time spent in the current timed phase.
    elapsed: Duration,
    frozen: f32,
}

impl KeyframeTrack {
    /// Create a track that enters and exits on the same timing.
    #[must_use]
    pub fn new(variants: Variants, timing: Timing) -> Self {
        Self {
            variants,
            timing,
            phase: TransitionPhase::Initial,
            elapsed: Duration::ZERO,
            frozen: variants.initial,
        }
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Begin the enter animation. Returns `false` unless the track was
    /// `Initial`.
    pub fn start(&mut self) -> bool {
        if self.phase != TransitionPhase::Initial {
            return false;
        }
        self.phase = TransitionPhase::Animating;
        self.elapsed = Duration::ZERO;
        true
    }

    /// Switch to the exit keyframes.
    ///
    /// Any in-flight enter progress is dropped: exit keyframes always start
    /// from their own `from` value. Returns `false` if the track was already
    /// exiting or terminal.
    pub fn begin_exit(&mut self) -> bool {
        match self.phase {
            TransitionPhase::Initial | TransitionPhase::Animating | TransitionPhase::Settled => {
                self.elapsed = Duration::ZERO;
                self.phase = if self.variants.exit.is_some() {
                    TransitionPhase::Exiting
                } else {
                    TransitionPhase::Exited
                };
                true
            }
            TransitionPhase::Exiting | TransitionPhase::Exited | TransitionPhase::Superseded => {
                false
            }
        }
    }

    /// Abandon the track wherever it is. Returns `false` if already terminal.
    pub fn cancel(&mut self) -> bool {
        if self.phase.is_terminal() {
            return false;
        }
        self.frozen = self.value();
        self.phase = TransitionPhase::Superseded;
        true
    }

    /// Advance by `dt`, reporting a completion when a timed phase ends.
    pub fn tick(&mut self, dt: Duration) -> Option<Completion> {
        match self.phase {
            TransitionPhase::Animating => {
                self.elapsed = self.elapsed.saturating_add(dt);
                if self.elapsed >= self.timing.total() {
                    self.phase = TransitionPhase::Settled;
                    return Some(Completion::Entered);
                }
                None
            }
            TransitionPhase::Exiting => {
                self.elapsed = self.elapsed.saturating_add(dt);
                if self.elapsed >= self.timing.total() {
                    self.phase = TransitionPhase::Exited;
                    return Some(Completion::Exited);
                }
                None
            }
            TransitionPhase::Initial
            | TransitionPhase::Settled
            | TransitionPhase::Exited
            | TransitionPhase::Superseded => None,
        }
    }

    /// Current property value.
    #[must_use]
    pub fn value(&self) -> f32 {
        let Variants {
            initial,
            animate,
            exit,
        } = self.variants;
        match self.phase {
            TransitionPhase::Initial => initial,
            TransitionPhase::Animating => lerp(initial, animate, self.timing.progress_at(self.elapsed)),
            TransitionPhase::Settled => animate,
            TransitionPhase::Exiting => match exit {
                Some((from, to)) => lerp(from, to, self.timing.progress_at(self.elapsed)),
                None => animate,
            },
            TransitionPhase::Exited => exit.map_or(animate, |(_, to)| to),
            TransitionPhase::Superseded => self.frozen,
        }
    }

    /// Time spent in the current timed phase.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
