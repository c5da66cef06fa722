#![forbid(unsafe_code)]

//! Transition orchestrator: wraps page content with the fade overlay and the
//! stair wipe.
//!
//! # Frame loop
//!
//! ```text
//! render:  orchestrator.sync(&signal)     // feed the current route
//! frame:   orchestrator.tick(step)        // advance both decorations
//!          paint(orchestrator.frame())    // layers above the page
//! ```
//!
//! Both decorations observe the same route value. They differ only in
//! sequencing: the fade replaces its overlay instantly, the stair wipe plays
//! its exit before the next wipe mounts. Neither ever intercepts input.

use std::time::Duration;

use folio_core::error::Result;
use folio_core::route::RouteId;
use tracing::debug;

use crate::config::FolioConfig;
use crate::fade::PageFade;
use crate::presence::{LifecycleEvent, Observation};
use crate::scene::{DecorationFrame, Layer};
use crate::signal::RouteSignal;
use crate::stairs::StairTransition;

/// A route-keyed visual layer drawn above the page.
pub trait Decoration {
    /// Stable name for logs and journals.
    fn name(&self) -> &'static str;

    /// Feed the current route.
    fn observe(&mut self, route: &RouteId) -> Observation;

    /// Advance animations by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Layers to paint this frame, in paint order.
    fn layers(&self) -> Vec<Layer>;

    /// Whether nothing is animating or waiting.
    fn is_idle(&self) -> bool;

    /// Take retained lifecycle events.
    fn drain_journal(&mut self) -> Vec<LifecycleEvent>;
}

/// What one route observation did to each decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    pub fade: Observation,
    pub stairs: Observation,
}

impl SyncOutcome {
    /// Whether either decoration reacted.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.fade != Observation::Unchanged || self.stairs != Observation::Unchanged
    }
}

/// Fade overlay plus stair wipe, driven by one route.
#[derive(Debug)]
pub struct TransitionOrchestrator {
    fade: PageFade,
    stairs: StairTransition,
    clock: Duration,
}

impl TransitionOrchestrator {
    /// Validate `config` and build both decorations from it.
    pub fn new(config: &FolioConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(
            PageFade::from_config(&config.fade)?,
            StairTransition::from_config(&config.stairs, &config.fade)?,
        ))
    }

    /// Stock site transitions.
    pub fn with_defaults() -> Result<Self> {
        Self::new(&FolioConfig::default())
    }

    /// Assemble from prebuilt decorations.
    #[must_use]
    pub fn from_parts(fade: PageFade, stairs: StairTransition) -> Self {
        Self {
            fade,
            stairs,
            clock: Duration::ZERO,
        }
    }

    /// Read the active route from `signal` and feed it to both decorations.
    ///
    /// Call on every render; unchanged routes cost nothing.
    pub fn sync(&mut self, signal: &RouteSignal) -> SyncOutcome {
        let route = signal.current();
        let outcome = self.observe(&route);
        if outcome.changed() {
            debug!(
                route = %route,
                version = signal.version(),
                fade = ?outcome.fade,
                stairs = ?outcome.stairs,
                "orchestrator.sync"
            );
        }
        outcome
    }

    /// Feed `route` to both decorations.
    pub fn observe(&mut self, route: &RouteId) -> SyncOutcome {
        SyncOutcome {
            fade: self.fade.observe(route),
            stairs: self.stairs.observe(route),
        }
    }

    /// Advance both decorations by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.clock = self.clock.saturating_add(dt);
        for decoration in self.decorations_mut() {
            decoration.tick(dt);
        }
    }

    /// Snapshot of everything to paint.
    #[must_use]
    pub fn frame(&self) -> DecorationFrame {
        DecorationFrame {
            at_secs: self.clock.as_secs_f64(),
            fade: self.fade.layers(),
            stairs: self.stairs.layers(),
        }
    }

    /// Whether both decorations are at rest.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.fade.is_idle() && self.stairs.is_idle()
    }

    /// Total time ticked.
    #[must_use]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    #[must_use]
    pub fn fade(&self) -> &PageFade {
        &self.fade
    }

    #[must_use]
    pub fn stairs(&self) -> &StairTransition {
        &self.stairs
    }

    /// Lifecycle events from both decorations, tagged with the decoration
    /// name. Fade events come first; each list is in its own time order.
    pub fn drain_journal(&mut self) -> Vec<(&'static str, LifecycleEvent)> {
        let mut events = Vec::new();
        for decoration in self.decorations_mut() {
            let name = decoration.name();
            events.extend(decoration.drain_journal().into_iter().map(|e| (name, e)));
        }
        events
    }

    fn decorations_mut(&mut self) -> [&mut dyn Decoration; 2] {
        [&mut self.fade, &mut self.stairs]
    }
}
