#![forbid(unsafe_code)]

//! Page fade: a solid overlay that holds opaque, then fades to clear, every
//! time the route changes.
//!
//! Each navigation mounts a fresh [`FadeOverlay`] through a concurrent
//! [`KeyedPresence`]. The overlay has no exit keyframes, so the previous one
//! vanishes the instant it is replaced and the new one starts opaque.

use std::time::Duration;

use folio_core::animation::{Completion, KeyframeTrack, Timing, TransitionPhase, Variants};
use folio_core::error::Result;
use folio_core::route::RouteId;
use folio_core::theme::{Rgb, palette};

use crate::config::FadeConfig;
use crate::orchestrator::Decoration;
use crate::presence::{KeyedPresence, LifecycleEvent, Observation, SequencingMode, Transition};
use crate::scene::{Layer, LayerKind, PointerEvents};

/// Overlay opacity keyframes: opaque on mount, clear once entered.
const FADE_VARIANTS: Variants = Variants::enter(1.0, 0.0);

/// One mounted fade overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct FadeOverlay {
    track: KeyframeTrack,
}

impl FadeOverlay {
    #[must_use]
    pub fn new(timing: Timing) -> Self {
        Self {
            track: KeyframeTrack::new(FADE_VARIANTS, timing),
        }
    }

    /// Current opacity in [0, 1].
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.track.value()
    }

    #[must_use]
    pub fn track(&self) -> &KeyframeTrack {
        &self.track
    }
}

impl Transition for FadeOverlay {
    fn start(&mut self) {
        self.track.start();
    }

    fn begin_exit(&mut self) {
        self.track.begin_exit();
    }

    fn cancel(&mut self) {
        self.track.cancel();
    }

    fn tick(&mut self, dt: Duration) -> Option<Completion> {
        self.track.tick(dt)
    }

    fn phase(&self) -> TransitionPhase {
        self.track.phase()
    }
}

/// Full-viewport fade decoration keyed by route.
#[derive(Debug)]
pub struct PageFade {
    presence: KeyedPresence<FadeOverlay>,
    fill: Rgb,
}

impl PageFade {
    /// Fade decoration with the given overlay timing and fill.
    #[must_use]
    pub fn new(timing: Timing, fill: Rgb) -> Self {
        Self {
            presence: KeyedPresence::new("page_fade", SequencingMode::Concurrent, move |_| {
                FadeOverlay::new(timing)
            }),
            fill,
        }
    }

    /// Fade decoration from configuration, filled with the primary colour.
    pub fn from_config(config: &FadeConfig) -> Result<Self> {
        Ok(Self::new(config.timing()?, palette::PRIMARY))
    }

    /// Underlying presence, for journal inspection.
    #[must_use]
    pub fn presence(&self) -> &KeyedPresence<FadeOverlay> {
        &self.presence
    }
}

impl Decoration for PageFade {
    fn name(&self) -> &'static str {
        "page_fade"
    }

    fn observe(&mut self, route: &RouteId) -> Observation {
        self.presence.observe(route)
    }

    fn tick(&mut self, dt: Duration) {
        self.presence.tick(dt);
    }

    fn layers(&self) -> Vec<Layer> {
        self.presence
            .instances()
            .map(|instance| Layer {
                kind: LayerKind::FadeOverlay,
                instance: instance.id(),
                route: instance.key().clone(),
                phase: instance.transition().phase(),
                z_index: 0,
                fill: self.fill,
                opacity: instance.transition().opacity(),
                pointer_events: PointerEvents::None,
                panels: Vec::new(),
            })
            .collect()
    }

    fn is_idle(&self) -> bool {
        self.presence.pending().is_none()
            && self.presence.exiting().is_empty()
            && self
                .presence
                .current()
                .is_none_or(|i| !i.transition().phase().is_animating())
    }

    fn drain_journal(&mut self) -> Vec<LifecycleEvent> {
        self.presence.drain_journal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::LifecycleKind;

    fn page_fade() -> PageFade {
        PageFade::from_config(&FadeConfig::default()).unwrap()
    }

    #[test]
    fn overlay_starts_opaque_and_clears() {
        let mut fade = page_fade();
        fade.observe(&RouteId::root());
        let layers = fade.layers();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].opacity, 1.0);
        assert_eq!(layers[0].fill, palette::PRIMARY);
        assert_eq!(layers[0].pointer_events, PointerEvents::None);
        assert!(!fade.is_idle());

        fade.tick(Duration::from_millis(1000));
        assert_eq!(fade.layers()[0].opacity, 1.0);
        fade.tick(Duration::from_millis(200));
        let mid = fade.layers()[0].opacity;
        assert!(mid > 0.0 && mid < 1.0, "mid-fade opacity {mid}");
        fade.tick(Duration::from_millis(200));
        assert_eq!(fade.layers()[0].opacity, 0.0);
        assert!(fade.is_idle());
    }

    #[test]
    fn navigation_replaces_overlay_instantly() {
        let mut fade = page_fade();
        fade.observe(&RouteId::root());
        fade.tick(Duration::from_secs(2));
        assert_eq!(fade.layers()[0].opacity, 0.0);

        fade.observe(&RouteId::new("/work"));
        let layers = fade.layers();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].route.as_str(), "/work");
        assert_eq!(layers[0].opacity, 1.0);

        let kinds: Vec<LifecycleKind> = fade.presence().journal().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LifecycleKind::Mounted,
                LifecycleKind::EnterCompleted,
                LifecycleKind::ExitStarted,
                LifecycleKind::ExitCompleted,
                LifecycleKind::Mounted,
            ]
        );
    }

    #[test]
    fn same_route_does_not_replay() {
        let mut fade = page_fade();
        fade.observe(&RouteId::root());
        fade.tick(Duration::from_secs(2));
        assert_eq!(fade.observe(&RouteId::root()), Observation::Unchanged);
        assert_eq!(fade.layers()[0].opacity, 0.0);
    }
}
