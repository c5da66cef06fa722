#![forbid(unsafe_code)]

//! Stair wipe: a row of white panels that slide down one after another,
//! right-most first, over a fading underlay.
//!
//! # Structure
//!
//! ```text
//! StairTransition            wait-mode KeyedPresence<StairWipe>
//!   └─ StairWipe             one per route
//!        ├─ StairPanels      N KeyframeTracks on a reverse StaggerPlan
//!        └─ underlay         optional opacity KeyframeTrack (no exit)
//! ```
//!
//! Panel offsets are percentages of the panel's own height: 0 covers the
//! viewport, 100 is fully slid out below it. On exit the panels slide back
//! up (100 → 0) on the same staggered timing, and the next route's wipe
//! only mounts once they are all back.
//!
//! The underlay has no exit keyframes. It leaves the frame the moment its
//! wipe starts exiting instead of holding its last opacity until the panels
//! are back; only the panel row is drawn during an exit.

use std::time::Duration;

use folio_core::animation::{
    Completion, KeyframeTrack, StaggerPlan, Timing, TransitionPhase, Variants,
};
use folio_core::error::Result;
use folio_core::route::RouteId;
use folio_core::theme::{Rgb, palette};

use crate::config::{FadeConfig, StairConfig};
use crate::orchestrator::Decoration;
use crate::presence::{KeyedPresence, LifecycleEvent, Observation, SequencingMode, Transition};
use crate::scene::{Layer, LayerKind, PanelFrame, PointerEvents};

/// Panel offset keyframes, in percent of panel height.
const PANEL_VARIANTS: Variants = Variants::enter(0.0, 100.0).with_exit(100.0, 0.0);

/// Underlay opacity keyframes.
const UNDERLAY_VARIANTS: Variants = Variants::enter(1.0, 0.0);

/// Stacking order of the panel row.
pub const STAIR_Z_INDEX: i32 = 40;

/// Collapse per-track phases into one phase for the group.
fn aggregate(phases: impl Iterator<Item = TransitionPhase>) -> TransitionPhase {
    let mut any_exiting = false;
    let mut any_animating = false;
    let mut all_exited = true;
    let mut all_settled = true;
    let mut all_initial = true;
    for phase in phases {
        match phase {
            TransitionPhase::Superseded => return TransitionPhase::Superseded,
            TransitionPhase::Exiting => any_exiting = true,
            TransitionPhase::Animating => any_animating = true,
            _ => {}
        }
        all_exited &= phase == TransitionPhase::Exited;
        all_settled &= phase == TransitionPhase::Settled;
        all_initial &= phase == TransitionPhase::Initial;
    }
    if any_exiting {
        TransitionPhase::Exiting
    } else if all_exited {
        TransitionPhase::Exited
    } else if any_animating {
        TransitionPhase::Animating
    } else if all_settled {
        TransitionPhase::Settled
    } else if all_initial {
        TransitionPhase::Initial
    } else {
        TransitionPhase::Animating
    }
}

/// Translate a group phase change into a completion.
fn completion(before: TransitionPhase, after: TransitionPhase) -> Option<Completion> {
    match (before, after) {
        (TransitionPhase::Animating, TransitionPhase::Settled) => Some(Completion::Entered),
        (TransitionPhase::Exiting, TransitionPhase::Exited) => Some(Completion::Exited),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// StairPanels
// ---------------------------------------------------------------------------

/// Staggered panel animator: one offset track per panel.
#[derive(Debug, Clone, PartialEq)]
pub struct StairPanels {
    tracks: Vec<KeyframeTrack>,
}

impl StairPanels {
    /// One track per panel, timed by `plan`.
    #[must_use]
    pub fn new(plan: &StaggerPlan) -> Self {
        let tracks = (0..plan.count())
            .filter_map(|i| plan.timing(i))
            .map(|timing| KeyframeTrack::new(PANEL_VARIANTS, timing))
            .collect();
        Self { tracks }
    }

    /// Number of panels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    #[must_use]
    pub fn tracks(&self) -> &[KeyframeTrack] {
        &self.tracks
    }

    /// Current offset of every panel, left to right.
    #[must_use]
    pub fn frames(&self) -> Vec<PanelFrame> {
        self.tracks
            .iter()
            .enumerate()
            .map(|(index, track)| PanelFrame {
                index,
                top_percent: track.value(),
            })
            .collect()
    }
}

impl Transition for StairPanels {
    fn start(&mut self) {
        for track in &mut self.tracks {
            track.start();
        }
    }

    fn begin_exit(&mut self) {
        for track in &mut self.tracks {
            track.begin_exit();
        }
    }

    fn cancel(&mut self) {
        for track in &mut self.tracks {
            track.cancel();
        }
    }

    fn tick(&mut self, dt: Duration) -> Option<Completion> {
        let before = self.phase();
        for track in &mut self.tracks {
            track.tick(dt);
        }
        completion(before, self.phase())
    }

    fn phase(&self) -> TransitionPhase {
        aggregate(self.tracks.iter().map(KeyframeTrack::phase))
    }
}

// ---------------------------------------------------------------------------
// StairWipe
// ---------------------------------------------------------------------------

/// One mounted stair wipe: the panel row plus its underlay.
#[derive(Debug, Clone, PartialEq)]
pub struct StairWipe {
    panels: StairPanels,
    underlay: Option<KeyframeTrack>,
}

impl StairWipe {
    /// Wipe over `plan`, with an underlay fading on `underlay` if given.
    #[must_use]
    pub fn new(plan: &StaggerPlan, underlay: Option<Timing>) -> Self {
        Self {
            panels: StairPanels::new(plan),
            underlay: underlay.map(|timing| KeyframeTrack::new(UNDERLAY_VARIANTS, timing)),
        }
    }

    #[must_use]
    pub fn panels(&self) -> &StairPanels {
        &self.panels
    }

    #[must_use]
    pub fn underlay(&self) -> Option<&KeyframeTrack> {
        self.underlay.as_ref()
    }

    fn tracks_mut(&mut self) -> impl Iterator<Item = &mut KeyframeTrack> {
        self.panels.tracks.iter_mut().chain(self.underlay.iter_mut())
    }
}

impl Transition for StairWipe {
    fn start(&mut self) {
        for track in self.tracks_mut() {
            track.start();
        }
    }

    fn begin_exit(&mut self) {
        for track in self.tracks_mut() {
            track.begin_exit();
        }
    }

    fn cancel(&mut self) {
        for track in self.tracks_mut() {
            track.cancel();
        }
    }

    fn tick(&mut self, dt: Duration) -> Option<Completion> {
        let before = self.phase();
        for track in self.tracks_mut() {
            track.tick(dt);
        }
        completion(before, self.phase())
    }

    fn phase(&self) -> TransitionPhase {
        aggregate(
            self.panels
                .tracks
                .iter()
                .chain(self.underlay.iter())
                .map(KeyframeTrack::phase),
        )
    }
}

// ---------------------------------------------------------------------------
// StairTransition
// ---------------------------------------------------------------------------

/// Stair wipe decoration keyed by route, exit-before-enter.
#[derive(Debug)]
pub struct StairTransition {
    presence: KeyedPresence<StairWipe>,
    panel_fill: Rgb,
    underlay_fill: Rgb,
}

impl StairTransition {
    /// White panels over a primary-coloured underlay.
    #[must_use]
    pub fn new(plan: StaggerPlan, underlay: Option<Timing>) -> Self {
        Self {
            presence: KeyedPresence::new("stair_transition", SequencingMode::Wait, move |_| {
                StairWipe::new(&plan, underlay)
            }),
            panel_fill: palette::WHITE,
            underlay_fill: palette::PRIMARY,
        }
    }

    /// Stair decoration from configuration. The underlay shares the fade
    /// overlay's timing.
    pub fn from_config(stairs: &StairConfig, fade: &FadeConfig) -> Result<Self> {
        Ok(Self::new(stairs.plan()?, stairs.underlay_timing(fade)?))
    }

    /// Underlying presence, for journal inspection.
    #[must_use]
    pub fn presence(&self) -> &KeyedPresence<StairWipe> {
        &self.presence
    }
}

impl Decoration for StairTransition {
    fn name(&self) -> &'static str {
        "stair_transition"
    }

    fn observe(&mut self, route: &RouteId) -> Observation {
        self.presence.observe(route)
    }

    fn tick(&mut self, dt: Duration) {
        self.presence.tick(dt);
    }

    fn layers(&self) -> Vec<Layer> {
        let mut layers = Vec::new();
        for instance in self.presence.instances() {
            let wipe = instance.transition();
            if let Some(underlay) = wipe.underlay()
                && underlay.phase().is_visible()
            {
                layers.push(Layer {
                    kind: LayerKind::StairUnderlay,
                    instance: instance.id(),
                    route: instance.key().clone(),
                    phase: underlay.phase(),
                    z_index: 0,
                    fill: self.underlay_fill,
                    opacity: underlay.value(),
                    pointer_events: PointerEvents::None,
                    panels: Vec::new(),
                });
            }
            layers.push(Layer {
                kind: LayerKind::StairPanels,
                instance: instance.id(),
                route: instance.key().clone(),
                phase: wipe.panels().phase(),
                z_index: STAIR_Z_INDEX,
                fill: self.panel_fill,
                opacity: 1.0,
                pointer_events: PointerEvents::None,
                panels: wipe.panels().frames(),
            });
        }
        layers
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

    const MS_100: Duration = Duration::from_millis(100);

    fn stairs() -> StairTransition {
        StairTransition::from_config(&StairConfig::default(), &FadeConfig::default()).unwrap()
    }

    fn offsets(layer: &Layer) -> Vec<f32> {
        layer.panels.iter().map(|p| p.top_percent).collect()
    }

    #[test]
    fn panels_start_covering() {
        let plan = StairConfig::default().plan().unwrap();
        let mut panels = StairPanels::new(&plan);
        assert_eq!(panels.len(), 6);
        assert_eq!(panels.phase(), TransitionPhase::Initial);
        panels.start();
        assert!(panels.frames().iter().all(|p| p.top_percent == 0.0));
    }

    #[test]
    fn rightmost_panel_moves_first() {
        let plan = StairConfig::default().plan().unwrap();
        let mut panels = StairPanels::new(&plan);
        panels.start();
        panels.tick(Duration::from_millis(50));
        let frames = panels.frames();
        assert!(frames[5].top_percent > 0.0);
        assert!(frames[..5].iter().all(|p| p.top_percent == 0.0));
    }

    #[test]
    fn panels_enter_completes_after_span() {
        let plan = StairConfig::default().plan().unwrap();
        let mut panels = StairPanels::new(&plan);
        panels.start();
        for _ in 0..8 {
            assert_eq!(panels.tick(MS_100), None);
        }
        assert_eq!(panels.tick(MS_100), Some(Completion::Entered));
        assert!(panels.frames().iter().all(|p| p.top_percent == 100.0));
        assert_eq!(panels.tick(MS_100), None);
    }

    #[test]
    fn panels_exit_back_to_covering() {
        let plan = StairConfig::default().plan().unwrap();
        let mut panels = StairPanels::new(&plan);
        panels.start();
        panels.tick(Duration::from_secs(1));
        panels.begin_exit();
        assert_eq!(panels.phase(), TransitionPhase::Exiting);
        assert_eq!(panels.tick(Duration::from_millis(899)), None);
        assert_eq!(panels.tick(Duration::from_millis(1)), Some(Completion::Exited));
        assert!(panels.frames().iter().all(|p| p.top_percent == 0.0));
    }

    #[test]
    fn wipe_settles_when_underlay_finishes() {
        let plan = StairConfig::default().plan().unwrap();
        let underlay = FadeConfig::default().timing().unwrap();
        let mut wipe = StairWipe::new(&plan, Some(underlay));
        wipe.start();
        // Panels are done at 0.9s but the underlay runs until 1.4s.
        assert_eq!(wipe.tick(Duration::from_millis(900)), None);
        assert_eq!(wipe.panels().phase(), TransitionPhase::Settled);
        assert_eq!(wipe.phase(), TransitionPhase::Animating);
        assert_eq!(wipe.tick(Duration::from_millis(500)), Some(Completion::Entered));
    }

    #[test]
    fn wipe_exit_drops_underlay_immediately() {
        let plan = StairConfig::default().plan().unwrap();
        let underlay = FadeConfig::default().timing().unwrap();
        let mut wipe = StairWipe::new(&plan, Some(underlay));
        wipe.start();
        wipe.tick(Duration::from_secs(2));
        wipe.begin_exit();
        assert_eq!(wipe.underlay().map(KeyframeTrack::phase), Some(TransitionPhase::Exited));
        assert_eq!(wipe.phase(), TransitionPhase::Exiting);
    }

    #[test]
    fn layers_are_click_through_and_stacked() {
        let mut stairs = stairs();
        stairs.observe(&RouteId::root());
        let layers = stairs.layers();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].kind, LayerKind::StairUnderlay);
        assert_eq!(layers[0].fill, palette::PRIMARY);
        assert_eq!(layers[1].kind, LayerKind::StairPanels);
        assert_eq!(layers[1].z_index, STAIR_Z_INDEX);
        assert_eq!(layers[1].fill, palette::WHITE);
        assert_eq!(layers[1].panels.len(), 6);
        assert!(layers.iter().all(|l| l.pointer_events == PointerEvents::None));
    }

    #[test]
    fn navigation_waits_for_exit() {
        let mut stairs = stairs();
        stairs.observe(&RouteId::root());
        stairs.tick(Duration::from_secs(2));
        assert!(stairs.is_idle());

        assert_eq!(stairs.observe(&RouteId::new("/work")), Observation::Deferred);
        assert!(!stairs.is_idle());
        let layers = stairs.layers();
        // Only the exiting panel row; its underlay is already gone.
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].route.as_str(), "/");
        assert_eq!(layers[0].phase, TransitionPhase::Exiting);

        stairs.tick(Duration::from_millis(900));
        let layers = stairs.layers();
        assert_eq!(layers.len(), 2);
        assert!(layers.iter().all(|l| l.route.as_str() == "/work"));
        assert_eq!(offsets(&layers[1]), vec![0.0; 6]);
    }

    #[test]
    fn rapid_navigation_supersedes() {
        let mut stairs = stairs();
        stairs.observe(&RouteId::new("/a"));
        stairs.tick(Duration::from_secs(2));
        stairs.drain_journal();

        stairs.observe(&RouteId::new("/b"));
        stairs.tick(MS_100);
        stairs.observe(&RouteId::new("/c"));

        let journal = stairs.drain_journal();
        let kinds: Vec<(&str, LifecycleKind)> =
            journal.iter().map(|e| (e.key.as_str(), e.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("/a", LifecycleKind::ExitStarted),
                ("/a", LifecycleKind::Superseded),
                ("/b", LifecycleKind::Mounted),
                ("/b", LifecycleKind::ExitStarted),
            ]
        );
        assert_eq!(stairs.presence().pending().map(RouteId::as_str), Some("/c"));
    }

    #[test]
    fn disabled_underlay_emits_panels_only() {
        let config = StairConfig {
            underlay: false,
            ..StairConfig::default()
        };
        let mut stairs = StairTransition::from_config(&config, &FadeConfig::default()).unwrap();
        stairs.observe(&RouteId::root());
        let layers = stairs.layers();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].kind, LayerKind::StairPanels);
    }
}
