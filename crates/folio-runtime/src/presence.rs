#![forbid(unsafe_code)]

//! Keyed presence: remount-to-replay driven by a route key.
//!
//! [`KeyedPresence`] binds a visual container's identity to a [`RouteId`].
//! Every distinct consecutive key gets a fresh instance from the factory, so
//! the enter animation always replays from its initial keyframe. The previous
//! instance is kept alive only long enough to play its exit keyframes.
//!
//! # Sequencing
//!
//! | Mode | On A → B |
//! |------|----------|
//! | [`SequencingMode::Concurrent`] | A starts exiting, B mounts immediately |
//! | [`SequencingMode::Wait`] | A starts exiting, B mounts once A's exit completes |
//!
//! # Rapid navigation in wait mode
//!
//! Last key wins, and any in-flight exit is superseded at once. With A
//! exiting and B pending, a new key C:
//!
//! 1. supersedes A (discarded, exit cut short),
//! 2. mounts B straight into its exit path,
//! 3. queues C behind B's exit.
//!
//! # Invariants
//!
//! 1. Observing the most recently requested key is a no-op.
//! 2. An [`InstanceId`] is never reused, and each instance serves one key.
//! 3. In wait mode at most one instance is exiting and nothing is mounted
//!    while it does; the pending key mounts on the tick its exit completes.
//! 4. Every lifecycle step is journaled with the presence clock time.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use folio_core::animation::{Completion, TransitionPhase};
use folio_core::route::RouteId;
use tracing::debug;

/// Maximum journal entries retained; the oldest are dropped first.
const JOURNAL_CAPACITY: usize = 1024;

/// Something a presence can mount, exit, and discard.
pub trait Transition {
    /// Begin the enter animation.
    fn start(&mut self);

    /// Switch to the exit keyframes.
    fn begin_exit(&mut self);

    /// Abandon wherever it is.
    fn cancel(&mut self);

    /// Advance by `dt`, reporting completion of the enter or exit animation.
    fn tick(&mut self, dt: Duration) -> Option<Completion>;

    /// Current lifecycle phase.
    fn phase(&self) -> TransitionPhase;
}

/// Ordering policy between an exiting and an entering instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SequencingMode {
    /// Exit and enter overlap.
    Concurrent,
    /// Exit completes before the next instance mounts.
    Wait,
}

impl SequencingMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Concurrent => "concurrent",
            Self::Wait => "wait",
        }
    }
}

/// Unique identity of one mounted instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(transparent)]
pub struct InstanceId(u64);

impl InstanceId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw sequence number (first instance is 0).
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A mounted instance and the key it was created for.
#[derive(Debug)]
pub struct Instance<T> {
    id: InstanceId,
    key: RouteId,
    mounted_at: Duration,
    transition: T,
}

impl<T> Instance<T> {
    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.id
    }

    #[must_use]
    pub fn key(&self) -> &RouteId {
        &self.key
    }

    /// Presence clock time at mount.
    #[must_use]
    pub fn mounted_at(&self) -> Duration {
        self.mounted_at
    }

    #[must_use]
    pub fn transition(&self) -> &T {
        &self.transition
    }
}

/// What a lifecycle journal entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleKind {
    /// Created by the factory; enter animation started.
    Mounted,
    /// Enter animation reached its target.
    EnterCompleted,
    /// Exit keyframes started.
    ExitStarted,
    /// Exit finished; instance discarded.
    ExitCompleted,
    /// Discarded before its exit finished.
    Superseded,
}

/// One lifecycle step of one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    pub instance: InstanceId,
    pub key: RouteId,
    pub kind: LifecycleKind,
    /// Presence clock time.
    pub at: Duration,
}

/// Result of [`KeyedPresence::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// Same key as the latest request; nothing happened.
    Unchanged,
    /// A new instance mounted right away.
    Mounted(InstanceId),
    /// The key is queued behind an exit (wait mode).
    Deferred,
}

type Factory<T> = Box<dyn FnMut(&RouteId) -> T>;

/// Keyed factory that tears down and recreates a container on key change.
pub struct KeyedPresence<T> {
    label: &'static str,
    mode: SequencingMode,
    factory: Factory<T>,
    current: Option<Instance<T>>,
    exiting: Vec<Instance<T>>,
    pending: Option<RouteId>,
    next_id: u64,
    clock: Duration,
    journal: VecDeque<LifecycleEvent>,
}

impl<T> fmt::Debug for KeyedPresence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedPresence")
            .field("label", &self.label)
            .field("mode", &self.mode)
            .field("current", &self.current.as_ref().map(|i| (i.id, &i.key)))
            .field("exiting", &self.exiting.len())
            .field("pending", &self.pending)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl<T: Transition> KeyedPresence<T> {
    /// Create an empty presence. `label` tags log events.
    pub fn new(
        label: &'static str,
        mode: SequencingMode,
        factory: impl FnMut(&RouteId) -> T + 'static,
    ) -> Self {
        Self {
            label,
            mode,
            factory: Box::new(factory),
            current: None,
            exiting: Vec::new(),
            pending: None,
            next_id: 0,
            clock: Duration::ZERO,
            journal: VecDeque::new(),
        }
    }

    /// Feed the current route key.
    ///
    /// Call once per render; repeated calls with the same key are free.
    pub fn observe(&mut self, key: &RouteId) -> Observation {
        if self.latest_key() == Some(key) {
            return Observation::Unchanged;
        }
        match self.mode {
            SequencingMode::Concurrent => {
                if let Some(previous) = self.current.take() {
                    self.retire(previous);
                }
                Observation::Mounted(self.mount(key.clone()))
            }
            SequencingMode::Wait => self.observe_wait(key),
        }
    }

    fn observe_wait(&mut self, key: &RouteId) -> Observation {
        if let Some(previous) = self.current.take() {
            self.retire(previous);
        } else if !self.exiting.is_empty() {
            for stale in std::mem::take(&mut self.exiting) {
                self.supersede(stale);
            }
            if let Some(skipped) = self.pending.take() {
                let id = self.mount(skipped);
                if let Some(instance) = self.current.take() {
                    debug_assert_eq!(instance.id, id);
                    self.retire(instance);
                }
            }
        }

        if self.exiting.is_empty() {
            self.pending = None;
            Observation::Mounted(self.mount(key.clone()))
        } else {
            self.pending = Some(key.clone());
            Observation::Deferred
        }
    }

    /// Advance every live instance by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.clock = self.clock.saturating_add(dt);

        let entered = match self.current.as_mut() {
            Some(current) => current.transition.tick(dt) == Some(Completion::Entered),
            None => false,
        };
        if entered && let Some(current) = self.current.as_ref() {
            let (id, key) = (current.id, current.key.clone());
            self.record(id, key, LifecycleKind::EnterCompleted);
        }

        for instance in &mut self.exiting {
            instance.transition.tick(dt);
        }
        let (finished, still_exiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.exiting)
            .into_iter()
            .partition(|i| i.transition.phase() == TransitionPhase::Exited);
        self.exiting = still_exiting;
        for instance in finished {
            self.complete_exit(instance);
        }

        if self.mode == SequencingMode::Wait
            && self.exiting.is_empty()
            && self.current.is_none()
            && let Some(key) = self.pending.take()
        {
            self.mount(key);
        }
    }

    fn mount(&mut self, key: RouteId) -> InstanceId {
        let id = InstanceId::new(self.next_id);
        self.next_id += 1;
        let mut transition = (self.factory)(&key);
        transition.start();
        debug!(
            presence = self.label,
            mode = self.mode.as_str(),
            instance = id.0,
            key = %key,
            "presence.mount"
        );
        self.record(id, key.clone(), LifecycleKind::Mounted);
        self.current = Some(Instance {
            id,
            key,
            mounted_at: self.clock,
            transition,
        });
        id
    }

    fn retire(&mut self, mut instance: Instance<T>) {
        instance.transition.begin_exit();
        debug!(
            presence = self.label,
            instance = instance.id.0,
            key = %instance.key,
            "presence.exit"
        );
        self.record(instance.id, instance.key.clone(), LifecycleKind::ExitStarted);
        if instance.transition.phase() == TransitionPhase::Exited {
            self.complete_exit(instance);
        } else {
            self.exiting.push(instance);
        }
    }

    fn supersede(&mut self, mut instance: Instance<T>) {
        instance.transition.cancel();
        debug!(
            presence = self.label,
            instance = instance.id.0,
            key = %instance.key,
            "presence.supersede"
        );
        self.record(instance.id, instance.key, LifecycleKind::Superseded);
    }

    fn complete_exit(&mut self, instance: Instance<T>) {
        self.record(instance.id, instance.key, LifecycleKind::ExitCompleted);
    }

    fn record(&mut self, instance: InstanceId, key: RouteId, kind: LifecycleKind) {
        if self.journal.len() == JOURNAL_CAPACITY {
            self.journal.pop_front();
        }
        self.journal.push_back(LifecycleEvent {
            instance,
            key,
            kind,
            at: self.clock,
        });
    }
}

impl<T> KeyedPresence<T> {
    /// The most recently requested key: pending if queued, else mounted.
    #[must_use]
    pub fn latest_key(&self) -> Option<&RouteId> {
        self.pending
            .as_ref()
            .or_else(|| self.current.as_ref().map(|i| &i.key))
    }

    /// Sequencing policy.
    #[must_use]
    pub fn mode(&self) -> SequencingMode {
        self.mode
    }

    /// The mounted (entering or settled) instance.
    #[must_use]
    pub fn current(&self) -> Option<&Instance<T>> {
        self.current.as_ref()
    }

    /// Instances still playing exit keyframes, oldest first.
    #[must_use]
    pub fn exiting(&self) -> &[Instance<T>] {
        &self.exiting
    }

    /// Key waiting for an exit to finish (wait mode only).
    #[must_use]
    pub fn pending(&self) -> Option<&RouteId> {
        self.pending.as_ref()
    }

    /// All live instances in paint order: exiting first, then current.
    pub fn instances(&self) -> impl Iterator<Item = &Instance<T>> {
        self.exiting.iter().chain(self.current.iter())
    }

    /// Total time ticked.
    #[must_use]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Number of instances ever mounted.
    #[must_use]
    pub fn mount_count(&self) -> u64 {
        self.next_id
    }

    /// Retained lifecycle events, oldest first.
    pub fn journal(&self) -> impl Iterator<Item = &LifecycleEvent> {
        self.journal.iter()
    }

    /// Take all retained lifecycle events.
    pub fn drain_journal(&mut self) -> Vec<LifecycleEvent> {
        self.journal.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::animation::{KeyframeTrack, Timing, Variants};

    const MS_100: Duration = Duration::from_millis(100);
    const MS_200: Duration = Duration::from_millis(200);

    /// Single-track transition with a 200ms enter and optional 200ms exit.
    struct Probe(KeyframeTrack);

    impl Transition for Probe {
        fn start(&mut self) {
            self.0.start();
        }
        fn begin_exit(&mut self) {
            self.0.begin_exit();
        }
        fn cancel(&mut self) {
            self.0.cancel();
        }
        fn tick(&mut self, dt: Duration) -> Option<Completion> {
            self.0.tick(dt)
        }
        fn phase(&self) -> TransitionPhase {
            self.0.phase()
        }
    }

    fn presence(mode: SequencingMode, with_exit: bool) -> KeyedPresence<Probe> {
        KeyedPresence::new("probe", mode, move |_| {
            let variants = Variants::enter(0.0, 1.0);
            let variants = if with_exit {
                variants.with_exit(1.0, 0.0)
            } else {
                variants
            };
            Probe(KeyframeTrack::new(variants, Timing::new(MS_200)))
        })
    }

    fn kinds(p: &KeyedPresence<Probe>) -> Vec<(u64, &str, LifecycleKind)> {
        p.journal()
            .map(|e| (e.instance.get(), e.key.as_str(), e.kind))
            .collect()
    }

    #[test]
    fn first_observe_mounts() {
        let mut p = presence(SequencingMode::Wait, true);
        let a = RouteId::new("/a");
        assert_eq!(p.observe(&a), Observation::Mounted(InstanceId(0)));
        assert_eq!(p.current().map(|i| i.key().as_str()), Some("/a"));
        assert_eq!(
            p.current().map(|i| i.transition().phase()),
            Some(TransitionPhase::Animating)
        );
    }

    #[test]
    fn same_key_is_idempotent() {
        let mut p = presence(SequencingMode::Concurrent, true);
        let a = RouteId::new("/a");
        p.observe(&a);
        for _ in 0..5 {
            assert_eq!(p.observe(&a), Observation::Unchanged);
            p.tick(MS_100);
        }
        assert_eq!(p.mount_count(), 1);
    }

    #[test]
    fn concurrent_mounts_immediately() {
        let mut p = presence(SequencingMode::Concurrent, true);
        p.observe(&RouteId::new("/a"));
        p.tick(MS_100);
        assert_eq!(p.observe(&RouteId::new("/b")), Observation::Mounted(InstanceId(1)));
        assert_eq!(p.exiting().len(), 1);
        assert_eq!(p.instances().count(), 2);

        p.tick(MS_200);
        assert!(p.exiting().is_empty());
        assert_eq!(
            kinds(&p),
            vec![
                (0, "/a", LifecycleKind::Mounted),
                (0, "/a", LifecycleKind::ExitStarted),
                (1, "/b", LifecycleKind::Mounted),
                (1, "/b", LifecycleKind::EnterCompleted),
                (0, "/a", LifecycleKind::ExitCompleted),
            ]
        );
    }

    #[test]
    fn concurrent_without_exit_keyframes_discards_instantly() {
        let mut p = presence(SequencingMode::Concurrent, false);
        p.observe(&RouteId::new("/a"));
        p.observe(&RouteId::new("/b"));
        assert!(p.exiting().is_empty());
        assert_eq!(p.instances().count(), 1);
    }

    #[test]
    fn wait_defers_until_exit_completes() {
        let mut p = presence(SequencingMode::Wait, true);
        p.observe(&RouteId::new("/a"));
        p.tick(MS_200);
        assert_eq!(p.observe(&RouteId::new("/b")), Observation::Deferred);
        assert!(p.current().is_none());
        assert_eq!(p.pending().map(RouteId::as_str), Some("/b"));

        p.tick(MS_100);
        assert!(p.current().is_none());
        p.tick(MS_100);
        let current = p.current().expect("b mounted after exit");
        assert_eq!(current.key().as_str(), "/b");
        assert_eq!(current.mounted_at(), Duration::from_millis(400));
        assert!(p.pending().is_none());
    }

    #[test]
    fn wait_with_instant_exit_mounts_now() {
        let mut p = presence(SequencingMode::Wait, false);
        p.observe(&RouteId::new("/a"));
        assert!(matches!(p.observe(&RouteId::new("/b")), Observation::Mounted(_)));
    }

    #[test]
    fn wait_rapid_navigation_supersedes_in_flight_exit() {
        let mut p = presence(SequencingMode::Wait, true);
        p.observe(&RouteId::new("/a"));
        p.tick(MS_200);
        p.observe(&RouteId::new("/b"));
        p.tick(MS_100);
        assert_eq!(p.observe(&RouteId::new("/c")), Observation::Deferred);

        // B was mounted straight into its exit, C waits behind it.
        assert_eq!(p.exiting().len(), 1);
        assert_eq!(p.exiting()[0].key().as_str(), "/b");
        assert_eq!(p.pending().map(RouteId::as_str), Some("/c"));

        p.tick(MS_200);
        assert_eq!(p.current().map(|i| i.key().as_str()), Some("/c"));

        assert_eq!(
            kinds(&p),
            vec![
                (0, "/a", LifecycleKind::Mounted),
                (0, "/a", LifecycleKind::EnterCompleted),
                (0, "/a", LifecycleKind::ExitStarted),
                (0, "/a", LifecycleKind::Superseded),
                (1, "/b", LifecycleKind::Mounted),
                (1, "/b", LifecycleKind::ExitStarted),
                (1, "/b", LifecycleKind::ExitCompleted),
                (2, "/c", LifecycleKind::Mounted),
            ]
        );
    }

    #[test]
    fn observing_pending_key_again_is_noop() {
        let mut p = presence(SequencingMode::Wait, true);
        p.observe(&RouteId::new("/a"));
        p.observe(&RouteId::new("/b"));
        assert_eq!(p.observe(&RouteId::new("/b")), Observation::Unchanged);
        assert_eq!(p.mount_count(), 1);
    }

    #[test]
    fn drain_empties_journal() {
        let mut p = presence(SequencingMode::Concurrent, true);
        p.observe(&RouteId::new("/a"));
        assert_eq!(p.drain_journal().len(), 1);
        assert_eq!(p.journal().count(), 0);
    }

    #[test]
    fn journal_is_bounded() {
        let mut p = presence(SequencingMode::Concurrent, false);
        for i in 0..(JOURNAL_CAPACITY + 10) {
            p.observe(&RouteId::new(format!("/{i}")));
        }
        assert_eq!(p.journal().count(), JOURNAL_CAPACITY);
    }
}
