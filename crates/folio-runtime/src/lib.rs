#![forbid(unsafe_code)]

//! Folio Runtime
//!
//! Route-driven transition sequencing for the portfolio front-end.
//!
//! # Key Components
//!
//! - [`RouteSignal`] - Active-route value with change notification
//! - [`KeyedPresence`] - Keyed remount trigger with concurrent or wait sequencing
//! - [`PageFade`] - Full-viewport fade overlay replayed on every navigation
//! - [`StairTransition`] - Six-panel staggered wipe with an opacity underlay
//! - [`TransitionOrchestrator`] - Composes both decorations around page content
//! - [`FrameClock`] - Fixed-step frame driver
//! - [`FolioConfig`] - Policy-as-data configuration (TOML/JSON)
//!
//! # How it fits in the system
//! The page layout reads the current route from a [`RouteSignal`], calls
//! [`TransitionOrchestrator::sync`] once per render, advances it with
//! [`TransitionOrchestrator::tick`] once per frame, and paints the returned
//! [`DecorationFrame`] above the page. Nothing here blocks or spawns threads;
//! ordering between an exiting and an entering instance is enforced across
//! ticks by [`KeyedPresence`].

pub mod clock;
pub mod config;
pub mod fade;
pub mod orchestrator;
pub mod presence;
pub mod scene;
pub mod signal;
pub mod stairs;

pub use clock::{DEFAULT_FPS, FrameClock};
pub use config::{FadeConfig, FolioConfig, StairConfig};
pub use fade::{FadeOverlay, PageFade};
pub use orchestrator::{Decoration, SyncOutcome, TransitionOrchestrator};
pub use presence::{
    Instance, InstanceId, KeyedPresence, LifecycleEvent, LifecycleKind, Observation,
    SequencingMode, Transition,
};
pub use scene::{DecorationFrame, Layer, LayerKind, PanelFrame, PointerEvents};
pub use signal::{RouteSignal, Subscription};
pub use stairs::{STAIR_Z_INDEX, StairPanels, StairTransition, StairWipe};
