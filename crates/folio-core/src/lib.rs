#![forbid(unsafe_code)]

//! Core: animation primitives, route identity, and navigation data.
//!
//! # Role in Folio
//! `folio-core` is the leaf layer. It owns everything that is pure data or
//! pure math: easing curves, keyframe tracks, stagger offsets, the
//! [`route::RouteId`] identity type, and the static navigation link list.
//!
//! # Primary responsibilities
//! - **Animation**: [`animation::KeyframeTrack`],
//!   [`animation::StaggerPlan`], [`animation::Easing`].
//! - **Routing data**: [`route::RouteId`] and [`nav::NavLinks`].
//! - **Errors**: [`ConfigurationError`] for construction-time validation.
//!
//! # How it fits in the system
//! The runtime (`folio-runtime`) builds the fade overlay and stair wipe out of
//! these primitives and drives them from a route signal. Nothing in this crate
//! keeps time on its own; every animation advances only when ticked.

pub mod animation;
pub mod error;
pub mod logging;
pub mod nav;
pub mod route;
pub mod theme;

pub use error::{ConfigurationError, Result};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, info_span, trace, warn};
