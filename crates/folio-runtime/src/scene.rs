#![forbid(unsafe_code)]

//! Paintable output of the transition layer.
//!
//! A [`DecorationFrame`] is a plain snapshot: the page shell paints its
//! layers above the page content in ascending `z_index`, then discards it.
//! Every layer is click-through ([`PointerEvents::None`]) so page content
//! stays interactive underneath.

use folio_core::animation::TransitionPhase;
use folio_core::route::RouteId;
use folio_core::theme::Rgb;
use serde::Serialize;

use crate::presence::InstanceId;

/// Whether a layer captures pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerEvents {
    Auto,
    /// Click-through.
    #[default]
    None,
}

/// What produced a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// Full-viewport solid fill fading from opaque to clear.
    FadeOverlay,
    /// Row of vertical stair panels sliding downward.
    StairPanels,
    /// Full-viewport fill beneath the stair panels.
    StairUnderlay,
}

/// One vertical panel of a stair layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelFrame {
    /// Position in the row, left to right.
    pub index: usize,
    /// Vertical offset as a percentage of the panel's own height.
    pub top_percent: f32,
}

/// One full-viewport layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub kind: LayerKind,
    pub instance: InstanceId,
    /// Route the owning instance was mounted for.
    pub route: RouteId,
    pub phase: TransitionPhase,
    pub z_index: i32,
    pub fill: Rgb,
    /// 0.0 (clear) ..= 1.0 (opaque).
    pub opacity: f32,
    pub pointer_events: PointerEvents,
    /// Empty for solid-fill layers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub panels: Vec<PanelFrame>,
}

/// Everything the transition layer wants painted this frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecorationFrame {
    /// Orchestrator clock, in seconds.
    pub at_secs: f64,
    pub fade: Vec<Layer>,
    pub stairs: Vec<Layer>,
}

impl DecorationFrame {
    /// All layers in paint order (lowest `z_index` first, stable).
    #[must_use]
    pub fn layers(&self) -> Vec<&Layer> {
        let mut all: Vec<&Layer> = self.fade.iter().chain(self.stairs.iter()).collect();
        all.sort_by_key(|layer| layer.z_index);
        all
    }

    /// Whether nothing needs painting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fade.is_empty() && self.stairs.is_empty()
    }

    /// Whether any layer would still obscure content.
    #[must_use]
    pub fn is_obscuring(&self) -> bool {
        self.fade
            .iter()
            .chain(self.stairs.iter())
            .any(Layer::is_obscuring)
    }

    /// Whether any layer would intercept input.
    #[must_use]
    pub fn blocks_input(&self) -> bool {
        self.fade
            .iter()
            .chain(self.stairs.iter())
            .any(|l| l.pointer_events == PointerEvents::Auto)
    }
}

impl Layer {
    /// Whether any part of this layer is visibly covering the viewport.
    #[must_use]
    pub fn is_obscuring(&self) -> bool {
        if self.opacity <= 0.0 {
            return false;
        }
        if self.panels.is_empty() {
            return true;
        }
        self.panels.iter().any(|p| p.top_percent < 100.0)
    }
}
