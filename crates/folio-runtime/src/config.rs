#![forbid(unsafe_code)]

//! Policy-as-data configuration for the transition layer.
//!
//! Every tunable of the fade overlay, the stair wipe and the navigation bar
//! lives in one [`FolioConfig`] that can be loaded from TOML or JSON at
//! startup.
//!
//! # Loading
//!
//! ```toml
//! # folio.toml
//! [fade]
//! delay_secs = 1.0
//! duration_secs = 0.4
//! easing = "ease-in-out"
//!
//! [stairs]
//! panels = 6
//! unit_delay_secs = 0.1
//! order = "reverse"
//!
//! [[nav]]
//! name = "home"
//! path = "/"
//! ```
//!
//! ```rust,ignore
//! let config = FolioConfig::from_toml_file("folio.toml")?;
//! config.validate()?;
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the values the site ships with, so
//! `FolioConfig::default()` reproduces the stock transitions. Missing
//! sections and fields fall back to those defaults.

use std::path::Path;
use std::time::Duration;

use folio_core::animation::{Easing, StaggerMode, StaggerPlan, Timing};
use folio_core::error::{ConfigurationError, Result, seconds};
use folio_core::nav::{NavLink, NavLinks};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level FolioConfig
// ---------------------------------------------------------------------------

/// Top-level configuration for the transition layer and navigation bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Full-viewport fade overlay.
    pub fade: FadeConfig,
    /// Staggered stair wipe.
    pub stairs: StairConfig,
    /// Navigation links, in display order.
    pub nav: Vec<NavLink>,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            fade: FadeConfig::default(),
            stairs: StairConfig::default(),
            nav: NavLinks::site_default().links().to_vec(),
        }
    }
}

impl FolioConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ConfigurationError::Parse {
            format: "toml",
            message: e.to_string(),
        })
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| ConfigurationError::Parse {
            format: "json",
            message: e.to_string(),
        })
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load by file extension: `.json` is JSON, anything else is TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Check every section, failing on the first problem.
    pub fn validate(&self) -> Result<()> {
        self.fade.timing()?;
        self.stairs.plan()?;
        self.stairs.underlay_timing(&self.fade)?;
        self.nav_links()?;
        Ok(())
    }

    /// Validated navigation links.
    pub fn nav_links(&self) -> Result<NavLinks> {
        NavLinks::new(self.nav.iter().cloned())
    }

    /// Single-line JSON form for structured logging.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Fade overlay parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    /// Fully opaque hold before fading starts.
    pub delay_secs: f64,
    /// Length of the fade itself.
    pub duration_secs: f64,
    pub easing: Easing,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            delay_secs: 1.0,
            duration_secs: 0.4,
            easing: Easing::EaseInOut,
        }
    }
}

impl FadeConfig {
    /// Enter timing for the overlay.
    pub fn timing(&self) -> Result<Timing> {
        let delay = seconds("fade.delay_secs", self.delay_secs)?;
        let duration = positive("fade.duration_secs", self.duration_secs)?;
        self.easing.validate("fade.easing")?;
        Ok(Timing::new(duration).delay(delay).easing(self.easing))
    }
}

/// Stair wipe parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StairConfig {
    /// Number of vertical panels.
    pub panels: usize,
    /// Start spacing between neighbouring panels.
    pub unit_delay_secs: f64,
    /// Per-panel slide duration.
    pub duration_secs: f64,
    pub easing: Easing,
    /// Which end of the row starts first; the right-most panel by default.
    pub order: StaggerMode,
    /// Draw the fading underlay beneath the panels.
    pub underlay: bool,
}

impl Default for StairConfig {
    fn default() -> Self {
        Self {
            panels: 6,
            unit_delay_secs: 0.1,
            duration_secs: 0.4,
            easing: Easing::EaseInOut,
            order: StaggerMode::Reverse,
            underlay: true,
        }
    }
}

impl StairConfig {
    /// Stagger plan for the panel bank.
    pub fn plan(&self) -> Result<StaggerPlan> {
        let unit = seconds("stairs.unit_delay_secs", self.unit_delay_secs)?;
        let duration = positive("stairs.duration_secs", self.duration_secs)?;
        self.easing.validate("stairs.easing")?;
        Ok(StaggerPlan::new(self.panels, unit, duration)?
            .easing(self.easing)
            .mode(self.order))
    }

    /// Underlay timing (shares the fade overlay's timing), if enabled.
    pub fn underlay_timing(&self, fade: &FadeConfig) -> Result<Option<Timing>> {
        if self.underlay {
            fade.timing().map(Some)
        } else {
            Ok(None)
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<Duration> {
    let duration = seconds(field, value)?;
    if duration.is_zero() {
        return Err(ConfigurationError::ZeroDuration { field });
    }
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_site() {
        let config = FolioConfig::default();
        let fade = config.fade.timing().unwrap();
        assert_eq!(fade.delay, Duration::from_secs(1));
        assert_eq!(fade.duration, Duration::from_millis(400));
        assert_eq!(fade.easing, Easing::EaseInOut);

        let plan = config.stairs.plan().unwrap();
        assert_eq!(plan.count(), 6);
        assert_eq!(plan.unit(), Duration::from_millis(100));
        assert_eq!(plan.duration(), Duration::from_millis(400));
        assert_eq!(plan.stagger_mode(), StaggerMode::Reverse);

        assert_eq!(config.nav_links().unwrap().len(), 5);
    }

    #[test]
    fn default_validates_clean() {
        assert!(FolioConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_catches_zero_panels() {
        let mut config = FolioConfig::default();
        config.stairs.panels = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::ZeroPanels)
        ));
    }

    #[test]
    fn validate_catches_zero_fade_duration() {
        let mut config = FolioConfig::default();
        config.fade.duration_secs = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("fade.duration_secs"));
    }

    #[test]
    fn validate_catches_negative_unit() {
        let mut config = FolioConfig::default();
        config.stairs.unit_delay_secs = -0.1;
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), "invalid_seconds");
        assert!(err.to_string().contains("stairs.unit_delay_secs"));
    }

    #[test]
    fn validate_catches_nan_delay() {
        let mut config = FolioConfig::default();
        config.fade.delay_secs = f64::NAN;
        assert_eq!(config.validate().unwrap_err().kind(), "invalid_seconds");
    }

    #[test]
    fn nan_bezier_fails_validation() {
        let config = FolioConfig::from_toml_str(
            "[fade]\neasing = { cubic-bezier = [nan, nan, 0.5, 1.0] }",
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), "invalid_easing");
        assert!(err.to_string().contains("fade.easing"));
    }

    #[test]
    fn infinite_stair_bezier_fails_validation() {
        let mut config = FolioConfig::default();
        config.stairs.easing = Easing::CubicBezier(0.4, f32::INFINITY, 0.6, 1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidEasing {
                field: "stairs.easing"
            })
        ));
    }

    #[test]
    fn finite_custom_bezier_is_accepted() {
        let config = FolioConfig::from_toml_str(
            "[fade]\neasing = { cubic-bezier = [0.25, 0.1, 0.25, 1.0] }",
        )
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.fade.timing().unwrap().easing,
            Easing::CubicBezier(0.25, 0.1, 0.25, 1.0)
        );
    }

    #[test]
    fn forward_order_starts_left_panel_first() {
        let config = FolioConfig::from_toml_str("[stairs]\norder = \"forward\"").unwrap();
        assert_eq!(config.stairs.order, StaggerMode::Forward);
        let plan = config.stairs.plan().unwrap();
        assert_eq!(plan.delay(0), Some(Duration::ZERO));
        assert_eq!(plan.delay(5), Some(Duration::from_millis(500)));
    }

    #[test]
    fn validate_catches_duplicate_nav() {
        let mut config = FolioConfig::default();
        config.nav.push(NavLink::new("again", "/"));
        assert_eq!(config.validate().unwrap_err().kind(), "duplicate_path");
    }

    #[test]
    fn validate_catches_empty_nav() {
        let mut config = FolioConfig::default();
        config.nav.clear();
        assert_eq!(config.validate().unwrap_err().kind(), "empty_navigation");
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config = FolioConfig::from_toml_str(
            r#"
[stairs]
panels = 4
easing = "linear"
"#,
        )
        .unwrap();
        assert_eq!(config.stairs.panels, 4);
        assert_eq!(config.stairs.easing, Easing::Linear);
        assert_eq!(config.stairs.unit_delay_secs, 0.1);
        assert_eq!(config.fade, FadeConfig::default());
        assert_eq!(config.nav.len(), 5);
    }

    #[test]
    fn toml_nav_replaces_default_list() {
        let config = FolioConfig::from_toml_str(
            r#"
[[nav]]
name = "home"
path = "/"

[[nav]]
name = "services"
path = "/services"
"#,
        )
        .unwrap();
        let links = config.nav_links().unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links.links()[1].path.as_str(), "/services");
    }

    #[test]
    fn json_round_trip() {
        let config = FolioConfig::default();
        let parsed = FolioConfig::from_json_str(&config.to_jsonl()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = FolioConfig::from_toml_str("[stairs\npanels = ").unwrap_err();
        assert_eq!(err.kind(), "parse");
        assert!(err.to_string().starts_with("toml parse error"));
    }

    #[test]
    fn wrong_type_json_is_parse_error() {
        let err = FolioConfig::from_json_str(r#"{"stairs":{"panels":"six"}}"#).unwrap_err();
        assert_eq!(err.kind(), "parse");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = FolioConfig::from_toml_file("/definitely/not/here/folio.toml").unwrap_err();
        assert_eq!(err.kind(), "io");
    }

    #[test]
    fn underlay_can_be_disabled() {
        let mut config = FolioConfig::default();
        config.stairs.underlay = false;
        assert_eq!(config.stairs.underlay_timing(&config.fade).unwrap(), None);
    }
}
