#![forbid(unsafe_code)]

//! Site header: logo, desktop navigation and the hire-me call to action.
//!
//! The header is a pure function of the link list, the active route and the
//! viewport width. The desktop navigation and the call to action only show
//! from the `xl` breakpoint up; below it the header carries the logo alone.

use std::fmt;

use folio_core::nav::NavLinks;
use folio_core::route::RouteId;
use folio_core::theme::{Breakpoint, Rgb, palette};
use serde::Serialize;
use tracing::debug;

/// Logo text before the accent dot.
pub const LOGO_TEXT: &str = "Luke";
/// Accent-coloured suffix of the logo.
pub const LOGO_ACCENT: &str = ".";
/// Call-to-action button label.
pub const CTA_LABEL: &str = "Hire me";
/// Call-to-action target.
pub const CTA_PATH: &str = "/contact";

/// Vertical header padding below `xl`, in CSS pixels.
pub const PADDING_Y_PX: u32 = 32;
/// Vertical header padding at `xl` and above.
pub const PADDING_Y_XL_PX: u32 = 48;

/// Home link shown as the site name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Logo {
    pub text: &'static str,
    pub accent: &'static str,
    pub href: RouteId,
}

/// One rendered navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Capitalized display label.
    pub label: String,
    pub href: RouteId,
    /// Drawn in the accent colour with an underline.
    pub active: bool,
    /// Text colour: the accent when active, white otherwise.
    pub color: Rgb,
}

/// The call-to-action button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    pub label: &'static str,
    pub href: RouteId,
}

/// Fully resolved header for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub logo: Logo,
    pub nav: Vec<NavItem>,
    pub cta: CallToAction,
    #[serde(skip)]
    pub breakpoint: Breakpoint,
    /// Whether the desktop navigation and call to action are shown.
    pub desktop: bool,
    pub padding_y_px: u32,
}

impl HeaderView {
    /// Resolve the header for `route` at a viewport `width` pixels wide.
    #[must_use]
    pub fn new(links: &NavLinks, route: &RouteId, width: u32) -> Self {
        let breakpoint = Breakpoint::for_width(width);
        let desktop = breakpoint >= Breakpoint::Xl;
        let nav: Vec<NavItem> = links
            .with_state(route)
            .map(|(link, active)| NavItem {
                label: link.label(),
                href: link.path.clone(),
                active,
                color: if active { palette::ACCENT } else { palette::WHITE },
            })
            .collect();
        debug!(
            path = %route,
            active = ?links.active(route).map(|l| l.name.as_str()),
            width,
            desktop,
            "nav.render"
        );
        Self {
            logo: Logo {
                text: LOGO_TEXT,
                accent: LOGO_ACCENT,
                href: RouteId::root(),
            },
            nav,
            cta: CallToAction {
                label: CTA_LABEL,
                href: RouteId::new(CTA_PATH),
            },
            breakpoint,
            desktop,
            padding_y_px: if desktop {
                PADDING_Y_XL_PX
            } else {
                PADDING_Y_PX
            },
        }
    }

    /// Label of the active entry, if the route matches one.
    #[must_use]
    pub fn active_label(&self) -> Option<&str> {
        self.nav
            .iter()
            .find(|item| item.active)
            .map(|item| item.label.as_str())
    }

    /// Navigation entries that are actually displayed at this width.
    #[must_use]
    pub fn visible_nav(&self) -> &[NavItem] {
        if self.desktop { self.nav.as_slice() } else { &[] }
    }
}

/// One-line text rendering; the active entry is bracketed.
impl fmt::Display for HeaderView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.logo.text, self.logo.accent)?;
        if !self.desktop {
            return Ok(());
        }
        f.write_str(" ")?;
        for item in &self.nav {
            if item.active {
                write!(f, " [{}]", item.label)?;
            } else {
                write!(f, " {}", item.label)?;
            }
        }
        write!(f, "  <{}>", self.cta.label)
    }
}
