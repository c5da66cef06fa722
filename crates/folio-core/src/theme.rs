#![forbid(unsafe_code)]

//! Site palette and responsive breakpoints.

use std::fmt;

/// An opaque sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Named colours.
pub mod palette {
    use super::Rgb;

    /// Page background and transition overlay fill.
    pub const PRIMARY: Rgb = Rgb::new(0x1c, 0x1c, 0x22);
    /// Highlight colour for the logo dot and the active link.
    pub const ACCENT: Rgb = Rgb::new(0x00, 0xff, 0x99);
    /// Header text and stair panel fill.
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
}

/// Responsive breakpoint, by minimum viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Breakpoint {
    /// Below `sm`.
    Base,
    Sm,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    /// Minimum viewport width in CSS pixels.
    #[must_use]
    pub const fn min_width(self) -> u32 {
        match self {
            Self::Base => 0,
            Self::Sm => 640,
            Self::Md => 768,
            Self::Lg => 960,
            Self::Xl => 1200,
        }
    }

    /// Largest breakpoint whose minimum width is at most `width`.
    #[must_use]
    pub const fn for_width(width: u32) -> Self {
        if width >= Self::Xl.min_width() {
            Self::Xl
        } else if width >= Self::Lg.min_width() {
            Self::Lg
        } else if width >= Self::Md.min_width() {
            Self::Md
        } else if width >= Self::Sm.min_width() {
            Self::Sm
        } else {
            Self::Base
        }
    }
}
