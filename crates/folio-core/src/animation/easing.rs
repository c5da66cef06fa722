#![forbid(unsafe_code)]

//! Named easing curves.
//!
//! The curves match the CSS / web-animation keywords so that timings copied
//! from a stylesheet behave the same here:
//!
//! | Variant | cubic-bézier |
//! |---------|--------------|
//! | `Linear` | (0, 0, 1, 1) |
//! | `EaseIn` | (0.42, 0, 1, 1) |
//! | `EaseOut` | (0, 0, 0.58, 1) |
//! | `EaseInOut` | (0.42, 0, 0.58, 1) |
//!
//! Custom curves read from configuration go through [`Easing::validate`]
//! before use; a NaN or infinite control point would poison every sample.

use crate::error::{ConfigurationError, Result};

/// Easing curve applied to linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Accelerating from rest.
    EaseIn,
    /// Decelerating to rest.
    EaseOut,
    /// Accelerate then decelerate.
    EaseInOut,
    /// Custom control points `(x1, y1, x2, y2)`; x values are clamped to [0, 1].
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Reject custom control points that are NaN or infinite.
    ///
    /// `field` names the configuration key in the error.
    pub fn validate(self, field: &'static str) -> Result<()> {
        if let Self::CubicBezier(x1, y1, x2, y2) = self
            && ![x1, y1, x2, y2].iter().all(|v| v.is_finite())
        {
            return Err(ConfigurationError::InvalidEasing { field });
        }
        Ok(())
    }

    /// Map linear progress `t` to eased progress.
    ///
    /// `t` is clamped to [0.0, 1.0]; the endpoints always map to themselves.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::CubicBezier(x1, y1, x2, y2) => {
                cubic_bezier(x1.clamp(0.0, 1.0), y1, x2.clamp(0.0, 1.0), y2, t)
            }
        }
    }
}

const EPSILON: f32 = 1e-6;
const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 40;

/// One axis of a cubic bézier with fixed endpoints 0 and 1.
#[inline]
fn bezier_axis(a1: f32, a2: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * t * a1 + 3.0 * u * t * t * a2 + t * t * t
}

#[inline]
fn bezier_slope(a1: f32, a2: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * a1 + 6.0 * u * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
}

/// Solve the curve for `x` and return the matching `y`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let mut t = x;
    for _ in 0..NEWTON_ITERATIONS {
        let err = bezier_axis(x1, x2, t) - x;
        if err.abs() < EPSILON {
            return bezier_axis(y1, y2, t);
        }
        let slope = bezier_slope(x1, x2, t);
        if slope.abs() < EPSILON {
            break;
        }
        t -= err / slope;
        if !(0.0..=1.0).contains(&t) {
            break;
        }
    }

    // Newton failed to converge; x(t) is monotonic on [0, 1] so bisect.
    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    t = x;
    for _ in 0..BISECTION_ITERATIONS {
        let v = bezier_axis(x1, x2, t);
        if (v - x).abs() < EPSILON {
            break;
        }
        if v < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) * 0.5;
    }
    bezier_axis(y1, y2, t)
}
