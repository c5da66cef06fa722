#![forbid(unsafe_code)]

//! Construction-time error model.
//!
//! There is exactly one error class: configuration that cannot produce a
//! sensible animation or navigation bar. Every check runs when a value is
//! built, so a bad setup fails before the first frame instead of rendering
//! garbage. Ticking, sampling and route observation never fail.

use thiserror::Error;

/// Rejected setup for an animation, presence, or navigation value.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A panel bank needs at least one panel.
    #[error("panel count must be at least 1")]
    ZeroPanels,

    /// An animated transition needs a positive duration.
    #[error("{field} must be a positive duration")]
    ZeroDuration { field: &'static str },

    /// Seconds read from configuration were negative, NaN, or infinite.
    #[error("{field} must be a finite, non-negative number of seconds, got {value}")]
    InvalidSeconds { field: &'static str, value: f64 },

    /// Custom bézier control points must be finite numbers.
    #[error("{field} has a non-finite cubic-bezier control point")]
    InvalidEasing { field: &'static str },

    /// The navigation bar has nothing to show.
    #[error("navigation link list is empty")]
    EmptyNavigation,

    /// Two navigation links point at the same route.
    #[error("duplicate navigation path {path:?}")]
    DuplicatePath { path: String },

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration document could not be parsed.
    #[error("{format} parse error: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },
}

impl ConfigurationError {
    /// Short label for log fields and metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ZeroPanels => "zero_panels",
            Self::ZeroDuration { .. } => "zero_duration",
            Self::InvalidSeconds { .. } => "invalid_seconds",
            Self::InvalidEasing { .. } => "invalid_easing",
            Self::EmptyNavigation => "empty_navigation",
            Self::DuplicatePath { .. } => "duplicate_path",
            Self::Io(_) => "io",
            Self::Parse { .. } => "parse",
        }
    }
}

/// Standard result type for folio construction APIs.
pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// Convert configuration seconds into a [`std::time::Duration`].
///
/// Rejects negative, NaN, and infinite inputs.
pub fn seconds(field: &'static str, value: f64) -> Result<std::time::Duration> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigurationError::InvalidSeconds { field, value });
    }
    Ok(std::time::Duration::from_secs_f64(value))
}
