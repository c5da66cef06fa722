#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature the usual macros are re-exported here so that
//! downstream crates can log through `folio_core` without naming `tracing`
//! directly. With `tracing-json` a subscriber installer is also available.
//!
//! Event names are dotted, lower-case identifiers (`route.change`,
//! `presence.mount`) so that log consumers can filter on the message alone.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, info_span, trace, warn};

/// Install a global `tracing` subscriber.
///
/// `default_filter` is used when `RUST_LOG` is unset. With `json` the output
/// is one JSON object per line, otherwise the compact human format.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_subscriber(default_filter: &str, json: bool) -> bool {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().try_init().is_ok()
    } else {
        builder.compact().try_init().is_ok()
    }
}
