#![forbid(unsafe_code)]

//! Folio Site
//!
//! The site shell around the transition layer: the header with its active
//! navigation link, and the `folio-demo` driver that replays a navigation
//! script headlessly and prints every frame.

pub mod cli;
pub mod error;
pub mod header;
pub mod replay;

pub use cli::run_from_env;
pub use error::{Result, SiteError};
pub use header::HeaderView;
pub use replay::{OutputFormat, ReplayOptions, ReplaySummary, run_replay};
