//! Configuration loading and resolution utilities.
//!
//! `load` is the primary entry point and returns a [`ResolvedConfig`] built
//! from config files, `SEARCHVEIL__<SECTION>__<KEY>` environment variables and
//! CLI flags. Only the `search_bar`, `overlay` and `host` sections are accepted.

mod loader;
mod raw;
mod resolved;

pub use loader::load;
pub use resolved::{HostSettings, ResolvedConfig};
