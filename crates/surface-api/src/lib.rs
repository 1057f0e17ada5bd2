//! Contracts shared between the searchveil controllers and the screens that
//! embed them.
//!
//! The controllers never look inside a surface. They hand opaque
//! [`SurfaceId`] handles to a [`HostScreen`], which owns the real view tree,
//! and drive a [`ResultsSurface`] through its lifecycle hooks.

pub mod host;
pub mod results;
pub mod surface;

pub use host::HostScreen;
pub use ratatui::layout::{Rect, Size};
pub use results::ResultsSurface;
pub use surface::{Opacity, SurfaceId};
