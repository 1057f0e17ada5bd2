//! Headless search bar with a coordinated results overlay.
//!
//! The root module re-exports the two controllers and the collaborator
//! contracts so that embedders can wire a host screen without digging through
//! the module hierarchy.

pub mod animation;
pub mod app_dirs;
pub mod bar;
pub mod headless;
pub mod logging;
pub mod overlay;

pub use animation::{AnimationMode, STANDARD_DURATION};
pub use bar::{
	ActivationDelegate, ActivationState, KeyOutcome, SearchBarConfig, SearchBarController,
	SearchBarDelegate,
};
pub use overlay::{
	BarPlacement, OverlayAttachment, OverlayConfig, OverlayPhase, PresentationDelegate,
	SearchOverlayCoordinator, TeardownStage,
};
pub use searchveil_surface_api::{HostScreen, Opacity, Rect, ResultsSurface, Size, SurfaceId};
