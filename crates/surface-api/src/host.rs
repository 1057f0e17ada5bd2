use ratatui::layout::{Rect, Size};

use crate::surface::{Opacity, SurfaceId};

/// The screen that hosts the search bar and receives the results overlay.
///
/// Controllers only hold a weak reference to the host, so implementors own
/// the view tree and decide how long it lives. None of these methods may call
/// back into the controllers: they are invoked while controller state is
/// borrowed.
pub trait HostScreen {
	/// Current bounds of the host's root surface.
	fn bounds(&self) -> Size;

	/// Rows covered by system or navigation chrome at the top of the screen.
	fn top_safe_inset(&self) -> u16 {
		0
	}

	/// Insert `surface` into the host's view tree. Mounting an already
	/// mounted surface must be harmless.
	fn mount(&mut self, surface: SurfaceId);

	/// Remove `surface` from the host's view tree.
	fn unmount(&mut self, surface: SurfaceId);

	fn set_opacity(&mut self, surface: SurfaceId, opacity: Opacity);

	fn set_frame(&mut self, surface: SurfaceId, frame: Rect);

	/// Whether the host sits inside navigation chrome that can be hidden.
	fn has_chrome(&self) -> bool {
		false
	}

	fn is_chrome_hidden(&self) -> bool {
		false
	}

	fn set_chrome_hidden(&mut self, _hidden: bool, _animated: bool) {}

	/// Request a layout pass at the host's next opportunity.
	fn invalidate_layout(&mut self) {}
}
