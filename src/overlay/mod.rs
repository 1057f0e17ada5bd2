//! Presentation of the results overlay above a host screen.
//!
//! [`SearchOverlayCoordinator`] owns the search bar and subscribes an internal
//! presenter to the bar's activation callbacks. The presenter mounts the
//! results surface when the bar becomes active and runs the two-stage fade
//! teardown when it resigns. Time only moves when the embedder calls
//! [`SearchOverlayCoordinator::advance`].

mod delegate;
mod layout;
mod presenter;
#[cfg(test)]
mod tests;

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use std::time::Duration;

use searchveil_surface_api::{HostScreen, ResultsSurface, Size, SurfaceId};
use tracing::debug;

use crate::animation::{AnimationMode, STANDARD_DURATION};
use crate::bar::{SearchBarConfig, SearchBarController};

pub use delegate::PresentationDelegate;
pub use layout::{BarPlacement, results_frame};
pub use presenter::{OverlayAttachment, OverlayPhase, TeardownStage};

use presenter::OverlayPresenter;

/// Options recognised by the overlay coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayConfig {
	/// Hide the host's navigation chrome while the overlay is presented.
	pub hides_chrome_during_presentation: bool,
	/// Length of each fade stage in animated mode.
	pub fade_duration: Duration,
	/// Handle of the coordinator's own surface in the host tree.
	pub surface: SurfaceId,
	pub placement: BarPlacement,
}

impl Default for OverlayConfig {
	fn default() -> Self {
		Self {
			hides_chrome_during_presentation: true,
			fade_duration: STANDARD_DURATION,
			surface: SurfaceId::new(0),
			placement: BarPlacement::default(),
		}
	}
}

/// Owns the search bar and presents the results overlay in step with it.
pub struct SearchOverlayCoordinator {
	bar: Rc<RefCell<SearchBarController>>,
	presenter: Rc<RefCell<OverlayPresenter>>,
}

impl std::fmt::Debug for SearchOverlayCoordinator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SearchOverlayCoordinator")
			.field("bar", &*self.bar.borrow())
			.field("phase", &self.phase())
			.finish()
	}
}

impl SearchOverlayCoordinator {
	#[must_use]
	pub fn new(bar: SearchBarConfig, overlay: OverlayConfig) -> Self {
		let mut presenter =
			OverlayPresenter::new(overlay.surface, overlay.hides_chrome_during_presentation);
		presenter.set_fade_duration(overlay.fade_duration);
		presenter.set_placement(overlay.placement);
		let presenter = Rc::new(RefCell::new(presenter));

		let mut bar = SearchBarController::new(bar);
		bar.set_activation_delegate(&presenter);

		Self {
			bar: Rc::new(RefCell::new(bar)),
			presenter,
		}
	}

	/// Attach the host screen. Only a weak reference is kept.
	pub fn set_host<H: HostScreen + 'static>(&self, host: &Rc<RefCell<H>>) {
		let host: Rc<RefCell<dyn HostScreen>> = host.clone();
		self.presenter.borrow_mut().set_host(Rc::downgrade(&host));
	}

	/// Configure the results collaborator. `None` keeps the overlay limited
	/// to the coordinator's own surface.
	///
	/// Returns `false` and keeps the current collaborator while the overlay
	/// is attaching or attached. A teardown in flight is completed first.
	pub fn set_results(&self, results: Option<Rc<dyn ResultsSurface>>) -> bool {
		self.presenter.borrow_mut().set_results(results)
	}

	/// Register the presentation delegate. Only a weak reference is kept.
	pub fn set_presentation_delegate<D: PresentationDelegate + 'static>(
		&self,
		delegate: &Rc<RefCell<D>>,
	) {
		let delegate: Rc<RefCell<dyn PresentationDelegate>> = delegate.clone();
		self.presenter
			.borrow_mut()
			.set_presentation_delegate(Rc::downgrade(&delegate));
	}

	pub fn set_hides_chrome_during_presentation(&self, hides: bool) {
		self.presenter.borrow_mut().set_hides_chrome(hides);
	}

	#[must_use]
	pub fn hides_chrome_during_presentation(&self) -> bool {
		self.presenter.borrow().hides_chrome()
	}

	/// Shared access to the bar. Do not hold the guard across calls into the
	/// coordinator.
	#[must_use]
	pub fn search_bar(&self) -> Ref<'_, SearchBarController> {
		self.bar.borrow()
	}

	/// Exclusive access to the bar for input handling.
	#[must_use]
	pub fn search_bar_mut(&self) -> RefMut<'_, SearchBarController> {
		self.bar.borrow_mut()
	}

	#[must_use]
	pub fn is_active(&self) -> bool {
		self.bar.borrow().is_active()
	}

	/// Activate or deactivate through the bar's state machine.
	pub fn set_active(&self, active: bool) {
		let mut bar = self.bar.borrow_mut();
		if active {
			bar.activate();
		} else {
			bar.deactivate();
		}
	}

	/// Run one full deactivation with every duration forced to zero, then
	/// restore animated transitions. A teardown already in flight is finished
	/// on the spot.
	pub fn collapse_without_animation(&self) {
		debug!("collapsing overlay without animation");
		self.presenter.borrow_mut().set_mode(AnimationMode::Immediate);
		{
			let mut bar = self.bar.borrow_mut();
			bar.deactivate();
			bar.settle();
		}
		let mut presenter = self.presenter.borrow_mut();
		presenter.finish_pending();
		presenter.set_mode(AnimationMode::Animated);
	}

	#[must_use]
	pub fn animation_mode(&self) -> AnimationMode {
		self.presenter.borrow().mode()
	}

	#[must_use]
	pub fn phase(&self) -> OverlayPhase {
		self.presenter.borrow().phase()
	}

	#[must_use]
	pub fn attachment(&self) -> OverlayAttachment {
		self.phase().attachment()
	}

	/// Handle of the coordinator's own surface.
	#[must_use]
	pub fn surface(&self) -> SurfaceId {
		self.presenter.borrow().surface()
	}

	#[must_use]
	pub fn is_presented(&self) -> bool {
		self.presenter.borrow().is_surface_mounted()
	}

	/// Whether neither the overlay nor the bar has a transition running.
	#[must_use]
	pub fn is_settled(&self) -> bool {
		self.presenter.borrow().is_idle() && !self.bar.borrow().cancel_affordance().is_animating()
	}

	/// Advance every running transition by `delta`.
	pub fn advance(&self, delta: Duration) {
		self.bar.borrow_mut().advance(delta);
		self.presenter.borrow_mut().advance(delta);
	}

	pub fn set_bar_placement(&self, placement: BarPlacement) {
		let mut presenter = self.presenter.borrow_mut();
		presenter.set_placement(placement);
		presenter.layout(None);
	}

	#[must_use]
	pub fn bar_placement(&self) -> BarPlacement {
		self.presenter.borrow().placement()
	}

	/// Lay the results out against the host's current bounds.
	pub fn layout(&self) {
		self.presenter.borrow_mut().layout(None);
	}

	/// Lay the results out for a host about to change to `size`.
	pub fn transition_to(&self, size: Size) {
		self.presenter.borrow_mut().layout(Some(size));
	}
}
