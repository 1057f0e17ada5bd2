use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use searchveil_surface_api::{HostScreen, Opacity, ResultsSurface, Size, SurfaceId};
use tracing::{debug, trace, warn};

use super::delegate::PresentationDelegate;
use super::layout::{BarPlacement, results_frame};
use crate::animation::{AnimationMode, Frame, STANDARD_DURATION, Started, Timeline, ease_in_out};
use crate::bar::ActivationDelegate;

/// Whether the results surface is mounted into the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayAttachment {
	#[default]
	Detached,
	Attached,
}

/// Which half of the two-stage teardown is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TeardownStage {
	/// Fading surface going from opaque to transparent.
	Backdrop,
	/// Results detached from the host, root going transparent.
	Root,
}

/// Lifecycle of the results surface inside the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "phase", content = "stage")]
pub enum OverlayPhase {
	#[default]
	Detached,
	Attaching,
	Attached,
	Detaching(TeardownStage),
}

impl OverlayPhase {
	#[must_use]
	pub fn attachment(self) -> OverlayAttachment {
		match self {
			Self::Detached => OverlayAttachment::Detached,
			_ => OverlayAttachment::Attached,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fade {
	In,
	OutBackdrop,
	OutRoot,
}

/// Attachment state machine driven by the bar's activation callbacks.
pub(crate) struct OverlayPresenter {
	surface: SurfaceId,
	surface_mounted: bool,
	host: Option<Weak<RefCell<dyn HostScreen>>>,
	results: Option<Rc<dyn ResultsSurface>>,
	presentation: Option<Weak<RefCell<dyn PresentationDelegate>>>,
	phase: OverlayPhase,
	mode: AnimationMode,
	fade_duration: Duration,
	hides_chrome: bool,
	placement: BarPlacement,
	timeline: Timeline<Fade>,
}

type SharedHost = Rc<RefCell<dyn HostScreen>>;

impl OverlayPresenter {
	pub(crate) fn new(surface: SurfaceId, hides_chrome: bool) -> Self {
		Self {
			surface,
			surface_mounted: false,
			host: None,
			results: None,
			presentation: None,
			phase: OverlayPhase::Detached,
			mode: AnimationMode::Animated,
			fade_duration: STANDARD_DURATION,
			hides_chrome,
			placement: BarPlacement::default(),
			timeline: Timeline::new(),
		}
	}

	pub(crate) fn set_host(&mut self, host: Weak<RefCell<dyn HostScreen>>) {
		self.host = Some(host);
	}

	/// Swap the results collaborator. A pending teardown is finished first so
	/// the outgoing root is unmounted; an attached overlay rejects the swap.
	pub(crate) fn set_results(&mut self, results: Option<Rc<dyn ResultsSurface>>) -> bool {
		if matches!(self.phase, OverlayPhase::Detaching(_)) {
			debug!("finishing in-flight teardown before swapping results");
			self.finish_pending();
		}
		if self.phase != OverlayPhase::Detached {
			warn!(phase = ?self.phase, "results swap rejected while overlay is attached");
			return false;
		}
		self.results = results;
		true
	}

	pub(crate) fn set_presentation_delegate(
		&mut self,
		delegate: Weak<RefCell<dyn PresentationDelegate>>,
	) {
		self.presentation = Some(delegate);
	}

	pub(crate) fn set_fade_duration(&mut self, duration: Duration) {
		self.fade_duration = duration;
	}

	pub(crate) fn set_hides_chrome(&mut self, hides: bool) {
		self.hides_chrome = hides;
	}

	pub(crate) fn hides_chrome(&self) -> bool {
		self.hides_chrome
	}

	pub(crate) fn set_mode(&mut self, mode: AnimationMode) {
		self.mode = mode;
	}

	pub(crate) fn mode(&self) -> AnimationMode {
		self.mode
	}

	pub(crate) fn phase(&self) -> OverlayPhase {
		self.phase
	}

	pub(crate) fn surface(&self) -> SurfaceId {
		self.surface
	}

	pub(crate) fn is_surface_mounted(&self) -> bool {
		self.surface_mounted
	}

	pub(crate) fn is_idle(&self) -> bool {
		self.timeline.is_idle()
	}

	pub(crate) fn set_placement(&mut self, placement: BarPlacement) {
		self.placement = placement;
	}

	pub(crate) fn placement(&self) -> BarPlacement {
		self.placement
	}

	/// Position the results root for a host of `size`, or the host's current
	/// bounds when `size` is `None`.
	pub(crate) fn layout(&mut self, size: Option<Size>) {
		let (Some(host), Some(results)) = (self.upgrade_host(), self.results.clone()) else {
			return;
		};
		let mut host = host.borrow_mut();
		let size = size.unwrap_or_else(|| host.bounds());
		let frame = results_frame(size, self.placement, host.top_safe_inset());
		trace!(?frame, "laying out results surface");
		host.set_frame(results.root(), frame);
	}

	/// Step every running fade by `delta`.
	pub(crate) fn advance(&mut self, delta: Duration) {
		let frames = self.timeline.advance(delta);
		if frames.is_empty() {
			return;
		}
		let Some(host) = self.upgrade_host() else {
			self.abandon();
			return;
		};
		for frame in frames {
			match frame {
				Frame::Progress { key, progress } => self.interpolate(&host, key, progress),
				Frame::Finished(key) => self.finish(&host, key),
			}
		}
	}

	/// Complete every running fade immediately, in order, including any
	/// stages those completions start.
	pub(crate) fn finish_pending(&mut self) {
		let Some(host) = self.upgrade_host() else {
			self.abandon();
			return;
		};
		while let Some(key) = self.timeline.pop_oldest() {
			self.finish(&host, key);
		}
	}

	fn attach(&mut self, host: &SharedHost) {
		match self.phase {
			OverlayPhase::Attaching | OverlayPhase::Attached => {
				trace!(phase = ?self.phase, "attach skipped: overlay already attached");
				return;
			}
			OverlayPhase::Detaching(_) => {
				debug!("finishing in-flight teardown before re-attaching");
				while let Some(key) = self.timeline.pop_oldest() {
					self.finish(host, key);
				}
			}
			OverlayPhase::Detached => {}
		}

		if let Some(results) = self.results.clone() {
			{
				let mut host = host.borrow_mut();
				host.mount(results.root());
				host.set_opacity(results.root(), Opacity::TRANSPARENT);
				host.set_opacity(results.fading(), Opacity::TRANSPARENT);
				if self.hides_chrome && host.has_chrome() {
					host.set_chrome_hidden(true, self.mode.is_animated());
				}
			}
			self.phase = OverlayPhase::Attaching;
			debug!(root = %results.root(), "attaching results surface");
			let started = self.timeline.start(Fade::In, self.duration());
			results.did_attach();
			if started == Started::Finished {
				self.finish(host, Fade::In);
			}
		}

		host.borrow_mut().invalidate_layout();
		self.mount_surface(host);
		self.layout(None);
	}

	fn detach(&mut self, host: &SharedHost) {
		{
			let mut host = host.borrow_mut();
			if self.hides_chrome && host.has_chrome() {
				host.set_chrome_hidden(false, self.mode.is_animated());
			}
		}
		self.unmount_surface(host);

		let Some(results) = self.results.clone() else {
			return;
		};
		match self.phase {
			OverlayPhase::Detached | OverlayPhase::Detaching(_) => {
				trace!(phase = ?self.phase, "teardown skipped");
				return;
			}
			OverlayPhase::Attaching => {
				self.timeline.cancel(Fade::In);
				host.borrow_mut().set_opacity(results.root(), Opacity::OPAQUE);
			}
			OverlayPhase::Attached => {}
		}

		debug!(mode = ?self.mode, "tearing down results surface");
		host.borrow_mut().set_opacity(results.fading(), Opacity::OPAQUE);
		self.phase = OverlayPhase::Detaching(TeardownStage::Backdrop);
		if self.timeline.start(Fade::OutBackdrop, self.duration()) == Started::Finished {
			self.finish(host, Fade::OutBackdrop);
		}
	}

	fn finish(&mut self, host: &SharedHost, fade: Fade) {
		let Some(results) = self.results.clone() else {
			self.phase = OverlayPhase::Detached;
			return;
		};
		match fade {
			Fade::In => {
				let mut host = host.borrow_mut();
				host.set_opacity(results.fading(), Opacity::OPAQUE);
				host.set_opacity(results.root(), Opacity::OPAQUE);
				self.phase = OverlayPhase::Attached;
				debug!("results surface attached");
			}
			Fade::OutBackdrop => {
				host.borrow_mut()
					.set_opacity(results.fading(), Opacity::TRANSPARENT);
				results.will_detach();
				self.phase = OverlayPhase::Detaching(TeardownStage::Root);
				if self.timeline.start(Fade::OutRoot, self.duration()) == Started::Finished {
					self.finish(host, Fade::OutRoot);
				}
			}
			Fade::OutRoot => {
				{
					let mut host = host.borrow_mut();
					host.set_opacity(results.root(), Opacity::TRANSPARENT);
					host.unmount(results.root());
				}
				results.did_detach();
				self.phase = OverlayPhase::Detached;
				debug!("results surface detached");
			}
		}
	}

	fn interpolate(&self, host: &SharedHost, fade: Fade, progress: f32) {
		let Some(results) = self.results.as_ref() else {
			return;
		};
		let eased = ease_in_out(progress);
		let mut host = host.borrow_mut();
		match fade {
			Fade::In => {
				let value = Opacity::TRANSPARENT.lerp(Opacity::OPAQUE, eased);
				host.set_opacity(results.fading(), value);
				host.set_opacity(results.root(), value);
			}
			Fade::OutBackdrop => {
				let value = Opacity::OPAQUE.lerp(Opacity::TRANSPARENT, eased);
				host.set_opacity(results.fading(), value);
			}
			Fade::OutRoot => {
				let value = Opacity::OPAQUE.lerp(Opacity::TRANSPARENT, eased);
				host.set_opacity(results.root(), value);
			}
		}
	}

	fn mount_surface(&mut self, host: &SharedHost) {
		if self.surface_mounted {
			return;
		}
		self.present(|delegate| delegate.will_present());
		{
			let mut host = host.borrow_mut();
			if self.hides_chrome && host.has_chrome() && !host.is_chrome_hidden() {
				host.set_chrome_hidden(true, false);
			}
			host.mount(self.surface);
			host.invalidate_layout();
		}
		self.surface_mounted = true;
		self.present(|delegate| delegate.did_present());
	}

	fn unmount_surface(&mut self, host: &SharedHost) {
		if !self.surface_mounted {
			return;
		}
		self.present(|delegate| delegate.will_dismiss());
		{
			let mut host = host.borrow_mut();
			if self.hides_chrome && host.has_chrome() && host.is_chrome_hidden() {
				host.set_chrome_hidden(false, false);
			}
			host.unmount(self.surface);
		}
		self.surface_mounted = false;
		self.present(|delegate| delegate.did_dismiss());
	}

	/// Forget all host-side state once the host is gone.
	fn abandon(&mut self) {
		warn!("host screen dropped; resetting overlay state");
		while self.timeline.pop_oldest().is_some() {}
		self.surface_mounted = false;
		self.phase = OverlayPhase::Detached;
	}

	fn duration(&self) -> Duration {
		self.mode.duration(self.fade_duration)
	}

	fn upgrade_host(&self) -> Option<SharedHost> {
		self.host.as_ref().and_then(Weak::upgrade)
	}

	fn present(&self, event: impl FnOnce(&mut dyn PresentationDelegate)) {
		if let Some(delegate) = self.presentation.as_ref().and_then(Weak::upgrade) {
			event(&mut *delegate.borrow_mut());
		}
	}
}

impl ActivationDelegate for OverlayPresenter {
	fn will_become_active(&mut self) {
		let Some(host) = self.upgrade_host() else {
			debug!("no host screen; overlay stays detached");
			return;
		};
		self.attach(&host);
	}

	fn will_resign_active(&mut self) {
		let Some(host) = self.upgrade_host() else {
			if self.phase != OverlayPhase::Detached || self.surface_mounted {
				self.abandon();
			}
			return;
		};
		self.detach(&host);
	}
}
