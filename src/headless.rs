//! In-memory collaborators for driving the controllers without a real view
//! tree. The demo binary renders their state; the tests assert on it.

use std::cell::Cell;
use std::collections::BTreeMap;

use ratatui::layout::{Rect, Size};
use searchveil_surface_api::{HostScreen, Opacity, ResultsSurface, SurfaceId};
use serde::Serialize;

/// One call made against a [`HeadlessHost`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum HostOp {
	Mount { surface: SurfaceId },
	Unmount { surface: SurfaceId },
	ChromeHidden { hidden: bool, animated: bool },
	InvalidateLayout,
}

/// Host screen that keeps its view tree in plain collections.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HeadlessHost {
	#[serde(skip)]
	bounds: Size,
	top_safe_inset: u16,
	has_chrome: bool,
	chrome_hidden: bool,
	mounted: Vec<SurfaceId>,
	opacity: BTreeMap<SurfaceId, Opacity>,
	#[serde(skip)]
	frames: BTreeMap<SurfaceId, Rect>,
	#[serde(skip)]
	ops: Vec<HostOp>,
	layout_requests: usize,
}

impl HeadlessHost {
	#[must_use]
	pub fn new(bounds: Size) -> Self {
		Self {
			bounds,
			..Self::default()
		}
	}

	/// Give the host navigation chrome occupying `top_safe_inset` rows.
	#[must_use]
	pub fn with_chrome(mut self, top_safe_inset: u16) -> Self {
		self.has_chrome = true;
		self.top_safe_inset = top_safe_inset;
		self
	}

	pub fn resize(&mut self, bounds: Size) {
		self.bounds = bounds;
	}

	#[must_use]
	pub fn is_mounted(&self, surface: SurfaceId) -> bool {
		self.mounted.contains(&surface)
	}

	/// Mounted surfaces, bottom-most first.
	#[must_use]
	pub fn mounted(&self) -> &[SurfaceId] {
		&self.mounted
	}

	#[must_use]
	pub fn opacity(&self, surface: SurfaceId) -> Option<Opacity> {
		self.opacity.get(&surface).copied()
	}

	#[must_use]
	pub fn frame(&self, surface: SurfaceId) -> Option<Rect> {
		self.frames.get(&surface).copied()
	}

	#[must_use]
	pub fn ops(&self) -> &[HostOp] {
		&self.ops
	}

	pub fn take_ops(&mut self) -> Vec<HostOp> {
		std::mem::take(&mut self.ops)
	}

	#[must_use]
	pub fn layout_requests(&self) -> usize {
		self.layout_requests
	}

	/// Number of times `surface` was mounted.
	#[must_use]
	pub fn mount_count(&self, surface: SurfaceId) -> usize {
		self.ops
			.iter()
			.filter(|op| matches!(op, HostOp::Mount { surface: s } if *s == surface))
			.count()
	}
}

impl HostScreen for HeadlessHost {
	fn bounds(&self) -> Size {
		self.bounds
	}

	fn top_safe_inset(&self) -> u16 {
		self.top_safe_inset
	}

	fn mount(&mut self, surface: SurfaceId) {
		self.ops.push(HostOp::Mount { surface });
		if !self.mounted.contains(&surface) {
			self.mounted.push(surface);
		}
	}

	fn unmount(&mut self, surface: SurfaceId) {
		self.ops.push(HostOp::Unmount { surface });
		self.mounted.retain(|mounted| *mounted != surface);
	}

	fn set_opacity(&mut self, surface: SurfaceId, opacity: Opacity) {
		self.opacity.insert(surface, opacity);
	}

	fn set_frame(&mut self, surface: SurfaceId, frame: Rect) {
		self.frames.insert(surface, frame);
	}

	fn has_chrome(&self) -> bool {
		self.has_chrome
	}

	fn is_chrome_hidden(&self) -> bool {
		self.chrome_hidden
	}

	fn set_chrome_hidden(&mut self, hidden: bool, animated: bool) {
		self.ops.push(HostOp::ChromeHidden { hidden, animated });
		self.chrome_hidden = hidden;
	}

	fn invalidate_layout(&mut self) {
		self.ops.push(HostOp::InvalidateLayout);
		self.layout_requests += 1;
	}
}

/// Results container with fixed surface handles and lifecycle counters.
#[derive(Debug, Default)]
pub struct HeadlessResults {
	root: SurfaceId,
	fading: SurfaceId,
	attached: Cell<usize>,
	detaching: Cell<usize>,
	detached: Cell<usize>,
}

impl HeadlessResults {
	#[must_use]
	pub fn new(root: SurfaceId, fading: SurfaceId) -> Self {
		Self {
			root,
			fading,
			..Self::default()
		}
	}

	/// Times the results were attached to the host.
	#[must_use]
	pub fn attach_count(&self) -> usize {
		self.attached.get()
	}

	/// Times the results were told they are leaving the host.
	#[must_use]
	pub fn will_detach_count(&self) -> usize {
		self.detaching.get()
	}

	#[must_use]
	pub fn detach_count(&self) -> usize {
		self.detached.get()
	}
}

impl ResultsSurface for HeadlessResults {
	fn root(&self) -> SurfaceId {
		self.root
	}

	fn fading(&self) -> SurfaceId {
		self.fading
	}

	fn did_attach(&self) {
		self.attached.set(self.attached.get() + 1);
	}

	fn will_detach(&self) {
		self.detaching.set(self.detaching.get() + 1);
	}

	fn did_detach(&self) {
		self.detached.set(self.detached.get() + 1);
	}
}
