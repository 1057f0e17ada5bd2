use std::time::Duration;

use unicode_width::UnicodeWidthStr;

use crate::animation::{AnimationMode, Frame, STANDARD_DURATION, Started, Timeline, ease_in_out};

/// Cells between the input field and the bar's leading edge.
pub const LEADING_INSET: u16 = 1;
/// Trailing inset reserved while the cancel affordance is hidden.
pub const HIDDEN_TRAILING_INSET: u16 = 1;
/// Gap on either side of the cancel label.
pub const CANCEL_SPACING: u16 = 1;

/// Target visibility of the cancel affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelVisibility {
	Shown,
	Hidden,
}

/// The cancel button at the trailing edge of the bar.
///
/// Showing makes it visible right away but interactive only once the
/// transition completes; hiding stops interaction right away and marks it
/// hidden once the transition completes.
#[derive(Debug, Clone)]
pub struct CancelAffordance {
	target: CancelVisibility,
	hidden: bool,
	interactive: bool,
	from_inset: u16,
	to_inset: u16,
	shown_inset: u16,
	timeline: Timeline<CancelVisibility>,
}

impl CancelAffordance {
	pub(crate) fn new(label: &str) -> Self {
		Self {
			target: CancelVisibility::Hidden,
			hidden: true,
			interactive: false,
			from_inset: HIDDEN_TRAILING_INSET,
			to_inset: HIDDEN_TRAILING_INSET,
			shown_inset: shown_inset_for(label),
			timeline: Timeline::new(),
		}
	}

	#[must_use]
	pub fn visibility(&self) -> CancelVisibility {
		self.target
	}

	#[must_use]
	pub fn is_hidden(&self) -> bool {
		self.hidden
	}

	#[must_use]
	pub fn is_interactive(&self) -> bool {
		self.interactive
	}

	#[must_use]
	pub fn is_animating(&self) -> bool {
		!self.timeline.is_idle()
	}

	/// Trailing inset the input field must leave free, interpolated while a
	/// transition runs.
	#[must_use]
	pub fn trailing_inset(&self) -> u16 {
		match self.timeline.progress(self.target) {
			Some(progress) => {
				let eased = ease_in_out(progress);
				let from = f32::from(self.from_inset);
				let to = f32::from(self.to_inset);
				(from + (to - from) * eased).round() as u16
			}
			None => self.to_inset,
		}
	}

	pub(crate) fn relabel(&mut self, label: &str) {
		self.shown_inset = shown_inset_for(label);
		if self.target == CancelVisibility::Shown {
			self.to_inset = self.shown_inset;
		}
	}

	pub(crate) fn show(&mut self, mode: AnimationMode) {
		self.hidden = false;
		self.transition(CancelVisibility::Shown, self.shown_inset, mode);
	}

	pub(crate) fn hide(&mut self, mode: AnimationMode) {
		self.interactive = false;
		self.transition(CancelVisibility::Hidden, HIDDEN_TRAILING_INSET, mode);
	}

	pub(crate) fn advance(&mut self, delta: Duration) {
		for frame in self.timeline.advance(delta) {
			if let Frame::Finished(visibility) = frame {
				self.complete(visibility);
			}
		}
	}

	/// Complete the running transition, if any, without waiting.
	pub(crate) fn settle(&mut self) {
		while let Some(visibility) = self.timeline.pop_oldest() {
			self.complete(visibility);
		}
	}

	fn transition(&mut self, target: CancelVisibility, inset: u16, mode: AnimationMode) {
		// An interrupted transition never reports completion.
		self.from_inset = self.trailing_inset();
		self.timeline.cancel(self.target);
		self.target = target;
		self.to_inset = inset;
		if self.timeline.start(target, mode.duration(STANDARD_DURATION)) == Started::Finished {
			self.complete(target);
		}
	}

	fn complete(&mut self, visibility: CancelVisibility) {
		self.from_inset = self.to_inset;
		match visibility {
			CancelVisibility::Shown => self.interactive = true,
			CancelVisibility::Hidden => self.hidden = true,
		}
	}
}

fn shown_inset_for(label: &str) -> u16 {
	let width = u16::try_from(label.width()).unwrap_or(u16::MAX);
	width.saturating_add(CANCEL_SPACING.saturating_mul(2))
}
