//! The search bar: activation flag, text buffer and cancel affordance.
//!
//! [`SearchBarController`] is the single owner of the [`ActivationState`].
//! Every entry point that can change it goes through [`activate`] or
//! [`deactivate`], both of which are guarded no-ops when redundant. The
//! activation delegate hears about a flip synchronously, before any affordance
//! starts moving.
//!
//! [`activate`]: SearchBarController::activate
//! [`deactivate`]: SearchBarController::deactivate

mod cancel;
mod config;
mod delegate;
mod keys;

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::{debug, trace};

use crate::animation::AnimationMode;

pub use cancel::{
	CANCEL_SPACING, CancelAffordance, CancelVisibility, HIDDEN_TRAILING_INSET, LEADING_INSET,
};
pub use config::SearchBarConfig;
pub use delegate::{ActivationDelegate, SearchBarDelegate};
pub use keys::KeyOutcome;

/// Whether the bar is collapsed or expanded with its overlay presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationState {
	#[default]
	Inactive,
	Active,
}

impl ActivationState {
	#[must_use]
	pub fn is_active(self) -> bool {
		matches!(self, Self::Active)
	}
}

/// Placeholder appearance, derived from the activation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderTone {
	Active,
	Inactive,
}

/// Per-activation bookkeeping for the clear-or-restore policy.
#[derive(Debug, Clone, Default)]
struct EditingSession {
	snapshot: Option<String>,
	policy_applied: bool,
}

impl EditingSession {
	fn capture(text: &str) -> Self {
		Self {
			snapshot: Some(text.to_string()),
			policy_applied: false,
		}
	}
}

pub struct SearchBarController {
	config: SearchBarConfig,
	state: ActivationState,
	text: String,
	focused: bool,
	clear_visible: bool,
	session: Option<EditingSession>,
	cancel: CancelAffordance,
	activation_delegate: Option<Weak<RefCell<dyn ActivationDelegate>>>,
	delegate: Option<Weak<RefCell<dyn SearchBarDelegate>>>,
}

impl std::fmt::Debug for SearchBarController {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SearchBarController")
			.field("state", &self.state)
			.field("text", &self.text)
			.field("focused", &self.focused)
			.field("cancel", &self.cancel.visibility())
			.finish_non_exhaustive()
	}
}

impl Default for SearchBarController {
	fn default() -> Self {
		Self::new(SearchBarConfig::default())
	}
}

impl SearchBarController {
	#[must_use]
	pub fn new(config: SearchBarConfig) -> Self {
		let mut cancel = CancelAffordance::new(&config.cancel_label);
		if config.always_show_cancel_button {
			cancel.show(AnimationMode::Immediate);
		}
		Self {
			config,
			state: ActivationState::Inactive,
			text: String::new(),
			focused: false,
			clear_visible: false,
			session: None,
			cancel,
			activation_delegate: None,
			delegate: None,
		}
	}

	/// Register the activation delegate. Only a weak reference is kept.
	pub fn set_activation_delegate<D: ActivationDelegate + 'static>(
		&mut self,
		delegate: &Rc<RefCell<D>>,
	) {
		let delegate: Rc<RefCell<dyn ActivationDelegate>> = delegate.clone();
		self.activation_delegate = Some(Rc::downgrade(&delegate));
	}

	/// Register the event delegate. Only a weak reference is kept.
	pub fn set_delegate<D: SearchBarDelegate + 'static>(&mut self, delegate: &Rc<RefCell<D>>) {
		let delegate: Rc<RefCell<dyn SearchBarDelegate>> = delegate.clone();
		self.delegate = Some(Rc::downgrade(&delegate));
	}

	#[must_use]
	pub fn config(&self) -> &SearchBarConfig {
		&self.config
	}

	#[must_use]
	pub fn state(&self) -> ActivationState {
		self.state
	}

	#[must_use]
	pub fn is_active(&self) -> bool {
		self.state.is_active()
	}

	#[must_use]
	pub fn text(&self) -> &str {
		&self.text
	}

	#[must_use]
	pub fn placeholder(&self) -> &str {
		&self.config.placeholder
	}

	#[must_use]
	pub fn placeholder_tone(&self) -> PlaceholderTone {
		if self.is_active() {
			PlaceholderTone::Active
		} else {
			PlaceholderTone::Inactive
		}
	}

	/// Whether the input currently holds focus.
	#[must_use]
	pub fn is_focused(&self) -> bool {
		self.focused
	}

	/// Whether the in-field clear button is visible.
	#[must_use]
	pub fn is_clear_visible(&self) -> bool {
		self.clear_visible
	}

	#[must_use]
	pub fn cancel_affordance(&self) -> &CancelAffordance {
		&self.cancel
	}

	/// Text captured for the current session, if one is live.
	#[must_use]
	pub fn original_text(&self) -> Option<&str> {
		self.session
			.as_ref()
			.and_then(|session| session.snapshot.as_deref())
	}

	/// Width left for the input field inside a bar `bar_width` cells wide.
	#[must_use]
	pub fn input_width(&self, bar_width: u16) -> u16 {
		bar_width
			.saturating_sub(LEADING_INSET)
			.saturating_sub(self.cancel.trailing_inset())
	}

	/// Expand the bar. No-op while already active.
	pub fn activate(&mut self) {
		if self.is_active() {
			trace!("activate ignored: bar already active");
			return;
		}
		self.state = ActivationState::Active;
		debug!(text = %self.text, "search bar activated");
		self.notify_activation(|delegate| delegate.will_become_active());
		if !self.config.always_show_cancel_button {
			self.cancel.show(AnimationMode::Animated);
		}
		if self.session.is_none() {
			self.session = Some(EditingSession::capture(&self.text));
		}
	}

	/// Collapse the bar and apply the clear-or-restore policy. No-op while
	/// already inactive.
	pub fn deactivate(&mut self) {
		if !self.is_active() {
			trace!("deactivate ignored: bar already inactive");
			return;
		}
		self.state = ActivationState::Inactive;
		debug!(text = %self.text, "search bar deactivated");
		self.resign_focus();
		self.notify_activation(|delegate| delegate.will_resign_active());
		if !self.config.always_show_cancel_button {
			self.cancel.hide(AnimationMode::Animated);
		}
		self.apply_end_policy();
		self.session = None;
	}

	/// Give the input focus, beginning an editing session.
	pub fn focus(&mut self) {
		if self.focused {
			return;
		}
		// Every editing-begin recaptures, even inside a live session.
		self.session = Some(EditingSession::capture(&self.text));
		self.activate();
		self.focused = true;
		self.emit(|delegate, bar| delegate.editing_began(bar));
	}

	/// Release input focus, ending the editing session's input phase.
	pub fn resign_focus(&mut self) {
		if !self.focused {
			return;
		}
		self.focused = false;
		self.emit(|delegate, bar| delegate.editing_ended(bar));
		self.refresh_clear_button();
	}

	/// Handle the explicit search action. Returns `false` to reject an empty
	/// query, in which case focus and state are left untouched.
	pub fn submit(&mut self) -> bool {
		self.emit(|delegate, bar| delegate.search_submitted(bar));
		let accepted = !self.text.trim().is_empty();
		if !accepted {
			debug!("rejected submit of empty query");
			return false;
		}
		if self.is_active() {
			self.deactivate();
		} else {
			self.apply_end_policy();
		}
		true
	}

	/// Handle the cancel affordance.
	pub fn cancel(&mut self) {
		self.apply_end_policy();
		self.resign_focus();
		self.emit(|delegate, bar| delegate.cancel_clicked(bar));
		self.deactivate();
	}

	/// Handle the in-field clear button.
	pub fn clear(&mut self) {
		if !self.focused {
			self.focus();
		}
		self.text.clear();
		self.refresh_clear_button();
		self.emit_text_changed("");
	}

	/// Replace the buffer with user-entered text.
	pub fn edit(&mut self, text: impl Into<String>) {
		self.text = text.into();
		self.user_edited();
	}

	/// Replace the buffer programmatically. Does not report `text_changed`.
	pub fn set_text(&mut self, text: impl Into<String>) {
		self.text = text.into();
		self.refresh_clear_button();
	}

	/// Pin or unpin the cancel affordance, snapping it without animation.
	pub fn set_always_show_cancel_button(&mut self, always: bool) {
		self.config.always_show_cancel_button = always;
		if always || self.is_active() {
			self.cancel.show(AnimationMode::Immediate);
		} else {
			self.cancel.hide(AnimationMode::Immediate);
		}
	}

	pub fn set_cancel_label(&mut self, label: impl Into<String>) {
		self.config.cancel_label = label.into();
		self.cancel.relabel(&self.config.cancel_label);
	}

	pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
		self.config.placeholder = placeholder.into();
	}

	/// Advance the cancel affordance's transition clock.
	pub fn advance(&mut self, delta: Duration) {
		self.cancel.advance(delta);
	}

	/// Finish any cancel affordance transition immediately.
	pub fn settle(&mut self) {
		self.cancel.settle();
	}

	fn user_edited(&mut self) {
		self.refresh_clear_button();
		self.emit_text_changed(self.text.trim());
	}

	fn refresh_clear_button(&mut self) {
		self.clear_visible = !self.text.is_empty();
	}

	/// Clear or restore the text, at most once per session.
	fn apply_end_policy(&mut self) {
		let snapshot = match self.session.as_mut() {
			Some(session) if session.policy_applied => {
				trace!("end-of-session policy already applied");
				return;
			}
			Some(session) => {
				session.policy_applied = true;
				session.snapshot.take()
			}
			None => None,
		};

		if self.config.clear_on_end_editing {
			self.set_text(String::new());
			self.emit_text_changed("");
		} else if self.config.return_text_on_cancel {
			let Some(original) = snapshot else {
				return;
			};
			debug!(%original, "restoring pre-edit text");
			self.emit_text_changed(&original);
			self.set_text(original);
		}
	}

	fn notify_activation(&self, notify: impl FnOnce(&mut dyn ActivationDelegate)) {
		if let Some(delegate) = self.activation_delegate.as_ref().and_then(Weak::upgrade) {
			notify(&mut *delegate.borrow_mut());
		}
	}

	fn emit(&self, event: impl FnOnce(&mut dyn SearchBarDelegate, &Self)) {
		if let Some(delegate) = self.delegate.as_ref().and_then(Weak::upgrade) {
			event(&mut *delegate.borrow_mut(), self);
		}
	}

	fn emit_text_changed(&self, text: &str) {
		self.emit(|delegate, _| delegate.text_changed(text));
	}
}
