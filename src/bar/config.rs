/// Options recognised by the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarConfig {
	/// Hint rendered while the input is empty.
	pub placeholder: String,
	/// Label of the cancel affordance. Its display width sizes the inset the
	/// affordance reserves.
	pub cancel_label: String,
	/// Blank the text whenever a session ends.
	pub clear_on_end_editing: bool,
	/// Restore the text captured when the session began. Only consulted when
	/// `clear_on_end_editing` is off.
	pub return_text_on_cancel: bool,
	/// Keep the cancel affordance visible even while inactive.
	pub always_show_cancel_button: bool,
}

impl Default for SearchBarConfig {
	fn default() -> Self {
		Self {
			placeholder: "Search...".to_string(),
			cancel_label: "Cancel".to_string(),
			clear_on_end_editing: true,
			return_text_on_cancel: false,
			always_show_cancel_button: false,
		}
	}
}

impl SearchBarConfig {
	/// Configuration that keeps whatever the user typed after a session ends.
	#[must_use]
	pub fn retaining() -> Self {
		Self {
			clear_on_end_editing: false,
			..Self::default()
		}
	}

	/// Configuration that reverts to the pre-edit text when a session ends.
	#[must_use]
	pub fn restoring() -> Self {
		Self {
			clear_on_end_editing: false,
			return_text_on_cancel: true,
			..Self::default()
		}
	}
}
