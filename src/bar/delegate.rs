use super::SearchBarController;

/// Receives the bar's activation transitions. Implemented by the overlay
/// coordinator; every method is optional.
pub trait ActivationDelegate {
	/// Fired after the bar flipped to active, before any visual change.
	fn will_become_active(&mut self) {}

	/// Fired after the bar flipped to inactive, before any visual change.
	fn will_resign_active(&mut self) {}
}

/// Receives text and editing events from the bar. Implemented by the host;
/// every method is optional.
///
/// The bar is mutably borrowed while these run, so handlers read it through
/// the reference they are given rather than through any shared handle.
pub trait SearchBarDelegate {
	fn editing_began(&mut self, _bar: &SearchBarController) {}

	fn editing_ended(&mut self, _bar: &SearchBarController) {}

	fn cancel_clicked(&mut self, _bar: &SearchBarController) {}

	fn search_submitted(&mut self, _bar: &SearchBarController) {}

	/// User edits report the trimmed text; policy resets report the new text.
	fn text_changed(&mut self, _text: &str) {}
}
