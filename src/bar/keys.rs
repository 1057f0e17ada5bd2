use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::SearchBarController;

/// How the bar reacted to a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyOutcome {
	/// The key is not one the bar handles.
	Ignored,
	/// The key edited the text or moved focus.
	Consumed,
	/// The query was submitted and the bar collapsed.
	Submitted,
	/// An empty query was submitted and rejected; focus stays put.
	Rejected,
	Cancelled,
}

impl SearchBarController {
	/// Map a terminal key press onto the bar's operations.
	pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
		if key.kind == KeyEventKind::Release {
			return KeyOutcome::Ignored;
		}
		match key.code {
			KeyCode::Esc => {
				if !self.is_active() && !self.cancel.is_interactive() {
					return KeyOutcome::Ignored;
				}
				self.cancel();
				KeyOutcome::Cancelled
			}
			KeyCode::Enter => {
				if self.submit() {
					KeyOutcome::Submitted
				} else {
					KeyOutcome::Rejected
				}
			}
			KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
				self.clear();
				KeyOutcome::Consumed
			}
			KeyCode::Char(ch)
				if !key
					.modifiers
					.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
			{
				self.focus();
				let mut text = self.text.clone();
				text.push(ch);
				self.edit(text);
				KeyOutcome::Consumed
			}
			KeyCode::Backspace => {
				self.focus();
				let mut text = self.text.clone();
				if text.pop().is_none() {
					return KeyOutcome::Consumed;
				}
				self.edit(text);
				KeyOutcome::Consumed
			}
			_ => KeyOutcome::Ignored,
		}
	}
}
