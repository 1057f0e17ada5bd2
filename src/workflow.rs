use std::cell::RefCell;
use std::rc::Rc;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use searchveil::bar::CancelVisibility;
use searchveil::headless::{HeadlessHost, HeadlessResults};
use searchveil::{
	ActivationState, HostScreen, KeyOutcome, Opacity, OverlayAttachment, OverlayPhase,
	PresentationDelegate, Rect, ResultsSurface, SearchBarController, SearchBarDelegate,
	SearchOverlayCoordinator, SurfaceId,
};
use serde::Serialize;
use tracing::debug;

use crate::script::Command;
use crate::settings::ResolvedConfig;

/// Notification observed while replaying one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "event", content = "text")]
pub(crate) enum Event {
	EditingBegan,
	EditingEnded,
	CancelClicked,
	SearchSubmitted,
	TextChanged(String),
	WillPresent,
	DidPresent,
	WillDismiss,
	DidDismiss,
}

impl Event {
	pub(crate) fn label(&self) -> String {
		match self {
			Self::EditingBegan => "editing_began".into(),
			Self::EditingEnded => "editing_ended".into(),
			Self::CancelClicked => "cancel_clicked".into(),
			Self::SearchSubmitted => "search_submitted".into(),
			Self::TextChanged(text) => format!("text_changed({text:?})"),
			Self::WillPresent => "will_present".into(),
			Self::DidPresent => "did_present".into(),
			Self::WillDismiss => "will_dismiss".into(),
			Self::DidDismiss => "did_dismiss".into(),
		}
	}
}

/// Collects bar and presentation notifications between snapshots.
#[derive(Debug, Default)]
struct EventLog {
	events: Vec<Event>,
}

impl SearchBarDelegate for EventLog {
	fn editing_began(&mut self, _bar: &SearchBarController) {
		self.events.push(Event::EditingBegan);
	}

	fn editing_ended(&mut self, _bar: &SearchBarController) {
		self.events.push(Event::EditingEnded);
	}

	fn cancel_clicked(&mut self, _bar: &SearchBarController) {
		self.events.push(Event::CancelClicked);
	}

	fn search_submitted(&mut self, _bar: &SearchBarController) {
		self.events.push(Event::SearchSubmitted);
	}

	fn text_changed(&mut self, text: &str) {
		self.events.push(Event::TextChanged(text.to_string()));
	}
}

impl PresentationDelegate for EventLog {
	fn will_present(&mut self) {
		self.events.push(Event::WillPresent);
	}

	fn did_present(&mut self) {
		self.events.push(Event::DidPresent);
	}

	fn will_dismiss(&mut self) {
		self.events.push(Event::WillDismiss);
	}

	fn did_dismiss(&mut self) {
		self.events.push(Event::DidDismiss);
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct FrameSnapshot {
	pub(crate) x: u16,
	pub(crate) y: u16,
	pub(crate) width: u16,
	pub(crate) height: u16,
}

impl From<Rect> for FrameSnapshot {
	fn from(rect: Rect) -> Self {
		Self {
			x: rect.x,
			y: rect.y,
			width: rect.width,
			height: rect.height,
		}
	}
}

/// State of the bar, overlay and host after one command.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Snapshot {
	pub(crate) step: usize,
	pub(crate) command: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub(crate) outcome: Option<KeyOutcome>,
	pub(crate) state: ActivationState,
	pub(crate) text: String,
	pub(crate) focused: bool,
	pub(crate) clear_visible: bool,
	pub(crate) cancel: CancelVisibility,
	pub(crate) cancel_interactive: bool,
	pub(crate) input_width: u16,
	pub(crate) overlay: OverlayPhase,
	pub(crate) attachment: OverlayAttachment,
	pub(crate) presented: bool,
	pub(crate) chrome_hidden: bool,
	pub(crate) mounted: Vec<SurfaceId>,
	pub(crate) root_opacity: Option<Opacity>,
	pub(crate) fading_opacity: Option<Opacity>,
	pub(crate) results_frame: Option<FrameSnapshot>,
	pub(crate) events: Vec<Event>,
}

/// Replays scripted commands against a headless host.
pub(crate) struct ReplayWorkflow {
	coordinator: SearchOverlayCoordinator,
	host: Rc<RefCell<HeadlessHost>>,
	results: Rc<HeadlessResults>,
	events: Rc<RefCell<EventLog>>,
}

impl ReplayWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Self {
		let ResolvedConfig {
			search_bar,
			overlay,
			host: host_settings,
			initial_text,
		} = config;

		let mut host = HeadlessHost::new(host_settings.size);
		if host_settings.has_chrome {
			host = host.with_chrome(host_settings.top_safe_inset);
		}
		let host = Rc::new(RefCell::new(host));
		let results = Rc::new(HeadlessResults::new(
			host_settings.results_root,
			host_settings.results_fading,
		));
		let events = Rc::new(RefCell::new(EventLog::default()));

		let coordinator = SearchOverlayCoordinator::new(search_bar, overlay);
		coordinator.set_host(&host);
		let shared_results: Rc<dyn ResultsSurface> = results.clone();
		coordinator.set_results(Some(shared_results));
		coordinator.set_presentation_delegate(&events);
		{
			let mut bar = coordinator.search_bar_mut();
			bar.set_delegate(&events);
			bar.set_text(initial_text);
		}

		Self {
			coordinator,
			host,
			results,
			events,
		}
	}

	/// Apply every command in order, snapshotting after each one.
	pub(crate) fn run(mut self, commands: &[Command]) -> Vec<Snapshot> {
		commands
			.iter()
			.enumerate()
			.map(|(index, command)| {
				let outcome = self.apply(command);
				self.snapshot(index + 1, command, outcome)
			})
			.collect()
	}

	fn apply(&mut self, command: &Command) -> Option<KeyOutcome> {
		debug!(%command, "replaying command");
		match command {
			Command::Focus => self.coordinator.search_bar_mut().focus(),
			Command::Type(text) => {
				let mut outcome = None;
				for ch in text.chars() {
					outcome = Some(self.press(KeyCode::Char(ch), KeyModifiers::NONE));
				}
				return outcome;
			}
			Command::Set(text) => self.coordinator.search_bar_mut().set_text(text.clone()),
			Command::Clear => {
				return Some(self.press(KeyCode::Char('u'), KeyModifiers::CONTROL));
			}
			Command::Backspace => return Some(self.press(KeyCode::Backspace, KeyModifiers::NONE)),
			Command::Submit => return Some(self.press(KeyCode::Enter, KeyModifiers::NONE)),
			Command::Cancel => return Some(self.press(KeyCode::Esc, KeyModifiers::NONE)),
			Command::Activate => self.coordinator.set_active(true),
			Command::Deactivate => self.coordinator.set_active(false),
			Command::Collapse => self.coordinator.collapse_without_animation(),
			Command::Tick(delta) => self.coordinator.advance(*delta),
			Command::Resize(size) => {
				self.coordinator.transition_to(*size);
				self.host.borrow_mut().resize(*size);
			}
			Command::AlwaysCancel(on) => self
				.coordinator
				.search_bar_mut()
				.set_always_show_cancel_button(*on),
		}
		None
	}

	fn press(&self, code: KeyCode, modifiers: KeyModifiers) -> KeyOutcome {
		self.coordinator
			.search_bar_mut()
			.handle_key(KeyEvent::new(code, modifiers))
	}

	fn snapshot(&self, step: usize, command: &Command, outcome: Option<KeyOutcome>) -> Snapshot {
		let events = std::mem::take(&mut self.events.borrow_mut().events);
		let host = self.host.borrow();
		let bar = self.coordinator.search_bar();
		let root = self.results.root();
		let fading = self.results.fading();
		let cancel = bar.cancel_affordance();

		Snapshot {
			step,
			command: command.to_string(),
			outcome,
			state: bar.state(),
			text: bar.text().to_string(),
			focused: bar.is_focused(),
			clear_visible: bar.is_clear_visible(),
			cancel: cancel.visibility(),
			cancel_interactive: cancel.is_interactive(),
			input_width: bar.input_width(host.bounds().width),
			overlay: self.coordinator.phase(),
			attachment: self.coordinator.attachment(),
			presented: self.coordinator.is_presented(),
			chrome_hidden: host.is_chrome_hidden(),
			mounted: host.mounted().to_vec(),
			root_opacity: host.opacity(root),
			fading_opacity: host.opacity(fading),
			results_frame: host
				.is_mounted(root)
				.then(|| host.frame(root))
				.flatten()
				.map(FrameSnapshot::from),
			events,
		}
	}
}
