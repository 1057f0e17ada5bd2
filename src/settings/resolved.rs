use searchveil::{BarPlacement, OverlayConfig, SearchBarConfig, Size, SurfaceId};

/// Dimensions and handles for the headless host screen.
#[derive(Debug, Clone)]
pub struct HostSettings {
	pub size: Size,
	pub top_safe_inset: u16,
	pub has_chrome: bool,
	pub results_root: SurfaceId,
	pub results_fading: SurfaceId,
}

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
	pub search_bar: SearchBarConfig,
	pub overlay: OverlayConfig,
	pub host: HostSettings,
	pub initial_text: String,
}

impl ResolvedConfig {
	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		println!("Effective configuration:");
		println!("  Placeholder: {}", self.search_bar.placeholder);
		println!("  Cancel label: {}", self.search_bar.cancel_label);
		println!(
			"  Clear on end editing: {}",
			bool_to_word(self.search_bar.clear_on_end_editing)
		);
		println!(
			"  Return text on cancel: {}",
			bool_to_word(self.search_bar.return_text_on_cancel)
		);
		println!(
			"  Always show cancel: {}",
			bool_to_word(self.search_bar.always_show_cancel_button)
		);
		println!(
			"  Hide chrome while presented: {}",
			bool_to_word(self.overlay.hides_chrome_during_presentation)
		);
		println!(
			"  Fade duration: {}ms",
			self.overlay.fade_duration.as_millis()
		);
		match self.overlay.placement {
			BarPlacement::Chrome => println!("  Bar placement: navigation chrome"),
			BarPlacement::InContent { frame } => println!(
				"  Bar placement: in content at row {} ({} rows)",
				frame.y, frame.height
			),
		}
		println!(
			"  Host: {}x{} (top inset {}, chrome {})",
			self.host.size.width,
			self.host.size.height,
			self.host.top_safe_inset,
			bool_to_word(self.host.has_chrome)
		);
		if !self.initial_text.is_empty() {
			println!("  Initial text: {}", self.initial_text);
		}
	}
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "enabled" } else { "disabled" }
}

#[cfg(test)]
impl ResolvedConfig {
	/// Defaults with no files, environment or flags applied.
	pub(crate) fn default_for_tests() -> Self {
		super::raw::RawConfig::default()
			.resolve()
			.expect("defaults resolve")
	}
}
