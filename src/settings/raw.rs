use std::time::Duration;

use anyhow::{Result, ensure};
use serde::Deserialize;

use searchveil::{BarPlacement, OverlayConfig, Rect, SearchBarConfig, Size, SurfaceId};

use super::resolved::{HostSettings, ResolvedConfig};
use crate::cli::CliArgs;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	search_bar: SearchBarSection,
	overlay: OverlaySection,
	host: HostSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SearchBarSection {
	placeholder: Option<String>,
	cancel_label: Option<String>,
	initial_text: Option<String>,
	clear_on_end_editing: Option<bool>,
	return_text_on_cancel: Option<bool>,
	always_show_cancel_button: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct OverlaySection {
	hides_chrome_during_presentation: Option<bool>,
	animation_ms: Option<u64>,
	embedded_in_chrome: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct HostSection {
	width: Option<u16>,
	height: Option<u16>,
	top_safe_inset: Option<u16>,
	bar_height: Option<u16>,
	has_chrome: Option<bool>,
}

const DEFAULT_WIDTH: u16 = 80;
const DEFAULT_HEIGHT: u16 = 24;
const DEFAULT_BAR_HEIGHT: u16 = 3;
const DEFAULT_ANIMATION_MS: u64 = 250;

/// Surface handles used by the demo host.
pub(super) const OVERLAY_SURFACE: SurfaceId = SurfaceId::new(1);
pub(super) const RESULTS_ROOT: SurfaceId = SurfaceId::new(2);
pub(super) const RESULTS_FADING: SurfaceId = SurfaceId::new(3);

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(text) = cli.initial_text.clone() {
			self.search_bar.initial_text = Some(text);
		}
		if let Some(placeholder) = cli.placeholder.clone() {
			self.search_bar.placeholder = Some(placeholder);
		}
		if let Some(label) = cli.cancel_label.clone() {
			self.search_bar.cancel_label = Some(label);
		}
		if let Some(value) = cli.clear_on_end_editing {
			self.search_bar.clear_on_end_editing = Some(value);
		}
		if let Some(value) = cli.return_text_on_cancel {
			self.search_bar.return_text_on_cancel = Some(value);
		}
		if let Some(value) = cli.always_show_cancel_button {
			self.search_bar.always_show_cancel_button = Some(value);
		}
		if let Some(value) = cli.hides_chrome_during_presentation {
			self.overlay.hides_chrome_during_presentation = Some(value);
		}
		if let Some(value) = cli.embedded_in_chrome {
			self.overlay.embedded_in_chrome = Some(value);
		}
		if let Some(value) = cli.animation_ms {
			self.overlay.animation_ms = Some(value);
		}
		if let Some(value) = cli.width {
			self.host.width = Some(value);
		}
		if let Some(value) = cli.height {
			self.host.height = Some(value);
		}
	}

	/// Fill defaults and validate the combined values.
	pub(super) fn resolve(self) -> Result<ResolvedConfig> {
		let defaults = SearchBarConfig::default();
		let search_bar = SearchBarConfig {
			placeholder: self.search_bar.placeholder.unwrap_or(defaults.placeholder),
			cancel_label: self.search_bar.cancel_label.unwrap_or(defaults.cancel_label),
			clear_on_end_editing: self
				.search_bar
				.clear_on_end_editing
				.unwrap_or(defaults.clear_on_end_editing),
			return_text_on_cancel: self
				.search_bar
				.return_text_on_cancel
				.unwrap_or(defaults.return_text_on_cancel),
			always_show_cancel_button: self
				.search_bar
				.always_show_cancel_button
				.unwrap_or(defaults.always_show_cancel_button),
		};
		ensure!(
			!search_bar.cancel_label.trim().is_empty(),
			"search_bar.cancel_label must not be empty"
		);

		let width = self.host.width.unwrap_or(DEFAULT_WIDTH);
		let height = self.host.height.unwrap_or(DEFAULT_HEIGHT);
		ensure!(width > 0 && height > 0, "host size must be non-zero");
		let bar_height = self.host.bar_height.unwrap_or(DEFAULT_BAR_HEIGHT);
		ensure!(
			bar_height < height,
			"host.bar_height ({bar_height}) must be smaller than host.height ({height})"
		);
		let top_safe_inset = self.host.top_safe_inset.unwrap_or(0);
		ensure!(
			top_safe_inset < height,
			"host.top_safe_inset ({top_safe_inset}) must be smaller than host.height ({height})"
		);

		let embedded = self.overlay.embedded_in_chrome.unwrap_or(false);
		let placement = if embedded {
			BarPlacement::Chrome
		} else {
			BarPlacement::InContent {
				frame: Rect::new(0, top_safe_inset, width, bar_height),
			}
		};
		let overlay = OverlayConfig {
			hides_chrome_during_presentation: self
				.overlay
				.hides_chrome_during_presentation
				.unwrap_or(true),
			fade_duration: Duration::from_millis(
				self.overlay.animation_ms.unwrap_or(DEFAULT_ANIMATION_MS),
			),
			surface: OVERLAY_SURFACE,
			placement,
		};

		let host = HostSettings {
			size: Size::new(width, height),
			top_safe_inset,
			has_chrome: self.host.has_chrome.unwrap_or(embedded),
			results_root: RESULTS_ROOT,
			results_fading: RESULTS_FADING,
		};

		Ok(ResolvedConfig {
			search_bar,
			overlay,
			host,
			initial_text: self.search_bar.initial_text.unwrap_or_default(),
		})
	}
}
