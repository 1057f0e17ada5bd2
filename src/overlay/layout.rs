use ratatui::layout::{Rect, Size};

/// Where the search bar lives relative to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarPlacement {
	/// Floating in the host's content; results start below `frame`.
	InContent { frame: Rect },
	/// Embedded in the host's navigation chrome; results start below the
	/// top safe inset.
	Chrome,
}

impl Default for BarPlacement {
	fn default() -> Self {
		Self::InContent {
			frame: Rect::default(),
		}
	}
}

/// Frame for the results root inside a host of `size`.
#[must_use]
pub fn results_frame(size: Size, placement: BarPlacement, top_safe_inset: u16) -> Rect {
	let top = match placement {
		BarPlacement::InContent { frame } => frame.bottom(),
		BarPlacement::Chrome => top_safe_inset,
	};
	let top = top.min(size.height);
	Rect::new(0, top, size.width, size.height - top)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn floating_bar_pushes_results_below_it() {
		let placement = BarPlacement::InContent {
			frame: Rect::new(0, 2, 80, 3),
		};
		let frame = results_frame(Size::new(80, 24), placement, 1);
		assert_eq!(frame, Rect::new(0, 5, 80, 19));
	}

	#[test]
	fn chrome_embedded_bar_uses_safe_inset() {
		let frame = results_frame(Size::new(100, 30), BarPlacement::Chrome, 4);
		assert_eq!(frame, Rect::new(0, 4, 100, 26));
	}

	#[test]
	fn oversized_offsets_collapse_to_empty_frame() {
		let placement = BarPlacement::InContent {
			frame: Rect::new(0, 20, 40, 10),
		};
		let frame = results_frame(Size::new(40, 12), placement, 0);
		assert_eq!(frame.height, 0);
		assert_eq!(frame.y, 12);
	}
}
