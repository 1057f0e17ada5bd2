use std::fmt::Write;

use anyhow::Result;
use searchveil::{ActivationState, Opacity, OverlayPhase, TeardownStage};
use searchveil::bar::CancelVisibility;

use crate::workflow::Snapshot;

/// Print one block of plain text per replayed command.
pub(crate) fn print_plain(snapshots: &[Snapshot]) {
	for snapshot in snapshots {
		print!("{}", format_plain(snapshot));
	}
}

/// Render a snapshot as a short human readable block.
pub(crate) fn format_plain(snapshot: &Snapshot) -> String {
	let mut out = String::new();
	let _ = write!(out, "[{}] {}", snapshot.step, snapshot.command);
	if let Some(outcome) = snapshot.outcome {
		let _ = write!(out, " -> {outcome:?}");
	}
	let _ = writeln!(out);

	let state = match snapshot.state {
		ActivationState::Active => "active",
		ActivationState::Inactive => "inactive",
	};
	let _ = writeln!(
		out,
		"  bar: {state}, text {:?}, focused {}, clear {}",
		snapshot.text,
		yes_no(snapshot.focused),
		yes_no(snapshot.clear_visible),
	);

	let cancel = match snapshot.cancel {
		CancelVisibility::Shown => "shown",
		CancelVisibility::Hidden => "hidden",
	};
	let _ = writeln!(
		out,
		"  cancel: {cancel}, interactive {}, input width {}",
		yes_no(snapshot.cancel_interactive),
		snapshot.input_width,
	);

	let _ = writeln!(
		out,
		"  overlay: {}, presented {}, chrome {}",
		phase_label(snapshot.overlay),
		yes_no(snapshot.presented),
		if snapshot.chrome_hidden { "hidden" } else { "shown" },
	);
	let _ = writeln!(
		out,
		"  results: root {}, fading {}",
		opacity_label(snapshot.root_opacity),
		opacity_label(snapshot.fading_opacity),
	);
	if let Some(frame) = snapshot.results_frame {
		let _ = writeln!(
			out,
			"  frame: {}x{} at ({}, {})",
			frame.width, frame.height, frame.x, frame.y
		);
	}

	if !snapshot.events.is_empty() {
		let events: Vec<String> = snapshot.events.iter().map(|event| event.label()).collect();
		let _ = writeln!(out, "  events: {}", events.join(", "));
	}
	out
}

/// Format all snapshots as a pretty-printed JSON array.
pub(crate) fn format_json(snapshots: &[Snapshot]) -> Result<String> {
	Ok(serde_json::to_string_pretty(snapshots)?)
}

/// Print the JSON representation of the replay.
pub(crate) fn print_json(snapshots: &[Snapshot]) -> Result<()> {
	println!("{}", format_json(snapshots)?);
	Ok(())
}

fn phase_label(phase: OverlayPhase) -> &'static str {
	match phase {
		OverlayPhase::Detached => "detached",
		OverlayPhase::Attaching => "attaching",
		OverlayPhase::Attached => "attached",
		OverlayPhase::Detaching(TeardownStage::Backdrop) => "detaching (backdrop)",
		OverlayPhase::Detaching(TeardownStage::Root) => "detaching (root)",
	}
}

fn opacity_label(opacity: Option<Opacity>) -> String {
	opacity.map_or_else(|| "-".to_string(), |value| format!("{:.2}", value.value()))
}

fn yes_no(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}
