use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use searchveil_surface_api::{Opacity, Rect, Size};

use super::*;
use crate::headless::{HeadlessHost, HeadlessResults, HostOp};

const OWN: SurfaceId = SurfaceId::new(1);
const ROOT: SurfaceId = SurfaceId::new(2);
const FADING: SurfaceId = SurfaceId::new(3);
const HALF: Duration = Duration::from_millis(125);

struct Fixture {
	coordinator: SearchOverlayCoordinator,
	host: Rc<RefCell<HeadlessHost>>,
	results: Rc<HeadlessResults>,
}

impl Fixture {
	fn new() -> Self {
		Self::with_host(HeadlessHost::new(Size::new(80, 24)), true)
	}

	fn with_host(host: HeadlessHost, hides_chrome: bool) -> Self {
		let overlay = OverlayConfig {
			hides_chrome_during_presentation: hides_chrome,
			surface: OWN,
			placement: BarPlacement::InContent {
				frame: Rect::new(0, 1, 80, 3),
			},
			..OverlayConfig::default()
		};
		let coordinator = SearchOverlayCoordinator::new(SearchBarConfig::default(), overlay);
		let host = Rc::new(RefCell::new(host));
		let results = Rc::new(HeadlessResults::new(ROOT, FADING));
		coordinator.set_host(&host);
		let shared: Rc<dyn ResultsSurface> = results.clone();
		coordinator.set_results(Some(shared));
		Self {
			coordinator,
			host,
			results,
		}
	}

	fn opacity(&self, surface: SurfaceId) -> Option<Opacity> {
		self.host.borrow().opacity(surface)
	}

	fn mounted(&self) -> Vec<SurfaceId> {
		self.host.borrow().mounted().to_vec()
	}

	fn take_ops(&self) -> Vec<HostOp> {
		self.host.borrow_mut().take_ops()
	}

	fn activate_and_settle(&self) {
		self.coordinator.set_active(true);
		self.coordinator.advance(STANDARD_DURATION);
		self.take_ops();
	}
}

#[derive(Default)]
struct PresentationLog {
	events: Vec<&'static str>,
}

impl PresentationDelegate for PresentationLog {
	fn will_present(&mut self) {
		self.events.push("will_present");
	}

	fn did_present(&mut self) {
		self.events.push("did_present");
	}

	fn will_dismiss(&mut self) {
		self.events.push("will_dismiss");
	}

	fn did_dismiss(&mut self) {
		self.events.push("did_dismiss");
	}
}

#[test]
fn activation_mounts_results_transparent_and_fades_in() {
	let fixture = Fixture::new();
	fixture.coordinator.set_active(true);

	assert_eq!(fixture.coordinator.phase(), OverlayPhase::Attaching);
	assert_eq!(fixture.coordinator.attachment(), OverlayAttachment::Attached);
	assert_eq!(fixture.mounted(), vec![ROOT, OWN]);
	assert_eq!(fixture.opacity(ROOT), Some(Opacity::TRANSPARENT));
	assert_eq!(fixture.opacity(FADING), Some(Opacity::TRANSPARENT));
	assert_eq!(fixture.results.attach_count(), 1);
	assert!(fixture.host.borrow().layout_requests() > 0);

	fixture.coordinator.advance(HALF);
	let halfway = fixture.opacity(ROOT).map(Opacity::value).unwrap_or_default();
	assert!((halfway - 0.5).abs() < 1e-4);

	fixture.coordinator.advance(HALF);
	assert_eq!(fixture.coordinator.phase(), OverlayPhase::Attached);
	assert_eq!(fixture.opacity(ROOT), Some(Opacity::OPAQUE));
	assert_eq!(fixture.opacity(FADING), Some(Opacity::OPAQUE));
	assert!(fixture.coordinator.is_settled());
}

#[test]
fn double_activation_attaches_once() {
	let fixture = Fixture::new();
	fixture.coordinator.set_active(true);
	fixture.coordinator.set_active(true);
	fixture.coordinator.search_bar_mut().activate();

	let host = fixture.host.borrow();
	assert_eq!(host.mount_count(ROOT), 1);
	assert_eq!(host.mount_count(OWN), 1);
	assert_eq!(fixture.results.attach_count(), 1);
}

#[test]
fn teardown_runs_backdrop_then_root() {
	let fixture = Fixture::new();
	fixture.activate_and_settle();

	fixture.coordinator.set_active(false);
	assert!(!fixture.coordinator.is_presented());
	assert_eq!(fixture.mounted(), vec![ROOT]);
	assert_eq!(
		fixture.coordinator.phase(),
		OverlayPhase::Detaching(TeardownStage::Backdrop)
	);
	assert_eq!(fixture.opacity(FADING), Some(Opacity::OPAQUE));

	fixture.coordinator.advance(HALF);
	assert_eq!(fixture.opacity(ROOT), Some(Opacity::OPAQUE));
	assert_eq!(fixture.results.will_detach_count(), 0);

	fixture.coordinator.advance(HALF);
	assert_eq!(
		fixture.coordinator.phase(),
		OverlayPhase::Detaching(TeardownStage::Root)
	);
	assert_eq!(fixture.opacity(FADING), Some(Opacity::TRANSPARENT));
	assert_eq!(fixture.results.will_detach_count(), 1);
	assert!(fixture.mounted().contains(&ROOT));

	fixture.coordinator.advance(STANDARD_DURATION);
	assert_eq!(fixture.coordinator.phase(), OverlayPhase::Detached);
	assert_eq!(fixture.opacity(ROOT), Some(Opacity::TRANSPARENT));
	assert!(fixture.mounted().is_empty());
	assert_eq!(fixture.results.detach_count(), 1);
}

#[test]
fn collapse_without_animation_settles_everything() {
	let fixture = Fixture::new();
	fixture.activate_and_settle();
	fixture.coordinator.search_bar_mut().edit("lamp");

	fixture.coordinator.collapse_without_animation();
	assert!(!fixture.coordinator.is_active());
	assert_eq!(fixture.coordinator.attachment(), OverlayAttachment::Detached);
	assert_eq!(fixture.coordinator.animation_mode(), AnimationMode::Animated);
	assert!(fixture.coordinator.is_settled());
	assert!(fixture.coordinator.search_bar().cancel_affordance().is_hidden());
	assert!(fixture.mounted().is_empty());
	assert_eq!(fixture.results.will_detach_count(), 1);
	assert_eq!(fixture.results.detach_count(), 1);
	assert_eq!(fixture.take_ops(), vec![
		HostOp::Unmount { surface: OWN },
		HostOp::Unmount { surface: ROOT },
	]);
}

#[test]
fn collapse_finishes_an_animated_teardown() {
	let fixture = Fixture::new();
	fixture.activate_and_settle();
	fixture.coordinator.set_active(false);
	fixture.coordinator.advance(HALF);

	fixture.coordinator.collapse_without_animation();
	assert_eq!(fixture.coordinator.phase(), OverlayPhase::Detached);
	assert!(fixture.mounted().is_empty());
	assert_eq!(fixture.results.detach_count(), 1);
	assert!(fixture.coordinator.is_settled());
}

#[test]
fn reactivating_mid_teardown_completes_it_first() {
	let fixture = Fixture::new();
	fixture.activate_and_settle();
	fixture.coordinator.set_active(false);
	fixture.coordinator.advance(HALF);
	fixture.take_ops();

	fixture.coordinator.set_active(true);
	assert_eq!(fixture.results.detach_count(), 1);
	assert_eq!(fixture.results.attach_count(), 2);
	assert_eq!(fixture.coordinator.phase(), OverlayPhase::Attaching);
	assert_eq!(fixture.take_ops(), vec![
		HostOp::Unmount { surface: ROOT },
		HostOp::Mount { surface: ROOT },
		HostOp::InvalidateLayout,
		HostOp::Mount { surface: OWN },
		HostOp::InvalidateLayout,
	]);
}

#[test]
fn deactivating_while_attaching_starts_from_opaque_root() {
	let fixture = Fixture::new();
	fixture.coordinator.set_active(true);
	fixture.coordinator.advance(HALF);

	fixture.coordinator.set_active(false);
	assert_eq!(fixture.opacity(ROOT), Some(Opacity::OPAQUE));
	assert_eq!(fixture.opacity(FADING), Some(Opacity::OPAQUE));

	fixture.coordinator.advance(STANDARD_DURATION);
	fixture.coordinator.advance(STANDARD_DURATION);
	assert_eq!(fixture.coordinator.phase(), OverlayPhase::Detached);
	assert_eq!(fixture.results.detach_count(), 1);
}

#[test]
fn chrome_is_hidden_while_presented() {
	let fixture = Fixture::with_host(HeadlessHost::new(Size::new(80, 24)).with_chrome(2), true);

	fixture.coordinator.set_active(true);
	assert!(fixture.host.borrow().is_chrome_hidden());
	assert_eq!(fixture.take_ops(), vec![
		HostOp::Mount { surface: ROOT },
		HostOp::ChromeHidden {
			hidden: true,
			animated: true,
		},
		HostOp::InvalidateLayout,
		HostOp::Mount { surface: OWN },
		HostOp::InvalidateLayout,
	]);

	fixture.coordinator.set_active(false);
	assert!(!fixture.host.borrow().is_chrome_hidden());
	assert_eq!(fixture.take_ops(), vec![
		HostOp::ChromeHidden {
			hidden: false,
			animated: true,
		},
		HostOp::Unmount { surface: OWN },
	]);
}

#[test]
fn immediate_collapse_restores_chrome_without_animation() {
	let fixture = Fixture::with_host(HeadlessHost::new(Size::new(80, 24)).with_chrome(2), true);
	fixture.activate_and_settle();

	fixture.coordinator.collapse_without_animation();
	assert_eq!(fixture.take_ops()[0], HostOp::ChromeHidden {
		hidden: false,
		animated: false,
	});
}

#[test]
fn chrome_is_left_alone_when_not_configured() {
	let fixture = Fixture::with_host(HeadlessHost::new(Size::new(80, 24)).with_chrome(2), false);
	assert!(!fixture.coordinator.hides_chrome_during_presentation());

	fixture.coordinator.set_active(true);
	fixture.coordinator.set_active(false);
	assert!(
		!fixture
			.take_ops()
			.iter()
			.any(|op| matches!(op, HostOp::ChromeHidden { .. }))
	);
}

#[test]
fn presentation_delegate_brackets_own_surface() {
	let fixture = Fixture::new();
	let log = Rc::new(RefCell::new(PresentationLog::default()));
	fixture.coordinator.set_presentation_delegate(&log);

	fixture.coordinator.set_active(true);
	fixture.coordinator.set_active(false);
	assert_eq!(log.borrow().events, vec![
		"will_present",
		"did_present",
		"will_dismiss",
		"did_dismiss",
	]);
}

#[test]
fn missing_results_only_presents_own_surface() {
	let fixture = Fixture::new();
	fixture.coordinator.set_results(None);

	fixture.coordinator.set_active(true);
	assert!(fixture.coordinator.is_presented());
	assert_eq!(fixture.coordinator.phase(), OverlayPhase::Detached);
	assert_eq!(fixture.mounted(), vec![OWN]);

	fixture.coordinator.set_active(false);
	assert!(fixture.mounted().is_empty());
	assert_eq!(fixture.results.attach_count(), 0);
}

#[test]
fn results_swap_is_rejected_while_attached() {
	let fixture = Fixture::new();
	fixture.coordinator.set_active(true);
	assert!(!fixture.coordinator.set_results(None));

	fixture.coordinator.advance(STANDARD_DURATION);
	assert!(!fixture.coordinator.set_results(None));

	fixture.coordinator.set_active(false);
	fixture.coordinator.advance(STANDARD_DURATION);
	fixture.coordinator.advance(STANDARD_DURATION);
	assert!(fixture.mounted().is_empty());
	assert_eq!(fixture.results.detach_count(), 1);
}

#[test]
fn results_swap_finishes_pending_teardown() {
	let fixture = Fixture::new();
	fixture.activate_and_settle();
	fixture.coordinator.set_active(false);
	fixture.coordinator.advance(HALF);

	let replacement = Rc::new(HeadlessResults::new(SurfaceId::new(4), SurfaceId::new(5)));
	let shared: Rc<dyn ResultsSurface> = replacement.clone();
	assert!(fixture.coordinator.set_results(Some(shared)));
	assert_eq!(fixture.coordinator.phase(), OverlayPhase::Detached);
	assert!(fixture.mounted().is_empty());
	assert_eq!(fixture.results.detach_count(), 1);

	fixture.coordinator.set_active(true);
	assert_eq!(fixture.results.attach_count(), 1);
	assert_eq!(replacement.attach_count(), 1);
	assert!(fixture.mounted().contains(&SurfaceId::new(4)));
}

#[test]
fn bar_transitions_without_a_host() {
	let coordinator =
		SearchOverlayCoordinator::new(SearchBarConfig::default(), OverlayConfig::default());
	coordinator.search_bar_mut().focus();
	assert!(coordinator.is_active());
	assert!(!coordinator.is_presented());

	coordinator.set_active(false);
	assert!(!coordinator.is_active());
	assert_eq!(coordinator.phase(), OverlayPhase::Detached);
}

#[test]
fn dropped_host_abandons_teardown() {
	let fixture = Fixture::new();
	fixture.activate_and_settle();
	fixture.coordinator.set_active(false);

	let Fixture {
		coordinator,
		host,
		results,
	} = fixture;
	drop(host);
	coordinator.advance(STANDARD_DURATION);
	assert_eq!(coordinator.phase(), OverlayPhase::Detached);
	assert!(coordinator.is_settled());
	assert_eq!(results.detach_count(), 0);
}

#[test]
fn results_sit_below_the_bar() {
	let fixture = Fixture::new();
	fixture.coordinator.set_active(true);
	assert_eq!(
		fixture.host.borrow().frame(ROOT),
		Some(Rect::new(0, 4, 80, 20))
	);

	fixture.coordinator.transition_to(Size::new(100, 30));
	assert_eq!(
		fixture.host.borrow().frame(ROOT),
		Some(Rect::new(0, 4, 100, 26))
	);
}

#[test]
fn chrome_embedded_bar_lays_out_below_safe_inset() {
	let fixture = Fixture::with_host(HeadlessHost::new(Size::new(80, 24)).with_chrome(5), true);
	fixture.coordinator.set_bar_placement(BarPlacement::Chrome);
	assert_eq!(fixture.coordinator.bar_placement(), BarPlacement::Chrome);

	fixture.coordinator.set_active(true);
	assert_eq!(
		fixture.host.borrow().frame(ROOT),
		Some(Rect::new(0, 5, 80, 19))
	);
}

#[test]
fn submit_through_coordinator_tears_down() {
	let fixture = Fixture::new();
	{
		let mut bar = fixture.coordinator.search_bar_mut();
		bar.focus();
		bar.edit("iPhone");
	}
	fixture.coordinator.advance(STANDARD_DURATION);

	assert!(fixture.coordinator.search_bar_mut().submit());
	assert!(!fixture.coordinator.is_active());
	assert_eq!(fixture.coordinator.search_bar().text(), "");
	assert_eq!(
		fixture.coordinator.phase(),
		OverlayPhase::Detaching(TeardownStage::Backdrop)
	);
}
