/// Hears about the coordinator's own surface being shown in or removed from
/// the host. Unrelated to the results fade, which runs on its own clock.
pub trait PresentationDelegate {
	fn will_present(&mut self) {}

	fn did_present(&mut self) {}

	fn will_dismiss(&mut self) {}

	fn did_dismiss(&mut self) {}
}
