use crate::surface::SurfaceId;

/// A results container that the overlay coordinator mounts above the host.
///
/// The coordinator only ever touches the two surfaces exposed here. The
/// content shown inside them belongs to whoever filters the results.
pub trait ResultsSurface {
	/// The full-size overlay surface.
	fn root(&self) -> SurfaceId;

	/// The surface faded out first during teardown, typically a backdrop or
	/// the results table.
	fn fading(&self) -> SurfaceId;

	/// Called once the results have been mounted into the host.
	fn did_attach(&self) {}

	/// Called when the results are about to leave the host.
	fn will_detach(&self) {}

	/// Called after the root surface has been removed from the host.
	fn did_detach(&self) {}
}
