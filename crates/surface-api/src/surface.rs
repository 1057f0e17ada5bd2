use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle naming one surface inside a host's view tree.
#[derive(
	Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SurfaceId(u64);

impl SurfaceId {
	/// Wrap a raw identifier allocated by the embedder.
	#[must_use]
	pub const fn new(raw: u64) -> Self {
		Self(raw)
	}

	/// Return the raw identifier.
	#[must_use]
	pub const fn get(self) -> u64 {
		self.0
	}
}

impl fmt::Display for SurfaceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "surface#{}", self.0)
	}
}

/// Surface opacity in the closed range `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Opacity(f32);

impl Opacity {
	pub const TRANSPARENT: Self = Self(0.0);
	pub const OPAQUE: Self = Self(1.0);

	/// Build an opacity, clamping out-of-range and NaN inputs.
	#[must_use]
	pub fn new(value: f32) -> Self {
		if value.is_nan() {
			return Self::TRANSPARENT;
		}
		Self(value.clamp(0.0, 1.0))
	}

	#[must_use]
	pub const fn value(self) -> f32 {
		self.0
	}

	/// Interpolate between `self` and `to` at `progress` (`0.0..=1.0`).
	#[must_use]
	pub fn lerp(self, to: Self, progress: f32) -> Self {
		let progress = progress.clamp(0.0, 1.0);
		Self::new(self.0 + (to.0 - self.0) * progress)
	}

	#[must_use]
	pub fn is_transparent(self) -> bool {
		self.0 <= 0.0
	}

	#[must_use]
	pub fn is_opaque(self) -> bool {
		self.0 >= 1.0
	}
}
