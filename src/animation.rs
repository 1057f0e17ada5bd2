//! Explicit animation timeline.
//!
//! Transitions are keyed entries with an elapsed/total duration pair. Owners
//! start them, feed wall-clock deltas through [`Timeline::advance`], and react
//! to the returned [`Frame`]s: interpolate on `Progress`, step their own state
//! machine on `Finished`. Nothing here holds callbacks, so ordering stays
//! visible in the owner's code and tests can drive time by hand.

use std::time::Duration;

/// Duration of every fade and affordance transition.
pub const STANDARD_DURATION: Duration = Duration::from_millis(250);

/// Whether transitions play out over time or complete as soon as they start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationMode {
	#[default]
	Animated,
	Immediate,
}

impl AnimationMode {
	/// Resolve the effective duration for a transition of `base` length.
	#[must_use]
	pub fn duration(self, base: Duration) -> Duration {
		match self {
			Self::Animated => base,
			Self::Immediate => Duration::ZERO,
		}
	}

	#[must_use]
	pub fn is_animated(self) -> bool {
		matches!(self, Self::Animated)
	}
}

/// Smoothstep easing applied to raw linear progress.
#[must_use]
pub fn ease_in_out(t: f32) -> f32 {
	let t = t.clamp(0.0, 1.0);
	t * t * (3.0 - 2.0 * t)
}

/// Result of starting a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Started {
	/// The transition is running and will finish through a later `advance`.
	Running,
	/// The transition had zero duration and is already complete.
	Finished,
}

/// What happened to one running transition during an `advance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame<K> {
	Progress { key: K, progress: f32 },
	Finished(K),
}

#[derive(Debug, Clone)]
struct Running<K> {
	key: K,
	elapsed: Duration,
	duration: Duration,
}

impl<K> Running<K> {
	fn progress(&self) -> f32 {
		if self.duration.is_zero() {
			return 1.0;
		}
		(self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
	}
}

/// Ordered set of in-flight transitions keyed by `K`.
#[derive(Debug, Clone)]
pub struct Timeline<K> {
	running: Vec<Running<K>>,
}

impl<K> Default for Timeline<K> {
	fn default() -> Self {
		Self {
			running: Vec::new(),
		}
	}
}

impl<K: Copy + PartialEq> Timeline<K> {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Start a transition. A running transition with the same key is replaced
	/// without reporting completion.
	pub fn start(&mut self, key: K, duration: Duration) -> Started {
		self.cancel(key);
		if duration.is_zero() {
			return Started::Finished;
		}
		self.running.push(Running {
			key,
			elapsed: Duration::ZERO,
			duration,
		});
		Started::Running
	}

	/// Advance every running transition by `delta`, in start order.
	pub fn advance(&mut self, delta: Duration) -> Vec<Frame<K>> {
		let mut frames = Vec::with_capacity(self.running.len());
		self.running.retain_mut(|entry| {
			entry.elapsed = entry.elapsed.saturating_add(delta);
			if entry.elapsed >= entry.duration {
				frames.push(Frame::Finished(entry.key));
				false
			} else {
				frames.push(Frame::Progress {
					key: entry.key,
					progress: entry.progress(),
				});
				true
			}
		});
		frames
	}

	/// Drop a transition without reporting completion.
	pub fn cancel(&mut self, key: K) -> bool {
		let before = self.running.len();
		self.running.retain(|entry| entry.key != key);
		before != self.running.len()
	}

	/// Remove and return the oldest running transition, if any.
	pub fn pop_oldest(&mut self) -> Option<K> {
		if self.running.is_empty() {
			None
		} else {
			Some(self.running.remove(0).key)
		}
	}

	#[must_use]
	pub fn progress(&self, key: K) -> Option<f32> {
		self.running
			.iter()
			.find(|entry| entry.key == key)
			.map(Running::progress)
	}

	#[must_use]
	pub fn is_idle(&self) -> bool {
		self.running.is_empty()
	}
}
