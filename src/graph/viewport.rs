use glam::DVec2;

/// Drawable area of the graph, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
}

impl Viewport {
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// A viewport can host a layout only when both sides are positive.
	pub fn is_valid(&self) -> bool {
		self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
	}

	/// Midpoint, or `None` while the viewport has no usable size.
	pub fn center(&self) -> Option<DVec2> {
		self.is_valid()
			.then(|| DVec2::new(self.width / 2.0, self.height / 2.0))
	}
}
