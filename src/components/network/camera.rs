use glam::{DMat4, DVec3};

/// A point mapped to CSS-pixel screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
	pub x: f64,
	pub y: f64,
	/// Distance along the view axis; larger is farther.
	pub depth: f64,
	/// Screen pixels covered by one world unit at this depth.
	pub pixels_per_unit: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveCamera {
	pub fov_deg: f64,
	pub aspect: f64,
	pub near: f64,
	pub far: f64,
	pub position: DVec3,
	pub target: DVec3,
	pub up: DVec3,
}

impl Default for PerspectiveCamera {
	fn default() -> Self {
		Self {
			fov_deg: 75.0,
			aspect: 1.0,
			near: 0.1,
			far: 1000.0,
			position: DVec3::new(5.0, 5.0, 5.0),
			target: DVec3::ZERO,
			up: DVec3::Y,
		}
	}
}

impl PerspectiveCamera {
	pub fn set_viewport(&mut self, width: f64, height: f64) {
		if width > 0.0 && height > 0.0 {
			self.aspect = width / height;
		}
	}

	pub fn view_matrix(&self) -> DMat4 {
		DMat4::look_at_rh(self.position, self.target, self.up)
	}

	pub fn projection_matrix(&self) -> DMat4 {
		DMat4::perspective_rh_gl(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
	}

	/// Unit vectors pointing right and up on screen, in world space.
	pub fn screen_axes(&self) -> (DVec3, DVec3) {
		let forward = (self.target - self.position).normalize_or_zero();
		let right = forward.cross(self.up).normalize_or_zero();
		(right, right.cross(forward))
	}

	/// Projects `point` into a `width` x `height` viewport. `None` when the
	/// point lies outside the near/far range.
	pub fn project(&self, point: DVec3, width: f64, height: f64) -> Option<Projected> {
		let eye = self.view_matrix().transform_point3(point);
		let depth = -eye.z;
		if depth <= self.near || depth >= self.far {
			return None;
		}
		let ndc = self.projection_matrix().project_point3(eye);
		Some(Projected {
			x: (ndc.x + 1.0) * 0.5 * width,
			y: (1.0 - ndc.y) * 0.5 * height,
			depth,
			pixels_per_unit: height / (2.0 * depth * (self.fov_deg.to_radians() * 0.5).tan()),
		})
	}
}
