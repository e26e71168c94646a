//! Camera-control capability and the orbit implementation.

use std::f64::consts::PI;

use glam::DVec3;

use super::camera::PerspectiveCamera;

const POLE_MARGIN: f64 = 1e-6;

/// Pointer position in CSS pixels relative to the render surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
	pub x: f64,
	pub y: f64,
}

/// Optional camera manipulation strategy, injected once at scene construction.
pub trait CameraControl {
	/// `pan` selects panning instead of orbiting for this gesture.
	fn pointer_down(&mut self, pointer: PointerSample, pan: bool);
	fn pointer_move(&mut self, pointer: PointerSample, viewport_height: f64);
	fn pointer_up(&mut self);
	fn wheel(&mut self, delta_y: f64);
	/// Applies pending input to `camera`, once per frame.
	fn update(&mut self, camera: &mut PerspectiveCamera);
	fn dispose(&mut self);
}

#[derive(Clone, Debug)]
pub struct OrbitSettings {
	pub enable_damping: bool,
	pub damping_factor: f64,
	pub enable_zoom: bool,
	pub enable_pan: bool,
	pub rotate_speed: f64,
	pub zoom_step: f64,
	pub min_distance: f64,
	pub max_distance: f64,
}

impl Default for OrbitSettings {
	fn default() -> Self {
		Self {
			enable_damping: true,
			damping_factor: 0.1,
			enable_zoom: true,
			enable_pan: true,
			rotate_speed: 1.0,
			zoom_step: 0.95,
			min_distance: 1.0,
			max_distance: 100.0,
		}
	}
}

/// Builds a control for a freshly constructed scene.
pub type ControlFactory = fn(&OrbitSettings) -> Box<dyn CameraControl>;

/// [`ControlFactory`] producing [`OrbitControls`].
pub fn orbit_controls(settings: &OrbitSettings) -> Box<dyn CameraControl> {
	Box::new(OrbitControls::new(settings.clone()))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Gesture {
	Rotate,
	Pan,
}

/// Spherical orbit around the camera target with optional inertia.
#[derive(Clone, Debug)]
pub struct OrbitControls {
	pub settings: OrbitSettings,
	gesture: Option<Gesture>,
	last: PointerSample,
	/// Pending (theta, phi) rotation in radians.
	rotate_delta: (f64, f64),
	/// Pending pan in viewport heights.
	pan_delta: (f64, f64),
	zoom_scale: f64,
	disposed: bool,
}

impl OrbitControls {
	pub fn new(settings: OrbitSettings) -> Self {
		Self {
			settings,
			gesture: None,
			last: PointerSample::default(),
			rotate_delta: (0.0, 0.0),
			pan_delta: (0.0, 0.0),
			zoom_scale: 1.0,
			disposed: false,
		}
	}

	fn has_pending_motion(&self) -> bool {
		let (t, p) = self.rotate_delta;
		let (x, y) = self.pan_delta;
		t.abs() + p.abs() + x.abs() + y.abs() > 1e-9 || self.zoom_scale != 1.0
	}
}

impl Default for OrbitControls {
	fn default() -> Self {
		Self::new(OrbitSettings::default())
	}
}

impl CameraControl for OrbitControls {
	fn pointer_down(&mut self, pointer: PointerSample, pan: bool) {
		if self.disposed {
			return;
		}
		self.gesture = Some(if pan && self.settings.enable_pan {
			Gesture::Pan
		} else {
			Gesture::Rotate
		});
		self.last = pointer;
	}

	fn pointer_move(&mut self, pointer: PointerSample, viewport_height: f64) {
		let Some(gesture) = self.gesture else {
			return;
		};
		if viewport_height <= 0.0 {
			return;
		}
		let (dx, dy) = (pointer.x - self.last.x, pointer.y - self.last.y);
		self.last = pointer;
		match gesture {
			Gesture::Rotate => {
				let k = 2.0 * PI * self.settings.rotate_speed / viewport_height;
				self.rotate_delta.0 -= dx * k;
				self.rotate_delta.1 -= dy * k;
			}
			Gesture::Pan => {
				self.pan_delta.0 += dx / viewport_height;
				self.pan_delta.1 += dy / viewport_height;
			}
		}
	}

	fn pointer_up(&mut self) {
		self.gesture = None;
	}

	fn wheel(&mut self, delta_y: f64) {
		if self.disposed || !self.settings.enable_zoom {
			return;
		}
		if delta_y < 0.0 {
			self.zoom_scale *= self.settings.zoom_step;
		} else if delta_y > 0.0 {
			self.zoom_scale /= self.settings.zoom_step;
		}
	}

	fn update(&mut self, camera: &mut PerspectiveCamera) {
		if self.disposed || !self.has_pending_motion() {
			return;
		}
		let s = &self.settings;
		let blend = if s.enable_damping { s.damping_factor } else { 1.0 };

		let offset = camera.position - camera.target;
		let radius = offset.length().max(f64::EPSILON);
		let mut theta = offset.x.atan2(offset.z);
		let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

		theta += self.rotate_delta.0 * blend;
		phi = (phi + self.rotate_delta.1 * blend).clamp(POLE_MARGIN, PI - POLE_MARGIN);
		let radius = (radius * self.zoom_scale).clamp(s.min_distance, s.max_distance);

		let (right, up) = camera.screen_axes();
		let pan_extent = 2.0 * radius * (camera.fov_deg.to_radians() * 0.5).tan();
		let pan = (-right * self.pan_delta.0 + up * self.pan_delta.1) * pan_extent * blend;
		camera.target += pan;

		camera.position = camera.target
			+ DVec3::new(
				radius * phi.sin() * theta.sin(),
				radius * phi.cos(),
				radius * phi.sin() * theta.cos(),
			);

		let keep = if s.enable_damping { 1.0 - s.damping_factor } else { 0.0 };
		self.rotate_delta = (self.rotate_delta.0 * keep, self.rotate_delta.1 * keep);
		self.pan_delta = (self.pan_delta.0 * keep, self.pan_delta.1 * keep);
		self.zoom_scale = 1.0;
	}

	fn dispose(&mut self) {
		self.disposed = true;
		self.gesture = None;
		self.rotate_delta = (0.0, 0.0);
		self.pan_delta = (0.0, 0.0);
		self.zoom_scale = 1.0;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn drag(controls: &mut OrbitControls, dx: f64, pan: bool) {
		drag_by(controls, dx, 0.0, pan);
	}

	fn drag_by(controls: &mut OrbitControls, dx: f64, dy: f64, pan: bool) {
		controls.pointer_down(PointerSample { x: 100.0, y: 100.0 }, pan);
		controls.pointer_move(PointerSample { x: 100.0 + dx, y: 100.0 + dy }, 600.0);
		controls.pointer_up();
	}

	#[test]
	fn idle_update_leaves_camera_alone() {
		let mut camera = PerspectiveCamera::default();
		let before = camera.clone();
		OrbitControls::default().update(&mut camera);
		assert_eq!(camera, before);
	}

	#[test]
	fn orbit_preserves_distance_to_target() {
		let mut camera = PerspectiveCamera::default();
		let mut controls = OrbitControls::default();
		drag(&mut controls, 120.0, false);
		let before = camera.position;
		for _ in 0..30 {
			controls.update(&mut camera);
		}
		assert!(camera.position.distance(before) > 0.1);
		assert!((camera.position.length() - 75f64.sqrt()).abs() < 1e-9);
	}

	#[test]
	fn damping_spreads_motion_over_frames() {
		let mut camera = PerspectiveCamera::default();
		let mut controls = OrbitControls::default();
		drag(&mut controls, 60.0, false);
		controls.update(&mut camera);
		let first = camera.position;
		controls.update(&mut camera);
		assert_ne!(camera.position, first);
	}

	#[test]
	fn without_damping_motion_applies_once() {
		let mut camera = PerspectiveCamera::default();
		let mut controls = OrbitControls::new(OrbitSettings {
			enable_damping: false,
			..Default::default()
		});
		drag(&mut controls, 60.0, false);
		controls.update(&mut camera);
		let first = camera.clone();
		controls.update(&mut camera);
		assert_eq!(camera, first);
	}

	#[test]
	fn vertical_orbit_stops_short_of_the_poles() {
		let mut camera = PerspectiveCamera::default();
		let mut controls = OrbitControls::new(OrbitSettings {
			enable_damping: false,
			..Default::default()
		});
		let radius = camera.position.length();

		// Far more than half a turn upwards, twice.
		for _ in 0..2 {
			drag_by(&mut controls, 0.0, 1000.0, false);
			controls.update(&mut camera);
			assert!(camera.position.y > 0.0 && camera.position.y < radius);
			assert!(camera.position.x > 0.0 && camera.position.z > 0.0);
			assert!((camera.position.length() - radius).abs() < 1e-9);
		}
		let (right, _) = camera.screen_axes();
		assert!((right.length() - 1.0).abs() < 1e-6);

		drag_by(&mut controls, 0.0, -1000.0, false);
		controls.update(&mut camera);
		assert!(camera.position.y < 0.0 && camera.position.y > -radius);
		assert!(camera.position.x > 0.0 && camera.position.z > 0.0);
	}

	#[test]
	fn wheel_zooms_within_limits() {
		let mut camera = PerspectiveCamera::default();
		let mut controls = OrbitControls::default();
		for _ in 0..200 {
			controls.wheel(-1.0);
			controls.update(&mut camera);
		}
		assert!((camera.position.distance(camera.target) - 1.0).abs() < 1e-9);
		for _ in 0..400 {
			controls.wheel(1.0);
			controls.update(&mut camera);
		}
		assert!((camera.position.distance(camera.target) - 100.0).abs() < 1e-9);
	}

	#[test]
	fn pan_moves_target() {
		let mut camera = PerspectiveCamera::default();
		let mut controls = OrbitControls::default();
		drag(&mut controls, 90.0, true);
		for _ in 0..50 {
			controls.update(&mut camera);
		}
		assert!(camera.target.length() > 0.1);
	}

	#[test]
	fn pan_falls_back_to_rotate_when_disabled() {
		let mut camera = PerspectiveCamera::default();
		let mut controls = OrbitControls::new(OrbitSettings {
			enable_pan: false,
			..Default::default()
		});
		drag(&mut controls, 90.0, true);
		for _ in 0..20 {
			controls.update(&mut camera);
		}
		assert_eq!(camera.target, DVec3::ZERO);
	}

	#[test]
	fn disposed_controls_ignore_input() {
		let mut camera = PerspectiveCamera::default();
		let mut controls = OrbitControls::default();
		controls.dispose();
		drag(&mut controls, 90.0, false);
		controls.wheel(-1.0);
		let before = camera.clone();
		controls.update(&mut camera);
		assert_eq!(camera, before);
	}
}
