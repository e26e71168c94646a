use log::{error, info};

use super::camera::PerspectiveCamera;
use super::color::Hsl;
use super::config::SceneConfig;
use super::connectivity::{EdgeSet, build_edges};
use super::controls::{CameraControl, PointerSample};
use super::layout::{floor_height, layout_nodes};
use super::lighting::LightingRig;
use super::types::{Node, Ring};

/// Pointer drag bookkeeping. The accumulated distance only ever grows.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub is_dragging: bool,
	pub last_pointer: PointerSample,
	pub accumulated_distance: f64,
}

impl DragState {
	pub fn press(&mut self, pointer: PointerSample) {
		self.is_dragging = true;
		self.last_pointer = pointer;
	}

	pub fn move_to(&mut self, pointer: PointerSample) {
		if !self.is_dragging {
			return;
		}
		let (dx, dy) = (pointer.x - self.last_pointer.x, pointer.y - self.last_pointer.y);
		self.accumulated_distance += dx.hypot(dy);
		self.last_pointer = pointer;
	}

	pub fn release(&mut self) {
		self.is_dragging = false;
	}
}

/// All mutable state of one visualization: scene contents, camera, input.
pub struct VisualizationSession {
	pub config: SceneConfig,
	pub nodes: Vec<Node>,
	pub edges: EdgeSet,
	pub lighting: LightingRig,
	pub camera: PerspectiveCamera,
	pub drag: DragState,
	pub floor_y: f64,
	pub width: f64,
	pub height: f64,
	pub pixel_ratio: f64,
	controls: Option<Box<dyn CameraControl>>,
	display_colors: Vec<Hsl>,
}

impl VisualizationSession {
	pub fn new(config: SceneConfig, controls: Option<Box<dyn CameraControl>>) -> Self {
		let nodes = layout_nodes(&config.layout);
		let positions: Vec<_> = nodes.iter().map(|n| n.position).collect();
		let edges = build_edges(&positions, config.connection_distance, config.min_degree);
		if controls.is_none() {
			error!("camera controls unavailable; rendering with a fixed camera");
		}
		let inner = nodes.iter().filter(|n| n.ring == Ring::Inner).count();
		info!(
			"network scene built: {} inner + {} outer nodes, {} edges",
			inner,
			nodes.len() - inner,
			edges.len()
		);

		Self {
			display_colors: nodes.iter().map(|n| n.base_color).collect(),
			floor_y: floor_height(&nodes, config.sphere_radius),
			camera: config.camera.clone(),
			lighting: LightingRig::standard(),
			drag: DragState::default(),
			width: 0.0,
			height: 0.0,
			pixel_ratio: 1.0,
			controls,
			nodes,
			edges,
			config,
		}
	}

	pub fn display_colors(&self) -> &[Hsl] {
		&self.display_colors
	}

	pub fn pointer_down(&mut self, pointer: PointerSample, pan: bool) {
		self.drag.press(pointer);
		if let Some(c) = self.controls.as_mut() {
			c.pointer_down(pointer, pan);
		}
	}

	pub fn pointer_move(&mut self, pointer: PointerSample) {
		self.drag.move_to(pointer);
		let height = self.height;
		if let Some(c) = self.controls.as_mut() {
			c.pointer_move(pointer, height);
		}
	}

	/// Shared by pointerup and pointerleave.
	pub fn pointer_up(&mut self) {
		self.drag.release();
		if let Some(c) = self.controls.as_mut() {
			c.pointer_up();
		}
	}

	pub fn wheel(&mut self, delta_y: f64) {
		if let Some(c) = self.controls.as_mut() {
			c.wheel(delta_y);
		}
	}

	/// Sets the CSS viewport size and the backing-store ratio, capped by
	/// config. Returns the backing-store size in device pixels.
	pub fn resize(&mut self, width: f64, height: f64, device_pixel_ratio: f64) -> (u32, u32) {
		self.width = width.max(0.0);
		self.height = height.max(0.0);
		self.pixel_ratio = device_pixel_ratio.clamp(1.0, self.config.max_pixel_ratio.max(1.0));
		self.camera.set_viewport(self.width, self.height);
		(
			(self.width * self.pixel_ratio).round() as u32,
			(self.height * self.pixel_ratio).round() as u32,
		)
	}

	/// Per-frame update: camera damping, then display colors.
	pub fn tick(&mut self) {
		if let Some(c) = self.controls.as_mut() {
			c.update(&mut self.camera);
		}
		let anim = &self.config.animation;
		let distance = self.drag.accumulated_distance;
		for (node, out) in self.nodes.iter().zip(self.display_colors.iter_mut()) {
			*out = anim.display_color(node.base_color, anim.phase(node.id), distance);
		}
	}

	pub fn dispose(&mut self) {
		if let Some(mut c) = self.controls.take() {
			c.dispose();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network::controls::OrbitControls;

	fn at(x: f64, y: f64) -> PointerSample {
		PointerSample { x, y }
	}

	fn session() -> VisualizationSession {
		VisualizationSession::new(SceneConfig::default(), Some(Box::new(OrbitControls::default())))
	}

	#[test]
	fn drag_accumulates_only_while_pressed() {
		let mut drag = DragState::default();
		drag.move_to(at(30.0, 40.0));
		assert_eq!(drag.accumulated_distance, 0.0);
		drag.press(at(0.0, 0.0));
		drag.move_to(at(3.0, 4.0));
		drag.move_to(at(3.0, 10.0));
		assert_eq!(drag.accumulated_distance, 11.0);
		drag.release();
		drag.move_to(at(100.0, 100.0));
		assert_eq!(drag.accumulated_distance, 11.0);
	}

	#[test]
	fn accumulator_survives_new_presses() {
		let mut drag = DragState::default();
		drag.press(at(0.0, 0.0));
		drag.move_to(at(0.0, 5.0));
		drag.release();
		drag.press(at(50.0, 50.0));
		drag.move_to(at(50.0, 52.0));
		assert_eq!(drag.accumulated_distance, 7.0);
	}

	#[test]
	fn first_tick_shows_base_colors() {
		let mut s = session();
		s.tick();
		for (node, color) in s.nodes.iter().zip(s.display_colors()) {
			assert_eq!(node.base_color, *color);
		}
	}

	#[test]
	fn dragging_changes_display_but_not_base() {
		let mut s = session();
		let bases: Vec<_> = s.nodes.iter().map(|n| n.base_color).collect();
		s.resize(800.0, 600.0, 1.0);
		s.pointer_down(at(0.0, 0.0), false);
		s.pointer_move(at(40.0, 0.0));
		s.pointer_up();
		s.tick();
		assert!(s.display_colors().iter().zip(&bases).any(|(d, b)| d != b));
		assert_eq!(s.nodes.iter().map(|n| n.base_color).collect::<Vec<_>>(), bases);
	}

	#[test]
	fn missing_controls_still_builds_scene() {
		let mut s = VisualizationSession::new(SceneConfig::default(), None);
		assert!(s.controls.is_none());
		let camera = s.camera.clone();
		s.pointer_down(at(0.0, 0.0), false);
		s.pointer_move(at(10.0, 0.0));
		s.wheel(-1.0);
		s.tick();
		assert_eq!(s.camera, camera);
		assert_eq!(s.drag.accumulated_distance, 10.0);
		assert_eq!(s.nodes.len(), 10);
	}

	#[test]
	fn resize_is_idempotent_and_caps_ratio() {
		let mut s = session();
		let first = s.resize(1024.0, 768.0, 3.0);
		let camera = s.camera.clone();
		let second = s.resize(1024.0, 768.0, 3.0);
		assert_eq!(first, second);
		assert_eq!(first, (2048, 1536));
		assert_eq!(s.camera, camera);
		assert!((s.camera.aspect - 1024.0 / 768.0).abs() < 1e-12);
	}

	#[test]
	fn dispose_drops_controls() {
		let mut s = session();
		s.dispose();
		assert!(s.controls.is_none());
		s.dispose();
	}
}
