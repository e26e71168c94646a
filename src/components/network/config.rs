use super::camera::PerspectiveCamera;
use super::color::ColorAnimation;
use super::controls::OrbitSettings;
use super::labels::LabelStyle;
use super::layout::LayoutSpec;

/// Every tuning knob of the scene, defaulting to the reference layout.
#[derive(Clone, Debug)]
pub struct SceneConfig {
	/// Rings, highlights and label vocabulary.
	pub layout: LayoutSpec,
	/// Sphere radius in world units.
	pub sphere_radius: f64,
	/// Pairs strictly closer than this are joined in the proximity pass.
	pub connection_distance: f64,
	/// Degree every node is topped up to by the repair pass.
	pub min_degree: usize,
	/// Label sprite geometry and typography.
	pub labels: LabelStyle,
	/// Drag-driven color boost.
	pub animation: ColorAnimation,
	/// Initial camera.
	pub camera: PerspectiveCamera,
	/// Settings handed to the camera-control factory.
	pub orbit: OrbitSettings,
	/// Upper bound on the backing-store scale.
	pub max_pixel_ratio: f64,
	/// CSS clear color.
	pub background: &'static str,
	/// CSS stroke color for edges.
	pub edge_color: &'static str,
	/// CSS fill for ground shadows.
	pub shadow_color: &'static str,
}

impl Default for SceneConfig {
	fn default() -> Self {
		Self {
			layout: LayoutSpec::default(),
			sphere_radius: 0.6,
			connection_distance: 4.0,
			min_degree: 3,
			labels: LabelStyle::default(),
			animation: ColorAnimation::default(),
			camera: PerspectiveCamera::default(),
			orbit: OrbitSettings::default(),
			max_pixel_ratio: 2.0,
			background: "#ffffff",
			edge_color: "#2a2a2a",
			shadow_color: "rgba(0, 0, 0, 0.12)",
		}
	}
}
