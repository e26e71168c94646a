//! Arc placement of nodes on concentric rings.

use std::collections::BTreeSet;

use glam::DVec3;

use super::color::{Hsl, Rgb};
use super::types::{Node, Ring};

/// Fallback labels, cycled by global node index when a ring has no override.
pub const VOCABULARY: &[&str] = &[
	"Object", "Entity", "Concept", "Idea", "Form", "Structure", "Pattern", "System", "Process",
	"Function", "Purpose", "Meaning", "Relation", "Connection", "Network", "Graph", "Node", "Edge",
	"Space", "Time", "Dimension", "Scale", "Level", "Hierarchy", "Category", "Class", "Type",
	"Kind", "Instance", "Example", "Property", "Attribute", "Feature", "Characteristic",
	"Quality", "Value", "Measure", "Quantity", "Amount", "Degree", "Extent", "Boundary", "Limit",
	"Constraint", "Rule", "Principle", "Law", "Method", "Technique", "Approach", "Strategy",
	"Solution", "Answer", "Question", "Problem", "Challenge", "Issue", "Concern", "Matter",
	"Context", "Environment", "Setting", "Situation", "Condition", "State", "Change",
	"Transformation", "Evolution", "Development", "Growth", "Progress", "Interaction",
	"Communication", "Exchange", "Transfer", "Flow", "Movement", "Energy", "Force", "Power",
	"Strength", "Intensity", "Magnitude", "Frequency", "Rate", "Speed", "Velocity",
	"Acceleration", "Momentum",
];

/// Angular span in radians, shifted by `offset`.
#[derive(Clone, Copy, Debug)]
pub struct ArcSpec {
	pub start: f64,
	pub end: f64,
	pub offset: f64,
}

impl ArcSpec {
	pub fn from_degrees(start: f64, end: f64, offset: f64) -> Self {
		Self {
			start: start.to_radians(),
			end: end.to_radians(),
			offset: offset.to_radians(),
		}
	}

	/// Angle of slot `i` out of `count` evenly spaced slots, endpoints included.
	pub fn angle_at(&self, i: usize, count: usize) -> f64 {
		let t = if count > 1 {
			i as f64 / (count - 1) as f64
		} else {
			0.0
		};
		self.start + t * (self.end - self.start) + self.offset
	}
}

/// Slots lifted above the ring and painted in a distinct color.
#[derive(Clone, Debug)]
pub struct Highlight {
	pub indices: BTreeSet<usize>,
	pub lift: f64,
	pub color: Hsl,
}

#[derive(Clone, Debug)]
pub struct RingSpec {
	pub ring: Ring,
	pub count: usize,
	pub radius: f64,
	pub height: f64,
	pub arc: ArcSpec,
	pub labels: Vec<String>,
	pub color: Hsl,
	pub highlight: Option<Highlight>,
}

#[derive(Clone, Debug)]
pub struct LayoutSpec {
	pub rings: Vec<RingSpec>,
	pub vocabulary: Vec<String>,
}

impl Default for LayoutSpec {
	fn default() -> Self {
		let arc = ArcSpec::from_degrees(-90.0, 90.0, 180.0);
		let labels = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
		Self {
			rings: vec![
				RingSpec {
					ring: Ring::Inner,
					count: 4,
					radius: 3.5,
					height: 0.0,
					arc,
					labels: labels(&["Skunked Emotion", "AI Decision", "Social Sharing", "Trip Review"]),
					color: Hsl::new(0.67, 0.3, 0.45),
					highlight: None,
				},
				RingSpec {
					ring: Ring::Outer,
					count: 6,
					radius: 6.5,
					height: 2.0,
					arc,
					labels: labels(&[
						"Tutorial/ Platform",
						"Weather/Water API",
						"IOT/Fish Finder",
						"Rank",
						"Communities/ Challenge Group",
						"Gear Store",
					]),
					color: Rgb::from_hex(0xededed).to_hsl(),
					highlight: Some(Highlight {
						indices: [0, 1, 4].into_iter().collect(),
						lift: 1.0,
						color: Hsl::new(0.19, 0.3, 0.7),
					}),
				},
			],
			vocabulary: VOCABULARY.iter().map(|s| s.to_string()).collect(),
		}
	}
}

impl LayoutSpec {
	pub fn node_count(&self) -> usize {
		self.rings.iter().map(|r| r.count).sum()
	}

	fn fallback_label(&self, label_index: usize) -> String {
		if self.vocabulary.is_empty() {
			return format!("Node {}", label_index);
		}
		self.vocabulary[label_index % self.vocabulary.len()].clone()
	}
}

/// Places every ring's nodes in order; ids and fallback labels run across rings.
pub fn layout_nodes(spec: &LayoutSpec) -> Vec<Node> {
	let mut nodes = Vec::with_capacity(spec.node_count());
	for ring in &spec.rings {
		for i in 0..ring.count {
			let id = nodes.len();
			let angle = ring.arc.angle_at(i, ring.count);
			let highlight = ring
				.highlight
				.as_ref()
				.filter(|h| h.indices.contains(&i));
			let height = ring.height + highlight.map_or(0.0, |h| h.lift);
			let label = ring
				.labels
				.get(i)
				.filter(|l| !l.is_empty())
				.cloned()
				.unwrap_or_else(|| spec.fallback_label(id));

			nodes.push(Node {
				id,
				position: DVec3::new(angle.cos() * ring.radius, height, angle.sin() * ring.radius),
				label,
				base_color: highlight.map_or(ring.color, |h| h.color),
				ring: ring.ring,
			});
		}
	}
	nodes
}

/// Lowest point reached by any sphere of `radius`; used to place the ground.
pub fn floor_height(nodes: &[Node], radius: f64) -> f64 {
	nodes
		.iter()
		.map(|n| n.position.y)
		.fold(f64::INFINITY, f64::min)
		.min(0.0)
		- radius
		- 0.4
}

#[cfg(test)]
mod tests {
	use std::f64::consts::PI;

	use super::*;

	const EPS: f64 = 1e-6;

	#[test]
	fn reference_layout_has_ten_nodes() {
		let nodes = layout_nodes(&LayoutSpec::default());
		assert_eq!(nodes.len(), 10);
		assert_eq!(nodes.iter().filter(|n| n.ring == Ring::Inner).count(), 4);
		assert_eq!(nodes[0].label, "Skunked Emotion");
		assert_eq!(nodes[9].label, "Gear Store");
	}

	#[test]
	fn inner_node_zero_sits_at_rotated_arc_start() {
		let nodes = layout_nodes(&LayoutSpec::default());
		let angle = -PI / 2.0 + PI;
		let expected = DVec3::new(angle.cos() * 3.5, 0.0, angle.sin() * 3.5);
		assert!(nodes[0].position.distance(expected) < EPS);
		assert!(nodes[0].position.z > 3.5 - EPS);
	}

	#[test]
	fn outer_ring_positions_follow_arc_formula() {
		let spec = LayoutSpec::default();
		let nodes = layout_nodes(&spec);
		for i in 0..6 {
			let angle = -PI / 2.0 + (i as f64 / 5.0) * PI + PI;
			let node = &nodes[4 + i];
			assert!((node.position.x - angle.cos() * 6.5).abs() < EPS);
			assert!((node.position.z - angle.sin() * 6.5).abs() < EPS);
		}
	}

	#[test]
	fn highlighted_outer_nodes_are_lifted_and_recolored() {
		let spec = LayoutSpec::default();
		let nodes = layout_nodes(&spec);
		let outer = &nodes[4..];
		for (i, node) in outer.iter().enumerate() {
			let lifted = [0, 1, 4].contains(&i);
			assert_eq!(node.position.y, if lifted { 3.0 } else { 2.0 });
			if lifted {
				assert_eq!(node.base_color, Hsl::new(0.19, 0.3, 0.7));
			}
		}
	}

	#[test]
	fn single_node_ring_uses_arc_start() {
		let arc = ArcSpec::from_degrees(-90.0, 90.0, 180.0);
		let angle = arc.angle_at(0, 1);
		assert!((angle - (arc.start + arc.offset)).abs() < EPS);
		assert!(angle.is_finite());
	}

	#[test]
	fn missing_overrides_cycle_vocabulary() {
		let mut spec = LayoutSpec::default();
		spec.rings[1].labels.clear();
		spec.rings[0].count = 2;
		spec.rings[0].labels.truncate(1);
		let nodes = layout_nodes(&spec);
		assert_eq!(nodes[0].label, "Skunked Emotion");
		assert_eq!(nodes[1].label, VOCABULARY[1]);
		assert_eq!(nodes[2].label, VOCABULARY[2]);
	}

	#[test]
	fn vocabulary_wraps_around() {
		let spec = LayoutSpec {
			rings: vec![RingSpec {
				labels: Vec::new(),
				count: 5,
				..LayoutSpec::default().rings[0].clone()
			}],
			vocabulary: vec!["a".into(), "b".into()],
		};
		let labels: Vec<_> = layout_nodes(&spec).into_iter().map(|n| n.label).collect();
		assert_eq!(labels, ["a", "b", "a", "b", "a"]);
	}

	#[test]
	fn floor_is_below_every_sphere() {
		let nodes = layout_nodes(&LayoutSpec::default());
		let floor = floor_height(&nodes, 0.6);
		assert!(nodes.iter().all(|n| n.position.y - 0.6 > floor));
	}
}
