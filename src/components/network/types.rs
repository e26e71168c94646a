use glam::DVec3;

use super::color::Hsl;

/// Index of a node in layout order.
pub type NodeId = usize;

/// Which arc a node was placed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ring {
	Inner,
	Outer,
}

/// A labeled sphere. Position, label and base color are fixed at layout time.
#[derive(Clone, Debug)]
pub struct Node {
	pub id: NodeId,
	pub position: DVec3,
	pub label: String,
	pub base_color: Hsl,
	pub ring: Ring,
}

/// Undirected edge, stored with `a < b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
	pub a: NodeId,
	pub b: NodeId,
}

impl Edge {
	pub fn new(i: NodeId, j: NodeId) -> Self {
		Self {
			a: i.min(j),
			b: i.max(j),
		}
	}
}
