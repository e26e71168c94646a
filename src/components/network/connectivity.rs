//! Proximity edges with a minimum-degree repair pass.
//!
//! Both passes are quadratic in the node count, which is fine for the tens of
//! nodes a hand-placed layout holds.

use glam::DVec3;

use super::types::{Edge, NodeId};

/// Undirected edge list plus per-node adjacency, kept in sync on insert.
#[derive(Clone, Debug, Default)]
pub struct EdgeSet {
	edges: Vec<Edge>,
	adjacency: Vec<Vec<NodeId>>,
}

impl EdgeSet {
	pub fn new(node_count: usize) -> Self {
		Self {
			edges: Vec::new(),
			adjacency: vec![Vec::new(); node_count],
		}
	}

	/// Adds `(i, j)` unless it is a self-loop or already present.
	pub fn connect(&mut self, i: NodeId, j: NodeId) -> bool {
		if i == j || self.contains(i, j) {
			return false;
		}
		self.edges.push(Edge::new(i, j));
		self.adjacency[i].push(j);
		self.adjacency[j].push(i);
		true
	}

	pub fn contains(&self, i: NodeId, j: NodeId) -> bool {
		self.adjacency.get(i).is_some_and(|n| n.contains(&j))
	}

	pub fn degree(&self, i: NodeId) -> usize {
		self.adjacency.get(i).map_or(0, Vec::len)
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn len(&self) -> usize {
		self.edges.len()
	}
}

/// Connects every pair closer than `max_distance`, then tops up each node
/// below `min_degree` with its nearest unconnected peers.
pub fn build_edges(positions: &[DVec3], max_distance: f64, min_degree: usize) -> EdgeSet {
	let n = positions.len();
	let mut set = EdgeSet::new(n);

	for i in 0..n {
		for j in (i + 1)..n {
			if positions[i].distance(positions[j]) < max_distance {
				set.connect(i, j);
			}
		}
	}

	for i in 0..n {
		while set.degree(i) < min_degree {
			match nearest_unconnected(positions, &set, i) {
				Some(j) => {
					set.connect(i, j);
				}
				None => break,
			}
		}
	}

	set
}

/// First node in index order at the minimum distance from `i` that is not yet
/// adjacent to it.
fn nearest_unconnected(positions: &[DVec3], set: &EdgeSet, i: NodeId) -> Option<NodeId> {
	let origin = positions[i];
	let mut best: Option<(NodeId, f64)> = None;
	for (j, p) in positions.iter().enumerate() {
		if j == i || set.contains(i, j) {
			continue;
		}
		let d = origin.distance(*p);
		if best.is_none_or(|(_, bd)| d < bd) {
			best = Some((j, d));
		}
	}
	best.map(|(j, _)| j)
}
