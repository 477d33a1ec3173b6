use std::collections::HashSet;

use super::types::{GraphLink, NodeId};

/// Undirected "is adjacent" lookup, built once from the full link set.
#[derive(Clone, Debug, Default)]
pub struct AdjacencyIndex {
	pairs: HashSet<(NodeId, NodeId)>,
}

fn pair(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
	if a <= b { (a, b) } else { (b, a) }
}

impl AdjacencyIndex {
	pub fn build(links: &[GraphLink]) -> Self {
		Self {
			pairs: links
				.iter()
				.filter(|l| l.source != l.target)
				.map(|l| pair(l.source, l.target))
				.collect(),
		}
	}

	/// A node is never adjacent to itself.
	pub fn is_adjacent(&self, a: NodeId, b: NodeId) -> bool {
		a != b && self.pairs.contains(&pair(a, b))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn link(a: usize, b: usize) -> GraphLink {
		GraphLink {
			source: NodeId(a),
			target: NodeId(b),
			weight: 1.0,
			group: 0,
		}
	}

	#[test]
	fn adjacency_is_symmetric() {
		let index = AdjacencyIndex::build(&[link(0, 1), link(2, 1)]);
		for (a, b) in [(0, 1), (1, 2)] {
			assert!(index.is_adjacent(NodeId(a), NodeId(b)));
			assert!(index.is_adjacent(NodeId(b), NodeId(a)));
		}
		assert!(!index.is_adjacent(NodeId(0), NodeId(2)));
		assert!(!index.is_adjacent(NodeId(0), NodeId(9)));
	}

	#[test]
	fn self_adjacency_is_false() {
		let index = AdjacencyIndex::build(&[link(3, 3), link(3, 4)]);
		assert!(!index.is_adjacent(NodeId(3), NodeId(3)));
		assert!(!index.is_adjacent(NodeId(4), NodeId(4)));
	}
}
