//! Pure mapping from view state to SVG attributes.

use super::adjacency::AdjacencyIndex;
use super::simulation::Point;
use super::state::Selection;
use super::types::{GraphLink, NodeId};

pub const LINK_OPACITY: f64 = 0.6;
pub const FOCUS_OPACITY: f64 = 1.0;
pub const DIM_OPACITY: f64 = 0.1;

pub fn link_opacity(selection: Selection, link: &GraphLink) -> f64 {
	match selection.focused() {
		None => LINK_OPACITY,
		Some(id) if link.touches(id) => FOCUS_OPACITY,
		Some(_) => DIM_OPACITY,
	}
}

/// The focused node and its neighbours stay opaque; everything else fades.
pub fn node_opacity(selection: Selection, node: NodeId, adjacency: &AdjacencyIndex) -> f64 {
	match selection.focused() {
		None => FOCUS_OPACITY,
		Some(id) if id == node || adjacency.is_adjacent(id, node) => FOCUS_OPACITY,
		Some(_) => DIM_OPACITY,
	}
}

pub fn node_transform(p: Point) -> String {
	format!("translate({},{})", p.x, p.y)
}

/// Position of `id` in a snapshot; unknown ids sit at the origin.
pub fn point_at(positions: &[Point], id: NodeId) -> Point {
	positions.get(id.0).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::filter::visible_links;
	use crate::components::force_graph::loader::parse_graph;
	use crate::components::force_graph::scale::LinearScale;

	const FIXTURE: &str = r#"{
		"nodes": [
			{"name": "A", "group": 0, "degree": 1},
			{"name": "B", "group": 1, "degree": 5},
			{"name": "C", "group": 0, "degree": 1}
		],
		"links": [
			{"source": 0, "target": 1, "weight": 2, "group": 0},
			{"source": 1, "target": 2, "weight": 4, "group": 1}
		]
	}"#;

	fn link(a: usize, b: usize) -> GraphLink {
		GraphLink {
			source: NodeId(a),
			target: NodeId(b),
			weight: 1.0,
			group: 0,
		}
	}

	#[test]
	fn focus_highlights_ego_network_only() {
		let links = vec![link(0, 1), link(1, 2), link(2, 3)];
		let adjacency = AdjacencyIndex::build(&links);
		let focused = Selection::None.toggle(NodeId(1));

		let link_alpha: Vec<f64> = links.iter().map(|l| link_opacity(focused, l)).collect();
		assert_eq!(link_alpha, vec![1.0, 1.0, 0.1]);
		let node_alpha: Vec<f64> = (0..4)
			.map(|i| node_opacity(focused, NodeId(i), &adjacency))
			.collect();
		assert_eq!(node_alpha, vec![1.0, 1.0, 1.0, 0.1]);

		let cleared = focused.toggle(NodeId(3));
		assert!(links.iter().all(|l| link_opacity(cleared, l) == LINK_OPACITY));
		assert!((0..4).all(|i| node_opacity(cleared, NodeId(i), &adjacency) == 1.0));
	}

	#[test]
	fn isolated_focus_dims_everything_else() {
		let links = vec![link(0, 1)];
		let adjacency = AdjacencyIndex::build(&links);
		let focused = Selection::Focused(NodeId(2));
		assert_eq!(node_opacity(focused, NodeId(2), &adjacency), 1.0);
		assert_eq!(node_opacity(focused, NodeId(0), &adjacency), 0.1);
		assert_eq!(link_opacity(focused, &links[0]), 0.1);
	}

	#[test]
	fn positions_are_looked_up_by_id() {
		let positions = vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)];
		assert_eq!(point_at(&positions, NodeId(1)), Point::new(3.0, 4.0));
		assert_eq!(point_at(&positions, NodeId(9)), Point::default());
		assert_eq!(node_transform(Point::new(1.5, -2.0)), "translate(1.5,-2)");
	}

	#[test]
	fn three_node_scenario() {
		let data = parse_graph(FIXTURE).unwrap();
		let adjacency = AdjacencyIndex::build(&data.links);
		let radius = LinearScale::from_extent(data.nodes.iter().map(|n| n.degree), (8.0, 25.0));

		let radii: Vec<f64> = data.nodes.iter().map(|n| radius.apply(n.degree)).collect();
		assert_eq!(radii, vec![8.0, 25.0, 8.0]);
		assert_eq!(visible_links(&data.links, 1).len(), 2);

		let filtered = visible_links(&data.links, 3);
		assert_eq!(filtered.len(), 1);
		assert_eq!((filtered[0].source, filtered[0].target), (NodeId(1), NodeId(2)));

		let b = NodeId(1);
		let focused = Selection::None.toggle(b);
		assert!(data.links.iter().all(|l| link_opacity(focused, l) == 1.0));
		assert!(data.nodes.iter().all(|n| node_opacity(focused, n.id, &adjacency) == 1.0));

		let cleared = focused.toggle(b);
		assert_eq!(cleared, Selection::None);
		assert!(data.links.iter().all(|l| link_opacity(cleared, l) == LINK_OPACITY));
		assert!(data.nodes.iter().all(|n| node_opacity(cleared, n.id, &adjacency) == 1.0));
	}
}
