use std::collections::HashSet;

use leptos::prelude::*;

use super::scale::ColorScale;
use super::types::GraphNode;

const SWATCH: f64 = 18.0;
const ROW_HEIGHT: f64 = 20.0;
const LEGEND_WIDTH: f64 = 180.0;
const MIN_LEGEND_HEIGHT: f64 = 200.0;

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
	pub group: i64,
	pub label: String,
	pub color: &'static str,
}

/// One entry per distinct group, in first-occurrence order. The label is the
/// `data_label` of the group's first node, or `Group <n>` when that node has none.
pub fn legend_entries(nodes: &[GraphNode], colors: &ColorScale) -> Vec<LegendEntry> {
	let mut seen = HashSet::new();
	nodes
		.iter()
		.filter(|node| seen.insert(node.group))
		.map(|node| LegendEntry {
			group: node.group,
			label: node
				.label
				.clone()
				.unwrap_or_else(|| format!("Group {}", node.group)),
			color: colors.color(node.group),
		})
		.collect()
}

#[component]
pub fn GraphLegend(entries: Vec<LegendEntry>) -> impl IntoView {
	let height = (entries.len() as f64 * ROW_HEIGHT).max(MIN_LEGEND_HEIGHT);

	view! {
		<div id="legend">
			<svg class="legend" width=LEGEND_WIDTH.to_string() height=height.to_string()>
				{entries
					.into_iter()
					.enumerate()
					.map(|(i, entry)| {
						view! {
							<g transform=format!("translate(0,{})", i as f64 * ROW_HEIGHT)>
								<rect
									width=SWATCH.to_string()
									height=SWATCH.to_string()
									style=format!("fill: {}", entry.color)
								/>
								<text x=(SWATCH + 6.0).to_string() y="13" font-size="12">
									{entry.label}
								</text>
							</g>
						}
					})
					.collect_view()}
			</svg>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::NodeId;

	fn node(i: usize, group: i64, label: Option<&str>) -> GraphNode {
		GraphNode {
			id: NodeId(i),
			name: format!("n{}", i),
			group,
			degree: 1.0,
			label: label.map(String::from),
		}
	}

	#[test]
	fn one_entry_per_group_in_first_seen_order() {
		let nodes = vec![
			node(0, 4, None),
			node(1, 2, Some("Stark")),
			node(2, 4, Some("Lannister")),
			node(3, 2, Some("Ignored")),
			node(4, 9, None),
		];
		let colors = ColorScale::default().with_groups(nodes.iter().map(|n| n.group));
		let entries = legend_entries(&nodes, &colors);

		let groups: Vec<i64> = entries.iter().map(|e| e.group).collect();
		assert_eq!(groups, vec![4, 2, 9]);
		let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
		assert_eq!(labels, vec!["Group 4", "Stark", "Group 9"]);
		assert_eq!(entries[0].color, colors.color(4));
	}

	#[test]
	fn later_labels_do_not_rename_a_group() {
		let nodes = vec![node(0, 4, None), node(1, 4, Some("Lannister"))];
		let colors = ColorScale::default().with_groups([4]);
		let entries = legend_entries(&nodes, &colors);
		assert_eq!(entries.len(), 1);
		assert_eq!(entries[0].label, "Group 4");
	}
}
