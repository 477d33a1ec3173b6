use super::types::GraphLink;

/// Integer slider domain for the edge-weight threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThresholdRange {
	pub min: u32,
	pub max: u32,
}

impl ThresholdRange {
	/// `[1, floor(max_weight / 2)]`, never narrower than `[1, 1]`.
	pub fn for_max_weight(max_weight: f64) -> Self {
		let half = (max_weight / 2.0).floor();
		let max = if half >= 1.0 { half.min(u32::MAX as f64) as u32 } else { 1 };
		Self { min: 1, max }
	}

	pub fn clamp(&self, value: u32) -> u32 {
		value.clamp(self.min, self.max)
	}
}

/// Links at or above `threshold`, in their original order.
pub fn visible_links(links: &[GraphLink], threshold: u32) -> Vec<GraphLink> {
	let threshold = threshold as f64;
	links
		.iter()
		.filter(|l| l.weight >= threshold)
		.cloned()
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::NodeId;

	fn links(weights: &[f64]) -> Vec<GraphLink> {
		weights
			.iter()
			.enumerate()
			.map(|(i, &weight)| GraphLink {
				source: NodeId(i),
				target: NodeId(i + 1),
				weight,
				group: 0,
			})
			.collect()
	}

	#[test]
	fn range_is_half_the_max_weight() {
		assert_eq!(ThresholdRange::for_max_weight(9.0), ThresholdRange { min: 1, max: 4 });
		assert_eq!(ThresholdRange::for_max_weight(8.0).max, 4);
		assert_eq!(ThresholdRange::for_max_weight(1.0).max, 1);
		assert_eq!(ThresholdRange::for_max_weight(0.0).max, 1);
		assert_eq!(ThresholdRange::for_max_weight(f64::NAN).max, 1);
	}

	#[test]
	fn threshold_keeps_links_at_or_above() {
		let all = links(&[1.0, 2.0, 3.0, 5.0]);
		let kept: Vec<f64> = visible_links(&all, 3).iter().map(|l| l.weight).collect();
		assert_eq!(kept, vec![3.0, 5.0]);
		assert_eq!(visible_links(&all, 1), all);
	}

	#[test]
	fn clamp_stays_in_range() {
		let range = ThresholdRange { min: 1, max: 4 };
		assert_eq!(range.clamp(0), 1);
		assert_eq!(range.clamp(9), 4);
		assert_eq!(range.clamp(2), 2);
	}
}
