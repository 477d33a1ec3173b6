//! Degree -> radius and group -> color mappings.

use std::collections::HashMap;

/// d3's `schemeCategory20`.
pub const CATEGORY20: &[&str] = &[
	"#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
	"#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
	"#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

/// Clamped linear interpolation from a domain into a range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
	domain: (f64, f64),
	range: (f64, f64),
}

impl LinearScale {
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self { domain, range }
	}

	/// Domain spans the observed extent of `values`; empty input collapses it to `(0, 0)`.
	pub fn from_extent(values: impl IntoIterator<Item = f64>, range: (f64, f64)) -> Self {
		let extent = values
			.into_iter()
			.filter(|v| v.is_finite())
			.fold(None, |acc: Option<(f64, f64)>, v| match acc {
				Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
				None => Some((v, v)),
			});
		Self::new(extent.unwrap_or((0.0, 0.0)), range)
	}

	/// A collapsed domain maps everything to the middle of the range.
	pub fn apply(&self, value: f64) -> f64 {
		let (d0, d1) = self.domain;
		let (r0, r1) = self.range;
		let span = d1 - d0;
		if span.abs() < f64::EPSILON || !value.is_finite() {
			return (r0 + r1) / 2.0;
		}
		let t = ((value - d0) / span).clamp(0.0, 1.0);
		r0 + (r1 - r0) * t
	}
}

/// Ordinal group -> color mapping, keyed by first-seen order, cycling the palette.
///
/// The graph view registers node groups before link groups, so a group seen
/// only on links takes a slot after every node group.
#[derive(Clone, Debug)]
pub struct ColorScale {
	palette: &'static [&'static str],
	slots: HashMap<i64, usize>,
}

impl Default for ColorScale {
	fn default() -> Self {
		Self::new(CATEGORY20)
	}
}

impl ColorScale {
	pub fn new(palette: &'static [&'static str]) -> Self {
		Self {
			palette,
			slots: HashMap::new(),
		}
	}

	pub fn with_groups(mut self, groups: impl IntoIterator<Item = i64>) -> Self {
		for g in groups {
			self.register(g);
		}
		self
	}

	pub fn register(&mut self, group: i64) -> usize {
		let next = self.slots.len();
		*self.slots.entry(group).or_insert(next)
	}

	/// Groups never registered fall back to a palette slot derived from their value.
	pub fn color(&self, group: i64) -> &'static str {
		if self.palette.is_empty() {
			return "#000000";
		}
		let slot = self
			.slots
			.get(&group)
			.copied()
			.unwrap_or_else(|| group.rem_euclid(self.palette.len() as i64) as usize);
		self.palette[slot % self.palette.len()]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn radius_is_monotonic_and_bounded() {
		let scale = LinearScale::from_extent([1.0, 5.0, 3.0], (8.0, 25.0));
		assert_eq!(scale.apply(1.0), 8.0);
		assert_eq!(scale.apply(5.0), 25.0);
		let mut last = f64::MIN;
		for d in 1..=5 {
			let r = scale.apply(d as f64);
			assert!(r >= last);
			assert!((8.0..=25.0).contains(&r));
			last = r;
		}
	}

	#[test]
	fn collapsed_domain_maps_to_midpoint() {
		let scale = LinearScale::from_extent([4.0, 4.0], (8.0, 25.0));
		assert_eq!(scale.apply(4.0), 16.5);
		let empty = LinearScale::from_extent(std::iter::empty(), (8.0, 25.0));
		assert_eq!(empty.apply(0.0), 16.5);
	}

	#[test]
	fn colors_follow_first_seen_order() {
		let colors = ColorScale::default().with_groups([7, 3, 7, 1]);
		assert_eq!(colors.color(7), CATEGORY20[0]);
		assert_eq!(colors.color(3), CATEGORY20[1]);
		assert_eq!(colors.color(1), CATEGORY20[2]);
	}

	#[test]
	fn palette_cycles_past_its_length() {
		let colors = ColorScale::new(&["#a", "#b"]).with_groups(0..3);
		assert_eq!(colors.color(2), "#a");
		assert_eq!(colors.color(-1), "#b");
	}
}
