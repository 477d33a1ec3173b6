/// Where the Game of Thrones interaction network is published.
pub const DEFAULT_DATA_URL: &str =
	"https://keithmcnulty.github.io/game-of-thrones-network/json/got_network.json";

#[derive(Clone, Debug, PartialEq)]
pub struct ForceSettings {
	/// Many-body repulsion strength.
	pub charge_strength: f64,
	/// Pairs further apart than this do not repel.
	pub charge_distance_max: f64,
	/// Rest length of a link spring.
	pub link_distance: f64,
	/// Per-tick displacement cap.
	pub max_speed: f64,
	/// Fraction of the collision overlap resolved per tick.
	pub collide_strength: f64,
}

impl Default for ForceSettings {
	fn default() -> Self {
		Self {
			charge_strength: 120.0,
			charge_distance_max: 500.0,
			link_distance: 30.0,
			max_speed: 100.0,
			collide_strength: 0.7,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
	pub data_url: String,
	pub width: f64,
	pub height: f64,
	/// Visual radius range for the degree scale.
	pub radius_range: (f64, f64),
	pub zoom_extent: (f64, f64),
	pub forces: ForceSettings,
	/// Temperature kept while a node is dragged.
	pub drag_alpha_target: f64,
	/// Temperature the layout is raised to when the threshold changes.
	pub filter_reheat: f64,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			data_url: DEFAULT_DATA_URL.into(),
			width: 960.0,
			height: 600.0,
			radius_range: (8.0, 25.0),
			zoom_extent: (0.1, 5.0),
			forces: ForceSettings::default(),
			drag_alpha_target: 0.3,
			filter_reheat: 0.1,
		}
	}
}

impl GraphConfig {
	/// Default config reading from `url` when one is given.
	pub fn with_data_url(url: Option<String>) -> Self {
		let mut config = Self::default();
		if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
			config.data_url = url;
		}
		config
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn blank_override_keeps_default_url() {
		assert_eq!(GraphConfig::with_data_url(None).data_url, DEFAULT_DATA_URL);
		assert_eq!(GraphConfig::with_data_url(Some("  ".into())).data_url, DEFAULT_DATA_URL);
		assert_eq!(
			GraphConfig::with_data_url(Some("/data/got.json".into())).data_url,
			"/data/got.json"
		);
	}
}
