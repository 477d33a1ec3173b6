use std::collections::{HashMap, HashSet};

use log::warn;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Wire form of the fetched graph document.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphDocument {
	pub nodes: Vec<NodeRecord>,
	pub links: Vec<LinkRecord>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NodeRecord {
	pub name: String,
	#[serde(deserialize_with = "whole_number")]
	pub group: i64,
	pub degree: f64,
	#[serde(default)]
	pub data_label: Option<String>,
}

/// A link endpoint: either a position in `nodes` or a node name.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NodeRef {
	Index(usize),
	Name(String),
}

#[derive(Clone, Debug, Deserialize)]
pub struct LinkRecord {
	pub source: NodeRef,
	pub target: NodeRef,
	pub weight: f64,
	#[serde(default, deserialize_with = "whole_number")]
	pub group: i64,
}

/// Groups are plain JSON numbers; `3` and `3.0` name the same group.
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
	let n = f64::deserialize(deserializer)?;
	if n.is_finite() && n.fract() == 0.0 {
		Ok(n as i64)
	} else {
		Err(D::Error::custom(format!("group {} is not a whole number", n)))
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Join key for a rendered link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LinkKey {
	pub source: NodeId,
	pub target: NodeId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: NodeId,
	pub name: String,
	pub group: i64,
	pub degree: f64,
	pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: NodeId,
	pub target: NodeId,
	pub weight: f64,
	pub group: i64,
}

impl GraphLink {
	pub fn key(&self) -> LinkKey {
		LinkKey {
			source: self.source,
			target: self.target,
		}
	}

	pub fn touches(&self, id: NodeId) -> bool {
		self.source == id || self.target == id
	}
}

/// The resolved graph. Every link endpoint names a node in `nodes`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
	pub skipped_links: usize,
}

impl GraphData {
	pub fn from_document(doc: GraphDocument) -> Self {
		let nodes: Vec<GraphNode> = doc
			.nodes
			.into_iter()
			.enumerate()
			.map(|(i, n)| GraphNode {
				id: NodeId(i),
				name: n.name,
				group: n.group,
				degree: n.degree,
				label: n.data_label,
			})
			.collect();

		let (links, skipped_links) = {
			// None marks a name shared by several nodes.
			let mut by_name: HashMap<&str, Option<NodeId>> = HashMap::new();
			for node in &nodes {
				by_name
					.entry(node.name.as_str())
					.and_modify(|slot| *slot = None)
					.or_insert(Some(node.id));
			}
			let resolve = |r: &NodeRef| match r {
				NodeRef::Index(i) if *i < nodes.len() => Some(NodeId(*i)),
				NodeRef::Index(_) => None,
				NodeRef::Name(name) => by_name.get(name.as_str()).copied().flatten(),
			};

			let mut links = Vec::with_capacity(doc.links.len());
			let mut seen = HashSet::new();
			let mut skipped_links = 0;
			for (i, link) in doc.links.iter().enumerate() {
				let (Some(source), Some(target)) = (resolve(&link.source), resolve(&link.target)) else {
					warn!(
						"link {} has a dangling endpoint ({:?} -> {:?}), skipping",
						i, link.source, link.target
					);
					skipped_links += 1;
					continue;
				};
				let resolved = GraphLink {
					source,
					target,
					weight: link.weight,
					group: link.group,
				};
				if !seen.insert(resolved.key()) {
					warn!("link {} duplicates {:?}, skipping", i, resolved.key());
					skipped_links += 1;
					continue;
				}
				links.push(resolved);
			}
			(links, skipped_links)
		};

		Self {
			nodes,
			links,
			skipped_links,
		}
	}

	pub fn max_weight(&self) -> f64 {
		self.links.iter().map(|l| l.weight).fold(0.0, f64::max)
	}
}
