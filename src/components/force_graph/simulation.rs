//! Layout driver around the `force_graph` engine.
//!
//! The engine holds the node and edge store and the anchored (pinned) flags.
//! Link attraction, repulsion (with a distance cap), centering and collision
//! are integrated here; link and repulsion velocities scale with a cooling
//! temperature.
//! Only this module writes node positions; everything else reads
//! [`Simulation::positions`].

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::config::ForceSettings;
use super::types::{GraphLink, GraphNode, NodeId};

pub const ALPHA_MIN: f64 = 0.001;
/// Share of velocity lost per tick.
const VELOCITY_DECAY: f64 = 0.4;
const NODE_MASS: f32 = 10.0;
const INITIAL_RADIUS: f64 = 10.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

pub struct Simulation {
	graph: ForceGraph<NodeId, ()>,
	indices: Vec<DefaultNodeIdx>,
	radii: Vec<f64>,
	velocity: Vec<Point>,
	pins: HashMap<NodeId, Point>,
	settings: ForceSettings,
	center: Point,
	alpha: f64,
	alpha_target: f64,
	alpha_decay: f64,
	running: bool,
}

fn engine_parameters(settings: &ForceSettings) -> SimulationParameters {
	// Forces are integrated by the driver; the engine never steps.
	SimulationParameters {
		force_charge: 0.0,
		force_spring: 0.0,
		force_max: settings.max_speed as f32,
		..SimulationParameters::default()
	}
}

impl Simulation {
	/// Nodes start on a phyllotaxis spiral around the canvas center.
	pub fn new(
		nodes: &[GraphNode],
		links: &[GraphLink],
		radii: Vec<f64>,
		width: f64,
		height: f64,
		settings: ForceSettings,
	) -> Self {
		let center = Point::new(width / 2.0, height / 2.0);
		let golden = PI * (3.0 - 5f64.sqrt());
		let start: Vec<Point> = (0..nodes.len())
			.map(|i| {
				let r = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
				let a = i as f64 * golden;
				Point::new(center.x + r * a.cos(), center.y + r * a.sin())
			})
			.collect();

		let mut sim = Self {
			graph: ForceGraph::new(engine_parameters(&settings)),
			indices: Vec::new(),
			radii,
			velocity: vec![Point::default(); nodes.len()],
			pins: HashMap::new(),
			settings,
			center,
			alpha: 1.0,
			alpha_target: 0.0,
			alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / 300.0),
			running: true,
		};
		sim.rebuild(&start, links);
		sim
	}

	fn rebuild(&mut self, positions: &[Point], links: &[GraphLink]) {
		let mut graph = ForceGraph::new(engine_parameters(&self.settings));
		let indices: Vec<DefaultNodeIdx> = positions
			.iter()
			.enumerate()
			.map(|(i, p)| {
				let id = NodeId(i);
				let p = self.pins.get(&id).copied().unwrap_or(*p);
				graph.add_node(NodeData {
					x: p.x as f32,
					y: p.y as f32,
					mass: NODE_MASS,
					is_anchor: self.pins.contains_key(&id),
					user_data: id,
				})
			})
			.collect();

		for link in links {
			if let (Some(&src), Some(&tgt)) = (indices.get(link.source.0), indices.get(link.target.0))
			{
				graph.add_edge(src, tgt, EdgeData::default());
			}
		}

		self.graph = graph;
		self.indices = indices;
	}

	/// Swap the links the spring force acts on, keeping positions and pins.
	pub fn set_links(&mut self, links: &[GraphLink]) {
		let positions = self.positions();
		self.rebuild(&positions, links);
	}

	pub fn node_count(&self) -> usize {
		self.indices.len()
	}

	/// Position snapshot indexed by `NodeId`.
	pub fn positions(&self) -> Vec<Point> {
		let mut out = vec![Point::default(); self.node_count()];
		self.graph.visit_nodes(|node| {
			if let Some(slot) = out.get_mut(node.data.user_data.0) {
				*slot = Point::new(node.x() as f64, node.y() as f64);
			}
		});
		for (id, pin) in &self.pins {
			if let Some(slot) = out.get_mut(id.0) {
				*slot = *pin;
			}
		}
		out
	}

	pub fn position(&self, id: NodeId) -> Option<Point> {
		self.positions().get(id.0).copied()
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	pub fn restart(&mut self) {
		self.running = true;
	}

	/// Raise the temperature to at least `alpha` and resume ticking.
	pub fn reheat(&mut self, alpha: f64) {
		self.alpha = self.alpha.max(alpha);
		self.restart();
	}

	/// Fix `id` at `(x, y)`; forces no longer move it.
	pub fn pin(&mut self, id: NodeId, x: f64, y: f64) {
		if id.0 >= self.node_count() {
			return;
		}
		self.pins.insert(id, Point::new(x, y));
		if let Some(v) = self.velocity.get_mut(id.0) {
			*v = Point::default();
		}
		self.graph.visit_nodes_mut(|node| {
			if node.data.user_data == id {
				node.data.x = x as f32;
				node.data.y = y as f32;
				node.data.is_anchor = true;
			}
		});
	}

	pub fn unpin(&mut self, id: NodeId) {
		if self.pins.remove(&id).is_none() {
			return;
		}
		self.graph.visit_nodes_mut(|node| {
			if node.data.user_data == id {
				node.data.is_anchor = false;
			}
		});
	}

	pub fn is_pinned(&self, id: NodeId) -> bool {
		self.pins.contains_key(&id)
	}

	/// Keep the layout warm and pin the grabbed node where it is.
	pub fn drag_start(&mut self, id: NodeId, alpha_target: f64) {
		self.set_alpha_target(alpha_target);
		self.restart();
		if let Some(p) = self.position(id) {
			self.pin(id, p.x, p.y);
		}
	}

	pub fn drag_end(&mut self, id: NodeId) {
		self.set_alpha_target(0.0);
		self.unpin(id);
	}

	/// Advance one tick. Returns false when the layout is at rest.
	pub fn step(&mut self) -> bool {
		if !self.running {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

		let before = self.positions();
		let mut positions = before.clone();
		self.apply_forces(&mut positions);
		for (i, (p, prev)) in positions.iter_mut().zip(&before).enumerate() {
			if !p.x.is_finite() || !p.y.is_finite() {
				*p = *prev;
				self.velocity[i] = Point::default();
			}
		}
		self.write_positions(&positions);

		if self.alpha < ALPHA_MIN && self.alpha_target < ALPHA_MIN {
			self.running = false;
		}
		true
	}

	/// Visible links as node id pairs, read back from the engine's edge store.
	fn link_pairs(&self) -> Vec<(NodeId, NodeId)> {
		let mut pairs = Vec::new();
		self.graph
			.visit_edges(|a, b, _| pairs.push((a.data.user_data, b.data.user_data)));
		pairs
	}

	/// Springs toward `link_distance`, strength `1 / min(degree)`, the correction
	/// split between the endpoints in proportion to their degrees.
	fn apply_links(&mut self, positions: &[Point], alpha: f64) {
		let pairs = self.link_pairs();
		let mut degree = vec![0usize; positions.len()];
		for &(a, b) in &pairs {
			degree[a.0] += 1;
			degree[b.0] += 1;
		}
		let distance = self.settings.link_distance;

		for (s, t) in pairs {
			let (s, t) = (s.0, t.0);
			if s == t {
				continue;
			}
			let mut dx = positions[t].x + self.velocity[t].x - positions[s].x - self.velocity[s].x;
			let mut dy = positions[t].y + self.velocity[t].y - positions[s].y - self.velocity[s].y;
			if dx == 0.0 && dy == 0.0 {
				dx = 1e-3 * (s % 7 + 1) as f64;
				dy = 1e-3 * (t % 5 + 1) as f64;
			}
			let len = dx.hypot(dy);
			let strength = 1.0 / degree[s].min(degree[t]) as f64;
			let k = (len - distance) / len * alpha * strength;
			let bias = degree[s] as f64 / (degree[s] + degree[t]) as f64;
			self.velocity[t].x -= dx * k * bias;
			self.velocity[t].y -= dy * k * bias;
			self.velocity[s].x += dx * k * (1.0 - bias);
			self.velocity[s].y += dy * k * (1.0 - bias);
		}
	}

	fn apply_forces(&mut self, positions: &mut [Point]) {
		let n = positions.len();
		let alpha = self.alpha;
		self.apply_links(positions, alpha);
		let max_dist_sq = self.settings.charge_distance_max.powi(2);
		let strength = self.settings.charge_strength;
		let collide = self.settings.collide_strength;
		let mut push = vec![Point::default(); n];

		for i in 0..n {
			for j in (i + 1)..n {
				let (mut dx, mut dy) = (
					positions[j].x - positions[i].x,
					positions[j].y - positions[i].y,
				);
				if dx == 0.0 && dy == 0.0 {
					// Coincident nodes get a small deterministic nudge.
					dx = 1e-3 * ((i + j) % 7 + 1) as f64;
					dy = 1e-3 * ((i * 3 + j) % 5 + 1) as f64;
				}
				let dist_sq = dx * dx + dy * dy;

				if dist_sq < max_dist_sq {
					let w = strength * alpha / dist_sq;
					self.velocity[i].x -= dx * w;
					self.velocity[i].y -= dy * w;
					self.velocity[j].x += dx * w;
					self.velocity[j].y += dy * w;
				}

				let reach = self.radius(i) + self.radius(j);
				if dist_sq < reach * reach {
					let dist = dist_sq.sqrt();
					let share = (reach - dist) / dist * collide * 0.5;
					push[i].x -= dx * share;
					push[i].y -= dy * share;
					push[j].x += dx * share;
					push[j].y += dy * share;
				}
			}
		}

		let max_speed = self.settings.max_speed;
		for (i, p) in positions.iter_mut().enumerate() {
			if self.is_pinned(NodeId(i)) {
				self.velocity[i] = Point::default();
				continue;
			}
			let v = &mut self.velocity[i];
			v.x *= 1.0 - VELOCITY_DECAY;
			v.y *= 1.0 - VELOCITY_DECAY;
			let speed = v.x.hypot(v.y);
			if speed > max_speed {
				v.x *= max_speed / speed;
				v.y *= max_speed / speed;
			}
			p.x += v.x + push[i].x;
			p.y += v.y + push[i].y;
		}

		if n > 0 {
			let (sx, sy) = positions
				.iter()
				.fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
			let (shift_x, shift_y) = (
				self.center.x - sx / n as f64,
				self.center.y - sy / n as f64,
			);
			for (i, p) in positions.iter_mut().enumerate() {
				if !self.is_pinned(NodeId(i)) {
					p.x += shift_x;
					p.y += shift_y;
				}
			}
		}
	}

	fn radius(&self, i: usize) -> f64 {
		self.radii.get(i).copied().unwrap_or(0.0)
	}

	fn write_positions(&mut self, positions: &[Point]) {
		let pins = &self.pins;
		self.graph.visit_nodes_mut(|node| {
			let id = node.data.user_data;
			let p = pins
				.get(&id)
				.or_else(|| positions.get(id.0))
				.copied()
				.unwrap_or_default();
			node.data.x = p.x as f32;
			node.data.y = p.y as f32;
		});
	}
}
