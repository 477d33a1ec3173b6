use super::types::NodeId;

/// Screen pixels a press may travel before it counts as a drag instead of a click.
pub const CLICK_TOLERANCE: f64 = 3.0;

/// Ego-network highlight: either nothing or one focused node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
	#[default]
	None,
	Focused(NodeId),
}

impl Selection {
	/// Global toggle. Clicking any node while focused clears focus, it never refocuses.
	pub fn toggle(self, clicked: NodeId) -> Self {
		match self {
			Selection::None => Selection::Focused(clicked),
			Selection::Focused(_) => Selection::None,
		}
	}

	pub fn focused(self) -> Option<NodeId> {
		match self {
			Selection::None => None,
			Selection::Focused(id) => Some(id),
		}
	}
}

/// Uniform translate + scale applied to the whole graph layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Scale by `factor` about the screen point `(sx, sy)`, keeping `k` inside `extent`.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64, extent: (f64, f64)) {
		let new_k = (self.k * factor).clamp(extent.0, extent.1);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}

	pub fn to_svg(&self) -> String {
		format!("translate({},{}) scale({})", self.x, self.y, self.k)
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node: Option<NodeId>,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	/// Node position minus the grab point, in graph space.
	pub offset_x: f64,
	pub offset_y: f64,
}

impl DragState {
	pub fn begin(
		&mut self,
		node: NodeId,
		sx: f64,
		sy: f64,
		node_pos: (f64, f64),
		transform: &ViewTransform,
	) {
		let (gx, gy) = transform.screen_to_graph(sx, sy);
		*self = Self {
			node: Some(node),
			moved: false,
			start_x: sx,
			start_y: sy,
			offset_x: node_pos.0 - gx,
			offset_y: node_pos.1 - gy,
		};
	}

	/// Graph-space position the dragged node should be pinned to for pointer `(sx, sy)`.
	pub fn track(&mut self, sx: f64, sy: f64, transform: &ViewTransform) -> (f64, f64) {
		if (sx - self.start_x).hypot(sy - self.start_y) > CLICK_TOLERANCE {
			self.moved = true;
		}
		let (gx, gy) = transform.screen_to_graph(sx, sy);
		(gx + self.offset_x, gy + self.offset_y)
	}

	/// Ends the gesture, returning the node and whether it travelled far enough to be a drag.
	pub fn end(&mut self) -> Option<(NodeId, bool)> {
		let node = self.node.take()?;
		Some((node, std::mem::take(&mut self.moved)))
	}
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

impl PanState {
	pub fn begin(&mut self, sx: f64, sy: f64, transform: &ViewTransform) {
		*self = Self {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: transform.x,
			transform_start_y: transform.y,
		};
	}

	pub fn track(&self, sx: f64, sy: f64, transform: &mut ViewTransform) {
		transform.x = self.transform_start_x + (sx - self.start_x);
		transform.y = self.transform_start_y + (sy - self.start_y);
	}
}
