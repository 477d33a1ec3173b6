use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{MouseEvent, WheelEvent};

use super::adjacency::AdjacencyIndex;
use super::config::GraphConfig;
use super::filter::{ThresholdRange, visible_links};
use super::legend::{GraphLegend, legend_entries};
use super::render;
use super::scale::{ColorScale, LinearScale};
use super::simulation::Simulation;
use super::slider::ThresholdSlider;
use super::state::{DragState, PanState, Selection, ViewTransform};
use super::types::{GraphData, GraphLink, GraphNode, NodeId};

/// Mutable gesture and layout state shared by the event handlers and the frame loop.
struct Controller {
	sim: Simulation,
	drag: DragState,
	pan: PanState,
}

fn local_point(surface: NodeRef<leptos::html::Div>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let el = surface.get()?;
	let rect = el.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Force-directed SVG view of a loaded graph, with ego highlighting, drag, pan/zoom,
/// a weight-threshold slider and a group legend.
#[component]
pub fn ForceGraphView(data: GraphData, config: GraphConfig) -> impl IntoView {
	let range = ThresholdRange::for_max_weight(data.max_weight());
	let GraphData { nodes, links, .. } = data;

	let colors = Arc::new(
		ColorScale::default().with_groups(
			nodes
				.iter()
				.map(|n| n.group)
				.chain(links.iter().map(|l| l.group)),
		),
	);
	let degree_scale =
		LinearScale::from_extent(nodes.iter().map(|n| n.degree), config.radius_range);
	let adjacency = Arc::new(AdjacencyIndex::build(&links));
	let legend = legend_entries(&nodes, &colors);

	let controller = Rc::new(RefCell::new(Controller {
		sim: Simulation::new(
			&nodes,
			&links,
			nodes.iter().map(|n| degree_scale.apply(n.degree)).collect(),
			config.width,
			config.height,
			config.forces.clone(),
		),
		drag: DragState::default(),
		pan: PanState::default(),
	}));

	let positions = RwSignal::new(controller.borrow().sim.positions());
	let selection = RwSignal::new(Selection::None);
	let threshold = RwSignal::new(range.min);
	let transform = RwSignal::new(ViewTransform::default());
	let pressed_node = RwSignal::new(None::<NodeId>);
	let surface_ref = NodeRef::<leptos::html::Div>::new();

	let all_links = Arc::new(links);
	let visible = Memo::new(move |_| visible_links(&all_links, threshold.get()));

	let ctl_filter = controller.clone();
	let filter_reheat = config.filter_reheat;
	Effect::new(move |prev: Option<()>| {
		let links = visible.get();
		let mut c = ctl_filter.borrow_mut();
		c.sim.set_links(&links);
		if prev.is_some() {
			c.sim.reheat(filter_reheat);
			debug!(
				"Threshold {}: {} links visible, alpha {:.3}",
				threshold.get_untracked(),
				links.len(),
				c.sim.alpha()
			);
		}
	});

	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (ctl_anim, animate_init) = (controller.clone(), animate.clone());
	Effect::new(move |_| {
		let (ctl_frame, animate_inner) = (ctl_anim.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			// Stop once the view has been torn down, dropping the closure so the
			// self-reference is released.
			if transform.try_get_untracked().is_none() {
				animate_inner.borrow_mut().take();
				return;
			}
			{
				let mut c = ctl_frame.borrow_mut();
				if c.sim.is_running() && c.sim.step() {
					positions.set(c.sim.positions());
				}
			}
			if let (Some(cb), Some(window)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let (Some(cb), Some(window)) = (&*animate_init.borrow(), web_sys::window()) {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let ctl_md = controller.clone();
	let drag_alpha_target = config.drag_alpha_target;
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(surface_ref, &ev) else {
			return;
		};
		let pressed = pressed_node.get_untracked();
		pressed_node.set(None);
		let current = transform.get_untracked();
		let mut c = ctl_md.borrow_mut();
		let Controller { sim, drag, pan } = &mut *c;

		match pressed {
			Some(id) => {
				sim.drag_start(id, drag_alpha_target);
				let p = sim.position(id).unwrap_or_default();
				drag.begin(id, x, y, (p.x, p.y), &current);
			}
			None => pan.begin(x, y, &current),
		}
	};

	let ctl_mm = controller.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(surface_ref, &ev) else {
			return;
		};
		let mut c = ctl_mm.borrow_mut();
		let Controller { sim, drag, pan } = &mut *c;

		if let Some(id) = drag.node {
			let (gx, gy) = drag.track(x, y, &transform.get_untracked());
			sim.pin(id, gx, gy);
		} else if pan.active {
			transform.update(|t| pan.track(x, y, t));
		}
	};

	let ctl_mu = controller.clone();
	let on_mouseup = move |_: MouseEvent| {
		let mut c = ctl_mu.borrow_mut();
		if let Some((id, moved)) = c.drag.end() {
			c.sim.drag_end(id);
			if !moved {
				selection.update(|s| *s = s.toggle(id));
				debug!("Selection is now {:?}", selection.get_untracked());
			}
		}
		c.pan.active = false;
	};

	let ctl_ml = controller.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let mut c = ctl_ml.borrow_mut();
		if let Some((id, _)) = c.drag.end() {
			c.sim.drag_end(id);
		}
		c.pan.active = false;
	};

	let zoom_extent = config.zoom_extent;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(surface_ref, &ev) else {
			return;
		};
		let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
		transform.update(|t| t.zoom_at(x, y, factor, zoom_extent));
	};

	// Double-click must not zoom.
	let on_dblclick = move |ev: MouseEvent| ev.prevent_default();

	let link_colors = colors.clone();
	let link_view = move |link: GraphLink| {
		let (source, target) = (link.source, link.target);
		let stroke = link_colors.color(link.group);
		view! {
			<line
				class="link"
				stroke=stroke
				stroke-opacity=move || render::link_opacity(selection.get(), &link).to_string()
				x1=move || positions.with(|p| render::point_at(p, source).x.to_string())
				y1=move || positions.with(|p| render::point_at(p, source).y.to_string())
				x2=move || positions.with(|p| render::point_at(p, target).x.to_string())
				y2=move || positions.with(|p| render::point_at(p, target).y.to_string())
			/>
		}
	};

	let node_view = move |node: GraphNode| {
		let id = node.id;
		let radius = degree_scale.apply(node.degree);
		let fill = colors.color(node.group);
		let adjacency = adjacency.clone();
		view! {
			<g
				class="node"
				transform=move || positions.with(|p| render::node_transform(render::point_at(p, id)))
				opacity=move || render::node_opacity(selection.get(), id, &adjacency).to_string()
				on:mousedown=move |_| pressed_node.set(Some(id))
			>
				<circle r=radius.to_string() fill=fill />
				<title>{node.name}</title>
			</g>
		}
	};

	view! {
		<div class="force-graph">
			<div
				node_ref=surface_ref
				class="graph-surface"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				on:dblclick=on_dblclick
				style=format!(
					"width: {}px; height: {}px; cursor: grab; user-select: none;",
					config.width,
					config.height,
				)
			>
				<svg width=config.width.to_string() height=config.height.to_string()>
					<g class="container" transform=move || transform.get().to_svg()>
						<g class="links" stroke-width="1.5">
							<For each=move || visible.get() key=|link: &GraphLink| link.key() children=link_view />
						</g>
						<g class="nodes" stroke="#fff" stroke-width="1.5">
							<For each=move || nodes.clone() key=|node: &GraphNode| node.id children=node_view />
						</g>
					</g>
				</svg>
			</div>
			<ThresholdSlider range=range threshold=threshold />
			<GraphLegend entries=legend />
		</div>
	}
}
