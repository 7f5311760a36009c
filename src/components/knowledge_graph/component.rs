use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::DVec2;
use leptos::prelude::*;
use log::{error, info};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::render;
use super::state::GraphView;
use crate::components::random_seed;
use crate::graph::{GraphData, KnowledgeLink, KnowledgeNode, Viewport};
use crate::theme::Theme;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Browser resources held by one mounted graph.
struct GraphMount {
	view: Rc<RefCell<GraphView>>,
	animate: Rc<RefCell<Option<FrameCallback>>>,
	frame_id: Rc<Cell<Option<i32>>>,
	resize_cb: Closure<dyn FnMut()>,
}

impl GraphMount {
	/// Stop ticking, cancel the pending frame and detach the resize
	/// listener before anything is dropped.
	fn teardown(self) {
		self.view.borrow_mut().stop();
		if let Some(window) = web_sys::window() {
			if let Some(id) = self.frame_id.take() {
				let _ = window.cancel_animation_frame(id);
			}
			let _ = window
				.remove_event_listener_with_callback("resize", self.resize_cb.as_ref().unchecked_ref());
		}
		// The frame callback holds a handle to itself.
		self.animate.borrow_mut().take();
		info!("Knowledge graph unmounted");
	}
}

fn container_width(canvas: &HtmlCanvasElement) -> f64 {
	canvas
		.parent_element()
		.map(|p| p.client_width() as f64)
		.unwrap_or(0.0)
}

fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> DVec2 {
	let rect = canvas.get_bounding_client_rect();
	DVec2::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn request_frame(cb: &FrameCallback) -> Option<i32> {
	web_sys::window()?
		.request_animation_frame(cb.as_ref().unchecked_ref())
		.ok()
}

fn mount(canvas: HtmlCanvasElement, data: GraphData, theme: Theme, height: f64) -> Option<GraphMount> {
	let Some(window): Option<Window> = web_sys::window() else {
		error!("No window; knowledge graph not mounted");
		return None;
	};
	let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
		Ok(Some(ctx)) => match ctx.dyn_into() {
			Ok(ctx) => ctx,
			Err(_) => {
				error!("Canvas context is not 2d");
				return None;
			}
		},
		_ => {
			error!("Canvas has no 2d context");
			return None;
		}
	};

	let viewport = Viewport::new(container_width(&canvas), height);
	canvas.set_width(viewport.width as u32);
	canvas.set_height(height as u32);
	info!(
		"Mounting knowledge graph: {} nodes, {} links",
		data.nodes.len(),
		data.links.len()
	);
	let view = Rc::new(RefCell::new(GraphView::new(
		data,
		viewport,
		theme.palette(),
		random_seed(),
	)));

	let (view_resize, canvas_resize) = (view.clone(), canvas.clone());
	let resize_cb: Closure<dyn FnMut()> = Closure::new(move || {
		let viewport = Viewport::new(container_width(&canvas_resize), height);
		canvas_resize.set_width(viewport.width as u32);
		view_resize.borrow_mut().resize(viewport);
	});
	if window
		.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
		.is_err()
	{
		error!("Could not listen for window resize");
	}

	let animate: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
	let frame_id = Rc::new(Cell::new(None));
	let (view_anim, animate_inner, frame_inner) = (view.clone(), animate.clone(), frame_id.clone());
	let mut last_frame: Option<f64> = None;
	*animate.borrow_mut() = Some(Closure::new(move |now: f64| {
		frame_inner.set(None);
		let dt = last_frame.map_or(0.0, |prev| ((now - prev) / 1000.0).clamp(0.0, 0.1));
		last_frame = Some(now);

		let more = {
			let mut view = view_anim.borrow_mut();
			let more = view.frame(dt);
			if let Some(state) = view.state() {
				render::render(state, &ctx);
			}
			more
		};
		if !more {
			return;
		}
		if let Some(ref cb) = *animate_inner.borrow() {
			frame_inner.set(request_frame(cb));
		}
	}));
	if let Some(ref cb) = *animate.borrow() {
		frame_id.set(request_frame(cb));
	}

	Some(GraphMount {
		view,
		animate,
		frame_id,
		resize_cb,
	})
}

fn with_view(mounted: &RefCell<Option<GraphMount>>, f: impl FnOnce(&mut GraphView)) {
	if let Some(m) = mounted.borrow().as_ref() {
		f(&mut m.view.borrow_mut());
	}
}

/// Interactive force-directed drawing of a knowledge graph.
///
/// The layout is rebuilt whenever `nodes` or `links` change; `theme` only
/// swaps colours.
#[component]
pub fn KnowledgeGraph(
	#[prop(into)] nodes: Signal<Vec<KnowledgeNode>>,
	#[prop(into)] links: Signal<Vec<KnowledgeLink>>,
	#[prop(into)] theme: Signal<Theme>,
	#[prop(default = 500.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let mounted: Rc<RefCell<Option<GraphMount>>> = Rc::new(RefCell::new(None));

	let mounted_init = mounted.clone();
	Effect::new(move |_| {
		let data = GraphData {
			nodes: nodes.get(),
			links: links.get(),
		};
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		if let Some(previous) = mounted_init.borrow_mut().take() {
			previous.teardown();
		}
		let next = mount(canvas, data, theme.get_untracked(), height);
		*mounted_init.borrow_mut() = next;
	});

	let mounted_theme = mounted.clone();
	Effect::new(move |_| {
		let palette = theme.get().palette();
		with_view(&mounted_theme, |view| view.set_palette(palette));
	});

	let mounted_cleanup = SendWrapper::new(mounted.clone());
	on_cleanup(move || {
		if let Some(m) = mounted_cleanup.borrow_mut().take() {
			m.teardown();
		}
	});

	let mounted_md = mounted.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let point = pointer_position(&canvas, &ev);
		with_view(&mounted_md, |view| {
			view.pointer_down(point);
		});
	};

	let mounted_mm = mounted.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let point = pointer_position(&canvas, &ev);
		with_view(&mounted_mm, |view| {
			view.pointer_move(point);
		});
	};

	let mounted_mu = mounted.clone();
	let on_mouseup = move |_: MouseEvent| {
		with_view(&mounted_mu, GraphView::pointer_up);
	};

	let mounted_ml = mounted.clone();
	let on_mouseleave = move |_: MouseEvent| {
		with_view(&mounted_ml, GraphView::pointer_up);
	};

	view! {
		<div class="knowledge-graph" style=format!("width: 100%; height: {height}px;")>
			<canvas
				node_ref=canvas_ref
				class="knowledge-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				style="display: block; cursor: grab;"
			/>
		</div>
	}
}
