use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::KnowledgeGraphState;

const LABEL_FONT: &str = "10px sans-serif";
const NODE_FILL_ALPHA: f64 = 0.8;
const NODE_STROKE_WIDTH: f64 = 1.5;
const LABEL_GAP: f64 = 5.0;

pub fn render(state: &KnowledgeGraphState, ctx: &CanvasRenderingContext2d) {
	let viewport = state.sim.viewport();
	ctx.set_global_alpha(1.0);
	ctx.set_fill_style_str(state.palette.background);
	ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);

	if state.sim.is_empty() {
		return;
	}
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	draw_pulses(state, ctx);
	ctx.set_global_alpha(1.0);
}

fn draw_links(state: &KnowledgeGraphState, ctx: &CanvasRenderingContext2d) {
	let nodes = state.sim.nodes();
	ctx.set_stroke_style_str(state.palette.link_stroke);

	for link in state.sim.links() {
		let (a, b) = (nodes[link.source].position, nodes[link.target].position);
		ctx.set_global_alpha(link.strength);
		ctx.set_line_width(1.0 + link.strength);
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
}

fn draw_nodes(state: &KnowledgeGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font(LABEL_FONT);
	ctx.set_text_align("center");

	for (node, info) in state.sim.nodes().iter().zip(&state.nodes) {
		let (x, y) = (node.position.x, node.position.y);
		let color = state.palette.category_color(info.category);

		ctx.begin_path();
		let _ = ctx.arc(x, y, node.radius, 0.0, 2.0 * PI);
		ctx.set_global_alpha(NODE_FILL_ALPHA);
		ctx.set_fill_style_str(color);
		ctx.fill();

		ctx.set_global_alpha(1.0);
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(NODE_STROKE_WIDTH);
		ctx.stroke();

		ctx.set_fill_style_str(state.palette.label_fill);
		let _ = ctx.fill_text(&info.label, x, y - node.radius - LABEL_GAP);
	}
}

fn draw_pulses(state: &KnowledgeGraphState, ctx: &CanvasRenderingContext2d) {
	let config = state.pulses.config();
	let nodes = state.sim.nodes();
	ctx.set_line_width(1.0);

	for ring in state.pulses.rings() {
		let (Some(node), Some(info)) = (nodes.get(ring.node), state.nodes.get(ring.node)) else {
			continue;
		};
		ctx.set_global_alpha(ring.opacity(config));
		ctx.set_stroke_style_str(state.palette.category_color(info.category));
		ctx.begin_path();
		let _ = ctx.arc(
			node.position.x,
			node.position.y,
			ring.radius(config),
			0.0,
			2.0 * PI,
		);
		ctx.stroke();
	}
}
