use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::ForceGraphState;

const LINK_COLOR: &str = "#aaa";
const LINK_WIDTH: f64 = 1.0;

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_links(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(LINK_COLOR);
	ctx.set_line_width(LINK_WIDTH);
	for &(source, target) in state.links() {
		let (x1, y1) = state.sim.position(source);
		let (x2, y2) = state.sim.position(target);
		ctx.set_global_alpha(state.link_alpha(source, target));
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	for (idx, meta) in state.meta().iter().enumerate() {
		let (x, y) = state.sim.position(idx);
		ctx.set_global_alpha(state.node_alpha(idx));
		ctx.begin_path();
		let _ = ctx.arc(x, y, meta.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(meta.color);
		ctx.fill();
	}
	ctx.set_global_alpha(1.0);
}
