use std::cell::RefCell;
use std::rc::Rc;

use leptos::callback::UnsyncCallback;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::render;
use super::state::{DragPhase, ForceGraphState};
use super::types::NetworkData;
use crate::components::controls::ControlPanel;

/// Fixed drawing surface, centered on the page.
pub const CANVAS_WIDTH: f64 = 800.0;
pub const CANVAS_HEIGHT: f64 = 600.0;

const TOOLTIP_OFFSET_Y: f64 = 28.0;

#[derive(Clone, Debug, PartialEq)]
struct TooltipInfo {
	author: String,
	affiliation: String,
	x: f64,
	y: f64,
}

/// Canvas visualization of the collaboration network: dragging pins a
/// node to the pointer, hovering shows a tooltip and dims unrelated
/// authors, and the slider panel feeds the force parameters live.
#[component]
pub fn AuthorGraphCanvas(#[prop(into)] data: Signal<NetworkData>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ForceGraphState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let tooltip = RwSignal::new(None::<TooltipInfo>);

	let (state_init, animate_init) = (state.clone(), animate.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(CANVAS_WIDTH as u32);
		canvas.set_height(CANVAS_HEIGHT as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		*state_init.borrow_mut() = Some(ForceGraphState::new(
			&data.get(),
			CANVAS_WIDTH,
			CANVAS_HEIGHT,
		));

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick();
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = web_sys::window()
				.unwrap()
				.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			if s.drag_start(x, y) {
				s.set_hover(None);
				tooltip.set(None);
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if let DragPhase::Dragging { .. } = s.drag {
				s.drag_move(x, y);
				return;
			}
			let hovered = s.node_at_position(x, y);
			s.set_hover(hovered);
			tooltip.set(s.hovered_meta().map(|meta| TooltipInfo {
				author: meta.id.clone(),
				affiliation: meta
					.affiliation
					.clone()
					.unwrap_or_else(|| "N/A".to_owned()),
				x: ev.page_x() as f64,
				y: ev.page_y() as f64 - TOOLTIP_OFFSET_Y,
			}));
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.drag_end();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.drag_end();
			s.set_hover(None);
		}
		tooltip.set(None);
	};

	let state_charge = state.clone();
	let on_repulsion = UnsyncCallback::new(move |value: f64| {
		if let Some(ref mut s) = *state_charge.borrow_mut() {
			s.set_repulsion_strength(value);
		}
	});
	let state_collide = state.clone();
	let on_collide_radius = UnsyncCallback::new(move |value: f64| {
		if let Some(ref mut s) = *state_collide.borrow_mut() {
			s.set_collide_radius(value);
		}
	});
	let state_link = state.clone();
	let on_link_strength = UnsyncCallback::new(move |value: f64| {
		if let Some(ref mut s) = *state_link.borrow_mut() {
			s.set_link_strength(value);
		}
	});

	view! {
		<div class="graph-panel">
			<canvas
				node_ref=canvas_ref
				class="graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
			/>
			<ControlPanel
				on_repulsion=on_repulsion
				on_collide_radius=on_collide_radius
				on_link_strength=on_link_strength
			/>
			{move || {
				tooltip
					.get()
					.map(|tip| {
						view! {
							<div
								class="graph-tooltip"
								style:left=format!("{}px", tip.x)
								style:top=format!("{}px", tip.y)
							>
								{format!("Author: {}", tip.author)}
								<br />
								{format!("Affiliation: {}", tip.affiliation)}
							</div>
						}
					})
			}}
		</div>
	}
}
