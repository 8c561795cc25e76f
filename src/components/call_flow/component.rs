//! Leptos component wrapping the call-flow canvas.
//!
//! The component creates an HTML canvas element and wires up pointer, wheel
//! and keyboard handlers to the [`CallFlowView`](super::view::CallFlowView)
//! session. Clicking a node toggles focus on it; Escape or a double-click on
//! the background leaves focus. An animation loop runs via
//! `requestAnimationFrame` and redraws every frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent, Window,
};

use super::focus::FocusTransition;
use super::layout::LayoutConfig;
use super::render;
use super::state::CanvasState;
use super::theme::Theme;
use super::types::GraphLoadResult;
use super::view::ViewSummary;

/// Bundles canvas state with its visual theme.
struct GraphContext {
	state: CanvasState,
	theme: Theme,
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn pointer_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders an interactive call-flow graph on a canvas element.
///
/// Pass the load result via the reactive `data` signal; every change reloads
/// the session and drops any focus. `on_change` receives a [`ViewSummary`]
/// after loads and focus transitions so side panels can follow along. The
/// component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and resize with the window.
#[component]
pub fn CallFlowCanvas(
	#[prop(into)] data: Signal<GraphLoadResult>,
	#[prop(optional)] layout: Option<LayoutConfig>,
	#[prop(optional, into)] on_change: Option<Callback<ViewSummary>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let keydown_cb: Rc<RefCell<Option<Closure<dyn FnMut(KeyboardEvent)>>>> =
		Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init, keydown_cb_init) = (
		context.clone(),
		animate.clone(),
		resize_cb.clone(),
		keydown_cb.clone(),
	);
	let layout = layout.unwrap_or_default();

	let notify = move |summary: ViewSummary| {
		if let Some(cb) = on_change {
			cb.run(summary);
		}
	};

	let context_load = context.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context_init.borrow().is_none() {
			let canvas: HtmlCanvasElement = canvas.into();
			let Some(window) = web_sys::window() else {
				return;
			};

			let (w, h) = if fullscreen {
				window_size(&window).unwrap_or((800.0, 600.0))
			} else {
				(
					width.unwrap_or_else(|| {
						canvas
							.parent_element()
							.map(|p| p.client_width() as f64)
							.unwrap_or(800.0)
					}),
					height.unwrap_or_else(|| {
						canvas
							.parent_element()
							.map(|p| p.client_height() as f64)
							.unwrap_or(600.0)
					}),
				)
			};
			canvas.set_width(w as u32);
			canvas.set_height(h as u32);

			let Some(ctx) = context_2d(&canvas) else {
				warn!("call-flow: canvas has no 2d context");
				return;
			};

			*context_init.borrow_mut() = Some(GraphContext {
				state: CanvasState::new(layout.clone(), w, h),
				theme: Theme::default(),
			});

			if fullscreen {
				let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
				*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
					let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
						return;
					};
					canvas_resize.set_width(nw as u32);
					canvas_resize.set_height(nh as u32);
					if let Some(ref mut c) = *context_resize.borrow_mut() {
						c.state.resize(nw, nh);
					}
				}));
				if let Some(ref cb) = *resize_cb_init.borrow() {
					let _ =
						window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
			}

			let context_key = context_init.clone();
			*keydown_cb_init.borrow_mut() = Some(Closure::new(move |ev: KeyboardEvent| {
				if ev.key() != "Escape" {
					return;
				}
				let summary = {
					let mut guard = context_key.borrow_mut();
					let Some(c) = guard.as_mut() else {
						return;
					};
					if c.state.view.on_focus_exit_requested() == FocusTransition::Unchanged {
						return;
					}
					c.state.fit_view(&c.theme);
					c.state.view.summary()
				};
				notify(summary);
			}));
			if let Some(ref cb) = *keydown_cb_init.borrow() {
				let _ = window.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
			}

			let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
			*animate_init.borrow_mut() = Some(Closure::new(move || {
				if let Some(ref c) = *context_anim.borrow() {
					render::render(&c.state, &ctx, &c.theme);
				}
				if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}));
			if let Some(ref cb) = *animate_init.borrow() {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}

		let raw = data.get();
		let summary = {
			let mut guard = context_load.borrow_mut();
			let Some(c) = guard.as_mut() else {
				return;
			};
			c.state.view.on_graph_loaded(raw);
			c.state.fit_view(&c.theme);
			c.state.view.summary()
		};
		notify(summary);
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.begin_pan(x, y);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.state.pan.active {
				c.state.update_pan(x, y);
			} else {
				c.state.hover_at(x, y, &c.theme);
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let summary = {
			let mut guard = context_mu.borrow_mut();
			let Some(c) = guard.as_mut() else {
				return;
			};
			if !c.state.end_pan() {
				return;
			}
			let Some(id) = c.state.node_at_position(x, y, &c.theme).map(|p| p.id().to_owned())
			else {
				return;
			};
			c.state.view.on_node_selected(&id);
			c.state.fit_view(&c.theme);
			c.state.hover_at(x, y, &c.theme);
			c.state.view.summary()
		};
		notify(summary);
	};

	let context_dbl = context.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let summary = {
			let mut guard = context_dbl.borrow_mut();
			let Some(c) = guard.as_mut() else {
				return;
			};
			if c.state.node_at_position(x, y, &c.theme).is_some()
				|| c.state.view.on_focus_exit_requested() == FocusTransition::Unchanged
			{
				return;
			}
			c.state.fit_view(&c.theme);
			c.state.view.summary()
		};
		notify(summary);
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.end_pan();
			c.state.view.on_node_hover_leave();
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			c.state.zoom_at(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="call-flow-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:dblclick=on_dblclick
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
