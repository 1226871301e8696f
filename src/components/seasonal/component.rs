//! Leptos component wrapping the seasonal ambience canvases.
//!
//! The component stacks two canvas elements: the background canvas carries
//! environment effects and distant particles, the foreground canvas
//! carries near particles behind a CSS blur. An animation loop runs via
//! `requestAnimationFrame`, advancing the director and repainting each
//! frame, and mirrors the computed page style into CSS custom properties
//! on the document root.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, Window};

use super::calendar::DateTable;
use super::director::{Director, Tuning};
use super::style::SekkiStyle;

/// Bundles the director with the two render contexts and viewport size.
struct SceneContext {
	director: Director,
	bg: CanvasRenderingContext2d,
	fg: CanvasRenderingContext2d,
	width: f64,
	height: f64,
}

fn context_2d(canvas: &HtmlCanvasElement) -> CanvasRenderingContext2d {
	canvas
		.get_context("2d")
		.unwrap()
		.unwrap()
		.dyn_into()
		.unwrap()
}

fn size_canvas(canvas: &HtmlCanvasElement, w: f64, h: f64) {
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
}

/// Push the computed page style into CSS custom properties on `:root`,
/// where the page background and any themed chrome pick them up.
fn apply_style(style: &SekkiStyle) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let Some(document) = window.document() else {
		return;
	};
	let Some(root) = document.document_element() else {
		return;
	};
	let Ok(root) = root.dyn_into::<HtmlElement>() else {
		return;
	};
	let css = root.style();
	let _ = css.set_property("--sekki-bg", &style.gradient_css);
	let _ = css.set_property("--sekki-border-color", &style.border_color);
	let _ = css.set_property("--sekki-shadow-color", &style.shadow_color);
}

/// Renders the ambient seasonal background for the current solar term.
///
/// The component fills the viewport by default and resizes with the
/// window; explicit `width`/`height` pin it instead. Exact term start
/// dates come from `dates` when given, falling back to the embedded
/// table.
#[component]
pub fn SeasonalCanvas(
	#[prop(default = None)] dates: Option<DateTable>,
	#[prop(default = true)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let bg_ref = NodeRef::<leptos::html::Canvas>::new();
	let fg_ref = NodeRef::<leptos::html::Canvas>::new();
	let scene: Rc<RefCell<Option<SceneContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let raf_id: Rc<RefCell<Option<i32>>> = Rc::new(RefCell::new(None));
	let (scene_init, animate_init, resize_cb_init, raf_id_init) =
		(scene.clone(), animate.clone(), resize_cb.clone(), raf_id.clone());

	Effect::new(move |_| {
		let (Some(bg_canvas), Some(fg_canvas)) = (bg_ref.get(), fg_ref.get()) else {
			return;
		};
		let bg_canvas: HtmlCanvasElement = bg_canvas.into();
		let fg_canvas: HtmlCanvasElement = fg_canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					bg_canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					bg_canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		size_canvas(&bg_canvas, w, h);
		size_canvas(&fg_canvas, w, h);

		let bg = context_2d(&bg_canvas);
		let fg = context_2d(&fg_canvas);

		let table = dates.clone().unwrap_or_else(DateTable::builtin);
		*scene_init.borrow_mut() = Some(SceneContext {
			director: Director::new(Tuning::default(), table, js_sys::Date::now() as u64),
			bg,
			fg,
			width: w,
			height: h,
		});

		if fullscreen {
			let (scene_resize, bg_resize, fg_resize) =
				(scene_init.clone(), bg_canvas.clone(), fg_canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				size_canvas(&bg_resize, nw, nh);
				size_canvas(&fg_resize, nw, nh);
				if let Some(ref mut s) = *scene_resize.borrow_mut() {
					s.width = nw;
					s.height = nh;
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (scene_anim, animate_inner, raf_id_inner) =
			(scene_init.clone(), animate_init.clone(), raf_id_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let hidden = web_sys::window()
				.and_then(|w| w.document())
				.is_some_and(|d| d.hidden());
			if let Some(ref mut s) = *scene_anim.borrow_mut() {
				if hidden {
					// Skip work while hidden and keep the tab-stall gap
					// out of the frame timing.
					s.director.reset_baseline();
				} else {
					let now = js_sys::Date::now();
					let update = s.director.advance(now, now, s.width, s.height);
					if update.style_changed {
						apply_style(s.director.style());
					}
					s.director.render(&s.bg, &s.fg, s.width, s.height);
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				*raf_id_inner.borrow_mut() = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref())
					.ok();
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			*raf_id_init.borrow_mut() =
				window.request_animation_frame(cb.as_ref().unchecked_ref()).ok();
		}
	});

	// on_cleanup requires Send + Sync; these handles are browser-only, so
	// carry them through a SendWrapper.
	let cleanup_handles = send_wrapper::SendWrapper::new((raf_id, resize_cb, animate, scene));
	on_cleanup(move || {
		let (raf_id, resize_cb, animate, scene) = cleanup_handles.take();
		let window = web_sys::window();
		if let (Some(win), Some(id)) = (window.as_ref(), raf_id.borrow_mut().take()) {
			win.cancel_animation_frame(id).ok();
		}
		if let (Some(win), Some(cb)) = (window.as_ref(), resize_cb.borrow_mut().take()) {
			let _ =
				win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		// Break the closure's self-reference so it can actually drop.
		animate.borrow_mut().take();
		scene.borrow_mut().take();
	});

	view! {
		<div class="seasonal-background" style="position: fixed; inset: 0; z-index: -1; background: var(--sekki-bg); transition: background 1s ease;">
			<canvas
				node_ref=bg_ref
				class="seasonal-canvas-bg"
				style="position: absolute; inset: 0; display: block;"
			/>
			<canvas
				node_ref=fg_ref
				class="seasonal-canvas-fg"
				style="position: absolute; inset: 0; display: block; filter: blur(1.5px);"
			/>
		</div>
	}
}
