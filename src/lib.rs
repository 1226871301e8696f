//! sekki-ambience: ambient seasonal backgrounds keyed to the 24 solar terms.
//!
//! This crate provides a WASM-based background component that picks the
//! current solar term (sekki), blends page styling across term
//! boundaries, and animates term-specific particles and environment
//! effects on a pair of layered canvases.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::seasonal::{DateTable, SeasonalCanvas, Sekki, SekkiStyle, SekkiTransition};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("sekki-ambience: logging initialized");
}

/// Load exact term dates from a script element with id="sekki-dates".
/// Expected format: JSON mapping year to { term name: "YYYY-MM-DD" }.
fn load_sekki_dates() -> Option<DateTable> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("sekki-dates")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match DateTable::from_json(&json_text) {
		Ok(table) => {
			info!("sekki-ambience: loaded page-provided term dates");
			Some(table)
		}
		Err(e) => {
			warn!("sekki-ambience: failed to parse term dates: {}", e);
			None
		}
	}
}

/// Main application component.
/// Renders the ambient background plus an overlay naming the current term.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let dates = load_sekki_dates();
	let table = dates.clone().unwrap_or_else(DateTable::builtin);
	let current = components::seasonal::calendar::current_sekki(js_sys::Date::now(), &table);

	view! {
		<Html attr:lang="ja" attr:dir="ltr" />
		<Title text="二十四節気 Seasonal Ambience" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<SeasonalCanvas dates=dates fullscreen=true />
		<div class="sekki-overlay">
			<h1>{current.name}</h1>
			<p class="reading">{current.reading}</p>
			<p class="description">{current.description}</p>
		</div>
	}
}
