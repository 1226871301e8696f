//! Seasonal ambience component.
//!
//! Renders an ambient background tuned to the current solar term with:
//! - A 24-term calendar model with exact-date overrides and ±3-day
//!   boundary blending
//! - Typed particle fields (snow, petals, rain, leaves, embers, stars,
//!   sparkles, ice crystals, dust)
//! - Whole-frame environment effects (flare, heat haze, breathing glow,
//!   wave lines, fog, corner frost)
//! - Gusting wind, adaptive quality under load, and a two-canvas
//!   depth-of-field split
//!
//! # Example
//!
//! ```ignore
//! use sekki_ambience::SeasonalCanvas;
//!
//! view! { <SeasonalCanvas fullscreen=true /> }
//! ```

pub mod calendar;
mod component;
mod director;
mod environment;
mod particles;
mod rng;
pub mod style;

pub use calendar::{DateTable, Sekki, SekkiTransition};
pub use component::SeasonalCanvas;
pub use director::{Director, Tuning};
pub use style::SekkiStyle;
