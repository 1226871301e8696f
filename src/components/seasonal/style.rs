//! Colors and blended seasonal styling.
//!
//! Provides the RGBA color type used across the engine and the style
//! interpolator that blends the surrounding chrome (background gradient,
//! card border and shadow tones) between adjacent solar terms during a
//! transition window.

use super::calendar::{self, DateTable};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in [0, 1].
	pub a: f64,
}

impl Color {
	/// Opaque color from byte channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color from byte channels and an alpha fraction.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Fully transparent black, the fallback for malformed color strings.
	pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0.0);

	/// Same color with a different alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Linear interpolation in sRGB byte space. Channels round to the
	/// nearest integer; alpha interpolates as a float.
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (other.r as f64 - self.r as f64) * t).round() as u8,
			g: (self.g as f64 + (other.g as f64 - self.g as f64) * t).round() as u8,
			b: (self.b as f64 + (other.b as f64 - self.b as f64) * t).round() as u8,
			a: self.a + (other.a - self.a) * t,
		}
	}

	/// CSS string: `#rrggbb` when opaque, `rgba(…)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			self.to_css_rgb()
		} else {
			format!(
				"rgba({},{},{},{})",
				self.r,
				self.g,
				self.b,
				format_alpha(self.a)
			)
		}
	}

	/// Hex `#rrggbb` string, discarding alpha.
	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// Format an alpha value to at most 3 decimals without trailing zeros.
fn format_alpha(a: f64) -> String {
	let s = format!("{:.3}", a);
	let trimmed = s.trim_end_matches('0').trim_end_matches('.');
	if trimmed.is_empty() {
		"0".to_string()
	} else {
		trimmed.to_string()
	}
}

/// Parses a CSS color string into a [`Color`].
///
/// Supports `#RGB`, `#RRGGBB`, and `rgb()`/`rgba()` functional notation.
/// Anything else degrades to transparent black so a bad config value dims
/// the visuals instead of stopping the render loop.
pub fn parse_color(color_str: &str) -> Color {
	let s = color_str.trim();
	if let Some(hex) = s.strip_prefix('#') {
		let expanded: String = if hex.len() == 3 {
			hex.chars().flat_map(|c| [c, c]).collect()
		} else {
			hex.to_string()
		};
		if expanded.len() != 6 {
			return Color::TRANSPARENT;
		}
		let parse2 = |range: std::ops::Range<usize>| u8::from_str_radix(&expanded[range], 16);
		match (parse2(0..2), parse2(2..4), parse2(4..6)) {
			(Ok(r), Ok(g), Ok(b)) => Color::rgb(r, g, b),
			_ => Color::TRANSPARENT,
		}
	} else if s.starts_with("rgb") {
		let nums: Vec<&str> = s
			.trim_start_matches("rgba(")
			.trim_start_matches("rgb(")
			.trim_end_matches(')')
			.split(',')
			.collect();
		if nums.len() < 3 {
			return Color::TRANSPARENT;
		}
		let channel = |i: usize| nums.get(i).and_then(|v| v.trim().parse::<u8>().ok());
		match (channel(0), channel(1), channel(2)) {
			(Some(r), Some(g), Some(b)) => {
				let a = nums
					.get(3)
					.and_then(|v| v.trim().parse::<f64>().ok())
					.unwrap_or(1.0);
				Color::rgba(r, g, b, a)
			}
			_ => Color::TRANSPARENT,
		}
	} else {
		Color::TRANSPARENT
	}
}

/// Blended CSS values for the chrome surrounding the canvas.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SekkiStyle {
	/// `linear-gradient(…)` background for the page.
	pub gradient_css: String,
	/// Card border color (rgba string).
	pub border_color: String,
	/// Card shadow color (rgba string).
	pub shadow_color: String,
}

fn gradient_css(c1: &str, c2: &str, angle: f64) -> String {
	format!("linear-gradient({}deg, {}, {})", angle.round() as i64, c1, c2)
}

/// Interpolated chrome style for the given instant.
///
/// Outside a transition window this reproduces the active term's raw
/// values verbatim. Inside, gradient endpoints lerp in sRGB byte space,
/// the gradient angle lerps and rounds to whole degrees, and border and
/// shadow rgba tuples lerp channel-wise with alpha kept to 3 decimals.
pub fn interpolated_style(now_ms: f64, table: &DateTable) -> SekkiStyle {
	let transition = calendar::transition(now_ms, table);
	let (current, next, progress) = (transition.current, transition.next, transition.progress);

	if progress <= 0.0 {
		let (c1, c2, angle) = current.gradient;
		return SekkiStyle {
			gradient_css: gradient_css(c1, c2, angle),
			border_color: current.border_color.to_string(),
			shadow_color: current.shadow_color.to_string(),
		};
	}
	if progress >= 1.0 {
		let (c1, c2, angle) = next.gradient;
		return SekkiStyle {
			gradient_css: gradient_css(c1, c2, angle),
			border_color: next.border_color.to_string(),
			shadow_color: next.shadow_color.to_string(),
		};
	}

	let c1 = parse_color(current.gradient.0)
		.lerp(parse_color(next.gradient.0), progress)
		.to_css_rgb();
	let c2 = parse_color(current.gradient.1)
		.lerp(parse_color(next.gradient.1), progress)
		.to_css_rgb();
	let angle = current.gradient.2 + (next.gradient.2 - current.gradient.2) * progress;

	let border = parse_color(current.border_color)
		.lerp(parse_color(next.border_color), progress)
		.to_css();
	let shadow = parse_color(current.shadow_color)
		.lerp(parse_color(next.shadow_color), progress)
		.to_css();

	SekkiStyle {
		gradient_css: gradient_css(&c1, &c2, angle),
		border_color: border,
		shadow_color: shadow,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::seasonal::calendar::civil_to_ms;

	#[test]
	fn lerp_is_identity_at_endpoints() {
		let a = Color::rgb(0x8b, 0x9d, 0xc3);
		let b = Color::rgba(26, 32, 64, 0.15);
		assert_eq!(a.lerp(b, 0.0), a);
		assert_eq!(a.lerp(b, 1.0), b);
	}

	#[test]
	fn lerp_rounds_channels() {
		let a = Color::rgb(0, 0, 0);
		let b = Color::rgb(255, 255, 255);
		let mid = a.lerp(b, 0.5);
		assert_eq!((mid.r, mid.g, mid.b), (128, 128, 128));
	}

	#[test]
	fn parses_short_hex_by_expansion() {
		assert_eq!(parse_color("#fa0"), Color::rgb(0xff, 0xaa, 0x00));
		assert_eq!(parse_color("#ffaa00"), Color::rgb(0xff, 0xaa, 0x00));
	}

	#[test]
	fn parses_rgba_tuple() {
		let c = parse_color("rgba(255,182,193,0.15)");
		assert_eq!(c, Color::rgba(255, 182, 193, 0.15));
		let opaque = parse_color("rgb(12, 34, 56)");
		assert_eq!(opaque, Color::rgba(12, 34, 56, 1.0));
	}

	#[test]
	fn malformed_colors_become_transparent_black() {
		assert_eq!(parse_color("tomato"), Color::TRANSPARENT);
		assert_eq!(parse_color("#zzz"), Color::TRANSPARENT);
		assert_eq!(parse_color("rgba(nope)"), Color::TRANSPARENT);
	}

	#[test]
	fn alpha_formats_without_trailing_zeros() {
		assert_eq!(format_alpha(0.15), "0.15");
		assert_eq!(format_alpha(0.2), "0.2");
		assert_eq!(format_alpha(0.125), "0.125");
		assert_eq!(format_alpha(0.0), "0");
	}

	#[test]
	fn style_reproduces_raw_values_outside_windows() {
		let table = DateTable::builtin();
		// Mid-May 2025: deep inside 立夏, far from both boundaries.
		let now = civil_to_ms(2025, 5, 10);
		let style = interpolated_style(now, &table);
		assert_eq!(
			style.gradient_css,
			"linear-gradient(140deg, #A0D8D0, #B8E8E0)"
		);
		assert_eq!(style.border_color, "rgba(160,216,208,0.15)");
		assert_eq!(style.shadow_color, "rgba(184,232,224,0.25)");
	}

	#[test]
	fn style_blends_halfway_at_a_boundary() {
		let table = DateTable::builtin();
		// 立夏 2025 starts May 5; exactly at the boundary progress is 0.5.
		let now = civil_to_ms(2025, 5, 5);
		let t = calendar::transition(now, &table);
		assert!((t.progress - 0.5).abs() < 1e-9);
		let style = interpolated_style(now, &table);
		// Blend of 穀雨 #A8D8A8/#C8E8B8 @150 and 立夏 #A0D8D0/#B8E8E0 @140.
		assert_eq!(
			style.gradient_css,
			"linear-gradient(145deg, #a4d8bc, #c0e8cc)"
		);
	}
}
