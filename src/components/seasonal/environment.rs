//! Whole-frame environment effects: light flare, heat haze, breathing
//! glow, wave lines, drifting fog, and corner frost growth.
//!
//! Each effect is a config struct with defaults plus a draw routine over
//! canvas, clock, and viewport. Stateful effects (fog) live on
//! [`Environment`] so the component owns them instead of module globals.
//! Phase math is factored into pure helpers where the behavior is worth
//! pinning in tests.

use web_sys::CanvasRenderingContext2d;

use super::rng::Rng;
use super::style::Color;

/// Sweeping light flare (spring equinox, white dew).
#[derive(Clone, Copy, Debug)]
pub struct FlareConfig {
	/// Peak alpha of the flare core.
	pub intensity: f64,
	/// Core radius in px.
	pub glow: f64,
	/// Full sweep cycle in ms; the flare is visible for the first 60%.
	pub period_ms: f64,
	/// Flare tint.
	pub color: Color,
}

impl Default for FlareConfig {
	fn default() -> Self {
		FlareConfig {
			intensity: 0.4,
			glow: 80.0,
			period_ms: 12_000.0,
			color: Color::rgb(255, 250, 235),
		}
	}
}

/// Phase of the flare sweep: `Some((x_fraction, alpha_scale))` while the
/// flare is in its active window, `None` during the rest of the cycle.
pub fn flare_phase(time_ms: f64, period_ms: f64) -> Option<(f64, f64)> {
	let t = (time_ms / period_ms).rem_euclid(1.0);
	if t >= 0.6 {
		return None;
	}
	let progress = t / 0.6;
	// Ease across the frame, fade in and out with a half sine.
	let x = -0.2 + 1.4 * progress;
	let alpha = (std::f64::consts::PI * progress).sin();
	Some((x, alpha))
}

/// Draw the flare sweep across the upper frame.
pub fn draw_flare(ctx: &CanvasRenderingContext2d, width: f64, height: f64, time_ms: f64, cfg: &FlareConfig) {
	let Some((xf, alpha)) = flare_phase(time_ms, cfg.period_ms) else {
		return;
	};
	let x = xf * width;
	let y = height * 0.25;
	let r = cfg.glow * 2.5;
	let gradient = ctx
		.create_radial_gradient(x, y, 0.0, x, y, r)
		.unwrap();
	let core = cfg.color.with_alpha(cfg.intensity * alpha);
	gradient.add_color_stop(0.0, &core.to_css()).unwrap();
	gradient
		.add_color_stop(1.0, &cfg.color.with_alpha(0.0).to_css())
		.unwrap();
	ctx.set_fill_style_canvas_gradient(&gradient);
	ctx.fill_rect(x - r, y - r, r * 2.0, r * 2.0);
}

/// Shimmering heat blobs along the lower screen band.
#[derive(Clone, Copy, Debug)]
pub struct HeatHazeConfig {
	/// Overall haze strength.
	pub intensity: f64,
	/// Shimmer speed multiplier.
	pub speed: f64,
	/// Spatial frequency of the blob row.
	pub frequency: f64,
	/// Radius wobble in px.
	pub amplitude: f64,
	/// Haze tint.
	pub color: Color,
}

impl Default for HeatHazeConfig {
	fn default() -> Self {
		HeatHazeConfig {
			intensity: 0.5,
			speed: 0.8,
			frequency: 0.03,
			amplitude: 8.0,
			color: Color::rgb(255, 200, 120),
		}
	}
}

/// Draw the haze band: a row of soft radial blobs whose radius and alpha
/// shimmer out of phase with each other.
pub fn draw_heat_haze(ctx: &CanvasRenderingContext2d, width: f64, height: f64, time_ms: f64, cfg: &HeatHazeConfig) {
	let t = time_ms * 0.001 * cfg.speed;
	let count = ((width * cfg.frequency).round() as usize).clamp(4, 24);
	for i in 0..count {
		let fx = (i as f64 + 0.5) / count as f64;
		let phase = t * 2.0 + fx * 11.0;
		let x = fx * width;
		let y = height * (0.78 + 0.06 * (phase * 0.6).sin());
		let r = (height * 0.12 + cfg.amplitude * phase.sin()).max(4.0);
		let alpha = cfg.intensity * 0.12 * (0.6 + 0.4 * (phase * 1.3).cos());
		let gradient = ctx.create_radial_gradient(x, y, 0.0, x, y, r).unwrap();
		gradient
			.add_color_stop(0.0, &cfg.color.with_alpha(alpha).to_css())
			.unwrap();
		gradient
			.add_color_stop(1.0, &cfg.color.with_alpha(0.0).to_css())
			.unwrap();
		ctx.set_fill_style_canvas_gradient(&gradient);
		ctx.fill_rect(x - r, y - r, r * 2.0, r * 2.0);
	}
}

/// Full-screen radial glow breathing on a slow cycle.
#[derive(Clone, Copy, Debug)]
pub struct BreathConfig {
	/// Peak glow strength.
	pub intensity: f64,
	/// Full breath cycle, ms.
	pub period_ms: f64,
	/// Glow tint.
	pub color: Color,
}

impl Default for BreathConfig {
	fn default() -> Self {
		BreathConfig {
			intensity: 0.3,
			period_ms: 4000.0,
			color: Color::rgb(200, 200, 220),
		}
	}
}

/// Breathing envelope in [0, 1] for a point in the cycle.
pub fn breath_level(time_ms: f64, period_ms: f64) -> f64 {
	0.5 + 0.5 * (std::f64::consts::TAU * time_ms / period_ms).sin()
}

/// Draw the breathing glow.
pub fn draw_breath(ctx: &CanvasRenderingContext2d, width: f64, height: f64, time_ms: f64, cfg: &BreathConfig) {
	let level = breath_level(time_ms, cfg.period_ms);
	let alpha = cfg.intensity * 0.4 * level;
	let cx = width * 0.5;
	let cy = height * 0.55;
	let r = width.max(height) * (0.55 + 0.05 * level);
	let gradient = ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, r).unwrap();
	gradient
		.add_color_stop(0.0, &cfg.color.with_alpha(alpha).to_css())
		.unwrap();
	gradient
		.add_color_stop(1.0, &cfg.color.with_alpha(0.0).to_css())
		.unwrap();
	ctx.set_fill_style_canvas_gradient(&gradient);
	ctx.fill_rect(0.0, 0.0, width, height);
}

/// Horizontal sine strokes drifting across the frame.
#[derive(Clone, Copy, Debug)]
pub struct WaveLinesConfig {
	/// Number of stacked lines.
	pub lines: usize,
	/// Spatial frequency along x.
	pub frequency: f64,
	/// Primary sine amplitude, px.
	pub amplitude: f64,
	/// Phase speed multiplier.
	pub speed: f64,
	/// Alpha range [min, max]; lines deeper in the stack are fainter.
	pub opacity: (f64, f64),
	/// Stroke color.
	pub color: Color,
}

impl Default for WaveLinesConfig {
	fn default() -> Self {
		WaveLinesConfig {
			lines: 4,
			frequency: 0.02,
			amplitude: 18.0,
			speed: 1.0,
			opacity: (0.1, 0.3),
			color: Color::rgb(255, 255, 255),
		}
	}
}

/// Vertical displacement of a wave line at horizontal position `x`:
/// two sines at related frequencies so the line reads as water, not math.
pub fn wave_offset(x: f64, t: f64, frequency: f64, amplitude: f64) -> f64 {
	(x * frequency + t).sin() * amplitude + (x * frequency * 1.7 + t * 1.3).sin() * amplitude * 0.5
}

/// Draw the wave line stack across the middle band of the frame.
pub fn draw_wave_lines(ctx: &CanvasRenderingContext2d, width: f64, height: f64, time_ms: f64, cfg: &WaveLinesConfig) {
	let t = time_ms * 0.001 * cfg.speed;
	let lines = cfg.lines.max(1);
	for i in 0..lines {
		let frac = i as f64 / lines as f64;
		let base_y = height * (0.35 + 0.4 * frac);
		let alpha = cfg.opacity.1 - (cfg.opacity.1 - cfg.opacity.0) * frac;
		ctx.set_stroke_style_str(&cfg.color.with_alpha(alpha).to_css());
		ctx.set_line_width(1.5);
		ctx.begin_path();
		let mut x = 0.0;
		ctx.move_to(0.0, base_y + wave_offset(0.0, t + frac * 2.0, cfg.frequency, cfg.amplitude));
		while x <= width {
			x += 8.0;
			ctx.line_to(x, base_y + wave_offset(x, t + frac * 2.0, cfg.frequency, cfg.amplitude));
		}
		ctx.stroke();
	}
}

/// Drifting low fog.
#[derive(Clone, Copy, Debug)]
pub struct FogConfig {
	/// Blob count in the field.
	pub blobs: usize,
	/// Peak blob alpha.
	pub intensity: f64,
	/// Horizontal drift in px/frame.
	pub speed: f64,
	/// Fog tint.
	pub color: Color,
}

impl Default for FogConfig {
	fn default() -> Self {
		FogConfig {
			blobs: 6,
			intensity: 0.25,
			speed: 0.15,
			color: Color::rgb(216, 200, 184),
		}
	}
}

/// One fog blob; lives on [`Environment`].
#[derive(Clone, Copy, Debug)]
pub struct FogBlob {
	/// Center x, px.
	pub x: f64,
	/// Resting center y, px; the blob bobs around this line.
	pub y: f64,
	/// Gradient radius, px.
	pub radius: f64,
	/// Drift speed, px/frame.
	pub vx: f64,
	/// Peak alpha at the blob center.
	pub alpha: f64,
	/// Bob phase, advanced per frame.
	pub phase: f64,
}

impl FogBlob {
	fn spawn(width: f64, height: f64, cfg: &FogConfig, rng: &mut Rng) -> Self {
		FogBlob {
			x: rng.range(-0.2 * width, 1.2 * width),
			y: rng.range(height * 0.55, height * 0.95),
			radius: rng.range(height * 0.1, height * 0.25),
			vx: cfg.speed * rng.range(0.4, 1.6),
			alpha: cfg.intensity * rng.range(0.4, 1.0),
			phase: rng.range(0.0, std::f64::consts::TAU),
		}
	}

	/// Drift right with a slow vertical bob, wrapping off the right edge
	/// back to the left.
	fn step(&mut self, dt: f64, width: f64) {
		self.x += self.vx * dt;
		self.phase += 0.004 * dt;
		if self.x - self.radius > width * 1.2 {
			self.x = -self.radius - width * 0.2;
		}
	}

	/// Current center y including the bob.
	pub fn bob_y(&self) -> f64 {
		self.y + self.phase.sin() * self.radius * 0.1
	}
}

/// Corner frost fractals.
#[derive(Clone, Copy, Debug)]
pub struct CrystalGrowthConfig {
	/// Full grow-hold-melt cycle in ms.
	pub cycle_ms: f64,
	/// Portion of the cycle spent growing, in ms.
	pub grow_ms: f64,
	/// Main branch length in px.
	pub branch_len: f64,
	/// Stroke alpha at full visibility.
	pub intensity: f64,
	/// Frost stroke color.
	pub color: Color,
}

impl Default for CrystalGrowthConfig {
	fn default() -> Self {
		CrystalGrowthConfig {
			cycle_ms: 30_000.0,
			grow_ms: 20_000.0,
			branch_len: 90.0,
			intensity: 0.5,
			color: Color::rgb(216, 232, 248),
		}
	}
}

/// Growth and fade envelope for a point in the frost cycle:
/// `(growth in [0,1], alpha_scale in [0,1])`. Growth saturates at
/// `grow_ms`, then the whole figure fades over the tail of the cycle.
pub fn crystal_phase(time_ms: f64, cfg: &CrystalGrowthConfig) -> (f64, f64) {
	let t = time_ms.rem_euclid(cfg.cycle_ms);
	let growth = (t / cfg.grow_ms).min(1.0);
	let fade_span = cfg.cycle_ms - cfg.grow_ms;
	let alpha = if t <= cfg.grow_ms || fade_span <= 0.0 {
		1.0
	} else {
		1.0 - (t - cfg.grow_ms) / fade_span
	};
	(growth, alpha)
}

fn draw_frost_branch(
	ctx: &CanvasRenderingContext2d,
	x: f64,
	y: f64,
	angle: f64,
	length: f64,
	level: u32,
	growth: f64,
) {
	if level == 0 || length < 2.0 {
		return;
	}
	// Each recursion level only appears once growth has reached it.
	let reveal = (growth * 4.0 - (4 - level) as f64).clamp(0.0, 1.0);
	if reveal <= 0.0 {
		return;
	}
	let ex = x + angle.cos() * length * reveal;
	let ey = y + angle.sin() * length * reveal;
	ctx.begin_path();
	ctx.move_to(x, y);
	ctx.line_to(ex, ey);
	ctx.stroke();
	if reveal >= 1.0 {
		for side in [-0.5, 0.5] {
			draw_frost_branch(ctx, ex, ey, angle + side, length * 0.55, level - 1, growth);
		}
	}
}

/// Draw frost growing inward from all four corners.
pub fn draw_crystal_growth(ctx: &CanvasRenderingContext2d, width: f64, height: f64, time_ms: f64, cfg: &CrystalGrowthConfig) {
	let (growth, fade) = crystal_phase(time_ms, cfg);
	if growth <= 0.0 || fade <= 0.0 {
		return;
	}
	ctx.save();
	ctx.set_stroke_style_str(&cfg.color.with_alpha(cfg.intensity * fade).to_css());
	ctx.set_line_width(1.0);
	let corners = [
		(0.0, 0.0, std::f64::consts::FRAC_PI_4),
		(width, 0.0, 3.0 * std::f64::consts::FRAC_PI_4),
		(0.0, height, -std::f64::consts::FRAC_PI_4),
		(width, height, -3.0 * std::f64::consts::FRAC_PI_4),
	];
	for (cx, cy, base) in corners {
		for spread in [-0.35, 0.0, 0.35] {
			draw_frost_branch(ctx, cx, cy, base + spread, cfg.branch_len, 4, growth);
		}
	}
	ctx.restore();
}

/// Stateful environment effects owned by one canvas instance.
#[derive(Debug, Default)]
pub struct Environment {
	fog_blobs: Vec<FogBlob>,
}

impl Environment {
	/// Drop accumulated state, used when the period changes.
	pub fn clear(&mut self) {
		self.fog_blobs.clear();
	}

	/// Step the fog field and return the blobs to draw. The pool is
	/// (re)seeded lazily so a resize or config change self-heals.
	pub fn step_fog(&mut self, dt: f64, width: f64, height: f64, cfg: &FogConfig, rng: &mut Rng) -> &[FogBlob] {
		if self.fog_blobs.len() != cfg.blobs {
			self.fog_blobs = (0..cfg.blobs)
				.map(|_| FogBlob::spawn(width, height, cfg, rng))
				.collect();
		}
		for blob in &mut self.fog_blobs {
			blob.step(dt, width);
		}
		&self.fog_blobs
	}

	/// Step and draw the fog field.
	pub fn draw_fog(
		&mut self,
		ctx: &CanvasRenderingContext2d,
		dt: f64,
		width: f64,
		height: f64,
		cfg: &FogConfig,
		rng: &mut Rng,
	) {
		let color = cfg.color;
		for blob in self.step_fog(dt, width, height, cfg, rng) {
			let y = blob.bob_y();
			let gradient = ctx
				.create_radial_gradient(blob.x, y, 0.0, blob.x, y, blob.radius)
				.unwrap();
			gradient
				.add_color_stop(0.0, &color.with_alpha(blob.alpha).to_css())
				.unwrap();
			gradient
				.add_color_stop(1.0, &color.with_alpha(0.0).to_css())
				.unwrap();
			ctx.set_fill_style_canvas_gradient(&gradient);
			ctx.fill_rect(
				blob.x - blob.radius,
				y - blob.radius,
				blob.radius * 2.0,
				blob.radius * 2.0,
			);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn flare_active_then_dark() {
		let period = 10_000.0;
		assert!(flare_phase(0.0, period).is_some());
		assert!(flare_phase(3000.0, period).is_some());
		assert!(flare_phase(6000.0, period).is_none());
		assert!(flare_phase(9999.0, period).is_none());
		// Next cycle starts over.
		assert!(flare_phase(10_500.0, period).is_some());
	}

	#[test]
	fn flare_sweeps_left_to_right_and_fades_at_edges() {
		let period = 10_000.0;
		let (x0, a0) = flare_phase(1.0, period).unwrap();
		let (x1, _) = flare_phase(3000.0, period).unwrap();
		let (_, a_end) = flare_phase(5999.0, period).unwrap();
		assert!(x0 < x1);
		assert!(a0 < 0.01 && a_end < 0.01);
	}

	#[test]
	fn breath_level_spans_its_range() {
		let period = 4000.0;
		let (mut lo, mut hi) = (f64::MAX, f64::MIN);
		for i in 0..100 {
			let l = breath_level(f64::from(i) * 40.0, period);
			assert!((0.0..=1.0).contains(&l));
			lo = lo.min(l);
			hi = hi.max(l);
		}
		assert!(lo < 0.05 && hi > 0.95);
	}

	#[test]
	fn wave_offset_is_bounded_by_its_amplitudes() {
		let amp = 20.0;
		for i in 0..500 {
			let off = wave_offset(f64::from(i) * 3.0, 1.7, 0.02, amp);
			assert!(off.abs() <= amp * 1.5);
		}
	}

	#[test]
	fn crystal_grows_then_fades() {
		let cfg = CrystalGrowthConfig::default();
		let (g0, a0) = crystal_phase(0.0, &cfg);
		assert!(g0 < 0.01 && (a0 - 1.0).abs() < 1e-12);
		let (g_mid, a_mid) = crystal_phase(cfg.grow_ms, &cfg);
		assert_eq!(g_mid, 1.0);
		assert_eq!(a_mid, 1.0);
		let (g_late, a_late) = crystal_phase(cfg.grow_ms + (cfg.cycle_ms - cfg.grow_ms) * 0.5, &cfg);
		assert_eq!(g_late, 1.0);
		assert!((a_late - 0.5).abs() < 1e-9);
		// The next cycle restarts from nothing.
		let (g_next, _) = crystal_phase(cfg.cycle_ms + 1.0, &cfg);
		assert!(g_next < 0.01);
	}

	#[test]
	fn fog_pool_fills_steps_and_wraps() {
		let mut env = Environment::default();
		let mut rng = Rng::new(99);
		let cfg = FogConfig::default();
		let blobs = env.step_fog(1.0, 800.0, 600.0, &cfg, &mut rng);
		assert_eq!(blobs.len(), cfg.blobs);
		assert!(blobs.iter().all(|b| b.vx > 0.0));

		// Push one blob past the right edge and confirm it wraps.
		env.fog_blobs[0].x = 800.0 * 1.2 + env.fog_blobs[0].radius + 1.0;
		env.step_fog(1.0, 800.0, 600.0, &cfg, &mut rng);
		assert!(env.fog_blobs[0].x < 0.0);

		env.clear();
		assert!(env.fog_blobs.is_empty());
	}
}
