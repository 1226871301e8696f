//! Typed canvas particles.
//!
//! Every particle is spawned from a [`SpawnProfile`], stepped by [`update`]
//! in frame units (1.0 = one frame at 60 fps), and rasterized by [`draw`].
//! Update logic is pure over the particle, wind, and RNG, so the motion
//! rules are testable without a canvas.

use web_sys::CanvasRenderingContext2d;

use super::rng::Rng;

/// What a particle looks like and how it moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
	/// Soft white disc drifting down with sway.
	Snow,
	/// Rotating petal fluttering down.
	Petal,
	/// Fast thin streak.
	Rain,
	/// Large rotating leaf with a flutter in its fall speed.
	Leaf,
	/// Glowing mote rising and burning out.
	Ember,
	/// Fixed twinkling point with rare bright flashes.
	Star,
	/// Fixed four-pointed glint pulsing on a short cycle.
	Sparkle,
	/// Six-armed ice crystal that blooms and melts away.
	Crystal,
	/// Unassuming dust mote wandering on both axes.
	Generic,
}

impl ParticleKind {
	/// Kinds that live once and die instead of wrapping.
	pub fn is_ephemeral(self) -> bool {
		matches!(self, ParticleKind::Ember | ParticleKind::Crystal)
	}

	/// Kinds pinned in place (twinkle/pulse rather than travel).
	pub fn is_fixed(self) -> bool {
		matches!(
			self,
			ParticleKind::Star | ParticleKind::Sparkle | ParticleKind::Crystal
		)
	}

	fn default_colors(self) -> &'static [&'static str] {
		match self {
			ParticleKind::Snow => &["#FFFFFF", "#F0F8FF", "#E8F0F8"],
			ParticleKind::Petal => &["#FFB7C5", "#FFC0CB", "#FFD1DC"],
			ParticleKind::Rain => &["#A8C0D8", "#98B0C8", "#B8D0E0"],
			ParticleKind::Leaf => &["#A03040", "#C04838", "#D4882A"],
			ParticleKind::Ember => &["#FFD060", "#FFC040", "#F0A830"],
			ParticleKind::Star => &["#FFFFFF", "#FFF8E0", "#E0E8FF"],
			ParticleKind::Sparkle => &["#FFFFFF", "#F8F0E0"],
			ParticleKind::Crystal => &["#D8E8F8", "#C0D8F0", "#E8F4FF"],
			ParticleKind::Generic => &["#D8C8B0", "#C8B8A0", "#E0D0B8"],
		}
	}

	fn default_size(self) -> (f64, f64) {
		match self {
			ParticleKind::Snow => (2.0, 6.0),
			ParticleKind::Petal => (5.0, 12.0),
			ParticleKind::Rain => (1.0, 3.0),
			ParticleKind::Leaf => (8.0, 16.0),
			ParticleKind::Ember => (2.0, 6.0),
			ParticleKind::Star => (1.0, 3.0),
			ParticleKind::Sparkle => (2.0, 5.0),
			ParticleKind::Crystal => (4.0, 10.0),
			ParticleKind::Generic => (1.5, 4.0),
		}
	}

	fn default_opacity(self) -> (f64, f64) {
		match self {
			ParticleKind::Rain => (0.2, 0.5),
			ParticleKind::Star => (0.3, 0.9),
			ParticleKind::Generic => (0.1, 0.3),
			_ => (0.3, 0.8),
		}
	}

	fn base_fall_speed(self) -> f64 {
		match self {
			ParticleKind::Snow => 0.8,
			ParticleKind::Petal => 1.0,
			ParticleKind::Rain => 6.0,
			ParticleKind::Leaf => 1.2,
			ParticleKind::Ember => -0.9,
			ParticleKind::Generic => 0.3,
			ParticleKind::Star | ParticleKind::Sparkle | ParticleKind::Crystal => 0.0,
		}
	}
}

/// Overall drift pattern layered on a particle's per-kind motion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MoveMode {
	/// Straight descent with per-kind sway.
	#[default]
	Fall,
	/// Descent plus a wide horizontal sine, petals caught in an eddy.
	Swirl,
	/// Upward drift (embers).
	Rise,
	/// Slow two-axis meander.
	Wander,
}

/// Horizontal/vertical wind, in px per frame at depth 1.
#[derive(Clone, Copy, Debug, Default)]
pub struct Wind {
	/// Horizontal push, positive = rightward.
	pub x: f64,
	/// Vertical push, positive = downward.
	pub y: f64,
}

/// Per-period overrides applied when spawning, all falling back to the
/// kind's defaults.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpawnProfile {
	/// Palette to pick from.
	pub colors: Option<&'static [&'static str]>,
	/// Size range [min, max] px.
	pub size: Option<(f64, f64)>,
	/// Target opacity range [min, max].
	pub opacity: Option<(f64, f64)>,
	/// Multiplier on the kind's base fall/rise speed.
	pub speed: f64,
	/// Sway amplitude override, px.
	pub sway: Option<f64>,
	/// Drift pattern.
	pub mode: MoveMode,
}

impl SpawnProfile {
	/// A profile with no overrides and unit speed.
	pub fn plain(mode: MoveMode) -> Self {
		SpawnProfile {
			speed: 1.0,
			mode,
			..Default::default()
		}
	}
}

/// A live particle.
#[derive(Clone, Debug)]
pub struct Particle {
	/// Shape and motion family.
	pub kind: ParticleKind,
	/// Drift pattern.
	pub mode: MoveMode,
	/// Horizontal position, px.
	pub x: f64,
	/// Vertical position, px.
	pub y: f64,
	/// Raw size before depth scaling.
	pub size: f64,
	/// Base vertical speed in px/frame, negative = rising.
	pub speed: f64,
	/// Current opacity; eases toward `base_opacity`.
	pub opacity: f64,
	/// Opacity the particle settles at.
	pub base_opacity: f64,
	/// Phase driving sway, twinkle, and flutter.
	pub phase: f64,
	/// Sway amplitude in px.
	pub sway: f64,
	/// Orientation, radians.
	pub rotation: f64,
	/// Rotation speed, radians per frame.
	pub spin: f64,
	/// Parallax layer in (0, 1]; scales size, speed, and wind response.
	pub depth: f64,
	/// Fill color, from the palette at spawn.
	pub color: &'static str,
	/// Ephemeral kinds: remaining life in frames, counting down from
	/// `max_life`. Sparkles: elapsed frames in the current pulse cycle.
	pub life: f64,
	/// Full lifetime (or pulse cycle length) in frames.
	pub max_life: f64,
}

impl Particle {
	/// Depth-scaled render size.
	pub fn scaled_size(&self) -> f64 {
		self.size * (0.3 + 0.7 * self.depth)
	}

	fn depth_speed(&self) -> f64 {
		self.speed * (0.3 + 0.7 * self.depth)
	}
}

/// Spawn one particle somewhere in (and slightly above) the viewport.
pub fn spawn(kind: ParticleKind, width: f64, height: f64, profile: &SpawnProfile, rng: &mut Rng) -> Particle {
	let (smin, smax) = profile.size.unwrap_or_else(|| kind.default_size());
	let (omin, omax) = profile.opacity.unwrap_or_else(|| kind.default_opacity());
	let colors = profile.colors.unwrap_or_else(|| kind.default_colors());
	let speed_mul = if profile.speed > 0.0 { profile.speed } else { 1.0 };

	let y = if kind.is_fixed() {
		rng.range(0.0, height)
	} else if kind == ParticleKind::Ember || profile.mode == MoveMode::Rise {
		rng.range(height * 0.6, height + 20.0)
	} else {
		rng.range(-height * 0.2, height)
	};

	let base_opacity = rng.range(omin, omax);
	let max_life = match kind {
		ParticleKind::Ember => rng.range(120.0, 300.0),
		ParticleKind::Crystal => rng.range(240.0, 600.0),
		ParticleKind::Sparkle => rng.range(90.0, 180.0),
		_ => 0.0,
	};
	let life = match kind {
		// Sparkles count elapsed frames and start at a random point of
		// the cycle so a fresh field pulses out of sync.
		ParticleKind::Sparkle => rng.range(0.0, max_life),
		_ => max_life,
	};

	Particle {
		kind,
		mode: profile.mode,
		x: rng.range(0.0, width),
		y,
		size: rng.range(smin, smax),
		speed: kind.base_fall_speed() * speed_mul,
		// Fixed kinds materialize invisibly and ease in; travellers start
		// at a dimmed cut of their target so a fresh pool is not a wall
		// of full-brightness particles.
		opacity: if kind.is_fixed() { 0.0 } else { base_opacity * rng.range(0.3, 1.0) },
		base_opacity,
		phase: rng.range(0.0, std::f64::consts::TAU),
		sway: profile.sway.unwrap_or(match kind {
			ParticleKind::Petal | ParticleKind::Leaf => 3.0,
			ParticleKind::Rain => 0.0,
			_ => 1.5,
		}),
		rotation: rng.range(0.0, std::f64::consts::TAU),
		spin: rng.range(-0.05, 0.05),
		depth: rng.range(0.15, 1.0),
		color: *rng.pick(colors),
		life,
		max_life,
	}
}

/// Advance a particle by `dt` frames. Returns `false` once the particle is
/// dead (ephemeral kinds) or has left the frame without wrap behavior.
pub fn update(p: &mut Particle, wind: &Wind, dt: f64, width: f64, height: f64, rng: &mut Rng) -> bool {
	p.phase += 0.02 * dt;
	p.rotation += p.spin * dt;
	p.opacity += (p.base_opacity - p.opacity) * (0.02 * dt).min(1.0);

	let depth_wind = wind.x * p.depth;

	match p.kind {
		ParticleKind::Snow => {
			p.y += (p.depth_speed() + wind.y * p.depth) * dt;
			p.x += (p.phase.sin() * p.sway * 0.05 + depth_wind) * dt;
		}
		ParticleKind::Petal => {
			p.y += (p.depth_speed() * (0.8 + 0.2 * (p.phase * 0.7).cos()) + wind.y * p.depth) * dt;
			let swirl = if p.mode == MoveMode::Swirl {
				(p.phase * 0.5).sin() * p.sway * 0.15
			} else {
				0.0
			};
			p.x += (p.phase.sin() * p.sway * 0.08 + swirl + depth_wind) * dt;
		}
		ParticleKind::Rain => {
			p.y += p.depth_speed() * dt;
			p.x += depth_wind * 2.0 * dt;
		}
		ParticleKind::Leaf => {
			// Flutter: the fall stalls and dives as the leaf tumbles.
			p.y += (p.depth_speed() * (0.6 + 0.4 * (p.phase * 1.3).cos().abs()) + wind.y * p.depth) * dt;
			p.x += (p.phase.sin() * p.sway * 0.12 + depth_wind * 1.5) * dt;
		}
		ParticleKind::Ember => {
			p.y += (p.depth_speed() + wind.y * p.depth * 0.3) * dt;
			p.x += ((p.phase * 1.7).sin() * p.sway * 0.06 + depth_wind * 0.5) * dt;
			p.life -= dt;
			if p.life < 60.0 {
				p.base_opacity = (p.base_opacity - 0.01 * dt).max(0.0);
			}
			if p.life <= 0.0 || p.opacity <= 0.01 {
				return false;
			}
		}
		ParticleKind::Star => {
			p.opacity = p.base_opacity * (0.5 + 0.5 * (p.phase * 2.0).sin());
			if rng.chance(0.001 * dt) {
				// Rare flash, decays back through the twinkle envelope.
				p.opacity = (p.base_opacity * 1.8).min(1.0);
				p.phase = std::f64::consts::FRAC_PI_4;
			}
		}
		ParticleKind::Sparkle => {
			// Fade in over the first 30% of the cycle, hold, fade out over
			// the last 30%, then glint somewhere else.
			p.life += dt;
			if p.life >= p.max_life {
				p.life = 0.0;
				p.x = rng.range(0.0, width);
				p.y = rng.range(0.0, height);
			}
			let frac = p.life / p.max_life;
			let envelope = if frac < 0.3 {
				frac / 0.3
			} else if frac > 0.7 {
				(1.0 - frac) / 0.3
			} else {
				1.0
			};
			p.opacity = p.base_opacity * envelope.clamp(0.0, 1.0);
		}
		ParticleKind::Crystal => {
			p.life -= dt;
			if p.life <= 0.0 {
				p.opacity = 0.0;
				return false;
			}
			// Bloom over the first quarter of lifetime, hold, melt over
			// the last quarter.
			let elapsed = 1.0 - p.life / p.max_life;
			let bloom = (elapsed / 0.25).min(1.0);
			let melt = ((1.0 - elapsed) / 0.25).min(1.0);
			p.opacity = p.base_opacity * bloom * melt;
		}
		ParticleKind::Generic => {
			p.x += ((p.phase * 0.8).sin() * p.sway * 0.05 + depth_wind) * dt;
			p.y += (p.depth_speed() + (p.phase * 0.6).cos() * 0.1 + wind.y * p.depth * 0.5) * dt;
		}
	}

	if !p.kind.is_fixed() && !p.kind.is_ephemeral() {
		wrap(p, width, height);
	}
	true
}

/// Teleport a traveller that left the frame back to the opposite edge,
/// re-randomizing the cross axis is unnecessary since sway already
/// de-correlates columns. Margin of twice the size keeps pops offscreen.
fn wrap(p: &mut Particle, width: f64, height: f64) {
	let m = p.scaled_size() * 2.0;
	if p.y > height + m {
		p.y = -m;
	} else if p.y < -m - height * 0.25 {
		p.y = height + m;
	}
	if p.x > width + m {
		p.x = -m;
	} else if p.x < -m {
		p.x = width + m;
	}
}

/// Render one particle. Invisible or sub-pixel particles are skipped.
pub fn draw(ctx: &CanvasRenderingContext2d, p: &Particle) {
	let size = p.scaled_size();
	if p.opacity <= 0.01 || size <= 0.2 {
		return;
	}
	ctx.save();
	// Shallow particles render dimmer on top of being smaller.
	ctx.set_global_alpha(p.opacity * (0.6 + 0.4 * p.depth));
	ctx.set_fill_style_str(p.color);

	match p.kind {
		ParticleKind::Generic | ParticleKind::Ember => {
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, size * 0.5, 0.0, std::f64::consts::TAU);
			ctx.fill();
			if p.kind == ParticleKind::Ember {
				ctx.set_global_alpha(p.opacity * 0.35);
				ctx.begin_path();
				let _ = ctx.arc(p.x, p.y, size, 0.0, std::f64::consts::TAU);
				ctx.fill();
			}
		}
		ParticleKind::Snow => draw_snowflake(ctx, p, size),
		ParticleKind::Rain => {
			// Elongated drop; length tracks fall speed.
			let _ = ctx.translate(p.x, p.y);
			let len = size * 3.0 + p.depth_speed();
			ctx.begin_path();
			let _ = ctx.ellipse(0.0, 0.0, (size * 0.4).max(0.4), len, 0.0, 0.0, std::f64::consts::TAU);
			ctx.fill();
		}
		ParticleKind::Petal => {
			let _ = ctx.translate(p.x, p.y);
			let _ = ctx.rotate(p.rotation);
			ctx.begin_path();
			let _ = ctx.ellipse(0.0, 0.0, size * 0.5, size * 0.3, 0.0, 0.0, std::f64::consts::TAU);
			ctx.fill();
		}
		ParticleKind::Leaf => {
			let _ = ctx.translate(p.x, p.y);
			let _ = ctx.rotate(p.rotation);
			ctx.begin_path();
			ctx.move_to(0.0, -size * 0.5);
			ctx.quadratic_curve_to(size * 0.4, 0.0, 0.0, size * 0.5);
			ctx.quadratic_curve_to(-size * 0.4, 0.0, 0.0, -size * 0.5);
			ctx.fill();
		}
		ParticleKind::Star => {
			// Bright core plus a faint cross flare.
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, size * 0.5, 0.0, std::f64::consts::TAU);
			ctx.fill();
			ctx.set_stroke_style_str(p.color);
			ctx.set_line_width(0.5);
			ctx.set_global_alpha(p.opacity * 0.5);
			let flare = size * 1.8;
			ctx.begin_path();
			ctx.move_to(p.x - flare, p.y);
			ctx.line_to(p.x + flare, p.y);
			ctx.move_to(p.x, p.y - flare);
			ctx.line_to(p.x, p.y + flare);
			ctx.stroke();
		}
		ParticleKind::Sparkle => {
			// Four-pointed glint: two thin crossed lozenges.
			let _ = ctx.translate(p.x, p.y);
			let _ = ctx.rotate(p.rotation);
			ctx.begin_path();
			ctx.move_to(0.0, -size);
			ctx.line_to(size * 0.18, 0.0);
			ctx.line_to(0.0, size);
			ctx.line_to(-size * 0.18, 0.0);
			ctx.close_path();
			ctx.fill();
			ctx.begin_path();
			ctx.move_to(-size, 0.0);
			ctx.line_to(0.0, size * 0.18);
			ctx.line_to(size, 0.0);
			ctx.line_to(0.0, -size * 0.18);
			ctx.close_path();
			ctx.fill();
		}
		ParticleKind::Crystal => {
			// Hexagonal outline with radial struts from the center.
			let _ = ctx.translate(p.x, p.y);
			let _ = ctx.rotate(p.rotation);
			ctx.set_stroke_style_str(p.color);
			ctx.set_line_width(1.0);
			ctx.begin_path();
			for corner in 0..=6 {
				let angle = f64::from(corner) * std::f64::consts::FRAC_PI_3;
				let (x, y) = (angle.cos() * size, angle.sin() * size);
				if corner == 0 {
					ctx.move_to(x, y);
				} else {
					ctx.line_to(x, y);
				}
			}
			ctx.stroke();
			ctx.begin_path();
			for corner in 0..6 {
				let angle = f64::from(corner) * std::f64::consts::FRAC_PI_3;
				ctx.move_to(0.0, 0.0);
				ctx.line_to(angle.cos() * size, angle.sin() * size);
			}
			ctx.stroke();
		}
	}
	ctx.restore();
}

/// Snowflake tiered by size: tiny flakes are plain discs, medium ones a
/// six-spoke asterisk, large ones get dendritic side branches.
fn draw_snowflake(ctx: &CanvasRenderingContext2d, p: &Particle, size: f64) {
	if size < 3.0 {
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, size * 0.5, 0.0, std::f64::consts::TAU);
		ctx.fill();
		return;
	}
	let _ = ctx.translate(p.x, p.y);
	let _ = ctx.rotate(p.rotation);
	ctx.set_stroke_style_str(p.color);
	ctx.set_line_width((size * 0.12).max(0.5));
	let half = size * 0.5;
	ctx.begin_path();
	for spoke in 0..6 {
		let angle = f64::from(spoke) * std::f64::consts::FRAC_PI_3;
		let (dx, dy) = (angle.cos(), angle.sin());
		ctx.move_to(0.0, 0.0);
		ctx.line_to(dx * half, dy * half);
		if size >= 5.0 {
			let (bx, by) = (dx * half * 0.55, dy * half * 0.55);
			for side in [-1.0, 1.0] {
				let branch = angle + side * std::f64::consts::FRAC_PI_6;
				ctx.move_to(bx, by);
				ctx.line_to(bx + branch.cos() * half * 0.35, by + branch.sin() * half * 0.35);
			}
		}
	}
	ctx.stroke();
}

#[cfg(test)]
mod tests {
	use super::*;

	const W: f64 = 800.0;
	const H: f64 = 600.0;

	fn spawn_one(kind: ParticleKind, seed: u64) -> (Particle, Rng) {
		let mut rng = Rng::new(seed);
		let profile = SpawnProfile::plain(MoveMode::Fall);
		let p = spawn(kind, W, H, &profile, &mut rng);
		(p, rng)
	}

	#[test]
	fn spawn_respects_overrides() {
		let mut rng = Rng::new(7);
		let profile = SpawnProfile {
			colors: Some(&["#123456"]),
			size: Some((9.0, 9.5)),
			opacity: Some((0.2, 0.21)),
			speed: 2.0,
			sway: Some(4.0),
			mode: MoveMode::Fall,
		};
		for _ in 0..50 {
			let p = spawn(ParticleKind::Snow, W, H, &profile, &mut rng);
			assert_eq!(p.color, "#123456");
			assert!((9.0..=9.5).contains(&p.size));
			assert!((0.2..=0.21).contains(&p.base_opacity));
			assert_eq!(p.sway, 4.0);
			assert!((p.speed - 1.6).abs() < 1e-12);
		}
	}

	#[test]
	fn rain_stays_in_frame_over_many_updates() {
		let (mut p, mut rng) = spawn_one(ParticleKind::Rain, 42);
		let wind = Wind { x: 0.6, y: 0.0 };
		for _ in 0..1000 {
			assert!(update(&mut p, &wind, 1.0, W, H, &mut rng));
			let m = p.scaled_size() * 2.0 + 1.0;
			assert!(p.y <= H + m && p.x <= W + m && p.x >= -m);
		}
	}

	#[test]
	fn snow_wraps_from_bottom_to_top() {
		let (mut p, mut rng) = spawn_one(ParticleKind::Snow, 3);
		p.y = H + p.scaled_size() * 2.0 + 0.1;
		update(&mut p, &Wind::default(), 1.0, W, H, &mut rng);
		assert!(p.y < H * 0.5);
	}

	#[test]
	fn ember_dies_within_its_lifetime() {
		let (mut p, mut rng) = spawn_one(ParticleKind::Ember, 11);
		let mut alive_frames = 0;
		while update(&mut p, &Wind::default(), 1.0, W, H, &mut rng) {
			alive_frames += 1;
			assert!(alive_frames <= 400, "ember never burned out");
		}
		assert!(alive_frames >= 60);
	}

	#[test]
	fn crystal_blooms_then_melts() {
		let (mut p, mut rng) = spawn_one(ParticleKind::Crystal, 5);
		let start_x = p.x;
		let mut peak = 0.0_f64;
		while update(&mut p, &Wind::default(), 1.0, W, H, &mut rng) {
			peak = peak.max(p.opacity);
		}
		assert!(peak > p.base_opacity * 0.8);
		assert!(p.opacity <= 0.05);
		assert_eq!(p.x, start_x, "crystals are pinned in place");
	}

	#[test]
	fn crystal_reaches_full_brightness_early() {
		// Bloom is keyed to the spawn lifetime, so even long-lived
		// crystals must be near fully visible well before mid-life.
		for seed in [5, 21, 77, 104] {
			let (mut p, mut rng) = spawn_one(ParticleKind::Crystal, seed);
			let total = p.max_life;
			let mut frames = 0.0;
			while p.opacity < p.base_opacity * 0.9 {
				assert!(update(&mut p, &Wind::default(), 1.0, W, H, &mut rng));
				frames += 1.0;
				assert!(
					frames <= total * 0.3,
					"seed {seed}: still dim after {frames} of {total} frames"
				);
			}
		}
	}

	#[test]
	fn sparkle_holds_then_relocates() {
		let (mut p, mut rng) = spawn_one(ParticleKind::Sparkle, 33);
		p.life = 0.0;
		let start = (p.x, p.y);
		let mut held = 0_u32;
		let mut moved = false;
		for _ in 0..1000 {
			update(&mut p, &Wind::default(), 1.0, W, H, &mut rng);
			if p.opacity == p.base_opacity {
				held += 1;
			}
			if (p.x, p.y) != start {
				moved = true;
			}
		}
		// The middle 40% of each cycle holds at full brightness.
		assert!(held > 100, "only {held} frames at full brightness");
		assert!(moved, "sparkle never glinted to a new spot");
	}

	#[test]
	fn star_twinkles_forever() {
		let (mut p, mut rng) = spawn_one(ParticleKind::Star, 9);
		let (x, y) = (p.x, p.y);
		let mut lo = f64::MAX;
		let mut hi = f64::MIN;
		for _ in 0..2000 {
			assert!(update(&mut p, &Wind::default(), 1.0, W, H, &mut rng));
			lo = lo.min(p.opacity);
			hi = hi.max(p.opacity);
		}
		assert_eq!((p.x, p.y), (x, y));
		assert!(hi - lo > 0.1, "opacity never varied: {lo}..{hi}");
	}

	#[test]
	fn fixed_kinds_spawn_invisible() {
		for kind in [ParticleKind::Star, ParticleKind::Sparkle, ParticleKind::Crystal] {
			let (p, _) = spawn_one(kind, 21);
			assert_eq!(p.opacity, 0.0);
		}
	}

	#[test]
	fn wind_pushes_travellers_sideways() {
		let (mut p, mut rng) = spawn_one(ParticleKind::Snow, 17);
		p.x = W * 0.5;
		p.sway = 0.0;
		let wind = Wind { x: 1.0, y: 0.0 };
		for _ in 0..50 {
			update(&mut p, &wind, 1.0, W, H, &mut rng);
		}
		assert!(p.x > W * 0.5, "wind should drift the particle right");
	}
}
