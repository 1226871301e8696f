//! The animation director: owns the particle pool, wind, environment
//! state, and adaptive quality, and turns a wall-clock instant plus a
//! frame timestamp into one frame of state.
//!
//! [`Director::advance`] is deliberately canvas-free so the whole control
//! loop (pool sizing, degradation, period switching, style refresh) runs
//! under native tests; [`Director::render`] only rasterizes what advance
//! already decided.

use log::{debug, info};
use web_sys::CanvasRenderingContext2d;

use super::calendar::{self, AnimationKind, DateTable, Sekki, SekkiTransition};
use super::environment::{
	draw_breath, draw_crystal_growth, draw_flare, draw_heat_haze, draw_wave_lines, BreathConfig,
	CrystalGrowthConfig, Environment, FlareConfig, FogConfig, HeatHazeConfig, WaveLinesConfig,
};
use super::particles::{self, MoveMode, Particle, ParticleKind, SpawnProfile, Wind};
use super::rng::Rng;
use super::style::{self, parse_color, SekkiStyle};

/// Frame duration the engine treats as unit speed (60 fps).
const BASE_FRAME_MS: f64 = 1000.0 / 60.0;

/// Knobs for the render loop. Defaults match the intended feel; embedders
/// only override these in tests or kiosk setups.
#[derive(Clone, Copy, Debug)]
pub struct Tuning {
	/// Upper clamp on a frame delta, so tab stalls advance one slow frame
	/// instead of teleporting every particle.
	pub max_dt_ms: f64,
	/// Frames per quality-evaluation window.
	pub fps_window: usize,
	/// Average fps below which a window triggers one quality step.
	pub low_fps_threshold: f64,
	/// Multiplier applied to the particle cap on each quality step.
	pub reduction_factor: f64,
	/// Particle floor the governor never cuts below (when any are wanted).
	pub min_particles: usize,
	/// Particles at depth >= this render on the blurred foreground canvas.
	pub foreground_depth: f64,
	/// Delay range between wind retargets, ms.
	pub wind_retarget_ms: (f64, f64),
	/// Duration range of the ease toward a new wind target, ms.
	pub wind_ease_ms: (f64, f64),
	/// Wind target magnitude bound, px/frame.
	pub wind_strength: f64,
	/// Interval for the periodic style recompute outside transitions, ms.
	pub style_refresh_ms: f64,
}

impl Default for Tuning {
	fn default() -> Self {
		Tuning {
			max_dt_ms: 50.0,
			fps_window: 30,
			low_fps_threshold: 30.0,
			reduction_factor: 0.7,
			min_particles: 8,
			foreground_depth: 0.75,
			wind_retarget_ms: (5000.0, 10_000.0),
			wind_ease_ms: (3000.0, 6000.0),
			wind_strength: 1.5,
			style_refresh_ms: 60_000.0,
		}
	}
}

/// Gust simulation: a horizontal wind value easing between random targets,
/// with a small always-on sway layered on top.
#[derive(Clone, Copy, Debug)]
struct WindSim {
	current: f64,
	start: f64,
	target: f64,
	ease_begin: f64,
	ease_duration: f64,
	next_retarget: f64,
}

impl WindSim {
	fn new() -> Self {
		WindSim {
			current: 0.0,
			start: 0.0,
			target: 0.0,
			ease_begin: 0.0,
			ease_duration: 1.0,
			next_retarget: 0.0,
		}
	}

	fn step(&mut self, elapsed_ms: f64, tuning: &Tuning, rng: &mut Rng) -> Wind {
		if elapsed_ms >= self.next_retarget {
			self.start = self.current;
			self.target = rng.range(-tuning.wind_strength, tuning.wind_strength);
			self.ease_begin = elapsed_ms;
			self.ease_duration = rng.range(tuning.wind_ease_ms.0, tuning.wind_ease_ms.1);
			self.next_retarget =
				elapsed_ms + rng.range(tuning.wind_retarget_ms.0, tuning.wind_retarget_ms.1);
		}
		let k = ((elapsed_ms - self.ease_begin) / self.ease_duration).clamp(0.0, 1.0);
		let eased = 1.0 - (1.0 - k) * (1.0 - k);
		self.current = self.start + (self.target - self.start) * eased;
		Wind {
			x: self.current + (elapsed_ms * 0.0005).sin() * 0.2,
			y: 0.0,
		}
	}
}

/// Rolling frame-time window and the monotonic quality cap it drives.
#[derive(Clone, Debug)]
struct PerformanceState {
	samples: Vec<f64>,
	cap_fraction: f64,
}

impl PerformanceState {
	fn new() -> Self {
		PerformanceState {
			samples: Vec::with_capacity(32),
			cap_fraction: 1.0,
		}
	}

	fn cap_fraction(&self) -> f64 {
		self.cap_fraction
	}

	/// Record one raw frame delta. Once a full window has accumulated the
	/// window is evaluated and cleared; returns `true` if this evaluation
	/// stepped the quality cap down. The cap only ever shrinks here.
	fn record(&mut self, frame_ms: f64, tuning: &Tuning) -> bool {
		self.samples.push(frame_ms);
		if self.samples.len() < tuning.fps_window.max(1) {
			return false;
		}
		let avg = self.samples.iter().sum::<f64>() / self.samples.len() as f64;
		self.samples.clear();
		let fps = 1000.0 / avg.max(0.001);
		if fps < tuning.low_fps_threshold {
			self.cap_fraction = (self.cap_fraction * tuning.reduction_factor).max(0.05);
			return true;
		}
		false
	}

	/// Forget in-flight timing, used after the tab was hidden so the gap
	/// does not read as a slow window.
	fn reset_timing(&mut self) {
		self.samples.clear();
	}

	/// Restore full quality, used when the period changes.
	fn reset_cap(&mut self) {
		self.samples.clear();
		self.cap_fraction = 1.0;
	}
}

/// What one term asks of the engine: which particles to pool and which
/// environment effects to draw.
#[derive(Clone, Copy, Debug, Default)]
pub struct EffectPlan {
	/// Particle kind to pool, if any.
	pub kind: Option<ParticleKind>,
	/// Pool size at full quality.
	pub count: usize,
	/// Spawn overrides for the pooled kind.
	pub profile: SpawnProfile,
	/// Light flare sweep.
	pub flare: Option<FlareConfig>,
	/// Heat haze band.
	pub haze: Option<HeatHazeConfig>,
	/// Breathing glow.
	pub breath: Option<BreathConfig>,
	/// Wave line stack.
	pub waves: Option<WaveLinesConfig>,
	/// Drifting fog field.
	pub fog: Option<FogConfig>,
	/// Corner frost growth.
	pub frost: Option<CrystalGrowthConfig>,
}

impl EffectPlan {
	/// Build the plan for a term from its animation kind and parameters.
	pub fn for_sekki(sekki: &Sekki) -> Self {
		let p = &sekki.params;
		let mut plan = EffectPlan::default();

		match sekki.animation {
			AnimationKind::Particle => {
				let kind = p.variant.unwrap_or(ParticleKind::Generic);
				plan.kind = Some(kind);
				plan.count = p.count.unwrap_or(30);
				plan.profile = SpawnProfile {
					colors: p.colors,
					size: p.size,
					opacity: p.opacity,
					speed: p.speed.unwrap_or(1.0),
					sway: p.sway,
					mode: match kind {
						ParticleKind::Petal => MoveMode::Swirl,
						ParticleKind::Ember => MoveMode::Rise,
						ParticleKind::Generic => MoveMode::Wander,
						_ => MoveMode::Fall,
					},
				};
				// Dust periods get a low fog layer under the motes.
				if kind == ParticleKind::Generic {
					plan.fog = Some(FogConfig {
						intensity: p.opacity.map_or(0.25, |(_, hi)| hi),
						..FogConfig::default()
					});
				}
			}
			AnimationKind::Wave => {
				plan.waves = Some(WaveLinesConfig {
					frequency: p.frequency.unwrap_or(0.02),
					amplitude: p.amplitude.unwrap_or(18.0),
					speed: p.speed.unwrap_or(1.0),
					opacity: p.opacity.unwrap_or((0.1, 0.3)),
					..WaveLinesConfig::default()
				});
			}
			AnimationKind::Flare => {
				plan.flare = Some(FlareConfig {
					intensity: p.intensity.unwrap_or(0.4),
					glow: p.glow.unwrap_or(80.0),
					..FlareConfig::default()
				});
				// White-dew style flares carry a sparkle field too.
				if let Some(kind @ ParticleKind::Sparkle) = p.variant {
					plan.kind = Some(kind);
					plan.count = p.count.unwrap_or(15);
					plan.profile = SpawnProfile {
						opacity: p.opacity,
						speed: 1.0,
						..SpawnProfile::default()
					};
				}
			}
			AnimationKind::HeatHaze => {
				plan.haze = Some(HeatHazeConfig {
					intensity: p.intensity.unwrap_or(0.5),
					speed: p.speed.unwrap_or(0.8),
					frequency: p.frequency.unwrap_or(0.03),
					amplitude: p.amplitude.unwrap_or(8.0),
					..HeatHazeConfig::default()
				});
			}
			AnimationKind::Crystal => {
				plan.frost = Some(CrystalGrowthConfig {
					intensity: p.intensity.unwrap_or(0.5),
					..CrystalGrowthConfig::default()
				});
				plan.kind = Some(ParticleKind::Crystal);
				plan.count = p.count.unwrap_or(20);
				plan.profile = SpawnProfile {
					size: p.size,
					opacity: p.opacity,
					speed: 1.0,
					..SpawnProfile::default()
				};
			}
			AnimationKind::Breath => {
				plan.breath = Some(BreathConfig {
					intensity: p.intensity.unwrap_or(0.3),
					period_ms: p.pulse_period.unwrap_or(4000.0),
					color: parse_color(sekki.gradient.0),
				});
			}
		}
		plan
	}
}

/// What changed during an [`Director::advance`] call.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameUpdate {
	/// A new solar term became current.
	pub period_changed: bool,
	/// The computed page style differs from the previous one.
	pub style_changed: bool,
}

/// Drives the whole ambience from two clocks: wall time (which term is
/// it) and the frame timestamp (how far to step the simulation).
pub struct Director {
	tuning: Tuning,
	table: DateTable,
	rng: Rng,
	env: Environment,
	pool: Vec<Particle>,
	wind_sim: WindSim,
	wind: Wind,
	perf: PerformanceState,
	plan: EffectPlan,
	style: SekkiStyle,
	current_name: &'static str,
	last_frame_ts: Option<f64>,
	last_dt: f64,
	elapsed_ms: f64,
	last_style_refresh: f64,
}

impl Director {
	/// A director over the given date table, seeded for particle spawns.
	pub fn new(tuning: Tuning, table: DateTable, seed: u64) -> Self {
		Director {
			tuning,
			table,
			rng: Rng::new(seed),
			env: Environment::default(),
			pool: Vec::new(),
			wind_sim: WindSim::new(),
			wind: Wind::default(),
			perf: PerformanceState::new(),
			plan: EffectPlan::default(),
			style: SekkiStyle::default(),
			current_name: "",
			last_frame_ts: None,
			last_dt: 1.0,
			elapsed_ms: 0.0,
			last_style_refresh: 0.0,
		}
	}

	/// The term currently driving the plan.
	pub fn current(&self, now_ms: f64) -> &'static Sekki {
		calendar::current_sekki(now_ms, &self.table)
	}

	/// Blending state at the given instant.
	pub fn transition(&self, now_ms: f64) -> SekkiTransition {
		calendar::transition(now_ms, &self.table)
	}

	/// Last computed page style.
	pub fn style(&self) -> &SekkiStyle {
		&self.style
	}

	/// Current live particle count.
	pub fn pool_len(&self) -> usize {
		self.pool.len()
	}

	/// Step the simulation one frame.
	///
	/// `now_ms` is wall-clock epoch ms and selects the term; `frame_ts_ms`
	/// is the animation-frame timestamp and sets the step size.
	pub fn advance(&mut self, now_ms: f64, frame_ts_ms: f64, width: f64, height: f64) -> FrameUpdate {
		let raw_dt = match self.last_frame_ts {
			Some(prev) => (frame_ts_ms - prev).max(0.0),
			None => BASE_FRAME_MS,
		};
		self.last_frame_ts = Some(frame_ts_ms);
		let dt_ms = raw_dt.min(self.tuning.max_dt_ms);
		let dt = dt_ms / BASE_FRAME_MS;
		self.last_dt = dt;
		self.elapsed_ms += dt_ms;

		if self.perf.record(raw_dt, &self.tuning) {
			debug!(
				"sekki-ambience: slow window, particle cap now {:.0}%",
				self.perf.cap_fraction() * 100.0
			);
		}

		let sekki = calendar::current_sekki(now_ms, &self.table);
		let period_changed = sekki.name != self.current_name;
		if period_changed {
			info!("sekki-ambience: entering {} ({})", sekki.name, sekki.reading);
			self.current_name = sekki.name;
			self.plan = EffectPlan::for_sekki(sekki);
			self.perf.reset_cap();
			self.env.clear();
			self.pool.clear();
		}

		let t = self.transition(now_ms);
		let in_window = t.progress > 0.0 && t.progress < 1.0;
		let refresh_due = self.elapsed_ms - self.last_style_refresh >= self.tuning.style_refresh_ms;
		let mut style_changed = false;
		if period_changed || in_window || refresh_due {
			self.last_style_refresh = self.elapsed_ms;
			let style = style::interpolated_style(now_ms, &self.table);
			if style != self.style {
				self.style = style;
				style_changed = true;
			}
		}

		self.wind = self.wind_sim.step(self.elapsed_ms, &self.tuning, &mut self.rng);
		self.maintain_pool(dt, width, height);

		FrameUpdate {
			period_changed,
			style_changed,
		}
	}

	fn target_count(&self) -> usize {
		if self.plan.count == 0 {
			return 0;
		}
		let scaled = (self.plan.count as f64 * self.perf.cap_fraction()).round() as usize;
		scaled.max(self.tuning.min_particles.min(self.plan.count))
	}

	fn maintain_pool(&mut self, dt: f64, width: f64, height: f64) {
		let wind = self.wind;
		let rng = &mut self.rng;
		self.pool
			.retain_mut(|p| particles::update(p, &wind, dt, width, height, rng));

		let target = self.target_count();
		if self.pool.len() > target {
			self.pool.truncate(target);
		} else if let Some(kind) = self.plan.kind {
			while self.pool.len() < target {
				self.pool
					.push(particles::spawn(kind, width, height, &self.plan.profile, &mut self.rng));
			}
		}
	}

	/// Draw the current frame onto the background and foreground canvases.
	/// Particles at depth >= the foreground threshold land on `fg`, which
	/// the component blurs for a cheap depth-of-field read.
	pub fn render(
		&mut self,
		bg: &CanvasRenderingContext2d,
		fg: &CanvasRenderingContext2d,
		width: f64,
		height: f64,
	) {
		bg.clear_rect(0.0, 0.0, width, height);
		fg.clear_rect(0.0, 0.0, width, height);
		let t = self.elapsed_ms;

		if let Some(cfg) = &self.plan.breath {
			draw_breath(bg, width, height, t, cfg);
		}
		if let Some(cfg) = &self.plan.waves {
			draw_wave_lines(bg, width, height, t, cfg);
		}
		if let Some(cfg) = &self.plan.haze {
			draw_heat_haze(bg, width, height, t, cfg);
		}
		if let Some(cfg) = self.plan.fog {
			self.env
				.draw_fog(bg, self.last_dt, width, height, &cfg, &mut self.rng);
		}
		if let Some(cfg) = &self.plan.frost {
			draw_crystal_growth(bg, width, height, t, cfg);
		}
		if let Some(cfg) = &self.plan.flare {
			draw_flare(bg, width, height, t, cfg);
		}

		for p in &self.pool {
			let ctx = if p.depth >= self.tuning.foreground_depth { fg } else { bg };
			particles::draw(ctx, p);
		}
	}

	/// Forget frame timing after the tab was hidden, so the next frame is
	/// a normal-sized step and the gap never counts against quality.
	pub fn reset_baseline(&mut self) {
		self.last_frame_ts = None;
		self.perf.reset_timing();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::seasonal::calendar::civil_to_ms;

	const W: f64 = 800.0;
	const H: f64 = 600.0;

	fn director() -> Director {
		Director::new(Tuning::default(), DateTable::builtin(), 1234)
	}

	/// Drive `frames` frames at a fixed per-frame cost.
	fn run(d: &mut Director, now_ms: f64, frames: usize, frame_cost_ms: f64) {
		let mut ts = 0.0;
		for _ in 0..frames {
			ts += frame_cost_ms;
			d.advance(now_ms, ts, W, H);
		}
	}

	#[test]
	fn pool_fills_to_the_planned_count() {
		let mut d = director();
		let now = civil_to_ms(2025, 12, 12); // 大雪: 50 snow particles
		run(&mut d, now, 5, 16.0);
		assert_eq!(d.pool_len(), 50);
	}

	#[test]
	fn first_advance_reports_period_and_style() {
		let mut d = director();
		let update = d.advance(civil_to_ms(2025, 12, 12), 16.0, W, H);
		assert!(update.period_changed);
		assert!(update.style_changed);
		let update = d.advance(civil_to_ms(2025, 12, 12), 32.0, W, H);
		assert!(!update.period_changed);
		assert!(!update.style_changed);
	}

	#[test]
	fn slow_windows_shrink_the_pool_monotonically() {
		let mut d = director();
		let now = civil_to_ms(2025, 12, 12);
		run(&mut d, now, 5, 16.0);
		assert_eq!(d.pool_len(), 50);

		// One full window at 20 fps: one reduction step, not more.
		run(&mut d, now, 30, 50.0);
		assert_eq!(d.pool_len(), 35);

		// A healthy window never restores quality.
		run(&mut d, now, 30, 16.0);
		assert_eq!(d.pool_len(), 35);

		// Further slow windows keep stepping down toward the floor.
		run(&mut d, now, 300, 50.0);
		assert!(d.pool_len() >= Tuning::default().min_particles);
		assert!(d.pool_len() < 35);
	}

	#[test]
	fn period_change_resets_quality_and_pool() {
		let mut d = director();
		let winter = civil_to_ms(2025, 12, 12);
		run(&mut d, winter, 35, 50.0);
		assert!(d.pool_len() < 50);

		// Jump to 冬至: fresh plan at full quality.
		let update = d.advance(civil_to_ms(2025, 12, 25), 10_000.0, W, H);
		assert!(update.period_changed);
		run(&mut d, civil_to_ms(2025, 12, 25), 5, 16.0);
		assert_eq!(d.pool_len(), 60); // 冬至 stars
	}

	#[test]
	fn particle_free_periods_keep_an_empty_pool() {
		let mut d = director();
		// 立夏: wave lines only.
		run(&mut d, civil_to_ms(2025, 5, 12), 10, 16.0);
		assert_eq!(d.pool_len(), 0);
	}

	#[test]
	fn wind_stays_within_bounds() {
		let mut d = director();
		let now = civil_to_ms(2025, 12, 12);
		let mut ts = 0.0;
		for _ in 0..5000 {
			ts += 16.0;
			d.advance(now, ts, W, H);
			let bound = d.tuning.wind_strength + 0.21;
			assert!(d.wind.x.abs() <= bound, "wind {} out of bounds", d.wind.x);
		}
	}

	#[test]
	fn ephemeral_pools_stay_topped_up() {
		let mut d = director();
		// 小寒: 20 crystals, which die and respawn.
		let now = civil_to_ms(2025, 1, 12);
		run(&mut d, now, 800, 16.0);
		assert_eq!(d.pool_len(), 20);
	}

	#[test]
	fn plan_maps_animation_kinds() {
		let table = calendar::sekki_table();
		let hazy = table.iter().find(|s| s.name == "大暑").unwrap();
		let plan = EffectPlan::for_sekki(hazy);
		assert!(plan.haze.is_some());
		assert!(plan.kind.is_none());

		let dusty = table.iter().find(|s| s.name == "処暑").unwrap();
		let plan = EffectPlan::for_sekki(dusty);
		assert_eq!(plan.kind, Some(ParticleKind::Generic));
		assert!(plan.fog.is_some());

		let dewy = table.iter().find(|s| s.name == "白露").unwrap();
		let plan = EffectPlan::for_sekki(dewy);
		assert!(plan.flare.is_some());
		assert_eq!(plan.kind, Some(ParticleKind::Sparkle));

		let frosty = table.iter().find(|s| s.name == "大寒").unwrap();
		let plan = EffectPlan::for_sekki(frosty);
		assert!(plan.frost.is_some());
		assert_eq!(plan.kind, Some(ParticleKind::Crystal));
	}
}
