//! The 24 solar terms (sekki) and the calendar math that locates a point
//! in time within them.
//!
//! Each term carries its display identity, a nominal month/day anchor, and
//! the visual parameters the director turns into an effect plan. Exact
//! start dates shift by up to a day between years, so a year-keyed lookup
//! table overrides the nominal anchor when an entry exists.
//!
//! Instants are `f64` milliseconds since the Unix epoch, the same scale
//! `js_sys::Date::now()` reports, so the whole module stays testable off
//! the browser.

use std::collections::HashMap;

use log::warn;
use serde::Deserialize;

use super::particles::ParticleKind;

/// Milliseconds in one civil day.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Half-width of the blending window around a term boundary, in days.
/// Style and effect configuration ramp linearly across twice this span.
pub const TRANSITION_WINDOW_DAYS: f64 = 3.0;

/// Which family of canvas animation a term drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationKind {
	/// Typed particles falling/drifting/twinkling.
	Particle,
	/// Horizontal sine-wave strokes.
	Wave,
	/// A light flare sweeping the frame on a cycle.
	Flare,
	/// Shimmering radial gradients in the lower screen band.
	HeatHaze,
	/// Frost crystals growing from the corners, plus crystal particles.
	Crystal,
	/// A full-screen radial glow breathing in and out.
	Breath,
}

/// Optional per-term animation parameters. Unset fields fall back to the
/// defaults of whichever effect consumes them.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnimationParams {
	/// Particle/effect count.
	pub count: Option<usize>,
	/// Movement speed multiplier.
	pub speed: Option<f64>,
	/// Size range [min, max] in px.
	pub size: Option<(f64, f64)>,
	/// Particle variant for `AnimationKind::Particle` (and flare sparkles).
	pub variant: Option<ParticleKind>,
	/// Opacity range [min, max].
	pub opacity: Option<(f64, f64)>,
	/// Sway / oscillation amplitude.
	pub sway: Option<f64>,
	/// Wave frequency.
	pub frequency: Option<f64>,
	/// Wave amplitude in px.
	pub amplitude: Option<f64>,
	/// Intensity multiplier for haze / flare / breath.
	pub intensity: Option<f64>,
	/// Glow radius in px.
	pub glow: Option<f64>,
	/// Pulse period in ms.
	pub pulse_period: Option<f64>,
	/// Particle palette override (CSS color strings).
	pub colors: Option<&'static [&'static str]>,
}

const NO_PARAMS: AnimationParams = AnimationParams {
	count: None,
	speed: None,
	size: None,
	variant: None,
	opacity: None,
	sway: None,
	frequency: None,
	amplitude: None,
	intensity: None,
	glow: None,
	pulse_period: None,
	colors: None,
};

/// One of the 24 solar terms.
#[derive(Clone, Copy, Debug)]
pub struct Sekki {
	/// Term name, e.g. "立春".
	pub name: &'static str,
	/// Phonetic reading, e.g. "りっしゅん".
	pub reading: &'static str,
	/// Short description for the overlay.
	pub description: &'static str,
	/// Nominal start month (1-12), used when no exact date is tabled.
	pub start_month: u32,
	/// Nominal start day (1-31).
	pub start_day: u32,
	/// Background gradient: two CSS colors plus angle in degrees.
	pub gradient: (&'static str, &'static str, f64),
	/// Card border color (rgba string).
	pub border_color: &'static str,
	/// Card shadow color (rgba string).
	pub shadow_color: &'static str,
	/// Canvas animation family.
	pub animation: AnimationKind,
	/// Animation parameter bag.
	pub params: AnimationParams,
}

/// The 24 terms in calendar-year order (小寒 starts in early January).
static SEKKI_TABLE: [Sekki; 24] = [
	Sekki {
		name: "小寒",
		reading: "しょうかん",
		description: "寒さが一段と厳しくなる頃",
		start_month: 1,
		start_day: 5,
		gradient: ("#B0C8E0", "#C8D8F0", 170.0),
		border_color: "rgba(176,200,224,0.15)",
		shadow_color: "rgba(200,216,240,0.25)",
		animation: AnimationKind::Crystal,
		params: AnimationParams {
			count: Some(20),
			speed: Some(0.4),
			size: Some((4.0, 10.0)),
			opacity: Some((0.3, 0.7)),
			glow: Some(30.0),
			pulse_period: Some(3500.0),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "大寒",
		reading: "だいかん",
		description: "一年で最も寒さが厳しい頃",
		start_month: 1,
		start_day: 20,
		gradient: ("#D8E0E8", "#E8EFF5", 170.0),
		border_color: "rgba(216,224,232,0.15)",
		shadow_color: "rgba(232,239,245,0.25)",
		animation: AnimationKind::Crystal,
		params: AnimationParams {
			count: Some(30),
			speed: Some(0.3),
			size: Some((5.0, 12.0)),
			opacity: Some((0.4, 0.8)),
			glow: Some(40.0),
			pulse_period: Some(4000.0),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "立春",
		reading: "りっしゅん",
		description: "春の気配が立ち始める頃",
		start_month: 2,
		start_day: 4,
		gradient: ("#8B9DC3", "#6B7FA0", 160.0),
		border_color: "rgba(255,182,193,0.15)",
		shadow_color: "rgba(139,157,195,0.25)",
		animation: AnimationKind::Breath,
		params: AnimationParams {
			pulse_period: Some(4000.0),
			intensity: Some(0.3),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "雨水",
		reading: "うすい",
		description: "雪が雨に変わり、氷が溶け始める頃",
		start_month: 2,
		start_day: 19,
		gradient: ("#9B8FB4", "#7D7399", 160.0),
		border_color: "rgba(155,143,180,0.15)",
		shadow_color: "rgba(125,115,153,0.25)",
		animation: AnimationKind::Particle,
		params: AnimationParams {
			variant: Some(ParticleKind::Rain),
			count: Some(60),
			speed: Some(3.0),
			size: Some((1.0, 3.0)),
			opacity: Some((0.2, 0.5)),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "啓蟄",
		reading: "けいちつ",
		description: "冬眠していた虫たちが目を覚ます頃",
		start_month: 3,
		start_day: 5,
		gradient: ("#A8988A", "#C8B8A0", 160.0),
		border_color: "rgba(168,152,138,0.15)",
		shadow_color: "rgba(200,184,160,0.25)",
		animation: AnimationKind::Breath,
		params: AnimationParams {
			pulse_period: Some(5000.0),
			intensity: Some(0.25),
			sway: Some(2.0),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "春分",
		reading: "しゅんぶん",
		description: "昼と夜の長さがほぼ等しくなる頃",
		start_month: 3,
		start_day: 20,
		gradient: ("#D4B8A0", "#E8C8B8", 150.0),
		border_color: "rgba(212,184,160,0.15)",
		shadow_color: "rgba(232,200,184,0.25)",
		animation: AnimationKind::Flare,
		params: AnimationParams {
			intensity: Some(0.5),
			glow: Some(80.0),
			pulse_period: Some(3000.0),
			opacity: Some((0.15, 0.4)),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "清明",
		reading: "せいめい",
		description: "すべてのものが清らかで生き生きする頃",
		start_month: 4,
		start_day: 4,
		gradient: ("#F5C6D0", "#FDDDE6", 160.0),
		border_color: "rgba(245,198,208,0.2)",
		shadow_color: "rgba(253,221,230,0.3)",
		animation: AnimationKind::Particle,
		params: AnimationParams {
			variant: Some(ParticleKind::Petal),
			count: Some(35),
			speed: Some(1.2),
			size: Some((6.0, 14.0)),
			opacity: Some((0.4, 0.8)),
			sway: Some(4.0),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "穀雨",
		reading: "こくう",
		description: "穀物を潤す春の雨が降る頃",
		start_month: 4,
		start_day: 20,
		gradient: ("#A8D8A8", "#C8E8B8", 150.0),
		border_color: "rgba(168,216,168,0.15)",
		shadow_color: "rgba(200,232,184,0.25)",
		animation: AnimationKind::Particle,
		params: AnimationParams {
			variant: Some(ParticleKind::Ember),
			count: Some(25),
			speed: Some(0.8),
			size: Some((3.0, 8.0)),
			opacity: Some((0.3, 0.7)),
			sway: Some(2.0),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "立夏",
		reading: "りっか",
		description: "夏の気配が立ち始める頃",
		start_month: 5,
		start_day: 5,
		gradient: ("#A0D8D0", "#B8E8E0", 140.0),
		border_color: "rgba(160,216,208,0.15)",
		shadow_color: "rgba(184,232,224,0.25)",
		animation: AnimationKind::Wave,
		params: AnimationParams {
			frequency: Some(0.02),
			amplitude: Some(20.0),
			speed: Some(1.0),
			opacity: Some((0.1, 0.3)),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "小満",
		reading: "しょうまん",
		description: "草木が茂り、万物が満ち始める頃",
		start_month: 5,
		start_day: 21,
		gradient: ("#6DB070", "#88C488", 160.0),
		border_color: "rgba(109,176,112,0.15)",
		shadow_color: "rgba(136,196,136,0.25)",
		animation: AnimationKind::Breath,
		params: AnimationParams {
			pulse_period: Some(4500.0),
			intensity: Some(0.3),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "芒種",
		reading: "ぼうしゅ",
		description: "稲や麦などの種を蒔く頃",
		start_month: 6,
		start_day: 5,
		gradient: ("#8BA898", "#A0B8A8", 170.0),
		border_color: "rgba(139,168,152,0.15)",
		shadow_color: "rgba(160,184,168,0.25)",
		animation: AnimationKind::Particle,
		params: AnimationParams {
			variant: Some(ParticleKind::Rain),
			count: Some(80),
			speed: Some(3.5),
			size: Some((1.0, 2.0)),
			opacity: Some((0.15, 0.4)),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "夏至",
		reading: "げし",
		description: "一年で最も昼が長くなる頃",
		start_month: 6,
		start_day: 21,
		gradient: ("#8898A8", "#A0A8B8", 170.0),
		border_color: "rgba(136,152,168,0.15)",
		shadow_color: "rgba(160,168,184,0.25)",
		animation: AnimationKind::Particle,
		params: AnimationParams {
			variant: Some(ParticleKind::Rain),
			count: Some(100),
			speed: Some(4.0),
			size: Some((1.0, 3.0)),
			opacity: Some((0.2, 0.5)),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "小暑",
		reading: "しょうしょ",
		description: "暑さが本格的になり始める頃",
		start_month: 7,
		start_day: 7,
		gradient: ("#F0A830", "#F8C040", 140.0),
		border_color: "rgba(240,168,48,0.15)",
		shadow_color: "rgba(248,192,64,0.25)",
		animation: AnimationKind::HeatHaze,
		params: AnimationParams {
			intensity: Some(0.6),
			speed: Some(0.8),
			frequency: Some(0.03),
			amplitude: Some(8.0),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "大暑",
		reading: "たいしょ",
		description: "一年で最も暑さが厳しい頃",
		start_month: 7,
		start_day: 22,
		gradient: ("#E88020", "#F09830", 140.0),
		border_color: "rgba(232,128,32,0.15)",
		shadow_color: "rgba(240,152,48,0.25)",
		animation: AnimationKind::HeatHaze,
		params: AnimationParams {
			intensity: Some(0.8),
			speed: Some(1.0),
			frequency: Some(0.04),
			amplitude: Some(12.0),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "立秋",
		reading: "りっしゅう",
		description: "秋の気配が立ち始める頃",
		start_month: 8,
		start_day: 7,
		gradient: ("#E89060", "#F0A870", 150.0),
		border_color: "rgba(232,144,96,0.15)",
		shadow_color: "rgba(240,168,112,0.25)",
		animation: AnimationKind::HeatHaze,
		params: AnimationParams {
			intensity: Some(0.4),
			speed: Some(0.6),
			frequency: Some(0.02),
			amplitude: Some(6.0),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "処暑",
		reading: "しょしょ",
		description: "暑さが和らぎ始める頃",
		start_month: 8,
		start_day: 23,
		gradient: ("#D8A080", "#E8B898", 155.0),
		border_color: "rgba(216,160,128,0.15)",
		shadow_color: "rgba(232,184,152,0.25)",
		animation: AnimationKind::Particle,
		params: AnimationParams {
			variant: Some(ParticleKind::Generic),
			count: Some(20),
			speed: Some(0.5),
			size: Some((2.0, 5.0)),
			opacity: Some((0.15, 0.35)),
			sway: Some(3.0),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "白露",
		reading: "はくろ",
		description: "草花に朝露が宿り始める頃",
		start_month: 9,
		start_day: 7,
		gradient: ("#D8D0C8", "#E8E0D8", 150.0),
		border_color: "rgba(216,208,200,0.15)",
		shadow_color: "rgba(232,224,216,0.25)",
		animation: AnimationKind::Flare,
		params: AnimationParams {
			variant: Some(ParticleKind::Sparkle),
			intensity: Some(0.35),
			glow: Some(40.0),
			pulse_period: Some(2500.0),
			count: Some(15),
			opacity: Some((0.2, 0.6)),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "秋分",
		reading: "しゅうぶん",
		description: "昼と夜の長さがほぼ等しくなる頃",
		start_month: 9,
		start_day: 22,
		gradient: ("#B8A890", "#D0B898", 160.0),
		border_color: "rgba(184,168,144,0.15)",
		shadow_color: "rgba(208,184,152,0.25)",
		animation: AnimationKind::Wave,
		params: AnimationParams {
			frequency: Some(0.015),
			amplitude: Some(15.0),
			speed: Some(0.7),
			opacity: Some((0.1, 0.25)),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "寒露",
		reading: "かんろ",
		description: "露が冷たく感じられる頃",
		start_month: 10,
		start_day: 8,
		gradient: ("#D4A830", "#E8C040", 145.0),
		border_color: "rgba(212,168,48,0.2)",
		shadow_color: "rgba(232,192,64,0.3)",
		animation: AnimationKind::Particle,
		params: AnimationParams {
			// Osmanthus petals, gold instead of the default pink palette.
			variant: Some(ParticleKind::Petal),
			colors: Some(&["#F0A830", "#E8940A", "#FFC850"]),
			count: Some(40),
			speed: Some(0.6),
			size: Some((3.0, 7.0)),
			opacity: Some((0.4, 0.8)),
			sway: Some(5.0),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "霜降",
		reading: "そうこう",
		description: "霜が降り始める頃",
		start_month: 10,
		start_day: 23,
		gradient: ("#A03040", "#B84858", 160.0),
		border_color: "rgba(160,48,64,0.15)",
		shadow_color: "rgba(184,72,88,0.25)",
		animation: AnimationKind::Particle,
		params: AnimationParams {
			variant: Some(ParticleKind::Leaf),
			count: Some(25),
			speed: Some(1.0),
			size: Some((8.0, 16.0)),
			opacity: Some((0.4, 0.7)),
			sway: Some(6.0),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "立冬",
		reading: "りっとう",
		description: "冬の気配が立ち始める頃",
		start_month: 11,
		start_day: 7,
		gradient: ("#8B5060", "#A06878", 160.0),
		border_color: "rgba(139,80,96,0.15)",
		shadow_color: "rgba(160,104,120,0.25)",
		animation: AnimationKind::Particle,
		params: AnimationParams {
			variant: Some(ParticleKind::Generic),
			count: Some(15),
			speed: Some(0.4),
			size: Some((2.0, 4.0)),
			opacity: Some((0.1, 0.3)),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "小雪",
		reading: "しょうせつ",
		description: "わずかに雪が降り始める頃",
		start_month: 11,
		start_day: 22,
		gradient: ("#708090", "#8898A8", 165.0),
		border_color: "rgba(112,128,144,0.15)",
		shadow_color: "rgba(136,152,168,0.25)",
		animation: AnimationKind::Particle,
		params: AnimationParams {
			variant: Some(ParticleKind::Snow),
			count: Some(30),
			speed: Some(0.8),
			size: Some((2.0, 5.0)),
			opacity: Some((0.3, 0.6)),
			sway: Some(3.0),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "大雪",
		reading: "たいせつ",
		description: "本格的に雪が降り積もる頃",
		start_month: 12,
		start_day: 7,
		gradient: ("#6878A0", "#8090B0", 170.0),
		border_color: "rgba(104,120,160,0.15)",
		shadow_color: "rgba(128,144,176,0.25)",
		animation: AnimationKind::Particle,
		params: AnimationParams {
			variant: Some(ParticleKind::Snow),
			count: Some(50),
			speed: Some(1.2),
			size: Some((3.0, 8.0)),
			opacity: Some((0.4, 0.8)),
			sway: Some(4.0),
			..NO_PARAMS
		},
	},
	Sekki {
		name: "冬至",
		reading: "とうじ",
		description: "一年で最も夜が長くなる頃",
		start_month: 12,
		start_day: 21,
		gradient: ("#1A2040", "#283058", 180.0),
		border_color: "rgba(26,32,64,0.15)",
		shadow_color: "rgba(40,48,88,0.3)",
		animation: AnimationKind::Particle,
		params: AnimationParams {
			variant: Some(ParticleKind::Star),
			count: Some(60),
			speed: Some(0.3),
			size: Some((1.0, 4.0)),
			opacity: Some((0.3, 0.9)),
			sway: Some(1.0),
			..NO_PARAMS
		},
	},
];

/// All 24 terms in calendar-year order.
pub fn sekki_table() -> &'static [Sekki; 24] {
	&SEKKI_TABLE
}

// ── Civil date math ─────────────────────────────────────────────────────

/// Epoch milliseconds for midnight (UTC) of a civil date.
pub fn civil_to_ms(year: i32, month: u32, day: u32) -> f64 {
	days_from_civil(year as i64, month, day) as f64 * MS_PER_DAY
}

/// Days since 1970-01-01 for a civil date (proleptic Gregorian).
fn days_from_civil(mut y: i64, m: u32, d: u32) -> i64 {
	if m <= 2 {
		y -= 1;
	}
	let era = y.div_euclid(400);
	let yoe = y - era * 400;
	let mp = ((m + 9) % 12) as i64;
	let doy = (153 * mp + 2) / 5 + d as i64 - 1;
	let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
	era * 146097 + doe - 719468
}

/// Civil (year, month, day) for a day count since 1970-01-01.
fn civil_from_days(days: i64) -> (i32, u32, u32) {
	let z = days + 719468;
	let era = z.div_euclid(146097);
	let doe = z - era * 146097;
	let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
	let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
	let mp = (5 * doy + 2) / 153;
	let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
	let m = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
	let y = yoe + era * 400 + if m <= 2 { 1 } else { 0 };
	(y as i32, m, d)
}

/// Calendar year containing the given instant.
fn year_of(now_ms: f64) -> i32 {
	civil_from_days((now_ms / MS_PER_DAY).floor() as i64).0
}

// ── Exact-date table ────────────────────────────────────────────────────

const BUILTIN_DATES: &str = include_str!("../../../data/sekki-dates.json");

/// Year-keyed table of exact term start dates (`year → name → ISO date`).
///
/// Solar terms are anchored to solar position, so the true start date of a
/// term drifts across years; the table pins it where an entry exists and
/// the nominal month/day anchor covers the rest.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct DateTable(HashMap<String, HashMap<String, String>>);

impl DateTable {
	/// The crate's embedded table (currently 2024-2027).
	pub fn builtin() -> Self {
		match serde_json::from_str(BUILTIN_DATES) {
			Ok(table) => table,
			Err(e) => {
				warn!("sekki-ambience: builtin date table failed to parse: {}", e);
				Self::default()
			}
		}
	}

	/// Parse a table from JSON, e.g. supplied by the host page.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	fn exact(&self, name: &str, year: i32) -> Option<f64> {
		let iso = self.0.get(&year.to_string())?.get(name)?;
		let (y, m, d) = parse_iso_date(iso)?;
		Some(civil_to_ms(y, m, d))
	}
}

fn parse_iso_date(s: &str) -> Option<(i32, u32, u32)> {
	let mut parts = s.splitn(3, '-');
	let y = parts.next()?.parse().ok()?;
	let m = parts.next()?.parse().ok()?;
	let d = parts.next()?.parse().ok()?;
	((1..=12).contains(&m) && (1..=31).contains(&d)).then_some((y, m, d))
}

// ── Timeline and transition ─────────────────────────────────────────────

/// A term instantiated at its resolved start date for a concrete year.
#[derive(Clone, Copy, Debug)]
pub struct TimelineEntry {
	/// The term itself.
	pub sekki: &'static Sekki,
	/// Resolved start instant, epoch ms.
	pub start_ms: f64,
}

/// Resolved start instant for a term in a given year: the exact tabled
/// date when present, else the nominal month/day anchor.
pub fn resolve_date(sekki: &Sekki, year: i32, table: &DateTable) -> f64 {
	table
		.exact(sekki.name, year)
		.unwrap_or_else(|| civil_to_ms(year, sekki.start_month, sekki.start_day))
}

/// All 24 terms instantiated across the previous, current, and next year,
/// sorted ascending by start date. The 3-year span makes neighbor lookup
/// correct at the December/January boundary without special cases.
pub fn build_timeline(now_ms: f64, table: &DateTable) -> Vec<TimelineEntry> {
	let year = year_of(now_ms);
	let mut timeline = Vec::with_capacity(72);
	for yr in (year - 1)..=(year + 1) {
		for sekki in sekki_table() {
			timeline.push(TimelineEntry {
				sekki,
				start_ms: resolve_date(sekki, yr, table),
			});
		}
	}
	timeline.sort_by(|a, b| a.start_ms.total_cmp(&b.start_ms));
	timeline
}

/// Index of the last timeline entry starting at or before `now_ms`.
fn current_index(timeline: &[TimelineEntry], now_ms: f64) -> usize {
	let mut idx = 0;
	for (i, entry) in timeline.iter().enumerate() {
		if entry.start_ms <= now_ms {
			idx = i;
		} else {
			break;
		}
	}
	idx
}

/// The term active at the given instant: the most recent one whose
/// resolved start date is at or before it.
pub fn current_sekki(now_ms: f64, table: &DateTable) -> &'static Sekki {
	let timeline = build_timeline(now_ms, table);
	timeline[current_index(&timeline, now_ms)].sekki
}

/// The blending state between two adjacent terms.
#[derive(Clone, Copy, Debug)]
pub struct SekkiTransition {
	/// Outgoing term (fully visible at progress 0).
	pub current: &'static Sekki,
	/// Incoming term (fully visible at progress 1).
	pub next: &'static Sekki,
	/// Blend fraction in [0, 1].
	pub progress: f64,
}

/// Transition state with the default ±3-day window.
pub fn transition(now_ms: f64, table: &DateTable) -> SekkiTransition {
	transition_with_window(now_ms, table, TRANSITION_WINDOW_DAYS)
}

/// Transition state with an explicit half-window in days.
///
/// Progress ramps linearly from 0 at `boundary - window` to 1 at
/// `boundary + window`, so it passes exactly 0.5 at the boundary itself
/// and the blended style is continuous across it. While inside the
/// trailing half of a window the pair stays (previous, landed) so the
/// ramp completes instead of snapping. At the very end of the 3-year
/// timeline `next` saturates to the last entry and progress clamps.
pub fn transition_with_window(now_ms: f64, table: &DateTable, window_days: f64) -> SekkiTransition {
	let timeline = build_timeline(now_ms, table);
	let idx = current_index(&timeline, now_ms);
	let half = window_days * MS_PER_DAY;

	let (cur, next) = if idx > 0 && now_ms <= timeline[idx].start_ms + half {
		// Still finishing the ramp into the entry we just crossed.
		(idx - 1, idx)
	} else {
		(idx, (idx + 1).min(timeline.len() - 1))
	};

	let begin = timeline[next].start_ms - half;
	let progress = ((now_ms - begin) / (2.0 * half)).clamp(0.0, 1.0);

	SekkiTransition {
		current: timeline[cur].sekki,
		next: timeline[next].sekki,
		progress,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn exactly_24_terms() {
		assert_eq!(sekki_table().len(), 24);
	}

	#[test]
	fn timeline_has_72_sorted_entries() {
		let table = DateTable::builtin();
		for &(y, m, d) in &[(2025, 1, 1), (2025, 7, 15), (2025, 12, 31)] {
			let timeline = build_timeline(civil_to_ms(y, m, d), &table);
			assert_eq!(timeline.len(), 72);
			assert!(
				timeline
					.windows(2)
					.all(|w| w[0].start_ms <= w[1].start_ms)
			);
		}
	}

	#[test]
	fn exact_table_overrides_nominal_anchor() {
		let table = DateTable::builtin();
		let risshun = sekki_table().iter().find(|s| s.name == "立春").unwrap();
		// 2025 is tabled as Feb 3, one day before the nominal Feb 4.
		assert_eq!(resolve_date(risshun, 2025, &table), civil_to_ms(2025, 2, 3));
		// Untabled years fall back to the nominal anchor.
		assert_eq!(resolve_date(risshun, 2050, &table), civil_to_ms(2050, 2, 4));
	}

	#[test]
	fn current_term_at_exact_start_date() {
		let table = DateTable::builtin();
		let now = civil_to_ms(2025, 5, 5); // 立夏 2025
		assert_eq!(current_sekki(now, &table).name, "立夏");
		let t = transition(now, &table);
		assert!((t.progress - 0.5).abs() < 1e-12);
		assert_eq!(t.next.name, "立夏");
		assert_eq!(t.current.name, "穀雨");
	}

	#[test]
	fn progress_ramps_across_the_window() {
		let table = DateTable::builtin();
		let start = civil_to_ms(2025, 5, 5);
		let day = MS_PER_DAY;

		assert_eq!(transition(start - 3.0 * day, &table).progress, 0.0);
		let quarter = transition(start - 1.5 * day, &table);
		assert!((quarter.progress - 0.25).abs() < 1e-12);
		assert!((transition(start + 1.5 * day, &table).progress - 0.75).abs() < 1e-12);
		assert_eq!(transition(start + 3.0 * day, &table).progress, 1.0);

		// Monotonic through the whole window.
		let mut prev = -1.0;
		let mut t = start - 3.0 * day;
		while t <= start + 3.0 * day {
			let p = transition(t, &table).progress;
			assert!(p >= prev);
			prev = p;
			t += 0.25 * day;
		}
	}

	#[test]
	fn progress_is_zero_or_one_away_from_boundaries() {
		let table = DateTable::builtin();
		// Mid-term dates, all > 3 days from any boundary.
		for &(y, m, d) in &[(2025, 1, 12), (2025, 6, 13), (2025, 8, 15), (2025, 11, 15)] {
			let p = transition(civil_to_ms(y, m, d), &table).progress;
			assert!(p == 0.0 || p == 1.0, "partial blend at {}-{}-{}: {}", y, m, d, p);
		}
	}

	#[test]
	fn year_boundary_resolves_to_next_years_entry() {
		let table = DateTable::builtin();
		let now = civil_to_ms(2025, 12, 30);
		assert_eq!(current_sekki(now, &table).name, "冬至");
		let t = transition(now, &table);
		assert_eq!(t.next.name, "小寒"); // 2026-01-05
		assert_eq!(t.progress, 0.0);
	}

	#[test]
	fn civil_date_roundtrip() {
		for &(y, m, d) in &[(1970, 1, 1), (2000, 2, 29), (2024, 12, 31), (2027, 3, 6)] {
			let days = (civil_to_ms(y, m, d) / MS_PER_DAY) as i64;
			assert_eq!(civil_from_days(days), (y, m, d));
		}
	}
}
