//! Burst options (caller-supplied, all optional) and the resolved configuration

use confetti_core::{Color, Viewport};
use tracing::warn;

pub const DEFAULT_PARTICLE_COUNT: usize = 120;
pub const DEFAULT_SPREAD: f32 = 70.0;
pub const DEFAULT_GRAVITY: f32 = 0.35;
pub const DEFAULT_DECAY: f32 = 0.995;
pub const DEFAULT_Z_INDEX: i32 = 9999;
pub const DEFAULT_DURATION_MS: f64 = 1500.0;
/// Upper bound on particles per burst; larger requests are clamped
pub const MAX_PARTICLE_COUNT: usize = 10_000;

/// Default palette: red, orange, yellow, green, teal, blue
pub const DEFAULT_PALETTE: [u32; 6] = [0xF94144, 0xF3722C, 0xF9C74F, 0x90BE6D, 0x43AA8B, 0x577590];

pub fn default_palette() -> Vec<Color> {
    DEFAULT_PALETTE.iter().map(|&hex| Color::from_hex(hex)).collect()
}

/// Options a caller passes to a burst. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BurstOptions {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub particle_count: Option<i64>,
    /// Spread cone in degrees
    pub spread: Option<f32>,
    pub gravity: Option<f32>,
    pub decay: Option<f32>,
    pub z_index: Option<i64>,
    /// CSS hex colors
    pub colors: Option<Vec<String>>,
    pub duration_ms: Option<f64>,
}

impl BurstOptions {
    /// Parse options from a TOML table.
    /// Accepts both `particleCount` and `particle_count` key styles; values of the
    /// wrong type are treated as absent.
    pub fn from_toml(table: &toml::Table) -> Self {
        let float = |keys: &[&str]| lookup(table, keys).and_then(toml_f64);
        let integer = |keys: &[&str]| lookup(table, keys).and_then(|v| v.as_integer());

        let colors = lookup(table, &["colors"])
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            });

        Self {
            x: float(&["x"]).map(|v| v as f32),
            y: float(&["y"]).map(|v| v as f32),
            particle_count: integer(&["particleCount", "particle_count"]),
            spread: float(&["spread"]).map(|v| v as f32),
            gravity: float(&["gravity"]).map(|v| v as f32),
            decay: float(&["decay"]).map(|v| v as f32),
            z_index: integer(&["zIndex", "z_index"]),
            colors,
            duration_ms: float(&["durationMs", "duration_ms"]),
        }
    }

    /// Overlay every field set in `other` onto `self`
    pub fn merge(mut self, other: BurstOptions) -> Self {
        self.x = other.x.or(self.x);
        self.y = other.y.or(self.y);
        self.particle_count = other.particle_count.or(self.particle_count);
        self.spread = other.spread.or(self.spread);
        self.gravity = other.gravity.or(self.gravity);
        self.decay = other.decay.or(self.decay);
        self.z_index = other.z_index.or(self.z_index);
        self.colors = other.colors.or(self.colors);
        self.duration_ms = other.duration_ms.or(self.duration_ms);
        self
    }
}

/// Fully resolved configuration, read-only for the lifetime of a burst
#[derive(Debug, Clone, PartialEq)]
pub struct BurstConfig {
    /// Burst center in viewport (CSS pixel) coordinates
    pub origin: [f32; 2],
    pub particle_count: usize,
    /// Spread cone in degrees
    pub spread: f32,
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Per-frame velocity damping in (0, 1]
    pub decay: f32,
    pub z_index: i32,
    /// Never empty
    pub colors: Vec<Color>,
    pub duration_ms: f64,
}

impl BurstConfig {
    /// Apply defaults field-by-field. Never fails: absent or invalid values fall back.
    pub fn resolve(options: &BurstOptions, viewport: Viewport) -> Self {
        let [cx, cy] = viewport.center();

        let particle_count = options
            .particle_count
            .filter(|&n| n > 0)
            .map(|n| match usize::try_from(n) {
                Ok(n) if n <= MAX_PARTICLE_COUNT => n,
                _ => {
                    warn!(requested = n, max = MAX_PARTICLE_COUNT, "particle count clamped");
                    MAX_PARTICLE_COUNT
                }
            })
            .unwrap_or(DEFAULT_PARTICLE_COUNT);

        let decay = options
            .decay
            .filter(|d| d.is_finite() && *d > 0.0 && *d <= 1.0)
            .unwrap_or(DEFAULT_DECAY);

        let z_index = options
            .z_index
            .and_then(|z| i32::try_from(z).ok())
            .unwrap_or(DEFAULT_Z_INDEX);

        let duration_ms = options
            .duration_ms
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(DEFAULT_DURATION_MS);

        Self {
            origin: [finite_or(options.x, cx), finite_or(options.y, cy)],
            particle_count,
            spread: finite_or(options.spread, DEFAULT_SPREAD),
            gravity: finite_or(options.gravity, DEFAULT_GRAVITY),
            decay,
            z_index,
            colors: resolve_palette(options.colors.as_deref()),
            duration_ms,
        }
    }

    /// Serialize back to a TOML table using the option key names
    pub fn to_toml(&self) -> toml::Table {
        let mut table = toml::Table::new();
        table.insert("x".into(), toml::Value::Float(self.origin[0] as f64));
        table.insert("y".into(), toml::Value::Float(self.origin[1] as f64));
        table.insert(
            "particleCount".into(),
            toml::Value::Integer(self.particle_count as i64),
        );
        table.insert("spread".into(), toml::Value::Float(self.spread as f64));
        table.insert("gravity".into(), toml::Value::Float(self.gravity as f64));
        table.insert("decay".into(), toml::Value::Float(self.decay as f64));
        table.insert("zIndex".into(), toml::Value::Integer(self.z_index as i64));
        table.insert(
            "colors".into(),
            toml::Value::Array(
                self.colors
                    .iter()
                    .map(|c| toml::Value::String(c.to_hex_string()))
                    .collect(),
            ),
        );
        table.insert("durationMs".into(), toml::Value::Float(self.duration_ms));
        table
    }
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self::resolve(&BurstOptions::default(), Viewport::default())
    }
}

fn resolve_palette(colors: Option<&[String]>) -> Vec<Color> {
    let Some(colors) = colors else {
        return default_palette();
    };

    let parsed: Vec<Color> = colors
        .iter()
        .filter_map(|s| match Color::parse(s) {
            Ok(c) => Some(c),
            Err(err) => {
                warn!("Skipping palette entry: {err}");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        default_palette()
    } else {
        parsed
    }
}

fn finite_or(value: Option<f32>, default: f32) -> f32 {
    value.filter(|v| v.is_finite()).unwrap_or(default)
}

// ── TOML helpers (handle integer/float coercion) ──

fn lookup<'a>(table: &'a toml::Table, keys: &[&str]) -> Option<&'a toml::Value> {
    keys.iter().find_map(|k| table.get(*k))
}

fn toml_f64(v: &toml::Value) -> Option<f64> {
    v.as_float().or_else(|| v.as_integer().map(|i| i as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport::new(800.0, 600.0, 1.0);

    #[test]
    fn defaults_applied() {
        let config = BurstConfig::resolve(&BurstOptions::default(), VIEWPORT);
        assert_eq!(config.origin, [400.0, 300.0]);
        assert_eq!(config.particle_count, 120);
        assert!((config.spread - 70.0).abs() < 1e-6);
        assert!((config.gravity - 0.35).abs() < 1e-6);
        assert!((config.decay - 0.995).abs() < 1e-6);
        assert_eq!(config.z_index, 9999);
        assert_eq!(config.colors.len(), 6);
        assert!((config.duration_ms - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn supplied_fields_win() {
        let options = BurstOptions {
            x: Some(10.0),
            y: Some(20.0),
            particle_count: Some(1),
            gravity: Some(0.0),
            duration_ms: Some(100.0),
            colors: Some(vec!["#ff0000".into()]),
            ..Default::default()
        };
        let config = BurstConfig::resolve(&options, VIEWPORT);
        assert_eq!(config.origin, [10.0, 20.0]);
        assert_eq!(config.particle_count, 1);
        assert_eq!(config.gravity, 0.0);
        assert_eq!(config.colors, vec![Color::from_hex(0xFF0000)]);
        assert!((config.duration_ms - 100.0).abs() < 1e-9);
        // Untouched fields keep their defaults
        assert_eq!(config.z_index, DEFAULT_Z_INDEX);
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let options = BurstOptions {
            x: Some(f32::NAN),
            particle_count: Some(0),
            spread: Some(f32::INFINITY),
            decay: Some(1.5),
            z_index: Some(i64::MAX),
            duration_ms: Some(-5.0),
            ..Default::default()
        };
        let config = BurstConfig::resolve(&options, VIEWPORT);
        assert_eq!(config.origin[0], 400.0);
        assert_eq!(config.particle_count, DEFAULT_PARTICLE_COUNT);
        assert_eq!(config.spread, DEFAULT_SPREAD);
        assert_eq!(config.decay, DEFAULT_DECAY);
        assert_eq!(config.z_index, DEFAULT_Z_INDEX);
        assert_eq!(config.duration_ms, DEFAULT_DURATION_MS);

        let zero_decay = BurstOptions {
            decay: Some(0.0),
            ..Default::default()
        };
        assert_eq!(BurstConfig::resolve(&zero_decay, VIEWPORT).decay, DEFAULT_DECAY);

        let full_decay = BurstOptions {
            decay: Some(1.0),
            ..Default::default()
        };
        assert_eq!(BurstConfig::resolve(&full_decay, VIEWPORT).decay, 1.0);
    }

    #[test]
    fn huge_count_is_clamped() {
        let config = BurstConfig::resolve(
            &BurstOptions {
                particle_count: Some(i64::MAX),
                ..Default::default()
            },
            VIEWPORT,
        );
        assert_eq!(config.particle_count, MAX_PARTICLE_COUNT);

        let config = BurstConfig::resolve(
            &BurstOptions {
                particle_count: Some(MAX_PARTICLE_COUNT as i64),
                ..Default::default()
            },
            VIEWPORT,
        );
        assert_eq!(config.particle_count, MAX_PARTICLE_COUNT);
    }

    #[test]
    fn empty_palette_treated_as_absent() {
        let options = BurstOptions {
            colors: Some(Vec::new()),
            ..Default::default()
        };
        assert_eq!(BurstConfig::resolve(&options, VIEWPORT).colors, default_palette());

        let garbage = BurstOptions {
            colors: Some(vec!["not-a-color".into()]),
            ..Default::default()
        };
        assert_eq!(BurstConfig::resolve(&garbage, VIEWPORT).colors, default_palette());

        let mixed = BurstOptions {
            colors: Some(vec!["nope".into(), "#00ff00".into()]),
            ..Default::default()
        };
        assert_eq!(
            BurstConfig::resolve(&mixed, VIEWPORT).colors,
            vec![Color::from_hex(0x00FF00)]
        );
    }

    #[test]
    fn parse_from_toml() {
        let toml_str = r##"
x = 100
y = 50.5
particleCount = 30
spread = 45
gravity = 0
decay = 0.98
z_index = 12
colors = ["#ff0000", "#00f", 3]
durationMs = 800
"##;
        let table: toml::Table = toml::from_str(toml_str).unwrap();
        let options = BurstOptions::from_toml(&table);
        assert_eq!(options.x, Some(100.0));
        assert_eq!(options.y, Some(50.5));
        assert_eq!(options.particle_count, Some(30));
        assert_eq!(options.spread, Some(45.0));
        assert_eq!(options.gravity, Some(0.0));
        assert_eq!(options.z_index, Some(12));
        assert_eq!(options.colors.as_ref().map(Vec::len), Some(2));
        assert_eq!(options.duration_ms, Some(800.0));
    }

    #[test]
    fn toml_wrong_types_are_absent() {
        let table: toml::Table = toml::from_str(r#"particleCount = "many"
gravity = true"#)
        .unwrap();
        let options = BurstOptions::from_toml(&table);
        assert_eq!(options.particle_count, None);
        assert_eq!(options.gravity, None);
    }

    #[test]
    fn merge_prefers_other() {
        let base = BurstOptions {
            particle_count: Some(10),
            gravity: Some(1.0),
            ..Default::default()
        };
        let merged = base.merge(BurstOptions {
            gravity: Some(0.0),
            ..Default::default()
        });
        assert_eq!(merged.particle_count, Some(10));
        assert_eq!(merged.gravity, Some(0.0));
    }

    #[test]
    fn to_toml_round_trips_through_options() {
        let config = BurstConfig::resolve(
            &BurstOptions {
                particle_count: Some(7),
                colors: Some(vec!["#123456".into()]),
                ..Default::default()
            },
            VIEWPORT,
        );
        let options = BurstOptions::from_toml(&config.to_toml());
        assert_eq!(BurstConfig::resolve(&options, VIEWPORT), config);
    }
}
