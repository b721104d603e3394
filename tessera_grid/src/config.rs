// Startup configuration, loaded from JSON.
//
// `GridConfig` holds every tunable the engine reads at startup: canvas
// size, tile counts, the initial method/ease/mirror, alleys, palette
// selection, bezier control points, and the frame clock's wave speed and
// fps. Every field has a default (`#[serde(default)]`), so a config file
// only needs the keys it changes, and `{}` is a valid config.
//
// Unknown method/ease/mirror names do not fail the load; they fall back to
// the enum's default with a warning (see `params.rs`). Values that would
// make the engine misbehave (zero canvas, zero or more than `MAX_TILES`
// tiles, out-of-range palette index) are rejected by `validate()` with
// `ConfigError::Invalid`.
//
// See also: `params.rs` for the runtime `GridParams` this converts into,
// `clock.rs` for what `wave_speed` and `fps` drive.

use serde::{Deserialize, Serialize};
use tessera_easing::CubicBezier;

use crate::clock::{DEFAULT_FPS, DEFAULT_WAVE_SPEED, FrameClock};
use crate::palette::{COLOR_PAIRS, DEFAULT_COLOR_PAIR};
use crate::params::{EaseType, GridMethod, GridParams, MirrorMode};
use crate::tiles::MAX_TILES;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub tiles_x: usize,
    pub tiles_y: usize,
    pub alley_x: f64,
    pub alley_y: f64,
    pub method: GridMethod,
    pub ease_type: EaseType,
    pub mirror: MirrorMode,
    /// Index into the palette's color-pair table.
    pub color_pair: usize,
    pub swap_colors: bool,
    pub bezier_x: CubicBezier,
    pub bezier_y: CubicBezier,
    /// Radians per frame for the easing parameter's oscillation.
    pub wave_speed: f64,
    pub fps: f64,
    /// Seed for the Random method's layout.
    pub random_seed: u64,
    pub debug: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        let params = GridParams::default();
        Self {
            canvas_width: 800.0,
            canvas_height: 800.0,
            tiles_x: params.tiles_x,
            tiles_y: params.tiles_y,
            alley_x: params.alley_x,
            alley_y: params.alley_y,
            method: params.method,
            ease_type: params.ease_type,
            mirror: params.mirror,
            color_pair: DEFAULT_COLOR_PAIR,
            swap_colors: params.swap_colors,
            bezier_x: params.bezier_x,
            bezier_y: params.bezier_y,
            wave_speed: DEFAULT_WAVE_SPEED,
            fps: DEFAULT_FPS,
            random_seed: 0,
            debug: params.debug,
        }
    }
}

impl GridConfig {
    /// Parse and validate a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.canvas_width) || !positive(self.canvas_height) {
            return Err(ConfigError::Invalid(format!(
                "canvas must be positive, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        let tiles_ok = |n: usize| (1..=MAX_TILES).contains(&n);
        if !tiles_ok(self.tiles_x) || !tiles_ok(self.tiles_y) {
            return Err(ConfigError::Invalid(format!(
                "tile counts must be in 1..={MAX_TILES}, got {}x{}",
                self.tiles_x, self.tiles_y
            )));
        }
        for (name, v) in [("alley_x", self.alley_x), ("alley_y", self.alley_y)] {
            if !(0.0..=1.0).contains(&v) {
                return Err(ConfigError::Invalid(format!("{name} must be in [0, 1], got {v}")));
            }
        }
        if self.color_pair >= COLOR_PAIRS.len() {
            return Err(ConfigError::Invalid(format!(
                "color_pair {} out of range (0..{})",
                self.color_pair,
                COLOR_PAIRS.len()
            )));
        }
        if !positive(self.fps) {
            return Err(ConfigError::Invalid(format!("fps must be positive, got {}", self.fps)));
        }
        if !self.wave_speed.is_finite() {
            return Err(ConfigError::Invalid("wave_speed must be finite".into()));
        }
        Ok(())
    }

    pub fn to_params(&self) -> GridParams {
        GridParams {
            tiles_x: self.tiles_x,
            tiles_y: self.tiles_y,
            alley_x: self.alley_x,
            alley_y: self.alley_y,
            method: self.method,
            ease_type: self.ease_type,
            mirror: self.mirror,
            color_pair: self.color_pair,
            swap_colors: self.swap_colors,
            bezier_x: self.bezier_x,
            bezier_y: self.bezier_y,
            debug: self.debug,
        }
    }

    pub fn clock(&self) -> FrameClock {
        FrameClock::new(self.wave_speed, self.fps)
    }
}
