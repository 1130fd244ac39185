//! Settings model with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Profile in `~/.a2i/config.json` (see `ProfileService`)
//! 3. Environment variables: `A2I_*` prefix
//! 4. Command line flags

use std::collections::BTreeMap;
use std::path::PathBuf;

use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{
    DomainError, FillType, GraphMode, LineType, Pair, Rgb, SpectrogramParams, WindowFunction,
};

/// Directory below the home directory holding the config file.
pub const CONFIG_DIR_NAME: &str = ".a2i";
/// Config file name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.json";
/// Home-relative config path as shown to users.
pub const DISPLAY_CONFIG_PATH: &str = "~/.a2i/config.json";
/// Profile used when none is named.
pub const DEFAULT_PROFILE: &str = "default";
/// Prefix of environment variables overriding settings.
pub const ENV_PREFIX: &str = "A2I";

const MIN_FRAME_SIZE: usize = 512;
const MAX_FRAME_SIZE: usize = 1 << 20;
const MAX_COLORMAP: u32 = 21;

/// Analysis and rendering settings stored per profile.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Settings {
    /// dB range as (min, max)
    pub amplitude_range: Pair<i32>,
    /// Hz range as (low, high)
    pub frequency_range: Pair<u32>,
    pub window: WindowFunction,
    pub line_type: LineType,
    pub graph_mode: GraphMode,
    /// Factor applied to `log10(power)` when converting to dB
    pub multiplier: u32,
    /// Samples per FFT frame (power of two, >= 512)
    pub frame_size: usize,
    /// Number of previous frames kept as fading trails
    pub previous_frames: u32,
    /// Output size as (height, width)
    pub window_size: Pair<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colormap: Option<u32>,
    pub fill: FillType,
    pub border: bool,
    pub line_color: Rgb,
    pub underline_color: Rgb,
    pub grid: bool,
    pub gradient_coefficient: u32,
    pub grid_line_color: Rgb,
    pub grid_text_color: Rgb,
    pub volume: f64,
    pub only_audio: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            amplitude_range: Pair::new(-90, 50),
            frequency_range: Pair::new(20, 20000),
            window: WindowFunction::HannPoisson,
            line_type: LineType::Lines,
            graph_mode: GraphMode::Log,
            multiplier: 20,
            frame_size: 65536,
            previous_frames: 20,
            window_size: Pair::new(400, 2100),
            colormap: None,
            fill: FillType::Gradient,
            border: false,
            line_color: Rgb::new(255, 255, 255),
            underline_color: Rgb::new(127, 127, 127),
            grid: false,
            gradient_coefficient: 127,
            grid_line_color: Rgb::new(79, 73, 80),
            grid_text_color: Rgb::new(51, 186, 243),
            volume: 0.8,
            only_audio: false,
        }
    }
}

/// Raw settings for intermediate parsing (every field optional).
///
/// Keys that are not settings are collected in `unknown` so callers can
/// report them instead of failing.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RawSettings {
    pub amplitude_range: Option<Pair<i32>>,
    pub frequency_range: Option<Pair<u32>>,
    pub window: Option<WindowFunction>,
    pub line_type: Option<LineType>,
    pub graph_mode: Option<GraphMode>,
    pub multiplier: Option<u32>,
    pub frame_size: Option<usize>,
    pub previous_frames: Option<u32>,
    pub window_size: Option<Pair<u32>>,
    pub colormap: Option<u32>,
    pub fill: Option<FillType>,
    pub border: Option<bool>,
    pub line_color: Option<Rgb>,
    pub underline_color: Option<Rgb>,
    pub grid: Option<bool>,
    pub gradient_coefficient: Option<u32>,
    pub grid_line_color: Option<Rgb>,
    pub grid_text_color: Option<Rgb>,
    pub volume: Option<f64>,
    pub only_audio: Option<bool>,
    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_json::Value>,
}

/// Home directory, falling back to a literal `~`.
fn home_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~"))
}

/// Get the config directory (`~/.a2i`).
pub fn config_dir() -> PathBuf {
    home_dir().join(CONFIG_DIR_NAME)
}

/// Get the path to the config file (`~/.a2i/config.json`).
pub fn config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

impl Settings {
    /// Merge overlay onto self (base): every field set in the overlay wins.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            amplitude_range: overlay.amplitude_range.unwrap_or(self.amplitude_range),
            frequency_range: overlay.frequency_range.unwrap_or(self.frequency_range),
            window: overlay.window.unwrap_or(self.window),
            line_type: overlay.line_type.unwrap_or(self.line_type),
            graph_mode: overlay.graph_mode.unwrap_or(self.graph_mode),
            multiplier: overlay.multiplier.unwrap_or(self.multiplier),
            frame_size: overlay.frame_size.unwrap_or(self.frame_size),
            previous_frames: overlay.previous_frames.unwrap_or(self.previous_frames),
            window_size: overlay.window_size.unwrap_or(self.window_size),
            colormap: overlay.colormap.or(self.colormap),
            fill: overlay.fill.unwrap_or(self.fill),
            border: overlay.border.unwrap_or(self.border),
            line_color: overlay.line_color.unwrap_or(self.line_color),
            underline_color: overlay.underline_color.unwrap_or(self.underline_color),
            grid: overlay.grid.unwrap_or(self.grid),
            gradient_coefficient: overlay
                .gradient_coefficient
                .unwrap_or(self.gradient_coefficient),
            grid_line_color: overlay.grid_line_color.unwrap_or(self.grid_line_color),
            grid_text_color: overlay.grid_text_color.unwrap_or(self.grid_text_color),
            volume: overlay.volume.unwrap_or(self.volume),
            only_audio: overlay.only_audio.unwrap_or(self.only_audio),
        }
    }

    /// Apply `A2I_*` environment variables as explicit overrides.
    ///
    /// e.g. `A2I_FRAME_SIZE=1024`, `A2I_WINDOW=hann`, `A2I_LINE_COLOR=1,2,3`.
    pub fn apply_env_overrides(&self) -> Result<Self, ApplicationError> {
        self.merge_env(Environment::with_prefix(ENV_PREFIX))
    }

    fn merge_env(&self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env.try_parsing(true))
            .build()
            .map_err(config_err)?;
        let raw: RawSettings = config.try_deserialize().map_err(config_err)?;
        Ok(self.merge_with(&raw))
    }

    /// Check value ranges that the types alone do not enforce.
    pub fn validate(&self) -> Result<(), DomainError> {
        let Pair { first: min, second: max } = self.amplitude_range;
        if min >= max {
            return Err(DomainError::setting(
                "amplitude_range",
                format!("min ({min}) must be below max ({max})"),
            ));
        }
        let Pair { first: low, second: high } = self.frequency_range;
        if low == 0 || low >= high {
            return Err(DomainError::setting(
                "frequency_range",
                format!("expected 0 < low < high, got {low},{high}"),
            ));
        }
        if self.multiplier == 0 {
            return Err(DomainError::setting("multiplier", "must be > 0"));
        }
        if self.frame_size < MIN_FRAME_SIZE || !self.frame_size.is_power_of_two() {
            return Err(DomainError::setting(
                "frame_size",
                format!(
                    "must be >= {MIN_FRAME_SIZE} and a power of 2 (512, 1024, 2048 etc), got {}",
                    self.frame_size
                ),
            ));
        }
        if self.frame_size > MAX_FRAME_SIZE {
            return Err(DomainError::setting(
                "frame_size",
                format!("must be <= {MAX_FRAME_SIZE}, got {}", self.frame_size),
            ));
        }
        if self.previous_frames == 0 {
            return Err(DomainError::setting("previous_frames", "must be > 0"));
        }
        if self.window_size.first == 0 || self.window_size.second == 0 {
            return Err(DomainError::setting(
                "window_size",
                "height and width must be > 0",
            ));
        }
        if let Some(colormap) = self.colormap {
            if colormap > MAX_COLORMAP {
                return Err(DomainError::setting(
                    "colormap",
                    format!("must be in range 0-{MAX_COLORMAP}, got {colormap}"),
                ));
            }
        }
        if self.gradient_coefficient > 255 {
            return Err(DomainError::setting(
                "gradient_coefficient",
                format!("must be in range 0-255, got {}", self.gradient_coefficient),
            ));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(DomainError::setting(
                "volume",
                format!("must be in range 0.0-1.0, got {}", self.volume),
            ));
        }
        Ok(())
    }

    /// Spectrogram parameters for audio at `sample_rate`.
    pub fn spectrogram_params(&self, sample_rate: u32) -> SpectrogramParams {
        SpectrogramParams {
            sample_rate,
            frame_size: self.frame_size,
            window: self.window,
            multiplier: self.multiplier as f32,
            amplitude_range: self.amplitude_range,
            frequency_range: self.frequency_range,
        }
    }

    /// Show the settings as pretty JSON.
    pub fn to_json(&self) -> Result<String, ApplicationError> {
        serde_json::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {e}"),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
