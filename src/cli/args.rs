//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand, ValueHint};

use crate::config::{RawSettings, DEFAULT_PROFILE};
use crate::domain::{FillType, GraphMode, LineType, Pair, Rgb, WindowFunction};

/// Audio to image: spectrum analysis of audio files with named configuration profiles
#[derive(Parser, Debug)]
#[command(name = "a2i")]
#[command(author, about, long_about = None)]
#[command(disable_version_flag = true)]
#[command(after_help = "See 'a2i --help' or 'a2i --version' for more information.")]
pub struct Cli {
    /// Show version
    #[arg(short = 'V', long)]
    pub version: bool,

    /// Enable debug output (repeat for more: -d, -dd, -ddd)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Audio file to analyze (.wav, .mp3)
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: Option<String>,

    /// Configuration profile to start from
    #[arg(short, long, default_value = DEFAULT_PROFILE)]
    pub profile: String,

    #[command(flatten)]
    pub settings: SettingsArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configurations
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write configuration with name
    Write {
        /// Configuration name
        name: String,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Rename configuration name
    Rename {
        /// Current name
        old: String,
        /// New name
        new: String,
    },

    /// Write default configuration
    #[command(name = "reset-default")]
    ResetDefault,

    /// Show resolved configuration
    Show {
        /// Configuration name
        #[arg(default_value = DEFAULT_PROFILE)]
        name: String,
    },

    /// Show config file path
    Path,
}

/// Settings overrides; anything left unset comes from the profile.
#[derive(Args, Debug, Default, Clone)]
pub struct SettingsArgs {
    /// Amplitude range in dB (min,max)
    #[arg(long, value_name = "MIN,MAX", allow_hyphen_values = true)]
    pub amplitude: Option<Pair<i32>>,

    /// Frequency range in Hz (low,high)
    #[arg(long, value_name = "LOW,HIGH")]
    pub frequency: Option<Pair<u32>>,

    /// Window function (name or 0-9)
    #[arg(short, long)]
    pub window: Option<WindowFunction>,

    /// Line type (lines, bezier, bars or 0-2)
    #[arg(short, long)]
    pub line: Option<LineType>,

    /// Graph mode (linear, log or 0-1)
    #[arg(short, long)]
    pub graph: Option<GraphMode>,

    /// Normalize multiplier
    #[arg(short, long)]
    pub multiplier: Option<u32>,

    /// Frame size (>=512, power of 2)
    #[arg(short, long)]
    pub frame_size: Option<usize>,

    /// Number of previous frames (>0)
    #[arg(short = 'n', long)]
    pub frames: Option<u32>,

    /// Window size (height,width)
    #[arg(short, long, value_name = "HEIGHT,WIDTH")]
    pub size: Option<Pair<u32>>,

    /// Colormap (0-21)
    #[arg(long)]
    pub colormap: Option<u32>,

    /// Fill type (none, solid, gradient or 0-2)
    #[arg(long)]
    pub fill: Option<FillType>,

    /// Border line
    #[arg(short, long)]
    pub border: bool,

    /// Line color (r,g,b)
    #[arg(long, value_name = "R,G,B")]
    pub line_color: Option<Rgb>,

    /// Underline color (r,g,b)
    #[arg(long, value_name = "R,G,B")]
    pub underline_color: Option<Rgb>,

    /// Grid
    #[arg(long)]
    pub grid: bool,

    /// Gradient coefficient (0-255)
    #[arg(long)]
    pub gradient: Option<u32>,

    /// Grid line color (r,g,b)
    #[arg(long, value_name = "R,G,B")]
    pub grid_line_color: Option<Rgb>,

    /// Grid text color (r,g,b)
    #[arg(long, value_name = "R,G,B")]
    pub grid_text_color: Option<Rgb>,

    /// Volume level (0.0-1.0)
    #[arg(short, long)]
    pub volume: Option<f64>,

    /// Audio only, no spectrum
    #[arg(long)]
    pub only_audio: bool,
}

impl From<&SettingsArgs> for RawSettings {
    fn from(args: &SettingsArgs) -> Self {
        // switches only override when given
        let flag = |set: bool| set.then_some(true);
        RawSettings {
            amplitude_range: args.amplitude,
            frequency_range: args.frequency,
            window: args.window,
            line_type: args.line,
            graph_mode: args.graph,
            multiplier: args.multiplier,
            frame_size: args.frame_size,
            previous_frames: args.frames,
            window_size: args.size,
            colormap: args.colormap,
            fill: args.fill,
            border: flag(args.border),
            line_color: args.line_color,
            underline_color: args.underline_color,
            grid: flag(args.grid),
            gradient_coefficient: args.gradient,
            grid_line_color: args.grid_line_color,
            grid_text_color: args.grid_text_color,
            volume: args.volume,
            only_audio: flag(args.only_audio),
            unknown: Default::default(),
        }
    }
}
