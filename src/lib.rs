//! a2i: spectrum analysis of audio files with named configuration profiles
//!
//! Layers, innermost first:
//! - `domain`: value types, windowing, FFT, spectrogram, WAV decoding
//! - `application`: profile and analysis services
//! - `infrastructure`: filesystem boundary and service wiring
//! - `cli`: argument parsing, dispatch, terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
