//! Domain layer: value types, signal processing and audio decoding
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod fft;
pub mod spectrogram;
pub mod wav;
pub mod window;

pub use entities::*;
pub use error::DomainError;
pub use spectrogram::{Peak, Spectrogram, SpectrogramParams, HOP_SIZE};
pub use wav::WavAudio;
