//! Sliding-window spectrum analysis
//!
//! Samples arrive in hops of [`HOP_SIZE`]. Once `frame_size` samples are
//! buffered, [`Spectrogram::process`] windows the frame, transforms it and
//! converts the first half of the bins to decibels clamped to the amplitude
//! range. Each later hop drops the oldest samples so consecutive frames
//! overlap by `frame_size - HOP_SIZE`.

use std::collections::VecDeque;

use tracing::trace;

use crate::domain::fft::{fft, Complex};
use crate::domain::{Pair, WindowFunction};

/// Number of samples delivered per hop.
pub const HOP_SIZE: usize = 512;

/// Floor added to the power before taking the logarithm.
const POWER_FLOOR: f64 = 1e-10;

#[derive(Debug, Clone, PartialEq)]
pub struct SpectrogramParams {
    pub sample_rate: u32,
    pub frame_size: usize,
    pub window: WindowFunction,
    pub multiplier: f32,
    /// dB range as (min, max)
    pub amplitude_range: Pair<i32>,
    /// Hz range as (low, high)
    pub frequency_range: Pair<u32>,
}

/// Loudest bin of a processed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    pub frequency: f64,
    pub level: f32,
}

#[derive(Debug)]
pub struct Spectrogram {
    params: SpectrogramParams,
    window: Vec<f32>,
    input: VecDeque<f32>,
    scratch: Vec<Complex>,
    levels: Vec<f32>,
}

impl Spectrogram {
    pub fn new(params: SpectrogramParams) -> Self {
        let n = params.frame_size;
        Self {
            window: params.window.coefficients(n),
            input: VecDeque::with_capacity(n + HOP_SIZE),
            scratch: vec![Complex::default(); n],
            levels: vec![params.amplitude_range.first as f32; n / 2],
            params,
        }
    }

    /// Append samples, discarding the oldest beyond one frame.
    ///
    /// Returns `true` when a full frame is buffered.
    pub fn push_samples(&mut self, samples: &[f32]) -> bool {
        self.input.extend(samples.iter().copied());
        let excess = self.input.len().saturating_sub(self.params.frame_size);
        self.input.drain(..excess);
        self.is_ready()
    }

    pub fn is_ready(&self) -> bool {
        self.input.len() == self.params.frame_size
    }

    /// Window, transform and normalize the buffered frame.
    ///
    /// Does nothing until a full frame is buffered.
    pub fn process(&mut self) {
        if !self.is_ready() {
            return;
        }
        for ((slot, sample), w) in self.scratch.iter_mut().zip(&self.input).zip(&self.window) {
            *slot = Complex::new(f64::from(sample * w), 0.0);
        }
        fft(&mut self.scratch);
        self.normalize();
        trace!(bins = self.levels.len(), "frame processed");
    }

    fn normalize(&mut self) {
        let n = self.params.frame_size as f64;
        let min = self.params.amplitude_range.first as f32;
        let max = self.params.amplitude_range.second as f32;
        let multiplier = f64::from(self.params.multiplier);
        for (level, z) in self.levels.iter_mut().zip(&self.scratch) {
            let db = (multiplier * (z.norm_sqr() / n + POWER_FLOOR).log10()) as f32;
            *level = db.clamp(min, max);
        }
    }

    /// Levels in dB for bins `0..frame_size / 2`.
    pub fn levels(&self) -> &[f32] {
        &self.levels
    }

    pub fn bin_frequency(&self, bin: usize) -> f64 {
        bin as f64 * f64::from(self.params.sample_rate) / self.params.frame_size as f64
    }

    /// Frequency resolution in Hz.
    pub fn bin_width(&self) -> f64 {
        self.bin_frequency(1)
    }

    /// Loudest bin inside the frequency range.
    pub fn peak(&self) -> Option<Peak> {
        let low = f64::from(self.params.frequency_range.first);
        let high = f64::from(self.params.frequency_range.second);
        self.levels
            .iter()
            .enumerate()
            .map(|(bin, level)| (self.bin_frequency(bin), *level))
            .filter(|(frequency, _)| *frequency >= low && *frequency <= high)
            .fold(None, |best: Option<Peak>, (frequency, level)| match best {
                Some(p) if p.level >= level => Some(p),
                _ => Some(Peak { frequency, level }),
            })
    }
}
