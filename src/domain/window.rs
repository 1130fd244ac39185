//! Window functions (periodic form over N = frame size)

use std::f64::consts::PI;

use crate::domain::WindowFunction;

const HANN_POISSON_ALPHA: f64 = 2.0;

/// Sum of cosines `a0 - a1 cos(x) + a2 cos(2x) - a3 cos(3x) + ...`
fn cosine_sum(coefficients: &[f64], x: f64) -> f64 {
    coefficients
        .iter()
        .enumerate()
        .map(|(k, a)| {
            let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
            sign * a * (k as f64 * x).cos()
        })
        .sum()
}

impl WindowFunction {
    /// Coefficient for sample `n` of a window of length `size`.
    pub fn coefficient(self, n: usize, size: usize) -> f64 {
        let size = size as f64;
        let n = n as f64;
        let x = 2.0 * PI * n / size;
        match self {
            WindowFunction::Sine => (PI * n / size).sin(),
            WindowFunction::Hann => cosine_sum(&[0.5, 0.5], x),
            WindowFunction::Hamming => cosine_sum(&[25.0 / 46.0, 21.0 / 46.0], x),
            WindowFunction::Blackman => cosine_sum(&[0.42, 0.5, 0.08], x),
            WindowFunction::Nuttall => {
                cosine_sum(&[0.355768, 0.487396, 0.144232, 0.012604], x)
            }
            WindowFunction::BlackmanNuttall => {
                cosine_sum(&[0.3635819, 0.4891775, 0.1365995, 0.0106411], x)
            }
            WindowFunction::BlackmanHarris => {
                cosine_sum(&[0.35875, 0.48829, 0.14128, 0.01168], x)
            }
            WindowFunction::FlatTop => cosine_sum(
                &[0.21557895, 0.41663158, 0.277263158, 0.083578947, 0.006947368],
                x,
            ),
            WindowFunction::BartlettHann => {
                0.62 - 0.48 * (n / size - 0.5).abs() - 0.38 * x.cos()
            }
            WindowFunction::HannPoisson => {
                let hann = cosine_sum(&[0.5, 0.5], x);
                hann * (-HANN_POISSON_ALPHA * (size - 2.0 * n).abs() / size).exp()
            }
        }
    }

    /// All coefficients for a window of length `size`.
    pub fn coefficients(self, size: usize) -> Vec<f32> {
        (0..size)
            .map(|n| self.coefficient(n, size) as f32)
            .collect()
    }
}
