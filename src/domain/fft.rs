//! In-place iterative radix-2 FFT

use std::f64::consts::PI;
use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Squared magnitude `|z|²`.
    pub fn norm_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }
}

impl Add for Complex {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

/// Forward DFT of `buf` in place. Length must be a power of two.
pub fn fft(buf: &mut [Complex]) {
    let n = buf.len();
    debug_assert!(n.is_power_of_two(), "fft length must be a power of two");
    if n <= 1 {
        return;
    }

    // bit-reversal permutation
    let bits = n.trailing_zeros();
    for i in 0..n {
        let j = i.reverse_bits() >> (usize::BITS - bits);
        if i < j {
            buf.swap(i, j);
        }
    }

    let mut len = 2;
    while len <= n {
        let angle = -2.0 * PI / len as f64;
        let step = Complex::new(angle.cos(), angle.sin());
        for start in (0..n).step_by(len) {
            let mut w = Complex::new(1.0, 0.0);
            for k in 0..len / 2 {
                let even = buf[start + k];
                let odd = buf[start + k + len / 2] * w;
                buf[start + k] = even + odd;
                buf[start + k + len / 2] = even - odd;
                w = w * step;
            }
        }
        len <<= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_impulse_when_transformed_then_flat_spectrum() {
        let mut buf = vec![Complex::default(); 8];
        buf[0] = Complex::new(1.0, 0.0);
        fft(&mut buf);
        for z in &buf {
            assert!((z.re - 1.0).abs() < 1e-12 && z.im.abs() < 1e-12);
        }
    }

    #[test]
    fn given_cosine_when_transformed_then_energy_in_matching_bins() {
        let n = 64;
        let bin = 5;
        let mut buf: Vec<Complex> = (0..n)
            .map(|i| {
                let x = 2.0 * PI * bin as f64 * i as f64 / n as f64;
                Complex::new(x.cos(), 0.0)
            })
            .collect();
        fft(&mut buf);

        assert!((buf[bin].re - n as f64 / 2.0).abs() < 1e-9);
        assert!((buf[n - bin].re - n as f64 / 2.0).abs() < 1e-9);
        for (i, z) in buf.iter().enumerate() {
            if i != bin && i != n - bin {
                assert!(z.norm_sqr() < 1e-12, "leak at bin {i}");
            }
        }
    }

    #[test]
    fn given_constant_when_transformed_then_only_dc() {
        let mut buf = vec![Complex::new(2.0, 0.0); 16];
        fft(&mut buf);
        assert!((buf[0].re - 32.0).abs() < 1e-12);
        assert!(buf[1..].iter().all(|z| z.norm_sqr() < 1e-18));
    }
}
