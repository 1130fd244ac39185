//! Domain entities: value types shared by settings and the spectrogram

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// RGB color, written as `"r,g,b"` in config files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Rgb {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidColor {
            value: s.to_string(),
        };
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<u8>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;
        match parts.as_slice() {
            [r, g, b] => Ok(Self::new(*r, *g, *b)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// Two related numbers: a range (min, max) or a size (height, width).
///
/// Serialized as a JSON array `[first, second]`; also accepts the
/// `"first,second"` string form used on the command line and in env vars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "PairRepr<T>",
    into = "(T, T)",
    bound(
        serialize = "T: Copy + Serialize",
        deserialize = "T: FromStr + Deserialize<'de>"
    )
)]
pub struct Pair<T> {
    pub first: T,
    pub second: T,
}

impl<T> Pair<T> {
    pub const fn new(first: T, second: T) -> Self {
        Self { first, second }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PairRepr<T> {
    Array(T, T),
    Text(String),
}

impl<T: FromStr> TryFrom<PairRepr<T>> for Pair<T> {
    type Error = DomainError;

    fn try_from(repr: PairRepr<T>) -> Result<Self, Self::Error> {
        match repr {
            PairRepr::Array(first, second) => Ok(Self::new(first, second)),
            PairRepr::Text(s) => s.parse(),
        }
    }
}

impl<T> From<Pair<T>> for (T, T) {
    fn from(p: Pair<T>) -> Self {
        (p.first, p.second)
    }
}

impl<T: FromStr> FromStr for Pair<T> {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidPair {
            value: s.to_string(),
        };
        let (first, second) = s.split_once(',').ok_or_else(invalid)?;
        let first = first.trim().parse().map_err(|_| invalid())?;
        let second = second.trim().parse().map_err(|_| invalid())?;
        Ok(Self::new(first, second))
    }
}

impl<T: fmt::Display> fmt::Display for Pair<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.first, self.second)
    }
}

/// Serialized form of a settings enum: its name or its index.
#[derive(Deserialize)]
#[serde(untagged)]
enum EnumRepr {
    Index(u64),
    Name(String),
}

/// Generates `FromStr`/`Display` for a settings enum and routes
/// deserialization through `FromStr`.
///
/// Accepts either the snake_case name or the numeric index
/// (the index is the order of declaration).
macro_rules! named_enum {
    ($ty:ident, $label:literal, [$($variant:ident => $name:literal),+ $(,)?]) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl FromStr for $ty {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                if let Ok(index) = s.parse::<usize>() {
                    return Self::ALL.get(index).copied().ok_or_else(|| {
                        DomainError::setting(
                            $label,
                            format!("index {} out of range (0-{})", index, Self::ALL.len() - 1),
                        )
                    });
                }
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name() == s.replace('-', "_"))
                    .ok_or_else(|| DomainError::setting($label, format!("unknown value '{}'", s)))
            }
        }

        impl TryFrom<EnumRepr> for $ty {
            type Error = DomainError;

            fn try_from(repr: EnumRepr) -> Result<Self, Self::Error> {
                match repr {
                    EnumRepr::Index(index) => index.to_string().parse(),
                    EnumRepr::Name(name) => name.parse(),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

/// Window function applied to each frame before the FFT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "EnumRepr")]
pub enum WindowFunction {
    Sine,
    Hann,
    Hamming,
    Blackman,
    Nuttall,
    BlackmanNuttall,
    BlackmanHarris,
    FlatTop,
    BartlettHann,
    HannPoisson,
}

named_enum!(WindowFunction, "window", [
    Sine => "sine",
    Hann => "hann",
    Hamming => "hamming",
    Blackman => "blackman",
    Nuttall => "nuttall",
    BlackmanNuttall => "blackman_nuttall",
    BlackmanHarris => "blackman_harris",
    FlatTop => "flat_top",
    BartlettHann => "bartlett_hann",
    HannPoisson => "hann_poisson",
]);

/// How spectrum points are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "EnumRepr")]
pub enum LineType {
    Lines,
    Bezier,
    Bars,
}

named_enum!(LineType, "line_type", [
    Lines => "lines",
    Bezier => "bezier",
    Bars => "bars",
]);

/// Frequency axis scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "EnumRepr")]
pub enum GraphMode {
    Linear,
    Log,
}

named_enum!(GraphMode, "graph_mode", [
    Linear => "linear",
    Log => "log",
]);

/// Area fill below the spectrum line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "EnumRepr")]
pub enum FillType {
    None,
    Solid,
    Gradient,
}

named_enum!(FillType, "fill", [
    None => "none",
    Solid => "solid",
    Gradient => "gradient",
]);
