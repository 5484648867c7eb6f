//! Exact note durations
//!
//! Every legal jianpu duration is a dyadic fraction of a beat, optionally
//! dilated by an augmentation dot (x3/2). Storing them as rationals keeps
//! measure totals exact no matter how many sixteenths a bar holds.

use num_rational::Ratio;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use crate::error::{JianpuError, Result};

/// Duration measured in beats
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(Ratio<u64>);

impl Duration {
    /// Zero-length duration (empty measure total)
    pub fn zero() -> Self {
        Duration(Ratio::from_integer(0))
    }

    /// One whole beat (base note, sustain dash)
    pub fn beat() -> Self {
        Duration(Ratio::from_integer(1))
    }

    /// Build from an exact numerator/denominator pair
    pub fn from_ratio(numer: u64, denom: u64) -> Self {
        Duration(Ratio::new(numer, denom))
    }

    /// Apply the augmentation dot (x1.5)
    pub fn dotted(self) -> Self {
        Duration(self.0 * Ratio::new(3, 2))
    }

    pub fn numer(&self) -> u64 {
        *self.0.numer()
    }

    pub fn denom(&self) -> u64 {
        *self.0.denom()
    }

    /// Floating-point beats, for tolerance checks and display
    pub fn as_f64(&self) -> f64 {
        self.numer() as f64 / self.denom() as f64
    }

    /// Parse a decimal beat count such as `0.375` or `2` back into an exact duration
    pub fn parse_decimal(text: &str) -> Result<Self> {
        let text = text.trim();
        let malformed = || JianpuError::MalformedTrace(text.to_string());

        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i, f),
            None => (text, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(malformed());
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
            || frac_part.len() > 12
        {
            return Err(malformed());
        }

        let whole: u64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| malformed())?
        };
        let scale = 10u64.pow(frac_part.len() as u32);
        let frac: u64 = if frac_part.is_empty() {
            0
        } else {
            frac_part.parse().map_err(|_| malformed())?
        };
        let numer = whole
            .checked_mul(scale)
            .and_then(|n| n.checked_add(frac))
            .ok_or_else(malformed)?;

        Ok(Duration(Ratio::new(numer, scale)))
    }
}

impl Default for Duration {
    fn default() -> Self {
        Duration::zero()
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration(self.0 + rhs.0)
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Duration>>(iter: I) -> Duration {
        iter.fold(Duration::zero(), |acc, d| acc + d)
    }
}

// Denominators are powers of two, so the f64 rendering is exact
// ("1", "0.5", "0.375", "1.5").
impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_f64())
    }
}

impl Serialize for Duration {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let beats = f64::deserialize(deserializer)?;
        Duration::parse_decimal(&beats.to_string()).map_err(serde::de::Error::custom)
    }
}
