//! Types for representing capture resolutions.

use std::{fmt, str::FromStr};

use anyhow::{bail, Context};

/// Resolution (`width x height`) of a captured video frame.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    width: u32,
    height: u32,
}

impl Resolution {
    /// The capture resolution the hand detector is fed with by default: `500x500`.
    pub const DEFAULT_CAPTURE: Self = Self {
        width: 500,
        height: 500,
    };

    /// Creates a new [`Resolution`] of `width x height`.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the width of this [`Resolution`].
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of this [`Resolution`].
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns whether either dimension is 0.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn num_pixels(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Parses a resolution written as `WIDTHxHEIGHT`, eg. `640x480`.
///
/// Resolutions with a width or height of 0 are rejected.
impl FromStr for Resolution {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((w, h)) = s.trim().split_once(['x', 'X']) else {
            bail!("invalid resolution '{s}', expected WIDTHxHEIGHT");
        };
        let width = w
            .trim()
            .parse::<u32>()
            .with_context(|| format!("invalid width in resolution '{s}'"))?;
        let height = h
            .trim()
            .parse::<u32>()
            .with_context(|| format!("invalid height in resolution '{s}'"))?;

        let res = Self::new(width, height);
        if res.is_empty() {
            bail!("resolution '{s}' has a zero dimension");
        }
        Ok(res)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
