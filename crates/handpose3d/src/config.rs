//! Pipeline configuration.

use std::env;

use anyhow::{bail, Context};

use crate::normalize::Normalizer;
use crate::resolution::Resolution;

const RESOLUTION_VAR: &str = "HANDPOSE_RESOLUTION";
const OFFSET_VAR: &str = "HANDPOSE_OFFSET";
const BIAS_VAR: &str = "HANDPOSE_BIAS";

/// Parameters of the landmark-to-scene mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Resolution of the frames the detector sees. Landmarks are relative to this.
    pub capture: Resolution,
    /// Scale from the `[-1, 1]` frame range to scene units.
    pub offset: f32,
    /// Scene-space point the frame center maps to.
    pub bias: [f32; 2],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capture: Resolution::DEFAULT_CAPTURE,
            offset: Normalizer::DEFAULT_OFFSET,
            bias: Normalizer::DEFAULT_BIAS,
        }
    }
}

impl Config {
    /// Loads the defaults, overridden by any of the `HANDPOSE_*` environment variables that are
    /// set.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Some(res) = lookup(RESOLUTION_VAR) {
            config.capture = res
                .parse()
                .with_context(|| format!("invalid value for {RESOLUTION_VAR}"))?;
        }
        if let Some(offset) = lookup(OFFSET_VAR) {
            config.offset = parse_f32(&offset)
                .with_context(|| format!("invalid value for {OFFSET_VAR}"))?;
        }
        if let Some(bias) = lookup(BIAS_VAR) {
            config.bias =
                parse_pair(&bias).with_context(|| format!("invalid value for {BIAS_VAR}"))?;
        }

        log::debug!("using {config:?}");
        Ok(config)
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.capture)
            .with_offset(self.offset)
            .with_bias(self.bias)
    }
}

fn parse_f32(s: &str) -> anyhow::Result<f32> {
    let value = s
        .trim()
        .parse::<f32>()
        .with_context(|| format!("'{s}' is not a number"))?;
    if !value.is_finite() {
        bail!("'{s}' is not finite");
    }
    Ok(value)
}

fn parse_pair(s: &str) -> anyhow::Result<[f32; 2]> {
    let Some((x, y)) = s.split_once(',') else {
        bail!("expected 'x,y', got '{s}'");
    };
    Ok([parse_f32(x)?, parse_f32(y)?])
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        Config::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.capture, Resolution::new(500, 500));
        assert_eq!(config.offset, 16.0);
        assert_eq!(config.bias, [2.0, 4.0]);
        assert_eq!(config.normalizer(), Normalizer::default());
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("HANDPOSE_RESOLUTION", "640x480"),
            ("HANDPOSE_OFFSET", "8"),
            ("HANDPOSE_BIAS", "-1.5, 0"),
        ])
        .unwrap();
        assert_eq!(config.capture, Resolution::new(640, 480));
        assert_eq!(config.offset, 8.0);
        assert_eq!(config.bias, [-1.5, 0.0]);

        let norm = config.normalizer();
        assert_eq!(norm.offset(), 8.0);
        assert_eq!(norm.bias(), [-1.5, 0.0]);
    }

    #[test]
    fn rejects_invalid_values() {
        load(&[("HANDPOSE_RESOLUTION", "0x480")]).unwrap_err();
        load(&[("HANDPOSE_OFFSET", "big")]).unwrap_err();
        load(&[("HANDPOSE_OFFSET", "inf")]).unwrap_err();
        load(&[("HANDPOSE_BIAS", "1")]).unwrap_err();
        load(&[("HANDPOSE_BIAS", "1,x")]).unwrap_err();

        let err = load(&[("HANDPOSE_OFFSET", "big")]).unwrap_err();
        assert!(err.to_string().contains("HANDPOSE_OFFSET"));
    }
}
