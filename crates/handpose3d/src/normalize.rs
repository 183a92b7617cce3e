//! Mapping from image-space landmarks to scene-space points.

use nalgebra::Point3;

use crate::landmark::RawLandmark;
use crate::resolution::Resolution;

/// A landmark position in scene units.
///
/// Scene space has Y pointing up. The Z coordinate of normalized points is always 0.
pub type NormalizedPoint = Point3<f32>;

/// Maps pixel-space landmarks into a bounded, centered region of the scene.
///
/// Each image axis is first remapped from `[0, size]` to `[-1, 1]`, then scaled by
/// [`Normalizer::offset`] and moved by [`Normalizer::bias`], so that the frame center ends up at
/// the bias point in front of the camera:
///
/// ```text
/// x' =  ((2x - W) / W) * offset + bias.x
/// y' = -((2y - H) / H) * offset + bias.y
/// z' = 0
/// ```
///
/// The Y axis is flipped since image rows grow downwards.
///
/// A capture resolution with a zero width or height makes the result undefined (the divisions
/// produce NaN or infinity). [`Resolution`]s parsed from configuration can never be empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    capture: Resolution,
    offset: f32,
    bias: [f32; 2],
}

impl Normalizer {
    /// Visual scale tying the hand's on-screen size to scene units.
    pub const DEFAULT_OFFSET: f32 = 16.0;

    /// Places the hand in front of the default camera rather than at the scene origin.
    pub const DEFAULT_BIAS: [f32; 2] = [2.0, 4.0];

    /// Creates a normalizer for landmarks detected in frames of the given resolution.
    pub fn new(capture: Resolution) -> Self {
        Self {
            capture,
            offset: Self::DEFAULT_OFFSET,
            bias: Self::DEFAULT_BIAS,
        }
    }

    pub fn with_offset(self, offset: f32) -> Self {
        Self { offset, ..self }
    }

    pub fn with_bias(self, bias: [f32; 2]) -> Self {
        Self { bias, ..self }
    }

    /// Returns the resolution of the frames the landmarks are detected in.
    #[inline]
    pub fn capture(&self) -> Resolution {
        self.capture
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[inline]
    pub fn bias(&self) -> [f32; 2] {
        self.bias
    }

    /// Maps `landmark` to scene space.
    ///
    /// This is a pure function of `landmark` and the parameters of `self`.
    pub fn normalize(&self, landmark: RawLandmark) -> NormalizedPoint {
        let w = self.capture.width() as f32;
        let h = self.capture.height() as f32;
        let x = ((landmark.x() * 2.0 - w) / w) * self.offset + self.bias[0];
        let y = -((landmark.y() * 2.0 - h) / h) * self.offset + self.bias[1];
        NormalizedPoint::new(x, y, 0.0)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Resolution::DEFAULT_CAPTURE)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn norm() -> Normalizer {
        Normalizer::new(Resolution::new(500, 500))
    }

    #[test]
    fn center_maps_to_bias() {
        let norm = norm();
        for z in [0.0, -13.0, 42.5] {
            let p = norm.normalize(RawLandmark::new([250.0, 250.0, z]));
            assert_eq!(p, NormalizedPoint::new(2.0, 4.0, 0.0));
        }

        let norm = Normalizer::new(Resolution::new(640, 480)).with_bias([-1.0, 0.5]);
        assert_eq!(
            norm.normalize(RawLandmark::new([320.0, 240.0, 7.0])),
            NormalizedPoint::new(-1.0, 0.5, 0.0)
        );
    }

    #[test]
    fn frame_edges() {
        let norm = norm();
        assert_eq!(norm.normalize(RawLandmark::new([0.0, 250.0, 0.0])).x, -16.0 + 2.0);
        assert_eq!(norm.normalize(RawLandmark::new([500.0, 250.0, 0.0])).x, 16.0 + 2.0);
        // Top of the image is the top of the scene.
        assert_eq!(norm.normalize(RawLandmark::new([250.0, 0.0, 0.0])).y, 16.0 + 4.0);
        assert_eq!(norm.normalize(RawLandmark::new([250.0, 500.0, 0.0])).y, -16.0 + 4.0);
    }

    #[test]
    fn linear_in_pixels() {
        let norm = norm().with_offset(3.0);
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        for _ in 0..100 {
            let x = rng.f32() * 500.0;
            let y = rng.f32() * 500.0;
            let p = norm.normalize(RawLandmark::new([x, y, rng.f32()]));
            assert_relative_eq!(p.x, (x / 250.0 - 1.0) * 3.0 + 2.0, epsilon = 1e-4);
            assert_relative_eq!(p.y, (1.0 - y / 250.0) * 3.0 + 4.0, epsilon = 1e-4);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn deterministic() {
        let norm = norm();
        let lm = RawLandmark::new([123.4, 321.0, 5.0]);
        assert_eq!(norm.normalize(lm), norm.normalize(lm));
    }
}
