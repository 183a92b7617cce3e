//! Combines orientation estimates into the final transform of a tracked part.

use std::fmt;

use nalgebra::UnitQuaternion;

use crate::landmark::RawLandmark;
use crate::normalize::NormalizedPoint;
use crate::orientation::{self, RotationAxis};
use crate::scene::Transform;

/// Composes two rotations, applying `outer` as the outer frame: `outer * inner`.
///
/// Quaternion multiplication does not commute, and callers rely on this exact order.
#[inline]
pub fn compose(outer: UnitQuaternion<f32>, inner: UnitQuaternion<f32>) -> UnitQuaternion<f32> {
    outer * inner
}

/// Computes part transforms for a single frame.
///
/// A part that supplies a comparison point gets two independent orientation estimates:
///
/// - a part-local one about the Z axis, pointing from the part's origin to the comparison point,
/// - a hand-global one about the Y axis, pointing from the palm base to the thumb base. This one
///   is the same for every part in the frame.
///
/// They are combined with [`compose`], part-local first. Together they approximate the hand's
/// twist, which a single planar estimate cannot capture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseComposer {
    twist: UnitQuaternion<f32>,
}

impl PoseComposer {
    /// Creates a composer for a frame in which the palm base and thumb base were detected at
    /// `palm` and `thumb`.
    pub fn new(palm: NormalizedPoint, thumb: NormalizedPoint) -> Self {
        Self {
            twist: orientation::solve(palm, thumb, RotationAxis::Y),
        }
    }

    /// Returns the hand-global rotation about the Y axis.
    #[inline]
    pub fn twist(&self) -> UnitQuaternion<f32> {
        self.twist
    }

    /// Computes the orientation of a part located at `origin` that points towards `comparison`.
    pub fn solve(
        &self,
        origin: NormalizedPoint,
        comparison: NormalizedPoint,
    ) -> UnitQuaternion<f32> {
        let heading = orientation::solve(origin, comparison, RotationAxis::Z);
        compose(heading, self.twist)
    }

    /// Computes the transform of a part located at `origin`.
    ///
    /// With a `comparison` point, the orientation is inferred via [`PoseComposer::solve`].
    /// Otherwise, the part takes over the orientation returned by `reference`, which should be the
    /// current orientation of the part it follows. `reference` is only called in that case.
    pub fn pose(
        &self,
        origin: NormalizedPoint,
        comparison: Option<NormalizedPoint>,
        reference: impl FnOnce() -> UnitQuaternion<f32>,
    ) -> Transform {
        let orientation = match comparison {
            Some(comparison) => self.solve(origin, comparison),
            None => reference(),
        };
        Transform {
            position: origin,
            orientation,
        }
    }
}

/// Coarse classification of which side of the hand faces the camera.
///
/// This is only informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Front,
    Back,
}

impl Facing {
    /// Classifies the hand by comparing the raw palm base and thumb base landmarks.
    ///
    /// The landmarks are compared as text: the hand is facing front when the `x,y,z` form of the
    /// palm base (see [`RawLandmark`]'s `Display` impl) sorts before that of the thumb base,
    /// character by character. This is not a numeric comparison. `[99, 0, 0]` does not sort
    /// before `[100, 0, 0]`, since `'9'` comes after `'1'`.
    pub fn classify(palm_base: RawLandmark, thumb_base: RawLandmark) -> Self {
        if palm_base.to_string() < thumb_base.to_string() {
            Self::Front
        } else {
            Self::Back
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
