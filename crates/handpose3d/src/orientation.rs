//! Orientation inference from pairs of points.

use std::{f32::consts::FRAC_PI_2, fmt, str::FromStr};

use anyhow::bail;
use nalgebra::{Unit, UnitQuaternion, Vector3};

use crate::normalize::NormalizedPoint;

/// The quarter turn between the +X axis and the rest pose of tracked parts, which point up (+Y).
pub const REST_POSE_OFFSET: f32 = FRAC_PI_2;

/// A principal scene axis to rotate about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationAxis {
    X,
    Y,
    Z,
}

impl RotationAxis {
    /// Returns the unit basis vector of this axis.
    pub fn unit_vector(&self) -> Unit<Vector3<f32>> {
        match self {
            Self::X => Vector3::x_axis(),
            Self::Y => Vector3::y_axis(),
            Self::Z => Vector3::z_axis(),
        }
    }
}

impl FromStr for RotationAxis {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "x" | "X" => Self::X,
            "y" | "Y" => Self::Y,
            "z" | "Z" => Self::Z,
            _ => bail!("invalid rotation axis '{s}'"),
        })
    }
}

impl fmt::Display for RotationAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        })
    }
}

/// Computes the counterclockwise angle of the direction from `origin` to `target` in the XY plane,
/// measured from the +X axis.
///
/// Z coordinates are ignored. Coincident points yield an angle of 0.
pub fn heading_radians(origin: NormalizedPoint, target: NormalizedPoint) -> f32 {
    (target.y - origin.y).atan2(target.x - origin.x)
}

/// Computes the rotation about `axis` that turns the upright rest pose towards the direction from
/// `origin` to `target`.
///
/// Only the XY components of the points are considered, so this can only ever recover a planar
/// rotation. If `origin == target`, the result is a rotation by `-REST_POSE_OFFSET` about `axis`.
pub fn solve(
    origin: NormalizedPoint,
    target: NormalizedPoint,
    axis: RotationAxis,
) -> UnitQuaternion<f32> {
    let angle = heading_radians(origin, target) - REST_POSE_OFFSET;
    UnitQuaternion::from_axis_angle(&axis.unit_vector(), angle)
}
