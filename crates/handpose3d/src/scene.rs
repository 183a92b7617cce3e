//! The interface to the scene that displays the tracked parts.

use std::fmt;

use nalgebra::{Point3, UnitQuaternion};

/// Identifies one of the scene objects driven by the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartId {
    Palm,
    MiddleFinger,
    Thumb,
}

const NUM_PARTS: usize = 3;

impl PartId {
    pub const ALL: [Self; NUM_PARTS] = [Self::Palm, Self::MiddleFinger, Self::Thumb];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Palm => "palm",
            Self::MiddleFinger => "middle finger",
            Self::Thumb => "thumb",
        })
    }
}

/// Position and orientation of a scene object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Point3<f32>,
    pub orientation: UnitQuaternion<f32>,
}

/// The identity transform: positioned at the scene origin in the rest pose.
impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            orientation: UnitQuaternion::identity(),
        }
    }
}

/// A scene containing the tracked parts.
///
/// The scene owns the objects; the frame loop only writes their transforms. Objects keep whatever
/// transform was last written to them until they are written again.
pub trait Scene {
    fn set_position(&mut self, part: PartId, position: Point3<f32>);

    fn set_orientation(&mut self, part: PartId, orientation: UnitQuaternion<f32>);

    /// Returns the orientation that was last applied to `part`.
    fn orientation(&self, part: PartId) -> UnitQuaternion<f32>;

    /// Called once per loop iteration, after the pose update (if any).
    ///
    /// Renderers should redraw here. When no hand was found in the frame, the previous pose is
    /// presented again.
    fn present(&mut self) {}
}

impl<S: Scene + ?Sized> Scene for &mut S {
    fn set_position(&mut self, part: PartId, position: Point3<f32>) {
        (**self).set_position(part, position);
    }

    fn set_orientation(&mut self, part: PartId, orientation: UnitQuaternion<f32>) {
        (**self).set_orientation(part, orientation);
    }

    fn orientation(&self, part: PartId) -> UnitQuaternion<f32> {
        (**self).orientation(part)
    }

    fn present(&mut self) {
        (**self).present();
    }
}

/// A [`Scene`] that just stores the latest transform of every part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformTable {
    transforms: [Transform; NUM_PARTS],
    presented: u64,
}

impl TransformTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transform(&self, part: PartId) -> Transform {
        self.transforms[part.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PartId, Transform)> + '_ {
        PartId::ALL.into_iter().map(|part| (part, self.transform(part)))
    }

    /// Returns how often [`Scene::present`] has been called.
    pub fn presented_frames(&self) -> u64 {
        self.presented
    }
}

impl Scene for TransformTable {
    fn set_position(&mut self, part: PartId, position: Point3<f32>) {
        self.transforms[part.index()].position = position;
    }

    fn set_orientation(&mut self, part: PartId, orientation: UnitQuaternion<f32>) {
        self.transforms[part.index()].orientation = orientation;
    }

    fn orientation(&self, part: PartId) -> UnitQuaternion<f32> {
        self.transforms[part.index()].orientation
    }

    fn present(&mut self) {
        self.presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::Vector3;

    use super::*;

    #[test]
    fn table_starts_at_identity() {
        let table = TransformTable::new();
        for (_, tf) in table.iter() {
            assert_eq!(tf, Transform::default());
        }
        assert_eq!(table.presented_frames(), 0);
    }

    #[test]
    fn writes_are_per_part() {
        let mut table = TransformTable::new();
        let rot = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 1.0);
        table.set_position(PartId::Thumb, Point3::new(1.0, 2.0, 0.0));
        table.set_orientation(PartId::Thumb, rot);

        assert_eq!(table.transform(PartId::Thumb).position, Point3::new(1.0, 2.0, 0.0));
        assert_eq!(table.orientation(PartId::Thumb), rot);
        assert_eq!(table.transform(PartId::Palm), Transform::default());
        assert_eq!(table.transform(PartId::MiddleFinger), Transform::default());
    }
}
