//! Describes which landmarks drive which scene object, and in what order parts are posed.

use std::{error::Error, fmt};

use crate::landmark::{GroupName, JointRef};
use crate::scene::PartId;

/// Where a part's orientation comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationSource {
    /// Infer the orientation from the direction between the part's origin and `target`.
    Solve { target: JointRef },
    /// Copy the orientation of another part that was posed earlier in the same frame.
    Inherit(PartId),
}

/// Rigging of a single tracked part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartRig {
    pub part: PartId,
    /// Landmark that determines the part's position.
    pub origin: JointRef,
    pub orientation: OrientationSource,
}

/// An ordered list of parts to pose each frame.
///
/// Parts are posed in list order. A part that inherits its orientation must come after the part it
/// inherits from, which [`Rig::new`] checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rig {
    parts: Vec<PartRig>,
}

impl Rig {
    /// Middle finger joint whose direction from the palm base determines the palm's heading.
    pub const MIDDLE_FINGER_BASE: JointRef = JointRef::new(GroupName::MiddleFinger, 0);
    pub const MIDDLE_FINGER_TIP: JointRef = JointRef::new(GroupName::MiddleFinger, 3);
    pub const PALM_BASE: JointRef = JointRef::new(GroupName::PalmBase, 0);
    pub const THUMB_BASE: JointRef = JointRef::new(GroupName::Thumb, 0);

    pub fn new(parts: impl IntoIterator<Item = PartRig>) -> Result<Self, RigError> {
        let parts = parts.into_iter().collect::<Vec<_>>();
        for (i, rig) in parts.iter().enumerate() {
            if parts[..i].iter().any(|prev| prev.part == rig.part) {
                return Err(RigError::DuplicatePart(rig.part));
            }

            if let OrientationSource::Inherit(reference) = rig.orientation {
                if reference == rig.part {
                    return Err(RigError::SelfReference(rig.part));
                }
                if !parts[..i].iter().any(|prev| prev.part == reference) {
                    return Err(RigError::InheritsFromLaterPart {
                        part: rig.part,
                        reference,
                    });
                }
            }
        }

        Ok(Self { parts })
    }

    /// The default hand rig.
    ///
    /// 1. The palm sits on the palm base and points towards the base of the middle finger.
    /// 2. The middle finger object sits on the middle finger tip and copies the palm orientation.
    /// 3. The thumb object sits on the base of the thumb and copies the palm orientation.
    pub fn hand() -> Self {
        Self {
            parts: vec![
                PartRig {
                    part: PartId::Palm,
                    origin: Self::PALM_BASE,
                    orientation: OrientationSource::Solve {
                        target: Self::MIDDLE_FINGER_BASE,
                    },
                },
                PartRig {
                    part: PartId::MiddleFinger,
                    origin: Self::MIDDLE_FINGER_TIP,
                    orientation: OrientationSource::Inherit(PartId::Palm),
                },
                PartRig {
                    part: PartId::Thumb,
                    origin: Self::THUMB_BASE,
                    orientation: OrientationSource::Inherit(PartId::Palm),
                },
            ],
        }
    }

    pub fn parts(&self) -> &[PartRig] {
        &self.parts
    }

    /// Returns every landmark this rig reads, in posing order, without duplicates.
    pub fn joints(&self) -> impl Iterator<Item = JointRef> + '_ {
        let mut seen = Vec::new();
        self.parts
            .iter()
            .flat_map(|rig| {
                let target = match rig.orientation {
                    OrientationSource::Solve { target } => Some(target),
                    OrientationSource::Inherit(_) => None,
                };
                [Some(rig.origin), target]
            })
            .flatten()
            .filter(move |joint| {
                if seen.contains(joint) {
                    false
                } else {
                    seen.push(*joint);
                    true
                }
            })
    }
}

impl Default for Rig {
    fn default() -> Self {
        Self::hand()
    }
}

/// A [`Rig`] whose posing order cannot be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigError {
    DuplicatePart(PartId),
    SelfReference(PartId),
    InheritsFromLaterPart { part: PartId, reference: PartId },
}

impl fmt::Display for RigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicatePart(part) => write!(f, "{part} is rigged more than once"),
            Self::SelfReference(part) => write!(f, "{part} inherits its own orientation"),
            Self::InheritsFromLaterPart { part, reference } => write!(
                f,
                "{part} inherits the orientation of {reference}, which is not posed before it"
            ),
        }
    }
}

impl Error for RigError {}
