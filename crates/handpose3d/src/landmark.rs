//! Hand landmark predictions as reported by the detector.

use std::{collections::HashMap, error::Error, fmt, str::FromStr};

use anyhow::bail;

type Position = [f32; 3];

/// A landmark in image space, in pixels.
///
/// Displays as `x,y,z`, with every coordinate in its shortest form (`100`, `90.5`, `1e-7`).
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct RawLandmark {
    pos: Position,
}

impl RawLandmark {
    pub const fn new(position: Position) -> Self {
        Self { pos: position }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.pos
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos[1]
    }

    /// Relative depth estimate. Not used for posing.
    #[inline]
    pub fn z(&self) -> f32 {
        self.pos[2]
    }
}

impl From<Position> for RawLandmark {
    fn from(pos: Position) -> Self {
        Self::new(pos)
    }
}

impl fmt::Display for RawLandmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coord) in self.pos.iter().enumerate() {
            if i != 0 {
                f.write_str(",")?;
            }
            write_coord(f, *coord)?;
        }
        Ok(())
    }
}

fn write_coord(f: &mut fmt::Formatter<'_>, value: f32) -> fmt::Result {
    if value.is_nan() {
        return f.write_str("NaN");
    }
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if value == 0.0 {
        // Includes -0.
        return f.write_str("0");
    }

    let abs = value.abs();
    if (1e-6..1e21).contains(&abs) {
        return write!(f, "{value}");
    }

    // Exponent notation, with an explicit sign on positive exponents (`1e+21`).
    let exp = format!("{value:e}");
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            write!(f, "{mantissa}e+{exponent}")
        }
        _ => f.write_str(&exp),
    }
}

/// Names of the landmark groups ("annotations") reported by the hand detector.
///
/// Each finger group is ordered from the joint closest to the palm to the finger tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupName {
    Thumb,
    IndexFinger,
    MiddleFinger,
    RingFinger,
    Pinky,
    PalmBase,
}

impl GroupName {
    pub const ALL: [Self; 6] = [
        Self::Thumb,
        Self::IndexFinger,
        Self::MiddleFinger,
        Self::RingFinger,
        Self::Pinky,
        Self::PalmBase,
    ];

    /// Returns the key the detector uses for this group.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thumb => "thumb",
            Self::IndexFinger => "indexFinger",
            Self::MiddleFinger => "middleFinger",
            Self::RingFinger => "ringFinger",
            Self::Pinky => "pinky",
            Self::PalmBase => "palmBase",
        }
    }

    /// Number of landmarks a complete group of this kind contains.
    pub fn expected_len(&self) -> usize {
        match self {
            Self::PalmBase => 1,
            _ => 4,
        }
    }
}

impl FromStr for GroupName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::ALL.iter().find(|name| name.as_str() == s) {
            Some(name) => Ok(*name),
            None => bail!("unknown landmark group '{s}'"),
        }
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Refers to a single landmark: the joint at `index` within `group`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointRef {
    pub group: GroupName,
    pub index: usize,
}

impl JointRef {
    pub const fn new(group: GroupName, index: usize) -> Self {
        Self { group, index }
    }
}

impl fmt::Display for JointRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.group, self.index)
    }
}

/// An ordered sequence of landmarks belonging to one part of the hand.
///
/// Index `i` always refers to the same anatomical joint.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkGroup {
    landmarks: Box<[RawLandmark]>,
}

impl LandmarkGroup {
    pub fn new(landmarks: impl IntoIterator<Item = RawLandmark>) -> Self {
        Self {
            landmarks: landmarks.into_iter().collect(),
        }
    }

    /// Creates a group from raw `[x, y, z]` pixel positions.
    pub fn from_positions(positions: impl IntoIterator<Item = Position>) -> Self {
        Self::new(positions.into_iter().map(RawLandmark::new))
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<RawLandmark> {
        self.landmarks.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = RawLandmark> + '_ {
        self.landmarks.iter().copied()
    }
}

/// All landmark groups detected for one hand in one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prediction {
    groups: HashMap<GroupName, LandmarkGroup>,
}

impl Prediction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a landmark group given as `[x, y, z]` pixel positions.
    pub fn with_group(
        mut self,
        name: GroupName,
        positions: impl IntoIterator<Item = Position>,
    ) -> Self {
        self.insert(name, LandmarkGroup::from_positions(positions));
        self
    }

    pub fn insert(&mut self, name: GroupName, group: LandmarkGroup) {
        if group.len() != name.expected_len() {
            log::trace!(
                "group '{name}' has {} landmarks, expected {}",
                group.len(),
                name.expected_len()
            );
        }
        self.groups.insert(name, group);
    }

    pub fn group(&self, name: GroupName) -> Result<&LandmarkGroup, LandmarkError> {
        self.groups
            .get(&name)
            .ok_or(LandmarkError::MissingGroup(name))
    }

    /// Looks up a single landmark.
    pub fn landmark(&self, joint: JointRef) -> Result<RawLandmark, LandmarkError> {
        let group = self.group(joint.group)?;
        group.get(joint.index).ok_or(LandmarkError::MissingJoint {
            joint,
            len: group.len(),
        })
    }

    pub fn groups(&self) -> impl Iterator<Item = (GroupName, &LandmarkGroup)> + '_ {
        self.groups.iter().map(|(name, group)| (*name, group))
    }
}

/// A landmark needed for posing is absent from a [`Prediction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkError {
    MissingGroup(GroupName),
    MissingJoint { joint: JointRef, len: usize },
}

impl fmt::Display for LandmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingGroup(name) => write!(f, "prediction has no '{name}' landmarks"),
            Self::MissingJoint { joint, len } => write!(
                f,
                "prediction is missing landmark {joint} ('{}' has {len} landmarks)",
                joint.group
            ),
        }
    }
}

impl Error for LandmarkError {}
