use crate::landmark::{GroupName, Prediction};

/// A hand in a 500x500 frame with its palm base right in the center.
pub fn scenario_prediction() -> Prediction {
    Prediction::new()
        .with_group(GroupName::PalmBase, [[250.0, 250.0, 0.0]])
        .with_group(
            GroupName::MiddleFinger,
            [
                [260.0, 240.0, 0.0],
                [270.0, 230.0, 0.0],
                [285.0, 215.0, 0.0],
                [300.0, 200.0, 0.0],
            ],
        )
        .with_group(
            GroupName::Thumb,
            [
                [200.0, 260.0, 0.0],
                [190.0, 240.0, 0.0],
                [180.0, 220.0, 0.0],
                [175.0, 205.0, 0.0],
            ],
        )
}
