//! Per-frame pose updates.

use std::collections::HashMap;

use crate::landmark::{JointRef, LandmarkError, Prediction};
use crate::normalize::{NormalizedPoint, Normalizer};
use crate::pose::{Facing, PoseComposer};
use crate::rig::{OrientationSource, Rig};
use crate::scene::{PartId, Scene, Transform};

/// Whether the last frame produced a pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdaterState {
    /// No usable prediction was available for the last frame (or no frame was processed yet).
    Idle,
    /// The last frame's prediction was applied to the scene.
    Posed,
}

/// Why a frame did not update the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The model did not detect a hand.
    NoHand,
    /// The detected hand lacks a landmark the rig needs.
    Incomplete(LandmarkError),
}

/// Result of processing one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Posed { facing: Facing },
    Skipped(SkipReason),
}

/// Transforms written to the scene by the last posed frame, in posing order.
pub type HandPose = Vec<(PartId, Transform)>;

/// Applies hand predictions to the scene, one frame at a time.
///
/// Only the first prediction of a frame is used. Frames without a prediction leave the scene
/// untouched, so it keeps displaying the previous pose. Predictions that lack any landmark needed
/// by the [`Rig`] are skipped the same way, before anything is written to the scene.
pub struct FrameUpdater {
    normalizer: Normalizer,
    rig: Rig,
    state: UpdaterState,
    last_prediction: Option<Prediction>,
    last_pose: Option<HandPose>,
}

impl FrameUpdater {
    pub fn new(normalizer: Normalizer, rig: Rig) -> Self {
        Self {
            normalizer,
            rig,
            state: UpdaterState::Idle,
            last_prediction: None,
            last_pose: None,
        }
    }

    #[inline]
    pub fn state(&self) -> UpdaterState {
        self.state
    }

    #[inline]
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    #[inline]
    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    /// Returns the prediction of the most recent posed frame.
    pub fn last_prediction(&self) -> Option<&Prediction> {
        self.last_prediction.as_ref()
    }

    /// Returns the transforms applied by the most recent posed frame.
    pub fn last_pose(&self) -> Option<&[(PartId, Transform)]> {
        self.last_pose.as_deref()
    }

    /// Processes the model output for one frame.
    pub fn update<S: Scene + ?Sized>(
        &mut self,
        predictions: Vec<Prediction>,
        scene: &mut S,
    ) -> FrameOutcome {
        let Some(prediction) = predictions.into_iter().next() else {
            log::trace!("no hand detected, keeping previous pose");
            self.state = UpdaterState::Idle;
            return FrameOutcome::Skipped(SkipReason::NoHand);
        };

        match self.apply(&prediction, scene) {
            Ok((pose, facing)) => {
                log::info!("{facing}");
                self.state = UpdaterState::Posed;
                self.last_prediction = Some(prediction);
                self.last_pose = Some(pose);
                FrameOutcome::Posed { facing }
            }
            Err(e) => {
                log::warn!("skipping frame: {e}");
                self.state = UpdaterState::Idle;
                FrameOutcome::Skipped(SkipReason::Incomplete(e))
            }
        }
    }

    fn apply<S: Scene + ?Sized>(
        &self,
        prediction: &Prediction,
        scene: &mut S,
    ) -> Result<(HandPose, Facing), LandmarkError> {
        // Resolve everything up front so that incomplete predictions don't half-update the scene.
        let palm_base = prediction.landmark(Rig::PALM_BASE)?;
        let thumb_base = prediction.landmark(Rig::THUMB_BASE)?;
        let mut points = HashMap::<JointRef, NormalizedPoint>::new();
        for joint in self.rig.joints() {
            let landmark = prediction.landmark(joint)?;
            points.insert(joint, self.normalizer.normalize(landmark));
        }
        let point = |joint: JointRef| points[&joint];

        let composer = PoseComposer::new(
            self.normalizer.normalize(palm_base),
            self.normalizer.normalize(thumb_base),
        );

        let mut pose = HandPose::with_capacity(self.rig.parts().len());
        for rig in self.rig.parts() {
            let origin = point(rig.origin);
            let (comparison, reference) = match rig.orientation {
                OrientationSource::Solve { target } => (Some(point(target)), rig.part),
                OrientationSource::Inherit(reference) => (None, reference),
            };
            let tf = composer.pose(origin, comparison, || scene.orientation(reference));

            scene.set_position(rig.part, tf.position);
            scene.set_orientation(rig.part, tf.orientation);
            log::trace!("{}: {:?}", rig.part, tf);
            pose.push((rig.part, tf));
        }

        Ok((pose, Facing::classify(palm_base, thumb_base)))
    }
}
