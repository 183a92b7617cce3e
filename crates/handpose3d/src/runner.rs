//! The frame loop.
//!
//! Each iteration reads a frame, hands it to the detection model, waits for the result, applies
//! it to the scene, and presents the scene. Waiting on the model is the only point at which the
//! loop suspends; the next frame is only read once the current one is fully processed, so there is
//! never more than one inference in flight. There is no timeout: a stalled model stalls the loop.

use anyhow::Context;

use crate::frame::{FrameOutcome, FrameUpdater, SkipReason};
use crate::model::{HandModel, InferenceWorker};
use crate::scene::Scene;
use crate::timer::{FpsCounter, Timer};
use crate::video::FrameSource;

/// Frame counts collected by [`FrameLoop::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub frames: u64,
    pub posed: u64,
    pub no_hand: u64,
    pub incomplete: u64,
}

impl LoopStats {
    fn record(&mut self, outcome: &FrameOutcome) {
        self.frames += 1;
        match outcome {
            FrameOutcome::Posed { .. } => self.posed += 1,
            FrameOutcome::Skipped(SkipReason::NoHand) => self.no_hand += 1,
            FrameOutcome::Skipped(SkipReason::Incomplete(_)) => self.incomplete += 1,
        }
    }
}

/// Drives a [`Scene`] from a [`FrameSource`] and a [`HandModel`].
pub struct FrameLoop<V: FrameSource, S: Scene> {
    source: V,
    inference: InferenceWorker,
    updater: FrameUpdater,
    scene: S,
    fps: FpsCounter,
    t_inference: Timer,
    t_pose: Timer,
}

impl<V: FrameSource, S: Scene> FrameLoop<V, S> {
    /// Creates a frame loop.
    ///
    /// `source` and `model` must already be initialized. This fails if the model's worker thread
    /// cannot be started.
    pub fn new<M: HandModel>(
        source: V,
        model: M,
        updater: FrameUpdater,
        scene: S,
    ) -> anyhow::Result<Self> {
        let capture = source.resolution();
        let expected = updater.normalizer().capture();
        if capture != expected {
            log::warn!(
                "video source delivers {capture} frames, but landmarks are normalized for {expected}"
            );
        }

        Ok(Self {
            source,
            inference: InferenceWorker::spawn(model)?,
            updater,
            scene,
            fps: FpsCounter::new("hand pose"),
            t_inference: Timer::new("inference"),
            t_pose: Timer::new("pose"),
        })
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn updater(&self) -> &FrameUpdater {
        &self.updater
    }

    /// Runs one iteration of the loop.
    ///
    /// Returns `Ok(None)` once the video source has ended.
    pub fn tick(&mut self) -> anyhow::Result<Option<FrameOutcome>> {
        let Some(frame) = self.source.read()? else {
            return Ok(None);
        };
        let index = frame.index();

        let predictions = self
            .t_inference
            .time(|| self.inference.estimate(frame))
            .with_context(|| format!("inference failed on frame {index}"))?;

        let outcome = self
            .t_pose
            .time(|| self.updater.update(predictions, &mut self.scene));
        self.scene.present();

        self.fps.tick_with([&self.t_inference, &self.t_pose]);
        Ok(Some(outcome))
    }

    /// Runs the loop until the video source ends.
    pub fn run(&mut self) -> anyhow::Result<LoopStats> {
        let mut stats = LoopStats::default();
        while let Some(outcome) = self.tick()? {
            stats.record(&outcome);
        }

        log::debug!("video source ended: {stats:?}");
        Ok(stats)
    }

    /// Stops the loop, returning the scene.
    pub fn into_scene(self) -> S {
        self.scene
    }
}
