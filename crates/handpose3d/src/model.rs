//! Hand detection model interface.
//!
//! The detector itself is a black box: it is handed a [`Frame`] and returns zero or more
//! [`Prediction`]s. [`InferenceWorker`] moves it to its own thread so that the frame loop can wait
//! for its results without owning it.

use std::collections::VecDeque;

use anyhow::{anyhow, Context};
use pawawwewism::{promise, Promise, PromiseHandle, Worker};

use crate::landmark::Prediction;
use crate::video::Frame;

/// A hand detection model.
pub trait HandModel: Send + 'static {
    /// Detects hands in `frame`.
    ///
    /// Returns one [`Prediction`] per detected hand, most confident first. Returning an empty list
    /// means that no hand is visible.
    fn estimate_hands(&mut self, frame: &Frame) -> Vec<Prediction>;
}

/// A [`HandModel`] that replays a fixed list of per-frame results, ignoring the frames.
///
/// After the script is exhausted, no hands are reported anymore.
#[derive(Debug, Clone, Default)]
pub struct ScriptedModel {
    script: VecDeque<Vec<Prediction>>,
}

impl ScriptedModel {
    pub fn new(script: impl IntoIterator<Item = Vec<Prediction>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Appends the result for one more frame.
    pub fn push(&mut self, predictions: Vec<Prediction>) {
        self.script.push_back(predictions);
    }

    /// Returns the number of frames left in the script.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl HandModel for ScriptedModel {
    fn estimate_hands(&mut self, frame: &Frame) -> Vec<Prediction> {
        self.script.pop_front().unwrap_or_else(|| {
            log::trace!("script exhausted at frame {}", frame.index());
            Vec::new()
        })
    }
}

struct InferenceRequest {
    frame: Frame,
    predictions: Promise<Vec<Prediction>>,
}

/// Runs a [`HandModel`] on a dedicated worker thread.
pub struct InferenceWorker {
    worker: Worker<InferenceRequest>,
}

impl InferenceWorker {
    /// Moves `model` to a newly spawned worker thread.
    pub fn spawn<M: HandModel>(mut model: M) -> anyhow::Result<Self> {
        let worker = Worker::builder()
            .name("hand model")
            .spawn(move |InferenceRequest { frame, predictions }| {
                let hands = model.estimate_hands(&frame);
                log::trace!("frame {}: {} hand(s)", frame.index(), hands.len());
                predictions.fulfill(hands);
            })
            .context("failed to spawn hand model worker")?;
        Ok(Self { worker })
    }

    /// Submits `frame` for inference.
    ///
    /// Blocks while the worker is still busy with a previously submitted frame.
    pub fn submit(&mut self, frame: Frame) -> PromiseHandle<Vec<Prediction>> {
        let (predictions, handle) = promise();
        self.worker.send(InferenceRequest { frame, predictions });
        handle
    }

    /// Runs inference on `frame` and waits for the result.
    pub fn estimate(&mut self, frame: Frame) -> anyhow::Result<Vec<Prediction>> {
        self.submit(frame)
            .block()
            .map_err(|_| anyhow!("hand model worker stopped without producing a result"))
    }
}

#[cfg(test)]
mod tests {
    use crate::landmark::GroupName;
    use crate::resolution::Resolution;

    use super::*;

    fn frame(index: u64) -> Frame {
        Frame::new(index, Resolution::new(2, 2), vec![0u8; 12])
    }

    #[test]
    fn scripted_model_replays_then_goes_quiet() {
        let hand = Prediction::new().with_group(GroupName::PalmBase, [[1.0, 2.0, 3.0]]);
        let mut model = ScriptedModel::new([vec![hand.clone()], vec![]]);
        assert_eq!(model.remaining(), 2);
        assert_eq!(model.estimate_hands(&frame(0)), [hand]);
        assert!(model.estimate_hands(&frame(1)).is_empty());
        assert!(model.estimate_hands(&frame(2)).is_empty());
        assert_eq!(model.remaining(), 0);
    }

    #[test]
    fn worker_returns_model_output() {
        let hand = Prediction::new().with_group(GroupName::Thumb, [[1.0, 2.0, 3.0]]);
        let mut worker =
            InferenceWorker::spawn(ScriptedModel::new([vec![hand.clone(), hand.clone()]]))
                .unwrap();
        assert_eq!(worker.estimate(frame(0)).unwrap(), [hand.clone(), hand]);
        assert!(worker.estimate(frame(1)).unwrap().is_empty());
    }
}
