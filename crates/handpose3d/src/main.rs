//! Headless demo: drives a scene with a synthetic hand that slowly turns around its palm base.

use std::{env, f32::consts::TAU};

use anyhow::Context;
use handpose3d::{
    config::Config,
    frame::FrameUpdater,
    landmark::{GroupName, Prediction},
    model::HandModel,
    resolution::Resolution,
    rig::Rig,
    runner::FrameLoop,
    scene::TransformTable,
    video::{BlankSource, Frame},
};

const DEFAULT_FRAMES: u64 = 120;

/// Every this many frames, the synthetic hand leaves the picture for one frame.
const DROPOUT_INTERVAL: u64 = 30;

/// Pretends to detect a hand whose middle finger sweeps a full circle every 4 seconds (at 60 FPS).
struct SweepModel {
    resolution: Resolution,
}

impl HandModel for SweepModel {
    fn estimate_hands(&mut self, frame: &Frame) -> Vec<Prediction> {
        if frame.index() % DROPOUT_INTERVAL == DROPOUT_INTERVAL - 1 {
            return Vec::new();
        }

        let cx = self.resolution.width() as f32 / 2.0;
        let cy = self.resolution.height() as f32 / 2.0;
        let angle = frame.index() as f32 / 240.0 * TAU;
        // Image Y points down, so "up" is negative.
        let dir = |angle: f32, dist: f32| [cx + angle.sin() * dist, cy - angle.cos() * dist, 0.0];

        let hand = Prediction::new()
            .with_group(GroupName::PalmBase, [[cx, cy, 0.0]])
            .with_group(
                GroupName::MiddleFinger,
                [60.0, 90.0, 110.0, 125.0].map(|dist| dir(angle, dist)),
            )
            .with_group(
                GroupName::Thumb,
                [30.0, 55.0, 75.0, 90.0].map(|dist| dir(angle - 1.2, dist)),
            );
        vec![hand]
    }
}

fn main() -> anyhow::Result<()> {
    handpose3d::init_logger!();

    let config = Config::from_env()?;
    let frames = match env::var("HANDPOSE_FRAMES") {
        Ok(frames) => frames
            .parse()
            .with_context(|| format!("invalid value for HANDPOSE_FRAMES: '{frames}'"))?,
        Err(_) => DEFAULT_FRAMES,
    };

    let source = BlankSource::open(config.capture, Some(frames))?;
    let model = SweepModel {
        resolution: config.capture,
    };
    let updater = FrameUpdater::new(config.normalizer(), Rig::hand());
    let mut frame_loop = FrameLoop::new(source, model, updater, TransformTable::new())?;

    let stats = frame_loop.run()?;
    log::info!(
        "{} frames: {} posed, {} without hand, {} incomplete",
        stats.frames,
        stats.posed,
        stats.no_hand,
        stats.incomplete
    );

    for (part, tf) in frame_loop.scene().iter() {
        let (roll, pitch, yaw) = tf.orientation.euler_angles();
        log::info!(
            "{part}: position=({:.2}, {:.2}, {:.2}) roll={:.1}° pitch={:.1}° yaw={:.1}°",
            tf.position.x,
            tf.position.y,
            tf.position.z,
            roll.to_degrees(),
            pitch.to_degrees(),
            yaw.to_degrees(),
        );
    }

    Ok(())
}
