use approx::{assert_relative_eq, relative_ne};
use handpose3d::{
    config::Config,
    frame::{FrameOutcome, FrameUpdater, SkipReason},
    landmark::{GroupName, Prediction},
    model::ScriptedModel,
    normalize::Normalizer,
    orientation::{self, RotationAxis},
    pose::Facing,
    resolution::Resolution,
    rig::Rig,
    runner::{FrameLoop, LoopStats},
    scene::{PartId, TransformTable},
    video::BlankSource,
};
use nalgebra::Point3;

fn hand() -> Prediction {
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

/// A randomly placed hand within a 500x500 frame.
fn random_hand(rng: &mut fastrand::Rng) -> Prediction {
    let mut point = || [rng.f32() * 500.0, rng.f32() * 500.0, rng.f32() * 10.0 - 5.0];
    Prediction::new()
        .with_group(GroupName::PalmBase, [point()])
        .with_group(GroupName::MiddleFinger, [point(), point(), point(), point()])
        .with_group(GroupName::Thumb, [point(), point(), point(), point()])
}

fn frame_loop(script: Vec<Vec<Prediction>>) -> FrameLoop<BlankSource, TransformTable> {
    let config = Config {
        capture: Resolution::new(500, 500),
        offset: 16.0,
        bias: [2.0, 4.0],
    };
    let source = BlankSource::open(config.capture, Some(script.len() as u64)).unwrap();
    let updater = FrameUpdater::new(config.normalizer(), Rig::hand());
    FrameLoop::new(source, ScriptedModel::new(script), updater, TransformTable::new()).unwrap()
}

#[test]
fn end_to_end_scenario() {
    let mut frame_loop = frame_loop(vec![vec![hand()]]);
    assert_eq!(
        frame_loop.tick().unwrap(),
        Some(FrameOutcome::Posed {
            facing: Facing::Back
        })
    );
    assert_eq!(frame_loop.tick().unwrap(), None);

    let norm = frame_loop.updater().normalizer();
    let palm_origin = norm.normalize([250.0, 250.0, 0.0].into());
    let middle_base = norm.normalize([260.0, 240.0, 0.0].into());
    let thumb_base = norm.normalize([200.0, 260.0, 0.0].into());
    assert_eq!(palm_origin, Point3::new(2.0, 4.0, 0.0));
    assert_relative_eq!(middle_base, Point3::new(2.64, 4.64, 0.0), epsilon = 1e-5);
    assert_relative_eq!(thumb_base, Point3::new(-1.2, 3.36, 0.0), epsilon = 1e-5);

    let scene = frame_loop.scene();
    assert_eq!(scene.presented_frames(), 1);

    let palm = scene.transform(PartId::Palm);
    assert_eq!(palm.position, palm_origin);
    let heading = orientation::solve(palm_origin, middle_base, RotationAxis::Z);
    let twist = orientation::solve(palm_origin, thumb_base, RotationAxis::Y);
    assert_relative_eq!(palm.orientation, heading * twist, epsilon = 1e-6);
    // Regression guard for the composition order.
    assert!(relative_ne!(palm.orientation, twist * heading, epsilon = 1e-3));

    let middle = scene.transform(PartId::MiddleFinger);
    assert_relative_eq!(middle.position, Point3::new(5.2, 7.2, 0.0), epsilon = 1e-5);
    assert_eq!(middle.orientation, palm.orientation);

    let thumb = scene.transform(PartId::Thumb);
    assert_eq!(thumb.position, thumb_base);
    assert_eq!(thumb.orientation, palm.orientation);
}

#[test]
fn empty_frames_keep_the_previous_pose() {
    let mut rng = fastrand::Rng::with_seed(0xba5e);
    for _ in 0..20 {
        let mut frame_loop = frame_loop(vec![
            vec![random_hand(&mut rng)],
            vec![random_hand(&mut rng)],
            vec![],
            vec![],
            vec![random_hand(&mut rng)],
        ]);

        frame_loop.tick().unwrap();
        frame_loop.tick().unwrap();
        let posed = frame_loop.scene().iter().collect::<Vec<_>>();

        for _ in 0..2 {
            assert_eq!(
                frame_loop.tick().unwrap(),
                Some(FrameOutcome::Skipped(SkipReason::NoHand))
            );
            let after = frame_loop.scene().iter().collect::<Vec<_>>();
            // Bit-identical, not just approximately equal.
            assert_eq!(after, posed);
        }

        assert!(matches!(
            frame_loop.tick().unwrap(),
            Some(FrameOutcome::Posed { .. })
        ));
        assert_eq!(frame_loop.scene().presented_frames(), 5);
    }
}

#[test]
fn run_counts_outcomes() {
    let incomplete = Prediction::new().with_group(GroupName::PalmBase, [[1.0, 2.0, 3.0]]);
    let mut frame_loop = frame_loop(vec![
        vec![hand()],
        vec![],
        vec![incomplete],
        vec![hand(), hand()],
    ]);
    let stats = frame_loop.run().unwrap();
    assert_eq!(
        stats,
        LoopStats {
            frames: 4,
            posed: 2,
            no_hand: 1,
            incomplete: 1,
        }
    );
    assert_eq!(frame_loop.updater().last_prediction(), Some(&hand()));
    assert_eq!(frame_loop.into_scene().presented_frames(), 4);
}

#[test]
fn only_the_current_prediction_matters() {
    let mut rng = fastrand::Rng::with_seed(0x1234);
    let last = random_hand(&mut rng);

    // The same prediction leads to the same pose, no matter what came before.
    let mut with_history = frame_loop(vec![
        vec![random_hand(&mut rng)],
        vec![random_hand(&mut rng)],
        vec![last.clone()],
    ]);
    with_history.run().unwrap();

    let mut fresh = frame_loop(vec![vec![last]]);
    fresh.run().unwrap();

    assert_eq!(
        with_history.scene().iter().collect::<Vec<_>>(),
        fresh.scene().iter().collect::<Vec<_>>()
    );
}

#[test]
fn mismatched_source_resolution_still_runs() {
    let source = BlankSource::open(Resolution::new(640, 480), Some(1)).unwrap();
    let updater = FrameUpdater::new(Normalizer::default(), Rig::hand());
    let mut frame_loop = FrameLoop::new(
        source,
        ScriptedModel::new([vec![hand()]]),
        updater,
        TransformTable::new(),
    )
    .unwrap();
    assert!(matches!(
        frame_loop.tick().unwrap(),
        Some(FrameOutcome::Posed { .. })
    ));
}
