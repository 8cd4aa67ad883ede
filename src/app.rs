// Startup and the frame loop.
//
// Per frame: grab a camera frame → detect hands → fold them into one
// gesture → let the scene react → draw → present. One thread, no queues.

use std::thread;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::camera::CameraCapture;
use crate::config::{Config, Variant};
use crate::draw::Drawer;
use crate::error::Error;
use crate::game::PlayArea;
use crate::gesture::{GestureTracker, GripClassifier};
use crate::mesh::Mesh;
use crate::scene::{GameScene, NudgeScene, Scene};
use crate::tracker::{DetectorBridge, LandmarkSource};
use crate::types::FrameBuffer;

/// What one pass through the loop did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Gesture and scene advanced.
    Updated,
    /// No camera frame this time; state left as is.
    Skipped,
}

/// Pull one frame through detection and into the scene.
/// Transient capture failures become `Skipped`; anything else is fatal.
pub fn advance<S, L, C>(
    scene: &mut S,
    gestures: &mut GestureTracker<C>,
    detector: &mut L,
    frame: Result<image::RgbImage, Error>,
) -> Result<FrameOutcome, Error>
where
    S: Scene,
    L: LandmarkSource,
    C: GripClassifier,
{
    let frame = match frame {
        Ok(f) => f,
        Err(e) if e.is_transient() => {
            debug!(error = %e, "skipping frame");
            return Ok(FrameOutcome::Skipped);
        }
        Err(e) => return Err(e),
    };

    let hands = detector.detect(&frame)?;
    let gesture = gestures.observe(&hands);
    scene.tick(gesture);
    Ok(FrameOutcome::Updated)
}

/// Load everything, open the window and run until it is closed.
pub fn run(cfg: Config) -> Result<(), Error> {
    let variant = cfg.variant;
    info!(?variant, model = %cfg.model.display(), "starting");

    let mesh = Mesh::load(&cfg.model)?.fitted(variant.model_size());
    let mut detector = DetectorBridge::spawn(&cfg.detector)?;
    let (cw, ch) = cfg.camera_size;
    let mut cam = CameraCapture::new(cfg.camera_index, cw, ch)?;
    let (w, h) = variant.window_size();
    let mut drawer = Drawer::new(variant.title(), w, h)?;

    let (sw, sh) = variant.screen_size();
    let mut gestures = GestureTracker::new(sw, sh, cfg.no_hand);

    match variant {
        Variant::Game => {
            let rng = match cfg.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let scene = GameScene::new(mesh, PlayArea::new(sw, sh), rng);
            frame_loop(scene, &mut cam, &mut detector, &mut gestures, &mut drawer, w, h)
        }
        Variant::Nudge => {
            let scene = NudgeScene::new(mesh);
            frame_loop(scene, &mut cam, &mut detector, &mut gestures, &mut drawer, w, h)
        }
    }
}

fn frame_loop<S: Scene, L: LandmarkSource, C: GripClassifier>(
    mut scene: S,
    cam: &mut CameraCapture,
    detector: &mut L,
    gestures: &mut GestureTracker<C>,
    drawer: &mut Drawer,
    width: usize,
    height: usize,
) -> Result<(), Error> {
    let mut screen = FrameBuffer::new(width, height);
    let mut show_hud = false;
    let (mut updated, mut skipped) = (0u64, 0u64);

    while drawer.is_open() && !drawer.esc_pressed() {
        if drawer.h_pressed_once() {
            show_hud = !show_hud;
        }

        match advance(&mut scene, gestures, detector, cam.next_frame())? {
            FrameOutcome::Updated => updated += 1,
            FrameOutcome::Skipped => skipped += 1,
        }

        // Still present on skipped frames so the window keeps handling events.
        scene.render(&mut screen, show_hud.then(|| gestures.state()));
        drawer.present(&screen)?;

        if let Some(wait) = scene.frame_delay() {
            thread::sleep(wait);
        }
    }

    info!(updated, skipped, "window closed, shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{NoHandPolicy, hand_at};
    use crate::types::Hand;
    use image::RgbImage;
    use std::collections::VecDeque;

    /// Replays canned detections, one per frame.
    struct Replay(VecDeque<Result<Vec<Hand>, Error>>);

    impl LandmarkSource for Replay {
        fn detect(&mut self, _frame: &RgbImage) -> Result<Vec<Hand>, Error> {
            self.0.pop_front().unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn frame() -> Result<RgbImage, Error> {
        Ok(RgbImage::new(4, 4))
    }

    fn scene() -> GameScene {
        let mesh = Mesh { vertices: vec![[0.0; 3]], triangles: vec![] };
        GameScene::new(mesh, PlayArea::new(800, 600), StdRng::seed_from_u64(5))
    }

    #[test]
    fn closed_hand_over_target_scores_through_the_loop() {
        let mut scene = scene();
        let t = scene.state().target;
        let palm = (t.x as f32 / 800.0, t.y as f32 / 600.0);
        let mut detector = Replay(VecDeque::from([Ok(vec![hand_at(palm, palm.1 + 0.1)])]));
        let mut gestures = GestureTracker::new(800, 600, NoHandPolicy::Release);

        let out = advance(&mut scene, &mut gestures, &mut detector, frame()).unwrap();
        assert_eq!(out, FrameOutcome::Updated);
        assert_eq!(scene.state().score, 1);
    }

    #[test]
    fn missing_camera_frame_is_skipped() {
        let mut scene = scene();
        let before = *scene.state();
        let mut detector = Replay(VecDeque::new());
        let mut gestures = GestureTracker::new(800, 600, NoHandPolicy::Release);

        let out = advance(
            &mut scene,
            &mut gestures,
            &mut detector,
            Err(Error::CameraFrame("timeout".into())),
        )
        .unwrap();
        assert_eq!(out, FrameOutcome::Skipped);
        assert_eq!(*scene.state(), before);
    }

    #[test]
    fn frame_without_hands_leaves_game_alone() {
        let mut scene = scene();
        let before = *scene.state();
        let mut detector = Replay(VecDeque::from([Ok(vec![])]));
        let mut gestures = GestureTracker::new(800, 600, NoHandPolicy::Release);

        assert_eq!(
            advance(&mut scene, &mut gestures, &mut detector, frame()).unwrap(),
            FrameOutcome::Updated
        );
        assert_eq!(*scene.state(), before);
    }

    #[test]
    fn detector_failure_is_fatal() {
        let mut scene = scene();
        let mut detector = Replay(VecDeque::from([Err(Error::Tracker("detector exited".into()))]));
        let mut gestures = GestureTracker::new(800, 600, NoHandPolicy::Release);

        let err = advance(&mut scene, &mut gestures, &mut detector, frame()).unwrap_err();
        assert!(matches!(err, Error::Tracker(_)));
    }
}
