// Turns detected hands into a cursor position and an open/closed grip.
//
// Only two landmarks matter: the middle finger knuckle (palm center, drives
// the cursor) and the middle fingertip (when it drops below the knuckle the
// hand counts as closed). The decision is instantaneous, with no smoothing
// across frames; swap the GripClassifier to change that.

use crate::types::{GestureState, Hand, Landmark};

/// Hand landmark indices (21-point hand model convention).
pub mod landmarks {
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const COUNT: usize = 21;
}

/// Decides whether one hand is gripping.
pub trait GripClassifier {
    fn is_closed(&mut self, hand: &Hand) -> bool;
}

/// Closed when the middle fingertip sits lower in the image than the palm
/// center. Equal height counts as open.
#[derive(Clone, Copy, Debug, Default)]
pub struct PalmFold;

impl GripClassifier for PalmFold {
    fn is_closed(&mut self, hand: &Hand) -> bool {
        let palm = hand.landmarks[landmarks::MIDDLE_FINGER_MCP];
        let tip = hand.landmarks[landmarks::MIDDLE_FINGER_TIP];
        tip.y > palm.y
    }
}

/// Map a normalized landmark to screen pixels.
#[inline]
pub fn to_screen(lm: Landmark, screen_width: i32, screen_height: i32) -> (i32, i32) {
    let x = (lm.x as f64 * screen_width as f64).round() as i32;
    let y = (lm.y as f64 * screen_height as f64).round() as i32;
    (x, y)
}

/// Gesture for a single hand with the default classifier.
///
/// Panics if the hand carries fewer than 13 landmarks; the detector bridge
/// drops incomplete hands before they get here.
pub fn extract(hand: &Hand, screen_width: i32, screen_height: i32) -> GestureState {
    extract_with(&mut PalmFold, hand, screen_width, screen_height)
}

pub fn extract_with<C: GripClassifier>(
    classifier: &mut C,
    hand: &Hand,
    screen_width: i32,
    screen_height: i32,
) -> GestureState {
    let (cursor_x, cursor_y) =
        to_screen(hand.landmarks[landmarks::MIDDLE_FINGER_MCP], screen_width, screen_height);
    GestureState { cursor_x, cursor_y, is_closed: classifier.is_closed(hand) }
}

/// What happens to the gesture when a frame has no hand in it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoHandPolicy {
    /// Keep the last cursor, drop the grip.
    #[default]
    Release,
    /// Keep everything from the last frame that had a hand, grip included.
    Retain,
}

/// Folds each frame's hands into one [`GestureState`].
///
/// With several hands the cursor follows the last one reported and the frame
/// is closed if any hand is closed.
pub struct GestureTracker<C: GripClassifier = PalmFold> {
    classifier: C,
    policy: NoHandPolicy,
    screen_width: i32,
    screen_height: i32,
    state: GestureState,
}

impl GestureTracker<PalmFold> {
    pub fn new(screen_width: i32, screen_height: i32, policy: NoHandPolicy) -> Self {
        Self::with_classifier(PalmFold, screen_width, screen_height, policy)
    }
}

impl<C: GripClassifier> GestureTracker<C> {
    pub fn with_classifier(
        classifier: C,
        screen_width: i32,
        screen_height: i32,
        policy: NoHandPolicy,
    ) -> Self {
        Self {
            classifier,
            policy,
            screen_width,
            screen_height,
            state: GestureState::default(),
        }
    }

    /// Feed one frame worth of hands; returns the gesture for that frame.
    pub fn observe(&mut self, hands: &[Hand]) -> GestureState {
        if hands.is_empty() {
            if self.policy == NoHandPolicy::Release {
                self.state.is_closed = false;
            }
            return self.state;
        }

        let mut closed = false;
        for hand in hands {
            let g = extract_with(&mut self.classifier, hand, self.screen_width, self.screen_height);
            self.state.cursor_x = g.cursor_x;
            self.state.cursor_y = g.cursor_y;
            closed |= g.is_closed;
        }
        self.state.is_closed = closed;
        self.state
    }

    pub fn state(&self) -> GestureState {
        self.state
    }
}

#[cfg(test)]
pub(crate) fn hand_at(palm: (f32, f32), tip_y: f32) -> Hand {
    let mut lms = vec![Landmark::default(); landmarks::COUNT];
    lms[landmarks::MIDDLE_FINGER_MCP] = Landmark { x: palm.0, y: palm.1 };
    lms[landmarks::MIDDLE_FINGER_TIP] = Landmark { x: palm.0, y: tip_y };
    Hand { landmarks: lms }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tip_below_palm_is_closed() {
        let g = extract(&hand_at((0.5, 0.5), 0.6), 800, 600);
        assert!(g.is_closed);
    }

    #[test]
    fn tip_above_palm_is_open() {
        let g = extract(&hand_at((0.5, 0.5), 0.3), 800, 600);
        assert!(!g.is_closed);
    }

    #[test]
    fn equal_height_is_open() {
        let g = extract(&hand_at((0.5, 0.42), 0.42), 800, 600);
        assert!(!g.is_closed);
    }

    #[test]
    fn cursor_scales_with_screen_size() {
        let hand = hand_at((0.3, 0.7), 0.1);
        for (w, h) in [(800, 600), (1200, 700), (1, 1), (1920, 1080)] {
            let g = extract(&hand, w, h);
            assert_eq!(g.cursor_x, (0.3f32 as f64 * w as f64).round() as i32);
            assert_eq!(g.cursor_y, (0.7f32 as f64 * h as f64).round() as i32);
        }
    }

    #[test]
    fn cursor_rounds_to_nearest_pixel() {
        let g = extract(&hand_at((0.25, 0.5), 0.0), 10, 10);
        assert_eq!((g.cursor_x, g.cursor_y), (3, 5)); // 2.5 rounds away from zero
        let g = extract(&hand_at((0.124, 0.126), 0.0), 100, 100);
        assert_eq!((g.cursor_x, g.cursor_y), (12, 13));
    }

    #[test]
    fn last_hand_drives_cursor_any_hand_closes() {
        let mut t = GestureTracker::new(100, 100, NoHandPolicy::Release);
        let closed_first = hand_at((0.1, 0.1), 0.2);
        let open_second = hand_at((0.9, 0.9), 0.5);
        let g = t.observe(&[closed_first, open_second]);
        assert_eq!((g.cursor_x, g.cursor_y), (90, 90));
        assert!(g.is_closed);
    }

    #[test]
    fn no_hand_releases_grip_but_keeps_cursor() {
        let mut t = GestureTracker::new(100, 100, NoHandPolicy::Release);
        t.observe(&[hand_at((0.4, 0.4), 0.8)]);
        let g = t.observe(&[]);
        assert_eq!((g.cursor_x, g.cursor_y), (40, 40));
        assert!(!g.is_closed);
    }

    #[test]
    fn no_hand_can_retain_stale_grip() {
        let mut t = GestureTracker::new(100, 100, NoHandPolicy::Retain);
        let before = t.observe(&[hand_at((0.4, 0.4), 0.8)]);
        assert_eq!(t.observe(&[]), before);
        assert!(t.state().is_closed);
    }

    #[test]
    fn classifier_is_swappable() {
        struct AlwaysClosed;
        impl GripClassifier for AlwaysClosed {
            fn is_closed(&mut self, _: &Hand) -> bool { true }
        }
        let mut t = GestureTracker::with_classifier(AlwaysClosed, 10, 10, NoHandPolicy::Release);
        assert!(t.observe(&[hand_at((0.5, 0.5), 0.0)]).is_closed);
    }
}
