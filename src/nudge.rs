// Free-floating model demo: the mesh spins on its own, and a closed hand
// nudges it a fixed step toward wherever the hand moved since the last
// closed frame.

use crate::types::GestureState;

pub const NUDGE_STEP: f32 = 0.1;         // world units per axis per frame
pub const SPIN_DEG_PER_FRAME: f32 = 1.0;
pub const SPIN_AXIS: [f32; 3] = [5.0, 1.0, 1.0];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NudgeState {
    /// Model translation in world space (y up).
    pub offset: [f32; 3],
    /// Accumulated spin around `SPIN_AXIS`, degrees.
    pub angle_deg: f32,
    /// Cursor at the last closed frame; starts at the screen origin.
    prev: (i32, i32),
}

impl Default for NudgeState {
    fn default() -> Self {
        Self { offset: [0.0; 3], angle_deg: 0.0, prev: (0, 0) }
    }
}

#[inline]
fn direction(curr: i32, prev: i32) -> f32 {
    match curr.cmp(&prev) {
        std::cmp::Ordering::Greater => 1.0,
        std::cmp::Ordering::Less => -1.0,
        std::cmp::Ordering::Equal => 0.0,
    }
}

impl NudgeState {
    /// Advance one frame. The spin always ticks; the nudge only happens
    /// while the hand is closed.
    pub fn update(&mut self, gesture: GestureState) {
        self.angle_deg = (self.angle_deg + SPIN_DEG_PER_FRAME) % 360.0;
        if !gesture.is_closed {
            return;
        }

        let (px, py) = self.prev;
        // Both axes follow the raw screen delta, so a hand moving down the
        // screen lifts the model (world y is up).
        self.offset[0] += NUDGE_STEP * direction(gesture.cursor_x, px);
        self.offset[1] += NUDGE_STEP * direction(gesture.cursor_y, py);
        self.prev = (gesture.cursor_x, gesture.cursor_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(x: i32, y: i32, is_closed: bool) -> GestureState {
        GestureState { cursor_x: x, cursor_y: y, is_closed }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn open_hand_only_spins() {
        let mut s = NudgeState::default();
        s.update(g(500, 500, false));
        s.update(g(10, 10, false));
        assert_eq!(s.offset, [0.0; 3]);
        assert!(close(s.angle_deg, 2.0));
    }

    #[test]
    fn closed_hand_steps_toward_motion() {
        let mut s = NudgeState::default();
        s.update(g(100, 100, true)); // right and down from (0,0)
        assert!(close(s.offset[0], 0.1));
        assert!(close(s.offset[1], 0.1));

        s.update(g(50, 100, true)); // left, same height
        assert!(close(s.offset[0], 0.0));
        assert!(close(s.offset[1], 0.1));

        s.update(g(50, 40, true)); // up
        assert!(close(s.offset[1], 0.0));
        assert_eq!(s.offset[2], 0.0);
    }

    #[test]
    fn open_frames_do_not_move_the_reference_point() {
        let mut s = NudgeState::default();
        s.update(g(100, 100, true));
        s.update(g(300, 300, false));
        s.update(g(100, 100, true)); // same as last closed frame
        assert!(close(s.offset[0], 0.1));
        assert!(close(s.offset[1], 0.1));
    }

    #[test]
    fn hand_moving_down_lifts_the_model() {
        let mut s = NudgeState::default();
        s.update(g(0, 100, true));
        assert!(s.offset[1] > 0.0);
        assert_eq!(s.offset[0], 0.0);

        s.update(g(0, 20, true));
        s.update(g(0, 10, true));
        assert!(close(s.offset[1], -0.1));
    }

    #[test]
    fn spin_wraps_at_full_turn() {
        let mut s = NudgeState::default();
        for _ in 0..361 {
            s.update(g(0, 0, false));
        }
        assert!(close(s.angle_deg, 1.0));
    }
}
