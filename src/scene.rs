// The two demos as scenes: each takes one gesture per frame and draws
// itself into the screen buffer. Neither touches the window or camera,
// so both run headless in tests.

use std::time::Duration;

use rand::rngs::StdRng;
use tracing::info;

use crate::draw::{
    self, GREEN, RED, WHITE, YELLOW, draw_crosshair, draw_text_5x7, draw_text_centered, fill_square,
};
use crate::game::{self, GameState, PlayArea};
use crate::mesh::Mesh;
use crate::nudge::{NudgeState, SPIN_AXIS};
use crate::types::{FrameBuffer, GestureState};
use crate::view::{EYE_DISTANCE, Projection, rotate};

const MESH_COLOR: u32 = 0x00_80_80_80;
const SCORE_SCALE: i32 = 3;
const SCORE_Y: i32 = 50;

pub trait Scene {
    /// Advance one frame with this frame's gesture.
    fn tick(&mut self, gesture: GestureState);

    /// Draw the current state. `hud` carries the gesture when the debug
    /// overlay is on.
    fn render(&self, fb: &mut FrameBuffer, hud: Option<GestureState>);

    /// Fixed pause after each presented frame, if any.
    fn frame_delay(&self) -> Option<Duration> {
        None
    }
}

fn draw_hud(fb: &mut FrameBuffer, g: GestureState) {
    draw_crosshair(fb, g.cursor_x, g.cursor_y, 12, YELLOW);
    let status = format!(
        "{} ({},{})",
        if g.is_closed { "GRIP" } else { "OPEN" },
        g.cursor_x,
        g.cursor_y
    );
    let y = fb.height as i32 - 16;
    draw_text_5x7(fb, 8, y, &status, WHITE, 1);
}

/* ------------------------------ target practice ------------------------------ */

pub struct GameScene {
    mesh: Mesh,
    area: PlayArea,
    rng: StdRng,
    state: GameState,
    last: GestureState,
}

impl GameScene {
    pub fn new(mesh: Mesh, area: PlayArea, mut rng: StdRng) -> Self {
        let state = GameState::new(&area, &mut rng);
        info!(x = state.target.x, y = state.target.y, "first target placed");
        Self { mesh, area, rng, state, last: GestureState::default() }
    }

    #[cfg(test)]
    pub fn state(&self) -> &GameState {
        &self.state
    }
}

impl Scene for GameScene {
    fn tick(&mut self, gesture: GestureState) {
        let step = game::update(gesture, self.state, &self.area, &mut self.rng);
        if step.hit {
            info!(
                score = step.state.score,
                next_x = step.state.target.x,
                next_y = step.state.target.y,
                "target hit"
            );
        }
        self.state = step.state;
        self.last = gesture;
    }

    fn render(&self, fb: &mut FrameBuffer, hud: Option<GestureState>) {
        fb.clear(draw::BLACK);

        let flat = Projection::Ortho { pixels_per_unit: 40.0 };
        draw::draw_wireframe(fb, &self.mesh, &flat, |v| v, MESH_COLOR);

        let label = format!("SCORE: {}", self.state.score);
        let cx = fb.width as i32 / 2;
        draw_text_centered(fb, cx, SCORE_Y, &label, WHITE, SCORE_SCALE);

        let t = self.state.target;
        fill_square(fb, t.x, t.y, t.size, RED);

        // The cube only shows while it is being held.
        if self.last.is_closed {
            let c = self.state.cube;
            fill_square(fb, c.x, c.y, c.size, GREEN);
        }

        if let Some(g) = hud {
            draw_hud(fb, g);
        }
    }
}

/* ------------------------------ nudge ------------------------------ */

pub struct NudgeScene {
    mesh: Mesh,
    state: NudgeState,
}

impl NudgeScene {
    pub fn new(mesh: Mesh) -> Self {
        Self { mesh, state: NudgeState::default() }
    }

    #[cfg(test)]
    pub fn state(&self) -> &NudgeState {
        &self.state
    }
}

impl Scene for NudgeScene {
    fn tick(&mut self, gesture: GestureState) {
        self.state.update(gesture);
    }

    fn render(&self, fb: &mut FrameBuffer, hud: Option<GestureState>) {
        fb.clear(draw::BLACK);

        let NudgeState { offset, angle_deg, .. } = self.state;
        let place = |v: [f32; 3]| {
            let r = rotate(v, SPIN_AXIS, angle_deg);
            [r[0] + offset[0], r[1] + offset[1], r[2] + offset[2] - EYE_DISTANCE]
        };
        draw::draw_wireframe(fb, &self.mesh, &Projection::perspective(), place, WHITE);

        if let Some(g) = hud {
            draw_hud(fb, g);
        }
    }

    fn frame_delay(&self) -> Option<Duration> {
        Some(Duration::from_millis(15))
    }
}
