// Target practice rules: a closed hand drags the cube, and a closed hand over
// the target scores a point and respawns the target somewhere else.

use rand::Rng;

use crate::types::{GestureState, MovedObject, Target};

pub const TARGET_SIZE: i32 = 20;
pub const CUBE_SIZE: i32 = 50;
pub const SPAWN_MARGIN: i32 = 50; // targets never spawn closer than this to an edge

/// Screen region targets may spawn in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayArea {
    pub width: i32,
    pub height: i32,
    pub margin: i32,
}

impl PlayArea {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height, margin: SPAWN_MARGIN }
    }

    // Inclusive spawn range along one axis; collapses to the middle on tiny screens.
    fn span(&self, extent: i32) -> (i32, i32) {
        let lo = self.margin.min(extent / 2);
        let hi = (extent - self.margin).max(lo);
        (lo, hi)
    }
}

impl Target {
    /// A fresh target, uniformly placed inside the play area margins.
    pub fn random<R: Rng + ?Sized>(area: &PlayArea, rng: &mut R) -> Self {
        let (x0, x1) = area.span(area.width);
        let (y0, y1) = area.span(area.height);
        Target {
            x: rng.gen_range(x0..=x1),
            y: rng.gen_range(y0..=y1),
            size: TARGET_SIZE,
        }
    }

    /// Strict box test: a point exactly on the edge is outside.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let half = self.size as f32 / 2.0;
        (x.abs_diff(self.x) as f32) < half && (y.abs_diff(self.y) as f32) < half
    }
}

impl MovedObject {
    pub fn centered_in(area: &PlayArea) -> Self {
        MovedObject { x: area.width / 2, y: area.height / 2, size: CUBE_SIZE }
    }
}

/// Everything the game remembers between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameState {
    pub target: Target,
    pub cube: MovedObject,
    pub score: u64,
}

impl GameState {
    pub fn new<R: Rng + ?Sized>(area: &PlayArea, rng: &mut R) -> Self {
        GameState {
            target: Target::random(area, rng),
            cube: MovedObject::centered_in(area),
            score: 0,
        }
    }
}

/// Result of one frame of rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub state: GameState,
    pub hit: bool,
}

/// Apply one frame of gesture to the game.
///
/// Open hand: nothing changes. Closed hand: the cube snaps to the cursor, and
/// if the cursor is inside the target the score goes up by one and a new
/// target replaces the old one.
pub fn update<R: Rng + ?Sized>(
    gesture: GestureState,
    state: GameState,
    area: &PlayArea,
    rng: &mut R,
) -> Step {
    if !gesture.is_closed {
        return Step { state, hit: false };
    }

    let GestureState { cursor_x, cursor_y, .. } = gesture;
    let mut next = state;
    let hit = state.target.contains(cursor_x, cursor_y);
    if hit {
        next.score += 1;
        next.target = Target::random(area, rng);
    }
    next.cube.x = cursor_x;
    next.cube.y = cursor_y;
    Step { state: next, hit }
}
