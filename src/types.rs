// Core types shared by the tracker, the game rules and the renderer.

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }
}

/// One tracked point, normalized to the camera image: x and y in [0,1],
/// origin top-left, y growing downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

/// One detected hand: 21 landmarks in the usual hand-landmark order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hand {
    pub landmarks: Vec<Landmark>,
}

/// What the hand is doing this frame, in screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureState {
    pub cursor_x: i32,
    pub cursor_y: i32,
    pub is_closed: bool,
}

/// The square to hit. Exactly one lives at a time; a hit replaces it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target {
    pub x: i32,    // center
    pub y: i32,
    pub size: i32, // side length
}

/// The square that follows a closed hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovedObject {
    pub x: i32,    // center
    pub y: i32,
    pub size: i32, // side length
}
