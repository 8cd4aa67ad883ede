// One error type for the whole app.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    WindowInit(String),   // Creating the window failed
    WindowUpdate(String), // Updating the window buffer failed
    CameraInit(String),   // Opening/starting the camera failed
    CameraFrame(String),  // Grabbing/decoding a frame failed
    TrackerInit(String),  // Spawning the landmark detector failed
    Tracker(String),      // Talking to a running detector failed
    Asset(String),        // Loading the mesh failed
}

impl Error {
    /// Errors the frame loop may shrug off: the next iteration simply tries again.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::CameraFrame(_))
    }
}

impl Display for Error {
    // This decides how the error is printed to your console.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::CameraInit(s) => write!(f, "Camera init error: {s}"),
            Error::CameraFrame(s) => write!(f, "Camera frame error: {s}"),
            Error::TrackerInit(s) => write!(f, "Hand detector init error: {s}"),
            Error::Tracker(s) => write!(f, "Hand detector error: {s}"),
            Error::Asset(s) => write!(f, "Asset error: {s}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_camera_frames_are_transient() {
        assert!(Error::CameraFrame("eof".into()).is_transient());
        assert!(!Error::CameraInit("busy".into()).is_transient());
        assert!(!Error::Tracker("pipe closed".into()).is_transient());
        assert!(!Error::Asset("missing".into()).is_transient());
    }

    #[test]
    fn display_names_the_failure_site() {
        let e = Error::Asset("Cube.obj: not found".into());
        assert_eq!(e.to_string(), "Asset error: Cube.obj: not found");
    }
}
