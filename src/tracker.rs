// Hand landmark detection through an external detector process.
//
// The detector is a long-running child process speaking a tiny protocol:
// it prints `READY` once, then for every frame it reads a little-endian
// `u32` header (`width`, `height`, `channels`) followed by raw RGB bytes on
// stdin, and answers with a single JSON line on stdout:
//
// {"hands":[{"score":0.93,"landmarks":[{"x":0.51,"y":0.42,"z":-0.01}, ...]}]}
//
// An `"error"` field means the detector could not process that frame.

use std::ffi::OsString;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use image::RgbImage;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::gesture::landmarks;
use crate::types::{Hand, Landmark};

/// Anything that can turn a camera frame into hands.
pub trait LandmarkSource {
    /// Hands found in `frame`, in detection order. Empty when there are none.
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Hand>, Error>;
}

#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    #[serde(default = "full_confidence")]
    score: f32,
    landmarks: Vec<LandmarkJson>,
}

fn full_confidence() -> f32 {
    1.0
}

// Normalized coordinates may stray a little past the frame edge; anything
// further out (or NaN) is detector garbage.
const COORD_RANGE: std::ops::RangeInclusive<f32> = -1.0..=2.0;

fn in_frame(l: &LandmarkJson) -> bool {
    COORD_RANGE.contains(&l.x) && COORD_RANGE.contains(&l.y)
}

#[derive(Deserialize, Debug)]
struct DetectionJson {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// Parse one detector reply. Hands below `min_score`, with missing
/// landmarks, or with coordinates far outside the frame are dropped; a
/// detector-side error yields no hands.
pub fn parse_detection(line: &str, min_score: f32) -> Result<Vec<Hand>, Error> {
    let result: DetectionJson = serde_json::from_str(line.trim())
        .map_err(|e| Error::Tracker(format!("Bad reply {:?}: {e}", line.trim())))?;

    if let Some(err) = result.error {
        warn!(error = %err, "detector could not process frame");
        return Ok(Vec::new());
    }

    let mut hands = Vec::with_capacity(result.hands.len());
    for hand in result.hands {
        if hand.score < min_score {
            debug!(score = hand.score, "hand below confidence threshold");
            continue;
        }
        if hand.landmarks.len() < landmarks::COUNT {
            warn!(got = hand.landmarks.len(), "expected {} landmarks", landmarks::COUNT);
            continue;
        }
        if !hand.landmarks.iter().all(in_frame) {
            warn!("hand landmarks out of range, dropping hand");
            continue;
        }
        hands.push(Hand {
            landmarks: hand.landmarks.iter().map(|l| Landmark { x: l.x, y: l.y }).collect(),
        });
    }
    Ok(hands)
}

/// How to launch the detector process.
#[derive(Clone, Debug)]
pub struct DetectorCommand {
    pub program: String,
    pub script: PathBuf,
    pub min_score: f32,
}

impl DetectorCommand {
    /// Arguments after the program: the script, then its detection threshold.
    pub fn args(&self) -> Vec<OsString> {
        vec![
            self.script.clone().into_os_string(),
            "--min-confidence".into(),
            self.min_score.to_string().into(),
        ]
    }
}

/// Landmark source backed by a detector child process.
pub struct DetectorBridge {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    min_score: f32,
    line: String,
}

impl DetectorBridge {
    /// Start the detector and wait until it reports `READY`.
    pub fn spawn(cmd: &DetectorCommand) -> Result<Self, Error> {
        if !cmd.script.exists() {
            return Err(Error::TrackerInit(format!(
                "detector script not found at {}",
                cmd.script.display()
            )));
        }

        info!(
            program = %cmd.program,
            script = %cmd.script.display(),
            min_score = cmd.min_score,
            "starting hand detector"
        );
        let mut child = Command::new(&cmd.program)
            .args(cmd.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::TrackerInit(format!("spawn {}: {e}", cmd.program)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::TrackerInit("detector stdin unavailable".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::TrackerInit("detector stdout unavailable".into()))?;

        let mut bridge = Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
            min_score: cmd.min_score,
            line: String::new(),
        };

        let ready = bridge.read_line().map_err(|e| Error::TrackerInit(e.to_string()))?;
        if ready.trim() != "READY" {
            return Err(Error::TrackerInit(format!(
                "detector did not signal ready, got {:?}",
                ready.trim()
            )));
        }
        info!("hand detector ready");
        Ok(bridge)
    }

    fn read_line(&mut self) -> Result<&str, Error> {
        self.line.clear();
        let n = self
            .stdout
            .read_line(&mut self.line)
            .map_err(|e| Error::Tracker(format!("read reply: {e}")))?;
        if n == 0 {
            return Err(Error::Tracker("detector exited".into()));
        }
        Ok(&self.line)
    }
}

/// Frame header + pixels exactly as the detector expects them on stdin.
pub fn encode_frame<W: Write>(out: &mut W, frame: &RgbImage) -> std::io::Result<()> {
    out.write_all(&frame.width().to_le_bytes())?;
    out.write_all(&frame.height().to_le_bytes())?;
    out.write_all(&3u32.to_le_bytes())?;
    out.write_all(frame.as_raw())?;
    out.flush()
}

impl LandmarkSource for DetectorBridge {
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Hand>, Error> {
        encode_frame(&mut self.stdin, frame)
            .map_err(|e| Error::Tracker(format!("send frame: {e}")))?;
        let min_score = self.min_score;
        let line = self.read_line()?;
        parse_detection(line, min_score)
    }
}

impl Drop for DetectorBridge {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
