// Command-line flags → one immutable Config for the run.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::gesture::NoHandPolicy;
use crate::tracker::DetectorCommand;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Grab the cube and hit the red target to score.
    Game,
    /// Spinning wireframe model nudged around by a closed hand.
    Nudge,
}

impl Variant {
    /// Window size in pixels.
    pub fn window_size(self) -> (usize, usize) {
        (800, 600)
    }

    /// Screen size the hand cursor is scaled to.
    pub fn screen_size(self) -> (i32, i32) {
        match self {
            Variant::Game => (800, 600),
            Variant::Nudge => (1200, 1200),
        }
    }

    /// Longest side of the mesh after fitting, in world units.
    pub fn model_size(self) -> f32 {
        match self {
            Variant::Game => 5.0,
            Variant::Nudge => 3.0,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Variant::Game => "Hand Grab: Target Practice",
            Variant::Nudge => "Hand Grab: Nudge",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "hand-grab", about = "Grab things on screen with your hand, via webcam")]
pub struct Cli {
    /// Which demo to run
    #[arg(long, value_enum, default_value_t = Variant::Game)]
    pub variant: Variant,

    /// Camera device index
    #[arg(long, default_value_t = 0)]
    pub camera: u32,

    /// Requested camera width (the device may pick something close)
    #[arg(long, default_value_t = 640)]
    pub camera_width: u32,

    /// Requested camera height
    #[arg(long, default_value_t = 480)]
    pub camera_height: u32,

    /// Wavefront OBJ mesh drawn in the background
    #[arg(long, default_value = "assets/cube.obj")]
    pub model: PathBuf,

    /// Program used to run the landmark detector
    #[arg(long, default_value = "python3")]
    pub detector: String,

    /// Detector script passed to the program
    #[arg(long, default_value = "scripts/hand_detect.py")]
    pub detector_script: PathBuf,

    /// Detection confidence threshold, handed to the detector script
    #[arg(long, default_value_t = 0.5)]
    pub min_confidence: f32,

    /// Seed for target placement (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Keep the last grip when the hand leaves the frame
    #[arg(long)]
    pub keep_stale_grip: bool,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub variant: Variant,
    pub camera_index: u32,
    pub camera_size: (u32, u32),
    pub model: PathBuf,
    pub detector: DetectorCommand,
    pub seed: Option<u64>,
    pub no_hand: NoHandPolicy,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            variant: cli.variant,
            camera_index: cli.camera,
            camera_size: (cli.camera_width, cli.camera_height),
            model: cli.model,
            detector: DetectorCommand {
                program: cli.detector,
                script: cli.detector_script,
                min_score: cli.min_confidence.clamp(0.0, 1.0),
            },
            seed: cli.seed,
            no_hand: if cli.keep_stale_grip { NoHandPolicy::Retain } else { NoHandPolicy::Release },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::from(Cli::parse_from(["hand-grab"]));
        assert_eq!(cfg.variant, Variant::Game);
        assert_eq!(cfg.camera_index, 0);
        assert_eq!(cfg.camera_size, (640, 480));
        assert_eq!(cfg.no_hand, NoHandPolicy::Release);
        assert_eq!(cfg.detector.min_score, 0.5);
        assert!(cfg.seed.is_none());
    }

    #[test]
    fn nudge_with_flags() {
        let cfg = Config::from(Cli::parse_from([
            "hand-grab",
            "--variant",
            "nudge",
            "--seed",
            "9",
            "--keep-stale-grip",
            "--min-confidence",
            "3",
        ]));
        assert_eq!(cfg.variant, Variant::Nudge);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.no_hand, NoHandPolicy::Retain);
        assert_eq!(cfg.detector.min_score, 1.0);
    }

    #[test]
    fn variant_constants() {
        assert_eq!(Variant::Game.screen_size(), (800, 600));
        assert_eq!(Variant::Nudge.screen_size(), (1200, 1200));
        assert_eq!(Variant::Game.model_size(), 5.0);
        assert_eq!(Variant::Nudge.model_size(), 3.0);
    }

    #[test]
    fn rejects_unknown_variant() {
        assert!(Cli::try_parse_from(["hand-grab", "--variant", "pong"]).is_err());
    }
}
