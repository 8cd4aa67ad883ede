// What you SEE:
// • `--variant game` (default): a red target sits somewhere on screen. Close
//   your hand (middle finger folded down) to grab the green cube and drag it
//   around; grabbing over the target scores a point and moves the target.
// • `--variant nudge`: a wireframe model spins in 3D; close your hand and move
//   it to push the model around.
// • H toggles a crosshair at your hand plus a grip readout. ESC or closing the
//   window quits.
//
// Hand landmarks come from an external detector process (see scripts/).

mod app;
mod camera;
mod config;
mod draw;
mod error;
mod game;
mod gesture;
mod mesh;
mod nudge;
mod scene;
mod tracker;
mod types;
mod view;

use clap::Parser;
use config::{Cli, Config};
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hand_grab=info".into()),
        )
        .init();

    match app::run(Config::from(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
