// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Facewarp — face retouching from the command line.
//
// Entry point. Initialises logging, parses the command line, and drives an
// edit session: load photo, detect landmarks, render the effect, save.

mod services;
mod state;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use facewarp_bridge::sidecar::parse_sidecar;
use facewarp_bridge::{LandmarkDetector, SidecarDetector, platform_detector};
use facewarp_core::error::{FaceWarpError, Result};
use facewarp_core::human_errors::humanize_error;
use facewarp_core::{Effect, ImageExtent};
use facewarp_image::{ImageProcessor, plan};

use services::app_services::AppServices;
use state::EditSession;

#[derive(Parser)]
#[command(name = "facewarp")]
#[command(about = "Enlarge eyes or slim the face in a portrait using facial landmarks")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to the user config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enlarge both eyes with a bump distortion.
    EnlargeEyes(RetouchArgs),

    /// Narrow the face with a pinch distortion.
    SlimFace(RetouchArgs),

    /// Print the distortion steps an effect would run, as JSON.
    Plan(PlanArgs),

    /// Print the effective configuration as JSON.
    Config {
        /// Also write it back: to `--config` when given, else to the user
        /// config directory.
        #[arg(long)]
        save: bool,
    },
}

#[derive(Debug, Clone, Args)]
struct RetouchArgs {
    /// Photo to retouch.
    #[arg(long)]
    image: PathBuf,

    /// Landmarks JSON. Defaults to `<image>.landmarks.json` when present.
    #[arg(long)]
    landmarks: Option<PathBuf>,

    /// Output path; the format follows the extension.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Debug, Clone, Args)]
struct PlanArgs {
    #[arg(long, value_enum)]
    effect: EffectArg,

    /// Landmarks JSON.
    #[arg(long)]
    landmarks: PathBuf,

    /// Image width in pixels.
    #[arg(long)]
    width: u32,

    /// Image height in pixels.
    #[arg(long)]
    height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EffectArg {
    EnlargeEyes,
    SlimFace,
}

impl From<EffectArg> for Effect {
    fn from(arg: EffectArg) -> Self {
        match arg {
            EffectArg::EnlargeEyes => Effect::EnlargeEyes,
            EffectArg::SlimFace => Effect::SlimFace,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let human = humanize_error(&err);
            tracing::debug!(error = %err, severity = ?human.severity, "command failed");
            eprintln!("{}\n{}", human.message, human.suggestion);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let svc = AppServices::init(cli.config.as_deref())?;
    match cli.command {
        Commands::EnlargeEyes(args) => retouch_file(&svc, Effect::EnlargeEyes, &args).await,
        Commands::SlimFace(args) => retouch_file(&svc, Effect::SlimFace, &args).await,
        Commands::Plan(args) => print_plan(&svc, &args),
        Commands::Config { save } => {
            println!("{}", serde_json::to_string_pretty(svc.config())?);
            if save {
                let path = svc.save_config()?;
                tracing::info!(path = %path.display(), "configuration saved");
            }
            Ok(())
        }
    }
}

/// Landmarks file to use for `image`: the explicit one, else the sidecar
/// beside the photo if it exists.
fn resolve_landmarks(image: &Path, explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let sidecar = SidecarDetector::beside(image);
    sidecar.path().exists().then(|| sidecar.path().to_path_buf())
}

async fn retouch_file(svc: &AppServices, effect: Effect, args: &RetouchArgs) -> Result<()> {
    // No native detector on this platform: without landmarks there is
    // nothing to run.
    let Some(landmarks) = resolve_landmarks(&args.image, args.landmarks.as_deref()) else {
        tracing::warn!(image = %args.image.display(), "no landmarks file found");
        return Err(FaceWarpError::PlatformUnavailable);
    };

    let session = EditSession::new();
    session.load(ImageProcessor::open(&args.image)?.into_dynamic());

    let detector: Arc<dyn LandmarkDetector> = Arc::from(platform_detector(Some(&landmarks)));
    svc.retouch(&session, effect, detector).await?;

    let displayed = session.displayed().ok_or(FaceWarpError::NoImageLoaded)?;
    ImageProcessor::from_dynamic(Arc::unwrap_or_clone(displayed))
        .save(&args.out, svc.config().jpeg_quality)?;
    tracing::info!(out = %args.out.display(), %effect, "retouched photo written");
    Ok(())
}

fn print_plan(svc: &AppServices, args: &PlanArgs) -> Result<()> {
    let json = std::fs::read_to_string(&args.landmarks)?;
    let face = parse_sidecar(&json)?.ok_or(FaceWarpError::NoFaceDetected)?;
    let specs = plan(
        args.effect.into(),
        &face,
        ImageExtent::new(args.width, args.height),
        &svc.config().warp,
    )?;
    println!("{}", serde_json::to_string_pretty(&specs)?);
    Ok(())
}
