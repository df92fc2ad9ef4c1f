//! Sprung CLI
//!
//! Runs one damped spring from a start position to a target and prints every
//! frame's position and velocity, followed by the settled value.

mod config;
mod driver;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Overrides, SprungConfig};
use driver::FramePacing;
use output::OutputFormat;
use sprung_animation::{ManualFrameClock, Oscillator};
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

/// Run a damped spring animation and print its frames
#[derive(Parser, Debug)]
#[command(name = "sprung")]
#[command(about = "Run a damped spring animation and print its frames")]
#[command(version)]
struct Args {
    /// Config file (or directory containing sprung.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start position
    #[arg(long, allow_negative_numbers = true)]
    from: Option<f64>,

    /// Target position
    #[arg(long, allow_negative_numbers = true)]
    to: Option<f64>,

    /// Spring constant
    #[arg(short = 'k', long)]
    stiffness: Option<f64>,

    /// Damping coefficient
    #[arg(short = 'd', long)]
    damping: Option<f64>,

    /// Initial velocity
    #[arg(short = 'v', long, allow_negative_numbers = true)]
    velocity: Option<f64>,

    /// Mass
    #[arg(long)]
    mass: Option<f64>,

    /// Settlement threshold on the net force
    #[arg(long)]
    precision: Option<f64>,

    /// Simulated display refresh rate
    #[arg(long)]
    fps: Option<u32>,

    /// Stop after this many frames even if the spring is still moving
    #[arg(long)]
    max_frames: Option<u64>,

    /// Pace frames with the wall clock instead of simulating them
    #[arg(long)]
    realtime: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            from: self.from,
            to: self.to,
            stiffness: self.stiffness,
            damping: self.damping,
            velocity: self.velocity,
            mass: self.mass,
            precision: self.precision,
            fps: self.fps,
            max_frames: self.max_frames,
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only samples
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            SprungConfig::load(path)?
        }
        None => SprungConfig::default(),
    };
    args.overrides().apply(&mut config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start runtime")?;

    runtime.block_on(run(config, args.format, args.realtime))
}

async fn run(config: SprungConfig, format: OutputFormat, realtime: bool) -> Result<()> {
    let clock = Rc::new(ManualFrameClock::new());

    let mut frame = 0u64;
    let oscillator = Oscillator::new(
        clock.clone(),
        move |sample| {
            match output::format_sample(format, frame, sample) {
                Ok(line) => {
                    if let Err(e) = writeln!(std::io::stdout(), "{}", line) {
                        tracing::error!("Failed to write sample: {}", e);
                    }
                }
                Err(e) => tracing::error!("Failed to format sample: {}", e),
            }
            frame += 1;
        },
        config.run.from,
        config.run.to,
        config.spring,
    )
    .context("Invalid spring configuration")?;

    tracing::info!(
        "Animating {} -> {} at {} fps",
        config.run.from,
        config.run.to,
        config.run.fps
    );

    let pacing = FramePacing {
        fps: config.run.fps,
        max_frames: config.run.max_frames,
        realtime,
    };
    let frames = driver::drive(&clock, pacing).await;

    let completion = oscillator.completion();
    if !completion.is_resolved() {
        oscillator.pause();
        if config.spring.is_degenerate() {
            tracing::warn!("Stiffness and damping are both zero; this spring never settles");
        }
        anyhow::bail!("Spring did not settle within {} frames", frames);
    }

    let settled = completion.await;
    println!("{}", output::format_settled(format, settled, frames)?);
    tracing::info!("Settled at {} after {} frames", settled, frames);

    Ok(())
}
