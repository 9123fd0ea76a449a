mod scenario;
mod view_app;

use clap::{Args, Parser, Subcommand};
use orrery_core::{Preset, Simulation};
use scenario::parse_scenario;
use std::fs;
use std::path::PathBuf;
use view_app::{Source, ViewApp};

#[derive(Parser)]
#[command(name = "orrery")]
#[command(about = "Orrery - A gravitational N-body sandbox", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the initial bodies come from
#[derive(Args)]
struct SourceArgs {
    /// Path to a scenario file
    #[arg(long, conflicts_with = "preset")]
    scenario: Option<PathBuf>,

    /// Built-in preset: solar or compact
    #[arg(long)]
    preset: Option<Preset>,

    /// Seed for preset generation
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

impl SourceArgs {
    fn source(self) -> Source {
        match self.scenario {
            Some(path) => Source::Scenario(path),
            None => Source::Preset {
                preset: self.preset.unwrap_or(Preset::Solar),
                seed: self.seed,
            },
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation headless and print the final state
    Run {
        #[command(flatten)]
        source: SourceArgs,

        /// Simulated wall-clock seconds
        #[arg(long, default_value_t = 10.0)]
        seconds: f64,

        /// Frames per second to drive the simulation with
        #[arg(long, default_value_t = 60.0)]
        fps: f64,

        /// Gravity multiplier
        #[arg(long)]
        gravity: Option<f64>,

        /// Speed multiplier
        #[arg(long)]
        speed: Option<f64>,
    },
    /// Open the interactive viewer
    View {
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            source,
            seconds,
            fps,
            gravity,
            speed,
        } => run_headless(source.source(), seconds, fps, gravity, speed),
        Commands::View { source } => run_viewer(source.source()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load(source: &Source) -> Result<Simulation, Box<dyn std::error::Error>> {
    match source {
        Source::Scenario(path) => {
            let text = fs::read_to_string(path)?;
            parse_scenario(&text)
                .and_then(|scenario| scenario.build())
                .map_err(|e| Box::<dyn std::error::Error>::from(e.located(path)))
        }
        Source::Preset { preset, seed } => {
            let mut sim = Simulation::new();
            sim.load_preset(*preset, *seed)?;
            Ok(sim)
        }
    }
}

fn run_headless(
    source: Source,
    seconds: f64,
    fps: f64,
    gravity: Option<f64>,
    speed: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !(fps.is_finite() && fps > 0.0) {
        return Err(format!("fps must be positive, got {fps}").into());
    }
    if !(seconds.is_finite() && seconds >= 0.0) {
        return Err(format!("seconds must be non-negative, got {seconds}").into());
    }

    let mut sim = load(&source)?;
    if let Some(g) = gravity {
        sim.set_gravity_multiplier(g)?;
    }
    if let Some(s) = speed {
        sim.set_speed_multiplier(s)?;
    }

    let frames = (seconds * fps).round() as u64;
    let frame_dt = 1.0 / fps;
    let mut merges = 0;
    let mut capped = 0;
    for _ in 0..frames {
        let report = sim.advance(frame_dt);
        merges += report.merges.len();
        capped += usize::from(report.capped);
    }

    // Print final bodies
    for body in sim.snapshot() {
        println!(
            "{} mass={:.3} radius={:.3} pos=({:.3}, {:.3}, {:.3}) vel=({:.3}, {:.3}, {:.3})",
            body.id,
            body.mass,
            body.radius,
            body.position.x,
            body.position.y,
            body.position.z,
            body.velocity.x,
            body.velocity.y,
            body.velocity.z,
        );
    }

    let report = sim.diagnostics();
    println!("elapsed = {:.4}", sim.elapsed());
    println!("frames = {frames} (capped {capped})");
    println!("merges = {merges}");
    println!("bodies = {}", report.body_count);
    println!("total_mass = {:.6}", report.total_mass);
    println!("kinetic_energy = {:.6}", report.kinetic_energy);
    println!("potential_energy = {:.6}", report.potential_energy);
    println!("total_energy = {:.6}", report.total_energy());
    println!(
        "momentum = ({:.6}, {:.6}, {:.6})",
        report.total_momentum.x, report.total_momentum.y, report.total_momentum.z
    );

    Ok(())
}

fn run_viewer(source: Source) -> Result<(), Box<dyn std::error::Error>> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Orrery",
        options,
        Box::new(move |cc| Ok(Box::new(ViewApp::new(source, cc)))),
    )?;
    Ok(())
}
