//! Lunarhop CLI - Monte Carlo ballistic hopping of water on the Moon.
//!
//! Follow single molecules, run one batch, or average many batches to
//! estimate the fraction of released water that reaches the polar cold traps.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::time::Instant;

use lunarhop::geometry::SphericalPosition;
use lunarhop::particle::Fate;
use lunarhop::physics::{
    hop_arc_length, hop_duration, photodestruction_probability, surface_temperature,
    thermal_speed, CapturePolicy, ModelVariant, PhysicalConstants, CAPTURE_BANDS,
};
use lunarhop::simulation::{ParticleOutcome, Simulation, SimulationConfig, StartMode};

/// Monte Carlo simulator of lunar exospheric water transport.
#[derive(Parser)]
#[command(name = "lunarhop")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Follow a single molecule hop by hop until it is removed.
    Journey {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Release one batch of molecules and list where each one ended up.
    Run {
        #[command(flatten)]
        common: CommonArgs,

        /// Molecules in the batch.
        #[arg(short, long, default_value = "100")]
        particles: usize,
    },

    /// Average the capture fraction over many batches.
    Average {
        #[command(flatten)]
        common: CommonArgs,

        /// Molecules per batch.
        #[arg(short, long, default_value = "100")]
        particles: usize,

        /// Number of batches.
        #[arg(short, long, default_value = "50")]
        batches: usize,

        /// Print the run summary as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Display the physical parameters of a model.
    Info {
        /// Physical model.
        #[arg(short, long, default_value = "butler1997")]
        model: ModelArg,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Where molecules are released.
    #[arg(long, default_value = "reference")]
    start: StartArg,

    /// Physical model.
    #[arg(short, long, default_value = "butler1997")]
    model: ModelArg,

    /// Random seed for reproducible runs.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Hops after which a molecule is abandoned.
    #[arg(long, default_value = "1000")]
    max_hops: u32,
}

#[derive(Clone, Copy, ValueEnum)]
enum StartArg {
    /// 70 degrees from the pole, zero azimuth.
    Reference,
    /// Uniformly random point on the sphere.
    Random,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModelArg {
    /// Butler (1997): temperature profile, cosine launch law, banded capture.
    #[value(name = "butler1997")]
    Butler1997,
    /// Butler (1993): 500 K surface, 45 degree launches, polar-cap capture.
    #[value(name = "butler1993")]
    Butler1993,
}

impl From<StartArg> for StartMode {
    fn from(arg: StartArg) -> Self {
        match arg {
            StartArg::Reference => StartMode::Reference,
            StartArg::Random => StartMode::Random,
        }
    }
}

impl From<ModelArg> for ModelVariant {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Butler1997 => ModelVariant::ButlerA,
            ModelArg::Butler1993 => ModelVariant::ButlerB,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Journey { common } => {
            let config = build_config(&common, 1, 1);
            run_journey(config);
        }
        Commands::Run { common, particles } => {
            let config = build_config(&common, particles, 1);
            run_batch(config);
        }
        Commands::Average {
            common,
            particles,
            batches,
            json,
        } => {
            let config = build_config(&common, particles, batches);
            run_average(config, json);
        }
        Commands::Info { model } => {
            run_info(model.into());
        }
    }
}

fn build_config(common: &CommonArgs, particles: usize, batches: usize) -> SimulationConfig {
    // Generate seed if not provided
    let seed = common.seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    SimulationConfig {
        start: common.start.into(),
        variant: common.model.into(),
        max_hops: common.max_hops,
        particles_per_batch: particles,
        batches,
        seed,
        ..Default::default()
    }
}

fn new_simulation(config: SimulationConfig) -> Simulation {
    Simulation::new(config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    })
}

fn print_header(title: &str, config: &SimulationConfig) {
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));
    println!(
        "Model: {} ({})",
        config.variant.short_name(),
        config.variant.paper_year()
    );
    println!("Start: {}", config.start.name());
    println!("Seed: {}", config.seed);
    println!("Max hops: {}", config.max_hops);
}

fn format_position(p: &SphericalPosition) -> String {
    let v = p.to_cartesian();
    format!(
        "phi={:>7.2}° beta={:>7.2}°  xyz=({:+.3}, {:+.3}, {:+.3})",
        p.phi.to_degrees(),
        p.beta.to_degrees(),
        v.x,
        v.y,
        v.z
    )
}

fn describe_outcome(outcome: &ParticleOutcome) -> String {
    match outcome.fate {
        Some(Fate::Photodestroyed) => format!("Destroyed after {} hops", outcome.hops),
        Some(Fate::Captured) => format!("Captured after {} hops", outcome.hops),
        None => format!("Still hopping after {} hops", outcome.hops),
    }
}

fn run_journey(config: SimulationConfig) {
    print_header("Lunarhop - Single Molecule Journey", &config);

    let mut sim = new_simulation(config);
    let journey = sim.journey();

    println!();
    let (last, launches) = match journey.positions.split_last() {
        Some(split) => split,
        None => return,
    };
    for (i, p) in launches.iter().enumerate() {
        println!("  hop {:>4}: {}", i, format_position(p));
    }
    println!("  final:    {}", format_position(last));
    println!();
    println!("{}", describe_outcome(&journey.outcome));
}

fn run_batch(config: SimulationConfig) {
    print_header("Lunarhop - Final Positions of One Batch", &config);
    println!("Particles: {}", config.particles_per_batch);

    let start = Instant::now();
    let mut sim = new_simulation(config);
    let batch = sim.run_batch();

    println!();
    for (i, outcome) in batch.outcomes.iter().enumerate() {
        let fate = outcome.fate.map(|f| f.name()).unwrap_or("exhausted");
        println!(
            "  #{:<4} {:<15} {:>4} hops  {}",
            i,
            fate,
            outcome.hops,
            format_position(&outcome.final_position)
        );
    }

    println!();
    println!(
        "Photodestroyed: {}, Captured: {}, Exhausted: {}",
        batch.tally.destroyed, batch.tally.captured, batch.tally.exhausted
    );
    println!("Completed in {:.2?}", start.elapsed());
}

fn run_average(config: SimulationConfig, json: bool) {
    if !json {
        print_header("Lunarhop - Capture Fraction Average", &config);
        println!(
            "Batches: {} x {} particles",
            config.batches, config.particles_per_batch
        );
        println!();
    }

    let start = Instant::now();
    let mut sim = new_simulation(config);
    let summary = sim.run_average_with_callbacks(
        |_, _| {},
        |i, total, tally| {
            if !json {
                println!(
                    "  [{}/{}] Completed: destroyed={} captured={} exhausted={}",
                    i + 1,
                    total,
                    tally.destroyed,
                    tally.captured,
                    tally.exhausted
                );
            }
        },
    );

    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error serializing summary: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!();
    println!(
        "Totals: destroyed={} captured={} exhausted={}",
        summary.total.destroyed, summary.total.captured, summary.total.exhausted
    );
    match summary.capture_fraction() {
        Some(f) => println!("Percentage captured: {:.3}%", f * 100.0),
        None => println!("Percentage captured: undefined (no molecule was destroyed or captured)"),
    }
    if let Some((mean, sd)) = summary.batch_fraction_stats() {
        println!(
            "Per-batch capture: {:.3}% ± {:.3}%",
            mean * 100.0,
            sd * 100.0
        );
    }
    println!("\nTotal time: {:.2?}", start.elapsed());
}

fn run_info(variant: ModelVariant) {
    let c = PhysicalConstants::lunar();
    let mass = c.molecule_mass();

    println!("Lunarhop - Model Info");
    println!("=====================");
    println!();
    println!("Model: {} ({})", variant.short_name(), variant.paper_year());
    println!();
    println!("Constants:");
    println!("  Surface gravity:       {:>12.4} m/s^2", c.gravity);
    println!("  Moon radius:           {:>12.1} km", c.moon_radius_m / 1000.0);
    println!("  Photoloss timescale:   {:>12.1} s", c.photoloss_timescale_s);
    println!("  Water molecule mass:   {:>12.4e} kg", mass);
    println!();

    println!("Surface conditions:");
    let reference = SphericalPosition::reference();
    let points = [
        ("Equator", std::f64::consts::FRAC_PI_2),
        ("Reference (70°)", reference.phi),
        ("Pole", 0.0),
    ];
    for (label, phi) in points {
        let t = surface_temperature(phi, variant, &c);
        let v = thermal_speed(mass, t, &c);
        println!("  {:<16} T={:>7.1} K  v_rms={:>7.1} m/s", label, t, v);
    }
    println!();

    // Hop metrics at the reference point for a 45 degree launch.
    let t = surface_temperature(reference.phi, variant, &c);
    let v = thermal_speed(mass, t, &c);
    let angle = c.fixed_launch_angle_rad;
    let duration = hop_duration(v, angle, &c);
    println!("Hop from reference point at 45°:");
    println!("  Flight time:           {:>10.1} s", duration);
    println!(
        "  Arc length:            {:>10.2}°",
        hop_arc_length(v, angle, &c).to_degrees()
    );
    println!(
        "  P(photodestroyed):     {:>10.4}",
        photodestruction_probability(duration, &c)
    );
    println!();

    println!("Capture:");
    match variant.capture_policy() {
        CapturePolicy::PolarCap => {
            println!(
                "  Polar caps of radius {:.0} km ({:.2}° from each pole), always captured",
                c.polar_cap_radius_m / 1000.0,
                c.polar_cap_half_angle().to_degrees()
            );
        }
        CapturePolicy::LatitudeBands => {
            for (edge, percent) in CAPTURE_BANDS {
                println!("  > {:>4.0}° from equator: {:>5.1}%", edge, percent);
            }
            println!("  otherwise:              0.0%");
        }
    }
}
