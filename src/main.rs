use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

use aqroute::api::{DataServer, load_sensors};
use aqroute::config::FileConfig;
use aqroute::domain::{ConfinementBoundary, Coordinate, SurveyDate};
use aqroute::output::{write_flightpath, write_readings_map};
use aqroute::planner::{CollisionChecker, Navigator, Outcome};

/// Plan a drone flight that reads every air-quality sensor and returns home
///
/// Examples:
///   # Survey 2 March 2020 starting next to the library, server on port 9898
///   aqroute --day 2 --month 3 --year 2020 --lat 55.944425 --lng -3.188396 --port 9898
///
///   # Use a config file and a tighter move budget
///   aqroute --config survey.toml -d 15 -m 6 -y 2020 --lat 55.9444 --lng -3.1878 --move-ceiling 120
#[derive(Parser, Debug)]
#[command(name = "aqroute")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches aqroute.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Day of the survey
    #[arg(short = 'd', long)]
    day: u8,

    /// Month of the survey
    #[arg(short = 'm', long)]
    month: u8,

    /// Year of the survey
    #[arg(short = 'y', long)]
    year: u16,

    /// Latitude of the start and return position
    #[arg(long)]
    lat: f64,

    /// Longitude of the start and return position
    #[arg(long, allow_hyphen_values = true)]
    lng: f64,

    /// Data server host
    #[arg(long)]
    host: Option<String>,

    /// Data server port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Directory for the flight path and readings files
    #[arg(short = 'o', long)]
    output_dir: Option<PathBuf>,

    /// Maximum number of moves, outbound plus return
    #[arg(long)]
    move_ceiling: Option<usize>,

    /// Points checked along each move
    #[arg(long)]
    collision_samples: Option<usize>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let mut config: FileConfig = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            toml::from_str(&contents).context("Failed to parse config file")?
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load().unwrap_or_default()
    };

    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ceiling) = args.move_ceiling {
        config.planner.move_ceiling = ceiling;
    }
    if let Some(samples) = args.collision_samples {
        config.planner.collision_samples = samples;
    }
    let verbose = args.verbose || config.verbose;
    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let date = SurveyDate::new(args.day, args.month, args.year)?;
    let base = Coordinate::new(args.lng, args.lat);

    println!("aqroute - Air Quality Drone Route Planner");
    println!("=========================================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Date: {}", date);
        println!("  Start: {}", base);
        println!("  Server: {}", config.server.base_url());
        println!("  Move ceiling: {}", config.planner.move_ceiling);
        println!("  Step length: {}", config.planner.step_length);
        println!("  Collision samples: {}", config.planner.collision_samples);
        println!("  Output directory: {}", output_dir.display());
        println!();
    }

    let boundary = ConfinementBoundary::new(&config.confinement_ring())
        .context("Invalid confinement boundary in configuration")?;

    let server = DataServer::new(&config.server)?;

    let spinner = create_spinner("Fetching sensors...");
    let start = Instant::now();
    let sensors = load_sensors(&server, &date, config.planner.reading_radius)
        .context("Failed to load sensors")?;
    spinner.finish_with_message(format!(
        "Loaded {} sensors for {} [{:.1}s]",
        sensors.len(),
        date,
        start.elapsed().as_secs_f32()
    ));

    let spinner = create_spinner("Fetching no-fly zones...");
    let start = Instant::now();
    let zones = server
        .fetch_no_fly_zones()
        .context("Failed to load no-fly zones")?;
    spinner.finish_with_message(format!(
        "Loaded {} no-fly zones [{:.1}s]",
        zones.len(),
        start.elapsed().as_secs_f32()
    ));

    let checker = CollisionChecker::new(boundary, zones, config.planner.collision_samples);
    if !checker.is_permitted(base) {
        bail!("Start position {} is outside the allowed area", base);
    }

    let spinner = create_spinner("Planning route...");
    let start = Instant::now();
    let navigator = Navigator::new(config.planner.clone(), base, sensors, checker)
        .context("Invalid sensor list")?;
    let plan = navigator.plan();
    spinner.finish_with_message(format!(
        "Planned {} moves, read {}/{} sensors [{:.1}s]",
        plan.move_count(),
        plan.visited_count(),
        navigator.sensors().len(),
        start.elapsed().as_secs_f32()
    ));

    std::fs::create_dir_all(&output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    })?;
    let flightpath_path = output_dir.join(format!("flightpath-{}.txt", date));
    let readings_path = output_dir.join(format!("readings-{}.geojson", date));

    let spinner = create_spinner("Writing output files...");
    write_flightpath(&flightpath_path, &plan)?;
    write_readings_map(&readings_path, &plan, navigator.sensors())?;
    spinner.finish_with_message("Wrote flight path and readings map");

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!();
    println!("Outcome: {}", describe_outcome(plan.outcome));
    for target in &plan.abandoned {
        println!("  Gave up on {}", target);
    }
    println!("Flight path: {}", flightpath_path.display());
    println!("Readings:    {}", readings_path.display());

    Ok(())
}

fn describe_outcome(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Completed => "all sensors read, back at base",
        Outcome::OutOfBudget => "move ceiling reached before finishing",
        Outcome::DetourUnreachable => "some targets could not be reached",
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
