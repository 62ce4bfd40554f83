//! MEADOW - CLI Entry Point
//!
//! Plant-pollinator ecosystem simulator.

use clap::{Parser, Subcommand};
use meadow::pollinator::Pollinator;
use meadow::report::{format_report, functional_report};
use meadow::scenarios::run_scenarios;
use meadow::{benchmark, Config, Simulation};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "meadow")]
#[command(version)]
#[command(about = "Multi-year plant-pollinator ecosystem simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "meadow.yaml")]
        config: PathBuf,

        /// Override the number of years
        #[arg(short, long)]
        years: Option<u32>,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Write the stats history as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run independent scenarios in parallel
    Scenarios {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "meadow.yaml")]
        config: PathBuf,

        /// Override the number of scenarios
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Print grouped summaries of the configured species
    Report {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "meadow.yaml")]
        config: PathBuf,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of years
        #[arg(short, long, default_value = "20")]
        years: u32,

        /// Number of species
        #[arg(short, long, default_value = "30")]
        species: usize,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "meadow.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            years,
            seed,
            output,
            quiet,
        } => run_simulation(config, years, seed, output, quiet),

        Commands::Scenarios { config, count } => run_parallel(config, count),

        Commands::Report { config } => print_report(config),

        Commands::Benchmark { years, species } => run_benchmark(years, species),

        Commands::Init { output } => generate_config(output),
    }
}

fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    if path.exists() {
        log::info!("Loading config from: {:?}", path);
        Ok(Config::from_file(path)?)
    } else {
        log::info!("Using default configuration");
        Ok(Config::default())
    }
}

fn run_simulation(
    config_path: PathBuf,
    years: Option<u32>,
    seed: Option<u64>,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(&config_path)?;
    if let Some(y) = years {
        config.simulation.years = y;
    }
    if let Some(s) = seed {
        config.simulation.seed = s;
    }

    let mut sim = Simulation::from_config(&config)?;

    println!("Starting simulation");
    println!("  Species: {}", sim.ecosystem().len());
    println!("  Initial bees: {:.1}", sim.bees().population());
    println!("  Years: {}", config.simulation.years);
    println!("  Seed: {}", config.simulation.seed);
    println!();

    let start = Instant::now();
    while !sim.is_finished() {
        sim.run_year();
        if !quiet {
            println!("{}", sim.stats.summary());
        }
    }
    let elapsed = start.elapsed();

    println!();
    println!("=== Simulation Complete ===");
    println!("Time: {:.3}s", elapsed.as_secs_f64());
    println!("Days: {}", sim.total_days());
    println!("Final bees: {:.2}", sim.bees().population());
    for species in sim.ecosystem().species() {
        println!("  {}", species);
    }

    if let Some(path) = output {
        sim.history.save(&path.to_string_lossy())?;
        println!("Stats history: {:?}", path);
    }

    Ok(())
}

fn run_parallel(config_path: PathBuf, count: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(&config_path)?;
    if let Some(n) = count {
        config.scenarios.count = n;
    }

    println!("PARALLEL RUNNER - {:?}", config_path);
    for result in run_scenarios(&config)? {
        println!("{}", result);
    }
    Ok(())
}

fn print_report(config_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&config_path)?;
    let groups = functional_report(&config.species);
    print!("{}", format_report(&config_path.to_string_lossy(), &groups));
    Ok(())
}

fn run_benchmark(years: u32, species: usize) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== MEADOW Benchmark ===");
    println!("Years: {}", years);
    println!("Species: {}", species);
    println!();

    let result = benchmark(years, species)?;
    println!("{}", result);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
