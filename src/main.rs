//! Megadev - Entry Point
//!
//! `evolve` breeds squads for a number of generations and prints one JSON
//! report per generation. `simulate` packs a random population into an
//! organization and advances it through simulated time.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use megadev::control::{PopulationControl, Response};
use megadev::core::error::Result;
use megadev::core::MegadevConfig;
use megadev::entity::{HumanNeeds, Squad};
use megadev::organization::OrganizationBuilder;
use megadev::persistence::save_state;
use megadev::simulation::SimulationEngine;

#[derive(Parser, Debug)]
#[command(name = "megadev")]
#[command(about = "Evolve developer squads and simulate their organization")]
struct Args {
    /// TOML file with [evolution], [needs] and [simulation] sections
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the evolutionary loop
    Evolve {
        #[arg(long, default_value_t = 10)]
        population: usize,

        #[arg(long, default_value_t = 5)]
        squad_size: usize,

        #[arg(long, default_value_t = 10)]
        generations: u32,
    },
    /// Advance an organization through simulated time
    Simulate {
        #[arg(long, default_value_t = 20)]
        squads: usize,

        #[arg(long, default_value_t = 5)]
        squad_size: usize,

        #[arg(long, default_value_t = 32)]
        ticks: u64,

        /// Write a JSON snapshot of the final state into this directory
        #[arg(long)]
        save_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("megadev=info")),
        )
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => MegadevConfig::load(path)?,
        None => MegadevConfig::default(),
    };
    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }

    match args.command {
        Command::Evolve {
            population,
            squad_size,
            generations,
        } => run_evolve(&config, population, squad_size, generations),
        Command::Simulate {
            squads,
            squad_size,
            ticks,
            save_dir,
        } => run_simulate(config, squads, squad_size, ticks, save_dir),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn run_evolve(
    config: &MegadevConfig,
    population: usize,
    squad_size: usize,
    generations: u32,
) -> Result<()> {
    let mut control = PopulationControl::new(config.evolution.clone(), config.simulation.seed)?;

    let initialized = control.initialize_population(population, squad_size);
    print_json(&Response::from_result(initialized))?;
    if !control.is_initialized() {
        return Ok(());
    }

    for _ in 0..generations {
        print_json(&Response::from_result(control.evolve_generation()))?;
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&Response::from_result(control.best_squad()))?
    );
    Ok(())
}

fn average_needs(needs: impl Iterator<Item = HumanNeeds>) -> Option<HumanNeeds> {
    let (count, sum) = needs.fold((0usize, [0.0f64; 5]), |(n, acc), item| {
        (
            n + 1,
            [
                acc[0] + item.hunger,
                acc[1] + item.thirst,
                acc[2] + item.bathroom,
                acc[3] + item.energy,
                acc[4] + item.stress,
            ],
        )
    });
    (count > 0).then(|| {
        let n = count as f64;
        HumanNeeds {
            hunger: sum[0] / n,
            thirst: sum[1] / n,
            bathroom: sum[2] / n,
            energy: sum[3] / n,
            stress: sum[4] / n,
        }
    })
}

fn run_simulate(
    config: MegadevConfig,
    squads: usize,
    squad_size: usize,
    ticks: u64,
    save_dir: Option<PathBuf>,
) -> Result<()> {
    let mut rng = match config.simulation.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let population: Vec<Squad> = (0..squads)
        .map(|i| Squad::create_random(format!("Squad-{}", i), squad_size, &mut rng))
        .collect();

    let mut engine = SimulationEngine::new(config.simulation, config.needs)?;
    for department in OrganizationBuilder::default().build(population) {
        engine.add_department(department);
    }

    let advanced = engine.run(ticks);
    println!(
        "Simulated {} ticks over {} agents, clock now {}",
        advanced,
        engine.agent_count(),
        engine.clock().current_time
    );

    let needs = engine
        .departments()
        .iter()
        .flat_map(|d| &d.divisions)
        .flat_map(|d| &d.squads)
        .flat_map(|s| &s.agents)
        .map(|a| a.needs);
    if let Some(avg) = average_needs(needs) {
        println!(
            "Average needs: hunger {:.1}, thirst {:.1}, bathroom {:.1}, energy {:.1}, stress {:.1}",
            avg.hunger, avg.thirst, avg.bathroom, avg.energy, avg.stress
        );
        let (need, severity) = avg.most_pressing();
        println!("Most pressing: {:?} ({:.1})", need, severity);
    }

    if let Some(dir) = save_dir {
        let path = save_state(dir, engine.departments(), engine.clock().current_time)?;
        println!("State written to {}", path.display());
    }
    Ok(())
}
