//! Elimination tournament runner
//!
//! Splits the given number of developers into squads of five and plays
//! rounds until a single squad is left.

use clap::Parser;

use megadev::evolution::Tournament;

#[derive(Parser, Debug)]
#[command(name = "tournament")]
#[command(about = "Run an elimination tournament between random developer squads")]
struct Args {
    /// Total number of developers entering the tournament
    #[arg(long, default_value_t = 1000)]
    devs: usize,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Rows shown in the leaderboard after every round
    #[arg(long, default_value_t = 10)]
    top: usize,
}

const SQUAD_SIZE: usize = 5;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("megadev=info")),
        )
        .init();

    let args = Args::parse();
    let mut tournament = Tournament::new(args.devs, SQUAD_SIZE, args.seed);

    println!("MEGADEV TOURNAMENT");
    println!("==================");
    println!(
        "{} developers in {} squads of {}",
        args.devs,
        tournament.squads().len(),
        SQUAD_SIZE
    );

    while let Some(summary) = tournament.run_round() {
        println!();
        println!(
            "Round {}: {} ({} competing, {} eliminated)",
            summary.round,
            summary.challenge.title(),
            summary.competing,
            summary.eliminated
        );
        println!("{:>4}  {:<28} {:>8}", "Rank", "Squad", "Score");
        for (rank, squad) in tournament.leaderboard(args.top).iter().enumerate() {
            println!("{:>4}  {:<28} {:>8.3}", rank + 1, squad.name, squad.fitness_score);
        }
    }

    println!();
    println!("HALL OF FAME");
    println!("{:>5}  {:<24} {:<28} {:>8}", "Round", "Challenge", "Squad", "Score");
    for entry in tournament.hall_of_fame() {
        println!(
            "{:>5}  {:<24} {:<28} {:>8.3}",
            entry.round,
            entry.challenge.title(),
            entry.name,
            entry.score
        );
    }

    match tournament.squads().first() {
        Some(winner) => println!("\nChampion: {} ({:.3})", winner.name, winner.fitness_score),
        None => println!("\nNo squads entered"),
    }
}
