//! Town Life tick driver
//!
//! Plays a character through the authored events with an autopilot choosing
//! every action, then prints a summary.

use clap::Parser;
use life_core::{default_config_toml, LifeConfig, LifeError, Scheduler};
use life_events::{ResourceKind, StatKind};
use life_sim::{build_catalog, SaveStore, Simulation};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Command line arguments for the driver
#[derive(Parser, Debug)]
#[command(name = "town_life")]
#[command(about = "Headless run of the town life event engine")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of days to simulate
    #[arg(long, default_value_t = 360)]
    days: u32,

    /// Name of the character
    #[arg(long, default_value = "Agnes")]
    name: String,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save file for autosaves and the final state
    #[arg(long)]
    save: Option<PathBuf>,

    /// Continue from the save file instead of starting fresh
    #[arg(long, requires = "save")]
    resume: bool,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let args = Args::parse();

    if args.print_default_config {
        print!("{}", default_config_toml());
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => LifeConfig::from_file(path).map_err(LifeError::from)?,
        None => LifeConfig::default(),
    };

    println!("Town Life");
    println!("=========");
    println!("Seed: {}", args.seed);
    println!("Days: {}", args.days);
    println!();

    let catalog = build_catalog().map_err(LifeError::from)?;
    println!("Loaded {} events", catalog.len());

    let scheduler = Scheduler::new(Arc::new(catalog), config.scheduler.clone());
    let mut simulation = Simulation::new(scheduler, config.simulation.clone());

    let store = args.save.clone().map(SaveStore::new);
    let start = match &store {
        Some(store) if args.resume => {
            let state = store.load()?;
            println!(
                "Resumed {} on {} ({} queued events)",
                state.character.name,
                state.date(),
                state.event_queue.len()
            );
            state
        }
        _ => simulation.new_game(&args.name),
    };
    if let Some(store) = store.clone() {
        simulation = simulation.with_save_store(store);
    }

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let end = simulation.run(&start, args.days, &mut rng);

    if let Some(store) = &store {
        match store.save(&end) {
            Ok(()) => println!("Saved to {}", store.path().display()),
            Err(e) => eprintln!("Warning: could not write final save: {}", e),
        }
    }

    print_summary(&simulation, &end);
    Ok(())
}

fn print_summary(simulation: &Simulation, state: &life_events::GameState) {
    let stats = simulation.stats();
    println!();
    println!("Summary");
    println!("-------");
    println!("{} on {}", state.character.name, state.date());
    println!("  Events surfaced: {}", stats.events_surfaced);
    println!("  Actions taken: {}", stats.actions_taken);
    if stats.saves_written + stats.saves_failed > 0 {
        println!("  Autosaves: {} written, {} failed", stats.saves_written, stats.saves_failed);
    }
    println!(
        "  Coin {}, food {}, renown {}",
        state.resource(ResourceKind::Coin),
        state.resource(ResourceKind::Food),
        state.resource(ResourceKind::Renown)
    );
    for kind in StatKind::ALL {
        println!("  {:?}: {}", kind, state.stat(kind));
    }
    if !state.flags.is_empty() {
        let flags: Vec<&str> = state.flags.iter().map(String::as_str).collect();
        println!("  Flags: {}", flags.join(", "));
    }

    println!();
    println!("Recent messages");
    for message in state.messages.iter().rev().take(10).rev() {
        println!("  day {:>4}: {}", message.day, message.text);
    }
}
