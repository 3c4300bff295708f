//! Headless Skirmish Runner
//!
//! Runs seeded duels through the combat engine and outputs JSON or text
//! summaries for balance tuning.

use clap::Parser;
use ravenmoor::combat::slayer::CreatureClass;
use ravenmoor::combat::{CombatEngine, CombatEvent, DefaultWorld, SwingOutcome};
use ravenmoor::core::config::CombatConfig;
use ravenmoor::core::rng::CombatRng;
use ravenmoor::entity::combatant::Combatant;
use serde::Serialize;

/// Headless Skirmish Runner - seeded duels for balance tuning
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Run seeded combat duels and output result summaries")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of duels to run
    #[arg(long, default_value_t = 100)]
    duels: u32,

    /// Maximum swings per duel before calling it a draw
    #[arg(long, default_value_t = 400)]
    max_swings: u32,

    /// Formula family: modern or classic
    #[arg(long, default_value = "modern")]
    ruleset: String,

    /// Optional TOML settings file overriding the built-in config
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Enable verbose swing logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize, Default)]
struct Summary {
    seed: u64,
    duels: u32,
    ruleset: String,
    veteran_wins: u32,
    brute_wins: u32,
    draws: u32,
    total_swings: u64,
    total_hits: u64,
    total_damage: u64,
    weapons_destroyed: u32,
}

impl Summary {
    fn tally(&mut self, outcome: &SwingOutcome) {
        self.total_swings += 1;
        if outcome.hit {
            self.total_hits += 1;
        }
        self.total_damage += outcome.damage as u64;
        if outcome.events.contains(&CombatEvent::WeaponDestroyed) {
            self.weapons_destroyed += 1;
        }
    }
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).unwrap_or_else(|err| {
                eprintln!("cannot read {}: {err}", path.display());
                std::process::exit(1);
            });
            CombatConfig::from_toml_str(&text).unwrap_or_else(|err| {
                eprintln!("invalid configuration: {err}");
                std::process::exit(1);
            })
        }
        None => match args.ruleset.as_str() {
            "classic" => CombatConfig::classic(),
            _ => CombatConfig::default(),
        },
    };
    if let Err(err) = config.validate() {
        eprintln!("invalid configuration: {err}");
        std::process::exit(1);
    }

    let engine = CombatEngine::new(config);
    let mut rng = CombatRng::seed_from_u64(args.seed);
    let mut world = DefaultWorld;

    let mut summary = Summary {
        seed: args.seed,
        duels: args.duels,
        ruleset: args.ruleset.clone(),
        ..Default::default()
    };

    for duel in 0..args.duels {
        let mut veteran = Combatant::veteran("veteran");
        let mut brute = Combatant::brute("brute", CreatureClass::Humanoid);

        let mut swings = 0;
        let winner = loop {
            if swings >= args.max_swings {
                break None;
            }

            if let Some(outcome) = engine.swing(&mut veteran, &mut brute, &mut rng, &mut world) {
                swings += 1;
                summary.tally(&outcome);
                if args.verbose {
                    tracing::info!(duel, swings, hit = outcome.hit, damage = outcome.damage);
                }
            }
            if !brute.alive() {
                break Some("veteran");
            }

            if let Some(outcome) = engine.swing(&mut brute, &mut veteran, &mut rng, &mut world) {
                swings += 1;
                summary.tally(&outcome);
            }
            if !veteran.alive() {
                break Some("brute");
            }
        };

        match winner {
            Some("veteran") => summary.veteran_wins += 1,
            Some(_) => summary.brute_wins += 1,
            None => summary.draws += 1,
        }
    }

    match args.format.as_str() {
        "text" => {
            println!(
                "{} duels ({}): veteran {} / brute {} / draws {}",
                summary.duels,
                summary.ruleset,
                summary.veteran_wins,
                summary.brute_wins,
                summary.draws
            );
            println!(
                "{} swings, {} hits, {} total damage, {} weapons destroyed",
                summary.total_swings,
                summary.total_hits,
                summary.total_damage,
                summary.weapons_destroyed
            );
        }
        _ => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("failed to serialize summary: {err}");
                std::process::exit(1);
            }
        },
    }
}
