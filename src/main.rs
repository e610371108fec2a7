//! # Outfitter CLI
//!
//! Thin harness around the loadout engine: resolves wealth from the standard
//! wealth-by-level table, runs the assembler, and prints the result. The
//! wealth table and all I/O live here, outside the core.

use clap::Parser;
use log::{info, LevelFilter};
use outfitter::{
    assemble, Catalog, LoadoutRequest, NullObserver, OutfitterResult, PercentOverrides,
};

/// Expected character wealth by level, in gold pieces. External to the
/// engine; index by level, entry 0 unused.
const WEALTH_BY_LEVEL: [u32; 21] = [
    0, 0, 1_000, 3_000, 6_000, 10_500, 16_000, 23_500, 33_000, 46_000, 62_000, 82_000, 108_000,
    140_000, 185_000, 240_000, 315_000, 410_000, 530_000, 685_000, 880_000,
];

/// Command line arguments for the Outfitter CLI.
#[derive(Parser, Debug)]
#[command(name = "outfitter")]
#[command(about = "Magic item loadout generation for d20-style characters")]
#[command(version)]
struct Args {
    /// Character level (1-20)
    #[arg(short, long)]
    level: u8,

    /// Character class (e.g. fighter, wizard, paladin)
    #[arg(short, long)]
    class: String,

    /// Gold-piece wealth; defaults to the wealth-by-level table
    #[arg(short, long)]
    wealth: Option<u32>,

    /// Seed for cosmetic variety (stat-item variant choice)
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// JSON file with percentage overrides (shield/ring/secondary splits)
    #[arg(long)]
    overrides: Option<std::path::PathBuf>,

    /// Emit the full result as pretty JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> OutfitterResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Outfitter v{}", outfitter::VERSION);

    let wealth = args.wealth.unwrap_or_else(|| wealth_for_level(args.level));
    let overrides = match &args.overrides {
        Some(path) => {
            let raw = std::fs::read_to_string(path).unwrap_or_else(|error| {
                eprintln!("cannot read {}: {error}", path.display());
                std::process::exit(1);
            });
            serde_json::from_str::<PercentOverrides>(&raw)?
        }
        None => PercentOverrides::default(),
    };

    let request = LoadoutRequest {
        level: args.level,
        class: args.class.clone(),
        wealth,
        overrides,
        cosmetic_seed: args.seed,
    };
    let catalog = Catalog::srd_default();
    let result = assemble(&request, &catalog, &mut NullObserver)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&args.class, wealth, &result);
    }
    Ok(())
}

/// Initializes env_logger at the requested level.
fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

/// Wealth-by-level lookup, clamped to the table bounds.
fn wealth_for_level(level: u8) -> u32 {
    let index = (level as usize).min(WEALTH_BY_LEVEL.len() - 1);
    WEALTH_BY_LEVEL[index]
}

fn print_summary(class: &str, wealth: u32, result: &outfitter::LoadoutResult) {
    println!(
        "Loadout for a level {} {} ({:?}), {} gp:",
        result.level, class, result.archetype, wealth
    );
    for (label, selection) in [
        ("Weapon", &result.weapon),
        ("Shield", &result.shield),
        ("Secondary weapon", &result.secondary_weapon),
        ("Armor", &result.armor),
    ] {
        match selection {
            Some(chosen) => {
                let abilities: Vec<&str> =
                    chosen.abilities.iter().map(|ability| ability.id()).collect();
                println!(
                    "  {label}: +{} {} ({} gp)",
                    chosen.bonus,
                    if abilities.is_empty() {
                        "plain".to_string()
                    } else {
                        abilities.join(", ")
                    },
                    chosen.cost
                );
            }
            None => println!("  {label}: none"),
        }
    }
    for item in &result.wondrous {
        match item.bonus {
            Some(bonus) => println!("  {} +{bonus} ({} gp)", item.name, item.price),
            None => println!("  {} ({} gp)", item.name, item.price),
        }
    }
    for consumable in &result.consumables {
        println!(
            "  {} x{} ({} gp)",
            consumable.id,
            consumable.quantity,
            consumable.cost_per_unit * consumable.quantity
        );
    }
    println!(
        "  Total: {} gp, unspent: {} gp",
        result.total_cost, result.remaining_budget
    );
}
