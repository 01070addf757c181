//! Armory: inspect the equipped-item cards of a character.
//!
//! Reads a loadout snapshot (or uses the built-in demo), resolves every slot
//! and prints the cards as text or JSON.
//!
//! ```bash
//! cargo run -p armory -- --snapshot loadout.json --json
//! RUST_LOG=armory_core=debug cargo run -p armory -- --unequip main_hand
//! ```

mod render;
mod snapshot;

use anyhow::Context;
use armory_core::{dispatch_unequip, CardConfig, SlotKey};
use snapshot::Loadout;
use tracing_subscriber::EnvFilter;

/// Command line options.
#[derive(Debug, Default)]
struct Options {
    snapshot: Option<String>,
    config: Option<String>,
    unequip: Option<String>,
    json: bool,
    help: bool,
}

impl Options {
    fn from_args(args: &[String]) -> Self {
        let mut options = Options::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--snapshot" => {
                    options.snapshot = args.get(i + 1).cloned();
                    i += 1;
                }
                "--config" => {
                    options.config = args.get(i + 1).cloned();
                    i += 1;
                }
                "--unequip" => {
                    options.unequip = args.get(i + 1).cloned();
                    i += 1;
                }
                "--json" => options.json = true,
                "-h" | "--help" => options.help = true,
                _ => {}
            }
            i += 1;
        }

        if options.config.is_none() {
            options.config = std::env::var("ARMORY_CONFIG").ok();
        }
        options
    }
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("armory=info,armory_core=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let options = Options::from_args(&args);
    if options.help {
        print_help();
        return Ok(());
    }

    let config = match &options.config {
        Some(path) => CardConfig::from_file(path)
            .with_context(|| format!("failed to load card config from {}", path))?,
        None => CardConfig::default(),
    };

    let mut loadout = match &options.snapshot {
        Some(path) => Loadout::from_file(path)
            .with_context(|| format!("failed to load snapshot from {}", path))?,
        None => {
            tracing::info!("no --snapshot given, using the demo loadout");
            Loadout::demo()
        }
    };

    if let Some(slot) = options.unequip.as_deref().map(SlotKey::new) {
        let mut removed = None;
        let mut handler = |slot: &SlotKey| removed = loadout.unequip(slot);
        dispatch_unequip(Some(&mut handler), Some(&slot));
        match removed {
            Some(item) => tracing::info!(slot = %slot, item = %item.name, "unequipped"),
            None => tracing::warn!(slot = %slot, "slot was already empty"),
        }
    }

    let cards = loadout.cards(&config);
    if options.json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
    } else {
        for card in &cards {
            println!("{}", render::render_card(card));
        }
    }

    Ok(())
}

fn print_help() {
    println!("Armory - equipped item card inspector");
    println!();
    println!("USAGE:");
    println!("  armory [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help            Show this help message");
    println!("  --snapshot <FILE>     Loadout JSON: {{ \"character\": ..., \"slots\": {{ ... }} }}");
    println!("                        (default: built-in demo loadout)");
    println!("  --config <FILE>       Card config JSON with markers and palette");
    println!("                        (default: $ARMORY_CONFIG, else built-in Russian markers)");
    println!("  --unequip <SLOT>      Empty a slot before printing");
    println!("  --json                Print cards as JSON");
    println!();
    println!("Logging is controlled by RUST_LOG (default: armory=info,armory_core=warn).");
}
