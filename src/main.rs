//! Binary entrypoint for the petsim CLI.
//!
//! Commands:
//! - `play [--fast]` - adopt pets and look after them in an interactive menu
//! - `items [--json]` - print the item catalog
//! - `init` - write a starter `petsim.toml`
//!
//! See the library crate docs for module-level details: `petsim::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};
use tokio::io::BufReader;

use petsim::config::Config;
use petsim::pet::all_items;
use petsim::shell::{Console, Shell};

#[derive(Parser)]
#[command(name = "petsim")]
#[command(about = "A text-based virtual pet simulator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "petsim.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive game
    Play {
        /// Skip all activity waits
        #[arg(long)]
        fast: bool,
    },
    /// List every item in the catalog
    Items {
        /// One JSON object per line instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Write a default configuration file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.command {
        Commands::Init => None,
        _ => Some(Config::load_or_default(&cli.config).await?),
    };
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Play { fast } => {
            let mut config = config.unwrap_or_default();
            if fast {
                config.simulation.time_scale = 0.0;
            }
            info!(
                "Starting petsim v{} (time scale {})",
                env!("CARGO_PKG_VERSION"),
                config.simulation.time_scale
            );
            let input = BufReader::new(tokio::io::stdin());
            let mut shell = Shell::new(input, Console::stdout(), config.simulation.suspender());
            shell.run().await?;
        }
        Commands::Items { json } => {
            for item in all_items() {
                if json {
                    println!("{}", serde_json::to_string(item)?);
                } else {
                    let pets: Vec<String> =
                        item.compatible_with.iter().map(|p| p.to_string()).collect();
                    println!(
                        "{:<14} {:<9} +{:>2} {:<6} {:>4.1}s  {}",
                        item.name,
                        format!("{:?}", item.item_type),
                        item.effect_amount,
                        item.affected_stat.to_string(),
                        item.duration.as_secs_f32(),
                        pets.join(", ")
                    );
                }
            }
        }
        Commands::Init => {
            if std::path::Path::new(&cli.config).exists() {
                warn!("{} already exists; leaving it untouched", cli.config);
                println!("Config file {} already exists.", cli.config);
            } else {
                Config::create_default(&cli.config).await?;
                println!("Created default configuration at {}", cli.config);
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let level = match verbosity {
        0 => config
            .as_ref()
            .map(|c| c.logging.level_filter())
            .unwrap_or(log::LevelFilter::Warn),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(level);

    let log_file = config
        .as_ref()
        .and_then(|c| c.logging.file.clone())
        .and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });

    if let Some(f) = log_file {
        let file = std::sync::Arc::new(std::sync::Mutex::new(f));
        // The menu owns the terminal; only echo log lines there when asked for
        // verbose output on an interactive terminal.
        let echo = verbosity > 0 && atty::is(atty::Stream::Stderr);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = file.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if echo {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
