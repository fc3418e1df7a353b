//! Wheelhouse - configuration tooling for the web server admin core
//!
//! This is the main entry point for the Wheelhouse CLI.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wheelhouse_config::JsonAdapter;
use wheelhouse_core::config::ConfigLoader;

#[derive(Parser)]
#[command(name = "wheelhouse")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file
    Check {
        /// Path to the configuration file (.json or .toml)
        #[arg(default_value = "wheelhouse.json")]
        config: String,
    },

    /// Print a configuration file in canonical form
    Show {
        /// Path to the configuration file (.json or .toml)
        config: String,
    },

    /// Print every port the configuration listens on
    Ports {
        /// Path to the configuration file (.json or .toml)
        config: String,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Check { config: config_path } => {
            let document = load_or_exit(&config_path);
            match document.validate() {
                Ok(()) => {
                    println!(
                        "{}: OK ({} virtual hosts, {} ports)",
                        config_path,
                        document.virtual_hosts.len(),
                        document.all_listen_ports().len()
                    );
                }
                Err(e) => {
                    tracing::error!("❌ {}: {}", config_path, e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Show { config: config_path } => {
            let document = load_or_exit(&config_path);
            match JsonAdapter::serialize(&document) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    tracing::error!("❌ Failed to serialize config: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Ports { config: config_path } => {
            let document = load_or_exit(&config_path);
            for port in document.all_listen_ports() {
                println!("{}", port);
            }
        }

        Commands::Version => {
            println!("wheelhouse {}", wheelhouse_core::VERSION);
        }
    }

    Ok(())
}

fn load_or_exit(path: &str) -> wheelhouse_core::config::ConfigDocument {
    match ConfigLoader::load(path) {
        Ok(document) => document,
        Err(e) => {
            tracing::error!("❌ Failed to load config: {}", e);
            std::process::exit(1);
        }
    }
}
