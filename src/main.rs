//! scoop: ice-cream recipe rating predictor
//!
//! Pick ingredients per group in a terminal form (or on the command line) and
//! get a predicted rating from a trained regression model.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use scoop::{
    cli::{self, exit_codes, OutputFormat, PredictConfig},
    config::{self, AppConfig, ConfigOverrides, Validatable},
    tui,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scoop")]
#[command(version)]
#[command(about = "Predict how well an ice-cream recipe will be rated", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Selection cannot be submitted (nothing selected / required group empty)
    3  Error occurred

EXAMPLES:
    # Interactive form
    scoop form

    # Scripted prediction
    scoop predict --select flavors=vanilla --select sweeteners=honey

    # JSON output with a brand
    scoop predict --select vanilla --brand brand_acme -o json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ingredient catalog CSV (overrides `catalog.path`)
    #[arg(long, global = true, env = "SCOOP_CATALOG")]
    catalog: Option<PathBuf>,

    /// Directory holding the model artifacts (overrides `artifacts.model_dir`)
    #[arg(long, global = true, env = "SCOOP_MODEL_DIR")]
    model_dir: Option<PathBuf>,

    /// Color theme: dark, light or high-contrast (overrides `tui.theme`)
    #[arg(long, global = true)]
    theme: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `predict` subcommand
#[derive(Parser)]
struct PredictArgs {
    /// Ingredient to select, as GROUP=INGREDIENT or a bare INGREDIENT.
    /// Can be specified multiple times; applied in order.
    #[arg(short, long = "select", value_name = "GROUP=INGREDIENT")]
    select: Vec<String>,

    /// Brand identifier (brand-aware models only)
    #[arg(short, long)]
    brand: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    output: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive selection form
    Form,

    /// Predict a rating for a selection given on the command line
    Predict(PredictArgs),

    /// List ingredient groups, caps and ingredients
    Catalog {
        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,

        /// Output file path (stdout if not specified)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (defaults + file + flags)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .scoop.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(tui::gated(io::stderr)),
        )
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

/// Merge file config with flags and reject invalid results.
fn effective_config(cli: &Cli) -> Result<(AppConfig, Option<PathBuf>)> {
    let overrides = ConfigOverrides {
        catalog_path: cli.catalog.clone(),
        model_dir: cli.model_dir.clone(),
        theme: cli.theme.clone(),
    };
    let (config, loaded_from) =
        AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides)
            .context("cannot load configuration")?;

    let errors = config.validate();
    if !errors.is_empty() {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        anyhow::bail!("invalid configuration: {joined}");
    }
    Ok((config, loaded_from))
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Form => {
            let (config, _) = effective_config(&cli)?;
            cli::run_form(&config, cli.theme.as_deref())
        }

        Commands::Predict(ref args) => {
            let (config, _) = effective_config(&cli)?;
            let predict = PredictConfig {
                selections: args.select.clone(),
                brand: args.brand.clone(),
                output: args.output,
                output_file: args.output_file.clone(),
            };
            cli::run_predict(&config, predict)
        }

        Commands::Catalog {
            output,
            ref output_file,
        } => {
            let (config, _) = effective_config(&cli)?;
            cli::run_catalog(&config, output, output_file.clone())
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "scoop", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { ref output } => {
            let schema = config::generate_json_schema().context("failed to build schema")?;
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { ref action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = effective_config(&cli)?;
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Path => {
                eprintln!("Config file search paths (in order):");
                for dir in config::config_search_dirs() {
                    eprintln!("  {}", dir.display());
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in config::CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".scoop.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                std::fs::write(&target, config::generate_example_config())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(exit_codes::SUCCESS)
            }
        },
    }
}
