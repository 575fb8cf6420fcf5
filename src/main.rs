//! tm-fuzzymatch: translation-memory fuzzy match augmentation
//!
//! Appends the target side of the closest translation memory unit to a
//! share of corpus segments, for training translation models that learn to
//! copy from TM suggestions.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tm_fuzzymatch::{
    cli,
    config::{AppConfig, ConfigOverrides},
    matching::ScoringMethod,
    pipeline::exit_codes,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tm-fuzzymatch")]
#[command(author = "Binarly.io")]
#[command(version)]
#[command(about = "Augment a corpus with translation memory fuzzy matches", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Error occurred

EXAMPLES:
    # Augment 10% of a corpus from a tab-separated TM
    tm-fuzzymatch augment --tm tm.tsv corpus.txt -O corpus.fuzzy.txt

    # Parallel corpus, stricter threshold, stats as JSON
    tm-fuzzymatch augment --tm tm.tsv --with-targets --threshold 85 \\
        --stats-json stats.json train.tsv

    # See which TM unit a sentence would be matched with
    tm-fuzzymatch query --tm tm.tsv \"the cat sat on the mat\"")]
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

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Fuzzy matching options shared by `augment` and `query`
#[derive(Parser)]
struct FuzzyArgs {
    /// Translation memory file, one `source<DELIM>target` unit per line
    #[arg(long = "tm", value_name = "PATH", env = "TM_FUZZYMATCH_TM")]
    tm_path: Option<PathBuf>,

    /// Maximum share of each batch to augment (0.0-1.0)
    #[arg(long)]
    ratio: Option<f64>,

    /// Minimum similarity percentage for a TM match (0-100)
    #[arg(long)]
    threshold: Option<f64>,

    /// Separator between source and target in the TM file
    #[arg(long)]
    delimiter: Option<String>,

    /// Token inserted between a segment and its fuzzy target
    #[arg(long)]
    token: Option<String>,

    /// Minimum source length in characters (TM units and corpus examples)
    #[arg(long)]
    min_length: Option<usize>,

    /// Maximum source length in characters (TM units and corpus examples)
    #[arg(long)]
    max_length: Option<usize>,

    /// Segments scored per chunk
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Scoring threads (-1 = all cores, 1 = sequential)
    #[arg(long, allow_hyphen_values = true)]
    workers: Option<i32>,

    /// Similarity metric
    #[arg(long, value_enum)]
    scoring: Option<ScoringMethod>,
}

impl FuzzyArgs {
    fn overrides(self) -> ConfigOverrides {
        ConfigOverrides {
            tm_path: self.tm_path,
            fuzzy_corpus_ratio: self.ratio,
            fuzzy_threshold: self.threshold,
            tm_delimiter: self.delimiter,
            fuzzy_token: self.token,
            min_length: self.min_length,
            max_length: self.max_length,
            chunk_size: self.chunk_size,
            workers: self.workers,
            scoring: self.scoring,
            ..ConfigOverrides::default()
        }
    }
}

/// Arguments for the `augment` subcommand
#[derive(Parser)]
struct AugmentArgs {
    /// Corpus to augment (stdin if not specified)
    input: Option<PathBuf>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Corpus lines are `source<TAB>target` pairs
    #[arg(long)]
    with_targets: bool,

    /// Examples per batch; the ratio quota applies per batch
    #[arg(long)]
    batch_size: Option<usize>,

    /// Write augmentation statistics as JSON to this path
    #[arg(long, value_name = "PATH")]
    stats_json: Option<PathBuf>,

    #[command(flatten)]
    fuzzy: FuzzyArgs,
}

/// Arguments for the `query` subcommand
#[derive(Parser)]
struct QueryArgs {
    /// Segment to match against the translation memory
    segment: String,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    fuzzy: FuzzyArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Augment a corpus with fuzzy matches from a translation memory
    Augment(AugmentArgs),

    /// Show the best TM match for a single segment
    #[command(alias = "match")]
    Query(QueryArgs),

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
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .tm-fuzzymatch.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
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
                .with_writer(io::stderr),
        )
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_codes::ERROR);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Augment(args) => {
            let mut overrides = args.fuzzy.overrides();
            overrides.batch_size = args.batch_size;
            overrides.with_targets = args.with_targets;

            let config = load_config(cli.config, &overrides, cli.quiet)?;
            cli::run_augment(
                config,
                args.input,
                args.output_file,
                args.stats_json,
                cli.quiet,
            )
        }

        Commands::Query(args) => {
            let config = load_config(cli.config, &args.fuzzy.overrides(), cli.quiet)?;
            cli::run_query(config.fuzzymatch, args.segment, args.json, cli.quiet)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "tm-fuzzymatch", &mut io::stdout());
            Ok(())
        }

        Commands::ConfigSchema { output } => {
            let schema = tm_fuzzymatch::config::generate_json_schema()
                .context("failed to generate schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) =
                    tm_fuzzymatch::config::load_or_default(cli.config.as_deref())
                        .context("failed to load config")?;
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 2] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    dirs::config_dir().map(|p| p.join("tm-fuzzymatch").display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in &[
                    ".tm-fuzzymatch.yaml",
                    ".tm-fuzzymatch.yml",
                    "tm-fuzzymatch.yaml",
                    "tm-fuzzymatch.yml",
                ] {
                    eprintln!("  {name}");
                }
                eprintln!();
                match tm_fuzzymatch::config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".tm-fuzzymatch.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = tm_fuzzymatch::config::generate_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },
    }
}

/// Merge the config file (if any) with command-line overrides.
fn load_config(
    path: Option<PathBuf>,
    overrides: &ConfigOverrides,
    quiet: bool,
) -> Result<AppConfig> {
    let (config, loaded_from) = AppConfig::from_file_with_overrides(path.as_deref(), overrides)
        .context("failed to load config")?;
    if let Some(path) = loaded_from {
        if !quiet {
            tracing::info!("Using config file {}", path.display());
        }
    }
    Ok(config)
}
