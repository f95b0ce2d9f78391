use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use spindle_etl::{Config, InputFormat};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "spindle", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a classification rules file (default: ~/.config/spindle/rules.toml)
    #[arg(long, global = true)]
    rules: Option<PathBuf>,
}

/// Shape of the records in the input batch.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum FormatArg {
    /// Flat release records
    Records,
    /// Release payloads from the catalog service
    Catalog,
}

impl From<FormatArg> for InputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Records => Self::Records,
            FormatArg::Catalog => Self::Catalog,
        }
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Normalize a batch of release records
    ///
    /// Reads a JSON array (or JSON lines) of release records, maps every
    /// record onto the canonical schema and writes one JSON object per line:
    ///
    /// - regions: the country string split into region tokens
    /// - color_category: one of 13 canonical colors, or Multicolor
    /// - size_category: 12", 7" or Other Size
    /// - edition_type: Record Store Day, Limited Edition, Special/Deluxe
    ///   Edition, Reissue/Repress or Standard
    /// - artists / artist_display: names without catalog suffixes
    ///
    /// Malformed records are skipped and reported with their id, unless
    /// --halt-on-error is given.
    Normalize {
        /// Path to the batch file
        input: PathBuf,

        /// Output path (default: <input>.normalized.jsonl)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Shape of the input records
        #[arg(long, value_enum, default_value = "records")]
        format: FormatArg,

        /// Stop at the first malformed record
        #[arg(long)]
        halt_on_error: bool,
    },
    /// Normalize a batch through the tracked pipeline
    ///
    /// Same as `normalize`, but runs as a workflow whose progress is kept in
    /// the pipeline state store, so a batch that already completed is not
    /// processed again.
    Process {
        /// Path to the batch file
        input: PathBuf,

        /// Output path (default: <input>.normalized.jsonl)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Shape of the input records
        #[arg(long, value_enum, default_value = "records")]
        format: FormatArg,

        /// Stop at the first malformed record
        #[arg(long)]
        halt_on_error: bool,
    },
    /// Run a single classifier on ad-hoc input
    Classify {
        #[command(subcommand)]
        command: ClassifyCommand,
    },
    /// Manage classification rules
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ClassifyCommand {
    /// Classify a pressing description, e.g. "Green and Blue Swirl"
    Color { description: String },
    /// Split a country string, e.g. "US, Canada"
    Region { country: String },
    /// Classify format descriptors by size, e.g. LP 7"
    Size { descriptors: Vec<String> },
    /// Classify format descriptors by edition type
    Edition { descriptors: Vec<String> },
    /// Clean and format artist names
    Artist { names: Vec<String> },
}

#[derive(Debug, clap::Subcommand)]
enum RulesCommand {
    /// Write the default rules file
    Init,
    /// Show the rules file path
    Path,
    /// Print the rules in effect
    Show,
    /// Check the rules file for errors
    Validate,
    /// Open the rules file in $EDITOR
    Edit,
}

#[derive(Debug, clap::Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Show the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
    /// Print one config value, or the whole file
    Get { key: Option<String> },
    /// Set a config value in the config file
    Set { key: String, value: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Normalize {
            input,
            output,
            format,
            halt_on_error,
        } => {
            let config = Config::load()?.with_overrides(cli.rules, halt_on_error);
            commands::run_normalize(input, output, format.into(), &config)?;
        }
        Commands::Process {
            input,
            output,
            format,
            halt_on_error,
        } => {
            let config = Config::load()?.with_overrides(cli.rules, halt_on_error);
            commands::run_process(input, output, format.into(), &config).await?;
        }
        Commands::Classify { command } => {
            let config = Config::load()?.with_overrides(cli.rules, false);
            let classifiers = commands::classify::load_classifiers(&config)?;
            match command {
                ClassifyCommand::Color { description } => {
                    commands::classify::color(&classifiers, &description);
                }
                ClassifyCommand::Region { country } => {
                    commands::classify::region(&classifiers, &country);
                }
                ClassifyCommand::Size { descriptors } => {
                    commands::classify::size(&classifiers, &descriptors);
                }
                ClassifyCommand::Edition { descriptors } => {
                    commands::classify::edition(&classifiers, &descriptors);
                }
                ClassifyCommand::Artist { names } => commands::classify::artist(&names),
            }
        }
        Commands::Rules { command } => {
            let config = Config::load()?.with_overrides(cli.rules, false);
            match command {
                RulesCommand::Init => commands::rules::init_rules()?,
                RulesCommand::Path => commands::rules::show_path(&config),
                RulesCommand::Show => commands::rules::show_rules(&config)?,
                RulesCommand::Validate => commands::rules::validate_rules(&config)?,
                RulesCommand::Edit => commands::rules::edit_rules(&config)?,
            }
        }
        Commands::Config { command } => match command {
            ConfigCommand::Show => commands::config::show_config()?,
            ConfigCommand::Path => commands::config::show_path(),
            ConfigCommand::Example => commands::config::show_example(),
            ConfigCommand::Init => commands::config::init_config()?,
            ConfigCommand::Get { key } => commands::config::get_config(key)?,
            ConfigCommand::Set { key, value } => commands::config::set_config(&key, &value)?,
        },
    }

    Ok(())
}
