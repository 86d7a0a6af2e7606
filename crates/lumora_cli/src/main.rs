mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lumora_core::config;
use lumora_core::ritual::BreathingSession;
use lumora_core::{MoodIntensity, MoodLevel};
use miette::Result;
use tracing::info;

use crate::commands::Companion;

#[derive(Parser)]
#[command(name = "lumora")]
#[command(about = "Lumora: a private, on-device mood companion")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Data directory for mood history (overrides config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Record how you're feeling
    CheckIn {
        /// great, good, okay, low or struggling
        mood: MoodLevel,

        /// low, medium or high
        #[arg(long, short = 'i', default_value = "medium")]
        intensity: MoodIntensity,

        /// A few words about what's going on
        #[arg(long, short = 'r')]
        reflection: Option<String>,

        /// Detected emotion score, e.g. --emotion sad=0.7 (repeatable)
        #[arg(long = "emotion", short = 'e')]
        emotions: Vec<String>,
    },
    /// Show past check-ins
    History {
        /// Only entries from the last N hours
        #[arg(long)]
        hours: Option<u32>,

        /// Print the privacy-safe JSON projection
        #[arg(long)]
        json: bool,
    },
    /// Delete all stored check-ins
    Clear {
        /// Skip the confirmation notice
        #[arg(long)]
        yes: bool,
    },
    /// Crisis status and resources
    Crisis {
        #[command(subcommand)]
        cmd: CrisisCommands,
    },
    /// Short guided rituals
    Ritual {
        #[command(subcommand)]
        cmd: RitualCommands,
    },
    /// Get a reply without recording a check-in
    Respond {
        mood: MoodLevel,

        /// What's on your mind
        #[arg(long)]
        context: Option<String>,
    },
    /// Talk it out; each line on stdin is one utterance
    Talk,
    /// Configuration management
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum CrisisCommands {
    /// Show whether the crisis notice is active
    Status,
    /// Dismiss the crisis notice
    Dismiss,
    /// List emergency resources
    Resources {
        /// US, UK or GLOBAL
        #[arg(long)]
        region: Option<String>,
    },
}

#[derive(Subcommand)]
enum RitualCommands {
    /// List available rituals
    List,
    /// Box breathing with a live timer
    Breathe {
        /// Length of the exercise in seconds
        #[arg(long, default_value_t = BreathingSession::DEFAULT_SECS)]
        seconds: u32,
    },
    /// 5-4-3-2-1 grounding
    Ground,
    /// Gentle stretch sequence
    Move,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Save current configuration to file
    Save {
        /// Path to save configuration
        #[arg(default_value = "lumora.toml")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .rgb_colors(miette::RgbColors::Preferred)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))?;
    miette::set_panic_hook();
    let cli = Cli::parse();

    use tracing_subscriber::{EnvFilter, fmt};

    let filter = if cli.debug {
        EnvFilter::new("lumora_core=debug,lumora_cli=debug")
    } else {
        // Info for lumora crates, warn for everything else
        EnvFilter::new("lumora_core=info,lumora_cli=info,warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_timer(tracing_subscriber::fmt::time::LocalTime::rfc_3339())
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut config = if let Some(config_path) = &cli.config {
        info!("Loading config from: {:?}", config_path);
        config::load_config(config_path).await?
    } else {
        config::load_config_from_standard_locations().await?
    };

    if let Some(data_dir) = &cli.data_dir {
        info!("Overriding data directory with: {:?}", data_dir);
        config.storage.data_dir = Some(data_dir.clone());
    }

    // Commands that never touch stored history
    match &cli.command {
        Commands::Crisis {
            cmd: CrisisCommands::Resources { region },
        } => return commands::crisis::resources(region.as_deref()).await,
        Commands::Ritual { cmd } => {
            return match cmd {
                RitualCommands::List => commands::ritual::list(&config).await,
                RitualCommands::Breathe { seconds } => commands::ritual::breathe(*seconds).await,
                RitualCommands::Ground => commands::ritual::ground().await,
                RitualCommands::Move => commands::ritual::movement().await,
            };
        }
        Commands::Config { cmd } => {
            return match cmd {
                ConfigCommands::Show => commands::config::show(&config).await,
                ConfigCommands::Save { path } => commands::config::save(&config, path).await,
            };
        }
        _ => {}
    }

    let mut companion = Companion::open(&config).await?;

    match &cli.command {
        Commands::CheckIn {
            mood,
            intensity,
            reflection,
            emotions,
        } => {
            commands::check_in::run(
                &mut companion,
                &config,
                *mood,
                *intensity,
                reflection.as_deref(),
                emotions,
            )
            .await?
        }
        Commands::History { hours, json } => {
            commands::history::list(&companion, *hours, *json).await?
        }
        Commands::Clear { yes } => commands::history::clear(&mut companion, *yes).await?,
        Commands::Crisis { cmd } => match cmd {
            CrisisCommands::Status => commands::crisis::status(&mut companion).await?,
            CrisisCommands::Dismiss => commands::crisis::dismiss(&mut companion).await?,
            CrisisCommands::Resources { .. } => {}
        },
        Commands::Respond { mood, context } => {
            commands::respond::run(&mut companion, *mood, context.as_deref()).await?
        }
        Commands::Talk => commands::talk::run(&mut companion, &config).await?,
        Commands::Ritual { .. } | Commands::Config { .. } => {}
    }

    companion.close().await
}
