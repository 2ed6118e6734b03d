//! Care Companion CLI: the main entry point.
//!
//! Commands:
//! - `onboard`:      Write the default config file
//! - `status`:       Show effective configuration
//! - `context`:      Render a signal bundle as prompt context
//! - `intent`:       Classify an utterance into an action intent
//! - `analyze`:      Structure a vision reply
//! - `prompt`:       Print the vision prompt for an analysis type
//! - `speak`:        Format text, balances or events for speech
//! - `chat`:         Talk to the assistant
//! - `vision`:       Analyze a photo
//! - `interactions`: Check a new medication against the current list

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "carecompanion",
    about = "Care Companion: conversational signal engine for memory care",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration file
    Onboard,

    /// Show effective configuration
    Status,

    /// Render a signal bundle as a context block
    Context {
        /// Bundle JSON, inline or a file path
        #[arg(short, long)]
        bundle: String,

        /// Compose the full user content for this utterance
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Classify an utterance into an action intent
    Intent {
        /// What the user said
        utterance: String,
    },

    /// Structure a vision reply into warnings, suggestions and fields
    Analyze {
        /// Analysis type tag (prescription, medication, doctor_note, ...)
        #[arg(short = 't', long = "type", value_name = "TAG")]
        kind: String,

        /// Read the reply from a file instead of stdin
        #[arg(short, long)]
        file: Option<std::path::PathBuf>,
    },

    /// Print the vision prompt for an analysis type
    Prompt {
        /// Analysis type tag
        #[arg(short = 't', long = "type", value_name = "TAG")]
        kind: String,

        /// Current medications JSON, inline or a file path
        #[arg(long)]
        medications: Option<String>,
    },

    /// Format text, balances or events for speech
    Speak {
        #[command(subcommand)]
        what: commands::speak::SpeakCommand,
    },

    /// Chat with the assistant
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,

        /// Signal bundle JSON, inline or a file path
        #[arg(short, long)]
        bundle: Option<String>,

        /// Add spoken pauses to replies
        #[arg(long)]
        speak: bool,
    },

    /// Analyze a photo
    Vision {
        /// Image file (JPEG, PNG, GIF or WebP)
        #[arg(short, long)]
        image: std::path::PathBuf,

        /// Analysis type tag
        #[arg(short = 't', long = "type", value_name = "TAG")]
        kind: String,

        /// Current medications JSON, inline or a file path
        #[arg(long)]
        medications: Option<String>,
    },

    /// Check a new medication against the current list
    Interactions {
        /// The new medication
        #[arg(short, long)]
        medication: String,

        /// Current medications JSON, inline or a file path
        #[arg(short, long)]
        current: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Status => commands::status::run().await?,
        Commands::Context { bundle, message } => {
            commands::inspect::context(&bundle, message.as_deref())?
        }
        Commands::Intent { utterance } => commands::inspect::intent(&utterance)?,
        Commands::Analyze { kind, file } => commands::inspect::analyze(&kind, file.as_deref())?,
        Commands::Prompt { kind, medications } => {
            commands::inspect::prompt(&kind, medications.as_deref())?
        }
        Commands::Speak { what } => commands::speak::run(what)?,
        Commands::Chat {
            message,
            bundle,
            speak,
        } => commands::chat::run(message, bundle, speak).await?,
        Commands::Vision {
            image,
            kind,
            medications,
        } => commands::vision::run(&image, &kind, medications.as_deref()).await?,
        Commands::Interactions {
            medication,
            current,
        } => commands::vision::interactions(&medication, current.as_deref()).await?,
    }

    Ok(())
}
