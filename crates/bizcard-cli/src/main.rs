//! CLI application for business card OCR processing.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, cards, config, parse, scan};

/// Business card OCR - extract contact details from photographed cards
#[derive(Parser)]
#[command(name = "bizcard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Card database (overrides storage.database_path)
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a business card image and store the extracted card
    Scan(scan::ScanArgs),

    /// Extract card fields from a token file (one OCR token per line)
    Parse(parse::ParseArgs),

    /// Scan multiple card images
    Batch(batch::BatchArgs),

    /// Manage stored cards
    Cards(cards::CardsArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let settings = || commands::load_config(cli.config.as_deref(), cli.db.as_deref());

    match cli.command {
        Commands::Scan(args) => scan::run(args, &settings()?).await,
        Commands::Parse(args) => parse::run(args, &settings()?).await,
        Commands::Batch(args) => batch::run(args, &settings()?).await,
        Commands::Cards(args) => cards::run(args, &settings()?).await,
        Commands::Config(args) => config::run(args, cli.config.as_deref()).await,
    }
}
