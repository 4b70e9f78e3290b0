//! Parse command - extract card fields from already recognized text.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use bizcard_core::models::config::BizcardConfig;
use bizcard_core::{CardExtractor, CardParser, StaticReader, TextReader};

use super::output::{describe_notice, format_result, write_output, OutputFormat};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Token file, one OCR token per line ("-" reads stdin)
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Show leftover tokens and extraction notices
    #[arg(long)]
    details: bool,
}

pub async fn run(args: ParseArgs, config: &BizcardConfig) -> anyhow::Result<()> {
    let text = if args.input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        let path = PathBuf::from(&args.input);
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        fs::read_to_string(&path)?
    };

    let tokens = StaticReader::from_lines(&text).read_tokens(&[])?;
    info!("Read {} tokens from {}", tokens.len(), args.input);

    let parser = CardParser::from_config(&config.extraction);
    let result = parser.extract_tokens(&tokens);

    let output = format_result(&result, args.format, args.details)?;
    write_output(args.output.as_deref(), &output)?;

    for notice in &result.notices {
        eprintln!("{} {}", style("ℹ").blue(), describe_notice(notice));
    }

    Ok(())
}
