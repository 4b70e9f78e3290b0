//! Cards command - list, show, edit and delete stored cards.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use bizcard_core::models::config::BizcardConfig;
use bizcard_core::{CardField, CardId, CardStore, SqliteCardStore};

use super::output::{format_cards, write_output, OutputFormat};

/// Arguments for the cards command.
#[derive(Args)]
pub struct CardsArgs {
    #[command(subcommand)]
    command: CardsCommand,
}

#[derive(Subcommand)]
enum CardsCommand {
    /// List stored cards
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show one card
    Show {
        id: CardId,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Edit fields of a card (e.g. --field city=Chennai --field postal_code=600113)
    Update {
        id: CardId,

        /// Field assignment, repeatable
        #[arg(long = "field", value_parser = parse_assignment, required = true)]
        fields: Vec<(CardField, String)>,
    },

    /// Delete a card
    Delete { id: CardId },

    /// Write the original card image to a file
    Image { id: CardId, output: PathBuf },
}

pub async fn run(args: CardsArgs, config: &BizcardConfig) -> anyhow::Result<()> {
    let store = SqliteCardStore::open(config.database_path())?;

    match args.command {
        CardsCommand::List { format, output } => {
            let cards = store.list()?;
            if cards.is_empty() && output.is_none() {
                eprintln!("{} No cards stored in {}", style("ℹ").blue(), store.path().display());
                return Ok(());
            }
            write_output(output.as_deref(), &format_cards(&cards, format)?)
        }
        CardsCommand::Show { id, format } => {
            let card = store
                .get(id)?
                .ok_or_else(|| anyhow::anyhow!("Card {} not found", id))?;
            write_output(None, &format_cards(std::slice::from_ref(&card), format)?)
        }
        CardsCommand::Update { id, fields } => {
            let mut card = store
                .get(id)?
                .ok_or_else(|| anyhow::anyhow!("Card {} not found", id))?;
            for (field, value) in &fields {
                card.record.set(*field, value.as_str());
            }
            store.update(id, &card.record)?;
            println!("{} Updated card {} ({} fields)", style("✓").green(), id, fields.len());
            Ok(())
        }
        CardsCommand::Delete { id } => {
            store.delete(id)?;
            println!("{} Deleted card {}", style("✓").green(), id);
            Ok(())
        }
        CardsCommand::Image { id, output } => {
            let card = store
                .get(id)?
                .ok_or_else(|| anyhow::anyhow!("Card {} not found", id))?;
            fs::write(&output, &card.image)?;
            println!(
                "{} Wrote {} bytes to {}",
                style("✓").green(),
                card.image.len(),
                output.display()
            );
            Ok(())
        }
    }
}

/// Parse `field=value`.
fn parse_assignment(s: &str) -> Result<(CardField, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", s))?;
    Ok((key.parse()?, value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("city=Chennai"),
            Ok((CardField::City, "Chennai".to_string()))
        );
        assert_eq!(
            parse_assignment("pincode=600 113"),
            Ok((CardField::PostalCode, "600 113".to_string()))
        );
        assert_eq!(parse_assignment("state="), Ok((CardField::State, String::new())));
        assert!(parse_assignment("city").is_err());
        assert!(parse_assignment("fax=123").is_err());
    }
}
