//! Output formatting shared by the subcommands.

use std::fs;
use std::path::Path;

use chrono::Local;
use console::style;

use bizcard_core::{CardField, CardRecord, ExtractionNotice, ExtractionResult, StoredCard};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// Format one extraction result.
pub fn format_result(
    result: &ExtractionResult,
    format: OutputFormat,
    details: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if details => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&result.record)?),
        OutputFormat::Csv => format_csv(std::iter::once((None, &result.record)), false),
        OutputFormat::Text => {
            let mut output = format_text(&result.record);
            if details {
                output.push('\n');
                output.push_str(&format!("Leftover tokens: {}\n", result.remaining.join(" ")));
                for notice in &result.notices {
                    output.push_str(&format!("Notice: {}\n", describe_notice(notice)));
                }
                output.push_str(&format!("Processing time: {}ms\n", result.processing_time_ms));
            }
            Ok(output)
        }
    }
}

/// Format stored cards.
pub fn format_cards(cards: &[StoredCard], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(cards)?),
        OutputFormat::Csv => format_csv(cards.iter().map(|c| (Some(c), &c.record)), true),
        OutputFormat::Text => {
            let mut output = String::new();
            for card in cards {
                output.push_str(&format!(
                    "Card {} (captured {})\n",
                    card.id,
                    card.captured_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
                ));
                for line in format_text(&card.record).lines() {
                    output.push_str(&format!("  {}\n", line));
                }
                output.push('\n');
            }
            Ok(output)
        }
    }
}

/// Write to a file, or stdout when no file is given.
pub fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            eprintln!("{} Output written to {}", style("✓").green(), path.display());
        }
        None => println!("{}", content.trim_end()),
    }
    Ok(())
}

pub fn describe_notice(notice: &ExtractionNotice) -> String {
    match notice {
        ExtractionNotice::NoInputTokens => "OCR returned no text".to_string(),
        ExtractionNotice::AmbiguousClassification { candidates } => format!(
            "{} name-like tokens, extra ones were added to company",
            candidates
        ),
    }
}

fn format_text(record: &CardRecord) -> String {
    let mut output = String::new();
    for (field, value) in record.fields() {
        output.push_str(&format!("{:<12} {}\n", format!("{}:", field.label()), value));
    }
    output
}

fn format_csv<'a>(
    rows: impl Iterator<Item = (Option<&'a StoredCard>, &'a CardRecord)>,
    with_ids: bool,
) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header: Vec<&str> = Vec::new();
    if with_ids {
        header.extend(["id", "captured_at"]);
    }
    header.extend(CardField::ALL.iter().map(|f| f.key()));
    wtr.write_record(&header)?;

    for (card, record) in rows {
        let mut row: Vec<String> = Vec::new();
        if let Some(card) = card {
            row.push(card.id.to_string());
            row.push(card.captured_at.to_rfc3339());
        }
        row.extend(record.fields().iter().map(|(_, v)| v.to_string()));
        wtr.write_record(&row)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}
