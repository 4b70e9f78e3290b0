//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use bizcard_core::models::config::BizcardConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "storage.database_path")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value (JSON, or a plain string)
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

/// Run a config subcommand against `config_path`, or the default file.
pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path.map(PathBuf::from).unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init(init_args) => init_config(init_args, &path),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bizcard")
        .join("config.json")
}

fn load_or_default(path: &Path) -> anyhow::Result<BizcardConfig> {
    if path.exists() {
        Ok(BizcardConfig::from_file(path)?)
    } else {
        Ok(BizcardConfig::default())
    }
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        eprintln!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }
    let config = load_or_default(path)?;

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs, default_path: &Path) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(|| default_path.to_path_buf());

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    BizcardConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(load_or_default(path)?)?;
    let value = lookup(&json, key)
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

fn set_config(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let mut json = serde_json::to_value(load_or_default(path)?)?;

    let parsed = parse_value(value);
    assign(&mut json, key, parsed.clone())?;

    // Round-trip through the typed config so bad values are rejected.
    let config: BizcardConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed)?
    );

    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'bizcard config init' to create a configuration file.");
    }

    Ok(())
}

/// Parse a command line value as JSON, falling back to a plain string.
fn parse_value(value: &str) -> Value {
    serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()))
}

/// Follow a dotted key through nested objects.
fn lookup<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(json, |current, part| current.get(part))
}

/// Replace the value at an existing dotted key.
fn assign(json: &mut Value, key: &str, value: Value) -> anyhow::Result<()> {
    let slot = key
        .split('.')
        .try_fold(json, |current, part| current.get_mut(part))
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    if slot.is_object() {
        anyhow::bail!("Cannot replace section {}, set one of its keys instead", key);
    }
    *slot = value;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_nested_key() {
        let json = serde_json::to_value(BizcardConfig::default()).unwrap();
        assert_eq!(
            lookup(&json, "storage.database_path"),
            Some(&Value::String("bizcard.db".to_string()))
        );
        assert_eq!(lookup(&json, "extraction.normalize"), Some(&Value::Bool(true)));
        assert!(lookup(&json, "storage.missing").is_none());
    }

    #[test]
    fn test_assign_typed_values() {
        let mut json = serde_json::to_value(BizcardConfig::default()).unwrap();
        assign(&mut json, "extraction.normalize", parse_value("false")).unwrap();
        assign(&mut json, "ocr.min_confidence", parse_value("0.5")).unwrap();
        assign(&mut json, "storage.database_path", parse_value("cards.db")).unwrap();

        let config: BizcardConfig = serde_json::from_value(json).unwrap();
        assert!(!config.extraction.normalize);
        assert_eq!(config.ocr.min_confidence, 0.5);
        assert_eq!(config.database_path(), Path::new("cards.db"));
    }

    #[test]
    fn test_assign_rejects_unknown_key_and_sections() {
        let mut json = serde_json::to_value(BizcardConfig::default()).unwrap();
        assert!(assign(&mut json, "ocr.threshold", Value::Bool(true)).is_err());
        assert!(assign(&mut json, "ocr", Value::Bool(true)).is_err());
    }

    #[test]
    fn test_set_and_get_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        set_config(&path, "ocr.max_image_size", "1024").unwrap();
        let config = BizcardConfig::from_file(&path).unwrap();
        assert_eq!(config.ocr.max_image_size, 1024);

        assert!(set_config(&path, "ocr.max_image_size", "large").is_err());
    }
}
