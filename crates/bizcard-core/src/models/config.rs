//! Configuration structures for the card pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for the bizcard pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BizcardConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Card storage configuration.
    pub storage: StorageConfig,

    /// Model configuration.
    pub models: ModelConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Drop recognized boxes below this confidence (0.0 keeps everything).
    pub min_confidence: f32,

    /// Keep `[UNK]` markers emitted for characters outside the dictionary.
    pub keep_unk: bool,

    /// Maximum image dimension (longer side) for processing.
    pub max_image_size: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.0,
            keep_unk: false,
            max_image_size: 2048,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Apply the OCR artifact replacements before pattern matching.
    pub normalize: bool,

    /// Log a warning when more than three name-shaped tokens fold into company.
    pub warn_on_overflow: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            normalize: true,
            warn_on_overflow: false,
        }
    }
}

/// Card storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file.
    pub database_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("bizcard.db"),
        }
    }
}

/// Model file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
        }
    }
}

impl BizcardConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Get full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.models.model_dir.join(model_name)
    }

    /// Get the card database path.
    pub fn database_path(&self) -> &Path {
        &self.storage.database_path
    }
}
