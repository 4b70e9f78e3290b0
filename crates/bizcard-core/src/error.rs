//! Error types for the bizcard-core library.
//!
//! Field extraction never fails: a missing field is an empty string, not an
//! error. Only the collaborators around the pipeline (OCR, storage, config
//! files) produce the errors below.

use thiserror::Error;

use crate::models::card::CardId;

/// Main error type for the bizcard library.
#[derive(Error, Debug)]
pub enum BizcardError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Card storage error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Image bytes could not be decoded.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Errors related to the card store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying SQLite failure.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// No card with the given identifier.
    #[error("card {0} not found")]
    NotFound(CardId),

    /// A stored timestamp could not be parsed.
    #[error("invalid timestamp: {0}")]
    Timestamp(String),
}

/// Result type for the bizcard library.
pub type Result<T> = std::result::Result<T, BizcardError>;
