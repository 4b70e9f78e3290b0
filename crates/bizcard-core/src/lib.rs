//! Core library for business card OCR processing.
//!
//! This crate provides:
//! - Field extraction from OCR tokens (name, designation, company, phone,
//!   email, website, address, city, state, postal code)
//! - An OCR collaborator trait with a pure Rust ONNX engine
//! - Card storage (SQLite and in-memory)

pub mod error;
pub mod extract;
pub mod models;
pub mod ocr;
pub mod scanner;
pub mod storage;

pub use error::{BizcardError, OcrError, Result, StorageError};
pub use extract::{CardExtractor, CardParser, ExtractionNotice, ExtractionResult, ExtractionStage};
pub use models::card::{CardField, CardId, CardRecord, StoredCard};
pub use models::config::BizcardConfig;
pub use ocr::{OcrResult, StaticReader, TextBox, TextReader};
#[cfg(feature = "native")]
pub use ocr::{create_engine_from_dir, PureOcrEngine};
pub use scanner::{CardScanner, ScannedCard};
pub use storage::{CardStore, MemoryCardStore, SqliteCardStore};
