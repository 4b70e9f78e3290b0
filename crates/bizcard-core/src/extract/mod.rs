//! Business card field extraction.

mod buffer;
pub mod normalizer;
mod parser;
pub mod rules;

pub use buffer::{Claim, WorkingBuffer};
pub use normalizer::{normalize, OCR_REPLACEMENTS};
pub use parser::{CardParser, ExtractionNotice, ExtractionResult, ExtractionStage};

use crate::ocr::OcrResult;

/// Trait for card field extractors.
///
/// Extraction never fails; absent fields come back as empty strings.
pub trait CardExtractor {
    /// Extract card fields from an OCR result.
    fn extract(&self, ocr_result: &OcrResult) -> ExtractionResult;

    /// Extract card fields from plain tokens in scan order.
    fn extract_tokens(&self, tokens: &[String]) -> ExtractionResult;
}
